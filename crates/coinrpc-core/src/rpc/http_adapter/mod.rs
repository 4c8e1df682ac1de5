//! Blocking HTTP transport for daemon JSON-RPC endpoints.
//!
//! Implements [`Transport`](super::Transport) with a `reqwest` blocking
//! client: `POST` with `Content-Type: application/json-rpc` and HTTP basic
//! auth, credentials taken from explicit user/pass or a cookie file.

mod client;
mod connection;

pub use client::{HttpTransport, RpcConfig};
