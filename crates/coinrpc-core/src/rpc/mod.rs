//! JSON-RPC client layer for Bitcoin-derived daemons.
//!
//! Defines the [`Transport`] seam, the typed [`RpcClient`] built on top of
//! it, the production HTTP transport ([`HttpTransport`]) and the response
//! models in [`types`]. A scripted test transport lives in `mock`.

mod client;
mod http_adapter;
#[cfg(test)]
pub mod mock;
mod parsing;
mod protocol;
pub mod types;

pub use client::{
    ListTransactionsQuery, MoveOptions, ReceivedQuery, RpcClient, SendOptions,
    DEFAULT_GENERATE_PROC_LIMIT, DEFAULT_LIST_COUNT, DEFAULT_LIST_FROM, DEFAULT_MIN_CONF,
};
pub use http_adapter::{HttpTransport, RpcConfig};
pub use types::{
    AccountReceipt, AddressReceipt, ListedTransaction, MiningWork, NodeInfo, TransactionDetail,
    TransactionDetailLine, ValidatedAddress,
};

use crate::error::CoreError;

/// Raw HTTP outcome of one POST: status code and the undecoded body bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: Vec<u8>,
}

/// One blocking request/response exchange with the daemon endpoint.
///
/// Implementations own whatever connection resources they need; each call
/// carries a complete, independent request body.
pub trait Transport: Send + Sync {
    /// POST `body` (a serialized JSON-RPC envelope) and block until the full
    /// response is read.
    fn post(&self, body: Vec<u8>) -> Result<HttpReply, CoreError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn post(&self, body: Vec<u8>) -> Result<HttpReply, CoreError> {
        (**self).post(body)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn post(&self, body: Vec<u8>) -> Result<HttpReply, CoreError> {
        (**self).post(body)
    }
}
