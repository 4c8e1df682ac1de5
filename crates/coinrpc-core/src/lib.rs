//! Blocking JSON-RPC 1.0 client for Bitcoin-derived cryptocurrency daemons.
//!
//! ```no_run
//! use coinrpc_core::rpc::{ListTransactionsQuery, RpcClient};
//!
//! let client = RpcClient::new("http://127.0.0.1:8332", "user", "pass")?;
//! let info = client.get_info()?;
//! println!("{} blocks, balance {}", info.blocks, info.balance);
//!
//! for tx in client.list_transactions("", ListTransactionsQuery::default())? {
//!     println!("{} {} {}", tx.txid, tx.category, tx.amount);
//! }
//! # Ok::<(), coinrpc_core::CoreError>(())
//! ```

pub mod error;
pub mod rpc;
#[cfg(test)]
pub mod test_util;

pub use error::{CoreError, ProtocolError, TransportError};
pub use rpc::{RpcClient, RpcConfig};
