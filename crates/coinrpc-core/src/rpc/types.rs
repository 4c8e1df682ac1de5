//! Typed response models.
//!
//! Each model is a flat, immutable snapshot of one `result` object and is
//! built through `TryFrom<&serde_json::Value>`. Every field reads exactly one
//! named key; a missing key is an error, never a default.

use serde::Serialize;
use serde_json::Value;

use crate::error::CoreError;

use super::parsing::FieldReader;

// Wires a model's field mapping to `TryFrom<&Value>` under its path prefix.
macro_rules! impl_from_rpc_value {
    ($model:ident, $context:literal) => {
        impl TryFrom<&Value> for $model {
            type Error = CoreError;

            fn try_from(value: &Value) -> Result<Self, Self::Error> {
                Self::parse(value, $context.to_owned())
            }
        }
    };
}

// ==============================================================================
// Node Status
// ==============================================================================

/// Daemon status snapshot from `getinfo`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeInfo {
    pub version: i64,
    pub protocol_version: i64,
    pub wallet_version: i64,
    pub balance: f64,
    pub blocks: u64,
    pub connections: u64,
    pub proxy: String,
    pub difficulty: f64,
    /// Not every daemon version reports this key.
    pub testnet: Option<bool>,
    pub key_pool_oldest: i64,
    pub key_pool_size: u64,
    pub pay_tx_fee: f64,
    pub errors: String,
}

impl NodeInfo {
    pub(super) fn parse(value: &Value, context: String) -> Result<Self, CoreError> {
        let f = FieldReader::new(value, context)?;
        Ok(Self {
            version: f.integer("version")?,
            protocol_version: f.integer("protocolversion")?,
            wallet_version: f.integer("walletversion")?,
            balance: f.float("balance")?,
            blocks: f.integer("blocks")?,
            connections: f.integer("connections")?,
            proxy: f.string("proxy")?,
            difficulty: f.float("difficulty")?,
            testnet: f.optional_boolean("testnet")?,
            key_pool_oldest: f.integer("keypoololdest")?,
            key_pool_size: f.integer("keypoolsize")?,
            pay_tx_fee: f.float("paytxfee")?,
            errors: f.string("errors")?,
        })
    }
}

impl_from_rpc_value!(NodeInfo, "getinfo");

// ==============================================================================
// Wallet Transactions
// ==============================================================================

/// One wallet transaction fetched by id via `gettransaction`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionDetail {
    pub amount: f64,
    pub fee: f64,
    pub confirmations: i64,
    pub block_hash: String,
    pub block_index: i64,
    pub block_time: i64,
    pub txid: String,
    pub time: i64,
    pub time_received: i64,
    pub details: Vec<TransactionDetailLine>,
}

impl TransactionDetail {
    pub(super) fn parse(value: &Value, context: String) -> Result<Self, CoreError> {
        let f = FieldReader::new(value, context)?;
        Ok(Self {
            amount: f.float("amount")?,
            fee: f.float("fee")?,
            confirmations: f.integer("confirmations")?,
            block_hash: f.string("blockhash")?,
            block_index: f.integer("blockindex")?,
            block_time: f.integer("blocktime")?,
            txid: f.string("txid")?,
            time: f.integer("time")?,
            time_received: f.integer("timereceived")?,
            details: f.list("details", TransactionDetailLine::parse)?,
        })
    }
}

impl_from_rpc_value!(TransactionDetail, "gettransaction");

/// One per-output line inside [`TransactionDetail::details`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionDetailLine {
    pub account: String,
    pub address: String,
    pub category: String,
    pub amount: f64,
    pub fee: f64,
}

impl TransactionDetailLine {
    pub(super) fn parse(value: &Value, context: String) -> Result<Self, CoreError> {
        let f = FieldReader::new(value, context)?;
        Ok(Self {
            account: f.string("account")?,
            address: f.string("address")?,
            category: f.string("category")?,
            amount: f.float("amount")?,
            fee: f.float("fee")?,
        })
    }
}

impl_from_rpc_value!(TransactionDetailLine, "details");

/// One entry of a `listtransactions` history page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListedTransaction {
    pub account: String,
    pub address: String,
    pub category: String,
    pub amount: f64,
    pub confirmations: i64,
    pub block_hash: String,
    pub block_index: i64,
    pub txid: String,
    pub time: i64,
}

impl ListedTransaction {
    pub(super) fn parse(value: &Value, context: String) -> Result<Self, CoreError> {
        let f = FieldReader::new(value, context)?;
        Ok(Self {
            account: f.string("account")?,
            address: f.string("address")?,
            category: f.string("category")?,
            amount: f.float("amount")?,
            confirmations: f.integer("confirmations")?,
            block_hash: f.string("blockhash")?,
            block_index: f.integer("blockindex")?,
            txid: f.string("txid")?,
            time: f.integer("time")?,
        })
    }
}

impl_from_rpc_value!(ListedTransaction, "listtransactions");

// ==============================================================================
// Mining
// ==============================================================================

/// Proof-of-work template from `getwork`. All fields are opaque hex.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MiningWork {
    pub midstate: String,
    pub data: String,
    pub hash1: String,
    pub target: String,
    pub algorithm: String,
}

impl MiningWork {
    pub(super) fn parse(value: &Value, context: String) -> Result<Self, CoreError> {
        let f = FieldReader::new(value, context)?;
        Ok(Self {
            midstate: f.string("midstate")?,
            data: f.string("data")?,
            hash1: f.string("hash1")?,
            target: f.string("target")?,
            algorithm: f.string("algorithm")?,
        })
    }
}

impl_from_rpc_value!(MiningWork, "getwork");

// ==============================================================================
// Receipts
// ==============================================================================

/// Aggregate received amount for one account (`listreceivedbyaccount`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountReceipt {
    pub account: String,
    pub amount: f64,
    pub confirmations: i64,
}

impl AccountReceipt {
    pub(super) fn parse(value: &Value, context: String) -> Result<Self, CoreError> {
        let f = FieldReader::new(value, context)?;
        Ok(Self {
            account: f.string("account")?,
            amount: f.float("amount")?,
            confirmations: f.integer("confirmations")?,
        })
    }
}

impl_from_rpc_value!(AccountReceipt, "listreceivedbyaccount");

/// Aggregate received amount for one address (`listreceivedbyaddress`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddressReceipt {
    pub address: String,
    pub amount: f64,
    pub confirmations: i64,
}

impl AddressReceipt {
    pub(super) fn parse(value: &Value, context: String) -> Result<Self, CoreError> {
        let f = FieldReader::new(value, context)?;
        Ok(Self {
            address: f.string("address")?,
            amount: f.float("amount")?,
            confirmations: f.integer("confirmations")?,
        })
    }
}

impl_from_rpc_value!(AddressReceipt, "listreceivedbyaddress");

// ==============================================================================
// Address Validation
// ==============================================================================

/// Result of `validateaddress`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidatedAddress {
    pub is_valid: bool,
    pub address: String,
    pub is_mine: bool,
    pub is_script: bool,
    pub pubkey: String,
    pub is_compressed: bool,
    pub account: String,
}

impl ValidatedAddress {
    pub(super) fn parse(value: &Value, context: String) -> Result<Self, CoreError> {
        let f = FieldReader::new(value, context)?;
        Ok(Self {
            is_valid: f.boolean("isvalid")?,
            address: f.string("address")?,
            is_mine: f.boolean("ismine")?,
            is_script: f.boolean("isscript")?,
            pubkey: f.string("pubkey")?,
            is_compressed: f.boolean("iscompressed")?,
            account: f.string("account")?,
        })
    }
}

impl_from_rpc_value!(ValidatedAddress, "validateaddress");
