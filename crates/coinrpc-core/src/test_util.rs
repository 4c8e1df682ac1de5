//! Shared test fixtures for `coinrpc-core` unit tests.
//!
//! Canned `result` payloads shaped like real daemon output, plus envelope
//! helpers, so model and client tests share one source of truth.

use serde_json::{json, Value};

pub const TXID: &str = "4a5e1e4baab89f3a32518a88c31bc87f618f76673e2cc77ab2127b7afdeda33b";
pub const BLOCK_HASH: &str = "000000000019d6689c085ae165831e934ff763ae46a2a6c172b3f1b60a8ce26f";
pub const ADDRESS: &str = "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa";
pub const OTHER_ADDRESS: &str = "1BoatSLRHtKNngkdXEeobR76b53LETtpyT";
pub const PUBKEY: &str = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";

// ==============================================================================
// Envelopes
// ==============================================================================

/// A successful JSON-RPC 1.0 response body carrying `result`.
pub fn envelope(result: Value) -> String {
    json!({ "result": result, "error": null, "id": "1" }).to_string()
}

/// A failed JSON-RPC 1.0 response body carrying a standard error object.
pub fn error_envelope(code: i64, message: &str) -> String {
    json!({
        "result": null,
        "error": { "code": code, "message": message },
        "id": "1"
    })
    .to_string()
}

// ==============================================================================
// Result Payloads
// ==============================================================================

pub fn getinfo_result() -> Value {
    json!({
        "version": 1,
        "protocolversion": 2,
        "walletversion": 3,
        "balance": 1.5,
        "blocks": 100,
        "connections": 4,
        "proxy": "",
        "difficulty": 2.5,
        "keypoololdest": 10,
        "keypoolsize": 20,
        "paytxfee": 0.0001,
        "errors": ""
    })
}

pub fn gettransaction_result() -> Value {
    json!({
        "amount": -0.5,
        "fee": -0.0002,
        "confirmations": 6,
        "blockhash": BLOCK_HASH,
        "blockindex": 3,
        "blocktime": 1_400_000_100,
        "txid": TXID,
        "time": 1_400_000_000,
        "timereceived": 1_400_000_001,
        "details": [
            {
                "account": "savings",
                "address": ADDRESS,
                "category": "send",
                "amount": -0.5,
                "fee": -0.0002
            },
            {
                "account": "",
                "address": OTHER_ADDRESS,
                "category": "receive",
                "amount": 0.5,
                "fee": 0.0
            }
        ]
    })
}

pub fn getwork_result() -> Value {
    json!({
        "midstate": "aa".repeat(32),
        "data": "bb".repeat(128),
        "hash1": "cc".repeat(64),
        "target": "ff".repeat(28) + "00000000",
        "algorithm": "scrypt:1024,1,1"
    })
}

/// One `listtransactions` entry; `block_index` varies per entry.
pub fn listtransactions_entry(block_index: i64) -> Value {
    json!({
        "account": "savings",
        "address": ADDRESS,
        "category": "receive",
        "amount": 2.25,
        "confirmations": 12,
        "blockhash": BLOCK_HASH,
        "blockindex": block_index,
        "txid": TXID,
        "time": 1_400_000_000
    })
}

pub fn validateaddress_result() -> Value {
    json!({
        "isvalid": true,
        "address": ADDRESS,
        "ismine": true,
        "isscript": false,
        "pubkey": PUBKEY,
        "iscompressed": true,
        "account": "savings"
    })
}
