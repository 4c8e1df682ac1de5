use std::collections::BTreeMap;

use serde_json::{json, Value};
use tracing::{debug, trace};

use crate::error::CoreError;

use super::http_adapter::{HttpTransport, RpcConfig};
use super::parsing::{parse_bool, parse_f64, parse_integer, parse_list, parse_string};
use super::protocol::{check_error, decode_response, encode_request, take_result};
use super::types::{
    AccountReceipt, AddressReceipt, ListedTransaction, MiningWork, NodeInfo, TransactionDetail,
    ValidatedAddress,
};
use super::Transport;

// ==============================================================================
// Parameter Defaults
// ==============================================================================

/// Minimum confirmations the daemon assumes when a call omits the argument.
pub const DEFAULT_MIN_CONF: u32 = 1;
/// Page size for `listtransactions`.
pub const DEFAULT_LIST_COUNT: u32 = 5;
/// Page offset for `listtransactions`.
pub const DEFAULT_LIST_FROM: u32 = 0;
/// Generation thread limit for `setgenerate`.
pub const DEFAULT_GENERATE_PROC_LIMIT: i32 = 1;

/// Arguments shared by `listreceivedbyaccount` and `listreceivedbyaddress`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReceivedQuery {
    pub min_conf: u32,
    pub include_empty: bool,
}

impl Default for ReceivedQuery {
    fn default() -> Self {
        Self {
            min_conf: DEFAULT_MIN_CONF,
            include_empty: false,
        }
    }
}

/// Paging for `listtransactions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListTransactionsQuery {
    pub count: u32,
    pub from: u32,
}

impl Default for ListTransactionsQuery {
    fn default() -> Self {
        Self {
            count: DEFAULT_LIST_COUNT,
            from: DEFAULT_LIST_FROM,
        }
    }
}

/// Optional arguments of `move`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOptions {
    pub min_conf: u32,
    pub comment: String,
    pub comment_to: String,
}

impl Default for MoveOptions {
    fn default() -> Self {
        Self {
            min_conf: DEFAULT_MIN_CONF,
            comment: String::new(),
            comment_to: String::new(),
        }
    }
}

/// Optional arguments of `sendtoaddress`. Both comments default to empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SendOptions {
    pub comment: String,
    pub comment_to: String,
}

// ==============================================================================
// RpcClient
// ==============================================================================

/// Typed JSON-RPC 1.0 client for Bitcoin-derived daemons.
///
/// Every operation performs exactly one blocking round trip through the
/// transport. Request state is built per call, so a client can be shared
/// across threads; the daemon remains the only validator of arguments.
pub struct RpcClient<T = HttpTransport> {
    transport: T,
}

impl RpcClient<HttpTransport> {
    /// Connect to `url` with HTTP basic credentials and no timeout.
    pub fn new(url: &str, user: &str, pass: &str) -> Result<Self, CoreError> {
        Self::from_config(RpcConfig::new(url).with_credentials(user, pass))
    }

    pub fn from_config(config: RpcConfig) -> Result<Self, CoreError> {
        HttpTransport::new(config).map(Self::with_transport)
    }
}

impl<T: Transport> RpcClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Send one JSON-RPC request and return the whole parsed response
    /// envelope, `result` and `error` included.
    ///
    /// `params` are emitted in the given order; an empty vector sends `[]`.
    pub fn invoke(&self, method: &str, params: Vec<Value>) -> Result<Value, CoreError> {
        debug!(rpc.method = method, rpc.params = params.len(), "rpc call");
        let body = encode_request(method, &params)?;

        let reply = self.transport.post(body)?;
        debug!(
            rpc.method = method,
            status = reply.status,
            body_len = reply.body.len(),
            "rpc response"
        );
        trace!(
            rpc.method = method,
            body = %String::from_utf8_lossy(&reply.body),
            "rpc response body"
        );

        decode_response(reply)
    }

    fn call(&self, method: &str, params: Vec<Value>) -> Result<Value, CoreError> {
        take_result(self.invoke(method, params)?)
    }

    fn call_void(&self, method: &str, params: Vec<Value>) -> Result<(), CoreError> {
        check_error(&self.invoke(method, params)?)
    }

    fn call_string(&self, method: &str, params: Vec<Value>) -> Result<String, CoreError> {
        parse_string(&self.call(method, params)?, method)
    }

    fn call_f64(&self, method: &str, params: Vec<Value>) -> Result<f64, CoreError> {
        parse_f64(&self.call(method, params)?, method)
    }

    fn call_u64(&self, method: &str, params: Vec<Value>) -> Result<u64, CoreError> {
        parse_integer(&self.call(method, params)?, method)
    }

    fn call_bool(&self, method: &str, params: Vec<Value>) -> Result<bool, CoreError> {
        parse_bool(&self.call(method, params)?, method)
    }

    // ==========================================================================
    // Wallet
    // ==========================================================================

    pub fn backup_wallet(&self, destination: &str) -> Result<(), CoreError> {
        self.call_void("backupwallet", vec![json!(destination)])
    }

    /// Account that owns `address`.
    pub fn get_account(&self, address: &str) -> Result<String, CoreError> {
        self.call_string("getaccount", vec![json!(address)])
    }

    /// Current receiving address for `account`.
    pub fn get_account_address(&self, account: &str) -> Result<String, CoreError> {
        self.call_string("getaccountaddress", vec![json!(account)])
    }

    pub fn get_addresses_by_account(&self, account: &str) -> Result<Vec<String>, CoreError> {
        let result = self.call("getaddressesbyaccount", vec![json!(account)])?;
        parse_list(&result, "getaddressesbyaccount", |item, path| {
            parse_string(item, &path)
        })
    }

    /// Total wallet balance, using the daemon's own account and confirmation
    /// defaults (no parameters are sent).
    pub fn get_balance(&self) -> Result<f64, CoreError> {
        self.call_f64("getbalance", Vec::new())
    }

    /// Balance of one account counting outputs with at least `min_conf`
    /// confirmations.
    pub fn get_account_balance(&self, account: &str, min_conf: u32) -> Result<f64, CoreError> {
        self.call_f64("getbalance", vec![json!(account), json!(min_conf)])
    }

    pub fn get_new_address(&self, account: &str) -> Result<String, CoreError> {
        self.call_string("getnewaddress", vec![json!(account)])
    }

    pub fn get_received_by_account(&self, account: &str, min_conf: u32) -> Result<f64, CoreError> {
        self.call_f64("getreceivedbyaccount", vec![json!(account), json!(min_conf)])
    }

    pub fn get_transaction(&self, txid: &str) -> Result<TransactionDetail, CoreError> {
        let result = self.call("gettransaction", vec![json!(txid)])?;
        TransactionDetail::try_from(&result)
    }

    /// Balance per account name.
    pub fn list_accounts(&self, min_conf: u32) -> Result<BTreeMap<String, f64>, CoreError> {
        let result = self.call("listaccounts", vec![json!(min_conf)])?;
        let accounts = result
            .as_object()
            .ok_or_else(|| CoreError::mismatch("listaccounts", "object", &result))?;
        accounts
            .iter()
            .map(|(name, balance)| {
                parse_f64(balance, &format!("listaccounts.{name}")).map(|b| (name.clone(), b))
            })
            .collect()
    }

    pub fn list_received_by_account(
        &self,
        query: ReceivedQuery,
    ) -> Result<Vec<AccountReceipt>, CoreError> {
        let result = self.call(
            "listreceivedbyaccount",
            vec![json!(query.min_conf), json!(query.include_empty)],
        )?;
        parse_list(&result, "listreceivedbyaccount", AccountReceipt::parse)
    }

    pub fn list_received_by_address(
        &self,
        query: ReceivedQuery,
    ) -> Result<Vec<AddressReceipt>, CoreError> {
        let result = self.call(
            "listreceivedbyaddress",
            vec![json!(query.min_conf), json!(query.include_empty)],
        )?;
        parse_list(&result, "listreceivedbyaddress", AddressReceipt::parse)
    }

    pub fn list_transactions(
        &self,
        account: &str,
        query: ListTransactionsQuery,
    ) -> Result<Vec<ListedTransaction>, CoreError> {
        let result = self.call(
            "listtransactions",
            vec![json!(account), json!(query.count), json!(query.from)],
        )?;
        parse_list(&result, "listtransactions", ListedTransaction::parse)
    }

    /// Move `amount` out of `from_account` (RPC `move`).
    pub fn move_funds(
        &self,
        from_account: &str,
        to_address: &str,
        amount: f64,
        options: MoveOptions,
    ) -> Result<bool, CoreError> {
        self.call_bool(
            "move",
            vec![
                json!(from_account),
                json!(to_address),
                json!(amount),
                json!(options.min_conf),
                json!(options.comment),
                json!(options.comment_to),
            ],
        )
    }

    /// Returns the id of the broadcast transaction.
    pub fn send_to_address(
        &self,
        address: &str,
        amount: f64,
        options: SendOptions,
    ) -> Result<String, CoreError> {
        self.call_string(
            "sendtoaddress",
            vec![
                json!(address),
                json!(amount),
                json!(options.comment),
                json!(options.comment_to),
            ],
        )
    }

    pub fn set_account(&self, address: &str, account: &str) -> Result<(), CoreError> {
        self.call_void("setaccount", vec![json!(address), json!(account)])
    }

    pub fn validate_address(&self, address: &str) -> Result<ValidatedAddress, CoreError> {
        let result = self.call("validateaddress", vec![json!(address)])?;
        ValidatedAddress::try_from(&result)
    }

    // ==========================================================================
    // Chain & Network
    // ==========================================================================

    /// Block hash at `height`.
    pub fn get_block_by_count(&self, height: u64) -> Result<String, CoreError> {
        self.call_string("getblockbycount", vec![json!(height)])
    }

    pub fn get_block_count(&self) -> Result<u64, CoreError> {
        self.call_u64("getblockcount", Vec::new())
    }

    pub fn get_block_number(&self) -> Result<u64, CoreError> {
        self.call_u64("getblocknumber", Vec::new())
    }

    pub fn get_connection_count(&self) -> Result<u64, CoreError> {
        self.call_u64("getconnectioncount", Vec::new())
    }

    pub fn get_difficulty(&self) -> Result<f64, CoreError> {
        self.call_f64("getdifficulty", Vec::new())
    }

    pub fn get_info(&self) -> Result<NodeInfo, CoreError> {
        let result = self.call("getinfo", Vec::new())?;
        NodeInfo::try_from(&result)
    }

    /// Help text for `command`, or the command list when `None`.
    pub fn help(&self, command: Option<&str>) -> Result<String, CoreError> {
        let params = command.map(|c| vec![json!(c)]).unwrap_or_default();
        self.call_string("help", params)
    }

    pub fn stop(&self) -> Result<(), CoreError> {
        self.call_void("stop", Vec::new())
    }

    // ==========================================================================
    // Mining
    // ==========================================================================

    pub fn get_generate(&self) -> Result<bool, CoreError> {
        self.call_bool("getgenerate", Vec::new())
    }

    pub fn get_hashes_per_sec(&self) -> Result<f64, CoreError> {
        self.call_f64("gethashespersec", Vec::new())
    }

    /// Fetch a fresh proof-of-work template (`getwork` without data).
    pub fn get_work(&self) -> Result<MiningWork, CoreError> {
        let result = self.call("getwork", Vec::new())?;
        MiningWork::try_from(&result)
    }

    /// Submit a solved block header (`getwork` with data). Returns whether
    /// the daemon accepted it.
    pub fn submit_work(&self, data: &str) -> Result<bool, CoreError> {
        self.call_bool("getwork", vec![json!(data)])
    }

    /// `proc_limit` of `-1` lets the daemon use every core.
    pub fn set_generate(&self, generate: bool, proc_limit: i32) -> Result<(), CoreError> {
        self.call_void("setgenerate", vec![json!(generate), json!(proc_limit)])
    }
}
