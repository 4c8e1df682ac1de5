use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgAction, Parser, Subcommand};

use coinrpc_core::rpc::{
    RpcConfig, DEFAULT_GENERATE_PROC_LIMIT, DEFAULT_LIST_COUNT, DEFAULT_LIST_FROM,
    DEFAULT_MIN_CONF,
};

/// coinrpc: call one JSON-RPC method on a Bitcoin-derived daemon and print
/// the typed result as JSON.
#[derive(Parser)]
#[command(version, about, disable_help_subcommand = true)]
pub struct Cli {
    /// Daemon RPC URL.
    #[arg(long, default_value = "http://127.0.0.1:8332", env = "COINRPC_URL")]
    pub rpc_url: String,

    /// RPC username (must be paired with --rpc-pass).
    #[arg(long, env = "COINRPC_USER")]
    pub rpc_user: Option<String>,

    /// RPC password (must be paired with --rpc-user).
    #[arg(long, env = "COINRPC_PASS", hide_env_values = true)]
    pub rpc_pass: Option<String>,

    /// Daemon cookie file, used when no user/pass is given.
    #[arg(long, env = "COINRPC_COOKIE_FILE")]
    pub rpc_cookie_file: Option<PathBuf>,

    /// Overall request timeout in seconds. Unbounded when omitted.
    #[arg(long, env = "COINRPC_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn rpc_config(&self) -> RpcConfig {
        let mut config = RpcConfig::new(self.rpc_url.as_str());
        config.user = self.rpc_user.clone();
        config.pass = self.rpc_pass.clone();
        config.cookie_file = self.rpc_cookie_file.clone();
        config.timeout = self.timeout_secs.map(Duration::from_secs);
        config
    }
}

/// One subcommand per daemon RPC method, named exactly like the method.
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Copy the wallet file to DESTINATION on the daemon host.
    #[command(name = "backupwallet")]
    BackupWallet { destination: String },

    /// Account owning ADDRESS.
    #[command(name = "getaccount")]
    GetAccount { address: String },

    /// Current receiving address of ACCOUNT.
    #[command(name = "getaccountaddress")]
    GetAccountAddress { account: String },

    /// All addresses of ACCOUNT.
    #[command(name = "getaddressesbyaccount")]
    GetAddressesByAccount { account: String },

    /// Wallet balance, or one account's balance when ACCOUNT is given.
    #[command(name = "getbalance")]
    GetBalance {
        account: Option<String>,
        /// Only used together with ACCOUNT.
        #[arg(long, default_value_t = DEFAULT_MIN_CONF)]
        min_conf: u32,
    },

    /// Block hash at HEIGHT.
    #[command(name = "getblockbycount")]
    GetBlockByCount { height: u64 },

    #[command(name = "getblockcount")]
    GetBlockCount,

    #[command(name = "getblocknumber")]
    GetBlockNumber,

    #[command(name = "getconnectioncount")]
    GetConnectionCount,

    #[command(name = "getdifficulty")]
    GetDifficulty,

    #[command(name = "getgenerate")]
    GetGenerate,

    #[command(name = "gethashespersec")]
    GetHashesPerSec,

    #[command(name = "getinfo")]
    GetInfo,

    /// New receiving address for ACCOUNT.
    #[command(name = "getnewaddress")]
    GetNewAddress {
        #[arg(default_value = "")]
        account: String,
    },

    #[command(name = "getreceivedbyaccount")]
    GetReceivedByAccount {
        account: String,
        #[arg(long, default_value_t = DEFAULT_MIN_CONF)]
        min_conf: u32,
    },

    #[command(name = "gettransaction")]
    GetTransaction { txid: String },

    /// Fetch a work template, or submit DATA as a solution.
    #[command(name = "getwork")]
    GetWork { data: Option<String> },

    /// Daemon help for COMMAND, or the daemon's command list.
    #[command(name = "help")]
    Help { command: Option<String> },

    #[command(name = "listaccounts")]
    ListAccounts {
        #[arg(long, default_value_t = DEFAULT_MIN_CONF)]
        min_conf: u32,
    },

    #[command(name = "listreceivedbyaccount")]
    ListReceivedByAccount {
        #[arg(long, default_value_t = DEFAULT_MIN_CONF)]
        min_conf: u32,
        #[arg(long)]
        include_empty: bool,
    },

    #[command(name = "listreceivedbyaddress")]
    ListReceivedByAddress {
        #[arg(long, default_value_t = DEFAULT_MIN_CONF)]
        min_conf: u32,
        #[arg(long)]
        include_empty: bool,
    },

    #[command(name = "listtransactions")]
    ListTransactions {
        account: String,
        #[arg(long, default_value_t = DEFAULT_LIST_COUNT)]
        count: u32,
        #[arg(long, default_value_t = DEFAULT_LIST_FROM)]
        from: u32,
    },

    #[command(name = "move")]
    Move {
        from_account: String,
        to_address: String,
        amount: f64,
        #[arg(long, default_value_t = DEFAULT_MIN_CONF)]
        min_conf: u32,
        #[arg(long, default_value = "")]
        comment: String,
        #[arg(long, default_value = "")]
        comment_to: String,
    },

    /// Send AMOUNT to ADDRESS; prints the transaction id.
    #[command(name = "sendtoaddress")]
    SendToAddress {
        address: String,
        amount: f64,
        #[arg(long, default_value = "")]
        comment: String,
        #[arg(long, default_value = "")]
        comment_to: String,
    },

    #[command(name = "setaccount")]
    SetAccount { address: String, account: String },

    #[command(name = "setgenerate")]
    SetGenerate {
        #[arg(action = ArgAction::Set)]
        generate: bool,
        /// Generation threads; -1 uses every core.
        #[arg(long, default_value_t = DEFAULT_GENERATE_PROC_LIMIT, allow_negative_numbers = true)]
        proc_limit: i32,
    },

    #[command(name = "stop")]
    Stop,

    #[command(name = "validateaddress")]
    ValidateAddress { address: String },
}

impl Command {
    /// Daemon method this subcommand calls.
    pub fn rpc_method(&self) -> &'static str {
        match self {
            Self::BackupWallet { .. } => "backupwallet",
            Self::GetAccount { .. } => "getaccount",
            Self::GetAccountAddress { .. } => "getaccountaddress",
            Self::GetAddressesByAccount { .. } => "getaddressesbyaccount",
            Self::GetBalance { .. } => "getbalance",
            Self::GetBlockByCount { .. } => "getblockbycount",
            Self::GetBlockCount => "getblockcount",
            Self::GetBlockNumber => "getblocknumber",
            Self::GetConnectionCount => "getconnectioncount",
            Self::GetDifficulty => "getdifficulty",
            Self::GetGenerate => "getgenerate",
            Self::GetHashesPerSec => "gethashespersec",
            Self::GetInfo => "getinfo",
            Self::GetNewAddress { .. } => "getnewaddress",
            Self::GetReceivedByAccount { .. } => "getreceivedbyaccount",
            Self::GetTransaction { .. } => "gettransaction",
            Self::GetWork { .. } => "getwork",
            Self::Help { .. } => "help",
            Self::ListAccounts { .. } => "listaccounts",
            Self::ListReceivedByAccount { .. } => "listreceivedbyaccount",
            Self::ListReceivedByAddress { .. } => "listreceivedbyaddress",
            Self::ListTransactions { .. } => "listtransactions",
            Self::Move { .. } => "move",
            Self::SendToAddress { .. } => "sendtoaddress",
            Self::SetAccount { .. } => "setaccount",
            Self::SetGenerate { .. } => "setgenerate",
            Self::Stop => "stop",
            Self::ValidateAddress { .. } => "validateaddress",
        }
    }
}
