//! Maps each parsed subcommand onto its typed client call and renders the
//! result as JSON.

use eyre::WrapErr;
use serde::Serialize;
use serde_json::Value;

use coinrpc_core::rpc::{
    ListTransactionsQuery, MoveOptions, ReceivedQuery, RpcClient, SendOptions, Transport,
};
use coinrpc_core::CoreError;

use crate::cli::Command;

/// Outcome of one dispatched command: an RPC failure is kept typed so the
/// caller can attach hints, rendering failures are plain reports.
pub enum RunError {
    Rpc(CoreError),
    Render(eyre::Report),
}

impl From<CoreError> for RunError {
    fn from(err: CoreError) -> Self {
        Self::Rpc(err)
    }
}

pub fn run<T: Transport>(client: &RpcClient<T>, command: Command) -> Result<Value, RunError> {
    match command {
        Command::BackupWallet { destination } => {
            client.backup_wallet(&destination)?;
            Ok(Value::Null)
        }
        Command::GetAccount { address } => render(client.get_account(&address)?),
        Command::GetAccountAddress { account } => render(client.get_account_address(&account)?),
        Command::GetAddressesByAccount { account } => {
            render(client.get_addresses_by_account(&account)?)
        }
        Command::GetBalance { account, min_conf } => match account {
            Some(account) => render(client.get_account_balance(&account, min_conf)?),
            None => render(client.get_balance()?),
        },
        Command::GetBlockByCount { height } => render(client.get_block_by_count(height)?),
        Command::GetBlockCount => render(client.get_block_count()?),
        Command::GetBlockNumber => render(client.get_block_number()?),
        Command::GetConnectionCount => render(client.get_connection_count()?),
        Command::GetDifficulty => render(client.get_difficulty()?),
        Command::GetGenerate => render(client.get_generate()?),
        Command::GetHashesPerSec => render(client.get_hashes_per_sec()?),
        Command::GetInfo => render(client.get_info()?),
        Command::GetNewAddress { account } => render(client.get_new_address(&account)?),
        Command::GetReceivedByAccount { account, min_conf } => {
            render(client.get_received_by_account(&account, min_conf)?)
        }
        Command::GetTransaction { txid } => render(client.get_transaction(&txid)?),
        Command::GetWork { data } => match data {
            Some(data) => render(client.submit_work(&data)?),
            None => render(client.get_work()?),
        },
        Command::Help { command } => render(client.help(command.as_deref())?),
        Command::ListAccounts { min_conf } => render(client.list_accounts(min_conf)?),
        Command::ListReceivedByAccount {
            min_conf,
            include_empty,
        } => render(client.list_received_by_account(ReceivedQuery {
            min_conf,
            include_empty,
        })?),
        Command::ListReceivedByAddress {
            min_conf,
            include_empty,
        } => render(client.list_received_by_address(ReceivedQuery {
            min_conf,
            include_empty,
        })?),
        Command::ListTransactions {
            account,
            count,
            from,
        } => render(client.list_transactions(&account, ListTransactionsQuery { count, from })?),
        Command::Move {
            from_account,
            to_address,
            amount,
            min_conf,
            comment,
            comment_to,
        } => render(client.move_funds(
            &from_account,
            &to_address,
            amount,
            MoveOptions {
                min_conf,
                comment,
                comment_to,
            },
        )?),
        Command::SendToAddress {
            address,
            amount,
            comment,
            comment_to,
        } => render(client.send_to_address(
            &address,
            amount,
            SendOptions {
                comment,
                comment_to,
            },
        )?),
        Command::SetAccount { address, account } => {
            client.set_account(&address, &account)?;
            Ok(Value::Null)
        }
        Command::SetGenerate {
            generate,
            proc_limit,
        } => {
            client.set_generate(generate, proc_limit)?;
            Ok(Value::Null)
        }
        Command::Stop => {
            client.stop()?;
            Ok(Value::Null)
        }
        Command::ValidateAddress { address } => render(client.validate_address(&address)?),
    }
}

fn render<S: Serialize>(value: S) -> Result<Value, RunError> {
    serde_json::to_value(value)
        .wrap_err("render result as JSON")
        .map_err(RunError::Render)
}
