mod cli;
mod commands;

use clap::Parser;
use eyre::{eyre, WrapErr};

use coinrpc_core::{CoreError, ProtocolError, RpcClient, TransportError};

use crate::commands::RunError;

fn main() -> eyre::Result<()> {
    let args = cli::Cli::parse();

    // Logs go to stderr; stdout carries only the JSON result.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .init();

    let client = RpcClient::from_config(args.rpc_config()).wrap_err("configure RPC client")?;
    let method = args.command.rpc_method();
    tracing::info!(url = %args.rpc_url, method, "calling daemon");

    let output = match commands::run(&client, args.command) {
        Ok(output) => output,
        Err(RunError::Rpc(err)) => {
            let message = format_rpc_error(&args.rpc_url, &err);
            return Err(eyre!(message).wrap_err(format!("while calling `{method}`")));
        }
        Err(RunError::Render(report)) => return Err(report),
    };

    let rendered = serde_json::to_string_pretty(&output).wrap_err("serialize output")?;
    println!("{rendered}");
    Ok(())
}

fn format_rpc_error(rpc_url: &str, err: &CoreError) -> String {
    let mut lines = vec![format!("RPC error: {err}")];

    let hint = match err {
        CoreError::Transport(TransportError::Request(source)) if source.is_connect() => Some(
            format!("hint: could not connect to `{rpc_url}`; verify the daemon is running with -server and the RPC port is reachable"),
        ),
        CoreError::Transport(TransportError::Request(source)) if source.is_timeout() => Some(
            "hint: the daemon did not answer in time; raise --timeout-secs or check daemon load"
                .to_owned(),
        ),
        CoreError::Transport(TransportError::Status { status: 401 | 403, .. }) => Some(
            "hint: authentication failed; verify --rpc-user/--rpc-pass or --rpc-cookie-file"
                .to_owned(),
        ),
        CoreError::Transport(TransportError::Status { status: 404, .. }) => Some(
            "hint: endpoint path is invalid; verify the full RPC URL".to_owned(),
        ),
        CoreError::Protocol(ProtocolError::Server { code: -32601, .. }) => Some(
            "hint: the daemon does not offer this method; newer daemons removed the legacy account and getwork APIs"
                .to_owned(),
        ),
        CoreError::Protocol(ProtocolError::InvalidJson { .. }) => Some(
            "hint: the endpoint did not answer with JSON; verify the URL points at the daemon RPC port"
                .to_owned(),
        ),
        _ => None,
    };
    lines.extend(hint);

    lines.join("\n")
}
