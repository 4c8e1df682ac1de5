use std::net::TcpListener;
use std::sync::{Arc, Mutex, Once};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use coinrpc_core::rpc::{RpcClient, RpcConfig};
use coinrpc_core::{CoreError, ProtocolError, TransportError};
use serde_json::{json, Value};
use tokio::runtime::Runtime;

static TRACING_INIT: Once = Once::new();

fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("coinrpc_core=debug")),
            )
            .with_test_writer()
            .try_init();
    });
}

// ==============================================================================
// Loopback Daemon
// ==============================================================================

/// One request as the loopback daemon received it.
struct Captured {
    method: Method,
    headers: HeaderMap,
    body: Bytes,
}

impl Captured {
    fn json_body(&self) -> Value {
        serde_json::from_slice(&self.body).expect("request body must be JSON")
    }
}

#[derive(Clone)]
struct DaemonState {
    status: StatusCode,
    reply: Bytes,
    seen: Arc<Mutex<Vec<Captured>>>,
}

async fn answer(
    State(state): State<DaemonState>,
    method: Method,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    state
        .seen
        .lock()
        .expect("capture lock poisoned")
        .push(Captured {
            method,
            headers,
            body,
        });
    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.reply,
    )
}

/// An axum stub on its own runtime that answers every POST to `/` with a
/// fixed status and body.
struct LoopbackDaemon {
    url: String,
    seen: Arc<Mutex<Vec<Captured>>>,
    _runtime: Runtime,
}

impl LoopbackDaemon {
    fn start(status: StatusCode, reply: impl Into<Bytes>) -> Self {
        let runtime = Runtime::new().expect("test runtime must start");
        let seen = Arc::new(Mutex::new(Vec::new()));
        let app = Router::new()
            .route("/", post(answer))
            .with_state(DaemonState {
                status,
                reply: reply.into(),
                seen: Arc::clone(&seen),
            });

        let listener = runtime
            .block_on(tokio::net::TcpListener::bind("127.0.0.1:0"))
            .expect("loopback bind must succeed");
        let addr = listener.local_addr().expect("listener must have an address");
        runtime.spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("loopback daemon must serve");
        });

        Self {
            url: format!("http://{addr}/"),
            seen,
            _runtime: runtime,
        }
    }

    fn single_request(&self) -> Captured {
        let mut seen = self.seen.lock().expect("capture lock poisoned");
        assert_eq!(seen.len(), 1, "exactly one request must reach the daemon");
        seen.pop().expect("one request was recorded")
    }
}

fn header_value(captured: &Captured, name: header::HeaderName) -> Option<&str> {
    captured
        .headers
        .get(name)
        .and_then(|value| value.to_str().ok())
}

fn ok_envelope(result: Value) -> String {
    json!({ "result": result, "error": null, "id": "1" }).to_string()
}

// ==============================================================================
// Tests
// ==============================================================================

#[test]
fn posts_json_rpc_envelope_with_basic_auth() {
    init_tracing();
    let daemon = LoopbackDaemon::start(StatusCode::OK, ok_envelope(json!(42)));

    let client = RpcClient::new(&daemon.url, "alice", "secret").expect("client must build");
    let count = client.get_block_count().expect("getblockcount must succeed");
    assert_eq!(count, 42);

    let captured = daemon.single_request();
    assert_eq!(captured.method, Method::POST);
    assert_eq!(
        header_value(&captured, header::CONTENT_TYPE),
        Some("application/json-rpc")
    );
    assert_eq!(
        header_value(&captured, header::AUTHORIZATION),
        Some("Basic YWxpY2U6c2VjcmV0")
    );
    assert_eq!(
        captured.json_body(),
        json!({"jsonrpc": "1.0", "id": "1", "method": "getblockcount", "params": []})
    );
}

#[test]
fn parses_getinfo_over_http() {
    init_tracing();
    let daemon = LoopbackDaemon::start(
        StatusCode::OK,
        json!({"result": {
            "version": 1, "protocolversion": 2, "walletversion": 3, "balance": 1.5,
            "blocks": 100, "connections": 4, "proxy": "", "difficulty": 2.5,
            "keypoololdest": 10, "keypoolsize": 20, "paytxfee": 0.0001, "errors": ""
        }})
        .to_string(),
    );

    let client = RpcClient::new(&daemon.url, "alice", "secret").expect("client must build");
    let info = client.get_info().expect("getinfo must succeed");
    assert_eq!(info.blocks, 100);
    assert_eq!(info.balance, 1.5);
    assert_eq!(info.pay_tx_fee, 0.0001);

    assert_eq!(daemon.single_request().json_body()["method"], json!("getinfo"));
}

#[test]
fn sends_params_in_caller_order() {
    init_tracing();
    let daemon = LoopbackDaemon::start(StatusCode::OK, ok_envelope(json!({})));

    let client = RpcClient::new(&daemon.url, "alice", "secret").expect("client must build");
    let envelope = client
        .invoke("custom", vec![json!("abc"), json!(5)])
        .expect("invoke must succeed");
    assert_eq!(envelope["result"], json!({}));

    assert_eq!(daemon.single_request().json_body()["params"], json!(["abc", 5]));
}

#[test]
fn http_500_with_rpc_error_surfaces_daemon_message() {
    init_tracing();
    let daemon = LoopbackDaemon::start(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"result": null, "error": {"code": -5, "message": "Invalid Bitcoin address"}, "id": "1"})
            .to_string(),
    );

    let client = RpcClient::new(&daemon.url, "alice", "secret").expect("client must build");
    let err = client
        .validate_address("not-an-address")
        .expect_err("daemon error must surface");
    assert!(matches!(
        err,
        CoreError::Protocol(ProtocolError::Server { code: -5, ref message })
            if message == "Invalid Bitcoin address"
    ));
}

#[test]
fn http_401_without_rpc_body_is_transport_error() {
    init_tracing();
    let daemon = LoopbackDaemon::start(StatusCode::UNAUTHORIZED, Bytes::new());

    let client = RpcClient::new(&daemon.url, "alice", "wrong").expect("client must build");
    let err = client.get_info().expect_err("unauthorized must fail");
    assert!(matches!(
        err,
        CoreError::Transport(TransportError::Status { status: 401, .. })
    ));
}

#[test]
fn non_json_body_is_protocol_error() {
    init_tracing();
    let daemon = LoopbackDaemon::start(StatusCode::OK, "<html>maintenance</html>");

    let client = RpcClient::new(&daemon.url, "alice", "secret").expect("client must build");
    let err = client.get_difficulty().expect_err("HTML body must fail");
    assert!(matches!(
        err,
        CoreError::Protocol(ProtocolError::InvalidJson { .. })
    ));
}

#[test]
fn invalid_utf8_in_result_string_is_protocol_error() {
    init_tracing();
    let daemon = LoopbackDaemon::start(
        StatusCode::OK,
        &b"{\"result\":\"ab\xffcd\",\"error\":null,\"id\":\"1\"}"[..],
    );

    let client = RpcClient::new(&daemon.url, "alice", "secret").expect("client must build");
    let err = client
        .get_account("mz6sL7vnku5bZy8dHhWuAGMdmS6FdVksJK")
        .expect_err("invalid UTF-8 must not be repaired into a string");
    assert!(matches!(
        err,
        CoreError::Protocol(ProtocolError::InvalidJson { .. })
    ));
}

#[test]
fn connection_refused_is_transport_error() {
    init_tracing();
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("loopback bind must succeed");
        listener.local_addr().expect("listener must have an address")
    };

    let client = RpcClient::from_config(
        RpcConfig::new(format!("http://{addr}/"))
            .with_credentials("alice", "secret")
            .with_connect_timeout(Duration::from_secs(5)),
    )
    .expect("client must build");
    let err = client.get_block_count().expect_err("closed port must fail");
    assert!(matches!(
        err,
        CoreError::Transport(TransportError::Request(_))
    ));
}

#[test]
fn cookie_file_credentials_are_sent() {
    init_tracing();
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time must be after unix epoch")
        .as_nanos();
    let cookie_path = std::env::temp_dir().join(format!("coinrpc-itest-cookie-{unique}"));
    std::fs::write(&cookie_path, "__cookie__:token\n").expect("cookie file must be writable");

    let daemon = LoopbackDaemon::start(StatusCode::OK, ok_envelope(Value::Null));
    let client =
        RpcClient::from_config(RpcConfig::new(daemon.url.as_str()).with_cookie_file(&cookie_path))
            .expect("client must build");
    client.stop().expect("stop must succeed");

    let captured = daemon.single_request();
    assert_eq!(
        header_value(&captured, header::AUTHORIZATION),
        Some("Basic X19jb29raWVfXzp0b2tlbg==")
    );
    assert_eq!(captured.json_body()["method"], json!("stop"));

    let _ = std::fs::remove_file(cookie_path);
}
