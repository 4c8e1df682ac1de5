//! JSON-RPC 1.0 envelope encoding and decoding.

use serde_json::Value;

use crate::error::{CoreError, ProtocolError, TransportError};

use super::HttpReply;

const JSONRPC_VERSION: &str = "1.0";
const REQUEST_ID: &str = "1";

#[derive(serde::Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: &'static str,
    method: &'a str,
    params: &'a [Value],
}

/// Serialize one request envelope. `params` is always emitted as an array.
pub(super) fn encode_request(method: &str, params: &[Value]) -> Result<Vec<u8>, CoreError> {
    let req = JsonRpcRequest {
        jsonrpc: JSONRPC_VERSION,
        id: REQUEST_ID,
        method,
        params,
    };
    serde_json::to_vec(&req).map_err(|e| ProtocolError::Encode(e.to_string()).into())
}

/// Turn an HTTP reply into the parsed response envelope.
///
/// A non-2xx reply whose body still carries a JSON-RPC `error` is reported
/// as that daemon error, since bitcoind-style daemons answer RPC failures
/// with HTTP 500. Any other non-2xx reply is a transport failure.
pub(super) fn decode_response(reply: HttpReply) -> Result<Value, CoreError> {
    let HttpReply { status, body } = reply;

    if !(200..300).contains(&status) {
        if let Ok(envelope) = serde_json::from_slice::<Value>(&body) {
            if let Some(err) = populated_error(&envelope) {
                return Err(parse_jsonrpc_error(err.clone()));
            }
        }
        return Err(TransportError::Status {
            status,
            body: String::from_utf8_lossy(&body).into_owned(),
        }
        .into());
    }

    // Invalid UTF-8 is a decode error, never repaired.
    serde_json::from_slice(&body).map_err(|e| {
        ProtocolError::InvalidJson {
            message: e.to_string(),
            body: String::from_utf8_lossy(&body).into_owned(),
        }
        .into()
    })
}

/// Extract `result` from a decoded envelope, failing on a populated `error`
/// or an absent `result` key.
pub(super) fn take_result(mut envelope: Value) -> Result<Value, CoreError> {
    check_error(&envelope)?;
    envelope
        .as_object_mut()
        .and_then(|object| object.remove("result"))
        .ok_or_else(|| CoreError::missing("result"))
}

/// Fail on a populated `error`; used by calls that carry no result.
pub(super) fn check_error(envelope: &Value) -> Result<(), CoreError> {
    match populated_error(envelope) {
        Some(err) => Err(parse_jsonrpc_error(err.clone())),
        None => Ok(()),
    }
}

fn populated_error(envelope: &Value) -> Option<&Value> {
    envelope.get("error").filter(|err| !err.is_null())
}

/// Parse a JSON-RPC error value into a structured `CoreError`.
///
/// The standard shape is `{"code": <int>, "message": <string>}`; anything
/// else is kept verbatim as a non-standard error.
fn parse_jsonrpc_error(err: Value) -> CoreError {
    #[derive(serde::Deserialize)]
    struct JsonRpcError {
        code: i64,
        message: String,
    }

    match serde_json::from_value::<JsonRpcError>(err.clone()) {
        Ok(parsed) => ProtocolError::Server {
            code: parsed.code,
            message: parsed.message,
        }
        .into(),
        Err(_) => ProtocolError::NonStandardError(err).into(),
    }
}
