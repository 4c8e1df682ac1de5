#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("missing field `{field}`")]
    MissingField { field: String },

    #[error("field `{field}` has unexpected type: expected {expected}, got {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: String,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl CoreError {
    pub(crate) fn missing(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    pub(crate) fn mismatch(
        field: impl Into<String>,
        expected: &'static str,
        found: &serde_json::Value,
    ) -> Self {
        Self::TypeMismatch {
            field: field.into(),
            expected,
            found: describe_json(found),
        }
    }
}

/// Failures below the JSON-RPC layer: the request never produced a usable
/// response body.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("connection failure: {0}")]
    Connection(String),

    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },
}

/// Failures in the JSON-RPC envelope itself.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    #[error("decode JSON-RPC response: {message}; body={body}")]
    InvalidJson { message: String, body: String },

    #[error("RPC error {code}: {message}")]
    Server { code: i64, message: String },

    #[error("non-standard JSON-RPC error: {0}")]
    NonStandardError(serde_json::Value),

    #[error("encode JSON-RPC request: {0}")]
    Encode(String),
}

// Short type label plus a clipped rendering, so mismatch messages stay
// readable when the offending value is a large object.
fn describe_json(value: &serde_json::Value) -> String {
    const MAX_RENDERED: usize = 64;

    let kind = match value {
        serde_json::Value::Null => return "null".to_owned(),
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    };
    let rendered = value.to_string();
    if rendered.chars().count() > MAX_RENDERED {
        let clipped: String = rendered.chars().take(MAX_RENDERED).collect();
        format!("{kind} `{clipped}...`")
    } else {
        format!("{kind} `{rendered}`")
    }
}
