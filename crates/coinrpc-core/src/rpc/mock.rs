use std::sync::Mutex;

use serde_json::Value;

use crate::error::{CoreError, TransportError};
use crate::test_util::envelope;

use super::{HttpReply, Transport};

/// A scripted transport for testing. Answers every request with the same
/// canned reply (or connection failure) and records each request body.
pub struct MockTransport {
    reply: Result<HttpReply, String>,
    requests: Mutex<Vec<Value>>,
}

impl MockTransport {
    pub fn replying(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            reply: Ok(HttpReply {
                status,
                body: body.into(),
            }),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// HTTP 200 with a successful envelope around `result`.
    pub fn with_result(result: Value) -> Self {
        Self::replying(200, envelope(result))
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_owned()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().expect("mock lock poisoned").clone()
    }

    pub fn last_request(&self) -> Value {
        self.requests()
            .pop()
            .expect("at least one request must have been sent")
    }
}

impl Transport for MockTransport {
    fn post(&self, body: Vec<u8>) -> Result<HttpReply, CoreError> {
        let request: Value =
            serde_json::from_slice(&body).expect("client must send a JSON request body");
        self.requests
            .lock()
            .expect("mock lock poisoned")
            .push(request);

        match &self.reply {
            Ok(reply) => Ok(reply.clone()),
            Err(message) => Err(TransportError::Connection(message.clone()).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn records_each_request_in_order() {
        let transport = MockTransport::with_result(json!(1));
        transport
            .post(br#"{"method":"a"}"#.to_vec())
            .expect("reply");
        transport
            .post(br#"{"method":"b"}"#.to_vec())
            .expect("reply");

        let methods: Vec<_> = transport
            .requests()
            .into_iter()
            .map(|r| r["method"].clone())
            .collect();
        assert_eq!(methods, vec![json!("a"), json!("b")]);
    }

    #[test]
    fn failing_transport_reports_connection_error() {
        let transport = MockTransport::failing("refused");
        let err = transport.post(b"{}".to_vec()).expect_err("must fail");
        assert!(matches!(
            err,
            CoreError::Transport(TransportError::Connection(message)) if message == "refused"
        ));
    }
}
