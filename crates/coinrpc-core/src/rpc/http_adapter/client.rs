use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::{header, Url};

use crate::error::{CoreError, TransportError};

use super::super::{HttpReply, Transport};
use super::connection::{parse_connection, read_cookie};

const CONTENT_TYPE_JSON_RPC: &str = "application/json-rpc";

// ==============================================================================
// RpcConfig
// ==============================================================================

/// Endpoint and credentials for one daemon, fixed at construction.
///
/// No timeout is applied unless one is set here; callers that need bounded
/// latency opt in through `with_timeout` / `with_connect_timeout`.
#[derive(Clone, Default)]
pub struct RpcConfig {
    pub url: String,
    pub user: Option<String>,
    pub pass: Option<String>,
    pub cookie_file: Option<PathBuf>,
    pub connect_timeout: Option<Duration>,
    pub timeout: Option<Duration>,
}

impl RpcConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn with_credentials(mut self, user: impl Into<String>, pass: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self.pass = Some(pass.into());
        self
    }

    /// Read `user:password` from a daemon cookie file when no explicit
    /// credentials are configured.
    pub fn with_cookie_file(mut self, path: impl AsRef<Path>) -> Self {
        self.cookie_file = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Basic-auth pair to send: the explicit user and pass when set,
    /// otherwise the cookie file's, otherwise none.
    pub fn credentials(&self) -> Result<Option<(String, String)>, CoreError> {
        match (&self.user, &self.pass, &self.cookie_file) {
            (Some(user), Some(pass), _) => Ok(Some((user.clone(), pass.clone()))),
            (None, None, Some(cookie_file)) => read_cookie(cookie_file).map(Some),
            (None, None, None) => Ok(None),
            _ => Err(CoreError::Config(
                "rpc user and rpc pass must be set together".to_owned(),
            )),
        }
    }
}

impl fmt::Debug for RpcConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcConfig")
            .field("url", &self.url)
            .field("user", &self.user)
            .field("pass", &self.pass.as_ref().map(|_| "<redacted>"))
            .field("cookie_file", &self.cookie_file)
            .field("connect_timeout", &self.connect_timeout)
            .field("timeout", &self.timeout)
            .finish()
    }
}

// ==============================================================================
// HttpTransport
// ==============================================================================

/// Blocking HTTP(S) transport. Owns the `reqwest` client, whose keep-alive
/// pool is the only state shared between calls.
pub struct HttpTransport {
    client: reqwest::blocking::Client,
    url: Url,
    auth: Option<(String, String)>,
}

impl HttpTransport {
    pub fn new(config: RpcConfig) -> Result<Self, CoreError> {
        let url = parse_connection(&config.url)?;
        let auth = config.credentials()?;

        let mut builder = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .tcp_nodelay(true);
        if let Some(connect_timeout) = config.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }
        let client = builder
            .build()
            .map_err(|e| CoreError::Config(format!("build HTTP client: {e}")))?;

        Ok(Self { client, url, auth })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl Transport for HttpTransport {
    fn post(&self, body: Vec<u8>) -> Result<HttpReply, CoreError> {
        let mut builder = self
            .client
            .post(self.url.clone())
            .header(header::CONTENT_TYPE, CONTENT_TYPE_JSON_RPC)
            .body(body);
        if let Some((ref user, ref pass)) = self.auth {
            builder = builder.basic_auth(user, Some(pass));
        }

        let response = builder.send().map_err(TransportError::Request)?;
        let status = response.status().as_u16();
        let body = response.bytes().map_err(TransportError::Request)?.to_vec();

        Ok(HttpReply { status, body })
    }
}
