use std::fs;
use std::path::Path;

use reqwest::Url;

use crate::error::CoreError;

/// Read the `user:password` pair a daemon writes to its cookie file.
pub(super) fn read_cookie(path: &Path) -> Result<(String, String), CoreError> {
    let invalid =
        |reason: String| CoreError::Config(format!("rpc cookie file {}: {reason}", path.display()));

    let content = fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
    let first_line = content.lines().next().unwrap_or_default().trim();
    match first_line.split_once(':') {
        Some((user, pass)) if !user.is_empty() && !pass.is_empty() => {
            Ok((user.to_owned(), pass.to_owned()))
        }
        _ => Err(invalid(
            "expected `username:password` on the first line".to_owned(),
        )),
    }
}

/// Accept only `http://` and `https://` endpoints.
pub(super) fn parse_connection(connection: &str) -> Result<Url, CoreError> {
    let parsed = Url::parse(connection).map_err(|e| {
        CoreError::Config(format!(
            "invalid endpoint `{connection}`: expected HTTP(S) URL ({e})"
        ))
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(CoreError::Config(format!(
            "unsupported endpoint scheme `{other}`; expected http or https"
        ))),
    }
}
