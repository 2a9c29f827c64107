//! Remote fetch adapter — one bounded-time JSON HTTP call.
//!
//! Wraps the synchronous `ureq` client behind a uniform result shape:
//! every HTTP response, success or error status, becomes a
//! [`JsonResponse`] with the body parsed as JSON (or wrapped as raw text
//! when it isn't JSON). Only transport-level failures — connection errors
//! and the fixed timeout — surface as `Err`, keeping the
//! "HTTP <code>" / "network error" distinction intact for callers.
//!
//! No retries, no response caching.

use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use serde_json::{Value, json};

use crate::store::try_parse;

/// Fixed request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 9_000;

/// Uniform result of a JSON call. `ok` mirrors a 2xx status; `data` is the
/// parsed body, or `{"ok": <bool>, "raw": <text>}` for non-JSON bodies.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonResponse {
    pub ok: bool,
    pub status: u16,
    pub data: Value,
}

/// Synchronous JSON HTTP client with a per-call timeout.
#[derive(Debug, Clone)]
pub struct HttpClient {
    timeout: Duration,
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEFAULT_TIMEOUT_MS))
    }
}

impl HttpClient {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// `GET` with optional extra headers.
    pub fn get_json(&self, url: &str, headers: &[(&str, &str)]) -> Result<JsonResponse> {
        self.call("GET", url, None, headers)
    }

    /// `POST` with a JSON body.
    pub fn post_json(
        &self,
        url: &str,
        body: &Value,
        headers: &[(&str, &str)],
    ) -> Result<JsonResponse> {
        self.call("POST", url, Some(body), headers)
    }

    fn call(
        &self,
        method: &str,
        url: &str,
        body: Option<&Value>,
        headers: &[(&str, &str)],
    ) -> Result<JsonResponse> {
        let mut request = ureq::request(method, url)
            .timeout(self.timeout)
            .set("Content-Type", "application/json");
        for (name, value) in headers {
            request = request.set(name, value);
        }

        let result = match body {
            Some(value) => request.send_json(value.clone()),
            None => request.call(),
        };

        match result {
            Ok(resp) => wrap_response(resp),
            // Non-2xx statuses still carry a response worth surfacing.
            Err(ureq::Error::Status(_, resp)) => wrap_response(resp),
            Err(ureq::Error::Transport(err)) => Err(anyhow!("network error: {err}")),
        }
    }
}

/// Normalize a `ureq` response into the uniform shape. Non-JSON bodies are
/// wrapped rather than failing the call.
fn wrap_response(resp: ureq::Response) -> Result<JsonResponse> {
    let status = resp.status();
    let ok = (200..300).contains(&status);
    let text = resp
        .into_string()
        .context("failed reading response body")?;
    let data = try_parse::<Value>(&text).unwrap_or_else(|_| json!({ "ok": ok, "raw": text }));
    Ok(JsonResponse { ok, status, data })
}

/// Join a base URL and a sub-path, tolerating a trailing slash on the base.
pub fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_url_strips_trailing_slash() {
        assert_eq!(join_url("http://a/", "health"), "http://a/health");
        assert_eq!(join_url("http://a", "/health"), "http://a/health");
        assert_eq!(join_url("http://a", "health"), "http://a/health");
    }

    #[test]
    fn default_timeout_is_nine_seconds() {
        let client = HttpClient::default();
        assert_eq!(client.timeout, Duration::from_millis(9_000));
    }

    #[test]
    fn connection_refused_is_a_transport_error() {
        // Port 1 is essentially never listening locally; the refusal is
        // immediate so this does not wait out the timeout.
        let client = HttpClient::new(Duration::from_millis(500));
        let result = client.get_json("http://127.0.0.1:1/health", &[]);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("network error"));
    }
}
