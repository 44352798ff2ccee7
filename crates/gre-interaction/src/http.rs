//! Shared request/response policy for the remote APIs.

use std::time::Duration;

use gre_core::GreError;
use reqwest::{RequestBuilder, Response};
use serde_json::Value;

/// Attaches the bearer token, failing fast when there is none.
pub(crate) fn authorize(request: RequestBuilder, token: Option<&str>) -> Result<RequestBuilder, GreError> {
    let token = token
        .filter(|t| !t.is_empty())
        .ok_or_else(GreError::missing_token)?;
    Ok(request.header("Authorization", format!("Bearer {}", token)))
}

/// Maps a transport failure onto the dashboard's error kinds.
pub(crate) fn transport_error(err: reqwest::Error, timeout: Duration) -> GreError {
    if err.is_timeout() {
        GreError::Timeout {
            after_secs: timeout.as_secs(),
        }
    } else if err.is_connect() {
        tracing::debug!(error = %err, "Connection failed");
        GreError::network()
    } else if err.is_decode() || err.is_body() {
        GreError::MalformedResponse(err.to_string())
    } else {
        GreError::Network(format!("Network error: {}", err))
    }
}

/// Sends a request with the standard error mapping.
pub(crate) async fn send(request: RequestBuilder, timeout: Duration) -> Result<Response, GreError> {
    request
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| transport_error(e, timeout))
}

/// Rejects non-2xx answers using the status classification.
pub(crate) fn check_status(response: &Response, action: &str) -> Result<(), GreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }

    let status_text = status.canonical_reason().unwrap_or("Unknown status");
    tracing::error!(status = status.as_u16(), action, "Request rejected");
    Err(GreError::from_status(status.as_u16(), status_text, action))
}

/// Reads a 2xx body as JSON.
///
/// A body that cannot be read to the end or does not parse becomes
/// `Value::Null`, which the envelope decoders treat as an empty list. Only a
/// timeout while reading is reported as an error.
pub(crate) async fn json_or_null(response: Response, timeout: Duration) -> Result<Value, GreError> {
    let text = match response.text().await {
        Ok(text) => text,
        Err(e) if e.is_timeout() => return Err(transport_error(e, timeout)),
        Err(e) => {
            tracing::warn!(error = %e, "Response body could not be read");
            return Ok(Value::Null);
        }
    };

    Ok(serde_json::from_str(&text).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Response body is not JSON");
        Value::Null
    }))
}
