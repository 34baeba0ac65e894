//! Error handling for the Lexa provider adapter.
//!
//! Every failure surfaces to the caller as a typed [`LlmError`]; the adapter
//! never retries and never logs errors. HTTP responses with a non-success
//! status are classified by [`classify_http_failure`], while lower-level
//! failures (network, JSON) arrive through the `From` conversions below.

use std::collections::HashMap;

use thiserror::Error;

/// Error type for all Lexa provider operations.
#[derive(Error, Debug)]
pub enum LlmError {
    /// A prompt carried a content part the vendor wire format cannot express
    /// in that position (e.g. a tool call inside a user message).
    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),

    /// A prompt carried a message role the vendor does not accept.
    #[error("Unsupported message role: {0}")]
    UnsupportedRole(String),

    /// HTTP 429 from the vendor. Backing off is the caller's responsibility;
    /// `retry_after` carries the `retry-after` header in seconds when the
    /// vendor sent one that parses as an integer.
    #[error("Rate limited by Lexa API (retry after: {retry_after:?} seconds)")]
    RateLimited { retry_after: Option<u64> },

    /// Any other non-success HTTP status, with the response preserved for
    /// diagnostics.
    #[error("Lexa API error {code}: {message}")]
    ApiError {
        code: u16,
        message: String,
        headers: HashMap<String, String>,
        body: String,
    },

    /// Transport-level failure (connect, send, body read).
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// JSON serialization/deserialization failure.
    #[error("JSON error: {0}")]
    JsonError(String),

    /// The vendor returned a 2xx response whose body does not match the
    /// expected schema.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Invalid provider configuration (bad header name, malformed key, ...).
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// The capability is not implemented by this provider.
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// Failure inside an open event stream.
    #[error("Stream error: {0}")]
    StreamError(String),

    /// The call was cancelled through its [`CancelHandle`](crate::utils::cancel::CancelHandle).
    #[error("Request cancelled")]
    Cancelled,
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        Self::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}

/// Classify a transport success with a non-success status.
///
/// The transport layer calls this with the preserved status, headers and body;
/// it never inspects error values after the fact. 429 becomes
/// [`LlmError::RateLimited`], everything else [`LlmError::ApiError`].
pub fn classify_http_failure(
    status: u16,
    headers: &reqwest::header::HeaderMap,
    body: String,
) -> LlmError {
    if status == 429 {
        let retry_after = headers
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok());
        return LlmError::RateLimited { retry_after };
    }

    let headers = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();

    LlmError::ApiError {
        code: status,
        message: format!("Lexa API error: HTTP {status}"),
        headers,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderMap, HeaderValue};

    #[test]
    fn classifies_429_with_retry_after() {
        let mut headers = HeaderMap::new();
        headers.insert(reqwest::header::RETRY_AFTER, HeaderValue::from_static("5"));

        match classify_http_failure(429, &headers, String::new()) {
            LlmError::RateLimited { retry_after } => assert_eq!(retry_after, Some(5)),
            other => panic!("expected RateLimited, got: {other:?}"),
        }
    }

    #[test]
    fn classifies_429_without_retry_after() {
        match classify_http_failure(429, &HeaderMap::new(), String::new()) {
            LlmError::RateLimited { retry_after } => assert_eq!(retry_after, None),
            other => panic!("expected RateLimited, got: {other:?}"),
        }
    }

    #[test]
    fn non_integer_retry_after_is_dropped() {
        let mut headers = HeaderMap::new();
        headers.insert(
            reqwest::header::RETRY_AFTER,
            HeaderValue::from_static("Wed, 21 Oct 2026 07:28:00 GMT"),
        );

        match classify_http_failure(429, &headers, String::new()) {
            LlmError::RateLimited { retry_after } => assert_eq!(retry_after, None),
            other => panic!("expected RateLimited, got: {other:?}"),
        }
    }

    #[test]
    fn classifies_other_statuses_with_diagnostics() {
        let mut headers = HeaderMap::new();
        headers.insert("x-request-id", HeaderValue::from_static("req-1"));

        match classify_http_failure(500, &headers, "boom".to_string()) {
            LlmError::ApiError {
                code,
                headers,
                body,
                ..
            } => {
                assert_eq!(code, 500);
                assert_eq!(body, "boom");
                assert_eq!(headers.get("x-request-id").map(String::as_str), Some("req-1"));
            }
            other => panic!("expected ApiError, got: {other:?}"),
        }
    }

    #[test]
    fn converts_serde_json_errors() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: LlmError = json_err.into();
        assert!(matches!(err, LlmError::JsonError(_)));
    }
}
