use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Unified error type for hub responses.
#[derive(Debug)]
pub enum HubError {
    /// Transport-level failure talking to the upstream exchange.
    Upstream(String),
    /// Upstream answered, but the body did not match the kline envelope.
    Decode(String),
    Internal(String),
}

impl std::fmt::Display for HubError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Upstream(msg) => write!(f, "upstream_error: {msg}"),
            Self::Decode(msg) => write!(f, "decode_error: {msg}"),
            Self::Internal(msg) => write!(f, "internal_error: {msg}"),
        }
    }
}

impl std::error::Error for HubError {}

impl IntoResponse for HubError {
    fn into_response(self) -> Response {
        let (status, error_str) = match &self {
            Self::Upstream(msg) => (StatusCode::BAD_GATEWAY, format!("upstream_error: {msg}")),
            Self::Decode(msg) => (StatusCode::BAD_GATEWAY, format!("decode_error: {msg}")),
            Self::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = json!({ "error": error_str });
        (status, axum::Json(body)).into_response()
    }
}

impl From<reqwest::Error> for HubError {
    fn from(e: reqwest::Error) -> Self {
        Self::Upstream(e.to_string())
    }
}

impl From<serde_json::Error> for HubError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}

impl From<std::io::Error> for HubError {
    fn from(e: std::io::Error) -> Self {
        Self::Internal(e.to_string())
    }
}
