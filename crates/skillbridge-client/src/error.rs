//! Client error types.

use serde_json::Value;
use thiserror::Error;

use crate::store::StoreError;

/// Result type for client operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Generic text used when a 400 response carries no message of its own.
const GENERIC_VALIDATION_MESSAGE: &str = "Invalid request data";

/// Errors that can occur while talking to the SkillBridge backend.
///
/// Built once at the transport boundary so callers can branch on the kind of
/// failure instead of digging through response bodies.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was received (connection refused, DNS, timeout).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// 401 or 403. The session has already been invalidated when this is seen.
    #[error("Authentication failed ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    /// 400 from the server, or a local pre-flight check.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Any other non-success status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: Value },

    /// A success response without the fields the operation requires.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The operation needs a logged-in user and there is none.
    #[error("No active session, log in again")]
    NoSession,

    #[error("Session storage error: {0}")]
    Storage(#[from] StoreError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ApiError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Map a non-success status and its body to an error.
    ///
    /// A `message` field in the body is preferred verbatim when present.
    pub fn from_http_status(status: u16, body: Value) -> Self {
        let message = server_message(&body);
        match status {
            400 => Self::Validation(message.unwrap_or_else(|| GENERIC_VALIDATION_MESSAGE.to_string())),
            401 | 403 => Self::Unauthorized {
                status,
                message: message.unwrap_or_else(|| "session expired or access denied".to_string()),
            },
            404 => Self::NotFound(message.unwrap_or_else(|| "resource not found".to_string())),
            409 => Self::Conflict(message.unwrap_or_else(|| "resource already exists".to_string())),
            _ => Self::Http { status, body },
        }
    }

    /// HTTP status behind this error, if a response was received.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            ApiError::Validation(_) => Some(400),
            ApiError::Unauthorized { status, .. } => Some(*status),
            ApiError::NotFound(_) => Some(404),
            ApiError::Conflict(_) => Some(409),
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// True if no response reached the client.
    pub fn is_network(&self) -> bool {
        matches!(self, ApiError::Network(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, ApiError::Network(e) if e.is_timeout())
    }

    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound(_))
    }

    /// Message suitable for showing to the end user.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Network(_) => {
                "Could not reach the server. Check that the API is running and the URL is correct."
                    .to_string()
            }
            ApiError::Unauthorized { .. } | ApiError::NoSession => {
                "Your session has ended. Please log in again.".to_string()
            }
            ApiError::Validation(msg) | ApiError::Conflict(msg) => msg.clone(),
            ApiError::Http { status, body } => match server_message(body) {
                Some(msg) => msg,
                None if *status >= 500 => {
                    "The server hit an error. Try again in a few moments.".to_string()
                }
                None => format!("Server error ({})", status),
            },
            other => other.to_string(),
        }
    }
}

/// Extract the backend's `message` field from an error body.
fn server_message(body: &Value) -> Option<String> {
    match body {
        Value::Object(map) => map
            .get("message")
            .or_else(|| map.get("error"))
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .map(str::to_string),
        Value::String(text) if !text.trim().is_empty() => Some(text.clone()),
        _ => None,
    }
}
