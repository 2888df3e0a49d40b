//! Error taxonomy shared by the client and every endpoint wrapper.
//!
//! ERROR HANDLING
//! ==============
//! Backend failures arrive in several shapes (`detail`, `message`, field maps,
//! bare lists). They are reduced to one human-readable message here so callers
//! never re-implement the extraction.

use serde_json::Value;

use crate::config::ConfigError;
use crate::session::SessionError;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by [`crate::ApiClient`] operations.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No response was received (DNS, connection refused, timeout).
    #[error("request failed: {0}")]
    Transport(String),

    /// A successful response body did not have the expected shape.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The backend answered with a non-success status.
    #[error("{message} (status {status})")]
    Application { status: u16, message: String, body: Option<Value> },

    /// The backend rejected the credentials; the session has been cleared.
    #[error("session expired or not logged in")]
    Unauthenticated,

    /// Input was rejected before any request was sent.
    #[error("invalid input: {0}")]
    Validation(String),

    /// The session store could not be read or written.
    #[error("session store failed: {0}")]
    Session(#[from] SessionError),

    /// The client could not be configured.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ApiError {
    /// Build an application error from a non-success status and parsed body.
    #[must_use]
    pub fn application(status: u16, body: Option<Value>) -> Self {
        let message = error_message(status, body.as_ref());
        Self::Application { status, message, body }
    }

    /// HTTP status attached to this error, when one was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Application { status, .. } => Some(*status),
            Self::Unauthenticated => Some(401),
            _ => None,
        }
    }

    /// Whether re-issuing the same request could succeed. Informational only:
    /// the client never retries on its own.
    #[must_use]
    pub fn retryable(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Application { status: 429 | 500..=599, .. })
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

// =============================================================================
// MESSAGE EXTRACTION
// =============================================================================

/// Extract a display message from a backend error payload.
///
/// Order: `detail` string, `message` string, list of strings, first field of
/// an object (`field: error`), then a generic status message.
#[must_use]
pub fn error_message(status: u16, body: Option<&Value>) -> String {
    body.and_then(message_from_body)
        .unwrap_or_else(|| format!("API Error: {status}"))
}

fn message_from_body(body: &Value) -> Option<String> {
    match body {
        Value::Object(map) => {
            for key in ["detail", "message"] {
                if let Some(Value::String(text)) = map.get(key) {
                    if !text.is_empty() {
                        return Some(text.clone());
                    }
                }
            }
            let (field, value) = map.iter().next()?;
            Some(format!("{field}: {}", render_field_error(value)))
        }
        Value::Array(items) if !items.is_empty() => Some(join_values(items)),
        Value::String(text) if !text.is_empty() => Some(text.clone()),
        _ => None,
    }
}

fn render_field_error(value: &Value) -> String {
    match value {
        Value::Array(items) => join_values(items),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn join_values(items: &[Value]) -> String {
    items
        .iter()
        .map(|item| match item {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
