//! Per-call errors from the remote catalog

use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Failure of a single catalog request
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// Connection, TLS or protocol failure before a response arrived
    #[error("transport error: {0}")]
    Transport(String),

    /// No response within the per-call deadline
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// The catalog answered with a non-success status
    #[error("catalog returned {status}: {body}")]
    Api { status: u16, body: Value },

    /// The response body could not be decoded
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl CatalogError {
    /// Build an API error from a raw response body
    ///
    /// JSON bodies are kept structured, anything else is kept as text.
    pub fn api(status: u16, raw_body: &str) -> Self {
        let body = if raw_body.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(raw_body).unwrap_or_else(|_| Value::String(raw_body.to_string()))
        };
        Self::Api { status, body }
    }

    /// HTTP status, when the catalog produced one
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Detail to store on a failed outcome
    ///
    /// The remote payload when there is one, otherwise the error description.
    pub fn detail(&self) -> Value {
        match self {
            Self::Api { body, .. } if !body.is_null() => body.clone(),
            other => Value::String(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}
