//! # Backend Error Types
//!
//! Error types for REST calls to the remote persistence backend.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  HTTP failure (reqwest::Error)                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BackendError (this module) ← Adds context and categorization          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SessionError (comanda-session) ← What the presentation layer sees    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Frontend shows the backend's own message when one was returned        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The session layer never clears in-memory state on a `BackendError`:
//! retry is always a manual user action, never automatic.

use thiserror::Error;

/// REST call errors.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The backend answered with a non-success status.
    ///
    /// `message` carries the backend's own `message` field when the error
    /// body was parseable, else the HTTP reason phrase.
    #[error("backend error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The request never completed (connect failure, timeout, ...).
    #[error("request failed: {0}")]
    Transport(String),

    /// The response body did not match the expected shape.
    #[error("unexpected response: {0}")]
    Decode(String),

    /// Client construction failed (bad base URL, TLS setup, ...).
    #[error("backend client configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            BackendError::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            BackendError::Api {
                status: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string(),
            }
        } else {
            BackendError::Transport(err.to_string())
        }
    }
}

/// Result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;

// =============================================================================
// Unit Tests
// =============================================================================
