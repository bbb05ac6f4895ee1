//! # Session Error Types
//!
//! What the presentation layer sees when an operation fails.
//!
//! ## Failure Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │              What a Failed Operation Leaves Behind                      │
//! │                                                                         │
//! │  Validation / Core  ─► nothing was attempted; state untouched          │
//! │  Store              ─► the backend call failed; in-memory session      │
//! │                        state is PRESERVED so the user can retry        │
//! │                                                                         │
//! │  There are no automatic retries anywhere in this crate.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use comanda_backend::BackendError;
use comanda_core::{CoreError, ValidationError};

/// Errors surfaced by session and floor operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Input rejected before any backend call.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A domain rule rejected the operation.
    #[error("domain error: {0}")]
    Core(#[from] CoreError),

    /// A backend call failed; session state was preserved.
    #[error(transparent)]
    Store(#[from] BackendError),

    /// The table is not on the loaded floor.
    #[error("unknown table: {table_id}")]
    UnknownTable { table_id: String },

    /// The account is not attached to the given table.
    #[error("unknown account: {account_id}")]
    UnknownAccount { account_id: i64 },
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
