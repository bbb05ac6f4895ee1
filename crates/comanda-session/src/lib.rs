//! # comanda-session: Order Session Orchestration for Comanda
//!
//! Ties the pure core to the backend: one [`OrderSession`] per order being
//! edited, one [`Floor`] for the table view.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Session Lifecycle                                  │
//! │                                                                         │
//! │  Floor::load_session(account) ──► OrderSession                         │
//! │       │                              │                                  │
//! │       │   committed details load     │  add_product / +/- / remove     │
//! │       │   as non-editable lines      │  (pure ledger mutations)        │
//! │       │                              ▼                                  │
//! │       │                      finish_order()                            │
//! │       │                         │  1. PUT  update status + total      │
//! │       │                         │  2. POST session items batch        │
//! │       │                         ▼                                      │
//! │       │                   SessionSignal::BackToTables                 │
//! │       │                                                                │
//! │       └── close_order(confirmed) ── settle and leave the editor        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`session`] - The per-order coordinator
//! - [`floor`] - The table view: occupancy, account creation, table close
//! - [`store`] - The persistence seam ([`OrderStore`]) and its REST impl
//! - [`error`] - Session error taxonomy

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod floor;
pub mod session;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{SessionError, SessionResult};
pub use floor::Floor;
pub use session::{OrderSession, SessionSignal};
pub use store::OrderStore;
