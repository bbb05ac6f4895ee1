//! # comanda-backend: REST Persistence Client for Comanda
//!
//! The remote backend is the system of record; this crate is the typed
//! client the rest of the workspace talks to it through.
//!
//! ## Endpoint Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Backend Endpoints                                   │
//! │                                                                         │
//! │   GET  /tables                      ─► tables with nested accounts     │
//! │   POST /bills                       ─► create draft account            │
//! │   PUT  /bills/{id}                  ─► update status + total           │
//! │   GET  /bill-details/bill/{id}      ─► committed line items            │
//! │   POST /bill-details                ─► create detail batch             │
//! │   POST /bills/table/{id}/close      ─► close every account on a table  │
//! │                                                                         │
//! │   Every response is wrapped in { success, data, message? }.            │
//! │   Detail records may arrive with English or Spanish keys; the wire     │
//! │   layer normalizes both spellings into core types.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`client`] - `Backend` handle and `BackendConfig`
//! - [`dto`] - Wire records and envelope, normalization into core types
//! - [`bills`] - Account and detail endpoints
//! - [`tables`] - Table fetch and close-all endpoints
//! - [`error`] - Backend error taxonomy
//!
//! ## Usage
//!
//! ```rust,ignore
//! use comanda_backend::{Backend, BackendConfig};
//!
//! let backend = Backend::new(BackendConfig::from_env())?;
//!
//! let tables = backend.tables().fetch_all().await?;
//! let details = backend.bills().details(201).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bills;
pub mod client;
pub mod dto;
pub mod error;
pub mod tables;

// =============================================================================
// Re-exports
// =============================================================================

pub use bills::BillApi;
pub use client::{Backend, BackendConfig};
pub use error::{BackendError, BackendResult};
pub use tables::TableApi;
