//! # comanda-core: Pure Business Logic for Comanda
//!
//! This crate is the **heart** of the Comanda café POS. It contains all
//! business logic as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Comanda Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (table view / order view)           │   │
//! │  │    Table Grid ──► Account Sidebar ──► Order Editor             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    comanda-session                              │   │
//! │  │    Floor (table view) + OrderSession (order editing)           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ comanda-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  ledger   │  │ occupancy │  │   │
//! │  │   │  Account  │  │   Money   │  │  Ledger   │  │  resolver │  │   │
//! │  │   │   Table   │  │  (cents)  │  │ LineItem  │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    comanda-backend (REST client)                │   │
//! │  │              bills, bill-details, tables endpoints              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Account, Table, statuses)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`ledger`] - The line item ledger for one open order
//! - [`occupancy`] - Table occupancy resolver (pure derivation)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Network and file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use comanda_core::ledger::Ledger;
//! use comanda_core::types::Product;
//!
//! let espresso = Product::new(3, "Espresso", 2200);
//!
//! let mut ledger = Ledger::new();
//! ledger.add_product(&espresso);
//! ledger.add_product(&espresso);
//!
//! // Same name merges into one line: quantity 2, 2 × $22.00
//! assert_eq!(ledger.len(), 1);
//! assert_eq!(ledger.total_cents(), 4400);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ledger;
pub mod money;
pub mod occupancy;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use comanda_core::Money` instead of
// `use comanda_core::money::Money`

pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::{ItemOrigin, Ledger, LineItem};
pub use money::Money;
pub use occupancy::{resolve_status, TableOccupancy, TableStatus};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Placeholder id for an account that has not been persisted yet.
///
/// ## Why a constant?
/// A walk-in order starts editing before the backend has assigned a real
/// `account_id`. Real ids start at 1, so 0 can never collide. `finish_order`
/// replaces the placeholder with the backend-assigned id on first commit.
pub const PLACEHOLDER_ACCOUNT_ID: i64 = 0;

/// Default customer label for walk-in (take-away) orders.
pub const WALK_IN_CUSTOMER: &str = "Para Llevar";

/// Maximum quantity of a single line item in an order.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 100 instead of 10).
/// Can be made configurable per-venue in future versions.
pub const MAX_ITEM_QUANTITY: i64 = 99;

/// Maximum length of a customer name on a new account.
pub const MAX_CUSTOMER_NAME_LEN: usize = 100;
