//! # Validation Module
//!
//! Input validation for values that cross from the UI into the engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend                                                     │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (before any backend call)                        │
//! │  ├── Required / length / positivity rules                              │
//! │  └── A failure here means NO network call is attempted                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Remote backend (system of record)                            │
//! │  └── Owns the final say; its errors surface verbatim                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::{MAX_CUSTOMER_NAME_LEN, MAX_ITEM_QUANTITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a customer name for a new account.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most [`MAX_CUSTOMER_NAME_LEN`] characters
///
/// ## Returns
/// The trimmed name.
///
/// ## Example
/// ```rust
/// use comanda_core::validation::validate_customer_name;
///
/// assert_eq!(validate_customer_name(" Maria Lopez ").unwrap(), "Maria Lopez");
/// assert!(validate_customer_name("   ").is_err());
/// ```
pub fn validate_customer_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "customer".to_string(),
        });
    }

    if name.len() > MAX_CUSTOMER_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "customer".to_string(),
            max: MAX_CUSTOMER_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

/// Validates a loaded line quantity.
///
/// Committed detail records arrive from the wire; a non-positive quantity
/// would corrupt the ledger's floor rules, so such records are dropped by
/// the caller instead of being loaded.
pub fn validate_quantity(quantity: i64) -> ValidationResult<i64> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if quantity > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(quantity)
}

// =============================================================================
// Unit Tests
// =============================================================================
