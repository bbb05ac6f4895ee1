//! # Table Occupancy Resolver
//!
//! Derives a table's display status from the statuses of its attached
//! accounts. Pure function of the account-status multiset — recomputed on
//! every render, never cached, never stored.
//!
//! ## Resolution Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │   any Open account?  ──── yes ────►  Occupied                           │
//! │          │                           (open dominates: someone is        │
//! │          no                           actively being served)            │
//! │          ▼                                                              │
//! │   any Draft account? ──── yes ────►  Reserved                           │
//! │          │                           (table is held, nothing            │
//! │          no                           committed yet)                    │
//! │          ▼                                                              │
//! │   none, or all Closed ────────────►  Available                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{Account, AccountStatus, Table};

// =============================================================================
// Table Status
// =============================================================================

/// Display status of a table. Derived, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    /// No accounts, or every account is closed.
    Available,
    /// At least one open account, regardless of coexisting drafts.
    Occupied,
    /// Draft accounts only: the table is held but not yet serving.
    Reserved,
}

/// Resolves a table's display status from its attached accounts.
pub fn resolve_status(accounts: &[Account]) -> TableStatus {
    let has_open = accounts.iter().any(|a| a.status == AccountStatus::Open);
    let has_draft = accounts.iter().any(|a| a.status == AccountStatus::Draft);

    if has_open {
        TableStatus::Occupied
    } else if has_draft {
        TableStatus::Reserved
    } else {
        TableStatus::Available
    }
}

// =============================================================================
// Occupancy Summary
// =============================================================================

/// Everything the table card displays, derived in one pass.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct TableOccupancy {
    pub status: TableStatus,
    /// Count of open accounts — rendered as the "N cuentas" badge.
    pub open_accounts: usize,
    /// First word of the first account's customer name, in insertion
    /// order. A display heuristic only: with several accounts it may show
    /// a stale or arbitrary name. `None` when the table has no accounts.
    pub label: Option<String>,
}

impl TableOccupancy {
    /// Derives the occupancy summary for a table.
    pub fn of(table: &Table) -> Self {
        Self::from_accounts(&table.accounts)
    }

    /// Derives the occupancy summary from an account list.
    pub fn from_accounts(accounts: &[Account]) -> Self {
        let open_accounts = accounts
            .iter()
            .filter(|a| a.status == AccountStatus::Open)
            .count();

        let label = accounts
            .first()
            .and_then(|a| a.customer.split_whitespace().next())
            .map(str::to_string);

        TableOccupancy {
            status: resolve_status(accounts),
            open_accounts,
            label,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn account(status: AccountStatus, customer: &str) -> Account {
        Account {
            account_id: 201,
            table_id: "2".to_string(),
            cashier_id: 1,
            customer: customer.to_string(),
            opened_at: Utc::now(),
            last_modified_at: Utc::now(),
            status,
            sequence_number: 1,
            details: Vec::new(),
            total_cents: 0,
        }
    }

    #[test]
    fn test_empty_table_is_available() {
        assert_eq!(resolve_status(&[]), TableStatus::Available);
    }

    #[test]
    fn test_draft_only_is_reserved() {
        let accounts = vec![account(AccountStatus::Draft, "Maria Lopez")];
        assert_eq!(resolve_status(&accounts), TableStatus::Reserved);
    }

    #[test]
    fn test_open_dominates_draft() {
        // Occupied whenever any account is open, however many drafts coexist.
        let accounts = vec![
            account(AccountStatus::Draft, "Maria Lopez"),
            account(AccountStatus::Draft, "Juan Perez"),
            account(AccountStatus::Open, "Ana Ruiz"),
        ];
        assert_eq!(resolve_status(&accounts), TableStatus::Occupied);
    }

    #[test]
    fn test_all_closed_is_available() {
        let accounts = vec![
            account(AccountStatus::Closed, "Maria Lopez"),
            account(AccountStatus::Closed, "Juan Perez"),
        ];
        assert_eq!(resolve_status(&accounts), TableStatus::Available);
    }

    #[test]
    fn test_table_lifecycle_draft_then_open_then_closed() {
        let mut accounts = vec![account(AccountStatus::Draft, "Maria Lopez")];
        assert_eq!(resolve_status(&accounts), TableStatus::Reserved);

        accounts.push(account(AccountStatus::Open, "Juan Perez"));
        assert_eq!(resolve_status(&accounts), TableStatus::Occupied);

        for a in &mut accounts {
            a.status = AccountStatus::Closed;
        }
        assert_eq!(resolve_status(&accounts), TableStatus::Available);
    }

    #[test]
    fn test_occupancy_summary() {
        let accounts = vec![
            account(AccountStatus::Open, "Juan Perez"),
            account(AccountStatus::Open, "Maria Lopez"),
            account(AccountStatus::Draft, "Ana Ruiz"),
        ];
        let occupancy = TableOccupancy::from_accounts(&accounts);

        assert_eq!(occupancy.status, TableStatus::Occupied);
        assert_eq!(occupancy.open_accounts, 2);
        // First account in insertion order, first word only.
        assert_eq!(occupancy.label.as_deref(), Some("Juan"));
    }

    #[test]
    fn test_occupancy_label_empty_table() {
        let occupancy = TableOccupancy::from_accounts(&[]);
        assert_eq!(occupancy.status, TableStatus::Available);
        assert_eq!(occupancy.open_accounts, 0);
        assert!(occupancy.label.is_none());
    }
}
