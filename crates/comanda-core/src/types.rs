//! # Domain Types
//!
//! Core domain types used throughout Comanda.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Account      │   │     Table       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  product_id     │   │  account_id     │   │  table_id       │       │
//! │  │  name           │   │  table_id (FK)  │   │  zone           │       │
//! │  │  price_cents    │   │  status         │   │  accounts[]     │       │
//! │  └─────────────────┘   │  total_cents    │   └─────────────────┘       │
//! │                        │  details[]      │                              │
//! │  ┌─────────────────┐   └─────────────────┘                              │
//! │  │  AccountStatus  │                                                    │
//! │  │  ─────────────  │   One table holds zero, one, or many accounts;    │
//! │  │  Draft          │   siblings are disambiguated by sequence_number   │
//! │  │  Open           │   (1, 2, 3, …).                                   │
//! │  │  Closed         │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A table's display status is **never stored** — see [`crate::occupancy`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::ledger::LineItem;
use crate::money::Money;
use crate::{PLACEHOLDER_ACCOUNT_ID, WALK_IN_CUSTOMER};

// =============================================================================
// Product
// =============================================================================

/// A menu item available for ordering.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Backend-assigned identifier.
    pub product_id: i64,

    /// Display name shown on the order and the kitchen ticket.
    /// Also the uniqueness key within one ledger.
    pub name: String,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Optional menu grouping (coffee, tea, desserts, ...).
    pub product_type_id: Option<i64>,
}

impl Product {
    /// Creates a product without a menu grouping.
    pub fn new(product_id: i64, name: impl Into<String>, price_cents: i64) -> Self {
        Product {
            product_id,
            name: name.into(),
            price_cents,
            product_type_id: None,
        }
    }

    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Account Status
// =============================================================================

/// The lifecycle status of a customer account (bill).
///
/// ## State Machine
/// ```text
/// ┌─────────┐  finish order    ┌─────────┐
/// │  Draft  │─────────────────►│  Open   │──┐ repeated commits refresh
/// └────┬────┘  (non-empty      └────┬────┘◄─┘ total + last_modified_at
///      │        ledger only)        │
///      │ close account              │ close account
///      ▼                            ▼
/// ┌──────────────────────────────────────┐
/// │                Closed                │  (terminal, never editable)
/// └──────────────────────────────────────┘
/// ```
///
/// Adding products never transitions state by itself; `Draft → Open`
/// requires the explicit "finish order" commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    /// Account created, no committed products yet.
    Draft,
    /// At least one committed product; actively being served.
    Open,
    /// Settled. No longer editable, no transition out.
    Closed,
}

impl Default for AccountStatus {
    fn default() -> Self {
        AccountStatus::Draft
    }
}

// =============================================================================
// Account
// =============================================================================

/// One customer's running order at a table.
///
/// `total_cents` is always recomputed from the ledger on commit — it is
/// never mutated independently.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Backend-assigned id. [`PLACEHOLDER_ACCOUNT_ID`] until a walk-in
    /// order is first committed.
    pub account_id: i64,
    /// The table this account belongs to.
    pub table_id: String,
    /// Cashier (device user) who opened the account.
    pub cashier_id: i64,
    /// Customer name shown on the table card.
    pub customer: String,
    #[ts(as = "String")]
    pub opened_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub last_modified_at: DateTime<Utc>,
    pub status: AccountStatus,
    /// Disambiguates sibling accounts on one table (1, 2, 3, …).
    pub sequence_number: u32,
    /// Committed line items, present once loaded from the backend.
    pub details: Vec<LineItem>,
    /// Derived sum of line totals; recomputed on every commit.
    pub total_cents: i64,
}

impl Account {
    /// Creates an unpersisted walk-in (take-away) account.
    ///
    /// The account carries [`PLACEHOLDER_ACCOUNT_ID`] until the first
    /// commit persists it and adopts the backend-assigned id.
    pub fn walk_in(table_id: impl Into<String>, cashier_id: i64, now: DateTime<Utc>) -> Self {
        Account {
            account_id: PLACEHOLDER_ACCOUNT_ID,
            table_id: table_id.into(),
            cashier_id,
            customer: WALK_IN_CUSTOMER.to_string(),
            opened_at: now,
            last_modified_at: now,
            status: AccountStatus::Draft,
            sequence_number: 1,
            details: Vec::new(),
            total_cents: 0,
        }
    }

    /// True while the backend has not yet assigned a real id.
    #[inline]
    pub fn is_placeholder(&self) -> bool {
        self.account_id == PLACEHOLDER_ACCOUNT_ID
    }

    /// Returns the account total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    /// The status a commit would move this account to.
    ///
    /// `Draft` becomes `Open`; `Open` stays `Open`. Commits never touch a
    /// `Closed` account (guarded in [`Account::commit`]).
    pub fn next_status(&self) -> AccountStatus {
        match self.status {
            AccountStatus::Draft => AccountStatus::Open,
            other => other,
        }
    }

    /// Applies a successful "finish order" commit.
    ///
    /// Moves `Draft → Open` (or keeps `Open`), stores the recomputed total
    /// and refreshes `last_modified_at`. The empty-ledger guard lives in
    /// the session coordinator: by the time this runs, the backend calls
    /// have already succeeded.
    pub fn commit(&mut self, total: Money, now: DateTime<Utc>) -> CoreResult<()> {
        if self.status == AccountStatus::Closed {
            return Err(CoreError::AccountClosed {
                account_id: self.account_id,
            });
        }

        self.status = self.next_status();
        self.total_cents = total.cents();
        self.last_modified_at = now;
        Ok(())
    }

    /// Settles the account.
    ///
    /// Allowed from `Draft` or `Open`, with or without recorded items
    /// (a customer may leave without ordering). There is no way back out
    /// of `Closed`.
    pub fn close(&mut self, total: Money, now: DateTime<Utc>) -> CoreResult<()> {
        if self.status == AccountStatus::Closed {
            return Err(CoreError::AccountClosed {
                account_id: self.account_id,
            });
        }

        self.status = AccountStatus::Closed;
        self.total_cents = total.cents();
        self.last_modified_at = now;
        Ok(())
    }
}

// =============================================================================
// New Account
// =============================================================================

/// Payload for creating a new account at a table.
///
/// Status and total are not fields: a new account is always a `Draft`
/// with total 0 — the wire layer encodes that invariant.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub table_id: String,
    pub cashier_id: i64,
    pub customer: String,
    #[ts(as = "String")]
    pub opened_at: DateTime<Utc>,
    pub sequence_number: u32,
}

// =============================================================================
// Table
// =============================================================================

/// A physical table in the café.
///
/// Tables exist for the venue's operational lifetime and are managed
/// externally; this type only carries what the order flow needs.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// e.g. "A2", "B5".
    pub table_id: String,
    /// e.g. "ZONA A".
    pub zone: String,
    /// Position within the zone.
    pub position_in_zone: u32,
    /// Accounts currently attached: zero, one, or many.
    pub accounts: Vec<Account>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn draft_account() -> Account {
        Account {
            account_id: 202,
            table_id: "4".to_string(),
            cashier_id: 2,
            customer: "Maria Lopez".to_string(),
            opened_at: Utc::now(),
            last_modified_at: Utc::now(),
            status: AccountStatus::Draft,
            sequence_number: 1,
            details: Vec::new(),
            total_cents: 0,
        }
    }

    #[test]
    fn test_commit_opens_draft() {
        let mut account = draft_account();
        account.commit(Money::from_cents(5000), Utc::now()).unwrap();

        assert_eq!(account.status, AccountStatus::Open);
        assert_eq!(account.total_cents, 5000);
    }

    #[test]
    fn test_recommit_stays_open() {
        let mut account = draft_account();
        account.commit(Money::from_cents(5000), Utc::now()).unwrap();
        account.commit(Money::from_cents(7200), Utc::now()).unwrap();

        assert_eq!(account.status, AccountStatus::Open);
        assert_eq!(account.total_cents, 7200);
    }

    #[test]
    fn test_close_from_draft_with_zero_items() {
        // Customer leaves without ordering: closing a draft is legal.
        let mut account = draft_account();
        account.close(Money::zero(), Utc::now()).unwrap();

        assert_eq!(account.status, AccountStatus::Closed);
        assert_eq!(account.total_cents, 0);
    }

    #[test]
    fn test_no_transition_out_of_closed() {
        let mut account = draft_account();
        account.close(Money::zero(), Utc::now()).unwrap();

        assert!(matches!(
            account.commit(Money::from_cents(100), Utc::now()),
            Err(CoreError::AccountClosed { account_id: 202 })
        ));
        assert!(matches!(
            account.close(Money::zero(), Utc::now()),
            Err(CoreError::AccountClosed { account_id: 202 })
        ));
    }

    #[test]
    fn test_walk_in_is_placeholder() {
        let account = Account::walk_in("A1", 3, Utc::now());
        assert!(account.is_placeholder());
        assert_eq!(account.customer, WALK_IN_CUSTOMER);
        assert_eq!(account.status, AccountStatus::Draft);
    }

    #[test]
    fn test_next_status() {
        let mut account = draft_account();
        assert_eq!(account.next_status(), AccountStatus::Open);

        account.status = AccountStatus::Open;
        assert_eq!(account.next_status(), AccountStatus::Open);
    }
}
