//! # Order Session Coordinator
//!
//! Binds one account to a live ledger for the duration of an editing
//! session and drives the commit and close flows.
//!
//! ## Commit Flow ("finish order")
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        finish_order()                                   │
//! │                                                                         │
//! │  empty ledger? ──► Err(EmptyOrder), nothing attempted                  │
//! │       │                                                                 │
//! │  placeholder account? ──► create draft account, adopt assigned id      │
//! │       │                                                                 │
//! │  1. update header (next status, recomputed total)   ──┐ fails: session │
//! │  2. create detail batch (full ledger contents)      ──┤ preserved,     │
//! │       │                                               ┘ user retries   │
//! │  commit local account, clear ledger, BackToTables                      │
//! │                                                                         │
//! │  The two calls are sequential and NOT atomic. If call 2 fails after   │
//! │  call 1 succeeded, the header is persisted without its details. The    │
//! │  backend is the system of record and a manual retry re-sends the       │
//! │  batch; the window is accepted rather than compensated.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! One session per device: mutation entry points are `&mut self` and are
//! never called concurrently.

use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use comanda_core::{Account, AccountStatus, CoreError, Ledger, Money, NewAccount, Product};

use crate::error::SessionResult;
use crate::store::OrderStore;

// =============================================================================
// Session Signal
// =============================================================================

/// Terminal signal returned by the session's exit operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSignal {
    /// Leave the order editor and return to the table view.
    BackToTables,
}

// =============================================================================
// Order Session
// =============================================================================

/// Callback fired after every ledger mutation, so the caller can re-render.
type ChangeCallback = Box<dyn Fn(&Ledger) + Send>;

/// One account being edited.
pub struct OrderSession<S: OrderStore> {
    store: Arc<S>,
    account: Account,
    ledger: Ledger,
    on_change: Option<ChangeCallback>,
}

impl<S: OrderStore> OrderSession<S> {
    /// Starts a session over an account.
    ///
    /// The account's loaded details become committed ledger entries; an
    /// account with no details starts with an empty ledger.
    pub fn new(store: Arc<S>, account: Account) -> Self {
        let ledger = Ledger::from_items(account.details.clone());
        OrderSession {
            store,
            account,
            ledger,
            on_change: None,
        }
    }

    /// Starts a walk-in (take-away) session with an unpersisted account.
    ///
    /// The account is created on the backend lazily, during the first
    /// successful `finish_order`.
    pub fn walk_in(store: Arc<S>, table_id: impl Into<String>, cashier_id: i64) -> Self {
        OrderSession::new(store, Account::walk_in(table_id, cashier_id, Utc::now()))
    }

    /// Registers the change callback fired after every ledger mutation.
    pub fn set_on_change(&mut self, callback: impl Fn(&Ledger) + Send + 'static) {
        self.on_change = Some(Box::new(callback));
    }

    pub fn account(&self) -> &Account {
        &self.account
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Running total of the ledger.
    pub fn total(&self) -> Money {
        self.ledger.total()
    }

    /// True while the ledger holds items not yet committed to the backend.
    pub fn has_unsaved_changes(&self) -> bool {
        self.ledger.has_session_items()
    }

    fn notify(&self) {
        if let Some(callback) = &self.on_change {
            callback(&self.ledger);
        }
    }

    // =========================================================================
    // Ledger Mutations
    // =========================================================================

    /// Adds one unit of a product, merging into an existing same-name line.
    pub fn add_product(&mut self, product: &Product) {
        self.ledger.add_product(product);
        self.notify();
    }

    /// Increments a line's quantity by one.
    pub fn increment_quantity(&mut self, name: &str) {
        self.ledger.change_quantity(name, 1);
        self.notify();
    }

    /// Decrements a line's quantity by one. A session line reaching zero is
    /// removed; a committed line never drops below its floor.
    pub fn decrement_quantity(&mut self, name: &str) {
        self.ledger.change_quantity(name, -1);
        self.notify();
    }

    /// Removes a session line. Committed lines are a logged no-op.
    pub fn remove_line_item(&mut self, name: &str) {
        self.ledger.remove_item(name);
        self.notify();
    }

    // =========================================================================
    // Exit Operations
    // =========================================================================

    /// Commits the order: persists the account header, then the full
    /// ledger contents as a detail batch.
    ///
    /// Any failure preserves the in-memory session for a manual retry.
    /// There are no automatic retries.
    pub async fn finish_order(&mut self) -> SessionResult<SessionSignal> {
        if self.ledger.is_empty() {
            return Err(CoreError::EmptyOrder.into());
        }

        if self.account.status == AccountStatus::Closed {
            return Err(CoreError::AccountClosed {
                account_id: self.account.account_id,
            }
            .into());
        }

        if self.account.is_placeholder() {
            self.persist_walk_in().await?;
        }

        let total = self.ledger.total();
        let next_status = self.account.next_status();

        self.store
            .update_account(self.account.account_id, next_status, total)
            .await?;

        self.store
            .create_details(self.account.account_id, self.ledger.items())
            .await?;

        self.account.commit(total, Utc::now())?;
        self.ledger.clear();

        info!(
            account_id = self.account.account_id,
            total = total.cents(),
            "order committed"
        );
        Ok(SessionSignal::BackToTables)
    }

    /// Persists a walk-in account for the first time and adopts the
    /// backend-assigned id.
    async fn persist_walk_in(&mut self) -> SessionResult<()> {
        let new = NewAccount {
            table_id: self.account.table_id.clone(),
            cashier_id: self.account.cashier_id,
            customer: self.account.customer.clone(),
            opened_at: self.account.opened_at,
            sequence_number: self.account.sequence_number,
        };

        let created = self.store.create_account(&new).await?;

        info!(
            account_id = created.account_id,
            "walk-in account persisted"
        );
        self.account.account_id = created.account_id;
        Ok(())
    }

    /// Settles the account.
    ///
    /// The confirmation dialog is the caller's concern; an unconfirmed
    /// close skips persistence but still clears the session and navigates
    /// back. A never-persisted walk-in account has nothing to settle, so
    /// it closes locally without a backend call.
    pub async fn close_order(&mut self, confirmed: bool) -> SessionResult<SessionSignal> {
        if !confirmed {
            warn!(
                account_id = self.account.account_id,
                "close not confirmed, discarding session"
            );
            self.ledger.clear();
            return Ok(SessionSignal::BackToTables);
        }

        if self.account.status == AccountStatus::Closed {
            return Err(CoreError::AccountClosed {
                account_id: self.account.account_id,
            }
            .into());
        }

        let total = self.ledger.total();

        if !self.account.is_placeholder() {
            self.store
                .update_account(self.account.account_id, AccountStatus::Closed, total)
                .await?;
        }

        self.account.close(total, Utc::now())?;
        self.ledger.clear();

        info!(
            account_id = self.account.account_id,
            total = total.cents(),
            "account closed"
        );
        Ok(SessionSignal::BackToTables)
    }

    /// Discards in-progress, uncommitted changes and navigates back.
    pub fn save_and_go_back(&mut self) -> SessionSignal {
        self.ledger.clear();
        SessionSignal::BackToTables
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing::{Call, MockStore};
    use comanda_core::{ItemOrigin, LineItem, PLACEHOLDER_ACCOUNT_ID};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn draft_account(account_id: i64) -> Account {
        Account {
            account_id,
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

    fn latte() -> Product {
        Product::new(11, "Latte", 2500)
    }

    fn espresso() -> Product {
        Product::new(3, "Espresso", 2200)
    }

    #[tokio::test]
    async fn test_finish_empty_ledger_no_network() {
        let store = Arc::new(MockStore::new());
        let mut session = OrderSession::new(store.clone(), draft_account(201));

        let result = session.finish_order().await;

        assert!(matches!(
            result,
            Err(crate::SessionError::Core(CoreError::EmptyOrder))
        ));
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_finish_happy_path() {
        let store = Arc::new(MockStore::new());
        let mut session = OrderSession::new(store.clone(), draft_account(201));
        session.add_product(&latte());
        session.add_product(&latte());
        session.add_product(&espresso());

        let signal = session.finish_order().await.unwrap();

        assert_eq!(signal, SessionSignal::BackToTables);
        assert_eq!(
            store.calls(),
            vec![
                Call::UpdateAccount {
                    account_id: 201,
                    status: AccountStatus::Open,
                    total_cents: 7200,
                },
                Call::CreateDetails {
                    account_id: 201,
                    count: 2,
                },
            ]
        );
        assert_eq!(session.account().status, AccountStatus::Open);
        assert_eq!(session.account().total_cents, 7200);
        assert!(session.ledger().is_empty());
    }

    #[tokio::test]
    async fn test_finish_header_failure_preserves_session() {
        let store = Arc::new(MockStore::new().fail_update());
        let mut session = OrderSession::new(store.clone(), draft_account(201));
        session.add_product(&latte());

        let result = session.finish_order().await;

        assert!(matches!(result, Err(crate::SessionError::Store(_))));
        // The detail call was never attempted.
        assert_eq!(
            store.calls(),
            vec![Call::UpdateAccount {
                account_id: 201,
                status: AccountStatus::Open,
                total_cents: 2500,
            }]
        );
        // Session intact for retry.
        assert_eq!(session.ledger().len(), 1);
        assert_eq!(session.account().status, AccountStatus::Draft);
    }

    #[tokio::test]
    async fn test_finish_detail_failure_preserves_session() {
        let store = Arc::new(MockStore::new().fail_details());
        let mut session = OrderSession::new(store.clone(), draft_account(201));
        session.add_product(&latte());

        let result = session.finish_order().await;

        assert!(matches!(result, Err(crate::SessionError::Store(_))));
        assert_eq!(store.calls().len(), 2);
        assert_eq!(session.ledger().len(), 1);
        assert_eq!(session.account().status, AccountStatus::Draft);
    }

    #[tokio::test]
    async fn test_walk_in_creates_account_before_header_update() {
        let store = Arc::new(MockStore::new().with_next_account_id(301));
        let mut session = OrderSession::walk_in(store.clone(), "A1", 2);
        assert_eq!(session.account().account_id, PLACEHOLDER_ACCOUNT_ID);

        session.add_product(&espresso());
        session.finish_order().await.unwrap();

        let calls = store.calls();
        assert!(matches!(calls[0], Call::CreateAccount { .. }));
        assert_eq!(
            calls[1],
            Call::UpdateAccount {
                account_id: 301,
                status: AccountStatus::Open,
                total_cents: 2200,
            }
        );
        assert_eq!(session.account().account_id, 301);
    }

    #[tokio::test]
    async fn test_recommit_open_account_stays_open() {
        let store = Arc::new(MockStore::new());
        let mut account = draft_account(201);
        account.status = AccountStatus::Open;
        account.details = vec![LineItem::committed(11, "Latte", 2, 2500)];

        let mut session = OrderSession::new(store.clone(), account);
        session.add_product(&espresso());
        session.finish_order().await.unwrap();

        // Full ledger contents go into the batch, committed lines included.
        assert_eq!(
            store.calls(),
            vec![
                Call::UpdateAccount {
                    account_id: 201,
                    status: AccountStatus::Open,
                    total_cents: 7200,
                },
                Call::CreateDetails {
                    account_id: 201,
                    count: 2,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_finish_closed_account_rejected() {
        let store = Arc::new(MockStore::new());
        let mut account = draft_account(201);
        account.status = AccountStatus::Closed;

        let mut session = OrderSession::new(store.clone(), account);
        session.add_product(&latte());

        assert!(matches!(
            session.finish_order().await,
            Err(crate::SessionError::Core(CoreError::AccountClosed {
                account_id: 201
            }))
        ));
        assert!(store.calls().is_empty());
    }

    #[tokio::test]
    async fn test_close_unconfirmed_no_network() {
        let store = Arc::new(MockStore::new());
        let mut session = OrderSession::new(store.clone(), draft_account(201));
        session.add_product(&latte());

        let signal = session.close_order(false).await.unwrap();

        assert_eq!(signal, SessionSignal::BackToTables);
        assert!(store.calls().is_empty());
        assert!(session.ledger().is_empty());
        assert_eq!(session.account().status, AccountStatus::Draft);
    }

    #[tokio::test]
    async fn test_close_confirmed_persists_closed() {
        let store = Arc::new(MockStore::new());
        let mut session = OrderSession::new(store.clone(), draft_account(201));
        session.add_product(&latte());

        session.close_order(true).await.unwrap();

        assert_eq!(
            store.calls(),
            vec![Call::UpdateAccount {
                account_id: 201,
                status: AccountStatus::Closed,
                total_cents: 2500,
            }]
        );
        assert_eq!(session.account().status, AccountStatus::Closed);
    }

    #[tokio::test]
    async fn test_close_failure_preserves_session() {
        let store = Arc::new(MockStore::new().fail_update());
        let mut session = OrderSession::new(store.clone(), draft_account(201));
        session.add_product(&latte());

        let result = session.close_order(true).await;

        assert!(matches!(result, Err(crate::SessionError::Store(_))));
        assert_eq!(session.ledger().len(), 1);
        assert_eq!(session.account().status, AccountStatus::Draft);
    }

    #[tokio::test]
    async fn test_close_unpersisted_walk_in_skips_network() {
        let store = Arc::new(MockStore::new());
        let mut session = OrderSession::walk_in(store.clone(), "A1", 2);

        session.close_order(true).await.unwrap();

        assert!(store.calls().is_empty());
        assert_eq!(session.account().status, AccountStatus::Closed);
    }

    #[tokio::test]
    async fn test_save_and_go_back_no_network() {
        let store = Arc::new(MockStore::new());
        let mut session = OrderSession::new(store.clone(), draft_account(201));
        session.add_product(&latte());

        let signal = session.save_and_go_back();

        assert_eq!(signal, SessionSignal::BackToTables);
        assert!(store.calls().is_empty());
        assert!(session.ledger().is_empty());
    }

    #[tokio::test]
    async fn test_unsaved_changes_tracking() {
        let store = Arc::new(MockStore::new());
        let mut account = draft_account(201);
        account.details = vec![LineItem::committed(11, "Latte", 1, 2500)];

        let mut session = OrderSession::new(store, account);
        assert!(!session.has_unsaved_changes());

        session.add_product(&espresso());
        assert!(session.has_unsaved_changes());
    }

    #[tokio::test]
    async fn test_loaded_details_are_committed() {
        let store = Arc::new(MockStore::new());
        let mut account = draft_account(201);
        account.details = vec![LineItem::committed(11, "Latte", 1, 2500)];

        let mut session = OrderSession::new(store, account);
        // The floor holds: decrementing the loaded line is a no-op.
        session.decrement_quantity("Latte");
        assert_eq!(session.ledger().items()[0].quantity, 1);
        assert_eq!(
            session.ledger().items()[0].origin,
            ItemOrigin::Committed { floor: 1 }
        );
    }

    #[tokio::test]
    async fn test_change_callback_fires_on_mutation() {
        static FIRED: AtomicUsize = AtomicUsize::new(0);

        let store = Arc::new(MockStore::new());
        let mut session = OrderSession::new(store, draft_account(201));
        session.set_on_change(|_| {
            FIRED.fetch_add(1, Ordering::SeqCst);
        });

        session.add_product(&latte());
        session.increment_quantity("Latte");
        session.decrement_quantity("Latte");

        assert_eq!(FIRED.load(Ordering::SeqCst), 3);
    }
}
