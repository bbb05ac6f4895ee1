//! # Order Store
//!
//! The persistence seam between session orchestration and the REST client.
//!
//! Session and floor logic only ever see this trait. Production wires in
//! [`comanda_backend::Backend`]; tests wire in a recording mock.

use async_trait::async_trait;

use comanda_backend::{Backend, BackendResult};
use comanda_core::{Account, AccountStatus, LineItem, Money, NewAccount, Table};

/// Everything the session layer needs from persistence.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Fetches every table with its nested accounts.
    async fn fetch_tables(&self) -> BackendResult<Vec<Table>>;

    /// Creates a draft account, returning it with its backend-assigned id.
    async fn create_account(&self, new: &NewAccount) -> BackendResult<Account>;

    /// Updates an account's status and total.
    async fn update_account(
        &self,
        account_id: i64,
        status: AccountStatus,
        total: Money,
    ) -> BackendResult<()>;

    /// Fetches an account's committed line items.
    async fn fetch_details(&self, account_id: i64) -> BackendResult<Vec<LineItem>>;

    /// Persists a batch of line items against an account.
    async fn create_details(&self, account_id: i64, items: &[LineItem]) -> BackendResult<()>;

    /// Closes every account on a table.
    async fn close_table_accounts(&self, table_id: &str) -> BackendResult<()>;
}

#[async_trait]
impl OrderStore for Backend {
    async fn fetch_tables(&self) -> BackendResult<Vec<Table>> {
        self.tables().fetch_all().await
    }

    async fn create_account(&self, new: &NewAccount) -> BackendResult<Account> {
        self.bills().create(new).await
    }

    async fn update_account(
        &self,
        account_id: i64,
        status: AccountStatus,
        total: Money,
    ) -> BackendResult<()> {
        self.bills().update(account_id, status, total).await
    }

    async fn fetch_details(&self, account_id: i64) -> BackendResult<Vec<LineItem>> {
        self.bills().details(account_id).await
    }

    async fn create_details(&self, account_id: i64, items: &[LineItem]) -> BackendResult<()> {
        self.bills().create_details(account_id, items).await
    }

    async fn close_table_accounts(&self, table_id: &str) -> BackendResult<()> {
        self.tables().close_all(table_id).await
    }
}

// =============================================================================
// Test Support
// =============================================================================

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use comanda_backend::BackendError;
    use std::sync::Mutex;

    /// One recorded store invocation.
    #[derive(Debug, Clone, PartialEq)]
    pub(crate) enum Call {
        FetchTables,
        CreateAccount {
            table_id: String,
            customer: String,
            sequence_number: u32,
        },
        UpdateAccount {
            account_id: i64,
            status: AccountStatus,
            total_cents: i64,
        },
        FetchDetails {
            account_id: i64,
        },
        CreateDetails {
            account_id: i64,
            count: usize,
        },
        CloseTable {
            table_id: String,
        },
    }

    /// Recording store with injectable failures.
    pub(crate) struct MockStore {
        calls: Mutex<Vec<Call>>,
        tables: Vec<Table>,
        details: Vec<LineItem>,
        next_account_id: i64,
        fail_update: bool,
        fail_details: bool,
    }

    impl MockStore {
        pub(crate) fn new() -> Self {
            MockStore {
                calls: Mutex::new(Vec::new()),
                tables: Vec::new(),
                details: Vec::new(),
                next_account_id: 1,
                fail_update: false,
                fail_details: false,
            }
        }

        pub(crate) fn with_tables(mut self, tables: Vec<Table>) -> Self {
            self.tables = tables;
            self
        }

        pub(crate) fn with_details(mut self, details: Vec<LineItem>) -> Self {
            self.details = details;
            self
        }

        pub(crate) fn with_next_account_id(mut self, id: i64) -> Self {
            self.next_account_id = id;
            self
        }

        /// Makes `update_account` fail.
        pub(crate) fn fail_update(mut self) -> Self {
            self.fail_update = true;
            self
        }

        /// Makes `create_details` fail.
        pub(crate) fn fail_details(mut self) -> Self {
            self.fail_details = true;
            self
        }

        pub(crate) fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: Call) {
            self.calls.lock().unwrap().push(call);
        }

        fn injected() -> BackendError {
            BackendError::Transport("injected failure".to_string())
        }
    }

    #[async_trait]
    impl OrderStore for MockStore {
        async fn fetch_tables(&self) -> BackendResult<Vec<Table>> {
            self.record(Call::FetchTables);
            Ok(self.tables.clone())
        }

        async fn create_account(&self, new: &NewAccount) -> BackendResult<Account> {
            self.record(Call::CreateAccount {
                table_id: new.table_id.clone(),
                customer: new.customer.clone(),
                sequence_number: new.sequence_number,
            });
            Ok(Account {
                account_id: self.next_account_id,
                table_id: new.table_id.clone(),
                cashier_id: new.cashier_id,
                customer: new.customer.clone(),
                opened_at: new.opened_at,
                last_modified_at: new.opened_at,
                status: AccountStatus::Draft,
                sequence_number: new.sequence_number,
                details: Vec::new(),
                total_cents: 0,
            })
        }

        async fn update_account(
            &self,
            account_id: i64,
            status: AccountStatus,
            total: Money,
        ) -> BackendResult<()> {
            self.record(Call::UpdateAccount {
                account_id,
                status,
                total_cents: total.cents(),
            });
            if self.fail_update {
                return Err(Self::injected());
            }
            Ok(())
        }

        async fn fetch_details(&self, account_id: i64) -> BackendResult<Vec<LineItem>> {
            self.record(Call::FetchDetails { account_id });
            Ok(self.details.clone())
        }

        async fn create_details(
            &self,
            account_id: i64,
            items: &[LineItem],
        ) -> BackendResult<()> {
            self.record(Call::CreateDetails {
                account_id,
                count: items.len(),
            });
            if self.fail_details {
                return Err(Self::injected());
            }
            Ok(())
        }

        async fn close_table_accounts(&self, table_id: &str) -> BackendResult<()> {
            self.record(Call::CloseTable {
                table_id: table_id.to_string(),
            });
            Ok(())
        }
    }
}
