//! # Table Floor
//!
//! The table view's non-presentational logic: the loaded floor of tables,
//! derived occupancy, account creation and table close.
//!
//! ## Floor Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Floor                                           │
//! │                                                                         │
//! │  refresh() ──► GET /tables ──► local Vec<Table>                        │
//! │      │                                                                  │
//! │      ├── occupancy(id)      derived per render, never stored           │
//! │      ├── zones()            distinct names, first-appearance order     │
//! │      │                                                                  │
//! │      ├── start_account(id, customer)   validate name, THEN create     │
//! │      ├── load_session(id, account_id)  fetch details ──► OrderSession │
//! │      └── close_table(id)               one call closes every account  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use std::sync::Arc;
use tracing::info;

use comanda_core::validation::validate_customer_name;
use comanda_core::{Account, NewAccount, Table, TableOccupancy};

use crate::error::{SessionError, SessionResult};
use crate::session::OrderSession;
use crate::store::OrderStore;

/// The table view's state holder.
pub struct Floor<S: OrderStore> {
    store: Arc<S>,
    cashier_id: i64,
    tables: Vec<Table>,
}

impl<S: OrderStore> Floor<S> {
    /// Creates an empty floor; call [`Floor::refresh`] to populate it.
    pub fn new(store: Arc<S>, cashier_id: i64) -> Self {
        Floor {
            store,
            cashier_id,
            tables: Vec::new(),
        }
    }

    /// Reloads every table with its nested accounts from the backend.
    pub async fn refresh(&mut self) -> SessionResult<&[Table]> {
        self.tables = self.store.fetch_tables().await?;
        info!(tables = self.tables.len(), "floor refreshed");
        Ok(&self.tables)
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Looks up one table on the loaded floor.
    pub fn table(&self, table_id: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.table_id == table_id)
    }

    /// Derived display state for one table.
    pub fn occupancy(&self, table_id: &str) -> Option<TableOccupancy> {
        self.table(table_id).map(TableOccupancy::of)
    }

    /// Distinct zone names in first-appearance order.
    pub fn zones(&self) -> Vec<&str> {
        let mut zones: Vec<&str> = Vec::new();
        for table in &self.tables {
            if !zones.contains(&table.zone.as_str()) {
                zones.push(&table.zone);
            }
        }
        zones
    }

    /// Opens a new draft account at a table.
    ///
    /// The customer name is validated before any backend call; sibling
    /// accounts number the new one `existing + 1`.
    pub async fn start_account(
        &mut self,
        table_id: &str,
        customer: &str,
    ) -> SessionResult<Account> {
        let customer = validate_customer_name(customer)?;

        let table = self
            .table(table_id)
            .ok_or_else(|| SessionError::UnknownTable {
                table_id: table_id.to_string(),
            })?;
        let sequence_number = table.accounts.len() as u32 + 1;

        let new = NewAccount {
            table_id: table_id.to_string(),
            cashier_id: self.cashier_id,
            customer,
            opened_at: Utc::now(),
            sequence_number,
        };

        let account = self.store.create_account(&new).await?;
        info!(
            account_id = account.account_id,
            table_id, sequence_number, "account started"
        );

        if let Some(table) = self.tables.iter_mut().find(|t| t.table_id == table_id) {
            table.accounts.push(account.clone());
        }
        Ok(account)
    }

    /// Loads an account's committed details and opens an editing session.
    pub async fn load_session(
        &self,
        table_id: &str,
        account_id: i64,
    ) -> SessionResult<OrderSession<S>> {
        let table = self
            .table(table_id)
            .ok_or_else(|| SessionError::UnknownTable {
                table_id: table_id.to_string(),
            })?;

        let mut account = table
            .accounts
            .iter()
            .find(|a| a.account_id == account_id)
            .cloned()
            .ok_or(SessionError::UnknownAccount { account_id })?;

        account.details = self.store.fetch_details(account_id).await?;
        Ok(OrderSession::new(self.store.clone(), account))
    }

    /// Opens a walk-in (take-away) session not bound to a loaded table.
    pub fn walk_in_session(&self, table_id: &str) -> OrderSession<S> {
        OrderSession::walk_in(self.store.clone(), table_id, self.cashier_id)
    }

    /// Closes every account on a table with one backend call, then clears
    /// the local account set. The table renders as available afterwards.
    pub async fn close_table(&mut self, table_id: &str) -> SessionResult<()> {
        self.store.close_table_accounts(table_id).await?;

        if let Some(table) = self.tables.iter_mut().find(|t| t.table_id == table_id) {
            table.accounts.clear();
        }
        info!(table_id, "table closed");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
