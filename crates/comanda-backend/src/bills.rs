//! # Bill Endpoints
//!
//! Account creation/update and line-item-detail endpoints.
//!
//! ## Commit Call Pair
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │        "Finish Order" Uses Two Sequential Calls                         │
//! │                                                                         │
//! │   1. PUT  /bills/{id}        status + recomputed total                  │
//! │   2. POST /bill-details      full ledger contents as one batch          │
//! │                                                                         │
//! │   The calls are NOT atomic. The session coordinator owns the ordering  │
//! │   and the failure handling; this module only exposes the two calls.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tracing::debug;

use comanda_core::{Account, AccountStatus, LineItem, Money, NewAccount};

use crate::client::{ensure_success, parse_envelope};
use crate::dto::{
    normalize_details, AccountRecord, DetailBatchRecord, DetailRecord, NewAccountRecord,
    UpdateAccountRecord,
};
use crate::error::BackendResult;

/// Account (bill) and detail endpoints.
#[derive(Debug, Clone)]
pub struct BillApi {
    http: reqwest::Client,
    base_url: String,
}

impl BillApi {
    pub(crate) fn new(http: reqwest::Client, base_url: String) -> Self {
        BillApi { http, base_url }
    }

    /// Creates a draft account and returns it with its backend-assigned id.
    pub async fn create(&self, new: &NewAccount) -> BackendResult<Account> {
        debug!(table_id = %new.table_id, customer = %new.customer, "creating account");

        let response = self
            .http
            .post(format!("{}/bills", self.base_url))
            .json(&NewAccountRecord::from(new))
            .send()
            .await?;

        let record: AccountRecord = parse_envelope(response).await?;
        Ok(record.into_account())
    }

    /// Updates an account's status and total.
    pub async fn update(
        &self,
        account_id: i64,
        status: AccountStatus,
        total: Money,
    ) -> BackendResult<()> {
        debug!(account_id, ?status, total = total.cents(), "updating account");

        let response = self
            .http
            .put(format!("{}/bills/{}", self.base_url, account_id))
            .json(&UpdateAccountRecord {
                status,
                total: total.cents(),
            })
            .send()
            .await?;

        ensure_success(response).await
    }

    /// Fetches an account's committed line items.
    ///
    /// Records with invalid quantities are dropped during normalization.
    pub async fn details(&self, account_id: i64) -> BackendResult<Vec<LineItem>> {
        debug!(account_id, "fetching details");

        let response = self
            .http
            .get(format!("{}/bill-details/bill/{}", self.base_url, account_id))
            .send()
            .await?;

        let records: Vec<DetailRecord> = parse_envelope(response).await?;
        Ok(normalize_details(records))
    }

    /// Persists a batch of line items against an account.
    pub async fn create_details(
        &self,
        account_id: i64,
        items: &[LineItem],
    ) -> BackendResult<()> {
        debug!(account_id, count = items.len(), "creating detail batch");

        let response = self
            .http
            .post(format!("{}/bill-details", self.base_url))
            .json(&DetailBatchRecord::new(account_id, items))
            .send()
            .await?;

        ensure_success(response).await
    }
}
