//! # Table Endpoints
//!
//! Fetching the floor and closing every account on one table.

use tracing::debug;

use comanda_core::Table;

use crate::client::{ensure_success, parse_envelope};
use crate::dto::TableRecord;
use crate::error::BackendResult;

/// Table endpoints.
#[derive(Debug, Clone)]
pub struct TableApi {
    http: reqwest::Client,
    base_url: String,
}

impl TableApi {
    pub(crate) fn new(http: reqwest::Client, base_url: String) -> Self {
        TableApi { http, base_url }
    }

    /// Fetches every table with its nested accounts.
    ///
    /// The stored per-table status string is discarded; display status is
    /// derived locally from the accounts.
    pub async fn fetch_all(&self) -> BackendResult<Vec<Table>> {
        debug!("fetching tables");

        let response = self
            .http
            .get(format!("{}/tables", self.base_url))
            .send()
            .await?;

        let records: Vec<TableRecord> = parse_envelope(response).await?;
        Ok(records.into_iter().map(TableRecord::into_table).collect())
    }

    /// Closes every open or draft account on a table in one call.
    pub async fn close_all(&self, table_id: &str) -> BackendResult<()> {
        debug!(table_id, "closing all accounts on table");

        let response = self
            .http
            .post(format!("{}/bills/table/{}/close", self.base_url, table_id))
            .send()
            .await?;

        ensure_success(response).await
    }
}
