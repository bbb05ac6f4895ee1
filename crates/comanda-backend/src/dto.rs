//! # Wire Records
//!
//! Serde shapes for the backend's JSON, plus normalization into core types.
//!
//! ## Bilingual Key Normalization
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │               One Record, Two Spellings                                 │
//! │                                                                         │
//! │  The backend grew organically and serves detail records under either   │
//! │  English or Spanish keys depending on the endpoint:                    │
//! │                                                                         │
//! │     productId   │ productoId                                           │
//! │     name        │ nombreProducto                                       │
//! │     quantity    │ cantidad                                             │
//! │     price       │ precioUnitario                                       │
//! │     subTotal    │ subtotal                                             │
//! │                                                                         │
//! │  DetailRecord accepts both on deserialize (serde aliases) and always   │
//! │  WRITES the Spanish spelling, which is what the detail endpoints       │
//! │  expect on POST.                                                       │
//! │                                                                         │
//! │  Amounts cross the wire in cents.                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Conversion into core types happens here and only here; the rest of the
//! workspace never sees a wire record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use comanda_core::validation::validate_quantity;
use comanda_core::{Account, AccountStatus, LineItem, NewAccount, Table};

// =============================================================================
// Response Envelope
// =============================================================================

/// The backend wraps every response body in this envelope.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// Detail Record
// =============================================================================

/// One persisted line item on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailRecord {
    #[serde(rename = "detalleId", default)]
    pub detail_id: Option<i64>,

    #[serde(rename = "billId", default)]
    pub account_id: Option<i64>,

    #[serde(rename = "productoId", alias = "productId")]
    pub product_id: i64,

    #[serde(rename = "nombreProducto", alias = "name")]
    pub name: String,

    #[serde(rename = "cantidad", alias = "quantity")]
    pub quantity: i64,

    #[serde(rename = "precioUnitario", alias = "price")]
    pub unit_price_cents: i64,

    #[serde(rename = "subtotal", alias = "subTotal")]
    pub subtotal_cents: i64,
}

impl DetailRecord {
    /// Builds the wire record for one ledger line.
    ///
    /// `position` is the 1-based index within the batch; the backend wants
    /// a `detalleId` even though it reassigns its own on insert.
    pub fn from_line_item(item: &LineItem, account_id: i64, position: i64) -> Self {
        DetailRecord {
            detail_id: Some(position),
            account_id: Some(account_id),
            product_id: item.product_id,
            name: item.name.clone(),
            quantity: item.quantity,
            unit_price_cents: item.unit_price_cents,
            subtotal_cents: item.line_total_cents(),
        }
    }

    /// Normalizes into a committed ledger line.
    ///
    /// Records with a non-positive or absurd quantity would corrupt the
    /// ledger's floor rules, so they are dropped with a warning rather
    /// than loaded.
    pub fn into_line_item(self) -> Option<LineItem> {
        match validate_quantity(self.quantity) {
            Ok(quantity) => Some(LineItem::committed(
                self.product_id,
                self.name,
                quantity,
                self.unit_price_cents,
            )),
            Err(err) => {
                warn!(
                    product_id = self.product_id,
                    name = %self.name,
                    quantity = self.quantity,
                    %err,
                    "dropping invalid detail record"
                );
                None
            }
        }
    }
}

/// Normalizes a batch of wire details, dropping invalid records.
pub fn normalize_details(records: Vec<DetailRecord>) -> Vec<LineItem> {
    records
        .into_iter()
        .filter_map(DetailRecord::into_line_item)
        .collect()
}

// =============================================================================
// Account Records
// =============================================================================

/// One account (bill) as the backend serves it.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountRecord {
    #[serde(rename = "billId")]
    pub account_id: i64,

    #[serde(rename = "tableId")]
    pub table_id: String,

    #[serde(rename = "cashRegister", alias = "cashRegisterId")]
    pub cashier_id: i64,

    pub customer: String,

    #[serde(rename = "date")]
    pub opened_at: DateTime<Utc>,

    #[serde(rename = "ultimaModificacion", alias = "updatedAt", default)]
    pub last_modified_at: Option<DateTime<Utc>>,

    pub status: AccountStatus,

    #[serde(rename = "detalles", alias = "details", default)]
    pub details: Vec<DetailRecord>,

    pub total: i64,

    #[serde(rename = "numeroCuenta", default)]
    pub sequence_number: Option<u32>,
}

impl AccountRecord {
    /// Normalizes into a core account.
    ///
    /// A missing `ultimaModificacion` falls back to the opening timestamp;
    /// a missing `numeroCuenta` means the table has a single account.
    pub fn into_account(self) -> Account {
        let last_modified_at = self.last_modified_at.unwrap_or(self.opened_at);
        Account {
            account_id: self.account_id,
            table_id: self.table_id,
            cashier_id: self.cashier_id,
            customer: self.customer,
            opened_at: self.opened_at,
            last_modified_at,
            status: self.status,
            sequence_number: self.sequence_number.unwrap_or(1),
            details: normalize_details(self.details),
            total_cents: self.total,
        }
    }
}

/// Creation payload for `POST /bills`.
///
/// Status and total are fixed here: every new account starts as a `draft`
/// with total 0, whatever the caller holds in memory.
#[derive(Debug, Clone, Serialize)]
pub struct NewAccountRecord<'a> {
    #[serde(rename = "tableId")]
    pub table_id: &'a str,

    #[serde(rename = "cashRegister")]
    pub cashier_id: i64,

    pub customer: &'a str,

    #[serde(rename = "date")]
    pub opened_at: DateTime<Utc>,

    pub status: AccountStatus,

    pub total: i64,

    #[serde(rename = "numeroCuenta")]
    pub sequence_number: u32,
}

impl<'a> From<&'a NewAccount> for NewAccountRecord<'a> {
    fn from(new: &'a NewAccount) -> Self {
        NewAccountRecord {
            table_id: &new.table_id,
            cashier_id: new.cashier_id,
            customer: &new.customer,
            opened_at: new.opened_at,
            status: AccountStatus::Draft,
            total: 0,
            sequence_number: new.sequence_number,
        }
    }
}

/// Update payload for `PUT /bills/{id}`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateAccountRecord {
    pub status: AccountStatus,
    pub total: i64,
}

/// Batch payload for `POST /bill-details`.
#[derive(Debug, Clone, Serialize)]
pub struct DetailBatchRecord {
    #[serde(rename = "billId")]
    pub account_id: i64,

    #[serde(rename = "billDetails")]
    pub details: Vec<DetailRecord>,
}

impl DetailBatchRecord {
    /// Builds the batch for one account from ledger lines.
    pub fn new(account_id: i64, items: &[LineItem]) -> Self {
        let details = items
            .iter()
            .enumerate()
            .map(|(i, item)| DetailRecord::from_line_item(item, account_id, i as i64 + 1))
            .collect();

        DetailBatchRecord {
            account_id,
            details,
        }
    }
}

// =============================================================================
// Table Record
// =============================================================================

/// One table as `GET /tables` serves it.
///
/// The backend also sends a stored `status` string; it is deliberately not
/// modeled here, since display status is always derived locally from the
/// nested accounts.
#[derive(Debug, Clone, Deserialize)]
pub struct TableRecord {
    #[serde(rename = "tableId")]
    pub table_id: String,

    pub zone: String,

    #[serde(rename = "numeroMesa")]
    pub position_in_zone: u32,

    #[serde(rename = "bills", default)]
    pub accounts: Vec<AccountRecord>,
}

impl TableRecord {
    /// Normalizes into a core table.
    pub fn into_table(self) -> Table {
        Table {
            table_id: self.table_id,
            zone: self.zone,
            position_in_zone: self.position_in_zone,
            accounts: self
                .accounts
                .into_iter()
                .map(AccountRecord::into_account)
                .collect(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use comanda_core::ItemOrigin;

    #[test]
    fn test_detail_record_spanish_keys() {
        let json = r#"{
            "detalleId": 7,
            "billId": 201,
            "productoId": 11,
            "nombreProducto": "Latte",
            "cantidad": 2,
            "precioUnitario": 2500,
            "subtotal": 5000
        }"#;

        let record: DetailRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.name, "Latte");
        assert_eq!(record.quantity, 2);
        assert_eq!(record.unit_price_cents, 2500);
    }

    #[test]
    fn test_detail_record_english_keys() {
        let json = r#"{
            "productId": 11,
            "name": "Latte",
            "quantity": 2,
            "price": 2500,
            "subTotal": 5000
        }"#;

        let record: DetailRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.product_id, 11);
        assert_eq!(record.name, "Latte");
        assert_eq!(record.unit_price_cents, 2500);
    }

    #[test]
    fn test_detail_record_writes_spanish() {
        let item = LineItem::committed(11, "Latte", 2, 2500);
        let record = DetailRecord::from_line_item(&item, 201, 1);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["productoId"], 11);
        assert_eq!(json["nombreProducto"], "Latte");
        assert_eq!(json["cantidad"], 2);
        assert_eq!(json["precioUnitario"], 2500);
        assert_eq!(json["subtotal"], 5000);
    }

    #[test]
    fn test_invalid_quantity_dropped() {
        let records = vec![
            DetailRecord {
                detail_id: None,
                account_id: None,
                product_id: 11,
                name: "Latte".to_string(),
                quantity: 2,
                unit_price_cents: 2500,
                subtotal_cents: 5000,
            },
            DetailRecord {
                detail_id: None,
                account_id: None,
                product_id: 12,
                name: "Espresso".to_string(),
                quantity: 0,
                unit_price_cents: 2200,
                subtotal_cents: 0,
            },
        ];

        let items = normalize_details(records);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Latte");
        assert_eq!(items[0].origin, ItemOrigin::Committed { floor: 2 });
    }

    #[test]
    fn test_account_record_normalizes() {
        let json = r#"{
            "billId": 201,
            "tableId": "4",
            "cashRegister": 2,
            "customer": "Maria Lopez",
            "date": "2026-08-28T14:00:00Z",
            "status": "open",
            "detalles": [
                { "productoId": 11, "nombreProducto": "Latte",
                  "cantidad": 2, "precioUnitario": 2500, "subtotal": 5000 }
            ],
            "total": 5000,
            "numeroCuenta": 2
        }"#;

        let account = serde_json::from_str::<AccountRecord>(json)
            .unwrap()
            .into_account();

        assert_eq!(account.account_id, 201);
        assert_eq!(account.status, AccountStatus::Open);
        assert_eq!(account.sequence_number, 2);
        assert_eq!(account.details.len(), 1);
        assert!(!account.details[0].is_editable());
        // Missing ultimaModificacion falls back to the opening timestamp.
        assert_eq!(account.last_modified_at, account.opened_at);
    }

    #[test]
    fn test_new_account_record_is_always_draft() {
        let new = NewAccount {
            table_id: "A2".to_string(),
            cashier_id: 2,
            customer: "Juan".to_string(),
            opened_at: Utc::now(),
            sequence_number: 3,
        };

        let json = serde_json::to_value(NewAccountRecord::from(&new)).unwrap();
        assert_eq!(json["status"], "draft");
        assert_eq!(json["total"], 0);
        assert_eq!(json["numeroCuenta"], 3);
        assert_eq!(json["cashRegister"], 2);
    }

    #[test]
    fn test_table_record_ignores_stored_status() {
        let json = r#"{
            "tableId": "A2",
            "zone": "ZONA A",
            "numeroMesa": 2,
            "status": "disponible",
            "bills": []
        }"#;

        let table = serde_json::from_str::<TableRecord>(json)
            .unwrap()
            .into_table();

        assert_eq!(table.table_id, "A2");
        assert_eq!(table.zone, "ZONA A");
        assert!(table.accounts.is_empty());
    }

    #[test]
    fn test_detail_batch_positions() {
        let items = vec![
            LineItem::committed(11, "Latte", 2, 2500),
            LineItem::committed(12, "Espresso", 1, 2200),
        ];
        let batch = DetailBatchRecord::new(201, &items);

        assert_eq!(batch.account_id, 201);
        assert_eq!(batch.details[0].detail_id, Some(1));
        assert_eq!(batch.details[1].detail_id, Some(2));
        assert_eq!(batch.details[1].subtotal_cents, 2200);
    }
}
