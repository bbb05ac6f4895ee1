//! # Line Item Ledger
//!
//! In-memory collection of quantity/price line items for one open order.
//!
//! ## Edit Permission Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Two Kinds of Line Items                              │
//! │                                                                         │
//! │  ItemOrigin::Session                ItemOrigin::Committed { floor }    │
//! │  ─────────────────────              ─────────────────────────────────  │
//! │  Added in THIS editing session      Persisted in a PRIOR session       │
//! │  • quantity freely adjustable       • quantity may only grow           │
//! │  • removable                        • never drops to/below the floor   │
//! │  • quantity ≤ 0 deletes the line    • never removable                  │
//! │                                     • growth does NOT make it Session  │
//! │                                                                         │
//! │  RATIONALE: items already confirmed to the kitchen must never be       │
//! │  silently reduced or deleted from the client — staff can only add      │
//! │  more of that item or leave it.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Items are unique by `name` (adding the same product merges into one line)
//! - `quantity` stays > 0 while the item exists in the ledger
//! - `unit_price_cents` is frozen per line for the lifetime of the order
//! - Line totals are always derived, never stored
//! - Mutations on missing or non-editable names are logged no-ops, never errors

use serde::{Deserialize, Serialize};
use tracing::warn;
use ts_rs::TS;

use crate::money::Money;
use crate::types::Product;

// =============================================================================
// Item Origin
// =============================================================================

/// Where a line item came from, as a sum type.
///
/// A `Committed` item can never regain `Session` semantics — no code path
/// constructs one from the other, so the illegal transition is
/// unrepresentable rather than merely checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ItemOrigin {
    /// Added during the current editing session; freely adjustable.
    Session,
    /// Already persisted (sent to the kitchen) before this session began.
    /// `floor` is the quantity at which the item entered the session.
    Committed { floor: i64 },
}

// =============================================================================
// Line Item
// =============================================================================

/// One product row within an order.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub product_id: i64,
    /// Display name; uniqueness key within the ledger.
    pub name: String,
    /// Count, always > 0 while the item is present.
    pub quantity: i64,
    /// Frozen at the moment the product was added.
    pub unit_price_cents: i64,
    pub origin: ItemOrigin,
}

impl LineItem {
    /// Creates a session item from a product, quantity 1.
    ///
    /// ## Price Freezing
    /// The price is captured at this moment. If the menu price changes,
    /// this line retains the price the customer was quoted.
    pub fn from_product(product: &Product) -> Self {
        LineItem {
            product_id: product.product_id,
            name: product.name.clone(),
            quantity: 1,
            unit_price_cents: product.price_cents,
            origin: ItemOrigin::Session,
        }
    }

    /// Creates a committed item from a persisted detail record.
    /// The committed floor is the loaded quantity.
    pub fn committed(product_id: i64, name: impl Into<String>, quantity: i64, unit_price_cents: i64) -> Self {
        LineItem {
            product_id,
            name: name.into(),
            quantity,
            unit_price_cents,
            origin: ItemOrigin::Committed { floor: quantity },
        }
    }

    /// Derived line total: `quantity × unit_price_cents`.
    #[inline]
    pub fn line_total_cents(&self) -> i64 {
        self.unit_price_cents * self.quantity
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents())
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// True for items added in the current session.
    #[inline]
    pub fn is_editable(&self) -> bool {
        matches!(self.origin, ItemOrigin::Session)
    }

    /// Quantity floor: 0 for session items, the entry quantity for
    /// committed items.
    #[inline]
    pub fn committed_floor(&self) -> i64 {
        match self.origin {
            ItemOrigin::Session => 0,
            ItemOrigin::Committed { floor } => floor,
        }
    }
}

// =============================================================================
// Ledger
// =============================================================================

/// The line item ledger for one open order.
///
/// ## Operations Flow
/// ```text
/// Click product  ──────► add_product() ─────► merge or push Session item
/// Click +        ──────► change_quantity(name, +1)
/// Click -        ──────► change_quantity(name, -1) ──► may remove the line
/// Click remove   ──────► remove_item(name) ──► Session items only
/// Commit/render  ──────► total() ──► Σ quantity × unit_price
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Ledger {
    items: Vec<LineItem>,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Ledger { items: Vec::new() }
    }

    /// Creates a ledger from previously persisted line items.
    ///
    /// Used when resuming an account: every loaded item is already
    /// committed, so the caller is expected to pass `Committed` entries.
    pub fn from_items(items: Vec<LineItem>) -> Self {
        Ledger { items }
    }

    /// Adds a product to the order.
    ///
    /// ## Behavior
    /// - A line with the same `name` exists: `quantity += 1`. The line's
    ///   edit permission is unchanged — topping up a committed item does
    ///   not make it removable.
    /// - No such line: a new `Session` item with quantity 1 and the
    ///   product's current price frozen in.
    ///
    /// No error conditions; the only side effect is ledger mutation.
    pub fn add_product(&mut self, product: &Product) {
        if let Some(item) = self.items.iter_mut().find(|i| i.name == product.name) {
            item.quantity += 1;
            return;
        }

        self.items.push(LineItem::from_product(product));
    }

    /// Changes a line's quantity by `delta`, enforcing the edit rules.
    ///
    /// ## Behavior
    /// - Name not found: logged no-op. Reachable only through stale UI
    ///   affordances, so it is not treated as exceptional.
    /// - `Session` item: `quantity += delta`; a result ≤ 0 removes the
    ///   line entirely.
    /// - `Committed` item: the delta is applied only when the result stays
    ///   strictly above the committed floor; rejected decrements leave the
    ///   quantity unchanged. The item never becomes removable this way.
    ///
    /// Returns the resulting ledger contents.
    pub fn change_quantity(&mut self, name: &str, delta: i64) -> &[LineItem] {
        let Some(index) = self.items.iter().position(|i| i.name == name) else {
            warn!(name = %name, delta = %delta, "change_quantity on missing line item");
            return &self.items;
        };

        let origin = self.items[index].origin;
        let new_quantity = self.items[index].quantity + delta;

        match origin {
            ItemOrigin::Session => {
                if new_quantity <= 0 {
                    self.items.remove(index);
                } else {
                    self.items[index].quantity = new_quantity;
                }
            }
            ItemOrigin::Committed { floor } => {
                if new_quantity > floor {
                    self.items[index].quantity = new_quantity;
                } else {
                    warn!(
                        name = %name,
                        floor = %floor,
                        requested = %new_quantity,
                        "decrement rejected: committed quantity is the floor"
                    );
                }
            }
        }

        &self.items
    }

    /// Removes a line item, `Session` items only.
    ///
    /// Committed or missing names are logged no-ops: items already sent
    /// to the kitchen cannot be deleted from the client.
    ///
    /// Returns the resulting ledger contents.
    pub fn remove_item(&mut self, name: &str) -> &[LineItem] {
        match self.items.iter().position(|i| i.name == name) {
            Some(index) if self.items[index].is_editable() => {
                self.items.remove(index);
            }
            Some(_) => {
                warn!(name = %name, "remove rejected: line item is committed");
            }
            None => {
                warn!(name = %name, "remove on missing line item");
            }
        }

        &self.items
    }

    /// Order total in cents: sum of derived line totals.
    pub fn total_cents(&self) -> i64 {
        self.items.iter().map(|i| i.line_total_cents()).sum()
    }

    /// Order total as Money.
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents())
    }

    /// Current ledger contents.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Number of distinct lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when no lines are present.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// True when any line was added in the current session.
    pub fn has_session_items(&self) -> bool {
        self.items.iter().any(|i| i.is_editable())
    }

    /// Drops all lines. Used when the session ends.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
