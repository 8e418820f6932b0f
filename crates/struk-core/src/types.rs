//! # Domain Types
//!
//! Core domain types used throughout Struk.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │    LineItem     │   │      Draft      │   │  ConfirmedReceipt   │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  name           │   │  customer_name? │   │  number (service)   │   │
//! │  │  quantity ≥ 1   │   │  notes?         │   │  customer_name?     │   │
//! │  │  unit_price     │   │  items[]        │   │  notes?             │   │
//! │  └─────────────────┘   └─────────────────┘   │  items[]            │   │
//! │                                              │  total (service)    │   │
//! │  ┌─────────────────┐                         └─────────────────────┘   │
//! │  │     Phase       │                                                    │
//! │  │  Empty          │   Draft: local, mutable                            │
//! │  │  Editable       │   ConfirmedReceipt: issued by the receipt          │
//! │  │  Confirmed      │   service, immutable for the session               │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Line Item
// =============================================================================

/// A single purchased entry.
///
/// Immutable once added to a ledger; the only edit is removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    name: String,
    quantity: u32,
    unit_price: Money,
}

impl LineItem {
    /// Creates a line item from already validated fields.
    ///
    /// The ledger builds items through [`crate::ledger::Ledger::add_item`];
    /// this constructor is also used to decode items issued by the service,
    /// which are trusted as-is.
    pub fn new(name: impl Into<String>, quantity: u32, unit_price: Money) -> Self {
        LineItem {
            name: name.into(),
            quantity,
            unit_price,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Calculates the line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Draft
// =============================================================================

/// A locally held, unconfirmed receipt in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub customer_name: Option<String>,
    pub notes: Option<String>,
    pub items: Vec<LineItem>,
}

impl Draft {
    /// Sum of line totals; zero for an empty draft.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// =============================================================================
// Confirmed Receipt
// =============================================================================

/// A numbered receipt issued by the receipt service.
///
/// ## Invariants
/// - `number` is positive (checked when decoding the service response)
/// - `total` is the service's figure, never recomputed locally
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfirmedReceipt {
    pub number: u64,
    pub customer_name: Option<String>,
    pub notes: Option<String>,
    pub items: Vec<LineItem>,
    pub total: Money,
}

impl ConfirmedReceipt {
    /// Receipt number zero-padded to four digits (`7` → `0007`).
    pub fn padded_number(&self) -> String {
        pad_receipt_number(self.number)
    }
}

/// Zero-pads a receipt number to at least four digits.
pub fn pad_receipt_number(number: u64) -> String {
    format!("{number:04}")
}

// =============================================================================
// Phase
// =============================================================================

/// Where a ledger is in the draft lifecycle.
///
/// ```text
/// Empty ──add──► Editable ──submit ok──► Confirmed ──export──► Confirmed
///   ▲               │  ▲                     │
///   │               │  └──submit failed──────┘ (stays Editable)
///   └────reset──────┴────────reset───────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No items and no receipt.
    Empty,
    /// Draft has at least one item and no receipt yet.
    Editable,
    /// The service has issued a receipt.
    Confirmed,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Empty => write!(f, "empty"),
            Phase::Editable => write!(f, "editable"),
            Phase::Confirmed => write!(f, "confirmed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let item = LineItem::new("Produk A", 2, Money::from_rupiah(15_000));
        assert_eq!(item.line_total(), Money::from_rupiah(30_000));
    }

    #[test]
    fn test_draft_subtotal() {
        let mut draft = Draft::default();
        assert_eq!(draft.subtotal(), Money::zero());

        draft.items.push(LineItem::new("A", 2, Money::from_rupiah(15_000)));
        draft.items.push(LineItem::new("B", 1, Money::from_rupiah(5_000)));
        assert_eq!(draft.subtotal(), Money::from_rupiah(35_000));
    }

    #[test]
    fn test_padded_number() {
        assert_eq!(pad_receipt_number(7), "0007");
        assert_eq!(pad_receipt_number(1234), "1234");
        assert_eq!(pad_receipt_number(123_456), "123456");
    }
}
