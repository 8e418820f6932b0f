//! # Display Derivation
//!
//! The receipt shown on screen (and exported) is never stored: it is derived
//! on every read from the draft and the confirmed receipt.
//!
//! ## Precedence (per field, independently)
//! ```text
//! ┌──────────────┬──────────────────────────────┬──────────────────────────┐
//! │ Field        │ Confirmed receipt present    │ Otherwise                │
//! ├──────────────┼──────────────────────────────┼──────────────────────────┤
//! │ number       │ receipt.number               │ none ("DRAFT")           │
//! │ customer     │ receipt.customer ?? draft    │ draft.customer           │
//! │ notes        │ receipt.notes ?? draft       │ draft.notes              │
//! │ items        │ receipt.items                │ draft.items              │
//! │ total        │ receipt.total (service)      │ draft subtotal (local)   │
//! └──────────────┴──────────────────────────────┴──────────────────────────┘
//! ```

use crate::money::Money;
use crate::types::{pad_receipt_number, ConfirmedReceipt, Draft, LineItem};

/// Borrowed view of what the receipt region renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayState<'a> {
    pub number: Option<u64>,
    pub customer_name: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub items: &'a [LineItem],
    pub total: Money,
}

impl<'a> DisplayState<'a> {
    /// Derives the display state from a draft and an optional receipt.
    pub fn derive(draft: &'a Draft, confirmed: Option<&'a ConfirmedReceipt>) -> Self {
        match confirmed {
            Some(receipt) => DisplayState {
                number: Some(receipt.number),
                customer_name: receipt
                    .customer_name
                    .as_deref()
                    .or(draft.customer_name.as_deref()),
                notes: receipt.notes.as_deref().or(draft.notes.as_deref()),
                items: &receipt.items,
                total: receipt.total,
            },
            None => DisplayState {
                number: None,
                customer_name: draft.customer_name.as_deref(),
                notes: draft.notes.as_deref(),
                items: &draft.items,
                total: draft.subtotal(),
            },
        }
    }

    /// Receipt number label: `0007` once issued, `DRAFT` before.
    pub fn number_label(&self) -> String {
        self.number
            .map(pad_receipt_number)
            .unwrap_or_else(|| "DRAFT".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> Draft {
        Draft {
            customer_name: Some("Budi".to_string()),
            notes: Some("Lunas".to_string()),
            items: vec![LineItem::new("Produk A", 2, Money::from_rupiah(15_000))],
        }
    }

    #[test]
    fn test_draft_only() {
        let draft = draft();
        let view = DisplayState::derive(&draft, None);
        assert_eq!(view.number_label(), "DRAFT");
        assert_eq!(view.customer_name, Some("Budi"));
        assert_eq!(view.total, Money::from_rupiah(30_000));
        assert_eq!(view.items, draft.items.as_slice());
    }

    #[test]
    fn test_confirmed_wins_per_field() {
        let draft = draft();
        let receipt = ConfirmedReceipt {
            number: 7,
            customer_name: None,
            notes: Some("Dikirim".to_string()),
            items: vec![LineItem::new("Produk Z", 1, Money::from_rupiah(99_000))],
            total: Money::from_rupiah(1),
        };

        let view = DisplayState::derive(&draft, Some(&receipt));
        assert_eq!(view.number_label(), "0007");
        // Missing on the receipt: falls back to the draft
        assert_eq!(view.customer_name, Some("Budi"));
        assert_eq!(view.notes, Some("Dikirim"));
        assert_eq!(view.items, receipt.items.as_slice());
        // Service total is trusted even though it disagrees with the lines
        assert_eq!(view.total, Money::from_rupiah(1));
    }
}
