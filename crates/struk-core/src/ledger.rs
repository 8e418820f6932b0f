//! # Draft Ledger
//!
//! Holds the locally entered draft and, once issued, the confirmed receipt.
//!
//! ## Ledger Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Ledger Operations                                    │
//! │                                                                         │
//! │  User Action              Ledger Method            State Change         │
//! │  ───────────              ─────────────            ────────────         │
//! │                                                                         │
//! │  Tambah Item ────────────► add_item() ───────────► items.push(item)     │
//! │                                                                         │
//! │  Hapus ──────────────────► remove_item(i) ───────► items.remove(i)      │
//! │                                                                         │
//! │  Pelanggan / Catatan ────► set_customer_name() ──► draft metadata       │
//! │                            set_notes()                                  │
//! │                                                                         │
//! │  Submit succeeded ───────► confirm(receipt) ─────► confirmed = Some     │
//! │                                                                         │
//! │  Reset ──────────────────► reset() ──────────────► back to Empty        │
//! │                                                                         │
//! │  NOTE: once a receipt is confirmed the draft is read-only until reset.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Derived values (`subtotal`, `display`, `phase`) are computed on every
//! call; nothing derived is stored.

use tracing::debug;

use crate::display::DisplayState;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{ConfirmedReceipt, Draft, LineItem, Phase};
use crate::validation::{coerce_quantity, normalize_optional, parse_price, validate_item_name};

/// The draft ledger plus the receipt issued for it.
///
/// ## Invariants
/// - Items are never merged: identical adds produce separate rows
/// - While `confirmed` is `Some`, the draft is not mutated
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    draft: Draft,
    confirmed: Option<ConfirmedReceipt>,
}

impl Ledger {
    /// Creates an empty ledger (session start).
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates form input and appends a line item.
    ///
    /// ## Rules
    /// - `name` is trimmed and must not be empty (`EmptyName`)
    /// - `quantity` is coerced, never rejected (see [`coerce_quantity`])
    /// - `unit_price` must be a finite number (`InvalidPrice`)
    ///
    /// On failure the items are left unchanged.
    ///
    /// ## Example
    /// ```rust
    /// use struk_core::{Ledger, Money};
    ///
    /// let mut ledger = Ledger::new();
    /// let item = ledger.add_item("Produk A", "0", "10").unwrap();
    /// assert_eq!(item.quantity(), 1);
    /// assert_eq!(ledger.subtotal(), Money::from_rupiah(10));
    /// ```
    pub fn add_item(&mut self, name: &str, quantity: &str, unit_price: &str) -> CoreResult<LineItem> {
        self.ensure_editable()?;

        let name = validate_item_name(name)?;
        let quantity = coerce_quantity(quantity);
        let unit_price = parse_price(unit_price)?;

        let item = LineItem::new(name, quantity, unit_price);
        self.draft.items.push(item.clone());
        Ok(item)
    }

    /// Removes the item at `index`.
    ///
    /// An out-of-bounds index is ignored and returns `Ok(None)`.
    pub fn remove_item(&mut self, index: usize) -> CoreResult<Option<LineItem>> {
        self.ensure_editable()?;

        if index >= self.draft.items.len() {
            debug!(index, len = self.draft.items.len(), "Ignoring out-of-bounds removal");
            return Ok(None);
        }
        Ok(Some(self.draft.items.remove(index)))
    }

    /// Sets the customer name; blank text clears it.
    pub fn set_customer_name(&mut self, name: &str) -> CoreResult<()> {
        self.ensure_editable()?;
        self.draft.customer_name = normalize_optional(name);
        Ok(())
    }

    /// Sets the notes; blank text clears them.
    pub fn set_notes(&mut self, notes: &str) -> CoreResult<()> {
        self.ensure_editable()?;
        self.draft.notes = normalize_optional(notes);
        Ok(())
    }

    /// Installs the receipt issued by the service.
    ///
    /// The draft is kept as-is; display switches to the receipt's fields.
    pub fn confirm(&mut self, receipt: ConfirmedReceipt) -> CoreResult<&ConfirmedReceipt> {
        self.ensure_editable()?;
        Ok(self.confirmed.insert(receipt))
    }

    /// Clears the draft and any confirmed receipt.
    pub fn reset(&mut self) {
        self.draft = Draft::default();
        self.confirmed = None;
    }

    /// Sum of `quantity × unit_price` over the draft items.
    pub fn subtotal(&self) -> Money {
        self.draft.subtotal()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn items(&self) -> &[LineItem] {
        &self.draft.items
    }

    pub fn confirmed(&self) -> Option<&ConfirmedReceipt> {
        self.confirmed.as_ref()
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        if self.confirmed.is_some() {
            Phase::Confirmed
        } else if self.draft.is_empty() {
            Phase::Empty
        } else {
            Phase::Editable
        }
    }

    /// What the receipt region shows right now.
    pub fn display(&self) -> DisplayState<'_> {
        DisplayState::derive(&self.draft, self.confirmed.as_ref())
    }

    fn ensure_editable(&self) -> CoreResult<()> {
        if self.confirmed.is_some() {
            return Err(CoreError::ReceiptConfirmed);
        }
        Ok(())
    }
}
