//! # Ledger Commands
//!
//! Draft edits: add, remove, customer, notes, reset.
//!
//! Every successful edit clears the banner; a failed edit replaces it with a
//! `Validation` banner, so an old error never outlives the next edit.

use struk_core::{CoreResult, LineItem};
use tracing::debug;

use crate::error::ApiError;
use crate::state::{BannerKind, Operation, Session, SessionState};

/// Runs a ledger edit and updates the banner from its outcome.
fn edit<T>(
    state: &SessionState,
    f: impl FnOnce(&mut Session) -> CoreResult<T>,
) -> Result<T, ApiError> {
    state.with_session_mut(|s| {
        if s.is_submitting() {
            return Err(ApiError::busy(&Operation::Submit.to_string()));
        }
        match f(s) {
            Ok(value) => {
                s.clear_banner();
                Ok(value)
            }
            Err(e) => {
                let err = ApiError::from(e);
                s.set_banner(BannerKind::Validation, err.clone());
                Err(err)
            }
        }
    })
}

/// Adds a line item from raw form text.
pub fn add_item(
    state: &SessionState,
    name: &str,
    quantity: &str,
    unit_price: &str,
) -> Result<LineItem, ApiError> {
    debug!(name, quantity, unit_price, "add_item command");
    edit(state, |s| s.ledger_mut().add_item(name, quantity, unit_price))
}

/// Removes the item at `index`; out of range is a no-op.
pub fn remove_item(state: &SessionState, index: usize) -> Result<Option<LineItem>, ApiError> {
    debug!(index, "remove_item command");
    edit(state, |s| s.ledger_mut().remove_item(index))
}

pub fn set_customer_name(state: &SessionState, name: &str) -> Result<(), ApiError> {
    edit(state, |s| s.ledger_mut().set_customer_name(name))
}

pub fn set_notes(state: &SessionState, notes: &str) -> Result<(), ApiError> {
    edit(state, |s| s.ledger_mut().set_notes(notes))
}

/// Starts over: empty draft, no receipt, no banner.
pub fn reset(state: &SessionState) -> Result<(), ApiError> {
    state.with_session_mut(|s| {
        for operation in [Operation::Submit, Operation::Export] {
            if s.is_busy(operation) {
                return Err(ApiError::busy(&operation.to_string()));
            }
        }
        s.reset();
        Ok(())
    })
}
