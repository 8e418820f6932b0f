//! # Commands Module
//!
//! Handlers behind the REPL. Each takes the shared session (and, when it
//! talks to the outside, the [`AppContext`](crate::state::AppContext)) and
//! returns `Result<T, ApiError>`.
//!
//! ## Command Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Struk Commands                                     │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Ledger         │  │   Receipt       │  │     Export              │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  add_item       │  │  submit         │  │  export                 │ │
//! │  │  remove_item    │  │  show           │  │                         │ │
//! │  │  set_customer   │  │  ping           │  │                         │ │
//! │  │  set_notes      │  │                 │  │                         │ │
//! │  │  reset          │  │                 │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod export;
pub mod ledger;
pub mod receipt;

#[cfg(test)]
pub(crate) mod testing;
