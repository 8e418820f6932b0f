//! # struk-core: Pure Receipt Logic
//!
//! This crate contains the draft/confirmed reconciliation model as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Struk Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    struk-cli (Session + REPL)                   │   │
//! │  │    add ──► remove ──► submit ──► show ──► export ──► reset      │   │
//! │  └──────────────┬──────────────────┬──────────────────┬────────────┘   │
//! │                 │                  │                  │                 │
//! │  ┌──────────────▼──────────────┐   │   ┌──────────────▼────────────┐   │
//! │  │  ★ struk-core (THIS CRATE) ★│   │   │  struk-export             │   │
//! │  │                             │   │   │  layout, raster, PNG      │   │
//! │  │  money  ledger  display     │   │   └───────────────────────────┘   │
//! │  │  types  validation currency │   │                                    │
//! │  │                             │   │   ┌───────────────────────────┐   │
//! │  │  NO I/O • NO NETWORK        │   └──►│  struk-issuer             │   │
//! │  └─────────────────────────────┘       │  POST /api/receipts       │   │
//! │                                        └───────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - Money type with integer sen arithmetic
//! - [`types`] - Line items, drafts, confirmed receipts
//! - [`ledger`] - The Draft Ledger
//! - [`display`] - Display precedence (confirmed over draft)
//! - [`validation`] - Form input rules
//! - [`currency`] - Rupiah formatting
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use struk_core::currency::RupiahFormatter;
//! use struk_core::Ledger;
//!
//! let mut ledger = Ledger::new();
//! ledger.add_item("Produk A", "2", "15000").unwrap();
//! ledger.add_item("Produk B", "1", "5000").unwrap();
//!
//! let total = ledger.display().total;
//! assert_eq!(RupiahFormatter::default().format(total), "Rp 35.000");
//! ```

pub mod currency;
pub mod display;
pub mod error;
pub mod ledger;
pub mod money;
pub mod types;
pub mod validation;

pub use display::DisplayState;
pub use error::{CoreError, CoreResult, ValidationError};
pub use ledger::Ledger;
pub use money::Money;
pub use types::*;
