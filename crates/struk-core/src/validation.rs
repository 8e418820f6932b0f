//! # Validation Module
//!
//! Turns raw form text into line item fields.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Line Item Input Rules                              │
//! │                                                                         │
//! │  name      "  Produk A " ──► trim ──► empty? ──► EmptyName              │
//! │                                                                         │
//! │  quantity  "2"   ──► 2                                                  │
//! │            "2.9" ──► 2      (floored)                                   │
//! │            "0"   ──► 1      (clamped, never rejected)                   │
//! │            "abc" ──► 1      (non-numeric counts as non-positive)        │
//! │                                                                         │
//! │  price     "15000" ──► Rp 15.000                                        │
//! │            "abc"   ──► InvalidPrice                                     │
//! │            ""      ──► InvalidPrice                                     │
//! │            "inf"   ──► InvalidPrice (must be finite)                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use struk_core::validation::{coerce_quantity, parse_price, validate_item_name};
//!
//! assert_eq!(validate_item_name(" Produk A ").unwrap(), "Produk A");
//! assert_eq!(coerce_quantity("0"), 1);
//! assert!(parse_price("abc").is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Minimum quantity of a line item.
pub const MIN_QUANTITY: u32 = 1;

/// Validates an item name and returns it trimmed.
pub fn validate_item_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }
    Ok(name.to_string())
}

/// Coerces quantity text to a positive integer.
///
/// Never fails: non-numeric or non-positive input becomes 1, fractions are
/// floored, values past `u32::MAX` saturate.
pub fn coerce_quantity(input: &str) -> u32 {
    let Ok(value) = input.trim().parse::<f64>() else {
        return MIN_QUANTITY;
    };
    if !value.is_finite() {
        return MIN_QUANTITY;
    }

    let floored = value.floor();
    if floored < MIN_QUANTITY as f64 {
        MIN_QUANTITY
    } else if floored >= u32::MAX as f64 {
        u32::MAX
    } else {
        floored as u32
    }
}

/// Parses price text (rupiah) into `Money`.
pub fn parse_price(input: &str) -> ValidationResult<Money> {
    let invalid = || ValidationError::InvalidPrice {
        input: input.to_string(),
    };

    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(invalid());
    }

    let value: f64 = trimmed.parse().map_err(|_| invalid())?;
    Money::try_from_rupiah(value).ok_or_else(invalid)
}

/// Normalizes optional free text (customer name, notes).
///
/// Blank text is treated as absent so it is sent as `null`.
pub fn normalize_optional(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
