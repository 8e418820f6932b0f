//! # Error Types
//!
//! Domain-specific error types for struk-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  struk-core errors (this file)                                          │
//! │  ├── CoreError        - Ledger state violations                         │
//! │  ├── ValidationError  - Line item input failures (inline, non-fatal)    │
//! │  └── CurrencyError    - Locale resolution (always recovered)            │
//! │                                                                         │
//! │  struk-issuer errors  └── IssueError   - Submission failures            │
//! │  struk-export errors  └── ExportError  - Snapshot failures              │
//! │                                                                         │
//! │  Session (app)        └── ApiError     - What the banner shows          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Banner                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Ledger errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// The draft is read-only because a receipt has been issued for it.
    ///
    /// ## When This Occurs
    /// - Adding/removing items or editing metadata after a successful submit
    /// - Submitting a second time without a reset
    #[error("Receipt already issued; reset to start a new one")]
    ReceiptConfirmed,

    /// Validation error (wraps ValidationError).
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Line item input errors.
///
/// Surfaced inline next to the form and cleared by the next successful edit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Item name is empty after trimming.
    #[error("Item name is required")]
    EmptyName,

    /// Unit price is not a finite number.
    #[error("Price must be a number, got '{input}'")]
    InvalidPrice { input: String },
}

// =============================================================================
// Currency Error
// =============================================================================

/// Locale-aware formatting failures.
///
/// Never reaches the user: the formatter falls back to manual grouping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyError {
    #[error("Unknown locale: {locale}")]
    UnknownLocale { locale: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
