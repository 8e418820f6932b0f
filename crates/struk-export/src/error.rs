//! # Export Error Types
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Export Error Categories                            │
//! │                                                                         │
//! │  Preconditions      NothingToExport   (no confirmed receipt)            │
//! │                     RegionUnavailable (preview not mounted / no rows)   │
//! │                                                                         │
//! │  Logo asset         AssetTainted      (no readable ACAO grant)          │
//! │                     ExportTimeout     (asset slower than the limit)     │
//! │                     AssetUnavailable  (fetch or decode failed)          │
//! │                                                                         │
//! │  Output             Encode            (PNG encoder)                     │
//! │                     Write             (temp file / rename)              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these touch the draft or the confirmed receipt.

use thiserror::Error;

/// Result type alias for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Snapshot export failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("Create a receipt before downloading it")]
    NothingToExport,

    #[error("Receipt preview is not available for capture")]
    RegionUnavailable,

    /// The asset host did not grant cross-origin read access.
    #[error("Logo at {url} cannot be read cross-origin (missing Access-Control-Allow-Origin)")]
    AssetTainted { url: String },

    #[error("Timed out after {millis} ms loading {url}")]
    ExportTimeout { url: String, millis: u128 },

    #[error("Could not load logo from {url}: {reason}")]
    AssetUnavailable { url: String, reason: String },

    #[error("Failed to encode PNG: {0}")]
    Encode(String),

    #[error("Failed to write {path}: {reason}")]
    Write { path: String, reason: String },
}

impl ExportError {
    pub(crate) fn unavailable(url: &str, reason: impl ToString) -> Self {
        ExportError::AssetUnavailable {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn write(path: &std::path::Path, err: std::io::Error) -> Self {
        ExportError::Write {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }
}
