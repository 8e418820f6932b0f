//! # Issuer Error Types
//!
//! Error types for submitting a draft to the receipt service.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Submission Error Categories                        │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Local          │  │   Service       │  │     Transport           │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  EmptyDraft     │  │  Rejected       │  │  Failed (network,       │ │
//! │  │  (no request    │  │  (non-2xx, body │  │  unreadable or invalid  │ │
//! │  │   is sent)      │  │   truncated)    │  │  response body)         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  Configuration: InvalidConfig (bad backend URL, client build failure)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every message that can reach the banner is bounded by
//! [`MAX_DETAIL_CHARS`].

use thiserror::Error;

/// Result type alias for issuer operations.
pub type IssueResult<T> = Result<T, IssueError>;

/// Maximum characters of service output shown to the user.
pub const MAX_DETAIL_CHARS: usize = 120;

/// Submission failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IssueError {
    /// The draft has no items; nothing was sent.
    #[error("Add at least one item before creating a receipt")]
    EmptyDraft,

    /// The service answered with a non-success status.
    #[error("Receipt service rejected the draft (HTTP {status}): {detail}")]
    Rejected { status: u16, detail: String },

    /// The request could not be completed or the answer was unusable.
    #[error("Could not reach the receipt service: {0}")]
    Failed(String),

    /// Invalid backend configuration.
    #[error("Invalid backend configuration: {0}")]
    InvalidConfig(String),
}

impl IssueError {
    /// Builds a `Rejected` error from a raw response body.
    pub fn rejected(status: u16, body: &str) -> Self {
        let detail = truncate_detail(body);
        let detail = if detail.is_empty() {
            format!("HTTP {status}")
        } else {
            detail
        };
        IssueError::Rejected { status, detail }
    }

    /// Builds a `Failed` error with a bounded message.
    pub fn failed(message: impl AsRef<str>) -> Self {
        IssueError::Failed(truncate_detail(message.as_ref()))
    }
}

/// Trims and cuts text to at most [`MAX_DETAIL_CHARS`] characters.
///
/// Counts characters, not bytes, so multi-byte text is never split.
pub fn truncate_detail(text: &str) -> String {
    text.trim().chars().take(MAX_DETAIL_CHARS).collect()
}
