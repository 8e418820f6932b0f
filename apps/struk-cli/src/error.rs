//! # API Error Type
//!
//! Unified error type for session commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Struk                                  │
//! │                                                                         │
//! │  REPL line ──► command function ──► Result<T, ApiError>                 │
//! │                                          │                              │
//! │        CoreError   (validation, read-only draft) ─┐                     │
//! │        IssueError  (empty draft, rejected, failed)├──► ApiError         │
//! │        ExportError (nothing, region, taint, ...)  │    { code, message }│
//! │        ConfigError (bad file, bad value)         ─┘                     │
//! │                                          │                              │
//! │                                          ▼                              │
//! │                 Banner { kind, error } on the session, printed as       │
//! │                 "[SUBMISSION_REJECTED] ..." and the REPL continues      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use struk_core::CoreError;
use struk_export::ExportError;
use struk_issuer::IssueError;

use crate::state::ConfigError;

/// Error returned from session commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "SUBMISSION_REJECTED",
///   "message": "Receipt service rejected the draft (HTTP 422): ..."
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Form input rejected (empty name, bad price)
    ValidationError,

    /// Draft is read-only while a confirmed receipt exists
    ReceiptConfirmed,

    /// Submit with no items
    EmptyDraft,

    /// Receipt service answered non-2xx
    SubmissionRejected,

    /// Receipt service unreachable or answer unusable
    SubmissionFailed,

    /// Export before any successful submit
    NothingToExport,

    /// Preview not mounted
    RegionUnavailable,

    /// Logo not readable cross-origin
    AssetTainted,

    /// Logo slower than the asset timeout
    ExportTimeout,

    /// Logo fetch/decode, encoding or writing failed
    ExportFailed,

    /// Same operation already in flight
    Busy,

    /// Invalid configuration
    ConfigError,

    /// Unparseable command line
    UsageError,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a busy error for `operation`.
    pub fn busy(operation: &str) -> Self {
        ApiError::new(
            ErrorCode::Busy,
            format!("{} is already in progress", operation),
        )
    }

    /// Creates a usage error.
    pub fn usage(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::UsageError, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ReceiptConfirmed => ApiError::new(ErrorCode::ReceiptConfirmed, err.to_string()),
            CoreError::Validation(e) => ApiError::new(ErrorCode::ValidationError, e.to_string()),
        }
    }
}

/// Converts submission errors to API errors.
impl From<IssueError> for ApiError {
    fn from(err: IssueError) -> Self {
        let code = match &err {
            IssueError::EmptyDraft => ErrorCode::EmptyDraft,
            IssueError::Rejected { .. } => ErrorCode::SubmissionRejected,
            IssueError::Failed(_) => ErrorCode::SubmissionFailed,
            IssueError::InvalidConfig(_) => ErrorCode::ConfigError,
        };
        ApiError::new(code, err.to_string())
    }
}

/// Converts export errors to API errors.
impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        let code = match &err {
            ExportError::NothingToExport => ErrorCode::NothingToExport,
            ExportError::RegionUnavailable => ErrorCode::RegionUnavailable,
            ExportError::AssetTainted { .. } => ErrorCode::AssetTainted,
            ExportError::ExportTimeout { .. } => ErrorCode::ExportTimeout,
            ExportError::AssetUnavailable { .. }
            | ExportError::Encode(_)
            | ExportError::Write { .. } => {
                tracing::error!("Export failed: {}", err);
                ErrorCode::ExportFailed
            }
        };
        ApiError::new(code, err.to_string())
    }
}

/// Converts configuration errors to API errors.
impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let code = serde_json::to_value(self.code)
            .ok()
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| format!("{:?}", self.code));
        write!(f, "[{}] {}", code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use struk_core::ValidationError;

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::from(IssueError::rejected(422, "bad"));
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "SUBMISSION_REJECTED");
        assert_eq!(
            json["message"],
            "Receipt service rejected the draft (HTTP 422): bad"
        );
    }

    #[test]
    fn test_display_uses_wire_code() {
        let err = ApiError::from(CoreError::Validation(ValidationError::EmptyName));
        assert_eq!(err.to_string(), "[VALIDATION_ERROR] Item name is required");
    }

    #[test]
    fn test_export_codes() {
        assert_eq!(
            ApiError::from(ExportError::NothingToExport).code,
            ErrorCode::NothingToExport
        );
        assert_eq!(
            ApiError::from(ExportError::AssetTainted { url: "u".into() }).code,
            ErrorCode::AssetTainted
        );
        assert_eq!(
            ApiError::from(ExportError::Encode("x".into())).code,
            ErrorCode::ExportFailed
        );
    }

    #[test]
    fn test_config_error_code() {
        let err = ApiError::from(ConfigError::Invalid("scale must be 2..=4".into()));
        assert_eq!(err.code, ErrorCode::ConfigError);
    }
}
