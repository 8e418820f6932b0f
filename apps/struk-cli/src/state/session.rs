//! # Session State
//!
//! Everything one drafting session owns: the ledger, the error banner, and
//! the busy flags of the two asynchronous operations.
//!
//! ## Thread Safety
//! The session is wrapped in `Arc<Mutex<T>>` and only ever locked for the
//! duration of a closure, never across an `.await`. Submission and export
//! mark themselves busy under the lock and release through [`BusyGuard`],
//! so a failing or early-returning command can never leave a flag set.
//!
//! ## Screen Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Screen                                                                 │
//! │  ┌───────────────────────────────┐   ┌──────────────────────────────┐  │
//! │  │ Controls (never captured)     │   │ ReceiptRegion (capturable)   │  │
//! │  │  add / remove / customer /    │   │  built from DisplayState +   │  │
//! │  │  notes / submit / export /    │   │  Brand; only present while   │  │
//! │  │  reset / ping                 │   │  the preview is mounted      │  │
//! │  └───────────────────────────────┘   └──────────────────────────────┘  │
//! │  Banner: last error (Validation | Submission | Export)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::NaiveDateTime;
use struk_core::currency::RupiahFormatter;
use struk_core::{Ledger, Phase};
use struk_export::{Brand, ReceiptRegion};

use crate::error::ApiError;

// =============================================================================
// Banner
// =============================================================================

/// Which part of the screen raised the banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Validation,
    Submission,
    Export,
}

/// The single user-visible error message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub error: ApiError,
}

// =============================================================================
// Controls
// =============================================================================

/// Interactive controls. They live beside the receipt region, never in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    AddItem,
    RemoveItem,
    CustomerName,
    Notes,
    Submit,
    Download,
    Reset,
    TestConnection,
}

impl Control {
    pub const ALL: [Control; 8] = [
        Control::AddItem,
        Control::RemoveItem,
        Control::CustomerName,
        Control::Notes,
        Control::Submit,
        Control::Download,
        Control::Reset,
        Control::TestConnection,
    ];

    /// REPL usage line.
    pub fn usage(&self) -> &'static str {
        match self {
            Control::AddItem => "add <name> <qty> <price>",
            Control::RemoveItem => "remove <index>",
            Control::CustomerName => "customer [name]",
            Control::Notes => "notes [text]",
            Control::Submit => "submit",
            Control::Download => "export",
            Control::Reset => "reset",
            Control::TestConnection => "ping",
        }
    }
}

/// Operations that run one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Submit,
    Export,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Submit => write!(f, "Submission"),
            Operation::Export => write!(f, "Export"),
        }
    }
}

// =============================================================================
// Session
// =============================================================================

/// One drafting session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    ledger: Ledger,
    banner: Option<Banner>,
    submitting: bool,
    exporting: bool,
    preview_mounted: bool,
}

impl Session {
    pub fn new(preview_mounted: bool) -> Self {
        Session {
            ledger: Ledger::new(),
            banner: None,
            submitting: false,
            exporting: false,
            preview_mounted,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    pub fn set_banner(&mut self, kind: BannerKind, error: ApiError) {
        self.banner = Some(Banner { kind, error });
    }

    pub fn clear_banner(&mut self) {
        self.banner = None;
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn is_exporting(&self) -> bool {
        self.exporting
    }

    pub fn is_busy(&self, operation: Operation) -> bool {
        match operation {
            Operation::Submit => self.submitting,
            Operation::Export => self.exporting,
        }
    }

    fn set_busy(&mut self, operation: Operation, busy: bool) {
        match operation {
            Operation::Submit => self.submitting = busy,
            Operation::Export => self.exporting = busy,
        }
    }

    pub fn phase(&self) -> Phase {
        self.ledger.phase()
    }

    /// Whether a control currently accepts input.
    pub fn is_enabled(&self, control: Control) -> bool {
        let confirmed = self.phase() == Phase::Confirmed;
        match control {
            Control::AddItem | Control::RemoveItem | Control::CustomerName | Control::Notes => {
                !confirmed && !self.submitting
            }
            Control::Submit => self.phase() == Phase::Editable && !self.submitting,
            Control::Download => confirmed && !self.exporting,
            Control::Reset => !self.submitting && !self.exporting,
            Control::TestConnection => true,
        }
    }

    /// Lays out the capturable region, or `None` when the preview is hidden.
    pub fn region(
        &self,
        brand: &Brand,
        formatter: &RupiahFormatter,
        printed_at: NaiveDateTime,
    ) -> Option<ReceiptRegion> {
        self.preview_mounted
            .then(|| ReceiptRegion::build(&self.ledger.display(), brand, formatter, printed_at))
    }

    /// Back to the state of a fresh session.
    pub fn reset(&mut self) {
        self.ledger.reset();
        self.banner = None;
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new(true)
    }
}

// =============================================================================
// Session State
// =============================================================================

/// Shared handle to the session.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    session: Arc<Mutex<Session>>,
}

impl SessionState {
    pub fn new(session: Session) -> Self {
        SessionState {
            session: Arc::new(Mutex::new(session)),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Session> {
        // A panic inside a closure cannot leave the session half-updated in
        // a way later commands depend on, so keep going with the data.
        self.session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Executes a function with read access to the session.
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Session) -> R,
    {
        let session = self.lock();
        f(&session)
    }

    /// Executes a function with write access to the session.
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Session) -> R,
    {
        let mut session = self.lock();
        f(&mut session)
    }

    /// Marks `operation` in flight, or fails with `Busy` if it already is.
    ///
    /// The flag clears when the returned guard drops.
    pub fn begin(&self, operation: Operation) -> Result<BusyGuard, ApiError> {
        self.with_session_mut(|s| {
            if s.is_busy(operation) {
                return Err(ApiError::busy(&operation.to_string()));
            }
            s.set_busy(operation, true);
            Ok(())
        })?;

        Ok(BusyGuard {
            state: self.clone(),
            operation,
        })
    }
}

/// Clears a busy flag on drop.
#[derive(Debug)]
pub struct BusyGuard {
    state: SessionState,
    operation: Operation,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        let operation = self.operation;
        self.state.with_session_mut(|s| s.set_busy(operation, false));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_busy_guard_rejects_second_and_releases() {
        let state = SessionState::default();

        let guard = state.begin(Operation::Submit).unwrap();
        assert!(state.with_session(|s| s.is_submitting()));

        let err = state.begin(Operation::Submit).unwrap_err();
        assert_eq!(err.code, ErrorCode::Busy);

        // Independent operations do not block each other.
        let export = state.begin(Operation::Export).unwrap();
        drop(export);

        drop(guard);
        assert!(!state.with_session(|s| s.is_submitting()));
        assert!(state.begin(Operation::Submit).is_ok());
    }

    #[test]
    fn test_controls_follow_phase() {
        let mut session = Session::default();
        assert!(!session.is_enabled(Control::Submit));
        assert!(!session.is_enabled(Control::Download));

        session.ledger_mut().add_item("Produk A", "1", "1000").unwrap();
        assert!(session.is_enabled(Control::Submit));

        session.submitting = true;
        assert!(!session.is_enabled(Control::Submit));
        assert!(!session.is_enabled(Control::AddItem));
        assert!(session.is_enabled(Control::TestConnection));
    }

    #[test]
    fn test_region_requires_mounted_preview() {
        let at = chrono::NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let formatter = RupiahFormatter::default();

        let hidden = Session::new(false);
        assert!(hidden.region(&Brand::default(), &formatter, at).is_none());

        let shown = Session::new(true);
        let region = shown.region(&Brand::default(), &formatter, at).unwrap();
        assert!(!region.is_empty());
    }

    #[test]
    fn test_reset_clears_banner() {
        let mut session = Session::default();
        session.ledger_mut().add_item("Produk A", "1", "1000").unwrap();
        session.set_banner(BannerKind::Submission, ApiError::busy("Submission"));

        session.reset();
        assert_eq!(session, Session::default());
    }
}
