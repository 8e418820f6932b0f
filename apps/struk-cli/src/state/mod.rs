//! # State Module
//!
//! Application state for the REPL.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         State Types                                     │
//! │                                                                         │
//! │  ┌──────────────────────────────┐   ┌──────────────────────────────┐   │
//! │  │  SessionState                │   │  AppContext                  │   │
//! │  │  (Arc<Mutex<Session>>)       │   │  (read-only after startup)   │   │
//! │  │                              │   │                              │   │
//! │  │  • Ledger (draft + receipt)  │   │  • AppConfig                 │   │
//! │  │  • Banner                    │   │  • ReceiptIssuer             │   │
//! │  │  • Busy flags                │   │  • AssetLoader               │   │
//! │  │  • Preview mounted           │   │  • RupiahFormatter           │   │
//! │  └──────────────────────────────┘   └──────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;

pub use config::{AppConfig, ConfigError, DisplaySettings, ExportSettings};
pub use session::{Banner, BannerKind, BusyGuard, Control, Operation, Session, SessionState};

use struk_core::currency::RupiahFormatter;
use struk_export::{AssetLoader, HttpAssetLoader};
use struk_issuer::{HttpIssuer, ReceiptIssuer};

/// Collaborators the commands need besides the session.
#[derive(Debug, Clone)]
pub struct AppContext<I = HttpIssuer, L = HttpAssetLoader> {
    pub config: AppConfig,
    pub issuer: I,
    pub loader: L,
    pub formatter: RupiahFormatter,
}

impl<I: ReceiptIssuer, L: AssetLoader> AppContext<I, L> {
    pub fn with_parts(config: AppConfig, issuer: I, loader: L) -> Self {
        let formatter = config.formatter();
        AppContext {
            config,
            issuer,
            loader,
            formatter,
        }
    }

    pub fn new_session(&self) -> SessionState {
        SessionState::new(Session::new(self.config.display.preview))
    }
}

impl AppContext {
    /// Builds the HTTP-backed context from validated configuration.
    pub fn from_config(config: AppConfig) -> Result<Self, ConfigError> {
        let issuer = HttpIssuer::new(config.backend.clone())
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        let loader = HttpAssetLoader::new(config.export.origin.clone());
        Ok(Self::with_parts(config, issuer, loader))
    }
}
