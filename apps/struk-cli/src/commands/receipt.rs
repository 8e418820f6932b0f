//! # Receipt Commands
//!
//! Submission, the text preview, and the connection test.
//!
//! ## Submit Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  submit                                                                 │
//! │    │                                                                    │
//! │    ├─ begin(Submit) ── already running? ──► Busy (banner untouched)     │
//! │    ├─ snapshot draft under the lock (lock released before the call)     │
//! │    ├─ struk_issuer::submit ─── error ──► Submission banner, draft kept  │
//! │    └─ ledger.confirm(receipt), banner cleared                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt::Write as _;

use struk_core::{ConfirmedReceipt, CoreError, Phase};
use struk_export::AssetLoader;
use struk_issuer::ReceiptIssuer;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::state::{AppContext, BannerKind, Operation, SessionState};

/// Submits the draft and installs the service's receipt.
pub async fn submit<I: ReceiptIssuer, L: AssetLoader>(
    ctx: &AppContext<I, L>,
    state: &SessionState,
) -> Result<ConfirmedReceipt, ApiError> {
    let _guard = state.begin(Operation::Submit)?;

    let draft = state.with_session(|s| match s.ledger().confirmed() {
        Some(_) => Err(ApiError::from(CoreError::ReceiptConfirmed)),
        None => Ok(s.ledger().draft().clone()),
    });
    let draft = match draft {
        Ok(draft) => draft,
        Err(err) => return Err(fail(state, err)),
    };

    match struk_issuer::submit(&ctx.issuer, &draft).await {
        Ok(receipt) => state.with_session_mut(|s| -> Result<ConfirmedReceipt, ApiError> {
            s.ledger_mut().confirm(receipt.clone())?;
            s.clear_banner();
            info!(number = receipt.number, "Receipt confirmed");
            Ok(receipt)
        }),
        Err(e) => {
            warn!(error = %e, "Submission failed; draft kept");
            Err(fail(state, ApiError::from(e)))
        }
    }
}

fn fail(state: &SessionState, err: ApiError) -> ApiError {
    state.with_session_mut(|s| s.set_banner(BannerKind::Submission, err.clone()));
    err
}

/// Text preview of the receipt region plus the editable item list.
pub fn show<I, L>(ctx: &AppContext<I, L>, state: &SessionState) -> String {
    let printed_at = chrono::Local::now().naive_local();

    state.with_session(|s| {
        let mut out = String::new();
        match s.region(&ctx.config.brand, &ctx.formatter, printed_at) {
            Some(region) => out.push_str(&region.to_text()),
            None => out.push_str("(receipt preview hidden)\n"),
        }

        if s.phase() == Phase::Editable {
            out.push_str("\nItems:\n");
            for (index, item) in s.ledger().items().iter().enumerate() {
                let _ = writeln!(
                    out,
                    "  [{}] {} {}x {} = {}",
                    index,
                    item.name(),
                    item.quantity(),
                    ctx.formatter.format(item.unit_price()),
                    ctx.formatter.format(item.line_total()),
                );
            }
        }

        let _ = writeln!(out, "\nStatus: {}", s.phase());
        if let Some(banner) = s.banner() {
            let _ = writeln!(out, "! {}", banner.error);
        }
        out
    })
}

/// Tests whether the receipt service answers.
pub async fn ping<I: ReceiptIssuer, L>(ctx: &AppContext<I, L>) -> Result<String, ApiError> {
    let status = ctx.issuer.ping().await?;
    Ok(format!(
        "Receipt service reachable at {} (HTTP {})",
        ctx.config.backend.base(),
        status
    ))
}
