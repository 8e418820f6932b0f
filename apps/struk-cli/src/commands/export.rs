//! # Export Command
//!
//! Writes the confirmed receipt as a PNG into the export directory.
//!
//! All or nothing: the file appears under its final name only after the
//! whole image is encoded, and any failure leaves an `Export` banner and no
//! file. The draft and the receipt are never touched.

use std::path::PathBuf;

use struk_export::{export_snapshot, AssetLoader};
use tracing::{info, warn};

use crate::error::ApiError;
use crate::state::{AppContext, BannerKind, Operation, SessionState};

/// Exports the displayed receipt and returns the written path.
pub async fn export<I, L: AssetLoader>(
    ctx: &AppContext<I, L>,
    state: &SessionState,
) -> Result<PathBuf, ApiError> {
    let _guard = state.begin(Operation::Export)?;

    let printed_at = chrono::Local::now().naive_local();
    let (receipt, region) = state.with_session(|s| {
        (
            s.ledger().confirmed().cloned(),
            s.region(&ctx.config.brand, &ctx.formatter, printed_at),
        )
    });

    let options = ctx.config.export_options();
    let dir = ctx.config.export_dir();

    let result = match export_snapshot(receipt.as_ref(), region.as_ref(), &ctx.loader, &options).await {
        Ok(snapshot) => snapshot.save_to(&dir),
        Err(e) => Err(e),
    };

    match result {
        Ok(path) => {
            info!(path = %path.display(), "Receipt exported");
            state.with_session_mut(|s| s.clear_banner());
            Ok(path)
        }
        Err(e) => {
            warn!(error = %e, "Export failed");
            let err = ApiError::from(e);
            state.with_session_mut(|s| s.set_banner(BannerKind::Export, err.clone()));
            Err(err)
        }
    }
}
