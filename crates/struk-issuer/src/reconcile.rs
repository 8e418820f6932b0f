//! Draft submission: snapshot the draft, ask the service, decode the receipt.
//!
//! The service is the source of truth for the number, the lines and the
//! total. The local subtotal is only compared for logging.

use struk_core::{ConfirmedReceipt, Draft};
use tracing::{info, warn};

use crate::client::ReceiptIssuer;
use crate::error::{IssueError, IssueResult};
use crate::protocol::IssueRequest;

/// Submits `draft` and returns the authoritative receipt.
///
/// An empty draft fails with [`IssueError::EmptyDraft`] without calling
/// the issuer.
pub async fn submit<I: ReceiptIssuer>(issuer: &I, draft: &Draft) -> IssueResult<ConfirmedReceipt> {
    if draft.is_empty() {
        return Err(IssueError::EmptyDraft);
    }

    let request = IssueRequest::from_draft(draft);
    let receipt = issuer.issue(&request).await?.into_receipt()?;

    let local = draft.subtotal();
    if receipt.total != local {
        warn!(
            number = receipt.number,
            local_sen = local.sen(),
            service_sen = receipt.total.sen(),
            "Service total differs from local subtotal"
        );
    }

    info!(
        number = receipt.number,
        items = receipt.items.len(),
        total_sen = receipt.total.sen(),
        "Receipt issued"
    );
    Ok(receipt)
}
