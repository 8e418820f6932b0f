//! # Receipt Service Client
//!
//! The [`ReceiptIssuer`] seam and its HTTP implementation.
//!
//! ## Response Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Outcome of POST /api/receipts                      │
//! │                                                                         │
//! │  connect / send error        ──► IssueError::Failed                     │
//! │  non-2xx (any body)          ──► IssueError::Rejected { status, body }  │
//! │  2xx, body not IssueResponse ──► IssueError::Failed                     │
//! │  2xx, valid IssueResponse    ──► Ok(IssueResponse)                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No retries: one submission is one request.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, warn};

use crate::config::IssuerConfig;
use crate::error::{IssueError, IssueResult};
use crate::protocol::{IssueRequest, IssueResponse};

/// Anything that can turn a draft snapshot into an issued receipt.
pub trait ReceiptIssuer: Send + Sync {
    /// Sends one issue request and returns the decoded response.
    fn issue(
        &self,
        request: &IssueRequest,
    ) -> impl Future<Output = IssueResult<IssueResponse>> + Send;

    /// Checks that the service answers at all, returning the HTTP status.
    fn ping(&self) -> impl Future<Output = IssueResult<u16>> + Send;
}

/// [`ReceiptIssuer`] backed by the HTTP receipt service.
#[derive(Debug, Clone)]
pub struct HttpIssuer {
    config: IssuerConfig,
    http: Client,
}

impl HttpIssuer {
    /// Builds a client for the configured backend.
    pub fn new(config: IssuerConfig) -> IssueResult<Self> {
        config.validate()?;

        let mut builder =
            Client::builder().connect_timeout(Duration::from_secs(config.connect_timeout_secs));
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let http = builder
            .build()
            .map_err(|e| IssueError::InvalidConfig(format!("HTTP client: {}", e)))?;

        Ok(Self { config, http })
    }

    /// Any response, whatever its status, counts as reachable.
    async fn get_root(&self) -> IssueResult<u16> {
        let url = format!("{}/", self.config.base());
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| IssueError::failed(e.to_string()))?;

        let status = response.status().as_u16();
        debug!(url = %url, status, "Backend ping");
        Ok(status)
    }

    async fn post_receipt(&self, request: &IssueRequest) -> IssueResult<IssueResponse> {
        let url = self.config.receipts_url();
        debug!(url = %url, items = request.items.len(), "Posting receipt");

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Receipt request failed");
                IssueError::failed(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(rejection(status.as_u16(), response.text().await));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| IssueError::failed(e.to_string()))?;

        serde_json::from_slice::<IssueResponse>(&body).map_err(|e| {
            warn!(error = %e, "Receipt service returned an unreadable body");
            IssueError::failed(format!("invalid response: {}", e))
        })
    }
}

/// Maps a non-2xx answer; an unreadable body falls back to the status.
fn rejection<E: Display>(status: u16, body: Result<String, E>) -> IssueError {
    let body = body.unwrap_or_else(|e| {
        warn!(status, error = %e, "Could not read rejection body");
        String::new()
    });
    warn!(status, "Receipt service rejected draft");
    IssueError::rejected(status, &body)
}

impl ReceiptIssuer for HttpIssuer {
    fn issue(
        &self,
        request: &IssueRequest,
    ) -> impl Future<Output = IssueResult<IssueResponse>> + Send {
        self.post_receipt(request)
    }

    fn ping(&self) -> impl Future<Output = IssueResult<u16>> + Send {
        self.get_root()
    }
}
