//! Test doubles for the command tests.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use image::DynamicImage;
use struk_export::{AssetLoader, ExportError, ExportResult};
use struk_issuer::{IssueError, IssueRequest, IssueResponse, IssueResult, ReceiptIssuer, WireItem};
use struk_core::{LineItem, Money};
use tokio::sync::Notify;

use crate::state::{AppConfig, AppContext};

pub const TEST_LOGO_URL: &str = "http://logo.test/logo.png";

/// Issuer answering every request with a fixed outcome.
pub struct FakeIssuer {
    outcome: IssueResult<IssueResponse>,
    items: Option<Vec<WireItem>>,
    gate: Option<Arc<Notify>>,
    calls: AtomicUsize,
}

impl FakeIssuer {
    /// Echoes the request items back with `number` and `total`.
    pub fn answering(number: i64, total: f64) -> Self {
        Self::with_outcome(Ok(IssueResponse {
            number,
            items: Vec::new(),
            total: Some(total),
            subtotal: None,
            customer_name: None,
            notes: None,
        }))
    }

    pub fn failing(err: IssueError) -> Self {
        Self::with_outcome(Err(err))
    }

    fn with_outcome(outcome: IssueResult<IssueResponse>) -> Self {
        FakeIssuer {
            outcome,
            items: None,
            gate: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Answers with these lines instead of echoing the request.
    pub fn with_items(mut self, items: &[(&str, u32, i64)]) -> Self {
        self.items = Some(
            items
                .iter()
                .map(|(name, qty, price)| {
                    WireItem::from(&LineItem::new(*name, *qty, Money::from_rupiah(*price)))
                })
                .collect(),
        );
        self
    }

    /// Holds every answer until [`FakeIssuer::release`].
    pub fn held(mut self) -> Self {
        self.gate = Some(Arc::new(Notify::new()));
        self
    }

    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.notify_one();
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ReceiptIssuer for FakeIssuer {
    fn issue(
        &self,
        request: &IssueRequest,
    ) -> impl Future<Output = IssueResult<IssueResponse>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let outcome = self.outcome.clone().map(|mut response| {
            response.items = self.items.clone().unwrap_or_else(|| request.items.clone());
            response
        });
        let gate = self.gate.clone();
        async move {
            if let Some(gate) = gate {
                gate.notified().await;
            }
            outcome
        }
    }

    fn ping(&self) -> impl Future<Output = IssueResult<u16>> + Send {
        async { Ok(200) }
    }
}

/// Loader returning a plain square, or a fixed error.
#[derive(Default)]
pub struct FakeLoader {
    error: Option<ExportError>,
    calls: AtomicUsize,
}

impl FakeLoader {
    pub fn failing(error: ExportError) -> Self {
        FakeLoader {
            error: Some(error),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl AssetLoader for FakeLoader {
    fn load(&self, _url: &str) -> impl Future<Output = ExportResult<DynamicImage>> + Send {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let result = match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(DynamicImage::new_rgb8(4, 4)),
        };
        async move { result }
    }
}

pub fn context(issuer: FakeIssuer) -> AppContext<FakeIssuer, FakeLoader> {
    context_with_loader(issuer, FakeLoader::default())
}

pub fn context_with_loader(
    issuer: FakeIssuer,
    loader: FakeLoader,
) -> AppContext<FakeIssuer, FakeLoader> {
    let mut config = AppConfig::default();
    config.brand.logo_url = Some(TEST_LOGO_URL.to_string());
    AppContext::with_parts(config, issuer, loader)
}
