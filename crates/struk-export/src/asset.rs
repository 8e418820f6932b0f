//! # Logo Asset Loading
//!
//! External images are read in cross-origin mode: the request names our
//! origin and the response has to grant it read access, otherwise the image
//! would taint the capture and the export is refused.
//!
//! ## Fetch Checks
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GET {logo_url}   Origin: {origin}                                      │
//! │                                                                         │
//! │  send error / non-2xx            ──► AssetUnavailable                   │
//! │  ACAO missing or other origin    ──► AssetTainted                       │
//! │  ACAO "*" or == origin, decodes  ──► DynamicImage                       │
//! │  undecodable body                ──► AssetUnavailable                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The overall wait is bounded by the caller (see `snapshot`).

use std::future::Future;

use image::DynamicImage;
use reqwest::header::{ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN};
use reqwest::Client;
use tracing::{debug, warn};

use crate::error::{ExportError, ExportResult};

/// Origin presented to asset hosts when none is configured.
pub const DEFAULT_ORIGIN: &str = "http://localhost:5173";

/// Source of decoded images referenced by a receipt region.
pub trait AssetLoader: Send + Sync {
    fn load(&self, url: &str) -> impl Future<Output = ExportResult<DynamicImage>> + Send;
}

/// [`AssetLoader`] fetching over HTTP with the cross-origin check.
#[derive(Debug, Clone)]
pub struct HttpAssetLoader {
    http: Client,
    origin: String,
}

impl HttpAssetLoader {
    pub fn new(origin: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            origin: origin.into(),
        }
    }

    async fn fetch(&self, url: &str) -> ExportResult<DynamicImage> {
        debug!(url = %url, origin = %self.origin, "Fetching logo");

        let response = self
            .http
            .get(url)
            .header(ORIGIN, &self.origin)
            .send()
            .await
            .map_err(|e| ExportError::unavailable(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ExportError::unavailable(url, format!("HTTP {}", status.as_u16())));
        }

        let granted = response
            .headers()
            .get(ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| grants_origin(v, &self.origin));
        if !granted {
            warn!(url = %url, "Logo host did not grant cross-origin read access");
            return Err(ExportError::AssetTainted {
                url: url.to_string(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ExportError::unavailable(url, e))?;

        image::load_from_memory(&bytes).map_err(|e| ExportError::unavailable(url, e))
    }
}

impl Default for HttpAssetLoader {
    fn default() -> Self {
        Self::new(DEFAULT_ORIGIN)
    }
}

impl AssetLoader for HttpAssetLoader {
    fn load(&self, url: &str) -> impl Future<Output = ExportResult<DynamicImage>> + Send {
        self.fetch(url)
    }
}

/// Whether an `Access-Control-Allow-Origin` value lets `origin` read.
pub fn grants_origin(header: &str, origin: &str) -> bool {
    let header = header.trim();
    header == "*" || header.trim_end_matches('/') == origin.trim_end_matches('/')
}
