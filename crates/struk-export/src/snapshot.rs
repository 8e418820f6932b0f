//! # Snapshot Export
//!
//! Captures the confirmed receipt's region as a PNG.
//!
//! ## Export Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         export_snapshot                                 │
//! │                                                                         │
//! │  1. confirmed receipt?        no ──► NothingToExport                    │
//! │  2. region mounted, has rows? no ──► RegionUnavailable                  │
//! │  3. logo row? ──► loader.load (bounded by asset_timeout)                │
//! │                   AssetTainted | AssetUnavailable | ExportTimeout       │
//! │  4. rasterize at scale (white, RGB) ──► encode PNG in memory            │
//! │                                                                         │
//! │  Snapshot::save_to(dir): write `.name.tmp`, then rename to             │
//! │  `{brand}_{kind}_#NNNN.png`. A failed export leaves no file.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Duration;

use image::ImageFormat;
use struk_core::types::pad_receipt_number;
use struk_core::ConfirmedReceipt;
use tracing::{debug, info, warn};

use crate::asset::AssetLoader;
use crate::error::{ExportError, ExportResult};
use crate::layout::{Brand, ReceiptRegion};
use crate::raster::{rasterize, MAX_SCALE, MIN_SCALE};

/// Default pixel-density multiplier.
pub const DEFAULT_SCALE: u32 = 3;

/// Default wait for external assets.
pub const DEFAULT_ASSET_TIMEOUT: Duration = Duration::from_secs(15);

/// Knobs for one export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Pixel-density multiplier, clamped to 2..=4.
    pub scale: u32,
    pub asset_timeout: Duration,
    pub brand_name: String,
    pub receipt_kind: String,
}

impl ExportOptions {
    pub fn for_brand(brand: &Brand) -> Self {
        ExportOptions {
            scale: DEFAULT_SCALE,
            asset_timeout: DEFAULT_ASSET_TIMEOUT,
            brand_name: brand.name.clone(),
            receipt_kind: brand.receipt_kind.clone(),
        }
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::for_brand(&Brand::default())
    }
}

/// An encoded receipt image, not yet on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    file_name: String,
    png: Vec<u8>,
    width: u32,
    height: u32,
}

impl Snapshot {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn png(&self) -> &[u8] {
        &self.png
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Writes the PNG into `dir` atomically and returns its path.
    pub fn save_to(&self, dir: &Path) -> ExportResult<PathBuf> {
        std::fs::create_dir_all(dir).map_err(|e| ExportError::write(dir, e))?;

        let target = dir.join(&self.file_name);
        let temp = dir.join(format!(".{}.tmp", self.file_name));

        write_atomic(&temp, &target, |path| std::fs::write(path, &self.png))?;

        info!(path = %target.display(), bytes = self.png.len(), "Snapshot saved");
        Ok(target)
    }
}

/// Writes `temp` with `write`, then renames it to `target`.
///
/// The temp file is removed on any failure, so only a complete file is ever
/// left behind.
fn write_atomic(
    temp: &Path,
    target: &Path,
    write: impl FnOnce(&Path) -> std::io::Result<()>,
) -> ExportResult<()> {
    if let Err(e) = write(temp) {
        let _ = std::fs::remove_file(temp);
        return Err(ExportError::write(temp, e));
    }
    if let Err(e) = std::fs::rename(temp, target) {
        let _ = std::fs::remove_file(temp);
        return Err(ExportError::write(target, e));
    }
    Ok(())
}

/// `{brand}_{kind}_#NNNN.png`, with path separators replaced.
pub fn file_name(brand_name: &str, kind: &str, number: u64) -> String {
    let name = format!("{}_{}_#{}.png", brand_name, kind, pad_receipt_number(number));
    name.replace(['/', '\\'], "-")
}

/// Renders the confirmed receipt's region into a PNG snapshot.
pub async fn export_snapshot<L: AssetLoader>(
    receipt: Option<&ConfirmedReceipt>,
    region: Option<&ReceiptRegion>,
    loader: &L,
    options: &ExportOptions,
) -> ExportResult<Snapshot> {
    let receipt = receipt.ok_or(ExportError::NothingToExport)?;
    let region = region
        .filter(|r| !r.is_empty())
        .ok_or(ExportError::RegionUnavailable)?;

    let logo = match region.logo_url() {
        Some(url) => {
            let loaded = tokio::time::timeout(options.asset_timeout, loader.load(url))
                .await
                .map_err(|_| ExportError::ExportTimeout {
                    url: url.to_string(),
                    millis: options.asset_timeout.as_millis(),
                })
                .and_then(|result| result);
            match loaded {
                Ok(image) => Some(image),
                Err(e) => {
                    warn!(error = %e, "Snapshot export aborted");
                    return Err(e);
                }
            }
        }
        None => None,
    };

    let scale = options.scale.clamp(MIN_SCALE, MAX_SCALE);
    let canvas = rasterize(region, logo.as_ref(), scale);
    debug!(width = canvas.width(), height = canvas.height(), scale, "Region rasterized");

    let mut png = Vec::new();
    canvas
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| ExportError::Encode(e.to_string()))?;

    Ok(Snapshot {
        file_name: file_name(&options.brand_name, &options.receipt_kind, receipt.number),
        png,
        width: canvas.width(),
        height: canvas.height(),
    })
}
