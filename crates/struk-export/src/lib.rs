//! # struk-export: Receipt Snapshot Export
//!
//! Produces the shareable image of a confirmed receipt.
//!
//! ## Module Organization
//! - [`layout`] - `ReceiptRegion`: the capturable rows, and the brand
//! - [`asset`] - Cross-origin-checked logo loading
//! - [`raster`] - Bitmap-font rasterizer onto a white RGB canvas
//! - [`snapshot`] - `export_snapshot`, file naming, atomic save
//! - [`error`] - Export error types
//!
//! ## Example
//!
//! ```rust,no_run
//! use struk_export::{export_snapshot, ExportOptions, HttpAssetLoader};
//! # async fn run(
//! #     receipt: &struk_core::ConfirmedReceipt,
//! #     region: &struk_export::ReceiptRegion,
//! # ) -> struk_export::ExportResult<()> {
//! let snapshot = export_snapshot(
//!     Some(receipt),
//!     Some(region),
//!     &HttpAssetLoader::default(),
//!     &ExportOptions::default(),
//! )
//! .await?;
//! snapshot.save_to(std::path::Path::new("."))?;
//! # Ok(())
//! # }
//! ```

pub mod asset;
pub mod error;
pub mod layout;
pub mod raster;
pub mod snapshot;

pub use asset::{AssetLoader, HttpAssetLoader};
pub use error::{ExportError, ExportResult};
pub use layout::{Brand, ReceiptRegion, Row};
pub use snapshot::{export_snapshot, ExportOptions, Snapshot};
