//! # struk-issuer: Receipt Service Client
//!
//! Turns a local draft into an authoritative, numbered receipt.
//!
//! ## Submission Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          submit(issuer, draft)                          │
//! │                                                                         │
//! │   Draft ──► empty? ──yes──► IssueError::EmptyDraft (no request)         │
//! │               │                                                         │
//! │               no                                                        │
//! │               ▼                                                         │
//! │   IssueRequest::from_draft ──► ReceiptIssuer::issue                     │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │   IssueResponse::into_receipt ──► ConfirmedReceipt                      │
//! │   (number > 0, items present, total ?? subtotal)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`client`] - `ReceiptIssuer` trait and the reqwest-backed `HttpIssuer`
//! - [`config`] - Backend URL and timeouts
//! - [`error`] - Submission error types
//! - [`protocol`] - JSON request and response bodies
//! - [`reconcile`] - `submit`, the draft-to-receipt step

pub mod client;
pub mod config;
pub mod error;
pub mod protocol;
pub mod reconcile;

pub use client::{HttpIssuer, ReceiptIssuer};
pub use config::IssuerConfig;
pub use error::{IssueError, IssueResult};
pub use protocol::{IssueRequest, IssueResponse, WireItem};
pub use reconcile::submit;
