//! zen-export - multi-format export pipeline for the Zen Commerce dashboard
//!
//! Turns dashboard records (orders, products, clients, invoices) into
//! downloadable artifacts: quote-always CSV, raw JSON and paginated, branded
//! PDF reports.
//!
//! # Architecture
//!
//! - `config`: paths and persisted branding settings
//! - `error`: the [`ExportError`] type
//! - `models`: records, metadata, payload shapes and status vocabularies
//! - `export`: the three formatters, artifact sinks and [`export_data`]
//! - `storage`: atomic file writes
//! - `qr`: QR code payload strings
//! - `display`: terminal previews
//! - `cli`: command handlers for the `zen-export` binary
//!
//! # Example
//!
//! ```rust,ignore
//! use zen_export::{export_data, BrandingContext, ExportRequest, MemorySink};
//! use serde_json::json;
//!
//! let sink = MemorySink::new();
//! let request = ExportRequest::new(json!([{"id": "A1", "status": "pending"}]), "csv", "orders");
//! export_data(&request, &BrandingContext::default(), &sink)?;
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod qr;
pub mod storage;

pub use config::BrandingContext;
pub use error::{ExportError, ExportResult};
pub use export::{
    export_data, try_export, Artifact, ArtifactSink, DirectorySink, ExportFormat, ExportRequest,
    MemorySink,
};
pub use models::{ExportInput, ExportMetadata, ExportRecord};
