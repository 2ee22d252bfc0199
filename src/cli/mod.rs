//! CLI command handlers
//!
//! Bridges clap argument parsing with the export pipeline and settings.

pub mod brand;
pub mod export;
pub mod preview;
pub mod qr;

pub use brand::{handle_brand_command, BrandCommands};
pub use export::{handle_export_command, ExportArgs};
pub use preview::{handle_preview_command, PreviewArgs};
pub use qr::{handle_qr_command, QrCommands};
