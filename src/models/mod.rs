//! Data models for the export pipeline
//!
//! - `record`: records, metadata and their banner/column helpers
//! - `input`: detection of the payload shapes call sites send
//! - `invoice`: single orders with line items
//! - `status`: order and stock status vocabularies

pub mod input;
pub mod invoice;
pub mod record;
pub mod status;

pub use input::{ExportInput, RecordGroup};
pub use invoice::{Invoice, InvoiceTotal, LineItem};
pub use record::{humanize_key, ExportMetadata, ExportRecord};
pub use status::{status_label, OrderStatus, StockStatus};
