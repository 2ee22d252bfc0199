//! Payload shapes accepted by the formatters
//!
//! UI call sites hand over one of:
//!
//! - a list of records: `[{...}, {...}]`
//! - records with sibling metadata: `{"metadata": {...}, "records": [...]}`
//! - a single order with line items: `{"id": ..., "items": [...]}`
//! - named record groups: `{"products": [...], "orders": [...]}`

use serde_json::Value;

use super::invoice::{Invoice, ITEMS_KEY};
use super::record::{merge_metadata, ExportMetadata, ExportRecord};
use crate::error::{ExportError, ExportResult};

const RECORDS_KEY: &str = "records";
const METADATA_KEY: &str = "metadata";

/// A named block of records
#[derive(Debug, Clone, PartialEq)]
pub struct RecordGroup {
    pub name: String,
    pub records: Vec<ExportRecord>,
}

/// The parsed shape of an export payload
#[derive(Debug, Clone, PartialEq)]
pub enum ExportInput {
    /// A flat list of records
    Records {
        records: Vec<ExportRecord>,
        metadata: Option<ExportMetadata>,
    },
    /// Several named lists, each exported as its own block
    Grouped(Vec<RecordGroup>),
    /// One order rendered as an invoice
    Invoice(Invoice),
}

impl ExportInput {
    /// Detect the payload shape
    pub fn from_value(value: &Value) -> ExportResult<Self> {
        match value {
            Value::Array(items) => Ok(Self::Records {
                records: records_from_array(items, "records")?,
                metadata: None,
            }),
            Value::Object(object) => {
                if let Some(records) = object.get(RECORDS_KEY) {
                    let Value::Array(items) = records else {
                        return Err(ExportError::malformed("\"records\" must be an array"));
                    };
                    let metadata = match object.get(METADATA_KEY) {
                        None | Some(Value::Null) => None,
                        Some(Value::Object(meta)) => Some(meta.clone()),
                        Some(_) => {
                            return Err(ExportError::malformed("\"metadata\" must be an object"))
                        }
                    };
                    tracing::debug!(count = items.len(), "detected records payload with metadata");
                    return Ok(Self::Records {
                        records: records_from_array(items, "records")?,
                        metadata,
                    });
                }

                if object.get(ITEMS_KEY).is_some_and(Value::is_array) {
                    tracing::debug!("detected single order payload");
                    return Ok(Self::Invoice(Invoice::from_object(object.clone())?));
                }

                let mut groups = Vec::with_capacity(object.len());
                for (name, value) in object {
                    let Value::Array(items) = value else {
                        return Err(ExportError::malformed(format!(
                            "expected an array of records, found an object with scalar field \"{}\"",
                            name
                        )));
                    };
                    groups.push(RecordGroup {
                        name: name.clone(),
                        records: records_from_array(items, name)?,
                    });
                }
                tracing::debug!(groups = groups.len(), "detected grouped payload");
                Ok(Self::Grouped(groups))
            }
            other => Err(ExportError::malformed(format!(
                "expected an array of records, found {}",
                kind_name(other)
            ))),
        }
    }

    /// Number of top-level rows across the payload
    pub fn row_count(&self) -> usize {
        match self {
            Self::Records { records, .. } => records.len(),
            Self::Grouped(groups) => groups.iter().map(|g| g.records.len()).sum(),
            Self::Invoice(invoice) => invoice.items.len(),
        }
    }

    /// Metadata embedded in the payload merged with the caller's metadata
    pub fn effective_metadata(&self, explicit: Option<&ExportMetadata>) -> Option<ExportMetadata> {
        match self {
            Self::Records { metadata, .. } => merge_metadata(metadata.clone(), explicit),
            _ => explicit.cloned(),
        }
    }
}

fn records_from_array(items: &[Value], context: &str) -> ExportResult<Vec<ExportRecord>> {
    items
        .iter()
        .enumerate()
        .map(|(idx, item)| match item {
            Value::Object(record) => Ok(record.clone()),
            other => Err(ExportError::malformed(format!(
                "{} entry {} is {}, expected an object",
                context,
                idx + 1,
                kind_name(other)
            ))),
        })
        .collect()
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
