//! CSV export
//!
//! Every field is quoted, whatever it contains, and values use their plain
//! string form: no currency symbols or status labels here. Metadata goes on
//! top as `# Key: value` comment lines followed by one blank line.

use std::borrow::Cow;

use csv::{QuoteStyle, WriterBuilder};

use crate::error::{ExportError, ExportResult};
use crate::models::record::{banner_entries, column_keys, merge_metadata, value_text};
use crate::models::{ExportInput, ExportMetadata, ExportRecord};

/// Render a payload as CSV bytes
///
/// Named groups become separate header+rows blocks separated by a blank
/// line. An invoice exports its line items, with the order's own fields in
/// the banner.
pub fn render_csv(input: &ExportInput, metadata: Option<&ExportMetadata>) -> ExportResult<Vec<u8>> {
    let (blocks, metadata): (Vec<Cow<'_, [ExportRecord]>>, Option<ExportMetadata>) = match input {
        ExportInput::Records { records, .. } => (
            vec![Cow::Borrowed(records.as_slice())],
            input.effective_metadata(metadata),
        ),
        ExportInput::Grouped(groups) => (
            groups
                .iter()
                .map(|g| Cow::Borrowed(g.records.as_slice()))
                .collect(),
            metadata.cloned(),
        ),
        ExportInput::Invoice(invoice) => (
            vec![Cow::Owned(invoice.item_records())],
            merge_metadata(Some(invoice.fields.clone()), metadata),
        ),
    };

    let mut out = Vec::new();

    if let Some(metadata) = &metadata {
        for (key, value) in banner_entries(metadata, &[]) {
            out.extend_from_slice(
                format!("# {}: {}\n", single_line(&key), single_line(&value)).as_bytes(),
            );
        }
    }

    for block in blocks.iter().filter(|b| !b.is_empty()) {
        if !out.is_empty() {
            out.push(b'\n');
        }
        out.extend(write_block(block)?);
    }

    Ok(out)
}

/// Line breaks would push part of a banner entry out of its `#` comment
fn single_line(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}

/// Header from the first record, then one row per record projected onto it
fn write_block(records: &[ExportRecord]) -> ExportResult<Vec<u8>> {
    let headers = column_keys(records, &[]);
    if headers.is_empty() {
        return Ok(Vec::new());
    }

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(&headers)?;
    for record in records {
        writer.write_record(
            headers
                .iter()
                .map(|key| record.get(key).map(value_text).unwrap_or_default()),
        )?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::render(format!("Failed to finish CSV block: {}", e)))
}
