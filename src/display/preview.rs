//! Terminal preview of an export
//!
//! Shows the tables a document export would contain, with the same columns,
//! humanized headers, status labels and currency formatting.

use tabled::builder::Builder;
use tabled::settings::Style;

use crate::config::BrandingContext;
use crate::export::document::cells::{cell_text, format_money};
use crate::export::document::NO_DATA_MESSAGE;
use crate::models::invoice::{InvoiceTotal, ITEMS_KEY};
use crate::models::record::{banner_entries, column_keys};
use crate::models::{humanize_key, ExportInput, ExportMetadata, ExportRecord};

/// Format a payload as one or more rounded tables
pub fn format_preview(
    input: &ExportInput,
    metadata: Option<&ExportMetadata>,
    branding: &BrandingContext,
) -> String {
    let currency = branding.currency_symbol();
    let mut output = String::new();

    if let Some(metadata) = input.effective_metadata(metadata) {
        for (key, value) in banner_entries(&metadata, &[]) {
            output.push_str(&format!("{}: {}\n", key, value));
        }
        if !output.is_empty() {
            output.push('\n');
        }
    }

    match input {
        ExportInput::Records { records, .. } => {
            output.push_str(&format_records(records, currency));
        }
        ExportInput::Grouped(groups) => {
            let groups: Vec<_> = groups.iter().filter(|g| !g.records.is_empty()).collect();
            if groups.is_empty() {
                output.push_str(NO_DATA_MESSAGE);
            }
            for (i, group) in groups.iter().enumerate() {
                if i > 0 {
                    output.push_str("\n\n");
                }
                output.push_str(&humanize_key(&group.name));
                output.push('\n');
                output.push_str(&format_records(&group.records, currency));
            }
        }
        ExportInput::Invoice(invoice) => {
            output.push_str(&format_records(&invoice.item_records(), currency));
            let total = match invoice.total() {
                InvoiceTotal::Declared(value) => cell_text("total", &value, currency),
                InvoiceTotal::Computed(sum) => format_money(sum, currency),
            };
            output.push_str(&format!("\nTotal: {}", total));
        }
    }

    output.push('\n');
    output
}

fn format_records(records: &[ExportRecord], currency: &str) -> String {
    let keys = column_keys(records, &[ITEMS_KEY]);
    if keys.is_empty() {
        return NO_DATA_MESSAGE.to_string();
    }

    let mut builder = Builder::default();
    builder.push_record(keys.iter().map(|k| humanize_key(k)));
    for record in records {
        builder.push_record(keys.iter().map(|key| {
            record
                .get(key)
                .map(|value| cell_text(key, value, currency))
                .unwrap_or_default()
        }));
    }

    let mut table = builder.build();
    table.with(Style::rounded());
    table.to_string()
}
