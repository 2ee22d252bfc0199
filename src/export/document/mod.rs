//! Paginated report (PDF) formatter
//!
//! Pages are composed in one pass:
//!
//! 1. brand header (logo or monogram, brand name, contact address)
//! 2. title and export date
//! 3. context lines from scalar metadata entries
//! 4. the record table, one table per group, or an invoice
//! 5. `"{brand} - Page {i} sur {total}"` footers, stamped on every page last

pub mod cells;
pub mod layout;
pub mod logo;
pub mod pdf;
pub mod text;

use chrono::{Local, NaiveDate};

use crate::config::BrandingContext;
use crate::error::ExportResult;
use crate::models::invoice::{InvoiceTotal, ITEMS_KEY};
use crate::models::record::{banner_entries, column_keys, metadata_str, number_text};
use crate::models::{humanize_key, status_label, ExportInput, ExportMetadata, ExportRecord, Invoice};

use cells::{cell_text, format_money};
use layout::{Align, Color, DrawOp, Page, PageLayout, Style, CONTENT_WIDTH, FOOTER_Y, MARGIN_X};
use logo::LogoImage;
use pdf::{write_pdf, PdfInfo};
use text::{fit_text, Font};

/// Contact block printed under the brand name
pub const CONTACT_ADDRESS: [&str; 3] = [
    "Immeuble Zen, Avenue Cheikh Anta Diop",
    "Dakar, Sénégal",
    "contact@zencommerce.sn | +221 33 800 00 00",
];

/// Shown in place of a table when there is nothing to list
pub const NO_DATA_MESSAGE: &str = "No data available";

pub const INVOICE_THANKS: &str = "Merci pour votre confiance !";
pub const INVOICE_REGISTRATION: &str = "RCCM : SN-DKR-2024-B-00000 | NINEA : 000000000 2G3";

/// Metadata keys never repeated in the context block
const ALWAYS_EXCLUDED: &[&str] = &["title"];
/// Metadata keys shown in the invoice party block instead
const INVOICE_EXCLUDED: &[&str] = &["title", "customer", "customerEmail", "invoiceDate", "dueDate"];

const LOGO_BOX: f32 = 40.0;
const ROW_HEIGHT: f32 = 18.0;
const CELL_PAD: f32 = 4.0;

const BRAND_STYLE: Style = Style::new(16.0, Font::Bold, Color::BLACK);
const ADDRESS_STYLE: Style = Style::new(9.0, Font::Regular, Color::MUTED);
const TITLE_STYLE: Style = Style::new(18.0, Font::Bold, Color::BLACK);
const DATE_STYLE: Style = Style::new(10.0, Font::Regular, Color::MUTED);
const BODY_STYLE: Style = Style::new(10.0, Font::Regular, Color::BLACK);
const SECTION_STYLE: Style = Style::new(13.0, Font::Bold, Color::BRAND);
const HEADER_CELL_STYLE: Style = Style::new(9.0, Font::Bold, Color::WHITE);
const CELL_STYLE: Style = Style::new(9.0, Font::Regular, Color::BLACK);
const TOTAL_STYLE: Style = Style::new(12.0, Font::Bold, Color::BLACK);
const EMPTY_STYLE: Style = Style::new(11.0, Font::Regular, Color::MUTED);
const FOOTER_STYLE: Style = Style::new(9.0, Font::Regular, Color::MUTED);
const REGISTRATION_STYLE: Style = Style::new(8.0, Font::Regular, Color::MUTED);

/// A table column: title, share of the content width and alignment
#[derive(Debug, Clone)]
struct Column {
    title: String,
    width: f32,
    align: Align,
}

/// A fully laid-out document, not yet serialized
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub title: String,
    pub pages: Vec<Page>,
    /// Decoded logo, if one was drawn
    pub logo: Option<LogoImage>,
}

impl RenderedDocument {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// All text runs in page order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.pages.iter().flat_map(Page::texts)
    }

    /// Serialize to PDF bytes
    pub fn to_pdf(&self, branding: &BrandingContext) -> ExportResult<Vec<u8>> {
        write_pdf(
            &self.pages,
            self.logo.as_ref(),
            &PdfInfo {
                title: &self.title,
                author: &branding.app_name,
                created_at: Local::now(),
            },
        )
    }
}

/// Lay out a document for `input`
pub fn render_document(
    input: &ExportInput,
    base_name: &str,
    metadata: Option<&ExportMetadata>,
    branding: &BrandingContext,
    exported_on: NaiveDate,
) -> ExportResult<RenderedDocument> {
    let metadata = input.effective_metadata(metadata);
    let metadata = metadata.as_ref();

    let logo = branding
        .logo
        .as_deref()
        .and_then(|data| match LogoImage::decode(data) {
            Ok(logo) => Some(logo),
            Err(e) => {
                tracing::warn!(error = %e, "logo could not be decoded, using monogram");
                None
            }
        });

    let title = metadata_str(metadata, "title")
        .map(str::to_string)
        .unwrap_or_else(|| format!("Report: {}", base_name));

    let mut layout = PageLayout::new();
    draw_brand_header(&mut layout, branding, logo.as_ref());
    draw_title(&mut layout, &title, exported_on);

    let currency = branding.currency_symbol();
    match input {
        ExportInput::Records { records, .. } => {
            draw_context(&mut layout, metadata, ALWAYS_EXCLUDED);
            draw_record_table(&mut layout, records, currency);
        }
        ExportInput::Grouped(groups) => {
            draw_context(&mut layout, metadata, ALWAYS_EXCLUDED);
            if groups.iter().all(|g| g.records.is_empty()) {
                draw_no_data(&mut layout);
            }
            for group in groups.iter().filter(|g| !g.records.is_empty()) {
                layout.ensure_space(ROW_HEIGHT * 3.0);
                layout.text(&humanize_key(&group.name), SECTION_STYLE, Align::Left);
                layout.advance(12.0);
                draw_record_table(&mut layout, &group.records, currency);
                layout.advance(16.0);
            }
        }
        ExportInput::Invoice(invoice) => {
            draw_context(&mut layout, metadata, INVOICE_EXCLUDED);
            draw_invoice(&mut layout, invoice, metadata, currency);
        }
    }

    let mut pages = layout.into_pages();
    stamp_footers(&mut pages, &branding.app_name);

    tracing::debug!(pages = pages.len(), title = %title, "document laid out");
    Ok(RenderedDocument { title, pages, logo })
}

fn draw_brand_header(layout: &mut PageLayout, branding: &BrandingContext, logo: Option<&LogoImage>) {
    let top = layout.y();
    let box_bottom = top - LOGO_BOX;

    match logo {
        Some(logo) => {
            let (width, height) = logo.fit_within(LOGO_BOX);
            layout.push(DrawOp::Logo {
                x: MARGIN_X,
                y: top - height,
                width,
                height,
            });
        }
        None => {
            layout.push(DrawOp::Rect {
                x: MARGIN_X,
                y: box_bottom,
                width: LOGO_BOX,
                height: LOGO_BOX,
                color: Color::BRAND,
            });
            let monogram = branding.monogram().to_string();
            layout.text_in(
                &monogram,
                Style::new(22.0, Font::Bold, Color::WHITE),
                Align::Center,
                MARGIN_X,
                LOGO_BOX,
                box_bottom + 12.0,
            );
        }
    }

    let text_x = MARGIN_X + LOGO_BOX + 12.0;
    let text_width = CONTENT_WIDTH - LOGO_BOX - 12.0;
    layout.text_in(&branding.app_name, BRAND_STYLE, Align::Left, text_x, text_width, top - 13.0);
    for (i, line) in CONTACT_ADDRESS.iter().enumerate() {
        layout.text_in(line, ADDRESS_STYLE, Align::Left, text_x, text_width, top - 26.0 - i as f32 * 10.5);
    }

    layout.advance(LOGO_BOX + 14.0);
    layout.rule(0.8, Color::RULE);
    layout.advance(30.0);
}

fn draw_title(layout: &mut PageLayout, title: &str, exported_on: NaiveDate) {
    let title = fit_text(title, TITLE_STYLE.font, TITLE_STYLE.size, CONTENT_WIDTH);
    layout.text(&title, TITLE_STYLE, Align::Center);
    layout.advance(18.0);
    layout.text(
        &format!("Exporté le {}", exported_on.format("%d/%m/%Y")),
        DATE_STYLE,
        Align::Center,
    );
    layout.advance(28.0);
}

fn draw_context(layout: &mut PageLayout, metadata: Option<&ExportMetadata>, excluded: &[&str]) {
    let Some(metadata) = metadata else {
        return;
    };
    let entries = banner_entries(metadata, excluded);
    if entries.is_empty() {
        return;
    }

    for (key, value) in entries {
        layout.ensure_space(14.0);
        let line = fit_text(
            &format!("{}: {}", key, value),
            BODY_STYLE.font,
            BODY_STYLE.size,
            CONTENT_WIDTH,
        );
        layout.text(&line, BODY_STYLE, Align::Left);
        layout.advance(14.0);
    }
    layout.advance(10.0);
}

fn draw_no_data(layout: &mut PageLayout) {
    layout.ensure_space(ROW_HEIGHT);
    layout.text(NO_DATA_MESSAGE, EMPTY_STYLE, Align::Center);
    layout.advance(ROW_HEIGHT);
}

fn draw_record_table(layout: &mut PageLayout, records: &[ExportRecord], currency: &str) {
    if records.is_empty() {
        draw_no_data(layout);
        return;
    }

    let keys = column_keys(records, &[ITEMS_KEY]);
    if keys.is_empty() {
        draw_no_data(layout);
        return;
    }

    let width = CONTENT_WIDTH / keys.len() as f32;
    let columns: Vec<Column> = keys
        .iter()
        .map(|key| Column {
            title: humanize_key(key),
            width,
            align: if records[0].get(key).is_some_and(|v| v.is_number()) {
                Align::Right
            } else {
                Align::Left
            },
        })
        .collect();

    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|record| {
            keys.iter()
                .map(|key| {
                    record
                        .get(key)
                        .map(|value| cell_text(key, value, currency))
                        .unwrap_or_default()
                })
                .collect()
        })
        .collect();

    draw_table(layout, &columns, &rows);
}

/// Header row plus body rows; the header repeats after every page break
fn draw_table(layout: &mut PageLayout, columns: &[Column], rows: &[Vec<String>]) {
    layout.ensure_space(ROW_HEIGHT * 2.0);
    draw_header_row(layout, columns);

    for (idx, row) in rows.iter().enumerate() {
        if layout.ensure_space(ROW_HEIGHT) {
            draw_header_row(layout, columns);
        }

        let top = layout.y();
        if idx % 2 == 1 {
            layout.push(DrawOp::Rect {
                x: MARGIN_X,
                y: top - ROW_HEIGHT,
                width: CONTENT_WIDTH,
                height: ROW_HEIGHT,
                color: Color::STRIPE,
            });
        }
        draw_cells(layout, columns, row, CELL_STYLE, top);
        layout.advance(ROW_HEIGHT);
        layout.rule(0.4, Color::RULE);
    }
    layout.advance(8.0);
}

fn draw_header_row(layout: &mut PageLayout, columns: &[Column]) {
    let top = layout.y();
    layout.push(DrawOp::Rect {
        x: MARGIN_X,
        y: top - ROW_HEIGHT,
        width: CONTENT_WIDTH,
        height: ROW_HEIGHT,
        color: Color::BRAND,
    });
    let titles: Vec<String> = columns.iter().map(|c| c.title.clone()).collect();
    draw_cells(layout, columns, &titles, HEADER_CELL_STYLE, top);
    layout.advance(ROW_HEIGHT);
}

fn draw_cells(layout: &mut PageLayout, columns: &[Column], cells: &[String], style: Style, top: f32) {
    let baseline = top - ROW_HEIGHT + 6.0;
    let mut x = MARGIN_X;
    for (column, cell) in columns.iter().zip(cells) {
        let inner = column.width - 2.0 * CELL_PAD;
        let fitted = fit_text(cell, style.font, style.size, inner);
        layout.text_in(&fitted, style, column.align, x + CELL_PAD, inner, baseline);
        x += column.width;
    }
}

/// Lookup order for invoice party fields: metadata, then the order itself
fn party_value<'a>(
    metadata: Option<&'a ExportMetadata>,
    invoice: &'a Invoice,
    keys: &[&str],
) -> Option<&'a str> {
    keys.iter()
        .find_map(|key| metadata_str(metadata, key))
        .or_else(|| keys.iter().find_map(|key| invoice.field_str(key)))
}

fn draw_invoice(
    layout: &mut PageLayout,
    invoice: &Invoice,
    metadata: Option<&ExportMetadata>,
    currency: &str,
) {
    let party = [
        ("Facture N°", party_value(metadata, invoice, &["invoiceNumber", "id", "orderId"])),
        ("Client", party_value(metadata, invoice, &["customer", "customerName", "client"])),
        ("Email", party_value(metadata, invoice, &["customerEmail", "email"])),
        ("Date de facture", party_value(metadata, invoice, &["invoiceDate", "date"])),
        ("Date d'échéance", party_value(metadata, invoice, &["dueDate"])),
    ];
    let status = invoice.field_str("status").map(|s| status_label(s).into_owned());

    let mut wrote_party = false;
    for (label, value) in party
        .iter()
        .filter_map(|(label, value)| value.map(|v| (*label, v.to_string())))
        .chain(status.map(|s| ("Statut", s)))
    {
        layout.ensure_space(14.0);
        let line = fit_text(
            &format!("{}: {}", label, value),
            BODY_STYLE.font,
            BODY_STYLE.size,
            CONTENT_WIDTH,
        );
        layout.text(&line, BODY_STYLE, Align::Left);
        layout.advance(14.0);
        wrote_party = true;
    }
    if wrote_party {
        layout.advance(10.0);
    }

    let columns = [
        Column {
            title: "Description".into(),
            width: CONTENT_WIDTH * 0.45,
            align: Align::Left,
        },
        Column {
            title: "Quantité".into(),
            width: CONTENT_WIDTH * 0.15,
            align: Align::Right,
        },
        Column {
            title: "Prix unitaire".into(),
            width: CONTENT_WIDTH * 0.2,
            align: Align::Right,
        },
        Column {
            title: "Total".into(),
            width: CONTENT_WIDTH * 0.2,
            align: Align::Right,
        },
    ];
    let rows: Vec<Vec<String>> = invoice
        .items
        .iter()
        .map(|item| {
            vec![
                item.description.clone(),
                float_text(item.quantity),
                format_money(item.unit_price, currency),
                format_money(item.line_total(), currency),
            ]
        })
        .collect();
    draw_table(layout, &columns, &rows);

    let total = match invoice.total() {
        InvoiceTotal::Declared(value) => cell_text("total", &value, currency),
        InvoiceTotal::Computed(sum) => format_money(sum, currency),
    };
    layout.ensure_space(ROW_HEIGHT * 4.0);
    layout.advance(6.0);
    let total = fit_text(
        &format!("Total: {}", total),
        TOTAL_STYLE.font,
        TOTAL_STYLE.size,
        CONTENT_WIDTH,
    );
    layout.text(&total, TOTAL_STYLE, Align::Right);
    layout.advance(40.0);

    layout.text(INVOICE_THANKS, Style::new(11.0, Font::Bold, Color::BRAND), Align::Center);
    layout.advance(14.0);
    layout.text(INVOICE_REGISTRATION, REGISTRATION_STYLE, Align::Center);
    layout.advance(14.0);
}

fn float_text(value: f64) -> String {
    serde_json::Number::from_f64(value)
        .map(|n| number_text(&n))
        .unwrap_or_else(|| value.to_string())
}

/// Revisit every page and add the centered page footer
fn stamp_footers(pages: &mut [Page], brand: &str) {
    let total = pages.len();
    for (i, page) in pages.iter_mut().enumerate() {
        let footer = format!("{} - Page {} sur {}", brand, i + 1, total);
        let width = text::text_width(&footer, FOOTER_STYLE.font, FOOTER_STYLE.size);
        page.ops.push(DrawOp::Text {
            x: MARGIN_X + (CONTENT_WIDTH - width) / 2.0,
            y: FOOTER_Y,
            size: FOOTER_STYLE.size,
            font: FOOTER_STYLE.font,
            color: FOOTER_STYLE.color,
            text: footer,
        });
    }
}
