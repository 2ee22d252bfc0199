//! PDF 1.4 serialization of laid-out pages
//!
//! Object layout:
//!
//! | id | object |
//! |----|--------|
//! | 1 | catalog |
//! | 2 | page tree |
//! | 3, 4 | Helvetica, Helvetica-Bold |
//! | 5 | info dictionary |
//! | 6 | logo image (only when a logo is drawn) |
//! | next | page, content stream, page, content stream, ... |

use chrono::{DateTime, Local};

use super::layout::{Color, DrawOp, Page, PAGE_HEIGHT, PAGE_WIDTH};
use super::logo::{LogoEncoding, LogoImage};
use super::text::{encode_win_ansi, escape_pdf_bytes, Font};
use crate::error::{ExportError, ExportResult};

const CATALOG_ID: usize = 1;
const PAGES_ID: usize = 2;
const FONT_REGULAR_ID: usize = 3;
const FONT_BOLD_ID: usize = 4;
const INFO_ID: usize = 5;
const LOGO_ID: usize = 6;

/// Document information dictionary entries
#[derive(Debug, Clone)]
pub struct PdfInfo<'a> {
    pub title: &'a str,
    pub author: &'a str,
    pub created_at: DateTime<Local>,
}

struct PdfWriter {
    buf: Vec<u8>,
    offsets: Vec<usize>,
}

impl PdfWriter {
    fn new(object_count: usize) -> Self {
        let mut buf = Vec::with_capacity(16 * 1024);
        buf.extend_from_slice(b"%PDF-1.4\n");
        // Binary marker so transfer tools treat the file as binary
        buf.extend_from_slice(&[b'%', 0xe2, 0xe3, 0xcf, 0xd3, b'\n']);
        Self {
            buf,
            offsets: vec![0; object_count],
        }
    }

    fn object(&mut self, id: usize, body: &[u8]) {
        self.offsets[id - 1] = self.buf.len();
        self.buf.extend_from_slice(format!("{} 0 obj\n", id).as_bytes());
        self.buf.extend_from_slice(body);
        self.buf.extend_from_slice(b"\nendobj\n");
    }

    fn stream(&mut self, id: usize, dict_entries: &str, data: &[u8]) {
        self.offsets[id - 1] = self.buf.len();
        self.buf.extend_from_slice(
            format!("{} 0 obj\n<< {} /Length {} >>\nstream\n", id, dict_entries, data.len())
                .as_bytes(),
        );
        self.buf.extend_from_slice(data);
        self.buf.extend_from_slice(b"\nendstream\nendobj\n");
    }

    fn finish(mut self) -> ExportResult<Vec<u8>> {
        if let Some(missing) = self.offsets.iter().position(|&o| o == 0) {
            return Err(ExportError::render(format!("PDF object {} was never written", missing + 1)));
        }

        let xref_offset = self.buf.len();
        let size = self.offsets.len() + 1;
        self.buf
            .extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", size).as_bytes());
        for offset in &self.offsets {
            self.buf
                .extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
        }
        self.buf.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root {} 0 R /Info {} 0 R >>\nstartxref\n{}\n%%EOF\n",
                size, CATALOG_ID, INFO_ID, xref_offset
            )
            .as_bytes(),
        );
        Ok(self.buf)
    }
}

/// Serialize pages (and the logo they reference) into a PDF file
pub fn write_pdf(pages: &[Page], logo: Option<&LogoImage>, info: &PdfInfo<'_>) -> ExportResult<Vec<u8>> {
    if pages.is_empty() {
        return Err(ExportError::render("document has no pages"));
    }

    let first_page_id = if logo.is_some() { LOGO_ID + 1 } else { LOGO_ID };
    let object_count = first_page_id - 1 + pages.len() * 2;
    let mut pdf = PdfWriter::new(object_count);

    pdf.object(
        CATALOG_ID,
        format!("<< /Type /Catalog /Pages {} 0 R >>", PAGES_ID).as_bytes(),
    );

    let kids: Vec<String> = (0..pages.len())
        .map(|i| format!("{} 0 R", first_page_id + i * 2))
        .collect();
    pdf.object(
        PAGES_ID,
        format!(
            "<< /Type /Pages /Kids [{}] /Count {} >>",
            kids.join(" "),
            pages.len()
        )
        .as_bytes(),
    );

    for (id, font) in [(FONT_REGULAR_ID, Font::Regular), (FONT_BOLD_ID, Font::Bold)] {
        pdf.object(
            id,
            format!(
                "<< /Type /Font /Subtype /Type1 /BaseFont /{} /Encoding /WinAnsiEncoding >>",
                font.base_font()
            )
            .as_bytes(),
        );
    }

    let mut info_dict = Vec::new();
    info_dict.extend_from_slice(b"<< /Title ");
    info_dict.extend(pdf_string(info.title));
    info_dict.extend_from_slice(b" /Author ");
    info_dict.extend(pdf_string(info.author));
    info_dict.extend_from_slice(b" /Producer ");
    info_dict.extend(pdf_string(&format!("zen-export {}", env!("CARGO_PKG_VERSION"))));
    info_dict.extend_from_slice(
        format!(
            " /CreationDate (D:{}) >>",
            info.created_at.format("%Y%m%d%H%M%S")
        )
        .as_bytes(),
    );
    pdf.object(INFO_ID, &info_dict);

    if let Some(logo) = logo {
        pdf.stream(LOGO_ID, &image_dictionary(logo), &logo.data);
    }

    let xobjects = if logo.is_some() {
        format!(" /XObject << /Im1 {} 0 R >>", LOGO_ID)
    } else {
        String::new()
    };

    for (i, page) in pages.iter().enumerate() {
        let page_id = first_page_id + i * 2;
        let content_id = page_id + 1;

        pdf.object(
            page_id,
            format!(
                "<< /Type /Page /Parent {} 0 R /MediaBox [0 0 {:.2} {:.2}] \
                 /Resources << /Font << /F1 {} 0 R /F2 {} 0 R >>{} >> /Contents {} 0 R >>",
                PAGES_ID, PAGE_WIDTH, PAGE_HEIGHT, FONT_REGULAR_ID, FONT_BOLD_ID, xobjects, content_id
            )
            .as_bytes(),
        );
        pdf.stream(content_id, "", &content_stream(page, logo.is_some()));
    }

    pdf.finish()
}

fn image_dictionary(logo: &LogoImage) -> String {
    let filter = match logo.encoding {
        LogoEncoding::Jpeg { .. } => "/Filter /DCTDecode".to_string(),
        LogoEncoding::Png { colors } => format!(
            "/Filter /FlateDecode /DecodeParms << /Predictor 15 /Colors {} /BitsPerComponent 8 /Columns {} >>",
            colors, logo.width
        ),
    };
    format!(
        "/Type /XObject /Subtype /Image /Width {} /Height {} /ColorSpace /{} /BitsPerComponent 8 {}",
        logo.width,
        logo.height,
        logo.color_space(),
        filter
    )
}

fn content_stream(page: &Page, has_logo: bool) -> Vec<u8> {
    let mut out = Vec::new();

    for op in &page.ops {
        match op {
            DrawOp::Text {
                x,
                y,
                size,
                font,
                color,
                text,
            } => {
                out.extend_from_slice(
                    format!(
                        "BT\n/{} {:.2} Tf\n{} rg\n{:.2} {:.2} Td\n",
                        font.resource_name(),
                        size,
                        rgb(*color),
                        x,
                        y
                    )
                    .as_bytes(),
                );
                out.extend(pdf_string(text));
                out.extend_from_slice(b" Tj\nET\n");
            }
            DrawOp::Rect {
                x,
                y,
                width,
                height,
                color,
            } => {
                out.extend_from_slice(
                    format!(
                        "{} rg\n{:.2} {:.2} {:.2} {:.2} re f\n",
                        rgb(*color),
                        x,
                        y,
                        width,
                        height
                    )
                    .as_bytes(),
                );
            }
            DrawOp::Rule {
                x1,
                y1,
                x2,
                y2,
                width,
                color,
            } => {
                out.extend_from_slice(
                    format!(
                        "{} RG\n{:.2} w\n{:.2} {:.2} m {:.2} {:.2} l S\n",
                        rgb(*color),
                        width,
                        x1,
                        y1,
                        x2,
                        y2
                    )
                    .as_bytes(),
                );
            }
            DrawOp::Logo {
                x,
                y,
                width,
                height,
            } if has_logo => {
                out.extend_from_slice(
                    format!(
                        "q\n{:.2} 0 0 {:.2} {:.2} {:.2} cm\n/Im1 Do\nQ\n",
                        width, height, x, y
                    )
                    .as_bytes(),
                );
            }
            DrawOp::Logo { .. } => {}
        }
    }

    out
}

fn rgb(color: Color) -> String {
    format!("{:.3} {:.3} {:.3}", color.0, color.1, color.2)
}

/// Encode and escape text as a PDF literal string, parentheses included
fn pdf_string(text: &str) -> Vec<u8> {
    let mut out = vec![b'('];
    out.extend(escape_pdf_bytes(&encode_win_ansi(text)));
    out.push(b')');
    out
}
