//! Text measuring and encoding for the built-in PDF fonts
//!
//! Documents use the standard Helvetica faces, which every PDF reader ships,
//! so widths come from the published font metrics and strings are encoded as
//! WinAnsi bytes.

/// The two faces documents are set in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    /// Name used in page resource dictionaries
    pub fn resource_name(&self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
        }
    }

    /// PostScript name of the standard font
    pub fn base_font(&self) -> &'static str {
        match self {
            Self::Regular => "Helvetica",
            Self::Bold => "Helvetica-Bold",
        }
    }

    fn ascii_widths(&self) -> &'static [u16; 95] {
        match self {
            Self::Regular => &HELVETICA_WIDTHS,
            Self::Bold => &HELVETICA_BOLD_WIDTHS,
        }
    }
}

/// Advance widths (1/1000 em) for ASCII 32..=126
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

fn char_width(c: char, font: Font) -> u16 {
    match c {
        ' '..='~' => font.ascii_widths()[c as usize - 32],
        c if c.is_uppercase() => 667,
        _ => 556,
    }
}

/// Width of `text` in points at `size`
pub fn text_width(text: &str, font: Font, size: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(char_width(c, font))).sum();
    units as f32 * size / 1000.0
}

/// Truncate `text` with `...` so it fits in `max_width` points
pub fn fit_text(text: &str, font: Font, size: f32, max_width: f32) -> String {
    if text_width(text, font, size) <= max_width {
        return text.to_string();
    }

    let ellipsis = "...";
    let budget = max_width - text_width(ellipsis, font, size);
    if budget <= 0.0 {
        return String::new();
    }

    let mut used = 0.0;
    let mut out = String::new();
    for c in text.chars() {
        let w = f32::from(char_width(c, font)) * size / 1000.0;
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.truncate(out.trim_end().len());
    out.push_str(ellipsis);
    out
}

/// Encode text as WinAnsi bytes; unmappable characters become `?`
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(c: char) -> u8 {
    match c {
        ' '..='~' => c as u8,
        '\u{a0}'..='\u{ff}' => c as u8,
        '\t' | '\u{202f}' | '\u{2009}' => b' ',
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8a,
        '‹' => 0x8b,
        'Œ' => 0x8c,
        'Ž' => 0x8e,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9a,
        '›' => 0x9b,
        'œ' => 0x9c,
        'ž' => 0x9e,
        'Ÿ' => 0x9f,
        _ => b'?',
    }
}

/// Escape bytes for a PDF literal string `( ... )`
pub fn escape_pdf_bytes(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len() + 8);
    for &b in bytes {
        match b {
            b'(' | b')' | b'\\' => {
                out.push(b'\\');
                out.push(b);
            }
            b'\r' => out.extend_from_slice(b"\\r"),
            b'\n' => out.extend_from_slice(b"\\n"),
            _ => out.push(b),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_width() {
        // "A" is 667 units in Helvetica
        assert!((text_width("A", Font::Regular, 10.0) - 6.67).abs() < 1e-4);
        assert!(text_width("Total", Font::Bold, 10.0) > text_width("Total", Font::Regular, 10.0));
        assert_eq!(text_width("", Font::Regular, 12.0), 0.0);
    }

    #[test]
    fn test_fit_text_truncates() {
        let long = "Commande très longue pour un client important";
        let fitted = fit_text(long, Font::Regular, 9.0, 60.0);
        assert!(fitted.ends_with("..."));
        assert!(text_width(&fitted, Font::Regular, 9.0) <= 60.0);
        assert_eq!(fit_text("A1", Font::Regular, 9.0, 60.0), "A1");
    }

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(encode_win_ansi("Terminé"), b"Termin\xe9".to_vec());
        assert_eq!(encode_win_ansi("10 €"), b"10 \x80".to_vec());
        assert_eq!(encode_win_ansi("日本"), b"??".to_vec());
    }

    #[test]
    fn test_escape_pdf_bytes() {
        assert_eq!(escape_pdf_bytes(b"a(b)c\\"), b"a\\(b\\)c\\\\".to_vec());
    }
}
