//! Page model for paginated documents
//!
//! Content is laid out top to bottom in a single pass. Coordinates are PDF
//! points with the origin at the bottom-left corner of an A4 page.

use super::text::{text_width, Font};

pub const PAGE_WIDTH: f32 = 595.28;
pub const PAGE_HEIGHT: f32 = 841.89;
pub const MARGIN_X: f32 = 40.0;
pub const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN_X;
pub const PAGE_START_Y: f32 = PAGE_HEIGHT - 40.0;
/// Content never goes below this line; the footer lives underneath
pub const PAGE_BOTTOM_Y: f32 = 56.0;
pub const FOOTER_Y: f32 = 28.0;

/// RGB fill or stroke color, components in 0..=1
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color(pub f32, pub f32, pub f32);

impl Color {
    pub const BLACK: Color = Color(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color(1.0, 1.0, 1.0);
    pub const MUTED: Color = Color(0.42, 0.45, 0.5);
    pub const BRAND: Color = Color(0.13, 0.35, 0.62);
    pub const STRIPE: Color = Color(0.95, 0.96, 0.97);
    pub const RULE: Color = Color(0.85, 0.87, 0.9);
}

/// Horizontal placement of a text run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// One drawing instruction on a page
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    /// Text run whose baseline starts at (x, y)
    Text {
        x: f32,
        y: f32,
        size: f32,
        font: Font,
        color: Color,
        text: String,
    },
    /// Filled rectangle with its lower-left corner at (x, y)
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Color,
    },
    /// Straight stroked line
    Rule {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        width: f32,
        color: Color,
    },
    /// The brand logo image
    Logo {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

/// A single page's drawing operations
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

impl Page {
    /// Text runs on this page, in drawing order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

/// Text style shorthand
#[derive(Debug, Clone, Copy)]
pub struct Style {
    pub size: f32,
    pub font: Font,
    pub color: Color,
}

impl Style {
    pub const fn new(size: f32, font: Font, color: Color) -> Self {
        Self { size, font, color }
    }
}

/// Single-pass cursor over a growing list of pages
#[derive(Debug)]
pub struct PageLayout {
    pages: Vec<Page>,
    y: f32,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::new()
    }
}

impl PageLayout {
    pub fn new() -> Self {
        Self {
            pages: vec![Page::default()],
            y: PAGE_START_Y,
        }
    }

    /// Current vertical position
    pub fn y(&self) -> f32 {
        self.y
    }

    /// Move the cursor down
    pub fn advance(&mut self, dy: f32) {
        self.y -= dy;
    }

    /// Whether `height` points still fit above the bottom margin
    pub fn fits(&self, height: f32) -> bool {
        self.y - height >= PAGE_BOTTOM_Y
    }

    /// Start a new page when `height` does not fit; returns true if it did
    pub fn ensure_space(&mut self, height: f32) -> bool {
        if self.fits(height) {
            return false;
        }
        self.new_page();
        true
    }

    pub fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.y = PAGE_START_Y;
        tracing::debug!(page = self.pages.len(), "started new document page");
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn current_page_mut(&mut self) -> &mut Page {
        let idx = self.pages.len().saturating_sub(1);
        &mut self.pages[idx]
    }

    pub fn push(&mut self, op: DrawOp) {
        self.current_page_mut().ops.push(op);
    }

    /// Draw text on the current baseline, aligned within the content width
    pub fn text(&mut self, text: &str, style: Style, align: Align) {
        self.text_in(text, style, align, MARGIN_X, CONTENT_WIDTH, self.y);
    }

    /// Draw text aligned inside the horizontal box `[x, x + width]` at baseline `y`
    pub fn text_in(&mut self, text: &str, style: Style, align: Align, x: f32, width: f32, y: f32) {
        if text.is_empty() {
            return;
        }
        let measured = text_width(text, style.font, style.size);
        let x = match align {
            Align::Left => x,
            Align::Center => x + (width - measured) / 2.0,
            Align::Right => x + width - measured,
        };
        self.push(DrawOp::Text {
            x,
            y,
            size: style.size,
            font: style.font,
            color: style.color,
            text: text.to_string(),
        });
    }

    /// Horizontal rule across the content width at the current position
    pub fn rule(&mut self, width: f32, color: Color) {
        let y = self.y;
        self.push(DrawOp::Rule {
            x1: MARGIN_X,
            y1: y,
            x2: MARGIN_X + CONTENT_WIDTH,
            y2: y,
            width,
            color,
        });
    }

    /// Finish layout and hand back every page
    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: Style = Style::new(10.0, Font::Regular, Color::BLACK);

    #[test]
    fn test_starts_with_one_page() {
        let layout = PageLayout::new();
        assert_eq!(layout.page_count(), 1);
        assert_eq!(layout.y(), PAGE_START_Y);
    }

    #[test]
    fn test_ensure_space_breaks_page() {
        let mut layout = PageLayout::new();
        layout.advance(PAGE_START_Y - PAGE_BOTTOM_Y - 5.0);

        assert!(!layout.ensure_space(4.0));
        assert!(layout.ensure_space(20.0));
        assert_eq!(layout.page_count(), 2);
        assert_eq!(layout.y(), PAGE_START_Y);
    }

    #[test]
    fn test_alignment() {
        let mut layout = PageLayout::new();
        layout.text("Centre", BODY, Align::Center);
        layout.text("Droite", BODY, Align::Right);

        let pages = layout.into_pages();
        let xs: Vec<f32> = pages[0]
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { x, .. } => Some(*x),
                _ => None,
            })
            .collect();

        let centre_width = text_width("Centre", Font::Regular, 10.0);
        assert!((xs[0] - (MARGIN_X + (CONTENT_WIDTH - centre_width) / 2.0)).abs() < 1e-3);
        let right_width = text_width("Droite", Font::Regular, 10.0);
        assert!((xs[1] + right_width - (MARGIN_X + CONTENT_WIDTH)).abs() < 1e-3);
    }

    #[test]
    fn test_empty_text_is_skipped() {
        let mut layout = PageLayout::new();
        layout.text("", BODY, Align::Left);
        assert!(layout.into_pages()[0].ops.is_empty());
    }
}
