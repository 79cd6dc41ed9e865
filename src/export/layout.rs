//! Page layout for the PDF export.
//!
//! Page 1 carries the centered header followed by the first images; every
//! second entry starts a new page. Images are scaled to the content width
//! and clamped to the configured maximum height, each followed by a bold
//! title line and a plain category line.

use super::paint::{DrawCommand, FontWeight, MmRect, PageCommands};
use crate::{ExportConfig, HeaderText};

pub const TITLE_SIZE: f32 = 24.0;
pub const SUBTITLE_SIZE: f32 = 14.0;
pub const CONTACT_SIZE: f32 = 10.0;
pub const CAPTION_TITLE_SIZE: f32 = 12.0;
pub const CAPTION_CATEGORY_SIZE: f32 = 10.0;

const TITLE_Y: f32 = 25.0;
const SUBTITLE_Y: f32 = 35.0;
const CONTACT_Y: f32 = 43.0;
/// Vertical cursor after the header
const FIRST_ITEM_Y: f32 = 55.0;
/// Vertical cursor at the top of a continuation page
const PAGE_TOP_Y: f32 = 20.0;
const CAPTION_TITLE_OFFSET: f32 = 7.0;
const CAPTION_CATEGORY_OFFSET: f32 = 13.0;
/// Space between the bottom of one image and the top of the next
const ITEM_GAP: f32 = 22.0;

pub const ITEMS_PER_PAGE: usize = 2;

const PT_PER_MM: f32 = 72.0 / 25.4;

// Helvetica advance widths (1/1000 em) for ASCII 0x20..=0x7E
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0..?
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // P.._
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // `..o
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // p..~
];

// Helvetica-Bold advance widths for the same range
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 0..?
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // P.._
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // `..o
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // p..~
];

/// Approximate rendered width of `text` in millimetres.
///
/// Anything outside printable ASCII counts as an average-width glyph.
pub fn text_width_mm(text: &str, size_pt: f32, weight: FontWeight) -> f32 {
    let widths = match weight {
        FontWeight::Regular => &HELVETICA_WIDTHS,
        FontWeight::Bold => &HELVETICA_BOLD_WIDTHS,
    };
    let units: u32 = text
        .chars()
        .map(|c| match c as u32 {
            0x20..=0x7E => widths[(c as u32 - 0x20) as usize] as u32,
            _ => 556,
        })
        .sum();
    units as f32 / 1000.0 * size_pt / PT_PER_MM
}

/// Display size for an image of `px_width` × `px_height` pixels.
///
/// The image fills `target_width`; if that makes it taller than
/// `max_height` the height is clamped and the width recomputed so the
/// aspect ratio is kept.
pub fn fit_image(px_width: u32, px_height: u32, target_width: f32, max_height: f32) -> (f32, f32) {
    let aspect = px_height as f32 / px_width as f32;
    let mut width = target_width;
    let mut height = width * aspect;
    if height > max_height {
        height = max_height;
        width = height / aspect;
    }
    (width, height)
}

/// Incremental page builder driven by the export loop
#[derive(Debug)]
pub struct DocumentLayout {
    page_width: f32,
    margin: f32,
    max_image_height: f32,
    pages: Vec<PageCommands>,
    y: f32,
}

impl DocumentLayout {
    /// Start a document whose first page carries the header.
    pub fn new(config: &ExportConfig) -> Self {
        let mut layout = Self {
            page_width: config.page.width_mm,
            margin: config.margin_mm,
            max_image_height: config.max_image_height_mm,
            pages: vec![PageCommands::default()],
            y: FIRST_ITEM_Y,
        };
        layout.header(&config.header);
        layout
    }

    fn header(&mut self, header: &HeaderText) {
        self.centered_text(&header.title, TITLE_Y, TITLE_SIZE, FontWeight::Regular);
        self.centered_text(&header.subtitle, SUBTITLE_Y, SUBTITLE_SIZE, FontWeight::Regular);
        self.centered_text(&header.contact, CONTACT_Y, CONTACT_SIZE, FontWeight::Regular);
    }

    fn current(&mut self) -> &mut PageCommands {
        // pages is never empty: new() pushes the first page
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn centered_text(&mut self, text: &str, y: f32, size: f32, weight: FontWeight) {
        let x = (self.page_width - text_width_mm(text, size, weight)) / 2.0;
        self.current().commands.push(DrawCommand::Text {
            x,
            y,
            size,
            weight,
            text: text.to_string(),
        });
    }

    /// Called before entry `index` is loaded. Entries 2, 4, ... open a page.
    pub fn begin_entry(&mut self, index: usize) {
        if index > 0 && index % ITEMS_PER_PAGE == 0 {
            self.pages.push(PageCommands::default());
            self.y = PAGE_TOP_Y;
        }
    }

    /// Place a loaded image with its captions at the vertical cursor.
    ///
    /// Returns the zero-based page index and the image rectangle.
    pub fn place(
        &mut self,
        image: usize,
        px_width: u32,
        px_height: u32,
        title: &str,
        category: &str,
    ) -> (usize, MmRect) {
        let target = self.page_width - 2.0 * self.margin;
        let (width, height) = fit_image(px_width, px_height, target, self.max_image_height);
        let rect = MmRect {
            x: (self.page_width - width) / 2.0,
            y: self.y,
            width,
            height,
        };
        self.current().commands.push(DrawCommand::Image { image, rect });

        let bottom = self.y + height;
        self.centered_text(title, bottom + CAPTION_TITLE_OFFSET, CAPTION_TITLE_SIZE, FontWeight::Bold);
        self.centered_text(
            category,
            bottom + CAPTION_CATEGORY_OFFSET,
            CAPTION_CATEGORY_SIZE,
            FontWeight::Regular,
        );
        self.y = bottom + ITEM_GAP;

        (self.pages.len() - 1, rect)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn finish(self) -> Vec<PageCommands> {
        self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_image_fills_content_width() {
        let (w, h) = fit_image(1600, 900, 170.0, 100.0);
        assert_eq!(w, 170.0);
        assert!((h - 95.625).abs() < 1e-3);
    }

    #[test]
    fn tall_image_is_clamped_preserving_aspect() {
        let (w, h) = fit_image(600, 800, 170.0, 100.0);
        assert_eq!(h, 100.0);
        assert!((w - 75.0).abs() < 1e-3);
        assert!((h / w - 800.0 / 600.0).abs() < 1e-4);
    }

    #[test]
    fn header_is_centered_on_first_page() {
        let layout = DocumentLayout::new(&ExportConfig::default());
        let pages = layout.finish();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].commands.len(), 3);
        for cmd in &pages[0].commands {
            if let DrawCommand::Text { x, size, weight, text, .. } = cmd {
                let w = text_width_mm(text, *size, *weight);
                assert!((x + w / 2.0 - 105.0).abs() < 1e-3);
            } else {
                panic!("header should only contain text");
            }
        }
    }

    #[test]
    fn every_second_entry_starts_a_page() {
        let mut layout = DocumentLayout::new(&ExportConfig::default());
        let mut pages_seen = Vec::new();
        for i in 0..6 {
            layout.begin_entry(i);
            let (page, _) = layout.place(i, 600, 800, "t", "Fashion");
            pages_seen.push(page);
        }
        assert_eq!(pages_seen, vec![0, 0, 1, 1, 2, 2]);
        assert_eq!(layout.page_count(), 3);
    }

    #[test]
    fn placements_stack_and_stay_on_page() {
        let config = ExportConfig::default();
        let mut layout = DocumentLayout::new(&config);
        layout.begin_entry(0);
        let (_, first) = layout.place(0, 600, 800, "a", "Beauty");
        layout.begin_entry(1);
        let (_, second) = layout.place(1, 600, 800, "b", "Beauty");

        assert_eq!(first.y, FIRST_ITEM_Y);
        assert_eq!(second.y, first.y + first.height + ITEM_GAP);
        assert!((first.x - (210.0 - 75.0) / 2.0).abs() < 1e-3);
        assert!(second.y + second.height + CAPTION_CATEGORY_OFFSET <= config.page.height_mm);

        layout.begin_entry(2);
        let (page, third) = layout.place(2, 600, 800, "c", "Beauty");
        assert_eq!(page, 1);
        assert_eq!(third.y, PAGE_TOP_Y);
    }

    #[test]
    fn bold_width_uses_bold_metrics() {
        // "Brand": B722 r389 a556 n611 d611 in Helvetica-Bold
        let pt = 2889.0 / 1000.0 * 12.0;
        let w = text_width_mm("Brand", 12.0, FontWeight::Bold);
        assert!((w - pt / PT_PER_MM).abs() < 1e-4);
        assert!(w > text_width_mm("Brand", 12.0, FontWeight::Regular));
        // Some glyphs share advances across weights
        assert_eq!(
            text_width_mm("0123", 10.0, FontWeight::Bold),
            text_width_mm("0123", 10.0, FontWeight::Regular)
        );
    }
}
