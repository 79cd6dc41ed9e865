//! PDF export of the portfolio.
//!
//! The export walks the leading catalog entries strictly in order, awaiting
//! each image before starting the next one. A failed image is skipped and
//! recorded; it never aborts the document.

pub mod layout;
pub mod loader;
pub mod paint;
pub mod pdf;

pub use loader::{decode_image, ImageData, ImageLoader, LoadedImage};

#[cfg(feature = "http")]
pub use loader::HttpImageLoader;

use crate::catalog::ImageRecord;
use crate::{Catalog, Error, ExportConfig, Result};
use layout::DocumentLayout;
use paint::MmRect;
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// One image drawn into the document
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    pub id: u32,
    /// Zero-based page index
    pub page: usize,
    /// Image rectangle in millimetres from the top-left corner
    pub x_mm: f32,
    pub y_mm: f32,
    pub width_mm: f32,
    pub height_mm: f32,
}

impl Placement {
    fn new(id: u32, page: usize, rect: MmRect) -> Self {
        Self {
            id,
            page,
            x_mm: rect.x,
            y_mm: rect.y,
            width_mm: rect.width,
            height_mm: rect.height,
        }
    }
}

/// An entry left out because its image could not be loaded
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedImage {
    pub id: u32,
    pub url: String,
    pub reason: String,
}

/// What one export did
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExportReport {
    pub placements: Vec<Placement>,
    pub skipped: Vec<SkippedImage>,
    pub pages: usize,
}

impl ExportReport {
    pub fn placed_ids(&self) -> Vec<u32> {
        self.placements.iter().map(|p| p.id).collect()
    }
}

/// A finished document ready to be saved
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub report: ExportReport,
}

impl ExportedDocument {
    /// Write the document into `dir` under its fixed file name.
    pub async fn save(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        tokio::fs::write(&path, &self.bytes).await?;
        log::info!("Saved {} ({} bytes)", path.display(), self.bytes.len());
        Ok(path)
    }
}

async fn load_entry<L>(loader: &L, record: &ImageRecord, timeout_ms: Option<u64>) -> Result<LoadedImage>
where
    L: ImageLoader + ?Sized,
{
    match timeout_ms {
        None => loader.load(&record.url).await,
        Some(ms) => tokio::time::timeout(Duration::from_millis(ms), loader.load(&record.url))
            .await
            .map_err(|_| Error::Timeout(ms))?,
    }
}

/// Export the first `config.max_items` catalog entries as a PDF.
///
/// The header goes on page 1 together with the first two entries; entries
/// 2 and 4 each open a new page. Page breaks follow the entry index, so a
/// failed entry still counts toward them.
pub async fn export_pdf<L>(catalog: &Catalog, loader: &L, config: &ExportConfig) -> Result<ExportedDocument>
where
    L: ImageLoader + ?Sized,
{
    config.validate()?;

    let entries: Vec<&ImageRecord> = catalog.iter().take(config.max_items).collect();
    log::info!("Exporting {} of {} portfolio images", entries.len(), catalog.len());

    let mut layout = DocumentLayout::new(config);
    let mut images: Vec<LoadedImage> = Vec::with_capacity(entries.len());
    let mut report = ExportReport::default();

    for (index, record) in entries.iter().enumerate() {
        layout.begin_entry(index);

        match load_entry(loader, record, config.fetch_timeout_ms).await {
            Ok(img) => {
                let (page, rect) = layout.place(
                    images.len(),
                    img.width,
                    img.height,
                    &record.title,
                    record.category.label(),
                );
                log::debug!(
                    "placed image {} on page {} at y={:.1}mm ({:.1}x{:.1}mm)",
                    record.id,
                    page + 1,
                    rect.y,
                    rect.width,
                    rect.height
                );
                images.push(img);
                report.placements.push(Placement::new(record.id, page, rect));
            }
            Err(e) => {
                log::warn!("Skipping image {} ({}): {}", record.id, record.url, e);
                report.skipped.push(SkippedImage {
                    id: record.id,
                    url: record.url.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    let pages = layout.finish();
    report.pages = pages.len();
    let bytes = pdf::render(&pages, &images, config.page)?;

    log::info!(
        "Export finished: {} placed, {} skipped, {} pages",
        report.placements.len(),
        report.skipped.len(),
        report.pages
    );

    Ok(ExportedDocument {
        file_name: config.file_name.clone(),
        bytes,
        report,
    })
}
