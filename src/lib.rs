//! Folio portfolio core
//!
//! The state core of a single-page model portfolio: a static image catalog,
//! category filtering, a lightbox with wrap-around navigation, a one-shot
//! entrance animation gate and an async PDF export of the portfolio.
//!
//! # Features
//!
//! - **Gallery**: filter, lightbox and visibility state behind one facade
//! - **PDF export**: sequential image loading with per-image failure isolation
//! - **HTTP loader** (`http`, default): fetches images with reqwest
//!
//! # Example
//!
//! ```no_run
//! use folio::{Catalog, ExportConfig, Gallery};
//! use folio::filter::CategoryFilter;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let mut gallery = Gallery::new(Catalog::default());
//! gallery.select_category("fashion".parse::<CategoryFilter>()?);
//! gallery.open(1)?;
//! println!("{}", gallery.lightbox_view().unwrap().position);
//!
//! let config = ExportConfig::default();
//! let loader = folio::export::HttpImageLoader::new(&config)?;
//! let doc = gallery.export_pdf(&loader, &config).await?;
//! doc.save(".").await?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub use error::{Error, Result};

pub mod catalog;
pub mod cursor;
pub mod filter;
pub mod lightbox;
pub mod visibility;

pub mod gallery;

// PDF export pipeline: loader seam, layout, document assembly
pub mod export;

pub use catalog::{Catalog, Category, ImageRecord};
pub use gallery::Gallery;

/// Configuration for the PDF export
///
/// All lengths are in millimetres, the unit the page layout works in. The
/// defaults reproduce the portfolio's A4 export: six images at most, two per
/// page, clamped to 100mm tall, saved as `portfolio.pdf`.
///
/// # Examples
///
/// ```
/// let cfg = folio::ExportConfig::default();
/// assert_eq!(cfg.max_items, 6);
/// assert_eq!(cfg.file_name, "portfolio.pdf");
/// ```
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// User agent string sent with image requests
    pub user_agent: String,
    /// Per-image fetch timeout in milliseconds (`None` waits indefinitely)
    pub fetch_timeout_ms: Option<u64>,
    /// Number of leading catalog entries included in the export
    pub max_items: usize,
    /// File name the document is saved under
    pub file_name: String,
    /// Header page text
    pub header: HeaderText,
    /// Page dimensions
    pub page: PageSize,
    /// Left and right page margin
    pub margin_mm: f32,
    /// Tallest an image may be drawn before it is scaled down
    pub max_image_height_mm: f32,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("folio/", env!("CARGO_PKG_VERSION")).to_string(),
            fetch_timeout_ms: None,
            max_items: 6,
            file_name: "portfolio.pdf".to_string(),
            header: HeaderText::default(),
            page: PageSize::default(),
            margin_mm: 20.0,
            max_image_height_mm: 100.0,
        }
    }
}

impl ExportConfig {
    /// Check that the page leaves room for images.
    pub fn validate(&self) -> Result<()> {
        if self.page.width_mm <= 2.0 * self.margin_mm {
            return Err(Error::ConfigError(format!(
                "page width {}mm leaves no room inside {}mm margins",
                self.page.width_mm, self.margin_mm
            )));
        }
        if self.max_image_height_mm <= 0.0 || self.page.height_mm <= 0.0 {
            return Err(Error::ConfigError(
                "page and image heights must be positive".into(),
            ));
        }
        if self.file_name.trim().is_empty() {
            return Err(Error::ConfigError("file name must not be empty".into()));
        }
        Ok(())
    }
}

/// Text lines of the header page
#[derive(Debug, Clone)]
pub struct HeaderText {
    pub title: String,
    pub subtitle: String,
    pub contact: String,
}

impl Default for HeaderText {
    fn default() -> Self {
        Self {
            title: "Model Portfolio".to_string(),
            subtitle: "Professional Model & Fashion Artist".to_string(),
            contact: "contact@portfolio.com | +1 (234) 567-890".to_string(),
        }
    }
}

/// Page dimensions in millimetres
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width_mm: f32,
    pub height_mm: f32,
}

impl PageSize {
    pub const A4: PageSize = PageSize {
        width_mm: 210.0,
        height_mm: 297.0,
    };
}

impl Default for PageSize {
    fn default() -> Self {
        Self::A4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExportConfig::default();
        assert_eq!(config.page, PageSize::A4);
        assert_eq!(config.max_image_height_mm, 100.0);
        assert!(config.fetch_timeout_ms.is_none());
        assert!(config.user_agent.starts_with("folio/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_narrow_page() {
        let config = ExportConfig {
            page: PageSize {
                width_mm: 30.0,
                height_mm: 297.0,
            },
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::ConfigError(_))));
    }
}
