//! The gallery facade consumed by the presentational layer.
//!
//! Holds the catalog, the active filter, the lightbox and the visibility
//! tracker. The filtered view is never stored; it is recomputed from the
//! catalog and the filter on every read.
//!
//! Changing the filter while the lightbox is open leaves the lightbox cursor
//! untouched. The same number then indexes the new view, so it may show a
//! different image or nothing at all until the user navigates or reopens.

use crate::catalog::{Catalog, ImageRecord};
use crate::cursor::Cursor;
use crate::export::{self, ExportedDocument, ImageLoader};
use crate::filter::{self, CategoryFilter};
use crate::lightbox::{BackgroundScroll, Lightbox, LightboxState, OverlayTarget};
use crate::visibility::{Observation, RevealState, VisibilityTracker, PAGE_SECTIONS};
use crate::{ExportConfig, Result};

/// What the lightbox overlay shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LightboxView<'a> {
    pub record: &'a ImageRecord,
    /// One-based "k / n" readout
    pub position: String,
}

#[derive(Debug)]
pub struct Gallery {
    catalog: Catalog,
    filter: CategoryFilter,
    lightbox: Lightbox,
    visibility: VisibilityTracker,
}

impl Gallery {
    pub fn new(catalog: Catalog) -> Self {
        Self::with_parts(catalog, BackgroundScroll::new(), VisibilityTracker::default())
    }

    pub fn with_parts(catalog: Catalog, scroll: BackgroundScroll, visibility: VisibilityTracker) -> Self {
        Self {
            catalog,
            filter: CategoryFilter::All,
            lightbox: Lightbox::new(scroll),
            visibility,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn filter(&self) -> CategoryFilter {
        self.filter
    }

    pub fn filtered_view(&self) -> Vec<&ImageRecord> {
        filter::filter(&self.catalog, self.filter)
    }

    fn view_len(&self) -> usize {
        self.filtered_view().len()
    }

    /// Select a category. An open lightbox keeps its numeric cursor.
    pub fn select_category(&mut self, selection: CategoryFilter) {
        if self.filter != selection {
            log::debug!("filter {} -> {}", self.filter, selection);
        }
        self.filter = selection;
    }

    /// Open the lightbox on position `index` of the current view.
    pub fn open(&mut self, index: usize) -> Result<()> {
        let len = self.view_len();
        self.lightbox.open(len, index)
    }

    pub fn close(&mut self) {
        self.lightbox.close();
    }

    pub fn next(&mut self) {
        let len = self.view_len();
        self.lightbox.next(len);
    }

    pub fn previous(&mut self) {
        let len = self.view_len();
        self.lightbox.previous(len);
    }

    pub fn click(&mut self, target: OverlayTarget) {
        let len = self.view_len();
        self.lightbox.click(target, len);
    }

    pub fn lightbox_state(&self) -> LightboxState {
        self.lightbox.state()
    }

    pub fn is_scroll_locked(&self) -> bool {
        self.lightbox.scroll().is_locked()
    }

    /// Record and readout under the cursor, or `None` when the lightbox is
    /// closed or its cursor is stale past the end of the current view.
    pub fn lightbox_view(&self) -> Option<LightboxView<'_>> {
        let cursor: Cursor = self.lightbox.cursor()?;
        let view = self.filtered_view();
        let record = *cursor.resolve(&view)?;
        Some(LightboxView {
            record,
            position: cursor.position_text(view.len()),
        })
    }

    /// Observe the page sections for entrance animations.
    pub fn observe_sections(&self) -> Observation {
        self.visibility.observe(PAGE_SECTIONS)
    }

    pub fn visibility(&self) -> &VisibilityTracker {
        &self.visibility
    }

    pub fn reveal_state(&self, section: &str) -> RevealState {
        self.visibility.reveal_state(section)
    }

    /// Export the full catalog, independent of the active filter.
    pub async fn export_pdf<L>(&self, loader: &L, config: &ExportConfig) -> Result<ExportedDocument>
    where
        L: ImageLoader + ?Sized,
    {
        export::export_pdf(&self.catalog, loader, config).await
    }
}

impl Default for Gallery {
    fn default() -> Self {
        Self::new(Catalog::default())
    }
}
