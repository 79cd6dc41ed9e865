//! Lightbox controller: a Closed/Open state machine over the filtered view.
//!
//! While open the lightbox holds a [`ScrollLock`] on the page's background
//! scroll. The lock lives inside the open state, so closing (or dropping
//! the controller) always releases it.

use crate::cursor::Cursor;
use crate::{Error, Result};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Background scrolling of the page behind the overlay.
///
/// Clones share the same flag, so the presentational layer can hold one to
/// query whether scrolling is currently suppressed.
#[derive(Debug, Clone, Default)]
pub struct BackgroundScroll {
    locked: Arc<AtomicBool>,
}

impl BackgroundScroll {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::SeqCst)
    }

    fn acquire(&self) -> ScrollLock {
        self.locked.store(true, Ordering::SeqCst);
        ScrollLock {
            locked: self.locked.clone(),
        }
    }
}

/// Suppresses background scrolling until dropped
#[derive(Debug)]
pub struct ScrollLock {
    locked: Arc<AtomicBool>,
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        self.locked.store(false, Ordering::SeqCst);
    }
}

/// Observable lightbox state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxState {
    Closed,
    Open { cursor: Cursor },
}

/// Interaction regions of the overlay, each with its own handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayTarget {
    /// Dimmed area around the image
    Backdrop,
    CloseButton,
    PreviousButton,
    NextButton,
    /// The displayed image itself
    Image,
    /// Title, category and position readout under the image
    Caption,
}

enum Inner {
    Closed,
    Open { cursor: Cursor, _lock: ScrollLock },
}

pub struct Lightbox {
    inner: Inner,
    scroll: BackgroundScroll,
}

impl Lightbox {
    pub fn new(scroll: BackgroundScroll) -> Self {
        Self {
            inner: Inner::Closed,
            scroll,
        }
    }

    pub fn state(&self) -> LightboxState {
        match &self.inner {
            Inner::Closed => LightboxState::Closed,
            Inner::Open { cursor, .. } => LightboxState::Open { cursor: *cursor },
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.inner, Inner::Open { .. })
    }

    pub fn cursor(&self) -> Option<Cursor> {
        match &self.inner {
            Inner::Closed => None,
            Inner::Open { cursor, .. } => Some(*cursor),
        }
    }

    pub fn scroll(&self) -> &BackgroundScroll {
        &self.scroll
    }

    /// Open on `index` of a view with `view_len` elements.
    ///
    /// Opening an already open lightbox only moves the cursor; the existing
    /// scroll lock is kept.
    pub fn open(&mut self, view_len: usize, index: usize) -> Result<()> {
        if view_len == 0 {
            return Err(Error::EmptyView);
        }
        if index >= view_len {
            return Err(Error::IndexOutOfRange {
                index,
                len: view_len,
            });
        }

        match &mut self.inner {
            Inner::Open { cursor, .. } => *cursor = Cursor::new(index),
            Inner::Closed => {
                self.inner = Inner::Open {
                    cursor: Cursor::new(index),
                    _lock: self.scroll.acquire(),
                };
            }
        }
        log::debug!("lightbox open at {}/{}", index + 1, view_len);
        Ok(())
    }

    pub fn close(&mut self) {
        if self.is_open() {
            // Dropping the open state releases the scroll lock
            self.inner = Inner::Closed;
            log::debug!("lightbox closed");
        }
    }

    pub fn next(&mut self, view_len: usize) {
        if let Inner::Open { cursor, .. } = &mut self.inner {
            if view_len > 0 {
                *cursor = cursor.next(view_len);
            }
        }
    }

    pub fn previous(&mut self, view_len: usize) {
        if let Inner::Open { cursor, .. } = &mut self.inner {
            if view_len > 0 {
                *cursor = cursor.previous(view_len);
            }
        }
    }

    /// Route a click on one overlay region.
    pub fn click(&mut self, target: OverlayTarget, view_len: usize) {
        match target {
            OverlayTarget::Backdrop | OverlayTarget::CloseButton => self.close(),
            OverlayTarget::PreviousButton => self.previous(view_len),
            OverlayTarget::NextButton => self.next(view_len),
            OverlayTarget::Image | OverlayTarget::Caption => {}
        }
    }
}

impl Default for Lightbox {
    fn default() -> Self {
        Self::new(BackgroundScroll::new())
    }
}

impl std::fmt::Debug for Lightbox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lightbox")
            .field("state", &self.state())
            .field("scroll_locked", &self.scroll.is_locked())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_and_close_toggle_scroll_lock() {
        let scroll = BackgroundScroll::new();
        let mut lb = Lightbox::new(scroll.clone());
        assert!(!scroll.is_locked());

        lb.open(3, 1).unwrap();
        assert!(scroll.is_locked());
        assert_eq!(lb.state(), LightboxState::Open { cursor: Cursor::new(1) });

        lb.close();
        assert!(!scroll.is_locked());
        assert_eq!(lb.state(), LightboxState::Closed);
    }

    #[test]
    fn reopening_keeps_a_single_lock() {
        let scroll = BackgroundScroll::new();
        let mut lb = Lightbox::new(scroll.clone());
        lb.open(4, 0).unwrap();
        lb.open(4, 3).unwrap();
        assert_eq!(lb.cursor(), Some(Cursor::new(3)));
        lb.close();
        assert!(!scroll.is_locked());
    }

    #[test]
    fn dropping_open_lightbox_releases_lock() {
        let scroll = BackgroundScroll::new();
        {
            let mut lb = Lightbox::new(scroll.clone());
            lb.open(2, 0).unwrap();
            assert!(scroll.is_locked());
        }
        assert!(!scroll.is_locked());
    }

    #[test]
    fn open_rejects_empty_view_and_bad_index() {
        let mut lb = Lightbox::default();
        assert!(matches!(lb.open(0, 0), Err(Error::EmptyView)));
        assert!(matches!(
            lb.open(2, 2),
            Err(Error::IndexOutOfRange { index: 2, len: 2 })
        ));
        assert!(!lb.is_open());
        assert!(!lb.scroll().is_locked());
    }

    #[test]
    fn navigation_wraps_and_is_noop_when_closed() {
        let mut lb = Lightbox::default();
        lb.next(3);
        assert_eq!(lb.state(), LightboxState::Closed);

        lb.open(3, 2).unwrap();
        lb.next(3);
        assert_eq!(lb.cursor(), Some(Cursor::new(0)));
        lb.previous(3);
        assert_eq!(lb.cursor(), Some(Cursor::new(2)));

        lb.open(1, 0).unwrap();
        lb.next(1);
        assert_eq!(lb.cursor(), Some(Cursor::new(0)));
    }

    #[test]
    fn image_and_caption_clicks_do_not_close() {
        let mut lb = Lightbox::default();
        lb.open(2, 0).unwrap();
        lb.click(OverlayTarget::Image, 2);
        lb.click(OverlayTarget::Caption, 2);
        assert!(lb.is_open());

        lb.click(OverlayTarget::NextButton, 2);
        assert_eq!(lb.cursor(), Some(Cursor::new(1)));
        lb.click(OverlayTarget::PreviousButton, 2);
        assert_eq!(lb.cursor(), Some(Cursor::new(0)));

        lb.click(OverlayTarget::Backdrop, 2);
        assert!(!lb.is_open());

        lb.open(2, 1).unwrap();
        lb.click(OverlayTarget::CloseButton, 2);
        assert!(!lb.is_open());
    }
}
