//! Index cursor over a filtered view with wrap-around navigation.

/// Position within the filtered view the lightbox was opened on.
///
/// The cursor only stores a number. It is not tied to a record, so when the
/// view changes underneath it the same index may name a different record or
/// fall out of range; callers check with [`Cursor::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor(usize);

impl Cursor {
    pub fn new(index: usize) -> Self {
        Cursor(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }

    /// `(c + 1) mod len`. `len` must be non-zero.
    pub fn next(self, len: usize) -> Self {
        debug_assert!(len > 0, "cursor navigation on an empty view");
        Cursor((self.0 % len + 1) % len)
    }

    /// `(c - 1 + len) mod len`. `len` must be non-zero.
    pub fn previous(self, len: usize) -> Self {
        debug_assert!(len > 0, "cursor navigation on an empty view");
        Cursor((self.0 % len + len - 1) % len)
    }

    /// The element this cursor points at, if still in range.
    pub fn resolve<'v, T>(&self, view: &'v [T]) -> Option<&'v T> {
        view.get(self.0)
    }

    /// One-based "k / n" readout.
    pub fn position_text(&self, len: usize) -> String {
        format!("{} / {}", self.0 + 1, len)
    }
}
