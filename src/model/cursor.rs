//! Cursor and viewport - logical position plus scroll-follow
//!
//! The cursor is a (line, column) pair in byte coordinates. Columns are
//! logical: a tab counts as one column here, and only the renderer expands
//! it (see [`super::view::visual_column`]).

use super::text_store::TextStore;

/// A position in the buffer (0-indexed line and byte column)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Cursor {
    pub line: usize,
    pub column: usize,
}

impl Cursor {
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Clamp `(line, column)` against `store`.
    ///
    /// An empty store only admits `(0, 0)`. Otherwise the line is clamped to
    /// the last line and the column to the line length excluding its `\n`,
    /// so the cursor may sit one past the last character. If the clamped line
    /// cannot be read, the cursor keeps `fallback_line`.
    pub fn clamped(store: &TextStore, line: usize, column: usize, fallback_line: usize) -> Self {
        if store.is_empty() {
            return Self::new(0, 0);
        }

        let last_line = store.line_count().saturating_sub(1);
        let mut line = line.min(last_line);
        let line_len = match store.line_len(line) {
            Ok(len) => len,
            Err(_) => {
                line = fallback_line.min(last_line);
                store.line_len(line).unwrap_or(0)
            }
        };

        Self::new(line, column.min(line_len))
    }
}

/// The window of lines a view shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Index of the topmost visible line
    pub first_visible_line: usize,
    /// Rows in the display region
    pub height: usize,
    /// Rows at the bottom of the region taken by the status line
    pub reserved_rows: usize,
}

impl Viewport {
    pub const fn new(height: usize, reserved_rows: usize) -> Self {
        Self {
            first_visible_line: 0,
            height,
            reserved_rows,
        }
    }

    /// Rows available for text, never less than one
    #[inline]
    pub fn text_rows(&self) -> usize {
        self.height.saturating_sub(self.reserved_rows).max(1)
    }

    /// Last line index that is on screen
    #[inline]
    pub fn last_visible_line(&self) -> usize {
        self.first_visible_line + self.text_rows() - 1
    }

    #[inline]
    pub fn is_visible(&self, line: usize) -> bool {
        line >= self.first_visible_line && line <= self.last_visible_line()
    }

    /// Scroll the minimum amount that brings `line` on screen
    pub fn follow(&mut self, line: usize) {
        if line < self.first_visible_line {
            self.first_visible_line = line;
        } else if line >= self.first_visible_line + self.text_rows() {
            self.first_visible_line = line + 1 - self.text_rows();
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(24, 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_store_forces_origin() {
        let store = TextStore::new();
        assert_eq!(Cursor::clamped(&store, 3, 7, 0), Cursor::new(0, 0));
    }

    #[test]
    fn test_clamp_line_and_column() {
        let store = TextStore::from_bytes("abc\nde\nfghij");
        assert_eq!(Cursor::clamped(&store, 9, 9, 0), Cursor::new(2, 5));
        assert_eq!(Cursor::clamped(&store, 1, 9, 0), Cursor::new(1, 2));
        assert_eq!(Cursor::clamped(&store, 0, 3, 0), Cursor::new(0, 3));
    }

    #[test]
    fn test_clamp_is_idempotent() {
        let store = TextStore::from_bytes("abc\nde\n");
        let once = Cursor::clamped(&store, 40, 40, 0);
        let twice = Cursor::clamped(&store, once.line, once.column, once.line);
        assert_eq!(once, twice);
        assert_eq!(once, Cursor::new(2, 0));
    }

    #[test]
    fn test_status_row_reserved() {
        let mut viewport = Viewport::new(5, 1);
        assert_eq!(viewport.text_rows(), 4);
        viewport.follow(3);
        assert_eq!(viewport.first_visible_line, 0);
        // Matches `first = line - height + 2` with one reserved row.
        viewport.follow(4);
        assert_eq!(viewport.first_visible_line, 1);
        viewport.follow(0);
        assert_eq!(viewport.first_visible_line, 0);
    }

    #[test]
    fn test_tiny_viewport_still_shows_cursor_line() {
        let mut viewport = Viewport::new(1, 1);
        viewport.follow(7);
        assert!(viewport.is_visible(7));
        assert_eq!(viewport.first_visible_line, 7);
    }
}
