//! Pane - a text store with its own cursor and viewport
//!
//! A view owns two panes: the main buffer and the one-line tag. Every
//! motion and edit goes through the clamp-and-scroll path in
//! [`Pane::set_cursor`]; there is no unchecked relative move.

use super::cursor::{Cursor, Viewport};
use super::text_store::TextStore;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct Pane {
    pub store: TextStore,
    pub cursor: Cursor,
    pub viewport: Viewport,
    /// Tag panes fold newlines into spaces so they stay one line
    single_line: bool,
}

impl Pane {
    pub fn new(store: TextStore, viewport: Viewport) -> Self {
        Self {
            store,
            cursor: Cursor::default(),
            viewport,
            single_line: false,
        }
    }

    /// A one-line pane preloaded with `text`
    pub fn single_line(text: &str) -> Self {
        let text = text.replace('\n', " ");
        Self {
            store: TextStore::from_bytes(text),
            cursor: Cursor::default(),
            viewport: Viewport::new(1, 0),
            single_line: true,
        }
    }

    pub fn is_single_line(&self) -> bool {
        self.single_line
    }

    // ========================================================================
    // Motion
    // ========================================================================

    /// Move to an absolute position, clamped to the store, then scroll so
    /// the cursor line stays visible
    pub fn set_cursor(&mut self, line: usize, column: usize) {
        self.cursor = Cursor::clamped(&self.store, line, column, self.cursor.line);
        self.viewport.follow(self.cursor.line);
        tracing::trace!(
            line = self.cursor.line,
            column = self.cursor.column,
            top = self.viewport.first_visible_line,
            "cursor set"
        );
    }

    /// Move relative to the current position
    pub fn move_cursor(&mut self, delta_column: isize, delta_line: isize) {
        let line = self.cursor.line.saturating_add_signed(delta_line);
        let column = self.cursor.column.saturating_add_signed(delta_column);
        self.set_cursor(line, column);
    }

    pub fn line_start(&mut self) {
        self.set_cursor(self.cursor.line, 0);
    }

    pub fn line_end(&mut self) {
        self.set_cursor(self.cursor.line, usize::MAX);
    }

    pub fn document_start(&mut self) {
        self.set_cursor(0, 0);
    }

    pub fn document_end(&mut self) {
        self.set_cursor(usize::MAX, usize::MAX);
    }

    pub fn page_up(&mut self) {
        let rows = self.viewport.text_rows();
        self.set_cursor(self.cursor.line.saturating_sub(rows), self.cursor.column);
    }

    pub fn page_down(&mut self) {
        let rows = self.viewport.text_rows();
        self.set_cursor(self.cursor.line.saturating_add(rows), self.cursor.column);
    }

    /// Re-clamp after the store changed underneath the cursor
    pub fn reclamp(&mut self) {
        self.set_cursor(self.cursor.line, self.cursor.column);
    }

    // ========================================================================
    // Editing
    // ========================================================================

    /// Byte offset of the cursor
    pub fn cursor_offset(&self) -> Result<usize> {
        self.store.offset_of(self.cursor.line, self.cursor.column)
    }

    /// Insert `bytes` at the cursor without moving it
    pub fn insert(&mut self, bytes: &[u8]) -> Result<()> {
        let offset = self.cursor_offset()?;
        if self.single_line {
            let folded: Vec<u8> = bytes
                .iter()
                .map(|&b| if b == b'\n' { b' ' } else { b })
                .collect();
            self.store.write_at(&folded, offset)
        } else {
            self.store.write_at(bytes, offset)
        }
    }

    /// Insert one byte and step past it
    pub fn insert_byte(&mut self, byte: u8) -> Result<()> {
        self.insert(&[byte])?;
        self.move_cursor(1, 0);
        Ok(())
    }

    /// Insert a line feed and land on column 0 of the new line
    pub fn insert_newline(&mut self) -> Result<()> {
        self.insert(b"\n")?;
        if self.single_line {
            self.move_cursor(1, 0);
        } else {
            self.set_cursor(self.cursor.line + 1, 0);
        }
        Ok(())
    }

    /// Delete the byte behind the cursor and step back onto its position.
    ///
    /// At column 0 this joins the line with the previous one and the cursor
    /// lands where the removed newline was.
    pub fn delete_backward(&mut self) -> Result<()> {
        let offset = self.cursor_offset()?;
        if offset == 0 {
            return Ok(());
        }
        self.store.delete_range(1, offset - 1)?;
        let (line, column) = self.store.position_of(offset - 1);
        self.set_cursor(line, column);
        Ok(())
    }

    /// Delete the byte under the cursor
    pub fn delete_forward(&mut self) -> Result<()> {
        let offset = self.cursor_offset()?;
        if offset >= self.store.len() {
            return Ok(());
        }
        self.store.delete_range(1, offset)?;
        self.reclamp();
        Ok(())
    }

    /// The whitespace-delimited token on the cursor line that contains the
    /// cursor column
    pub fn token_under_cursor(&self) -> Result<String> {
        if self.store.is_empty() {
            return Ok(String::new());
        }
        let line = self.store.line(self.cursor.line)?;
        let token = token_at(&line, self.cursor.column);
        Ok(String::from_utf8_lossy(token).into_owned())
    }
}

/// Slice of `line` between the last whitespace before `column` and the
/// first whitespace at or after it (or the end of the line).
///
/// Whitespace is Unicode whitespace in the UTF-8 parts of the line; bytes
/// that are not valid UTF-8 always belong to the token.
pub fn token_at(line: &[u8], column: usize) -> &[u8] {
    let column = column.min(line.len());
    let mut start = 0;
    let mut end = line.len();

    for (at, len) in whitespace_spans(line) {
        if at + len <= column {
            start = at + len;
        } else if at >= column {
            end = at;
            break;
        }
    }
    &line[start.min(end)..end]
}

/// Byte offset and length of every whitespace character in `line`
fn whitespace_spans(line: &[u8]) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut offset = 0;
    for chunk in line.utf8_chunks() {
        let valid = chunk.valid();
        spans.extend(
            valid
                .char_indices()
                .filter(|(_, c)| c.is_whitespace())
                .map(|(i, c)| (offset + i, c.len_utf8())),
        );
        offset += valid.len() + chunk.invalid().len();
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pane(text: &str) -> Pane {
        Pane::new(TextStore::from_bytes(text), Viewport::new(10, 1))
    }

    #[test]
    fn test_token_at() {
        assert_eq!(token_at(b"save quit", 0), b"save");
        assert_eq!(token_at(b"save quit", 2), b"save");
        assert_eq!(token_at(b"save quit", 6), b"quit");
        assert_eq!(token_at(b"save quit", 9), b"quit");
        assert_eq!(token_at(b"  ls\n", 3), b"ls");
        assert_eq!(token_at(b" x", 0), b"");
    }

    #[test]
    fn test_token_at_unicode_whitespace() {
        let line = "save\u{a0}quit\u{2003}ls".as_bytes();
        assert_eq!(token_at(line, 0), b"save");
        assert_eq!(token_at(line, 7), b"quit");
        assert_eq!(token_at(line, line.len()), b"ls");
        // Multi-byte letters are not separators
        assert_eq!(token_at("caf\u{e9} x".as_bytes(), 1), "caf\u{e9}".as_bytes());
    }

    #[test]
    fn test_token_at_keeps_invalid_bytes() {
        let line = [b'a', 0xff, b'b', b' ', b'c'];
        assert_eq!(token_at(&line, 1), &[b'a', 0xff, b'b']);
        assert_eq!(token_at(&line, 4), b"c");
    }

    #[test]
    fn test_move_clamps_negative_deltas() {
        let mut p = pane("abc\ndef");
        p.move_cursor(-5, -5);
        assert_eq!(p.cursor, Cursor::new(0, 0));
    }

    #[test]
    fn test_delete_backward_joins_lines() {
        let mut p = pane("ab\ncd");
        p.set_cursor(1, 0);
        p.delete_backward().unwrap();
        assert_eq!(p.store.contents(), b"abcd");
        assert_eq!(p.cursor, Cursor::new(0, 2));
    }

    #[test]
    fn test_delete_backward_at_origin_is_noop() {
        let mut p = pane("ab");
        p.delete_backward().unwrap();
        assert_eq!(p.store.contents(), b"ab");
        assert!(!p.store.is_modified());
    }

    #[test]
    fn test_single_line_folds_newlines() {
        let mut tag = Pane::single_line("save");
        tag.line_end();
        tag.insert(b"\nquit\n").unwrap();
        assert_eq!(tag.store.contents(), b"save quit ");
        assert_eq!(tag.store.line_count(), 1);
    }

    #[test]
    fn test_page_down_moves_by_text_rows() {
        let text = (0..30).map(|i| format!("l{i}\n")).collect::<String>();
        let mut p = pane(&text);
        p.page_down();
        assert_eq!(p.cursor.line, 9);
        p.page_up();
        assert_eq!(p.cursor.line, 0);
    }
}
