//! Text store - the byte content of one buffer
//!
//! Content is raw bytes: it does not have to be valid UTF-8 and no trailing
//! newline is enforced. Lines are derived from `\n` delimiters on demand.
//! The only crossing points other modules use are [`TextStore::line`],
//! [`TextStore::offset_of`], [`TextStore::write_at`],
//! [`TextStore::delete_range`], [`TextStore::len`] and
//! [`TextStore::line_count`], so the gap buffer underneath can be swapped
//! without touching cursor, mode or interpreter code.

use std::borrow::Cow;
use std::cell::OnceCell;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use super::gap_buffer::GapBuffer;
use super::line_index::LineIndex;
use crate::error::{EditorError, Result};

/// The content of one buffer plus the file it came from
#[derive(Debug, Clone, Default)]
pub struct TextStore {
    buffer: GapBuffer,
    /// File this buffer loads from and saves to by default
    name: Option<PathBuf>,
    /// Whether the content changed since the last load or save
    modified: bool,
    /// Newline positions, rebuilt lazily after every mutation
    index: OnceCell<LineIndex>,
}

impl TextStore {
    /// Create an empty, unnamed store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `bytes`
    pub fn from_bytes(bytes: impl AsRef<[u8]>) -> Self {
        Self {
            buffer: GapBuffer::from_bytes(bytes.as_ref()),
            ..Self::default()
        }
    }

    /// Create an empty store that will save to `path`
    pub fn with_name(path: impl Into<PathBuf>) -> Self {
        Self {
            name: Some(path.into()),
            ..Self::default()
        }
    }

    /// Read a whole file into a fresh store named after it
    pub fn load_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut store = Self::with_name(path);
        let file = File::open(path).map_err(|e| EditorError::io(path, e))?;
        store.load(file)?;
        tracing::info!(path = %path.display(), bytes = store.len(), "loaded file");
        Ok(store)
    }

    /// Replace the content wholesale with everything `reader` yields
    pub fn load<R: Read>(&mut self, mut reader: R) -> Result<()> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|e| EditorError::io(self.display_path(), e))?;
        self.buffer = GapBuffer::from_bytes(&bytes);
        self.modified = false;
        self.invalidate();
        Ok(())
    }

    // ========================================================================
    // Reading
    // ========================================================================

    /// Total byte length
    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Number of lines: newlines + 1 for non-empty content, 0 when empty.
    ///
    /// A final line without a trailing delimiter counts, and so does the
    /// empty line after a trailing `\n`.
    pub fn line_count(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.index().newline_count() + 1
        }
    }

    /// Line `n` (0-indexed) including its trailing `\n`, if it has one
    pub fn line(&self, n: usize) -> Result<Cow<'_, [u8]>> {
        let line_count = self.line_count();
        if n >= line_count {
            return Err(EditorError::LineOutOfRange {
                line: n,
                line_count,
            });
        }

        let index = self.index();
        let start = index.line_start(n).unwrap_or(0);
        let end = index
            .nth_newline(n)
            .map_or(self.len(), |newline| newline + 1);
        Ok(self.buffer.slice(start, end))
    }

    /// Length of line `n` excluding its trailing `\n`
    pub fn line_len(&self, n: usize) -> Result<usize> {
        let line = self.line(n)?;
        Ok(match line.last() {
            Some(b'\n') => line.len() - 1,
            _ => line.len(),
        })
    }

    /// Byte offset of `(line, column)`.
    ///
    /// The column is added as-is; clamping it to the line is the cursor's
    /// job. Fails when the newline that would precede `line` does not exist.
    pub fn offset_of(&self, line: usize, column: usize) -> Result<usize> {
        self.index()
            .line_start(line)
            .map(|start| start + column)
            .ok_or_else(|| EditorError::LineOutOfRange {
                line,
                line_count: self.line_count(),
            })
    }

    /// Line and column of byte `offset` (clamped to the content)
    pub fn position_of(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.len());
        let index = self.index();
        let line = index.line_at_offset(offset);
        let start = index.line_start(line).unwrap_or(0);
        (line, offset - start)
    }

    /// Byte at `offset`
    #[inline]
    pub fn byte_at(&self, offset: usize) -> Option<u8> {
        self.buffer.byte_at(offset)
    }

    /// Copy of the full content
    pub fn contents(&self) -> Vec<u8> {
        self.buffer.to_vec()
    }

    // ========================================================================
    // Editing
    // ========================================================================

    /// Splice `bytes` in at `offset` (insertion, never overwrite)
    pub fn write_at(&mut self, bytes: &[u8], offset: usize) -> Result<()> {
        if offset > self.len() {
            return Err(EditorError::InvalidRange {
                offset,
                len: bytes.len(),
                buffer_len: self.len(),
            });
        }
        if bytes.is_empty() {
            return Ok(());
        }

        self.buffer.insert(offset, bytes);
        self.touch();
        Ok(())
    }

    /// Remove `n` bytes starting at `offset`
    pub fn delete_range(&mut self, n: usize, offset: usize) -> Result<()> {
        let in_bounds = offset
            .checked_add(n)
            .is_some_and(|end| end <= self.len());
        if !in_bounds {
            return Err(EditorError::InvalidRange {
                offset,
                len: n,
                buffer_len: self.len(),
            });
        }
        if n == 0 {
            return Ok(());
        }

        self.buffer.remove(offset, n);
        self.touch();
        Ok(())
    }

    // ========================================================================
    // Persistence
    // ========================================================================

    /// File this store is associated with
    pub fn name(&self) -> Option<&Path> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, path: impl Into<PathBuf>) {
        self.name = Some(path.into());
    }

    /// Whether there are unsaved changes
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Stream the full content into `writer`.
    ///
    /// `write_all` retries short writes until every byte is accepted or the
    /// writer reports an error.
    pub fn write_to<W: Write>(&self, mut writer: W) -> std::io::Result<()> {
        let (front, back) = self.buffer.segments();
        writer.write_all(front)?;
        writer.write_all(back)?;
        writer.flush()
    }

    /// Write the content to `path`, or to the store's own name when `None`
    pub fn save(&mut self, path: Option<&Path>) -> Result<()> {
        let target = path
            .or(self.name.as_deref())
            .ok_or(EditorError::NoPath)?
            .to_path_buf();

        let file = File::create(&target).map_err(|e| EditorError::io(&target, e))?;
        self.write_to(BufWriter::new(file))
            .map_err(|e| EditorError::io(&target, e))?;

        if self.name.is_none() {
            self.name = Some(target.clone());
        }
        if self.name.as_deref() == Some(target.as_path()) {
            self.modified = false;
        }
        tracing::info!(path = %target.display(), bytes = self.len(), "saved buffer");
        Ok(())
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn index(&self) -> &LineIndex {
        self.index.get_or_init(|| LineIndex::build(self.buffer.bytes()))
    }

    fn invalidate(&mut self) {
        self.index.take();
    }

    fn touch(&mut self) {
        self.modified = true;
        self.invalidate();
    }

    fn display_path(&self) -> PathBuf {
        self.name.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "This is a line\nThis is line 2\nThis is line 3";

    #[test]
    fn test_line_count_rules() {
        assert_eq!(TextStore::new().line_count(), 0);
        assert_eq!(TextStore::from_bytes("abc").line_count(), 1);
        assert_eq!(TextStore::from_bytes("abc\n").line_count(), 2);
        assert_eq!(TextStore::from_bytes(SAMPLE).line_count(), 3);
    }

    #[test]
    fn test_line_keeps_trailing_newline() {
        let store = TextStore::from_bytes(SAMPLE);
        assert_eq!(&*store.line(0).unwrap(), b"This is a line\n");
        assert_eq!(&*store.line(2).unwrap(), b"This is line 3");
        assert!(matches!(
            store.line(5),
            Err(EditorError::LineOutOfRange { line: 5, .. })
        ));
    }

    #[test]
    fn test_empty_final_line_after_newline() {
        let store = TextStore::from_bytes("abc\n");
        assert_eq!(&*store.line(1).unwrap(), b"");
        assert_eq!(store.line_len(0).unwrap(), 3);
    }

    #[test]
    fn test_offset_of() {
        let store = TextStore::from_bytes(SAMPLE);
        assert_eq!(store.offset_of(0, 4).unwrap(), 4);
        assert_eq!(store.offset_of(1, 0).unwrap(), 15);
        assert_eq!(store.offset_of(2, 3).unwrap(), 33);
        assert!(store.offset_of(3, 0).is_err());
    }

    #[test]
    fn test_write_at_invalidates_line_cache() {
        let mut store = TextStore::from_bytes("ab");
        assert_eq!(store.line_count(), 1);
        store.write_at(b"\n", 1).unwrap();
        assert_eq!(store.line_count(), 2);
        assert_eq!(&*store.line(1).unwrap(), b"b");
        assert!(store.is_modified());
    }

    #[test]
    fn test_write_past_end_is_invalid_range() {
        let mut store = TextStore::from_bytes("ab");
        assert!(matches!(
            store.write_at(b"x", 3),
            Err(EditorError::InvalidRange { offset: 3, .. })
        ));
        assert_eq!(store.contents(), b"ab");
    }

    #[test]
    fn test_delete_out_of_bounds_is_recoverable() {
        let mut store = TextStore::from_bytes("abc");
        assert!(store.delete_range(2, 2).is_err());
        assert!(store.delete_range(usize::MAX, 1).is_err());
        assert_eq!(store.contents(), b"abc");
        store.delete_range(2, 1).unwrap();
        assert_eq!(store.contents(), b"a");
    }

    #[test]
    fn test_position_of() {
        let store = TextStore::from_bytes(SAMPLE);
        assert_eq!(store.position_of(0), (0, 0));
        assert_eq!(store.position_of(15), (1, 0));
        assert_eq!(store.position_of(17), (1, 2));
    }

    #[test]
    fn test_load_replaces_content() {
        let mut store = TextStore::from_bytes("old\nstuff");
        store.write_at(b"x", 0).unwrap();
        store.load(&b"new"[..]).unwrap();
        assert_eq!(store.contents(), b"new");
        assert_eq!(store.line_count(), 1);
        assert!(!store.is_modified());
    }

    #[test]
    fn test_non_utf8_content_is_kept() {
        let store = TextStore::from_bytes([0xff, b'\n', 0xfe]);
        assert_eq!(store.line_count(), 2);
        assert_eq!(&*store.line(1).unwrap(), &[0xfe]);
    }

    #[test]
    fn test_save_without_name_fails() {
        let mut store = TextStore::from_bytes("abc");
        assert!(matches!(store.save(None), Err(EditorError::NoPath)));
    }
}
