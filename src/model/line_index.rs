//! Newline index for a text store
//!
//! Lines are never stored; they are derived from the positions of `\n`
//! bytes. The index caches those positions in ascending order so line
//! starts resolve in O(1) instead of scanning from the top of the buffer.

/// Sorted byte offsets of every `\n` in the content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineIndex {
    newlines: Vec<usize>,
}

impl LineIndex {
    /// Scan `bytes` once and record every newline offset
    pub fn build<I>(bytes: I) -> Self
    where
        I: IntoIterator<Item = u8>,
    {
        let newlines = bytes
            .into_iter()
            .enumerate()
            .filter_map(|(i, b)| (b == b'\n').then_some(i))
            .collect();
        Self { newlines }
    }

    /// Number of `\n` bytes in the content
    #[inline]
    pub fn newline_count(&self) -> usize {
        self.newlines.len()
    }

    /// Offset of the `n`-th newline (0-indexed)
    #[inline]
    pub fn nth_newline(&self, n: usize) -> Option<usize> {
        self.newlines.get(n).copied()
    }

    /// Offset of the first byte of `line`, if its preceding newline exists
    pub fn line_start(&self, line: usize) -> Option<usize> {
        match line {
            0 => Some(0),
            _ => self.nth_newline(line - 1).map(|nl| nl + 1),
        }
    }

    /// Line containing byte `offset`
    pub fn line_at_offset(&self, offset: usize) -> usize {
        // A newline belongs to the line it terminates.
        self.newlines.partition_point(|&nl| nl < offset)
    }
}
