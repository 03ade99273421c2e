//! Byte gap buffer backing the text store
//!
//! Content lives in `[pre-gap | gap | post-gap]`. Edits at the gap are O(1);
//! moving the gap costs the distance moved, which stays small for the
//! cursor-local editing an interactive session produces.

use std::borrow::Cow;

const INITIAL_GAP_SIZE: usize = 64;
const GAP_GROWTH_FACTOR: usize = 2;

/// A growable byte array with a movable gap
#[derive(Debug, Clone)]
pub struct GapBuffer {
    /// Physical storage: `[pre-gap | gap | post-gap]`
    data: Vec<u8>,
    /// First unused slot
    gap_start: usize,
    /// First used slot after the gap
    gap_end: usize,
}

impl GapBuffer {
    /// Create an empty buffer
    pub fn new() -> Self {
        Self {
            data: vec![0; INITIAL_GAP_SIZE],
            gap_start: 0,
            gap_end: INITIAL_GAP_SIZE,
        }
    }

    /// Create a buffer holding `bytes`, with the gap at the end
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let len = bytes.len();
        let capacity = len + INITIAL_GAP_SIZE;
        let mut data = Vec::with_capacity(capacity);
        data.extend_from_slice(bytes);
        data.resize(capacity, 0);

        Self {
            data,
            gap_start: len,
            gap_end: capacity,
        }
    }

    /// Logical length (excluding the gap)
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len() - self.gap_len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    fn gap_len(&self) -> usize {
        self.gap_end - self.gap_start
    }

    /// Current gap position in logical coordinates
    #[inline]
    pub fn gap_position(&self) -> usize {
        self.gap_start
    }

    /// Move the gap so it starts at logical offset `pos` (clamped to `len`)
    pub fn move_gap_to(&mut self, pos: usize) {
        let pos = pos.min(self.len());

        if pos < self.gap_start {
            let shift = self.gap_start - pos;
            self.data
                .copy_within(pos..self.gap_start, self.gap_end - shift);
            self.gap_start = pos;
            self.gap_end -= shift;
        } else if pos > self.gap_start {
            let shift = pos - self.gap_start;
            self.data
                .copy_within(self.gap_end..self.gap_end + shift, self.gap_start);
            self.gap_start += shift;
            self.gap_end += shift;
        }
    }

    /// Grow the gap in place to hold at least `min_size` bytes.
    ///
    /// The gap start does not move.
    fn ensure_gap(&mut self, min_size: usize) {
        if self.gap_len() >= min_size {
            return;
        }

        let needed = min_size - self.gap_len();
        let growth = needed.max(self.data.len() * GAP_GROWTH_FACTOR);

        let old_len = self.data.len();
        let post_gap_len = old_len - self.gap_end;
        let new_size = old_len + growth;
        self.data.resize(new_size, 0);

        if post_gap_len > 0 {
            self.data
                .copy_within(self.gap_end..old_len, new_size - post_gap_len);
        }
        self.gap_end = new_size - post_gap_len;
    }

    /// Insert `bytes` at logical `offset`. Caller guarantees `offset <= len`.
    pub fn insert(&mut self, offset: usize, bytes: &[u8]) {
        debug_assert!(offset <= self.len());
        if bytes.is_empty() {
            return;
        }
        self.move_gap_to(offset);
        self.ensure_gap(bytes.len());
        self.data[self.gap_start..self.gap_start + bytes.len()].copy_from_slice(bytes);
        self.gap_start += bytes.len();
    }

    /// Remove `n` bytes starting at logical `offset`. Caller guarantees the
    /// span lies inside the content.
    pub fn remove(&mut self, offset: usize, n: usize) {
        debug_assert!(offset + n <= self.len());
        self.move_gap_to(offset);
        self.gap_end += n;
    }

    /// Byte at logical position `pos`
    pub fn byte_at(&self, pos: usize) -> Option<u8> {
        if pos >= self.len() {
            return None;
        }
        let physical = if pos < self.gap_start {
            pos
        } else {
            pos + self.gap_len()
        };
        Some(self.data[physical])
    }

    /// The two contiguous halves of the content, in order
    #[inline]
    pub fn segments(&self) -> (&[u8], &[u8]) {
        (&self.data[..self.gap_start], &self.data[self.gap_end..])
    }

    /// Iterate over every content byte
    pub fn bytes(&self) -> impl Iterator<Item = u8> + '_ {
        let (front, back) = self.segments();
        front.iter().chain(back.iter()).copied()
    }

    /// Bytes in `start..end` (clamped), borrowed when the range does not
    /// straddle the gap
    pub fn slice(&self, start: usize, end: usize) -> Cow<'_, [u8]> {
        let end = end.min(self.len());
        let start = start.min(end);
        let (front, back) = self.segments();

        if end <= front.len() {
            Cow::Borrowed(&front[start..end])
        } else if start >= front.len() {
            Cow::Borrowed(&back[start - front.len()..end - front.len()])
        } else {
            let mut joined = Vec::with_capacity(end - start);
            joined.extend_from_slice(&front[start..]);
            joined.extend_from_slice(&back[..end - front.len()]);
            Cow::Owned(joined)
        }
    }

    /// Copy the whole content out
    pub fn to_vec(&self) -> Vec<u8> {
        let (front, back) = self.segments();
        let mut out = Vec::with_capacity(self.len());
        out.extend_from_slice(front);
        out.extend_from_slice(back);
        out
    }
}

impl Default for GapBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_empty() {
        let buf = GapBuffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.len(), 0);
    }

    #[test]
    fn test_from_bytes() {
        let buf = GapBuffer::from_bytes(b"hello");
        assert_eq!(buf.len(), 5);
        assert_eq!(buf.to_vec(), b"hello");
        assert_eq!(buf.gap_position(), 5);
    }

    #[test]
    fn test_insert_middle() {
        let mut buf = GapBuffer::from_bytes(b"ac");
        buf.insert(1, b"b");
        assert_eq!(buf.to_vec(), b"abc");
    }

    #[test]
    fn test_insert_grows_past_initial_gap() {
        let mut buf = GapBuffer::new();
        let chunk = [b'x'; 100];
        buf.insert(0, &chunk);
        buf.insert(50, b"--");
        assert_eq!(buf.len(), 102);
        assert_eq!(buf.byte_at(50), Some(b'-'));
        assert_eq!(buf.byte_at(101), Some(b'x'));
    }

    #[test]
    fn test_remove_preserves_surroundings() {
        let mut buf = GapBuffer::from_bytes(b"hello world");
        buf.remove(5, 6);
        assert_eq!(buf.to_vec(), b"hello");
        buf.remove(0, 1);
        assert_eq!(buf.to_vec(), b"ello");
    }

    #[test]
    fn test_move_gap_keeps_content() {
        let mut buf = GapBuffer::from_bytes(b"abcdef");
        buf.move_gap_to(3);
        assert_eq!(buf.gap_position(), 3);
        assert_eq!(buf.to_vec(), b"abcdef");
        buf.move_gap_to(0);
        assert_eq!(buf.to_vec(), b"abcdef");
        buf.move_gap_to(100);
        assert_eq!(buf.gap_position(), 6);
    }

    #[test]
    fn test_byte_at_with_gap_in_middle() {
        let mut buf = GapBuffer::from_bytes(b"hello");
        buf.move_gap_to(2);
        let collected: Vec<u8> = (0..5).filter_map(|i| buf.byte_at(i)).collect();
        assert_eq!(collected, b"hello");
        assert_eq!(buf.byte_at(5), None);
    }

    #[test]
    fn test_slice_borrowed_and_owned() {
        let mut buf = GapBuffer::from_bytes(b"hello world");
        buf.move_gap_to(5);
        assert!(matches!(buf.slice(0, 5), Cow::Borrowed(_)));
        assert!(matches!(buf.slice(6, 11), Cow::Borrowed(_)));
        let across = buf.slice(3, 8);
        assert!(matches!(across, Cow::Owned(_)));
        assert_eq!(&*across, b"lo wo");
    }

    #[test]
    fn test_bytes_iterates_both_segments() {
        let mut buf = GapBuffer::from_bytes(b"abc");
        buf.move_gap_to(1);
        assert_eq!(buf.bytes().collect::<Vec<_>>(), b"abc");
    }
}
