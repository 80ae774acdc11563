use crate::pool::{BufferPool, PooledBuffer};
use crate::source::SourceText;

/// Default window capacity in chars.
pub const DEFAULT_WINDOW_SIZE: usize = 16 * 1024;

/// A fixed-capacity, relocatable view over a much larger [`SourceText`].
///
/// Only `len` chars starting at `start` are resident at any time. Lookups
/// outside that range require a [`fill`](Self::fill) that re-centres the window
/// on the requested index.
#[derive(Debug)]
pub struct WindowedBuffer<'p> {
    buf: PooledBuffer<'p, char>,
    start: usize,
    len: usize,
}

impl<'p> WindowedBuffer<'p> {
    /// Rent a window able to hold `capacity` chars. The window starts empty.
    pub fn new(pool: &'p BufferPool<char>, capacity: usize) -> Self {
        assert!(capacity > 0, "window capacity must be at least one char");
        Self {
            buf: pool.rent(capacity),
            start: 0,
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.start + self.len
    }

    /// Re-centre the window so that `center` sits near its midpoint, clamped to
    /// the bounds of `source`, and copy that slice in.
    pub fn fill(&mut self, source: &SourceText<'_>, center: usize) {
        assert!(
            center < source.len(),
            "index {center} outside text of {} chars",
            source.len()
        );

        let len = self.capacity().min(source.len());
        let start = center
            .saturating_sub(len / 2)
            .min(source.len() - len);

        source.copy_chars(start, &mut self.buf[..len]);
        self.start = start;
        self.len = len;
        tracing::trace!(start, len, center, "window refilled");
    }

    /// Char at absolute `index`, which must be resident.
    pub fn get(&self, index: usize) -> char {
        debug_assert!(
            self.contains(index),
            "index {index} outside window [{}..{})",
            self.start,
            self.start + self.len
        );
        self.buf[index - self.start]
    }

    /// Char at absolute `index`, refilling from `source` when needed.
    pub fn get_or_fill(&mut self, source: &SourceText<'_>, index: usize) -> char {
        if !self.contains(index) {
            self.fill(source, index);
        }
        self.get(index)
    }
}
