use std::ops::{Deref, DerefMut};
use std::sync::{Mutex, PoisonError};

/// Buffers kept around for reuse per pool.
const MAX_RETAINED_BUFFERS: usize = 16;
/// Buffers larger than this are dropped instead of returned.
const MAX_RETAINED_LEN: usize = 1 << 20;

/// Window storage for char-granularity diffing.
pub(crate) static CHAR_POOL: BufferPool<char> = BufferPool::new();
/// Forward and reverse furthest-reaching vectors of the Myers search.
pub(crate) static INDEX_POOL: BufferPool<usize> = BufferPool::new();

/// A pool of scratch buffers shared between diff invocations.
///
/// Each rented buffer is owned exclusively by its [`PooledBuffer`] until it is
/// dropped, so concurrent diffs never observe each other's scratch memory.
#[derive(Debug)]
pub struct BufferPool<T> {
    free: Mutex<Vec<Vec<T>>>,
}

impl<T: Copy + Default> BufferPool<T> {
    pub const fn new() -> Self {
        Self {
            free: Mutex::new(Vec::new()),
        }
    }

    /// Rent a buffer of exactly `len` default-initialised elements.
    pub fn rent(&self, len: usize) -> PooledBuffer<'_, T> {
        let reused = {
            let mut free = self.free.lock().unwrap_or_else(PoisonError::into_inner);
            match free.iter().position(|buf| buf.capacity() >= len) {
                Some(index) => Some(free.swap_remove(index)),
                None => free.pop(),
            }
        };

        let mut buf = reused.unwrap_or_default();
        buf.clear();
        buf.resize(len, T::default());
        PooledBuffer { pool: self, buf }
    }

    /// Number of idle buffers currently held by the pool.
    pub fn idle(&self) -> usize {
        self.free
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    fn give_back(&self, buf: Vec<T>) {
        if buf.capacity() > MAX_RETAINED_LEN {
            return;
        }
        let mut free = self.free.lock().unwrap_or_else(PoisonError::into_inner);
        if free.len() < MAX_RETAINED_BUFFERS {
            free.push(buf);
        }
    }
}

impl<T: Copy + Default> Default for BufferPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// A buffer checked out of a [`BufferPool`]; returned on drop.
#[derive(Debug)]
pub struct PooledBuffer<'p, T: Copy + Default> {
    pool: &'p BufferPool<T>,
    buf: Vec<T>,
}

impl<T: Copy + Default> Deref for PooledBuffer<'_, T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.buf
    }
}

impl<T: Copy + Default> DerefMut for PooledBuffer<'_, T> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.buf
    }
}

impl<T: Copy + Default> Drop for PooledBuffer<'_, T> {
    fn drop(&mut self) {
        self.pool.give_back(std::mem::take(&mut self.buf));
    }
}
