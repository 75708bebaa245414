//! Growable output for the encoder.

use core::ops::{Deref, DerefMut};

use alloc::{vec, vec::Vec};

const MIN_GROWTH: usize = 64;

/// An append-only buffer with a logical length.
///
/// Storage past the logical length is scratch space, handed out through
/// [`append_span`](Self::append_span) and only counted once committed.
#[derive(Debug, Default, Clone)]
pub struct ScratchBuffer {
    storage: Vec<u8>,
    len: usize,
}

impl ScratchBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: vec![0; capacity],
            len: 0,
        }
    }

    /// Append a single byte.
    #[inline]
    pub fn push(&mut self, b: u8) {
        self.reserve(1);
        self.storage[self.len] = b;
        self.len += 1;
    }

    /// Append a slice of bytes.
    pub fn extend_from_slice(&mut self, bytes: &[u8]) {
        let mut span = self.append_span(bytes.len());
        span[..bytes.len()].copy_from_slice(bytes);
        span.commit(bytes.len());
    }

    /// Reserve a writable window of at least `n` bytes at the logical length.
    ///
    /// Nothing written to the window counts until
    /// [`AppendSpan::commit`] is called. Dropping the window without
    /// committing leaves the buffer unchanged.
    pub fn append_span(&mut self, n: usize) -> AppendSpan<'_> {
        self.reserve(n);
        AppendSpan { buffer: self }
    }

    /// Number of bytes written.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Discard written bytes, keeping storage for reuse.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.storage[..self.len]
    }

    /// Take the written bytes.
    pub fn into_vec(mut self) -> Vec<u8> {
        self.storage.truncate(self.len);
        self.storage
    }

    fn reserve(&mut self, n: usize) {
        let required = self.len + n;

        if required > self.storage.len() {
            let grown = (self.storage.len() * 2).max(required).max(MIN_GROWTH);
            self.storage.resize(grown, 0);
        }
    }
}

/// A writable window past the end of a [`ScratchBuffer`].
///
/// Dereferences to every byte of spare storage, which is at least as long as
/// requested.
#[derive(Debug)]
pub struct AppendSpan<'a> {
    buffer: &'a mut ScratchBuffer,
}

impl AppendSpan<'_> {
    /// Count the first `used` bytes of the window as written.
    pub fn commit(self, used: usize) {
        let len = self.buffer.len + used;
        assert!(len <= self.buffer.storage.len(), "committed past the window");
        self.buffer.len = len;
    }
}

impl Deref for AppendSpan<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.buffer.storage[self.buffer.len..]
    }
}

impl DerefMut for AppendSpan<'_> {
    fn deref_mut(&mut self) -> &mut [u8] {
        &mut self.buffer.storage[self.buffer.len..]
    }
}
