//! Buffered input for the decoder.

use super::Error;

/// A cursor over buffered input bytes.
///
/// Decoding inspects [`span`](Self::span) directly, and only asks for a refill
/// when the span is too short for the value being read.
pub trait ByteSource {
    /// Currently buffered, unconsumed bytes.
    ///
    /// The span may be shorter than a pending read. Callers must check its
    /// length and call [`fill_buffer`](Self::fill_buffer) before reading past
    /// it.
    fn span(&self) -> &[u8];

    /// Ensure at least `n` bytes are buffered.
    ///
    /// Returns `false` if the input ends before `n` bytes are available.
    fn fill_buffer(&mut self, n: usize) -> Result<bool, Error>;

    /// Consume the first `n` bytes of the span, returning them.
    ///
    /// Panics if `n` exceeds the length of the span.
    fn advance(&mut self, n: usize) -> &[u8];
}

impl<T: ByteSource + ?Sized> ByteSource for &mut T {
    fn span(&self) -> &[u8] {
        (**self).span()
    }

    fn fill_buffer(&mut self, n: usize) -> Result<bool, Error> {
        (**self).fill_buffer(n)
    }

    fn advance(&mut self, n: usize) -> &[u8] {
        (**self).advance(n)
    }
}

/// A source reading from a slice held entirely in memory.
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> SliceSource<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0 }
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> &'a [u8] {
        &self.data[self.position..]
    }
}

impl ByteSource for SliceSource<'_> {
    #[inline]
    fn span(&self) -> &[u8] {
        &self.data[self.position..]
    }

    fn fill_buffer(&mut self, n: usize) -> Result<bool, Error> {
        // Everything is already buffered.
        Ok(self.data.len() - self.position >= n)
    }

    #[inline]
    fn advance(&mut self, n: usize) -> &[u8] {
        let start = self.position;
        let end = start + n;
        assert!(end <= self.data.len(), "advanced past the end of the span");

        self.position = end;
        &self.data[start..end]
    }
}
