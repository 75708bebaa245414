//! Reader- and writer-based entry points.
//!
//! _Requires Cargo feature `std`._

use std::{
    io::{ErrorKind, Read, Write},
    vec,
    vec::Vec,
};

use tracing::{debug, trace};

use crate::sans::{ByteSource, Decoder, Encoder, Error};

use super::{Deserialize, Serialize};

/// Default size of a [`ReaderSource`]'s buffer.
const DEFAULT_CAPACITY: usize = 8 * 1024;

/// A source buffering input from a reader.
///
/// The buffer is refilled on demand. Consumed bytes are discarded by shifting
/// the unconsumed tail to the front, and the buffer grows when a single value
/// needs more room than it has.
#[derive(Debug)]
pub struct ReaderSource<R> {
    reader: R,
    buf: Vec<u8>,
    start: usize,
    end: usize,
    consumed: usize,
}

impl<R: Read> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self::with_capacity(DEFAULT_CAPACITY, reader)
    }

    pub fn with_capacity(capacity: usize, reader: R) -> Self {
        Self {
            reader,
            buf: vec![0; capacity.max(1)],
            start: 0,
            end: 0,
            consumed: 0,
        }
    }

    /// Number of bytes consumed so far.
    pub fn position(&self) -> usize {
        self.consumed
    }

    /// Recover the reader. Buffered, unconsumed bytes are lost.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {
    #[inline]
    fn span(&self) -> &[u8] {
        &self.buf[self.start..self.end]
    }

    fn fill_buffer(&mut self, n: usize) -> Result<bool, Error> {
        if self.end - self.start >= n {
            return Ok(true);
        }

        // Compact.
        self.buf.copy_within(self.start..self.end, 0);
        self.end -= self.start;
        self.start = 0;

        // Grow only as far as the bytes actually received, so a hostile
        // length cannot force a huge allocation up front.
        while self.end < n {
            if self.end == self.buf.len() {
                let grown = (self.buf.len() * 2).min(n.max(self.buf.len() + 1));
                self.buf.resize(grown, 0);
            }

            match self.reader.read(&mut self.buf[self.end..]) {
                Ok(0) => return Ok(false),
                Ok(read) => {
                    trace!(read, buffered = self.end + read, wanted = n, "refilled");
                    self.end += read;
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => Err(err)?,
            }
        }

        Ok(true)
    }

    #[inline]
    fn advance(&mut self, n: usize) -> &[u8] {
        let start = self.start;
        assert!(start + n <= self.end, "advanced past the end of the span");

        self.start += n;
        self.consumed += n;
        &self.buf[start..start + n]
    }
}

/// Decode one value from a reader.
///
/// The reader may be read past the end of the value, as input is buffered.
///
/// This method is also re-exported as `cassette::avec::decode_reader`.
///
/// _Requires Cargo feature `std`._
pub fn decode<T: Deserialize>(r: &mut impl Read) -> Result<T, Error> {
    trace!("decoding from reader");

    let mut decoder = Decoder::new(ReaderSource::new(r))?;

    let value = decoder.read_value().inspect_err(|err| {
        debug!(%err, position = decoder.source().position(), "decoding failed");
    })?;

    trace!(consumed = decoder.source().position(), "decoded from reader");
    Ok(value)
}

/// Encode one value, writing it to a writer in full.
///
/// This method is also re-exported as `cassette::avec::encode_writer`.
///
/// _Requires Cargo feature `std`._
pub fn encode<T: Serialize + ?Sized>(w: &mut impl Write, value: &T) -> Result<(), Error> {
    let mut encoder = Encoder::new();

    encoder.write_value(value).inspect_err(|err| {
        debug!(%err, "encoding failed");
    })?;

    trace!(len = encoder.as_bytes().len(), "writing encoded value");
    w.write_all(encoder.as_bytes())?;
    Ok(())
}
