//! Slice-based entry points.

use alloc::vec::Vec;

use tracing::{debug, trace};

use crate::sans::{Decoder, Encoder, Error, SliceSource};

use super::{Deserialize, Serialize};

/// Decode one value from a slice holding exactly that value.
///
/// Bytes left over after the value are an error.
///
/// This method is also re-exported as `cassette::avec::decode_slice`.
pub fn decode<T: Deserialize>(r: &[u8]) -> Result<T, Error> {
    trace!(len = r.len(), "decoding from slice");

    let mut decoder = Decoder::new(SliceSource::new(r))?;

    let value = decoder.read_value().inspect_err(|err| {
        debug!(%err, position = decoder.source().position(), "decoding failed");
    })?;

    let rest = decoder.source().remaining().len();
    if rest != 0 {
        debug!(rest, "trailing bytes after value");
        Err(Error::TrailingBytes(rest))?;
    }

    Ok(value)
}

/// Encode one value into a new vector.
///
/// This method is also re-exported as `cassette::avec::encode_vec`.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, Error> {
    let mut encoder = Encoder::new();

    encoder.write_value(value).inspect_err(|err| {
        debug!(%err, "encoding failed");
    })?;

    trace!(len = encoder.as_bytes().len(), "encoded to vector");
    Ok(encoder.into_vec())
}

