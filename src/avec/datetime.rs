//! Timestamps, written as round-trip strings.
//!
//! _Requires Cargo feature `chrono`._

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};

use crate::sans::{ByteSource, Decoder, Encoder, Error};

use super::{Deserialize, Serialize};

impl Serialize for DateTime<Utc> {
    fn serialize(&self, encoder: &mut Encoder) -> Result<(), Error> {
        encoder.write_datetime(self)
    }
}

impl Deserialize for DateTime<Utc> {
    fn deserialize<S: ByteSource>(decoder: &mut Decoder<S>) -> Result<Self, Error> {
        decoder.read_datetime().map(|dt| dt.with_timezone(&Utc))
    }
}

impl Serialize for DateTime<FixedOffset> {
    fn serialize(&self, encoder: &mut Encoder) -> Result<(), Error> {
        encoder.write_datetime(self)
    }
}

impl Deserialize for DateTime<FixedOffset> {
    fn deserialize<S: ByteSource>(decoder: &mut Decoder<S>) -> Result<Self, Error> {
        decoder.read_datetime()
    }
}

impl Serialize for NaiveDateTime {
    fn serialize(&self, encoder: &mut Encoder) -> Result<(), Error> {
        encoder.write_naive_datetime(self)
    }
}

impl Deserialize for NaiveDateTime {
    fn deserialize<S: ByteSource>(decoder: &mut Decoder<S>) -> Result<Self, Error> {
        decoder.read_naive_datetime()
    }
}
