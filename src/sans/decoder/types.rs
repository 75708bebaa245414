//! Readers scoped to a single structured value.

use alloc::string::String;
use either::Either::{self, Left, Right};

use crate::avec::Deserialize;
use crate::sans::{ByteSource, Error, Kind, TypeInfo};

use super::Decoder;

/// A reader for a structured value, chosen by the kind of its descriptor.
#[derive(Debug)]
pub enum TypeReader<'a, S> {
    Collection(CollectionReader<'a, S>),
    Enum(EnumReader<'a, S>),
    Record(RecordReader<'a, S>),
}

/// Reader for the members of a list or dictionary.
///
/// Dictionaries are read as interleaved keys and values, so a dictionary of
/// `n` entries holds `2n` members.
#[derive(Debug)]
pub struct CollectionReader<'a, S> {
    decoder: &'a mut Decoder<S>,
    info: &'static TypeInfo,
    remaining: usize,
}

impl<'a, S: ByteSource> CollectionReader<'a, S> {
    pub(super) fn new(decoder: &'a mut Decoder<S>, info: &'static TypeInfo, slots: usize) -> Self {
        Self {
            decoder,
            info,
            remaining: slots,
        }
    }

    pub fn info(&self) -> &'static TypeInfo {
        self.info
    }

    /// Number of elements (or entries, for dictionaries) left to read.
    pub fn len(&self) -> usize {
        match self.info.kind() {
            Kind::Dictionary => self.remaining / 2,
            _ => self.remaining,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.remaining == 0
    }

    /// Read the next member, or `None` once all declared members are read.
    pub fn next_element<T: Deserialize>(&mut self) -> Result<Option<T>, Error> {
        if self.remaining == 0 {
            return Ok(None);
        }

        self.remaining -= 1;
        T::deserialize(&mut *self.decoder).map(Some)
    }

    /// Read the next key and value of a dictionary.
    pub fn next_entry<K: Deserialize, V: Deserialize>(&mut self) -> Result<Option<(K, V)>, Error> {
        self.info.expect(Kind::Dictionary)?;

        if self.remaining < 2 {
            return Ok(None);
        }

        self.remaining -= 2;
        let key = K::deserialize(&mut *self.decoder)?;
        let value = V::deserialize(&mut *self.decoder)?;

        Ok(Some((key, value)))
    }
}

/// Reader for a record's fields, in whatever order they appear on the wire.
#[derive(Debug)]
pub struct RecordReader<'a, S> {
    decoder: &'a mut Decoder<S>,
    info: &'static TypeInfo,
    remaining: usize,
}

impl<'a, S: ByteSource> RecordReader<'a, S> {
    pub(super) fn new(decoder: &'a mut Decoder<S>, info: &'static TypeInfo, len: usize) -> Self {
        Self {
            decoder,
            info,
            remaining: len,
        }
    }

    pub fn info(&self) -> &'static TypeInfo {
        self.info
    }

    /// Number of fields left on the wire.
    pub fn len(&self) -> usize {
        self.remaining
    }

    pub fn is_empty(&self) -> bool {
        self.remaining == 0
    }

    /// Read the key of the next field.
    ///
    /// Returns the field's index in the descriptor, or its name if no field
    /// matches. Each field read must be followed by exactly one call to
    /// [`read_value`](Self::read_value) (or [`skip_value`](Self::skip_value)).
    pub fn next_field(&mut self) -> Result<Option<Either<usize, String>>, Error> {
        if self.remaining == 0 {
            return Ok(None);
        }

        self.remaining -= 1;
        let info = self.info;
        let name = self.decoder.read_str()?;

        Ok(Some(match info.field_index(name) {
            Some(index) => Left(index),
            None => Right(String::from(name)),
        }))
    }

    /// Read the value of the current field.
    pub fn read_value<T: Deserialize>(&mut self) -> Result<T, Error> {
        T::deserialize(&mut *self.decoder)
    }

    /// Skip the value of the current field.
    ///
    /// Skipping is not supported: every field on the wire must be known, so
    /// this always fails.
    pub fn skip_value(&mut self) -> Result<(), Error> {
        Err(Error::SkipUnsupported)
    }

    /// The error for a field the routing code does not accept.
    pub fn unknown_field(&self, field: Either<usize, String>) -> Error {
        let name = match field {
            Left(index) => self
                .info
                .field_name(index)
                .map(String::from)
                .unwrap_or_default(),
            Right(name) => name,
        };

        Error::UnknownField {
            ty: self.info.name(),
            name,
        }
    }
}

/// Reader for an enum member, encoded as its declared ordinal.
#[derive(Debug)]
pub struct EnumReader<'a, S> {
    decoder: &'a mut Decoder<S>,
    info: &'static TypeInfo,
}

impl<'a, S: ByteSource> EnumReader<'a, S> {
    pub(super) fn new(decoder: &'a mut Decoder<S>, info: &'static TypeInfo) -> Self {
        Self { decoder, info }
    }

    pub fn info(&self) -> &'static TypeInfo {
        self.info
    }

    /// Read the member's ordinal, checked against the declared members.
    pub fn read_index(self) -> Result<usize, Error> {
        let index = self.decoder.read_i32()?;

        usize::try_from(index)
            .ok()
            .filter(|i| *i < self.info.field_count())
            .ok_or(Error::UnknownVariant {
                ty: self.info.name(),
                index: index as i64,
            })
    }
}
