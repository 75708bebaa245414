//! Writers scoped to a single structured value.

use crate::avec::Serialize;
use crate::sans::{Error, Kind, TypeInfo};

use super::Encoder;

/// A writer for a structured value, chosen by the kind of its descriptor.
#[derive(Debug)]
pub enum TypeWriter<'a> {
    Enum(EnumWriter<'a>),
    Record(RecordWriter<'a>),
}

/// Writer for the members of a list or dictionary of a declared length.
#[derive(Debug)]
pub struct CollectionWriter<'a> {
    encoder: &'a mut Encoder,
    info: &'static TypeInfo,
    declared: usize,
    written: usize,
}

impl<'a> CollectionWriter<'a> {
    pub(super) fn new(encoder: &'a mut Encoder, info: &'static TypeInfo, len: usize) -> Self {
        Self {
            encoder,
            info,
            declared: len,
            written: 0,
        }
    }

    fn count(&mut self) -> Result<(), Error> {
        if self.written == self.declared {
            Err(Error::LengthMismatch {
                declared: self.declared,
                written: self.written + 1,
            })?;
        }

        self.written += 1;
        Ok(())
    }

    /// Write the next element of a list.
    pub fn write_element<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Error> {
        self.info.expect(Kind::List)?;
        self.count()?;
        value.serialize(self.encoder)
    }

    /// Write the next key and value of a dictionary.
    pub fn write_entry<K, V>(&mut self, key: &K, value: &V) -> Result<(), Error>
    where
        K: Serialize + ?Sized,
        V: Serialize + ?Sized,
    {
        self.info.expect(Kind::Dictionary)?;
        self.count()?;
        key.serialize(self.encoder)?;
        value.serialize(self.encoder)
    }

    /// Finish the collection, checking every declared member was written.
    pub fn end(self) -> Result<(), Error> {
        if self.written != self.declared {
            Err(Error::LengthMismatch {
                declared: self.declared,
                written: self.written,
            })?;
        }

        Ok(())
    }
}

/// Writer for a record's fields, in declaration order.
#[derive(Debug)]
pub struct RecordWriter<'a> {
    encoder: &'a mut Encoder,
    info: &'static TypeInfo,
    next: usize,
}

impl<'a> RecordWriter<'a> {
    pub(super) fn new(encoder: &'a mut Encoder, info: &'static TypeInfo) -> Self {
        Self {
            encoder,
            info,
            next: 0,
        }
    }

    /// Write the field at an index, keyed by its name.
    ///
    /// Fields must be written in declaration order, without gaps.
    pub fn write_field<T: Serialize + ?Sized>(
        &mut self,
        index: usize,
        value: &T,
    ) -> Result<(), Error> {
        let name = match self.info.field_name(index) {
            Some(name) if index == self.next => name,
            _ => Err(Error::FieldOrder {
                ty: self.info.name(),
                expected: self.next,
                found: index,
            })?,
        };

        self.encoder.write_str(name)?;
        value.serialize(self.encoder)?;

        self.next += 1;
        Ok(())
    }

    /// Finish the record, checking every field was written.
    pub fn end(self) -> Result<(), Error> {
        match self.info.field_name(self.next) {
            Some(field) => Err(Error::MissingField {
                ty: self.info.name(),
                field,
            }),
            None => Ok(()),
        }
    }
}

/// Writer for an enum member, encoded as its declared ordinal.
#[derive(Debug)]
pub struct EnumWriter<'a> {
    encoder: &'a mut Encoder,
    info: &'static TypeInfo,
}

impl<'a> EnumWriter<'a> {
    pub(super) fn new(encoder: &'a mut Encoder, info: &'static TypeInfo) -> Self {
        Self { encoder, info }
    }

    pub fn write_index(self, index: usize) -> Result<(), Error> {
        if index >= self.info.field_count() {
            Err(Error::UnknownVariant {
                ty: self.info.name(),
                index: index as i64,
            })?;
        }

        self.encoder.write_u64(index as u64);
        Ok(())
    }
}
