//! Decoding values from a byte source.

mod types;

pub use types::{CollectionReader, EnumReader, RecordReader, TypeReader};

use alloc::{string::String, vec::Vec};
use zerocopy::byteorder::big_endian::{F32, F64, U16, U32, U64};

use crate::avec::Deserialize;

use super::{
    ByteSource, Error, Expected, Kind, TypeInfo,
    tag::{self, IntHead, LenHead, Width},
};

/// A decoder reading one value (and everything nested in it) from a source.
///
/// Reads must be issued in exactly the order the values were written. Any
/// error ends the session; the decoder does not resynchronize.
#[derive(Debug)]
pub struct Decoder<S> {
    source: S,
}

macro_rules! integer_readers {
    ($($name:ident -> $t:ty, $expected:ident;)*) => {$(
        #[doc = concat!("Read a `", stringify!($t), "`, accepting any integer tier whose value fits.")]
        pub fn $name(&mut self) -> Result<$t, Error> {
            let (tag, value) = self.read_integer(Expected::$expected)?;

            <$t>::try_from(value).map_err(|_| Error::OutOfRange {
                tag,
                expected: Expected::$expected,
            })
        }
    )*};
}

impl<S: ByteSource> Decoder<S> {
    /// Start a session, pre-filling the source so the first tag is usually
    /// ready.
    pub fn new(mut source: S) -> Result<Self, Error> {
        // An empty source fails on the first read instead.
        source.fill_buffer(1)?;
        Ok(Self { source })
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_inner(self) -> S {
        self.source
    }

    #[cold]
    #[inline(never)]
    fn refill(&mut self, n: usize) -> Result<(), Error> {
        if self.source.fill_buffer(n)? {
            Ok(())
        } else {
            Err(Error::EndOfInput)
        }
    }

    #[inline]
    fn peek_byte(&mut self) -> Result<u8, Error> {
        if self.source.span().is_empty() {
            self.refill(1)?;
        }

        Ok(self.source.span()[0])
    }

    #[inline]
    fn eat_byte(&mut self) -> Result<u8, Error> {
        let b = self.peek_byte()?;
        self.source.advance(1);
        Ok(b)
    }

    /// Take an exact number of bytes from the source.
    #[inline]
    fn take<const N: usize>(&mut self) -> Result<[u8; N], Error> {
        if self.source.span().len() < N {
            self.refill(N)?;
        }

        self.source
            .advance(N)
            .try_into()
            .map_err(|_| Error::EndOfInput)
    }

    fn take_slice(&mut self, len: usize) -> Result<&[u8], Error> {
        if self.source.span().len() < len {
            self.refill(len)?;
        }

        Ok(self.source.advance(len))
    }

    fn read_payload(&mut self, width: Width) -> Result<u64, Error> {
        Ok(match width {
            Width::One => self.eat_byte()? as u64,
            Width::Two => {
                let v: U16 = zerocopy::transmute!(self.take::<2>()?);
                v.get() as u64
            }
            Width::Four => {
                let v: U32 = zerocopy::transmute!(self.take::<4>()?);
                v.get() as u64
            }
            Width::Eight => {
                let v: U64 = zerocopy::transmute!(self.take::<8>()?);
                v.get()
            }
        })
    }

    /// Read a length payload of at most four bytes.
    fn read_len(&mut self, width: Width) -> Result<usize, Error> {
        debug_assert!(width != Width::Eight);
        Ok(self.read_payload(width)? as usize)
    }

    /// Read any integer, returning its tag and value.
    fn read_integer(&mut self, expected: Expected) -> Result<(u8, i128), Error> {
        let t = self.eat_byte()?;

        let value = match tag::classify_int(t) {
            Some(IntHead::Inline(v)) => v as i128,
            Some(IntHead::Payload {
                width,
                negative: false,
            }) => self.read_payload(width)? as i128,
            Some(IntHead::Payload {
                width,
                negative: true,
            }) => {
                let raw = self.read_payload(width)?;

                // Sign-extend the two's complement payload.
                let v = match width {
                    Width::One => raw as u8 as i8 as i128,
                    Width::Two => raw as u16 as i16 as i128,
                    Width::Four => raw as u32 as i32 as i128,
                    Width::Eight => raw as i64 as i128,
                };

                if v >= 0 {
                    Err(Error::OutOfRange { tag: t, expected })?;
                }

                v
            }
            None => Err(Error::TagMismatch { tag: t, expected })?,
        };

        Ok((t, value))
    }

    integer_readers! {
        read_u8 -> u8, U8;
        read_u16 -> u16, U16;
        read_u32 -> u32, U32;
        read_u64 -> u64, U64;
        read_i8 -> i8, I8;
        read_i16 -> i16, I16;
        read_i32 -> i32, I32;
        read_i64 -> i64, I64;
    }

    pub fn read_bool(&mut self) -> Result<bool, Error> {
        match self.eat_byte()? {
            tag::FALSE => Ok(false),
            tag::TRUE => Ok(true),
            t => Err(Error::TagMismatch {
                tag: t,
                expected: Expected::Bool,
            }),
        }
    }

    /// Consume a null if one is next, leaving any other value in place.
    pub fn try_read_null(&mut self) -> Result<bool, Error> {
        if self.peek_byte()? == tag::NULL {
            self.source.advance(1);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn read_f32(&mut self) -> Result<f32, Error> {
        let t = self.eat_byte()?;
        if t != tag::F32 {
            Err(Error::TagMismatch {
                tag: t,
                expected: Expected::F32,
            })?;
        }

        let v: F32 = zerocopy::transmute!(self.take::<4>()?);
        Ok(v.get())
    }

    pub fn read_f64(&mut self) -> Result<f64, Error> {
        let t = self.eat_byte()?;
        if t != tag::F64 {
            Err(Error::TagMismatch {
                tag: t,
                expected: Expected::F64,
            })?;
        }

        let v: F64 = zerocopy::transmute!(self.take::<8>()?);
        Ok(v.get())
    }

    fn read_text_len(&mut self) -> Result<usize, Error> {
        let t = self.eat_byte()?;

        match tag::classify_len(t, tag::STRING) {
            Some(LenHead::Inline(len)) => Ok(len),
            Some(LenHead::Payload(Width::Eight)) => Err(Error::WideLength),
            Some(LenHead::Payload(width)) => self.read_len(width),
            None => Err(Error::TagMismatch {
                tag: t,
                expected: Expected::String,
            }),
        }
    }

    /// Read a string, borrowed from the source's buffer.
    pub fn read_str(&mut self) -> Result<&str, Error> {
        let len = self.read_text_len()?;
        Ok(core::str::from_utf8(self.take_slice(len)?)?)
    }

    pub fn read_string(&mut self) -> Result<String, Error> {
        self.read_str().map(String::from)
    }

    /// Read a string holding exactly one character.
    pub fn read_char(&mut self) -> Result<char, Error> {
        let s = self.read_str()?;
        let mut chars = s.chars();

        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(Error::NotAChar(s.chars().count())),
        }
    }

    fn read_bytes_len(&mut self) -> Result<usize, Error> {
        let t = self.eat_byte()?;

        let width = match t {
            tag::BYTES_8 => Width::One,
            tag::BYTES_16 => Width::Two,
            tag::BYTES_32 => Width::Four,
            _ => match tag::classify_len(t, tag::BYTES) {
                Some(LenHead::Inline(len)) => return Ok(len),
                Some(LenHead::Payload(Width::Eight)) => Err(Error::WideLength)?,
                Some(LenHead::Payload(width)) => width,
                None => Err(Error::TagMismatch {
                    tag: t,
                    expected: Expected::Bytes,
                })?,
            },
        };

        self.read_len(width)
    }

    /// Read a byte string, borrowed from the source's buffer.
    pub fn read_bytes(&mut self) -> Result<&[u8], Error> {
        let len = self.read_bytes_len()?;
        self.take_slice(len)
    }

    /// Read a byte string, appending it to a buffer.
    ///
    /// Returns the number of bytes appended.
    pub fn read_bytes_into(&mut self, out: &mut Vec<u8>) -> Result<usize, Error> {
        let bytes = self.read_bytes()?;
        out.extend_from_slice(bytes);
        Ok(bytes.len())
    }

    fn read_array_len(&mut self) -> Result<usize, Error> {
        let t = self.eat_byte()?;

        if t & 0xf0 == tag::ARRAY_INLINE {
            return Ok((t & 0x0f) as usize);
        }

        match t {
            tag::ARRAY_16 => self.read_len(Width::Two),
            tag::ARRAY_32 => self.read_len(Width::Four),
            _ => Err(Error::TagMismatch {
                tag: t,
                expected: Expected::Array,
            }),
        }
    }

    /// Read a map header. Dictionaries also accept the legacy 32-bit tag.
    fn read_map_len(&mut self, accept_legacy: bool) -> Result<usize, Error> {
        let t = self.eat_byte()?;

        if accept_legacy && t == tag::DICTIONARY_32 {
            return self.read_len(Width::Four);
        }

        match tag::classify_len(t, tag::MAP) {
            Some(LenHead::Inline(len)) => Ok(len),
            Some(LenHead::Payload(Width::Eight)) => Err(Error::WideLength),
            Some(LenHead::Payload(width)) => self.read_len(width),
            None => Err(Error::TagMismatch {
                tag: t,
                expected: Expected::Map,
            }),
        }
    }

    /// Begin reading a structured value, dispatching on its descriptor.
    pub fn read_type(&mut self, info: &'static TypeInfo) -> Result<TypeReader<'_, S>, Error> {
        Ok(match info.kind() {
            Kind::List | Kind::Dictionary => TypeReader::Collection(self.read_collection(info)?),
            Kind::Enum => TypeReader::Enum(self.read_enum(info)?),
            Kind::CustomType => TypeReader::Record(self.read_record(info)?),
        })
    }

    /// Begin reading a list or dictionary.
    pub fn read_collection(
        &mut self,
        info: &'static TypeInfo,
    ) -> Result<CollectionReader<'_, S>, Error> {
        let slots = match info.kind() {
            Kind::List => self.read_array_len()?,
            Kind::Dictionary => {
                let len = self.read_map_len(true)?;
                // Keys and values are interleaved.
                len.checked_mul(2).ok_or(Error::LengthOverflow(len))?
            }
            found => Err(Error::KindMismatch {
                ty: info.name(),
                expected: Kind::List,
                found,
            })?,
        };

        Ok(CollectionReader::new(self, info, slots))
    }

    /// Begin reading an enum member.
    pub fn read_enum(&mut self, info: &'static TypeInfo) -> Result<EnumReader<'_, S>, Error> {
        info.expect(Kind::Enum)?;
        Ok(EnumReader::new(self, info))
    }

    /// Begin reading a record.
    pub fn read_record(&mut self, info: &'static TypeInfo) -> Result<RecordReader<'_, S>, Error> {
        info.expect(Kind::CustomType)?;
        let len = self.read_map_len(false)?;
        Ok(RecordReader::new(self, info, len))
    }

    /// Read a value through its field-routing code.
    pub fn read_value<T: Deserialize>(&mut self) -> Result<T, Error> {
        T::deserialize(self)
    }

    /// Read a timestamp written in round-trip (RFC 3339) format.
    #[cfg(feature = "chrono")]
    pub fn read_datetime(&mut self) -> Result<chrono::DateTime<chrono::FixedOffset>, Error> {
        chrono::DateTime::parse_from_rfc3339(self.read_str()?).map_err(Error::DateTime)
    }

    /// Read a timestamp written in round-trip format without an offset.
    #[cfg(feature = "chrono")]
    pub fn read_naive_datetime(&mut self) -> Result<chrono::NaiveDateTime, Error> {
        chrono::NaiveDateTime::parse_from_str(self.read_str()?, super::NAIVE_DATETIME_FORMAT)
            .map_err(Error::DateTime)
    }
}
