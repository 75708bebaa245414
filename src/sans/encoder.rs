//! Encoding values into a growable buffer.

mod types;

pub use types::{CollectionWriter, EnumWriter, RecordWriter, TypeWriter};

use alloc::vec::Vec;
use zerocopy::{
    IntoBytes,
    byteorder::big_endian::{F32, F64, U16, U32, U64},
};

use crate::avec::Serialize;

use super::{
    Error, Kind, ScratchBuffer, TypeInfo,
    tag::{self, Width},
};

/// Most UTF-8 bytes produced by one UTF-16 code unit.
const MAX_UTF8_PER_UTF16: usize = 3;

/// An encoder writing values into a [`ScratchBuffer`].
///
/// Every integer is written in the narrowest tier holding it; floats are
/// always written at full width.
#[derive(Debug, Default)]
pub struct Encoder {
    out: ScratchBuffer,
}

impl Encoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_buffer(ScratchBuffer::with_capacity(capacity))
    }

    /// Encode into an existing buffer, appending after its contents.
    pub fn from_buffer(out: ScratchBuffer) -> Self {
        Self { out }
    }

    /// Bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        self.out.as_slice()
    }

    pub fn into_inner(self) -> ScratchBuffer {
        self.out
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.out.into_vec()
    }

    /// Write a tag of a length-prefixed major class followed by its
    /// narrowest payload.
    fn write_head(&mut self, base: u8, value: u64) {
        if value <= tag::INLINE_MAX as u64 {
            self.out.push(base + value as u8);
            return;
        }

        let width = Width::for_value(value);
        self.out.push(base + width.info());
        self.write_payload(width, value);
    }

    fn write_payload(&mut self, width: Width, value: u64) {
        match width {
            Width::One => self.out.push(value as u8),
            Width::Two => self.out.extend_from_slice(U16::new(value as u16).as_bytes()),
            Width::Four => self.out.extend_from_slice(U32::new(value as u32).as_bytes()),
            Width::Eight => self.out.extend_from_slice(U64::new(value).as_bytes()),
        }
    }

    pub fn write_bool(&mut self, b: bool) {
        self.out.push(if b { tag::TRUE } else { tag::FALSE });
    }

    pub fn write_null(&mut self) {
        self.out.push(tag::NULL);
    }

    pub fn write_u8(&mut self, v: u8) {
        self.write_u64(v as u64);
    }

    pub fn write_u16(&mut self, v: u16) {
        self.write_u64(v as u64);
    }

    pub fn write_u32(&mut self, v: u32) {
        self.write_u64(v as u64);
    }

    pub fn write_u64(&mut self, v: u64) {
        self.write_head(tag::UNSIGNED, v);
    }

    pub fn write_i8(&mut self, v: i8) {
        self.write_i64(v as i64);
    }

    pub fn write_i16(&mut self, v: i16) {
        self.write_i64(v as i64);
    }

    pub fn write_i32(&mut self, v: i32) {
        self.write_i64(v as i64);
    }

    /// Write a signed integer. Negative values below the inline range are
    /// written as their two's complement at the narrowest fitting width.
    pub fn write_i64(&mut self, v: i64) {
        if v >= 0 {
            self.write_u64(v as u64);
        } else if v >= -(tag::INLINE_MAX as i64) {
            // -1 is 0x20, counting up as values decrease.
            self.out.push(tag::NEGATIVE + (-1 - v) as u8);
        } else if v >= i8::MIN as i64 {
            self.out.push(tag::NEGATIVE + tag::WIDTH_1);
            self.out.push(v as i8 as u8);
        } else if v >= i16::MIN as i64 {
            self.out.push(tag::NEGATIVE + tag::WIDTH_2);
            self.write_payload(Width::Two, v as i16 as u16 as u64);
        } else if v >= i32::MIN as i64 {
            self.out.push(tag::NEGATIVE + tag::WIDTH_4);
            self.write_payload(Width::Four, v as i32 as u32 as u64);
        } else {
            self.out.push(tag::NEGATIVE + tag::WIDTH_8);
            self.write_payload(Width::Eight, v as u64);
        }
    }

    pub fn write_f32(&mut self, v: f32) {
        self.out.push(tag::F32);
        self.out.extend_from_slice(F32::new(v).as_bytes());
    }

    pub fn write_f64(&mut self, v: f64) {
        self.out.push(tag::F64);
        self.out.extend_from_slice(F64::new(v).as_bytes());
    }

    /// Write a character as a one-character string.
    pub fn write_char(&mut self, c: char) {
        let mut buf = [0; 4];
        // A single character never needs more than a one-byte prefix.
        let s = c.encode_utf8(&mut buf);
        self.out.push(tag::STRING + s.len() as u8);
        self.out.extend_from_slice(s.as_bytes());
    }

    pub fn write_str(&mut self, s: &str) -> Result<(), Error> {
        self.write_text(s.len(), |dst| {
            dst[..s.len()].copy_from_slice(s.as_bytes());
            Ok(s.len())
        })
    }

    /// Write a UTF-16 string, transcoding it to UTF-8 in place.
    ///
    /// Fails on unpaired surrogates.
    pub fn write_utf16(&mut self, units: &[u16]) -> Result<(), Error> {
        let max_len = units
            .len()
            .checked_mul(MAX_UTF8_PER_UTF16)
            .ok_or(Error::LengthOverflow(units.len()))?;

        self.write_text(max_len, |dst| {
            let mut written = 0;

            for c in char::decode_utf16(units.iter().copied()) {
                let c = c.map_err(|e| Error::Utf16(e.unpaired_surrogate()))?;
                written += c.encode_utf8(&mut dst[written..]).len();
            }

            Ok(written)
        })
    }

    /// Write a length-prefixed string whose encoded length is only known once
    /// it has been encoded.
    ///
    /// The string is encoded once, after room for the prefix its worst-case
    /// length would need. If the real length needs a narrower prefix, the
    /// bytes are shifted left to close the gap.
    fn write_text(
        &mut self,
        max_len: usize,
        encode: impl FnOnce(&mut [u8]) -> Result<usize, Error>,
    ) -> Result<(), Error> {
        let reserved = prefix_len(max_len);
        let mut span = self.out.append_span(reserved + max_len);

        let len = encode(&mut span[reserved..reserved + max_len])?;
        let len32 = u32::try_from(len).map_err(|_| Error::LengthOverflow(len))?;

        let actual = write_text_prefix(&mut span, len32);
        if actual < reserved {
            span.copy_within(reserved..reserved + len, actual);
        }

        span.commit(actual + len);
        Ok(())
    }

    /// Write a byte string.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Error> {
        let len = u32::try_from(bytes.len()).map_err(|_| Error::LengthOverflow(bytes.len()))?;

        let (code, width) = match Width::for_value(len as u64) {
            Width::One => (tag::BYTES_8, Width::One),
            Width::Two => (tag::BYTES_16, Width::Two),
            _ => (tag::BYTES_32, Width::Four),
        };

        self.out.push(code);
        self.write_payload(width, len as u64);
        self.out.extend_from_slice(bytes);
        Ok(())
    }

    fn write_array_len(&mut self, len: usize) -> Result<(), Error> {
        let len32 = u32::try_from(len).map_err(|_| Error::LengthOverflow(len))?;

        if len <= tag::ARRAY_INLINE_MAX {
            self.out.push(tag::ARRAY_INLINE | len as u8);
        } else if len32 <= u16::MAX as u32 {
            self.out.push(tag::ARRAY_16);
            self.write_payload(Width::Two, len32 as u64);
        } else {
            self.out.push(tag::ARRAY_32);
            self.write_payload(Width::Four, len32 as u64);
        }

        Ok(())
    }

    fn write_map_len(&mut self, len: usize) -> Result<(), Error> {
        let len32 = u32::try_from(len).map_err(|_| Error::LengthOverflow(len))?;
        self.write_head(tag::MAP, len32 as u64);
        Ok(())
    }

    /// Begin writing a list or dictionary of a known length.
    ///
    /// Collections of unknown length cannot be encoded.
    pub fn write_collection(
        &mut self,
        info: &'static TypeInfo,
        len: Option<usize>,
    ) -> Result<CollectionWriter<'_>, Error> {
        let len = len.ok_or(Error::UnknownLength)?;

        match info.kind() {
            Kind::List => self.write_array_len(len)?,
            Kind::Dictionary => self.write_map_len(len)?,
            found => Err(Error::KindMismatch {
                ty: info.name(),
                expected: Kind::List,
                found,
            })?,
        }

        Ok(CollectionWriter::new(self, info, len))
    }

    /// Begin writing a record or enum member, dispatching on its descriptor.
    pub fn write_type(&mut self, info: &'static TypeInfo) -> Result<TypeWriter<'_>, Error> {
        Ok(match info.kind() {
            Kind::CustomType => TypeWriter::Record(self.write_record(info)?),
            Kind::Enum => TypeWriter::Enum(self.write_enum(info)?),
            found => Err(Error::KindMismatch {
                ty: info.name(),
                expected: Kind::CustomType,
                found,
            })?,
        })
    }

    /// Begin writing a record, as a map sized to its field count.
    pub fn write_record(&mut self, info: &'static TypeInfo) -> Result<RecordWriter<'_>, Error> {
        info.expect(Kind::CustomType)?;
        self.write_map_len(info.field_count())?;
        Ok(RecordWriter::new(self, info))
    }

    /// Begin writing an enum member.
    pub fn write_enum(&mut self, info: &'static TypeInfo) -> Result<EnumWriter<'_>, Error> {
        info.expect(Kind::Enum)?;
        Ok(EnumWriter::new(self, info))
    }

    /// Write a value through its field-routing code.
    pub fn write_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), Error> {
        value.serialize(self)
    }

    /// Write a timestamp in round-trip (RFC 3339) format.
    #[cfg(feature = "chrono")]
    pub fn write_datetime<Tz: chrono::TimeZone>(
        &mut self,
        dt: &chrono::DateTime<Tz>,
    ) -> Result<(), Error>
    where
        Tz::Offset: core::fmt::Display,
    {
        self.write_str(&dt.to_rfc3339_opts(chrono::SecondsFormat::AutoSi, true))
    }

    /// Write a timestamp without an offset in round-trip format.
    #[cfg(feature = "chrono")]
    pub fn write_naive_datetime(&mut self, dt: &chrono::NaiveDateTime) -> Result<(), Error> {
        use alloc::string::ToString;

        self.write_str(&dt.format(super::NAIVE_DATETIME_FORMAT).to_string())
    }
}

/// Bytes taken by the prefix of a string of a given length.
fn prefix_len(len: usize) -> usize {
    if len <= tag::INLINE_MAX as usize {
        1
    } else {
        1 + Width::for_value(len as u64).bytes()
    }
}

/// Write a string prefix to the start of a window, returning its length.
fn write_text_prefix(dst: &mut [u8], len: u32) -> usize {
    if len <= tag::INLINE_MAX as u32 {
        dst[0] = tag::STRING + len as u8;
        return 1;
    }

    let width = Width::for_value(len as u64);
    dst[0] = tag::STRING + width.info();

    match width {
        Width::One => dst[1] = len as u8,
        Width::Two => dst[1..3].copy_from_slice(U16::new(len as u16).as_bytes()),
        _ => dst[1..5].copy_from_slice(U32::new(len).as_bytes()),
    }

    1 + width.bytes()
}
