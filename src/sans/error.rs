//! Errors raised while encoding or decoding.

use core::fmt;

use alloc::string::String;
use thiserror::Error;

use super::info::Kind;

/// An error ending an encode or decode session.
///
/// No error is recoverable: once a read or write fails, the session's decoder
/// or encoder must be discarded.
#[derive(Debug, Error)]
pub enum Error {
    /// The source ran out of bytes in the middle of a value.
    #[error("Unexpected end of input.")]
    EndOfInput,
    /// An error from the underlying reader.
    #[cfg(feature = "std")]
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The tag byte does not belong to the expected value class.
    #[error("Expected {expected}, found tag 0x{tag:02x}.")]
    TagMismatch { tag: u8, expected: Expected },
    /// The value is well formed but does not fit the requested type.
    #[error("Value with tag 0x{tag:02x} is out of range for {expected}.")]
    OutOfRange { tag: u8, expected: Expected },
    /// Collections must declare their length before any element is written.
    #[error("Cannot encode a collection of unknown length.")]
    UnknownLength,
    /// A length does not fit the widest (32-bit) length prefix.
    #[error("Length {0} exceeds the maximum encodable length.")]
    LengthOverflow(usize),
    /// Found a string, byte string or map with an 8-byte length prefix.
    #[error("Found 8-byte length prefix, maximum length is 4 bytes.")]
    WideLength,
    /// Values cannot be skipped; every field on the wire must be known.
    #[error("Skipping values is not supported.")]
    SkipUnsupported,
    /// A record contained a key matching none of its fields.
    #[error("Unknown field `{name}` in `{ty}`.")]
    UnknownField { ty: &'static str, name: String },
    /// A record was missing a required field.
    #[error("Missing field `{field}` in `{ty}`.")]
    MissingField {
        ty: &'static str,
        field: &'static str,
    },
    /// A record contained the same field twice.
    #[error("Duplicate field `{field}` in `{ty}`.")]
    DuplicateField {
        ty: &'static str,
        field: &'static str,
    },
    /// Record fields were written out of their declared order.
    #[error("Expected field {expected} of `{ty}`, found field {found}.")]
    FieldOrder {
        ty: &'static str,
        expected: usize,
        found: usize,
    },
    /// A descriptor of the wrong kind was supplied for an operation.
    #[error("Expected {expected:?} descriptor for `{ty}`, found {found:?}.")]
    KindMismatch {
        ty: &'static str,
        expected: Kind,
        found: Kind,
    },
    /// An enum index outside the declared members.
    #[error("Unknown member index {index} for `{ty}`.")]
    UnknownVariant { ty: &'static str, index: i64 },
    /// A collection writer received a different number of members than
    /// declared.
    #[error("Declared {declared} collection members, wrote {written}.")]
    LengthMismatch { declared: usize, written: usize },
    /// A string held invalid UTF-8.
    #[error("Invalid UTF-8 string: {0}.")]
    Utf8(#[from] core::str::Utf8Error),
    /// A UTF-16 string held an unpaired surrogate.
    #[error("Unpaired surrogate 0x{0:04x} in UTF-16 string.")]
    Utf16(u16),
    /// A character was not encoded as a string of exactly one character.
    #[error("Expected a single character, found {0} characters.")]
    NotAChar(usize),
    /// A timestamp string could not be parsed.
    #[cfg(feature = "chrono")]
    #[error("Invalid timestamp: {0}.")]
    DateTime(chrono::ParseError),
    /// Bytes remained after the top-level value.
    #[error("Found {0} trailing bytes after the value.")]
    TrailingBytes(usize),
    /// An error raised by hand-written field-routing code.
    #[error("{0}")]
    Custom(String),
}

impl Error {
    /// Raise an error from field-routing code.
    pub fn custom(message: impl fmt::Display) -> Self {
        Self::Custom(alloc::format!("{message}"))
    }
}

/// The value class a read was expecting, reported with tag errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
    Bool,
    U8,
    U16,
    U32,
    U64,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    String,
    Bytes,
    Array,
    Map,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Bool => "boolean",
            Self::U8 => "8-bit unsigned integer",
            Self::U16 => "16-bit unsigned integer",
            Self::U32 => "32-bit unsigned integer",
            Self::U64 => "64-bit unsigned integer",
            Self::I8 => "8-bit integer",
            Self::I16 => "16-bit integer",
            Self::I32 => "32-bit integer",
            Self::I64 => "64-bit integer",
            Self::F32 => "32-bit float",
            Self::F64 => "64-bit float",
            Self::String => "string",
            Self::Bytes => "bytes",
            Self::Array => "array",
            Self::Map => "map",
        })
    }
}
