//! The serialization engine.
//!
//! This module holds the buffered [`Decoder`] and growable [`Encoder`], the
//! byte [`source`] and [`sink`] they own, and the [`TypeInfo`] descriptors
//! that let any type plug into both. Most users should begin with the traits
//! and functions in [`crate::avec`].
//!
//! # Architecture
//!
//! Neither the decoder nor the encoder knows the shape of the values passing
//! through them. Each type supplies a static [`TypeInfo`] and a small piece of
//! field-routing code (hand written, or derived) that issues a sequence of
//! typed reads or writes:
//!
//! - Primitives are read and written directly (`read_i32`, `write_str`, ...).
//!
//! - Structured values are entered through their descriptor. Entering a value
//! writes or reads its header and returns a scoped sub-reader or sub-writer
//! that tracks how many members remain. Members are themselves read and
//! written through their own routing code, so values nest to any depth.
//!
//! - Records are written as maps from field names to values, always in
//! declaration order. When reading, [`RecordReader::next_field`] reports the
//! index of each field as it appears, so routing code can assign fields in
//! any wire order. Unknown fields are an error; they cannot be skipped.
//!
//! - Enums are written as the ordinal of their member in the descriptor.
//!
//! # Wire format
//!
//! | Class | Tags |
//! |---|---|
//! | Unsigned integer | `0x00..=0x17` inline, `0x18..=0x1b` + 1, 2, 4 or 8 bytes |
//! | Negative integer | `0x20..=0x37` inline (-1 down), `0x38..=0x3b` + two's complement |
//! | Byte string | `0xc4..=0xc6` + 1, 2 or 4 byte length (also reads `0x40..=0x5a`) |
//! | String | `0x60..=0x77` inline length, `0x78..=0x7a` + 1, 2 or 4 byte length |
//! | Array | `0x90..=0x9f` inline length, `0xdc`/`0xdd` + 2 or 4 byte length |
//! | Map | `0xa0..=0xb7` inline length, `0xb8..=0xba` + 1, 2 or 4 byte length |
//! | `false`, `true`, null | `0xf4`, `0xf5`, `0xf6` |
//! | `f32`, `f64` | `0xfa`, `0xfb` + 4 or 8 bytes |
//!
//! All payloads are big-endian.

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod info;
pub mod sink;
pub mod source;
pub mod tag;

pub use decoder::{CollectionReader, Decoder, EnumReader, RecordReader, TypeReader};
pub use either::Either;
pub use encoder::{CollectionWriter, Encoder, EnumWriter, RecordWriter, TypeWriter};
pub use error::{Error, Expected};
pub use info::{Kind, TypeInfo};
pub use sink::{AppendSpan, ScratchBuffer};
pub use source::{ByteSource, SliceSource};

/// Round-trip format for timestamps without an offset.
#[cfg(feature = "chrono")]
pub(crate) const NAIVE_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";
