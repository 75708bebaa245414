//! Convenience interfaces for common encoding and decoding patterns.
//!
//! Types publish their shape and field routing through the [`Serialize`] and
//! [`Deserialize`] traits, implemented here for primitives and common
//! collections. For records and enums of a known shape, these traits can be
//! derived. See the [`Serialize`](macro@Serialize) and
//! [`Deserialize`](macro@Deserialize) macros for details.
//!
//! The functions in this module run a whole session over a slice, a vector,
//! a reader or a writer.

#[cfg(feature = "chrono")]
mod datetime;
mod impls;
#[cfg(feature = "std")]
pub mod reader;
pub mod slice;

#[cfg(feature = "std")]
pub use reader::{ReaderSource, decode as decode_reader, encode as encode_writer};
pub use slice::{decode as decode_slice, encode as encode_vec};

use alloc::vec::Vec;

use crate::sans::{ByteSource, Decoder, Encoder, Error};

/// Derive [`Serialize`] for a record or a fieldless enum.
///
/// _Requires Cargo feature `derive`._
///
/// # Records
///
/// Structs with named fields are written as maps from field names to values,
/// in declaration order. Each field's type must implement [`Serialize`]. To
/// change the name a field is written under, add the `field("Name")`
/// attribute.
///
/// ```
/// #[derive(Debug, Serialize, Deserialize)]
/// struct Point {
///     #[field("X")]
///     x: i32,
///     #[field("Y")]
///     y: i32,
/// }
/// ```
///
/// # Enums
///
/// Enums without fields are written as the ordinal of their member, counting
/// from zero in declaration order. Explicit discriminants are ignored.
///
/// ```
/// #[derive(Debug, Serialize, Deserialize)]
/// #[repr(u8)]
/// enum Direction {
///     North = 10,
///     South = 20,
/// }
/// ```
#[cfg(feature = "derive")]
pub use cassette_derive::Serialize;

/// Write a value through an encoder.
///
/// See the [`Serialize`](macro@Serialize) derive macro for an automatic
/// implementation of this trait.
pub trait Serialize {
    /// Write this value, and everything nested in it, to an encoder.
    fn serialize(&self, encoder: &mut Encoder) -> Result<(), Error>;
}

/// Derive [`Deserialize`] for a record or a fieldless enum.
///
/// _Requires Cargo feature `derive`._
///
/// Records accept their fields in any order. Fields of type `Option<T>` may be
/// absent and default to `None`; any other absent field is an error, as are
/// duplicate and unknown fields. The `field("Name")` attribute is honored as
/// for [`Serialize`](macro@Serialize).
///
/// Enums are read from the ordinal of their member.
#[cfg(feature = "derive")]
pub use cassette_derive::Deserialize;

/// Read a value through a decoder.
///
/// See the [`Deserialize`](macro@Deserialize) derive macro for an automatic
/// implementation of this trait.
pub trait Deserialize: Sized {
    /// Read a value, and everything nested in it, from a decoder.
    fn deserialize<S: ByteSource>(decoder: &mut Decoder<S>) -> Result<Self, Error>;
}

/// A byte string to be written as such, rather than as a list of integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bytes<'a>(pub &'a [u8]);

/// An owned byte string, read and written as such rather than as a list of
/// integers.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ByteBuf(pub Vec<u8>);

impl From<Vec<u8>> for ByteBuf {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<ByteBuf> for Vec<u8> {
    fn from(buf: ByteBuf) -> Self {
        buf.0
    }
}
