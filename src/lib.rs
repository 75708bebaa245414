#![no_std]

//! A reflection-free binary serializer.
//!
//! Cassette reads and writes a compact, big-endian, tag-prefixed wire format
//! (from the MessagePack and CBOR family) without inspecting types at runtime.
//! Every type describes its own shape with a static descriptor, and routes its
//! own fields through a small set of typed reads and writes.
//!
//! Most users should begin with the traits, functions and derive macros in the
//! [`avec`] module. If these prove insufficient, consider driving the encoder
//! and decoder directly as described in the [`sans`] module.
//!
//! ## Cargo Features
//!
//! The following crate feature flags are available:
//!
//! - `derive`: enable derive macros (default).
//! - `std`: enable reader- and writer-based entry points (default).
//! - `chrono`: enable timestamp reads, writes and trait implementations.

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

// Lets derived code name this crate from inside its own tests.
extern crate self as cassette;

pub mod avec;
pub mod sans;

pub use sans::Error;
