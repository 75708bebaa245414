//! Tag bytes and their classification.
//!
//! Integers, strings, byte strings and maps share a layout: the top three bits
//! of the tag select a major class, and the low five bits either hold a small
//! value inline (`0..=23`) or select the width of a big-endian payload
//! (`24..=27` for 1, 2, 4 or 8 bytes).
//!
//! Arrays, floats and the single-byte constants use dedicated tags instead.

use tartan_bitfield::bitfield;

pub const FALSE: u8 = 0xf4;
pub const TRUE: u8 = 0xf5;
pub const NULL: u8 = 0xf6;
pub const F32: u8 = 0xfa;
pub const F64: u8 = 0xfb;

pub const UNSIGNED: u8 = 0x00;
pub const NEGATIVE: u8 = 0x20;
pub const BYTES: u8 = 0x40;
pub const STRING: u8 = 0x60;
pub const MAP: u8 = 0xa0;

/// Offsets from a major class base selecting the payload width.
pub const WIDTH_1: u8 = 0x18;
pub const WIDTH_2: u8 = 0x19;
pub const WIDTH_4: u8 = 0x1a;
pub const WIDTH_8: u8 = 0x1b;

/// Largest value carried inline in a tag.
pub const INLINE_MAX: u8 = 0x17;

pub const ARRAY_INLINE: u8 = 0x90;
pub const ARRAY_INLINE_MAX: usize = 0x0f;
pub const ARRAY_16: u8 = 0xdc;
pub const ARRAY_32: u8 = 0xdd;

/// Legacy 32-bit dictionary length, accepted but never written.
pub const DICTIONARY_32: u8 = 0xdf;

pub const BYTES_8: u8 = 0xc4;
pub const BYTES_16: u8 = 0xc5;
pub const BYTES_32: u8 = 0xc6;

bitfield! {
    struct Tag(u8) {
        [0..5] info: u8,
        [5..8] major: u8,
    }
}

const MAJOR_UNSIGNED: u8 = UNSIGNED >> 5;
const MAJOR_NEGATIVE: u8 = NEGATIVE >> 5;

/// Width of a big-endian payload following a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Width {
    One,
    Two,
    Four,
    Eight,
}

impl Width {
    /// Width selected by the low five bits of a tag, if any.
    pub fn from_info(info: u8) -> Option<Self> {
        match info {
            WIDTH_1 => Some(Self::One),
            WIDTH_2 => Some(Self::Two),
            WIDTH_4 => Some(Self::Four),
            WIDTH_8 => Some(Self::Eight),
            _ => None,
        }
    }

    /// Narrowest width holding a length or magnitude, above the inline range.
    pub fn for_value(value: u64) -> Self {
        if value <= u8::MAX as u64 {
            Self::One
        } else if value <= u16::MAX as u64 {
            Self::Two
        } else if value <= u32::MAX as u64 {
            Self::Four
        } else {
            Self::Eight
        }
    }

    /// Offset added to a major class base to select this width.
    pub fn info(self) -> u8 {
        match self {
            Self::One => WIDTH_1,
            Self::Two => WIDTH_2,
            Self::Four => WIDTH_4,
            Self::Eight => WIDTH_8,
        }
    }

    pub fn bytes(self) -> usize {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Four => 4,
            Self::Eight => 8,
        }
    }
}

/// The classification of an integer tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntHead {
    /// The tag is the whole value.
    Inline(i8),
    /// The tag is followed by a payload. Negative payloads hold the two's
    /// complement of the value at that width.
    Payload { width: Width, negative: bool },
}

/// Classify a tag as the start of an integer, if it is one.
pub fn classify_int(tag: u8) -> Option<IntHead> {
    let t = Tag(tag);

    let negative = match t.major() {
        MAJOR_UNSIGNED => false,
        MAJOR_NEGATIVE => true,
        _ => return None,
    };

    let info = t.info();

    if info <= INLINE_MAX {
        // Inline negatives count down from -1.
        let value = if negative {
            -1 - info as i8
        } else {
            info as i8
        };

        Some(IntHead::Inline(value))
    } else {
        Width::from_info(info).map(|width| IntHead::Payload { width, negative })
    }
}

/// The length carried by a tag of a length-prefixed major class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LenHead {
    Inline(usize),
    Payload(Width),
}

/// Classify a tag against a major class base (`BYTES`, `STRING` or `MAP`).
pub fn classify_len(tag: u8, base: u8) -> Option<LenHead> {
    let t = Tag(tag);

    if t.major() != Tag(base).major() {
        return None;
    }

    let info = t.info();

    if info <= INLINE_MAX {
        Some(LenHead::Inline(info as usize))
    } else {
        Width::from_info(info).map(LenHead::Payload)
    }
}
