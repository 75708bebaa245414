//! Implementations for primitives and common collections.

use alloc::{boxed::Box, collections::BTreeMap, string::String, vec::Vec};

use crate::sans::{ByteSource, Decoder, Encoder, Error, TypeInfo};

use super::{ByteBuf, Bytes, Deserialize, Serialize};

/// Most elements reserved up front from a declared collection length, which
/// may be hostile.
const MAX_PREALLOCATION: usize = 4096;

macro_rules! primitive {
    ($t:ty, $write:ident, $read:ident) => {
        impl Serialize for $t {
            fn serialize(&self, encoder: &mut Encoder) -> Result<(), Error> {
                encoder.$write(*self);
                Ok(())
            }
        }

        impl Deserialize for $t {
            fn deserialize<S: ByteSource>(decoder: &mut Decoder<S>) -> Result<Self, Error> {
                decoder.$read()
            }
        }
    };
}

primitive!(bool, write_bool, read_bool);
primitive!(u8, write_u8, read_u8);
primitive!(u16, write_u16, read_u16);
primitive!(u32, write_u32, read_u32);
primitive!(u64, write_u64, read_u64);
primitive!(i8, write_i8, read_i8);
primitive!(i16, write_i16, read_i16);
primitive!(i32, write_i32, read_i32);
primitive!(i64, write_i64, read_i64);
primitive!(f32, write_f32, read_f32);
primitive!(f64, write_f64, read_f64);
primitive!(char, write_char, read_char);

impl Serialize for str {
    fn serialize(&self, encoder: &mut Encoder) -> Result<(), Error> {
        encoder.write_str(self)
    }
}

impl Serialize for String {
    fn serialize(&self, encoder: &mut Encoder) -> Result<(), Error> {
        encoder.write_str(self)
    }
}

impl Deserialize for String {
    fn deserialize<S: ByteSource>(decoder: &mut Decoder<S>) -> Result<Self, Error> {
        decoder.read_string()
    }
}

impl Serialize for Bytes<'_> {
    fn serialize(&self, encoder: &mut Encoder) -> Result<(), Error> {
        encoder.write_bytes(self.0)
    }
}

impl Serialize for ByteBuf {
    fn serialize(&self, encoder: &mut Encoder) -> Result<(), Error> {
        encoder.write_bytes(&self.0)
    }
}

impl Deserialize for ByteBuf {
    fn deserialize<S: ByteSource>(decoder: &mut Decoder<S>) -> Result<Self, Error> {
        let mut bytes = Vec::new();
        decoder.read_bytes_into(&mut bytes)?;
        Ok(Self(bytes))
    }
}

impl<T: Serialize + ?Sized> Serialize for &T {
    fn serialize(&self, encoder: &mut Encoder) -> Result<(), Error> {
        (**self).serialize(encoder)
    }
}

impl<T: Serialize + ?Sized> Serialize for Box<T> {
    fn serialize(&self, encoder: &mut Encoder) -> Result<(), Error> {
        (**self).serialize(encoder)
    }
}

impl<T: Deserialize> Deserialize for Box<T> {
    fn deserialize<S: ByteSource>(decoder: &mut Decoder<S>) -> Result<Self, Error> {
        T::deserialize(decoder).map(Box::new)
    }
}

/// `None` is written as null.
impl<T: Serialize> Serialize for Option<T> {
    fn serialize(&self, encoder: &mut Encoder) -> Result<(), Error> {
        match self {
            Some(value) => value.serialize(encoder),
            None => {
                encoder.write_null();
                Ok(())
            }
        }
    }
}

impl<T: Deserialize> Deserialize for Option<T> {
    fn deserialize<S: ByteSource>(decoder: &mut Decoder<S>) -> Result<Self, Error> {
        if decoder.try_read_null()? {
            Ok(None)
        } else {
            T::deserialize(decoder).map(Some)
        }
    }
}

const LIST: &TypeInfo = &TypeInfo::list("List");
const DICTIONARY: &TypeInfo = &TypeInfo::dictionary("Dictionary");

impl<T: Serialize> Serialize for [T] {
    fn serialize(&self, encoder: &mut Encoder) -> Result<(), Error> {
        let mut list = encoder.write_collection(LIST, Some(self.len()))?;

        for element in self {
            list.write_element(element)?;
        }

        list.end()
    }
}

impl<T: Serialize> Serialize for Vec<T> {
    fn serialize(&self, encoder: &mut Encoder) -> Result<(), Error> {
        self.as_slice().serialize(encoder)
    }
}

impl<T: Deserialize> Deserialize for Vec<T> {
    fn deserialize<S: ByteSource>(decoder: &mut Decoder<S>) -> Result<Self, Error> {
        let mut list = decoder.read_collection(LIST)?;
        let mut out = Vec::with_capacity(list.len().min(MAX_PREALLOCATION));

        while let Some(element) = list.next_element()? {
            out.push(element);
        }

        Ok(out)
    }
}

impl<K: Serialize, V: Serialize> Serialize for BTreeMap<K, V> {
    fn serialize(&self, encoder: &mut Encoder) -> Result<(), Error> {
        let mut map = encoder.write_collection(DICTIONARY, Some(self.len()))?;

        for (key, value) in self {
            map.write_entry(key, value)?;
        }

        map.end()
    }
}

impl<K: Deserialize + Ord, V: Deserialize> Deserialize for BTreeMap<K, V> {
    fn deserialize<S: ByteSource>(decoder: &mut Decoder<S>) -> Result<Self, Error> {
        let mut map = decoder.read_collection(DICTIONARY)?;
        let mut out = BTreeMap::new();

        while let Some((key, value)) = map.next_entry()? {
            out.insert(key, value);
        }

        Ok(out)
    }
}

#[cfg(feature = "std")]
mod hash {
    use core::hash::{BuildHasher, Hash};
    use std::collections::HashMap;

    use super::*;

    impl<K, V, H> Serialize for HashMap<K, V, H>
    where
        K: Serialize,
        V: Serialize,
    {
        fn serialize(&self, encoder: &mut Encoder) -> Result<(), Error> {
            let mut map = encoder.write_collection(DICTIONARY, Some(self.len()))?;

            for (key, value) in self {
                map.write_entry(key, value)?;
            }

            map.end()
        }
    }

    impl<K, V, H> Deserialize for HashMap<K, V, H>
    where
        K: Deserialize + Eq + Hash,
        V: Deserialize,
        H: BuildHasher + Default,
    {
        fn deserialize<S: ByteSource>(decoder: &mut Decoder<S>) -> Result<Self, Error> {
            let mut map = decoder.read_collection(DICTIONARY)?;
            let len = map.len().min(MAX_PREALLOCATION);
            let mut out = HashMap::with_capacity_and_hasher(len, H::default());

            while let Some((key, value)) = map.next_entry()? {
                out.insert(key, value);
            }

            Ok(out)
        }
    }
}
