#![cfg(feature = "std")]

use std::{
    collections::{BTreeMap, HashMap},
    io::{self, Read},
};

use cassette::{
    Error,
    avec::{ByteBuf, Bytes, Deserialize, Serialize, decode_reader, decode_slice, encode_vec},
    sans::{Decoder, Either, Encoder, Expected, SliceSource, TypeInfo},
};
use quickcheck_macros::quickcheck;

fn round_trip<T: Serialize + Deserialize>(value: &T) -> T {
    decode_slice(&encode_vec(value).unwrap()).unwrap()
}

#[test]
fn tier_boundaries() {
    let cases: [(u64, usize); 8] = [
        (0, 1),
        (23, 1),
        (24, 2),
        (255, 2),
        (256, 3),
        (65535, 3),
        (65536, 5),
        (u32::MAX as u64 + 1, 9),
    ];

    for (value, len) in cases {
        let bytes = encode_vec(&value).unwrap();
        assert_eq!(bytes.len(), len, "{value}");
        assert_eq!(decode_slice::<u64>(&bytes).unwrap(), value);
    }
}

#[test]
fn negative_boundaries() {
    assert_eq!(encode_vec(&-1i32).unwrap(), [0x20]);
    assert_eq!(encode_vec(&-23i32).unwrap(), [0x36]);
    assert_eq!(encode_vec(&-24i32).unwrap(), [0x38, 0xe8]);

    for value in [-1i64, -23, -24, -25, -128, -129, i16::MIN as i64, i64::MIN] {
        assert_eq!(round_trip(&value), value);
    }
}

#[test]
fn inline_negative_extreme() {
    // Never written, but read as -24.
    assert_eq!(decode_slice::<i8>(&[0x37]).unwrap(), -24);
}

#[test]
fn narrow_reads_accept_any_fitting_tier() {
    // 7 written in a two-byte tier still reads as a u8.
    assert_eq!(decode_slice::<u8>(&[0x19, 0x00, 0x07]).unwrap(), 7);
    assert_eq!(decode_slice::<i16>(&[0x18, 0xff]).unwrap(), 255);
}

#[test]
fn out_of_range() {
    let err = decode_slice::<u8>(&encode_vec(&256u16).unwrap()).unwrap_err();
    assert!(matches!(
        err,
        Error::OutOfRange {
            tag: 0x19,
            expected: Expected::U8
        }
    ));

    let err = decode_slice::<u32>(&encode_vec(&-1i32).unwrap()).unwrap_err();
    assert!(matches!(err, Error::OutOfRange { tag: 0x20, .. }));

    let err = decode_slice::<i64>(&encode_vec(&u64::MAX).unwrap()).unwrap_err();
    assert!(matches!(err, Error::OutOfRange { .. }));

    // A negative tier holding a non-negative value.
    let err = decode_slice::<i32>(&[0x38, 0x05]).unwrap_err();
    assert!(matches!(err, Error::OutOfRange { tag: 0x38, .. }));
}

#[test]
fn tag_mismatch() {
    let err = decode_slice::<bool>(&[0x01]).unwrap_err();
    assert!(matches!(
        err,
        Error::TagMismatch {
            tag: 0x01,
            expected: Expected::Bool
        }
    ));

    let err = decode_slice::<i32>(&[0x65]).unwrap_err();
    assert!(matches!(err, Error::TagMismatch { tag: 0x65, .. }));

    let err = decode_slice::<f32>(&encode_vec(&1.0f64).unwrap()).unwrap_err();
    assert!(matches!(
        err,
        Error::TagMismatch {
            tag: 0xfb,
            expected: Expected::F32
        }
    ));
}

#[test]
fn floats() {
    assert!(round_trip(&f64::NAN).is_nan());
    assert!(round_trip(&f32::NAN).is_nan());
    assert_eq!(round_trip(&f64::INFINITY), f64::INFINITY);
    assert_eq!(round_trip(&f32::NEG_INFINITY), f32::NEG_INFINITY);
    assert_eq!(round_trip(&-0.0f64).to_bits(), (-0.0f64).to_bits());
}

#[test]
fn strings() {
    let long = "x".repeat(100);
    let bytes = encode_vec(&long).unwrap();
    assert_eq!(&bytes[..2], [0x78, 100]);
    assert_eq!(bytes.len(), 102);
    assert_eq!(round_trip(&long), long);

    let longer = "y".repeat(300);
    let bytes = encode_vec(&longer).unwrap();
    assert_eq!(&bytes[..3], [0x79, 0x01, 0x2c]);
    assert_eq!(round_trip(&longer), longer);

    assert_eq!(round_trip(&String::new()), "");
    assert_eq!(round_trip(&"日本語".to_string()), "日本語");
}

#[test]
fn wide_length_prefixes() {
    let err = decode_slice::<String>(&[0x7b, 0, 0, 0, 0, 0, 0, 0, 1, b'a']).unwrap_err();
    assert!(matches!(err, Error::WideLength));

    let err = decode_slice::<ByteBuf>(&[0x5b, 0, 0, 0, 0, 0, 0, 0, 1, 0x07]).unwrap_err();
    assert!(matches!(err, Error::WideLength));

    let err = decode_slice::<BTreeMap<u8, u8>>(&[0xbb, 0, 0, 0, 0, 0, 0, 0, 1, 1, 2]).unwrap_err();
    assert!(matches!(err, Error::WideLength));
}

#[test]
fn invalid_utf8() {
    let err = decode_slice::<String>(&[0x62, 0xc3, 0x28]).unwrap_err();
    assert!(matches!(err, Error::Utf8(_)));
}

#[test]
fn chars() {
    assert_eq!(round_trip(&'é'), 'é');

    let err = decode_slice::<char>(&encode_vec("ab").unwrap()).unwrap_err();
    assert!(matches!(err, Error::NotAChar(2)));
}

#[test]
fn null_strings() {
    let none: Option<String> = None;
    assert_eq!(encode_vec(&none).unwrap(), [0xf6]);
    assert_eq!(decode_slice::<Option<String>>(&[0xf6]).unwrap(), None);

    let some = Some("hello".to_string());
    assert_eq!(encode_vec(&some).unwrap(), encode_vec("hello").unwrap());
    assert_eq!(round_trip(&some), some);
}

#[test]
fn utf16_strings() {
    let text = "héllo, 世界 🎉";
    let units: Vec<u16> = text.encode_utf16().collect();

    let mut encoder = Encoder::new();
    encoder.write_utf16(&units).unwrap();
    let bytes = encoder.into_vec();

    // The prefix reserved for the worst case is closed up after encoding.
    assert_eq!(bytes, encode_vec(text).unwrap());
    assert_eq!(decode_slice::<String>(&bytes).unwrap(), text);
}

#[test]
fn utf16_prefix_shrinks_across_tiers() {
    // 10 units could need 30 bytes (a one-byte length), but need only 10.
    let units: Vec<u16> = "abcdefghij".encode_utf16().collect();
    let mut encoder = Encoder::new();
    encoder.write_utf16(&units).unwrap();
    assert_eq!(encoder.as_bytes()[0], 0x6a);
    assert_eq!(encoder.as_bytes().len(), 11);
}

#[test]
fn utf16_unpaired_surrogate() {
    let mut encoder = Encoder::new();
    encoder.write_bool(true);

    let err = encoder.write_utf16(&[0x61, 0xd800]).unwrap_err();
    assert!(matches!(err, Error::Utf16(0xd800)));

    // Nothing from the failed string is kept.
    assert_eq!(encoder.as_bytes(), [0xf5]);
}

#[test]
fn byte_strings() {
    let data = vec![1u8, 2, 3];
    let bytes = encode_vec(&Bytes(&data)).unwrap();
    assert_eq!(bytes, [0xc4, 3, 1, 2, 3]);
    assert_eq!(decode_slice::<ByteBuf>(&bytes).unwrap().0, data);

    let big = ByteBuf(vec![7; 300]);
    let bytes = encode_vec(&big).unwrap();
    assert_eq!(&bytes[..3], [0xc5, 0x01, 0x2c]);
    assert_eq!(round_trip(&big), big);

    // The length-prefixed major class is also accepted.
    assert_eq!(decode_slice::<ByteBuf>(&[0x42, 9, 8]).unwrap().0, [9, 8]);
}

#[test]
fn lists() {
    let empty: Vec<u32> = vec![];
    assert_eq!(encode_vec(&empty).unwrap(), [0x90]);
    assert_eq!(round_trip(&empty), empty);

    let small = vec![1u32, 2, 3];
    assert_eq!(encode_vec(&small).unwrap(), [0x93, 1, 2, 3]);

    let large: Vec<u32> = (0..1000).collect();
    let bytes = encode_vec(&large).unwrap();
    assert_eq!(&bytes[..3], [0xdc, 0x03, 0xe8]);
    assert_eq!(round_trip(&large), large);

    let nested = vec![vec!["a".to_string()], vec![], vec!["b".into(), "c".into()]];
    assert_eq!(round_trip(&nested), nested);
}

#[test]
fn hostile_list_length() {
    // A declared length far beyond the input fails without allocating it.
    let err = decode_slice::<Vec<u8>>(&[0xdd, 0xff, 0xff, 0xff, 0xff, 0x01]).unwrap_err();
    assert!(matches!(err, Error::EndOfInput));
}

#[test]
fn dictionaries() {
    let mut map = BTreeMap::new();
    map.insert("one".to_string(), 1u8);
    map.insert("two".to_string(), 2u8);

    let bytes = encode_vec(&map).unwrap();
    assert_eq!(bytes[0], 0xa2);
    assert_eq!(round_trip(&map), map);

    let mut hashed: HashMap<u32, Vec<bool>> = HashMap::new();
    hashed.insert(7, vec![true, false]);
    hashed.insert(700, vec![]);
    assert_eq!(round_trip(&hashed), hashed);
}

#[test]
fn legacy_dictionary_header() {
    let map: BTreeMap<u8, bool> = decode_slice(&[0xdf, 0, 0, 0, 1, 0x05, 0xf5]).unwrap();
    assert_eq!(map.get(&5), Some(&true));
}

#[test]
fn truncated_input() {
    let bytes = encode_vec(&vec!["hello".to_string(), "world".to_string()]).unwrap();

    for len in 0..bytes.len() {
        let err = decode_slice::<Vec<String>>(&bytes[..len]).unwrap_err();
        assert!(matches!(err, Error::EndOfInput), "{len}: {err}");
    }
}

#[test]
fn trailing_bytes() {
    let err = decode_slice::<bool>(&[0xf5, 0x00, 0x00]).unwrap_err();
    assert!(matches!(err, Error::TrailingBytes(2)));
}

#[test]
fn consumes_exactly_one_value() {
    let mut encoder = Encoder::new();
    encoder.write_str("first").unwrap();
    encoder.write_u32(70000);
    encoder.write_bool(false);
    let bytes = encoder.into_vec();

    let mut decoder = Decoder::new(SliceSource::new(&bytes)).unwrap();
    assert_eq!(decoder.read_str().unwrap(), "first");
    assert_eq!(decoder.source().position(), 6);
    assert_eq!(decoder.read_u32().unwrap(), 70000);
    assert_eq!(decoder.source().position(), 11);
    assert!(!decoder.read_bool().unwrap());
    assert!(decoder.source().remaining().is_empty());
}

#[test]
fn collection_reader_yields_declared_members() {
    const LIST: &TypeInfo = &TypeInfo::list("List");

    let mut encoder = Encoder::new();
    encoder.write_value(&vec![10u16, 20, 30]).unwrap();
    encoder.write_bool(true);
    let bytes = encoder.into_vec();

    let mut decoder = Decoder::new(SliceSource::new(&bytes)).unwrap();
    let mut list = decoder.read_collection(LIST).unwrap();
    assert_eq!(list.len(), 3);

    let mut seen = vec![];
    while let Some(v) = list.next_element::<u16>().unwrap() {
        seen.push(v);
    }

    assert_eq!(seen, [10, 20, 30]);
    assert!(list.is_empty());
    assert!(decoder.read_bool().unwrap());
}

#[test]
fn hand_written_record() {
    struct Pair {
        name: String,
        count: u16,
    }

    const INFO: &TypeInfo = &TypeInfo::record("Pair", &["Name", "Count"]);

    impl Serialize for Pair {
        fn serialize(&self, encoder: &mut Encoder) -> Result<(), Error> {
            let mut record = encoder.write_record(INFO)?;
            record.write_field(0, &self.name)?;
            record.write_field(1, &self.count)?;
            record.end()
        }
    }

    impl Deserialize for Pair {
        fn deserialize<S: cassette::sans::ByteSource>(
            decoder: &mut Decoder<S>,
        ) -> Result<Self, Error> {
            let mut record = decoder.read_record(INFO)?;
            let (mut name, mut count) = (None, None);

            while let Some(field) = record.next_field()? {
                match field {
                    Either::Left(0) => name = Some(record.read_value()?),
                    Either::Left(1) => count = Some(record.read_value()?),
                    other => return Err(record.unknown_field(other)),
                }
            }

            Ok(Self {
                name: name.unwrap_or_default(),
                count: count.unwrap_or_default(),
            })
        }
    }

    // Fields written in reverse order are still routed by name.
    let bytes = [
        0xa2, 0x65, b'C', b'o', b'u', b'n', b't', 0x19, 0x01, 0x00, 0x64, b'N', b'a', b'm', b'e',
        0x62, b'h', b'i',
    ];
    let pair: Pair = decode_slice(&bytes).unwrap();
    assert_eq!(pair.name, "hi");
    assert_eq!(pair.count, 256);

    let encoded = encode_vec(&pair).unwrap();
    assert_eq!(&encoded[..6], [0xa2, 0x64, b'N', b'a', b'm', b'e']);
}

#[test]
fn record_writer_checks_order() {
    const INFO: &TypeInfo = &TypeInfo::record("Pair", &["A", "B"]);

    let mut encoder = Encoder::new();
    let mut record = encoder.write_record(INFO).unwrap();
    let err = record.write_field(1, &0u8).unwrap_err();
    assert!(matches!(
        err,
        Error::FieldOrder {
            expected: 0,
            found: 1,
            ..
        }
    ));

    let mut encoder = Encoder::new();
    let mut record = encoder.write_record(INFO).unwrap();
    record.write_field(0, &0u8).unwrap();
    let err = record.end().unwrap_err();
    assert!(matches!(err, Error::MissingField { field: "B", .. }));
}

#[test]
fn collection_writer_checks_length() {
    const LIST: &TypeInfo = &TypeInfo::list("List");

    let mut encoder = Encoder::new();
    let err = encoder.write_collection(LIST, None).unwrap_err();
    assert!(matches!(err, Error::UnknownLength));

    let mut list = encoder.write_collection(LIST, Some(2)).unwrap();
    list.write_element(&1u8).unwrap();
    let err = list.end().unwrap_err();
    assert!(matches!(
        err,
        Error::LengthMismatch {
            declared: 2,
            written: 1
        }
    ));
}

#[test]
fn descriptor_kind_is_checked() {
    const LIST: &TypeInfo = &TypeInfo::list("List");

    let mut encoder = Encoder::new();
    assert!(matches!(
        encoder.write_record(LIST).unwrap_err(),
        Error::KindMismatch { ty: "List", .. }
    ));
}

#[test]
fn skipping_is_unsupported() {
    const INFO: &TypeInfo = &TypeInfo::record("Empty", &[]);

    let bytes = [0xa1, 0x61, b'Z', 0x01];
    let mut decoder = Decoder::new(SliceSource::new(&bytes)).unwrap();
    let mut record = decoder.read_record(INFO).unwrap();

    let field = record.next_field().unwrap();
    assert_eq!(field, Some(Either::Right("Z".to_string())));
    assert!(matches!(record.skip_value(), Err(Error::SkipUnsupported)));
}

/// A reader returning one byte at a time, interrupted before every byte.
struct Trickle<'a> {
    data: &'a [u8],
    interrupt: bool,
}

impl Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.interrupt = !self.interrupt;
        if self.interrupt {
            return Err(io::ErrorKind::Interrupted.into());
        }

        match (self.data.split_first(), buf.first_mut()) {
            (Some((&b, rest)), Some(slot)) => {
                *slot = b;
                self.data = rest;
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

#[test]
fn decode_from_trickling_reader() {
    let value = vec!["a".repeat(20_000), "b".to_string()];
    let bytes = encode_vec(&value).unwrap();

    let mut reader = Trickle {
        data: &bytes,
        interrupt: false,
    };
    let decoded: Vec<String> = decode_reader(&mut reader).unwrap();
    assert_eq!(decoded, value);
}

#[test]
fn reader_end_of_input() {
    let bytes = encode_vec("truncated").unwrap();
    let err = decode_reader::<String>(&mut &bytes[..4]).unwrap_err();
    assert!(matches!(err, Error::EndOfInput));
}

#[test]
fn encode_to_writer() {
    let mut out = Vec::new();
    cassette::avec::encode_writer(&mut out, &vec![1u8, 2]).unwrap();
    assert_eq!(out, [0x92, 1, 2]);
}

#[quickcheck]
fn integers_round_trip(a: i64, b: u64, c: i16) -> bool {
    round_trip(&a) == a && round_trip(&b) == b && round_trip(&c) == c
}

#[quickcheck]
fn proper_prefixes_end_early(list: Vec<String>) -> bool {
    let bytes = encode_vec(&list).unwrap();

    (0..bytes.len()).all(|len| {
        matches!(
            decode_slice::<Vec<String>>(&bytes[..len]),
            Err(Error::EndOfInput)
        )
    })
}

#[quickcheck]
fn strings_round_trip(s: String) -> bool {
    round_trip(&s) == s
}

#[quickcheck]
fn utf16_matches_utf8(s: String) -> bool {
    let units: Vec<u16> = s.encode_utf16().collect();
    let mut encoder = Encoder::new();
    encoder.write_utf16(&units).unwrap();
    encoder.as_bytes() == encode_vec(&s).unwrap()
}

#[quickcheck]
fn collections_round_trip(list: Vec<Option<i32>>, map: BTreeMap<String, u16>) -> bool {
    round_trip(&list) == list && round_trip(&map) == map
}

#[quickcheck]
fn floats_round_trip_bitwise(a: f64, b: f32) -> bool {
    round_trip(&a).to_bits() == a.to_bits() && round_trip(&b).to_bits() == b.to_bits()
}
