#![cfg(feature = "std")]

use cassette::avec::{Deserialize, Serialize, decode_slice, encode_vec};
use csv::ReaderBuilder;

const PATH: &str = "fixtures/literals.csv";

#[test]
fn encode_literals() {
    for (kind, value, bytes) in literals() {
        let encoded = match kind.as_str() {
            "bool" => encode(&value.parse::<bool>().unwrap()),
            "u64" => encode(&value.parse::<u64>().unwrap()),
            "i64" => encode(&value.parse::<i64>().unwrap()),
            "f32" => encode(&value.parse::<f32>().unwrap()),
            "f64" => encode(&value.parse::<f64>().unwrap()),
            "string" => encode(&value),
            "char" => encode(&value.parse::<char>().unwrap()),
            _ => panic!("unknown kind {kind}"),
        };

        assert_eq!(encoded, bytes, "{kind} {value}");
    }
}

#[test]
fn decode_literals() {
    for (kind, value, bytes) in literals() {
        match kind.as_str() {
            "bool" => check::<bool>(&value, &bytes),
            "u64" => check::<u64>(&value, &bytes),
            "i64" => check::<i64>(&value, &bytes),
            "f32" => check::<f32>(&value, &bytes),
            "f64" => check::<f64>(&value, &bytes),
            "string" => check::<String>(&value, &bytes),
            "char" => check::<char>(&value, &bytes),
            _ => panic!("unknown kind {kind}"),
        }
    }
}

/// Decoding through a reader yields the same values as decoding a slice.
#[test]
fn decode_literals_from_reader() {
    for (kind, value, bytes) in literals() {
        let mut r = bytes.as_slice();

        match kind.as_str() {
            "i64" => {
                let v: i64 = cassette::avec::decode_reader(&mut r).unwrap();
                assert_eq!(v.to_string(), value);
            }
            "string" => {
                let v: String = cassette::avec::decode_reader(&mut r).unwrap();
                assert_eq!(v, value);
            }
            _ => continue,
        }
    }
}

fn encode<T: Serialize + ?Sized>(value: &T) -> Vec<u8> {
    encode_vec(value).unwrap()
}

fn check<T>(value: &str, bytes: &[u8])
where
    T: Deserialize + std::str::FromStr + PartialEq + std::fmt::Debug,
    T::Err: std::fmt::Debug,
{
    let decoded: T = decode_slice(bytes).unwrap();
    assert_eq!(decoded, value.parse::<T>().unwrap(), "{value}");
}

fn literals() -> Vec<(String, String, Vec<u8>)> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .from_path(PATH)
        .unwrap();

    reader
        .records()
        .map(|r| {
            let r = r.unwrap();
            (r[0].to_string(), r[1].to_string(), hex(&r[2]))
        })
        .collect()
}

fn hex(s: &str) -> Vec<u8> {
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).unwrap())
        .collect()
}
