//! Canonical CBOR encoding for deterministic serialization.
//!
//! This module implements RFC 8949 Core Deterministic Encoding:
//! - Map keys sorted by encoded byte comparison
//! - Integers use smallest valid encoding
//! - Definite lengths only
//! - No floats (timestamps are u64 seconds)
//!
//! The canonical encoding is what makes transaction ids and signatures
//! stable: the same transaction produces identical bytes (and thus an
//! identical hash) no matter which platform built it.

use ciborium::value::Value;

use crate::error::CoreError;

/// Encode a CBOR Value to canonical bytes.
///
/// Fails on floats, tags, and duplicate map keys; none of those occur
/// in transaction encodings.
pub fn encode_canonical(value: &Value) -> Result<Vec<u8>, CoreError> {
    let mut buf = Vec::new();
    encode_value_to(&mut buf, value)?;
    Ok(buf)
}

/// Recursively encode a CBOR value.
fn encode_value_to(buf: &mut Vec<u8>, value: &Value) -> Result<(), CoreError> {
    match value {
        Value::Integer(i) => {
            encode_integer(buf, *i);
        }
        Value::Bytes(b) => {
            encode_bytes(buf, b);
        }
        Value::Text(s) => {
            encode_text(buf, s);
        }
        Value::Array(arr) => {
            encode_array(buf, arr)?;
        }
        Value::Map(entries) => {
            encode_map_canonical(buf, entries)?;
        }
        Value::Bool(b) => {
            buf.push(if *b { 0xf5 } else { 0xf4 });
        }
        Value::Null => {
            buf.push(0xf6);
        }
        Value::Float(_) => {
            return Err(CoreError::Encoding("floats are not canonical".into()));
        }
        _ => {
            return Err(CoreError::Encoding("unsupported value type".into()));
        }
    }
    Ok(())
}

/// Encode a CBOR integer (major types 0 and 1).
fn encode_integer(buf: &mut Vec<u8>, i: ciborium::value::Integer) {
    let n: i128 = i.into();

    if n >= 0 {
        // Major type 0: unsigned integer
        encode_uint(buf, 0, n as u64);
    } else {
        // Major type 1: negative integer
        // CBOR encodes -1 as 0, -2 as 1, etc.
        let abs = (-1 - n) as u64;
        encode_uint(buf, 1, abs);
    }
}

/// Encode an unsigned integer with the given major type.
fn encode_uint(buf: &mut Vec<u8>, major: u8, n: u64) {
    let mt = major << 5;
    if n < 24 {
        buf.push(mt | (n as u8));
    } else if n <= 0xff {
        buf.push(mt | 24);
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(mt | 25);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= 0xffffffff {
        buf.push(mt | 26);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

/// Encode a byte string (major type 2).
fn encode_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    encode_uint(buf, 2, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}

/// Encode a text string (major type 3).
fn encode_text(buf: &mut Vec<u8>, s: &str) {
    encode_uint(buf, 3, s.len() as u64);
    buf.extend_from_slice(s.as_bytes());
}

/// Encode an array (major type 4).
fn encode_array(buf: &mut Vec<u8>, arr: &[Value]) -> Result<(), CoreError> {
    encode_uint(buf, 4, arr.len() as u64);
    for item in arr {
        encode_value_to(buf, item)?;
    }
    Ok(())
}

/// Encode a map canonically (major type 5).
///
/// Keys are sorted by their encoded byte comparison. Duplicate keys are
/// rejected: a canonical map has exactly one value per key.
fn encode_map_canonical(buf: &mut Vec<u8>, entries: &[(Value, Value)]) -> Result<(), CoreError> {
    // Encode all keys first to sort by encoded bytes
    let mut key_value_pairs: Vec<(Vec<u8>, &Value)> = Vec::with_capacity(entries.len());
    for (k, v) in entries {
        let mut key_buf = Vec::new();
        encode_value_to(&mut key_buf, k)?;
        key_value_pairs.push((key_buf, v));
    }

    // Sort by encoded key bytes (lexicographic)
    key_value_pairs.sort_by(|a, b| a.0.cmp(&b.0));

    for pair in key_value_pairs.windows(2) {
        if pair[0].0 == pair[1].0 {
            return Err(CoreError::Encoding("duplicate map key".into()));
        }
    }

    // Write map header
    encode_uint(buf, 5, key_value_pairs.len() as u64);

    // Write sorted key-value pairs
    for (key_bytes, value) in key_value_pairs {
        buf.extend_from_slice(&key_bytes);
        encode_value_to(buf, value)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn encode_hex(value: &Value) -> String {
        hex::encode(encode_canonical(value).unwrap())
    }

    #[test]
    fn test_integer_encoding() {
        // Test smallest encoding for various integer sizes
        let mut buf = Vec::new();

        // 0-23: single byte
        encode_uint(&mut buf, 0, 0);
        assert_eq!(buf, vec![0x00]);

        buf.clear();
        encode_uint(&mut buf, 0, 23);
        assert_eq!(buf, vec![0x17]);

        // 24-255: two bytes
        buf.clear();
        encode_uint(&mut buf, 0, 24);
        assert_eq!(buf, vec![0x18, 24]);

        buf.clear();
        encode_uint(&mut buf, 0, 255);
        assert_eq!(buf, vec![0x18, 255]);

        // 256-65535: three bytes
        buf.clear();
        encode_uint(&mut buf, 0, 256);
        assert_eq!(buf, vec![0x19, 0x01, 0x00]);

        buf.clear();
        encode_uint(&mut buf, 0, 65535);
        assert_eq!(buf, vec![0x19, 0xff, 0xff]);

        // 32- and 64-bit widths
        buf.clear();
        encode_uint(&mut buf, 0, 65536);
        assert_eq!(buf, vec![0x1a, 0x00, 0x01, 0x00, 0x00]);

        buf.clear();
        encode_uint(&mut buf, 0, u64::from(u32::MAX) + 1);
        assert_eq!(buf, vec![0x1b, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00]);
    }

    #[test]
    fn test_negative_integer_encoding() {
        assert_eq!(encode_hex(&Value::Integer((-1).into())), "20");
        assert_eq!(encode_hex(&Value::Integer((-500).into())), "3901f3");
    }

    #[test]
    fn test_text_and_bytes_encoding() {
        assert_eq!(encode_hex(&Value::Text("abc".into())), "63616263");
        assert_eq!(encode_hex(&Value::Bytes(vec![1, 2, 3])), "43010203");
    }

    #[test]
    fn test_array_encoding() {
        let arr = Value::Array(vec![Value::Integer(1.into()), Value::Integer(2.into())]);
        assert_eq!(encode_hex(&arr), "820102");
    }

    #[test]
    fn test_map_integer_key_ordering() {
        // Insertion order must not leak into the encoding
        let forward = Value::Map(vec![
            (Value::Integer(0.into()), Value::Integer(0.into())),
            (Value::Integer(5.into()), Value::Integer(50.into())),
            (Value::Integer(8.into()), Value::Integer(80.into())),
        ]);
        let shuffled = Value::Map(vec![
            (Value::Integer(8.into()), Value::Integer(80.into())),
            (Value::Integer(0.into()), Value::Integer(0.into())),
            (Value::Integer(5.into()), Value::Integer(50.into())),
        ]);

        let bytes = encode_canonical(&forward).unwrap();
        assert_eq!(bytes, encode_canonical(&shuffled).unwrap());

        // Map header (3 entries), then keys in order 0, 5, 8
        assert_eq!(bytes[0], 0xa3);
        assert_eq!(bytes[1], 0x00);
        assert_eq!(bytes[3], 0x05);
        assert_eq!(bytes[6], 0x08);
    }

    #[test]
    fn test_map_text_key_ordering_is_bytewise() {
        // "z" encodes shorter than "aa", so it sorts first
        let map = Value::Map(vec![
            (Value::Text("aa".into()), Value::Integer(1.into())),
            (Value::Text("z".into()), Value::Integer(2.into())),
        ]);
        assert_eq!(encode_hex(&map), "a2617a0262616101");
    }

    #[test]
    fn test_duplicate_map_keys_rejected() {
        let map = Value::Map(vec![
            (Value::Text("cid".into()), Value::Integer(1.into())),
            (Value::Text("cid".into()), Value::Integer(2.into())),
        ]);
        assert!(encode_canonical(&map).is_err());
    }

    #[test]
    fn test_floats_rejected() {
        assert!(encode_canonical(&Value::Float(1.5)).is_err());
    }

    #[test]
    fn test_bool_and_null() {
        assert_eq!(encode_hex(&Value::Bool(true)), "f5");
        assert_eq!(encode_hex(&Value::Bool(false)), "f4");
        assert_eq!(encode_hex(&Value::Null), "f6");
    }

    proptest! {
        #[test]
        fn prop_map_encoding_ignores_insertion_order(entries in proptest::collection::btree_map(0u64..1000, 0u64..1000, 0..20)) {
            let forward: Vec<(Value, Value)> = entries
                .iter()
                .map(|(k, v)| (Value::Integer((*k).into()), Value::Integer((*v).into())))
                .collect();
            let mut reversed = forward.clone();
            reversed.reverse();

            let a = encode_canonical(&Value::Map(forward)).unwrap();
            let b = encode_canonical(&Value::Map(reversed)).unwrap();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_uint_encoding_is_minimal(n in 0u64..) {
            let bytes = encode_canonical(&Value::Integer(n.into())).unwrap();
            let expected_len = match n {
                0..=23 => 1,
                24..=0xff => 2,
                0x100..=0xffff => 3,
                0x10000..=0xffff_ffff => 5,
                _ => 9,
            };
            prop_assert_eq!(bytes.len(), expected_len);
        }
    }
}
