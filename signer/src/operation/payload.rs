//! # Payload Sniffing
//!
//! Bytecode and call parameters arrive from third-party integrations in
//! wildly inconsistent encodings: JSON byte maps, JSON arrays, Base64, hex,
//! or plain text. Rather than guessing, each input kind has an ordered table
//! of decoders tried front to back; the first one that accepts the input
//! wins, and the final entry decodes the raw UTF-8 bytes so the chain never
//! silently substitutes an empty payload.
//!
//! The priority order is contract, not implementation detail. Integrations
//! depend on `"1234"` meaning hex for bytecode but Base64 for parameters,
//! because that is what deployed wallets have always done.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use thiserror::Error;

/// Errors from payload decoding.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    /// Every decoder in the table declined the input. Unreachable while the
    /// tables end in the raw-UTF-8 decoder; kept so removing that tail stays
    /// an API-visible decision rather than a silent behavior change.
    #[error("no decoder accepted the payload input")]
    ParameterDecodeFailed,
}

/// One candidate decoder: returns `None` to pass the input to the next
/// entry in the table.
type Decoder = fn(&str) -> Option<Vec<u8>>;

/// Bytecode inputs: JSON numeric array, then hex, then Base64, then raw
/// UTF-8.
const BYTECODE_DECODERS: &[Decoder] = &[numeric_array, strict_hex, standard_base64, raw_utf8];

/// Call-parameter inputs: indexed JSON object, JSON numeric array, Base64,
/// hex, then raw UTF-8. Note the Base64/hex order is flipped relative to
/// bytecode; both orders are load-bearing for existing integrations.
const PARAMETER_DECODERS: &[Decoder] = &[
    indexed_object,
    numeric_array,
    standard_base64,
    strict_hex,
    raw_utf8,
];

/// Decodes a bytecode input string into raw bytes.
pub fn decode_bytecode(input: &str) -> Result<Vec<u8>, PayloadError> {
    run(BYTECODE_DECODERS, input)
}

/// Decodes a contract-call parameter string into raw bytes.
///
/// An empty input legitimately decodes to zero bytes (a call with no
/// arguments).
pub fn decode_parameter(input: &str) -> Result<Vec<u8>, PayloadError> {
    run(PARAMETER_DECODERS, input)
}

fn run(decoders: &[Decoder], input: &str) -> Result<Vec<u8>, PayloadError> {
    decoders
        .iter()
        .find_map(|decode| decode(input))
        .ok_or(PayloadError::ParameterDecodeFailed)
}

// ---------------------------------------------------------------------------
// Decoders
// ---------------------------------------------------------------------------

/// A JSON object whose keys are all numeric strings: `{"0":65,"1":66}`.
/// Keys must form a contiguous 0..n range and values must be bytes.
fn indexed_object(input: &str) -> Option<Vec<u8>> {
    if !input.trim_start().starts_with('{') {
        return None;
    }
    let map: serde_json::Map<String, serde_json::Value> = serde_json::from_str(input).ok()?;

    let mut entries = Vec::with_capacity(map.len());
    for (key, value) in &map {
        let index: usize = key.parse().ok()?;
        let byte = value.as_u64().and_then(|v| u8::try_from(v).ok())?;
        entries.push((index, byte));
    }
    entries.sort_unstable_by_key(|&(index, _)| index);
    if entries.iter().enumerate().any(|(position, &(index, _))| position != index) {
        return None;
    }
    Some(entries.into_iter().map(|(_, byte)| byte).collect())
}

/// A JSON array of byte values: `[65,66]`.
fn numeric_array(input: &str) -> Option<Vec<u8>> {
    if !input.trim_start().starts_with('[') {
        return None;
    }
    let values: Vec<i64> = serde_json::from_str(input).ok()?;
    values
        .into_iter()
        .map(|value| u8::try_from(value).ok())
        .collect()
}

/// A non-empty, even-length, all-hex-digit string.
fn strict_hex(input: &str) -> Option<Vec<u8>> {
    if input.is_empty() || input.len() % 2 != 0 {
        return None;
    }
    if !input.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    hex::decode(input).ok()
}

/// Standard (padded) Base64.
fn standard_base64(input: &str) -> Option<Vec<u8>> {
    if input.is_empty() {
        return None;
    }
    BASE64.decode(input).ok()
}

/// The unconditional tail: the input's own UTF-8 bytes.
fn raw_utf8(input: &str) -> Option<Vec<u8>> {
    Some(input.as_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_indexed_object() {
        assert_eq!(decode_parameter(r#"{"0":65,"1":66}"#), Ok(vec![65, 66]));
    }

    #[test]
    fn parameter_object_keys_may_arrive_unordered() {
        assert_eq!(
            decode_parameter(r#"{"2":67,"0":65,"1":66}"#),
            Ok(vec![65, 66, 67])
        );
    }

    #[test]
    fn parameter_numeric_array() {
        assert_eq!(decode_parameter("[65,66]"), Ok(vec![65, 66]));
    }

    #[test]
    fn parameter_base64() {
        assert_eq!(decode_parameter("QQ=="), Ok(vec![0x41]));
    }

    #[test]
    fn parameter_prefers_base64_over_hex() {
        // "1234" is valid in both encodings; the parameter table tries
        // Base64 first.
        assert_eq!(decode_parameter("1234"), Ok(BASE64.decode("1234").unwrap()));
    }

    #[test]
    fn parameter_hex_when_base64_declines() {
        // Odd-length hex-looking strings are invalid Base64 (bad padding)
        // and invalid hex (odd length), so they fall through to UTF-8...
        assert_eq!(decode_parameter("abc"), Ok(b"abc".to_vec()));
        // ...while six hex digits violate Base64 padding rules and land on
        // the hex decoder.
        assert_eq!(decode_parameter("00ffee"), Ok(vec![0x00, 0xff, 0xee]));
    }

    #[test]
    fn parameter_falls_back_to_utf8() {
        assert_eq!(decode_parameter("hello!"), Ok(b"hello!".to_vec()));
    }

    #[test]
    fn empty_parameter_is_zero_bytes() {
        // A call with no arguments: every structured decoder declines and
        // the UTF-8 tail produces an empty payload.
        assert_eq!(decode_parameter(""), Ok(vec![]));
    }

    #[test]
    fn malformed_object_falls_through() {
        // Non-numeric keys disqualify the indexed-object decoder; the input
        // ends up as raw UTF-8, not an error.
        let input = r#"{"name":"mint"}"#;
        assert_eq!(decode_parameter(input), Ok(input.as_bytes().to_vec()));
    }

    #[test]
    fn sparse_object_falls_through() {
        // A gap in the index range means the object is not a byte array.
        let input = r#"{"0":65,"2":66}"#;
        assert_eq!(decode_parameter(input), Ok(input.as_bytes().to_vec()));
    }

    #[test]
    fn out_of_range_array_values_fall_through() {
        let input = "[65,256]";
        assert_eq!(decode_parameter(input), Ok(input.as_bytes().to_vec()));
    }

    #[test]
    fn bytecode_numeric_array() {
        assert_eq!(decode_bytecode("[0,1,255]"), Ok(vec![0, 1, 255]));
    }

    #[test]
    fn bytecode_prefers_hex_over_base64() {
        // Same ambiguous input as the parameter test, opposite winner.
        assert_eq!(decode_bytecode("1234"), Ok(vec![0x12, 0x34]));
    }

    #[test]
    fn bytecode_base64() {
        assert_eq!(decode_bytecode("3q0="), Ok(vec![0xde, 0xad]));
    }

    #[test]
    fn bytecode_falls_back_to_utf8() {
        assert_eq!(decode_bytecode("(module)"), Ok(b"(module)".to_vec()));
    }

    #[test]
    fn broken_json_array_falls_through() {
        // Leading '[' but unparseable: the array decoder declines and the
        // input survives as its own bytes.
        let input = "[junk";
        assert_eq!(decode_bytecode(input), Ok(input.as_bytes().to_vec()));
    }
}
