//! # Base58Check Codec
//!
//! Base58 text encoding with a 4-byte integrity checksum, used for every
//! textual identity form on the chain: addresses, public keys, secret keys,
//! and signatures. The alphabet is the Bitcoin one
//! (`123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz`, i.e. no
//! `0`, `O`, `I`, or `l`), and each leading zero byte of the payload encodes
//! as one leading `1` character.
//!
//! The checksum is the first four bytes of `SHA-256(SHA-256(payload))`,
//! appended before encoding. Decoding **always** recomputes and compares it;
//! a string whose tail does not match is rejected, never silently accepted.
//! Catching a mistyped address at decode time is the whole point of the
//! construction.

use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::config::CHECKSUM_LENGTH;

/// Errors from Base58 / Base58Check decoding.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Base58Error {
    /// The string contains a character outside the Base58 alphabet.
    #[error("invalid base58 character {character:?} at index {index}")]
    InvalidCharacter { character: char, index: usize },

    /// The trailing 4 checksum bytes do not match the payload.
    #[error("base58check checksum mismatch")]
    ChecksumMismatch,

    /// The decoded data is too short to even contain a checksum.
    #[error("base58check payload is too short")]
    TooShort,
}

fn map_error(err: bs58::decode::Error) -> Base58Error {
    use bs58::decode::Error;
    match err {
        Error::InvalidCharacter { character, index } => {
            Base58Error::InvalidCharacter { character, index }
        }
        // Non-ASCII bytes have no single offending char to report.
        Error::NonAsciiCharacter { index } => Base58Error::InvalidCharacter {
            character: char::REPLACEMENT_CHARACTER,
            index,
        },
        Error::InvalidChecksum { .. } => Base58Error::ChecksumMismatch,
        _ => Base58Error::TooShort,
    }
}

/// Computes the Base58Check checksum of `payload`: the first four bytes of a
/// double SHA-256.
///
/// Exposed so callers (and tests) can pin the construction independently of
/// the encoding path.
pub fn checksum(payload: &[u8]) -> [u8; CHECKSUM_LENGTH] {
    let first = Sha256::digest(payload);
    let second = Sha256::digest(first);
    let mut out = [0u8; CHECKSUM_LENGTH];
    out.copy_from_slice(&second[..CHECKSUM_LENGTH]);
    out
}

/// Encodes raw bytes as plain Base58, no checksum.
pub fn encode(data: &[u8]) -> String {
    bs58::encode(data).into_string()
}

/// Decodes plain Base58 back to bytes. Fails on any character outside the
/// alphabet, including visually-confusable ones like `0` and `O`.
pub fn decode(text: &str) -> Result<Vec<u8>, Base58Error> {
    bs58::decode(text).into_vec().map_err(map_error)
}

/// Encodes `payload || checksum(payload)` as Base58.
pub fn encode_check(payload: &[u8]) -> String {
    bs58::encode(payload).with_check().into_string()
}

/// Decodes a Base58Check string, verifies the trailing checksum, and returns
/// the payload with the checksum stripped.
pub fn decode_check(text: &str) -> Result<Vec<u8>, Base58Error> {
    bs58::decode(text).with_check(None).into_vec().map_err(map_error)
}
