//! Low-level byte codecs shared by every wire-facing module.
//!
//! Two codecs live here: unsigned LEB128 varints (every integer inside an
//! operation body) and Base58Check (every textual identity form). Both are
//! pure functions with no I/O; everything above them builds on these.

pub mod base58check;
pub mod varint;

pub use base58check::{decode, decode_check, encode, encode_check, Base58Error};
pub use varint::{decode_varint, encode_varint, encode_varint_into, VarintError};
