//! # Addresses
//!
//! A Meridian address is a blake3 hash of a versioned public key, wrapped in
//! one of two textual envelopes:
//!
//! - `AU…` for externally-owned (user) addresses
//! - `AS…` for smart-contract addresses
//!
//! The part after the two-character prefix is
//! `Base58Check(version || hash)`. Inside operation bodies an address
//! travels as exactly 34 raw bytes: `[kind][version][hash]`. That length is
//! an invariant of the wire format; nothing downstream re-checks it.

use std::fmt;
use std::str::FromStr;

use super::keys::PublicKey;
use super::IdentityError;
use crate::codec::base58check;
use crate::config::{
    ADDRESS_BINARY_LENGTH, ADDRESS_HASH_LENGTH, CONTRACT_ADDRESS_PREFIX, IDENTITY_VERSION,
    USER_ADDRESS_PREFIX,
};

// ---------------------------------------------------------------------------
// AddressKind
// ---------------------------------------------------------------------------

/// The two kinds of on-chain identity an address can denote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressKind {
    /// Externally-owned account, controlled by a keypair.
    User,
    /// Smart contract, controlled by code.
    Contract,
}

impl AddressKind {
    /// The kind byte used in the 34-byte binary form.
    pub const fn kind_byte(self) -> u8 {
        match self {
            AddressKind::User => 0,
            AddressKind::Contract => 1,
        }
    }

    /// The two-character textual prefix.
    pub const fn prefix(self) -> &'static str {
        match self {
            AddressKind::User => USER_ADDRESS_PREFIX,
            AddressKind::Contract => CONTRACT_ADDRESS_PREFIX,
        }
    }

    /// Inverse of [`kind_byte`](Self::kind_byte).
    pub fn from_kind_byte(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(AddressKind::User),
            1 => Some(AddressKind::Contract),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Address
// ---------------------------------------------------------------------------

/// A decoded Meridian address.
///
/// Holds the kind, the version byte, and the 32-byte hash. Construct one by
/// parsing a textual address ([`Address::from_text`]) or by hashing a public
/// key ([`Address::from_public_key`]); there is no way to build one with a
/// wrong-sized hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address {
    kind: AddressKind,
    version: u8,
    hash: [u8; ADDRESS_HASH_LENGTH],
}

impl Address {
    /// Parses a textual address (`AU…` or `AS…`).
    ///
    /// The payload after the prefix must Base58Check-decode to exactly
    /// version byte plus 32 hash bytes; the checksum is verified in the
    /// process.
    pub fn from_text(text: &str) -> Result<Self, IdentityError> {
        let (kind, encoded) = if let Some(rest) = text.strip_prefix(USER_ADDRESS_PREFIX) {
            (AddressKind::User, rest)
        } else if let Some(rest) = text.strip_prefix(CONTRACT_ADDRESS_PREFIX) {
            (AddressKind::Contract, rest)
        } else {
            return Err(IdentityError::InvalidAddressPrefix);
        };

        let payload = base58check::decode_check(encoded)?;
        if payload.len() != 1 + ADDRESS_HASH_LENGTH {
            return Err(IdentityError::InvalidAddressLength);
        }

        let mut hash = [0u8; ADDRESS_HASH_LENGTH];
        hash.copy_from_slice(&payload[1..]);
        Ok(Self {
            kind,
            version: payload[0],
            hash,
        })
    }

    /// Derives the user address controlled by `public_key`.
    ///
    /// The hash covers the 33-byte versioned key form, not the bare key, so
    /// a future key-version bump changes the derived address.
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        Self {
            kind: AddressKind::User,
            version: IDENTITY_VERSION,
            hash: *blake3::hash(&public_key.versioned_bytes()).as_bytes(),
        }
    }

    /// Reconstructs an address from its 34-byte binary form.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, IdentityError> {
        if bytes.len() != ADDRESS_BINARY_LENGTH {
            return Err(IdentityError::InvalidAddressLength);
        }
        let kind =
            AddressKind::from_kind_byte(bytes[0]).ok_or(IdentityError::InvalidAddressPrefix)?;
        let mut hash = [0u8; ADDRESS_HASH_LENGTH];
        hash.copy_from_slice(&bytes[2..]);
        Ok(Self {
            kind,
            version: bytes[1],
            hash,
        })
    }

    /// The 34-byte binary form embedded in operation bodies:
    /// `[kind][version][hash]`.
    pub fn to_bytes(&self) -> [u8; ADDRESS_BINARY_LENGTH] {
        let mut out = [0u8; ADDRESS_BINARY_LENGTH];
        out[0] = self.kind.kind_byte();
        out[1] = self.version;
        out[2..].copy_from_slice(&self.hash);
        out
    }

    /// The textual form: prefix plus `Base58Check(version || hash)`.
    pub fn to_text(&self) -> String {
        let mut payload = Vec::with_capacity(1 + ADDRESS_HASH_LENGTH);
        payload.push(self.version);
        payload.extend_from_slice(&self.hash);
        format!("{}{}", self.kind.prefix(), base58check::encode_check(&payload))
    }

    /// The address kind.
    pub fn kind(&self) -> AddressKind {
        self.kind
    }

    /// The version byte.
    pub fn version(&self) -> u8 {
        self.version
    }

    /// The raw 32-byte hash.
    pub fn hash(&self) -> &[u8; ADDRESS_HASH_LENGTH] {
        &self.hash
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

impl FromStr for Address {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_text(s)
    }
}
