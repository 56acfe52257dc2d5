//! On-chain identity: addresses, keypairs, public keys, and signatures.
//!
//! Everything in this module is a thin, strongly-typed layer over the
//! Base58Check codec plus Ed25519. The textual forms are what users see and
//! paste; the binary forms are what operations embed. Both are fixed by the
//! chain and must round-trip exactly.

pub mod address;
pub mod keys;

pub use address::{Address, AddressKind};
pub use keys::{Keypair, PublicKey, Signature};

use thiserror::Error;

use crate::codec::Base58Error;

/// Errors from parsing or re-encoding identity material.
///
/// Messages name the field, not the value: key and address strings are
/// user-sensitive and never belong in error text or logs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// The address string does not start with a known kind prefix.
    #[error("address does not start with a valid prefix")]
    InvalidAddressPrefix,

    /// The decoded address payload has the wrong length.
    #[error("decoded address has an invalid length")]
    InvalidAddressLength,

    /// The secret key string does not start with the secret-key marker.
    #[error("secret key does not start with the expected prefix")]
    InvalidPrivateKeyPrefix,

    /// The decoded secret key payload has the wrong length.
    #[error("decoded secret key has an invalid length")]
    InvalidPrivateKeyLength,

    /// The public key string does not start with the public-key marker.
    #[error("public key does not start with the expected prefix")]
    InvalidPublicKeyPrefix,

    /// The decoded public key payload has the wrong length.
    #[error("decoded public key has an invalid length")]
    InvalidPublicKeyLength,

    /// The decoded signature payload has the wrong length.
    #[error("decoded signature has an invalid length")]
    InvalidSignatureLength,

    /// The hex form of a secret key is malformed.
    #[error("secret key hex is malformed")]
    MalformedHex,

    /// Base58 / checksum failure underneath any of the textual forms.
    #[error(transparent)]
    Base58(#[from] Base58Error),
}
