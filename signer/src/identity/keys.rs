//! # Keys & Signatures
//!
//! Ed25519 keypairs and their chain textual forms.
//!
//! A secret key is a 32-byte seed. It is accepted in two external
//! representations: 64 hex characters, or the chain form
//! `S` + Base58Check(version || seed). A public key renders as
//! `P` + Base58Check(version || key); a signature renders as
//! `Base58Check(version || sig)` with no letter prefix, because signatures
//! only ever travel inside JSON payloads.
//!
//! Secret material is caller-owned: a [`Keypair`] lives for the duration of
//! a signing call and is never serialized, logged, or cached by this crate.
//! The `Debug` impl prints the public key only.

use std::fmt;

use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;

use super::IdentityError;
use crate::codec::base58check;
use crate::config::{
    IDENTITY_VERSION, PUBLIC_KEY_LENGTH, PUBLIC_KEY_PREFIX, SECRET_KEY_LENGTH, SECRET_KEY_PREFIX,
    SIGNATURE_LENGTH, VERSIONED_PUBLIC_KEY_LENGTH,
};

// ---------------------------------------------------------------------------
// Keypair
// ---------------------------------------------------------------------------

/// An Ed25519 keypair controlling one user address.
///
/// Deliberately does not implement `Serialize`, `Clone`-into-logs helpers,
/// or a secret-revealing `Debug`. Exporting the seed is an explicit act via
/// [`to_text`](Self::to_text).
pub struct Keypair {
    signing_key: SigningKey,
}

impl Keypair {
    /// Generates a fresh keypair from the OS cryptographic RNG.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Builds a keypair deterministically from a 32-byte seed. In Ed25519
    /// the seed *is* the secret key.
    pub fn from_seed(seed: &[u8; SECRET_KEY_LENGTH]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(seed),
        }
    }

    /// Parses a hex-encoded seed (64 hex characters).
    pub fn from_hex(text: &str) -> Result<Self, IdentityError> {
        let bytes = hex::decode(text).map_err(|_| IdentityError::MalformedHex)?;
        let seed: [u8; SECRET_KEY_LENGTH] = bytes
            .try_into()
            .map_err(|_| IdentityError::InvalidPrivateKeyLength)?;
        Ok(Self::from_seed(&seed))
    }

    /// Parses the chain textual form `S` + Base58Check(version || seed).
    ///
    /// The version byte is skipped, not validated: historically deployed
    /// wallets emitted it without ever bumping it.
    pub fn from_text(text: &str) -> Result<Self, IdentityError> {
        let encoded = text
            .strip_prefix(SECRET_KEY_PREFIX)
            .ok_or(IdentityError::InvalidPrivateKeyPrefix)?;
        let payload = base58check::decode_check(encoded)?;
        if payload.len() != 1 + SECRET_KEY_LENGTH {
            return Err(IdentityError::InvalidPrivateKeyLength);
        }
        let mut seed = [0u8; SECRET_KEY_LENGTH];
        seed.copy_from_slice(&payload[1..]);
        Ok(Self::from_seed(&seed))
    }

    /// Accepts either external representation of a secret key: the chain
    /// form (leading `S`) or raw hex.
    pub fn parse(text: &str) -> Result<Self, IdentityError> {
        if text.starts_with(SECRET_KEY_PREFIX) {
            Self::from_text(text)
        } else {
            Self::from_hex(text)
        }
    }

    /// Exports the chain textual form of the seed. Handle the result like
    /// the secret it is.
    pub fn to_text(&self) -> String {
        let mut payload = Vec::with_capacity(1 + SECRET_KEY_LENGTH);
        payload.push(IDENTITY_VERSION);
        payload.extend_from_slice(&self.signing_key.to_bytes());
        format!("{}{}", SECRET_KEY_PREFIX, base58check::encode_check(&payload))
    }

    /// The public half of this keypair.
    pub fn public_key(&self) -> PublicKey {
        PublicKey {
            bytes: self.signing_key.verifying_key().to_bytes(),
        }
    }

    /// Signs a 32-byte operation digest.
    ///
    /// The chain signs digests, not raw messages: the signable message is
    /// hashed first and the 32-byte digest is what goes through Ed25519.
    pub fn sign_digest(&self, digest: &[u8; 32]) -> Signature {
        Signature {
            bytes: self.signing_key.sign(digest).to_bytes(),
        }
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Secret material stays out of Debug output, entirely.
        write!(f, "Keypair(public={})", self.public_key().to_text())
    }
}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

/// A 32-byte Ed25519 public key, safe to share and embed in operations.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PublicKey {
    bytes: [u8; PUBLIC_KEY_LENGTH],
}

impl PublicKey {
    /// The raw key bytes.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.bytes
    }

    /// The 33-byte versioned form `version || key`, used inside signable
    /// messages and hashed into addresses.
    pub fn versioned_bytes(&self) -> [u8; VERSIONED_PUBLIC_KEY_LENGTH] {
        let mut out = [0u8; VERSIONED_PUBLIC_KEY_LENGTH];
        out[0] = IDENTITY_VERSION;
        out[1..].copy_from_slice(&self.bytes);
        out
    }

    /// The textual form `P` + Base58Check(version || key).
    pub fn to_text(&self) -> String {
        format!(
            "{}{}",
            PUBLIC_KEY_PREFIX,
            base58check::encode_check(&self.versioned_bytes())
        )
    }

    /// Parses the textual form, verifying prefix, checksum, and length.
    pub fn from_text(text: &str) -> Result<Self, IdentityError> {
        let encoded = text
            .strip_prefix(PUBLIC_KEY_PREFIX)
            .ok_or(IdentityError::InvalidPublicKeyPrefix)?;
        let payload = base58check::decode_check(encoded)?;
        if payload.len() != 1 + PUBLIC_KEY_LENGTH {
            return Err(IdentityError::InvalidPublicKeyLength);
        }
        let mut bytes = [0u8; PUBLIC_KEY_LENGTH];
        bytes.copy_from_slice(&payload[1..]);
        Ok(Self { bytes })
    }

    /// Verifies `signature` over a 32-byte digest.
    ///
    /// Returns a plain boolean: callers want yes or no, and distinguishing
    /// "bad signature" from "bytes are not a curve point" would only build
    /// an error oracle.
    pub fn verify_digest(&self, digest: &[u8; 32], signature: &Signature) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(&self.bytes) else {
            return false;
        };
        let sig = ed25519_dalek::Signature::from_bytes(&signature.bytes);
        verifying_key.verify(digest, &sig).is_ok()
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", self.to_text())
    }
}

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

/// A 64-byte Ed25519 signature over an operation digest.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    bytes: [u8; SIGNATURE_LENGTH],
}

impl Signature {
    /// The raw signature bytes.
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.bytes
    }

    /// The wire form `Base58Check(version || sig)`, with no letter prefix.
    pub fn to_text(&self) -> String {
        let mut payload = Vec::with_capacity(1 + SIGNATURE_LENGTH);
        payload.push(IDENTITY_VERSION);
        payload.extend_from_slice(&self.bytes);
        base58check::encode_check(&payload)
    }

    /// Parses the wire form back into signature bytes.
    pub fn from_text(text: &str) -> Result<Self, IdentityError> {
        let payload = base58check::decode_check(text)?;
        if payload.len() != 1 + SIGNATURE_LENGTH {
            return Err(IdentityError::InvalidSignatureLength);
        }
        let mut bytes = [0u8; SIGNATURE_LENGTH];
        bytes.copy_from_slice(&payload[1..]);
        Ok(Self { bytes })
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.to_text();
        write!(f, "Signature({}…)", &text[..8.min(text.len())])
    }
}
