//! # Signing Pipeline
//!
//! Turns a serialized operation body into a submission-ready
//! [`SignedOperation`]:
//!
//! 1. build the signable message: 8 big-endian chain-id bytes, the 33-byte
//!    versioned public key, then the operation body
//! 2. hash the message with blake3 (the chain's 256-bit hash; nodes compute
//!    the same digest when verifying, so the algorithm is not substitutable)
//! 3. Ed25519-sign the 32-byte digest
//! 4. render the public key and signature to their textual forms and keep
//!    the body as raw bytes for JSON transport
//!
//! The whole pipeline is a pure transform. Key material flows in by
//! reference and nothing here retains, logs, or serializes it.

use serde::{Deserialize, Serialize};

use crate::identity::{IdentityError, Keypair, PublicKey, Signature};
use crate::operation::{serialize_operation, Operation, TransferFormat};

/// A signed operation in the exact shape the node's `send_operations` RPC
/// expects: textual creator key and signature, body as a plain byte array
/// (each element 0-255 once serialized to JSON).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedOperation {
    /// The signer's public key, `P…` textual form.
    pub creator_public_key: String,
    /// Base58Check signature over the operation digest.
    pub signature: String,
    /// The canonical operation body bytes.
    pub serialized_content: Vec<u8>,
}

/// Computes the 32-byte digest that actually gets signed.
///
/// Layout: `chain_id(8, big-endian) || version || public_key(32) || body`.
/// The chain id binds the signature to one network, so a testnet operation
/// replayed on mainnet verifies against nothing.
pub fn signable_digest(chain_id: u64, public_key: &PublicKey, body: &[u8]) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&chain_id.to_be_bytes());
    hasher.update(&public_key.versioned_bytes());
    hasher.update(body);
    *hasher.finalize().as_bytes()
}

/// Signs a serialized operation body.
pub fn sign_operation(chain_id: u64, keypair: &Keypair, body: Vec<u8>) -> SignedOperation {
    let public_key = keypair.public_key();
    let digest = signable_digest(chain_id, &public_key, &body);
    let signature = keypair.sign_digest(&digest);

    SignedOperation {
        creator_public_key: public_key.to_text(),
        signature: signature.to_text(),
        serialized_content: body,
    }
}

/// Convenience: serialize an [`Operation`] with the given transfer layout
/// and sign it in one step.
pub fn sign_serialized(
    chain_id: u64,
    keypair: &Keypair,
    operation: &Operation,
    format: TransferFormat,
) -> SignedOperation {
    sign_operation(chain_id, keypair, serialize_operation(operation, format))
}

/// Re-derives the digest of a signed operation and checks its signature.
///
/// Returns `Ok(false)` for a well-formed envelope whose signature does not
/// verify; parse failures of the textual fields are errors.
pub fn verify_signed(chain_id: u64, signed: &SignedOperation) -> Result<bool, IdentityError> {
    let public_key = PublicKey::from_text(&signed.creator_public_key)?;
    let signature = Signature::from_text(&signed.signature)?;
    let digest = signable_digest(chain_id, &public_key, &signed.serialized_content);
    Ok(public_key.verify_digest(&digest, &signature))
}
