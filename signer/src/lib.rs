// Copyright (c) 2026 Meridian Labs. MIT License.
// See LICENSE for details.

//! # Meridian Signer: Core Library
//!
//! Offline construction, encoding, and signing of Meridian operations. This
//! crate turns a user intent (transfer, roll trade, contract call or
//! deployment) into the canonical signed binary payload a node accepts,
//! without key material ever leaving the process and without any network
//! dependency for the cryptographic work itself.
//!
//! The wire format is the contract here: one wrong byte and a node rejects
//! the operation, or worse, accepts one that moves the wrong amount. Every
//! layout in this crate is therefore pinned by byte-level tests.
//!
//! ## Architecture
//!
//! Modules are layered leaf-first; each depends only on the ones above it:
//!
//! - **config**: chain constants. Version bytes, prefixes, unit scales.
//! - **codec**: pure byte codecs. LEB128 varints and Base58Check.
//! - **identity**: addresses, keypairs, public keys, signatures.
//! - **amount**: decimal MER strings to integer grain counts.
//! - **operation**: the five operation kinds, their canonical bodies, and
//!   the payload format sniffers.
//! - **signing**: signable-message assembly, hashing, Ed25519 signing.
//! - **submit**: the dual-format submission protocol over an abstract node
//!   RPC collaborator.
//!
//! ## Design rules
//!
//! 1. No floating point near money; amounts are integer grains end to end.
//! 2. Secret keys are borrowed for one call and never stored or logged.
//! 3. Every failure is a typed error; nothing panics across this boundary.
//! 4. Checksums are verified on every decode, not just produced on encode.

pub mod amount;
pub mod codec;
pub mod config;
pub mod identity;
pub mod operation;
pub mod signing;
pub mod submit;
