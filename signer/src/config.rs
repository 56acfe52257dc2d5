//! # Protocol Configuration & Constants
//!
//! Every magic number of the Meridian wire format lives here. The values in
//! this module are consensus-critical: an operation serialized with a wrong
//! version byte or prefix is simply rejected by every node on the network.
//!
//! Values are grouped by concern. If you find yourself hardcoding one of
//! these elsewhere, move it here instead.

// ---------------------------------------------------------------------------
// Monetary units
// ---------------------------------------------------------------------------

/// Ticker of the native coin.
pub const COIN_SYMBOL: &str = "MER";

/// Number of decimal places of the native coin. One MER divides into 10^9
/// grains, and every monetary field on the wire is an integer grain count.
pub const COIN_DECIMALS: u32 = 9;

/// Grains per whole MER. Kept in sync with [`COIN_DECIMALS`] by a test below.
pub const GRAINS_PER_COIN: u64 = 1_000_000_000;

/// Largest grain amount accepted from user input. The chain encodes amounts
/// as unsigned varints but accounts for them in signed 64-bit arithmetic, so
/// anything above `i64::MAX` grains is unrepresentable on-chain.
pub const MAX_GRAINS: u64 = i64::MAX as u64;

// ---------------------------------------------------------------------------
// Operation timing
// ---------------------------------------------------------------------------

/// How many periods past the node's current period an operation stays valid.
/// The expiry of every operation built by this client is
/// `next_period + EXPIRE_PERIOD_LOOKAHEAD`. This is a client policy, not a
/// chain rule: wide enough to survive propagation, narrow enough that a
/// stuck operation dies quickly.
pub const EXPIRE_PERIOD_LOOKAHEAD: u64 = 10;

// ---------------------------------------------------------------------------
// Identity encoding
// ---------------------------------------------------------------------------

/// Version byte embedded in textual keys, addresses, and signatures.
/// Currently the only deployed version.
pub const IDENTITY_VERSION: u8 = 0;

/// Textual prefix of an externally-owned (user) address.
pub const USER_ADDRESS_PREFIX: &str = "AU";

/// Textual prefix of a smart-contract address.
pub const CONTRACT_ADDRESS_PREFIX: &str = "AS";

/// Textual prefix of a secret key.
pub const SECRET_KEY_PREFIX: &str = "S";

/// Textual prefix of a public key. Signatures carry no prefix at all: they
/// travel inside JSON payloads and are never shown to users.
pub const PUBLIC_KEY_PREFIX: &str = "P";

// ---------------------------------------------------------------------------
// Byte lengths
// ---------------------------------------------------------------------------

/// Ed25519 seed / secret key length.
pub const SECRET_KEY_LENGTH: usize = 32;

/// Ed25519 public key length.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Versioned public key: version byte followed by the raw key. This is the
/// form embedded in signable messages and hashed into addresses.
pub const VERSIONED_PUBLIC_KEY_LENGTH: usize = 1 + PUBLIC_KEY_LENGTH;

/// Ed25519 signature length.
pub const SIGNATURE_LENGTH: usize = 64;

/// Address hash length (blake3 output).
pub const ADDRESS_HASH_LENGTH: usize = 32;

/// Binary address form carried inside operation bodies:
/// `[kind][version][hash]`. Always exactly this long; decode fails otherwise.
pub const ADDRESS_BINARY_LENGTH: usize = 2 + ADDRESS_HASH_LENGTH;

/// Base58Check checksum length (first 4 bytes of a double SHA-256).
pub const CHECKSUM_LENGTH: usize = 4;

/// The chain id occupies 8 big-endian bytes at the front of every signable
/// message. This is the single fixed-width, endianness-sensitive integer in
/// the whole format; everything else is a varint.
pub const CHAIN_ID_LENGTH: usize = 8;

/// Length of the digest that actually gets signed (blake3 output).
pub const OPERATION_DIGEST_LENGTH: usize = 32;
