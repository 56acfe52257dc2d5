//! Operations: the five state-transition requests a wallet can sign.
//!
//! An [`Operation`] holds fully normalized inputs: grain amounts already
//! parsed, addresses already decoded, bytecode and parameters already
//! resolved to raw bytes. Normalization happens at the edges (the
//! [`crate::amount`] parser and the [`payload`] sniffers); by the time a
//! value reaches this module it is wire-ready.

pub mod payload;
pub mod wire;

pub use payload::{decode_bytecode, decode_parameter, PayloadError};
pub use wire::{serialize_operation, TransferFormat};

use crate::identity::Address;

/// A datastore entry attached to a bytecode deployment: one key/value pair
/// of raw bytes.
pub type DatastoreEntry = (Vec<u8>, Vec<u8>);

// ---------------------------------------------------------------------------
// Operation
// ---------------------------------------------------------------------------

/// A chain operation, ready for serialization and signing.
///
/// Field order within each variant mirrors the wire layout; the serializer
/// in [`wire`] walks the fields top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// Move grains from the signer to `recipient`.
    Transfer {
        fee: u64,
        expire_period: u64,
        recipient: Address,
        amount: u64,
    },
    /// Buy `roll_count` staking rolls at the fixed chain price.
    RollBuy {
        fee: u64,
        expire_period: u64,
        roll_count: u64,
    },
    /// Sell `roll_count` staking rolls back to the chain.
    RollSell {
        fee: u64,
        expire_period: u64,
        roll_count: u64,
    },
    /// Deploy and run `bytecode`, with an optional datastore.
    ExecuteBytecode {
        fee: u64,
        expire_period: u64,
        max_gas: u64,
        coins: u64,
        bytecode: Vec<u8>,
        datastore: Vec<DatastoreEntry>,
    },
    /// Call `function` on the contract at `target`.
    CallContract {
        fee: u64,
        expire_period: u64,
        max_gas: u64,
        coins: u64,
        target: Address,
        function: String,
        parameter: Vec<u8>,
    },
}

impl Operation {
    /// The wire tag identifying this operation kind. Serialized as a varint
    /// right after the fee and expiry fields.
    pub fn tag(&self) -> u64 {
        match self {
            Operation::Transfer { .. } => 0,
            Operation::RollBuy { .. } => 1,
            Operation::RollSell { .. } => 2,
            Operation::ExecuteBytecode { .. } => 3,
            Operation::CallContract { .. } => 4,
        }
    }

    /// A short human-readable kind name for logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Operation::Transfer { .. } => "transfer",
            Operation::RollBuy { .. } => "roll_buy",
            Operation::RollSell { .. } => "roll_sell",
            Operation::ExecuteBytecode { .. } => "execute_bytecode",
            Operation::CallContract { .. } => "call_contract",
        }
    }

    /// Whether this is a transfer, the one kind with a second historical
    /// wire layout available for resubmission.
    pub fn is_transfer(&self) -> bool {
        matches!(self, Operation::Transfer { .. })
    }
}
