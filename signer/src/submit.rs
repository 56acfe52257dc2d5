//! # Submission Protocol
//!
//! The one stateful-looking piece of the crate, although each call is in
//! fact a stateless pipeline: fetch network context, build and sign the
//! operation, submit it, and for transfers only, resubmit once with the
//! legacy wire layout if the node rejects the first attempt.
//!
//! The two attempts and their distinct serializers are written as an
//! explicit state machine over [`TransferFormat`], not as catch-and-retry:
//! every state transition is visible in one `match`, and the retry can never
//! silently become a loop.
//!
//! Transport is somebody else's problem. The node is reached through the
//! [`NodeRpc`] trait; the library never opens a socket, so the whole
//! protocol is testable against a scripted collaborator. Calls may be
//! cancelled at either await point with no partial effect: submission is a
//! single RPC call per attempt.

use async_trait::async_trait;
use thiserror::Error;

use crate::amount::{parse_amount, AmountError};
use crate::config::EXPIRE_PERIOD_LOOKAHEAD;
use crate::identity::{Address, IdentityError, Keypair};
use crate::operation::{
    decode_bytecode, decode_parameter, DatastoreEntry, Operation, PayloadError, TransferFormat,
};
use crate::signing::{sign_serialized, SignedOperation};

/// The identifier a node assigns to an accepted operation.
pub type OperationId = String;

// ---------------------------------------------------------------------------
// Collaborator interface
// ---------------------------------------------------------------------------

/// Network context fetched fresh before every submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkStatus {
    /// The chain id bound into every signature.
    pub chain_id: u64,
    /// The next period the node expects to produce; expiries count from
    /// here.
    pub next_period: u64,
}

impl NetworkStatus {
    /// The expiry this client stamps on new operations:
    /// `next_period + EXPIRE_PERIOD_LOOKAHEAD`.
    pub fn expire_period(&self) -> u64 {
        self.next_period + EXPIRE_PERIOD_LOOKAHEAD
    }
}

/// A failure reported by the RPC collaborator. Transport and node-side
/// rejection are not distinguished here; both mean "this attempt did not
/// land".
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct RpcFailure {
    /// Human-readable failure description from the transport or the node's
    /// error envelope.
    pub message: String,
}

impl RpcFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The node RPC surface this crate consumes. Implemented over HTTP by the
/// CLI and over scripted queues by the tests.
#[async_trait]
pub trait NodeRpc: Send + Sync {
    /// Fetches the current network status.
    async fn get_status(&self) -> Result<NetworkStatus, RpcFailure>;

    /// Submits a batch of signed operations, returning their assigned ids.
    async fn send_operations(
        &self,
        operations: Vec<SignedOperation>,
    ) -> Result<Vec<OperationId>, RpcFailure>;
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors surfaced to callers of the submission pipeline.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// The status fetch failed; nothing was signed or submitted.
    #[error("network status unavailable: {0}")]
    NetworkStatusUnavailable(RpcFailure),

    /// The node rejected the final submission attempt.
    #[error("submission rejected: {message}")]
    SubmissionRejected { message: String },

    /// The node accepted the submission but returned no operation id.
    #[error("node returned no operation id")]
    NoOperationIdReturned,

    /// An address or key input failed to parse.
    #[error(transparent)]
    Identity(#[from] IdentityError),

    /// A monetary input failed to parse.
    #[error(transparent)]
    Amount(#[from] AmountError),

    /// A bytecode or parameter input defeated every decoder.
    #[error(transparent)]
    Payload(#[from] PayloadError),
}

// ---------------------------------------------------------------------------
// State machine
// ---------------------------------------------------------------------------

/// Progress of one submission call. Serialization and signing are folded
/// into the `Serialize` transition; `Submit` owns the signed envelope.
enum SubmitState {
    Serialize(TransferFormat),
    Submit {
        format: TransferFormat,
        signed: SignedOperation,
    },
}

/// Signs and submits `operation`, resubmitting a rejected transfer once
/// with the legacy layout.
///
/// The caller supplies the chain id from a fresh [`NetworkStatus`]; the
/// operation's expiry is expected to be stamped from the same status.
pub async fn submit_operation<R: NodeRpc>(
    rpc: &R,
    keypair: &Keypair,
    chain_id: u64,
    operation: &Operation,
) -> Result<OperationId, SubmitError> {
    let mut state = SubmitState::Serialize(TransferFormat::Current);

    loop {
        state = match state {
            SubmitState::Serialize(format) => {
                let signed = sign_serialized(chain_id, keypair, operation, format);
                SubmitState::Submit { format, signed }
            }
            SubmitState::Submit { format, signed } => {
                match rpc.send_operations(vec![signed]).await {
                    Ok(ids) => {
                        let id = ids
                            .into_iter()
                            .next()
                            .ok_or(SubmitError::NoOperationIdReturned)?;
                        tracing::debug!(
                            kind = operation.kind_name(),
                            operation_id = %id,
                            "operation accepted"
                        );
                        return Ok(id);
                    }
                    Err(failure)
                        if format == TransferFormat::Current && operation.is_transfer() =>
                    {
                        // One resubmission, transfers only. A second
                        // rejection below is terminal.
                        tracing::debug!(
                            error = %failure,
                            "transfer rejected, resubmitting with the legacy layout"
                        );
                        SubmitState::Serialize(TransferFormat::Legacy)
                    }
                    Err(failure) => {
                        return Err(SubmitError::SubmissionRejected {
                            message: failure.message,
                        });
                    }
                }
            }
        };
    }
}

// ---------------------------------------------------------------------------
// OperationClient
// ---------------------------------------------------------------------------

/// High-level entry point: one method per operation kind, taking raw user
/// input (textual addresses, decimal amounts, undecoded payloads) and a
/// keypair, returning the node-assigned operation id.
///
/// The client holds only the RPC collaborator. It is safe to share across
/// concurrent submissions; every call builds its own context.
pub struct OperationClient<R> {
    rpc: R,
}

impl<R: NodeRpc> OperationClient<R> {
    pub fn new(rpc: R) -> Self {
        Self { rpc }
    }

    /// Borrows the underlying RPC collaborator.
    pub fn rpc_ref(&self) -> &R {
        &self.rpc
    }

    async fn network_status(&self) -> Result<NetworkStatus, SubmitError> {
        self.rpc
            .get_status()
            .await
            .map_err(SubmitError::NetworkStatusUnavailable)
    }

    /// Transfers `amount` MER (decimal string) to `recipient`.
    pub async fn send_transfer(
        &self,
        recipient: &str,
        amount: &str,
        fee: &str,
        keypair: &Keypair,
    ) -> Result<OperationId, SubmitError> {
        let recipient = Address::from_text(recipient)?;
        let amount = parse_amount(amount)?;
        let fee = parse_amount(fee)?;

        let status = self.network_status().await?;
        let operation = Operation::Transfer {
            fee,
            expire_period: status.expire_period(),
            recipient,
            amount,
        };
        submit_operation(&self.rpc, keypair, status.chain_id, &operation).await
    }

    /// Buys `roll_count` staking rolls.
    pub async fn send_roll_buy(
        &self,
        roll_count: u64,
        fee: &str,
        keypair: &Keypair,
    ) -> Result<OperationId, SubmitError> {
        let fee = parse_amount(fee)?;

        let status = self.network_status().await?;
        let operation = Operation::RollBuy {
            fee,
            expire_period: status.expire_period(),
            roll_count,
        };
        submit_operation(&self.rpc, keypair, status.chain_id, &operation).await
    }

    /// Sells `roll_count` staking rolls.
    pub async fn send_roll_sell(
        &self,
        roll_count: u64,
        fee: &str,
        keypair: &Keypair,
    ) -> Result<OperationId, SubmitError> {
        let fee = parse_amount(fee)?;

        let status = self.network_status().await?;
        let operation = Operation::RollSell {
            fee,
            expire_period: status.expire_period(),
            roll_count,
        };
        submit_operation(&self.rpc, keypair, status.chain_id, &operation).await
    }

    /// Calls `function` on the contract at `target`. The parameter string
    /// goes through the format sniffer ([`decode_parameter`]).
    #[allow(clippy::too_many_arguments)]
    pub async fn send_call_contract(
        &self,
        target: &str,
        function: &str,
        parameter: &str,
        coins: &str,
        fee: &str,
        max_gas: u64,
        keypair: &Keypair,
    ) -> Result<OperationId, SubmitError> {
        let target = Address::from_text(target)?;
        let parameter = decode_parameter(parameter)?;
        let coins = parse_amount(coins)?;
        let fee = parse_amount(fee)?;

        let status = self.network_status().await?;
        let operation = Operation::CallContract {
            fee,
            expire_period: status.expire_period(),
            max_gas,
            coins,
            target,
            function: function.to_string(),
            parameter,
        };
        submit_operation(&self.rpc, keypair, status.chain_id, &operation).await
    }

    /// Deploys and runs bytecode. The bytecode string goes through the
    /// format sniffer ([`decode_bytecode`]).
    pub async fn send_execute_bytecode(
        &self,
        bytecode: &str,
        datastore: Vec<DatastoreEntry>,
        coins: &str,
        fee: &str,
        max_gas: u64,
        keypair: &Keypair,
    ) -> Result<OperationId, SubmitError> {
        let bytecode = decode_bytecode(bytecode)?;
        let coins = parse_amount(coins)?;
        let fee = parse_amount(fee)?;

        let status = self.network_status().await?;
        let operation = Operation::ExecuteBytecode {
            fee,
            expire_period: status.expire_period(),
            max_gas,
            coins,
            bytecode,
            datastore,
        };
        submit_operation(&self.rpc, keypair, status.chain_id, &operation).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expire_period_applies_the_lookahead() {
        let status = NetworkStatus {
            chain_id: 1,
            next_period: 500,
        };
        assert_eq!(status.expire_period(), 510);
    }

    #[test]
    fn rpc_failure_displays_its_message() {
        let failure = RpcFailure::new("period too old");
        assert_eq!(failure.to_string(), "period too old");
    }

    #[test]
    fn submit_error_messages_are_actionable() {
        let err = SubmitError::SubmissionRejected {
            message: "invalid signature".to_string(),
        };
        assert_eq!(err.to_string(), "submission rejected: invalid signature");

        let err = SubmitError::NetworkStatusUnavailable(RpcFailure::new("connection refused"));
        assert!(err.to_string().contains("connection refused"));
    }
}
