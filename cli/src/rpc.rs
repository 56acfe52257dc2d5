//! # Node RPC Transport
//!
//! The HTTP implementation of the signer library's [`NodeRpc`] collaborator:
//! JSON-RPC 2.0 over a single POST endpoint. This is the only module in the
//! whole workspace that opens a socket; the signer library stays
//! transport-free.
//!
//! Wire quirks handled here so nothing upstream has to care:
//!
//! - nodes report the chain id as a decimal string or a number, depending
//!   on version
//! - `send_operations` takes its operations as a batch of batches; this
//!   client always sends one single-element batch

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use meridian_signer::signing::SignedOperation;
use meridian_signer::submit::{NetworkStatus, NodeRpc, OperationId, RpcFailure};

/// JSON-RPC 2.0 client for a Meridian node.
pub struct HttpNodeRpc {
    endpoint: String,
    http: reqwest::Client,
}

impl HttpNodeRpc {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            http: reqwest::Client::new(),
        }
    }

    /// Performs one JSON-RPC call, mapping transport failures and error
    /// envelopes onto [`RpcFailure`].
    async fn call<P: Serialize, T: DeserializeOwned>(
        &self,
        method: &str,
        params: P,
    ) -> Result<T, RpcFailure> {
        let request = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        tracing::debug!(method, endpoint = %self.endpoint, "rpc call");

        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| RpcFailure::new(format!("transport error: {e}")))?;

        let envelope: RpcEnvelope<T> = response
            .json()
            .await
            .map_err(|e| RpcFailure::new(format!("malformed response: {e}")))?;

        if let Some(error) = envelope.error {
            return Err(RpcFailure::new(error.message));
        }
        envelope
            .result
            .ok_or_else(|| RpcFailure::new("response carried neither result nor error"))
    }
}

#[async_trait]
impl NodeRpc for HttpNodeRpc {
    async fn get_status(&self) -> Result<NetworkStatus, RpcFailure> {
        let status: StatusResult = self.call("get_status", serde_json::json!([])).await?;
        Ok(NetworkStatus {
            chain_id: status.chain_id,
            next_period: status.next_slot.period,
        })
    }

    async fn send_operations(
        &self,
        operations: Vec<SignedOperation>,
    ) -> Result<Vec<OperationId>, RpcFailure> {
        // Batch-of-batches parameter shape: params[0] is a list of
        // operation lists.
        let ids: Vec<OperationId> = self
            .call("send_operations", serde_json::json!([vec![operations]]))
            .await?;
        Ok(ids)
    }
}

// ---------------------------------------------------------------------------
// Wire structs
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct RpcEnvelope<T> {
    result: Option<T>,
    error: Option<RpcErrorBody>,
}

#[derive(Deserialize)]
struct RpcErrorBody {
    message: String,
}

#[derive(Deserialize)]
struct StatusResult {
    #[serde(deserialize_with = "u64_from_string_or_number")]
    chain_id: u64,
    next_slot: NextSlot,
}

#[derive(Deserialize)]
struct NextSlot {
    period: u64,
}

fn u64_from_string_or_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Number(n) => {
            n.as_u64().ok_or_else(|| D::Error::custom("chain id is not a u64"))
        }
        serde_json::Value::String(s) => s
            .parse()
            .map_err(|e| D::Error::custom(format!("chain id string is not a u64: {e}"))),
        _ => Err(D::Error::custom("chain id must be a number or a string")),
    }
}
