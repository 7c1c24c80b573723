use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::time::{sleep, Instant};
use tracing::debug;

use crate::config::NetworkConfig;
use crate::errors::RpcError;
use crate::states::ObjectId;

/// `data` is absent when the node reports an error for the id.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SuiObjectResponse {
    #[serde(default)]
    pub data: Option<SuiObjectData>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuiObjectData {
    pub object_id: String,
    #[serde(default, rename = "type")]
    pub object_type: Option<String>,
    #[serde(default)]
    pub content: Option<SuiParsedData>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "dataType")]
pub enum SuiParsedData {
    #[serde(rename = "moveObject")]
    MoveObject {
        #[serde(rename = "type")]
        object_type: String,
        fields: Value,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionBlockResponse {
    pub digest: String,
    #[serde(default)]
    pub object_changes: Option<Vec<ObjectChange>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ObjectChange {
    #[serde(rename_all = "camelCase")]
    Created {
        object_id: String,
        object_type: String,
    },
    #[serde(other)]
    Other,
}

/// Read side of the node API used by this crate.
#[async_trait]
pub trait ChainClient: Send + Sync {
    async fn get_object(&self, id: &ObjectId) -> Result<SuiObjectResponse, RpcError>;

    async fn get_transaction_block(&self, digest: &str)
        -> Result<TransactionBlockResponse, RpcError>;
}

/// Polls until the node knows the transaction or `finality_timeout` runs out.
pub async fn await_finality(
    client: &dyn ChainClient,
    cfg: &NetworkConfig,
    digest: &str,
) -> Result<TransactionBlockResponse, RpcError> {
    let deadline = Instant::now() + cfg.finality_timeout;
    loop {
        match client.get_transaction_block(digest).await {
            Ok(block) => return Ok(block),
            Err(err) if Instant::now() + cfg.finality_poll < deadline => {
                debug!(%digest, ?err, "transaction not visible yet");
                sleep(cfg.finality_poll).await;
            }
            Err(_) => return Err(RpcError::FinalityTimeout(digest.to_string())),
        }
    }
}

#[derive(Deserialize)]
struct RpcEnvelope<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

pub struct SuiRpcClient {
    http: reqwest::Client,
    url: String,
    next_id: AtomicU64,
}

impl SuiRpcClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), url)
    }

    pub fn with_client(http: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn from_config(cfg: &NetworkConfig) -> Self {
        Self::new(cfg.rpc_url.clone())
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, RpcError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        debug!(method, id, "rpc request");
        let raw: Value = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        decode_envelope(raw)
    }
}

fn decode_envelope<T: DeserializeOwned>(raw: Value) -> Result<T, RpcError> {
    let envelope: RpcEnvelope<T> = serde_json::from_value(raw)?;
    match (envelope.result, envelope.error) {
        (_, Some(err)) => Err(RpcError::Rpc {
            code: err.code,
            message: err.message,
        }),
        (Some(result), None) => Ok(result),
        (None, None) => Err(RpcError::EmptyResponse),
    }
}

#[async_trait]
impl ChainClient for SuiRpcClient {
    async fn get_object(&self, id: &ObjectId) -> Result<SuiObjectResponse, RpcError> {
        self.call(
            "sui_getObject",
            json!([id.to_string(), { "showContent": true, "showType": true }]),
        )
        .await
    }

    async fn get_transaction_block(
        &self,
        digest: &str,
    ) -> Result<TransactionBlockResponse, RpcError> {
        self.call(
            "sui_getTransactionBlock",
            json!([digest, { "showObjectChanges": true, "showEffects": true }]),
        )
        .await
    }
}
