// Typed client for the ledger's JSON-RPC 2.0 job endpoint.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

pub mod models;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub use crate::models::{JobFilters, RawJobRecord, TranscodingOption};
use crate::models::{RpcRequest, RpcResponse};

#[derive(Debug, thiserror::Error)]
pub enum LedgerRpcError {
    #[error("request to ledger RPC failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("ledger RPC returned HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("ledger RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("ledger RPC response for `{0}` carried no result")]
    MissingResult(String),

    #[error("failed to decode ledger RPC response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone)]
pub struct LedgerRpcOptions {
    pub endpoint: String,
    pub timeout: Duration,
}

#[derive(Debug)]
pub struct LedgerRpcService {
    options: LedgerRpcOptions,
    client: Client,
    next_id: AtomicU64,
}

impl LedgerRpcService {
    pub fn new(options: LedgerRpcOptions) -> Result<Self, LedgerRpcError> {
        let client = Client::builder().timeout(options.timeout).build()?;

        Ok(Self {
            options,
            client,
            next_id: AtomicU64::new(1),
        })
    }

    /// Fetch a single job by its ledger id.
    pub async fn get_job(&self, id: i32) -> Result<RawJobRecord, LedgerRpcError> {
        self.call("getJob", [id]).await
    }

    /// Fetch every job matching `filters`, in ledger order.
    pub async fn get_jobs(&self, filters: &JobFilters) -> Result<Vec<RawJobRecord>, LedgerRpcError> {
        self.call("getJobs", [filters]).await
    }

    async fn call<P, T>(&self, method: &str, params: P) -> Result<T, LedgerRpcError>
    where
        P: Serialize,
        T: DeserializeOwned,
    {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        tracing::debug!(method, endpoint = %self.options.endpoint, "ledger RPC call");

        let response = self
            .client
            .post(&self.options.endpoint)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LedgerRpcError::Status { status, body });
        }

        let bytes = response.bytes().await?;
        decode_response(method, &bytes)
    }
}

fn decode_response<T: DeserializeOwned>(method: &str, bytes: &[u8]) -> Result<T, LedgerRpcError> {
    let envelope: RpcResponse<T> = serde_json::from_slice(bytes)?;

    if let Some(error) = envelope.error {
        return Err(LedgerRpcError::Rpc {
            code: error.code,
            message: error.message,
        });
    }

    envelope
        .result
        .ok_or_else(|| LedgerRpcError::MissingResult(method.to_string()))
}
