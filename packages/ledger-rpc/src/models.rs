use serde::{Deserialize, Serialize};

/// One transcoding configuration attached to a job on the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscodingOption {
    pub hash: String,
    pub name: String,
    pub bitrate: String,
    pub framerate: i32,
    pub resolution: String,
}

/// Job record as returned by the ledger RPC endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawJobRecord {
    pub job_id: i32,
    pub stream_id: String,
    pub broadcaster: String,
    pub transcoder: String,
    #[serde(default)]
    pub transcoding_options: Vec<TranscodingOption>,
}

/// Filter attributes forwarded to `getJobs`. Unset attributes are omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broadcaster: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct RpcRequest<'a, P: Serialize> {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'a str,
    pub params: P,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RpcResponse<T> {
    pub result: Option<T>,
    pub error: Option<RpcErrorObject>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}
