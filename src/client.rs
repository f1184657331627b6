//! JSON-RPC client for the wallet daemon API.
//!
//! Speaks JSON-RPC 2.0 over HTTP. Every view fetch in the GUI goes
//! through this client; errors are surfaced to the user verbatim.

use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

use crate::types::{
    AccountsListResponse, CommitteesResponse, EpochSummary, TransactionRecord,
    TransactionsListResponse,
};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid daemon URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("daemon returned error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("malformed response: {0}")]
    Malformed(String),
}

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Debug, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct RpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<RpcErrorObject>,
}

impl RpcResponse {
    /// Unwrap the envelope into the result payload or a typed error.
    fn into_result(self) -> Result<Value, ClientError> {
        if let Some(error) = self.error {
            return Err(ClientError::Rpc {
                code: error.code,
                message: error.message,
            });
        }
        self.result
            .ok_or_else(|| ClientError::Malformed("response has neither result nor error".into()))
    }
}

/// Client for a single wallet daemon endpoint.
#[derive(Debug, Clone)]
pub struct WalletDaemonClient {
    endpoint: Url,
    http: reqwest::Client,
}

impl WalletDaemonClient {
    pub fn new(endpoint: &str) -> Result<Self, ClientError> {
        Ok(Self {
            endpoint: Url::parse(endpoint)?,
            http: reqwest::Client::new(),
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, ClientError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };
        tracing::debug!(method, endpoint = %self.endpoint, "daemon rpc call");
        let response: RpcResponse = self
            .http
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        let result = response.into_result()?;
        serde_json::from_value(result).map_err(|e| ClientError::Malformed(e.to_string()))
    }

    /// Fetch a single transaction by id.
    pub async fn transaction_get(&self, id: &str) -> Result<TransactionRecord, ClientError> {
        self.call("transactions.get", json!({ "transaction_id": id }))
            .await
    }

    /// Fetch a page of recent transactions.
    pub async fn transactions_list(
        &self,
        limit: u64,
        offset: u64,
    ) -> Result<TransactionsListResponse, ClientError> {
        self.call("transactions.list", json!({ "limit": limit, "offset": offset }))
            .await
    }

    /// Fetch a page of wallet accounts.
    pub async fn accounts_list(
        &self,
        limit: u64,
        offset: u64,
    ) -> Result<AccountsListResponse, ClientError> {
        self.call("accounts.list", json!({ "limit": limit, "offset": offset }))
            .await
    }

    /// Fetch the current epoch summary from the validator side.
    pub async fn epoch_summary(&self) -> Result<EpochSummary, ClientError> {
        self.call("epoch.summary", json!({})).await
    }

    /// Fetch the network committee layout for the current epoch.
    pub async fn committees_list(&self) -> Result<CommitteesResponse, ClientError> {
        self.call("committees.list", json!({})).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== envelope tests ====================

    #[test]
    fn test_response_with_result() {
        let response: RpcResponse =
            serde_json::from_str(r#"{"jsonrpc": "2.0", "id": 1, "result": {"total": 3}}"#).unwrap();
        let value = response.into_result().unwrap();
        assert_eq!(value["total"], 3);
    }

    #[test]
    fn test_response_with_error() {
        let response: RpcResponse = serde_json::from_str(
            r#"{"jsonrpc": "2.0", "id": 1, "error": {"code": -32601, "message": "method not found"}}"#,
        )
        .unwrap();
        match response.into_result() {
            Err(ClientError::Rpc { code, message }) => {
                assert_eq!(code, -32601);
                assert_eq!(message, "method not found");
            }
            other => panic!("expected rpc error, got {:?}", other),
        }
    }

    #[test]
    fn test_response_with_neither_is_malformed() {
        let response: RpcResponse = serde_json::from_str(r#"{"jsonrpc": "2.0", "id": 1}"#).unwrap();
        assert!(matches!(
            response.into_result(),
            Err(ClientError::Malformed(_))
        ));
    }

    #[test]
    fn test_error_takes_precedence_over_result() {
        // A daemon should never send both, but the error must win if it does.
        let response: RpcResponse = serde_json::from_str(
            r#"{"jsonrpc": "2.0", "id": 1, "result": {}, "error": {"code": 1, "message": "boom"}}"#,
        )
        .unwrap();
        assert!(matches!(response.into_result(), Err(ClientError::Rpc { .. })));
    }

    // ==================== construction tests ====================

    #[test]
    fn test_client_rejects_invalid_url() {
        assert!(matches!(
            WalletDaemonClient::new("not a url"),
            Err(ClientError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_client_accepts_http_url() {
        let client = WalletDaemonClient::new("http://127.0.0.1:9000/json_rpc").unwrap();
        assert_eq!(client.endpoint().as_str(), "http://127.0.0.1:9000/json_rpc");
    }

    #[test]
    fn test_request_serialization_shape() {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method: "transactions.get",
            params: json!({ "transaction_id": "abc" }),
        };
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(body["jsonrpc"], "2.0");
        assert_eq!(body["method"], "transactions.get");
        assert_eq!(body["params"]["transaction_id"], "abc");
    }
}
