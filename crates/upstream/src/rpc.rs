//! Minimal JSON-RPC 2.0 client over reqwest.

use std::time::Duration;

use alloy_primitives::{Address, Bytes, hex};
use amparo_core::ports::ChainCallError;
use serde_json::{Value, json};

use crate::error::ClientBuildError;

/// JSON-RPC client for one node URL.
#[derive(Debug, Clone)]
pub struct RpcClient {
    client: reqwest::Client,
    url: String,
}

impl RpcClient {
    /// Creates a client with a per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ClientBuildError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| ClientBuildError::Http {
                name: "rpc".to_string(),
                source,
            })?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Sends one request and returns its `result`.
    ///
    /// `label` names the call in errors; it is the RPC method for raw calls
    /// and `role.method` for contract reads.
    pub async fn request(
        &self,
        label: &str,
        method: &str,
        params: Value,
    ) -> Result<Value, ChainCallError> {
        let payload = json!({
            "jsonrpc": "2.0",
            "id": 1u64,
            "method": method,
            "params": params,
        });

        let resp = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| ChainCallError::Transport {
                method: label.to_string(),
                message: e.to_string(),
            })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(ChainCallError::Http {
                method: label.to_string(),
                status: status.as_u16(),
            });
        }

        let mut body: Value = resp.json().await.map_err(|e| ChainCallError::Decode {
            method: label.to_string(),
            message: e.to_string(),
        })?;

        if let Some(err) = body.get("error") {
            return Err(ChainCallError::Rpc {
                method: label.to_string(),
                code: err.get("code").and_then(Value::as_i64).unwrap_or_default(),
                message: err
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown error")
                    .to_string(),
            });
        }

        match body.get_mut("result") {
            Some(result) => Ok(result.take()),
            None => Err(ChainCallError::Decode {
                method: label.to_string(),
                message: "response has no result".to_string(),
            }),
        }
    }

    /// Sends a request whose result is a hex quantity.
    pub async fn quantity(&self, method: &str, params: Value) -> Result<u128, ChainCallError> {
        let result = self.request(method, method, params).await?;
        parse_quantity(method, &result)
    }

    /// `eth_call` against the latest block.
    pub async fn eth_call(
        &self,
        label: &str,
        to: Address,
        data: Vec<u8>,
    ) -> Result<Bytes, ChainCallError> {
        let params = json!([
            { "to": format!("{to:#x}"), "data": hex::encode_prefixed(data) },
            "latest"
        ]);
        let result = self.request(label, "eth_call", params).await?;

        let raw = result.as_str().ok_or_else(|| ChainCallError::Decode {
            method: label.to_string(),
            message: "eth_call returned non-string result".to_string(),
        })?;
        hex::decode(raw)
            .map(Bytes::from)
            .map_err(|e| ChainCallError::Decode {
                method: label.to_string(),
                message: format!("invalid hex: {e}"),
            })
    }
}

/// Parses a `0x`-prefixed hex quantity.
pub(crate) fn parse_quantity(method: &str, value: &Value) -> Result<u128, ChainCallError> {
    let decode_err = |message: String| ChainCallError::Decode {
        method: method.to_string(),
        message,
    };

    let raw = value
        .as_str()
        .ok_or_else(|| decode_err(format!("expected hex string, got {value}")))?;
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .ok_or_else(|| decode_err(format!("missing 0x prefix: {raw}")))?;
    if digits.is_empty() {
        return Ok(0);
    }
    u128::from_str_radix(digits, 16).map_err(|e| decode_err(format!("invalid quantity {raw}: {e}")))
}
