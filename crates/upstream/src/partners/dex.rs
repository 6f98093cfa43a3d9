//! DEX aggregator client (swap and gasless endpoints).

use amparo_core::ports::{DexAggregator, PartnerCallError, SwapQuoteParams};
use amparo_shared::PartnerEndpoint;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use serde_json::Value;

use crate::error::ClientBuildError;
use crate::http::{PartnerHttp, insert_secret};

/// API version pinned by the `0x-version` header.
const API_VERSION: &str = "v2";

/// Swap and gasless endpoints for one chain.
#[derive(Debug, Clone)]
pub struct DexClient {
    http: PartnerHttp,
    chain_id: u64,
}

impl DexClient {
    /// Creates the client for `chain_id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key or HTTP settings are invalid.
    pub fn new(endpoint: &PartnerEndpoint, chain_id: u64) -> Result<Self, ClientBuildError> {
        let mut headers = HeaderMap::new();
        headers.insert("0x-version", HeaderValue::from_static(API_VERSION));
        if let Some(key) = endpoint.api_key.as_deref() {
            insert_secret(&mut headers, "dex", "0x-api-key", key)?;
        }
        Ok(Self {
            http: PartnerHttp::new("dex", endpoint, headers)?,
            chain_id,
        })
    }
}

#[async_trait]
impl DexAggregator for DexClient {
    async fn swap_quote(&self, params: &SwapQuoteParams) -> Result<Value, PartnerCallError> {
        self.http
            .get(&["swap", "permit2", "quote"], &params.query_pairs(self.chain_id))
            .await
    }

    async fn gasless_quote(&self, params: &SwapQuoteParams) -> Result<Value, PartnerCallError> {
        self.http
            .get(&["gasless", "quote"], &params.query_pairs(self.chain_id))
            .await
    }

    async fn submit_gasless(&self, payload: &Value) -> Result<Value, PartnerCallError> {
        self.http.post(&["gasless", "submit"], payload).await
    }

    async fn gasless_status(&self, trade_hash: &str) -> Result<Value, PartnerCallError> {
        self.http
            .get(
                &["gasless", "status", trade_hash],
                &[("chainId", self.chain_id.to_string())],
            )
            .await
    }
}
