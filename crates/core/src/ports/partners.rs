//! Partner API ports.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::pricing::QuoteError;

/// Bytes of a partner answer, kept as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawBody {
    /// `Content-Type` the partner sent.
    pub content_type: Option<String>,
    /// Body text.
    pub text: String,
}

/// A failed partner call. Never retried.
///
/// `body` keeps the partner's JSON error body and `raw_body` the exact bytes,
/// JSON or not, so payment proxies can return them untouched.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("{partner} call failed: {message}")]
pub struct PartnerCallError {
    /// Partner name.
    pub partner: String,
    /// HTTP status, when the partner answered.
    pub http_status: Option<u16>,
    /// Error description.
    pub message: String,
    /// JSON body of a non-2xx answer.
    pub body: Option<Value>,
    /// Body of a non-2xx answer as received.
    pub raw_body: Option<RawBody>,
}

impl PartnerCallError {
    /// Failure without an HTTP response.
    #[must_use]
    pub fn transport(partner: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            partner: partner.into(),
            http_status: None,
            message: message.into(),
            body: None,
            raw_body: None,
        }
    }

    /// Non-2xx answer.
    #[must_use]
    pub fn status(partner: impl Into<String>, status: u16, body: Option<Value>) -> Self {
        Self {
            partner: partner.into(),
            http_status: Some(status),
            message: format!("HTTP {status}"),
            body,
            raw_body: None,
        }
    }

    /// Keeps the answer's bytes; an empty body is not kept.
    #[must_use]
    pub fn with_raw_body(mut self, content_type: Option<String>, text: String) -> Self {
        if !text.is_empty() {
            self.raw_body = Some(RawBody { content_type, text });
        }
        self
    }
}

/// Swap or gasless quote parameters.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SwapQuoteParams {
    /// Token sold.
    #[serde(default)]
    pub sell_token: String,
    /// Token bought.
    #[serde(default)]
    pub buy_token: String,
    /// Amount sold, in the sell token's smallest unit.
    #[serde(default)]
    pub sell_amount: String,
    /// Wallet executing the swap.
    #[serde(default)]
    pub taker: Option<String>,
    /// Slippage tolerance in basis points.
    #[serde(default)]
    pub slippage_bps: Option<u32>,
}

impl SwapQuoteParams {
    /// Checks the required fields are present.
    ///
    /// # Errors
    ///
    /// Returns the first missing field.
    pub fn validate(&self) -> Result<(), QuoteError> {
        for (name, value) in [
            ("sellToken", &self.sell_token),
            ("buyToken", &self.buy_token),
            ("sellAmount", &self.sell_amount),
        ] {
            if value.trim().is_empty() {
                return Err(QuoteError::MissingField(name));
            }
        }
        Ok(())
    }

    /// Query string pairs for the partner request.
    #[must_use]
    pub fn query_pairs(&self, chain_id: u64) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("chainId", chain_id.to_string()),
            ("sellToken", self.sell_token.clone()),
            ("buyToken", self.buy_token.clone()),
            ("sellAmount", self.sell_amount.clone()),
        ];
        if let Some(taker) = &self.taker {
            pairs.push(("taker", taker.clone()));
        }
        if let Some(bps) = self.slippage_bps {
            pairs.push(("slippageBps", bps.to_string()));
        }
        pairs
    }
}

/// DEX aggregator: swap and gasless endpoints.
#[async_trait]
pub trait DexAggregator: Send + Sync {
    /// Firm swap quote.
    async fn swap_quote(&self, params: &SwapQuoteParams) -> Result<Value, PartnerCallError>;

    /// Gasless swap quote.
    async fn gasless_quote(&self, params: &SwapQuoteParams) -> Result<Value, PartnerCallError>;

    /// Submits a signed gasless trade.
    async fn submit_gasless(&self, payload: &Value) -> Result<Value, PartnerCallError>;

    /// Status of a submitted gasless trade.
    async fn gasless_status(&self, trade_hash: &str) -> Result<Value, PartnerCallError>;
}

/// Blockchain indexer.
#[async_trait]
pub trait Indexer: Send + Sync {
    /// Runs a GraphQL query and returns its `data` object.
    async fn query(&self, query: &str, variables: Value) -> Result<Value, PartnerCallError>;
}

/// Reinsurance partner.
#[async_trait]
pub trait ReinsurancePartner: Send + Sync {
    /// Capacity and utilization of the reinsurance pool.
    async fn pool_metrics(&self) -> Result<Value, PartnerCallError>;
}

/// Impact tracking partner.
#[async_trait]
pub trait ImpactPartner: Send + Sync {
    /// Coverage and social impact figures for one wallet.
    async fn user_analytics(&self, address: &str) -> Result<Value, PartnerCallError>;
}
