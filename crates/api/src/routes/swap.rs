//! Swap and gasless payment proxies.
//!
//! These routes forward to the DEX partner and never substitute data: a
//! partner failure is returned with its own status and body.

use amparo_core::ports::SwapQuoteParams;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use serde_json::{Map, Value, json};

use crate::AppState;
use crate::error::{ApiError, PartnerFailure};
use crate::extractors::ValidatedJson;

/// Creates the swap routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/swap/quote", get(swap_quote))
        .route("/swap/gasless/quote", get(gasless_quote))
        .route("/swap/gasless", post(submit_gasless))
        .route("/swap/gasless/status/{trade_hash}", get(gasless_status))
}

/// Signed gasless trade.
#[derive(Debug, Deserialize)]
pub struct GaslessSubmission {
    /// Trade object returned by the gasless quote.
    #[serde(default)]
    pub trade: Value,
    /// Wallet signature over the trade.
    #[serde(default)]
    pub signature: Value,
    /// Caller metadata, merged with ours.
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl GaslessSubmission {
    fn validate(&self) -> Result<(), ApiError> {
        if self.trade.is_null() {
            return Err(ApiError::validation("trade is required"));
        }
        let signed = match &self.signature {
            Value::String(s) => !s.trim().is_empty(),
            Value::Object(o) => !o.is_empty(),
            _ => false,
        };
        if !signed {
            return Err(ApiError::validation("signature is required"));
        }
        Ok(())
    }
}

type ProxyResult = Result<Json<Value>, Response>;

/// Chain id, platform tag and time of the proxied call.
fn metadata(state: &AppState) -> Map<String, Value> {
    let mut meta = Map::new();
    meta.insert("chainId".to_string(), json!(state.chain_id()));
    meta.insert("platform".to_string(), json!(&*state.platform_tag));
    meta.insert("timestamp".to_string(), json!(Utc::now().to_rfc3339()));
    meta
}

/// Adds `metadata` to a partner body; non-object bodies are wrapped in `data`.
fn with_metadata(body: Value, meta: Map<String, Value>) -> Value {
    let mut object = match body {
        Value::Object(object) => object,
        other => {
            let mut wrapped = Map::new();
            wrapped.insert("data".to_string(), other);
            wrapped
        }
    };
    object.insert("metadata".to_string(), Value::Object(meta));
    Value::Object(object)
}

fn quote_params(
    query: Result<Query<SwapQuoteParams>, QueryRejection>,
) -> Result<SwapQuoteParams, Response> {
    let Query(params) =
        query.map_err(|rejection| ApiError::validation(rejection.body_text()).into_response())?;
    params
        .validate()
        .map_err(|e| ApiError::from(e).into_response())?;
    Ok(params)
}

/// GET `/swap/quote` - Firm swap quote.
async fn swap_quote(
    State(state): State<AppState>,
    query: Result<Query<SwapQuoteParams>, QueryRejection>,
) -> ProxyResult {
    let params = quote_params(query)?;
    let body = state
        .dex
        .swap_quote(&params)
        .await
        .map_err(|e| PartnerFailure(e).into_response())?;
    Ok(Json(with_metadata(body, metadata(&state))))
}

/// GET `/swap/gasless/quote` - Quote for a relayed swap.
async fn gasless_quote(
    State(state): State<AppState>,
    query: Result<Query<SwapQuoteParams>, QueryRejection>,
) -> ProxyResult {
    let params = quote_params(query)?;
    let body = state
        .dex
        .gasless_quote(&params)
        .await
        .map_err(|e| PartnerFailure(e).into_response())?;
    Ok(Json(with_metadata(body, metadata(&state))))
}

/// POST `/swap/gasless` - Submits a signed gasless trade.
async fn submit_gasless(
    State(state): State<AppState>,
    ValidatedJson(submission): ValidatedJson<GaslessSubmission>,
) -> ProxyResult {
    submission.validate().map_err(IntoResponse::into_response)?;

    let meta = metadata(&state);
    let mut outgoing_meta = submission.metadata;
    outgoing_meta.extend(meta.clone());
    let payload = json!({
        "trade": submission.trade,
        "signature": submission.signature,
        "metadata": outgoing_meta,
    });

    tracing::info!(chain_id = state.chain_id(), "Submitting gasless trade");
    let body = state
        .dex
        .submit_gasless(&payload)
        .await
        .map_err(|e| PartnerFailure(e).into_response())?;
    Ok(Json(with_metadata(body, meta)))
}

/// GET `/swap/gasless/status/{trade_hash}` - Status of a submitted trade.
async fn gasless_status(
    State(state): State<AppState>,
    Path(trade_hash): Path<String>,
) -> ProxyResult {
    if !is_hex_hash(&trade_hash) {
        return Err(ApiError::validation(format!("invalid trade hash: {trade_hash}")).into_response());
    }
    let body = state
        .dex
        .gasless_status(&trade_hash)
        .await
        .map_err(|e| PartnerFailure(e).into_response())?;
    Ok(Json(with_metadata(body, metadata(&state))))
}

fn is_hex_hash(raw: &str) -> bool {
    raw.strip_prefix("0x")
        .is_some_and(|hex| !hex.is_empty() && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
