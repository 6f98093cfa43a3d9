//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes under `/api/v1`
//! - Per-request cancellation scope
//! - Request extractors
//! - JSON error responses

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;

use std::any::Any;
use std::sync::Arc;

use amparo_core::Aggregator;
use amparo_core::contracts::ContractSet;
use amparo_core::ports::DexAggregator;
use axum::Router;
use axum::response::{IntoResponse, Response};
use tokio_util::sync::CancellationToken;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Fallback-aware reads.
    pub aggregator: Arc<Aggregator>,
    /// DEX partner for the swap and gasless proxies.
    pub dex: Arc<dyn DexAggregator>,
    /// Contracts of the configured network.
    pub contracts: Arc<ContractSet>,
    /// Tag merged into proxied payloads.
    pub platform_tag: Arc<str>,
    /// Root token; cancelled on shutdown.
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Configured chain id.
    #[must_use]
    pub fn chain_id(&self) -> u64 {
        self.contracts.chain_id()
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes_with_state(state.clone()))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(AnyOrigin)
                .allow_methods(AnyOrigin)
                .allow_headers(AnyOrigin),
        )
        .with_state(state)
}

/// Turns a handler panic into a 500 JSON body.
#[allow(clippy::needless_pass_by_value)]
fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("handler panicked");
    tracing::error!(details, "Handler panicked");
    ApiError::internal(details).into_response()
}
