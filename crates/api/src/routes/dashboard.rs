//! Wallet dashboard.

use amparo_core::aggregator::DashboardSnapshot;
use axum::{Json, Router, extract::State, routing::post};
use serde::Deserialize;

use crate::AppState;
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::middleware::RequestScope;
use crate::routes::parse_address;

/// Dashboard request body.
#[derive(Debug, Deserialize)]
pub struct DashboardRequest {
    /// Wallet address.
    #[serde(default)]
    pub address: String,
}

/// Creates the dashboard routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard", post(dashboard))
}

/// POST `/dashboard` - Pool stats, activity and analytics for one wallet.
///
/// Every group falls back independently; only a bad address is an error.
async fn dashboard(
    State(state): State<AppState>,
    scope: RequestScope,
    ValidatedJson(request): ValidatedJson<DashboardRequest>,
) -> Result<Json<DashboardSnapshot>, ApiError> {
    let holder = parse_address(&request.address)?;
    Ok(Json(state.aggregator.dashboard(holder, scope.token()).await))
}
