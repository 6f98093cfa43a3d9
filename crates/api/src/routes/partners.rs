//! Reinsurance and impact figures.

use amparo_core::aggregator::{ImpactAnalytics, ReinsuranceOverview};
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};

use super::{WithProvenance, parse_address};
use crate::AppState;
use crate::error::ApiError;
use crate::middleware::RequestScope;

/// Creates the partner analytics routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/reinsurance", get(reinsurance))
        .route("/impact/{address}", get(impact))
}

/// GET `/reinsurance` - Partner pool metrics plus the on-chain token supply.
async fn reinsurance(
    State(state): State<AppState>,
    scope: RequestScope,
) -> Json<WithProvenance<ReinsuranceOverview>> {
    Json(
        state
            .aggregator
            .reinsurance_overview(scope.token())
            .await
            .into(),
    )
}

/// GET `/impact/{address}` - Coverage and social impact of one wallet.
async fn impact(
    State(state): State<AppState>,
    scope: RequestScope,
    Path(address): Path<String>,
) -> Result<Json<WithProvenance<ImpactAnalytics>>, ApiError> {
    let holder = parse_address(&address)?;
    Ok(Json(
        state.aggregator.impact(holder, scope.token()).await.into(),
    ))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::routes::test_support::{HOLDER, TestApp, get_json};

    #[tokio::test]
    async fn test_reinsurance_overview_is_authoritative() {
        let (status, body) = get_json(TestApp::default().router(), "/api/v1/reinsurance").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["activeTreaties"], 4);
        assert_eq!(body["tokenSupply"], 10_000.0);
        assert_eq!(body["provenance"]["kind"], "authoritative");
    }

    #[tokio::test]
    async fn test_reinsurance_falls_back_when_partner_is_down() {
        let (status, body) = get_json(TestApp::offline().router(), "/api/v1/reinsurance").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totalCapacity"], 500_000.0);
        assert_eq!(body["activeTreaties"], 3);
        assert_eq!(body["provenance"]["kind"], "fallback");
        assert!(body["provenance"]["reason"].is_string());
    }

    #[tokio::test]
    async fn test_impact_for_wallet() {
        let (status, body) =
            get_json(TestApp::default().router(), &format!("/api/v1/impact/{HOLDER}")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["beneficiaries"], 4);
        assert_eq!(body["provenance"]["sourceName"], "impact");
    }

    #[tokio::test]
    async fn test_impact_rejects_bad_address() {
        let (status, _) = get_json(TestApp::default().router(), "/api/v1/impact/0x12").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
