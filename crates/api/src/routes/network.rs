//! Network throughput and node health.

use amparo_core::aggregator::{NetworkHealth, NetworkStats};
use axum::{Json, Router, extract::State, routing::get};

use crate::AppState;
use crate::middleware::RequestScope;

/// Creates the network routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/stats", get(network_stats))
        .route("/network/health", get(network_health))
}

/// GET `/stats` - Throughput and totals, jittered placeholders when the node is down.
async fn network_stats(State(state): State<AppState>, scope: RequestScope) -> Json<NetworkStats> {
    Json(state.aggregator.network_stats(scope.token()).await.into_value())
}

/// GET `/network/health` - Node identity, head and gas price.
async fn network_health(
    State(state): State<AppState>,
    scope: RequestScope,
) -> Json<NetworkHealth> {
    Json(state.aggregator.network_health(scope.token()).await.into_value())
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use crate::routes::test_support::{TestApp, get_json};

    #[tokio::test]
    async fn test_stats_from_live_node() {
        let (status, body) = get_json(TestApp::default().router(), "/api/v1/stats").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isConnected"], true);
        assert_eq!(body["blockHeight"], 1_234);
        assert_eq!(body["tps"], 7.0);
        assert_eq!(body["totalTransactions"], 98_765);
    }

    #[tokio::test]
    async fn test_stats_fall_back_when_node_is_down() {
        let (status, body) = get_json(TestApp::offline().router(), "/api/v1/stats").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isConnected"], false);
        assert_eq!(body["blockHeight"], 0);
        assert_eq!(body["tps"], 1_000.0);
        assert_eq!(body["totalTransactions"], 2_500_000);
    }

    #[tokio::test]
    async fn test_network_health_fallback_is_unhealthy() {
        let (status, body) =
            get_json(TestApp::offline().router(), "/api/v1/network/health").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["chainId"], 10143);
        assert_eq!(body["isHealthy"], false);
        assert_eq!(body["blockNumber"], 0);
    }
}
