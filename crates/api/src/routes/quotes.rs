//! Premium and risk quotes.

use amparo_core::pricing::{PremiumInput, PremiumQuote};
use amparo_core::risk::{RiskAssessment, RiskRequest};
use axum::{Json, Router, extract::State, routing::post};

use crate::AppState;
use crate::error::ApiError;
use crate::extractors::ValidatedJson;
use crate::middleware::RequestScope;

/// Creates the quote routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/premium", post(premium))
        .route("/risk", post(risk))
}

/// POST `/premium` - Oracle premium, or the local formula when the oracle fails.
async fn premium(
    State(state): State<AppState>,
    scope: RequestScope,
    ValidatedJson(input): ValidatedJson<PremiumInput>,
) -> Result<Json<PremiumQuote>, ApiError> {
    input.validate()?;
    Ok(Json(
        state.aggregator.premium_quote(&input, scope.token()).await,
    ))
}

/// POST `/risk` - Risk assessment with per-field fallback.
async fn risk(
    State(state): State<AppState>,
    scope: RequestScope,
    ValidatedJson(request): ValidatedJson<RiskRequest>,
) -> Result<Json<RiskAssessment>, ApiError> {
    request.answers.validate()?;
    Ok(Json(
        state
            .aggregator
            .risk_assessment(&request.answers, scope.token())
            .await,
    ))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use rstest::rstest;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::routes::test_support::{TestApp, post_json};

    fn premium_body() -> Value {
        json!({
            "age": 30,
            "location": "CDMX",
            "insuranceType": "health",
            "coverage": 10000,
            "duration": 12,
            "occupation": "employee"
        })
    }

    #[tokio::test]
    async fn test_premium_from_oracle() {
        let (status, body) =
            post_json(TestApp::default().router(), "/api/v1/premium", &premium_body()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["premium"], 7.5);
        assert_eq!(body["source"]["kind"], "authoritative");
    }

    #[tokio::test]
    async fn test_premium_falls_back_to_formula_when_oracle_is_down() {
        let (status, body) =
            post_json(TestApp::offline().router(), "/api/v1/premium", &premium_body()).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["premium"], 6.0);
        assert_eq!(body["source"]["kind"], "fallback");
        assert_eq!(body["source"]["sourceName"], "calculatePremium");
    }

    #[rstest]
    #[case("age", json!(0))]
    #[case("location", json!(""))]
    #[case("coverage", json!(-5))]
    #[case("duration", json!(0))]
    #[tokio::test]
    async fn test_premium_rejects_invalid_field(#[case] field: &str, #[case] value: Value) {
        let mut body = premium_body();
        body[field] = value;

        let (status, body) =
            post_json(TestApp::default().router(), "/api/v1/premium", &body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
    }

    #[tokio::test]
    async fn test_premium_rejects_missing_field() {
        let mut body = premium_body();
        body.as_object_mut().unwrap().remove("occupation");

        let (status, _) =
            post_json(TestApp::default().router(), "/api/v1/premium", &body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_json_is_validation_error() {
        let response = TestApp::default()
            .router()
            .oneshot(
                Request::post("/api/v1/premium")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{\"age\": 30,"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_risk_from_oracle() {
        let (status, body) = post_json(
            TestApp::default().router(),
            "/api/v1/risk",
            &json!({"answers": {"age": 30, "location": "CDMX", "occupation": "employee", "health": "good"}}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["riskScore"], 64);
        assert_eq!(body["overallRisk"], "high");
        assert_eq!(body["riskFactors"], json!(["Hurricane season"]));
        assert_eq!(body["provenance"]["riskScore"]["kind"], "authoritative");
    }

    #[tokio::test]
    async fn test_risk_falls_back_locally() {
        let (status, body) = post_json(
            TestApp::offline().router(),
            "/api/v1/risk",
            &json!({"answers": {"age": 30, "location": "CDMX", "occupation": "employee", "health": "good"}}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["provenance"]["riskScore"]["kind"], "fallback");
        assert_eq!(body["provenance"]["riskFactors"]["kind"], "fallback");
        assert!(!body["recommendations"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_risk_requires_answers() {
        let (status, _) = post_json(
            TestApp::default().router(),
            "/api/v1/risk",
            &json!({"answers": {"age": 30, "location": "", "occupation": "employee", "health": "good"}}),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
