//! API error responses.

use amparo_core::ports::PartnerCallError;
use amparo_core::pricing::QuoteError;
use amparo_shared::AppError;
use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// `AppError` rendered as `{"error": code, "message": text}`.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl ApiError {
    /// 400 with a description of the invalid input.
    pub fn validation(message: impl Into<String>) -> Self {
        Self(AppError::validation(message))
    }

    /// 500 carrying the failure description.
    pub fn internal(details: impl Into<String>) -> Self {
        Self(AppError::Internal(details.into()))
    }
}

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl From<QuoteError> for ApiError {
    fn from(err: QuoteError) -> Self {
        Self::validation(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let body = match &self.0 {
            AppError::Internal(details) => json!({
                "error": self.0.error_code(),
                "message": "Internal server error",
                "details": details,
            }),
            AppError::Validation(message)
            | AppError::ExternalService(message) => json!({
                "error": self.0.error_code(),
                "message": message,
            }),
        };

        (status, Json(body)).into_response()
    }
}

/// Partner failure passed back to the caller untouched.
///
/// The partner's status, content type and body bytes are kept; a failure
/// without an HTTP answer becomes a 502.
#[derive(Debug)]
pub struct PartnerFailure(pub PartnerCallError);

impl IntoResponse for PartnerFailure {
    fn into_response(self) -> Response {
        let err = self.0;
        tracing::warn!(
            partner = %err.partner,
            status = ?err.http_status,
            error = %err.message,
            "Partner call failed"
        );

        let Some(status) = err.http_status.and_then(|s| StatusCode::from_u16(s).ok()) else {
            return ApiError(AppError::ExternalService(format!(
                "{} call failed: {}",
                err.partner, err.message
            )))
            .into_response();
        };

        match (err.raw_body, err.body) {
            (Some(raw), _) => {
                let mut response = (status, raw.text).into_response();
                match raw
                    .content_type
                    .as_deref()
                    .and_then(|ct| HeaderValue::from_str(ct).ok())
                {
                    Some(content_type) => {
                        response.headers_mut().insert(header::CONTENT_TYPE, content_type);
                    }
                    None => {
                        response.headers_mut().remove(header::CONTENT_TYPE);
                    }
                }
                response
            }
            (None, Some(body)) => (status, Json(body)).into_response(),
            (None, None) => status.into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use serde_json::Value;

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_error_shape() {
        let response = ApiError::from(QuoteError::MissingField("location")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"], "validation_error");
        assert!(body["message"].as_str().unwrap().contains("location"));
    }

    #[tokio::test]
    async fn test_internal_error_hides_message_keeps_details() {
        let response = ApiError::internal("boom").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body["message"], "Internal server error");
        assert_eq!(body["details"], "boom");
    }

    #[tokio::test]
    async fn test_partner_failure_is_verbatim() {
        let err = PartnerCallError::status("dex", 422, Some(json!({"reason": "bad trade"})));
        let response = PartnerFailure(err).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body_json(response).await, json!({"reason": "bad trade"}));
    }

    async fn body_text(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_partner_failure_keeps_non_json_body() {
        let err = PartnerCallError::status("dex", 429, None)
            .with_raw_body(Some("text/plain; charset=utf-8".to_string()), "rate limited".to_string());

        let response = PartnerFailure(err).into_response();

        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        assert_eq!(body_text(response).await, "rate limited");
    }

    #[tokio::test]
    async fn test_partner_failure_keeps_json_bytes() {
        let raw = r#"{"code":"INPUT_INVALID",  "reason":"too small"}"#;
        let err = PartnerCallError::status("dex", 400, serde_json::from_str(raw).ok())
            .with_raw_body(Some("application/json".to_string()), raw.to_string());

        let response = PartnerFailure(err).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        assert_eq!(body_text(response).await, raw);
    }

    #[tokio::test]
    async fn test_partner_failure_with_empty_body_keeps_status_only() {
        let response = PartnerFailure(PartnerCallError::status("dex", 503, None)).into_response();

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert!(body_text(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_partner_failure_without_status_is_bad_gateway() {
        let err = PartnerCallError::transport("dex", "connection refused");
        let response = PartnerFailure(err).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = body_json(response).await;
        assert_eq!(body["error"], "upstream_error");
        assert_eq!(body["message"], "dex call failed: connection refused");
    }
}
