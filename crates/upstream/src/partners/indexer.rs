//! GraphQL indexer client.

use amparo_core::ports::{Indexer, PartnerCallError};
use amparo_shared::PartnerEndpoint;
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use serde_json::{Value, json};

use crate::error::ClientBuildError;
use crate::http::{PartnerHttp, secret_header};

/// `POST {base}` with `{query, variables}`.
#[derive(Debug, Clone)]
pub struct IndexerClient {
    http: PartnerHttp,
}

impl IndexerClient {
    /// Creates the client. The API key, if any, is sent as a bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key or HTTP settings are invalid.
    pub fn new(endpoint: &PartnerEndpoint) -> Result<Self, ClientBuildError> {
        let headers = match endpoint.api_key.as_deref() {
            Some(key) => secret_header("indexer", "authorization", &format!("Bearer {key}"))?,
            None => HeaderMap::new(),
        };
        Ok(Self {
            http: PartnerHttp::new("indexer", endpoint, headers)?,
        })
    }
}

#[async_trait]
impl Indexer for IndexerClient {
    async fn query(&self, query: &str, variables: Value) -> Result<Value, PartnerCallError> {
        let mut body = self
            .http
            .post(&[], &json!({ "query": query, "variables": variables }))
            .await?;

        // GraphQL reports failures in-band with a 200.
        let errors = body
            .get("errors")
            .and_then(Value::as_array)
            .filter(|errors| !errors.is_empty());
        if let Some(errors) = errors {
            let message = errors[0]
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("query failed")
                .to_string();
            return Err(PartnerCallError {
                partner: self.http.name().to_string(),
                http_status: None,
                message,
                body: Some(Value::Array(errors.clone())),
                raw_body: None,
            });
        }

        match body.get_mut("data") {
            Some(data) if !data.is_null() => Ok(data.take()),
            _ => Err(PartnerCallError::transport(
                self.http.name(),
                "response has no data",
            )),
        }
    }
}
