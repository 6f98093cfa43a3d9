//! Shared HTTP plumbing for partner clients.

use std::time::Duration;

use amparo_core::ports::PartnerCallError;
use amparo_shared::PartnerEndpoint;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{RequestBuilder, Url};
use serde_json::Value;

use crate::error::ClientBuildError;

/// One partner's base URL, default headers and timeout.
#[derive(Debug, Clone)]
pub(crate) struct PartnerHttp {
    name: &'static str,
    client: reqwest::Client,
    base: String,
}

impl PartnerHttp {
    /// Builds a client sending `headers` on every request.
    pub(crate) fn new(
        name: &'static str,
        endpoint: &PartnerEndpoint,
        headers: HeaderMap,
    ) -> Result<Self, ClientBuildError> {
        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(endpoint.request_timeout_secs))
            .build()
            .map_err(|source| ClientBuildError::Http {
                name: name.to_string(),
                source,
            })?;

        Ok(Self {
            name,
            client,
            base: endpoint.base().to_string(),
        })
    }

    /// Partner name used in errors.
    pub(crate) const fn name(&self) -> &'static str {
        self.name
    }

    /// Base URL with `segments` appended, each percent-encoded.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url, PartnerCallError> {
        let mut url = Url::parse(&self.base)
            .map_err(|e| PartnerCallError::transport(self.name, format!("invalid base URL: {e}")))?;
        url.path_segments_mut()
            .map_err(|()| PartnerCallError::transport(self.name, "base URL cannot have a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET returning the JSON body.
    pub(crate) async fn get(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<Value, PartnerCallError> {
        let url = self.url(segments)?;
        self.send(self.client.get(url).query(query)).await
    }

    /// POST of a JSON body returning the JSON body.
    pub(crate) async fn post(
        &self,
        segments: &[&str],
        body: &Value,
    ) -> Result<Value, PartnerCallError> {
        let url = self.url(segments)?;
        self.send(self.client.post(url).json(body)).await
    }

    async fn send(&self, request: RequestBuilder) -> Result<Value, PartnerCallError> {
        let resp = request
            .send()
            .await
            .map_err(|e| PartnerCallError::transport(self.name, e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let content_type = resp
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let text = resp.text().await.unwrap_or_default();
            let body = serde_json::from_str::<Value>(&text).ok();
            tracing::debug!(
                partner = self.name,
                status = status.as_u16(),
                json = body.is_some(),
                "Partner returned error status"
            );
            return Err(PartnerCallError::status(self.name, status.as_u16(), body)
                .with_raw_body(content_type, text));
        }

        resp.json::<Value>()
            .await
            .map_err(|e| PartnerCallError::transport(self.name, format!("invalid JSON body: {e}")))
    }
}

/// Header map carrying `value` under `name`, marked sensitive.
pub(crate) fn secret_header(
    partner: &str,
    name: &'static str,
    value: &str,
) -> Result<HeaderMap, ClientBuildError> {
    let mut headers = HeaderMap::new();
    insert_secret(&mut headers, partner, name, value)?;
    Ok(headers)
}

/// Inserts a sensitive header.
pub(crate) fn insert_secret(
    headers: &mut HeaderMap,
    partner: &str,
    name: &'static str,
    value: &str,
) -> Result<(), ClientBuildError> {
    let mut value = HeaderValue::from_str(value)
        .map_err(|_| ClientBuildError::InvalidApiKey(partner.to_string()))?;
    value.set_sensitive(true);
    headers.insert(HeaderName::from_static(name), value);
    Ok(())
}
