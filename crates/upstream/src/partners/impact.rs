//! Impact partner client.

use amparo_core::ports::{ImpactPartner, PartnerCallError};
use amparo_shared::PartnerEndpoint;
use async_trait::async_trait;
use serde_json::Value;

use super::x_api_key_headers;
use crate::error::ClientBuildError;
use crate::http::PartnerHttp;

/// `GET {base}/users/{address}/impact`.
#[derive(Debug, Clone)]
pub struct ImpactClient {
    http: PartnerHttp,
}

impl ImpactClient {
    /// Creates the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key or HTTP settings are invalid.
    pub fn new(endpoint: &PartnerEndpoint) -> Result<Self, ClientBuildError> {
        let headers = x_api_key_headers("impact", endpoint)?;
        Ok(Self {
            http: PartnerHttp::new("impact", endpoint, headers)?,
        })
    }
}

#[async_trait]
impl ImpactPartner for ImpactClient {
    async fn user_analytics(&self, address: &str) -> Result<Value, PartnerCallError> {
        if address.trim().is_empty() {
            return Err(PartnerCallError::transport(self.http.name(), "address is required"));
        }
        self.http.get(&["users", address, "impact"], &[]).await
    }
}
