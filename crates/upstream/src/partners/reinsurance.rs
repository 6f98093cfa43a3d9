//! Reinsurance partner client.

use amparo_core::ports::{PartnerCallError, ReinsurancePartner};
use amparo_shared::PartnerEndpoint;
use async_trait::async_trait;
use serde_json::Value;

use super::x_api_key_headers;
use crate::error::ClientBuildError;
use crate::http::PartnerHttp;

/// `GET {base}/pools/metrics`.
#[derive(Debug, Clone)]
pub struct ReinsuranceClient {
    http: PartnerHttp,
}

impl ReinsuranceClient {
    /// Creates the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key or HTTP settings are invalid.
    pub fn new(endpoint: &PartnerEndpoint) -> Result<Self, ClientBuildError> {
        let headers = x_api_key_headers("reinsurance", endpoint)?;
        Ok(Self {
            http: PartnerHttp::new("reinsurance", endpoint, headers)?,
        })
    }
}

#[async_trait]
impl ReinsurancePartner for ReinsuranceClient {
    async fn pool_metrics(&self) -> Result<Value, PartnerCallError> {
        self.http.get(&["pools", "metrics"], &[]).await
    }
}
