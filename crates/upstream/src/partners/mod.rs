//! Partner API clients.

mod dex;
mod impact;
mod indexer;
mod reinsurance;

pub use dex::DexClient;
pub use impact::ImpactClient;
pub use indexer::IndexerClient;
pub use reinsurance::ReinsuranceClient;

use amparo_shared::PartnerEndpoint;
use reqwest::header::HeaderMap;

use crate::error::ClientBuildError;
use crate::http::secret_header;

/// Headers for partners authenticating with `x-api-key`.
fn x_api_key_headers(
    partner: &str,
    endpoint: &PartnerEndpoint,
) -> Result<HeaderMap, ClientBuildError> {
    match endpoint.api_key.as_deref() {
        Some(key) => secret_header(partner, "x-api-key", key),
        None => Ok(HeaderMap::new()),
    }
}
