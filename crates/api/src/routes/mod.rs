//! API route definitions.

use std::str::FromStr;

use alloy_primitives::Address;
use amparo_core::{Provenance, SourceResult};
use axum::{Router, middleware};
use serde::Serialize;

use crate::error::ApiError;
use crate::{AppState, middleware::request_scope};

pub mod contracts;
pub mod dashboard;
pub mod health;
pub mod network;
pub mod partners;
pub mod quotes;
pub mod swap;

#[cfg(test)]
pub(crate) mod test_support;

/// Creates the API router. Routes that read upstreams run in a request scope.
#[allow(clippy::needless_pass_by_value)]
pub fn api_routes_with_state(state: AppState) -> Router<AppState> {
    let scoped_routes = Router::new()
        .merge(network::routes())
        .merge(dashboard::routes())
        .merge(quotes::routes())
        .merge(swap::routes())
        .merge(partners::routes())
        .layer(middleware::from_fn_with_state(
            state.clone(),
            request_scope,
        ));

    Router::new()
        .merge(health::routes())
        .merge(contracts::routes())
        .merge(scoped_routes)
}

/// Response body: the value's fields plus its `provenance`.
#[derive(Debug, Serialize)]
pub struct WithProvenance<T> {
    /// Resolved value.
    #[serde(flatten)]
    pub value: T,
    /// Where the value came from.
    pub provenance: Provenance,
}

impl<T> From<SourceResult<T>> for WithProvenance<T> {
    fn from(result: SourceResult<T>) -> Self {
        Self {
            provenance: result.provenance(),
            value: result.into_value(),
        }
    }
}

/// Parses a wallet address from a request.
pub(crate) fn parse_address(raw: &str) -> Result<Address, ApiError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ApiError::validation("address is required"));
    }
    Address::from_str(raw)
        .map_err(|_| ApiError::validation(format!("invalid address: {raw}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0x1111111111111111111111111111111111111111")]
    #[case("  0xAbCdEf0123456789abcdef0123456789ABCDEF01 ")]
    fn test_parse_address_accepts(#[case] raw: &str) {
        assert!(parse_address(raw).is_ok());
    }

    #[rstest]
    #[case("")]
    #[case("0x1234")]
    #[case("not-an-address")]
    fn test_parse_address_rejects(#[case] raw: &str) {
        assert!(parse_address(raw).is_err());
    }
}
