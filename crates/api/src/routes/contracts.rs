//! Active contract addresses.

use std::collections::BTreeMap;

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::AppState;

/// Contract addresses of the configured network.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractsResponse {
    /// Configured chain id.
    pub chain_id: u64,
    /// Whether every role has an address.
    pub deployed: bool,
    /// Role key to checksummed address; unset roles show the zero address.
    pub contracts: BTreeMap<&'static str, String>,
}

/// Creates the contract routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/contracts", get(list_contracts))
}

/// GET `/contracts` - Addresses the chain client reads from.
async fn list_contracts(State(state): State<AppState>) -> Json<ContractsResponse> {
    let contracts = state
        .contracts
        .entries()
        .into_iter()
        .map(|(role, address)| (role.as_str(), address.to_checksum(None)))
        .collect();

    Json(ContractsResponse {
        chain_id: state.chain_id(),
        deployed: state.contracts.is_deployed(),
        contracts,
    })
}

#[cfg(test)]
mod tests {
    use alloy_primitives::Address;
    use amparo_core::contracts::{ContractRole, ContractSet};
    use axum::http::StatusCode;

    use crate::routes::test_support::{TestApp, get_json};

    #[tokio::test]
    async fn test_partial_network_is_not_deployed() {
        let contracts = ContractSet::new(10143)
            .with(ContractRole::InsurancePool, Address::repeat_byte(0x11));
        let app = TestApp {
            contracts,
            ..TestApp::default()
        };

        let (status, body) = get_json(app.router(), "/api/v1/contracts").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["chainId"], 10143);
        assert_eq!(body["deployed"], false);
        assert_eq!(
            body["contracts"]["insurancePool"],
            Address::repeat_byte(0x11).to_checksum(None)
        );
        assert_eq!(
            body["contracts"]["oracle"],
            Address::ZERO.to_checksum(None)
        );
    }
}
