//! Deployment manifest written by the deploy scripts.

use std::collections::BTreeMap;

use serde::Deserialize;

use super::error::ContractError;

/// Addresses recorded by a deployment run.
///
/// ```json
/// {
///   "network": "monadTestnet",
///   "chainId": 10143,
///   "deployedAt": "2025-06-01T12:00:00.000Z",
///   "contracts": { "oracle": "0x...", "insurancePool": "0x..." }
/// }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentManifest {
    /// Network name used by the deploy tooling.
    #[serde(default)]
    pub network: String,
    /// Chain id the contracts were deployed to.
    pub chain_id: u64,
    /// Deployment timestamp as written by the scripts.
    #[serde(default)]
    pub deployed_at: Option<String>,
    /// Role key to address.
    pub contracts: BTreeMap<String, String>,
}

impl DeploymentManifest {
    /// Parses a manifest from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not match the manifest layout.
    pub fn from_json(raw: &str) -> Result<Self, ContractError> {
        serde_json::from_str(raw).map_err(|e| ContractError::InvalidManifest(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::{ContractRegistry, ContractRole};

    const MANIFEST: &str = r#"{
        "network": "monadTestnet",
        "chainId": 10143,
        "deployedAt": "2025-06-01T12:00:00.000Z",
        "deployer": "0x00000000000000000000000000000000000000ff",
        "contracts": {
            "oracle": "0x00000000000000000000000000000000000000a1",
            "insurancePool": "0x00000000000000000000000000000000000000a2",
            "deployer": "0x00000000000000000000000000000000000000ff"
        }
    }"#;

    #[test]
    fn test_parse_manifest() {
        let manifest = DeploymentManifest::from_json(MANIFEST).unwrap();
        assert_eq!(manifest.chain_id, 10143);
        assert_eq!(manifest.network, "monadTestnet");
        assert_eq!(manifest.contracts.len(), 3);
    }

    #[test]
    fn test_manifest_overrides_defaults_and_skips_unknown_keys() {
        let manifest = DeploymentManifest::from_json(MANIFEST).unwrap();
        let mut registry = ContractRegistry::with_defaults();
        registry.apply_manifest(&manifest).unwrap();

        let set = registry.get(10143).unwrap();
        assert_eq!(
            set.address(ContractRole::Oracle).unwrap().to_string().to_lowercase(),
            "0x00000000000000000000000000000000000000a1"
        );
        assert!(set.is_deployed());
    }

    #[test]
    fn test_manifest_for_new_network_is_partial() {
        let raw = r#"{"chainId": 31337, "contracts": {"oracle": "0x00000000000000000000000000000000000000a1"}}"#;
        let manifest = DeploymentManifest::from_json(raw).unwrap();
        let mut registry = ContractRegistry::with_defaults();
        registry.apply_manifest(&manifest).unwrap();

        assert!(!registry.is_deployed(31337));
        assert!(registry.is_deployed(10143));
    }

    #[test]
    fn test_invalid_manifest() {
        assert!(matches!(
            DeploymentManifest::from_json("{\"contracts\": {}}"),
            Err(ContractError::InvalidManifest(_))
        ));
    }
}
