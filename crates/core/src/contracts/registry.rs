//! Contract roles, per-network sets and the registry.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use alloy_primitives::{Address, address};
use serde::{Deserialize, Serialize};

use super::error::ContractError;
use super::manifest::DeploymentManifest;

/// Logical role of a deployed contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ContractRole {
    /// Premium and risk oracle.
    #[serde(rename = "oracle")]
    Oracle,
    /// Premium pool and claim accounting.
    #[serde(rename = "insurancePool")]
    InsurancePool,
    /// Policy NFTs held by insured wallets.
    #[serde(rename = "policyNFT")]
    PolicyNft,
    /// Reinsurance pool token.
    #[serde(rename = "reinsuranceToken")]
    ReinsuranceToken,
    /// Relayed premium payments.
    #[serde(rename = "gaslessPaymentHandler")]
    GaslessPaymentHandler,
    /// Savings goals linked to policies.
    #[serde(rename = "savingsGoalHandler")]
    SavingsGoalHandler,
}

impl ContractRole {
    /// Every role a deployed network must provide.
    pub const ALL: [Self; 6] = [
        Self::Oracle,
        Self::InsurancePool,
        Self::PolicyNft,
        Self::ReinsuranceToken,
        Self::GaslessPaymentHandler,
        Self::SavingsGoalHandler,
    ];

    /// Role key as used in manifests and responses.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Oracle => "oracle",
            Self::InsurancePool => "insurancePool",
            Self::PolicyNft => "policyNFT",
            Self::ReinsuranceToken => "reinsuranceToken",
            Self::GaslessPaymentHandler => "gaslessPaymentHandler",
            Self::SavingsGoalHandler => "savingsGoalHandler",
        }
    }
}

impl fmt::Display for ContractRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContractRole {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ContractError::UnknownRole(s.to_string()))
    }
}

/// Addresses of every contract role on one network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractSet {
    chain_id: u64,
    addresses: BTreeMap<ContractRole, Address>,
}

impl ContractSet {
    /// Creates an empty set for a network.
    #[must_use]
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain_id,
            addresses: BTreeMap::new(),
        }
    }

    /// Sets the address for a role.
    #[must_use]
    pub fn with(mut self, role: ContractRole, address: Address) -> Self {
        self.addresses.insert(role, address);
        self
    }

    /// Network id this set belongs to.
    #[must_use]
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Address for a role, if set and non-zero.
    #[must_use]
    pub fn address(&self, role: ContractRole) -> Option<Address> {
        self.addresses
            .get(&role)
            .copied()
            .filter(|addr| *addr != Address::ZERO)
    }

    /// A network is deployed when every role has a non-zero address.
    #[must_use]
    pub fn is_deployed(&self) -> bool {
        ContractRole::ALL
            .iter()
            .all(|role| self.address(*role).is_some())
    }

    /// All roles with their address (zero address when unset).
    #[must_use]
    pub fn entries(&self) -> Vec<(ContractRole, Address)> {
        ContractRole::ALL
            .into_iter()
            .map(|role| {
                (
                    role,
                    self.addresses.get(&role).copied().unwrap_or(Address::ZERO),
                )
            })
            .collect()
    }

    /// Applies a role-key/address override.
    ///
    /// # Errors
    ///
    /// Returns an error if the role is unknown or the address is not hex.
    pub fn set_raw(&mut self, role: &str, raw: &str) -> Result<(), ContractError> {
        let role = ContractRole::from_str(role)?;
        let address = Address::from_str(raw.trim()).map_err(|_| ContractError::InvalidAddress {
            role: role.to_string(),
            address: raw.to_string(),
        })?;
        self.addresses.insert(role, address);
        Ok(())
    }
}

/// Contract sets keyed by chain id.
#[derive(Debug, Clone, Default)]
pub struct ContractRegistry {
    networks: HashMap<u64, ContractSet>,
}

impl ContractRegistry {
    /// Chain id of the Monad test network.
    pub const TESTNET_CHAIN_ID: u64 = 10143;

    /// Registry holding the built-in test network deployment.
    #[must_use]
    pub fn with_defaults() -> Self {
        let testnet = ContractSet::new(Self::TESTNET_CHAIN_ID)
            .with(
                ContractRole::Oracle,
                address!("0x3b2f6c9d8e1a4f7b5c0d2e9a8b7c6d5e4f3a2b1c"),
            )
            .with(
                ContractRole::InsurancePool,
                address!("0x7a1e9c3b5d2f8a6e4c0b9d7f5a3e1c8b6d4f2a09"),
            )
            .with(
                ContractRole::PolicyNft,
                address!("0x9c4d2b7e1f5a8c3d6e0b4f9a2c7e5d1b8f3a6c40"),
            )
            .with(
                ContractRole::ReinsuranceToken,
                address!("0x1f8e3a6c9b2d5f7e0a4c8b1d6e9f3a5c7b2d4e61"),
            )
            .with(
                ContractRole::GaslessPaymentHandler,
                address!("0x5d7b9e2a4c6f8b1d3e5a7c9f0b2d4e6a8c1f3b72"),
            )
            .with(
                ContractRole::SavingsGoalHandler,
                address!("0x2e6a8c1f4b7d9e3a5c0f2b8d6e4a1c9f7b3d5e83"),
            );

        let mut registry = Self::default();
        registry.insert(testnet);
        registry
    }

    /// Inserts or replaces the set for its network.
    pub fn insert(&mut self, set: ContractSet) {
        self.networks.insert(set.chain_id(), set);
    }

    /// Contract set for a network.
    #[must_use]
    pub fn get(&self, chain_id: u64) -> Option<&ContractSet> {
        self.networks.get(&chain_id)
    }

    /// Whether a network has a complete, non-zero deployment.
    #[must_use]
    pub fn is_deployed(&self, chain_id: u64) -> bool {
        self.get(chain_id).is_some_and(ContractSet::is_deployed)
    }

    /// Applies a deployment manifest over the existing set for its network.
    ///
    /// # Errors
    ///
    /// Returns an error if any listed address is invalid.
    pub fn apply_manifest(&mut self, manifest: &DeploymentManifest) -> Result<(), ContractError> {
        let set = self
            .networks
            .entry(manifest.chain_id)
            .or_insert_with(|| ContractSet::new(manifest.chain_id));

        for (role, raw) in &manifest.contracts {
            match set.set_raw(role, raw) {
                Err(ContractError::UnknownRole(key)) => {
                    tracing::debug!(role = %key, "Ignoring non-role manifest entry");
                }
                other => other?,
            }
        }
        Ok(())
    }

    /// Applies configured per-role overrides for one network.
    ///
    /// # Errors
    ///
    /// Returns an error if a role is unknown or an address is invalid.
    pub fn apply_overrides(
        &mut self,
        chain_id: u64,
        overrides: &[(&str, &str)],
    ) -> Result<(), ContractError> {
        let set = self
            .networks
            .entry(chain_id)
            .or_insert_with(|| ContractSet::new(chain_id));
        for (role, raw) in overrides {
            set.set_raw(role, raw)?;
        }
        Ok(())
    }
}
