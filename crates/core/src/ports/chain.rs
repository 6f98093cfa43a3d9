//! Chain read port.

use alloy_primitives::Address;
use async_trait::async_trait;
use thiserror::Error;

use crate::contracts::ContractRole;
use crate::pricing::PremiumInput;
use crate::risk::RiskAnswers;

/// A failed chain call. Never retried.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ChainCallError {
    /// Request never produced an HTTP response.
    #[error("rpc transport failed for {method}: {message}")]
    Transport {
        /// RPC or contract method.
        method: String,
        /// Transport error text.
        message: String,
    },

    /// Endpoint answered with a non-2xx status.
    #[error("rpc endpoint returned HTTP {status} for {method}")]
    Http {
        /// RPC or contract method.
        method: String,
        /// HTTP status code.
        status: u16,
    },

    /// JSON-RPC error object (including reverts).
    #[error("rpc error {code} for {method}: {message}")]
    Rpc {
        /// RPC or contract method.
        method: String,
        /// JSON-RPC error code.
        code: i64,
        /// JSON-RPC error message.
        message: String,
    },

    /// Result could not be decoded.
    #[error("failed to decode {method}: {message}")]
    Decode {
        /// RPC or contract method.
        method: String,
        /// Decoder error text.
        message: String,
    },

    /// The contract role has no address on the configured network.
    #[error("contract {role} is not deployed on chain {chain_id}")]
    NotDeployed {
        /// Missing role.
        role: ContractRole,
        /// Configured network.
        chain_id: u64,
    },
}

impl ChainCallError {
    /// Method or role the error refers to, used as the fallback source name.
    #[must_use]
    pub fn source_name(&self) -> String {
        match self {
            Self::Transport { method, .. }
            | Self::Http { method, .. }
            | Self::Rpc { method, .. }
            | Self::Decode { method, .. } => method.clone(),
            Self::NotDeployed { role, .. } => role.to_string(),
        }
    }
}

/// Typed reads against the node and the deployed contracts.
///
/// Token amounts are returned in smallest units (18 decimals).
#[async_trait]
pub trait InsuranceChain: Send + Sync {
    /// Configured chain id.
    fn chain_id(&self) -> u64;

    /// `eth_blockNumber`.
    async fn block_number(&self) -> Result<u64, ChainCallError>;

    /// `eth_gasPrice`, in wei.
    async fn gas_price(&self) -> Result<u128, ChainCallError>;

    /// `net_version`.
    async fn network_version(&self) -> Result<String, ChainCallError>;

    /// Transactions in the latest block.
    async fn latest_block_transaction_count(&self) -> Result<u64, ChainCallError>;

    /// `insurancePool.totalPolicies()`.
    async fn total_policies(&self) -> Result<u128, ChainCallError>;

    /// `insurancePool.totalPremiums()`.
    async fn total_premiums(&self) -> Result<u128, ChainCallError>;

    /// `insurancePool.totalClaims()`.
    async fn total_claims(&self) -> Result<u128, ChainCallError>;

    /// `insurancePool.getPoolBalance()`.
    async fn pool_balance(&self) -> Result<u128, ChainCallError>;

    /// `policyNFT.balanceOf(holder)`.
    async fn policies_of(&self, holder: Address) -> Result<u128, ChainCallError>;

    /// `reinsuranceToken.totalSupply()`.
    async fn reinsurance_supply(&self) -> Result<u128, ChainCallError>;

    /// `oracle.calculatePremium(...)`.
    async fn calculate_premium(&self, input: &PremiumInput) -> Result<u128, ChainCallError>;

    /// `oracle.calculateRiskScore(...)`.
    async fn calculate_risk_score(&self, answers: &RiskAnswers) -> Result<u64, ChainCallError>;

    /// `oracle.getRiskFactors(...)`.
    async fn risk_factors(&self, answers: &RiskAnswers) -> Result<Vec<String>, ChainCallError>;

    /// `oracle.getInsuranceRecommendations(...)`.
    async fn insurance_recommendations(
        &self,
        answers: &RiskAnswers,
    ) -> Result<Vec<String>, ChainCallError>;
}
