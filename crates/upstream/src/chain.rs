//! `InsuranceChain` over JSON-RPC.

use std::time::Duration;

use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;
use amparo_core::contracts::{ContractRole, ContractSet};
use amparo_core::ports::{ChainCallError, InsuranceChain};
use amparo_core::pricing::PremiumInput;
use amparo_core::risk::RiskAnswers;
use amparo_shared::ChainConfig;
use async_trait::async_trait;
use rust_decimal::prelude::ToPrimitive;
use serde_json::{Value, json};

use crate::abi::{IInsurancePool, IPolicyNFT, IReinsuranceToken, IRiskOracle};
use crate::error::ClientBuildError;
use crate::rpc::{RpcClient, parse_quantity};

/// Reads the node and the contracts of one network.
#[derive(Debug, Clone)]
pub struct ChainClient {
    rpc: RpcClient,
    contracts: ContractSet,
}

impl ChainClient {
    /// Creates a client for `contracts.chain_id()`.
    #[must_use]
    pub const fn new(rpc: RpcClient, contracts: ContractSet) -> Self {
        Self { rpc, contracts }
    }

    /// Creates a client from the chain configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn from_config(
        config: &ChainConfig,
        contracts: ContractSet,
    ) -> Result<Self, ClientBuildError> {
        let rpc = RpcClient::new(
            config.rpc_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )?;
        Ok(Self::new(rpc, contracts))
    }

    /// Calls a view function on the contract deployed for `role`.
    async fn read<C: SolCall>(
        &self,
        role: ContractRole,
        call: C,
    ) -> Result<C::Return, ChainCallError> {
        let label = call_label::<C>(role);
        let to = self
            .contracts
            .address(role)
            .ok_or(ChainCallError::NotDeployed {
                role,
                chain_id: self.contracts.chain_id(),
            })?;

        let output = self.rpc.eth_call(&label, to, call.abi_encode()).await?;
        tracing::trace!(call = %label, bytes = output.len(), "eth_call returned");

        C::abi_decode_returns(&output).map_err(|e| ChainCallError::Decode {
            method: label,
            message: e.to_string(),
        })
    }

    async fn read_amount<C: SolCall<Return = U256>>(
        &self,
        role: ContractRole,
        call: C,
    ) -> Result<u128, ChainCallError> {
        let label = call_label::<C>(role);
        let value = self.read(role, call).await?;
        u128::try_from(value).map_err(|_| ChainCallError::Decode {
            method: label,
            message: format!("value {value} exceeds u128"),
        })
    }
}

/// `role.method` label used in errors and logs.
fn call_label<C: SolCall>(role: ContractRole) -> String {
    let name = C::SIGNATURE.split('(').next().unwrap_or(C::SIGNATURE);
    format!("{role}.{name}")
}

fn risk_args(answers: &RiskAnswers) -> (U256, String, String, String) {
    (
        U256::from(answers.age),
        answers.location.clone(),
        answers.occupation.clone(),
        answers.health.clone(),
    )
}

#[async_trait]
impl InsuranceChain for ChainClient {
    fn chain_id(&self) -> u64 {
        self.contracts.chain_id()
    }

    async fn block_number(&self) -> Result<u64, ChainCallError> {
        let height = self.rpc.quantity("eth_blockNumber", json!([])).await?;
        u64::try_from(height).map_err(|e| ChainCallError::Decode {
            method: "eth_blockNumber".to_string(),
            message: e.to_string(),
        })
    }

    async fn gas_price(&self) -> Result<u128, ChainCallError> {
        self.rpc.quantity("eth_gasPrice", json!([])).await
    }

    async fn network_version(&self) -> Result<String, ChainCallError> {
        let version = self.rpc.request("net_version", "net_version", json!([])).await?;
        match version {
            Value::String(v) => Ok(v),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(ChainCallError::Decode {
                method: "net_version".to_string(),
                message: format!("unexpected result {other}"),
            }),
        }
    }

    async fn latest_block_transaction_count(&self) -> Result<u64, ChainCallError> {
        const METHOD: &str = "eth_getBlockTransactionCountByNumber";
        let result = self.rpc.request(METHOD, METHOD, json!(["latest"])).await?;
        let count = parse_quantity(METHOD, &result)?;
        u64::try_from(count).map_err(|e| ChainCallError::Decode {
            method: METHOD.to_string(),
            message: e.to_string(),
        })
    }

    async fn total_policies(&self) -> Result<u128, ChainCallError> {
        self.read_amount(ContractRole::InsurancePool, IInsurancePool::totalPoliciesCall {})
            .await
    }

    async fn total_premiums(&self) -> Result<u128, ChainCallError> {
        self.read_amount(ContractRole::InsurancePool, IInsurancePool::totalPremiumsCall {})
            .await
    }

    async fn total_claims(&self) -> Result<u128, ChainCallError> {
        self.read_amount(ContractRole::InsurancePool, IInsurancePool::totalClaimsCall {})
            .await
    }

    async fn pool_balance(&self) -> Result<u128, ChainCallError> {
        self.read_amount(ContractRole::InsurancePool, IInsurancePool::getPoolBalanceCall {})
            .await
    }

    async fn policies_of(&self, holder: Address) -> Result<u128, ChainCallError> {
        self.read_amount(ContractRole::PolicyNft, IPolicyNFT::balanceOfCall { owner: holder })
            .await
    }

    async fn reinsurance_supply(&self) -> Result<u128, ChainCallError> {
        self.read_amount(
            ContractRole::ReinsuranceToken,
            IReinsuranceToken::totalSupplyCall {},
        )
        .await
    }

    async fn calculate_premium(&self, input: &PremiumInput) -> Result<u128, ChainCallError> {
        // The oracle prices whole coverage units.
        let coverage = input.coverage.trunc().to_u128().unwrap_or_default();
        let call = IRiskOracle::calculatePremiumCall {
            age: U256::from(input.age),
            location: input.location.clone(),
            insuranceType: input.insurance_type.clone(),
            coverage: U256::from(coverage),
            duration: U256::from(input.duration),
            occupation: input.occupation.clone(),
        };
        self.read_amount(ContractRole::Oracle, call).await
    }

    async fn calculate_risk_score(&self, answers: &RiskAnswers) -> Result<u64, ChainCallError> {
        let (age, location, occupation, health) = risk_args(answers);
        let call = IRiskOracle::calculateRiskScoreCall {
            age,
            location,
            occupation,
            health,
        };
        let score = self.read_amount(ContractRole::Oracle, call).await?;
        Ok(u64::try_from(score).unwrap_or(u64::MAX))
    }

    async fn risk_factors(&self, answers: &RiskAnswers) -> Result<Vec<String>, ChainCallError> {
        let (age, location, occupation, health) = risk_args(answers);
        let call = IRiskOracle::getRiskFactorsCall {
            age,
            location,
            occupation,
            health,
        };
        self.read(ContractRole::Oracle, call).await
    }

    async fn insurance_recommendations(
        &self,
        answers: &RiskAnswers,
    ) -> Result<Vec<String>, ChainCallError> {
        let (age, location, occupation, health) = risk_args(answers);
        let call = IRiskOracle::getInsuranceRecommendationsCall {
            age,
            location,
            occupation,
            health,
        };
        self.read(ContractRole::Oracle, call).await
    }
}
