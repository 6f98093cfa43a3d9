//! Aggregated response types.
//!
//! All amounts are decimals serialized as JSON numbers.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::provenance::{Provenance, SourceResult};

/// Network throughput snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkStats {
    /// Transactions per second.
    #[serde(with = "rust_decimal::serde::float")]
    pub tps: Decimal,
    /// Transactions processed by the network.
    pub total_transactions: u64,
    /// Whether the figures came from the network.
    pub is_connected: bool,
    /// Latest block number.
    pub block_height: u64,
}

/// Node health snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkHealth {
    /// Configured chain id.
    pub chain_id: u64,
    /// `net_version` answer.
    pub network_version: String,
    /// Latest block number.
    pub block_number: u64,
    /// Gas price in gwei.
    #[serde(with = "rust_decimal::serde::float")]
    pub gas_price_gwei: Decimal,
    /// All health calls succeeded.
    pub is_healthy: bool,
}

/// Pool-level and wallet-level contract figures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolStats {
    /// Policies issued by the pool.
    pub total_policies: u64,
    /// Policy NFTs held by the wallet.
    pub active_policies: u64,
    /// Premiums collected.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_premiums: Decimal,
    /// Claims paid.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_claims: Decimal,
    /// Pool balance.
    #[serde(with = "rust_decimal::serde::float")]
    pub pool_balance: Decimal,
    /// Claims as a percentage of premiums.
    #[serde(with = "rust_decimal::serde::float")]
    pub claims_ratio: Decimal,
}

/// One indexed policy event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    /// Indexer event id.
    pub id: String,
    /// Event kind in snake case, e.g. `policy_purchased`.
    #[serde(rename = "type")]
    pub activity_type: String,
    /// Human readable description.
    pub description: String,
    /// Amount moved by the event.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    /// RFC 3339 timestamp.
    pub timestamp: String,
    /// Transaction hash.
    pub tx_hash: String,
}

/// Impact partner figures for one wallet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImpactAnalytics {
    /// Coverage held.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_coverage: Decimal,
    /// Claims paid out.
    #[serde(with = "rust_decimal::serde::float")]
    pub claims_paid: Decimal,
    /// Partner impact score.
    #[serde(with = "rust_decimal::serde::float")]
    pub impact_score: Decimal,
    /// People covered.
    pub beneficiaries: u64,
    /// Community fund balance.
    #[serde(with = "rust_decimal::serde::float")]
    pub community_fund: Decimal,
}

/// Partner analytics shown on the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerAnalytics {
    /// Impact partner figures.
    #[serde(flatten)]
    pub impact: ImpactAnalytics,
    /// Reinsurance capacity.
    #[serde(with = "rust_decimal::serde::float")]
    pub reinsurance_capacity: Decimal,
    /// Reinsurance utilization ratio.
    #[serde(with = "rust_decimal::serde::float")]
    pub reinsurance_utilization: Decimal,
}

/// Reinsurance pool overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReinsuranceOverview {
    /// Capacity reported by the partner.
    #[serde(with = "rust_decimal::serde::float")]
    pub total_capacity: Decimal,
    /// Utilization ratio reported by the partner.
    #[serde(with = "rust_decimal::serde::float")]
    pub utilization: Decimal,
    /// Active treaties.
    pub active_treaties: u32,
    /// Reinsurance tokens minted.
    #[serde(with = "rust_decimal::serde::float")]
    pub token_supply: Decimal,
}

/// Integration status shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerIntegration {
    /// Upstream name.
    pub name: String,
    /// `connected` or `unavailable`.
    pub status: &'static str,
}

impl PartnerIntegration {
    /// Status of an upstream that did or did not answer.
    pub fn new(name: &str, connected: bool) -> Self {
        Self {
            name: name.to_string(),
            status: if connected { "connected" } else { "unavailable" },
        }
    }

    /// Status of an upstream from the group it fed.
    pub fn from_result<T>(name: &str, result: &SourceResult<T>) -> Self {
        Self::new(name, !result.is_fallback())
    }
}

/// Origin of each dashboard section.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardProvenance {
    /// Contract figures.
    pub stats: Provenance,
    /// Indexed activity.
    pub recent_activity: Provenance,
    /// Partner analytics.
    pub analytics: Provenance,
    /// Network figures.
    pub blockchain_data: Provenance,
}

/// Dashboard response, built fresh per request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    /// Contract figures.
    pub stats: PoolStats,
    /// Recent policy events for the wallet.
    pub recent_activity: Vec<ActivityEntry>,
    /// Partner analytics.
    pub analytics: PartnerAnalytics,
    /// Upstream status list.
    pub partner_integrations: Vec<PartnerIntegration>,
    /// Network figures.
    pub blockchain_data: NetworkStats,
    /// Origin of each section.
    pub provenance: DashboardProvenance,
}
