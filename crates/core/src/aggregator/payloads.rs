//! Typed views of partner and indexer payloads.

use chrono::DateTime;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::types::{ActivityEntry, ImpactAnalytics};
use crate::ports::UpstreamError;
use amparo_shared::types::{TOKEN_DECIMALS, from_smallest_unit};

/// Policy events fetched for the dashboard.
pub const RECENT_ACTIVITY_QUERY: &str = r"query RecentActivity($holder: String!, $limit: Int!) {
  PolicyEvent(
    where: { holder: { _eq: $holder } }
    order_by: { timestamp: desc }
    limit: $limit
  ) {
    id
    eventType
    amount
    timestamp
    transactionHash
  }
}";

/// Network-wide transaction counter.
pub const NETWORK_TOTALS_QUERY: &str = r"query NetworkTotals {
  NetworkStats(limit: 1) {
    totalTransactions
  }
}";

/// Indexers emit big integers either as strings or as numbers.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BigInt {
    Number(u64),
    Text(String),
}

impl BigInt {
    fn to_u128(&self) -> Option<u128> {
        match self {
            Self::Number(n) => Some(u128::from(*n)),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PolicyEventRow {
    id: String,
    event_type: String,
    amount: BigInt,
    timestamp: BigInt,
    transaction_hash: String,
}

#[derive(Debug, Deserialize)]
struct ActivityData {
    #[serde(rename = "PolicyEvent")]
    events: Vec<PolicyEventRow>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NetworkTotalsRow {
    total_transactions: BigInt,
}

#[derive(Debug, Deserialize)]
struct NetworkTotalsData {
    #[serde(rename = "NetworkStats")]
    rows: Vec<NetworkTotalsRow>,
}

/// Reinsurance partner pool metrics.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReinsuranceMetrics {
    /// Capacity in reinsurance currency units.
    pub total_capacity: Decimal,
    /// Ratio in `0..=1`.
    pub utilization: Decimal,
    /// Active treaties.
    pub active_treaties: u32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ImpactPayload {
    total_coverage: Decimal,
    claims_paid: Decimal,
    impact_score: Decimal,
    beneficiaries: u64,
    #[serde(default)]
    community_fund: Decimal,
}

fn decode<T: DeserializeOwned>(source_name: &str, value: Value) -> Result<T, UpstreamError> {
    serde_json::from_value(value).map_err(|e| UpstreamError::malformed(source_name, e.to_string()))
}

fn describe(event_type: &str) -> &'static str {
    match event_type {
        "PolicyPurchased" => "Policy purchased",
        "PremiumPaid" => "Premium paid",
        "ClaimSubmitted" => "Claim submitted",
        "ClaimPaid" => "Claim paid",
        "PolicyCancelled" => "Policy cancelled",
        _ => "Policy activity",
    }
}

/// `PolicyPurchased` becomes `policy_purchased`.
fn snake_case(event_type: &str) -> String {
    let mut out = String::with_capacity(event_type.len() + 4);
    for (i, c) in event_type.chars().enumerate() {
        if c.is_ascii_uppercase() {
            if i > 0 {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Parses the `RecentActivity` query data.
///
/// # Errors
///
/// Returns `UpstreamError::Malformed` for any row that does not decode.
pub fn parse_activity(data: Value) -> Result<Vec<ActivityEntry>, UpstreamError> {
    let data: ActivityData = decode("indexer", data)?;

    data.events
        .into_iter()
        .map(|row| {
            let amount = row
                .amount
                .to_u128()
                .and_then(|units| from_smallest_unit(units, TOKEN_DECIMALS))
                .ok_or_else(|| UpstreamError::malformed("indexer", "invalid event amount"))?;
            let timestamp = row
                .timestamp
                .to_u128()
                .and_then(|secs| i64::try_from(secs).ok())
                .and_then(|secs| DateTime::from_timestamp(secs, 0))
                .ok_or_else(|| UpstreamError::malformed("indexer", "invalid event timestamp"))?;

            Ok(ActivityEntry {
                id: row.id,
                activity_type: snake_case(&row.event_type),
                description: describe(&row.event_type).to_string(),
                amount,
                timestamp: timestamp.to_rfc3339(),
                tx_hash: row.transaction_hash,
            })
        })
        .collect()
}

/// Parses the `NetworkTotals` query data.
///
/// # Errors
///
/// Returns `UpstreamError::Malformed` when the counter is missing.
pub fn parse_network_totals(data: Value) -> Result<u64, UpstreamError> {
    let data: NetworkTotalsData = decode("indexer", data)?;
    data.rows
        .first()
        .and_then(|row| row.total_transactions.to_u128())
        .and_then(|total| u64::try_from(total).ok())
        .ok_or_else(|| UpstreamError::malformed("indexer", "missing totalTransactions"))
}

/// Parses the reinsurance partner's pool metrics.
///
/// # Errors
///
/// Returns `UpstreamError::Malformed` when a field is missing.
pub fn parse_reinsurance(payload: Value) -> Result<ReinsuranceMetrics, UpstreamError> {
    decode("reinsurance", payload)
}

/// Parses the impact partner's wallet analytics.
///
/// # Errors
///
/// Returns `UpstreamError::Malformed` when a field is missing.
pub fn parse_impact(payload: Value) -> Result<ImpactAnalytics, UpstreamError> {
    let payload: ImpactPayload = decode("impact", payload)?;
    Ok(ImpactAnalytics {
        total_coverage: payload.total_coverage,
        claims_paid: payload.claims_paid,
        impact_score: payload.impact_score,
        beneficiaries: payload.beneficiaries,
        community_fund: payload.community_fund,
    })
}
