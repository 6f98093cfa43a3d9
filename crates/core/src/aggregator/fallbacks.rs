//! Values substituted when a metric group cannot be read.

use rust_decimal::Decimal;

use super::types::{NetworkHealth, NetworkStats, ReinsuranceOverview};
use crate::jitter::JitterSource;

/// Baseline throughput shown while the network is unreachable.
pub const FALLBACK_TPS: u64 = 1_000;
/// Upper bound of the jitter added to `FALLBACK_TPS`.
pub const FALLBACK_TPS_JITTER: u64 = 500;
/// Baseline transaction counter shown while the network is unreachable.
pub const FALLBACK_TOTAL_TRANSACTIONS: u64 = 2_500_000;
/// Upper bound of the jitter added to `FALLBACK_TOTAL_TRANSACTIONS`.
pub const FALLBACK_TRANSACTIONS_JITTER: u64 = 10_000;

/// Reinsurance capacity shown while the partner is unreachable.
pub const FALLBACK_REINSURANCE_CAPACITY: u64 = 500_000;
/// Active treaties shown while the partner is unreachable.
pub const FALLBACK_ACTIVE_TREATIES: u32 = 3;

/// Network figures with `isConnected = false` and jittered counters.
pub fn network_stats(jitter: &dyn JitterSource) -> NetworkStats {
    NetworkStats {
        tps: Decimal::from(FALLBACK_TPS + jitter.jitter(FALLBACK_TPS_JITTER)),
        total_transactions: FALLBACK_TOTAL_TRANSACTIONS
            + jitter.jitter(FALLBACK_TRANSACTIONS_JITTER),
        is_connected: false,
        block_height: 0,
    }
}

/// Health snapshot of an unreachable node.
#[must_use]
pub fn network_health(chain_id: u64) -> NetworkHealth {
    NetworkHealth {
        chain_id,
        network_version: "unknown".to_string(),
        block_number: 0,
        gas_price_gwei: Decimal::ZERO,
        is_healthy: false,
    }
}

/// Reinsurance overview with a 35% utilization and no minted supply.
#[must_use]
pub fn reinsurance() -> ReinsuranceOverview {
    ReinsuranceOverview {
        total_capacity: Decimal::from(FALLBACK_REINSURANCE_CAPACITY),
        utilization: Decimal::new(35, 2),
        active_treaties: FALLBACK_ACTIVE_TREATIES,
        token_supply: Decimal::ZERO,
    }
}
