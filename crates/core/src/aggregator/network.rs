//! Network throughput and node health.

use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::json;
use tokio_util::sync::CancellationToken;

use super::payloads::{NETWORK_TOTALS_QUERY, parse_network_totals};
use super::types::{NetworkHealth, NetworkStats};
use super::{Aggregator, fallbacks, resolve, settle};
use crate::ports::UpstreamError;
use crate::provenance::SourceResult;
use amparo_shared::types::from_smallest_unit;

const GWEI_DECIMALS: u32 = 9;

impl Aggregator {
    /// Throughput figures: block height and latest block size from the node,
    /// the transaction counter from the indexer. All-or-nothing.
    pub async fn network_stats(&self, cancel: &CancellationToken) -> SourceResult<NetworkStats> {
        let chain = &self.upstreams.chain;
        let indexer = &self.upstreams.indexer;

        let outcome = settle(cancel, async {
            let (height, latest_count, totals) = tokio::join!(
                chain.block_number(),
                chain.latest_block_transaction_count(),
                indexer.query(NETWORK_TOTALS_QUERY, json!({})),
            );
            let block_height = height?;
            let latest_count = latest_count?;
            let total_transactions = parse_network_totals(totals?)?;

            Ok::<_, UpstreamError>(NetworkStats {
                tps: self.tps(latest_count),
                total_transactions,
                is_connected: true,
                block_height,
            })
        })
        .await;

        resolve("network_stats", "rpc+indexer", outcome, || {
            fallbacks::network_stats(self.jitter.as_ref())
        })
    }

    /// Node health: block number, gas price and network version.
    pub async fn network_health(&self, cancel: &CancellationToken) -> SourceResult<NetworkHealth> {
        let chain = &self.upstreams.chain;
        let chain_id = chain.chain_id();

        let outcome = settle(cancel, async {
            let (block_number, gas_price, version) = tokio::join!(
                chain.block_number(),
                chain.gas_price(),
                chain.network_version(),
            );
            let gas_price_gwei = from_smallest_unit(gas_price?, GWEI_DECIMALS)
                .ok_or_else(|| UpstreamError::malformed("eth_gasPrice", "gas price out of range"))?;

            Ok::<_, UpstreamError>(NetworkHealth {
                chain_id,
                network_version: version?,
                block_number: block_number?,
                gas_price_gwei,
                is_healthy: true,
            })
        })
        .await;

        resolve("network_health", "rpc", outcome, || {
            fallbacks::network_health(chain_id)
        })
    }

    /// Transactions per second from one block's transaction count.
    fn tps(&self, block_transactions: u64) -> Decimal {
        (Decimal::from(block_transactions) * Decimal::from(1_000u64)
            / Decimal::from(self.block_time_ms))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }
}
