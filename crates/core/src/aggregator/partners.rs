//! Reinsurance overview and wallet impact.

use alloy_primitives::Address;
use tokio_util::sync::CancellationToken;

use super::payloads::{parse_impact, parse_reinsurance};
use super::types::{ImpactAnalytics, ReinsuranceOverview};
use super::{Aggregator, fallbacks, resolve, settle, token_amount};
use crate::ports::UpstreamError;
use crate::provenance::SourceResult;

impl Aggregator {
    /// Partner pool metrics plus the on-chain reinsurance token supply.
    /// All-or-nothing.
    pub async fn reinsurance_overview(
        &self,
        cancel: &CancellationToken,
    ) -> SourceResult<ReinsuranceOverview> {
        let outcome = settle(cancel, async {
            let (metrics, supply) = tokio::join!(
                self.upstreams.reinsurance.pool_metrics(),
                self.upstreams.chain.reinsurance_supply(),
            );
            let metrics = parse_reinsurance(metrics?)?;

            Ok::<_, UpstreamError>(ReinsuranceOverview {
                total_capacity: metrics.total_capacity,
                utilization: metrics.utilization,
                active_treaties: metrics.active_treaties,
                token_supply: token_amount("reinsuranceToken", supply?)?,
            })
        })
        .await;

        resolve("reinsurance", "reinsurance+reinsuranceToken", outcome, fallbacks::reinsurance)
    }

    /// Impact partner figures for `holder`, zeros when unavailable.
    pub async fn impact(
        &self,
        holder: Address,
        cancel: &CancellationToken,
    ) -> SourceResult<ImpactAnalytics> {
        let address = holder.to_string();

        let outcome = settle(cancel, async {
            let payload = self.upstreams.impact.user_analytics(&address).await?;
            parse_impact(payload)
        })
        .await;

        resolve("impact", "impact", outcome, ImpactAnalytics::default)
    }
}
