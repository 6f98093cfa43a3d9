//! Wallet dashboard.

use alloy_primitives::Address;
use rust_decimal::{Decimal, RoundingStrategy};
use serde_json::json;
use tokio_util::sync::CancellationToken;

use super::payloads::{RECENT_ACTIVITY_QUERY, parse_activity, parse_impact, parse_reinsurance};
use super::types::{
    ActivityEntry, DashboardProvenance, DashboardSnapshot, PartnerAnalytics, PartnerIntegration,
    PoolStats,
};
use super::{Aggregator, counter, resolve, settle, token_amount};
use crate::ports::UpstreamError;
use crate::provenance::SourceResult;

impl Aggregator {
    /// Builds the dashboard for `holder`.
    ///
    /// Contract stats, indexed activity, partner analytics and network
    /// figures are four independent groups; one failing does not affect the
    /// others. Integration status is reported per upstream.
    pub async fn dashboard(&self, holder: Address, cancel: &CancellationToken) -> DashboardSnapshot {
        let (stats, (activity, indexer_up), (analytics, impact_up, reinsurance_up), network) = tokio::join!(
            self.pool_stats(holder, cancel),
            self.activity_group(holder, cancel),
            self.analytics_group(holder, cancel),
            self.network_stats(cancel),
        );

        let partner_integrations = vec![
            PartnerIntegration::from_result("rpc", &stats),
            PartnerIntegration::new("indexer", indexer_up),
            PartnerIntegration::new("impact", impact_up),
            PartnerIntegration::new("reinsurance", reinsurance_up),
        ];
        let provenance = DashboardProvenance {
            stats: stats.provenance(),
            recent_activity: activity.provenance(),
            analytics: analytics.provenance(),
            blockchain_data: network.provenance(),
        };

        DashboardSnapshot {
            stats: stats.into_value(),
            recent_activity: activity.into_value(),
            analytics: analytics.into_value(),
            partner_integrations,
            blockchain_data: network.into_value(),
            provenance,
        }
    }

    /// Pool totals plus the wallet's policy count.
    pub async fn pool_stats(
        &self,
        holder: Address,
        cancel: &CancellationToken,
    ) -> SourceResult<PoolStats> {
        let chain = &self.upstreams.chain;

        let outcome = settle(cancel, async {
            let (policies, premiums, claims, balance, held) = tokio::join!(
                chain.total_policies(),
                chain.total_premiums(),
                chain.total_claims(),
                chain.pool_balance(),
                chain.policies_of(holder),
            );
            let total_premiums = token_amount("insurancePool", premiums?)?;
            let total_claims = token_amount("insurancePool", claims?)?;

            Ok::<_, UpstreamError>(PoolStats {
                total_policies: counter("insurancePool", policies?)?,
                active_policies: counter("policyNFT", held?)?,
                total_premiums,
                total_claims,
                pool_balance: token_amount("insurancePool", balance?)?,
                claims_ratio: claims_ratio(total_claims, total_premiums),
            })
        })
        .await;

        resolve("pool_stats", "insurancePool+policyNFT", outcome, PoolStats::default)
    }

    /// Latest indexed policy events of `holder`, newest first.
    ///
    /// Events are only shown while the node is reachable, so the group
    /// reads the chain head alongside the indexer. All-or-nothing.
    pub async fn recent_activity(
        &self,
        holder: Address,
        cancel: &CancellationToken,
    ) -> SourceResult<Vec<ActivityEntry>> {
        self.activity_group(holder, cancel).await.0
    }

    /// Impact and reinsurance partner figures for `holder`. All-or-nothing.
    pub async fn partner_analytics(
        &self,
        holder: Address,
        cancel: &CancellationToken,
    ) -> SourceResult<PartnerAnalytics> {
        self.analytics_group(holder, cancel).await.0
    }

    /// Activity group plus whether the indexer answered.
    async fn activity_group(
        &self,
        holder: Address,
        cancel: &CancellationToken,
    ) -> (SourceResult<Vec<ActivityEntry>>, bool) {
        let variables = json!({
            "holder": holder.to_string().to_lowercase(),
            "limit": self.activity_limit,
        });

        let reads = settle(cancel, async {
            let (head, events) = tokio::join!(
                self.upstreams.chain.block_number(),
                self.upstreams.indexer.query(RECENT_ACTIVITY_QUERY, variables),
            );
            Ok::<_, UpstreamError>((head, events))
        })
        .await;

        let indexer_up = matches!(&reads, Ok((_, Ok(_))));
        let outcome = reads.and_then(|(head, events)| {
            head?;
            parse_activity(events?)
        });

        (
            resolve("recent_activity", "rpc+indexer", outcome, Vec::new),
            indexer_up,
        )
    }

    /// Analytics group plus whether the impact and reinsurance partners
    /// answered.
    async fn analytics_group(
        &self,
        holder: Address,
        cancel: &CancellationToken,
    ) -> (SourceResult<PartnerAnalytics>, bool, bool) {
        let address = holder.to_string();

        let reads = settle(cancel, async {
            let (impact, reinsurance) = tokio::join!(
                self.upstreams.impact.user_analytics(&address),
                self.upstreams.reinsurance.pool_metrics(),
            );
            Ok::<_, UpstreamError>((impact, reinsurance))
        })
        .await;

        let (impact_up, reinsurance_up) = match &reads {
            Ok((impact, reinsurance)) => (impact.is_ok(), reinsurance.is_ok()),
            Err(_) => (false, false),
        };
        let outcome = reads.and_then(|(impact, reinsurance)| {
            let impact = parse_impact(impact?)?;
            let reinsurance = parse_reinsurance(reinsurance?)?;
            Ok(PartnerAnalytics {
                impact,
                reinsurance_capacity: reinsurance.total_capacity,
                reinsurance_utilization: reinsurance.utilization,
            })
        });

        (
            resolve("partner_analytics", "impact+reinsurance", outcome, PartnerAnalytics::default),
            impact_up,
            reinsurance_up,
        )
    }
}

/// Claims as a percentage of premiums, zero when nothing was collected.
fn claims_ratio(claims: Decimal, premiums: Decimal) -> Decimal {
    if premiums.is_zero() {
        return Decimal::ZERO;
    }
    (claims / premiums * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}
