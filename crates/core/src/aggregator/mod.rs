//! Fallback-aware aggregation over the upstream ports.
//!
//! Each operation splits its metrics into groups. The calls of a group are
//! issued together; if every call succeeds the group is authoritative,
//! otherwise the whole group takes its fallback values. Failures are logged
//! and never surface as errors.

pub mod fallbacks;
pub mod payloads;
pub mod types;

mod dashboard;
mod network;
mod partners;
mod quotes;


pub use types::*;

use std::future::Future;
use std::sync::Arc;

use rust_decimal::Decimal;
use tokio_util::sync::CancellationToken;

use crate::jitter::{JitterSource, ThreadRngJitter};
use crate::ports::{ImpactPartner, Indexer, InsuranceChain, ReinsurancePartner, UpstreamError};
use crate::provenance::SourceResult;
use amparo_shared::types::{TOKEN_DECIMALS, from_smallest_unit};

/// Default block time used to derive throughput.
pub const DEFAULT_BLOCK_TIME_MS: u64 = 1_000;

/// Default number of activity rows shown on the dashboard.
pub const DEFAULT_ACTIVITY_LIMIT: u32 = 10;

/// Upstream ports the aggregator reads from.
#[derive(Clone)]
pub struct Upstreams {
    /// Node and contracts.
    pub chain: Arc<dyn InsuranceChain>,
    /// Blockchain indexer.
    pub indexer: Arc<dyn Indexer>,
    /// Reinsurance partner.
    pub reinsurance: Arc<dyn ReinsurancePartner>,
    /// Impact partner.
    pub impact: Arc<dyn ImpactPartner>,
}

/// Builds provenance-tagged responses from the upstreams.
///
/// Holds no per-request state; one instance is shared by all handlers.
#[derive(Clone)]
pub struct Aggregator {
    upstreams: Upstreams,
    jitter: Arc<dyn JitterSource>,
    block_time_ms: u64,
    activity_limit: u32,
}

impl Aggregator {
    /// Creates an aggregator with random jitter and default settings.
    #[must_use]
    pub fn new(upstreams: Upstreams) -> Self {
        Self {
            upstreams,
            jitter: Arc::new(ThreadRngJitter),
            block_time_ms: DEFAULT_BLOCK_TIME_MS,
            activity_limit: DEFAULT_ACTIVITY_LIMIT,
        }
    }

    /// Replaces the jitter source.
    #[must_use]
    pub fn with_jitter(mut self, jitter: Arc<dyn JitterSource>) -> Self {
        self.jitter = jitter;
        self
    }

    /// Sets the block time used for throughput; zero is treated as one.
    #[must_use]
    pub fn with_block_time_ms(mut self, block_time_ms: u64) -> Self {
        self.block_time_ms = block_time_ms.max(1);
        self
    }

    /// Sets how many activity rows the dashboard requests.
    #[must_use]
    pub const fn with_activity_limit(mut self, limit: u32) -> Self {
        self.activity_limit = limit;
        self
    }

    /// Chain id reported by the chain port.
    #[must_use]
    pub fn chain_id(&self) -> u64 {
        self.upstreams.chain.chain_id()
    }
}

/// Runs `calls` unless `cancel` fires first.
async fn settle<T, F>(cancel: &CancellationToken, calls: F) -> Result<T, UpstreamError>
where
    F: Future<Output = Result<T, UpstreamError>>,
{
    tokio::select! {
        biased;
        () = cancel.cancelled() => Err(UpstreamError::Cancelled),
        outcome = calls => outcome,
    }
}

/// Tags a group outcome, substituting `fallback` on failure.
fn resolve<T>(
    metric: &'static str,
    source_name: &str,
    outcome: Result<T, UpstreamError>,
    fallback: impl FnOnce() -> T,
) -> SourceResult<T> {
    match outcome {
        Ok(value) => SourceResult::authoritative(value, source_name),
        Err(UpstreamError::Cancelled) => {
            tracing::debug!(metric, "Request cancelled, using fallback");
            SourceResult::fallback(fallback(), source_name, UpstreamError::Cancelled.to_string())
        }
        Err(e) => {
            let failed = e.source_name();
            tracing::warn!(metric, source = %failed, error = %e, "Upstream failed, using fallback");
            SourceResult::fallback(fallback(), failed, e.to_string())
        }
    }
}

/// Converts an 18-decimal token amount.
fn token_amount(source_name: &str, units: u128) -> Result<Decimal, UpstreamError> {
    from_smallest_unit(units, TOKEN_DECIMALS)
        .ok_or_else(|| UpstreamError::malformed(source_name, "token amount out of range"))
}

/// Narrows a contract counter.
fn counter(source_name: &str, value: u128) -> Result<u64, UpstreamError> {
    u64::try_from(value).map_err(|_| UpstreamError::malformed(source_name, "counter out of range"))
}
