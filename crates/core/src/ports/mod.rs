//! Upstream ports.
//!
//! The aggregator only sees these traits. `amparo-upstream` implements them
//! over JSON-RPC and HTTP; tests substitute in-memory stubs.

mod chain;
mod partners;

pub use chain::{ChainCallError, InsuranceChain};
pub use partners::{
    DexAggregator, ImpactPartner, Indexer, PartnerCallError, RawBody, ReinsurancePartner,
    SwapQuoteParams,
};

use thiserror::Error;

/// Any failure that forces a metric group onto its fallback.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Chain call failed.
    #[error(transparent)]
    Chain(#[from] ChainCallError),

    /// Partner call failed.
    #[error(transparent)]
    Partner(#[from] PartnerCallError),

    /// Upstream answered but the payload did not have the expected shape.
    #[error("malformed payload from {source_name}: {message}")]
    Malformed {
        /// Upstream name.
        source_name: String,
        /// What was wrong.
        message: String,
    },

    /// The request was abandoned before the calls settled.
    #[error("cancelled")]
    Cancelled,
}

impl UpstreamError {
    /// Creates a malformed payload error.
    #[must_use]
    pub fn malformed(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Malformed {
            source_name: source_name.into(),
            message: message.into(),
        }
    }

    /// Name of the upstream that failed.
    #[must_use]
    pub fn source_name(&self) -> String {
        match self {
            Self::Chain(e) => e.source_name(),
            Self::Partner(e) => e.partner.clone(),
            Self::Malformed { source_name, .. } => source_name.clone(),
            Self::Cancelled => "request".to_string(),
        }
    }
}
