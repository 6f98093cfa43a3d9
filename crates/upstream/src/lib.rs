//! Upstream transports for Amparo.
//!
//! Implements the `amparo-core` ports: a JSON-RPC client for the node and
//! the deployed contracts, and one HTTP client per partner API. Every call
//! is a single attempt bounded by the configured request timeout.

mod abi;
mod chain;
mod error;
mod http;
mod partners;
mod rpc;

pub use chain::ChainClient;
pub use error::ClientBuildError;
pub use partners::{DexClient, ImpactClient, IndexerClient, ReinsuranceClient};
pub use rpc::RpcClient;
