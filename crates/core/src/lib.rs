//! Core logic for Amparo.
//!
//! This crate holds everything that does not speak HTTP: the contract
//! registry, the upstream ports the transports implement, the premium
//! formula, risk scoring, and the fallback aggregator that composes
//! upstream reads into responses.
//!
//! # Modules
//!
//! - `contracts` - Contract roles, per-network address sets, deployment manifests
//! - `ports` - Async traits for the chain and partner clients
//! - `provenance` - `SourceResult` tagging authoritative vs fallback values
//! - `pricing` - Local premium formula and multiplier tables
//! - `risk` - Risk levels, local scoring, default factors
//! - `aggregator` - Fan-out/fan-in with per-group fallback

pub mod aggregator;
pub mod contracts;
pub mod jitter;
pub mod ports;
pub mod pricing;
pub mod provenance;
pub mod risk;

pub use aggregator::{Aggregator, Upstreams};
pub use provenance::{Provenance, SourceKind, SourceResult};
