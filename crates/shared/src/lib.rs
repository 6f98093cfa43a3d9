//! Shared configuration, errors, and unit helpers for Amparo.
//!
//! This crate provides common pieces used across all other crates:
//! - Layered application configuration (files + `AMPARO__*` environment)
//! - Application-wide error taxonomy with HTTP status mapping
//! - Token unit conversion (smallest unit integers to decimals)

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, ChainConfig, ContractsConfig, PartnerEndpoint, PartnersConfig};
pub use error::AppError;
