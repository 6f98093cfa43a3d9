//! Contract registry errors.

use thiserror::Error;

/// Errors raised while building the contract registry.
#[derive(Debug, Error)]
pub enum ContractError {
    /// Unknown contract role key.
    #[error("unknown contract role '{0}'")]
    UnknownRole(String),

    /// Address is not valid hex.
    #[error("invalid address for {role}: {address}")]
    InvalidAddress {
        /// Role key.
        role: String,
        /// Raw address value.
        address: String,
    },

    /// Manifest could not be parsed.
    #[error("invalid deployment manifest: {0}")]
    InvalidManifest(String),
}
