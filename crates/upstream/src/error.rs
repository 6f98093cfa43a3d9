//! Client construction errors.

use thiserror::Error;

/// A client could not be built from configuration.
#[derive(Debug, Error)]
pub enum ClientBuildError {
    /// The HTTP client rejected its settings.
    #[error("failed to build HTTP client for {name}: {source}")]
    Http {
        /// Upstream name.
        name: String,
        /// reqwest builder error.
        source: reqwest::Error,
    },

    /// An API key is not a valid header value.
    #[error("invalid API key for {0}")]
    InvalidApiKey(String),
}
