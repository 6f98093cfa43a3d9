//! Quote input errors.

use thiserror::Error;

/// Invalid premium or risk request input.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuoteError {
    /// Required text field is empty.
    #[error("{0} is required")]
    MissingField(&'static str),

    /// Age outside 1..=120.
    #[error("age must be between 1 and 120, got {0}")]
    InvalidAge(u32),

    /// Coverage not positive or above the maximum.
    #[error("coverage must be greater than 0 and at most {max}")]
    InvalidCoverage {
        /// Maximum accepted coverage.
        max: u64,
    },

    /// Duration of zero months.
    #[error("duration must be at least 1 month")]
    InvalidDuration,
}
