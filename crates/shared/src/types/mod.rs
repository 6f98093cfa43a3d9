//! Common types used across the application.

pub mod units;

pub use units::{TOKEN_DECIMALS, from_smallest_unit};
