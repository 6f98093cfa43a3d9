//! Premium quoting.
//!
//! The oracle contract is the authoritative premium source. When it cannot be
//! reached the aggregator prices locally:
//!
//! ```text
//! premium = baseRate[type] × location[loc] × age[band] × occupation[occ] × coverage / 10000
//! ```
//!
//! Unknown keys price at 1.0. The result is floored at 1 and rounded to 2 dp.

mod error;
mod formula;
pub mod tables;
mod types;

pub use error::QuoteError;
pub use formula::{COVERAGE_UNIT, MIN_PREMIUM, finalize_premium, local_premium};
pub use tables::AgeBand;
pub use types::{MAX_COVERAGE, PremiumInput, PremiumQuote};
