//! Local premium formula.

use rust_decimal::{Decimal, RoundingStrategy};

use super::tables::{age_multiplier, base_rate, location_multiplier, occupation_multiplier};
use super::types::PremiumInput;

/// Coverage is priced per this many units.
pub const COVERAGE_UNIT: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// Smallest premium ever quoted.
pub const MIN_PREMIUM: Decimal = Decimal::ONE;

/// Applies the minimum premium and rounds to 2 dp.
#[must_use]
pub fn finalize_premium(raw: Decimal) -> Decimal {
    raw.max(MIN_PREMIUM)
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Prices a premium with the local multiplier tables.
///
/// Inputs must have passed `PremiumInput::validate`, which bounds coverage.
#[must_use]
pub fn local_premium(input: &PremiumInput) -> Decimal {
    let raw = base_rate(&input.insurance_type)
        * location_multiplier(&input.location)
        * age_multiplier(input.age)
        * occupation_multiplier(&input.occupation)
        * (input.coverage / COVERAGE_UNIT);

    finalize_premium(raw)
}
