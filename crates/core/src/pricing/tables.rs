//! Multiplier tables for local premium pricing.
//!
//! Keys are matched case-insensitively after trimming. Every lookup has an
//! explicit `_ => 1.0` arm: an unrecognized key prices neutrally instead of
//! failing the quote.

use rust_decimal::Decimal;

fn normalize(key: &str) -> String {
    key.trim().to_lowercase()
}

/// Base premium rate per 10 000 units of coverage.
#[must_use]
pub fn base_rate(insurance_type: &str) -> Decimal {
    match normalize(insurance_type).as_str() {
        "health" => Decimal::new(5, 0),
        "life" => Decimal::new(3, 0),
        "accident" => Decimal::new(2, 0),
        "property" => Decimal::new(4, 0),
        "crop" => Decimal::new(35, 1),
        "travel" => Decimal::new(15, 1),
        _ => Decimal::ONE,
    }
}

/// Regional risk multiplier.
#[must_use]
#[allow(clippy::match_same_arms)]
pub fn location_multiplier(location: &str) -> Decimal {
    match normalize(location).as_str() {
        "cdmx" => Decimal::new(12, 1),
        "guadalajara" => Decimal::new(11, 1),
        "monterrey" => Decimal::new(115, 2),
        "cancun" => Decimal::new(13, 1),
        "oaxaca" => Decimal::new(9, 1),
        "chiapas" => Decimal::new(85, 2),
        "merida" => Decimal::new(95, 2),
        "puebla" => Decimal::ONE,
        _ => Decimal::ONE,
    }
}

/// Occupational hazard multiplier.
#[must_use]
#[allow(clippy::match_same_arms)]
pub fn occupation_multiplier(occupation: &str) -> Decimal {
    match normalize(occupation).as_str() {
        "employee" => Decimal::ONE,
        "student" => Decimal::new(8, 1),
        "freelancer" => Decimal::new(11, 1),
        "merchant" => Decimal::new(105, 2),
        "farmer" => Decimal::new(13, 1),
        "driver" => Decimal::new(14, 1),
        "construction" => Decimal::new(16, 1),
        "fisher" => Decimal::new(15, 1),
        _ => Decimal::ONE,
    }
}

/// Age band used for pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgeBand {
    /// 18 to 24.
    YoungAdult,
    /// 25 to 39.
    Adult,
    /// 40 to 54.
    MiddleAge,
    /// 55 to 64.
    PreRetirement,
    /// 65 to 100.
    Senior,
}

impl AgeBand {
    /// Band for an age, or `None` outside 18..=100.
    #[must_use]
    pub const fn from_age(age: u32) -> Option<Self> {
        match age {
            18..=24 => Some(Self::YoungAdult),
            25..=39 => Some(Self::Adult),
            40..=54 => Some(Self::MiddleAge),
            55..=64 => Some(Self::PreRetirement),
            65..=100 => Some(Self::Senior),
            _ => None,
        }
    }

    /// Pricing multiplier for the band.
    #[must_use]
    pub fn multiplier(self) -> Decimal {
        match self {
            Self::YoungAdult => Decimal::new(11, 1),
            Self::Adult => Decimal::ONE,
            Self::MiddleAge => Decimal::new(13, 1),
            Self::PreRetirement => Decimal::new(16, 1),
            Self::Senior => Decimal::new(2, 0),
        }
    }
}

/// Age multiplier, 1.0 when the age has no band.
#[must_use]
pub fn age_multiplier(age: u32) -> Decimal {
    AgeBand::from_age(age).map_or(Decimal::ONE, AgeBand::multiplier)
}
