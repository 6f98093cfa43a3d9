//! Premium request and quote types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::QuoteError;
use crate::provenance::Provenance;

/// Largest coverage accepted for a quote.
pub const MAX_COVERAGE: u64 = 1_000_000_000;

/// Premium calculation request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumInput {
    /// Applicant age in years.
    pub age: u32,
    /// Region key, e.g. "CDMX".
    pub location: String,
    /// Product key, e.g. "health".
    pub insurance_type: String,
    /// Coverage amount.
    pub coverage: Decimal,
    /// Policy duration in months.
    pub duration: u32,
    /// Occupation key, e.g. "employee".
    pub occupation: String,
}

impl PremiumInput {
    /// Checks required fields and ranges.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field.
    pub fn validate(&self) -> Result<(), QuoteError> {
        if !(1..=120).contains(&self.age) {
            return Err(QuoteError::InvalidAge(self.age));
        }
        if self.location.trim().is_empty() {
            return Err(QuoteError::MissingField("location"));
        }
        if self.insurance_type.trim().is_empty() {
            return Err(QuoteError::MissingField("insuranceType"));
        }
        if self.occupation.trim().is_empty() {
            return Err(QuoteError::MissingField("occupation"));
        }
        if self.coverage <= Decimal::ZERO || self.coverage > Decimal::from(MAX_COVERAGE) {
            return Err(QuoteError::InvalidCoverage { max: MAX_COVERAGE });
        }
        if self.duration == 0 {
            return Err(QuoteError::InvalidDuration);
        }
        Ok(())
    }
}

/// Premium quote response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PremiumQuote {
    /// Final premium, floored at 1 and rounded to 2 dp.
    #[serde(with = "rust_decimal::serde::float")]
    pub premium: Decimal,
    /// Where the premium came from.
    pub source: Provenance,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn input() -> PremiumInput {
        PremiumInput {
            age: 30,
            location: "CDMX".to_string(),
            insurance_type: "health".to_string(),
            coverage: dec!(10000),
            duration: 12,
            occupation: "employee".to_string(),
        }
    }

    #[test]
    fn test_valid_input() {
        assert_eq!(input().validate(), Ok(()));
    }

    #[test]
    fn test_invalid_inputs() {
        let mut bad = input();
        bad.age = 0;
        assert_eq!(bad.validate(), Err(QuoteError::InvalidAge(0)));

        let mut bad = input();
        bad.location = "  ".to_string();
        assert_eq!(bad.validate(), Err(QuoteError::MissingField("location")));

        let mut bad = input();
        bad.coverage = dec!(0);
        assert!(matches!(
            bad.validate(),
            Err(QuoteError::InvalidCoverage { .. })
        ));

        let mut bad = input();
        bad.duration = 0;
        assert_eq!(bad.validate(), Err(QuoteError::InvalidDuration));
    }

    #[test]
    fn test_deserializes_camel_case_with_numeric_coverage() {
        let parsed: PremiumInput = serde_json::from_str(
            r#"{"age":30,"location":"CDMX","insuranceType":"health","coverage":10000,"duration":12,"occupation":"employee"}"#,
        )
        .unwrap();
        assert_eq!(parsed, input());
    }
}
