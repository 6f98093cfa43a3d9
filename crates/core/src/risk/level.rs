//! Score to level mapping.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Overall risk level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// Score below 30.
    Low,
    /// Score from 30 up to 60.
    Medium,
    /// Score 60 and above.
    High,
}

impl RiskLevel {
    /// Upper bound (exclusive) of the low band.
    pub const LOW_BELOW: u32 = 30;
    /// Upper bound (exclusive) of the medium band.
    pub const MEDIUM_BELOW: u32 = 60;

    /// Maps a score to its level.
    #[must_use]
    pub const fn from_score(score: u32) -> Self {
        if score < Self::LOW_BELOW {
            Self::Low
        } else if score < Self::MEDIUM_BELOW {
            Self::Medium
        } else {
            Self::High
        }
    }

    /// Lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, RiskLevel::Low)]
    #[case(29, RiskLevel::Low)]
    #[case(30, RiskLevel::Medium)]
    #[case(59, RiskLevel::Medium)]
    #[case(60, RiskLevel::High)]
    #[case(100, RiskLevel::High)]
    fn test_boundaries(#[case] score: u32, #[case] expected: RiskLevel) {
        assert_eq!(RiskLevel::from_score(score), expected);
    }

    proptest! {
        #[test]
        fn prop_level_matches_thresholds(score in 0u32..=100) {
            let expected = if score < 30 {
                "low"
            } else if score < 60 {
                "medium"
            } else {
                "high"
            };
            prop_assert_eq!(RiskLevel::from_score(score).to_string(), expected);
        }
    }
}
