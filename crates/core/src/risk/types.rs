//! Risk request and assessment types.

use serde::{Deserialize, Serialize};

use super::level::RiskLevel;
use crate::pricing::QuoteError;
use crate::provenance::Provenance;

/// Questionnaire answers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAnswers {
    /// Applicant age in years.
    pub age: u32,
    /// Region key.
    pub location: String,
    /// Occupation key.
    pub occupation: String,
    /// Self-reported health, e.g. "good".
    pub health: String,
}

impl RiskAnswers {
    /// Checks required fields and ranges.
    ///
    /// # Errors
    ///
    /// Returns the first invalid field.
    pub fn validate(&self) -> Result<(), QuoteError> {
        if !(1..=120).contains(&self.age) {
            return Err(QuoteError::InvalidAge(self.age));
        }
        for (name, value) in [
            ("location", &self.location),
            ("occupation", &self.occupation),
            ("health", &self.health),
        ] {
            if value.trim().is_empty() {
                return Err(QuoteError::MissingField(name));
            }
        }
        Ok(())
    }
}

/// Body of a risk request.
#[derive(Debug, Clone, Deserialize)]
pub struct RiskRequest {
    /// Questionnaire answers.
    pub answers: RiskAnswers,
}

/// Per-field origin of a risk assessment.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskProvenance {
    /// Score origin.
    pub risk_score: Provenance,
    /// Factor list origin.
    pub risk_factors: Provenance,
    /// Recommendations origin.
    pub recommendations: Provenance,
}

/// Risk assessment response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskAssessment {
    /// Level derived from the score.
    pub overall_risk: RiskLevel,
    /// Score in 0..=100.
    pub risk_score: u32,
    /// Factors that drove the score.
    pub risk_factors: Vec<String>,
    /// Products the applicant should consider.
    pub insurance_needs: Vec<String>,
    /// Advice for the applicant.
    pub recommendations: Vec<String>,
    /// Where each field came from.
    pub provenance: RiskProvenance,
}
