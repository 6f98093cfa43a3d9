//! Risk assessment.
//!
//! The oracle is authoritative for the score, the factor list and the
//! recommendations. Each of the three falls back independently: a local
//! heuristic score, a fixed four-item factor list, and level-keyed
//! recommendations.

mod level;
mod scoring;
mod types;

pub use level::RiskLevel;
pub use scoring::{
    MAX_SCORE, default_recommendations, default_risk_factors, insurance_needs, local_risk_score,
};
pub use types::{RiskAnswers, RiskAssessment, RiskProvenance, RiskRequest};
