//! Local risk heuristic and default lists.

use super::level::RiskLevel;
use super::types::RiskAnswers;

/// Score every applicant starts from.
const BASE_POINTS: u32 = 10;

/// Highest possible score.
pub const MAX_SCORE: u32 = 100;

fn age_points(age: u32) -> u32 {
    match age {
        18..=24 => 10,
        25..=39 => 5,
        40..=54 => 15,
        55..=64 => 25,
        65.. => 35,
        _ => 5,
    }
}

fn location_points(location: &str) -> u32 {
    match location.trim().to_lowercase().as_str() {
        "cancun" => 15,
        "chiapas" | "oaxaca" => 12,
        "cdmx" => 10,
        "guadalajara" | "monterrey" => 8,
        _ => 5,
    }
}

fn occupation_points(occupation: &str) -> u32 {
    match occupation.trim().to_lowercase().as_str() {
        "construction" => 20,
        "fisher" => 18,
        "driver" => 15,
        "farmer" => 12,
        "freelancer" | "merchant" => 5,
        "employee" => 3,
        "student" => 2,
        _ => 5,
    }
}

fn health_points(health: &str) -> u32 {
    match health.trim().to_lowercase().as_str() {
        "excellent" => 0,
        "good" => 5,
        "fair" => 15,
        "poor" => 30,
        _ => 10,
    }
}

/// Scores answers without the oracle, clamped to `0..=100`.
#[must_use]
pub fn local_risk_score(answers: &RiskAnswers) -> u32 {
    let score = BASE_POINTS
        + age_points(answers.age)
        + location_points(&answers.location)
        + occupation_points(&answers.occupation)
        + health_points(&answers.health);
    score.min(MAX_SCORE)
}

/// Factor list used when the oracle cannot provide one.
#[must_use]
pub fn default_risk_factors() -> Vec<String> {
    [
        "Age-related health risk",
        "Regional climate and natural hazard exposure",
        "Occupational accident exposure",
        "Reported health condition",
    ]
    .map(str::to_string)
    .to_vec()
}

/// Products suggested for a risk level.
#[must_use]
pub fn insurance_needs(level: RiskLevel) -> Vec<String> {
    let needs: &[&str] = match level {
        RiskLevel::Low => &["Accident coverage", "Travel protection"],
        RiskLevel::Medium => &["Health insurance", "Accident coverage", "Income protection"],
        RiskLevel::High => &[
            "Comprehensive health insurance",
            "Life insurance",
            "Income protection",
            "Critical illness coverage",
        ],
    };
    needs.iter().map(|s| (*s).to_string()).collect()
}

/// Recommendations used when the oracle cannot provide them.
#[must_use]
pub fn default_recommendations(level: RiskLevel) -> Vec<String> {
    let advice: &[&str] = match level {
        RiskLevel::Low => &[
            "A basic micro-policy keeps monthly premiums low",
            "Set up a savings goal for small emergencies",
        ],
        RiskLevel::Medium => &[
            "Combine health and accident coverage",
            "Pay premiums gasless to avoid network fees",
            "Review coverage every 6 months",
        ],
        RiskLevel::High => &[
            "Prioritize comprehensive health coverage",
            "Add life insurance for dependents",
            "Consider longer policy durations to lock in premiums",
        ],
    };
    advice.iter().map(|s| (*s).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn answers(age: u32, location: &str, occupation: &str, health: &str) -> RiskAnswers {
        RiskAnswers {
            age,
            location: location.to_string(),
            occupation: occupation.to_string(),
            health: health.to_string(),
        }
    }

    #[test]
    fn test_reference_score() {
        // 10 + 5 + 10 + 3 + 5
        assert_eq!(local_risk_score(&answers(30, "CDMX", "employee", "good")), 33);
    }

    #[test]
    fn test_high_risk_profile() {
        // 10 + 35 + 15 + 20 + 30 = 110, clamped
        assert_eq!(
            local_risk_score(&answers(70, "Cancun", "construction", "poor")),
            MAX_SCORE
        );
    }

    #[test]
    fn test_low_risk_profile() {
        // 10 + 5 + 5 + 2 + 0
        let score = local_risk_score(&answers(30, "Puebla", "student", "excellent"));
        assert_eq!(score, 22);
        assert_eq!(RiskLevel::from_score(score), RiskLevel::Low);
    }

    #[test]
    fn test_default_factors_have_four_items() {
        assert_eq!(default_risk_factors().len(), 4);
    }

    #[test]
    fn test_needs_grow_with_level() {
        assert!(insurance_needs(RiskLevel::Low).len() < insurance_needs(RiskLevel::High).len());
        assert!(!default_recommendations(RiskLevel::Medium).is_empty());
    }

    proptest! {
        #[test]
        fn prop_local_score_in_range(
            age in 1u32..=120,
            location in "[a-zA-Z]{0,10}",
            occupation in "[a-zA-Z]{0,10}",
            health in "[a-zA-Z]{0,10}",
        ) {
            let score = local_risk_score(&answers(age, &location, &occupation, &health));
            prop_assert!(score <= MAX_SCORE);
        }
    }
}
