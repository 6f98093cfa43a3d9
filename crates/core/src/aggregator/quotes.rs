//! Premium quotes and risk assessments.

use tokio_util::sync::CancellationToken;

use super::{Aggregator, resolve, settle, token_amount};
use crate::ports::UpstreamError;
use crate::pricing::{PremiumInput, PremiumQuote, finalize_premium, local_premium};
use crate::risk::{
    MAX_SCORE, RiskAnswers, RiskAssessment, RiskLevel, RiskProvenance, default_recommendations,
    default_risk_factors, insurance_needs, local_risk_score,
};

impl Aggregator {
    /// Quotes a premium from the oracle, or with the local tables when the
    /// oracle is unavailable.
    ///
    /// `input` must already be validated.
    pub async fn premium_quote(
        &self,
        input: &PremiumInput,
        cancel: &CancellationToken,
    ) -> PremiumQuote {
        let outcome = settle(cancel, async {
            let units = self.upstreams.chain.calculate_premium(input).await?;
            token_amount("oracle", units).map(finalize_premium)
        })
        .await;

        let premium = resolve("premium", "oracle", outcome, || local_premium(input));
        PremiumQuote {
            source: premium.provenance(),
            premium: premium.into_value(),
        }
    }

    /// Assesses risk. Score, factors and recommendations are read
    /// concurrently and each falls back on its own.
    ///
    /// `answers` must already be validated.
    pub async fn risk_assessment(
        &self,
        answers: &RiskAnswers,
        cancel: &CancellationToken,
    ) -> RiskAssessment {
        let chain = &self.upstreams.chain;

        let (score, factors, advice) = tokio::join!(
            settle(cancel, async {
                let score = chain.calculate_risk_score(answers).await?;
                Ok::<_, UpstreamError>(u32::try_from(score).unwrap_or(MAX_SCORE).min(MAX_SCORE))
            }),
            settle(cancel, async {
                Ok::<_, UpstreamError>(chain.risk_factors(answers).await?)
            }),
            settle(cancel, async {
                Ok::<_, UpstreamError>(chain.insurance_recommendations(answers).await?)
            }),
        );

        let score = resolve("risk_score", "oracle", score, || local_risk_score(answers));
        let factors = resolve("risk_factors", "oracle", factors, default_risk_factors);

        let risk_score = *score.value();
        let level = RiskLevel::from_score(risk_score);
        tracing::debug!(risk_score, level = %level, fallback = score.is_fallback(), "Risk scored");
        let advice = resolve("recommendations", "oracle", advice, || {
            default_recommendations(level)
        });

        RiskAssessment {
            overall_risk: level,
            risk_score,
            provenance: RiskProvenance {
                risk_score: score.provenance(),
                risk_factors: factors.provenance(),
                recommendations: advice.provenance(),
            },
            risk_factors: factors.into_value(),
            insurance_needs: insurance_needs(level),
            recommendations: advice.into_value(),
        }
    }
}
