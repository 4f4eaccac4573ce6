//! Response-shape normalization for the credit-score endpoint.
//!
//! The backend answers `/credit/score` in one of two shapes:
//!
//! - **canonical**: already matches [`ScoreResult`];
//! - **legacy**: only `score` and `probability`, no tier, loan terms or
//!   explainability.
//!
//! The payload is classified once into [`RawScoreResponse`] and then mapped to
//! a [`ScoreResult`] by [`normalize`]. Nothing outside this module sees the raw
//! shapes.

use crate::errors::GatewayError;
use crate::models::{Explainability, RiskTier, ScoreResult};
use serde::Deserialize;
use serde_json::Value;

/// Upper bound (inclusive) of the LOW tier.
pub const LOW_RISK_MAX_PROBABILITY: f64 = 0.25;
/// Upper bound (inclusive) of the MEDIUM tier.
pub const MEDIUM_RISK_MAX_PROBABILITY: f64 = 0.55;

/// Placeholder loan amount for legacy payloads, which carry no loan terms.
pub const LEGACY_RECOMMENDED_LOAN_AMOUNT: f64 = 1_000_000.0;
/// Placeholder tenor for legacy payloads.
pub const LEGACY_RECOMMENDED_TENOR_MONTHS: u32 = 12;

/// Older backend payload: `{ "score": .., "probability": .. }`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LegacyScore {
    pub score: f64,
    #[serde(default)]
    pub probability: Option<f64>,
}

/// A credit-score payload after field-presence classification.
#[derive(Debug, Clone, PartialEq)]
pub enum RawScoreResponse {
    Canonical(ScoreResult),
    Legacy(LegacyScore),
    /// Neither shape fits; carries the reason.
    Unrecognized(String),
}

impl RawScoreResponse {
    /// Classifies a raw payload by which keys it carries.
    ///
    /// `score` without `credit_score` is legacy; anything else is expected to
    /// be canonical. A payload that then fails to deserialize into its shape
    /// is `Unrecognized`.
    pub fn classify(payload: Value) -> Self {
        let Some(fields) = payload.as_object() else {
            return Self::Unrecognized(format!(
                "expected a JSON object, got {}",
                json_kind(&payload)
            ));
        };

        let is_legacy = fields.contains_key("score") && !fields.contains_key("credit_score");

        if is_legacy {
            tracing::debug!("Credit score payload classified as legacy shape");
            match serde_json::from_value::<LegacyScore>(payload) {
                Ok(legacy) => Self::Legacy(legacy),
                Err(e) => Self::Unrecognized(format!("invalid legacy score payload: {}", e)),
            }
        } else {
            match serde_json::from_value::<ScoreResult>(payload) {
                Ok(result) => Self::Canonical(result),
                Err(e) => Self::Unrecognized(format!("invalid score payload: {}", e)),
            }
        }
    }
}

/// Maps a classified payload to the stable [`ScoreResult`] contract.
pub fn normalize(raw: RawScoreResponse) -> Result<ScoreResult, GatewayError> {
    match raw {
        RawScoreResponse::Canonical(result) => Ok(result),
        RawScoreResponse::Legacy(legacy) => {
            tracing::warn!(
                "Backend returned legacy score shape; filling placeholder loan terms"
            );
            Ok(from_legacy(legacy))
        }
        RawScoreResponse::Unrecognized(reason) => Err(GatewayError::new(format!(
            "Unrecognized credit score response: {}",
            reason
        ))),
    }
}

/// Classifies and normalizes in one step.
pub fn normalize_payload(payload: Value) -> Result<ScoreResult, GatewayError> {
    normalize(RawScoreResponse::classify(payload))
}

/// Derives the risk tier from a probability of default.
pub fn risk_tier_for_probability(probability: f64) -> RiskTier {
    if probability <= LOW_RISK_MAX_PROBABILITY {
        RiskTier::Low
    } else if probability <= MEDIUM_RISK_MAX_PROBABILITY {
        RiskTier::Medium
    } else {
        RiskTier::High
    }
}

fn from_legacy(legacy: LegacyScore) -> ScoreResult {
    let probability = legacy.probability.unwrap_or(0.0);

    ScoreResult {
        credit_score: legacy.score,
        probability_of_default: probability,
        risk_tier: risk_tier_for_probability(probability),
        recommended_loan_amount: LEGACY_RECOMMENDED_LOAN_AMOUNT,
        recommended_tenor_months: LEGACY_RECOMMENDED_TENOR_MONTHS,
        currency: None,
        explainability: Explainability::default(),
        derived_features: None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
