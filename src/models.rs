use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ============ Request Models ============

/// Applicant data sent to the credit-score and financial-health endpoints.
///
/// Field names on the wire follow the backend schema (`LIMIT_BAL`, `PAY_0`, ...).
/// The payment-status series skips `PAY_1`, as the backend does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringRequest {
    /// Amount of given credit.
    #[serde(rename = "LIMIT_BAL")]
    pub limit_bal: f64,
    /// Age in years.
    #[serde(rename = "AGE")]
    pub age: i32,
    /// 1 = male, 2 = female.
    #[serde(rename = "SEX")]
    pub sex: i32,
    /// 1 = graduate, 2 = university, 3 = high school, 4 = others.
    #[serde(rename = "EDUCATION")]
    pub education: i32,
    /// 1 = married, 2 = single, 3 = others.
    #[serde(rename = "MARRIAGE")]
    pub marriage: i32,

    /// Repayment status, most recent month first (-1 = paid duly, n = n months late).
    #[serde(rename = "PAY_0")]
    pub pay_0: i32,
    #[serde(rename = "PAY_2")]
    pub pay_2: i32,
    #[serde(rename = "PAY_3")]
    pub pay_3: i32,
    #[serde(rename = "PAY_4")]
    pub pay_4: i32,
    #[serde(rename = "PAY_5")]
    pub pay_5: i32,
    #[serde(rename = "PAY_6")]
    pub pay_6: i32,

    /// Bill statement amounts, most recent month first.
    #[serde(rename = "BILL_AMT1")]
    pub bill_amt1: f64,
    #[serde(rename = "BILL_AMT2")]
    pub bill_amt2: f64,
    #[serde(rename = "BILL_AMT3")]
    pub bill_amt3: f64,
    #[serde(rename = "BILL_AMT4")]
    pub bill_amt4: f64,
    #[serde(rename = "BILL_AMT5")]
    pub bill_amt5: f64,
    #[serde(rename = "BILL_AMT6")]
    pub bill_amt6: f64,

    /// Amounts paid, most recent month first.
    #[serde(rename = "PAY_AMT1")]
    pub pay_amt1: f64,
    #[serde(rename = "PAY_AMT2")]
    pub pay_amt2: f64,
    #[serde(rename = "PAY_AMT3")]
    pub pay_amt3: f64,
    #[serde(rename = "PAY_AMT4")]
    pub pay_amt4: f64,
    #[serde(rename = "PAY_AMT5")]
    pub pay_amt5: f64,
    #[serde(rename = "PAY_AMT6")]
    pub pay_amt6: f64,
}

/// Input for the asset-management recommendation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecommendationRequest {
    pub financial_health_score: f64,
    pub credit_score: f64,
    pub risk_tier: RiskTier,
    #[serde(rename = "LIMIT_BAL")]
    pub limit_bal: f64,
    #[serde(rename = "AGE")]
    pub age: i32,
}

// ============ Response Models ============

/// Risk bucket attached to a credit score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskTier::Low => "LOW",
            RiskTier::Medium => "MEDIUM",
            RiskTier::High => "HIGH",
        };
        f.write_str(label)
    }
}

/// One named contribution to the score. `impact` is signed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorImpact {
    pub feature: String,
    pub impact: f64,
}

/// Positive and negative contributors, in the order the backend ranked them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Explainability {
    #[serde(default)]
    pub top_positive_factors: Vec<FactorImpact>,
    #[serde(default)]
    pub top_negative_factors: Vec<FactorImpact>,
}

/// Normalized credit-score result handed to every caller of the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub credit_score: f64,
    /// Probability of default in `[0, 1]`.
    pub probability_of_default: f64,
    pub risk_tier: RiskTier,
    pub recommended_loan_amount: f64,
    pub recommended_tenor_months: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default)]
    pub explainability: Explainability,
    /// Engineered features the backend echoes back for debugging, if any.
    #[serde(
        rename = "_derived_features",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub derived_features: Option<BTreeMap<String, serde_json::Value>>,
}

/// Financial-health score in `[0, 100]` and its qualitative band
/// (`Strong`, `Moderate` or `Fragile` on the current backend).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialHealthResult {
    pub financial_health_score: f64,
    pub health_band: String,
}

/// Suggested split of an investable amount. Weights are as returned by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioAllocation {
    pub money_market: f64,
    pub fixed_income: f64,
    pub equities: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetRecommendationResult {
    pub risk_tolerance: String,
    pub investment_horizon: String,
    pub portfolio_allocation: PortfolioAllocation,
}

// ============ Service Probes ============

/// Answer of `GET /health` (status only) or `GET /` (status, service, version).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl ServiceStatus {
    pub fn is_healthy(&self) -> bool {
        matches!(self.status.as_str(), "ok" | "healthy")
    }
}

/// Library versions reported by the backend, e.g. `xgboost_version`.
pub type SystemInfo = BTreeMap<String, String>;
