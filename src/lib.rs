//! Loan Scout Scoring Gateway Library
//!
//! Typed client for the remote credit-scoring backend used by the loan scout
//! dashboard. Callers get stable result types and a single error type, no
//! matter which response shape the backend produced.
//!
//! # Modules
//!
//! - `config`: Configuration loaded from the environment.
//! - `errors`: `GatewayError` and error-body message extraction.
//! - `gateway_client`: `ScoringGateway`, the HTTP facade.
//! - `models`: Request and response models.
//! - `score_adapter`: Credit-score response shape normalization.

pub mod config;
pub mod errors;
pub mod gateway_client;
pub mod models;
pub mod score_adapter;

pub use config::Config;
pub use errors::GatewayError;
pub use gateway_client::ScoringGateway;
pub use models::{
    AssetRecommendationRequest, AssetRecommendationResult, Explainability, FactorImpact,
    FinancialHealthResult, PortfolioAllocation, RiskTier, ScoreResult, ScoringRequest,
    ServiceStatus, SystemInfo,
};
