//! Clinical decision scoring engine.
//!
//! Pipeline: Condition Matcher → Risk Modifier Engine → Urgency Classifier → Recommendation Selector

mod matcher;
mod recommend;
mod risk;
mod urgency;

pub use matcher::*;
pub use recommend::*;
pub use risk::*;
pub use urgency::*;

use thiserror::Error;

use crate::catalog::{Catalog, RecommendationPools, ReferenceTables};
use crate::config::EngineConfig;
use crate::models::{
    AssessmentOutcome, AssessmentRequest, MatchResult, RecommendationSet, TriageReport, UrgencyTier,
};

/// Engine errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Malformed profile for {condition}: {reason}")]
    MalformedProfile { condition: String, reason: String },

    #[error("Risk score for {0} is not finite")]
    NonFiniteScore(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Configuration parse error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type EngineResult<T> = Result<T, EngineError>;

/// Main engine that coordinates the full pipeline.
///
/// Holds only read-only state, so one engine can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    catalog: Catalog,
    tables: ReferenceTables,
    pools: RecommendationPools,
}

impl Engine {
    /// Create an engine with the built-in reference tables and pools.
    pub fn new(config: EngineConfig, catalog: Catalog) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            catalog,
            tables: ReferenceTables::new(),
            pools: RecommendationPools::new(),
        })
    }

    /// Default configuration over the symptom-checker catalog.
    pub fn with_defaults() -> Self {
        Self {
            config: EngineConfig::default(),
            catalog: Catalog::symptom_checker(),
            tables: ReferenceTables::new(),
            pools: RecommendationPools::new(),
        }
    }

    pub fn with_tables(mut self, tables: ReferenceTables) -> Self {
        self.tables = tables;
        self
    }

    pub fn with_pools(mut self, pools: RecommendationPools) -> Self {
        self.pools = pools;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    pub fn matcher(&self) -> ConditionMatcher<'_> {
        ConditionMatcher::new(&self.catalog, self.config.min_match_score)
    }

    pub fn risk_engine(&self) -> RiskEngine<'_> {
        RiskEngine::new(&self.catalog, &self.tables, self.config.urgency_thresholds)
    }

    pub fn selector(&self) -> RecommendationSelector<'_> {
        RecommendationSelector::new(&self.pools, self.config.recommendation_cap)
    }

    /// Assess risk for a request. Never fails; internal errors yield the fallback outcome.
    pub fn assess(&self, request: &AssessmentRequest) -> AssessmentOutcome {
        let matched = self.resolve_match(request);
        self.risk_engine()
            .calculate(&matched.condition, matched.confidence, &request.input)
    }

    /// Run the whole pipeline: match, assess, recommend.
    pub fn triage(&self, request: &AssessmentRequest) -> TriageReport {
        let matched = self.resolve_match(request);
        let outcome = self
            .risk_engine()
            .calculate(&matched.condition, matched.confidence, &request.input);
        let recommendations = self.recommend(
            &matched.condition,
            outcome.assessment().urgency,
            &request.input.primary_concern,
        );

        TriageReport {
            matched,
            outcome,
            recommendations,
        }
    }

    pub fn recommend(&self, condition: &str, tier: UrgencyTier, concern: &str) -> RecommendationSet {
        self.selector().select(condition, tier, concern)
    }

    /// Use the caller's condition when given, otherwise run the matcher.
    fn resolve_match(&self, request: &AssessmentRequest) -> MatchResult {
        match &request.matched_condition {
            Some(condition) => {
                let confidence = match request.match_confidence {
                    Some(c) if c.is_finite() => c.clamp(0.0, 1.0),
                    Some(c) => {
                        tracing::warn!(confidence = c, "non-finite confidence, using default");
                        self.config.default_confidence
                    }
                    None => self.config.default_confidence,
                };
                MatchResult::new(condition.clone(), confidence * 100.0)
            }
            None => self.matcher().match_input(&request.input),
        }
    }
}
