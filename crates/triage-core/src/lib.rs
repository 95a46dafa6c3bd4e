//! Triage Core Library
//!
//! Rule-based clinical decision scoring: condition matching, risk scoring,
//! urgency classification and recommendation selection over normalized
//! symptom input.
//!
//! # Architecture
//!
//! ```text
//! Normalized Input ──▶ Condition Matcher ──▶ Risk Modifier Engine
//!                       (keyword 40,          base × (1 + Σ modifiers)
//!                        symptom 25,                    │
//!                        pain 20,                       ▼
//!                        duration 15)          Urgency Classifier
//!                                            (overrides, then thresholds)
//!                                                       │
//!                                                       ▼
//!                                     Follow-up & Recommendation Selector
//!                                                       │
//!                                                       ▼
//!                                               AssessmentRecord
//! ```
//!
//! # Core Principle
//!
//! **Assessment never fails.** Internal errors resolve to a fixed, tagged
//! fallback outcome; callers always receive a complete result.
//!
//! # Modules
//!
//! - [`models`]: Domain types (NormalizedInput, ConditionProfile, RiskAssessment, etc.)
//! - [`catalog`]: Condition catalogs, reference tables, recommendation pools
//! - [`engine`]: Matcher, risk engine, urgency classifier, recommendation selector
//! - [`config`]: Engine configuration
//! - [`export`]: Result records for downstream storage

pub mod catalog;
pub mod config;
pub mod engine;
pub mod export;
pub mod models;

// Re-export commonly used types
pub use catalog::{Catalog, RecommendationPools, ReferenceTables};
pub use config::{EngineConfig, UrgencyThresholds};
pub use engine::{select_best, Engine, EngineError, EngineResult};
pub use export::{AssessmentRecord, RecordBatch};
pub use models::{
    AssessmentOutcome, AssessmentRequest, ConditionProfile, DurationBucket, Gender, MatchResult,
    MedicationCategory, NormalizedInput, PainBucket, RiskAssessment, SymptomCode, TriageReport,
    UrgencyTier,
};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::Arc;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum TriageError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<models::ParseLabelError> for TriageError {
    fn from(e: models::ParseLabelError) -> Self {
        TriageError::InvalidInput(e.to_string())
    }
}

impl From<EngineError> for TriageError {
    fn from(e: EngineError) -> Self {
        TriageError::Configuration(e.to_string())
    }
}

impl From<serde_json::Error> for TriageError {
    fn from(e: serde_json::Error) -> Self {
        TriageError::Serialization(e.to_string())
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Engine with the default configuration and built-in catalog.
#[uniffi::export]
pub fn new_engine() -> Arc<TriageCore> {
    Arc::new(TriageCore {
        engine: Arc::new(Engine::with_defaults()),
    })
}

/// Engine from a JSON configuration and an optional JSON catalog.
#[uniffi::export]
pub fn new_engine_with_config(
    config_json: String,
    catalog_json: Option<String>,
) -> Result<Arc<TriageCore>, TriageError> {
    let config = EngineConfig::from_json(&config_json)?;
    let catalog = match catalog_json {
        Some(json) => {
            let catalog = Catalog::from_json(&json)?;
            catalog.validate()?;
            catalog
        }
        None => Catalog::symptom_checker(),
    };
    let engine = Engine::new(config, catalog)?;
    Ok(Arc::new(TriageCore {
        engine: Arc::new(engine),
    }))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe engine wrapper for FFI. The engine is read-only, so no lock.
#[derive(uniffi::Object)]
pub struct TriageCore {
    engine: Arc<Engine>,
}

#[uniffi::export]
impl TriageCore {
    /// Assess risk for one request.
    pub fn assess(&self, input: FfiAssessmentInput) -> Result<FfiRiskAssessment, TriageError> {
        let request = AssessmentRequest::try_from(input)?;
        Ok(self.engine.assess(&request).into())
    }

    /// Run the full pipeline for one request.
    pub fn triage(&self, input: FfiAssessmentInput) -> Result<FfiTriageReport, TriageError> {
        let request = AssessmentRequest::try_from(input)?;
        Ok(self.engine.triage(&request).into())
    }

    /// Run the full pipeline and return a storage record as JSON.
    pub fn triage_record_json(&self, input: FfiAssessmentInput) -> Result<String, TriageError> {
        let request = AssessmentRequest::try_from(input)?;
        let report = self.engine.triage(&request);
        let record = AssessmentRecord::new(request.input, report);
        Ok(record.to_json()?)
    }

    /// Match bucket labels and an optional first symptom to a condition.
    pub fn match_condition(
        &self,
        primary_concern: String,
        duration: String,
        pain_level: String,
        symptom: Option<String>,
    ) -> Result<FfiMatchResult, TriageError> {
        let duration: DurationBucket = duration.parse()?;
        let pain: PainBucket = pain_level.parse()?;
        let symptom = symptom
            .as_deref()
            .and_then(SymptomCode::from_label)
            .unwrap_or(SymptomCode::DEFAULT);

        let result = self.engine.matcher().match_condition(
            &primary_concern,
            duration.days(),
            pain.midpoint(),
            symptom,
        );
        Ok(result.into())
    }

    /// Names of every condition in the engine's catalog.
    pub fn supported_conditions(&self) -> Vec<String> {
        self.engine.catalog().names()
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe assessment input, using the canonical bucket labels.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAssessmentInput {
    pub primary_concern: String,
    pub duration: String,
    pub pain_level: String,
    pub additional_symptoms: Vec<String>,
    pub medication: String,
    pub age: Option<u32>,
    pub gender: String,
    pub medical_history: Vec<String>,
    pub matched_condition: Option<String>,
    pub match_confidence: Option<f64>,
}

impl TryFrom<FfiAssessmentInput> for AssessmentRequest {
    type Error = TriageError;

    fn try_from(input: FfiAssessmentInput) -> Result<Self, Self::Error> {
        let normalized = NormalizedInput::new(input.primary_concern)
            .with_duration(input.duration.parse()?)
            .with_pain(input.pain_level.parse()?)
            .with_symptoms(input.additional_symptoms)
            .with_medication(input.medication.parse()?)
            .with_age(input.age)
            .with_gender(input.gender.parse()?)
            .with_history(input.medical_history);

        let request = AssessmentRequest::new(normalized);
        Ok(match input.matched_condition {
            Some(condition) => request.with_condition(condition, input.match_confidence),
            None => request,
        })
    }
}

/// FFI-safe match result.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiMatchResult {
    pub condition: String,
    pub score: f64,
    pub confidence: f64,
}

impl From<MatchResult> for FfiMatchResult {
    fn from(result: MatchResult) -> Self {
        Self {
            condition: result.condition,
            score: result.score,
            confidence: result.confidence,
        }
    }
}

/// FFI-safe risk breakdown entry.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiBreakdownEntry {
    pub name: String,
    pub value: f64,
}

/// FFI-safe risk assessment.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRiskAssessment {
    pub risk_score: u32,
    pub urgency: String,
    pub follow_up_days: Option<u32>,
    /// Empty on the fallback path
    pub breakdown: Vec<FfiBreakdownEntry>,
    pub risk_factors: Vec<String>,
    pub fallback_reason: Option<String>,
}

impl From<AssessmentOutcome> for FfiRiskAssessment {
    fn from(outcome: AssessmentOutcome) -> Self {
        let (assessment, fallback_reason) = match outcome {
            AssessmentOutcome::Computed(assessment) => (assessment, None),
            AssessmentOutcome::Fallback { assessment, reason } => (assessment, Some(reason)),
        };

        let breakdown = assessment
            .breakdown
            .map(|b| {
                b.entries()
                    .into_iter()
                    .map(|(name, value)| FfiBreakdownEntry {
                        name: name.to_string(),
                        value,
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            risk_score: assessment.risk_score,
            urgency: assessment.urgency.to_string(),
            follow_up_days: assessment.follow_up_days,
            breakdown,
            risk_factors: assessment.risk_factors,
            fallback_reason,
        }
    }
}

/// FFI-safe recommendation.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRecommendation {
    pub text: String,
    pub priority: String,
    pub category: String,
}

impl From<models::Recommendation> for FfiRecommendation {
    fn from(rec: models::Recommendation) -> Self {
        Self {
            text: rec.text,
            priority: rec.priority.to_string(),
            category: rec.category.to_string(),
        }
    }
}

/// FFI-safe triage report.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiTriageReport {
    pub matched: FfiMatchResult,
    pub assessment: FfiRiskAssessment,
    pub recommendations: Vec<FfiRecommendation>,
}

impl From<TriageReport> for FfiTriageReport {
    fn from(report: TriageReport) -> Self {
        Self {
            matched: report.matched.into(),
            assessment: report.outcome.into(),
            recommendations: report
                .recommendations
                .into_items()
                .into_iter()
                .map(|r| r.into())
                .collect(),
        }
    }
}
