//! Risk modifier engine.
//!
//! `score = base_risk * (1 + age + duration + severity + symptom + comorbidity + confidence)`,
//! truncated and clamped to 0-100. Each modifier is a small signed fraction.

use crate::catalog::{Catalog, ReferenceTables};
use crate::config::UrgencyThresholds;
use crate::models::{
    AssessmentOutcome, ConditionProfile, DurationBucket, NormalizedInput, PainBucket,
    RiskAssessment, RiskBreakdown, RiskMultipliers,
};

use super::recommend::follow_up_days;
use super::urgency::UrgencyClassifier;
use super::{EngineError, EngineResult};

const SYMPTOM_LOAD_CAP: f64 = 0.3;
const COMORBIDITY_CAP: f64 = 0.4;
const MAX_RISK_FACTORS: usize = 5;

/// The six modifiers for one request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskModifiers {
    pub age: f64,
    pub duration: f64,
    pub severity: f64,
    pub symptom: f64,
    pub comorbidity: f64,
    pub confidence: f64,
}

impl RiskModifiers {
    pub fn sum(&self) -> f64 {
        self.age + self.duration + self.severity + self.symptom + self.comorbidity + self.confidence
    }

    /// Percentage-point breakdown, each rounded to one decimal.
    pub fn breakdown(&self, base_risk: u32) -> RiskBreakdown {
        RiskBreakdown {
            base_risk: base_risk as f64,
            age_adjustment: percent(self.age),
            duration_adjustment: percent(self.duration),
            severity_adjustment: percent(self.severity),
            symptom_adjustment: percent(self.symptom),
            comorbidity_adjustment: percent(self.comorbidity),
            confidence_adjustment: percent(self.confidence),
        }
    }
}

fn percent(modifier: f64) -> f64 {
    (modifier * 1000.0).round() / 10.0
}

/// Age band delta scaled by the age multiplier. Missing age contributes nothing.
pub fn age_modifier(age: Option<u32>, multipliers: &RiskMultipliers) -> f64 {
    let delta = match age {
        None => return 0.0,
        Some(a) if a < 2 => 0.3,
        Some(a) if a < 18 => 0.1,
        Some(a) if a < 65 => 0.0,
        Some(a) if a < 75 => 0.2,
        Some(_) => 0.4,
    };
    delta * multipliers.age
}

pub fn duration_modifier(duration: DurationBucket, multipliers: &RiskMultipliers) -> f64 {
    let delta = match duration {
        DurationBucket::LessThan24Hours => 0.2,
        DurationBucket::OneToThreeDays => 0.1,
        DurationBucket::FourToSevenDays => 0.0,
        DurationBucket::OneToTwoWeeks => -0.1,
        DurationBucket::MoreThanTwoWeeks => -0.2,
    };
    delta * multipliers.duration
}

pub fn severity_modifier(pain: PainBucket, multipliers: &RiskMultipliers) -> f64 {
    let delta = match pain {
        PainBucket::NoPain => 0.0,
        PainBucket::Mild => 0.1,
        PainBucket::Moderate => 0.2,
        PainBucket::Severe => 0.4,
        PainBucket::Extreme => 0.6,
    };
    delta * multipliers.severity
}

pub fn confidence_modifier(confidence: f64) -> f64 {
    if confidence < 0.5 {
        0.1
    } else if confidence > 0.8 {
        -0.05
    } else {
        0.0
    }
}

/// Computes risk assessments against a catalog.
pub struct RiskEngine<'a> {
    catalog: &'a Catalog,
    tables: &'a ReferenceTables,
    classifier: UrgencyClassifier<'a>,
}

impl<'a> RiskEngine<'a> {
    pub fn new(catalog: &'a Catalog, tables: &'a ReferenceTables, thresholds: UrgencyThresholds) -> Self {
        Self {
            catalog,
            tables,
            classifier: UrgencyClassifier::new(tables, thresholds),
        }
    }

    /// Assess risk, converting any internal failure into the fallback outcome.
    pub fn calculate(&self, condition: &str, confidence: f64, input: &NormalizedInput) -> AssessmentOutcome {
        match self.try_calculate(condition, confidence, input) {
            Ok(assessment) => AssessmentOutcome::Computed(assessment),
            Err(e) => {
                tracing::warn!(condition, error = %e, "risk calculation failed, using fallback");
                AssessmentOutcome::fallback(e.to_string())
            }
        }
    }

    /// Assess risk, surfacing internal failures.
    pub fn try_calculate(
        &self,
        condition: &str,
        confidence: f64,
        input: &NormalizedInput,
    ) -> EngineResult<RiskAssessment> {
        let profile = self.catalog.profile_or_default(condition);
        check_profile(&profile)?;

        let modifiers = self.modifiers(&profile, confidence, input);
        let raw = profile.base_risk as f64 * (1.0 + modifiers.sum());
        if !raw.is_finite() {
            return Err(EngineError::NonFiniteScore(condition.to_string()));
        }
        let risk_score = raw.trunc().clamp(0.0, 100.0) as u32;

        let urgency = self.classifier.classify(risk_score, condition, input);

        Ok(RiskAssessment {
            risk_score,
            urgency,
            follow_up_days: follow_up_days(urgency, risk_score),
            breakdown: Some(modifiers.breakdown(profile.base_risk)),
            risk_factors: self.risk_factors(condition, input),
        })
    }

    /// All six modifiers for a profile and input.
    pub fn modifiers(
        &self,
        profile: &ConditionProfile,
        confidence: f64,
        input: &NormalizedInput,
    ) -> RiskModifiers {
        let m = &profile.multipliers;
        RiskModifiers {
            age: age_modifier(input.age, m),
            duration: duration_modifier(input.duration, m),
            severity: severity_modifier(input.pain, m),
            symptom: self.symptom_modifier(input),
            comorbidity: self.comorbidity_modifier(input, m),
            confidence: confidence_modifier(confidence),
        }
    }

    fn symptom_modifier(&self, input: &NormalizedInput) -> f64 {
        let total: u32 = input
            .additional_symptoms
            .iter()
            .map(|s| self.tables.symptom_weight(s))
            .sum();
        (total as f64 / 100.0).min(SYMPTOM_LOAD_CAP)
    }

    fn comorbidity_modifier(&self, input: &NormalizedInput, multipliers: &RiskMultipliers) -> f64 {
        let count = input
            .medical_history
            .iter()
            .filter(|h| self.tables.is_high_risk_history(h))
            .count();
        (count as f64 * 0.1).min(COMORBIDITY_CAP) * (multipliers.comorbidity - 1.0)
    }

    /// Human-readable risk factors, independent of the numeric score.
    pub fn risk_factors(&self, condition: &str, input: &NormalizedInput) -> Vec<String> {
        let mut factors = Vec::new();

        match input.age {
            Some(a) if a < 2 => factors.push("Very young age (infant)".to_string()),
            Some(a) if a > 75 => factors.push("Advanced age (>75 years)".to_string()),
            Some(a) if a > 65 => factors.push("Senior age (65-75 years)".to_string()),
            _ => {}
        }

        if input.pain.is_high() {
            factors.push("High pain severity".to_string());
        }

        for symptom in &input.additional_symptoms {
            let high_risk = self
                .tables
                .high_risk_symptoms
                .iter()
                .any(|s| s.eq_ignore_ascii_case(symptom));
            if high_risk {
                factors.push(format!("Presence of {}", symptom.to_lowercase()));
            }
        }

        if input.duration == DurationBucket::LessThan24Hours && self.tables.is_serious_condition(condition) {
            factors.push("Acute onset of serious symptoms".to_string());
        }

        if !input.medical_history.is_empty() {
            factors.push("Pre-existing medical conditions".to_string());
        }

        factors.truncate(MAX_RISK_FACTORS);
        factors
    }
}

fn check_profile(profile: &ConditionProfile) -> EngineResult<()> {
    if profile.base_risk > 100 {
        return Err(EngineError::MalformedProfile {
            condition: profile.name.clone(),
            reason: format!("base risk {} exceeds 100", profile.base_risk),
        });
    }
    if !profile.multipliers.is_finite() {
        return Err(EngineError::MalformedProfile {
            condition: profile.name.clone(),
            reason: "risk multipliers must be finite".into(),
        });
    }
    Ok(())
}
