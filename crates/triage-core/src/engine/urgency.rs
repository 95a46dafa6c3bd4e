//! Urgency classification.
//!
//! Precedence, first match wins:
//! 1. Condition is in the emergency set
//! 2. An emergency symptom is present, or the pain bucket is itself one
//! 3. Score thresholds, highest first

use crate::catalog::ReferenceTables;
use crate::config::UrgencyThresholds;
use crate::models::{NormalizedInput, UrgencyTier};

pub struct UrgencyClassifier<'a> {
    tables: &'a ReferenceTables,
    thresholds: UrgencyThresholds,
}

impl<'a> UrgencyClassifier<'a> {
    pub fn new(tables: &'a ReferenceTables, thresholds: UrgencyThresholds) -> Self {
        Self { tables, thresholds }
    }

    pub fn classify(&self, risk_score: u32, condition: &str, input: &NormalizedInput) -> UrgencyTier {
        let tier = if self.tables.is_emergency_condition(condition) || self.has_emergency_sign(input) {
            UrgencyTier::Emergency
        } else {
            self.thresholds.tier_for_score(risk_score)
        };
        tracing::debug!(condition, risk_score, tier = %tier, "classified urgency");
        tier
    }

    fn has_emergency_sign(&self, input: &NormalizedInput) -> bool {
        input
            .additional_symptoms
            .iter()
            .map(String::as_str)
            .chain(std::iter::once(input.pain.label()))
            .any(|label| self.tables.is_emergency_symptom(label))
    }
}
