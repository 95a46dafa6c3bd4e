//! Condition matching using multi-factor scoring.
//!
//! Scoring weights:
//! - Keyword coverage of the concern text: 40
//! - First additional symptom is associated: 25
//! - Pain level proximity: 20
//! - Duration proximity: 15

use crate::catalog::Catalog;
use crate::models::{
    ConditionProfile, MatchResult, NormalizedInput, ScoreBreakdown, ScoredCandidate, SymptomCode,
};

const KEYWORD_WEIGHT: f64 = 40.0;
const SYMPTOM_WEIGHT: f64 = 25.0;
const PAIN_WEIGHT: f64 = 20.0;
const DURATION_WEIGHT: f64 = 15.0;

/// Points lost per unit of pain outside the range.
const PAIN_FALLOFF: f64 = 3.0;
/// Points lost per day outside the duration range.
const DURATION_FALLOFF: f64 = 0.5;

/// Pick the winning candidate.
///
/// The first candidate with the maximum score wins, so ties go to catalog
/// order. With a minimum, the winner must score strictly above it. No
/// candidates, or no winner above the minimum, yields the undetermined
/// sentinel.
pub fn select_best<B>(candidates: Vec<ScoredCandidate<B>>, min_score: Option<f64>) -> MatchResult {
    let mut best: Option<ScoredCandidate<B>> = None;

    for candidate in candidates {
        if !candidate.score.is_finite() {
            continue;
        }
        let better = match &best {
            Some(current) => candidate.score > current.score,
            None => true,
        };
        if better {
            best = Some(candidate);
        }
    }

    match best {
        Some(winner) if min_score.map_or(true, |min| winner.score > min) => {
            MatchResult::new(winner.condition, winner.score)
        }
        _ => MatchResult::undetermined(),
    }
}

/// Scores catalog entries against normalized input.
pub struct ConditionMatcher<'a> {
    catalog: &'a Catalog,
    min_score: Option<f64>,
}

impl<'a> ConditionMatcher<'a> {
    pub fn new(catalog: &'a Catalog, min_score: Option<f64>) -> Self {
        Self { catalog, min_score }
    }

    /// Match raw matcher features to the best catalog entry.
    pub fn match_condition(
        &self,
        concern: &str,
        duration_days: f64,
        pain_level: f64,
        symptom: SymptomCode,
    ) -> MatchResult {
        let candidates = self.score_all(concern, duration_days, pain_level, symptom);
        let result = select_best(candidates, self.min_score);
        tracing::debug!(
            condition = %result.condition,
            score = result.score,
            "matched condition"
        );
        result
    }

    /// Match a normalized input, reading its bucket values and first symptom.
    pub fn match_input(&self, input: &NormalizedInput) -> MatchResult {
        self.match_condition(
            &input.primary_concern,
            input.duration.days(),
            input.pain.midpoint(),
            input.primary_symptom_code(),
        )
    }

    /// Score every catalog entry, in catalog order.
    pub fn score_all(
        &self,
        concern: &str,
        duration_days: f64,
        pain_level: f64,
        symptom: SymptomCode,
    ) -> Vec<ScoredCandidate<ScoreBreakdown>> {
        let concern_lower = concern.to_lowercase();
        self.catalog
            .entries()
            .iter()
            .map(|entry| {
                let breakdown =
                    Self::score_entry(entry, &concern_lower, duration_days, pain_level, symptom);
                ScoredCandidate {
                    condition: entry.name.clone(),
                    score: breakdown.total(),
                    breakdown,
                }
            })
            .collect()
    }

    fn score_entry(
        entry: &ConditionProfile,
        concern_lower: &str,
        duration_days: f64,
        pain_level: f64,
        symptom: SymptomCode,
    ) -> ScoreBreakdown {
        let criteria = &entry.criteria;

        let keyword_score = if criteria.keywords.is_empty() {
            0.0
        } else {
            let matched = criteria
                .keywords
                .iter()
                .filter(|k| concern_lower.contains(k.to_lowercase().as_str()))
                .count();
            matched as f64 / criteria.keywords.len() as f64 * KEYWORD_WEIGHT
        };

        let symptom_score = if criteria.symptoms.contains(&symptom) {
            SYMPTOM_WEIGHT
        } else {
            0.0
        };

        let pain_distance = criteria.pain_range.distance(pain_level);
        let pain_score = (PAIN_WEIGHT - PAIN_FALLOFF * pain_distance).max(0.0);

        let duration_distance = criteria.duration_range.distance(duration_days);
        let duration_score = (DURATION_WEIGHT - DURATION_FALLOFF * duration_distance).max(0.0);

        ScoreBreakdown {
            keyword_score,
            symptom_score,
            pain_score,
            duration_score,
        }
    }
}
