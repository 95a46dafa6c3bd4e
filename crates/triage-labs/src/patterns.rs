//! Disease pattern matching over lab panels.
//!
//! Scoring:
//! - 15 per pattern keyword found in the panel text
//! - 25 per lab indicator named by any critical-value indicator
//! - 10 per recognized lab whose keyword overlaps the pattern

use serde::{Deserialize, Serialize};
use tracing::debug;

use triage_core::models::{MatchResult, ScoredCandidate};
use triage_core::select_best;

use crate::panel::LabPanel;

const KEYWORD_POINTS: f64 = 15.0;
const INDICATOR_POINTS: f64 = 25.0;
const LAB_POINTS: f64 = 10.0;

/// Winning pattern must score above this.
pub const MIN_PATTERN_SCORE: f64 = 20.0;
/// Base risk when no pattern wins.
pub const UNDETERMINED_BASE_RISK: u32 = 30;
/// Confidence boost when no pattern wins.
pub const UNDETERMINED_CONFIDENCE_BOOST: f64 = 0.5;

/// A disease signature in lab terms.
#[derive(Debug, Clone, PartialEq)]
pub struct DiseasePattern {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub lab_indicators: &'static [&'static str],
    pub base_risk: u32,
    pub confidence_boost: f64,
}

pub const DISEASE_PATTERNS: &[DiseasePattern] = &[
    DiseasePattern {
        name: "Pneumonia",
        keywords: &["opacity", "consolidation", "infiltrate", "lung", "chest", "respiratory"],
        lab_indicators: &["elevated wbc", "high temperature", "increased crp"],
        base_risk: 65,
        confidence_boost: 0.85,
    },
    DiseasePattern {
        name: "Myocardial Infarction",
        keywords: &["troponin", "elevated", "cardiac", "heart", "ck-mb", "ecg"],
        lab_indicators: &["troponin i", "troponin t", "ck-mb", "ldh"],
        base_risk: 85,
        confidence_boost: 0.90,
    },
    DiseasePattern {
        name: "Diabetes Mellitus",
        keywords: &["glucose", "hba1c", "diabetes", "elevated", "high"],
        lab_indicators: &["glucose >126", "hba1c >7", "random glucose >200"],
        base_risk: 70,
        confidence_boost: 0.88,
    },
    DiseasePattern {
        name: "Kidney Disease",
        keywords: &["creatinine", "bun", "kidney", "renal", "elevated", "decreased gfr"],
        lab_indicators: &["elevated creatinine", "elevated bun", "proteinuria"],
        base_risk: 60,
        confidence_boost: 0.82,
    },
    DiseasePattern {
        name: "Liver Disease",
        keywords: &["alt", "ast", "bilirubin", "liver", "hepatic", "elevated"],
        lab_indicators: &["elevated alt", "elevated ast", "elevated bilirubin"],
        base_risk: 55,
        confidence_boost: 0.80,
    },
    DiseasePattern {
        name: "Anemia",
        keywords: &["hemoglobin", "hematocrit", "low", "decreased", "rbc"],
        lab_indicators: &["low hemoglobin", "low hematocrit", "decreased rbc"],
        base_risk: 40,
        confidence_boost: 0.75,
    },
    DiseasePattern {
        name: "Hyperlipidemia",
        keywords: &["cholesterol", "ldl", "triglycerides", "elevated", "high"],
        lab_indicators: &["total cholesterol >200", "ldl >100", "triglycerides >150"],
        base_risk: 45,
        confidence_boost: 0.78,
    },
    DiseasePattern {
        name: "Thyroid Dysfunction",
        keywords: &["tsh", "thyroid", "t4", "t3", "elevated", "decreased"],
        lab_indicators: &["abnormal tsh", "abnormal free t4"],
        base_risk: 50,
        confidence_boost: 0.83,
    },
];

/// Per-component pattern score.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct LabScoreBreakdown {
    pub keyword_score: f64,
    pub indicator_score: f64,
    pub lab_score: f64,
}

impl LabScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.keyword_score + self.indicator_score + self.lab_score
    }
}

/// Scores disease patterns against a panel.
pub struct PatternMatcher<'a> {
    patterns: &'a [DiseasePattern],
    min_score: f64,
}

impl<'a> PatternMatcher<'a> {
    pub fn new(patterns: &'a [DiseasePattern], min_score: f64) -> Self {
        Self { patterns, min_score }
    }

    pub fn pattern(&self, name: &str) -> Option<&'a DiseasePattern> {
        self.patterns.iter().find(|p| p.name == name)
    }

    /// Best pattern for the panel, or the undetermined sentinel.
    pub fn match_panel(&self, panel: &LabPanel, risk_indicators: &[String]) -> MatchResult {
        let candidates = self.score_all(panel, risk_indicators);
        let result = select_best(candidates, Some(self.min_score));

        debug!(
            condition = %result.condition,
            score = result.score,
            "Matched lab pattern"
        );

        result
    }

    /// Score every pattern, in pattern order.
    pub fn score_all(
        &self,
        panel: &LabPanel,
        risk_indicators: &[String],
    ) -> Vec<ScoredCandidate<LabScoreBreakdown>> {
        let text = panel.combined_text();
        let indicators: Vec<String> = risk_indicators.iter().map(|i| i.to_lowercase()).collect();

        self.patterns
            .iter()
            .map(|pattern| {
                let breakdown = score_pattern(pattern, &text, &indicators, panel);
                ScoredCandidate {
                    condition: pattern.name.to_string(),
                    score: breakdown.total(),
                    breakdown,
                }
            })
            .collect()
    }
}

impl Default for PatternMatcher<'static> {
    fn default() -> Self {
        Self::new(DISEASE_PATTERNS, MIN_PATTERN_SCORE)
    }
}

fn score_pattern(
    pattern: &DiseasePattern,
    text: &str,
    indicators: &[String],
    panel: &LabPanel,
) -> LabScoreBreakdown {
    let keyword_hits = pattern.keywords.iter().filter(|k| text.contains(*k)).count();

    let indicator_hits = pattern
        .lab_indicators
        .iter()
        .filter(|lab_indicator| indicators.iter().any(|i| i.contains(*lab_indicator)))
        .count();

    let lab_hits = panel
        .recognized_labs()
        .filter(|(_, keyword)| pattern.keywords.iter().any(|k| keyword.contains(k)))
        .count();

    LabScoreBreakdown {
        keyword_score: keyword_hits as f64 * KEYWORD_POINTS,
        indicator_score: indicator_hits as f64 * INDICATOR_POINTS,
        lab_score: lab_hits as f64 * LAB_POINTS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel::LabValue;

    fn diabetic_panel() -> LabPanel {
        LabPanel::new(vec![
            LabValue::new("Glucose", 180.0, "mg/dL"),
            LabValue::new("HbA1c", 8.1, "%"),
        ])
        .with_terms(&["elevated"])
    }

    #[test]
    fn test_diabetes_breakdown() {
        let matcher = PatternMatcher::default();
        let scores = matcher.score_all(&diabetic_panel(), &[]);
        let diabetes = scores
            .iter()
            .find(|c| c.condition == "Diabetes Mellitus")
            .unwrap();

        // glucose, hba1c, elevated
        assert_eq!(diabetes.breakdown.keyword_score, 45.0);
        assert_eq!(diabetes.breakdown.indicator_score, 0.0);
        assert_eq!(diabetes.breakdown.lab_score, 20.0);
        assert_eq!(diabetes.score, 65.0);
    }

    #[test]
    fn test_indicator_points() {
        let panel = LabPanel::new(vec![LabValue::new("WBC", 16500.0, "/uL")])
            .with_terms(&["consolidation", "lung", "chest"]);
        let indicators = vec!["Critically elevated WBC".to_string()];

        let result = PatternMatcher::default().match_panel(&panel, &indicators);
        assert_eq!(result.condition, "Pneumonia");
        assert_eq!(result.score, 70.0);
    }

    #[test]
    fn test_ties_go_to_pattern_order() {
        // Diabetes Mellitus and Hyperlipidemia both score 30
        let panel = LabPanel::default().with_terms(&["elevated", "high"]);
        let scores = PatternMatcher::default().score_all(&panel, &[]);
        let best = scores.iter().map(|c| c.score).fold(0.0, f64::max);
        let first = scores.iter().find(|c| c.score == best).unwrap();
        assert_eq!(first.condition, "Diabetes Mellitus");

        let result = PatternMatcher::new(DISEASE_PATTERNS, 20.0).match_panel(&panel, &[]);
        assert_eq!(result.condition, "Diabetes Mellitus");
    }

    #[test]
    fn test_below_minimum_is_undetermined() {
        let panel = LabPanel::new(vec![LabValue::new("Sodium", 140.0, "mmol/L")]);
        let result = PatternMatcher::default().match_panel(&panel, &[]);
        assert!(result.is_undetermined());
    }

    #[test]
    fn test_score_of_exactly_minimum_is_undetermined() {
        // Anemia scores 15 on "low" alone
        let low_only = LabPanel::default().with_terms(&["low"]);
        assert!(PatternMatcher::default().match_panel(&low_only, &[]).is_undetermined());

        let matcher = PatternMatcher::new(DISEASE_PATTERNS, 15.0);
        assert!(matcher.match_panel(&low_only, &[]).is_undetermined());
    }
}
