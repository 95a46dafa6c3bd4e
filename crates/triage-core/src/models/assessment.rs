//! Matching and risk assessment results.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::input::NormalizedInput;
use super::recommendation::RecommendationSet;

/// Sentinel condition returned when nothing in the catalog is a credible match.
pub const UNDETERMINED_CONDITION: &str = "Undetermined Condition";

/// Risk factor reported on the fallback path.
pub const FALLBACK_RISK_FACTOR: &str = "Unable to calculate detailed risk factors";

/// Triage tier, ordered by increasing urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyTier {
    Monitoring,
    Routine,
    Urgent,
    Emergency,
}

impl UrgencyTier {
    pub fn as_str(self) -> &'static str {
        match self {
            UrgencyTier::Monitoring => "monitoring",
            UrgencyTier::Routine => "routine",
            UrgencyTier::Urgent => "urgent",
            UrgencyTier::Emergency => "emergency",
        }
    }
}

impl fmt::Display for UrgencyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Breakdown of how the symptom matcher scored one candidate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScoreBreakdown {
    /// Keyword coverage of the concern text (0-40)
    pub keyword_score: f64,
    /// First additional symptom is associated (0 or 25)
    pub symptom_score: f64,
    /// Pain level proximity (0-20)
    pub pain_score: f64,
    /// Duration proximity (0-15)
    pub duration_score: f64,
}

impl ScoreBreakdown {
    /// Sum of the sub-scores, capped at 100.
    pub fn total(&self) -> f64 {
        (self.keyword_score + self.symptom_score + self.pain_score + self.duration_score).min(100.0)
    }
}

/// One catalog entry scored against the input. Exists only while matching.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredCandidate<B> {
    pub condition: String,
    /// Total score (0-100)
    pub score: f64,
    pub breakdown: B,
}

/// Outcome of condition matching.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchResult {
    pub condition: String,
    /// Winning score (0-100)
    pub score: f64,
    /// `score / 100`
    pub confidence: f64,
}

impl MatchResult {
    pub fn new(condition: impl Into<String>, score: f64) -> Self {
        let score = score.clamp(0.0, 100.0);
        Self {
            condition: condition.into(),
            score,
            confidence: score / 100.0,
        }
    }

    pub fn undetermined() -> Self {
        Self::new(UNDETERMINED_CONDITION, 0.0)
    }

    pub fn is_undetermined(&self) -> bool {
        self.condition == UNDETERMINED_CONDITION
    }
}

/// Percentage-point contribution of each modifier, plus the untouched base risk.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RiskBreakdown {
    pub base_risk: f64,
    pub age_adjustment: f64,
    pub duration_adjustment: f64,
    pub severity_adjustment: f64,
    pub symptom_adjustment: f64,
    pub comorbidity_adjustment: f64,
    pub confidence_adjustment: f64,
}

impl RiskBreakdown {
    /// Named entries in a fixed order.
    pub fn entries(&self) -> [(&'static str, f64); 7] {
        [
            ("base_risk", self.base_risk),
            ("age_adjustment", self.age_adjustment),
            ("duration_adjustment", self.duration_adjustment),
            ("severity_adjustment", self.severity_adjustment),
            ("symptom_adjustment", self.symptom_adjustment),
            ("comorbidity_adjustment", self.comorbidity_adjustment),
            ("confidence_adjustment", self.confidence_adjustment),
        ]
    }
}

/// Risk assessment for one request. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RiskAssessment {
    /// Risk score (0-100)
    pub risk_score: u32,
    pub urgency: UrgencyTier,
    /// Days until follow-up; `None` means immediate care
    pub follow_up_days: Option<u32>,
    /// `None` on the fallback path
    pub breakdown: Option<RiskBreakdown>,
    /// At most five short strings
    pub risk_factors: Vec<String>,
}

impl RiskAssessment {
    /// The fixed safe assessment returned when calculation fails.
    pub fn fallback() -> Self {
        Self {
            risk_score: 50,
            urgency: UrgencyTier::Routine,
            follow_up_days: Some(7),
            breakdown: None,
            risk_factors: vec![FALLBACK_RISK_FACTOR.to_string()],
        }
    }
}

/// Either a computed assessment or the documented fallback.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AssessmentOutcome {
    Computed(RiskAssessment),
    Fallback {
        assessment: RiskAssessment,
        /// Why the computation failed
        reason: String,
    },
}

impl AssessmentOutcome {
    pub fn fallback(reason: impl Into<String>) -> Self {
        AssessmentOutcome::Fallback {
            assessment: RiskAssessment::fallback(),
            reason: reason.into(),
        }
    }

    pub fn assessment(&self) -> &RiskAssessment {
        match self {
            AssessmentOutcome::Computed(assessment) => assessment,
            AssessmentOutcome::Fallback { assessment, .. } => assessment,
        }
    }

    pub fn into_assessment(self) -> RiskAssessment {
        match self {
            AssessmentOutcome::Computed(assessment) => assessment,
            AssessmentOutcome::Fallback { assessment, .. } => assessment,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, AssessmentOutcome::Fallback { .. })
    }
}

/// Input to a full assessment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssessmentRequest {
    pub input: NormalizedInput,
    /// Condition already chosen by the caller; the matcher runs when absent
    pub matched_condition: Option<String>,
    /// Confidence for `matched_condition` (0.0 - 1.0)
    pub match_confidence: Option<f64>,
}

impl AssessmentRequest {
    pub fn new(input: NormalizedInput) -> Self {
        Self {
            input,
            matched_condition: None,
            match_confidence: None,
        }
    }

    pub fn with_condition(mut self, condition: impl Into<String>, confidence: Option<f64>) -> Self {
        self.matched_condition = Some(condition.into());
        self.match_confidence = confidence;
        self
    }
}

/// Everything the pipeline produces for one request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TriageReport {
    pub matched: MatchResult,
    pub outcome: AssessmentOutcome,
    pub recommendations: RecommendationSet,
}

impl TriageReport {
    pub fn assessment(&self) -> &RiskAssessment {
        self.outcome.assessment()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ordering() {
        assert!(UrgencyTier::Monitoring < UrgencyTier::Routine);
        assert!(UrgencyTier::Routine < UrgencyTier::Urgent);
        assert!(UrgencyTier::Urgent < UrgencyTier::Emergency);
    }

    #[test]
    fn test_score_breakdown_capped() {
        let breakdown = ScoreBreakdown {
            keyword_score: 40.0,
            symptom_score: 25.0,
            pain_score: 20.0,
            duration_score: 15.0,
        };
        assert_eq!(breakdown.total(), 100.0);

        let partial = ScoreBreakdown {
            keyword_score: 16.0,
            symptom_score: 0.0,
            pain_score: 18.5,
            duration_score: 12.0,
        };
        assert!((partial.total() - 46.5).abs() < 1e-9);
    }

    #[test]
    fn test_match_result_confidence() {
        let result = MatchResult::new("Migraine", 76.0);
        assert!((result.confidence - 0.76).abs() < 1e-9);
        assert!(!result.is_undetermined());
        assert!(MatchResult::undetermined().is_undetermined());
    }

    #[test]
    fn test_fallback_assessment() {
        let outcome = AssessmentOutcome::fallback("bad profile");
        assert!(outcome.is_fallback());

        let assessment = outcome.assessment();
        assert_eq!(assessment.risk_score, 50);
        assert_eq!(assessment.urgency, UrgencyTier::Routine);
        assert_eq!(assessment.follow_up_days, Some(7));
        assert!(assessment.breakdown.is_none());
        assert_eq!(assessment.risk_factors, vec![FALLBACK_RISK_FACTOR]);
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let json = serde_json::to_value(AssessmentOutcome::fallback("boom")).unwrap();
        assert_eq!(json["status"], "fallback");
        assert_eq!(json["reason"], "boom");
        assert_eq!(json["assessment"]["urgency"], "routine");
    }
}
