//! Lab report assembly: risk, confidence, urgency, findings and advice.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use triage_core::engine::follow_up_days;
use triage_core::models::{
    Priority, Recommendation, RecommendationCategory, RecommendationSet, UrgencyTier,
};
use triage_core::{EngineConfig, EngineResult};

use crate::panel::{parse_lab_panel, LabPanel};
use crate::patterns::{
    PatternMatcher, DISEASE_PATTERNS, MIN_PATTERN_SCORE, UNDETERMINED_BASE_RISK,
    UNDETERMINED_CONFIDENCE_BOOST,
};
use crate::reference::{analyze_lab_values, LabAnalysis, LabFinding};

/// Indicator vocabulary that raises risk.
const CRITICAL_TERMS: &[&str] = &["critical", "severe", "acute", "emergency", "high", "elevated"];

const MAX_KEY_FINDINGS: usize = 5;
const MAX_ABNORMAL_LABS: usize = 3;
/// Text length at which text quality saturates.
const FULL_TEXT_LENGTH: f64 = 500.0;
/// Lab count at which entity coverage saturates.
const FULL_LAB_COUNT: f64 = 5.0;

const DEFAULT_FINDINGS: &[&str] = &[
    "Medical document processed successfully",
    "Refer to extracted text for detailed information",
    "Consult healthcare provider for interpretation",
];

/// Risk from base plus critical-value indicators, clamped to 1..=100.
pub fn lab_risk_score(base_risk: u32, risk_indicators: &[String]) -> u32 {
    let critical = risk_indicators
        .iter()
        .filter(|indicator| {
            let lower = indicator.to_lowercase();
            CRITICAL_TERMS.iter().any(|t| lower.contains(t))
        })
        .count() as u32;

    let mut score = base_risk + critical * 10;
    if risk_indicators.len() > 2 {
        score += 5 * risk_indicators.len() as u32;
    }
    score.clamp(1, 100)
}

/// Blend of pattern boost, text quality and lab coverage, in 0.1..=1.0.
pub fn lab_confidence(confidence_boost: f64, source_text_length: usize, lab_count: usize) -> f64 {
    let text_quality = if source_text_length == 0 {
        0.1
    } else {
        (source_text_length as f64 / FULL_TEXT_LENGTH).min(1.0)
    };
    let coverage = (lab_count as f64 / FULL_LAB_COUNT).min(1.0);

    (confidence_boost * 0.6 + text_quality * 0.2 + coverage * 0.2).clamp(0.1, 1.0)
}

/// Headline findings for a panel, at most five.
pub fn key_findings(panel: &LabPanel, analysis: &LabAnalysis) -> Vec<String> {
    let mut findings: Vec<String> = analysis
        .abnormal()
        .take(MAX_ABNORMAL_LABS)
        .map(LabFinding::to_string)
        .collect();

    let imaging = panel.imaging_terms();
    if !imaging.is_empty() {
        findings.push(format!("Imaging findings: {}", imaging[..imaging.len().min(2)].join(", ")));
    }

    let clinical = panel.significant_clinical_terms();
    if !clinical.is_empty() {
        findings.push(format!("Clinical findings: {}", clinical[..clinical.len().min(2)].join(", ")));
    }

    findings.extend(analysis.risk_indicators.iter().take(2).cloned());

    if findings.is_empty() {
        findings = DEFAULT_FINDINGS.iter().map(|s| s.to_string()).collect();
    }
    findings.truncate(MAX_KEY_FINDINGS);
    findings
}

fn condition_advice(condition: &str) -> Option<&'static [&'static str]> {
    let texts: &'static [&'static str] = match condition {
        "Myocardial Infarction" => &[
            "Seek immediate emergency medical attention",
            "Call 911 or go to nearest emergency room",
            "Take aspirin if not allergic (chew 325mg)",
            "Avoid physical exertion",
            "Monitor for worsening chest pain or shortness of breath",
        ],
        "Pneumonia" => &[
            "Consult healthcare provider immediately",
            "Rest and avoid strenuous activities",
            "Stay well-hydrated with clear fluids",
            "Monitor temperature and breathing",
            "Consider chest X-ray for confirmation",
        ],
        "Diabetes Mellitus" => &[
            "Schedule appointment with healthcare provider soon",
            "Monitor blood glucose levels regularly",
            "Follow diabetic diet guidelines",
            "Increase physical activity as tolerated",
            "Consider diabetes education classes",
        ],
        "Kidney Disease" => &[
            "Consult nephrologist or primary care provider",
            "Monitor blood pressure regularly",
            "Limit sodium and protein intake",
            "Stay well-hydrated unless restricted",
            "Regular kidney function monitoring needed",
        ],
        _ => return None,
    };
    Some(texts)
}

fn risk_band_advice(risk_score: u32) -> &'static [&'static str] {
    if risk_score >= 80 {
        &[
            "Seek immediate medical attention",
            "Contact healthcare provider today",
            "Monitor symptoms closely",
            "Do not ignore these findings",
            "Prepare list of current medications",
        ]
    } else if risk_score >= 60 {
        &[
            "Schedule appointment with healthcare provider within 1-2 days",
            "Monitor symptoms and keep symptom diary",
            "Follow any existing treatment plans",
            "Stay hydrated and rest as needed",
            "Contact doctor if symptoms worsen",
        ]
    } else {
        &[
            "Follow up with healthcare provider routinely",
            "Monitor these findings over time",
            "Maintain healthy lifestyle habits",
            "Keep records of these results",
            "Discuss findings at next medical appointment",
        ]
    }
}

/// Condition advice when the condition has any, else advice for the risk band.
pub fn lab_recommendations(
    condition: &str,
    risk_score: u32,
    urgency: UrgencyTier,
    cap: usize,
) -> RecommendationSet {
    let priority = match urgency {
        UrgencyTier::Emergency | UrgencyTier::Urgent => Priority::High,
        UrgencyTier::Routine => Priority::Medium,
        UrgencyTier::Monitoring => Priority::Low,
    };
    let (texts, category) = match condition_advice(condition) {
        Some(texts) => (texts, RecommendationCategory::FollowUp),
        None => (risk_band_advice(risk_score), RecommendationCategory::Triage),
    };

    let mut set = RecommendationSet::new();
    for text in texts {
        set.push_unique(Recommendation::new(*text, priority, category));
    }
    set.truncate(cap);
    set
}

/// Full analysis of one lab panel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabReport {
    pub condition: String,
    /// Confidence (0.1-1.0)
    pub confidence: f64,
    pub risk_score: u32,
    pub urgency: UrgencyTier,
    pub follow_up_days: Option<u32>,
    pub key_findings: Vec<String>,
    pub recommendations: RecommendationSet,
    pub lab_findings: Vec<LabFinding>,
    pub risk_indicators: Vec<String>,
}

impl LabReport {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Analyzes lab panels with the shared engine configuration.
#[derive(Debug, Clone)]
pub struct LabAnalyzer {
    config: EngineConfig,
}

impl Default for LabAnalyzer {
    fn default() -> Self {
        Self {
            config: EngineConfig::default(),
        }
    }
}

impl LabAnalyzer {
    pub fn new(config: EngineConfig) -> EngineResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn matcher(&self) -> PatternMatcher<'static> {
        PatternMatcher::new(
            DISEASE_PATTERNS,
            self.config.min_match_score.unwrap_or(MIN_PATTERN_SCORE),
        )
    }

    pub fn analyze(&self, panel: &LabPanel) -> LabReport {
        let lab_count = panel.recognized_labs().count();
        if lab_count == 0 {
            warn!(labs = panel.lab_values.len(), "No recognized labs in panel");
        }

        let analysis = analyze_lab_values(&panel.lab_values);
        let matcher = self.matcher();
        let matched = matcher.match_panel(panel, &analysis.risk_indicators);

        let (base_risk, boost) = match matcher.pattern(&matched.condition) {
            Some(pattern) => (pattern.base_risk, pattern.confidence_boost),
            None => (UNDETERMINED_BASE_RISK, UNDETERMINED_CONFIDENCE_BOOST),
        };

        let risk_score = lab_risk_score(base_risk, &analysis.risk_indicators);
        let urgency = self.config.urgency_thresholds.tier_for_score(risk_score);
        let confidence = lab_confidence(boost, panel.source_text_length, lab_count);

        debug!(
            condition = %matched.condition,
            risk_score,
            urgency = %urgency,
            "Analyzed lab panel"
        );

        LabReport {
            key_findings: key_findings(panel, &analysis),
            recommendations: lab_recommendations(
                &matched.condition,
                risk_score,
                urgency,
                self.config.recommendation_cap,
            ),
            condition: matched.condition,
            confidence,
            risk_score,
            urgency,
            follow_up_days: follow_up_days(urgency, risk_score),
            lab_findings: analysis.findings,
            risk_indicators: analysis.risk_indicators,
        }
    }

    /// Parse extractor output and analyze it.
    pub fn analyze_json(&self, json: &str) -> anyhow::Result<LabReport> {
        let panel = parse_lab_panel(json).context("Failed to parse lab panel")?;
        Ok(self.analyze(&panel))
    }
}

/// Analyze extractor output with the default configuration.
pub fn analyze_panel_json(json: &str) -> anyhow::Result<LabReport> {
    LabAnalyzer::default().analyze_json(json)
}
