//! Property tests for lab panel analysis.

use proptest::prelude::*;

use triage_core::models::UrgencyTier;
use triage_labs::{LabAnalyzer, LabPanel, LabValue, IMAGING_TERMS, SIGNIFICANT_CLINICAL_TERMS};

const LAB_NAMES: &[&str] = &[
    "Glucose",
    "HDL Cholesterol",
    "Total Cholesterol",
    "Hemoglobin",
    "WBC",
    "Creatinine",
    "BUN",
    "HbA1c",
    "Troponin I",
    "TSH",
    "Sodium",
];

fn panel_strategy() -> impl Strategy<Value = LabPanel> {
    let lab = (prop::sample::select(LAB_NAMES.to_vec()), 0.0f64..20000.0)
        .prop_map(|(name, value)| LabValue::new(name, value, "u"));
    let terms: Vec<&str> = IMAGING_TERMS
        .iter()
        .chain(SIGNIFICANT_CLINICAL_TERMS)
        .copied()
        .chain(["lung", "chest", "heart", "liver"])
        .collect();

    (
        prop::collection::vec(lab, 0..8),
        prop::sample::subsequence(terms, 0..=6),
        0usize..3000,
    )
        .prop_map(|(labs, terms, length)| {
            LabPanel::new(labs)
                .with_terms(&terms)
                .with_source_text_length(length)
        })
}

proptest! {
    #[test]
    fn prop_report_bounds(panel in panel_strategy()) {
        let report = LabAnalyzer::default().analyze(&panel);

        prop_assert!((1..=100).contains(&report.risk_score));
        prop_assert!((0.1..=1.0).contains(&report.confidence));
        prop_assert!(!report.key_findings.is_empty() && report.key_findings.len() <= 5);
        prop_assert!(!report.recommendations.is_empty() && report.recommendations.len() <= 5);
        prop_assert_eq!(
            report.follow_up_days.is_none(),
            report.urgency == UrgencyTier::Emergency
        );
    }

    #[test]
    fn prop_analysis_is_deterministic(panel in panel_strategy()) {
        let analyzer = LabAnalyzer::default();
        prop_assert_eq!(analyzer.analyze(&panel), analyzer.analyze(&panel));
    }
}
