//! Golden tests for lab panel analysis.

use triage_core::models::UrgencyTier;
use triage_core::EngineConfig;
use triage_labs::{analyze_panel_json, LabAnalyzer, LabPanel, LabValue};

/// Test case for a full lab analysis.
struct GoldenCase {
    id: &'static str,
    labs: Vec<LabValue>,
    terms: &'static [&'static str],
    expected_condition: &'static str,
    expected_risk: u32,
    expected_urgency: UrgencyTier,
    expected_follow_up: Option<u32>,
    expected_first_recommendation: &'static str,
}

fn get_golden_cases() -> Vec<GoldenCase> {
    vec![
        GoldenCase {
            id: "diabetic-panel",
            labs: vec![
                LabValue::new("Glucose", 180.0, "mg/dL"),
                LabValue::new("HbA1c", 8.1, "%"),
            ],
            terms: &["elevated"],
            expected_condition: "Diabetes Mellitus",
            expected_risk: 90,
            expected_urgency: UrgencyTier::Emergency,
            expected_follow_up: None,
            expected_first_recommendation: "Schedule appointment with healthcare provider soon",
        },
        GoldenCase {
            id: "pneumonia-xray-and-wbc",
            labs: vec![LabValue::new("WBC", 16500.0, "/uL")],
            terms: &["consolidation", "lung", "chest", "acute"],
            expected_condition: "Pneumonia",
            expected_risk: 75,
            expected_urgency: UrgencyTier::Urgent,
            expected_follow_up: Some(1),
            expected_first_recommendation: "Consult healthcare provider immediately",
        },
        GoldenCase {
            id: "normal-hemoglobin-anemia-pattern",
            labs: vec![LabValue::new("Hemoglobin", 13.5, "g/dL")],
            terms: &[],
            expected_condition: "Anemia",
            expected_risk: 40,
            expected_urgency: UrgencyTier::Routine,
            expected_follow_up: Some(14),
            expected_first_recommendation: "Follow up with healthcare provider routinely",
        },
        GoldenCase {
            id: "unrecognized-panel",
            labs: vec![LabValue::new("Sodium", 140.0, "mmol/L")],
            terms: &[],
            expected_condition: "Undetermined Condition",
            expected_risk: 30,
            expected_urgency: UrgencyTier::Monitoring,
            expected_follow_up: Some(14),
            expected_first_recommendation: "Follow up with healthcare provider routinely",
        },
    ]
}

#[test]
fn test_golden_cases() {
    let analyzer = LabAnalyzer::default();

    for case in get_golden_cases() {
        let panel = LabPanel::new(case.labs.clone()).with_terms(case.terms);
        let report = analyzer.analyze(&panel);

        assert_eq!(
            report.condition, case.expected_condition,
            "Case {}: condition mismatch", case.id
        );
        assert_eq!(
            report.risk_score, case.expected_risk,
            "Case {}: risk mismatch", case.id
        );
        assert_eq!(
            report.urgency, case.expected_urgency,
            "Case {}: urgency mismatch", case.id
        );
        assert_eq!(
            report.follow_up_days, case.expected_follow_up,
            "Case {}: follow-up mismatch", case.id
        );
        assert_eq!(
            report.recommendations.texts()[0], case.expected_first_recommendation,
            "Case {}: recommendation mismatch", case.id
        );
        assert!(
            !report.key_findings.is_empty() && report.key_findings.len() <= 5,
            "Case {}: key finding count {}", case.id, report.key_findings.len()
        );
    }
}

#[test]
fn test_diabetic_key_findings() {
    let panel = LabPanel::new(get_golden_cases()[0].labs.clone()).with_terms(&["elevated"]);
    let report = LabAnalyzer::default().analyze(&panel);

    assert_eq!(
        report.key_findings,
        vec![
            "Glucose: 180 mg/dL (HIGH - Normal: 70-100)",
            "HbA1c: 8.1 % (HIGH - Normal: 0-5.7)",
            "Clinical findings: elevated",
            "Critically elevated Glucose",
            "Critically elevated HbA1c",
        ]
    );
    assert!((report.confidence - 0.628).abs() < 1e-9);
}

#[test]
fn test_undetermined_uses_default_findings() {
    let panel = LabPanel::new(vec![LabValue::new("Sodium", 140.0, "mmol/L")]);
    let report = LabAnalyzer::default().analyze(&panel);

    assert_eq!(report.key_findings[0], "Medical document processed successfully");
    // 0.5 * 0.6 + 0.1 * 0.2 + 0.2 * 0.2
    assert!((report.confidence - 0.36).abs() < 1e-9);
}

#[test]
fn test_custom_thresholds_and_cap() {
    let config: EngineConfig = EngineConfig::from_json(
        r#"{"recommendation_cap": 2, "urgency_thresholds": {"emergency": 95, "urgent": 85, "routine": 50}}"#,
    )
    .unwrap();
    let analyzer = LabAnalyzer::new(config).unwrap();
    let panel = LabPanel::new(get_golden_cases()[0].labs.clone()).with_terms(&["elevated"]);
    let report = analyzer.analyze(&panel);

    assert_eq!(report.risk_score, 90);
    assert_eq!(report.urgency, UrgencyTier::Urgent);
    assert_eq!(report.follow_up_days, Some(1));
    assert_eq!(report.recommendations.len(), 2);
}

#[test]
fn test_json_entry_point() {
    let output = r#"Here is the panel:
    {"lab_values": [{"name": "WBC", "value": 16500, "unit": "/uL"}],
     "terms": ["consolidation", "lung", "chest", "acute"],
     "source_text_length": 1200}"#;

    let report = analyze_panel_json(output).unwrap();
    assert_eq!(report.condition, "Pneumonia");
    // 0.85 * 0.6 + 1.0 * 0.2 + 0.2 * 0.2
    assert!((report.confidence - 0.75).abs() < 1e-9);

    let json = report.to_json().unwrap();
    assert!(json.contains("\"urgency\": \"urgent\""));
}

#[test]
fn test_json_terms_keep_findings_regardless_of_case() {
    let output = r#"{"lab_values": [{"name": "WBC", "value": 16500, "unit": "/uL"}],
     "terms": ["Consolidation", "Lung", "Acute"]}"#;

    let report = analyze_panel_json(output).unwrap();
    assert_eq!(
        report.key_findings,
        vec![
            "WBC: 16500 /uL (HIGH - Normal: 4500-11000)",
            "Imaging findings: consolidation",
            "Clinical findings: acute",
            "Critically elevated WBC",
        ]
    );
}
