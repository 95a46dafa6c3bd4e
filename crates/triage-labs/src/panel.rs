//! Lab panels extracted from medical documents.
//!
//! Text extraction happens upstream; a panel arrives as already-labeled
//! numeric values plus whatever clinical or imaging vocabulary was found.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lab panel errors.
#[derive(Error, Debug)]
pub enum LabError {
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid panel format: {0}")]
    InvalidFormat(String),
}

pub type LabResult<T> = Result<T, LabError>;

/// Lab names the analyzer recognizes, in match order.
pub const LAB_KEYWORDS: &[&str] = &[
    "glucose", "cholesterol", "hdl", "ldl", "triglycerides", "creatinine", "bun", "hemoglobin",
    "hematocrit", "wbc", "rbc", "platelets", "sodium", "potassium", "chloride", "co2", "calcium",
    "magnesium", "phosphorus", "albumin", "protein", "bilirubin", "ast", "alt",
    "alkaline phosphatase", "ggt", "ldh", "ck", "troponin", "bnp", "prothrombin", "inr", "ptt",
    "fibrinogen", "hba1c", "psa", "thyroid", "tsh", "free t4", "t3", "cortisol", "vitamin d",
];

/// Imaging vocabulary reported as imaging findings.
pub const IMAGING_TERMS: &[&str] = &[
    "opacity", "consolidation", "infiltrate", "effusion", "pneumothorax", "cardiomegaly",
    "atelectasis", "nodule", "mass", "lesion", "fracture", "dislocation", "edema", "hemorrhage",
    "infarct", "stenosis", "occlusion", "aneurysm", "thrombosis", "embolism",
];

/// Clinical vocabulary significant enough to report.
pub const SIGNIFICANT_CLINICAL_TERMS: &[&str] = &["abnormal", "elevated", "decreased", "severe", "acute"];

/// One labeled lab measurement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabValue {
    pub name: String,
    pub value: f64,
    #[serde(default)]
    pub unit: String,
}

impl LabValue {
    pub fn new(name: impl Into<String>, value: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            unit: unit.into(),
        }
    }

    /// First recognized lab keyword contained in the name.
    pub fn keyword(&self) -> Option<&'static str> {
        let lower = self.name.to_lowercase();
        LAB_KEYWORDS.iter().copied().find(|k| lower.contains(k))
    }
}

/// Everything extracted from one document.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LabPanel {
    pub lab_values: Vec<LabValue>,
    /// Lowercase clinical, anatomical and imaging terms found in the document
    #[serde(default)]
    pub terms: Vec<String>,
    /// Length of the extracted text, used for confidence
    #[serde(default)]
    pub source_text_length: usize,
}

impl LabPanel {
    pub fn new(lab_values: Vec<LabValue>) -> Self {
        Self {
            lab_values,
            ..Self::default()
        }
    }

    pub fn with_terms(mut self, terms: &[&str]) -> Self {
        self.terms = terms.iter().map(|t| t.to_lowercase()).collect();
        self
    }

    pub fn with_source_text_length(mut self, length: usize) -> Self {
        self.source_text_length = length;
        self
    }

    /// Labs with a recognized keyword, paired with it.
    pub fn recognized_labs(&self) -> impl Iterator<Item = (&LabValue, &'static str)> {
        self.lab_values
            .iter()
            .filter_map(|lab| lab.keyword().map(|k| (lab, k)))
    }

    /// Lowercased text the pattern matcher searches.
    pub fn combined_text(&self) -> String {
        let mut parts: Vec<String> = self
            .recognized_labs()
            .map(|(lab, keyword)| format!("{} {} {}", lab.name, lab.unit, keyword))
            .collect();
        parts.extend(self.terms.iter().cloned());
        parts.join(" ").to_lowercase()
    }

    pub fn imaging_terms(&self) -> Vec<&str> {
        self.terms
            .iter()
            .map(String::as_str)
            .filter(|t| IMAGING_TERMS.iter().any(|v| v.eq_ignore_ascii_case(t)))
            .collect()
    }

    pub fn significant_clinical_terms(&self) -> Vec<&str> {
        self.terms
            .iter()
            .map(String::as_str)
            .filter(|t| SIGNIFICANT_CLINICAL_TERMS.iter().any(|v| v.eq_ignore_ascii_case(t)))
            .collect()
    }
}

/// Parse a lab panel from extractor output.
///
/// Surrounding prose is tolerated; the outermost JSON object is parsed.
pub fn parse_lab_panel(json: &str) -> LabResult<LabPanel> {
    let json_start = json
        .find('{')
        .ok_or_else(|| LabError::InvalidFormat("No JSON object found in input".into()))?;
    let json_end = json
        .rfind('}')
        .ok_or_else(|| LabError::InvalidFormat("No closing brace found in input".into()))?;
    if json_end < json_start {
        return Err(LabError::InvalidFormat("Closing brace precedes opening brace".into()));
    }

    let mut panel: LabPanel = serde_json::from_str(&json[json_start..=json_end])?;
    panel.terms = panel
        .terms
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();

    if let Some(bad) = panel.lab_values.iter().find(|l| !l.value.is_finite()) {
        return Err(LabError::InvalidFormat(format!("Non-finite value for {}", bad.name)));
    }

    Ok(panel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_surrounding_text() {
        let input = r#"Extracted panel:
        {"lab_values": [{"name": "Glucose", "value": 180, "unit": "mg/dL"}], "terms": ["elevated"]}
        end of output"#;

        let panel = parse_lab_panel(input).unwrap();
        assert_eq!(panel.lab_values.len(), 1);
        assert_eq!(panel.lab_values[0].value, 180.0);
        assert_eq!(panel.terms, vec!["elevated"]);
        assert_eq!(panel.source_text_length, 0);
    }

    #[test]
    fn test_parse_lowercases_terms() {
        let input = r#"{"lab_values": [], "terms": ["Consolidation", " Lung ", "ACUTE", ""]}"#;

        let panel = parse_lab_panel(input).unwrap();
        assert_eq!(panel.terms, vec!["consolidation", "lung", "acute"]);
        assert_eq!(panel.imaging_terms(), vec!["consolidation"]);
        assert_eq!(panel.significant_clinical_terms(), vec!["acute"]);
    }

    #[test]
    fn test_parse_rejects_missing_object() {
        assert!(matches!(
            parse_lab_panel("no json here"),
            Err(LabError::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_lab_panel("} backwards {"),
            Err(LabError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_parse_rejects_bad_json() {
        assert!(matches!(
            parse_lab_panel("{\"lab_values\": [oops]}"),
            Err(LabError::JsonParse(_))
        ));
    }

    #[test]
    fn test_keyword_first_match() {
        assert_eq!(LabValue::new("Fasting Glucose", 90.0, "mg/dL").keyword(), Some("glucose"));
        assert_eq!(LabValue::new("HbA1c", 6.0, "%").keyword(), Some("hba1c"));
        assert_eq!(LabValue::new("Mystery", 1.0, "").keyword(), None);
    }

    #[test]
    fn test_combined_text_skips_unrecognized_labs() {
        let panel = LabPanel::new(vec![
            LabValue::new("WBC", 16500.0, "/uL"),
            LabValue::new("Mystery", 1.0, ""),
        ])
        .with_terms(&["Consolidation", "lung"]);

        assert_eq!(panel.combined_text(), "wbc /ul wbc consolidation lung");
        assert_eq!(panel.imaging_terms(), vec!["consolidation"]);
    }
}
