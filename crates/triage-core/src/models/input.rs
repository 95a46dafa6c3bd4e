//! Normalized patient input.
//!
//! Free-text normalization (spelling, synonyms, tokenization) happens upstream.
//! Everything here is already canonical: buckets are closed enums and symptom
//! labels use the canonical UI spelling.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Oldest age accepted as valid input.
pub const MAX_AGE: u32 = 120;

/// A bucket label that does not match any canonical value.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("unrecognized {kind} label: {value:?}")]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub value: String,
}

/// Find the variant whose canonical label matches `s` (trimmed, case-insensitive).
fn parse_label<T: Copy>(
    kind: &'static str,
    s: &str,
    all: &[T],
    label: fn(T) -> &'static str,
) -> Result<T, ParseLabelError> {
    let needle = s.trim();
    all.iter()
        .copied()
        .find(|v| label(*v).eq_ignore_ascii_case(needle))
        .ok_or_else(|| ParseLabelError {
            kind,
            value: s.to_string(),
        })
}

/// How long the symptoms have been present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DurationBucket {
    #[serde(rename = "Less than 24 hours")]
    LessThan24Hours,
    #[serde(rename = "1-3 days")]
    OneToThreeDays,
    #[serde(rename = "4-7 days")]
    FourToSevenDays,
    #[serde(rename = "1-2 weeks")]
    OneToTwoWeeks,
    #[serde(rename = "More than 2 weeks")]
    MoreThanTwoWeeks,
}

impl DurationBucket {
    pub const ALL: [DurationBucket; 5] = [
        DurationBucket::LessThan24Hours,
        DurationBucket::OneToThreeDays,
        DurationBucket::FourToSevenDays,
        DurationBucket::OneToTwoWeeks,
        DurationBucket::MoreThanTwoWeeks,
    ];

    /// Canonical UI label.
    pub fn label(self) -> &'static str {
        match self {
            DurationBucket::LessThan24Hours => "Less than 24 hours",
            DurationBucket::OneToThreeDays => "1-3 days",
            DurationBucket::FourToSevenDays => "4-7 days",
            DurationBucket::OneToTwoWeeks => "1-2 weeks",
            DurationBucket::MoreThanTwoWeeks => "More than 2 weeks",
        }
    }

    /// Representative day count used by the condition matcher.
    pub fn days(self) -> f64 {
        match self {
            DurationBucket::LessThan24Hours => 1.0,
            DurationBucket::OneToThreeDays => 3.0,
            DurationBucket::FourToSevenDays => 7.0,
            DurationBucket::OneToTwoWeeks => 14.0,
            DurationBucket::MoreThanTwoWeeks => 30.0,
        }
    }
}

impl fmt::Display for DurationBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DurationBucket {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label("duration", s, &Self::ALL, Self::label)
    }
}

/// Self-reported pain level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PainBucket {
    #[serde(rename = "No pain (0/10)")]
    NoPain,
    #[serde(rename = "Mild pain (1-3/10)")]
    Mild,
    #[serde(rename = "Moderate pain (4-6/10)")]
    Moderate,
    #[serde(rename = "Severe pain (7-8/10)")]
    Severe,
    #[serde(rename = "Extreme pain (9-10/10)")]
    Extreme,
}

impl PainBucket {
    pub const ALL: [PainBucket; 5] = [
        PainBucket::NoPain,
        PainBucket::Mild,
        PainBucket::Moderate,
        PainBucket::Severe,
        PainBucket::Extreme,
    ];

    /// Canonical UI label.
    pub fn label(self) -> &'static str {
        match self {
            PainBucket::NoPain => "No pain (0/10)",
            PainBucket::Mild => "Mild pain (1-3/10)",
            PainBucket::Moderate => "Moderate pain (4-6/10)",
            PainBucket::Severe => "Severe pain (7-8/10)",
            PainBucket::Extreme => "Extreme pain (9-10/10)",
        }
    }

    /// Midpoint of the bucket on the 0-10 scale.
    pub fn midpoint(self) -> f64 {
        match self {
            PainBucket::NoPain => 0.0,
            PainBucket::Mild => 2.0,
            PainBucket::Moderate => 5.0,
            PainBucket::Severe => 7.5,
            PainBucket::Extreme => 9.5,
        }
    }

    /// Severe or extreme.
    pub fn is_high(self) -> bool {
        self >= PainBucket::Severe
    }
}

impl fmt::Display for PainBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PainBucket {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label("pain level", s, &Self::ALL, Self::label)
    }
}

/// Current medication use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MedicationCategory {
    #[serde(rename = "No medications")]
    NoMedications,
    #[serde(rename = "Over-the-counter pain relievers")]
    OverTheCounter,
    #[serde(rename = "Prescription medications")]
    Prescription,
    #[serde(rename = "Home remedies only")]
    HomeRemedies,
    #[serde(rename = "Multiple medications")]
    Multiple,
}

impl MedicationCategory {
    pub const ALL: [MedicationCategory; 5] = [
        MedicationCategory::NoMedications,
        MedicationCategory::OverTheCounter,
        MedicationCategory::Prescription,
        MedicationCategory::HomeRemedies,
        MedicationCategory::Multiple,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MedicationCategory::NoMedications => "No medications",
            MedicationCategory::OverTheCounter => "Over-the-counter pain relievers",
            MedicationCategory::Prescription => "Prescription medications",
            MedicationCategory::HomeRemedies => "Home remedies only",
            MedicationCategory::Multiple => "Multiple medications",
        }
    }
}

impl fmt::Display for MedicationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MedicationCategory {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label("medication", s, &Self::ALL, Self::label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
    #[serde(rename = "Not specified")]
    Unknown,
}

impl Gender {
    pub const ALL: [Gender; 4] = [Gender::Male, Gender::Female, Gender::Other, Gender::Unknown];

    pub fn label(self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
            Gender::Unknown => "Not specified",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Gender {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label("gender", s, &Self::ALL, Self::label)
    }
}

/// Coded additional symptom, as consumed by the condition matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SymptomCode {
    Fever,
    Headache,
    Nausea,
    Fatigue,
    Dizziness,
    #[serde(rename = "Shortness of breath")]
    ShortnessOfBreath,
    #[serde(rename = "Chest pain")]
    ChestPain,
    #[serde(rename = "Abdominal pain")]
    AbdominalPain,
}

impl SymptomCode {
    pub const ALL: [SymptomCode; 8] = [
        SymptomCode::Fever,
        SymptomCode::Headache,
        SymptomCode::Nausea,
        SymptomCode::Fatigue,
        SymptomCode::Dizziness,
        SymptomCode::ShortnessOfBreath,
        SymptomCode::ChestPain,
        SymptomCode::AbdominalPain,
    ];

    /// Used when no recognizable additional symptom was supplied.
    pub const DEFAULT: SymptomCode = SymptomCode::Fatigue;

    pub fn label(self) -> &'static str {
        match self {
            SymptomCode::Fever => "Fever",
            SymptomCode::Headache => "Headache",
            SymptomCode::Nausea => "Nausea",
            SymptomCode::Fatigue => "Fatigue",
            SymptomCode::Dizziness => "Dizziness",
            SymptomCode::ShortnessOfBreath => "Shortness of breath",
            SymptomCode::ChestPain => "Chest pain",
            SymptomCode::AbdominalPain => "Abdominal pain",
        }
    }

    /// Numeric code (1-8).
    pub fn code(self) -> u8 {
        match self {
            SymptomCode::Fever => 1,
            SymptomCode::Headache => 2,
            SymptomCode::Nausea => 3,
            SymptomCode::Fatigue => 4,
            SymptomCode::Dizziness => 5,
            SymptomCode::ShortnessOfBreath => 6,
            SymptomCode::ChestPain => 7,
            SymptomCode::AbdominalPain => 8,
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        label.parse().ok()
    }
}

impl fmt::Display for SymptomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SymptomCode {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_label("symptom", s, &Self::ALL, Self::label)
    }
}

/// Already-normalized structured input for one assessment.
///
/// Deserialization goes through the builder, so decoded input holds the
/// same guarantees as built input.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(from = "RawNormalizedInput")]
pub struct NormalizedInput {
    /// Primary concern text
    pub primary_concern: String,
    pub duration: DurationBucket,
    pub pain: PainBucket,
    /// Additional symptom labels, unique, first-seen order kept
    pub additional_symptoms: Vec<String>,
    pub medication: MedicationCategory,
    /// Age in years, `None` when missing or invalid
    pub age: Option<u32>,
    pub gender: Gender,
    /// Free-form comorbidity names
    pub medical_history: Vec<String>,
}

/// Wire shape of [`NormalizedInput`] before the builder checks run.
#[derive(Deserialize)]
struct RawNormalizedInput {
    primary_concern: String,
    duration: DurationBucket,
    pain: PainBucket,
    #[serde(default)]
    additional_symptoms: Vec<String>,
    medication: MedicationCategory,
    #[serde(default)]
    age: Option<u32>,
    gender: Gender,
    #[serde(default)]
    medical_history: Vec<String>,
}

impl From<RawNormalizedInput> for NormalizedInput {
    fn from(raw: RawNormalizedInput) -> Self {
        NormalizedInput::new(raw.primary_concern)
            .with_duration(raw.duration)
            .with_pain(raw.pain)
            .with_symptoms(raw.additional_symptoms)
            .with_medication(raw.medication)
            .with_age(raw.age)
            .with_gender(raw.gender)
            .with_history(raw.medical_history)
    }
}

impl NormalizedInput {
    /// Create an input with the documented defaults for every optional field.
    pub fn new(primary_concern: impl Into<String>) -> Self {
        Self {
            primary_concern: primary_concern.into(),
            duration: DurationBucket::FourToSevenDays,
            pain: PainBucket::NoPain,
            additional_symptoms: Vec::new(),
            medication: MedicationCategory::NoMedications,
            age: None,
            gender: Gender::Unknown,
            medical_history: Vec::new(),
        }
    }

    pub fn with_duration(mut self, duration: DurationBucket) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_pain(mut self, pain: PainBucket) -> Self {
        self.pain = pain;
        self
    }

    /// Add additional symptoms, skipping case-insensitive duplicates and blanks.
    pub fn with_symptoms<I, S>(mut self, symptoms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for symptom in symptoms {
            let symptom: String = symptom.into();
            let trimmed = symptom.trim();
            if trimmed.is_empty() || self.has_symptom(trimmed) {
                continue;
            }
            self.additional_symptoms.push(trimmed.to_string());
        }
        self
    }

    pub fn with_medication(mut self, medication: MedicationCategory) -> Self {
        self.medication = medication;
        self
    }

    /// Set the age; values above [`MAX_AGE`] are discarded.
    pub fn with_age(mut self, age: Option<u32>) -> Self {
        self.age = match age {
            Some(a) if a > MAX_AGE => {
                tracing::warn!(age = a, "discarding out-of-range age");
                None
            }
            other => other,
        };
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_history<I, S>(mut self, history: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.medical_history.extend(
            history
                .into_iter()
                .map(Into::into)
                .filter(|h: &String| !h.trim().is_empty()),
        );
        self
    }

    /// Check whether a symptom label is present (case-insensitive).
    pub fn has_symptom(&self, label: &str) -> bool {
        self.additional_symptoms
            .iter()
            .any(|s| s.eq_ignore_ascii_case(label))
    }

    /// Symptom code of the first supplied additional symptom.
    ///
    /// Only the first symptom feeds the matcher. Missing or unrecognized
    /// labels fall back to [`SymptomCode::DEFAULT`].
    pub fn primary_symptom_code(&self) -> SymptomCode {
        self.additional_symptoms
            .first()
            .and_then(|s| SymptomCode::from_label(s))
            .unwrap_or(SymptomCode::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_labels_parse() {
        for bucket in DurationBucket::ALL {
            assert_eq!(bucket.label().parse::<DurationBucket>().unwrap(), bucket);
        }
        for bucket in PainBucket::ALL {
            assert_eq!(bucket.label().parse::<PainBucket>().unwrap(), bucket);
        }
        assert_eq!(
            " severe pain (7-8/10) ".parse::<PainBucket>().unwrap(),
            PainBucket::Severe
        );
        assert_eq!(
            "over-the-counter pain relievers".parse::<MedicationCategory>().unwrap(),
            MedicationCategory::OverTheCounter
        );
        assert_eq!("Not specified".parse::<Gender>().unwrap(), Gender::Unknown);
    }

    #[test]
    fn test_unknown_label_rejected() {
        let err = "a while".parse::<DurationBucket>().unwrap_err();
        assert_eq!(err.kind, "duration");
        assert_eq!(err.value, "a while");
    }

    #[test]
    fn test_bucket_ordering() {
        assert!(PainBucket::NoPain < PainBucket::Extreme);
        assert!(DurationBucket::LessThan24Hours < DurationBucket::MoreThanTwoWeeks);
        assert!(PainBucket::Severe.is_high());
        assert!(!PainBucket::Moderate.is_high());
    }

    #[test]
    fn test_pain_midpoints() {
        let midpoints: Vec<f64> = PainBucket::ALL.iter().map(|p| p.midpoint()).collect();
        assert_eq!(midpoints, vec![0.0, 2.0, 5.0, 7.5, 9.5]);
    }

    #[test]
    fn test_symptoms_deduplicated_in_order() {
        let input = NormalizedInput::new("test").with_symptoms([
            "Chest pain",
            "Fever",
            "chest pain",
            "  ",
            "Fever",
        ]);
        assert_eq!(input.additional_symptoms, vec!["Chest pain", "Fever"]);
        assert_eq!(input.primary_symptom_code(), SymptomCode::ChestPain);
    }

    #[test]
    fn test_primary_symptom_defaults_to_fatigue() {
        let input = NormalizedInput::new("test");
        assert_eq!(input.primary_symptom_code(), SymptomCode::Fatigue);

        let input = NormalizedInput::new("test").with_symptoms(["Rash"]);
        assert_eq!(input.primary_symptom_code(), SymptomCode::Fatigue);
    }

    #[test]
    fn test_invalid_age_discarded() {
        assert_eq!(NormalizedInput::new("x").with_age(Some(121)).age, None);
        assert_eq!(NormalizedInput::new("x").with_age(Some(120)).age, Some(120));
        assert_eq!(NormalizedInput::new("x").with_age(Some(0)).age, Some(0));
    }

    #[test]
    fn test_deserialize_applies_builder_rules() {
        let json = r#"{
            "primary_concern": "throbbing headache",
            "duration": "1-3 days",
            "pain": "Severe pain (7-8/10)",
            "additional_symptoms": ["Chest pain", "Chest pain", "chest pain", " "],
            "medication": "No medications",
            "age": 500,
            "gender": "Not specified",
            "medical_history": ["Diabetes", ""]
        }"#;

        let input: NormalizedInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.additional_symptoms, vec!["Chest pain"]);
        assert_eq!(input.age, None);
        assert_eq!(input.medical_history, vec!["Diabetes"]);

        let round_trip: NormalizedInput =
            serde_json::from_str(&serde_json::to_string(&input).unwrap()).unwrap();
        assert_eq!(round_trip, input);
    }

    #[test]
    fn test_serde_uses_labels() {
        let json = serde_json::to_string(&DurationBucket::OneToTwoWeeks).unwrap();
        assert_eq!(json, "\"1-2 weeks\"");
        let pain: PainBucket = serde_json::from_str("\"Extreme pain (9-10/10)\"").unwrap();
        assert_eq!(pain, PainBucket::Extreme);
    }
}
