//! Condition catalog models.

use serde::{Deserialize, Serialize};

use super::input::SymptomCode;

/// Inclusive numeric range used for pain and duration matching.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ValueRange {
    pub min: f64,
    pub max: f64,
}

impl ValueRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Distance to the nearer bound (0.0 when inside).
    pub fn distance(&self, value: f64) -> f64 {
        if self.contains(value) {
            return 0.0;
        }
        (value - self.min).abs().min((value - self.max).abs())
    }

    pub fn is_well_formed(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

/// Per-condition scaling of the age, duration, severity and comorbidity modifiers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RiskMultipliers {
    pub age: f64,
    pub duration: f64,
    pub severity: f64,
    pub comorbidity: f64,
}

impl RiskMultipliers {
    pub const fn new(age: f64, duration: f64, severity: f64, comorbidity: f64) -> Self {
        Self {
            age,
            duration,
            severity,
            comorbidity,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.age.is_finite()
            && self.duration.is_finite()
            && self.severity.is_finite()
            && self.comorbidity.is_finite()
    }
}

impl Default for RiskMultipliers {
    fn default() -> Self {
        Self::new(0.5, 0.5, 1.0, 1.2)
    }
}

/// What the condition matcher compares the input against.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchCriteria {
    /// Lowercase phrases searched for in the primary concern
    pub keywords: Vec<String>,
    /// Additional-symptom codes associated with the condition
    pub symptoms: Vec<SymptomCode>,
    /// Typical pain level (0-10)
    pub pain_range: ValueRange,
    /// Typical duration in days
    pub duration_range: ValueRange,
}

impl Default for MatchCriteria {
    fn default() -> Self {
        Self {
            keywords: Vec::new(),
            symptoms: Vec::new(),
            pain_range: ValueRange::new(0.0, 10.0),
            duration_range: ValueRange::new(1.0, 30.0),
        }
    }
}

/// A single entry in a condition catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConditionProfile {
    /// Condition name, unique within a catalog
    pub name: String,
    /// Base risk (0-100)
    pub base_risk: u32,
    pub multipliers: RiskMultipliers,
    #[serde(default)]
    pub criteria: MatchCriteria,
}

impl ConditionProfile {
    /// Base risk applied to conditions missing from the catalog.
    pub const DEFAULT_BASE_RISK: u32 = 40;

    /// Create a profile with no match criteria.
    pub fn new(name: impl Into<String>, base_risk: u32, multipliers: RiskMultipliers) -> Self {
        Self {
            name: name.into(),
            base_risk,
            multipliers,
            criteria: MatchCriteria::default(),
        }
    }

    /// Profile used for conditions that are not in the catalog.
    pub fn fallback(name: impl Into<String>) -> Self {
        Self::new(name, Self::DEFAULT_BASE_RISK, RiskMultipliers::default())
    }

    pub fn with_keywords(mut self, keywords: &[&str]) -> Self {
        self.criteria.keywords = keywords.iter().map(|k| k.to_lowercase()).collect();
        self
    }

    pub fn with_symptoms(mut self, symptoms: &[SymptomCode]) -> Self {
        self.criteria.symptoms = symptoms.to_vec();
        self
    }

    pub fn with_pain_range(mut self, min: f64, max: f64) -> Self {
        self.criteria.pain_range = ValueRange::new(min, max);
        self
    }

    pub fn with_duration_range(mut self, min_days: f64, max_days: f64) -> Self {
        self.criteria.duration_range = ValueRange::new(min_days, max_days);
        self
    }

    /// Describe what is wrong with this profile, if anything.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        if self.name.trim().is_empty() {
            problems.push("condition name is empty".to_string());
        }
        if self.base_risk > 100 {
            problems.push(format!("base risk {} exceeds 100", self.base_risk));
        }
        if !self.multipliers.is_finite() {
            problems.push("risk multipliers must be finite".to_string());
        }
        if self.criteria.keywords.is_empty() {
            problems.push("keyword list is empty".to_string());
        }
        if !self.criteria.pain_range.is_well_formed() {
            problems.push("pain range is inverted or non-finite".to_string());
        }
        if !self.criteria.duration_range.is_well_formed() {
            problems.push("duration range is inverted or non-finite".to_string());
        }
        problems
    }
}
