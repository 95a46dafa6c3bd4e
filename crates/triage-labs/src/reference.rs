//! Reference ranges and per-lab interpretation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::panel::LabValue;

/// Normal range for one analyte, with optional critical bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceRange {
    pub key: &'static str,
    pub min: f64,
    pub max: f64,
    /// Values above this are critical
    pub critical_high: Option<f64>,
    /// Values below this are critical
    pub critical_low: Option<f64>,
}

impl ReferenceRange {
    const fn high(key: &'static str, min: f64, max: f64, critical: f64) -> Self {
        Self {
            key,
            min,
            max,
            critical_high: Some(critical),
            critical_low: None,
        }
    }

    const fn low(key: &'static str, min: f64, max: f64, critical: f64) -> Self {
        Self {
            key,
            min,
            max,
            critical_high: None,
            critical_low: Some(critical),
        }
    }

    pub fn flag(&self, value: f64) -> LabFlag {
        if value < self.min {
            LabFlag::Low
        } else if value > self.max {
            LabFlag::High
        } else {
            LabFlag::Normal
        }
    }

    pub fn is_critical(&self, value: f64) -> bool {
        match self.flag(value) {
            LabFlag::Low => self.critical_low.map_or(false, |c| value < c),
            LabFlag::High => self.critical_high.map_or(false, |c| value > c),
            LabFlag::Normal => false,
        }
    }
}

/// Lookup order matters: "hdl cholesterol" must resolve to hdl.
pub const REFERENCE_RANGES: &[ReferenceRange] = &[
    ReferenceRange::high("glucose", 70.0, 100.0, 126.0),
    ReferenceRange::low("hdl", 40.0, 100.0, 40.0),
    ReferenceRange::high("ldl", 0.0, 100.0, 160.0),
    ReferenceRange::high("cholesterol", 0.0, 200.0, 240.0),
    ReferenceRange::high("triglycerides", 0.0, 150.0, 200.0),
    ReferenceRange::low("hemoglobin", 12.0, 16.0, 10.0),
    ReferenceRange::low("hematocrit", 36.0, 46.0, 30.0),
    ReferenceRange::high("wbc", 4500.0, 11000.0, 15000.0),
    ReferenceRange::high("creatinine", 0.6, 1.2, 2.0),
    ReferenceRange::high("bun", 7.0, 20.0, 50.0),
    ReferenceRange::high("hba1c", 0.0, 5.7, 7.0),
];

/// First reference range whose key appears in the lab name.
pub fn reference_for(name: &str) -> Option<&'static ReferenceRange> {
    let lower = name.to_lowercase();
    REFERENCE_RANGES.iter().find(|r| lower.contains(r.key))
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LabFlag {
    Low,
    Normal,
    High,
}

/// One interpreted lab value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabFinding {
    pub name: String,
    pub value: f64,
    pub unit: String,
    pub flag: LabFlag,
    pub normal_min: f64,
    pub normal_max: f64,
}

impl LabFinding {
    pub fn is_abnormal(&self) -> bool {
        self.flag != LabFlag::Normal
    }
}

impl fmt::Display for LabFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let range = format!("Normal: {}-{}", self.normal_min, self.normal_max);
        match self.flag {
            LabFlag::Low => write!(f, "{}: {} {} (LOW - {})", self.name, self.value, self.unit, range),
            LabFlag::High => write!(f, "{}: {} {} (HIGH - {})", self.name, self.value, self.unit, range),
            LabFlag::Normal => write!(f, "{}: {} {} (Normal)", self.name, self.value, self.unit),
        }
    }
}

/// Interpreted findings plus critical-value indicators.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LabAnalysis {
    pub findings: Vec<LabFinding>,
    pub risk_indicators: Vec<String>,
}

impl LabAnalysis {
    pub fn abnormal(&self) -> impl Iterator<Item = &LabFinding> {
        self.findings.iter().filter(|f| f.is_abnormal())
    }
}

/// Interpret each lab against its reference range.
///
/// Zero values are treated as absent. Labs with no reference range produce
/// no finding.
pub fn analyze_lab_values(labs: &[LabValue]) -> LabAnalysis {
    let mut analysis = LabAnalysis::default();

    for lab in labs {
        if lab.value == 0.0 || !lab.value.is_finite() {
            continue;
        }
        let Some(range) = reference_for(&lab.name) else {
            continue;
        };

        let flag = range.flag(lab.value);
        if range.is_critical(lab.value) {
            let direction = if flag == LabFlag::Low { "low" } else { "elevated" };
            analysis
                .risk_indicators
                .push(format!("Critically {} {}", direction, lab.name));
        }

        analysis.findings.push(LabFinding {
            name: lab.name.clone(),
            value: lab.value,
            unit: lab.unit.clone(),
            flag,
            normal_min: range.min,
            normal_max: range.max,
        });
    }

    analysis
}
