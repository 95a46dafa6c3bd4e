//! Condition catalogs and static reference data.
//!
//! A [`Catalog`] is loaded once at startup and shared read-only by every
//! request. The built-in symptom-checker catalog is [`Catalog::symptom_checker`];
//! hosts can supply their own through [`Catalog::from_json`].

mod conditions;
mod tables;

pub use conditions::*;
pub use tables::*;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::engine::{EngineError, EngineResult};
use crate::models::ConditionProfile;

/// Ordered, immutable set of condition profiles.
///
/// Order is the matcher's tie-break order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Catalog {
    entries: Vec<ConditionProfile>,
}

impl Catalog {
    pub fn new(entries: Vec<ConditionProfile>) -> Self {
        Self { entries }
    }

    /// The built-in ten-condition symptom-checker catalog.
    pub fn symptom_checker() -> Self {
        Self::new(symptom_checker_entries())
    }

    /// Parse a catalog from a JSON array of condition profiles.
    ///
    /// Parsing does not validate; call [`Catalog::validate`] to reject
    /// malformed entries at startup.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let entries: Vec<ConditionProfile> = serde_json::from_str(json)?;
        Ok(Self::new(entries))
    }

    pub fn entries(&self) -> &[ConditionProfile] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up a profile by exact name.
    pub fn get(&self, name: &str) -> Option<&ConditionProfile> {
        self.entries.iter().find(|e| e.name == name)
    }

    /// Profile for `name`, or the default profile when the catalog has none.
    pub fn profile_or_default(&self, name: &str) -> ConditionProfile {
        match self.get(name) {
            Some(profile) => profile.clone(),
            None => {
                tracing::warn!(condition = name, "unknown condition, using default profile");
                ConditionProfile::fallback(name)
            }
        }
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|e| e.name.clone()).collect()
    }

    /// Collect every problem in the catalog, prefixed with the entry name.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let mut seen = HashSet::new();

        for entry in &self.entries {
            if !seen.insert(entry.name.as_str()) {
                problems.push(format!("{}: duplicate condition name", entry.name));
            }
            for problem in entry.problems() {
                problems.push(format!("{}: {}", entry.name, problem));
            }
        }

        problems
    }

    /// Reject a catalog with malformed entries.
    pub fn validate(&self) -> EngineResult<()> {
        let problems = self.problems();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(EngineError::InvalidCatalog(problems.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RiskMultipliers;

    #[test]
    fn test_symptom_checker_is_valid() {
        let catalog = Catalog::symptom_checker();
        assert_eq!(catalog.len(), 10);
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.names()[0], "Upper Respiratory Infection");
    }

    #[test]
    fn test_profile_or_default() {
        let catalog = Catalog::symptom_checker();
        assert_eq!(catalog.profile_or_default("Migraine").base_risk, 30);

        let unknown = catalog.profile_or_default("xyzzy");
        assert_eq!(unknown.name, "xyzzy");
        assert_eq!(unknown.base_risk, ConditionProfile::DEFAULT_BASE_RISK);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let profile = ConditionProfile::new("Twin", 10, RiskMultipliers::default())
            .with_keywords(&["twin"]);
        let catalog = Catalog::new(vec![profile.clone(), profile]);

        let err = catalog.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {
                "name": "Sprain",
                "base_risk": 10,
                "multipliers": {"age": 0.2, "duration": 0.2, "severity": 0.8, "comorbidity": 1.0},
                "criteria": {
                    "keywords": ["ankle", "twisted"],
                    "symptoms": ["Fatigue"],
                    "pain_range": {"min": 2.0, "max": 6.0},
                    "duration_range": {"min": 1.0, "max": 14.0}
                }
            }
        ]"#;

        let catalog = Catalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.get("Sprain").unwrap().criteria.keywords, vec!["ankle", "twisted"]);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            Catalog::from_json("{not json"),
            Err(EngineError::Config(_))
        ));
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = Catalog::default();
        assert!(catalog.is_empty());
        assert!(catalog.validate().is_ok());
    }
}
