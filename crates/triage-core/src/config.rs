//! Engine configuration.
//!
//! Resolved once at startup and handed to [`crate::Engine::new`], which
//! validates it. Every field has a default, so a partial JSON document is
//! enough to override a single setting.

use serde::{Deserialize, Serialize};

use crate::engine::{EngineError, EngineResult};
use crate::models::UrgencyTier;

/// Score thresholds for the urgency classifier (inclusive lower bounds).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UrgencyThresholds {
    pub emergency: u32,
    pub urgent: u32,
    pub routine: u32,
}

impl Default for UrgencyThresholds {
    fn default() -> Self {
        Self {
            emergency: 85,
            urgent: 70,
            routine: 40,
        }
    }
}

impl UrgencyThresholds {
    /// Map a risk score to a tier, highest threshold first.
    pub fn tier_for_score(&self, score: u32) -> UrgencyTier {
        if score >= self.emergency {
            UrgencyTier::Emergency
        } else if score >= self.urgent {
            UrgencyTier::Urgent
        } else if score >= self.routine {
            UrgencyTier::Routine
        } else {
            UrgencyTier::Monitoring
        }
    }

    fn validate(&self) -> EngineResult<()> {
        if self.emergency > 100 {
            return Err(EngineError::InvalidConfig(format!(
                "emergency threshold {} exceeds 100",
                self.emergency
            )));
        }
        if !(self.emergency > self.urgent && self.urgent > self.routine) {
            return Err(EngineError::InvalidConfig(format!(
                "urgency thresholds must be strictly descending, got {}/{}/{}",
                self.emergency, self.urgent, self.routine
            )));
        }
        Ok(())
    }
}

/// Settings shared by every request an engine serves.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Maximum number of recommendations returned
    pub recommendation_cap: usize,
    pub urgency_thresholds: UrgencyThresholds,
    /// Best candidate must score strictly above this, else the match is undetermined
    pub min_match_score: Option<f64>,
    /// Confidence assumed when a caller names a condition without one
    pub default_confidence: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            recommendation_cap: 5,
            urgency_thresholds: UrgencyThresholds::default(),
            min_match_score: None,
            default_confidence: 0.5,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_recommendation_cap(mut self, cap: usize) -> Self {
        self.recommendation_cap = cap;
        self
    }

    pub fn with_min_match_score(mut self, min_score: f64) -> Self {
        self.min_match_score = Some(min_score);
        self
    }

    pub fn validate(&self) -> EngineResult<()> {
        if self.recommendation_cap == 0 {
            return Err(EngineError::InvalidConfig(
                "recommendation_cap must be at least 1".into(),
            ));
        }
        self.urgency_thresholds.validate()?;
        if let Some(min) = self.min_match_score {
            if !(0.0..=100.0).contains(&min) {
                return Err(EngineError::InvalidConfig(format!(
                    "min_match_score {} outside 0-100",
                    min
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.default_confidence) {
            return Err(EngineError::InvalidConfig(format!(
                "default_confidence {} outside 0-1",
                self.default_confidence
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.recommendation_cap, 5);
        assert_eq!(config.min_match_score, None);
    }

    #[test]
    fn test_tier_for_score_boundaries() {
        let thresholds = UrgencyThresholds::default();
        assert_eq!(thresholds.tier_for_score(100), UrgencyTier::Emergency);
        assert_eq!(thresholds.tier_for_score(85), UrgencyTier::Emergency);
        assert_eq!(thresholds.tier_for_score(84), UrgencyTier::Urgent);
        assert_eq!(thresholds.tier_for_score(70), UrgencyTier::Urgent);
        assert_eq!(thresholds.tier_for_score(69), UrgencyTier::Routine);
        assert_eq!(thresholds.tier_for_score(40), UrgencyTier::Routine);
        assert_eq!(thresholds.tier_for_score(39), UrgencyTier::Monitoring);
        assert_eq!(thresholds.tier_for_score(0), UrgencyTier::Monitoring);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EngineConfig::from_json(r#"{"recommendation_cap": 6}"#).unwrap();
        assert_eq!(config.recommendation_cap, 6);
        assert_eq!(config.urgency_thresholds, UrgencyThresholds::default());
        assert_eq!(config.default_confidence, 0.5);
    }

    #[test]
    fn test_zero_cap_rejected() {
        let err = EngineConfig::from_json(r#"{"recommendation_cap": 0}"#).unwrap_err();
        assert!(matches!(err, EngineError::InvalidConfig(_)));
    }

    #[test]
    fn test_thresholds_must_descend() {
        let json = r#"{"urgency_thresholds": {"emergency": 70, "urgent": 70, "routine": 40}}"#;
        assert!(matches!(
            EngineConfig::from_json(json),
            Err(EngineError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_bad_json_is_config_error() {
        assert!(matches!(
            EngineConfig::from_json("recommendation_cap = 5"),
            Err(EngineError::Config(_))
        ));
    }
}
