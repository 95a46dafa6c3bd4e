//! Recommendation models.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which pool a recommendation was drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecommendationCategory {
    /// Condition-specific, act now
    Immediate,
    /// Condition-specific, what to watch
    Monitoring,
    /// Condition-specific, next clinical step
    FollowUp,
    /// Driven by the urgency tier
    Triage,
    /// Driven by a keyword in the primary concern
    Symptom,
    /// Generic wellness advice
    Wellness,
}

impl RecommendationCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            RecommendationCategory::Immediate => "immediate",
            RecommendationCategory::Monitoring => "monitoring",
            RecommendationCategory::FollowUp => "follow-up",
            RecommendationCategory::Triage => "triage",
            RecommendationCategory::Symptom => "symptom",
            RecommendationCategory::Wellness => "wellness",
        }
    }
}

impl fmt::Display for RecommendationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub text: String,
    pub priority: Priority,
    pub category: RecommendationCategory,
}

impl Recommendation {
    pub fn new(text: impl Into<String>, priority: Priority, category: RecommendationCategory) -> Self {
        Self {
            text: text.into(),
            priority,
            category,
        }
    }
}

/// Ordered recommendation list, unique by exact text.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RecommendationSet {
    items: Vec<Recommendation>,
}

impl RecommendationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, text: &str) -> bool {
        self.items.iter().any(|r| r.text == text)
    }

    /// Append unless the same text is already present. Returns whether it was added.
    pub fn push_unique(&mut self, recommendation: Recommendation) -> bool {
        if self.contains(&recommendation.text) {
            return false;
        }
        self.items.push(recommendation);
        true
    }

    pub fn truncate(&mut self, cap: usize) {
        self.items.truncate(cap);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[Recommendation] {
        &self.items
    }

    pub fn texts(&self) -> Vec<&str> {
        self.items.iter().map(|r| r.text.as_str()).collect()
    }

    pub fn into_items(self) -> Vec<Recommendation> {
        self.items
    }
}
