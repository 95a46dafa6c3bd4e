//! Follow-up scheduling and recommendation selection.

use crate::catalog::RecommendationPools;
use crate::models::{
    Priority, Recommendation, RecommendationCategory, RecommendationSet, UrgencyTier,
};

/// Days until follow-up; `None` means immediate care.
pub fn follow_up_days(tier: UrgencyTier, risk_score: u32) -> Option<u32> {
    match tier {
        UrgencyTier::Emergency => None,
        UrgencyTier::Urgent => Some(1),
        UrgencyTier::Routine if risk_score > 50 => Some(7),
        UrgencyTier::Routine => Some(14),
        UrgencyTier::Monitoring => Some(14),
    }
}

/// Builds the ordered, de-duplicated recommendation list.
///
/// Pipeline:
/// 1. Condition pool: two immediate, one monitoring, one follow-up
/// 2. One tier recommendation, unless the tier pool is already represented
/// 3. One symptom recommendation for the first keyword found in the concern
/// 4. Wellness entries until the cap is reached
pub struct RecommendationSelector<'a> {
    pools: &'a RecommendationPools,
    cap: usize,
}

impl<'a> RecommendationSelector<'a> {
    pub fn new(pools: &'a RecommendationPools, cap: usize) -> Self {
        Self { pools, cap }
    }

    pub fn select(&self, condition: &str, tier: UrgencyTier, concern: &str) -> RecommendationSet {
        let mut set = RecommendationSet::new();

        self.add_condition(&mut set, condition);
        self.add_tier(&mut set, tier);
        self.add_symptom(&mut set, concern);
        self.add_wellness(&mut set);

        set.truncate(self.cap);
        set
    }

    fn add_condition(&self, set: &mut RecommendationSet, condition: &str) {
        let Some(pool) = self.pools.conditions.get(condition) else {
            return;
        };

        let picks = pool
            .immediate
            .iter()
            .take(2)
            .map(|t| (t, Priority::High, RecommendationCategory::Immediate))
            .chain(
                pool.monitoring
                    .iter()
                    .take(1)
                    .map(|t| (t, Priority::Medium, RecommendationCategory::Monitoring)),
            )
            .chain(
                pool.followup
                    .iter()
                    .take(1)
                    .map(|t| (t, Priority::Medium, RecommendationCategory::FollowUp)),
            );

        for (text, priority, category) in picks {
            set.push_unique(Recommendation::new(text.clone(), priority, category));
        }
    }

    fn add_tier(&self, set: &mut RecommendationSet, tier: UrgencyTier) {
        let (pool, priority) = match tier {
            UrgencyTier::Emergency => (&self.pools.emergency, Priority::High),
            UrgencyTier::Urgent => (&self.pools.urgent, Priority::High),
            UrgencyTier::Routine => (&self.pools.routine, Priority::Medium),
            UrgencyTier::Monitoring => (&self.pools.monitoring, Priority::Low),
        };

        if pool.iter().any(|text| set.contains(text)) {
            return;
        }
        if let Some(text) = pool.first() {
            set.push_unique(Recommendation::new(
                text.clone(),
                priority,
                RecommendationCategory::Triage,
            ));
        }
    }

    fn add_symptom(&self, set: &mut RecommendationSet, concern: &str) {
        let concern_lower = concern.to_lowercase();

        let matched = self.pools.symptoms.iter().find(|pool| {
            let keyword = pool.keyword.to_lowercase();
            concern_lower.contains(&keyword.replace('_', " ")) || concern_lower.contains(&keyword)
        });

        if let Some(text) = matched.and_then(|pool| pool.texts.first()) {
            set.push_unique(Recommendation::new(
                text.clone(),
                Priority::Medium,
                RecommendationCategory::Symptom,
            ));
        }
    }

    fn add_wellness(&self, set: &mut RecommendationSet) {
        for text in &self.pools.wellness {
            if set.len() >= self.cap {
                break;
            }
            set.push_unique(Recommendation::new(
                text.clone(),
                Priority::Low,
                RecommendationCategory::Wellness,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follow_up_policy() {
        assert_eq!(follow_up_days(UrgencyTier::Emergency, 100), None);
        assert_eq!(follow_up_days(UrgencyTier::Urgent, 72), Some(1));
        assert_eq!(follow_up_days(UrgencyTier::Routine, 51), Some(7));
        assert_eq!(follow_up_days(UrgencyTier::Routine, 50), Some(14));
        assert_eq!(follow_up_days(UrgencyTier::Monitoring, 10), Some(14));
    }

    #[test]
    fn test_condition_pool_then_tier() {
        let pools = RecommendationPools::new();
        let selector = RecommendationSelector::new(&pools, 5);

        let set = selector.select("Acute Chest Pain Syndrome", UrgencyTier::Emergency, "chest pain");
        assert_eq!(
            set.texts(),
            vec![
                "Call emergency services (911) immediately",
                "Take aspirin if not allergic (chew 325mg)",
                "Monitor vital signs closely",
                "Urgent cardiology evaluation required",
                "Seek emergency medical attention immediately",
            ]
        );
        assert_eq!(set.items()[0].priority, Priority::High);
        assert_eq!(set.items()[4].category, RecommendationCategory::Triage);
    }

    #[test]
    fn test_symptom_keyword_survives_with_larger_cap() {
        let pools = RecommendationPools::new();
        let selector = RecommendationSelector::new(&pools, 6);

        let set = selector.select("Acute Chest Pain Syndrome", UrgencyTier::Emergency, "Chest pain");
        assert_eq!(set.len(), 6);
        assert_eq!(set.texts()[5], "Avoid physical exertion until evaluated");
    }

    #[test]
    fn test_underscore_keyword_matches() {
        let pools = RecommendationPools::new();
        let selector = RecommendationSelector::new(&pools, 5);

        let set = selector.select("Arthritis", UrgencyTier::Monitoring, "breathing_difficulty at night");
        assert!(set.contains("Sit upright to ease breathing"));
    }

    #[test]
    fn test_no_condition_pool_fills_with_wellness() {
        let pools = RecommendationPools::new();
        let selector = RecommendationSelector::new(&pools, 5);

        let set = selector.select("Arthritis", UrgencyTier::Monitoring, "joint pain and stiffness");
        assert_eq!(
            set.texts(),
            vec![
                "Monitor symptoms over next few days",
                "Use appropriate pain management techniques",
                "Maintain regular sleep schedule and adequate rest",
                "Stay well-hydrated throughout the day",
                "Avoid alcohol and smoking during recovery",
            ]
        );
    }

    #[test]
    fn test_tier_skipped_when_already_represented() {
        let mut pools = RecommendationPools::new();
        pools.conditions.get_mut("Migraine").unwrap().immediate =
            vec!["Monitor symptoms over next few days".to_string()];
        let selector = RecommendationSelector::new(&pools, 10);

        let set = selector.select("Migraine", UrgencyTier::Monitoring, "");
        let triage = set
            .items()
            .iter()
            .filter(|r| r.category == RecommendationCategory::Triage)
            .count();
        assert_eq!(triage, 0);
    }

    #[test]
    fn test_cap_of_one() {
        let pools = RecommendationPools::new();
        let selector = RecommendationSelector::new(&pools, 1);

        let set = selector.select("Unknown", UrgencyTier::Routine, "");
        assert_eq!(set.texts(), vec!["Schedule appointment with healthcare provider within 1-2 days"]);
    }
}
