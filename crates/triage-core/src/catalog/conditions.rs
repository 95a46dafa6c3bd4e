//! Built-in symptom-checker catalog.
//!
//! Iteration order matters: ties in the matcher go to the earlier entry.

use crate::models::{ConditionProfile, RiskMultipliers, SymptomCode};

use SymptomCode::*;

/// The ten conditions the symptom checker can resolve to, in tie-break order.
pub fn symptom_checker_entries() -> Vec<ConditionProfile> {
    vec![
        ConditionProfile::new(
            "Upper Respiratory Infection",
            25,
            RiskMultipliers::new(0.5, 0.3, 0.8, 1.2),
        )
        .with_keywords(&["cough", "fever", "sore throat", "runny nose", "congestion", "cold"])
        .with_symptoms(&[Fever, Headache, Fatigue])
        .with_pain_range(1.0, 4.0)
        .with_duration_range(1.0, 10.0),
        ConditionProfile::new(
            "Acute Chest Pain Syndrome",
            75,
            RiskMultipliers::new(1.5, 1.0, 1.5, 1.8),
        )
        .with_keywords(&["chest pain", "shortness of breath", "crushing", "radiating", "heart"])
        .with_symptoms(&[ChestPain, ShortnessOfBreath, Dizziness])
        .with_pain_range(6.0, 10.0)
        .with_duration_range(1.0, 3.0),
        ConditionProfile::new("Gastroenteritis", 35, RiskMultipliers::new(0.8, 0.5, 1.0, 1.3))
            .with_keywords(&["stomach", "nausea", "vomiting", "diarrhea", "food poisoning"])
            .with_symptoms(&[Nausea, AbdominalPain, Fever])
            .with_pain_range(3.0, 8.0)
            .with_duration_range(1.0, 10.0),
        ConditionProfile::new("Migraine", 30, RiskMultipliers::new(0.3, 0.4, 1.2, 1.1))
            .with_keywords(&["headache", "migraine", "throbbing", "sensitivity to light", "head pain"])
            .with_symptoms(&[Headache, Nausea, Dizziness])
            .with_pain_range(6.0, 10.0)
            .with_duration_range(1.0, 3.0),
        ConditionProfile::new("Angina", 65, RiskMultipliers::new(1.3, 0.8, 1.4, 1.7))
            .with_keywords(&["chest tightness", "exercise", "exertion", "chest pressure"])
            .with_symptoms(&[ChestPain, ShortnessOfBreath, Fatigue])
            .with_pain_range(3.0, 7.0)
            .with_duration_range(7.0, 30.0),
        ConditionProfile::new("Viral Syndrome", 20, RiskMultipliers::new(0.6, 0.3, 0.9, 1.2))
            .with_keywords(&["fever", "body aches", "chills", "flu"])
            .with_symptoms(&[Fever, Headache, Fatigue])
            .with_pain_range(2.0, 6.0)
            .with_duration_range(1.0, 7.0),
        ConditionProfile::new("Arthritis", 15, RiskMultipliers::new(0.4, 0.2, 0.7, 1.1))
            .with_keywords(&["joint pain", "stiffness", "swollen joints", "arthritis", "joint"])
            .with_symptoms(&[Fatigue])
            .with_pain_range(2.0, 7.0)
            .with_duration_range(14.0, 365.0),
        ConditionProfile::new(
            "Asthma Exacerbation",
            55,
            RiskMultipliers::new(0.9, 0.7, 1.3, 1.5),
        )
        .with_keywords(&["difficulty breathing", "wheezing", "breathing", "asthma", "tight chest"])
        .with_symptoms(&[ShortnessOfBreath, Fatigue])
        .with_pain_range(0.0, 4.0)
        .with_duration_range(1.0, 7.0),
        ConditionProfile::new(
            "Irritable Bowel Syndrome",
            20,
            RiskMultipliers::new(0.2, 0.1, 0.6, 1.0),
        )
        .with_keywords(&["abdominal discomfort", "bloating", "chronic abdominal", "bowel", "cramping"])
        .with_symptoms(&[AbdominalPain, Fatigue, Nausea])
        .with_pain_range(3.0, 7.0)
        .with_duration_range(14.0, 365.0),
        ConditionProfile::new(
            "Acute Headache Syndrome",
            60,
            RiskMultipliers::new(0.7, 1.2, 1.4, 1.3),
        )
        .with_keywords(&["sudden severe headache", "worst headache", "thunderclap", "sudden"])
        .with_symptoms(&[Headache, Nausea, Dizziness])
        .with_pain_range(8.0, 10.0)
        .with_duration_range(1.0, 1.0),
    ]
}
