//! Static reference tables shared by the risk engine and urgency classifier.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Weight applied to symptoms missing from the weight table.
pub const DEFAULT_SYMPTOM_WEIGHT: u32 = 2;

/// Lookup tables consulted per request. Built once, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReferenceTables {
    /// Lowercased symptom label → risk weight
    pub symptom_weights: HashMap<String, u32>,
    /// Lowercased substrings marking a high-risk comorbidity
    pub high_risk_history: Vec<String>,
    /// Conditions that always classify as emergency
    pub emergency_conditions: Vec<String>,
    /// Conditions where acute onset is itself a risk factor
    pub serious_conditions: Vec<String>,
    /// Symptom labels that force an emergency classification
    pub emergency_symptoms: Vec<String>,
    /// Symptom labels reported as risk factors when present
    pub high_risk_symptoms: Vec<String>,
}

impl Default for ReferenceTables {
    fn default() -> Self {
        Self::new()
    }
}

impl ReferenceTables {
    /// Tables for the built-in symptom checker.
    pub fn new() -> Self {
        Self {
            symptom_weights: Self::default_symptom_weights(),
            high_risk_history: to_strings(&[
                "diabetes",
                "heart disease",
                "hypertension",
                "copd",
                "asthma",
                "cancer",
                "kidney disease",
                "liver disease",
            ]),
            emergency_conditions: to_strings(&["Acute Chest Pain Syndrome", "Acute Headache Syndrome"]),
            serious_conditions: to_strings(&["Acute Chest Pain Syndrome", "Acute Headache Syndrome"]),
            emergency_symptoms: to_strings(&[
                "Chest pain",
                "Shortness of breath",
                "Extreme pain (9-10/10)",
            ]),
            high_risk_symptoms: to_strings(&["Chest pain", "Shortness of breath", "Severe pain"]),
        }
    }

    fn default_symptom_weights() -> HashMap<String, u32> {
        let mut weights = HashMap::new();
        for (label, weight) in [
            ("chest pain", 15),
            ("shortness of breath", 12),
            ("severe pain", 10),
            ("extreme pain", 20),
            ("fever", 8),
            ("dizziness", 6),
            ("nausea", 4),
            ("headache", 5),
            ("abdominal pain", 7),
            ("fatigue", 3),
        ] {
            weights.insert(label.to_string(), weight);
        }
        weights
    }

    /// Risk weight of a symptom label (case-insensitive).
    pub fn symptom_weight(&self, label: &str) -> u32 {
        self.symptom_weights
            .get(&label.trim().to_lowercase())
            .copied()
            .unwrap_or(DEFAULT_SYMPTOM_WEIGHT)
    }

    /// Whether a history entry mentions any high-risk comorbidity keyword.
    pub fn is_high_risk_history(&self, entry: &str) -> bool {
        let lower = entry.to_lowercase();
        self.high_risk_history.iter().any(|k| lower.contains(k.as_str()))
    }

    pub fn is_emergency_condition(&self, condition: &str) -> bool {
        self.emergency_conditions.iter().any(|c| c == condition)
    }

    pub fn is_serious_condition(&self, condition: &str) -> bool {
        self.serious_conditions.iter().any(|c| c == condition)
    }

    pub fn is_emergency_symptom(&self, label: &str) -> bool {
        self.emergency_symptoms
            .iter()
            .any(|s| s.eq_ignore_ascii_case(label.trim()))
    }
}

/// Condition-specific recommendation texts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConditionPool {
    pub immediate: Vec<String>,
    pub monitoring: Vec<String>,
    pub followup: Vec<String>,
}

impl ConditionPool {
    fn new(immediate: &[&str], monitoring: &[&str], followup: &[&str]) -> Self {
        Self {
            immediate: to_strings(immediate),
            monitoring: to_strings(monitoring),
            followup: to_strings(followup),
        }
    }
}

/// Recommendations keyed by a keyword searched for in the concern text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SymptomPool {
    /// Underscore form, e.g. `chest_pain`; also matched with spaces
    pub keyword: String,
    pub texts: Vec<String>,
}

/// Every recommendation pool the selector draws from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationPools {
    pub conditions: HashMap<String, ConditionPool>,
    pub emergency: Vec<String>,
    pub urgent: Vec<String>,
    pub routine: Vec<String>,
    pub monitoring: Vec<String>,
    /// Checked in order; the first matching keyword wins
    pub symptoms: Vec<SymptomPool>,
    pub wellness: Vec<String>,
}

impl Default for RecommendationPools {
    fn default() -> Self {
        Self::new()
    }
}

impl RecommendationPools {
    /// Pools for the built-in symptom checker.
    pub fn new() -> Self {
        Self {
            conditions: Self::default_condition_pools(),
            emergency: to_strings(&[
                "Seek emergency medical attention immediately",
                "Call 911 or go to nearest emergency room",
                "Do not drive yourself - have someone drive you",
            ]),
            urgent: to_strings(&[
                "Contact healthcare provider today",
                "Monitor symptoms closely",
                "Prepare to seek urgent care if worsening",
            ]),
            routine: to_strings(&[
                "Schedule appointment with healthcare provider within 1-2 days",
                "Monitor symptoms and keep a symptom diary",
                "Follow home care measures",
            ]),
            monitoring: to_strings(&[
                "Monitor symptoms over next few days",
                "Consider routine follow-up with primary care",
                "Practice self-care measures",
            ]),
            symptoms: vec![
                SymptomPool {
                    keyword: "chest_pain".into(),
                    texts: to_strings(&[
                        "Avoid physical exertion until evaluated",
                        "Monitor for radiation to arm, jaw, or back",
                        "Keep nitroglycerin available if prescribed",
                    ]),
                },
                SymptomPool {
                    keyword: "breathing_difficulty".into(),
                    texts: to_strings(&[
                        "Sit upright to ease breathing",
                        "Use pursed-lip breathing techniques",
                        "Avoid respiratory irritants",
                    ]),
                },
                SymptomPool {
                    keyword: "fever".into(),
                    texts: to_strings(&[
                        "Stay hydrated with plenty of fluids",
                        "Rest and avoid overexertion",
                        "Use fever-reducing medications as appropriate",
                    ]),
                },
                SymptomPool {
                    keyword: "pain".into(),
                    texts: to_strings(&[
                        "Use appropriate pain management techniques",
                        "Apply heat/cold as appropriate",
                        "Avoid activities that worsen pain",
                    ]),
                },
            ],
            wellness: to_strings(&[
                "Maintain regular sleep schedule and adequate rest",
                "Stay well-hydrated throughout the day",
                "Avoid alcohol and smoking during recovery",
                "Keep a symptom diary to track changes",
                "Follow up with healthcare provider as recommended",
            ]),
        }
    }

    fn default_condition_pools() -> HashMap<String, ConditionPool> {
        let mut pools = HashMap::new();

        pools.insert(
            "Acute Chest Pain Syndrome".to_string(),
            ConditionPool::new(
                &[
                    "Call emergency services (911) immediately",
                    "Take aspirin if not allergic (chew 325mg)",
                    "Remain calm and rest in a comfortable position",
                ],
                &[
                    "Monitor vital signs closely",
                    "Watch for worsening chest pain or shortness of breath",
                ],
                &[
                    "Urgent cardiology evaluation required",
                    "Hospital admission likely necessary",
                ],
            ),
        );

        pools.insert(
            "Angina".to_string(),
            ConditionPool::new(
                &[
                    "Stop any activity and rest until symptoms settle",
                    "Use prescribed nitroglycerin as directed",
                ],
                &["Note what brings on episodes and how long they last"],
                &["Arrange a cardiology review within the week"],
            ),
        );

        pools.insert(
            "Upper Respiratory Infection".to_string(),
            ConditionPool::new(
                &[
                    "Rest and avoid strenuous activities",
                    "Stay well-hydrated with clear fluids",
                    "Use a humidifier or breathe steam from hot shower",
                ],
                &[
                    "Monitor temperature regularly",
                    "Watch for worsening breathing difficulty",
                ],
                &[
                    "See healthcare provider if symptoms last beyond 10 days",
                    "Consider chest X-ray if symptoms worsen",
                ],
            ),
        );

        pools.insert(
            "Asthma Exacerbation".to_string(),
            ConditionPool::new(
                &[
                    "Use your rescue inhaler as prescribed",
                    "Sit upright and move away from triggers",
                ],
                &["Watch for breathlessness that does not ease with the inhaler"],
                &["Review your asthma action plan with your doctor"],
            ),
        );

        pools.insert(
            "Migraine".to_string(),
            ConditionPool::new(
                &[
                    "Rest in a quiet, dark room",
                    "Apply cold or warm compress to head/neck",
                    "Stay hydrated and avoid triggers",
                ],
                &[
                    "Track headache patterns and triggers",
                    "Monitor for neurological symptoms",
                ],
                &[
                    "Consider neurologist consultation if frequent",
                    "Discuss preventive medications with doctor",
                ],
            ),
        );

        pools.insert(
            "Acute Headache Syndrome".to_string(),
            ConditionPool::new(
                &[
                    "Seek emergency medical care immediately",
                    "Do not take pain medications that may mask symptoms",
                ],
                &["Watch for confusion, weakness, or loss of vision"],
                &["Urgent neurological evaluation required"],
            ),
        );

        pools.insert(
            "Gastroenteritis".to_string(),
            ConditionPool::new(
                &[
                    "Stay hydrated with clear fluids and electrolytes",
                    "Eat bland foods (BRAT diet) when tolerated",
                    "Rest and avoid dairy products temporarily",
                ],
                &["Monitor for dehydration signs", "Track frequency of symptoms"],
                &[
                    "See doctor if symptoms persist >3 days",
                    "Consider stool testing if severe",
                ],
            ),
        );

        pools
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
