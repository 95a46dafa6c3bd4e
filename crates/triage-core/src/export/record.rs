//! Assessment record export.
//!
//! Records carry an id and timestamp so a storage collaborator can key them.
//! The engine itself never stamps anything; assessment stays pure.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{NormalizedInput, TriageReport};

const CSV_HEADER: &str = "analysis_id,created_at,primary_concern,condition,confidence,risk_score,urgency,follow_up_days,status,recommendations\n";

/// One triage result ready for storage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssessmentRecord {
    /// Unique analysis ID
    pub analysis_id: String,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
    pub input: NormalizedInput,
    pub report: TriageReport,
}

impl AssessmentRecord {
    /// Wrap a report with a fresh ID and the current time.
    pub fn new(input: NormalizedInput, report: TriageReport) -> Self {
        Self {
            analysis_id: Uuid::new_v4().to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            input,
            report,
        }
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV format.
    pub fn to_csv(&self) -> String {
        let mut csv = String::from(CSV_HEADER);
        csv.push_str(&self.csv_row());
        csv
    }

    fn csv_row(&self) -> String {
        let assessment = self.report.assessment();
        let status = if self.report.outcome.is_fallback() {
            "fallback"
        } else {
            "computed"
        };
        let recommendations = self.report.recommendations.texts().join("; ");

        format!(
            "{},{},{},{},{:.2},{},{},{},{},{}\n",
            escape_csv(&self.analysis_id),
            escape_csv(&self.created_at),
            escape_csv(&self.input.primary_concern),
            escape_csv(&self.report.matched.condition),
            self.report.matched.confidence,
            assessment.risk_score,
            assessment.urgency,
            assessment
                .follow_up_days
                .map(|d| d.to_string())
                .unwrap_or_default(),
            status,
            escape_csv(&recommendations),
        )
    }
}

/// Batch of records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordBatch {
    /// Export timestamp
    pub exported_at: String,
    pub records: Vec<AssessmentRecord>,
    pub total_records: usize,
}

impl RecordBatch {
    pub fn new(records: Vec<AssessmentRecord>) -> Self {
        Self {
            exported_at: chrono::Utc::now().to_rfc3339(),
            total_records: records.len(),
            records,
        }
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Export to CSV format.
    pub fn to_csv(&self) -> String {
        let mut csv = String::from(CSV_HEADER);
        for record in &self.records {
            csv.push_str(&record.csv_row());
        }
        csv
    }
}

/// Escape a string for CSV output.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Engine;
    use crate::models::{AssessmentRequest, DurationBucket, PainBucket};

    fn make_record(concern: &str) -> AssessmentRecord {
        let input = NormalizedInput::new(concern)
            .with_duration(DurationBucket::MoreThanTwoWeeks)
            .with_pain(PainBucket::Moderate)
            .with_symptoms(["Fatigue"]);
        let report = Engine::with_defaults().triage(&AssessmentRequest::new(input.clone()));
        AssessmentRecord::new(input, report)
    }

    #[test]
    fn test_record_ids_are_unique() {
        let a = make_record("joint pain and stiffness");
        let b = make_record("joint pain and stiffness");
        assert_ne!(a.analysis_id, b.analysis_id);
        assert!(chrono::DateTime::parse_from_rfc3339(&a.created_at).is_ok());
        assert_eq!(a.report, b.report);
    }

    #[test]
    fn test_record_json() {
        let record = make_record("joint pain and stiffness");
        let json = record.to_json().unwrap();
        assert!(json.contains("Arthritis"));
        assert!(json.contains("\"status\": \"computed\""));
        assert!(json.contains("\"urgency\": \"monitoring\""));
    }

    #[test]
    fn test_batch_csv() {
        let batch = RecordBatch::new(vec![
            make_record("joint pain and stiffness"),
            make_record("pain, mostly in the joints"),
        ]);

        let csv = batch.to_csv();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(batch.total_records, 2);
        assert_eq!(lines.len(), 3); // Header + 2 records
        assert!(lines[0].starts_with("analysis_id,"));
        assert!(lines[1].contains(",Arthritis,0.84,16,monitoring,14,computed,"));
        assert!(lines[2].contains("\"pain, mostly in the joints\""));
    }

    #[test]
    fn test_csv_escaping() {
        assert_eq!(escape_csv("simple"), "simple");
        assert_eq!(escape_csv("with,comma"), "\"with,comma\"");
        assert_eq!(escape_csv("with\"quote"), "\"with\"\"quote\"");
    }
}
