//! Lab-report triage.
//!
//! Scores structured lab panels (values plus extracted clinical and imaging
//! terms) against known disease patterns, then reports risk, urgency,
//! follow-up and advice using the same tiering and follow-up policy as the
//! symptom engine in `triage-core`.
//!
//! ```text
//! panel JSON -> parse_lab_panel -> analyze_lab_values -> PatternMatcher
//!            -> lab_risk_score -> tier_for_score -> follow_up_days -> LabReport
//! ```

pub mod panel;
pub mod patterns;
pub mod reference;
pub mod report;

pub use panel::*;
pub use patterns::*;
pub use reference::*;
pub use report::*;
