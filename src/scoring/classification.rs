//! Response and status classification.
//!
//! Raw form responses arrive as free text with several synonym spellings per
//! category. Classification happens exactly once, here, so the scorer and
//! any display logic can never disagree on what counts as which category.

use crate::config::ScoringConfig;
use crate::core::ResponseCategory;
use serde::{Deserialize, Serialize};

/// Classify a raw response string into its compliance category.
///
/// Matching is case-insensitive and tolerant of the synonym spellings seen
/// in production form data. Unmatched text is `Unrecognized`, which scores
/// as null rather than erroring; an empty response is simply unanswered and
/// maps to `NotApplicable`.
pub fn classify_response(raw: &str) -> ResponseCategory {
    let token = raw.trim().to_ascii_uppercase();
    match token.as_str() {
        "" => ResponseCategory::NotApplicable,
        "C" | "FC" | "FULL" | "FULLY COMPLIANT" | "COMPLIANT" | "YES" => {
            ResponseCategory::Compliant
        }
        "PC" | "PARTIAL" | "PARTIALLY COMPLIANT" | "SUBSTANTIAL" => {
            ResponseCategory::PartiallyCompliant
        }
        "NC" | "NON" | "NON-COMPLIANT" | "NON COMPLIANT" | "NONCOMPLIANT" | "NO" => {
            ResponseCategory::NonCompliant
        }
        "NA" | "N/A" | "N.A." | "NOT APPLICABLE" => ResponseCategory::NotApplicable,
        _ => ResponseCategory::Unrecognized,
    }
}

/// Official compliance status of a whole assessment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComplianceStatus {
    FullyCompliant,
    SubstantialCompliance,
    PartialCompliance,
    NonCompliant,
}

impl std::fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ComplianceStatus::FullyCompliant => "Fully Compliant",
            ComplianceStatus::SubstantialCompliance => "Substantial Compliance",
            ComplianceStatus::PartialCompliance => "Partial Compliance",
            ComplianceStatus::NonCompliant => "Non-Compliant",
        };
        f.write_str(label)
    }
}

const STATUS_LEVELS: [ComplianceStatus; 4] = [
    ComplianceStatus::FullyCompliant,
    ComplianceStatus::SubstantialCompliance,
    ComplianceStatus::PartialCompliance,
    ComplianceStatus::NonCompliant,
];

/// Map an overall percent to its status label.
///
/// A critical failure downgrades the result by exactly one level, so even a
/// numerically perfect assessment cannot be rated Fully Compliant while a
/// critical criterion has failed.
pub fn classify_assessment(
    percent: f64,
    critical_fail: bool,
    config: &ScoringConfig,
) -> ComplianceStatus {
    let t = &config.status_thresholds;
    let mut level = if percent >= t.fully_compliant {
        0
    } else if percent >= t.substantial {
        1
    } else if percent >= t.partial {
        2
    } else {
        3
    };
    if critical_fail {
        level = (level + 1).min(STATUS_LEVELS.len() - 1);
    }
    STATUS_LEVELS[level]
}
