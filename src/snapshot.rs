//! Point-in-time audit snapshot of an assessment's scores.
//!
//! The snapshot is persisted alongside a submission and read back by other
//! tooling, so its serialized field names are an external contract and must
//! not change: `overallPercent`, `overallTotalScore`, `overallMaxScore`,
//! `criticalFail`, `sectionBreakdown`, `timestamp`.

use crate::core::AssessmentScores;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-section line of the audit snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SectionBreakdown {
    pub id: String,
    pub percent: f64,
    #[serde(rename = "totalScore")]
    pub total_score: f64,
    #[serde(rename = "maxScore")]
    pub max_score: f64,
    #[serde(rename = "criticalFail")]
    pub critical_fail: bool,
}

/// Consolidated, non-mutating summary of one scoring pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssessmentSnapshot {
    #[serde(rename = "overallPercent")]
    pub overall_percent: f64,
    #[serde(rename = "overallTotalScore")]
    pub overall_total_score: f64,
    #[serde(rename = "overallMaxScore")]
    pub overall_max_score: f64,
    #[serde(rename = "criticalFail")]
    pub critical_fail: bool,
    #[serde(rename = "sectionBreakdown")]
    pub section_breakdown: Vec<SectionBreakdown>,
    /// ISO-8601 capture time.
    pub timestamp: DateTime<Utc>,
}

/// Snapshot the given scores at the current time.
pub fn create_snapshot(scores: &AssessmentScores) -> AssessmentSnapshot {
    create_snapshot_at(scores, Utc::now())
}

/// Snapshot the given scores at an explicit capture time.
pub fn create_snapshot_at(
    scores: &AssessmentScores,
    timestamp: DateTime<Utc>,
) -> AssessmentSnapshot {
    AssessmentSnapshot {
        overall_percent: scores.overall.percent,
        overall_total_score: scores.overall.total_score,
        overall_max_score: scores.overall.max_score,
        critical_fail: scores.overall.critical_fail,
        section_breakdown: scores
            .sections
            .iter()
            .map(|section| SectionBreakdown {
                id: section.id.clone(),
                percent: section.percent,
                total_score: section.total_score,
                max_score: section.max_score,
                critical_fail: section.critical_fail,
            })
            .collect(),
        timestamp,
    }
}
