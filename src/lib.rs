// Export modules for library usage
pub mod config;
pub mod core;
pub mod errors;
pub mod normalize;
pub mod scoring;
pub mod snapshot;

// Re-export commonly used types
pub use crate::core::{
    Assessment, AssessmentScores, Criterion, CriterionScore, ResolvedStatus, ResponseCategory,
    ScoreMap, ScoreSummary, Section, SectionScores, Standard, StandardScores,
};

pub use crate::config::{ScoringConfig, StatusThresholds};
pub use crate::errors::EngineError;
pub use crate::normalize::{compare_codes, normalize_code};

pub use crate::scoring::{
    build_criteria_map, classify_assessment, classify_response, resolve_all, score_assessment,
    score_leaf, score_section, score_standard, ComplianceStatus,
};

pub use crate::snapshot::{create_snapshot, create_snapshot_at, AssessmentSnapshot, SectionBreakdown};
