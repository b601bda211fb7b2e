//! Leaf scoring: one (category, severity) pair to a point value.

use crate::config::ScoringConfig;
use crate::core::{ResolvedStatus, ResponseCategory};

/// Score a single response category at the given severity.
///
/// Full compliance scores the flat configured value at every severity;
/// partial and non-compliant grades step down from their severity-1 base.
/// Not-applicable and unrecognized responses score `None` and are excluded
/// from all aggregation.
pub fn score_leaf(category: ResponseCategory, severity: u8, config: &ScoringConfig) -> Option<f64> {
    match category {
        ResponseCategory::Compliant => Some(config.compliant_points),
        ResponseCategory::PartiallyCompliant => Some(config.partial_points(severity)),
        ResponseCategory::NonCompliant => Some(config.non_compliant_points(severity)),
        ResponseCategory::NotApplicable | ResponseCategory::Unrecognized => None,
    }
}

/// Derive a root criterion's displayed status from its final points.
///
/// Thresholds are severity-adjusted: the compliant bar is the flat compliant
/// value, the partial bar is the partial point value for this severity.
pub fn status_for_points(points: f64, severity: u8, config: &ScoringConfig) -> ResolvedStatus {
    if points >= config.compliant_points {
        ResolvedStatus::Compliant
    } else if points >= config.partial_points(severity) {
        ResolvedStatus::PartiallyCompliant
    } else {
        ResolvedStatus::NonCompliant
    }
}
