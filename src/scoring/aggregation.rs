//! Standard, section, and overall rollups over the resolved score map.
//!
//! Aggregation is plain summation: every scored criterion contributes its
//! points against a maximum of 100. A critical failure inside a standard or
//! section zeroes that unit's total and percent while keeping its maximum,
//! so the failure stays visible in the denominator.

use crate::config::ScoringConfig;
use crate::core::{
    Assessment, AssessmentScores, Criterion, ScoreMap, ScoreSummary, Section, SectionScores,
    Standard, StandardScores,
};
use crate::errors::EngineError;
use crate::normalize::normalize_code;
use crate::scoring::resolver::resolve_all;
use std::collections::HashMap;

const MAX_POINTS_PER_CRITERION: f64 = 100.0;

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn percent_of(total: f64, max: f64) -> f64 {
    if max == 0.0 {
        0.0
    } else {
        round2(total / max * 100.0)
    }
}

/// The code a criterion is keyed by, falling back to its form id when the
/// metadata left the code field empty.
fn criterion_key(criterion: &Criterion) -> String {
    if criterion.code.trim().is_empty() {
        normalize_code(&criterion.id)
    } else {
        normalize_code(&criterion.code)
    }
}

/// Flatten an assessment tree into the resolver's input map.
pub fn build_criteria_map(assessment: &Assessment) -> HashMap<String, Criterion> {
    let mut criteria = HashMap::new();
    for section in &assessment.sections {
        for standard in &section.standards {
            for criterion in &standard.criteria {
                let key = criterion_key(criterion);
                if !key.is_empty() {
                    criteria.insert(key, criterion.clone());
                }
            }
        }
    }
    criteria
}

/// Roll up one standard from the global score map.
pub fn score_standard(standard: &Standard, global: &ScoreMap) -> StandardScores {
    let mut total_score = 0.0;
    let mut max_score = 0.0;
    let mut critical_fail = false;
    let mut criteria_scores = ScoreMap::new();

    for criterion in &standard.criteria {
        let key = criterion_key(criterion);
        let Some(score) = global.get(&key) else {
            continue;
        };
        criteria_scores.insert(criterion.id.clone(), score.clone());
        if score.is_scored {
            if let Some(points) = score.points {
                total_score += points;
                max_score += MAX_POINTS_PER_CRITERION;
            }
        }
        if score.critical_fail {
            critical_fail = true;
        }
    }

    if critical_fail {
        total_score = 0.0;
    }
    StandardScores {
        id: standard.id.clone(),
        percent: if critical_fail {
            0.0
        } else {
            percent_of(total_score, max_score)
        },
        total_score,
        max_score,
        critical_fail,
        criteria_scores,
    }
}

/// Roll up one section from its standards' results.
///
/// Any critical failure in the section zeroes the section's total and
/// percent outright.
pub fn score_section(section: &Section, global: &ScoreMap) -> SectionScores {
    let standards: Vec<StandardScores> = section
        .standards
        .iter()
        .map(|standard| score_standard(standard, global))
        .collect();

    let mut total_score: f64 = standards.iter().map(|s| s.total_score).sum();
    let max_score: f64 = standards.iter().map(|s| s.max_score).sum();
    let critical_fail = standards.iter().any(|s| s.critical_fail);

    if critical_fail {
        total_score = 0.0;
    }
    let percent = if critical_fail {
        0.0
    } else {
        percent_of(total_score, max_score)
    };

    SectionScores {
        id: section.id.clone(),
        percent,
        total_score,
        max_score,
        critical_fail,
        standards,
    }
}

fn overall_summary(sections: &[SectionScores]) -> ScoreSummary {
    let total_score: f64 = sections.iter().map(|s| s.total_score).sum();
    let max_score: f64 = sections.iter().map(|s| s.max_score).sum();
    let critical_fail = sections.iter().any(|s| s.critical_fail);
    ScoreSummary {
        percent: percent_of(total_score, max_score),
        total_score,
        max_score,
        critical_fail,
    }
}

/// Score a whole assessment: one graph resolution, then standard, section,
/// and overall rollups.
pub fn score_assessment(
    assessment: &Assessment,
    config: &ScoringConfig,
) -> Result<AssessmentScores, EngineError> {
    let criteria = build_criteria_map(assessment);
    let global_scores = resolve_all(&criteria, config)?;

    let sections: Vec<SectionScores> = assessment
        .sections
        .iter()
        .map(|section| score_section(section, &global_scores))
        .collect();
    let overall = overall_summary(&sections);

    Ok(AssessmentScores {
        overall,
        sections,
        global_scores,
    })
}
