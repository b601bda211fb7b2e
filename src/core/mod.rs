//! Core domain types for the scoring engine.

use serde::{Deserialize, Serialize};

/// Results map produced by one full graph resolution, keyed by normalized
/// criterion code.
pub type ScoreMap = im::HashMap<String, CriterionScore>;

/// Canonical three-way compliance category of a raw response, plus the two
/// unscorable cases.
///
/// Produced once at the input boundary by
/// [`classify_response`](crate::scoring::classify_response); everything
/// downstream matches on this enum, never on raw strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResponseCategory {
    Compliant,
    PartiallyCompliant,
    NonCompliant,
    /// Explicitly marked not applicable; excluded from all aggregation.
    NotApplicable,
    /// Free text that matches no known category; treated as unscored.
    Unrecognized,
}

/// Displayed status of a resolved criterion.
///
/// Mirrors [`ResponseCategory`] for finalized criteria, with `Pending`
/// reserved for root criteria whose dependency subtree is incomplete. A
/// pending criterion must never show a provisional compliance grade.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResolvedStatus {
    #[serde(rename = "C")]
    Compliant,
    #[serde(rename = "PC")]
    PartiallyCompliant,
    #[serde(rename = "NC")]
    NonCompliant,
    #[serde(rename = "NA")]
    NotApplicable,
    Pending,
}

impl From<ResponseCategory> for ResolvedStatus {
    fn from(category: ResponseCategory) -> Self {
        match category {
            ResponseCategory::Compliant => ResolvedStatus::Compliant,
            ResponseCategory::PartiallyCompliant => ResolvedStatus::PartiallyCompliant,
            ResponseCategory::NonCompliant => ResolvedStatus::NonCompliant,
            ResponseCategory::NotApplicable | ResponseCategory::Unrecognized => {
                ResolvedStatus::NotApplicable
            }
        }
    }
}

impl std::fmt::Display for ResolvedStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ResolvedStatus::Compliant => "C",
            ResolvedStatus::PartiallyCompliant => "PC",
            ResolvedStatus::NonCompliant => "NC",
            ResolvedStatus::NotApplicable => "NA",
            ResolvedStatus::Pending => "Pending",
        };
        f.write_str(label)
    }
}

/// One inspectable requirement as supplied by the form-metadata layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Criterion {
    pub id: String,
    /// Hierarchical dotted code, possibly still decorated; the engine
    /// normalizes it defensively on every read.
    pub code: String,
    /// Raw response string as entered on the form.
    pub response: String,
    pub is_critical: bool,
    /// Severity level, practically 1-4; modulates partial and non-compliant
    /// point values.
    pub severity: u8,
    /// True iff `links` is non-empty; precomputed by the caller.
    pub is_root: bool,
    /// Codes of the criteria this one derives its score from. May carry
    /// `-root(...)` back-reference tags.
    pub links: Vec<String>,
}

impl Criterion {
    /// A leaf criterion with no links and default severity.
    pub fn new(id: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            code: code.into(),
            response: String::new(),
            is_critical: false,
            severity: 1,
            is_root: false,
            links: Vec::new(),
        }
    }
}

/// Computed result for one criterion, keyed by normalized code in the
/// output [`ScoreMap`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CriterionScore {
    /// 0-100 points, or `None` while the criterion is not scorable.
    pub points: Option<f64>,
    /// Displayed status; `Pending` only for roots with incomplete subtrees.
    pub response: ResolvedStatus,
    /// True exactly when `points` is present.
    pub is_scored: bool,
    /// True for a root whose dependency subtree still has unresolved or
    /// not-applicable inputs. Always false for leaves.
    pub is_draft: bool,
    /// True if this criterion or any transitively linked critical criterion
    /// has failed. Monotonic upward through the graph.
    pub critical_fail: bool,
    /// Normalized dependency codes that actually contribute to this result.
    pub root_sources: Vec<String>,
}

impl CriterionScore {
    /// Neutral placeholder for a dependency that cannot be resolved:
    /// missing from the map or revisited on a cycle. Unscored, never draft,
    /// never failing.
    pub fn unresolved() -> Self {
        Self {
            points: None,
            response: ResolvedStatus::NotApplicable,
            is_scored: false,
            is_draft: false,
            critical_fail: false,
            root_sources: Vec::new(),
        }
    }
}

/// A standard grouping several criteria on the inspection form.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Standard {
    pub id: String,
    pub criteria: Vec<Criterion>,
}

/// A section grouping several standards.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub standards: Vec<Standard>,
}

/// The full inspection form as handed to the engine.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    pub sections: Vec<Section>,
}

/// Rolled-up score totals for a standard, section, or the whole assessment.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreSummary {
    pub percent: f64,
    pub total_score: f64,
    pub max_score: f64,
    pub critical_fail: bool,
}

/// Aggregated results for one standard.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StandardScores {
    pub id: String,
    pub percent: f64,
    pub total_score: f64,
    pub max_score: f64,
    pub critical_fail: bool,
    /// Per-criterion results keyed by the criterion's form id.
    pub criteria_scores: ScoreMap,
}

/// Aggregated results for one section.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SectionScores {
    pub id: String,
    pub percent: f64,
    pub total_score: f64,
    pub max_score: f64,
    pub critical_fail: bool,
    pub standards: Vec<StandardScores>,
}

/// Full scoring output for an assessment tree.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AssessmentScores {
    pub overall: ScoreSummary,
    pub sections: Vec<SectionScores>,
    /// The graph resolver's raw per-criterion output, keyed by normalized
    /// code. Exposed for badges and diagnostics.
    pub global_scores: ScoreMap,
}
