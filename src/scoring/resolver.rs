//! Graph resolution: the core of the scoring engine.
//!
//! Criteria form a directed dependency graph through their `links`. Leaves
//! score directly from their own response; roots derive their score from the
//! resolved scores of the criteria they link to, with critical-failure
//! propagation, majority-rule downgrades, and a Pending state while the
//! subtree is incomplete.
//!
//! Resolution is a memoized depth-first walk with an explicit per-call cache
//! and an in-progress set for cycle protection. The engine is stateless and
//! idempotent: the same definitions and responses always produce the same
//! results map, and nothing persists between calls.

use crate::config::ScoringConfig;
use crate::core::{Criterion, CriterionScore, ResolvedStatus, ResponseCategory, ScoreMap};
use crate::errors::EngineError;
use crate::normalize::{compare_codes, has_root_tag, normalize_code};
use crate::scoring::classification::classify_response;
use crate::scoring::leaf::{score_leaf, status_for_points};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Resolve every criterion in the map to its effective score.
///
/// Input codes are normalized defensively on read, even if the caller
/// already believes them normalized. Routine gaps in the data (unanswered
/// responses, dependency codes absent from the map, cycles) degrade to
/// unscored results; a structurally broken map (empty codes, severities
/// outside the configured range) fails loudly instead.
pub fn resolve_all(
    criteria: &HashMap<String, Criterion>,
    config: &ScoringConfig,
) -> Result<ScoreMap, EngineError> {
    config.validate()?;
    let index = build_index(criteria, config)?;

    // Fixed evaluation order keeps cycle break points, and therefore the
    // whole results map, deterministic across runs.
    let mut codes: Vec<&String> = index.keys().collect();
    codes.sort_by(|a, b| compare_codes(a, b));

    let mut ctx = ResolveContext::default();
    for code in codes {
        resolve(code, &index, config, &mut ctx);
    }
    Ok(ctx.cache.into_iter().collect())
}

/// Per-call resolution state: memoized results plus the DFS in-progress set.
#[derive(Default)]
struct ResolveContext {
    cache: HashMap<String, CriterionScore>,
    in_progress: HashSet<String>,
}

fn build_index<'a>(
    criteria: &'a HashMap<String, Criterion>,
    config: &ScoringConfig,
) -> Result<HashMap<String, &'a Criterion>, EngineError> {
    let mut index = HashMap::with_capacity(criteria.len());
    for criterion in criteria.values() {
        // Metadata sometimes leaves the code field empty; the form id is the
        // documented fallback. A criterion with neither is a config bug.
        let mut code = normalize_code(&criterion.code);
        if code.is_empty() {
            code = normalize_code(&criterion.id);
        }
        if code.is_empty() {
            return Err(EngineError::EmptyCode {
                raw: criterion.code.clone(),
            });
        }
        if !(config.min_severity..=config.max_severity).contains(&criterion.severity) {
            return Err(EngineError::SeverityOutOfRange {
                code,
                severity: criterion.severity,
                min: config.min_severity,
                max: config.max_severity,
            });
        }
        if index.insert(code.clone(), criterion).is_some() {
            log::debug!("duplicate criterion code {code} after normalization");
        }
    }
    Ok(index)
}

fn resolve(
    code: &str,
    index: &HashMap<String, &Criterion>,
    config: &ScoringConfig,
    ctx: &mut ResolveContext,
) -> CriterionScore {
    if let Some(hit) = ctx.cache.get(code) {
        return hit.clone();
    }
    if ctx.in_progress.contains(code) {
        log::warn!("circular dependency at criterion {code}; treating revisited edge as NA");
        return CriterionScore::unresolved();
    }
    let Some(def) = index.get(code).copied() else {
        // A dependency the form simply doesn't define yet
        return CriterionScore::unresolved();
    };

    ctx.in_progress.insert(code.to_string());
    let links = effective_links(code, def, index);
    let score = if links.is_empty() {
        score_leaf_criterion(def, config)
    } else {
        score_root_criterion(def, &links, index, config, ctx)
    };
    ctx.in_progress.remove(code);
    ctx.cache.insert(code.to_string(), score.clone());
    score
}

/// The forward scoring edges of a criterion.
///
/// Back-reference tagged links document an already-resolved root relationship
/// and are not edges. When two criteria list each other as plain links, the
/// lower code is taken as the structural dependency target and only the edge
/// from the higher code survives, so mutual declarations cannot recurse.
fn effective_links(
    code: &str,
    def: &Criterion,
    index: &HashMap<String, &Criterion>,
) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();
    for raw in &def.links {
        if has_root_tag(raw) {
            log::debug!("criterion {code}: link {raw:?} is a back-reference, not a scoring edge");
            continue;
        }
        let link = normalize_code(raw);
        if link.is_empty() || link == code || !seen.insert(link.clone()) {
            continue;
        }
        if links_back(&link, code, index) && compare_codes(code, &link) == Ordering::Less {
            log::debug!(
                "criterion {code}: mutual link with {link}; {link} is the dependent root"
            );
            continue;
        }
        links.push(link);
    }
    links
}

fn links_back(link: &str, code: &str, index: &HashMap<String, &Criterion>) -> bool {
    index.get(link).is_some_and(|def| {
        def.links
            .iter()
            .any(|raw| !has_root_tag(raw) && normalize_code(raw) == code)
    })
}

fn score_leaf_criterion(def: &Criterion, config: &ScoringConfig) -> CriterionScore {
    let mut category = classify_response(&def.response);
    // Critical-risk veto: partial compliance on a critical item is not an
    // acceptable grade; it fails outright.
    if def.is_critical && category == ResponseCategory::PartiallyCompliant {
        category = ResponseCategory::NonCompliant;
    }
    let points = score_leaf(category, def.severity, config);
    CriterionScore {
        points,
        response: category.into(),
        is_scored: points.is_some(),
        is_draft: false,
        critical_fail: def.is_critical && category == ResponseCategory::NonCompliant,
        root_sources: Vec::new(),
    }
}

fn score_root_criterion(
    def: &Criterion,
    links: &[String],
    index: &HashMap<String, &Criterion>,
    config: &ScoringConfig,
    ctx: &mut ResolveContext,
) -> CriterionScore {
    let deps: Vec<CriterionScore> = links
        .iter()
        .map(|link| resolve(link, index, config, ctx))
        .collect();

    // A critical failure anywhere below finalizes this root immediately,
    // even while sibling dependencies are still unanswered.
    if deps.iter().any(|dep| dep.critical_fail) {
        return CriterionScore {
            points: Some(0.0),
            response: ResolvedStatus::NonCompliant,
            is_scored: true,
            is_draft: false,
            critical_fail: true,
            root_sources: links.to_vec(),
        };
    }

    let scored: Vec<&CriterionScore> = deps.iter().filter(|dep| dep.points.is_some()).collect();
    let incomplete = deps.iter().any(|dep| dep.is_draft || !dep.is_scored);
    if incomplete || scored.is_empty() {
        return CriterionScore {
            points: None,
            response: ResolvedStatus::Pending,
            is_scored: false,
            is_draft: true,
            critical_fail: false,
            root_sources: links.to_vec(),
        };
    }

    let total: f64 = scored.iter().filter_map(|dep| dep.points).sum();
    let mut points = total / scored.len() as f64;

    // Majority-rule override: when most of the evidence fails, the umbrella
    // requirement cannot be rated higher than its worst-represented cluster,
    // whatever the raw average says.
    let failing = scored
        .iter()
        .filter(|dep| dep.response != ResolvedStatus::Compliant)
        .count();
    let failing_fraction = failing as f64 / scored.len() as f64;
    if failing_fraction >= config.supermajority_fraction {
        points = points.min(config.non_compliant_points(def.severity));
    } else if failing_fraction > config.majority_fraction {
        points = points.min(config.partial_points(def.severity));
    }

    let mut status = status_for_points(points, def.severity, config);
    if def.is_critical && status == ResolvedStatus::PartiallyCompliant {
        status = ResolvedStatus::NonCompliant;
    }
    CriterionScore {
        points: Some(points),
        response: status,
        is_scored: true,
        is_draft: false,
        critical_fail: def.is_critical && status == ResolvedStatus::NonCompliant,
        root_sources: links.to_vec(),
    }
}
