//! Full assessment tree walk: criteria map construction, graph resolution,
//! rollups, status classification, and the audit snapshot contract.

mod common;

use auditmap::{
    classify_assessment, create_snapshot_at, score_assessment, Assessment, ComplianceStatus,
    Criterion, ScoringConfig, Section, Standard,
};
use common::{critical, leaf, root};
use pretty_assertions::assert_eq;

fn fixture() -> Assessment {
    Assessment {
        sections: vec![
            Section {
                id: "sec-1".to_string(),
                standards: vec![Standard {
                    id: "std-1".to_string(),
                    criteria: vec![
                        leaf("2.4.1.4", "C", 3),
                        leaf("2.4.1.5", "NC", 3),
                        root("2.5.1.1", 3, &["2.4.1.4", "2.4.1.5"]),
                    ],
                }],
            },
            Section {
                id: "sec-2".to_string(),
                standards: vec![Standard {
                    id: "std-2".to_string(),
                    criteria: vec![critical(leaf("7.1.1.1", "NC", 2)), leaf("7.1.1.2", "C", 1)],
                }],
            },
        ],
    }
}

#[test]
fn scores_a_full_assessment_tree() {
    let scores = score_assessment(&fixture(), &ScoringConfig::default()).unwrap();

    let sec1 = &scores.sections[0];
    assert_eq!(sec1.total_score, 142.5);
    assert_eq!(sec1.max_score, 300.0);
    assert_eq!(sec1.percent, 47.5);
    assert!(!sec1.critical_fail);

    let std1 = &sec1.standards[0];
    assert_eq!(std1.criteria_scores["id-2.5.1.1"].points, Some(47.5));

    // The critical failure zeroes section 2 but keeps its maximum in play
    let sec2 = &scores.sections[1];
    assert!(sec2.critical_fail);
    assert_eq!(sec2.total_score, 0.0);
    assert_eq!(sec2.percent, 0.0);
    assert_eq!(sec2.max_score, 200.0);

    assert_eq!(scores.overall.total_score, 142.5);
    assert_eq!(scores.overall.max_score, 500.0);
    assert_eq!(scores.overall.percent, 28.5);
    assert!(scores.overall.critical_fail);
}

#[test]
fn overall_status_reflects_percent_and_critical_failure() {
    let config = ScoringConfig::default();
    let scores = score_assessment(&fixture(), &config).unwrap();
    assert_eq!(
        classify_assessment(scores.overall.percent, scores.overall.critical_fail, &config),
        ComplianceStatus::NonCompliant
    );
}

#[test]
fn empty_code_falls_back_to_the_form_id() {
    let assessment = Assessment {
        sections: vec![Section {
            id: "sec-1".to_string(),
            standards: vec![Standard {
                id: "std-1".to_string(),
                criteria: vec![Criterion {
                    code: String::new(),
                    response: "C".to_string(),
                    ..Criterion::new("8.1.1.1", "")
                }],
            }],
        }],
    };
    let scores = score_assessment(&assessment, &ScoringConfig::default()).unwrap();
    assert_eq!(scores.global_scores["8.1.1.1"].points, Some(80.0));
    assert_eq!(scores.overall.percent, 80.0);
}

#[test]
fn snapshot_preserves_the_external_contract() {
    let scores = score_assessment(&fixture(), &ScoringConfig::default()).unwrap();
    let timestamp = "2026-08-24T09:30:00Z".parse().unwrap();
    let snapshot = create_snapshot_at(&scores, timestamp);

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["overallPercent"], 28.5);
    assert_eq!(json["overallTotalScore"], 142.5);
    assert_eq!(json["overallMaxScore"], 500.0);
    assert_eq!(json["criticalFail"], true);
    assert_eq!(json["timestamp"], "2026-08-24T09:30:00Z");

    let breakdown = json["sectionBreakdown"].as_array().unwrap();
    assert_eq!(breakdown.len(), 2);
    assert_eq!(breakdown[0]["id"], "sec-1");
    assert_eq!(breakdown[0]["percent"], 47.5);
    assert_eq!(breakdown[1]["criticalFail"], true);
    assert_eq!(breakdown[1]["totalScore"], 0.0);
    assert_eq!(breakdown[1]["maxScore"], 200.0);
}

#[test]
fn rescoring_the_same_assessment_is_idempotent() {
    let config = ScoringConfig::default();
    let first = score_assessment(&fixture(), &config).unwrap();
    let second = score_assessment(&fixture(), &config).unwrap();
    assert_eq!(first, second);
}
