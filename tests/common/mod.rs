#![allow(dead_code)]

use auditmap::{normalize_code, Criterion};
use std::collections::HashMap;

/// A leaf criterion with the given response.
pub fn leaf(code: &str, response: &str, severity: u8) -> Criterion {
    Criterion {
        id: format!("id-{code}"),
        code: code.to_string(),
        response: response.to_string(),
        is_critical: false,
        severity,
        is_root: false,
        links: Vec::new(),
    }
}

/// A root criterion deriving from the given links.
pub fn root(code: &str, severity: u8, links: &[&str]) -> Criterion {
    Criterion {
        is_root: true,
        links: links.iter().map(|s| s.to_string()).collect(),
        ..leaf(code, "NA", severity)
    }
}

pub fn critical(criterion: Criterion) -> Criterion {
    Criterion {
        is_critical: true,
        ..criterion
    }
}

pub fn criteria_map(criteria: Vec<Criterion>) -> HashMap<String, Criterion> {
    criteria
        .into_iter()
        .map(|c| (normalize_code(&c.code), c))
        .collect()
}
