//! Criterion code normalization and ordering.
//!
//! Criterion codes arrive from program metadata in several decorated forms:
//! organizational prefixes (`EMS_1.1.1.1`), short-form prefixes (`SE 1.1.1.1`),
//! back-reference tags (`1.2.1.6-root(1.2.1.6)`), and the occasional trailing
//! free text pasted into a code field. Every map key and every link lookup in
//! the engine goes through [`normalize_code`] so that the same criterion is
//! never keyed two different ways.

use std::cmp::Ordering;

/// Canonicalize a raw criterion code.
///
/// Strips the `EMS_` organizational prefix, the `SE ` short-form prefix,
/// and any `-root(...)` back-reference tag, then keeps only the first
/// whitespace-separated token. Empty or unusable input yields an empty
/// string rather than an error.
///
/// # Examples
///
/// ```rust
/// use auditmap::normalize::normalize_code;
///
/// assert_eq!(normalize_code("EMS_1.1.1.1"), "1.1.1.1");
/// assert_eq!(normalize_code("SE 1.1.1.1"), "1.1.1.1");
/// assert_eq!(normalize_code("1.1.1.1 extra text"), "1.1.1.1");
/// assert_eq!(normalize_code("1.2.1.6-root(1.2.1.6)"), "1.2.1.6");
/// ```
pub fn normalize_code(raw: &str) -> String {
    let mut code = raw.trim();
    if let Some(rest) = code.strip_prefix("EMS_") {
        code = rest;
    }
    if let Some(rest) = code.strip_prefix("SE ") {
        code = rest.trim_start();
    }
    if let Some(stripped) = strip_root_tag(code) {
        code = stripped;
    }
    code.split_whitespace().next().unwrap_or("").to_string()
}

/// Whether a raw link code carries a `-root(...)` back-reference tag.
///
/// Tagged links document an already-resolved root relationship; the resolver
/// uses this to exclude them from forward scoring edges.
pub fn has_root_tag(raw: &str) -> bool {
    strip_root_tag(raw.trim()).is_some()
}

fn strip_root_tag(code: &str) -> Option<&str> {
    let idx = code.find("-root(")?;
    if code.ends_with(')') {
        Some(&code[..idx])
    } else {
        None
    }
}

/// Compare two criterion codes segment by segment, numerically.
///
/// Both codes are normalized first. Equal strings compare equal without
/// numeric parsing; otherwise dot-separated segments are compared
/// left-to-right with missing or non-numeric segments treated as zero.
/// The resulting order decides which side of a mutual link declaration is
/// the structural dependency target (the lower code wins).
pub fn compare_codes(code_a: &str, code_b: &str) -> Ordering {
    let a = normalize_code(code_a);
    let b = normalize_code(code_b);
    if a == b {
        return Ordering::Equal;
    }

    let parts_a: Vec<u64> = a.split('.').map(segment_value).collect();
    let parts_b: Vec<u64> = b.split('.').map(segment_value).collect();

    let len = parts_a.len().max(parts_b.len());
    for i in 0..len {
        let value_a = parts_a.get(i).copied().unwrap_or(0);
        let value_b = parts_b.get(i).copied().unwrap_or(0);
        match value_a.cmp(&value_b) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    Ordering::Equal
}

fn segment_value(segment: &str) -> u64 {
    segment.parse().unwrap_or(0)
}
