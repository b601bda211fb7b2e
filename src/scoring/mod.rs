//! The compliance scoring engine: response classification, leaf scoring,
//! graph resolution, and rollup aggregation.

pub mod aggregation;
pub mod classification;
pub mod leaf;
pub mod resolver;

pub use aggregation::{build_criteria_map, score_assessment, score_section, score_standard};
pub use classification::{classify_assessment, classify_response, ComplianceStatus};
pub use leaf::{score_leaf, status_for_points};
pub use resolver::resolve_all;
