//! Error types for the scoring engine.
//!
//! The engine distinguishes routine incomplete input (unanswered responses,
//! missing dependency codes, unrecognized free text) from configuration bugs
//! in the criteria map itself. The former degrade to unscored results and
//! never error; the latter surface as [`EngineError`] so a broken program
//! definition is caught loudly rather than silently mis-scored.

use thiserror::Error;

/// Errors raised for malformed criteria maps or scoring configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A criterion code normalized to an empty string and cannot key a result.
    #[error("criterion code {raw:?} normalizes to an empty string")]
    EmptyCode { raw: String },

    /// A criterion declared a severity outside the supported range.
    #[error("criterion {code}: severity {severity} outside supported range {min}..={max}")]
    SeverityOutOfRange {
        code: String,
        severity: u8,
        min: u8,
        max: u8,
    },

    /// The scoring configuration is internally inconsistent.
    #[error("invalid scoring configuration: {0}")]
    Config(String),
}
