//! Scoring configuration.
//!
//! All point values, severity bounds, majority-override fractions, and status
//! thresholds live here with serde defaults, so a deployment can override the
//! scoring model from a TOML fragment without touching engine code. The
//! defaults reproduce the production accreditation model.

use crate::errors::EngineError;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Point model and override rules for the scoring engine.
///
/// Full compliance scores a flat point value independent of severity;
/// partial and non-compliant grades start from a severity-1 base and step
/// down per severity level. This asymmetry is intentional: full compliance
/// waives the severity penalty entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Points for a fully compliant response, at every severity.
    #[serde(default = "default_compliant_points")]
    pub compliant_points: f64,

    /// Points for a partially compliant response at severity 1.
    #[serde(default = "default_partial_base")]
    pub partial_base: f64,

    /// Points for a non-compliant response at severity 1.
    #[serde(default = "default_non_compliant_base")]
    pub non_compliant_base: f64,

    /// Point deduction per severity level above 1.
    #[serde(default = "default_severity_step")]
    pub severity_step: f64,

    /// Lowest accepted severity.
    #[serde(default = "default_min_severity")]
    pub min_severity: u8,

    /// Highest accepted severity.
    #[serde(default = "default_max_severity")]
    pub max_severity: u8,

    /// Failing fraction above which a root's averaged points are capped at
    /// the partial threshold for its severity.
    #[serde(default = "default_majority_fraction")]
    pub majority_fraction: f64,

    /// Failing fraction at or above which the cap drops to the non-compliant
    /// value for the root's severity.
    #[serde(default = "default_supermajority_fraction")]
    pub supermajority_fraction: f64,

    /// Percent thresholds for the overall compliance status labels.
    #[serde(default)]
    pub status_thresholds: StatusThresholds,
}

/// Percent thresholds mapping an overall score to a status label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusThresholds {
    /// Minimum percent for "Fully Compliant".
    #[serde(default = "default_fully_compliant_min")]
    pub fully_compliant: f64,

    /// Minimum percent for "Substantial Compliance".
    #[serde(default = "default_substantial_min")]
    pub substantial: f64,

    /// Minimum percent for "Partial Compliance".
    #[serde(default = "default_partial_min")]
    pub partial: f64,
}

fn default_compliant_points() -> f64 {
    80.0
}

fn default_partial_base() -> f64 {
    75.0
}

fn default_non_compliant_base() -> f64 {
    35.0
}

fn default_severity_step() -> f64 {
    10.0
}

fn default_min_severity() -> u8 {
    1
}

fn default_max_severity() -> u8 {
    4
}

fn default_majority_fraction() -> f64 {
    0.5
}

fn default_supermajority_fraction() -> f64 {
    0.75
}

fn default_fully_compliant_min() -> f64 {
    85.0
}

fn default_substantial_min() -> f64 {
    70.0
}

fn default_partial_min() -> f64 {
    50.0
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            compliant_points: default_compliant_points(),
            partial_base: default_partial_base(),
            non_compliant_base: default_non_compliant_base(),
            severity_step: default_severity_step(),
            min_severity: default_min_severity(),
            max_severity: default_max_severity(),
            majority_fraction: default_majority_fraction(),
            supermajority_fraction: default_supermajority_fraction(),
            status_thresholds: StatusThresholds::default(),
        }
    }
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self {
            fully_compliant: default_fully_compliant_min(),
            substantial: default_substantial_min(),
            partial: default_partial_min(),
        }
    }
}

impl ScoringConfig {
    /// Points for a partially compliant grade at the given severity.
    pub fn partial_points(&self, severity: u8) -> f64 {
        self.partial_base - f64::from(severity.saturating_sub(1)) * self.severity_step
    }

    /// Points for a non-compliant grade at the given severity.
    pub fn non_compliant_points(&self, severity: u8) -> f64 {
        self.non_compliant_base - f64::from(severity.saturating_sub(1)) * self.severity_step
    }

    /// Check internal consistency of the configuration.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.min_severity == 0 || self.min_severity > self.max_severity {
            return Err(EngineError::Config(format!(
                "severity range {}..={} is empty or starts at zero",
                self.min_severity, self.max_severity
            )));
        }
        if self.compliant_points <= self.partial_base {
            return Err(EngineError::Config(
                "compliant_points must exceed partial_base".to_string(),
            ));
        }
        if self.partial_base <= self.non_compliant_base {
            return Err(EngineError::Config(
                "partial_base must exceed non_compliant_base".to_string(),
            ));
        }
        for fraction in [self.majority_fraction, self.supermajority_fraction] {
            if !(0.0..=1.0).contains(&fraction) {
                return Err(EngineError::Config(format!(
                    "override fraction {fraction} must be between 0.0 and 1.0"
                )));
            }
        }
        if self.supermajority_fraction < self.majority_fraction {
            return Err(EngineError::Config(
                "supermajority_fraction must not be below majority_fraction".to_string(),
            ));
        }
        let t = &self.status_thresholds;
        if t.fully_compliant < t.substantial || t.substantial < t.partial {
            return Err(EngineError::Config(
                "status thresholds must be non-increasing from fully_compliant to partial"
                    .to_string(),
            ));
        }
        Ok(())
    }

    /// Parse a configuration from a TOML string, applying field defaults.
    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        let config: Self =
            toml::from_str(contents).context("failed to parse scoring configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;
        let config = Self::from_toml_str(&contents)?;
        log::debug!("loaded scoring config from {}", path.display());
        Ok(config)
    }
}
