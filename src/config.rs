// src/config.rs
//! Run configuration, optionally loaded from `cribsift.toml`.
//!
//! CLI flags override file values. Validation happens once, up front, before
//! any comparison runs: scorer name lists must resolve and be duplicate-free,
//! and the threshold must be a sane number.

use std::collections::HashSet;
use std::fs;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SiftError};
use crate::matching::metrics::{default_metric_names, metric_scorers};
use crate::matching::scorer::{default_matching_names, matching_scorers};

/// Name of the local configuration file.
pub const CONFIG_FILE: &str = "cribsift.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Scorer names used to rank match candidates, in order.
    #[serde(default = "default_matching_names")]
    pub match_scorers: Vec<String>,
    /// Scorer names used for the reported metric vector, in order.
    #[serde(default = "default_metric_names")]
    pub metric_scorers: Vec<String>,
    /// Mean-metric threshold below which a matched pair is flagged.
    #[serde(default = "default_avg_threshold")]
    pub avg_threshold: f64,
    /// Type names excluded from every comparison (provided scaffolding,
    /// test harnesses, and the like).
    #[serde(default)]
    pub excluded_type_names: Vec<String>,
    /// Run folder pairs in parallel.
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    /// 0 = quiet, 1 = per-pair progress, 2 = metric dumps.
    #[serde(default)]
    pub verbosity: u8,
}

fn default_avg_threshold() -> f64 {
    0.15
}

fn default_parallel() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            match_scorers: default_matching_names(),
            metric_scorers: default_metric_names(),
            avg_threshold: default_avg_threshold(),
            excluded_type_names: Vec::new(),
            parallel: default_parallel(),
            verbosity: 0,
        }
    }
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a config and loads `cribsift.toml` from the working directory
    /// if present.
    #[must_use]
    pub fn load() -> Self {
        let mut config = Self::new();
        config.load_local_config();
        config
    }

    pub fn load_local_config(&mut self) {
        if let Ok(content) = fs::read_to_string(CONFIG_FILE) {
            self.parse_toml(&content);
        }
    }

    /// Replaces this config with the parsed file content; missing keys fall
    /// back to defaults, malformed content is ignored.
    pub fn parse_toml(&mut self, content: &str) {
        if let Ok(parsed) = toml::from_str::<Config>(content) {
            *self = parsed;
        }
    }

    /// Validates the configuration before a run.
    ///
    /// # Errors
    /// Rejects duplicate or unknown scorer names and a non-finite or
    /// negative threshold.
    pub fn validate(&self) -> Result<()> {
        matching_scorers(&self.match_scorers)?;
        metric_scorers(&self.metric_scorers)?;
        if !self.avg_threshold.is_finite() || self.avg_threshold < 0.0 {
            return Err(SiftError::Config(format!(
                "avg_threshold must be a nonnegative number, got {}",
                self.avg_threshold
            )));
        }
        Ok(())
    }

    /// The exclusion names as a lookup set.
    #[must_use]
    pub fn excluded_set(&self) -> HashSet<String> {
        self.excluded_type_names.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn toml_overrides_and_defaults_mix() {
        let mut config = Config::new();
        config.parse_toml(
            r#"
            avg_threshold = 0.25
            excluded_type_names = ["Main", "Scaffold"]
            "#,
        );
        assert!((config.avg_threshold - 0.25).abs() < f64::EPSILON);
        assert_eq!(config.excluded_type_names.len(), 2);
        // Unspecified keys keep their defaults.
        assert_eq!(config.match_scorers, default_matching_names());
    }

    #[test]
    fn bad_scorer_list_fails_validation() {
        let mut config = Config::new();
        config.match_scorers = vec!["tree_diff".to_string(), "tree_diff".to_string()];
        assert!(config.validate().is_err());
    }

    #[test]
    fn bad_threshold_fails_validation() {
        let mut config = Config::new();
        config.avg_threshold = f64::NAN;
        assert!(config.validate().is_err());
        config.avg_threshold = -0.1;
        assert!(config.validate().is_err());
    }
}
