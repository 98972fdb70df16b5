//! Top-level Veracity configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{TelemetryConfig, Thresholds, ThresholdsConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`VERACITY_*`)
/// 2. Project config (`veracity.toml` in project root)
/// 3. User config (`~/.veracity/config.toml`)
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct QualityConfig {
    pub thresholds: ThresholdsConfig,
    pub telemetry: TelemetryConfig,
}

impl QualityConfig {
    /// Load configuration with layered resolution.
    pub fn load(root: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 3 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(ConfigError::ParseError { .. }) => {
                        return Err(ConfigError::ParseError {
                            path: user_config_path.display().to_string(),
                            message: "invalid TOML in user config".to_string(),
                        });
                    }
                    Err(_) => {
                        // Non-parse errors from user config are warnings, not fatal.
                        // Continue with defaults.
                    }
                }
            }
        }

        // Layer 2: project config
        let project_config_path = root.join("veracity.toml");
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 1 (highest priority): environment variables
        Self::apply_env_overrides(&mut config);

        // Validate the final config
        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Resolve the threshold section into the immutable set handed to the
    /// evaluation engine.
    pub fn resolve_thresholds(&self) -> Thresholds {
        self.thresholds.resolve()
    }

    /// Validate the configuration values.
    ///
    /// Tier orderings must be strict: a warn cutoff at or above its severe
    /// cutoff would make the lower tier unreachable.
    pub fn validate(config: &QualityConfig) -> Result<(), ConfigError> {
        let t = config.thresholds.resolve();

        if t.worklog_warn_minutes >= t.worklog_severe_minutes
            || t.worklog_severe_minutes >= t.worklog_critical_minutes
        {
            return Err(ConfigError::ValidationFailed {
                field: "thresholds.worklog_warn_minutes".to_string(),
                message: "worklog tiers must satisfy warn < severe < critical".to_string(),
            });
        }
        if t.github_diff_warn_lines >= t.github_diff_severe_lines {
            return Err(ConfigError::ValidationFailed {
                field: "thresholds.github_diff_warn_lines".to_string(),
                message: "github diff tiers must satisfy warn < severe".to_string(),
            });
        }
        for (field, pair) in [
            ("thresholds.figma_files_warn", t.figma_files_updated),
            ("thresholds.figma_nodes_warn", t.figma_nodes_changed),
            ("thresholds.figma_comments_warn", t.figma_comments),
            ("thresholds.figma_mentions_warn", t.figma_mentions),
            ("thresholds.figma_components_warn", t.figma_components_published),
            ("thresholds.figma_shared_links_warn", t.figma_shared_links),
        ] {
            if pair.warn >= pair.severe {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "figma tiers must satisfy warn < severe".to_string(),
                });
            }
        }
        for (field, ratio) in [
            ("thresholds.worklog_outlier_ratio", t.worklog_outlier_ratio),
            ("thresholds.activity_outlier_ratio", t.activity_outlier_ratio),
        ] {
            if ratio < 1.0 {
                return Err(ConfigError::ValidationFailed {
                    field: field.to_string(),
                    message: "outlier ratios must be at least 1.0".to_string(),
                });
            }
        }
        if t.overlap_severe_minutes <= 0.0 {
            return Err(ConfigError::ValidationFailed {
                field: "thresholds.overlap_severe_minutes".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&t.overlap_severe_ratio) || t.overlap_severe_ratio == 0.0 {
            return Err(ConfigError::ValidationFailed {
                field: "thresholds.overlap_severe_ratio".to_string(),
                message: "must be between 0.0 (exclusive) and 1.0".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the user config path: `~/.veracity/config.toml`.
    fn user_config_path() -> Option<std::path::PathBuf> {
        dirs_path().map(|d| d.join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut QualityConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: QualityConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    fn merge(base: &mut QualityConfig, other: &QualityConfig) {
        // Thresholds
        let t = &other.thresholds;
        let bt = &mut base.thresholds;
        if t.worklog_warn_minutes.is_some() {
            bt.worklog_warn_minutes = t.worklog_warn_minutes;
        }
        if t.worklog_severe_minutes.is_some() {
            bt.worklog_severe_minutes = t.worklog_severe_minutes;
        }
        if t.worklog_critical_minutes.is_some() {
            bt.worklog_critical_minutes = t.worklog_critical_minutes;
        }
        if t.github_diff_warn_lines.is_some() {
            bt.github_diff_warn_lines = t.github_diff_warn_lines;
        }
        if t.github_diff_severe_lines.is_some() {
            bt.github_diff_severe_lines = t.github_diff_severe_lines;
        }
        if t.figma_files_warn.is_some() {
            bt.figma_files_warn = t.figma_files_warn;
        }
        if t.figma_files_severe.is_some() {
            bt.figma_files_severe = t.figma_files_severe;
        }
        if t.figma_nodes_warn.is_some() {
            bt.figma_nodes_warn = t.figma_nodes_warn;
        }
        if t.figma_nodes_severe.is_some() {
            bt.figma_nodes_severe = t.figma_nodes_severe;
        }
        if t.figma_comments_warn.is_some() {
            bt.figma_comments_warn = t.figma_comments_warn;
        }
        if t.figma_comments_severe.is_some() {
            bt.figma_comments_severe = t.figma_comments_severe;
        }
        if t.figma_mentions_warn.is_some() {
            bt.figma_mentions_warn = t.figma_mentions_warn;
        }
        if t.figma_mentions_severe.is_some() {
            bt.figma_mentions_severe = t.figma_mentions_severe;
        }
        if t.figma_components_warn.is_some() {
            bt.figma_components_warn = t.figma_components_warn;
        }
        if t.figma_components_severe.is_some() {
            bt.figma_components_severe = t.figma_components_severe;
        }
        if t.figma_shared_links_warn.is_some() {
            bt.figma_shared_links_warn = t.figma_shared_links_warn;
        }
        if t.figma_shared_links_severe.is_some() {
            bt.figma_shared_links_severe = t.figma_shared_links_severe;
        }
        if t.worklog_outlier_ratio.is_some() {
            bt.worklog_outlier_ratio = t.worklog_outlier_ratio;
        }
        if t.activity_outlier_ratio.is_some() {
            bt.activity_outlier_ratio = t.activity_outlier_ratio;
        }
        if t.overlap_severe_minutes.is_some() {
            bt.overlap_severe_minutes = t.overlap_severe_minutes;
        }
        if t.overlap_severe_ratio.is_some() {
            bt.overlap_severe_ratio = t.overlap_severe_ratio;
        }

        // Telemetry
        if other.telemetry.enabled.is_some() {
            base.telemetry.enabled = other.telemetry.enabled;
        }
        if other.telemetry.filter.is_some() {
            base.telemetry.filter = other.telemetry.filter.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `VERACITY_WORKLOG_WARN_MINUTES`, `VERACITY_ACTIVITY_OUTLIER_RATIO`, etc.
    fn apply_env_overrides(config: &mut QualityConfig) {
        if let Ok(val) = std::env::var("VERACITY_WORKLOG_WARN_MINUTES") {
            if let Ok(v) = val.parse::<f64>() {
                config.thresholds.worklog_warn_minutes = Some(v);
            }
        }
        if let Ok(val) = std::env::var("VERACITY_WORKLOG_SEVERE_MINUTES") {
            if let Ok(v) = val.parse::<f64>() {
                config.thresholds.worklog_severe_minutes = Some(v);
            }
        }
        if let Ok(val) = std::env::var("VERACITY_WORKLOG_CRITICAL_MINUTES") {
            if let Ok(v) = val.parse::<f64>() {
                config.thresholds.worklog_critical_minutes = Some(v);
            }
        }
        if let Ok(val) = std::env::var("VERACITY_GITHUB_DIFF_WARN_LINES") {
            if let Ok(v) = val.parse::<f64>() {
                config.thresholds.github_diff_warn_lines = Some(v);
            }
        }
        if let Ok(val) = std::env::var("VERACITY_GITHUB_DIFF_SEVERE_LINES") {
            if let Ok(v) = val.parse::<f64>() {
                config.thresholds.github_diff_severe_lines = Some(v);
            }
        }
        if let Ok(val) = std::env::var("VERACITY_WORKLOG_OUTLIER_RATIO") {
            if let Ok(v) = val.parse::<f64>() {
                config.thresholds.worklog_outlier_ratio = Some(v);
            }
        }
        if let Ok(val) = std::env::var("VERACITY_ACTIVITY_OUTLIER_RATIO") {
            if let Ok(v) = val.parse::<f64>() {
                config.thresholds.activity_outlier_ratio = Some(v);
            }
        }
        if let Ok(val) = std::env::var("VERACITY_TELEMETRY_ENABLED") {
            if let Ok(v) = val.parse::<bool>() {
                config.telemetry.enabled = Some(v);
            }
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Returns the user-level veracity config directory: `~/.veracity/`.
fn dirs_path() -> Option<std::path::PathBuf> {
    home_dir().map(|h| h.join(".veracity"))
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<std::path::PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(std::path::PathBuf::from)
}
