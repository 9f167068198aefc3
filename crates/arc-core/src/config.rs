//! Configuration management for arc-helper

use crate::args::ReviewerFlagRewriter;
use crate::error::{ArcHelperError, Result};
use crate::settings::{ConfigReconciler, DEFAULT_PROTECTED_KEY};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Project-local configuration file
pub const PROJECT_CONFIG_PATH: &str = ".arc-helper/config.toml";

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcHelperConfig {
    /// Underlying tool settings
    pub tool: ToolConfig,
    /// Settings-file reconciliation
    pub settings: SettingsConfig,
    /// Reviewer flag names
    pub reviewers: ReviewersConfig,
}

impl ArcHelperConfig {
    /// Load configuration from a TOML file; a missing file yields defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No configuration at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config = toml::from_str(&content)
            .map_err(|e| ArcHelperError::Toml(format!("{}: {}", path.display(), e)))?;
        config_checked(config)
    }

    /// Reconciler honoring the configured protected-path key
    pub fn reconciler(&self) -> ConfigReconciler {
        ConfigReconciler::new(self.settings.protected_key.iter().cloned())
    }

    /// Rewriter for the configured reviewer flags
    pub fn rewriter(&self) -> ReviewerFlagRewriter {
        ReviewerFlagRewriter::new(
            self.reviewers.legacy_flag.clone(),
            self.reviewers.canonical_flag.clone(),
        )
    }
}

fn config_checked(config: ArcHelperConfig) -> Result<ArcHelperConfig> {
    if config.settings.protected_key.is_empty() {
        return Err(ArcHelperError::Config(
            "settings.protected_key must name at least one key".to_string(),
        ));
    }
    for flag in [&config.reviewers.legacy_flag, &config.reviewers.canonical_flag] {
        if !flag.starts_with("--") {
            return Err(ArcHelperError::Config(format!(
                "reviewer flag '{}' must start with --",
                flag
            )));
        }
    }
    Ok(config)
}

/// Underlying tool configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Executable to run
    pub binary: String,
    /// Conduit method listing users
    pub conduit_method: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            binary: "arc".to_string(),
            conduit_method: "user.query".to_string(),
        }
    }
}

/// Settings-file reconciliation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsConfig {
    /// The user's settings file
    pub user_file: PathBuf,
    /// Distributed default settings; reconciliation is skipped when unset
    pub default_file: Option<PathBuf>,
    /// Back up the user file before rewriting it
    pub create_backup: bool,
    /// Key path in the user file holding protected paths
    pub protected_key: Vec<String>,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            user_file: dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".arcrc"),
            default_file: None,
            create_backup: true,
            protected_key: DEFAULT_PROTECTED_KEY.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Reviewer flag configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewersConfig {
    /// Repeatable comma-list flag accepted from the user
    pub legacy_flag: String,
    /// Flag passed to the underlying tool
    pub canonical_flag: String,
}

impl Default for ReviewersConfig {
    fn default() -> Self {
        Self {
            legacy_flag: crate::args::reviewers::LEGACY_REVIEWER_FLAG.to_string(),
            canonical_flag: crate::args::reviewers::CANONICAL_REVIEWER_FLAG.to_string(),
        }
    }
}
