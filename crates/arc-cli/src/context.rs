//! Shared wiring for commands

use crate::prompt::CliChooser;
use anyhow::{Context, Result};
use arc_core::config::{ArcHelperConfig, PROJECT_CONFIG_PATH};
use arc_core::types::UserRecord;
use arc_core::users::{NameResolver, StaticUsers, UserDirectory, UserQuery};
use arc_integration::ConduitUserQuery;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Global options every command sees
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Effective configuration
    pub config: ArcHelperConfig,
    /// Offline roster instead of the conduit query
    pub users_file: Option<PathBuf>,
    /// Never prompt
    pub non_interactive: bool,
}

impl AppContext {
    /// Build the context from global flags
    pub fn load(
        config_path: Option<&Path>,
        users_file: Option<PathBuf>,
        non_interactive: bool,
    ) -> Result<Self> {
        let path = match config_path {
            Some(p) => p.to_path_buf(),
            None => default_config_path(),
        };
        tracing::debug!("Using configuration {:?}", path);
        let config = ArcHelperConfig::load(&path)
            .with_context(|| format!("Failed to load configuration {}", path.display()))?;

        Ok(Self {
            config,
            users_file,
            non_interactive,
        })
    }

    /// Name resolver wired to the configured directory and prompt
    pub fn resolver(&self) -> Result<NameResolver<CliDirectory, CliChooser>> {
        let query = match &self.users_file {
            Some(path) => CliDirectory::File(load_users_file(path)?),
            None => CliDirectory::Conduit(ConduitUserQuery::new(
                self.config.tool.binary.clone(),
                self.config.tool.conduit_method.clone(),
            )),
        };
        Ok(NameResolver::new(
            UserDirectory::new(query),
            CliChooser::detect(self.non_interactive),
        ))
    }
}

/// Project config if present, otherwise the per-user config
pub fn default_config_path() -> PathBuf {
    let project = PathBuf::from(PROJECT_CONFIG_PATH);
    if project.exists() {
        return project;
    }
    directories::ProjectDirs::from("com", "arc-helper", "arc-helper")
        .map(|dirs| dirs.config_dir().join("config.toml"))
        .unwrap_or(project)
}

fn load_users_file(path: &Path) -> Result<StaticUsers> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read users file {}", path.display()))?;
    let users: Vec<UserRecord> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse users file {}", path.display()))?;
    Ok(StaticUsers::new(users))
}

/// Where the user roster comes from
pub enum CliDirectory {
    Conduit(ConduitUserQuery),
    File(StaticUsers),
}

impl UserQuery for CliDirectory {
    fn query_users(&self) -> arc_core::Result<Vec<UserRecord>> {
        match self {
            CliDirectory::Conduit(query) => {
                let spinner = ProgressBar::new_spinner();
                spinner.set_style(
                    ProgressStyle::default_spinner()
                        .template("{spinner} {msg}")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                spinner.set_message("Looking up users...");
                spinner.enable_steady_tick(Duration::from_millis(100));
                let result = query.query_users();
                spinner.finish_and_clear();
                result
            }
            CliDirectory::File(users) => users.query_users(),
        }
    }
}
