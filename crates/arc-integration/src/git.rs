//! Git-backed branch lookup

use arc_core::args::BranchQuery;
use arc_core::error::{ArcHelperError, Result};
use std::path::PathBuf;
use std::process::Command;
use tracing::debug;

/// Looks up the current branch's upstream with `git rev-parse`
#[derive(Debug, Clone, Default)]
pub struct GitBranchQuery {
    repo_dir: Option<PathBuf>,
}

impl GitBranchQuery {
    /// Query the repository containing the current directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Query the repository at `repo_dir`
    pub fn with_repo_dir(repo_dir: impl Into<PathBuf>) -> Self {
        Self {
            repo_dir: Some(repo_dir.into()),
        }
    }
}

impl BranchQuery for GitBranchQuery {
    fn upstream_branch(&self) -> Result<String> {
        let mut cmd = Command::new("git");
        if let Some(dir) = &self.repo_dir {
            cmd.current_dir(dir);
        }
        cmd.args(["rev-parse", "--abbrev-ref", "--symbolic-full-name", "@{u}"]);

        let output = cmd.output().map_err(|e| ArcHelperError::Command {
            command: "git rev-parse".to_string(),
            message: e.to_string(),
        })?;

        if !output.status.success() {
            return Err(classify_failure(&String::from_utf8_lossy(&output.stderr)));
        }

        let branch = String::from_utf8_lossy(&output.stdout).trim().to_string();
        debug!("Upstream branch: {}", branch);
        Ok(branch)
    }
}

/// Map `git rev-parse` stderr to an error
pub fn classify_failure(stderr: &str) -> ArcHelperError {
    if stderr.to_lowercase().contains("not a git repository") {
        ArcHelperError::NotARepository
    } else {
        ArcHelperError::Vcs(stderr.trim().to_string())
    }
}
