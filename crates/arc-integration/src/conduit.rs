//! Conduit-backed user directory
//!
//! Lists accounts by running `<tool> call-conduit user.query`, which talks
//! to the review server using the tool's own credentials.

use arc_core::error::{ArcHelperError, Result};
use arc_core::types::UserRecord;
use arc_core::users::UserQuery;
use serde::Deserialize;
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::debug;

/// Envelope returned by `call-conduit`
#[derive(Debug, Deserialize)]
struct ConduitEnvelope {
    #[serde(default)]
    error: Option<String>,
    #[serde(default, rename = "errorMessage")]
    error_message: Option<String>,
    #[serde(default)]
    response: Option<Vec<UserRecord>>,
}

/// Queries users through the underlying tool's conduit client
#[derive(Debug, Clone)]
pub struct ConduitUserQuery {
    binary: String,
    method: String,
}

impl ConduitUserQuery {
    /// Create a query running `binary call-conduit method`
    pub fn new(binary: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
            method: method.into(),
        }
    }

    fn command_line(&self) -> String {
        format!("{} call-conduit {}", self.binary, self.method)
    }
}

impl UserQuery for ConduitUserQuery {
    fn query_users(&self) -> Result<Vec<UserRecord>> {
        let command = self.command_line();
        debug!("Running {}", command);

        let mut child = Command::new(&self.binary)
            .arg("call-conduit")
            .arg(&self.method)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ArcHelperError::Command {
                command: command.clone(),
                message: e.to_string(),
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(b"{}")?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(ArcHelperError::Command {
                command,
                message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        parse_user_query(&output.stdout)
    }
}

/// Parse the JSON printed by `call-conduit user.query`
pub fn parse_user_query(stdout: &[u8]) -> Result<Vec<UserRecord>> {
    let envelope: ConduitEnvelope = serde_json::from_slice(stdout)?;

    if let Some(code) = envelope.error {
        let message = envelope.error_message.unwrap_or_default();
        return Err(ArcHelperError::DirectoryUnavailable(format!(
            "conduit error {}: {}",
            code, message
        )));
    }

    envelope.response.ok_or_else(|| {
        ArcHelperError::DirectoryUnavailable("conduit returned no response".to_string())
    })
}
