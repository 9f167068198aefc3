//! Environment verification
//!
//! Checks used by `arc-helper doctor`.

use arc_core::settings::ProtectedPaths;
use serde_json::Value;
use std::path::Path;
use std::process::Command;

/// Verification check result
#[derive(Debug, Clone)]
pub struct VerificationResult {
    /// Check name
    pub name: String,
    /// Whether the check passed
    pub passed: bool,
    /// Message describing the result
    pub message: String,
    /// Optional suggestion for fixing
    pub suggestion: Option<String>,
}

impl VerificationResult {
    /// Create a passing result
    pub fn pass(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            message: message.to_string(),
            suggestion: None,
        }
    }

    /// Create a failing result
    pub fn fail(name: &str, message: &str, suggestion: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            passed: false,
            message: message.to_string(),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }

    /// Create a warning result (passed but with suggestion)
    pub fn warn(name: &str, message: &str, suggestion: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            passed: true,
            message: format!("⚠ {}", message),
            suggestion: suggestion.map(|s| s.to_string()),
        }
    }
}

/// Verify the underlying review tool is runnable
pub fn verify_tool(binary: &str) -> VerificationResult {
    match Command::new(binary).arg("version").output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout);
            let version = version.lines().next().unwrap_or("").trim();
            VerificationResult::pass(binary, version)
        }
        Ok(_) => VerificationResult::warn(
            binary,
            "found, but 'version' failed",
            Some("Check that the tool is configured for your review server"),
        ),
        Err(_) => VerificationResult::fail(
            binary,
            "not found in PATH",
            Some("Install the review tool or set [tool].binary in .arc-helper/config.toml"),
        ),
    }
}

/// Verify Git is available
pub fn verify_git() -> VerificationResult {
    match Command::new("git").arg("--version").output() {
        Ok(output) if output.status.success() => {
            let version = String::from_utf8_lossy(&output.stdout);
            let version = version.trim().replace("git version ", "");
            VerificationResult::pass("Git", &version)
        }
        _ => VerificationResult::fail(
            "Git",
            "not found",
            Some("Install git: https://git-scm.com/"),
        ),
    }
}

fn read_mapping(path: &Path) -> Result<Option<Value>, String> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.to_string()),
    };
    let value: Value = serde_json::from_str(&content).map_err(|e| e.to_string())?;
    if value.is_object() {
        Ok(Some(value))
    } else {
        Err("top level is not a JSON object".to_string())
    }
}

/// Verify the user's settings file; a missing file is fine
pub fn verify_user_settings(path: &Path) -> VerificationResult {
    let name = "User settings";
    match read_mapping(path) {
        Ok(Some(_)) => VerificationResult::pass(name, &path.display().to_string()),
        Ok(None) => VerificationResult::warn(
            name,
            &format!("{} does not exist yet", path.display()),
            Some("It will be created on the next settings update"),
        ),
        Err(e) => VerificationResult::fail(
            name,
            &format!("{}: {}", path.display(), e),
            Some("Fix the file by hand or restore it from a .backup- copy"),
        ),
    }
}

/// Verify the distributed default settings file
pub fn verify_default_settings(path: Option<&Path>) -> VerificationResult {
    let name = "Default settings";
    let Some(path) = path else {
        return VerificationResult::warn(
            name,
            "not configured",
            Some("Set [settings].default_file to enable automatic settings updates"),
        );
    };
    match read_mapping(path) {
        Ok(Some(_)) => VerificationResult::pass(name, &path.display().to_string()),
        Ok(None) => VerificationResult::fail(
            name,
            &format!("{} does not exist", path.display()),
            None,
        ),
        Err(e) => VerificationResult::fail(name, &format!("{}: {}", path.display(), e), None),
    }
}

/// Verify the protected-path list stored in the user's settings
pub fn verify_protected_paths(path: &Path, key: &[String]) -> VerificationResult {
    let name = "Protected paths";
    let local = match read_mapping(path) {
        Ok(Some(v)) => v,
        Ok(None) | Err(_) => {
            return VerificationResult::warn(name, "no readable user settings", None);
        }
    };
    match ProtectedPaths::from_settings(&local, key) {
        Ok(p) if p.is_empty() => VerificationResult::pass(name, "none"),
        Ok(p) => VerificationResult::pass(name, &p.paths().join(", ")),
        Err(e) => VerificationResult::fail(
            name,
            &e.to_string(),
            Some(format!("'{}' must be a list of slash-separated paths", key.join("/")).as_str()),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn key() -> Vec<String> {
        vec!["arc-helper".to_string(), "do_not_auto_update".to_string()]
    }

    #[test]
    fn test_missing_tool() {
        let result = verify_tool("arc-helper-test-no-such-binary");
        assert!(!result.passed);
        assert!(result.suggestion.is_some());
    }

    #[test]
    fn test_user_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".arcrc");

        let result = verify_user_settings(&path);
        assert!(result.passed);
        assert!(result.message.starts_with('⚠'));

        fs::write(&path, "[1, 2]").unwrap();
        assert!(!verify_user_settings(&path).passed);

        fs::write(&path, "{\"a\": 1}").unwrap();
        let result = verify_user_settings(&path);
        assert!(result.passed);
        assert!(result.suggestion.is_none());
    }

    #[test]
    fn test_default_settings() {
        assert!(verify_default_settings(None).passed);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("default.arcrc");
        assert!(!verify_default_settings(Some(&path)).passed);

        fs::write(&path, "{}").unwrap();
        assert!(verify_default_settings(Some(&path)).passed);
    }

    #[test]
    fn test_protected_paths() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".arcrc");

        fs::write(&path, r#"{"arc-helper": {"do_not_auto_update": ["a", "b/c"]}}"#).unwrap();
        let result = verify_protected_paths(&path, &key());
        assert!(result.passed);
        assert_eq!(result.message, "a, b/c");

        fs::write(&path, r#"{"arc-helper": {"do_not_auto_update": {"a": 1}}}"#).unwrap();
        assert!(!verify_protected_paths(&path, &key()).passed);
    }
}
