//! Protected settings paths
//!
//! The user's settings file names the subtrees reconciliation must leave
//! alone, as a list of slash-separated paths stored under a reserved key.

use crate::error::{ArcHelperError, Result};
use serde_json::Value;
use tracing::warn;

/// Separator between keys in a settings path
pub const PATH_SEPARATOR: char = '/';

/// Join a parent path and a key
pub fn child_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{}{}{}", parent, PATH_SEPARATOR, key)
    }
}

/// Set of paths exempt from reconciliation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProtectedPaths {
    paths: Vec<String>,
}

impl ProtectedPaths {
    /// Create from path strings; surrounding separators are ignored
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let paths = paths
            .into_iter()
            .map(|p| p.as_ref().trim_matches(PATH_SEPARATOR).to_string())
            .filter(|p| !p.is_empty())
            .collect();
        Self { paths }
    }

    /// Read the list stored at `key` inside `local`.
    ///
    /// A missing key means nothing is protected. A key holding anything
    /// other than a list is an error; non-string entries are skipped.
    pub fn from_settings(local: &Value, key: &[String]) -> Result<Self> {
        let mut node = local;
        for part in key {
            match node.get(part) {
                Some(next) => node = next,
                None => return Ok(Self::default()),
            }
        }

        let items = node.as_array().ok_or_else(|| {
            ArcHelperError::InvalidSettings(format!(
                "'{}' must be a list of paths, found {}",
                key.join("/"),
                node
            ))
        })?;

        let mut paths = Vec::with_capacity(items.len());
        for item in items {
            match item.as_str() {
                Some(s) if !s.trim_matches(PATH_SEPARATOR).is_empty() => paths.push(s),
                _ => warn!("Ignoring invalid protected path entry: {}", item),
            }
        }
        Ok(Self::new(paths))
    }

    /// The protected paths
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Whether nothing is protected
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Whether `path` is protected or lies under a protected path
    pub fn covers(&self, path: &str) -> bool {
        self.paths.iter().any(|p| is_same_or_below(path, p))
    }

    /// Whether some protected path lies strictly under `path`
    pub fn protects_below(&self, path: &str) -> bool {
        self.paths
            .iter()
            .any(|p| p != path && is_same_or_below(p, path))
    }
}

fn is_same_or_below(path: &str, ancestor: &str) -> bool {
    match path.strip_prefix(ancestor) {
        Some("") => true,
        Some(rest) => rest.starts_with(PATH_SEPARATOR),
        None => false,
    }
}
