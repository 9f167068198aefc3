//! Settings reconciliation
//!
//! Merges a distributed default settings tree into the user's own tree.
//! Keys missing locally are added, differing leaves are overwritten, and
//! keys only the user has are left alone. Every change is recorded.

use super::protected::{child_path, ProtectedPaths};
use crate::error::{ArcHelperError, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

/// Default location of the protected-path list inside the user's settings
pub const DEFAULT_PROTECTED_KEY: [&str; 2] = ["arc-helper", "do_not_auto_update"];

/// One difference applied during reconciliation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeRecord {
    /// Slash-joined key path from the root
    pub path: String,
    /// Previous value, `None` when the key was absent
    pub before: Option<Value>,
    /// Value written
    pub after: Value,
}

/// Outcome of reconciling two settings trees
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    /// The user's tree with defaults applied
    pub merged: Value,
    /// Changes in depth-first order of the default tree's keys
    pub changes: Vec<ChangeRecord>,
}

impl Reconciliation {
    /// Whether reconciliation changed nothing
    pub fn is_unchanged(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Merges default settings into local settings
#[derive(Debug, Clone)]
pub struct ConfigReconciler {
    protected_key: Vec<String>,
}

impl Default for ConfigReconciler {
    fn default() -> Self {
        Self::new(DEFAULT_PROTECTED_KEY)
    }
}

impl ConfigReconciler {
    /// Create a reconciler reading protected paths from `protected_key`
    pub fn new<I, S>(protected_key: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            protected_key: protected_key.into_iter().map(Into::into).collect(),
        }
    }

    /// Key path holding the protected-path list
    pub fn protected_key(&self) -> &[String] {
        &self.protected_key
    }

    /// Merge `default` into `local`.
    ///
    /// A missing (or `null`) local tree is treated as an empty mapping.
    /// Protected paths are read from `local` itself.
    pub fn reconcile(&self, local: Option<Value>, default: &Value) -> Result<Reconciliation> {
        let local = match local {
            None | Some(Value::Null) => Value::Object(Map::new()),
            Some(v) => v,
        };
        let protected = ProtectedPaths::from_settings(&local, &self.protected_key)?;
        reconcile_with(local, default, &protected)
    }
}

/// Merge `default` into `local`, leaving `protected` paths untouched
pub fn reconcile_with(
    mut local: Value,
    default: &Value,
    protected: &ProtectedPaths,
) -> Result<Reconciliation> {
    let default_map = default.as_object().ok_or_else(|| {
        ArcHelperError::InvalidSettings("default settings must be a mapping".to_string())
    })?;
    let local_map = local.as_object_mut().ok_or_else(|| {
        ArcHelperError::InvalidSettings("local settings must be a mapping".to_string())
    })?;

    let mut changes = Vec::new();
    merge_map(local_map, default_map, "", protected, &mut changes);
    debug!("Reconciliation produced {} change(s)", changes.len());

    Ok(Reconciliation {
        merged: local,
        changes,
    })
}

fn merge_map(
    local: &mut Map<String, Value>,
    default: &Map<String, Value>,
    prefix: &str,
    protected: &ProtectedPaths,
    changes: &mut Vec<ChangeRecord>,
) {
    for (key, default_value) in default {
        let path = child_path(prefix, key);

        if protected.covers(&path) {
            debug!("Skipping protected path {}", path);
            continue;
        }

        match local.get_mut(key) {
            None => {
                let added = without_protected(default_value, &path, protected);
                if added.as_object().is_some_and(Map::is_empty) && default_value != &added {
                    debug!("Not adding {}: only protected paths below it", path);
                    continue;
                }
                local.insert(key.clone(), added.clone());
                changes.push(ChangeRecord {
                    path,
                    before: None,
                    after: added,
                });
            }
            Some(Value::Object(local_child)) if default_value.is_object() => {
                if let Value::Object(default_child) = default_value {
                    merge_map(local_child, default_child, &path, protected, changes);
                }
            }
            Some(local_value) if local_value != default_value => {
                if protected.protects_below(&path) {
                    debug!("Not replacing {}: it holds a protected path", path);
                    continue;
                }
                let before = std::mem::replace(local_value, default_value.clone());
                changes.push(ChangeRecord {
                    path,
                    before: Some(before),
                    after: default_value.clone(),
                });
            }
            Some(_) => {}
        }
    }
}

/// Copy of `value` (found at `path`) without the protected paths below it
fn without_protected(value: &Value, path: &str, protected: &ProtectedPaths) -> Value {
    match value {
        Value::Object(map) if protected.protects_below(path) => Value::Object(
            map.iter()
                .filter_map(|(key, child)| {
                    let nested = child_path(path, key);
                    if protected.covers(&nested) {
                        None
                    } else {
                        Some((key.clone(), without_protected(child, &nested, protected)))
                    }
                })
                .collect(),
        ),
        _ => value.clone(),
    }
}
