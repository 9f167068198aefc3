//! Settings tree reconciliation
//!
//! Settings trees are plain [`serde_json::Value`]s: scalars, sequences and
//! string-keyed mappings.

pub mod protected;
pub mod reconcile;
pub mod report;

pub use protected::{child_path, ProtectedPaths, PATH_SEPARATOR};
pub use reconcile::{
    reconcile_with, ChangeRecord, ConfigReconciler, Reconciliation, DEFAULT_PROTECTED_KEY,
};
pub use report::{display_value, render_report, ABSENT};
