//! arc-storage - Storage library for arc-helper
//!
//! This crate reads, writes and backs up the JSON settings files that
//! arc-helper reconciles.

mod settings_store;

pub use settings_store::{SettingsFile, SettingsUpdate, SettingsUpdater};
