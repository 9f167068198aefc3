//! arc-core - Core library for arc-helper
//!
//! This crate provides the logic behind the arc-helper wrapper: resolving
//! free-text reviewer names to canonical usernames, rewriting reviewer and
//! land flags for the underlying tool, and reconciling the user's settings
//! file with distributed defaults.

pub mod args;
pub mod config;
pub mod error;
pub mod settings;
pub mod types;
pub mod users;

pub use config::ArcHelperConfig;
pub use error::{ArcHelperError, Result};
pub use types::*;
