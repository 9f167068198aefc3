//! Error types for arc-helper

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for arc-helper
#[derive(Debug, Error)]
pub enum ArcHelperError {
    /// The user directory query failed
    #[error("User directory unavailable: {0}")]
    DirectoryUnavailable(String),

    /// A name fragment matched no enabled user
    #[error("No user matches '{0}'")]
    NoSuchUser(String),

    /// The disambiguation prompt failed or returned a bad index
    #[error("Selection failed: {0}")]
    Selection(String),

    /// A value-taking flag was the last argument
    #[error("Flag '{0}' requires a value")]
    MissingFlagValue(String),

    /// Refusing to overwrite an existing file
    #[error("File already exists: {0}")]
    AlreadyExists(PathBuf),

    /// Settings tree has an unexpected shape
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// Not inside a version-controlled checkout
    #[error("Not a git repository")]
    NotARepository,

    /// Version control query failed
    #[error("Git error: {0}")]
    Vcs(String),

    /// `land` cannot be completed with an implicit target
    #[error("Cannot land: {0}")]
    Land(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// External command error
    #[error("Command '{command}' failed: {message}")]
    Command { command: String, message: String },

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ArcHelperError>,
    },
}

impl ArcHelperError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ArcHelperError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Strip any context wrappers and return the underlying error
    pub fn root(&self) -> &ArcHelperError {
        match self {
            ArcHelperError::WithContext { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Result type alias for arc-helper
pub type Result<T> = std::result::Result<T, ArcHelperError>;
