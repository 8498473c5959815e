//! Shared error types for the application
//!
//! Analysis itself never fails: per-file problems degrade to empty results.
//! These errors cover the fallible edges (configuration, rule tables, corpus
//! loading).

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for archmap operations
#[derive(Debug, Error)]
pub enum Error {
    /// File system related errors
    #[error("File system error: {message}")]
    FileSystem {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Source parsing errors (reported, then degraded by the extractor)
    #[error("Parse error in {file}: {message}")]
    Parse { file: String, message: String },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A rule table entry whose regex does not compile
    #[error("Invalid pattern '{pattern}' in {table} rules: {source}")]
    InvalidRule {
        table: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Repository directory that cannot be walked
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML errors
    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    /// Ignore-pattern errors
    #[error(transparent)]
    Pattern(#[from] glob::PatternError),
}

impl Error {
    /// Create a file system error with path context
    pub fn file_system(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: Some(path.into()),
            source: Some(source),
        }
    }

    pub fn parse(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            file: file.into(),
            message: message.into(),
        }
    }

    pub fn invalid_rule(
        table: impl Into<String>,
        pattern: impl Into<String>,
        source: regex::Error,
    ) -> Self {
        Self::InvalidRule {
            table: table.into(),
            pattern: pattern.into(),
            source,
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, Error>;
