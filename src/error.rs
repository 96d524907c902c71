//! Error types for the document outliner.
//!
//! The structure-extraction core never fails; these errors only come from
//! the boundaries around it (files, configuration, persistence, and the
//! optional ToC repair service).

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our custom error.
pub type Result<T> = std::result::Result<T, OutlineError>;

/// Errors that can occur around the outlining pipeline.
#[derive(Error, Debug)]
pub enum OutlineError {
    /// Error reading or writing files.
    #[error("I/O error for path '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error during serialization/deserialization.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// The document path does not exist.
    #[error("Document not found at '{0}'")]
    DocumentNotFound(PathBuf),

    /// The document has no non-blank pages.
    #[error("Document at '{0}' contains no pages")]
    EmptyDocument(PathBuf),

    /// The outline file does not exist.
    #[error("Outline file not found at '{0}'")]
    OutlineNotFound(PathBuf),

    /// Invalid configuration value.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration file error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// LLM API error.
    #[error("LLM API error: {0}")]
    LlmApi(String),

    /// LLM response parsing error.
    #[error("Failed to parse LLM response: {0}")]
    LlmParse(String),

    /// HTTP request error.
    #[error("HTTP request failed: {0}")]
    Http(String),
}

impl OutlineError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

impl From<reqwest::Error> for OutlineError {
    fn from(err: reqwest::Error) -> Self {
        OutlineError::Http(err.to_string())
    }
}

impl From<serde_json::Error> for OutlineError {
    fn from(err: serde_json::Error) -> Self {
        OutlineError::LlmParse(err.to_string())
    }
}
