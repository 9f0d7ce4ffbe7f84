//! Error types for the keyword runner
//!
//! Every error raised during a run carries enough context (step index,
//! action, locator) for the caller to log a precise failure. Nothing is
//! caught or retried internally.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the keyword runner
#[derive(Error, Debug)]
pub enum Error {
    // === Step File Errors ===
    #[error("Step file format error: {0}")]
    DataFormat(String),

    #[error("Unsupported action: {0}")]
    UnsupportedAction(String),

    // === Locator Errors ===
    #[error("Locator error: {0}")]
    Locator(String),

    #[error("No element matching {locator}: {message}")]
    ElementNotFound { locator: String, message: String },

    // === Execution Errors ===
    #[error("Navigation to '{url}' failed: {message}")]
    Navigation { url: String, message: String },

    #[error("Expected '{expected}' in '{actual}'")]
    Assertion { expected: String, actual: String },

    #[error("Invalid numeric value: '{0}'")]
    InvalidValue(String),

    #[error("Step {step} ({action}): {source}")]
    StepFailed {
        step: usize,
        action: String,
        #[source]
        source: Box<Error>,
    },

    #[error("Script execution failed: {0}")]
    Script(String),

    // === Session Errors ===
    #[error("WebDriver session error: {0}")]
    Session(String),

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },
}

impl Error {
    /// Create an element-not-found error from a find failure
    pub fn element_not_found(locator: &str, message: &str) -> Self {
        Self::ElementNotFound {
            locator: locator.to_string(),
            message: message.to_string(),
        }
    }

    /// Create a navigation error
    pub fn navigation(url: &str, message: &str) -> Self {
        Self::Navigation {
            url: url.to_string(),
            message: message.to_string(),
        }
    }

    /// Create an assertion error carrying both sides
    pub fn assertion(expected: &str, actual: &str) -> Self {
        Self::Assertion {
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Wrap a step error with its 1-based index and action keyword
    pub fn step_failed(step: usize, action: &str, source: Error) -> Self {
        Self::StepFailed {
            step,
            action: action.to_string(),
            source: Box::new(source),
        }
    }

    /// Create a file read error
    pub fn file_read(path: &std::path::Path, error: &dyn std::fmt::Display) -> Self {
        Self::FileRead {
            path: path.display().to_string(),
            error: error.to_string(),
        }
    }
}
