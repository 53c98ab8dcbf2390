//! Error types for btc-eur-rolling

use std::path::PathBuf;
use thiserror::Error;

/// How a caller should treat a failed run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// An output file could not be written. Already logged at error level;
    /// the computed data was valid and the run may be repeated with another
    /// destination.
    Output,
    /// Anything else: network, malformed responses, configuration.
    Fatal,
}

/// Main error type for the pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("{source_name} returned error status: {status}")]
    HttpStatus { source_name: String, status: u16 },

    #[error("Data error: {0}")]
    DataError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Failed to write {}: {source}", .path.display())]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Chart error: {0}")]
    ChartError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

impl PipelineError {
    /// Wrap an I/O failure on `path` as a write error
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::WriteError {
            path: path.into(),
            source,
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            PipelineError::WriteError { .. } => ErrorClass::Output,
            _ => ErrorClass::Fatal,
        }
    }

    pub fn is_recoverable(&self) -> bool {
        self.class() == ErrorClass::Output
    }
}

/// Result type alias for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;
