//! Error types for the cleaning pipeline.
//!
//! Only loading can fail fatally. Everything that goes wrong inside a
//! recognized column (bad dates, non-numeric ratings, absent columns) is
//! absorbed by the stage that detects it and never reaches this type.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the pipeline stages.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Input file does not exist.
    #[error("Input file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Input file exists but could not be read as delimited tabular data.
    #[error("Failed to parse '{}' as tabular data: {source}", path.display())]
    MalformedInput {
        path: PathBuf,
        #[source]
        source: polars::error::PolarsError,
    },

    /// Polars error raised while transforming an already loaded table.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PipelineError {
    /// Whether the error aborts a run before any output is produced.
    pub fn is_fatal_load_error(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::MalformedInput { .. })
    }

    /// First line of the message; polars parse errors carry multi-line hints.
    pub fn diagnostic(&self) -> String {
        let message = self.to_string();
        message.lines().next().unwrap_or_default().trim_end().to_string()
    }
}

/// Result alias used across the pipeline modules.
pub type Result<T> = std::result::Result<T, PipelineError>;
