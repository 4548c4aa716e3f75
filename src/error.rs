//! Pipeline error types.

use polars::prelude::PolarsError;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    /// Input unreadable or malformed, or an output file could not be written.
    #[error("Data access failed for {}: {reason}", path.display())]
    DataAccess { path: PathBuf, reason: String },
    /// A non-positive carat survived cleaning.
    #[error("Arithmetic invariant violated: {0}")]
    Arithmetic(String),
    #[error("Failed to render dashboard: {0}")]
    Render(String),
    #[error("Invalid config {}: {reason}", path.display())]
    Config { path: PathBuf, reason: String },
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

impl PipelineError {
    pub fn data_access(path: &Path, reason: impl ToString) -> Self {
        PipelineError::DataAccess {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
