//! CSV export of the final table.

use crate::error::{PipelineError, Result};
use polars::prelude::*;
use std::fs::{self, File};
use std::path::Path;

pub struct DataExporter;

impl DataExporter {
    /// Write the table with a header row, creating parent directories.
    pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| PipelineError::data_access(parent, e))?;
        }

        let file = File::create(path).map_err(|e| PipelineError::data_access(path, e))?;
        CsvWriter::new(file)
            .include_header(true)
            .finish(df)
            .map_err(|e| PipelineError::data_access(path, e))
    }
}
