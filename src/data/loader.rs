//! CSV Data Loader Module
//! Handles CSV file loading and schema validation using Polars.

use super::columns::{CARAT, COLOR, CUT, PRICE, REQUIRED_COLUMNS};
use crate::error::{PipelineError, Result};
use polars::prelude::*;
use std::path::Path;

/// Loads the raw gemstone table.
pub struct DataLoader;

impl DataLoader {
    /// Load a CSV file, check the required columns and coerce their types.
    ///
    /// `price` and `carat` become `Float64`, `cut` and `color` become `String`.
    /// Values that cannot be cast turn into nulls for the cleaner to drop.
    pub fn load_csv(path: &Path) -> Result<DataFrame> {
        if !path.is_file() {
            return Err(PipelineError::data_access(path, "file not found"));
        }

        let df = LazyCsvReader::new(path)
            .with_infer_schema_length(Some(10000))
            .with_has_header(true)
            .with_ignore_errors(true)
            .finish()
            .and_then(|lf| lf.collect())
            .map_err(|e| PipelineError::data_access(path, e))?;

        Self::validate_columns(&df, path)?;

        df.lazy()
            .with_columns([
                col(CARAT).cast(DataType::Float64),
                col(PRICE).cast(DataType::Float64),
                col(CUT).cast(DataType::String),
                col(COLOR).cast(DataType::String),
            ])
            .collect()
            .map_err(|e| PipelineError::data_access(path, e))
    }

    /// Fail if any required column is missing from the header.
    pub fn validate_columns(df: &DataFrame, path: &Path) -> Result<()> {
        let names = Self::get_columns(df);
        match REQUIRED_COLUMNS
            .iter()
            .find(|required| !names.iter().any(|n| n == *required))
        {
            Some(missing) => Err(PipelineError::data_access(
                path,
                format!("missing required column '{missing}'"),
            )),
            None => Ok(()),
        }
    }

    /// Get list of column names.
    pub fn get_columns(df: &DataFrame) -> Vec<String> {
        df.get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Get list of numeric column names.
    pub fn get_numeric_columns(df: &DataFrame) -> Vec<String> {
        df.get_columns()
            .iter()
            .filter(|col| {
                matches!(
                    col.dtype(),
                    DataType::Float32
                        | DataType::Float64
                        | DataType::Int8
                        | DataType::Int16
                        | DataType::Int32
                        | DataType::Int64
                        | DataType::UInt8
                        | DataType::UInt16
                        | DataType::UInt32
                        | DataType::UInt64
                )
            })
            .map(|col| col.name().to_string())
            .collect()
    }
}
