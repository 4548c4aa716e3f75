//! Raw data overview: shape, types, missing values and numeric summaries.

use super::columns::f64_column;
use super::loader::DataLoader;
use crate::error::Result;
use crate::stats::{DescriptiveStats, StatsCalculator};
use polars::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct ColumnOverview {
    pub name: String,
    pub dtype: String,
    pub null_count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumericSummary {
    pub name: String,
    pub stats: DescriptiveStats,
}

/// Snapshot of the table as loaded, before any cleaning.
#[derive(Debug, Clone)]
pub struct DatasetOverview {
    pub rows: usize,
    pub columns: Vec<ColumnOverview>,
    pub numeric: Vec<NumericSummary>,
    pub preview: DataFrame,
}

impl DatasetOverview {
    pub fn from_frame(df: &DataFrame, preview_rows: usize) -> Result<Self> {
        let columns = df
            .get_columns()
            .iter()
            .map(|col| ColumnOverview {
                name: col.name().to_string(),
                dtype: col.dtype().to_string(),
                null_count: col.null_count(),
            })
            .collect();

        let mut numeric = Vec::new();
        for name in DataLoader::get_numeric_columns(df) {
            let values: Vec<f64> = f64_column(df, &name)?
                .into_iter()
                .flatten()
                .filter(|v| !v.is_nan())
                .collect();
            numeric.push(NumericSummary {
                stats: StatsCalculator::compute_descriptive_stats(&values),
                name,
            });
        }

        Ok(Self {
            rows: df.height(),
            columns,
            numeric,
            preview: df.head(Some(preview_rows)),
        })
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn total_missing(&self) -> usize {
        self.columns.iter().map(|c| c.null_count).sum()
    }

    pub fn log(&self) {
        log::info!("Raw data overview");
        log::info!("First rows:\n{}", self.preview);

        let names: Vec<&str> = self.columns.iter().map(|c| c.name.as_str()).collect();
        log::info!("Columns : {names:?}");
        for column in &self.columns {
            log::info!(
                "  {:<16} {:<10} missing: {}",
                column.name,
                column.dtype,
                column.null_count
            );
        }

        for summary in &self.numeric {
            let s = &summary.stats;
            log::info!(
                "  {:<16} count {:>5}  mean {:>10.2}  std {:>10.2}  min {:>10.2}  25% {:>10.2}  50% {:>10.2}  75% {:>10.2}  max {:>10.2}",
                summary.name,
                s.count,
                s.mean,
                s.std,
                s.min,
                s.p25,
                s.median,
                s.p75,
                s.max
            );
        }
    }
}
