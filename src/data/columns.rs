//! Column names and typed accessors shared by the pipeline stages.

use polars::prelude::*;

pub const CARAT: &str = "carat";
pub const CUT: &str = "cut";
pub const COLOR: &str = "color";
pub const PRICE: &str = "price";
pub const PRICE_PER_CARAT: &str = "price_per_carat";
pub const VALUE_CATEGORY: &str = "value_category";
pub const PRICE_BAND: &str = "price_band";

/// Columns every input file must provide.
pub const REQUIRED_COLUMNS: [&str; 4] = [CARAT, CUT, COLOR, PRICE];

/// Read a column as `f64` values, preserving nulls.
pub fn f64_column(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<f64>>> {
    let casted = df.column(name)?.cast(&DataType::Float64)?;
    let ca = casted.f64()?;
    Ok(ca.into_iter().collect())
}

/// Read a column as owned strings, preserving nulls.
pub fn str_column(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<String>>> {
    let casted = df.column(name)?.cast(&DataType::String)?;
    let series = casted.as_materialized_series();
    let ca = series.str()?;
    Ok(ca.into_iter().map(|v| v.map(str::to_string)).collect())
}
