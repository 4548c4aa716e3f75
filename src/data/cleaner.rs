//! Data Cleaner Module
//! Normalises the `cut` column and drops duplicate, incomplete and invalid rows.

use super::columns::{str_column, CARAT, CUT, PRICE};
use crate::error::Result;
use polars::prelude::*;

/// Row counts removed by each cleaning step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleaningReport {
    pub input_rows: usize,
    pub duplicates_removed: usize,
    pub incomplete_removed: usize,
    pub invalid_removed: usize,
    pub output_rows: usize,
}

impl CleaningReport {
    pub fn rows_removed(&self) -> usize {
        self.input_rows - self.output_rows
    }

    pub fn log(&self) {
        log::info!(
            "Removed duplicates        : {} rows dropped",
            self.duplicates_removed
        );
        log::info!(
            "Removed incomplete rows   : {} rows dropped, {} remain",
            self.incomplete_removed,
            self.input_rows - self.duplicates_removed - self.incomplete_removed
        );
        log::info!(
            "Removed invalid price/carat: {} rows dropped, {} remain",
            self.invalid_removed,
            self.output_rows
        );
    }
}

/// Handles the cleaning steps, in pipeline order.
pub struct DataCleaner;

impl DataCleaner {
    /// Run every cleaning step.
    ///
    /// `cut` is normalised before deduplication, so rows that differ only in
    /// the spacing or casing of `cut` are merged into one rather than kept
    /// as distinct records.
    pub fn clean(df: DataFrame) -> Result<(DataFrame, CleaningReport)> {
        let input_rows = df.height();

        let df = Self::normalize_cut(df)?;

        let df = Self::deduplicate(df)?;
        let after_dedup = df.height();

        let df = Self::drop_incomplete(df)?;
        let after_nulls = df.height();

        let df = Self::drop_invalid(df)?;

        let report = CleaningReport {
            input_rows,
            duplicates_removed: input_rows - after_dedup,
            incomplete_removed: after_dedup - after_nulls,
            invalid_removed: after_nulls - df.height(),
            output_rows: df.height(),
        };

        Ok((df, report))
    }

    /// Trim the `cut` column and convert it to title case.
    pub fn normalize_cut(mut df: DataFrame) -> Result<DataFrame> {
        let normalized: Vec<Option<String>> = str_column(&df, CUT)?
            .into_iter()
            .map(|v| v.map(|s| title_case(s.trim())))
            .collect();

        df.with_column(Column::new(CUT.into(), normalized))?;
        Ok(df)
    }

    /// Drop rows equal in every column to an earlier row, keeping order.
    pub fn deduplicate(df: DataFrame) -> Result<DataFrame> {
        let df = df
            .lazy()
            .unique_stable(None, UniqueKeepStrategy::First)
            .collect()?;
        Ok(df)
    }

    /// Drop rows with a missing value in any column.
    pub fn drop_incomplete(df: DataFrame) -> Result<DataFrame> {
        let df = df.lazy().drop_nulls(None).collect()?;
        Ok(df)
    }

    /// Drop rows where `price <= 0` or `carat <= 0`.
    pub fn drop_invalid(df: DataFrame) -> Result<DataFrame> {
        let df = df
            .lazy()
            .filter(
                col(PRICE)
                    .gt(lit(0.0))
                    .and(col(CARAT).gt(lit(0.0))),
            )
            .collect()?;
        Ok(df)
    }
}

/// Capitalise the first letter of each word and lowercase the rest.
///
/// A new word starts after any non-alphabetic character, so `"very good"`
/// becomes `"Very Good"` and `"o'neil"` becomes `"O'Neil"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            word_start = false;
        } else {
            out.push(c);
            word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::f64_column;

    fn messy_frame() -> PolarsResult<DataFrame> {
        df!(
            "carat" => &[Some(1.0), Some(1.0), Some(0.0), Some(0.7), Some(0.3), Some(0.3), None],
            "cut" => &[Some(" ideal "), Some("Ideal"), Some("Good"), Some("VERY GOOD"), Some("fair"), Some("fair"), Some("Good")],
            "color" => &[Some("E"), Some("E"), Some("F"), Some("G"), None, None, Some("H")],
            "price" => &[Some(3000.0), Some(3000.0), Some(500.0), Some(-10.0), Some(400.0), Some(400.0), Some(900.0)]
        )
    }

    #[test]
    fn title_case_handles_words_and_mixed_case() {
        assert_eq!(title_case("ideal"), "Ideal");
        assert_eq!(title_case("VERY GOOD"), "Very Good");
        assert_eq!(title_case("premium"), "Premium");
        assert_eq!(title_case("o'neil"), "O'Neil");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn normalize_cut_trims_and_title_cases() -> Result<()> {
        let df = DataCleaner::normalize_cut(messy_frame()?)?;
        let cuts = str_column(&df, CUT)?;
        assert_eq!(cuts[0].as_deref(), Some("Ideal"));
        assert_eq!(cuts[3].as_deref(), Some("Very Good"));
        assert_eq!(df.height(), 7);
        Ok(())
    }

    #[test]
    fn clean_reports_each_step() -> Result<()> {
        let (df, report) = DataCleaner::clean(messy_frame()?)?;

        assert_eq!(
            report,
            CleaningReport {
                input_rows: 7,
                duplicates_removed: 2,
                incomplete_removed: 2,
                invalid_removed: 2,
                output_rows: 1,
            }
        );
        assert_eq!(report.rows_removed(), 6);
        assert_eq!(df.height(), 1);
        assert_eq!(str_column(&df, CUT)?[0].as_deref(), Some("Ideal"));
        Ok(())
    }

    #[test]
    fn surviving_rows_have_positive_price_and_carat() -> Result<()> {
        let (df, _) = DataCleaner::clean(messy_frame()?)?;
        for (price, carat) in f64_column(&df, PRICE)?
            .into_iter()
            .zip(f64_column(&df, CARAT)?)
        {
            assert!(price.unwrap() > 0.0);
            assert!(carat.unwrap() > 0.0);
        }
        Ok(())
    }

    #[test]
    fn cleaning_is_idempotent() -> Result<()> {
        let (once, _) = DataCleaner::clean(messy_frame()?)?;
        let (twice, report) = DataCleaner::clean(once.clone())?;

        assert_eq!(report.rows_removed(), 0);
        assert!(once.equals_missing(&twice));
        Ok(())
    }

    #[test]
    fn deduplicate_keeps_first_occurrence_in_order() -> Result<()> {
        let df = df!(
            "cut" => &["Good", "Ideal", "Good", "Fair", "Ideal"],
            "price" => &[1.0, 2.0, 1.0, 3.0, 2.0]
        )?;

        let df = DataCleaner::deduplicate(df)?;
        assert_eq!(df.height(), 3);
        let cuts: Vec<Option<String>> = str_column(&df, "cut")?;
        assert_eq!(
            cuts,
            vec![
                Some("Good".to_string()),
                Some("Ideal".to_string()),
                Some("Fair".to_string())
            ]
        );
        Ok(())
    }

    #[test]
    fn everything_filtered_out_is_not_an_error() -> Result<()> {
        let df = df!(
            "carat" => &[0.0, -1.0],
            "cut" => &["Good", "Fair"],
            "color" => &["E", "F"],
            "price" => &[100.0, 200.0]
        )?;

        let (df, report) = DataCleaner::clean(df)?;
        assert_eq!(df.height(), 0);
        assert_eq!(report.invalid_removed, 2);
        Ok(())
    }
}
