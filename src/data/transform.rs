//! Feature engineering: price per carat, value category and price band.

use super::columns::{f64_column, CARAT, PRICE, PRICE_BAND, PRICE_PER_CARAT, VALUE_CATEGORY};
use crate::error::{PipelineError, Result};
use polars::prelude::*;
use std::fmt;

/// Three-tier classification of price per carat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueCategory {
    Budget,
    MidRange,
    Premium,
}

impl ValueCategory {
    pub const ALL: [ValueCategory; 3] = [
        ValueCategory::Budget,
        ValueCategory::MidRange,
        ValueCategory::Premium,
    ];

    /// Lower bounds are inclusive: 2000 is Mid-Range, 5000 is Premium.
    pub fn from_price_per_carat(price_per_carat: f64) -> Self {
        if price_per_carat < 2000.0 {
            ValueCategory::Budget
        } else if price_per_carat < 5000.0 {
            ValueCategory::MidRange
        } else {
            ValueCategory::Premium
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ValueCategory::Budget => "Budget",
            ValueCategory::MidRange => "Mid-Range",
            ValueCategory::Premium => "Premium",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

impl fmt::Display for ValueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Price bucket over right-closed intervals of [`PriceBand::BREAKPOINTS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PriceBand {
    Under500,
    From500To1k,
    From1kTo2k,
    Over2k,
}

impl PriceBand {
    pub const BREAKPOINTS: [f64; 5] = [0.0, 500.0, 1000.0, 2000.0, 5000.0];

    pub const ALL: [PriceBand; 4] = [
        PriceBand::Under500,
        PriceBand::From500To1k,
        PriceBand::From1kTo2k,
        PriceBand::Over2k,
    ];

    /// `None` for prices outside `(0, 5000]`.
    pub fn from_price(price: f64) -> Option<Self> {
        Self::BREAKPOINTS
            .windows(2)
            .position(|edges| price > edges[0] && price <= edges[1])
            .map(|i| Self::ALL[i])
    }

    pub fn label(self) -> &'static str {
        match self {
            PriceBand::Under500 => "<$500",
            PriceBand::From500To1k => "$500-$1k",
            PriceBand::From1kTo2k => "$1k-$2k",
            PriceBand::Over2k => "$2k+",
        }
    }
}

impl fmt::Display for PriceBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Round to two decimal places, halves to even.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Appends the derived columns to a cleaned table.
pub struct FeatureEngineer;

impl FeatureEngineer {
    /// `price / carat` rounded to two decimals; `None` unless carat is positive.
    pub fn price_per_carat(price: f64, carat: f64) -> Option<f64> {
        (carat > 0.0).then(|| round2(price / carat))
    }

    /// Add `price_per_carat`, `value_category` and `price_band`, in that order.
    ///
    /// A missing or non-positive carat at this point means cleaning was
    /// skipped or broken, and is reported as an arithmetic error.
    pub fn add_features(mut df: DataFrame) -> Result<DataFrame> {
        let prices = f64_column(&df, PRICE)?;
        let carats = f64_column(&df, CARAT)?;

        let mut per_carat = Vec::with_capacity(df.height());
        let mut categories = Vec::with_capacity(df.height());
        let mut bands = Vec::with_capacity(df.height());

        for (row, (price, carat)) in prices.into_iter().zip(carats).enumerate() {
            let (Some(price), Some(carat)) = (price, carat) else {
                return Err(PipelineError::Arithmetic(format!(
                    "row {row} has no price or carat"
                )));
            };
            let ppc = Self::price_per_carat(price, carat).ok_or_else(|| {
                PipelineError::Arithmetic(format!("row {row} has non-positive carat {carat}"))
            })?;

            per_carat.push(ppc);
            categories.push(ValueCategory::from_price_per_carat(ppc).label());
            bands.push(PriceBand::from_price(price).map(PriceBand::label));
        }

        df.with_column(Column::new(PRICE_PER_CARAT.into(), per_carat))?;
        df.with_column(Column::new(VALUE_CATEGORY.into(), categories))?;
        df.with_column(Column::new(PRICE_BAND.into(), bands))?;
        Ok(df)
    }
}
