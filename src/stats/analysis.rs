//! Dataset insights over the transformed table.

use super::calculator::{DescriptiveStats, StatsCalculator};
use crate::data::{
    f64_column, str_column, ValueCategory, CARAT, COLOR, CUT, PRICE, PRICE_PER_CARAT,
    VALUE_CATEGORY,
};
use crate::error::Result;
use polars::prelude::*;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

/// |r| above this counts as a strong correlation.
pub const STRONG_CORRELATION_THRESHOLD: f64 = 0.7;

/// Mean of one value column within one group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMean {
    pub group: String,
    pub mean: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrelationStrength {
    Strong,
    Moderate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrelationDirection {
    Positive,
    Negative,
}

impl fmt::Display for CorrelationStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorrelationStrength::Strong => f.write_str("Strong"),
            CorrelationStrength::Moderate => f.write_str("Moderate"),
        }
    }
}

impl fmt::Display for CorrelationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorrelationDirection::Positive => f.write_str("positive"),
            CorrelationDirection::Negative => f.write_str("negative"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationSummary {
    pub r: f64,
    pub p_value: f64,
    pub n: usize,
    pub strength: CorrelationStrength,
    pub direction: CorrelationDirection,
}

impl CorrelationSummary {
    pub fn from_samples(x: &[f64], y: &[f64]) -> Self {
        let r = StatsCalculator::pearson(x, y);
        let strength = if r.abs() > STRONG_CORRELATION_THRESHOLD {
            CorrelationStrength::Strong
        } else {
            CorrelationStrength::Moderate
        };
        let direction = if r < 0.0 {
            CorrelationDirection::Negative
        } else {
            CorrelationDirection::Positive
        };

        Self {
            r,
            p_value: StatsCalculator::correlation_p_value(r, x.len()),
            n: x.len(),
            strength,
            direction,
        }
    }
}

/// Everything the analyse stage reports.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    /// Mean price per cut, highest first.
    pub price_by_cut: Vec<GroupMean>,
    /// Mean price per carat per colour, highest first.
    pub price_per_carat_by_color: Vec<GroupMean>,
    /// Rows per value category, most common first.
    pub category_counts: Vec<(ValueCategory, usize)>,
    pub correlation: CorrelationSummary,
    pub price_stats: DescriptiveStats,
}

impl AnalysisReport {
    pub fn category_count(&self, category: ValueCategory) -> usize {
        self.category_counts
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    pub fn log(&self) {
        log::info!("Average price by cut:");
        for g in &self.price_by_cut {
            log::info!("  {:<12} {:>10.2}", g.group, g.mean);
        }

        log::info!("Average price per carat by color:");
        for g in &self.price_per_carat_by_color {
            log::info!("  {:<12} {:>10.2}", g.group, g.mean);
        }

        log::info!("Value category distribution:");
        for (category, count) in &self.category_counts {
            log::info!("  {:<12} {:>6}", category.label(), count);
        }

        let c = &self.correlation;
        log::info!(
            "Correlation (carat vs price): Pearson r = {:.4} ({} {} correlation, p = {:.4})",
            c.r,
            c.strength,
            c.direction,
            c.p_value
        );
    }
}

/// Read-only reductions over the transformed table.
pub struct Analyser;

impl Analyser {
    pub fn analyse(df: &DataFrame) -> Result<AnalysisReport> {
        let cuts = str_column(df, CUT)?;
        let colors = str_column(df, COLOR)?;
        let prices = f64_column(df, PRICE)?;
        let carats = f64_column(df, CARAT)?;
        let per_carat = f64_column(df, PRICE_PER_CARAT)?;
        let categories = str_column(df, VALUE_CATEGORY)?;

        let (x, y): (Vec<f64>, Vec<f64>) = carats
            .iter()
            .zip(&prices)
            .filter_map(|(c, p)| Some(((*c)?, (*p)?)))
            .unzip();
        let price_values: Vec<f64> = prices.iter().flatten().copied().collect();

        Ok(AnalysisReport {
            price_by_cut: Self::grouped_means(&cuts, &prices),
            price_per_carat_by_color: Self::grouped_means(&colors, &per_carat),
            category_counts: Self::category_counts(&categories),
            correlation: CorrelationSummary::from_samples(&x, &y),
            price_stats: StatsCalculator::compute_descriptive_stats(&price_values),
        })
    }

    /// Mean of `values` per key, sorted by mean descending then key.
    ///
    /// Rows with a missing key or value are skipped.
    pub fn grouped_means(keys: &[Option<String>], values: &[Option<f64>]) -> Vec<GroupMean> {
        let mut sums: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
        for (key, value) in keys.iter().zip(values) {
            if let (Some(key), Some(value)) = (key, value) {
                let entry = sums.entry(key.as_str()).or_insert((0.0, 0));
                entry.0 += value;
                entry.1 += 1;
            }
        }

        let mut means: Vec<GroupMean> = sums
            .into_iter()
            .map(|(group, (sum, count))| GroupMean {
                group: group.to_string(),
                mean: sum / count as f64,
                count,
            })
            .collect();

        means.sort_by(|a, b| {
            b.mean
                .partial_cmp(&a.mean)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.group.cmp(&b.group))
        });
        means
    }

    /// Rows per category, most common first; every category is listed.
    pub fn category_counts(labels: &[Option<String>]) -> Vec<(ValueCategory, usize)> {
        let mut counts: Vec<(ValueCategory, usize)> =
            ValueCategory::ALL.iter().map(|c| (*c, 0)).collect();

        for category in labels
            .iter()
            .flatten()
            .filter_map(|l| ValueCategory::from_label(l))
        {
            if let Some(entry) = counts.iter_mut().find(|(c, _)| *c == category) {
                entry.1 += 1;
            }
        }

        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts
    }
}
