//! Chart data for the four dashboard panels.
//!
//! Everything here is plain geometry and counting so the panel contents can
//! be checked without a drawing backend.

use crate::data::{f64_column, str_column, ValueCategory, CARAT, PRICE, VALUE_CATEGORY};
use crate::error::Result;
use crate::stats::{AnalysisReport, GroupMean};
use polars::prelude::*;
use std::f64::consts::{FRAC_PI_2, TAU};

/// Cut grades from lowest to highest quality.
pub const CUT_ORDER: [&str; 5] = ["Fair", "Good", "Very Good", "Premium", "Ideal"];

/// Number of bins in the price histogram.
pub const HISTOGRAM_BINS: usize = 15;

/// Scatter points of one value category.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterSeries {
    pub category: ValueCategory,
    pub points: Vec<(f64, f64)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
}

/// One pie wedge; angles in radians, counter-clockwise from the x axis.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSlice {
    pub category: ValueCategory,
    pub count: usize,
    pub fraction: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl PieSlice {
    pub fn mid_angle(&self) -> f64 {
        (self.start_angle + self.end_angle) / 2.0
    }

    /// Pixel position at `radius` along the wedge's bisector (y grows downwards).
    pub fn anchor(&self, center: (i32, i32), radius: f64) -> (i32, i32) {
        polar_to_pixel(center, radius, self.mid_angle())
    }

    /// Closed wedge outline in pixel space: center, arc points, center.
    pub fn outline(&self, center: (i32, i32), radius: f64) -> Vec<(i32, i32)> {
        let sweep = self.end_angle - self.start_angle;
        let steps = ((sweep.abs() / TAU) * 180.0).ceil().max(2.0) as usize;

        let mut points = Vec::with_capacity(steps + 3);
        points.push(center);
        for i in 0..=steps {
            let angle = self.start_angle + sweep * i as f64 / steps as f64;
            points.push(polar_to_pixel(center, radius, angle));
        }
        points.push(center);
        points
    }

    pub fn percent_label(&self) -> String {
        format!("{:.1}%", self.fraction * 100.0)
    }
}

fn polar_to_pixel(center: (i32, i32), radius: f64, angle: f64) -> (i32, i32) {
    (
        center.0 + (radius * angle.cos()).round() as i32,
        center.1 - (radius * angle.sin()).round() as i32,
    )
}

/// Histogram bin covering `[lower, upper)`; the last bin also includes `upper`.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Chart data for the whole dashboard.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub scatter: Vec<ScatterSeries>,
    pub cut_bars: Vec<Bar>,
    pub pie: Vec<PieSlice>,
    pub histogram: Vec<HistogramBin>,
    pub price_mean: f64,
    pub price_median: f64,
}

impl DashboardData {
    pub fn from_frame(df: &DataFrame, report: &AnalysisReport) -> Result<Self> {
        let carats = f64_column(df, CARAT)?;
        let prices = f64_column(df, PRICE)?;
        let categories = str_column(df, VALUE_CATEGORY)?;

        let mut scatter: Vec<ScatterSeries> = ValueCategory::ALL
            .iter()
            .map(|c| ScatterSeries {
                category: *c,
                points: Vec::new(),
            })
            .collect();

        for ((carat, price), label) in carats.iter().zip(&prices).zip(&categories) {
            let (Some(carat), Some(price), Some(label)) = (carat, price, label) else {
                continue;
            };
            let Some(category) = ValueCategory::from_label(label) else {
                continue;
            };
            if let Some(series) = scatter.iter_mut().find(|s| s.category == category) {
                series.points.push((*carat, *price));
            }
        }
        scatter.retain(|s| !s.points.is_empty());

        let price_values: Vec<f64> = prices.iter().flatten().copied().collect();

        Ok(Self {
            scatter,
            cut_bars: order_by_cut_quality(&report.price_by_cut),
            pie: pie_slices(&report.category_counts),
            histogram: histogram_bins(&price_values, HISTOGRAM_BINS),
            price_mean: report.price_stats.mean,
            price_median: report.price_stats.median,
        })
    }

    /// Axis ranges for the scatter panel, padded by 5%.
    pub fn scatter_bounds(&self) -> ((f64, f64), (f64, f64)) {
        let points = self.scatter.iter().flat_map(|s| s.points.iter());
        let (mut x_max, mut y_max) = (0.0f64, 0.0f64);
        for &(x, y) in points {
            x_max = x_max.max(x);
            y_max = y_max.max(y);
        }
        (
            (0.0, if x_max > 0.0 { x_max * 1.05 } else { 1.0 }),
            (0.0, if y_max > 0.0 { y_max * 1.05 } else { 1.0 }),
        )
    }

    /// Tallest histogram bin, at least 1.
    pub fn histogram_peak(&self) -> usize {
        self.histogram
            .iter()
            .map(|b| b.count)
            .max()
            .unwrap_or(0)
            .max(1)
    }
}

/// Bars in `CUT_ORDER`; cuts outside the ranking are left out.
pub fn order_by_cut_quality(means: &[GroupMean]) -> Vec<Bar> {
    CUT_ORDER
        .iter()
        .filter_map(|cut| {
            means.iter().find(|g| g.group == *cut).map(|g| Bar {
                label: g.group.clone(),
                value: g.mean,
            })
        })
        .collect()
}

/// Wedges for the non-empty categories, starting at 12 o'clock and
/// running counter-clockwise in the order given.
pub fn pie_slices(counts: &[(ValueCategory, usize)]) -> Vec<PieSlice> {
    let total: usize = counts.iter().map(|(_, n)| n).sum();
    if total == 0 {
        return Vec::new();
    }

    let mut angle = FRAC_PI_2;
    counts
        .iter()
        .filter(|(_, n)| *n > 0)
        .map(|(category, count)| {
            let fraction = *count as f64 / total as f64;
            let start_angle = angle;
            angle += fraction * TAU;
            PieSlice {
                category: *category,
                count: *count,
                fraction,
                start_angle,
                end_angle: angle,
            }
        })
        .collect()
}

/// Equal-width bins spanning the data range.
///
/// A constant sample gets a unit-wide range centred on the value.
pub fn histogram_bins(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let mut min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let mut max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if min == max {
        min -= 0.5;
        max += 0.5;
    }

    let width = (max - min) / bins as f64;
    let mut histogram: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: min + width * i as f64,
            upper: if i + 1 == bins {
                max
            } else {
                min + width * (i + 1) as f64
            },
            count: 0,
        })
        .collect();

    for &v in values {
        let idx = (((v - min) / width).floor() as usize).min(bins - 1);
        histogram[idx].count += 1;
    }

    histogram
}

/// Whole-dollar amount with thousands separators, e.g. `$12,345`.
pub fn format_dollars(value: f64) -> String {
    if !value.is_finite() {
        return "$-".to_string();
    }

    let rounded = value.round().abs() as u64;
    let digits = rounded.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    if value.round() < 0.0 {
        format!("-${grouped}")
    } else {
        format!("${grouped}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::FeatureEngineer;
    use crate::stats::Analyser;

    fn mean(group: &str, mean: f64) -> GroupMean {
        GroupMean {
            group: group.to_string(),
            mean,
            count: 1,
        }
    }

    #[test]
    fn bars_follow_quality_ranking_not_value() {
        let means = vec![
            mean("Premium", 5000.0),
            mean("Ideal", 4000.0),
            mean("Fair", 3000.0),
            mean("Unknown", 9000.0),
        ];

        let labels: Vec<String> = order_by_cut_quality(&means)
            .into_iter()
            .map(|b| b.label)
            .collect();
        assert_eq!(labels, vec!["Fair", "Premium", "Ideal"]);
    }

    #[test]
    fn pie_starts_at_twelve_and_covers_full_circle() {
        let slices = pie_slices(&[
            (ValueCategory::MidRange, 2),
            (ValueCategory::Budget, 0),
            (ValueCategory::Premium, 6),
        ]);

        assert_eq!(slices.len(), 2);
        assert_eq!(slices[0].start_angle, FRAC_PI_2);
        assert_eq!(slices[0].percent_label(), "25.0%");
        assert_eq!(slices[1].start_angle, slices[0].end_angle);
        assert!((slices[1].end_angle - (FRAC_PI_2 + TAU)).abs() < 1e-12);
        assert!(pie_slices(&[(ValueCategory::Budget, 0)]).is_empty());
    }

    #[test]
    fn pie_outline_is_closed_at_center() {
        let slice = pie_slices(&[(ValueCategory::Budget, 1), (ValueCategory::Premium, 3)])
            .remove(0);
        let outline = slice.outline((100, 100), 50.0);

        assert_eq!(outline.first(), Some(&(100, 100)));
        assert_eq!(outline.last(), Some(&(100, 100)));
        // first arc point sits straight above the center
        assert_eq!(outline[1], (100, 50));
        // a quarter turn counter-clockwise ends on the left
        assert_eq!(outline[outline.len() - 2], (50, 100));
        assert_eq!(slice.anchor((100, 100), 0.0), (100, 100));
    }

    #[test]
    fn histogram_counts_every_value_once() {
        let values = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
        let bins = histogram_bins(&values, 5);

        assert_eq!(bins.len(), 5);
        assert_eq!(bins[0].lower, 0.0);
        assert_eq!(bins[4].upper, 10.0);
        let counts: Vec<usize> = bins.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![2, 2, 2, 2, 3]);
    }

    #[test]
    fn histogram_handles_constant_and_empty_samples() {
        let bins = histogram_bins(&[7.0, 7.0], 3);
        assert_eq!(bins[0].lower, 6.5);
        assert_eq!(bins[2].upper, 7.5);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 2);

        assert!(histogram_bins(&[], 15).is_empty());
    }

    #[test]
    fn dollars_are_grouped_by_thousands() {
        assert_eq!(format_dollars(0.0), "$0");
        assert_eq!(format_dollars(999.6), "$1,000");
        assert_eq!(format_dollars(1234567.0), "$1,234,567");
        assert_eq!(format_dollars(-2500.0), "-$2,500");
        assert_eq!(format_dollars(f64::NAN), "$-");
    }

    #[test]
    fn dashboard_data_groups_points_by_category() -> Result<()> {
        let df = df!(
            "carat" => &[0.3, 1.0, 2.0],
            "cut" => &["Good", "Ideal", "Premium"],
            "color" => &["E", "G", "H"],
            "price" => &[400.0, 3000.0, 12000.0]
        )?;
        let df = FeatureEngineer::add_features(df)?;
        let report = Analyser::analyse(&df)?;

        let data = DashboardData::from_frame(&df, &report)?;
        let categories: Vec<ValueCategory> = data.scatter.iter().map(|s| s.category).collect();
        assert_eq!(
            categories,
            vec![
                ValueCategory::Budget,
                ValueCategory::MidRange,
                ValueCategory::Premium
            ]
        );
        assert_eq!(data.scatter[2].points, vec![(2.0, 12000.0)]);
        assert_eq!(data.cut_bars.len(), 3);
        assert_eq!(data.cut_bars[0].label, "Good");
        assert_eq!(data.histogram.len(), HISTOGRAM_BINS);
        assert_eq!(data.price_median, 3000.0);
        assert_eq!(data.scatter_bounds().0, (0.0, 2.1));
        Ok(())
    }
}
