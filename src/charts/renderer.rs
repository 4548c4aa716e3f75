//! Static Dashboard Renderer
//! Draws the four dashboard panels into one PNG with plotters.
//!
//! Layout (2x2 grid under a bold title):
//! 1. Top-left: carat vs price scatter, coloured by value category
//! 2. Top-right: average price per cut, in cut-quality order
//! 3. Bottom-left: value category pie with percentage labels
//! 4. Bottom-right: price histogram with mean and median lines

use super::dashboard::{format_dollars, DashboardData};
use crate::data::ValueCategory;
use crate::error::{PipelineError, Result};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

pub const DASHBOARD_TITLE: &str = "Gemstone Dataset - Analysis Dashboard";

// Colors
const BUDGET_GREEN: RGBColor = RGBColor(76, 175, 80);
const MID_RANGE_ORANGE: RGBColor = RGBColor(255, 152, 0);
const PREMIUM_RED: RGBColor = RGBColor(244, 67, 54);
const HISTOGRAM_BLUE: RGBColor = RGBColor(92, 107, 192);
const MEAN_RED: RGBColor = RGBColor(220, 20, 60);
const MEDIAN_ORANGE: RGBColor = RGBColor(255, 165, 0);

// Muted palette for the cut bars
const BAR_PALETTE: [RGBColor; 5] = [
    RGBColor(72, 120, 208),
    RGBColor(238, 133, 74),
    RGBColor(106, 204, 100),
    RGBColor(214, 95, 95),
    RGBColor(149, 108, 180),
];

const FONT: &str = "sans-serif";

type DrawResult<DB> =
    std::result::Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

pub fn category_color(category: ValueCategory) -> RGBColor {
    match category {
        ValueCategory::Budget => BUDGET_GREEN,
        ValueCategory::MidRange => MID_RANGE_ORANGE,
        ValueCategory::Premium => PREMIUM_RED,
    }
}

pub struct DashboardRenderer;

impl DashboardRenderer {
    /// Render the dashboard to a PNG file, creating parent directories.
    pub fn render_png(path: &Path, data: &DashboardData, size: (u32, u32)) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| PipelineError::data_access(parent, e))?;
        }

        let root = BitMapBackend::new(path, size).into_drawing_area();
        Self::draw_dashboard(&root, data).map_err(|e| PipelineError::Render(e.to_string()))?;
        root.present()
            .map_err(|e| PipelineError::data_access(path, e))?;
        Ok(())
    }

    /// Draw all panels onto any backend.
    pub fn draw_dashboard<DB: DrawingBackend>(
        root: &DrawingArea<DB, Shift>,
        data: &DashboardData,
    ) -> DrawResult<DB> {
        root.fill(&WHITE)?;
        let body = root.titled(
            DASHBOARD_TITLE,
            (FONT, 36.0).into_font().style(FontStyle::Bold),
        )?;

        let panels = body.margin(10, 10, 10, 10).split_evenly((2, 2));
        Self::draw_scatter(&panels[0], data)?;
        Self::draw_cut_bars(&panels[1], data)?;
        Self::draw_category_pie(&panels[2], data)?;
        Self::draw_price_histogram(&panels[3], data)?;
        Ok(())
    }

    fn draw_scatter<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        data: &DashboardData,
    ) -> DrawResult<DB> {
        let ((x_min, x_max), (y_min, y_max)) = data.scatter_bounds();

        let mut chart = ChartBuilder::on(area)
            .caption("Carat vs Price by Value Category", (FONT, 22.0))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(75)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)?;

        chart
            .configure_mesh()
            .x_desc("Carat")
            .y_desc("Price ($)")
            .y_label_formatter(&|v| format_dollars(*v))
            .draw()?;

        for series in &data.scatter {
            let color = category_color(series.category);
            chart
                .draw_series(
                    series
                        .points
                        .iter()
                        .map(|&(x, y)| Circle::new((x, y), 5, color.mix(0.7).filled())),
                )?
                .label(series.category.label())
                .legend(move |(x, y)| Circle::new((x, y), 5, color.filled()));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
        Ok(())
    }

    fn draw_cut_bars<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        data: &DashboardData,
    ) -> DrawResult<DB> {
        let bars = &data.cut_bars;
        let n = bars.len() as u32;
        let peak = bars.iter().map(|b| b.value).fold(0.0, f64::max);
        let y_max = if peak > 0.0 { peak * 1.15 } else { 1.0 };
        let labels: Vec<&str> = bars.iter().map(|b| b.label.as_str()).collect();

        let mut chart = ChartBuilder::on(area)
            .caption("Average Price by Cut Quality", (FONT, 22.0))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(75)
            .build_cartesian_2d((0u32..n.saturating_sub(1)).into_segmented(), 0.0..y_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Cut")
            .y_desc("Average Price ($)")
            .x_label_formatter(&|v: &SegmentValue<u32>| match v {
                SegmentValue::CenterOf(i) => labels
                    .get(*i as usize)
                    .map(|s| s.to_string())
                    .unwrap_or_default(),
                _ => String::new(),
            })
            .y_label_formatter(&|v| format_dollars(*v))
            .draw()?;

        chart.draw_series(bars.iter().enumerate().map(|(i, bar)| {
            let i = i as u32;
            let right = if i + 1 == n {
                SegmentValue::Last
            } else {
                SegmentValue::Exact(i + 1)
            };
            let color = BAR_PALETTE[i as usize % BAR_PALETTE.len()];
            let mut rect = Rectangle::new(
                [(SegmentValue::Exact(i), 0.0), (right, bar.value)],
                color.filled(),
            );
            rect.set_margin(0, 0, 12, 12);
            rect
        }))?;

        let value_style = TextStyle::from((FONT, 15.0).into_font())
            .pos(Pos::new(HPos::Center, VPos::Bottom))
            .color(&BLACK);
        chart.draw_series(bars.iter().enumerate().map(|(i, bar)| {
            Text::new(
                format_dollars(bar.value),
                (SegmentValue::CenterOf(i as u32), bar.value),
                value_style.clone(),
            )
        }))?;
        Ok(())
    }

    fn draw_category_pie<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        data: &DashboardData,
    ) -> DrawResult<DB> {
        let area = area.titled("Value Category Distribution", (FONT, 22.0))?;
        let (w, h) = area.dim_in_pixel();
        let center = (w as i32 / 2, h as i32 / 2);
        let radius = w.min(h) as f64 * 0.36;

        let label_style = TextStyle::from((FONT, 18.0).into_font())
            .pos(Pos::new(HPos::Center, VPos::Center))
            .color(&BLACK);
        let percent_style = TextStyle::from((FONT, 16.0).into_font().style(FontStyle::Bold))
            .pos(Pos::new(HPos::Center, VPos::Center))
            .color(&WHITE);

        for slice in &data.pie {
            let outline = slice.outline(center, radius);
            area.draw(&Polygon::new(
                outline.clone(),
                category_color(slice.category).filled(),
            ))?;
            area.draw(&PathElement::new(outline, WHITE.stroke_width(2)))?;
        }

        for slice in &data.pie {
            area.draw(&Text::new(
                slice.category.label(),
                slice.anchor(center, radius * 1.18),
                label_style.clone(),
            ))?;
            area.draw(&Text::new(
                slice.percent_label(),
                slice.anchor(center, radius * 0.6),
                percent_style.clone(),
            ))?;
        }
        Ok(())
    }

    fn draw_price_histogram<DB: DrawingBackend>(
        area: &DrawingArea<DB, Shift>,
        data: &DashboardData,
    ) -> DrawResult<DB> {
        let (x_min, x_max) = match (data.histogram.first(), data.histogram.last()) {
            (Some(first), Some(last)) => (first.lower, last.upper),
            _ => (0.0, 1.0),
        };
        let y_max = data.histogram_peak() as f64 * 1.15;

        let mut chart = ChartBuilder::on(area)
            .caption("Price Distribution", (FONT, 22.0))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(x_min..x_max, 0.0..y_max)?;

        chart
            .configure_mesh()
            .x_desc("Price ($)")
            .y_desc("Frequency")
            .x_label_formatter(&|v| format_dollars(*v))
            .y_label_formatter(&|v| format!("{v:.0}"))
            .draw()?;

        chart.draw_series(data.histogram.iter().map(|bin| {
            Rectangle::new(
                [(bin.lower, 0.0), (bin.upper, bin.count as f64)],
                HISTOGRAM_BLUE.mix(0.85).filled(),
            )
        }))?;
        chart.draw_series(data.histogram.iter().map(|bin| {
            Rectangle::new(
                [(bin.lower, 0.0), (bin.upper, bin.count as f64)],
                WHITE.stroke_width(1),
            )
        }))?;

        let markers = [
            ("Mean", data.price_mean, MEAN_RED),
            ("Median", data.price_median, MEDIAN_ORANGE),
        ];
        for (name, value, color) in markers {
            if !value.is_finite() {
                continue;
            }
            chart
                .draw_series(LineSeries::new(
                    vec![(value, 0.0), (value, y_max)],
                    color.stroke_width(2),
                ))?
                .label(format!("{name}: {}", format_dollars(value)))
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
        Ok(())
    }
}
