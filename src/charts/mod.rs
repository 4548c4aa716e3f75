//! Charts module - Dashboard data preparation and rendering

mod dashboard;
mod renderer;

pub use dashboard::{
    format_dollars, histogram_bins, order_by_cut_quality, pie_slices, Bar, DashboardData,
    HistogramBin, PieSlice, ScatterSeries, CUT_ORDER, HISTOGRAM_BINS,
};
pub use renderer::{category_color, DashboardRenderer, DASHBOARD_TITLE};
