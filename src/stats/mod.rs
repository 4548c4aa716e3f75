//! Stats module - descriptive statistics and dataset insights

mod analysis;
mod calculator;

pub use analysis::{
    AnalysisReport, Analyser, CorrelationDirection, CorrelationStrength, CorrelationSummary,
    GroupMean,
};
pub use calculator::{DescriptiveStats, StatsCalculator};
