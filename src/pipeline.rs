//! The batch pipeline: extract, explore, clean, transform, analyse,
//! visualise, export. Each stage runs once; the first failure aborts the run.

use crate::charts::{DashboardData, DashboardRenderer};
use crate::config::PipelineConfig;
use crate::data::{
    CleaningReport, DataCleaner, DataExporter, DataLoader, DatasetOverview, FeatureEngineer,
    CARAT, COLOR, CUT, PRICE, PRICE_PER_CARAT, VALUE_CATEGORY,
};
use crate::error::Result;
use crate::stats::{AnalysisReport, Analyser};
use polars::prelude::*;
use std::path::PathBuf;

/// What a completed run produced.
#[derive(Debug, Clone)]
pub struct PipelineSummary {
    pub rows_loaded: usize,
    pub cleaning: CleaningReport,
    pub analysis: AnalysisReport,
    pub dashboard_path: PathBuf,
    pub cleaned_path: PathBuf,
}

pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn run(&self) -> Result<PipelineSummary> {
        let df = self.extract()?;
        let rows_loaded = df.height();

        self.explore(&df)?;
        let (df, cleaning) = self.clean(df)?;
        let mut df = self.transform(df)?;
        let analysis = self.analyse(&df)?;
        let dashboard_path = self.visualise(&df, &analysis)?;
        let cleaned_path = self.export(&mut df)?;

        log::info!("Pipeline complete");
        Ok(PipelineSummary {
            rows_loaded,
            cleaning,
            analysis,
            dashboard_path,
            cleaned_path,
        })
    }

    pub fn extract(&self) -> Result<DataFrame> {
        let df = DataLoader::load_csv(&self.config.input_path)?;
        log::info!(
            "Data loaded: {} rows, {} columns from {}",
            df.height(),
            df.width(),
            self.config.input_path.display()
        );
        Ok(df)
    }

    pub fn explore(&self, df: &DataFrame) -> Result<DatasetOverview> {
        let overview = DatasetOverview::from_frame(df, self.config.preview_rows)?;
        overview.log();
        Ok(overview)
    }

    pub fn clean(&self, df: DataFrame) -> Result<(DataFrame, CleaningReport)> {
        log::info!("Cleaning data");
        let (df, report) = DataCleaner::clean(df)?;
        report.log();
        log::info!("Standardised '{CUT}' column");
        Ok((df, report))
    }

    pub fn transform(&self, df: DataFrame) -> Result<DataFrame> {
        log::info!("Engineering features");
        let df = FeatureEngineer::add_features(df)?;
        log::info!("Cleaned dataset shape: ({}, {})", df.height(), df.width());

        let preview = df
            .select([CARAT, CUT, COLOR, PRICE, PRICE_PER_CARAT, VALUE_CATEGORY])?
            .head(Some(self.config.preview_rows));
        log::info!("Transformed rows:\n{preview}");
        Ok(df)
    }

    pub fn analyse(&self, df: &DataFrame) -> Result<AnalysisReport> {
        log::info!("Analysing");
        let report = Analyser::analyse(df)?;
        report.log();
        Ok(report)
    }

    pub fn visualise(&self, df: &DataFrame, report: &AnalysisReport) -> Result<PathBuf> {
        log::info!("Generating visualisations");
        let data = DashboardData::from_frame(df, report)?;
        let path = self.config.dashboard_path();
        DashboardRenderer::render_png(
            &path,
            &data,
            (self.config.image_width, self.config.image_height),
        )?;
        log::info!("Dashboard saved to {}", path.display());
        Ok(path)
    }

    pub fn export(&self, df: &mut DataFrame) -> Result<PathBuf> {
        let path = self.config.cleaned_path();
        DataExporter::write_csv(df, &path)?;
        log::info!("Cleaned data saved to {}", path.display());
        Ok(path)
    }
}
