//! Gem Dashboard - Gemstone data cleaning & analysis pipeline
//!
//! Reads `data/diamonds_sample.csv`, writes the cleaned table and a chart
//! dashboard to `outputs/`. Paths can be changed in `gem_dashboard.json`.

use anyhow::Context;
use gem_dashboard::config::CONFIG_FILE;
use gem_dashboard::{Pipeline, PipelineConfig};
use std::path::Path;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> anyhow::Result<()> {
    let config = PipelineConfig::load_or_default(Path::new(CONFIG_FILE))
        .context("Failed to load configuration")?;

    log::info!("GEMSTONE DATA CLEANING & ANALYSIS PIPELINE");
    let summary = Pipeline::new(config).run().context("Pipeline aborted")?;

    log::info!(
        "{} rows loaded, {} kept; outputs: {}, {}",
        summary.rows_loaded,
        summary.cleaning.output_rows,
        summary.dashboard_path.display(),
        summary.cleaned_path.display()
    );
    Ok(())
}
