//! Gem Dashboard - gemstone CSV cleaning, analysis & chart generation
//!
//! A batch pipeline: extract, explore, clean, transform, analyse,
//! visualise and export a table of gemstone records.

pub mod charts;
pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;
pub mod stats;

pub use config::PipelineConfig;
pub use error::{PipelineError, Result};
pub use pipeline::{Pipeline, PipelineSummary};
