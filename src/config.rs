//! Pipeline configuration.
//!
//! Everything has a default, so the pipeline runs without a config file.
//! When `gem_dashboard.json` exists in the working directory its fields
//! override the defaults; missing fields keep their default values.

use crate::error::{PipelineError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "gem_dashboard.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub input_path: PathBuf,
    pub output_dir: PathBuf,
    pub dashboard_file: String,
    pub cleaned_file: String,
    pub image_width: u32,
    pub image_height: u32,
    /// Rows shown in the raw and transformed previews.
    pub preview_rows: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("data/diamonds_sample.csv"),
            output_dir: PathBuf::from("outputs"),
            dashboard_file: "diamonds_dashboard.png".to_string(),
            cleaned_file: "diamonds_cleaned.csv".to_string(),
            image_width: 1600,
            image_height: 1200,
            preview_rows: 5,
        }
    }
}

impl PipelineConfig {
    /// Load config from `path`, falling back to defaults if the file is absent.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path).map_err(|e| PipelineError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&text).map_err(|e| PipelineError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    pub fn dashboard_path(&self) -> PathBuf {
        self.output_dir.join(&self.dashboard_file)
    }

    pub fn cleaned_path(&self) -> PathBuf {
        self.output_dir.join(&self.cleaned_file)
    }
}
