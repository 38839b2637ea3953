//! Pipeline configuration file support.
//!
//! This module reads pipeline settings from a TOML file. Every section and
//! field is optional; anything left out falls back to the defaults below.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{LayoffError, LayoffResult};

/// Pipeline configuration from file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub input: InputSettings,
    #[serde(default)]
    pub output: OutputSettings,
    #[serde(default)]
    pub report: ReportSettings,
    #[serde(default)]
    pub pipeline: StageSettings,
}

/// How the source table is read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputSettings {
    /// Literal cell values read as null in nullable columns. Blank numeric
    /// cells are always null; blank text cells stay blank.
    #[serde(default = "default_null_tokens")]
    pub null_tokens: Vec<String>,
    /// chrono formats tried in order when retyping the date column.
    #[serde(default = "default_date_formats")]
    pub date_formats: Vec<String>,
}

/// Where results are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSettings {
    #[serde(default = "default_output_directory")]
    pub directory: PathBuf,
    #[serde(default = "default_true")]
    pub write_views: bool,
}

/// Parameters of the aggregate views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSettings {
    #[serde(default = "default_top_n")]
    pub top_n: u32,
    #[serde(default = "default_missing_totals_country")]
    pub missing_totals_country: String,
    #[serde(default = "default_stage_filter")]
    pub stage_filter: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageSettings {
    #[serde(default = "default_true")]
    pub validate: bool,
}

fn default_null_tokens() -> Vec<String> {
    vec!["NULL".to_string()]
}

fn default_date_formats() -> Vec<String> {
    vec!["%m/%d/%Y".to_string(), "%Y-%m-%d".to_string()]
}

fn default_output_directory() -> PathBuf {
    PathBuf::from("output")
}

fn default_true() -> bool {
    true
}

fn default_top_n() -> u32 {
    5
}

fn default_missing_totals_country() -> String {
    "United States".to_string()
}

fn default_stage_filter() -> String {
    "Post-IPO".to_string()
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            null_tokens: default_null_tokens(),
            date_formats: default_date_formats(),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
            write_views: true,
        }
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            missing_totals_country: default_missing_totals_country(),
            stage_filter: default_stage_filter(),
        }
    }
}

impl Default for StageSettings {
    fn default() -> Self {
        Self { validate: true }
    }
}

impl PipelineConfig {
    /// Load pipeline configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(PipelineConfig)` if successful
    /// * `Err(LayoffError::Config)` if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> LayoffResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            LayoffError::Config(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text.
    ///
    /// Parse errors name the offending key path, e.g. `report.top_n`.
    pub fn from_toml_str(content: &str) -> LayoffResult<Self> {
        let deserializer = toml::Deserializer::new(content);
        let config: PipelineConfig = serde_path_to_error::deserialize(deserializer)
            .map_err(|e| LayoffError::Config(format!("Failed to parse config file: {}", e)))?;

        config.check()?;
        Ok(config)
    }

    /// Load pipeline configuration from the default location.
    ///
    /// Searches for `pipeline.toml` in:
    /// 1. Current directory
    /// 2. `rust_backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> LayoffResult<Self> {
        let search_paths = [
            PathBuf::from("pipeline.toml"),
            PathBuf::from("rust_backend/pipeline.toml"),
            PathBuf::from("../pipeline.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Err(LayoffError::Config(
            "No pipeline.toml found in standard locations".to_string(),
        ))
    }

    fn check(&self) -> LayoffResult<()> {
        if self.input.date_formats.is_empty() {
            return Err(LayoffError::Config(
                "'input.date_formats' must list at least one format".to_string(),
            ));
        }
        if self.report.top_n == 0 {
            return Err(LayoffError::Config(
                "'report.top_n' must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
