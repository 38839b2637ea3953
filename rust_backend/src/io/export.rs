//! Writes the cleaned table, the aggregate views and a JSON run summary.

use log::info;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use crate::config::PipelineConfig;
use crate::error::LayoffResult;
use crate::preprocessing::pipeline::{PipelineResult, PipelineStats};
use crate::preprocessing::validator::ValidationResult;

pub const CLEANED_FILE_NAME: &str = "layoffs_cleaned.csv";
pub const SUMMARY_FILE_NAME: &str = "run_summary.json";

/// Contents of `run_summary.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub input_checksum: Option<String>,
    pub stats: PipelineStats,
    pub validation: ValidationResult,
    pub views: Vec<String>,
}

/// Files produced by [`write_outputs`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub cleaned: PathBuf,
    pub views: Vec<PathBuf>,
    pub summary: PathBuf,
}

/// How outputs are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub write_views: bool,
    /// Text written for null cells. The first input null token, so a cleaned
    /// export reads back with the same nulls.
    pub null_value: String,
}

impl ExportOptions {
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            write_views: config.output.write_views,
            null_value: config
                .input
                .null_tokens
                .first()
                .cloned()
                .unwrap_or_default(),
        }
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self::from_config(&PipelineConfig::default())
    }
}

/// Write a DataFrame as CSV with a header row
pub fn write_csv(df: &mut DataFrame, path: &Path, null_value: &str) -> LayoffResult<()> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_null_value(null_value.to_string())
        .finish(df)?;
    Ok(())
}

/// Write every output of a run into `output_dir`, creating it if needed.
///
/// View CSVs are only written when `options.write_views` is set; the cleaned
/// table and the summary are always written.
pub fn write_outputs(
    result: &PipelineResult,
    output_dir: &Path,
    options: &ExportOptions,
) -> LayoffResult<OutputPaths> {
    if !output_dir.exists() {
        fs::create_dir_all(output_dir)?;
    }

    let cleaned = output_dir.join(CLEANED_FILE_NAME);
    let mut df = result.dataframe.clone();
    write_csv(&mut df, &cleaned, &options.null_value)?;

    let mut view_paths = Vec::new();
    let mut view_names = Vec::new();
    if options.write_views {
        for mut view in result.report.views()? {
            let path = output_dir.join(format!("{}.csv", view.name));
            write_csv(&mut view.frame, &path, &options.null_value)?;
            view_names.push(view.name.to_string());
            view_paths.push(path);
        }
    }

    let summary = RunSummary {
        input_checksum: result.input_checksum.clone(),
        stats: result.stats.clone(),
        validation: result.validation.clone(),
        views: view_names,
    };
    let summary_path = output_dir.join(SUMMARY_FILE_NAME);
    let writer = BufWriter::new(File::create(&summary_path)?);
    serde_json::to_writer_pretty(writer, &summary)?;

    info!(
        "Wrote {} and {} views to {}",
        CLEANED_FILE_NAME,
        view_paths.len(),
        output_dir.display()
    );

    Ok(OutputPaths {
        cleaned,
        views: view_paths,
        summary: summary_path,
    })
}
