use anyhow::{Context, Result};
use log::info;
use polars::prelude::*;
use std::fs;
use std::path::Path;

use crate::config::InputSettings;
use crate::core::domain::RawLayoffRecord;
use crate::io::checksum::calculate_checksum;
use crate::parsing::csv_parser;

/// Result of loading the layoffs table
#[derive(Debug)]
pub struct LayoffLoadResult {
    /// Source table as read, every column text
    pub dataframe: DataFrame,
    pub records: Vec<RawLayoffRecord>,
    /// SHA-256 of the file bytes
    pub checksum: String,
}

impl LayoffLoadResult {
    pub fn num_records(&self) -> usize {
        self.records.len()
    }
}

/// Loads the layoffs CSV export into typed records
pub struct LayoffLoader;

impl LayoffLoader {
    /// Load the layoffs table from a `.csv` file
    pub fn load_from_file(path: &Path, input: &InputSettings) -> Result<LayoffLoadResult> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .context("File has no extension")?;

        match extension.to_lowercase().as_str() {
            "csv" => Self::load_from_csv(path, input),
            _ => anyhow::bail!("Unsupported file format: {}", extension),
        }
    }

    /// Load the layoffs table from a CSV file
    pub fn load_from_csv(csv_path: &Path, input: &InputSettings) -> Result<LayoffLoadResult> {
        let bytes = fs::read(csv_path)
            .with_context(|| format!("Failed to read {}", csv_path.display()))?;
        let checksum = calculate_checksum(&bytes);

        let dataframe =
            csv_parser::parse_layoffs_csv(csv_path).context("Failed to parse CSV file")?;
        let records = csv_parser::dataframe_to_records(&dataframe, &input.null_tokens)
            .context("Source table does not match the layoffs schema")?;

        info!(
            "Loaded {} records from {} (sha256 {})",
            records.len(),
            csv_path.display(),
            checksum
        );

        Ok(LayoffLoadResult {
            dataframe,
            records,
            checksum,
        })
    }

    /// Load the layoffs table from CSV text
    pub fn load_from_csv_str(content: &str, input: &InputSettings) -> Result<LayoffLoadResult> {
        let dataframe =
            csv_parser::parse_layoffs_csv_str(content).context("Failed to parse CSV string")?;
        let records = csv_parser::dataframe_to_records(&dataframe, &input.null_tokens)
            .context("Source table does not match the layoffs schema")?;

        Ok(LayoffLoadResult {
            dataframe,
            records,
            checksum: calculate_checksum(content.as_bytes()),
        })
    }
}
