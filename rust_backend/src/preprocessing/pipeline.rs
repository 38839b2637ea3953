use anyhow::{Context, Result};
use log::{info, warn};
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::PipelineConfig;
use crate::core::domain::{LayoffRecord, RawLayoffRecord};
use crate::io::loaders::LayoffLoader;
use crate::parsing::csv_parser;
use crate::parsing::dates::DateParser;
use crate::preprocessing::validator::{LayoffValidator, ValidationResult};
use crate::services::report::LayoffReport;
use crate::transformations::cleaning::{Cleaner, CleaningStats};
use crate::transformations::dedup::deduplicate;
use crate::transformations::gap_fill::{fill_gaps, GapFillStats};

/// Row counts and per-stage counters of one run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineStats {
    pub input_records: usize,
    pub duplicates_removed: usize,
    pub cleaning: CleaningStats,
    pub gap_fill: GapFillStats,
    pub output_records: usize,
}

/// Result of a pipeline run
pub struct PipelineResult {
    /// Cleaned dataset, without the `duplicate_rank` annotation
    pub records: Vec<LayoffRecord>,
    pub dataframe: DataFrame,
    pub report: LayoffReport,
    pub validation: ValidationResult,
    pub stats: PipelineStats,
    /// SHA-256 of the input file, when the run started from a file
    pub input_checksum: Option<String>,
}

/// Main layoffs cleaning pipeline
///
/// Runs detector → cleaner → gap filler → reporter over one explicit
/// collection. Nothing feeds back into an earlier stage.
pub struct LayoffPipeline {
    config: PipelineConfig,
}

impl LayoffPipeline {
    /// Create a new pipeline with default configuration
    pub fn new() -> Self {
        Self {
            config: PipelineConfig::default(),
        }
    }

    /// Create a pipeline with custom configuration
    pub fn with_config(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Process a layoffs CSV file into a cleaned dataset and its views
    pub fn process(&self, csv_path: &Path) -> Result<PipelineResult> {
        info!("Pipeline: loading {}", csv_path.display());
        let loaded = LayoffLoader::load_from_file(csv_path, &self.config.input)
            .with_context(|| format!("Failed to load {}", csv_path.display()))?;

        let mut result = self.process_records(loaded.records)?;
        result.input_checksum = Some(loaded.checksum);
        Ok(result)
    }

    /// Process CSV text (useful for testing)
    pub fn process_csv_str(&self, content: &str) -> Result<PipelineResult> {
        let df = csv_parser::parse_layoffs_csv_str(content).context("Failed to parse CSV text")?;
        self.process_dataframe(&df)
    }

    /// Process an already-loaded frame of the source table
    pub fn process_dataframe(&self, df: &DataFrame) -> Result<PipelineResult> {
        let records = csv_parser::dataframe_to_records(df, &self.config.input.null_tokens)
            .context("Source table does not match the layoffs schema")?;
        self.process_records(records)
    }

    /// Run every stage over loaded records
    pub fn process_records(&self, records: Vec<RawLayoffRecord>) -> Result<PipelineResult> {
        let input_records = records.len();

        // Step 1: Drop exact duplicates
        let (unique, duplicates_removed) = deduplicate(records);

        // Step 2: Normalize text and retype dates
        let cleaner = Cleaner::new(DateParser::new(self.config.input.date_formats.iter().cloned()));
        let (cleaned, cleaning) = cleaner.clean_records(unique);

        // Step 3: Fill industries, drop records without measures
        let (records, gap_fill) = fill_gaps(cleaned);

        // Step 4: Validate (if requested)
        let validation = if self.config.pipeline.validate {
            let validation = LayoffValidator::validate_records(&records);
            for warning in &validation.warnings {
                warn!("Validation: {}", warning);
            }
            validation
        } else {
            ValidationResult::new()
        };

        // Step 5: Aggregate views
        let report = LayoffReport::build(&records, &self.config.report);

        let dataframe = csv_parser::records_to_dataframe(&records)
            .context("Failed to convert cleaned records to DataFrame")?;

        let stats = PipelineStats {
            input_records,
            duplicates_removed,
            cleaning,
            gap_fill,
            output_records: records.len(),
        };
        info!(
            "Pipeline: {} records in, {} records out",
            stats.input_records, stats.output_records
        );

        Ok(PipelineResult {
            records,
            dataframe,
            report,
            validation,
            stats,
            input_checksum: None,
        })
    }
}

impl Default for LayoffPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to clean a layoffs file with the given configuration
pub fn clean_layoffs(csv_path: &Path, config: PipelineConfig) -> Result<PipelineResult> {
    LayoffPipeline::with_config(config).process(csv_path)
}
