use anyhow::{bail, Context, Result};
use log::{info, warn};
use std::path::PathBuf;

use layoffs_rust::config::PipelineConfig;
use layoffs_rust::io::{write_outputs, ExportOptions};
use layoffs_rust::preprocessing::LayoffPipeline;

const USAGE: &str = "Usage: clean-layoffs <input.csv> [output_dir] [--config pipeline.toml]";

#[derive(Debug, PartialEq, Eq)]
struct CliArgs {
    input: PathBuf,
    output_dir: Option<PathBuf>,
    config: Option<PathBuf>,
}

impl CliArgs {
    fn parse<I: IntoIterator<Item = String>>(args: I) -> Result<Self> {
        let mut positional = Vec::new();
        let mut config = None;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    let path = args.next().context("--config requires a path")?;
                    config = Some(PathBuf::from(path));
                }
                flag if flag.starts_with("--") => bail!("Unknown option: {}\n{}", flag, USAGE),
                _ => positional.push(PathBuf::from(arg)),
            }
        }

        let mut positional = positional.into_iter();
        let input = positional.next().context(USAGE)?;
        let output_dir = positional.next();
        if let Some(extra) = positional.next() {
            bail!("Unexpected argument: {}\n{}", extra.display(), USAGE);
        }

        Ok(Self {
            input,
            output_dir,
            config,
        })
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<PipelineConfig> {
    match path {
        Some(path) => PipelineConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => match PipelineConfig::from_default_location() {
            Ok(config) => Ok(config),
            Err(e) => {
                info!("{}; using defaults", e);
                Ok(PipelineConfig::default())
            }
        },
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse(std::env::args().skip(1))?;
    let config = load_config(args.config.as_ref())?;
    let output_dir = args
        .output_dir
        .clone()
        .unwrap_or_else(|| config.output.directory.clone());
    let options = ExportOptions::from_config(&config);

    let result = LayoffPipeline::with_config(config)
        .process(&args.input)
        .with_context(|| format!("Pipeline failed for {}", args.input.display()))?;

    if !result.validation.is_valid {
        for error in &result.validation.errors {
            warn!("Invariant check: {}", error);
        }
    }

    let paths = write_outputs(&result, &output_dir, &options)
        .with_context(|| format!("Failed to write outputs to {}", output_dir.display()))?;

    println!(
        "Cleaned {} -> {} records ({} duplicates, {} deleted)",
        result.stats.input_records,
        result.stats.output_records,
        result.stats.duplicates_removed,
        result.stats.gap_fill.records_deleted
    );
    println!("  Cleaned table: {}", paths.cleaned.display());
    println!("  Views: {}", paths.views.len());
    println!("  Summary: {}", paths.summary.display());
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
