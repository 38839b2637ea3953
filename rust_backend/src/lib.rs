//! Layoffs cleaning pipeline: duplicate detection, text normalization,
//! industry gap filling and aggregate reporting over a corporate layoffs
//! table.

pub mod algorithms;
pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod parsing;
pub mod preprocessing;
pub mod services;
pub mod transformations;

pub use config::PipelineConfig;
pub use error::{LayoffError, LayoffResult};
pub use preprocessing::{clean_layoffs, LayoffPipeline, PipelineResult};
