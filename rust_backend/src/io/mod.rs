//! Loading the source table and writing run outputs.
//!
//! # Example
//!
//! ```no_run
//! use layoffs_rust::config::InputSettings;
//! use layoffs_rust::io::loaders::LayoffLoader;
//! use std::path::Path;
//!
//! let result = LayoffLoader::load_from_file(Path::new("layoffs.csv"), &InputSettings::default())
//!     .expect("Failed to load");
//! println!("Loaded {} records", result.records.len());
//! ```

pub mod checksum;
pub mod export;
pub mod loaders;


pub use export::{write_outputs, ExportOptions, OutputPaths, RunSummary};
pub use loaders::{LayoffLoadResult, LayoffLoader};
