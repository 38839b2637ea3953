//! Parsers for the layoffs source table.
//!
//! # Parsers
//!
//! - [`csv_parser`]: Read the CSV export into a DataFrame and typed records
//! - [`dates`]: Soft parsing of textual dates
//!
//! # Example
//!
//! ```no_run
//! use layoffs_rust::parsing::csv_parser::{dataframe_to_records, parse_layoffs_csv};
//! use std::path::Path;
//!
//! let df = parse_layoffs_csv(Path::new("layoffs.csv")).expect("Failed to parse CSV");
//! let records = dataframe_to_records(&df, &["NULL".to_string()]).expect("Bad table");
//! println!("Loaded {} records", records.len());
//! ```

pub mod csv_parser;
pub mod dates;


pub use dates::DateParser;
