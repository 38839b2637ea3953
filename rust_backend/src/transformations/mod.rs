//! Record-level transformations of the layoffs table.
//!
//! Each stage is a function over an explicit collection, run in this order:
//!
//! - [`dedup`]: rank exact duplicates and keep the first of each group
//! - [`cleaning`]: trim text, canonicalize labels, retype dates
//! - [`gap_fill`]: fill missing industries and drop measure-less records
//!
//! # Example
//!
//! ```
//! use layoffs_rust::core::domain::RawLayoffRecord;
//! use layoffs_rust::transformations::{deduplicate, fill_gaps, Cleaner};
//!
//! let raw = vec![RawLayoffRecord {
//!     company: " Acme ".into(),
//!     total_laid_off: Some(10),
//!     ..Default::default()
//! }];
//! let (unique, _) = deduplicate(raw);
//! let (cleaned, _) = Cleaner::default().clean_records(unique);
//! let (filled, _) = fill_gaps(cleaned);
//! assert_eq!(filled[0].company, "Acme");
//! ```

pub mod cleaning;
pub mod dedup;
pub mod gap_fill;

pub use cleaning::{normalize_text, Cleaner, CleaningStats};
pub use dedup::{deduplicate, drop_duplicates, rank_duplicates};
pub use gap_fill::{fill_gaps, GapFillStats};
