//! Reporting layer over the cleaned dataset.
//!
//! Services sit on top of the aggregate algorithms and turn their results into
//! named DataFrames that the export layer writes out.

pub mod report;

pub use report::{LayoffReport, MissingTotals, ReportView};
