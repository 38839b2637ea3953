//! Core domain models for layoff events.
//!
//! This module defines the record shapes that flow through the cleaning
//! pipeline, from the raw import to the cleaned dataset.

pub mod domain;

pub use domain::{columns, LayoffRecord, RankedRecord, RawLayoffRecord};
