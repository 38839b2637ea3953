//! Layoff dataset validation with detailed error and warning reporting.
//!
//! Errors mark a broken invariant of the cleaned dataset (untrimmed text,
//! uncanonicalized labels, records without measures). Warnings flag data
//! quality signals that are legal but worth a look, such as undated records.

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::core::domain::LayoffRecord;
use crate::parsing::csv_parser::missing_columns;
use crate::transformations::cleaning::{CRYPTO_INDUSTRY, UNITED_STATES};

/// Per-category errors reported before the rest are summarized.
const MAX_REPORTED: usize = 5;

/// Validation result with categorized issues and statistics.
///
/// # Examples
///
/// ```
/// use layoffs_rust::preprocessing::validator::ValidationResult;
///
/// let mut result = ValidationResult::new();
/// assert!(result.is_valid);
///
/// result.add_error("Record 3 has untrimmed company".to_string());
/// assert!(!result.is_valid);
/// assert_eq!(result.errors.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub stats: ValidationStats,
}

/// Summary statistics computed during validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationStats {
    pub total_records: usize,
    pub null_dates: usize,
    pub null_industries: usize,
    pub null_totals: usize,
    pub duplicate_records: usize,
    pub invariant_violations: usize,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
            stats: ValidationStats::default(),
        }
    }

    /// Adds a critical error and marks the result as invalid.
    pub fn add_error(&mut self, error: String) {
        self.is_valid = false;
        self.errors.push(error);
    }

    /// Adds a non-critical warning without invalidating the result.
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    fn add_violation(&mut self, message: String) {
        self.stats.invariant_violations += 1;
        if self.stats.invariant_violations <= MAX_REPORTED {
            self.add_error(message);
        } else {
            self.is_valid = false;
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::new()
    }
}

fn is_trimmed(text: &str) -> bool {
    text.trim().len() == text.len()
}

/// Validator for the layoffs table.
pub struct LayoffValidator;

impl LayoffValidator {
    /// Checks that a freshly loaded frame has every business-key column.
    ///
    /// # Examples
    ///
    /// ```
    /// use layoffs_rust::preprocessing::validator::LayoffValidator;
    /// use polars::prelude::*;
    ///
    /// let df = df!("company" => ["Acme"]).unwrap();
    /// let result = LayoffValidator::validate_schema(&df);
    /// assert!(!result.is_valid);
    /// assert_eq!(result.errors.len(), 8);
    /// ```
    pub fn validate_schema(df: &DataFrame) -> ValidationResult {
        let mut result = ValidationResult::new();
        result.stats.total_records = df.height();

        for column in missing_columns(df) {
            result.add_error(format!("Missing required column: {}", column));
        }

        result
    }

    /// Checks the invariants of a cleaned, gap-filled dataset.
    ///
    /// # Error Conditions
    ///
    /// - Company, country or industry with surrounding whitespace
    /// - Empty-string industry
    /// - `Crypto*` industry other than exactly `Crypto`
    /// - `United States*` country with a trailing period
    /// - Record with neither `total_laid_off` nor `percentage_laid_off`
    pub fn validate_records(records: &[LayoffRecord]) -> ValidationResult {
        let mut result = ValidationResult::new();
        result.stats.total_records = records.len();

        for (row, record) in records.iter().enumerate() {
            Self::validate_record(row, record, &mut result);
        }

        if result.stats.invariant_violations > MAX_REPORTED {
            result.add_error(format!(
                "Total invariant violations: {} (showing first {})",
                result.stats.invariant_violations, MAX_REPORTED
            ));
        }

        result.stats.duplicate_records = Self::count_duplicates(records);
        if result.stats.duplicate_records > 0 {
            result.add_warning(format!(
                "{} records became identical to an earlier record after cleaning",
                result.stats.duplicate_records
            ));
        }
        if result.stats.null_dates > 0 {
            result.add_warning(format!(
                "{} records have no valid date and are left out of time-based views",
                result.stats.null_dates
            ));
        }
        if result.stats.null_industries > 0 {
            result.add_warning(format!(
                "{} records still have no industry after gap filling",
                result.stats.null_industries
            ));
        }

        result
    }

    fn validate_record(row: usize, record: &LayoffRecord, result: &mut ValidationResult) {
        if record.date.is_none() {
            result.stats.null_dates += 1;
        }
        if record.total_laid_off.is_none() {
            result.stats.null_totals += 1;
        }

        if !is_trimmed(&record.company) {
            result.add_violation(format!(
                "Record {} has untrimmed company {:?}",
                row, record.company
            ));
        }
        if !is_trimmed(&record.country) {
            result.add_violation(format!(
                "Record {} has untrimmed country {:?}",
                row, record.country
            ));
        }
        if record.country.starts_with(UNITED_STATES) && record.country.ends_with('.') {
            result.add_violation(format!(
                "Record {} has trailing period in country {:?}",
                row, record.country
            ));
        }

        match record.industry.as_deref() {
            None => result.stats.null_industries += 1,
            Some("") => result.add_violation(format!("Record {} has empty industry", row)),
            Some(industry) => {
                if !is_trimmed(industry) {
                    result.add_violation(format!(
                        "Record {} has untrimmed industry {:?}",
                        row, industry
                    ));
                }
                if industry.starts_with(CRYPTO_INDUSTRY) && industry != CRYPTO_INDUSTRY {
                    result.add_violation(format!(
                        "Record {} has uncanonicalized industry {:?}",
                        row, industry
                    ));
                }
            }
        }

        if record.lacks_measures() {
            result.add_violation(format!(
                "Record {} ({}) has neither total_laid_off nor percentage_laid_off",
                row, record.company
            ));
        }
    }

    fn count_duplicates(records: &[LayoffRecord]) -> usize {
        let mut seen = HashSet::with_capacity(records.len());
        records.iter().filter(|record| !seen.insert(*record)).count()
    }
}
