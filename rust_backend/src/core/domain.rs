//! Domain models for layoff events.
//!
//! A layoff event moves through two shapes: [`RawLayoffRecord`] as loaded from
//! the source table (date still text) and [`LayoffRecord`] once the cleaner has
//! normalized the text fields and retyped the date. [`RankedRecord`] carries
//! the transient `duplicate_rank` annotation used by the duplicate detector.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Column names of the layoff table, in source order.
pub mod columns {
    pub const COMPANY: &str = "company";
    pub const LOCATION: &str = "location";
    pub const INDUSTRY: &str = "industry";
    pub const TOTAL_LAID_OFF: &str = "total_laid_off";
    pub const PERCENTAGE_LAID_OFF: &str = "percentage_laid_off";
    pub const DATE: &str = "date";
    pub const STAGE: &str = "stage";
    pub const COUNTRY: &str = "country";
    pub const FUNDS_RAISED_MILLIONS: &str = "funds_raised_millions";
    pub const DUPLICATE_RANK: &str = "duplicate_rank";

    /// The nine business-key columns. Joint equality across all of them
    /// identifies the same underlying event.
    pub const BUSINESS_KEY: [&str; 9] = [
        COMPANY,
        LOCATION,
        INDUSTRY,
        TOTAL_LAID_OFF,
        PERCENTAGE_LAID_OFF,
        DATE,
        STAGE,
        COUNTRY,
        FUNDS_RAISED_MILLIONS,
    ];
}

/// ISO format used when a calendar date is written back out as text.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// A layoff event exactly as it was loaded.
///
/// Every field takes part in the business key, so the derived `Eq` and `Hash`
/// are full-row equality. `None` compares equal to `None`, which gives nulls
/// the usual grouping semantics.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RawLayoffRecord {
    pub company: String,
    pub location: String,
    pub industry: Option<String>,
    pub total_laid_off: Option<i64>,
    pub percentage_laid_off: Option<String>,
    pub date: Option<String>,
    pub stage: Option<String>,
    pub country: String,
    pub funds_raised_millions: Option<i64>,
}

/// A layoff event after cleaning, with a typed calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LayoffRecord {
    pub company: String,
    pub location: String,
    pub industry: Option<String>,
    pub total_laid_off: Option<i64>,
    pub percentage_laid_off: Option<String>,
    pub date: Option<NaiveDate>,
    pub stage: Option<String>,
    pub country: String,
    pub funds_raised_millions: Option<i64>,
}

impl LayoffRecord {
    /// Calendar year of the event, if the date is known.
    pub fn year(&self) -> Option<i32> {
        self.date.map(|d| d.year())
    }

    /// Year-month period of the event formatted as `YYYY-MM`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use layoffs_rust::core::domain::LayoffRecord;
    ///
    /// let record = LayoffRecord {
    ///     date: NaiveDate::from_ymd_opt(2023, 1, 15),
    ///     ..Default::default()
    /// };
    /// assert_eq!(record.period().as_deref(), Some("2023-01"));
    /// ```
    pub fn period(&self) -> Option<String> {
        self.date.map(|d| d.format("%Y-%m").to_string())
    }

    /// True when neither layoff measure is present. A blank percentage
    /// counts as missing.
    pub fn lacks_measures(&self) -> bool {
        self.total_laid_off.is_none()
            && self
                .percentage_laid_off
                .as_deref()
                .map_or(true, |pct| pct.trim().is_empty())
    }

    /// Converts back to the loaded shape, writing the date as ISO text.
    pub fn to_raw(&self) -> RawLayoffRecord {
        RawLayoffRecord {
            company: self.company.clone(),
            location: self.location.clone(),
            industry: self.industry.clone(),
            total_laid_off: self.total_laid_off,
            percentage_laid_off: self.percentage_laid_off.clone(),
            date: self.date.map(|d| d.format(ISO_DATE_FORMAT).to_string()),
            stage: self.stage.clone(),
            country: self.country.clone(),
            funds_raised_millions: self.funds_raised_millions,
        }
    }
}

/// A record annotated with its ordinal position inside its duplicate group.
///
/// Rank 1 is the record to keep; any higher rank is an exact duplicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedRecord<T> {
    pub record: T,
    pub duplicate_rank: u32,
}

impl<T> RankedRecord<T> {
    pub fn is_duplicate(&self) -> bool {
        self.duplicate_rank > 1
    }
}
