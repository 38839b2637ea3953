//! Soft parsing of textual dates.
//!
//! The source table stores dates as `MM/DD/YYYY` text. Parsing never fails the
//! batch: a literal that matches none of the configured formats becomes `None`.

use chrono::NaiveDate;

use crate::core::domain::ISO_DATE_FORMAT;

/// Source format of the raw date column.
pub const SOURCE_DATE_FORMAT: &str = "%m/%d/%Y";

/// Tries a list of chrono formats in order.
#[derive(Debug, Clone)]
pub struct DateParser {
    formats: Vec<String>,
}

impl DateParser {
    pub fn new<I, S>(formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            formats: formats.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a date literal, returning `None` when it is empty or matches no format.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use layoffs_rust::parsing::dates::DateParser;
    ///
    /// let parser = DateParser::default();
    /// assert_eq!(parser.parse("01/15/2023"), NaiveDate::from_ymd_opt(2023, 1, 15));
    /// assert_eq!(parser.parse("2023-01-15"), NaiveDate::from_ymd_opt(2023, 1, 15));
    /// assert_eq!(parser.parse("not a date"), None);
    /// ```
    pub fn parse(&self, text: &str) -> Option<NaiveDate> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }

        self.formats
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
    }
}

impl Default for DateParser {
    fn default() -> Self {
        Self::new([SOURCE_DATE_FORMAT, ISO_DATE_FORMAT])
    }
}
