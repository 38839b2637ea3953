use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::core::domain::{LayoffRecord, RawLayoffRecord};
use crate::parsing::dates::DateParser;

/// Canonical label for every `Crypto*` industry variant.
pub const CRYPTO_INDUSTRY: &str = "Crypto";

/// Country prefix whose trailing periods are stripped.
pub const UNITED_STATES: &str = "United States";

/// Counters collected while cleaning a batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningStats {
    pub records: usize,
    pub industries_canonicalized: usize,
    pub countries_cleaned: usize,
    pub dates_parsed: usize,
    /// Non-empty date literals that matched no format and became null.
    pub dates_unparseable: usize,
}

/// Rewrite `Crypto*` industries to exactly `Crypto`.
pub fn canonicalize_industry(industry: &str) -> &str {
    if industry.starts_with(CRYPTO_INDUSTRY) {
        CRYPTO_INDUSTRY
    } else {
        industry
    }
}

/// Strip trailing periods from `United States*` countries.
///
/// Whitespace uncovered by removing the periods goes too, so the result is
/// already trimmed.
pub fn clean_country(country: &str) -> &str {
    if country.starts_with(UNITED_STATES) {
        country.trim_end_matches(|c: char| c == '.' || c.is_whitespace())
    } else {
        country
    }
}

fn trim_in_place(value: &mut String) {
    let trimmed = value.trim();
    if trimmed.len() != value.len() {
        *value = trimmed.to_string();
    }
}

fn trim_optional(value: &mut Option<String>) {
    if let Some(text) = value.as_mut() {
        trim_in_place(text);
    }
}

/// Apply the text normalizations to a record in place.
///
/// A percentage left blank after trimming becomes `None`.
///
/// Returns `(industry_changed, country_changed)` for the canonicalization
/// steps. Trimming is not counted.
pub fn normalize_text(record: &mut LayoffRecord) -> (bool, bool) {
    trim_in_place(&mut record.company);
    trim_in_place(&mut record.location);
    trim_in_place(&mut record.country);
    trim_optional(&mut record.industry);
    trim_optional(&mut record.percentage_laid_off);
    if record.percentage_laid_off.as_deref() == Some("") {
        record.percentage_laid_off = None;
    }
    trim_optional(&mut record.stage);

    let mut industry_changed = false;
    if let Some(industry) = record.industry.as_mut() {
        let canonical = canonicalize_industry(industry);
        if canonical != industry.as_str() {
            *industry = canonical.to_string();
            industry_changed = true;
        }
    }

    let cleaned = clean_country(&record.country);
    let country_changed = cleaned.len() != record.country.len();
    if country_changed {
        record.country = cleaned.to_string();
    }

    (industry_changed, country_changed)
}

/// Cleans raw records into typed ones.
pub struct Cleaner {
    dates: DateParser,
}

impl Cleaner {
    pub fn new(dates: DateParser) -> Self {
        Self { dates }
    }

    /// Normalize text fields and retype the date of one record.
    ///
    /// A date that matches no configured format becomes `None`; the record
    /// itself is always produced.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use layoffs_rust::core::domain::RawLayoffRecord;
    /// use layoffs_rust::transformations::cleaning::Cleaner;
    ///
    /// let raw = RawLayoffRecord {
    ///     company: " Acme ".into(),
    ///     industry: Some("Crypto Exchange".into()),
    ///     country: "United States.".into(),
    ///     date: Some("01/15/2023".into()),
    ///     ..Default::default()
    /// };
    /// let cleaned = Cleaner::default().clean_record(raw);
    /// assert_eq!(cleaned.company, "Acme");
    /// assert_eq!(cleaned.industry.as_deref(), Some("Crypto"));
    /// assert_eq!(cleaned.country, "United States");
    /// assert_eq!(cleaned.date, NaiveDate::from_ymd_opt(2023, 1, 15));
    /// ```
    pub fn clean_record(&self, raw: RawLayoffRecord) -> LayoffRecord {
        self.clean_record_counted(raw, &mut CleaningStats::default())
    }

    fn clean_record_counted(
        &self,
        raw: RawLayoffRecord,
        stats: &mut CleaningStats,
    ) -> LayoffRecord {
        let date = match raw.date.as_deref() {
            Some(text) => {
                let parsed = self.dates.parse(text);
                if parsed.is_some() {
                    stats.dates_parsed += 1;
                } else if !text.trim().is_empty() {
                    stats.dates_unparseable += 1;
                    debug!(
                        "Unparseable date {:?} for company {:?}; set to null",
                        text, raw.company
                    );
                }
                parsed
            }
            None => None,
        };

        let mut record = LayoffRecord {
            company: raw.company,
            location: raw.location,
            industry: raw.industry,
            total_laid_off: raw.total_laid_off,
            percentage_laid_off: raw.percentage_laid_off,
            date,
            stage: raw.stage,
            country: raw.country,
            funds_raised_millions: raw.funds_raised_millions,
        };

        let (industry_changed, country_changed) = normalize_text(&mut record);
        stats.records += 1;
        if industry_changed {
            stats.industries_canonicalized += 1;
        }
        if country_changed {
            stats.countries_cleaned += 1;
        }

        record
    }

    /// Clean a whole batch, preserving order.
    pub fn clean_records(
        &self,
        records: Vec<RawLayoffRecord>,
    ) -> (Vec<LayoffRecord>, CleaningStats) {
        let mut stats = CleaningStats::default();
        let cleaned = records
            .into_iter()
            .map(|raw| self.clean_record_counted(raw, &mut stats))
            .collect();

        info!(
            "Cleaner: {} records, {} industries canonicalized, {} countries cleaned, \
             {} dates parsed, {} unparseable dates nulled",
            stats.records,
            stats.industries_canonicalized,
            stats.countries_cleaned,
            stats.dates_parsed,
            stats.dates_unparseable
        );
        (cleaned, stats)
    }
}

impl Default for Cleaner {
    fn default() -> Self {
        Self::new(DateParser::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn raw(
        company: &str,
        industry: Option<&str>,
        country: &str,
        date: Option<&str>,
    ) -> RawLayoffRecord {
        RawLayoffRecord {
            company: company.to_string(),
            location: "SF Bay Area".to_string(),
            industry: industry.map(str::to_string),
            total_laid_off: Some(100),
            percentage_laid_off: Some("0.1".to_string()),
            date: date.map(str::to_string),
            stage: Some("Series B".to_string()),
            country: country.to_string(),
            funds_raised_millions: Some(20),
        }
    }

    #[test]
    fn test_clean_record_example() {
        let cleaner = Cleaner::default();
        let cleaned = cleaner.clean_record(raw(
            " Acme ",
            Some("Crypto Exchange"),
            "United States.",
            Some("01/15/2023"),
        ));

        assert_eq!(cleaned.company, "Acme");
        assert_eq!(cleaned.industry.as_deref(), Some("Crypto"));
        assert_eq!(cleaned.country, "United States");
        assert_eq!(cleaned.date, NaiveDate::from_ymd_opt(2023, 1, 15));
    }

    #[test]
    fn test_canonicalize_industry_is_case_sensitive_prefix() {
        assert_eq!(canonicalize_industry("Crypto"), "Crypto");
        assert_eq!(canonicalize_industry("CryptoCurrency"), "Crypto");
        assert_eq!(canonicalize_industry("Crypto Currency"), "Crypto");
        assert_eq!(canonicalize_industry("crypto"), "crypto");
        assert_eq!(canonicalize_industry("Fin-Crypto"), "Fin-Crypto");
    }

    #[test]
    fn test_clean_country() {
        assert_eq!(clean_country("United States."), "United States");
        assert_eq!(clean_country("United States..."), "United States");
        assert_eq!(clean_country("United States. ."), "United States");
        assert_eq!(clean_country("United States"), "United States");
        assert_eq!(clean_country("St. Lucia."), "St. Lucia.");
    }

    #[test]
    fn test_all_text_columns_trimmed() {
        let mut record = LayoffRecord {
            company: "  Acme".to_string(),
            location: "NYC ".to_string(),
            industry: Some(" Retail ".to_string()),
            stage: Some(" Seed".to_string()),
            country: " Canada ".to_string(),
            ..Default::default()
        };
        normalize_text(&mut record);
        assert_eq!(record.company, "Acme");
        assert_eq!(record.location, "NYC");
        assert_eq!(record.industry.as_deref(), Some("Retail"));
        assert_eq!(record.stage.as_deref(), Some("Seed"));
        assert_eq!(record.country, "Canada");
    }

    #[test]
    fn test_blank_percentage_becomes_null() {
        let mut record = LayoffRecord {
            percentage_laid_off: Some("   ".to_string()),
            ..Default::default()
        };
        normalize_text(&mut record);
        assert_eq!(record.percentage_laid_off, None);

        record.percentage_laid_off = Some(" 0.25 ".to_string());
        normalize_text(&mut record);
        assert_eq!(record.percentage_laid_off.as_deref(), Some("0.25"));
    }

    #[test]
    fn test_bad_dates_become_null_without_aborting() {
        let cleaner = Cleaner::default();
        let records = vec![
            raw("A", None, "Canada", Some("01/15/2023")),
            raw("B", None, "Canada", Some("yesterday")),
            raw("C", None, "Canada", Some("")),
            raw("D", None, "Canada", None),
        ];

        let (cleaned, stats) = cleaner.clean_records(records);
        assert_eq!(cleaned.len(), 4);
        assert!(cleaned[0].date.is_some());
        assert!(cleaned[1].date.is_none());
        assert!(cleaned[2].date.is_none());
        assert!(cleaned[3].date.is_none());
        assert_eq!(stats.dates_parsed, 1);
        assert_eq!(stats.dates_unparseable, 1);
    }

    #[test]
    fn test_stats_count_canonicalizations() {
        let cleaner = Cleaner::default();
        let records = vec![
            raw("A", Some("Crypto Currency"), "United States.", None),
            raw("B", Some("Crypto"), "United States", None),
            raw("C", Some("Retail"), "Canada", None),
        ];

        let (_, stats) = cleaner.clean_records(records);
        assert_eq!(stats.records, 3);
        assert_eq!(stats.industries_canonicalized, 1);
        assert_eq!(stats.countries_cleaned, 1);
    }

    #[test]
    fn test_cleaning_is_idempotent() {
        let cleaner = Cleaner::default();
        let once = cleaner.clean_record(raw(
            "\tAcme  ",
            Some(" Crypto Exchange"),
            " United States.. ",
            Some("11/30/2022"),
        ));
        let twice = cleaner.clean_record(once.to_raw());
        assert_eq!(once, twice);

        let mut normalized = once.clone();
        normalize_text(&mut normalized);
        assert_eq!(normalized, once);
    }
}
