use log::debug;
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;

use crate::core::domain::{columns, LayoffRecord, RankedRecord, RawLayoffRecord};
use crate::error::{LayoffError, LayoffResult};

/// Read options shared by file and in-memory parsing.
///
/// Every column is read as text and blank cells stay blank; typing happens in
/// [`dataframe_to_records`] so bad integers are reported with their row.
fn text_read_options() -> CsvReadOptions {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .map_parse_options(|opts| opts.with_missing_is_null(false))
}

/// Parse a layoffs CSV file into a Polars DataFrame of text columns
pub fn parse_layoffs_csv(csv_path: &Path) -> LayoffResult<DataFrame> {
    let df = text_read_options()
        .try_into_reader_with_file_path(Some(csv_path.to_path_buf()))?
        .finish()?;

    debug!(
        "Read {} rows x {} columns from {}",
        df.height(),
        df.width(),
        csv_path.display()
    );
    Ok(df)
}

/// Parse layoffs CSV text into a Polars DataFrame of text columns
pub fn parse_layoffs_csv_str(content: &str) -> LayoffResult<DataFrame> {
    let cursor = Cursor::new(content.as_bytes().to_vec());
    let df = text_read_options()
        .into_reader_with_file_handle(cursor)
        .finish()?;
    Ok(df)
}

/// Names of business-key columns absent from the frame.
pub fn missing_columns(df: &DataFrame) -> Vec<String> {
    let present = df.get_column_names();
    columns::BUSINESS_KEY
        .iter()
        .filter(|required| !present.iter().any(|name| name.as_str() == **required))
        .map(|required| required.to_string())
        .collect()
}

/// Fail with [`LayoffError::MissingColumns`] unless all nine columns exist.
pub fn require_columns(df: &DataFrame) -> LayoffResult<()> {
    let missing = missing_columns(df);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(LayoffError::MissingColumns(missing))
    }
}

fn text_column(df: &DataFrame, name: &str) -> LayoffResult<StringChunked> {
    let column = df.column(name)?.cast(&DataType::String)?;
    Ok(column.str()?.clone())
}

/// Value of a nullable text cell; null tokens read as `None`.
fn nullable_text(ca: &StringChunked, row: usize, null_tokens: &[String]) -> Option<String> {
    ca.get(row)
        .filter(|value| !null_tokens.iter().any(|token| token == value.trim()))
        .map(str::to_string)
}

/// Value of a nullable measure cell; blank cells are `None` like null tokens.
fn nullable_measure(ca: &StringChunked, row: usize, null_tokens: &[String]) -> Option<String> {
    nullable_text(ca, row, null_tokens).filter(|value| !value.trim().is_empty())
}

/// Value of a nullable integer cell.
///
/// Blank cells and null tokens are `None`. Whole-valued decimals such as
/// `"120.0"` are accepted; anything else is a structural type mismatch.
fn nullable_integer(
    ca: &StringChunked,
    row: usize,
    column: &str,
    null_tokens: &[String],
) -> LayoffResult<Option<i64>> {
    let Some(value) = ca.get(row) else {
        return Ok(None);
    };
    let trimmed = value.trim();
    if trimmed.is_empty() || null_tokens.iter().any(|token| token == trimmed) {
        return Ok(None);
    }

    if let Ok(parsed) = trimmed.parse::<i64>() {
        return Ok(Some(parsed));
    }

    match trimmed.parse::<f64>() {
        Ok(parsed) if parsed.is_finite() && parsed.fract() == 0.0 => Ok(Some(parsed as i64)),
        _ => Err(LayoffError::TypeMismatch {
            column: column.to_string(),
            row,
            value: value.to_string(),
        }),
    }
}

/// Convert a Polars DataFrame to RawLayoffRecord structures
///
/// # Arguments
/// * `df` - Frame holding the nine business-key columns (extra columns are ignored)
/// * `null_tokens` - Literal values read as null in nullable columns
pub fn dataframe_to_records(
    df: &DataFrame,
    null_tokens: &[String],
) -> LayoffResult<Vec<RawLayoffRecord>> {
    require_columns(df)?;

    let companies = text_column(df, columns::COMPANY)?;
    let locations = text_column(df, columns::LOCATION)?;
    let industries = text_column(df, columns::INDUSTRY)?;
    let totals = text_column(df, columns::TOTAL_LAID_OFF)?;
    let percentages = text_column(df, columns::PERCENTAGE_LAID_OFF)?;
    let dates = text_column(df, columns::DATE)?;
    let stages = text_column(df, columns::STAGE)?;
    let countries = text_column(df, columns::COUNTRY)?;
    let funds = text_column(df, columns::FUNDS_RAISED_MILLIONS)?;

    let mut records = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        records.push(RawLayoffRecord {
            company: companies.get(i).unwrap_or_default().to_string(),
            location: locations.get(i).unwrap_or_default().to_string(),
            industry: nullable_text(&industries, i, null_tokens),
            total_laid_off: nullable_integer(&totals, i, columns::TOTAL_LAID_OFF, null_tokens)?,
            percentage_laid_off: nullable_measure(&percentages, i, null_tokens),
            date: nullable_text(&dates, i, null_tokens),
            stage: nullable_text(&stages, i, null_tokens),
            country: countries.get(i).unwrap_or_default().to_string(),
            funds_raised_millions: nullable_integer(
                &funds,
                i,
                columns::FUNDS_RAISED_MILLIONS,
                null_tokens,
            )?,
        });
    }

    Ok(records)
}

/// Column-major buffers for building a layoffs DataFrame.
#[derive(Default)]
struct LayoffColumns {
    companies: Vec<String>,
    locations: Vec<String>,
    industries: Vec<Option<String>>,
    totals: Vec<Option<i64>>,
    percentages: Vec<Option<String>>,
    dates: Vec<Option<String>>,
    stages: Vec<Option<String>>,
    countries: Vec<String>,
    funds: Vec<Option<i64>>,
}

impl LayoffColumns {
    fn with_capacity(n: usize) -> Self {
        Self {
            companies: Vec::with_capacity(n),
            locations: Vec::with_capacity(n),
            industries: Vec::with_capacity(n),
            totals: Vec::with_capacity(n),
            percentages: Vec::with_capacity(n),
            dates: Vec::with_capacity(n),
            stages: Vec::with_capacity(n),
            countries: Vec::with_capacity(n),
            funds: Vec::with_capacity(n),
        }
    }

    fn push(&mut self, record: RawLayoffRecord) {
        self.companies.push(record.company);
        self.locations.push(record.location);
        self.industries.push(record.industry);
        self.totals.push(record.total_laid_off);
        self.percentages.push(record.percentage_laid_off);
        self.dates.push(record.date);
        self.stages.push(record.stage);
        self.countries.push(record.country);
        self.funds.push(record.funds_raised_millions);
    }

    fn into_dataframe(self) -> PolarsResult<DataFrame> {
        df!(
            columns::COMPANY => self.companies,
            columns::LOCATION => self.locations,
            columns::INDUSTRY => self.industries,
            columns::TOTAL_LAID_OFF => self.totals,
            columns::PERCENTAGE_LAID_OFF => self.percentages,
            columns::DATE => self.dates,
            columns::STAGE => self.stages,
            columns::COUNTRY => self.countries,
            columns::FUNDS_RAISED_MILLIONS => self.funds,
        )
    }
}

/// Convert cleaned records to a Polars DataFrame.
///
/// The date column holds ISO `YYYY-MM-DD` text, the format the cleaner reads
/// back, so a cleaned export can be fed through the pipeline again unchanged.
pub fn records_to_dataframe(records: &[LayoffRecord]) -> LayoffResult<DataFrame> {
    let mut buffers = LayoffColumns::with_capacity(records.len());
    for record in records {
        buffers.push(record.to_raw());
    }
    Ok(buffers.into_dataframe()?)
}

/// Convert ranked records to a DataFrame with a trailing `duplicate_rank` column
pub fn ranked_to_dataframe(ranked: &[RankedRecord<RawLayoffRecord>]) -> LayoffResult<DataFrame> {
    let mut buffers = LayoffColumns::with_capacity(ranked.len());
    let mut ranks = Vec::with_capacity(ranked.len());
    for entry in ranked {
        buffers.push(entry.record.clone());
        ranks.push(entry.duplicate_rank);
    }

    let mut df = buffers.into_dataframe()?;
    df.with_column(Column::new(columns::DUPLICATE_RANK.into(), ranks))?;
    Ok(df)
}
