//! Builds every aggregate view of the cleaned dataset and exposes each one as
//! a Polars DataFrame for export.

use log::info;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::algorithms::aggregation::{
    count_missing_totals, monthly_totals, totals_by_company, totals_by_company_for_stage,
    totals_by_company_year, totals_by_country, totals_by_industry, totals_by_stage,
    totals_by_year, CompanyYear, GroupTotal,
};
use crate::algorithms::ranking::{rolling_totals, top_companies_per_year, CompanyRank, RollingTotal};
use crate::config::ReportSettings;
use crate::core::domain::{columns, LayoffRecord};
use crate::error::LayoffResult;

/// Records of one country whose `total_laid_off` is null
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingTotals {
    pub country: String,
    pub count: usize,
}

/// Every read-only view computed over the cleaned dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoffReport {
    pub totals_by_country: Vec<GroupTotal<String>>,
    pub missing_totals: MissingTotals,
    pub totals_by_year: Vec<GroupTotal<Option<i32>>>,
    pub totals_by_company: Vec<GroupTotal<String>>,
    pub totals_by_industry: Vec<GroupTotal<Option<String>>>,
    pub totals_by_stage: Vec<GroupTotal<Option<String>>>,
    pub stage_filter: String,
    pub stage_totals_by_company: Vec<GroupTotal<String>>,
    pub monthly_totals: Vec<GroupTotal<String>>,
    pub rolling_totals: Vec<RollingTotal>,
    pub totals_by_company_year: Vec<GroupTotal<CompanyYear>>,
    pub top_companies_per_year: Vec<CompanyRank>,
}

/// A named view ready to be written out
pub struct ReportView {
    pub name: &'static str,
    pub frame: DataFrame,
}

impl LayoffReport {
    /// Compute all views. The dataset is only read.
    pub fn build(records: &[LayoffRecord], settings: &ReportSettings) -> Self {
        let monthly = monthly_totals(records);
        let rolling = rolling_totals(&monthly);
        let company_years = totals_by_company_year(records);
        let top = top_companies_per_year(&company_years, settings.top_n);

        let report = Self {
            totals_by_country: totals_by_country(records),
            missing_totals: MissingTotals {
                country: settings.missing_totals_country.clone(),
                count: count_missing_totals(records, &settings.missing_totals_country),
            },
            totals_by_year: totals_by_year(records),
            totals_by_company: totals_by_company(records),
            totals_by_industry: totals_by_industry(records),
            totals_by_stage: totals_by_stage(records),
            stage_filter: settings.stage_filter.clone(),
            stage_totals_by_company: totals_by_company_for_stage(records, &settings.stage_filter),
            monthly_totals: monthly,
            rolling_totals: rolling,
            totals_by_company_year: company_years,
            top_companies_per_year: top,
        };

        info!(
            "Reporter: {} countries, {} companies, {} months, {} top-ranked rows",
            report.totals_by_country.len(),
            report.totals_by_company.len(),
            report.monthly_totals.len(),
            report.top_companies_per_year.len()
        );
        report
    }

    /// Convert every view to a DataFrame, in a stable order.
    pub fn views(&self) -> LayoffResult<Vec<ReportView>> {
        Ok(vec![
            ReportView {
                name: "totals_by_country",
                frame: text_totals_frame(columns::COUNTRY, &self.totals_by_country, true)?,
            },
            ReportView {
                name: "missing_totals",
                frame: df!(
                    columns::COUNTRY => [self.missing_totals.country.as_str()],
                    "missing_total_laid_off" => [self.missing_totals.count as u64],
                )?,
            },
            ReportView {
                name: "totals_by_year",
                frame: year_totals_frame(&self.totals_by_year)?,
            },
            ReportView {
                name: "totals_by_company",
                frame: text_totals_frame(columns::COMPANY, &self.totals_by_company, false)?,
            },
            ReportView {
                name: "totals_by_industry",
                frame: nullable_totals_frame(columns::INDUSTRY, &self.totals_by_industry)?,
            },
            ReportView {
                name: "totals_by_stage",
                frame: nullable_totals_frame(columns::STAGE, &self.totals_by_stage)?,
            },
            ReportView {
                name: "stage_totals_by_company",
                frame: text_totals_frame(columns::COMPANY, &self.stage_totals_by_company, false)?,
            },
            ReportView {
                name: "monthly_totals",
                frame: text_totals_frame("period", &self.monthly_totals, false)?,
            },
            ReportView {
                name: "rolling_totals",
                frame: rolling_frame(&self.rolling_totals)?,
            },
            ReportView {
                name: "totals_by_company_year",
                frame: company_year_frame(&self.totals_by_company_year)?,
            },
            ReportView {
                name: "top_companies_per_year",
                frame: ranking_frame(&self.top_companies_per_year)?,
            },
        ])
    }
}

fn totals(groups: &[GroupTotal<impl Clone>]) -> Vec<Option<i64>> {
    groups.iter().map(|g| g.total_laid_off).collect()
}

fn text_totals_frame(
    key_column: &str,
    groups: &[GroupTotal<String>],
    with_count: bool,
) -> PolarsResult<DataFrame> {
    let keys: Vec<&str> = groups.iter().map(|g| g.key.as_str()).collect();
    let mut df = df!(
        key_column => keys,
        columns::TOTAL_LAID_OFF => totals(groups),
    )?;

    if with_count {
        let counts: Vec<u64> = groups.iter().map(|g| g.count as u64).collect();
        df.with_column(Column::new("total_laid_off_count".into(), counts))?;
    }
    Ok(df)
}

fn nullable_totals_frame(
    key_column: &str,
    groups: &[GroupTotal<Option<String>>],
) -> PolarsResult<DataFrame> {
    let keys: Vec<Option<&str>> = groups.iter().map(|g| g.key.as_deref()).collect();
    df!(
        key_column => keys,
        columns::TOTAL_LAID_OFF => totals(groups),
    )
}

fn year_totals_frame(groups: &[GroupTotal<Option<i32>>]) -> PolarsResult<DataFrame> {
    let years: Vec<Option<i32>> = groups.iter().map(|g| g.key).collect();
    df!(
        "year" => years,
        columns::TOTAL_LAID_OFF => totals(groups),
    )
}

fn company_year_frame(groups: &[GroupTotal<CompanyYear>]) -> PolarsResult<DataFrame> {
    let companies: Vec<&str> = groups.iter().map(|g| g.key.company.as_str()).collect();
    let years: Vec<Option<i32>> = groups.iter().map(|g| g.key.year).collect();
    df!(
        columns::COMPANY => companies,
        "year" => years,
        columns::TOTAL_LAID_OFF => totals(groups),
    )
}

fn rolling_frame(rows: &[RollingTotal]) -> PolarsResult<DataFrame> {
    let periods: Vec<&str> = rows.iter().map(|r| r.period.as_str()).collect();
    let monthly: Vec<Option<i64>> = rows.iter().map(|r| r.total_laid_off).collect();
    let rolling: Vec<Option<i64>> = rows.iter().map(|r| r.rolling_total).collect();
    df!(
        "period" => periods,
        columns::TOTAL_LAID_OFF => monthly,
        "rolling_total" => rolling,
    )
}

fn ranking_frame(rows: &[CompanyRank]) -> PolarsResult<DataFrame> {
    let years: Vec<i32> = rows.iter().map(|r| r.year).collect();
    let companies: Vec<&str> = rows.iter().map(|r| r.company.as_str()).collect();
    let totals: Vec<Option<i64>> = rows.iter().map(|r| r.total_laid_off).collect();
    let ranks: Vec<u32> = rows.iter().map(|r| r.rank).collect();
    df!(
        "year" => years,
        columns::COMPANY => companies,
        columns::TOTAL_LAID_OFF => totals,
        "ranking" => ranks,
    )
}
