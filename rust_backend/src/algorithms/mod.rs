//! Read-only aggregate views over the cleaned layoffs dataset.
//!
//! # Components
//!
//! - [`aggregation`]: Grouped sums and counts of `total_laid_off`
//! - [`ranking`]: Running monthly totals and per-year dense ranks
//!
//! # Example
//!
//! ```
//! use layoffs_rust::algorithms::{monthly_totals, rolling_totals};
//! use layoffs_rust::core::domain::LayoffRecord;
//!
//! # fn example(records: &[LayoffRecord]) {
//! let monthly = monthly_totals(records);
//! let rolling = rolling_totals(&monthly);
//! assert_eq!(monthly.len(), rolling.len());
//! # }
//! ```

pub mod aggregation;
pub mod ranking;

pub use aggregation::{
    count_missing_totals, monthly_totals, sum_by, totals_by_company, totals_by_company_for_stage,
    totals_by_company_year, totals_by_country, totals_by_industry, totals_by_stage,
    totals_by_year, CompanyYear, GroupTotal,
};
pub use ranking::{rolling_totals, top_companies_per_year, CompanyRank, RollingTotal};
