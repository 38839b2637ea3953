//! Window-style views: running monthly totals and per-year dense ranks.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::aggregation::{add_nullable, compare_totals_desc, CompanyYear, GroupTotal};

/// Monthly total with the running sum of every period up to and including it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollingTotal {
    pub period: String,
    pub total_laid_off: Option<i64>,
    pub rolling_total: Option<i64>,
}

/// A company's place within one year
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRank {
    pub year: i32,
    pub company: String,
    pub total_laid_off: Option<i64>,
    pub rank: u32,
}

/// Prefix sums over monthly totals in ascending period order.
///
/// Periods whose total is null add nothing; the running total stays null
/// until the first non-null month.
///
/// # Examples
///
/// ```
/// use layoffs_rust::algorithms::aggregation::GroupTotal;
/// use layoffs_rust::algorithms::ranking::rolling_totals;
///
/// let monthly = vec![
///     GroupTotal { key: "2023-01".to_string(), total_laid_off: Some(10), count: 1 },
///     GroupTotal { key: "2023-02".to_string(), total_laid_off: Some(5), count: 1 },
/// ];
/// let rolling = rolling_totals(&monthly);
/// assert_eq!(rolling[1].rolling_total, Some(15));
/// ```
pub fn rolling_totals(monthly: &[GroupTotal<String>]) -> Vec<RollingTotal> {
    let mut ordered: Vec<&GroupTotal<String>> = monthly.iter().collect();
    ordered.sort_by(|a, b| a.key.cmp(&b.key));

    let mut running = None;
    ordered
        .into_iter()
        .map(|month| {
            running = add_nullable(running, month.total_laid_off);
            RollingTotal {
                period: month.key.clone(),
                total_laid_off: month.total_laid_off,
                rolling_total: running,
            }
        })
        .collect()
}

/// Dense rank of companies within each year by summed total, descending.
///
/// Undated groups are excluded. Tied totals share a rank and the next distinct
/// total takes the next integer. Only ranks `1..=top_n` are kept and at most
/// `top_n` rows are returned per year; when a tie straddles that limit the
/// companies are taken in name order. Output is ordered by year, rank, company.
pub fn top_companies_per_year(
    company_years: &[GroupTotal<CompanyYear>],
    top_n: u32,
) -> Vec<CompanyRank> {
    let mut by_year: BTreeMap<i32, Vec<(&str, Option<i64>)>> = BTreeMap::new();
    for group in company_years {
        if let Some(year) = group.key.year {
            by_year
                .entry(year)
                .or_default()
                .push((group.key.company.as_str(), group.total_laid_off));
        }
    }

    let limit = top_n as usize;
    let mut ranked = Vec::new();
    for (year, mut companies) in by_year {
        companies.sort_by(|a, b| compare_totals_desc(a.1, b.1).then_with(|| a.0.cmp(b.0)));

        let mut rank = 0u32;
        let mut previous: Option<Option<i64>> = None;
        for (taken, (company, total)) in companies.into_iter().enumerate() {
            if previous != Some(total) {
                rank += 1;
                previous = Some(total);
            }
            if rank > top_n || taken == limit {
                break;
            }
            ranked.push(CompanyRank {
                year,
                company: company.to_string(),
                total_laid_off: total,
                rank,
            });
        }
    }

    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn month(period: &str, total: Option<i64>) -> GroupTotal<String> {
        GroupTotal {
            key: period.to_string(),
            total_laid_off: total,
            count: usize::from(total.is_some()),
        }
    }

    fn company_year(
        company: &str,
        year: Option<i32>,
        total: Option<i64>,
    ) -> GroupTotal<CompanyYear> {
        GroupTotal {
            key: CompanyYear {
                company: company.to_string(),
                year,
            },
            total_laid_off: total,
            count: 1,
        }
    }

    #[test]
    fn test_rolling_totals_prefix_sum() {
        let monthly = vec![
            month("2020-03", Some(9628)),
            month("2020-04", Some(26710)),
            month("2020-05", Some(25804)),
        ];
        let rolling = rolling_totals(&monthly);
        let sums: Vec<Option<i64>> = rolling.iter().map(|r| r.rolling_total).collect();
        assert_eq!(sums, vec![Some(9628), Some(36338), Some(62142)]);
    }

    #[test]
    fn test_rolling_totals_sorts_and_skips_nulls() {
        let monthly = vec![
            month("2021-02", Some(5)),
            month("2020-12", None),
            month("2021-01", Some(3)),
        ];
        let rolling = rolling_totals(&monthly);
        assert_eq!(rolling[0].period, "2020-12");
        assert_eq!(rolling[0].rolling_total, None);
        assert_eq!(rolling[1].rolling_total, Some(3));
        assert_eq!(rolling[2].rolling_total, Some(8));
    }

    #[test]
    fn test_dense_rank_ties_share_rank() {
        let groups = vec![
            company_year("A", Some(2022), Some(100)),
            company_year("B", Some(2022), Some(100)),
            company_year("C", Some(2022), Some(50)),
            company_year("D", Some(2022), Some(10)),
        ];
        let ranked = top_companies_per_year(&groups, 5);
        let ranks: Vec<(&str, u32)> = ranked.iter().map(|r| (r.company.as_str(), r.rank)).collect();
        assert_eq!(ranks, vec![("A", 1), ("B", 1), ("C", 2), ("D", 3)]);
    }

    #[test]
    fn test_top_n_limits_rows_per_year() {
        let mut groups = Vec::new();
        for (i, name) in ["a", "b", "c", "d", "e", "f", "g"].iter().enumerate() {
            groups.push(company_year(name, Some(2021), Some(100 - i as i64)));
            groups.push(company_year(name, Some(2022), Some(7)));
        }
        let ranked = top_companies_per_year(&groups, 5);

        let mut per_year: HashMap<i32, usize> = HashMap::new();
        for r in &ranked {
            *per_year.entry(r.year).or_default() += 1;
        }
        assert_eq!(per_year[&2021], 5);
        assert_eq!(per_year[&2022], 5);
        assert!(ranked.iter().filter(|r| r.year == 2022).all(|r| r.rank == 1));
        assert!(ranked.iter().all(|r| r.rank <= 5));
    }

    #[test]
    fn test_undated_groups_excluded_and_years_ordered() {
        let groups = vec![
            company_year("Late", Some(2023), Some(1)),
            company_year("Unknown", None, Some(999)),
            company_year("Early", Some(2020), Some(1)),
        ];
        let ranked = top_companies_per_year(&groups, 5);
        let years: Vec<i32> = ranked.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2020, 2023]);
        assert!(ranked.iter().all(|r| r.company != "Unknown"));
    }

    #[test]
    fn test_null_totals_rank_last() {
        let groups = vec![
            company_year("Nulls", Some(2022), None),
            company_year("Small", Some(2022), Some(1)),
        ];
        let ranked = top_companies_per_year(&groups, 5);
        assert_eq!(ranked[0].company, "Small");
        assert_eq!(ranked[1].company, "Nulls");
        assert_eq!(ranked[1].rank, 2);
    }
}
