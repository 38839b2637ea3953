use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::hash::Hash;

use crate::core::domain::LayoffRecord;

/// One row of a grouped view.
///
/// `total_laid_off` sums the non-null values of the group and is `None` when
/// every value in the group is null. `count` is the number of non-null values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupTotal<K> {
    pub key: K,
    pub total_laid_off: Option<i64>,
    pub count: usize,
}

/// Grouping key of the (company, year) view
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CompanyYear {
    pub company: String,
    pub year: Option<i32>,
}

/// Null-ignoring addition, the way SQL `SUM` treats nulls.
///
/// Sums saturate at `i64::MAX` / `i64::MIN` instead of overflowing.
pub fn add_nullable(acc: Option<i64>, value: Option<i64>) -> Option<i64> {
    match (acc, value) {
        (Some(a), Some(b)) => Some(a.saturating_add(b)),
        (None, Some(b)) => Some(b),
        (a, None) => a,
    }
}

/// Sum `total_laid_off` per key, keeping groups in first-seen order.
pub fn sum_by<'a, K, I, F>(records: I, key: F) -> Vec<GroupTotal<K>>
where
    I: IntoIterator<Item = &'a LayoffRecord>,
    F: Fn(&LayoffRecord) -> K,
    K: Eq + Hash + Clone,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<GroupTotal<K>> = Vec::new();

    for record in records {
        let k = key(record);
        let slot = *index.entry(k.clone()).or_insert_with(|| {
            groups.push(GroupTotal {
                key: k,
                total_laid_off: None,
                count: 0,
            });
            groups.len() - 1
        });

        let group = &mut groups[slot];
        group.total_laid_off = add_nullable(group.total_laid_off, record.total_laid_off);
        if record.total_laid_off.is_some() {
            group.count += 1;
        }
    }

    groups
}

/// Order by sum descending with null sums last, then by key ascending.
pub fn sort_by_total_desc<K: Ord>(groups: &mut [GroupTotal<K>]) {
    groups.sort_by(|a, b| {
        compare_totals_desc(a.total_laid_off, b.total_laid_off).then_with(|| a.key.cmp(&b.key))
    });
}

/// Descending comparison of nullable sums; `None` sorts after every value.
pub fn compare_totals_desc(a: Option<i64>, b: Option<i64>) -> Ordering {
    // Option orders None first, so reversing puts it last.
    b.cmp(&a)
}

fn ranked_by_total<K, F>(records: &[LayoffRecord], key: F) -> Vec<GroupTotal<K>>
where
    F: Fn(&LayoffRecord) -> K,
    K: Eq + Hash + Clone + Ord,
{
    let mut groups = sum_by(records, key);
    sort_by_total_desc(&mut groups);
    groups
}

/// Sum and non-null count of `total_laid_off` per country, largest first.
pub fn totals_by_country(records: &[LayoffRecord]) -> Vec<GroupTotal<String>> {
    ranked_by_total(records, |r| r.country.clone())
}

/// Number of records in `country` whose `total_laid_off` is null.
pub fn count_missing_totals(records: &[LayoffRecord], country: &str) -> usize {
    records
        .iter()
        .filter(|r| r.country == country && r.total_laid_off.is_none())
        .count()
}

/// Sum per calendar year, largest first. Undated records form a `None` group.
pub fn totals_by_year(records: &[LayoffRecord]) -> Vec<GroupTotal<Option<i32>>> {
    ranked_by_total(records, LayoffRecord::year)
}

pub fn totals_by_company(records: &[LayoffRecord]) -> Vec<GroupTotal<String>> {
    ranked_by_total(records, |r| r.company.clone())
}

pub fn totals_by_industry(records: &[LayoffRecord]) -> Vec<GroupTotal<Option<String>>> {
    ranked_by_total(records, |r| r.industry.clone())
}

pub fn totals_by_stage(records: &[LayoffRecord]) -> Vec<GroupTotal<Option<String>>> {
    ranked_by_total(records, |r| r.stage.clone())
}

/// Sum per company restricted to one funding stage, largest first.
pub fn totals_by_company_for_stage(
    records: &[LayoffRecord],
    stage: &str,
) -> Vec<GroupTotal<String>> {
    let mut groups = sum_by(
        records.iter().filter(|r| r.stage.as_deref() == Some(stage)),
        |r| r.company.clone(),
    );
    sort_by_total_desc(&mut groups);
    groups
}

/// Sum per `YYYY-MM` period in ascending period order. Undated records are skipped.
pub fn monthly_totals(records: &[LayoffRecord]) -> Vec<GroupTotal<String>> {
    let mut groups = sum_by(records.iter().filter(|r| r.date.is_some()), |r| {
        r.period().unwrap_or_default()
    });
    groups.sort_by(|a, b| a.key.cmp(&b.key));
    groups
}

/// Sum per (company, year), largest first.
pub fn totals_by_company_year(records: &[LayoffRecord]) -> Vec<GroupTotal<CompanyYear>> {
    ranked_by_total(records, |r| CompanyYear {
        company: r.company.clone(),
        year: r.year(),
    })
}
