//! Exact-duplicate detection over the nine business-key columns.

use log::info;
use std::collections::HashMap;

use crate::core::domain::{RankedRecord, RawLayoffRecord};

/// Annotate every record with its 1-based position inside its duplicate group.
///
/// Groups are formed by full equality on all business-key columns, with nulls
/// equal to each other. Positions follow scan order, so the first occurrence
/// of each group is rank 1 and the output keeps the input order.
///
/// # Examples
///
/// ```
/// use layoffs_rust::core::domain::RawLayoffRecord;
/// use layoffs_rust::transformations::dedup::rank_duplicates;
///
/// let record = RawLayoffRecord { company: "Acme".into(), ..Default::default() };
/// let ranked = rank_duplicates(vec![record.clone(), record]);
/// assert_eq!(ranked[0].duplicate_rank, 1);
/// assert_eq!(ranked[1].duplicate_rank, 2);
/// ```
pub fn rank_duplicates(records: Vec<RawLayoffRecord>) -> Vec<RankedRecord<RawLayoffRecord>> {
    let mut seen: HashMap<RawLayoffRecord, u32> = HashMap::with_capacity(records.len());

    records
        .into_iter()
        .map(|record| {
            let count = seen.entry(record.clone()).or_insert(0);
            *count += 1;
            RankedRecord {
                duplicate_rank: *count,
                record,
            }
        })
        .collect()
}

/// Keep rank-1 records and drop the rank annotation.
pub fn drop_duplicates(ranked: Vec<RankedRecord<RawLayoffRecord>>) -> Vec<RawLayoffRecord> {
    ranked
        .into_iter()
        .filter(|entry| !entry.is_duplicate())
        .map(|entry| entry.record)
        .collect()
}

/// Rank and drop in one step.
///
/// Returns the surviving records and how many duplicates were discarded.
pub fn deduplicate(records: Vec<RawLayoffRecord>) -> (Vec<RawLayoffRecord>, usize) {
    let before = records.len();
    let survivors = drop_duplicates(rank_duplicates(records));
    let removed = before - survivors.len();

    info!(
        "Duplicate detector: {} rows in, {} exact duplicates removed",
        before, removed
    );
    (survivors, removed)
}
