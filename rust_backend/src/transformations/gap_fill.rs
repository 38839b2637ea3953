//! Industry gap filling and removal of records without layoff measures.
//!
//! The three steps run in a fixed order: blank industries are nulled first so
//! they count as missing, then nulls are filled from same-company donors, and
//! only then are measure-less records deleted so no donor is lost early.

use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::core::domain::LayoffRecord;

/// Counters for the three gap-filling steps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapFillStats {
    pub blanks_nulled: usize,
    pub industries_filled: usize,
    pub records_deleted: usize,
}

/// Step 1: turn empty-string industries into null.
pub fn null_blank_industries(records: &mut [LayoffRecord]) -> usize {
    let mut nulled = 0;
    for record in records.iter_mut() {
        if record.industry.as_deref() == Some("") {
            record.industry = None;
            nulled += 1;
        }
    }
    nulled
}

/// Step 2: copy a known industry into null industries of the same company.
///
/// When donors of one company disagree, the first donor in scan order wins.
pub fn fill_industries_from_company(records: &mut [LayoffRecord]) -> usize {
    let mut donors: HashMap<String, String> = HashMap::new();
    for record in records.iter() {
        if let Some(industry) = &record.industry {
            donors
                .entry(record.company.clone())
                .or_insert_with(|| industry.clone());
        }
    }

    let mut filled = 0;
    for record in records.iter_mut().filter(|r| r.industry.is_none()) {
        if let Some(industry) = donors.get(&record.company) {
            record.industry = Some(industry.clone());
            filled += 1;
        }
    }
    filled
}

/// Step 3: delete records that have neither `total_laid_off` nor `percentage_laid_off`.
pub fn drop_records_without_measures(records: &mut Vec<LayoffRecord>) -> usize {
    let before = records.len();
    records.retain(|record| !record.lacks_measures());
    before - records.len()
}

/// Run all three steps in order.
pub fn fill_gaps(mut records: Vec<LayoffRecord>) -> (Vec<LayoffRecord>, GapFillStats) {
    let blanks_nulled = null_blank_industries(&mut records);
    let industries_filled = fill_industries_from_company(&mut records);
    let records_deleted = drop_records_without_measures(&mut records);

    let stats = GapFillStats {
        blanks_nulled,
        industries_filled,
        records_deleted,
    };
    info!(
        "Gap filler: {} blank industries nulled, {} industries filled, \
         {} records without measures deleted",
        stats.blanks_nulled, stats.industries_filled, stats.records_deleted
    );
    (records, stats)
}
