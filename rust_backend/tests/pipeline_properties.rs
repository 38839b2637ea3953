//! Property tests for the invariants each pipeline stage guarantees.

use proptest::prelude::*;
use std::collections::{BTreeMap, HashSet};

use layoffs_rust::algorithms::{
    monthly_totals, rolling_totals, top_companies_per_year, totals_by_company_year,
};
use layoffs_rust::core::domain::{LayoffRecord, RawLayoffRecord};
use layoffs_rust::preprocessing::{LayoffPipeline, LayoffValidator};
use layoffs_rust::transformations::{deduplicate, fill_gaps, Cleaner};

// ==================== Strategies ====================

fn company() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Acme".to_string()),
        Just(" Acme ".to_string()),
        Just("Beta".to_string()),
        Just("Gamma ".to_string()),
        Just("Delta".to_string()),
        Just("Epsilon".to_string()),
        Just("Zeta".to_string()),
    ]
}

fn industry() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some(String::new())),
        Just(Some("Crypto".to_string())),
        Just(Some("Crypto Currency".to_string())),
        Just(Some("CryptoCurrency".to_string())),
        Just(Some(" Retail ".to_string())),
        Just(Some("Travel".to_string())),
    ]
}

fn country() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("United States".to_string()),
        Just("United States.".to_string()),
        Just(" Germany".to_string()),
        Just("India".to_string()),
    ]
}

fn date() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        1 => Just(None),
        1 => Just(Some("not a date".to_string())),
        4 => (2020i32..2024, 1u32..13, 1u32..29)
            .prop_map(|(y, m, d)| Some(format!("{:02}/{:02}/{}", m, d, y))),
        1 => (2020i32..2024, 1u32..13, 1u32..29)
            .prop_map(|(y, m, d)| Some(format!("{}-{:02}-{:02}", y, m, d))),
    ]
}

fn raw_record() -> impl Strategy<Value = RawLayoffRecord> {
    (
        company(),
        industry(),
        proptest::option::of(0i64..500),
        proptest::option::of(prop_oneof![Just("0.1".to_string()), Just("1".to_string())]),
        date(),
        proptest::option::of(prop_oneof![Just("Post-IPO".to_string()), Just("Seed".to_string())]),
        country(),
        proptest::option::of(0i64..1000),
    )
        .prop_map(
            |(company, industry, total, percentage, date, stage, country, funds)| RawLayoffRecord {
                company,
                location: "SF Bay Area".to_string(),
                industry,
                total_laid_off: total,
                percentage_laid_off: percentage,
                date,
                stage,
                country,
                funds_raised_millions: funds,
            },
        )
}

/// Records with deliberate exact repeats mixed in
fn raw_records() -> impl Strategy<Value = Vec<RawLayoffRecord>> {
    proptest::collection::vec(raw_record(), 0..40).prop_flat_map(|records| {
        let len = records.len();
        let repeats = if len == 0 {
            Just(Vec::new()).boxed()
        } else {
            proptest::collection::vec(0..len, 0..10).boxed()
        };
        (Just(records), repeats).prop_map(|(mut records, repeats)| {
            for i in repeats {
                let copy = records[i].clone();
                records.push(copy);
            }
            records
        })
    })
}

fn cleaned(records: Vec<RawLayoffRecord>) -> Vec<LayoffRecord> {
    let (unique, _) = deduplicate(records);
    let (cleaned, _) = Cleaner::default().clean_records(unique);
    let (filled, _) = fill_gaps(cleaned);
    filled
}

// ==================== Properties ====================

proptest! {
    #[test]
    fn prop_dedup_leaves_no_exact_duplicates(records in raw_records()) {
        let input_len = records.len();
        let (unique, removed) = deduplicate(records);
        let distinct: HashSet<&RawLayoffRecord> = unique.iter().collect();
        prop_assert_eq!(distinct.len(), unique.len());
        prop_assert_eq!(unique.len() + removed, input_len);
    }

    #[test]
    fn prop_cleaner_is_idempotent(record in raw_record()) {
        let cleaner = Cleaner::default();
        let once = cleaner.clean_record(record);
        let twice = cleaner.clean_record(once.to_raw());
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_gap_filler_output_has_no_blank_industry_or_measureless_rows(records in raw_records()) {
        for record in cleaned(records) {
            prop_assert_ne!(record.industry.as_deref(), Some(""));
            prop_assert!(record.total_laid_off.is_some() || record.percentage_laid_off.is_some());
        }
    }

    #[test]
    fn prop_cleaned_dataset_passes_validation(records in raw_records()) {
        let result = LayoffValidator::validate_records(&cleaned(records));
        prop_assert!(result.is_valid, "errors: {:?}", result.errors);
    }

    #[test]
    fn prop_top_companies_per_year(records in raw_records()) {
        let records = cleaned(records);
        let ranked = top_companies_per_year(&totals_by_company_year(&records), 5);

        let mut per_year: BTreeMap<i32, Vec<_>> = BTreeMap::new();
        for row in &ranked {
            per_year.entry(row.year).or_default().push(row);
        }
        for rows in per_year.values() {
            prop_assert!(rows.len() <= 5);
            prop_assert_eq!(rows[0].rank, 1);
            for pair in rows.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                if a.total_laid_off == b.total_laid_off {
                    prop_assert_eq!(a.rank, b.rank);
                } else {
                    prop_assert_eq!(b.rank, a.rank + 1);
                }
            }
            prop_assert!(rows.iter().all(|r| r.rank >= 1 && r.rank <= 5));
        }
    }

    #[test]
    fn prop_rolling_total_is_prefix_sum(records in raw_records()) {
        let records = cleaned(records);
        let monthly = monthly_totals(&records);
        let rolling = rolling_totals(&monthly);
        prop_assert_eq!(rolling.len(), monthly.len());

        let mut expected: Option<i64> = None;
        for (row, month) in rolling.iter().zip(monthly.iter()) {
            prop_assert_eq!(&row.period, &month.key);
            if let Some(total) = month.total_laid_off {
                expected = Some(expected.unwrap_or(0) + total);
            }
            prop_assert_eq!(row.rolling_total, expected);
        }
    }

    #[test]
    fn prop_pipeline_never_grows_the_table(records in raw_records()) {
        let input_len = records.len();
        let result = LayoffPipeline::new().process_records(records).unwrap();
        prop_assert!(result.stats.output_records <= input_len);
        prop_assert_eq!(result.dataframe.height(), result.records.len());
    }
}
