use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use layoffs_rust::algorithms::{
    monthly_totals, rolling_totals, top_companies_per_year, totals_by_company_year,
};
use layoffs_rust::config::ReportSettings;
use layoffs_rust::core::domain::RawLayoffRecord;
use layoffs_rust::preprocessing::LayoffPipeline;
use layoffs_rust::services::LayoffReport;
use layoffs_rust::transformations::{deduplicate, fill_gaps, Cleaner};

const COMPANIES: [&str; 8] = [
    "Amazon", " Meta", "Google ", "Stripe", "Coinbase", "Airbnb", "Carvana", "Loft",
];
const INDUSTRIES: [&str; 5] = ["Retail", "Crypto Currency", "", "Travel", "Consumer"];
const COUNTRIES: [&str; 3] = ["United States", "United States.", "Brazil"];

fn synthetic_records(n: usize) -> Vec<RawLayoffRecord> {
    (0..n)
        .map(|i| RawLayoffRecord {
            company: COMPANIES[i % COMPANIES.len()].to_string(),
            location: "SF Bay Area".to_string(),
            industry: Some(INDUSTRIES[i % INDUSTRIES.len()].to_string()),
            total_laid_off: if i % 7 == 0 { None } else { Some((i % 1000) as i64) },
            percentage_laid_off: if i % 3 == 0 { None } else { Some("0.1".to_string()) },
            date: Some(format!("{:02}/{:02}/{}", i % 12 + 1, i % 28 + 1, 2020 + i % 4)),
            stage: Some("Post-IPO".to_string()),
            country: COUNTRIES[i % COUNTRIES.len()].to_string(),
            funds_raised_millions: Some((i % 500) as i64),
        })
        .collect()
}

fn bench_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("stages");
    let records = synthetic_records(10_000);

    group.bench_function("deduplicate", |b| {
        b.iter(|| black_box(deduplicate(black_box(records.clone()))));
    });

    let cleaner = Cleaner::default();
    group.bench_function("clean", |b| {
        b.iter(|| black_box(cleaner.clean_records(black_box(records.clone()))));
    });

    let (cleaned, _) = cleaner.clean_records(records.clone());
    group.bench_function("fill_gaps", |b| {
        b.iter(|| black_box(fill_gaps(black_box(cleaned.clone()))));
    });

    group.finish();
}

fn bench_views(c: &mut Criterion) {
    let mut group = c.benchmark_group("views");
    let (cleaned, _) = Cleaner::default().clean_records(synthetic_records(10_000));
    let (records, _) = fill_gaps(cleaned);

    group.bench_function("rolling_totals", |b| {
        b.iter(|| black_box(rolling_totals(&monthly_totals(black_box(&records)))));
    });

    group.bench_function("top_companies_per_year", |b| {
        b.iter(|| {
            let company_years = totals_by_company_year(black_box(&records));
            black_box(top_companies_per_year(&company_years, 5))
        });
    });

    let settings = ReportSettings::default();
    group.bench_function("full_report", |b| {
        b.iter(|| black_box(LayoffReport::build(black_box(&records), &settings)));
    });

    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let pipeline = LayoffPipeline::new();

    for size in [1_000usize, 10_000, 50_000] {
        let records = synthetic_records(size);
        group.bench_with_input(BenchmarkId::new("process_records", size), &records, |b, input| {
            b.iter(|| black_box(pipeline.process_records(input.clone())));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_stages, bench_views, bench_pipeline);
criterion_main!(benches);
