// ABOUTME: Criterion benchmarks for record formatting, page assembly and store queries
// ABOUTME: Measures the per-request cost of rendering a full page of 60 records
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the viewer's request path.
//!
//! Rendering a page means formatting up to 60 records (markdown conversion
//! plus highlighting) and assembling the HTML shell, so both are measured
//! with and without an active search term.

#![allow(
    clippy::missing_docs_in_private_items,
    clippy::unwrap_used,
    missing_docs
)]

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use promptlog::config::DatabaseUrl;
use promptlog::database::RecordStore;
use promptlog::formatters::RecordFormatter;
use promptlog::models::{NewRecord, Record, SearchQuery};
use promptlog::pages::{render_page, PageContext};
use tokio::runtime::Runtime;

const SAMPLE_RESPONSE: &str = "## Scheduling\n\n\
    The **kernel** scheduler picks the next task. See [the docs](https://kernel.org/doc).\n\n\
    ```c\nstatic void pick_next_task(struct rq *rq) { /* kernel */ }\n```\n\n\
    | policy | kernel class |\n|---|---|\n| SCHED_OTHER | fair |\n| SCHED_FIFO | rt |\n\n\
    - [x] explain CFS\n- [ ] explain EEVDF\n";

fn sample_records(count: i64) -> Vec<Record> {
    (0..count)
        .map(|id| Record {
            id,
            prompt: format!("Question {id}: how does the kernel pick the next task?"),
            response: SAMPLE_RESPONSE.to_owned(),
            model: "gpt-4o-mini".to_owned(),
            created_at: format!("2024-01-05T15:{:02}:00.000000", id % 60),
        })
        .collect()
}

fn bench_format_records(c: &mut Criterion) {
    let formatter = RecordFormatter::default();
    let records = sample_records(60);

    let mut group = c.benchmark_group("format_records");
    group.throughput(Throughput::Elements(records.len() as u64));
    for search in [None, Some("kernel")] {
        let label = search.unwrap_or("none");
        group.bench_with_input(BenchmarkId::new("search", label), &search, |b, search| {
            b.iter(|| formatter.format_all(black_box(&records), *search));
        });
    }
    group.finish();
}

fn bench_render_page(c: &mut Criterion) {
    let formatter = RecordFormatter::default();
    let search = SearchQuery::from_raw(Some("kernel"));
    let formatted = formatter.format_all(&sample_records(60), search.term());
    let context = PageContext {
        search: &search,
        csrf_token: "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef",
    };

    c.bench_function("render_page_60_records", |b| {
        b.iter(|| render_page(black_box(&context), black_box(&formatted)));
    });
}

fn bench_store_search(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let store = rt.block_on(async {
        let store = RecordStore::create(&DatabaseUrl::Memory).await.unwrap();
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap();
        for minute in 0..500 {
            let prompt = if minute % 7 == 0 {
                format!("kernel question {minute}")
            } else {
                format!("general question {minute}")
            };
            let record = NewRecord::new(prompt, SAMPLE_RESPONSE, "gpt-4o-mini")
                .at(base + Duration::minutes(minute));
            store.insert(&record).await.unwrap();
        }
        store
    });

    let mut group = c.benchmark_group("store_search");
    for term in [None, Some("kernel"), Some("general")] {
        let query = SearchQuery::from_raw(term);
        group.bench_with_input(
            BenchmarkId::new("term", term.unwrap_or("none")),
            &query,
            |b, query| {
                b.to_async(&rt)
                    .iter(|| async { store.search(black_box(query)).await.unwrap() });
            },
        );
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_format_records,
    bench_render_page,
    bench_store_search
);
criterion_main!(benches);
