//! Criterion benchmarks for the table interaction hot paths.
//!
//! 1. Render a dataset into a table view
//! 2. Price sort over a large settlement table
//! 3. Filter over a large settlement table
//! 4. Currency conversion of both price columns

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use gashub_core::currency::{apply_rate, BASE_CURRENCY};
use gashub_core::table::{
    display_rows, filter_table, render_table, sort_table, SortColumns, SortKey, TableRow,
    TableView,
};
use gashub_core::{DisplayTables, Language, TabId, Translations};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_view(n: usize) -> TableView {
    let mut view = TableView::new(
        vec!["Contract".into(), "Price".into(), "Volume".into()],
        SortColumns {
            contract: 0,
            price: 1,
        },
    );
    let rows = (0..n)
        .map(|i| {
            let price = 60.0 + (i as f64 * 0.37).sin() * 5.0;
            TableRow::new(
                vec![
                    format!("M {:02}.{}", i % 12 + 1, 2000 + i / 12),
                    format!("{price:.2}"),
                    format!("{}", 10_000 + i * 13),
                ],
                None,
            )
        })
        .collect();
    view.set_body(rows);
    view
}

// ── Benchmarks ───────────────────────────────────────────────────────

fn bench_render(c: &mut Criterion) {
    c.bench_function("render_day_ahead", |b| {
        let mut view = TableView::new(Vec::new(), SortColumns { contract: 0, price: 3 });
        b.iter(|| {
            let rows = display_rows(TabId::DayAhead.dataset(), Language::En);
            render_table(&mut view, black_box(&rows));
        })
    });
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort_price");
    for n in [100, 1_000, 10_000] {
        let view = make_view(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &view, |b, view| {
            b.iter(|| {
                let mut v = view.clone();
                sort_table(&mut v, SortKey::Price);
                black_box(v.row_count())
            })
        });
    }
    group.finish();
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");
    for n in [100, 1_000, 10_000] {
        let mut view = make_view(n);
        group.bench_function(BenchmarkId::from_parameter(n), |b| {
            b.iter(|| {
                filter_table(&mut view, black_box("m 0"));
                black_box(view.matching_count())
            })
        });
    }
    group.finish();
}

fn bench_convert(c: &mut Criterion) {
    let tr = Translations::embedded();
    let base = DisplayTables::new(TabId::DayAhead, &tr, Language::En, BASE_CURRENCY);
    c.bench_function("apply_rate", |b| {
        b.iter(|| {
            let mut t = base.clone();
            black_box(apply_rate(&mut t, "EUR", 0.5113, &tr, Language::En))
        })
    });
}

criterion_group!(benches, bench_render, bench_sort, bench_filter, bench_convert);
criterion_main!(benches);
