//! Benchmarks for the table of contents layout.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pdfdesk::{TocLayout, TocOptions};

fn documents(count: usize) -> Vec<(String, u32)> {
    (0..count)
        .map(|i| (format!("chapter-{:03}-with-a-longer-file-name.pdf", i), (i % 17) as u32 + 1))
        .collect()
}

fn bench_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("toc_layout");

    for count in [5usize, 50, 500] {
        let docs = documents(count);

        group.bench_with_input(BenchmarkId::new("truncate", count), &docs, |b, docs| {
            let options = TocOptions::default();
            b.iter(|| TocLayout::build(black_box(docs), &options))
        });

        group.bench_with_input(BenchmarkId::new("paginate", count), &docs, |b, docs| {
            let options = TocOptions::new().paginate();
            b.iter(|| TocLayout::build(black_box(docs), &options))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_layout);
criterion_main!(benches);
