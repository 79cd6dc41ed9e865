use criterion::{black_box, criterion_group, criterion_main, Criterion};
use folio::export::layout::DocumentLayout;
use folio::filter::{filter, CategoryFilter};
use folio::{Catalog, Category, ExportConfig, ImageRecord};

fn large_catalog(n: u32) -> Catalog {
    let records = (1..=n)
        .map(|i| {
            ImageRecord::new(
                i,
                format!("https://img.example/{}.jpg", i),
                Category::ALL[(i % 4) as usize],
                format!("Look {}", i),
            )
        })
        .collect();
    Catalog::new(records).expect("valid catalog")
}

fn bench_filter(c: &mut Criterion) {
    let catalog = large_catalog(10_000);

    c.bench_function("filter_all", |b| {
        b.iter(|| filter(black_box(&catalog), CategoryFilter::All).len())
    });
    c.bench_function("filter_editorial", |b| {
        b.iter(|| filter(black_box(&catalog), CategoryFilter::Only(Category::Editorial)).len())
    });
}

fn bench_layout(c: &mut Criterion) {
    let config = ExportConfig::default();

    c.bench_function("layout_six_entries", |b| {
        b.iter(|| {
            let mut layout = DocumentLayout::new(&config);
            for i in 0..6 {
                layout.begin_entry(i);
                layout.place(i, black_box(1200), black_box(1600), "Runway Collection", "Fashion");
            }
            layout.finish()
        })
    });
}

criterion_group!(benches, bench_filter, bench_layout);
criterion_main!(benches);
