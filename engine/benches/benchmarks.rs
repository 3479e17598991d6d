//! Performance benchmarks for catalog-engine

use catalog_engine::{Catalog, Lookup, MemoryBlobStore, Product, ProductPatch, ProductsStore};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn products(count: usize) -> Vec<Product> {
    (0..count)
        .map(|i| Product::new(format!("Product {i}"), format!("n{}", i % 100), "description"))
        .collect()
}

fn bench_catalog(c: &mut Criterion) {
    let mut group = c.benchmark_group("catalog");

    for size in [100usize, 1000, 10000] {
        let catalog = Catalog::from_products(products(size));

        group.bench_with_input(BenchmarkId::new("find_any", size), &catalog, |b, catalog| {
            b.iter(|| catalog.find(black_box(&Lookup::any("product 50"))))
        });

        group.bench_with_input(BenchmarkId::new("update_number", size), &size, |b, &size| {
            let mut catalog = Catalog::from_products(products(size));
            let patch = ProductPatch::new().description("patched");
            b.iter(|| catalog.update(black_box(&Lookup::number("n7")), black_box(&patch)))
        });
    }

    group.finish();
}

fn bench_cache(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache");

    for size in [100usize, 1000] {
        group.bench_with_input(BenchmarkId::new("merge_one", size), &size, |b, &size| {
            let mut store = ProductsStore::init(MemoryBlobStore::new());
            let _ = store.set_products(products(size));
            let updated = Product::new(format!("Product {}", size / 2), "n0", "merged");
            b.iter(|| store.merge_products(black_box(updated.clone())))
        });

        group.bench_with_input(BenchmarkId::new("rehydrate", size), &size, |b, &size| {
            let blob = MemoryBlobStore::new();
            let _ = ProductsStore::init(blob.clone()).set_products(products(size));
            b.iter(|| ProductsStore::init(blob.clone()).rehydrate())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_catalog, bench_cache);
criterion_main!(benches);
