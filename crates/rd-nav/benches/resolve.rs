//! Benchmarks for query resolution and sidebar filtering.

use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};
use rd_content::Registry;
use rd_nav::{QueryParams, Resolver, filter_sidebar};

fn resolver() -> Resolver {
    let registry = Arc::new(Registry::builtin().unwrap());
    Resolver::with_defaults(registry).unwrap()
}

fn bench_resolve(c: &mut Criterion) {
    let resolver = resolver();
    let hit = QueryParams::parse("?sessions=terminal&section=t-manual");
    let miss = QueryParams::parse("?bogus=xyz&agents=nope&section=t-manual");

    let mut group = c.benchmark_group("resolve");

    group.bench_function("parse_query", |b| {
        b.iter(|| QueryParams::parse("?sessions=terminal&section=t-manual"));
    });

    group.bench_function("resolve_hit", |b| b.iter(|| resolver.resolve(&hit)));

    group.bench_function("resolve_miss", |b| b.iter(|| resolver.resolve(&miss)));

    group.bench_function("build_query", |b| {
        b.iter(|| resolver.build_query("tab-management", Some("tm-split")).to_string());
    });

    group.finish();
}

fn bench_filter(c: &mut Criterion) {
    let registry = Registry::builtin().unwrap();

    let mut group = c.benchmark_group("sidebar_filter");

    group.bench_function("empty", |b| {
        b.iter(|| filter_sidebar(registry.sections(), "", "terminal"));
    });

    group.bench_function("substring", |b| {
        b.iter(|| filter_sidebar(registry.sections(), "session", "terminal"));
    });

    group.finish();
}

criterion_group!(benches, bench_resolve, bench_filter);
criterion_main!(benches);
