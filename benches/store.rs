// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threadmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Threadmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use threadmark::model::BookmarkRecord;
use threadmark::store::{
    BookmarkRepository, JsonFileRepository, MemoryRepository, StaticArchiveClassifier,
    StaticSiteRegistry,
};
use threadmark::BookmarkStore;
use tokio::runtime::Runtime;

mod fixtures;
mod profiler;

use fixtures::{Case, TempDir};

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_current_thread().enable_all().build().expect("tokio runtime")
}

fn ready_store(runtime: &Runtime, case: Case) -> BookmarkStore {
    runtime.block_on(async {
        let repository = MemoryRepository::with_records(fixtures::records(case));
        let store = BookmarkStore::builder(Arc::new(repository))
            .with_site_registry(Arc::new(StaticSiteRegistry::new(fixtures::SITES)))
            .with_archive_classifier(Arc::new(StaticArchiveClassifier::new([
                fixtures::ARCHIVE_SITE,
            ])))
            .build();
        store.initialize();
        store.await_until_initialized().await.expect("initial load");
        store
    })
}

// Benchmark identity (keep stable):
// - Group names in this file: `store.queries`, `store.snapshot`
// - Case IDs (the string after the `/`) must remain stable so results stay comparable.
fn benches_queries(c: &mut Criterion) {
    let runtime = runtime();
    let mut group = c.benchmark_group("store.queries");

    for case in [Case::Small, Case::Medium, Case::Large] {
        let store = ready_store(&runtime, case);
        let probe = fixtures::thread(case.bookmark_count() / 2);

        group.bench_function(format!("active_count_{}", case.id()), |b| {
            b.iter(|| black_box(store.active_bookmarks_count()))
        });
        group.bench_function(format!("total_unseen_{}", case.id()), |b| {
            b.iter(|| black_box(store.total_unseen_posts_count()))
        });
        group.bench_function(format!("map_all_titles_{}", case.id()), |b| {
            b.iter(|| {
                black_box(store.map_all_bookmarks(|record| record.title().map(str::len)))
            })
        });
        group.bench_function(format!("map_one_{}", case.id()), |b| {
            b.iter(|| {
                black_box(store.map_bookmark(black_box(&probe), BookmarkRecord::unseen_posts_count))
            })
        });
    }

    group.finish();
}

fn benches_snapshot(c: &mut Criterion) {
    let runtime = runtime();
    let mut group = c.benchmark_group("store.snapshot");

    for case in [Case::Small, Case::Medium, Case::Large] {
        let store = ready_store(&runtime, case);

        group.bench_function(format!("copy_{}", case.id()), |b| {
            b.iter(|| black_box(store.bookmarks_snapshot().len()))
        });

        let records = fixtures::records(case);
        group.bench_function(format!("json_write_{}", case.id()), |b| {
            b.iter_batched_ref(
                || TempDir::new("store_snapshot_json_write"),
                |tmp| {
                    let repository = JsonFileRepository::new(tmp.path().join("bookmarks.json"));
                    runtime
                        .block_on(repository.save_all(black_box(records.clone())))
                        .expect("save_all");
                    black_box(
                        std::fs::metadata(repository.path()).expect("bookmarks metadata").len(),
                    )
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = profiler::criterion();
    targets = benches_queries, benches_snapshot
}
criterion_main!(benches);
