// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threadmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Threadmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use threadmark::model::{BookmarkChange, BookmarkReply, NewBookmark, ThreadIdentity};
use threadmark::store::{
    JsonFileRepository, StaticArchiveClassifier, StaticSiteRegistry, WriteDurability,
};
use threadmark::BookmarkStore;

struct TempDir {
    path: PathBuf,
}

impl TempDir {
    fn new(prefix: &str) -> Self {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let path = std::env::temp_dir()
            .join(format!("threadmark-it-{prefix}-{}-{nanos}", std::process::id()));
        fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn thread(raw: &str) -> ThreadIdentity {
    raw.parse().unwrap_or_else(|err| panic!("bad thread identity {raw:?}: {err}"))
}

async fn open_store(path: &Path, sites: &[&str]) -> BookmarkStore {
    let repository = JsonFileRepository::new(path).with_durability(WriteDurability::Durable);
    let store = BookmarkStore::builder(Arc::new(repository))
        .with_site_registry(Arc::new(StaticSiteRegistry::new(sites.iter().copied())))
        .with_archive_classifier(Arc::new(StaticArchiveClassifier::new(["archive"])))
        .build();
    store.initialize();
    store.await_until_initialized().await.unwrap();
    store
}

#[tokio::test]
async fn bookmarks_survive_a_restart() {
    let tmp = TempDir::new("restart");
    let path = tmp.path().join("bookmarks.json");
    let (watched, archived, dropped) =
        (thread("4chan/g/100"), thread("archive/g/200"), thread("4chan/a/300"));

    let store = open_store(&path, &["4chan", "archive"]).await;
    let mut changes = store.subscribe_changes();
    store
        .create_bookmarks_durable(vec![
            NewBookmark::new(watched.clone()).with_title("watched"),
            NewBookmark::new(archived.clone()),
            NewBookmark::new(dropped.clone()),
        ])
        .await;
    let updated = store.update_bookmarks(&[watched.clone()], |record| {
        record.update_thread_info(120, 250);
        record.add_reply(BookmarkReply::new(240, 100));
    });
    store.persist_bookmarks_manually(&updated).await;
    store.delete_bookmark(&dropped);
    store.flush().await;

    let mut observed = Vec::new();
    while let Ok(change) = changes.try_recv() {
        // The initial-load event may land after subscribing.
        if change != BookmarkChange::Initialized {
            observed.push(change);
        }
    }
    assert_eq!(
        observed,
        vec![
            BookmarkChange::created([watched.clone(), archived.clone(), dropped.clone()]),
            BookmarkChange::updated([watched.clone()]),
            BookmarkChange::deleted([dropped.clone()]),
        ]
    );
    let before = store.bookmarks_snapshot();
    drop(store);

    let reopened = open_store(&path, &["4chan", "archive"]).await;
    assert_eq!(reopened.bookmarks_snapshot(), before);
    assert_eq!(reopened.active_bookmarks_count(), 1);
    assert_eq!(reopened.total_unseen_posts_count(), 120);
    assert!(reopened.has_unread_replies());
    assert_eq!(
        reopened.map_bookmark(&watched, |record| record.title().map(str::to_owned)),
        Some(Some("watched".to_owned()))
    );
}

#[tokio::test]
async fn unknown_sites_are_not_loaded() {
    let tmp = TempDir::new("unknown-sites");
    let path = tmp.path().join("bookmarks.json");

    let store = open_store(&path, &["4chan", "lainchan"]).await;
    store
        .create_bookmarks_durable(vec![
            NewBookmark::new(thread("4chan/g/1")),
            NewBookmark::new(thread("lainchan/tech/2")),
        ])
        .await;
    drop(store);

    let reopened = open_store(&path, &["4chan"]).await;
    let loaded = reopened
        .map_all_bookmarks(|record| record.thread_identity().clone())
        .into_iter()
        .collect::<BTreeSet<_>>();
    assert_eq!(loaded, BTreeSet::from([thread("4chan/g/1")]));
}

#[tokio::test(start_paused = true)]
async fn post_viewed_is_written_after_the_debounce_delay() {
    let tmp = TempDir::new("debounce");
    let path = tmp.path().join("bookmarks.json");
    let target = thread("4chan/g/42");

    let store = open_store(&path, &["4chan"]).await;
    store.create_bookmarks_durable(vec![NewBookmark::new(target.clone())]).await;
    for post in [10, 20, 30] {
        store.on_post_viewed(&target, post, 0);
    }

    tokio::time::sleep(store.config().debounce_delay() + Duration::from_millis(50)).await;
    store.flush().await;
    drop(store);

    let reopened = open_store(&path, &["4chan"]).await;
    assert_eq!(reopened.map_bookmark(&target, |record| record.last_viewed_post_number()), Some(30));
}

#[tokio::test]
async fn delete_all_removes_the_file() {
    let tmp = TempDir::new("delete-all");
    let path = tmp.path().join("bookmarks.json");

    let store = open_store(&path, &["4chan"]).await;
    store.create_bookmarks_durable(vec![NewBookmark::new(thread("4chan/g/1"))]).await;
    assert!(path.is_file());

    assert_eq!(store.delete_all().len(), 1);
    store.flush().await;

    assert!(!path.exists());
    assert_eq!(store.bookmarks_count(), 0);
}
