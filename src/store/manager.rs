// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threadmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Threadmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::{BTreeSet, HashMap};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Instant;

use chrono::Utc;
use tokio::runtime::Handle;
use tokio::sync::{broadcast, oneshot};
use url::Url;

use super::collaborators::{
    AppVisibility, ArchiveClassifier, CurrentThreadSource, SiteRegistry, StaticArchiveClassifier,
    StaticSiteRegistry,
};
use super::BookmarkRepository;
use crate::config::StoreConfig;
use crate::error::{ReadinessError, TaskError};
use crate::exec::{DebouncedExecutor, ReadinessGate, SerializedExecutor};
use crate::model::{BookmarkChange, BookmarkRecord, NewBookmark, ThreadIdentity};

const TAG: &str = "BookmarkStore";

/// How a snapshot write is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistMode {
    /// Runs right away on its own background task, outside the write queue.
    Eager,
    /// Queued on the serialized persistence executor.
    Deferred,
}

/// No current thread; used when the application does not track one.
#[derive(Debug, Default)]
struct NoCurrentThread;

impl CurrentThreadSource for NoCurrentThread {
    fn current_thread(&self) -> Option<ThreadIdentity> {
        None
    }
}

pub struct BookmarkStoreBuilder {
    repository: Arc<dyn BookmarkRepository>,
    config: StoreConfig,
    archives: Arc<dyn ArchiveClassifier>,
    current_thread: Arc<dyn CurrentThreadSource>,
    sites: Arc<dyn SiteRegistry>,
    runtime: Option<Handle>,
}

impl BookmarkStoreBuilder {
    pub fn with_config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_archive_classifier(mut self, archives: Arc<dyn ArchiveClassifier>) -> Self {
        self.archives = archives;
        self
    }

    pub fn with_current_thread(mut self, current_thread: Arc<dyn CurrentThreadSource>) -> Self {
        self.current_thread = current_thread;
        self
    }

    pub fn with_site_registry(mut self, sites: Arc<dyn SiteRegistry>) -> Self {
        self.sites = sites;
        self
    }

    pub fn with_runtime(mut self, runtime: Handle) -> Self {
        self.runtime = Some(runtime);
        self
    }

    /// Panics on an invalid config, and when called outside a tokio runtime without a runtime
    /// handle.
    pub fn build(self) -> BookmarkStore {
        let config = self.config;
        if let Err(error) = config.validate() {
            panic!("{TAG}: {error}");
        }
        let runtime = self.runtime.unwrap_or_else(Handle::current);
        let (change_tx, _) = broadcast::channel(config.change_buffer_capacity);
        let (fetch_tx, _) = broadcast::channel(config.fetch_buffer_capacity);

        let inner = StoreInner {
            bookmarks: RwLock::new(HashMap::with_capacity(config.initial_capacity)),
            gate: ReadinessGate::new(TAG),
            initialize_started: AtomicBool::new(false),
            persist_executor: SerializedExecutor::new("bookmarks-persist", &runtime),
            debounced_executor: DebouncedExecutor::new("bookmarks-debounce", &runtime),
            change_tx,
            fetch_tx,
            repository: self.repository,
            archives: self.archives,
            current_thread: self.current_thread,
            sites: self.sites,
            runtime,
            config,
        };

        BookmarkStore { inner: Arc::new(inner) }
    }
}

struct StoreInner {
    config: StoreConfig,
    runtime: Handle,
    bookmarks: RwLock<HashMap<ThreadIdentity, BookmarkRecord>>,
    gate: ReadinessGate,
    initialize_started: AtomicBool,
    persist_executor: SerializedExecutor,
    debounced_executor: DebouncedExecutor<ThreadIdentity>,
    change_tx: broadcast::Sender<BookmarkChange>,
    fetch_tx: broadcast::Sender<ThreadIdentity>,
    repository: Arc<dyn BookmarkRepository>,
    archives: Arc<dyn ArchiveClassifier>,
    current_thread: Arc<dyn CurrentThreadSource>,
    sites: Arc<dyn SiteRegistry>,
}

impl StoreInner {
    fn read(&self) -> RwLockReadGuard<'_, HashMap<ThreadIdentity, BookmarkRecord>> {
        self.bookmarks.read().expect("bookmarks lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<ThreadIdentity, BookmarkRecord>> {
        self.bookmarks.write().expect("bookmarks lock poisoned")
    }

    fn check_ready(&self, operation: &str) {
        assert!(
            self.gate.is_ready(),
            "{TAG} is not ready yet, await_until_initialized() must complete before {operation}()"
        );
    }

    /// Active bookmarks are watched and not hosted on an archive site.
    fn is_active_bookmark(&self, record: &BookmarkRecord) -> bool {
        record.is_active() && !self.is_archive_bookmark(record)
    }

    fn is_archive_bookmark(&self, record: &BookmarkRecord) -> bool {
        self.archives.is_archive_site(record.thread_identity().site())
    }

    fn snapshot(&self) -> Vec<BookmarkRecord> {
        let mut records = self.read().values().cloned().collect::<Vec<_>>();
        records.sort_by(|a, b| a.thread_identity().cmp(b.thread_identity()));
        records
    }

    fn emit(&self, change: BookmarkChange) {
        if self.config.verbose_logs {
            log::debug!(
                "{TAG}: emitting {change:?} to {} subscribers",
                self.change_tx.receiver_count()
            );
        }
        // No subscribers is not an error.
        let _ = self.change_tx.send(change);
    }

    async fn persist_internal(&self) {
        let records = self.snapshot();
        let count = records.len();

        match self.repository.save_all(records).await {
            Ok(()) => {
                if self.config.verbose_logs {
                    log::debug!("{TAG}: persisted {count} bookmarks");
                }
            }
            Err(error) => log::error!("{TAG}: failed to persist bookmarks: {error}"),
        }
    }

    /// Queues a snapshot write followed by `change`. The receiver resolves once both are done.
    fn persist_then_emit(
        self: &Arc<Self>,
        change: Option<BookmarkChange>,
    ) -> oneshot::Receiver<()> {
        let inner = self.clone();
        self.persist_executor.post_with_result(async move {
            inner.persist_internal().await;
            if let Some(change) = change {
                inner.emit(change);
            }
        })
    }

    fn persist(self: &Arc<Self>, mode: PersistMode) {
        match mode {
            PersistMode::Eager => {
                let inner = self.clone();
                self.runtime.spawn(async move {
                    log::debug!("{TAG}: eager persist started");
                    inner.persist_internal().await;
                    log::debug!("{TAG}: eager persist finished");
                });
            }
            PersistMode::Deferred => {
                let _ = self.persist_then_emit(None);
            }
        }
    }

    fn bookmarks_changed(self: &Arc<Self>, change: BookmarkChange) {
        let _ = self.persist_then_emit(Some(change));
    }

    fn create_internal(&self, new_bookmarks: Vec<NewBookmark>) -> BTreeSet<ThreadIdentity> {
        let mut actually_created = BTreeSet::new();
        if new_bookmarks.is_empty() {
            return actually_created;
        }

        let now = Utc::now();
        let mut bookmarks = self.write();
        for new_bookmark in new_bookmarks {
            if bookmarks.contains_key(&new_bookmark.thread_identity) {
                continue;
            }

            let record = new_bookmark.into_record(now);
            actually_created.insert(record.thread_identity().clone());
            bookmarks.insert(record.thread_identity().clone(), record);
        }

        actually_created
    }
}

/// Lock-protected registry of thread bookmarks.
///
/// Mutations take the exclusive lock only for the in-memory change, then queue a full snapshot
/// write; the matching [`BookmarkChange`] is broadcast after that write finished. Queries take the
/// shared lock and hand the mapper a `&BookmarkRecord` that cannot outlive the call.
///
/// Every operation except [`BookmarkStore::initialize`], [`BookmarkStore::is_ready`],
/// [`BookmarkStore::await_until_initialized`] and the subscription methods panics when called
/// before the initial load succeeded.
#[derive(Clone)]
pub struct BookmarkStore {
    inner: Arc<StoreInner>,
}

impl BookmarkStore {
    pub fn builder(repository: Arc<dyn BookmarkRepository>) -> BookmarkStoreBuilder {
        BookmarkStoreBuilder {
            repository,
            config: StoreConfig::default(),
            archives: Arc::new(StaticArchiveClassifier::default()),
            current_thread: Arc::new(NoCurrentThread),
            sites: Arc::new(StaticSiteRegistry::default()),
            runtime: None,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    /// Starts the initial bulk load in the background. Must be called exactly once.
    pub fn initialize(&self) {
        let already_started = self.inner.initialize_started.swap(true, Ordering::SeqCst);
        assert!(!already_started, "{TAG}.initialize() called more than once");

        let inner = self.inner.clone();
        let known_site_names = inner.sites.known_site_names();
        log::debug!("{TAG}: initialize() for {} known sites", known_site_names.len());

        self.inner.runtime.spawn(async move {
            match inner.repository.load_all(&known_site_names).await {
                Ok(records) => {
                    let (total, active) = {
                        let mut bookmarks = inner.write();
                        bookmarks.clear();
                        for record in records {
                            bookmarks.insert(record.thread_identity().clone(), record);
                        }
                        let active = bookmarks
                            .values()
                            .filter(|record| inner.is_active_bookmark(record))
                            .count();
                        (bookmarks.len(), active)
                    };

                    // Queued before the gate opens so it precedes every mutation's event.
                    let notifier = inner.clone();
                    inner.persist_executor.post(async move {
                        let _ = notifier.gate.await_ready().await;
                        notifier.emit(BookmarkChange::Initialized);
                        Ok(())
                    });

                    inner.gate.signal_success();
                    log::info!("{TAG}: loaded {total} bookmarks, {active} active");
                }
                Err(error) => {
                    log::error!("{TAG}: initial load failed: {error}");
                    inner.gate.signal_failure(error);
                }
            }
        });
    }

    pub fn is_ready(&self) -> bool {
        self.inner.gate.is_ready()
    }

    pub async fn await_until_initialized(&self) -> Result<(), ReadinessError> {
        if self.is_ready() {
            return Ok(());
        }

        log::debug!("{TAG} is not ready yet, waiting...");
        let started = Instant::now();
        let result = self.inner.gate.await_ready().await;
        log::debug!("{TAG} initialization completed, took {:?}", started.elapsed());
        result
    }

    pub fn subscribe_changes(&self) -> broadcast::Receiver<BookmarkChange> {
        self.inner.change_tx.subscribe()
    }

    /// Threads the user is looking at that just started fetching.
    pub fn subscribe_fetch_activity(&self) -> broadcast::Receiver<ThreadIdentity> {
        self.inner.fetch_tx.subscribe()
    }

    /// Called by the thread loader right before it fetches `thread`. Broadcasts only for the
    /// currently displayed thread, and only while its bookmark is active.
    pub fn on_thread_fetch_started(&self, thread: &ThreadIdentity) {
        if self.inner.current_thread.current_thread().as_ref() != Some(thread) {
            return;
        }

        let is_active = self
            .inner
            .read()
            .get(thread)
            .is_some_and(|record| self.inner.is_active_bookmark(record));

        if is_active {
            let _ = self.inner.fetch_tx.send(thread.clone());
        }
    }

    pub fn exists(&self, thread: &ThreadIdentity) -> bool {
        self.inner.check_ready("exists");
        self.inner.read().contains_key(thread)
    }

    pub fn create_bookmark(
        &self,
        thread: ThreadIdentity,
        title: Option<String>,
        thumbnail_url: Option<Url>,
    ) -> bool {
        let new_bookmark =
            NewBookmark { thread_identity: thread, title, thumbnail_url, initial_flags: None };
        !self.create_bookmarks(vec![new_bookmark]).is_empty()
    }

    /// Inserts every bookmark not already present and queues the write. Returns the identities
    /// that were actually inserted.
    pub fn create_bookmarks(&self, new_bookmarks: Vec<NewBookmark>) -> BTreeSet<ThreadIdentity> {
        self.inner.check_ready("create_bookmarks");

        let actually_created = self.inner.create_internal(new_bookmarks);
        if actually_created.is_empty() {
            return actually_created;
        }

        log::debug!("{TAG}: bookmarks created ({})", actually_created.len());
        self.inner.bookmarks_changed(BookmarkChange::created(actually_created.clone()));
        actually_created
    }

    /// Like [`Self::create_bookmarks`] but returns only after the write finished and the
    /// `Created` event was broadcast.
    pub async fn create_bookmarks_durable(
        &self,
        new_bookmarks: Vec<NewBookmark>,
    ) -> BTreeSet<ThreadIdentity> {
        self.inner.check_ready("create_bookmarks_durable");

        let actually_created = self.inner.create_internal(new_bookmarks);
        if actually_created.is_empty() {
            return actually_created;
        }

        let done = self
            .inner
            .persist_then_emit(Some(BookmarkChange::created(actually_created.clone())));
        if done.await.is_err() {
            log::error!("{TAG}: durable create did not complete");
        }

        log::debug!("{TAG}: bookmarks created durably ({})", actually_created.len());
        actually_created
    }

    pub fn delete_bookmark(&self, thread: &ThreadIdentity) -> bool {
        !self.delete_bookmarks(std::slice::from_ref(thread)).is_empty()
    }

    /// Panics on an empty `threads`.
    pub fn delete_bookmarks(&self, threads: &[ThreadIdentity]) -> BTreeSet<ThreadIdentity> {
        assert!(!threads.is_empty(), "delete_bookmarks() called with no thread identities");
        self.inner.check_ready("delete_bookmarks");

        let removed = {
            let mut bookmarks = self.inner.write();
            threads
                .iter()
                .filter(|thread| bookmarks.remove(*thread).is_some())
                .cloned()
                .collect::<BTreeSet<_>>()
        };

        if removed.is_empty() {
            return removed;
        }

        log::debug!("{TAG}: bookmarks deleted ({})", removed.len());
        self.inner.bookmarks_changed(BookmarkChange::deleted(removed.clone()));
        removed
    }

    pub fn bookmark_thumbnail(&self, thread: &ThreadIdentity) -> Option<Url> {
        self.inner.check_ready("bookmark_thumbnail");
        self.inner.read().get(thread).and_then(|record| record.thumbnail_url().cloned())
    }

    pub fn update_bookmark<F>(&self, thread: &ThreadIdentity, mutator: F) -> Option<ThreadIdentity>
    where
        F: FnMut(&mut BookmarkRecord),
    {
        self.update_bookmarks(std::slice::from_ref(thread), mutator).into_iter().next()
    }

    /// Applies `mutator` to a copy of each present record and keeps the copy when it differs.
    ///
    /// Does not persist: follow up with [`Self::persist_bookmarks_manually`]. The mutator runs
    /// under the exclusive lock and must not call back into the store.
    pub fn update_bookmarks<F>(
        &self,
        threads: &[ThreadIdentity],
        mut mutator: F,
    ) -> BTreeSet<ThreadIdentity>
    where
        F: FnMut(&mut BookmarkRecord),
    {
        self.inner.check_ready("update_bookmarks");
        assert!(!threads.is_empty(), "update_bookmarks() called with no thread identities");

        let mut updated = BTreeSet::new();
        let mut bookmarks = self.inner.write();

        for thread in threads {
            let Some(old) = bookmarks.get(thread) else {
                continue;
            };

            let mut mutated = old.clone();
            mutator(&mut mutated);

            if mutated != *old {
                bookmarks.insert(thread.clone(), mutated);
                updated.insert(thread.clone());
            }
        }

        updated
    }

    /// Writes the full snapshot and then broadcasts `Updated(threads)`. No-op for an empty set.
    pub async fn persist_bookmarks_manually(&self, threads: &BTreeSet<ThreadIdentity>) {
        self.inner.check_ready("persist_bookmarks_manually");
        if threads.is_empty() {
            return;
        }

        let done =
            self.inner.persist_then_emit(Some(BookmarkChange::updated(threads.iter().cloned())));
        if done.await.is_err() {
            log::error!("{TAG}: manual persist did not complete");
        }
    }

    pub fn persist_bookmarks(&self, mode: PersistMode) {
        if !self.is_ready() {
            return;
        }
        self.inner.persist(mode);
    }

    /// Marks every notification of `thread` as read and moves its read position forward to
    /// `last_seen_post_number`.
    pub fn read_posts_and_notifications(
        &self,
        thread: &ThreadIdentity,
        last_seen_post_number: Option<u64>,
    ) {
        self.inner.check_ready("read_posts_and_notifications");

        {
            let mut bookmarks = self.inner.write();
            let Some(record) = bookmarks.get_mut(thread) else {
                return;
            };

            record.read_all_posts_and_notifications();
            if let Some(post_no) = last_seen_post_number {
                record.update_last_viewed_post_number(post_no);
            }
        }

        self.inner.bookmarks_changed(BookmarkChange::updated([thread.clone()]));
    }

    pub fn read_all_posts_and_notifications(&self) {
        self.inner.check_ready("read_all_posts_and_notifications");

        let threads = {
            let mut bookmarks = self.inner.write();
            if bookmarks.is_empty() {
                return;
            }
            for record in bookmarks.values_mut() {
                record.read_all_posts_and_notifications();
            }
            bookmarks.keys().cloned().collect::<BTreeSet<_>>()
        };

        self.inner.bookmarks_changed(BookmarkChange::updated(threads));
    }

    /// Records that the user scrolled to `post_no`. Bursts of calls for the same thread collapse
    /// into one trailing write.
    pub fn on_post_viewed(&self, thread: &ThreadIdentity, post_no: u64, unseen_posts_count: u32) {
        if !self.is_ready() {
            return;
        }

        let last_viewed = {
            let bookmarks = self.inner.read();
            bookmarks.get(thread).map(BookmarkRecord::last_viewed_post_number)
        };
        let Some(last_viewed) = last_viewed else {
            return;
        };

        if post_no <= last_viewed {
            return;
        }

        self.update_bookmark(thread, |record| {
            record.update_seen_posts_count(unseen_posts_count);
            record.update_last_viewed_post_number(post_no);
            record.read_replies_up_to_post(post_no);
        });

        let inner = self.inner.clone();
        let change = BookmarkChange::updated([thread.clone()]);
        self.inner.debounced_executor.post(
            thread.clone(),
            self.inner.config.debounce_delay(),
            async move {
                let _ = inner.persist_then_emit(Some(change));
                Ok(())
            },
        );
    }

    /// Removes every bookmark whose watching flag is cleared, archived or not.
    pub fn prune_non_active(&self) -> BTreeSet<ThreadIdentity> {
        self.inner.check_ready("prune_non_active");

        let pruned = {
            let mut bookmarks = self.inner.write();
            let to_delete = bookmarks
                .iter()
                .filter(|(_, record)| !record.is_active())
                .map(|(thread, _)| thread.clone())
                .collect::<BTreeSet<_>>();

            for thread in &to_delete {
                bookmarks.remove(thread);
            }
            to_delete
        };

        if !pruned.is_empty() {
            log::debug!("{TAG}: pruned {} non-active bookmarks", pruned.len());
            self.inner.bookmarks_changed(BookmarkChange::deleted(pruned.clone()));
        }

        pruned
    }

    /// Clears the map, then asks the repository to drop everything. `Deleted` is broadcast only
    /// when the repository call succeeded.
    pub fn delete_all(&self) -> BTreeSet<ThreadIdentity> {
        self.inner.check_ready("delete_all");

        let all_threads = {
            let mut bookmarks = self.inner.write();
            let all_threads = bookmarks.keys().cloned().collect::<BTreeSet<_>>();
            bookmarks.clear();
            all_threads
        };

        let inner = self.inner.clone();
        let deleted = all_threads.clone();
        self.inner.persist_executor.post(async move {
            if let Err(error) = inner.repository.delete_all().await {
                log::error!("{TAG}: delete_all() repository error: {error}");
                return Ok(());
            }

            if !deleted.is_empty() {
                inner.emit(BookmarkChange::deleted(deleted));
            }
            Ok(())
        });

        all_threads
    }

    /// Broadcasts `Updated(All)` after the next write, asking subscribers to re-read everything.
    pub fn refresh_bookmarks(&self) {
        if !self.is_ready() {
            return;
        }
        self.inner.bookmarks_changed(BookmarkChange::updated_all());
    }

    /// Runs `task` on the persistence queue, ordered with every other write. Errors are logged.
    pub fn enqueue_persist_func<F, Fut>(&self, task: F)
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
    {
        self.inner.persist_executor.post(async move {
            if let Err(error) = task().await {
                log::error!("{TAG}: enqueue_persist_func() error: {error}");
            }
            Ok(())
        });
    }

    /// Waits for every write queued so far.
    pub async fn flush(&self) {
        self.inner.persist_executor.flush().await;
    }

    pub fn on_app_visibility_changed(&self, visibility: AppVisibility) {
        if !self.is_ready() || visibility != AppVisibility::Background {
            return;
        }
        self.inner.persist(PersistMode::Eager);
    }

    pub fn on_app_entered_background(&self) {
        self.on_app_visibility_changed(AppVisibility::Background);
    }

    pub fn view_bookmark<F>(&self, thread: &ThreadIdentity, viewer: F)
    where
        F: FnMut(&BookmarkRecord),
    {
        self.view_bookmarks(std::slice::from_ref(thread), viewer);
    }

    pub fn view_bookmarks<F>(&self, threads: &[ThreadIdentity], mut viewer: F)
    where
        F: FnMut(&BookmarkRecord),
    {
        self.inner.check_ready("view_bookmarks");
        assert!(!threads.is_empty(), "view_bookmarks() called with no thread identities");

        let bookmarks = self.inner.read();
        for record in threads.iter().filter_map(|thread| bookmarks.get(thread)) {
            viewer(record);
        }
    }

    pub fn map_bookmark<T, F>(&self, thread: &ThreadIdentity, mapper: F) -> Option<T>
    where
        F: FnOnce(&BookmarkRecord) -> T,
    {
        self.inner.check_ready("map_bookmark");
        self.inner.read().get(thread).map(mapper)
    }

    /// Maps the requested bookmarks in request order, skipping identities that are not present.
    pub fn map_bookmarks<T, F>(&self, threads: &[ThreadIdentity], mapper: F) -> Vec<T>
    where
        F: FnMut(&BookmarkRecord) -> T,
    {
        self.inner.check_ready("map_bookmarks");
        assert!(!threads.is_empty(), "map_bookmarks() called with no thread identities");

        let bookmarks = self.inner.read();
        threads.iter().filter_map(|thread| bookmarks.get(thread)).map(mapper).collect()
    }

    /// Maps every bookmark, ordered by thread identity.
    pub fn map_all_bookmarks<T, F>(&self, mut mapper: F) -> Vec<T>
    where
        F: FnMut(&BookmarkRecord) -> T,
    {
        self.map_not_null_all_bookmarks(|record| Some(mapper(record)))
    }

    pub fn map_not_null_all_bookmarks<T, F>(&self, mapper: F) -> Vec<T>
    where
        F: FnMut(&BookmarkRecord) -> Option<T>,
    {
        self.inner.check_ready("map_all_bookmarks");

        let bookmarks = self.inner.read();
        let mut records = bookmarks.values().collect::<Vec<_>>();
        records.sort_by(|a, b| a.thread_identity().cmp(b.thread_identity()));
        records.into_iter().filter_map(mapper).collect()
    }

    /// Copies of every record, ordered by thread identity.
    pub fn bookmarks_snapshot(&self) -> Vec<BookmarkRecord> {
        self.inner.check_ready("bookmarks_snapshot");
        self.inner.snapshot()
    }

    pub fn bookmarks_count(&self) -> usize {
        self.inner.check_ready("bookmarks_count");
        self.inner.read().len()
    }

    pub fn active_bookmarks_count(&self) -> usize {
        self.inner.check_ready("active_bookmarks_count");
        self.inner.read().values().filter(|record| self.inner.is_active_bookmark(record)).count()
    }

    pub fn has_active_bookmarks(&self) -> bool {
        self.inner.check_ready("has_active_bookmarks");
        self.inner.read().values().any(|record| self.inner.is_active_bookmark(record))
    }

    /// Unseen posts across every bookmark outside archive sites.
    pub fn total_unseen_posts_count(&self) -> u64 {
        self.inner.check_ready("total_unseen_posts_count");
        self.inner
            .read()
            .values()
            .filter(|record| !self.inner.is_archive_bookmark(record))
            .map(|record| u64::from(record.unseen_posts_count()))
            .sum()
    }

    pub fn has_unread_replies(&self) -> bool {
        self.inner.check_ready("has_unread_replies");
        self.inner
            .read()
            .values()
            .any(|record| !self.inner.is_archive_bookmark(record) && record.has_unread_replies())
    }
}
