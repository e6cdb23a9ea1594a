// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threadmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Threadmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::RepositoryError;
use crate::model::BookmarkRecord;

/// Durable storage behind the bookmark store.
///
/// The store always hands over a full snapshot; implementations reconcile it against whatever
/// they hold. Calls arrive from background tasks, never while the store's map lock is held.
#[async_trait]
pub trait BookmarkRepository: Send + Sync {
    /// Loads every record whose site is in `known_site_names`.
    async fn load_all(
        &self,
        known_site_names: &BTreeSet<String>,
    ) -> Result<Vec<BookmarkRecord>, RepositoryError>;

    async fn save_all(&self, records: Vec<BookmarkRecord>) -> Result<(), RepositoryError>;

    async fn delete_all(&self) -> Result<(), RepositoryError>;
}

#[derive(Debug, Default)]
struct MemoryState {
    records: Vec<BookmarkRecord>,
    save_count: usize,
    delete_all_count: usize,
    fail_load: bool,
    fail_save: bool,
    fail_delete: bool,
    save_delay: Option<Duration>,
}

/// In-process repository. Clones share the same state, so a test can keep a handle while the
/// store owns another.
#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: Vec<BookmarkRecord>) -> Self {
        let repository = Self::default();
        repository.lock().records = records;
        repository
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryState> {
        self.state.lock().expect("memory repository lock poisoned")
    }

    pub fn records(&self) -> Vec<BookmarkRecord> {
        self.lock().records.clone()
    }

    pub fn save_count(&self) -> usize {
        self.lock().save_count
    }

    pub fn delete_all_count(&self) -> usize {
        self.lock().delete_all_count
    }

    pub fn set_fail_load(&self, fail: bool) {
        self.lock().fail_load = fail;
    }

    pub fn set_fail_save(&self, fail: bool) {
        self.lock().fail_save = fail;
    }

    pub fn set_fail_delete(&self, fail: bool) {
        self.lock().fail_delete = fail;
    }

    /// Makes every `save_all` sleep before storing, to widen race windows in tests.
    pub fn set_save_delay(&self, delay: Option<Duration>) {
        self.lock().save_delay = delay;
    }
}

#[async_trait]
impl BookmarkRepository for MemoryRepository {
    async fn load_all(
        &self,
        known_site_names: &BTreeSet<String>,
    ) -> Result<Vec<BookmarkRecord>, RepositoryError> {
        let state = self.lock();
        if state.fail_load {
            return Err(RepositoryError::Backend("load_all failed".to_owned()));
        }

        Ok(state
            .records
            .iter()
            .filter(|record| known_site_names.contains(record.thread_identity().site_name()))
            .cloned()
            .collect())
    }

    async fn save_all(&self, records: Vec<BookmarkRecord>) -> Result<(), RepositoryError> {
        let delay = self.lock().save_delay;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.lock();
        state.save_count += 1;
        if state.fail_save {
            return Err(RepositoryError::Backend("save_all failed".to_owned()));
        }
        state.records = records;
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), RepositoryError> {
        let mut state = self.lock();
        state.delete_all_count += 1;
        if state.fail_delete {
            return Err(RepositoryError::Backend("delete_all failed".to_owned()));
        }
        state.records.clear();
        Ok(())
    }
}
