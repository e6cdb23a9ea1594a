// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threadmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Threadmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::error::TaskError;

#[derive(Debug)]
struct PendingTask {
    generation: u64,
    handle: JoinHandle<()>,
}

#[derive(Debug)]
struct DebounceState<K> {
    pending: HashMap<K, PendingTask>,
    next_generation: u64,
}

/// Coalesces bursts of tasks per key: only the last task posted for a key runs, `delay` after
/// the last `post`.
///
/// A task can only be superseded while it is still waiting. Once its timer fired it runs to
/// completion.
#[derive(Debug)]
pub struct DebouncedExecutor<K = ()> {
    name: &'static str,
    runtime: Handle,
    state: Arc<Mutex<DebounceState<K>>>,
}

impl<K> DebouncedExecutor<K>
where
    K: Eq + Hash + Clone + Send + 'static,
{
    pub fn new(name: &'static str, runtime: &Handle) -> Self {
        Self {
            name,
            runtime: runtime.clone(),
            state: Arc::new(Mutex::new(DebounceState {
                pending: HashMap::new(),
                next_generation: 0,
            })),
        }
    }

    pub fn post<F>(&self, key: K, delay: Duration, task: F)
    where
        F: Future<Output = Result<(), TaskError>> + Send + 'static,
    {
        let name = self.name;
        let mut state = self.state.lock().expect("debounce lock poisoned");
        let generation = state.next_generation;
        state.next_generation += 1;

        // Spawned while holding the lock, so the timer task always finds its own entry.
        let handle = self.runtime.spawn({
            let shared = self.state.clone();
            let key = key.clone();
            async move {
                tokio::time::sleep(delay).await;

                {
                    let mut state = shared.lock().expect("debounce lock poisoned");
                    match state.pending.get(&key) {
                        Some(pending) if pending.generation == generation => {
                            state.pending.remove(&key);
                        }
                        _ => return,
                    }
                }

                if let Err(error) = task.await {
                    log::error!("{name}: debounced task failed: {error}");
                }
            }
        });

        if let Some(superseded) = state.pending.insert(key, PendingTask { generation, handle }) {
            superseded.handle.abort();
        }
    }

    /// Number of keys with a task still waiting for its timer.
    pub fn pending_count(&self) -> usize {
        self.state.lock().expect("debounce lock poisoned").pending.len()
    }
}
