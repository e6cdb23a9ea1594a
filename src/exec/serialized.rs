// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threadmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Threadmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::future::Future;

use tokio::runtime::Handle;
use tokio::sync::{mpsc, oneshot};

use super::BoxTask;
use crate::error::TaskError;

/// FIFO task queue drained by a single background worker.
///
/// At most one task runs at any instant. A task that fails or panics is logged and the worker
/// moves on to the next one.
#[derive(Debug)]
pub struct SerializedExecutor {
    name: &'static str,
    task_tx: mpsc::UnboundedSender<BoxTask>,
}

impl SerializedExecutor {
    pub fn new(name: &'static str, runtime: &Handle) -> Self {
        let (task_tx, task_rx) = mpsc::unbounded_channel();
        runtime.spawn(Self::run_worker(name, task_rx));
        Self { name, task_tx }
    }

    pub fn post<F>(&self, task: F)
    where
        F: Future<Output = Result<(), TaskError>> + Send + 'static,
    {
        if self.task_tx.send(Box::pin(task)).is_err() {
            log::warn!("{}: worker has stopped, dropping task", self.name);
        }
    }

    /// Posts `task` and returns a receiver that resolves with its output once it has run.
    ///
    /// The receiver errors if the task panicked or the worker is gone.
    pub fn post_with_result<F, T>(&self, task: F) -> oneshot::Receiver<T>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let (done_tx, done_rx) = oneshot::channel();
        self.post(async move {
            let output = task.await;
            let _ = done_tx.send(output);
            Ok(())
        });
        done_rx
    }

    /// Waits until every task posted before this call has finished.
    pub async fn flush(&self) {
        let _ = self.post_with_result(async {}).await;
    }

    async fn run_worker(name: &'static str, mut task_rx: mpsc::UnboundedReceiver<BoxTask>) {
        while let Some(task) = task_rx.recv().await {
            // Spawned so that a panicking task surfaces as a JoinError instead of killing the
            // worker.
            match tokio::spawn(task).await {
                Ok(Ok(())) => {}
                Ok(Err(error)) => log::error!("{name}: task failed: {error}"),
                Err(join_error) if join_error.is_panic() => {
                    log::error!("{name}: task panicked: {join_error}")
                }
                Err(join_error) => log::warn!("{name}: task cancelled: {join_error}"),
            }
        }

        log::debug!("{name}: worker stopped");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use tokio::runtime::Handle;

    use super::SerializedExecutor;
    use crate::error::TaskError;

    #[tokio::test]
    async fn tasks_run_in_submission_order() {
        let executor = SerializedExecutor::new("test", &Handle::current());
        let seen = Arc::new(Mutex::new(Vec::new()));

        for i in 0..10u64 {
            let seen = seen.clone();
            executor.post(async move {
                // Later tasks sleep less, so any overlap would reorder the output.
                tokio::time::sleep(Duration::from_millis(10 - i)).await;
                seen.lock().unwrap().push(i);
                Ok(())
            });
        }

        executor.flush().await;
        assert_eq!(*seen.lock().unwrap(), (0..10).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn at_most_one_task_in_flight() {
        let executor = SerializedExecutor::new("test", &Handle::current());
        let in_flight = Arc::new(Mutex::new((0usize, 0usize)));

        for _ in 0..8 {
            let in_flight = in_flight.clone();
            executor.post(async move {
                {
                    let mut guard = in_flight.lock().unwrap();
                    guard.0 += 1;
                    guard.1 = guard.1.max(guard.0);
                }
                tokio::time::sleep(Duration::from_millis(2)).await;
                in_flight.lock().unwrap().0 -= 1;
                Ok(())
            });
        }

        executor.flush().await;
        assert_eq!(in_flight.lock().unwrap().1, 1);
    }

    #[tokio::test]
    async fn failing_and_panicking_tasks_do_not_stop_the_queue() {
        let executor = SerializedExecutor::new("test", &Handle::current());

        executor.post(async { Err::<(), TaskError>("boom".into()) });
        executor.post(async {
            if true {
                panic!("task blew up");
            }
            Ok(())
        });
        let result = executor.post_with_result(async { 42 }).await;

        assert_eq!(result.unwrap(), 42);
    }
}
