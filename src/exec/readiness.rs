// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threadmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Threadmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::Arc;

use tokio::sync::watch;

use crate::error::{ReadinessError, RepositoryError};

#[derive(Debug, Clone)]
enum GateState {
    Pending,
    Ready,
    Failed(Arc<RepositoryError>),
}

/// One-shot latch signalled exactly once with success or failure.
///
/// Waiters that arrive after the signal return immediately with the stored outcome.
#[derive(Debug)]
pub struct ReadinessGate {
    name: &'static str,
    state_tx: watch::Sender<GateState>,
}

impl ReadinessGate {
    pub fn new(name: &'static str) -> Self {
        let (state_tx, _rx) = watch::channel(GateState::Pending);
        Self { name, state_tx }
    }

    /// Panics when the gate was already signalled.
    pub fn signal_success(&self) {
        self.signal(GateState::Ready);
        log::debug!("{}: readiness gate opened", self.name);
    }

    /// Panics when the gate was already signalled.
    pub fn signal_failure(&self, error: RepositoryError) {
        log::debug!("{}: readiness gate failed: {error}", self.name);
        self.signal(GateState::Failed(Arc::new(error)));
    }

    fn signal(&self, next: GateState) {
        let mut next = Some(next);
        let signalled = self.state_tx.send_if_modified(|state| {
            if !matches!(state, GateState::Pending) {
                return false;
            }
            match next.take() {
                Some(next) => {
                    *state = next;
                    true
                }
                None => false,
            }
        });

        assert!(signalled, "{}: readiness gate signalled more than once", self.name);
    }

    /// True only after a successful signal.
    pub fn is_ready(&self) -> bool {
        matches!(*self.state_tx.borrow(), GateState::Ready)
    }

    pub fn is_signalled(&self) -> bool {
        !matches!(*self.state_tx.borrow(), GateState::Pending)
    }

    pub async fn await_ready(&self) -> Result<(), ReadinessError> {
        let mut state_rx = self.state_tx.subscribe();
        let state = state_rx
            .wait_for(|state| !matches!(state, GateState::Pending))
            .await
            .map_err(|_| ReadinessError::Abandoned)?
            .clone();

        match state {
            GateState::Ready => Ok(()),
            GateState::Failed(error) => Err(ReadinessError::Failed(error)),
            GateState::Pending => Err(ReadinessError::Abandoned),
        }
    }
}
