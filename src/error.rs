// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threadmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Threadmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Recoverable error types.
//!
//! Programming errors (calling the store before it is ready, empty identity lists, signalling the
//! readiness gate twice) are not represented here: they panic at the call site.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Failure reported by a [`crate::store::BookmarkRepository`].
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("io error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("json error at {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("refusing to write through symlink at {path:?}")]
    SymlinkRefused { path: PathBuf },
    #[error("repository backend error: {0}")]
    Backend(String),
}

/// Outcome of waiting on the readiness gate when the initial load did not succeed.
#[derive(Debug, Clone, Error)]
pub enum ReadinessError {
    #[error("initial bookmark load failed: {0}")]
    Failed(Arc<RepositoryError>),
    #[error("readiness gate dropped before being signalled")]
    Abandoned,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config at {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

/// Error type of tasks posted to the executors.
pub type TaskError = Box<dyn std::error::Error + Send + Sync + 'static>;
