// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threadmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Threadmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Threadmark: concurrent thread bookmark store.
//!
//! [`store::BookmarkStore`] keeps per-thread watch state in memory, persists full snapshots through
//! a [`store::BookmarkRepository`] and broadcasts [`model::BookmarkChange`] events only after the
//! matching write finished.

pub mod config;
pub mod error;
pub mod exec;
pub mod model;
pub mod store;

pub use config::StoreConfig;
pub use error::{ConfigError, ReadinessError, RepositoryError};
pub use model::{BookmarkChange, BookmarkRecord, NewBookmark, ThreadIdentity};
pub use store::{BookmarkRepository, BookmarkStore};
