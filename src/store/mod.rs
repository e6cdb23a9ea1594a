// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threadmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Threadmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The bookmark store and the interfaces it consumes.
//!
//! [`BookmarkStore`] owns the in-memory map; [`BookmarkRepository`] implementations own durable
//! storage. Collaborators answer the few questions the store cannot answer itself (archive sites,
//! the thread on screen, known sites).

pub mod collaborators;
pub mod json_file;
pub mod manager;
pub mod repository;

#[cfg(test)]
pub(crate) mod test_support;

pub use collaborators::{
    AppVisibility, ArchiveClassifier, CurrentThreadSource, SharedCurrentThread,
    SiteRegistry, StaticArchiveClassifier, StaticSiteRegistry,
};
pub use json_file::{JsonFileRepository, WriteDurability};
pub use manager::{BookmarkStore, BookmarkStoreBuilder, PersistMode};
pub use repository::{BookmarkRepository, MemoryRepository};
