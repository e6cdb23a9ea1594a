// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threadmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Threadmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Bookmark value types and change events.
//!
//! Everything here is plain data: the store copies records in and out of its map, so these types
//! are `Clone` and compare structurally.

pub mod bookmark;
pub mod change;
pub mod ids;

pub use bookmark::{BookmarkFlags, BookmarkRecord, BookmarkReply, NewBookmark};
pub use change::{BookmarkChange, ChangedThreads};
pub use ids::{BoardDescriptor, IdError, SiteDescriptor, ThreadIdentity};
