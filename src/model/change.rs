// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threadmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Threadmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;

use super::ThreadIdentity;

/// Which bookmarks an `Updated` event refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangedThreads {
    /// Subscribers should re-evaluate every bookmark.
    All,
    Some(BTreeSet<ThreadIdentity>),
}

/// Change event broadcast after the corresponding mutation has been persisted.
///
/// `Created`/`Deleted` always carry at least one identity; use the constructors, which panic on
/// an empty set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookmarkChange {
    Initialized,
    Created(BTreeSet<ThreadIdentity>),
    Deleted(BTreeSet<ThreadIdentity>),
    Updated(ChangedThreads),
}

impl BookmarkChange {
    pub fn created(ids: impl IntoIterator<Item = ThreadIdentity>) -> Self {
        let ids = ids.into_iter().collect::<BTreeSet<_>>();
        assert!(!ids.is_empty(), "BookmarkChange::Created requires at least one thread identity");
        Self::Created(ids)
    }

    pub fn deleted(ids: impl IntoIterator<Item = ThreadIdentity>) -> Self {
        let ids = ids.into_iter().collect::<BTreeSet<_>>();
        assert!(!ids.is_empty(), "BookmarkChange::Deleted requires at least one thread identity");
        Self::Deleted(ids)
    }

    pub fn updated(ids: impl IntoIterator<Item = ThreadIdentity>) -> Self {
        let ids = ids.into_iter().collect::<BTreeSet<_>>();
        assert!(!ids.is_empty(), "BookmarkChange::Updated requires at least one thread identity");
        Self::Updated(ChangedThreads::Some(ids))
    }

    pub fn updated_all() -> Self {
        Self::Updated(ChangedThreads::All)
    }

    /// Identities carried by this event; `None` for `Initialized` and `Updated(All)`.
    pub fn thread_identities(&self) -> Option<&BTreeSet<ThreadIdentity>> {
        match self {
            Self::Initialized | Self::Updated(ChangedThreads::All) => None,
            Self::Created(ids) | Self::Deleted(ids) | Self::Updated(ChangedThreads::Some(ids)) => {
                Some(ids)
            }
        }
    }

    /// Whether a subscriber tracking `id` should refresh it.
    pub fn affects(&self, id: &ThreadIdentity) -> bool {
        match self {
            Self::Initialized | Self::Updated(ChangedThreads::All) => true,
            _ => self.thread_identities().is_some_and(|ids| ids.contains(id)),
        }
    }
}
