// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threadmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Threadmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Narrow interfaces to the parts of the application the store only consults.

use std::collections::BTreeSet;
use std::sync::RwLock;

use crate::model::{SiteDescriptor, ThreadIdentity};

/// Tells whether a site only mirrors archived threads.
pub trait ArchiveClassifier: Send + Sync {
    fn is_archive_site(&self, site: &SiteDescriptor) -> bool;
}

/// Identity of the thread currently on screen, if any.
pub trait CurrentThreadSource: Send + Sync {
    fn current_thread(&self) -> Option<ThreadIdentity>;
}

/// Names of every site the application knows how to talk to.
pub trait SiteRegistry: Send + Sync {
    fn known_site_names(&self) -> BTreeSet<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppVisibility {
    Foreground,
    Background,
}

#[derive(Debug, Clone, Default)]
pub struct StaticArchiveClassifier {
    archive_sites: BTreeSet<String>,
}

impl StaticArchiveClassifier {
    pub fn new<I, S>(archive_sites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { archive_sites: archive_sites.into_iter().map(Into::into).collect() }
    }
}

impl ArchiveClassifier for StaticArchiveClassifier {
    fn is_archive_site(&self, site: &SiteDescriptor) -> bool {
        self.archive_sites.contains(site.site_name())
    }
}

#[derive(Debug, Default)]
pub struct SharedCurrentThread {
    current: RwLock<Option<ThreadIdentity>>,
}

impl SharedCurrentThread {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, thread: Option<ThreadIdentity>) {
        *self.current.write().expect("current thread lock poisoned") = thread;
    }
}

impl CurrentThreadSource for SharedCurrentThread {
    fn current_thread(&self) -> Option<ThreadIdentity> {
        self.current.read().expect("current thread lock poisoned").clone()
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaticSiteRegistry {
    site_names: BTreeSet<String>,
}

impl StaticSiteRegistry {
    pub fn new<I, S>(site_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { site_names: site_names.into_iter().map(Into::into).collect() }
    }
}

impl SiteRegistry for StaticSiteRegistry {
    fn known_site_names(&self) -> BTreeSet<String> {
        self.site_names.clone()
    }
}
