// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threadmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Threadmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;

use super::ThreadIdentity;

bitflags::bitflags! {
    /// Bit set describing the watch state of a bookmark.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct BookmarkFlags: u32 {
        /// The thread is actively watched.
        const WATCHING = 1 << 0;
        const THREAD_DELETED = 1 << 1;
        const THREAD_ARCHIVED = 1 << 2;
        /// Set on creation, cleared by the watcher after the first successful fetch.
        const FIRST_FETCH = 1 << 3;
        const ERROR = 1 << 4;
        const BUMP_LIMIT = 1 << 5;
        const IMAGE_LIMIT = 1 << 6;
        const CLOSED = 1 << 7;
        const STICKY_NO_CAP = 1 << 8;
    }
}

/// Comma-separated kebab-case names of the set bits, e.g. `watching,first-fetch`.
impl fmt::Display for BookmarkFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (name, _)) in self.iter_names().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            f.write_str(&name.to_ascii_lowercase().replace('_', "-"))?;
        }
        Ok(())
    }
}

/// A reply to one of the user's own posts inside a bookmarked thread.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkReply {
    pub post_no: u64,
    pub replies_to: u64,
    pub already_seen: bool,
    pub already_notified: bool,
    pub already_read: bool,
}

impl BookmarkReply {
    pub fn new(post_no: u64, replies_to: u64) -> Self {
        Self { post_no, replies_to, ..Self::default() }
    }

    fn mark_read(&mut self) {
        self.already_seen = true;
        self.already_notified = true;
        self.already_read = true;
    }
}

/// Per-thread watch state. Plain value type: the store hands out copies, never references into
/// its map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkRecord {
    thread_identity: ThreadIdentity,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    thumbnail_url: Option<Url>,
    created_on: DateTime<Utc>,
    #[serde(default)]
    last_viewed_post_number: u64,
    #[serde(default)]
    seen_posts_count: u32,
    #[serde(default)]
    total_posts_count: u32,
    #[serde(default)]
    thread_last_post_number: u64,
    #[serde(default)]
    read_replies_up_to: u64,
    #[serde(default)]
    replies: BTreeMap<u64, BookmarkReply>,
    flags: BookmarkFlags,
}

impl BookmarkRecord {
    /// New bookmarks default to `WATCHING | FIRST_FETCH` unless explicit flags are supplied.
    pub fn create(
        thread_identity: ThreadIdentity,
        created_on: DateTime<Utc>,
        initial_flags: Option<BookmarkFlags>,
    ) -> Self {
        let flags = initial_flags
            .unwrap_or(BookmarkFlags::WATCHING | BookmarkFlags::FIRST_FETCH);

        Self {
            thread_identity,
            title: None,
            thumbnail_url: None,
            created_on,
            last_viewed_post_number: 0,
            seen_posts_count: 0,
            total_posts_count: 0,
            thread_last_post_number: 0,
            read_replies_up_to: 0,
            replies: BTreeMap::new(),
            flags,
        }
    }

    pub fn thread_identity(&self) -> &ThreadIdentity {
        &self.thread_identity
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: Option<String>) {
        self.title = title;
    }

    pub fn thumbnail_url(&self) -> Option<&Url> {
        self.thumbnail_url.as_ref()
    }

    pub fn set_thumbnail_url(&mut self, thumbnail_url: Option<Url>) {
        self.thumbnail_url = thumbnail_url;
    }

    pub fn created_on(&self) -> DateTime<Utc> {
        self.created_on
    }

    pub fn last_viewed_post_number(&self) -> u64 {
        self.last_viewed_post_number
    }

    pub fn seen_posts_count(&self) -> u32 {
        self.seen_posts_count
    }

    pub fn total_posts_count(&self) -> u32 {
        self.total_posts_count
    }

    pub fn thread_last_post_number(&self) -> u64 {
        self.thread_last_post_number
    }

    pub fn read_replies_up_to(&self) -> u64 {
        self.read_replies_up_to
    }

    pub fn replies(&self) -> &BTreeMap<u64, BookmarkReply> {
        &self.replies
    }

    pub fn flags(&self) -> BookmarkFlags {
        self.flags
    }

    pub fn set_flag(&mut self, flag: BookmarkFlags, value: bool) {
        self.flags.set(flag, value);
    }

    pub fn is_active(&self) -> bool {
        self.flags.contains(BookmarkFlags::WATCHING)
    }

    pub fn unseen_posts_count(&self) -> u32 {
        self.total_posts_count.saturating_sub(self.seen_posts_count)
    }

    pub fn has_unread_replies(&self) -> bool {
        self.replies.values().any(|reply| !reply.already_read)
    }

    /// Records the result of a thread fetch. `seen_posts_count` is clamped so it never exceeds
    /// the new total.
    pub fn update_thread_info(&mut self, total_posts_count: u32, thread_last_post_number: u64) {
        self.total_posts_count = total_posts_count;
        self.thread_last_post_number = self.thread_last_post_number.max(thread_last_post_number);
        self.seen_posts_count = self.seen_posts_count.min(total_posts_count);
    }

    pub fn add_reply(&mut self, reply: BookmarkReply) {
        self.replies.entry(reply.post_no).or_insert(reply);
    }

    pub fn read_all_posts_and_notifications(&mut self) {
        self.seen_posts_count = self.total_posts_count;
        for reply in self.replies.values_mut() {
            reply.mark_read();
        }
    }

    pub fn update_seen_posts_count(&mut self, unseen_posts_count: u32) {
        self.seen_posts_count = self.total_posts_count.saturating_sub(unseen_posts_count);
    }

    /// Never moves the read position backwards; use [`Self::reset_read_position`] for that.
    pub fn update_last_viewed_post_number(&mut self, post_no: u64) {
        self.last_viewed_post_number = self.last_viewed_post_number.max(post_no);
    }

    pub fn read_replies_up_to_post(&mut self, post_no: u64) {
        for (_, reply) in self.replies.range_mut(..=post_no) {
            reply.mark_read();
        }
        self.read_replies_up_to = self.read_replies_up_to.max(post_no);
    }

    pub fn reset_read_position(&mut self) {
        self.last_viewed_post_number = 0;
        self.read_replies_up_to = 0;
        self.seen_posts_count = 0;
    }
}

/// Input for bookmark creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBookmark {
    pub thread_identity: ThreadIdentity,
    pub title: Option<String>,
    pub thumbnail_url: Option<Url>,
    pub initial_flags: Option<BookmarkFlags>,
}

impl NewBookmark {
    pub fn new(thread_identity: ThreadIdentity) -> Self {
        Self { thread_identity, title: None, thumbnail_url: None, initial_flags: None }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_thumbnail_url(mut self, thumbnail_url: Url) -> Self {
        self.thumbnail_url = Some(thumbnail_url);
        self
    }

    pub fn with_flags(mut self, flags: BookmarkFlags) -> Self {
        self.initial_flags = Some(flags);
        self
    }

    pub(crate) fn into_record(self, created_on: DateTime<Utc>) -> BookmarkRecord {
        let mut record =
            BookmarkRecord::create(self.thread_identity, created_on, self.initial_flags);
        record.title = self.title;
        record.thumbnail_url = self.thumbnail_url;
        record
    }
}
