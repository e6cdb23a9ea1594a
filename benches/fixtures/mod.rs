// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threadmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Threadmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

#![allow(dead_code)]

// Shared deterministic benchmark fixtures (no RNG).

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{TimeZone, Utc};
use threadmark::model::{BookmarkFlags, BookmarkRecord, BookmarkReply, ThreadIdentity};

pub const SITES: [&str; 3] = ["4chan", "lainchan", "archive"];
pub const ARCHIVE_SITE: &str = "archive";
const BOARDS: [&str; 4] = ["g", "a", "tv", "diy"];

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

pub struct TempDir {
    path: PathBuf,
}

impl TempDir {
    pub fn new(prefix: &str) -> Self {
        let pid = std::process::id();
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
        let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);

        let mut path = std::env::temp_dir();
        path.push(format!("threadmark_bench_{prefix}_{pid}_{nanos}_{counter}"));
        std::fs::create_dir_all(&path).expect("create temp dir");

        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Case {
    Small,
    Medium,
    Large,
}

impl Case {
    pub fn id(self) -> &'static str {
        match self {
            Case::Small => "small",
            Case::Medium => "medium",
            Case::Large => "large",
        }
    }

    pub fn bookmark_count(self) -> u64 {
        match self {
            Case::Small => 50,
            Case::Medium => 500,
            Case::Large => 5_000,
        }
    }
}

pub fn thread(index: u64) -> ThreadIdentity {
    let site = SITES[(index % SITES.len() as u64) as usize];
    let board = BOARDS[(index % BOARDS.len() as u64) as usize];
    ThreadIdentity::create(site, board, 10_000 + index).expect("thread identity")
}

/// Every 7th bookmark is unwatched; replies and post counts vary with the index.
pub fn records(case: Case) -> Vec<BookmarkRecord> {
    let created_on = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();

    (0..case.bookmark_count())
        .map(|index| {
            let flags = if index % 7 == 0 { BookmarkFlags::empty() } else { BookmarkFlags::WATCHING };
            let mut record = BookmarkRecord::create(thread(index), created_on, Some(flags));
            record.set_title(Some(format!("bench thread {index}")));

            let total = (index % 300) as u32 + 1;
            record.update_thread_info(total, 20_000 + index);
            record.update_seen_posts_count(total / 2);
            for reply in 0..index % 5 {
                record.add_reply(BookmarkReply::new(20_000 + index - reply, 10_000 + index));
            }
            record
        })
        .collect()
}
