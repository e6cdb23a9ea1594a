// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threadmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Threadmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::BookmarkRepository;
use crate::error::RepositoryError;
use crate::model::BookmarkRecord;

const BOOKMARKS_FILE_VERSION: u32 = 1;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum WriteDurability {
    /// Writes a temp file and renames it into place, without fsync.
    #[default]
    BestEffort,

    /// Also flushes the file contents and the rename to stable storage where the platform
    /// allows it.
    Durable,
}

#[derive(Debug, Serialize, Deserialize)]
struct BookmarksFile {
    version: u32,
    bookmarks: Vec<BookmarkRecord>,
}

/// Keeps every bookmark in a single JSON document.
///
/// Writes go through a temp file plus rename, so readers never observe a half-written file.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
    durability: WriteDurability,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), durability: WriteDurability::default() }
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    fn read_file(path: &Path) -> Result<Vec<BookmarkRecord>, RepositoryError> {
        let raw = match fs::read(path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => return Err(RepositoryError::Io { path: path.to_path_buf(), source }),
        };

        let file: BookmarksFile = serde_json::from_slice(&raw)
            .map_err(|source| RepositoryError::Json { path: path.to_path_buf(), source })?;

        if file.version != BOOKMARKS_FILE_VERSION {
            return Err(RepositoryError::Backend(format!(
                "unsupported bookmarks file version {} in {path:?}",
                file.version
            )));
        }

        Ok(file.bookmarks)
    }

    async fn run_blocking<T, F>(f: F) -> Result<T, RepositoryError>
    where
        F: FnOnce() -> Result<T, RepositoryError> + Send + 'static,
        T: Send + 'static,
    {
        tokio::task::spawn_blocking(f)
            .await
            .map_err(|join_error| RepositoryError::Backend(join_error.to_string()))?
    }
}

#[async_trait]
impl BookmarkRepository for JsonFileRepository {
    async fn load_all(
        &self,
        known_site_names: &BTreeSet<String>,
    ) -> Result<Vec<BookmarkRecord>, RepositoryError> {
        let path = self.path.clone();
        let records = Self::run_blocking(move || Self::read_file(&path)).await?;
        let total = records.len();

        let records = records
            .into_iter()
            .filter(|record| known_site_names.contains(record.thread_identity().site_name()))
            .collect::<Vec<_>>();

        if records.len() != total {
            log::warn!(
                "skipped {} bookmarks of unknown sites in {:?}",
                total - records.len(),
                self.path
            );
        }

        Ok(records)
    }

    async fn save_all(&self, records: Vec<BookmarkRecord>) -> Result<(), RepositoryError> {
        let path = self.path.clone();
        let durability = self.durability;

        Self::run_blocking(move || {
            let file = BookmarksFile { version: BOOKMARKS_FILE_VERSION, bookmarks: records };
            let mut contents = serde_json::to_vec_pretty(&file)
                .map_err(|source| RepositoryError::Json { path: path.clone(), source })?;
            contents.push(b'\n');
            write_atomic(&path, &contents, durability)
        })
        .await
    }

    async fn delete_all(&self) -> Result<(), RepositoryError> {
        let path = self.path.clone();

        Self::run_blocking(move || match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(RepositoryError::Io { path, source }),
        })
        .await
    }
}

fn rename_overwrite(from: &Path, to: &Path) -> io::Result<()> {
    #[cfg(windows)]
    {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(err)
                if matches!(
                    err.kind(),
                    io::ErrorKind::AlreadyExists | io::ErrorKind::PermissionDenied
                ) =>
            {
                let _ = fs::remove_file(to);
                fs::rename(from, to)
            }
            Err(err) => Err(err),
        }
    }

    #[cfg(not(windows))]
    {
        fs::rename(from, to)
    }
}

fn write_atomic(
    path: &Path,
    contents: &[u8],
    durability: WriteDurability,
) -> Result<(), RepositoryError> {
    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |source: io::Error| RepositoryError::Io { path, source }
    };

    match fs::symlink_metadata(path) {
        Ok(md) if md.file_type().is_symlink() => {
            return Err(RepositoryError::SymlinkRefused { path: path.to_path_buf() });
        }
        Ok(_) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(source) => return Err(RepositoryError::Io { path: path.to_path_buf(), source }),
    }

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(io_err(parent))?;

    let Some(file_name) = path.file_name() else {
        return Err(RepositoryError::Io {
            path: path.to_path_buf(),
            source: io::Error::other("path has no file name"),
        });
    };

    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_nanos();
    let tmp_path =
        parent.join(format!(".threadmark.tmp.{}.{}", file_name.to_string_lossy(), nanos));

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(&tmp_path)
        .map_err(io_err(&tmp_path))?;

    file.write_all(contents).map_err(io_err(&tmp_path))?;

    if durability == WriteDurability::Durable {
        file.sync_all().map_err(io_err(&tmp_path))?;
    }
    drop(file);

    if let Err(source) = rename_overwrite(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(RepositoryError::Io { path: path.to_path_buf(), source });
    }

    if durability == WriteDurability::Durable {
        #[cfg(unix)]
        {
            let dir = fs::File::open(parent).map_err(io_err(parent))?;
            dir.sync_all().map_err(io_err(parent))?;
        }
    }

    Ok(())
}
