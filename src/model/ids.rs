// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threadmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Threadmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// Name of a site (e.g. `4chan`) as registered with the site registry.
///
/// Site names are short and copied around a lot, so they live in a `SmolStr`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SiteDescriptor {
    site_name: SmolStr,
}

impl SiteDescriptor {
    pub fn new(site_name: impl AsRef<str>) -> Result<Self, IdError> {
        let site_name = site_name.as_ref();
        validate_segment(site_name)?;
        Ok(Self { site_name: SmolStr::new(site_name) })
    }

    pub fn site_name(&self) -> &str {
        &self.site_name
    }
}

impl TryFrom<String> for SiteDescriptor {
    type Error = IdError;

    fn try_from(site_name: String) -> Result<Self, Self::Error> {
        Self::new(site_name)
    }
}

impl From<SiteDescriptor> for String {
    fn from(site: SiteDescriptor) -> Self {
        site.site_name.to_string()
    }
}

impl fmt::Display for SiteDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.site_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawBoardDescriptor")]
pub struct BoardDescriptor {
    site: SiteDescriptor,
    board_code: SmolStr,
}

impl BoardDescriptor {
    pub fn new(site: SiteDescriptor, board_code: impl AsRef<str>) -> Result<Self, IdError> {
        let board_code = board_code.as_ref();
        validate_segment(board_code)?;
        Ok(Self { site, board_code: SmolStr::new(board_code) })
    }

    pub fn site(&self) -> &SiteDescriptor {
        &self.site
    }

    pub fn board_code(&self) -> &str {
        &self.board_code
    }
}

#[derive(Deserialize)]
struct RawBoardDescriptor {
    site: SiteDescriptor,
    board_code: String,
}

impl TryFrom<RawBoardDescriptor> for BoardDescriptor {
    type Error = IdError;

    fn try_from(raw: RawBoardDescriptor) -> Result<Self, Self::Error> {
        Self::new(raw.site, raw.board_code)
    }
}

/// Identifies one watchable thread across the whole process: `(site, board, thread number)`.
///
/// Ordering is the natural tuple order (site name, then board code, then thread number).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ThreadIdentity {
    board: BoardDescriptor,
    thread_no: u64,
}

impl ThreadIdentity {
    pub fn new(board: BoardDescriptor, thread_no: u64) -> Self {
        Self { board, thread_no }
    }

    /// Convenience constructor from raw segments.
    pub fn create(site_name: &str, board_code: &str, thread_no: u64) -> Result<Self, IdError> {
        let site = SiteDescriptor::new(site_name)?;
        let board = BoardDescriptor::new(site, board_code)?;
        Ok(Self::new(board, thread_no))
    }

    pub fn board(&self) -> &BoardDescriptor {
        &self.board
    }

    pub fn site(&self) -> &SiteDescriptor {
        self.board.site()
    }

    pub fn site_name(&self) -> &str {
        self.board.site().site_name()
    }

    pub fn board_code(&self) -> &str {
        self.board.board_code()
    }

    pub fn thread_no(&self) -> u64 {
        self.thread_no
    }
}

impl fmt::Display for ThreadIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.site_name(), self.board_code(), self.thread_no)
    }
}

impl FromStr for ThreadIdentity {
    type Err = IdError;

    /// Parses the `site/board/thread_no` form produced by `Display`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('/');
        let (Some(site), Some(board), Some(no), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(IdError::Malformed { value: s.to_owned() });
        };

        let thread_no = no
            .parse::<u64>()
            .map_err(|_| IdError::InvalidThreadNo { value: no.to_owned() })?;
        Self::create(site, board, thread_no)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    #[error("id segment must not be empty")]
    Empty,
    #[error("id segment must not contain '/'")]
    ContainsSlash,
    #[error("expected `site/board/thread_no`, got {value:?}")]
    Malformed { value: String },
    #[error("invalid thread number {value:?}")]
    InvalidThreadNo { value: String },
}

fn validate_segment(value: &str) -> Result<(), IdError> {
    if value.is_empty() {
        return Err(IdError::Empty);
    }
    if value.contains('/') {
        return Err(IdError::ContainsSlash);
    }
    Ok(())
}
