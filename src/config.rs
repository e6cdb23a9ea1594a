// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threadmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Threadmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_DEBOUNCE_DELAY_MS: u64 = 250;
pub const DEFAULT_CHANGE_BUFFER_CAPACITY: usize = 128;
pub const DEFAULT_FETCH_BUFFER_CAPACITY: usize = 16;
pub const DEFAULT_INITIAL_CAPACITY: usize = 256;

/// Tunables of a [`crate::store::BookmarkStore`].
///
/// Every field is optional in the JSON form; missing fields take the defaults below.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Trailing delay used to coalesce "post viewed" writes.
    pub debounce_delay_ms: u64,
    /// Events a slow change subscriber may fall behind before it starts skipping.
    pub change_buffer_capacity: usize,
    pub fetch_buffer_capacity: usize,
    pub initial_capacity: usize,
    pub verbose_logs: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            debounce_delay_ms: DEFAULT_DEBOUNCE_DELAY_MS,
            change_buffer_capacity: DEFAULT_CHANGE_BUFFER_CAPACITY,
            fetch_buffer_capacity: DEFAULT_FETCH_BUFFER_CAPACITY,
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            verbose_logs: false,
        }
    }
}

impl StoreConfig {
    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_delay_ms)
    }

    pub fn from_json_str(raw: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)
            .map_err(|source| ConfigError::Json { path: path.to_path_buf(), source })?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .map_err(|source| ConfigError::Io { path: path.to_path_buf(), source })?;
        Self::from_json_str(&raw, path)
    }

    /// Broadcast channels panic on a zero capacity, so reject it up front.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.change_buffer_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "change_buffer_capacity",
                reason: "must be greater than zero",
            });
        }
        if self.fetch_buffer_capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "fetch_buffer_capacity",
                reason: "must be greater than zero",
            });
        }
        Ok(())
    }
}
