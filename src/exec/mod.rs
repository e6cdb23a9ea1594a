// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Threadmark-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Threadmark and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Background execution primitives used by the bookmark store.
//!
//! - [`SerializedExecutor`]: one-at-a-time FIFO queue for persistence writes.
//! - [`DebouncedExecutor`]: per-key trailing-edge coalescing.
//! - [`ReadinessGate`]: one-shot success/failure latch for the initial load.

pub mod debounced;
pub mod readiness;
pub mod serialized;

use std::future::Future;
use std::pin::Pin;

use crate::error::TaskError;

pub use debounced::DebouncedExecutor;
pub use readiness::ReadinessGate;
pub use serialized::SerializedExecutor;

pub(crate) type BoxTask = Pin<Box<dyn Future<Output = Result<(), TaskError>> + Send + 'static>>;
