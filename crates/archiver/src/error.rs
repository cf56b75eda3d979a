// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the archiver

use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by the archiver to its callers
///
/// Per-event write failures never appear here; the worker logs and discards
/// them.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("archiver buffer full, dropped event {serial}")]
    BufferFull { serial: String },
    #[error("archiver is shut down, rejected event {serial}")]
    Closed { serial: String },
    #[error("shutdown timeout after {0:?}")]
    ShutdownTimeout(Duration),
    #[error("archive worker failed: {0}")]
    WorkerFailed(String),
}

impl ArchiveError {
    /// True for enqueue outcomes the issuance path may safely ignore
    pub fn is_advisory(&self) -> bool {
        matches!(self, Self::BufferFull { .. } | Self::Closed { .. })
    }
}
