// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Best-effort archival of certificate issuance events

mod archiver;
mod cert_logger;
pub mod config;
mod error;
mod writer;

#[cfg(test)]
mod testutil;

pub use archiver::{Archiver, ArchiverState, ShutdownStatus, DEFAULT_CAPACITY};
pub use cert_logger::{ArchivingCertLogger, CertLogger, TracingCertLogger};
pub use config::{ArchiveConfig, Backend, ConfigError};
pub use error::ArchiveError;
pub use writer::{EventWriter, WriteError, CONTENT_TYPE, DEFAULT_PUT_TIMEOUT};
