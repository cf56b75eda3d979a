// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Line-oriented event ingest
//!
//! Each non-blank input line is one JSON-encoded [`CertEvent`].

use std::sync::Arc;

use certsink_archiver::CertLogger;
use certsink_core::CertEvent;
use tracing::{debug, warn};

/// Counters for lines seen by the daemon
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    /// Events the logger accepted
    pub accepted: u64,
    /// Events the logger refused (buffer full or archiver closed)
    pub dropped: u64,
    /// Lines that did not parse as an event
    pub malformed: u64,
}

/// Parse `line` and pass it to `logger`.
///
/// Blank lines are skipped. Logger errors are advisory: they are logged and
/// counted, never propagated.
pub fn handle_line(logger: &dyn CertLogger, line: &str, stats: &mut IngestStats) {
    let line = line.trim();
    if line.is_empty() {
        return;
    }

    let event: CertEvent = match serde_json::from_str(line) {
        Ok(event) => event,
        Err(e) => {
            stats.malformed += 1;
            warn!(error = %e, "ignoring malformed event line");
            return;
        }
    };

    let serial = event.serial_number.clone();
    match logger.log_cert(Arc::new(event)) {
        Ok(()) => {
            stats.accepted += 1;
            debug!(serial = %serial, "event accepted");
        }
        Err(e) if e.is_advisory() => {
            stats.dropped += 1;
            debug!(error = %e, "event not archived");
        }
        Err(e) => {
            stats.dropped += 1;
            warn!(serial = %serial, error = %e, "cert logger failed");
        }
    }
}

#[cfg(test)]
#[path = "ingest_tests.rs"]
mod tests;
