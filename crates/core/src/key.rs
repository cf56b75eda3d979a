// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Storage key layout for archived events
//!
//! Keys are partitioned by the UTC calendar date of issuance:
//!
//! ```text
//! [prefix/]year=YYYY/month=MM/day=DD/serial-<serial>.json
//! ```
//!
//! The same inputs always give the same key, so a repeated write of an
//! event overwrites the earlier object instead of duplicating it.

use chrono::{DateTime, Datelike, Utc};
use thiserror::Error;

/// Errors from key validation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("serial number is empty")]
    EmptySerial,
    #[error("serial number is not a valid path segment: {0:?}")]
    UnsafeSerial(String),
}

/// Generate the storage key for an event.
///
/// Trailing `/` on the prefix is ignored; an empty prefix means none.
pub fn generate_key(timestamp: DateTime<Utc>, serial: &str, prefix: Option<&str>) -> String {
    let key = format!(
        "year={:04}/month={:02}/day={:02}/serial-{}.json",
        timestamp.year(),
        timestamp.month(),
        timestamp.day(),
        serial
    );

    match prefix.map(|p| p.trim_end_matches('/')) {
        Some(p) if !p.is_empty() => format!("{}/{}", p, key),
        _ => key,
    }
}

/// Check that a serial can be used as a single path segment
pub fn validate_serial(serial: &str) -> Result<(), KeyError> {
    if serial.is_empty() {
        return Err(KeyError::EmptySerial);
    }
    let unsafe_char = |c: char| c == '/' || c == '\\' || c.is_control();
    if serial == "." || serial == ".." || serial.chars().any(unsafe_char) {
        return Err(KeyError::UnsafeSerial(serial.to_string()));
    }
    Ok(())
}

#[cfg(test)]
#[path = "key_tests.rs"]
mod tests;
