// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-event writes to object storage

use certsink_adapters::{ObjectStore, StoreError};
use certsink_core::{generate_key, validate_serial, CertEvent, KeyError};
use std::time::Duration;
use thiserror::Error;

/// Deadline for one put call, independent of the shutdown timeout
pub const DEFAULT_PUT_TIMEOUT: Duration = Duration::from_secs(10);

pub const CONTENT_TYPE: &str = "application/json";

/// Errors from writing one event
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("invalid serial: {0}")]
    InvalidSerial(#[from] KeyError),
    #[error("failed to serialize event: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write object: {0}")]
    Store(#[from] StoreError),
    #[error("write timed out after {0:?}")]
    Timeout(Duration),
}

/// Writes events to a bucket under the date-partitioned key layout
#[derive(Clone)]
pub struct EventWriter<S> {
    store: S,
    bucket: String,
    prefix: Option<String>,
    put_timeout: Duration,
}

impl<S: ObjectStore> EventWriter<S> {
    pub fn new(store: S, bucket: impl Into<String>, prefix: Option<String>) -> Self {
        Self {
            store,
            bucket: bucket.into(),
            prefix: prefix.filter(|p| !p.is_empty()),
            put_timeout: DEFAULT_PUT_TIMEOUT,
        }
    }

    pub fn with_put_timeout(mut self, timeout: Duration) -> Self {
        self.put_timeout = timeout;
        self
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Key this writer would use for `event`
    pub fn key_for(&self, event: &CertEvent) -> String {
        generate_key(
            event.timestamp,
            &event.serial_number,
            self.prefix.as_deref(),
        )
    }

    /// Write one event, returning the key it was stored under.
    ///
    /// Makes exactly one put attempt. Writing the same event again targets
    /// the same key with the same bytes.
    pub async fn write_event(&self, event: &CertEvent) -> Result<String, WriteError> {
        validate_serial(&event.serial_number)?;
        let key = self.key_for(event);
        let body = event.to_json_line()?;

        tokio::time::timeout(
            self.put_timeout,
            self.store.put_object(&self.bucket, &key, body, CONTENT_TYPE),
        )
        .await
        .map_err(|_| WriteError::Timeout(self.put_timeout))??;

        tracing::debug!(
            bucket = %self.bucket,
            key = %key,
            serial = %event.serial_number,
            "archived cert"
        );

        Ok(key)
    }
}

#[cfg(test)]
#[path = "writer_tests.rs"]
mod tests;
