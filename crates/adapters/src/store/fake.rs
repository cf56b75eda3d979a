// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake object store for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{ObjectStore, StoreError};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;

/// Recorded put call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutCall {
    pub bucket: String,
    pub key: String,
    pub body: Vec<u8>,
    pub content_type: String,
}

/// Object held by the fake store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    pub body: Vec<u8>,
    pub content_type: String,
}

#[derive(Default)]
struct FakeState {
    calls: Vec<PutCall>,
    objects: HashMap<(String, String), StoredObject>,
    /// Keys in the order their puts completed
    completed: Vec<String>,
    fail_matching: Vec<String>,
    delay: Option<Duration>,
}

/// Fake object store for testing
///
/// Puts can be delayed, held behind a pause gate, or failed for keys
/// containing a given substring.
#[derive(Clone)]
pub struct FakeObjectStore {
    state: Arc<Mutex<FakeState>>,
    gate: Arc<watch::Sender<bool>>,
}

impl Default for FakeObjectStore {
    fn default() -> Self {
        let (gate, _) = watch::channel(false);
        Self {
            state: Arc::default(),
            gate: Arc::new(gate),
        }
    }
}

impl FakeObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep this long inside every put
    pub fn set_delay(&self, delay: Duration) {
        self.lock().delay = Some(delay);
    }

    /// Fail every put whose key contains `pattern`
    pub fn fail_keys_containing(&self, pattern: impl Into<String>) {
        self.lock().fail_matching.push(pattern.into());
    }

    /// Hold puts until [`FakeObjectStore::resume`] is called
    pub fn pause(&self) {
        self.gate.send_replace(true);
    }

    pub fn resume(&self) {
        self.gate.send_replace(false);
    }

    /// Get all recorded put calls, including ones still in flight
    pub fn calls(&self) -> Vec<PutCall> {
        self.lock().calls.clone()
    }

    /// Keys of successful puts in completion order
    pub fn completed_keys(&self) -> Vec<String> {
        self.lock().completed.clone()
    }

    /// Get a stored object
    pub fn get(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.lock()
            .objects
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    /// Number of distinct objects stored
    pub fn object_count(&self) -> usize {
        self.lock().objects.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl ObjectStore for FakeObjectStore {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StoreError> {
        let delay = {
            let mut state = self.lock();
            state.calls.push(PutCall {
                bucket: bucket.to_string(),
                key: key.to_string(),
                body: body.clone(),
                content_type: content_type.to_string(),
            });
            state.delay
        };

        let mut gate = self.gate.subscribe();
        let _ = gate.wait_for(|paused| !*paused).await;

        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        let mut state = self.lock();
        if state.fail_matching.iter().any(|p| key.contains(p.as_str())) {
            return Err(StoreError::Backend(format!("injected failure for {}", key)));
        }

        state.objects.insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                body,
                content_type: content_type.to_string(),
            },
        );
        state.completed.push(key.to_string());
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
