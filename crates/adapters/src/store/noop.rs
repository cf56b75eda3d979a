// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op object store for when archival output should be discarded.

use super::{ObjectStore, StoreError};
use async_trait::async_trait;

/// Object store that accepts every put and keeps nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpObjectStore;

impl NoOpObjectStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ObjectStore for NoOpObjectStore {
    async fn put_object(
        &self,
        _bucket: &str,
        _key: &str,
        _body: Vec<u8>,
        _content_type: &str,
    ) -> Result<(), StoreError> {
        Ok(())
    }
}
