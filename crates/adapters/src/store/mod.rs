// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Object storage adapters

mod fs;
mod noop;
#[cfg(feature = "s3")]
mod s3;

pub use fs::LocalFsStore;
pub use noop::NoOpObjectStore;
#[cfg(feature = "s3")]
pub use s3::S3Store;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeObjectStore, PutCall, StoredObject};

use async_trait::async_trait;
use thiserror::Error;

/// Errors from object store operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("invalid bucket: {0}")]
    InvalidBucket(String),
    #[error("invalid key: {0}")]
    InvalidKey(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("backend error: {0}")]
    Backend(String),
}

/// Adapter for object storage writes
///
/// Only the single put primitive the archiver needs. Implementations must be
/// safe to call from any task; a put to an existing key replaces the object.
#[async_trait]
pub trait ObjectStore: Clone + Send + Sync + 'static {
    /// Create or overwrite one object
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StoreError>;
}
