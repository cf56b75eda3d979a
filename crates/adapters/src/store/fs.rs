// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Local filesystem object store
//!
//! Buckets map to directories under a root and keys to relative paths inside
//! the bucket. Each object is written to a temporary sibling and renamed into
//! place, so a reader sees either the old object or the new one.

use super::{ObjectStore, StoreError};
use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};

/// Object store backed by a local directory tree
#[derive(Clone, Debug)]
pub struct LocalFsStore {
    root: PathBuf,
}

impl LocalFsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Resolve the on-disk path for an object
    pub fn object_path(&self, bucket: &str, key: &str) -> Result<PathBuf, StoreError> {
        if bucket.is_empty() || !is_plain_relative(Path::new(bucket)) || bucket.contains('/') {
            return Err(StoreError::InvalidBucket(bucket.to_string()));
        }
        if key.is_empty() || key.ends_with('/') || !is_plain_relative(Path::new(key)) {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(bucket).join(key))
    }
}

/// True when every component is a normal name (no root, `.` or `..`)
fn is_plain_relative(path: &Path) -> bool {
    path.components().all(|c| matches!(c, Component::Normal(_)))
}

#[async_trait]
impl ObjectStore for LocalFsStore {
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Vec<u8>,
        _content_type: &str,
    ) -> Result<(), StoreError> {
        let path = self.object_path(bucket, key)?;
        let (Some(parent), Some(file_name)) = (path.parent(), path.file_name()) else {
            return Err(StoreError::InvalidKey(key.to_string()));
        };
        tokio::fs::create_dir_all(parent).await?;

        let temp_path = parent.join(format!(".{}.tmp", file_name.to_string_lossy()));
        tokio::fs::write(&temp_path, &body).await?;

        // Atomic replace (rename is atomic on POSIX)
        if let Err(e) = tokio::fs::rename(&temp_path, &path).await {
            let _ = tokio::fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "fs_tests.rs"]
mod tests;
