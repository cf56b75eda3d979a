// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Archive configuration from environment variables

use crate::archiver::DEFAULT_CAPACITY;
use crate::writer::DEFAULT_PUT_TIMEOUT;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const ENV_BUCKET: &str = "CERT_ARCHIVE_BUCKET";
pub const ENV_PREFIX: &str = "CERT_ARCHIVE_PREFIX";
pub const ENV_BUFFER: &str = "CERT_ARCHIVE_BUFFER";
pub const ENV_PUT_TIMEOUT_MS: &str = "CERT_ARCHIVE_PUT_TIMEOUT_MS";
pub const ENV_SHUTDOWN_TIMEOUT_MS: &str = "CERT_ARCHIVE_SHUTDOWN_TIMEOUT_MS";
pub const ENV_BACKEND: &str = "CERT_ARCHIVE_BACKEND";
pub const ENV_FS_ROOT: &str = "CERT_ARCHIVE_FS_ROOT";

pub const DEFAULT_PREFIX: &str = "certs";
pub const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {value:?}")]
    Invalid { var: &'static str, value: String },
    #[error("unknown archive backend: {0}")]
    UnknownBackend(String),
    #[error("could not determine state directory for the fs backend")]
    NoStateDir,
}

/// Where archived objects are written
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    /// Directory tree under a local root
    Fs { root: PathBuf },
    /// Amazon S3 (requires the `s3` feature)
    S3,
}

/// Archive settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveConfig {
    /// Archival is disabled when no bucket is configured
    pub bucket: Option<String>,
    pub prefix: String,
    pub capacity: usize,
    pub put_timeout: Duration,
    pub shutdown_timeout: Duration,
    pub backend: Backend,
}

impl ArchiveConfig {
    /// Load from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load using `lookup` to resolve variable names
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bucket = lookup(ENV_BUCKET).filter(|b| !b.trim().is_empty());
        let prefix = lookup(ENV_PREFIX).unwrap_or_else(|| DEFAULT_PREFIX.to_string());
        let capacity = parse_number(&lookup, ENV_BUFFER)?.unwrap_or(DEFAULT_CAPACITY as u64);
        let put_timeout = parse_number(&lookup, ENV_PUT_TIMEOUT_MS)?
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_PUT_TIMEOUT);
        let shutdown_timeout = parse_number(&lookup, ENV_SHUTDOWN_TIMEOUT_MS)?
            .map(Duration::from_millis)
            .unwrap_or(DEFAULT_SHUTDOWN_TIMEOUT);

        let backend = match lookup(ENV_BACKEND).as_deref().map(str::trim) {
            None | Some("") | Some("fs") => Backend::Fs {
                root: match lookup(ENV_FS_ROOT).filter(|r| !r.is_empty()) {
                    Some(root) => PathBuf::from(root),
                    None => default_fs_root(&lookup)?,
                },
            },
            Some("s3") => Backend::S3,
            Some(other) => return Err(ConfigError::UnknownBackend(other.to_string())),
        };

        Ok(Self {
            bucket,
            prefix,
            capacity: usize::try_from(capacity).map_err(|_| ConfigError::Invalid {
                var: ENV_BUFFER,
                value: capacity.to_string(),
            })?,
            put_timeout,
            shutdown_timeout,
            backend,
        })
    }

    pub fn enabled(&self) -> bool {
        self.bucket.is_some()
    }
}

fn parse_number<F>(lookup: &F, var: &'static str) -> Result<Option<u64>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(var) {
        None => Ok(None),
        Some(value) => value
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(|_| ConfigError::Invalid { var, value }),
    }
}

/// `$XDG_STATE_HOME/certsink`, falling back to `~/.local/state/certsink`
fn default_fs_root<F>(lookup: &F) -> Result<PathBuf, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(xdg) = lookup("XDG_STATE_HOME").filter(|x| !x.is_empty()) {
        return Ok(PathBuf::from(xdg).join("certsink"));
    }
    let home = lookup("HOME").ok_or(ConfigError::NoStateDir)?;
    Ok(PathBuf::from(home).join(".local/state/certsink"))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
