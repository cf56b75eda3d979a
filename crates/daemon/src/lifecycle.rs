// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Daemon lifecycle management: startup and shutdown.

use std::sync::Arc;
use std::time::Instant;

use certsink_adapters::{LocalFsStore, ObjectStore, TracedObjectStore};
use certsink_archiver::{
    ArchiveConfig, Archiver, ArchivingCertLogger, Backend, CertLogger, ConfigError, EventWriter,
    ShutdownStatus, TracingCertLogger,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::ingest::IngestStats;

/// Lifecycle errors
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Archive backend '{0}' is not available in this build")]
    BackendUnavailable(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Daemon state during operation
pub struct DaemonState {
    /// Configuration
    pub config: ArchiveConfig,
    /// Cert logger handed each ingested event
    pub logger: Box<dyn CertLogger>,
    /// Archiver owned for shutdown; `None` when archival is disabled
    archiver: Option<Arc<Archiver>>,
    /// Ingest counters
    pub stats: IngestStats,
    /// When daemon started
    pub start_time: Instant,
}

impl DaemonState {
    /// Feed one input line through the cert logger
    pub fn handle_line(&mut self, line: &str) {
        crate::ingest::handle_line(self.logger.as_ref(), line, &mut self.stats);
    }

    pub fn archival_enabled(&self) -> bool {
        self.archiver.is_some()
    }

    /// Shutdown the daemon gracefully
    ///
    /// Drains the archiver within the configured timeout. A timeout is logged
    /// and reported but never fails the process.
    pub async fn shutdown(&self) -> Option<ShutdownStatus> {
        info!("Shutting down daemon...");

        let status = match &self.archiver {
            None => None,
            Some(archiver) => match archiver.shutdown(self.config.shutdown_timeout).await {
                Ok(status) => {
                    debug!(?status, "archiver stopped");
                    Some(status)
                }
                Err(e) => {
                    warn!(error = %e, "archiver did not drain cleanly");
                    None
                }
            },
        };

        info!(
            accepted = self.stats.accepted,
            dropped = self.stats.dropped,
            malformed = self.stats.malformed,
            uptime_ms = u64::try_from(self.start_time.elapsed().as_millis()).unwrap_or(u64::MAX),
            "Daemon shutdown complete"
        );
        status
    }
}

/// Start the daemon
pub async fn startup(config: &ArchiveConfig) -> Result<DaemonState, LifecycleError> {
    let (logger, archiver): (Box<dyn CertLogger>, Option<Arc<Archiver>>) = match &config.bucket {
        None => {
            info!("certificate archival disabled (no bucket configured)");
            let logger: Box<dyn CertLogger> = Box::new(TracingCertLogger::new());
            (logger, None)
        }
        Some(bucket) => {
            let archiver = Arc::new(start_archiver(config, bucket).await?);
            info!(
                bucket = %bucket,
                prefix = %config.prefix,
                capacity = archiver.capacity(),
                "certificate archival enabled"
            );
            let logger: Box<dyn CertLogger> =
                Box::new(ArchivingCertLogger::new(Arc::clone(&archiver)));
            (logger, Some(archiver))
        }
    };

    Ok(DaemonState {
        config: config.clone(),
        logger,
        archiver,
        stats: IngestStats::default(),
        start_time: Instant::now(),
    })
}

/// Set up the configured backend (wrapped with tracing) and start the archiver
async fn start_archiver(config: &ArchiveConfig, bucket: &str) -> Result<Archiver, LifecycleError> {
    match &config.backend {
        Backend::Fs { root } => {
            tokio::fs::create_dir_all(root).await?;
            let store = TracedObjectStore::new(LocalFsStore::new(root.clone()));
            Ok(spawn_archiver(store, config, bucket))
        }
        #[cfg(feature = "s3")]
        Backend::S3 => {
            let store = TracedObjectStore::new(certsink_adapters::S3Store::from_env().await);
            Ok(spawn_archiver(store, config, bucket))
        }
        #[cfg(not(feature = "s3"))]
        Backend::S3 => Err(LifecycleError::BackendUnavailable("s3")),
    }
}

fn spawn_archiver<S: ObjectStore>(store: S, config: &ArchiveConfig, bucket: &str) -> Archiver {
    let writer = EventWriter::new(store, bucket, Some(config.prefix.clone()))
        .with_put_timeout(config.put_timeout);
    Archiver::start(writer, config.capacity)
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
