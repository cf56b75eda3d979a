// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cert loggers: the capability the issuance path records certificates through

use crate::archiver::Archiver;
use crate::error::ArchiveError;
use certsink_core::CertEvent;
use std::sync::Arc;

/// Records issued certificates.
///
/// Called synchronously on the issuance hot path, so implementations must not
/// block. Any error is advisory and must never fail the issuance.
pub trait CertLogger: Send + Sync {
    fn log_cert(&self, event: Arc<CertEvent>) -> Result<(), ArchiveError>;
}

impl CertLogger for Archiver {
    fn log_cert(&self, event: Arc<CertEvent>) -> Result<(), ArchiveError> {
        Archiver::log_cert(self, event)
    }
}

impl<T: CertLogger + ?Sized> CertLogger for Arc<T> {
    fn log_cert(&self, event: Arc<CertEvent>) -> Result<(), ArchiveError> {
        (**self).log_cert(event)
    }
}

/// Logs each issuance as a structured tracing record
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingCertLogger;

impl TracingCertLogger {
    pub fn new() -> Self {
        Self
    }
}

impl CertLogger for TracingCertLogger {
    fn log_cert(&self, event: Arc<CertEvent>) -> Result<(), ArchiveError> {
        tracing::info!(
            serial = %event.serial_number,
            identity = %event.identity,
            principals = ?event.principals,
            remote_host = %event.remote_host,
            remote_user = %event.remote_user,
            port = event.port,
            hash = %event.hash,
            proxy_jump = ?event.proxy_jump,
            valid_after = %event.valid_after,
            valid_before = %event.valid_before,
            fingerprint = %event.public_key_fingerprint,
            "certificate issued"
        );
        Ok(())
    }
}

/// Logs every issuance, then hands it to the archiver
pub struct ArchivingCertLogger {
    log: TracingCertLogger,
    archiver: Arc<Archiver>,
}

impl ArchivingCertLogger {
    pub fn new(archiver: Arc<Archiver>) -> Self {
        Self {
            log: TracingCertLogger,
            archiver,
        }
    }
}

impl CertLogger for ArchivingCertLogger {
    fn log_cert(&self, event: Arc<CertEvent>) -> Result<(), ArchiveError> {
        self.log.log_cert(Arc::clone(&event))?;
        self.archiver.log_cert(event)
    }
}

#[cfg(test)]
#[path = "cert_logger_tests.rs"]
mod tests;
