// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Asynchronous best-effort certificate archiver
//!
//! Events go into a bounded queue drained by a single background worker,
//! which writes each one exactly once. A full queue drops the event instead
//! of blocking the caller. Shutdown stops intake, flushes what is queued,
//! and waits for the worker up to a caller-supplied timeout.
//!
//! After a reported shutdown timeout the worker keeps running detached, so
//! a slow write may still land in storage later.

use crate::error::ArchiveError;
use crate::writer::EventWriter;
use certsink_adapters::ObjectStore;
use certsink_core::CertEvent;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::Instrument;

/// Default queue capacity
pub const DEFAULT_CAPACITY: usize = 100;

const RUNNING: u8 = 0;
const STOPPING: u8 = 1;
const STOPPED: u8 = 2;

/// Lifecycle of an archiver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiverState {
    Running,
    Stopping,
    Stopped,
}

impl ArchiverState {
    fn from_u8(value: u8) -> Self {
        match value {
            RUNNING => Self::Running,
            STOPPING => Self::Stopping,
            _ => Self::Stopped,
        }
    }
}

/// Successful shutdown outcomes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownStatus {
    /// The worker flushed the queue and exited within the timeout
    Drained,
    /// An earlier call already shut the archiver down
    AlreadyStopped,
}

struct Worker {
    stop: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

/// Background archiver for certificate events
pub struct Archiver {
    events: mpsc::Sender<Arc<CertEvent>>,
    state: Arc<AtomicU8>,
    worker: Mutex<Option<Worker>>,
    capacity: usize,
}

impl Archiver {
    /// Start the archiver and its worker task.
    ///
    /// Must be called from within a tokio runtime. A capacity of zero is
    /// treated as one.
    pub fn start<S: ObjectStore>(writer: EventWriter<S>, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (events, queue) = mpsc::channel(capacity);
        let (stop, stop_rx) = oneshot::channel();
        let state = Arc::new(AtomicU8::new(RUNNING));

        let span = tracing::info_span!("cert_archiver", bucket = %writer.bucket());
        let handle = tokio::spawn(
            run_worker(writer, queue, stop_rx, Arc::clone(&state)).instrument(span),
        );

        Self {
            events,
            state,
            worker: Mutex::new(Some(Worker { stop, handle })),
            capacity,
        }
    }

    /// Enqueue an event for archival without blocking.
    ///
    /// A full queue drops the event and returns [`ArchiveError::BufferFull`].
    /// Errors are advisory: the event is lost but issuance must carry on.
    pub fn log_cert(&self, event: Arc<CertEvent>) -> Result<(), ArchiveError> {
        if self.state() != ArchiverState::Running {
            return Err(ArchiveError::Closed {
                serial: event.serial_number.clone(),
            });
        }

        match self.events.try_send(event) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(event)) => {
                tracing::warn!(
                    serial = %event.serial_number,
                    "cert archiver buffer full, dropping event"
                );
                Err(ArchiveError::BufferFull {
                    serial: event.serial_number.clone(),
                })
            }
            Err(TrySendError::Closed(event)) => {
                tracing::warn!(
                    serial = %event.serial_number,
                    "cert archiver closed, dropping event"
                );
                Err(ArchiveError::Closed {
                    serial: event.serial_number.clone(),
                })
            }
        }
    }

    /// Stop intake, drain the queue, and wait up to `timeout` for the worker.
    ///
    /// Calling this again returns [`ShutdownStatus::AlreadyStopped`] at once.
    pub async fn shutdown(&self, timeout: Duration) -> Result<ShutdownStatus, ArchiveError> {
        let worker = self
            .worker
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        let Some(Worker { stop, handle }) = worker else {
            return Ok(ShutdownStatus::AlreadyStopped);
        };

        let _ = self
            .state
            .compare_exchange(RUNNING, STOPPING, Ordering::SeqCst, Ordering::SeqCst);
        // Worker may have exited already if its queue closed
        let _ = stop.send(());

        match tokio::time::timeout(timeout, handle).await {
            Ok(Ok(())) => {
                tracing::info!("cert archiver drained");
                Ok(ShutdownStatus::Drained)
            }
            Ok(Err(e)) => {
                self.state.store(STOPPED, Ordering::SeqCst);
                tracing::error!(error = %e, "cert archiver worker failed");
                Err(ArchiveError::WorkerFailed(e.to_string()))
            }
            Err(_) => {
                tracing::warn!(
                    timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
                    "cert archiver shutdown timed out, pending events may be lost"
                );
                Err(ArchiveError::ShutdownTimeout(timeout))
            }
        }
    }

    pub fn state(&self) -> ArchiverState {
        ArchiverState::from_u8(self.state.load(Ordering::SeqCst))
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Worker loop: write events one at a time until stopped, then drain
async fn run_worker<S: ObjectStore>(
    writer: EventWriter<S>,
    mut queue: mpsc::Receiver<Arc<CertEvent>>,
    mut stop: oneshot::Receiver<()>,
    state: Arc<AtomicU8>,
) {
    loop {
        tokio::select! {
            biased;
            // Fires on explicit stop and when the archiver is dropped
            _ = &mut stop => break,
            event = queue.recv() => match event {
                Some(event) => write_logged(&writer, &event, "failed to archive cert").await,
                None => break,
            },
        }
    }

    state.store(STOPPING, Ordering::SeqCst);
    queue.close();

    let mut drained = 0usize;
    while let Ok(event) = queue.try_recv() {
        write_logged(&writer, &event, "failed to archive cert during shutdown").await;
        drained += 1;
    }

    state.store(STOPPED, Ordering::SeqCst);
    tracing::debug!(drained, "cert archiver worker stopped");
}

async fn write_logged<S: ObjectStore>(writer: &EventWriter<S>, event: &CertEvent, message: &str) {
    if let Err(e) = writer.write_event(event).await {
        tracing::error!(
            serial = %event.serial_number,
            error = %e,
            "{}",
            message
        );
    }
}

#[cfg(test)]
#[path = "archiver_tests.rs"]
mod tests;
