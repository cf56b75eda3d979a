// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Certificate archive daemon (certsinkd)
//!
//! Reads issuance events as JSON lines on stdin and records each one through
//! the configured cert logger. Drains the archiver on EOF, SIGTERM or SIGINT.

use certsink_archiver::ArchiveConfig;
use certsink_daemon::lifecycle;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

/// Verbosity variable consulted when `RUST_LOG` is unset
const ENV_VERBOSE: &str = "CERTSINK_VERBOSE";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _log_guard = setup_logging();

    let config = match ArchiveConfig::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return Err(e.into());
        }
    };

    let mut daemon = match lifecycle::startup(&config).await {
        Ok(d) => d,
        Err(e) => {
            error!("Failed to start daemon: {}", e);
            return Err(e.into());
        }
    };

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    info!("Daemon ready, reading events from stdin");

    // Signal ready for parent process
    println!("READY");

    loop {
        tokio::select! {
            result = lines.next_line() => {
                match result {
                    Ok(Some(line)) => daemon.handle_line(&line),
                    Ok(None) => {
                        info!("Input closed, shutting down...");
                        break;
                    }
                    Err(e) => {
                        error!("Error reading input: {}", e);
                        break;
                    }
                }
            }

            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down...");
                break;
            }

            _ = sigint.recv() => {
                info!("Received SIGINT, shutting down...");
                break;
            }
        }
    }

    daemon.shutdown().await;
    info!("Daemon stopped");
    Ok(())
}

fn setup_logging() -> tracing_appender::non_blocking::WorkerGuard {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let (non_blocking, guard) = tracing_appender::non_blocking(std::io::stderr());

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity_level(std::env::var(ENV_VERBOSE).ok())));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    guard
}

/// Map a verbosity count to a filter directive: 0 warn, 1 info, 2+ debug
fn verbosity_level(value: Option<String>) -> &'static str {
    match value.and_then(|v| v.trim().parse::<u8>().ok()) {
        None | Some(0) => "warn",
        Some(1) => "info",
        Some(_) => "debug",
    }
}
