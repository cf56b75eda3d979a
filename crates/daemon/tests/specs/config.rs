// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration specs

use crate::prelude::*;

#[test]
fn archival_disabled_without_bucket() {
    let sandbox = Sandbox::new();

    sandbox
        .certsinkd()
        .write_stdin(lines(&[event("1", 1)]))
        .assert()
        .passes()
        .stdout_has("READY")
        .stderr_has("certificate archival disabled")
        .stderr_has("certificate issued");

    assert!(sandbox.files().is_empty());
}

#[test]
fn enabled_archival_is_announced() {
    let sandbox = Sandbox::new();

    sandbox
        .certsinkd()
        .env("CERT_ARCHIVE_BUCKET", "audit")
        .write_stdin("")
        .assert()
        .passes()
        .stderr_has("certificate archival enabled")
        .stderr_has("bucket=audit");
}

#[test]
fn malformed_buffer_size_fails_startup() {
    let sandbox = Sandbox::new();

    sandbox
        .certsinkd()
        .env("CERT_ARCHIVE_BUCKET", "audit")
        .env("CERT_ARCHIVE_BUFFER", "lots")
        .write_stdin("")
        .assert()
        .failure()
        .stderr_has("CERT_ARCHIVE_BUFFER");
}

#[test]
fn unknown_backend_fails_startup() {
    let sandbox = Sandbox::new();

    sandbox
        .certsinkd()
        .env("CERT_ARCHIVE_BUCKET", "audit")
        .env("CERT_ARCHIVE_BACKEND", "tape")
        .write_stdin("")
        .assert()
        .failure()
        .stderr_has("unknown archive backend: tape");
}

#[test]
fn quiet_by_default() {
    let sandbox = Sandbox::new();

    sandbox
        .certsinkd()
        .env_remove("CERTSINK_VERBOSE")
        .env("CERT_ARCHIVE_BUCKET", "audit")
        .write_stdin(lines(&[event("1", 1)]))
        .assert()
        .passes()
        .stderr_lacks("certificate issued");

    assert_eq!(sandbox.files().len(), 1);
}
