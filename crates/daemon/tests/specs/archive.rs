// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Archive layout specs

use crate::prelude::*;
use certsink_core::CertEvent;
use similar_asserts::assert_eq;

#[test]
fn events_are_archived_under_date_partitions() {
    let sandbox = Sandbox::new();

    sandbox
        .certsinkd()
        .env("CERT_ARCHIVE_BUCKET", "audit")
        .write_stdin(lines(&[event("100", 4), event("101", 5)]))
        .assert()
        .passes()
        .stdout_has("READY");

    assert_eq!(
        sandbox.files(),
        vec![
            "audit/certs/year=2024/month=03/day=04/serial-100.json".to_string(),
            "audit/certs/year=2024/month=03/day=05/serial-101.json".to_string(),
        ]
    );
}

#[test]
fn archived_object_is_one_json_line() {
    let sandbox = Sandbox::new();
    let sent = event("7", 9);

    sandbox
        .certsinkd()
        .env("CERT_ARCHIVE_BUCKET", "audit")
        .write_stdin(lines(std::slice::from_ref(&sent)))
        .assert()
        .passes();

    let body = sandbox.read("audit", "certs/year=2024/month=03/day=09/serial-7.json");
    assert_eq!(body.lines().count(), 1);
    assert!(body.ends_with('\n'));
    let stored: CertEvent = serde_json::from_str(body.trim_end()).unwrap();
    assert_eq!(stored, sent);
}

#[test]
fn custom_prefix_is_used() {
    let sandbox = Sandbox::new();

    sandbox
        .certsinkd()
        .env("CERT_ARCHIVE_BUCKET", "audit")
        .env("CERT_ARCHIVE_PREFIX", "ssh/issued/")
        .write_stdin(lines(&[event("1", 1)]))
        .assert()
        .passes();

    assert_eq!(
        sandbox.files(),
        vec!["audit/ssh/issued/year=2024/month=03/day=01/serial-1.json".to_string()]
    );
}

#[test]
fn empty_prefix_writes_at_bucket_root() {
    let sandbox = Sandbox::new();

    sandbox
        .certsinkd()
        .env("CERT_ARCHIVE_BUCKET", "audit")
        .env("CERT_ARCHIVE_PREFIX", "")
        .write_stdin(lines(&[event("1", 1)]))
        .assert()
        .passes();

    assert_eq!(
        sandbox.files(),
        vec!["audit/year=2024/month=03/day=01/serial-1.json".to_string()]
    );
}

#[test]
fn unsafe_serial_is_logged_and_skipped() {
    let sandbox = Sandbox::new();

    sandbox
        .certsinkd()
        .env("CERT_ARCHIVE_BUCKET", "audit")
        .write_stdin(lines(&[event("../escape", 1), event("2", 1)]))
        .assert()
        .passes()
        .stderr_has("failed to archive cert");

    assert_eq!(
        sandbox.files(),
        vec!["audit/certs/year=2024/month=03/day=01/serial-2.json".to_string()]
    );
}
