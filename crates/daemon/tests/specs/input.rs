// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Input handling specs

use crate::prelude::*;

#[test]
fn malformed_lines_are_skipped_with_warning() {
    let sandbox = Sandbox::new();
    let input = format!("{{not json\n\n{}", lines(&[event("5", 2)]));

    sandbox
        .certsinkd()
        .env("CERT_ARCHIVE_BUCKET", "audit")
        .write_stdin(input)
        .assert()
        .passes()
        .stderr_has("ignoring malformed event line");

    assert_eq!(
        sandbox.files(),
        vec!["audit/certs/year=2024/month=03/day=02/serial-5.json".to_string()]
    );
}

#[test]
fn eof_drains_every_queued_event() {
    let sandbox = Sandbox::new();
    let events: Vec<_> = (0..25).map(|i| event(&i.to_string(), 3)).collect();

    sandbox
        .certsinkd()
        .env("CERT_ARCHIVE_BUCKET", "audit")
        .write_stdin(lines(&events))
        .assert()
        .passes()
        .stderr_has("cert archiver drained")
        .stderr_has("accepted=25");

    assert_eq!(sandbox.files().len(), 25);
}

#[test]
fn empty_input_exits_cleanly() {
    let sandbox = Sandbox::new();

    sandbox
        .certsinkd()
        .env("CERT_ARCHIVE_BUCKET", "audit")
        .write_stdin("")
        .assert()
        .passes()
        .stderr_has("Daemon stopped");
}
