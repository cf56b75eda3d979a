// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for daemon specs

use assert_cmd::assert::Assert;
use assert_cmd::Command;
use certsink_core::{CertEvent, Connection};
use chrono::{TimeZone, Utc};
use predicates::prelude::*;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A scratch archive root plus the environment to point certsinkd at it
pub struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// `certsinkd` with a clean environment rooted in this sandbox
    pub fn certsinkd(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_certsinkd"));
        cmd.env_clear()
            .env("HOME", self.root())
            .env("CERT_ARCHIVE_FS_ROOT", self.root())
            .env("CERTSINK_VERBOSE", "1");
        cmd
    }

    /// Path of an archived object
    pub fn object(&self, bucket: &str, key: &str) -> PathBuf {
        self.root().join(bucket).join(key)
    }

    pub fn read(&self, bucket: &str, key: &str) -> String {
        std::fs::read_to_string(self.object(bucket, key)).unwrap()
    }

    /// Every regular file under the root, relative and sorted
    pub fn files(&self) -> Vec<String> {
        let mut out = Vec::new();
        collect(self.root(), self.root(), &mut out);
        out.sort();
        out
    }
}

fn collect(root: &Path, dir: &Path, out: &mut Vec<String>) {
    for entry in std::fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            collect(root, &path, out);
        } else {
            out.push(path.strip_prefix(root).unwrap().display().to_string());
        }
    }
}

/// An issuance event on the given March 2024 day
pub fn event(serial: &str, day: u32) -> CertEvent {
    let issued = Utc.with_ymd_and_hms(2024, 3, day, 23, 30, 0).unwrap();
    CertEvent::new(
        issued,
        serial,
        "carol@example.com",
        vec!["carol".to_string()],
        Connection {
            remote_host: "build-7.internal".to_string(),
            remote_user: "ci".to_string(),
            port: 22,
            hash: "abc123".to_string(),
            proxy_jump: None,
        },
        (issued, issued + chrono::Duration::minutes(2)),
        "SHA256:carol",
    )
    .with_extension("permit-pty", "")
}

/// Events as newline-delimited JSON
pub fn lines(events: &[CertEvent]) -> String {
    events
        .iter()
        .map(|e| serde_json::to_string(e).unwrap() + "\n")
        .collect()
}

/// Assertion helpers in the style of the rest of the suite
pub trait AssertExt {
    fn passes(self) -> Self;
    fn stdout_has(self, needle: &str) -> Self;
    fn stderr_has(self, needle: &str) -> Self;
    fn stderr_lacks(self, needle: &str) -> Self;
}

impl AssertExt for Assert {
    fn passes(self) -> Self {
        self.success()
    }

    fn stdout_has(self, needle: &str) -> Self {
        self.stdout(predicate::str::contains(needle))
    }

    fn stderr_has(self, needle: &str) -> Self {
        self.stderr(predicate::str::contains(needle))
    }

    fn stderr_lacks(self, needle: &str) -> Self {
        self.stderr(predicate::str::contains(needle).not())
    }
}
