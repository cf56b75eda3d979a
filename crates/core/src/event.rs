// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Certificate issuance events
//!
//! A [`CertEvent`] is built once by the issuance path and then frozen behind
//! an `Arc`. The archiver worker only ever reads it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Connection metadata supplied by the client requesting a certificate
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Connection {
    pub remote_host: String,
    pub remote_user: String,
    pub port: u16,
    /// Connection hash computed by the client
    pub hash: String,
    pub proxy_jump: Option<String>,
}

/// Everything recorded about one certificate issuance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertEvent {
    /// When the certificate was issued; drives key partitioning
    pub timestamp: DateTime<Utc>,
    pub serial_number: String,
    pub identity: String,
    pub principals: Vec<String>,
    pub remote_host: String,
    pub remote_user: String,
    pub port: u16,
    pub hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_jump: Option<String>,
    pub valid_after: DateTime<Utc>,
    pub valid_before: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub extensions: BTreeMap<String, String>,
    pub public_key_fingerprint: String,
    /// Always present in the JSON; `""` when unset
    #[serde(default, with = "empty_as_none")]
    pub host_pattern: Option<String>,
}

impl CertEvent {
    /// Build an event from the issuance request and its connection metadata.
    ///
    /// Extensions and host pattern start empty; see [`CertEvent::with_extension`]
    /// and [`CertEvent::with_host_pattern`].
    pub fn new(
        timestamp: DateTime<Utc>,
        serial_number: impl Into<String>,
        identity: impl Into<String>,
        principals: Vec<String>,
        connection: Connection,
        validity: (DateTime<Utc>, DateTime<Utc>),
        public_key_fingerprint: impl Into<String>,
    ) -> Self {
        let Connection {
            remote_host,
            remote_user,
            port,
            hash,
            proxy_jump,
        } = connection;
        let (valid_after, valid_before) = validity;

        Self {
            timestamp,
            serial_number: serial_number.into(),
            identity: identity.into(),
            principals,
            remote_host,
            remote_user,
            port,
            hash,
            proxy_jump: proxy_jump.filter(|p| !p.is_empty()),
            valid_after,
            valid_before,
            extensions: BTreeMap::new(),
            public_key_fingerprint: public_key_fingerprint.into(),
            host_pattern: None,
        }
    }

    pub fn with_extension(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extensions.insert(name.into(), value.into());
        self
    }

    pub fn with_host_pattern(mut self, pattern: impl Into<String>) -> Self {
        let pattern = pattern.into();
        self.host_pattern = (!pattern.is_empty()).then_some(pattern);
        self
    }

    /// Connection metadata as a grouped value
    pub fn connection(&self) -> Connection {
        Connection {
            remote_host: self.remote_host.clone(),
            remote_user: self.remote_user.clone(),
            port: self.port,
            hash: self.hash.clone(),
            proxy_jump: self.proxy_jump.clone(),
        }
    }

    /// Serialize as a single JSON line (object followed by `\n`)
    pub fn to_json_line(&self) -> Result<Vec<u8>, serde_json::Error> {
        let mut bytes = serde_json::to_vec(self)?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}

/// Serde adapter mapping `None` to and from `""`
mod empty_as_none {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<String>, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(value.as_deref().unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(Option::<String>::deserialize(d)?.filter(|v| !v.is_empty()))
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
