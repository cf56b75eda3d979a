// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! certsink-core: data model for certificate issuance archival
//!
//! This crate provides:
//! - The immutable [`CertEvent`] record
//! - The date-partitioned storage key layout

pub mod event;
pub mod key;

pub use event::{CertEvent, Connection};
pub use key::{generate_key, validate_serial, KeyError};
