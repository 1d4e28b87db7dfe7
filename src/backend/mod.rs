// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Byte Bash Blitz

//! HTTP clients for the backend collaborators.
//!
//! The hosted backend exposes a GoTrue-style auth API and a PostgREST-style
//! table API; these clients speak both with bounded timeouts. Timeout and
//! retry policy is the backend client's own; the identity layer above adds
//! neither.

use std::time::Duration;

pub mod auth;
pub mod registry;

pub use auth::HttpAuthProvider;
pub use registry::HttpMemberRegistry;

/// Request timeout for both collaborators.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Build the shared HTTP client.
pub(crate) fn http_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()
}
