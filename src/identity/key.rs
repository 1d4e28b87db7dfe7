// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Byte Bash Blitz

//! Cache key derivation.
//!
//! Keys are derived from the session credential, never stored as the raw
//! credential: the cache map should not hold plaintext tokens. Derivation is
//! deterministic for the same token and distinct across namespaces, so
//! unrelated lookup types sharing one cache cannot collide.

use sha2::{Digest, Sha256};

use super::principal::SessionToken;

/// Namespace for current-user lookups.
pub const CURRENT_USER_NS: &str = "currentUser";

/// Derive a cache key from a namespace and a session credential.
///
/// Pure function: same `(namespace, token)` always yields the same key.
pub fn cache_key(namespace: &str, token: &SessionToken) -> String {
    let mut hasher = Sha256::new();
    hasher.update(namespace.as_bytes());
    hasher.update(b":");
    hasher.update(token.expose().as_bytes());
    let digest = hasher.finalize();
    format!("{namespace}:{}", hex(&digest))
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
