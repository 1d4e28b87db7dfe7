// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Byte Bash Blitz

//! Short-lived cache for resolved identities.
//!
//! Best-effort and non-durable: losing an entry (eviction, restart, race)
//! only costs a redundant backend lookup. Correctness rests on a short TTL
//! plus explicit invalidation after role-mutating actions, never on the TTL
//! alone. Expiry is checked lazily on read; there is no sweeper task.

use std::num::NonZeroUsize;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use lru::LruCache;

use super::principal::Principal;

/// Cached entry: resolved principal + insertion timestamp.
struct CacheEntry {
    principal: Principal,
    inserted_at: Instant,
}

/// In-process cache mapping derived keys to resolved identities.
///
/// Explicitly constructed and injected (see `state::AppState`); tests build
/// a fresh instance per case rather than sharing a process-wide singleton.
pub struct IdentityCache {
    cache: Mutex<LruCache<String, CacheEntry>>,
    ttl: Duration,
}

impl IdentityCache {
    /// Create a new cache with the given capacity and TTL.
    ///
    /// - `capacity`: Max number of sessions to cache.
    /// - `ttl`: Time-to-live for each entry, starting at write time.
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            cache: Mutex::new(LruCache::new(
                NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::new(1).unwrap()),
            )),
            ttl,
        }
    }

    /// Get the cached principal for a key.
    ///
    /// Returns `None` if not cached or expired. Expired entries are removed
    /// on the way out.
    pub fn get(&self, key: &str) -> Option<Principal> {
        let mut cache = self.cache.lock().ok()?;
        if let Some(entry) = cache.get(key) {
            if entry.inserted_at.elapsed() < self.ttl {
                return Some(entry.principal.clone());
            }
            cache.pop(key);
        }
        None
    }

    /// Store a resolved principal. Overwrites any existing entry for the key.
    pub fn insert(&self, key: &str, principal: Principal) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.put(
                key.to_string(),
                CacheEntry {
                    principal,
                    inserted_at: Instant::now(),
                },
            );
        }
    }

    /// Remove the entry for a key, regardless of remaining TTL.
    ///
    /// Idempotent; a no-op when the key is absent.
    pub fn invalidate(&self, key: &str) {
        if let Ok(mut cache) = self.cache.lock() {
            cache.pop(key);
        }
    }

    /// Number of live (unexpired) entries. Test/diagnostic helper.
    pub fn live_entries(&self) -> usize {
        match self.cache.lock() {
            Ok(cache) => cache
                .iter()
                .filter(|(_, entry)| entry.inserted_at.elapsed() < self.ttl)
                .count(),
            Err(_) => 0,
        }
    }
}
