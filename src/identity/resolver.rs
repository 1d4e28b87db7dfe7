// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Byte Bash Blitz

//! Current-user resolution.
//!
//! Maps a session credential to a [`Principal`] by combining the auth
//! backend (who is this session?) with the member registry (what is their
//! role here?). Successful resolutions are cached briefly; failures are
//! never cached, so registry rows created mid-session are picked up on the
//! next request.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, warn};

use super::cache::IdentityCache;
use super::error::{AuthProviderError, RegistryError};
use super::key::{cache_key, CURRENT_USER_NS};
use super::principal::{Principal, SessionToken, SessionUser};

/// A member-registry row matched by provider username.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberRecord {
    /// Registry row ID.
    pub id: i64,
    /// Free-text role label ("Organiser", "Mentor", "Basher", ...).
    pub title: String,
}

/// The hosted auth backend.
///
/// Verifying the credential is this collaborator's job; the identity layer
/// never inspects the token itself.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Look up the user behind a session credential.
    ///
    /// `Ok(None)` means "anonymous visitor" and is an expected outcome,
    /// not a fault.
    async fn get_current_user(
        &self,
        token: &SessionToken,
    ) -> Result<Option<SessionUser>, AuthProviderError>;

    /// Terminate the session behind a credential.
    async fn sign_out(&self, token: &SessionToken) -> Result<(), AuthProviderError>;
}

/// The organization's member registry.
#[async_trait]
pub trait MemberRegistry: Send + Sync {
    /// Find the single registry row for a provider username.
    ///
    /// Zero rows is [`RegistryError::NotFound`], more than one is
    /// [`RegistryError::Ambiguous`]; both are distinct from query failures.
    async fn find_by_username(&self, provider_username: &str)
        -> Result<MemberRecord, RegistryError>;
}

/// Resolves and caches the acting user's identity.
///
/// Built once at startup with its cache and collaborators injected; tests
/// construct a fresh instance (and fresh cache) per case.
pub struct IdentityResolver {
    auth: Arc<dyn AuthProvider>,
    registry: Arc<dyn MemberRegistry>,
    cache: IdentityCache,
}

impl IdentityResolver {
    pub fn new(
        auth: Arc<dyn AuthProvider>,
        registry: Arc<dyn MemberRegistry>,
        cache: IdentityCache,
    ) -> Self {
        Self {
            auth,
            registry,
            cache,
        }
    }

    /// Resolve the principal behind a session credential.
    ///
    /// Returns `None` for anonymous visitors, sessions without a matching
    /// registry row, and backend faults; only the successful path writes to
    /// the cache. This layer adds no retries of its own.
    pub async fn resolve(&self, token: &SessionToken) -> Option<Principal> {
        let key = cache_key(CURRENT_USER_NS, token);

        if let Some(principal) = self.cache.get(&key) {
            return Some(principal);
        }

        let user = match self.auth.get_current_user(token).await {
            Ok(Some(user)) => user,
            Ok(None) => {
                debug!("no authenticated session on request");
                return None;
            }
            Err(err) => {
                error!(error = %err, "failed to fetch session user");
                return None;
            }
        };

        let member = match self.registry.find_by_username(&user.provider_username).await {
            Ok(member) => member,
            Err(err @ (RegistryError::NotFound(_) | RegistryError::Ambiguous(_))) => {
                // Data-consistency gap between the auth provider and the
                // registry; operators want to see these.
                warn!(user_id = %user.id, error = %err, "session user has no unambiguous registry row");
                return None;
            }
            Err(err) => {
                error!(error = %err, "member registry lookup failed");
                return None;
            }
        };

        let principal = Principal {
            id: user.id,
            title: member.title,
            member_id: member.id,
        };
        self.cache.insert(&key, principal.clone());
        Some(principal)
    }

    /// Drop the cached identity for a session credential.
    ///
    /// Call after any action that mutates the underlying role data; the TTL
    /// alone must not be relied on to flush stale roles.
    pub fn invalidate(&self, token: &SessionToken) {
        self.cache.invalidate(&cache_key(CURRENT_USER_NS, token));
    }

    /// Terminate the session and drop its cached identity.
    ///
    /// The cache entry is removed even when the backend call fails: a
    /// dropped entry only costs a redundant lookup, a stale one misattributes
    /// identity.
    pub async fn sign_out(&self, token: &SessionToken) -> Result<(), AuthProviderError> {
        let result = self.auth.sign_out(token).await;
        self.invalidate(token);
        result
    }

    /// The underlying cache. Test/diagnostic access.
    pub fn cache(&self) -> &IdentityCache {
        &self.cache
    }
}
