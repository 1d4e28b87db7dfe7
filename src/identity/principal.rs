// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Byte Bash Blitz

//! Resolved identity types.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The resolved, role-annotated identity of the acting user.
///
/// A `Principal` is only constructed when both a valid authenticated session
/// exists and exactly one member-registry row matches the session user's
/// provider username. Resolution is all-or-nothing: callers receive either a
/// fully populated `Principal` or `None`, never a partial record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Principal {
    /// Opaque user ID from the auth provider, stable per account.
    pub id: String,

    /// Free-text role label from the member registry.
    ///
    /// Observed values include "Organiser"/"Organizer" in several casings,
    /// "Mentor", "Basher", "Captain Bash", or empty.
    pub title: String,

    /// Row ID of the matching member-registry entry.
    pub member_id: i64,
}

/// The user attached to an authenticated session, as reported by the auth
/// backend. Not yet a [`Principal`]: the registry lookup may still fail.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionUser {
    /// Opaque user ID from the auth provider.
    pub id: String,
    /// Username at the external identity provider (registry lookup key).
    pub provider_username: String,
}

/// An opaque session credential lifted off an inbound request.
///
/// The identity layer takes this directly rather than a framework request
/// object, so the cache is keyed on exactly the identity-relevant material.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw credential, for forwarding to the auth backend.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

// Session tokens are credentials; keep them out of logs.
impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SessionToken(***)")
    }
}
