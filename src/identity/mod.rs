// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Byte Bash Blitz

//! # Identity Module
//!
//! Current-user resolution and caching for the leaderboard dashboard.
//!
//! ## Resolution Flow
//!
//! 1. Request carries a session credential (bearer token or session cookie)
//! 2. [`IdentityResolver::resolve`]:
//!    - checks the [`IdentityCache`] under a key derived from the token
//!    - on miss, asks the auth backend for the session's user
//!    - looks the user up in the member registry by provider username
//!    - caches and returns the assembled [`Principal`]
//! 3. Role predicates (`is_organiser`, `is_mentor`) are full resolutions
//!    and therefore benefit from the same cache
//!
//! ## Correctness
//!
//! - A `Principal` exists only when a valid session AND exactly one registry
//!   row agree; there is no partially-populated identity
//! - Failed resolutions are never cached, so a member added moments after
//!   signing in is picked up on the very next request
//! - Explicit invalidation covers role mutations that must not wait out the TTL

pub mod cache;
pub mod error;
pub mod extractor;
pub mod key;
pub mod principal;
pub mod resolver;
pub mod roles;

pub use cache::IdentityCache;
pub use error::{AuthProviderError, RegistryError};
pub use extractor::{CurrentUser, OrganiserOnly, Session};
pub use key::cache_key;
pub use principal::{Principal, SessionToken, SessionUser};
pub use resolver::{AuthProvider, IdentityResolver, MemberRecord, MemberRegistry};
pub use roles::{organiser_status, OrganiserStatus};
