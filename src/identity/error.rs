// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Byte Bash Blitz

//! Collaborator error taxonomy.
//!
//! None of these is fatal: every failure degrades to "no identity" in the
//! resolver, and the caller decides what to do (redirect, deny, public view).

use thiserror::Error;

/// Errors from the auth backend collaborator.
///
/// An absent session is NOT an error; `AuthProvider::get_current_user`
/// returns `Ok(None)` for anonymous visitors.
#[derive(Debug, Error)]
pub enum AuthProviderError {
    /// Transport-level failure reaching the auth backend.
    #[error("auth backend transport failure: {0}")]
    Transport(String),

    /// The auth backend answered with an unexpected status or body.
    #[error("auth backend returned an invalid response: {0}")]
    InvalidResponse(String),
}

/// Errors from the member-registry collaborator.
///
/// "Not found" and "ambiguous" are kept distinct from query failures: the
/// former two indicate a data-consistency gap between the auth provider and
/// the registry, the latter a backend fault.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No registry row matches the provider username.
    #[error("no member registered for username {0:?}")]
    NotFound(String),

    /// More than one registry row matches the provider username.
    #[error("multiple members registered for username {0:?}")]
    Ambiguous(String),

    /// Transport or query failure from the registry backend.
    #[error("registry backend failure: {0}")]
    Backend(String),
}
