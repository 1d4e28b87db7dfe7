// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Byte Bash Blitz

use std::sync::Arc;

use crate::identity::IdentityResolver;

/// Shared application state.
///
/// The resolver (and the cache inside it) is built once at startup and
/// injected here; handlers and extractors reach it through axum state.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Arc<IdentityResolver>,
}

impl AppState {
    pub fn new(resolver: IdentityResolver) -> Self {
        Self {
            resolver: Arc::new(resolver),
        }
    }
}
