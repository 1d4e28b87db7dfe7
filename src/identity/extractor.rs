// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Byte Bash Blitz

//! Axum extractors for the identity layer.
//!
//! These are the only place that knows how a session credential rides on an
//! HTTP request (bearer header or session cookie). Everything below them
//! works on [`SessionToken`] directly, keeping the resolver and cache free
//! of any request abstraction.
//!
//! ```rust,ignore
//! async fn my_handler(CurrentUser(principal): CurrentUser) -> impl IntoResponse {
//!     // principal is a fully resolved Principal
//! }
//! ```

use axum::{
    extract::FromRequestParts,
    http::{
        header::{AUTHORIZATION, COOKIE},
        request::Parts,
    },
};

use super::principal::{Principal, SessionToken};
use super::roles::organiser_status;
use crate::error::ApiError;
use crate::state::AppState;

/// Cookie carrying the session access token for browser clients.
pub const SESSION_COOKIE: &str = "sb-access-token";

/// Extractor for the raw session credential.
///
/// Checks `Authorization: Bearer <token>` first, then the session cookie.
/// Rejects with 401 when neither is present; resolution is NOT attempted.
pub struct Session(pub SessionToken);

impl FromRequestParts<AppState> for Session {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match token_from_parts(parts) {
            Some(token) => Ok(Session(token)),
            None => Err(ApiError::MissingCredentials),
        }
    }
}

/// Extractor for the resolved acting user.
///
/// Performs a full (cached) resolution; rejects with 401 when the request is
/// anonymous or the session user has no registry row.
pub struct CurrentUser(pub Principal);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // A middleware or an outer extractor may have resolved this already.
        if let Some(principal) = parts.extensions.get::<Principal>().cloned() {
            return Ok(CurrentUser(principal));
        }

        let Session(token) = Session::from_request_parts(parts, state).await?;

        match state.resolver.resolve(&token).await {
            Some(principal) => {
                parts.extensions.insert(principal.clone());
                Ok(CurrentUser(principal))
            }
            None => Err(ApiError::Unauthenticated),
        }
    }
}

/// Extractor that requires an organiser title.
///
/// Rejects anonymous requests with 401 and resolved non-organisers with 403.
pub struct OrganiserOnly(pub Principal);

impl FromRequestParts<AppState> for OrganiserOnly {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(principal) = CurrentUser::from_request_parts(parts, state).await?;

        if !organiser_status(&principal).is_organiser {
            return Err(ApiError::InsufficientRole);
        }

        Ok(OrganiserOnly(principal))
    }
}

/// Pull the session token off request parts, if any.
fn token_from_parts(parts: &Parts) -> Option<SessionToken> {
    if let Some(value) = parts.headers.get(AUTHORIZATION) {
        if let Ok(raw) = value.to_str() {
            if let Some(token) = raw.strip_prefix("Bearer ") {
                let token = token.trim();
                if !token.is_empty() {
                    return Some(SessionToken::new(token));
                }
            }
        }
    }

    let cookies = parts.headers.get(COOKIE)?.to_str().ok()?;
    for pair in cookies.split(';') {
        let mut kv = pair.trim().splitn(2, '=');
        if kv.next() == Some(SESSION_COOKIE) {
            let value = kv.next()?.trim();
            if !value.is_empty() {
                return Some(SessionToken::new(value));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::http::Request;

    use super::*;
    use crate::identity::cache::IdentityCache;
    use crate::identity::error::{AuthProviderError, RegistryError};
    use crate::identity::principal::SessionUser;
    use crate::identity::resolver::{
        AuthProvider, IdentityResolver, MemberRecord, MemberRegistry,
    };

    /// Collaborator double resolving any session to a fixed title.
    struct FixedBackend {
        title: &'static str,
    }

    #[async_trait]
    impl AuthProvider for FixedBackend {
        async fn get_current_user(
            &self,
            _token: &SessionToken,
        ) -> Result<Option<SessionUser>, AuthProviderError> {
            Ok(Some(SessionUser {
                id: "user_1".to_string(),
                provider_username: "octocat".to_string(),
            }))
        }

        async fn sign_out(&self, _token: &SessionToken) -> Result<(), AuthProviderError> {
            Ok(())
        }
    }

    #[async_trait]
    impl MemberRegistry for FixedBackend {
        async fn find_by_username(
            &self,
            _provider_username: &str,
        ) -> Result<MemberRecord, RegistryError> {
            Ok(MemberRecord {
                id: 42,
                title: self.title.to_string(),
            })
        }
    }

    fn state_with_title(title: &'static str) -> AppState {
        let backend = Arc::new(FixedBackend { title });
        let resolver = IdentityResolver::new(
            Arc::clone(&backend) as Arc<dyn AuthProvider>,
            backend,
            IdentityCache::new(16, Duration::from_secs(60)),
        );
        AppState::new(resolver)
    }

    fn parts_with_headers(headers: &[(&str, &str)]) -> Parts {
        let mut builder = Request::builder().uri("/test");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn session_requires_a_credential() {
        let state = state_with_title("Basher");
        let mut parts = parts_with_headers(&[]);

        let result = Session::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(ApiError::MissingCredentials)));
    }

    #[tokio::test]
    async fn session_reads_bearer_header() {
        let state = state_with_title("Basher");
        let mut parts = parts_with_headers(&[("Authorization", "Bearer tok-123")]);

        let Session(token) = Session::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(token.expose(), "tok-123");
    }

    #[tokio::test]
    async fn session_falls_back_to_cookie() {
        let state = state_with_title("Basher");
        let mut parts = parts_with_headers(&[(
            "Cookie",
            "theme=dark; sb-access-token=tok-456; lang=en",
        )]);

        let Session(token) = Session::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(token.expose(), "tok-456");
    }

    #[tokio::test]
    async fn bearer_header_wins_over_cookie() {
        let state = state_with_title("Basher");
        let mut parts = parts_with_headers(&[
            ("Authorization", "Bearer from-header"),
            ("Cookie", "sb-access-token=from-cookie"),
        ]);

        let Session(token) = Session::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(token.expose(), "from-header");
    }

    #[tokio::test]
    async fn current_user_resolves_principal() {
        let state = state_with_title("Mentor");
        let mut parts = parts_with_headers(&[("Authorization", "Bearer tok-123")]);

        let CurrentUser(principal) =
            CurrentUser::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(principal.id, "user_1");
        assert_eq!(principal.title, "Mentor");
    }

    #[tokio::test]
    async fn current_user_prefers_extensions() {
        let state = state_with_title("Basher");
        let mut parts = parts_with_headers(&[]);

        let principal = Principal {
            id: "from_middleware".to_string(),
            title: "Organiser".to_string(),
            member_id: 9,
        };
        parts.extensions.insert(principal);

        let CurrentUser(resolved) =
            CurrentUser::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(resolved.id, "from_middleware");
    }

    #[tokio::test]
    async fn organiser_only_rejects_non_organiser() {
        let state = state_with_title("Basher");
        let mut parts = parts_with_headers(&[("Authorization", "Bearer tok-123")]);

        let result = OrganiserOnly::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(ApiError::InsufficientRole)));
    }

    #[tokio::test]
    async fn organiser_only_accepts_any_recognised_spelling() {
        let state = state_with_title("ORGANIZER");
        let mut parts = parts_with_headers(&[("Authorization", "Bearer tok-123")]);

        let OrganiserOnly(principal) =
            OrganiserOnly::from_request_parts(&mut parts, &state).await.unwrap();
        assert_eq!(principal.member_id, 42);
    }

    #[tokio::test]
    async fn organiser_only_rejects_anonymous_with_401() {
        let state = state_with_title("Organiser");
        let mut parts = parts_with_headers(&[]);

        let result = OrganiserOnly::from_request_parts(&mut parts, &state).await;
        assert!(matches!(result, Err(ApiError::MissingCredentials)));
    }
}
