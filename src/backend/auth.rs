// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Byte Bash Blitz

//! HTTP implementation of the auth collaborator.
//!
//! Talks to a GoTrue-style endpoint: `GET /auth/v1/user` answers with the
//! session's user for a valid credential and 401 for anything else. Token
//! verification is entirely the backend's job; this client only forwards
//! the credential.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::identity::{AuthProvider, AuthProviderError, SessionToken, SessionUser};

/// Auth backend client.
pub struct HttpAuthProvider {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

/// GoTrue user payload, reduced to what resolution needs.
#[derive(Debug, Deserialize)]
struct UserPayload {
    id: String,
    #[serde(default)]
    user_metadata: UserMetadata,
}

#[derive(Debug, Deserialize, Default)]
struct UserMetadata {
    /// Username at the external identity provider.
    #[serde(default)]
    user_name: Option<String>,
}

impl HttpAuthProvider {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, reqwest::Error> {
        Ok(Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            client: super::http_client()?,
        })
    }
}

/// Map a user payload to a [`SessionUser`].
///
/// A session without a provider username cannot be matched against the
/// registry; treat it as an invalid response rather than inventing a key.
fn session_user_from_payload(payload: UserPayload) -> Result<SessionUser, AuthProviderError> {
    match payload.user_metadata.user_name {
        Some(username) if !username.is_empty() => Ok(SessionUser {
            id: payload.id,
            provider_username: username,
        }),
        _ => Err(AuthProviderError::InvalidResponse(
            "session user carries no provider username".to_string(),
        )),
    }
}

#[async_trait]
impl AuthProvider for HttpAuthProvider {
    async fn get_current_user(
        &self,
        token: &SessionToken,
    ) -> Result<Option<SessionUser>, AuthProviderError> {
        let response = self
            .client
            .get(format!("{}/auth/v1/user", self.base_url))
            .header("apikey", &self.api_key)
            .bearer_auth(token.expose())
            .send()
            .await
            .map_err(|e| AuthProviderError::Transport(e.to_string()))?;

        // Invalid or expired credentials are the anonymous case, not a fault.
        if response.status() == StatusCode::UNAUTHORIZED
            || response.status() == StatusCode::FORBIDDEN
        {
            return Ok(None);
        }

        if !response.status().is_success() {
            return Err(AuthProviderError::InvalidResponse(format!(
                "HTTP {} from auth backend",
                response.status()
            )));
        }

        let payload: UserPayload = response
            .json()
            .await
            .map_err(|e| AuthProviderError::InvalidResponse(e.to_string()))?;

        session_user_from_payload(payload).map(Some)
    }

    async fn sign_out(&self, token: &SessionToken) -> Result<(), AuthProviderError> {
        let response = self
            .client
            .post(format!("{}/auth/v1/logout", self.base_url))
            .header("apikey", &self.api_key)
            .bearer_auth(token.expose())
            .send()
            .await
            .map_err(|e| AuthProviderError::Transport(e.to_string()))?;

        // An already-dead session is as signed out as it gets.
        if response.status().is_success() || response.status() == StatusCode::UNAUTHORIZED {
            return Ok(());
        }

        Err(AuthProviderError::InvalidResponse(format!(
            "HTTP {} from auth backend on sign-out",
            response.status()
        )))
    }
}
