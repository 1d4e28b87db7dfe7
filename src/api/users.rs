// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Byte Bash Blitz

//! User and session endpoints.

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use tracing::warn;
use utoipa::ToSchema;

use crate::error::ApiError;
use crate::identity::{organiser_status, CurrentUser, OrganiserOnly, OrganiserStatus, Principal, Session};
use crate::state::AppState;

/// Response for GET /v1/users/me
#[derive(Debug, Serialize, ToSchema)]
pub struct UserMeResponse {
    /// User's unique ID at the auth provider.
    pub id: String,
    /// Role title from the member registry.
    pub title: String,
    /// Member-registry row ID.
    pub member_id: i64,
    /// Organiser check over the same identity.
    pub organiser: OrganiserStatus,
}

impl From<Principal> for UserMeResponse {
    fn from(principal: Principal) -> Self {
        let organiser = organiser_status(&principal);
        Self {
            id: principal.id,
            title: principal.title,
            member_id: principal.member_id,
            organiser,
        }
    }
}

/// Get the current authenticated user's identity and roles.
#[utoipa::path(
    get,
    path = "/v1/users/me",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Resolved identity", body = UserMeResponse),
        (status = 401, description = "Anonymous or unregistered session"),
    )
)]
pub async fn get_current_user(CurrentUser(principal): CurrentUser) -> Json<UserMeResponse> {
    Json(principal.into())
}

/// Response for GET /v1/admin/access
#[derive(Debug, Serialize, ToSchema)]
pub struct AdminAccessResponse {
    /// The organiser's registry row ID.
    pub organiser_id: i64,
}

/// Probe organiser access for the admin area.
///
/// Route loaders for the admin pages call this before rendering.
#[utoipa::path(
    get,
    path = "/v1/admin/access",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Caller is an organiser", body = AdminAccessResponse),
        (status = 401, description = "Anonymous or unregistered session"),
        (status = 403, description = "Caller is not an organiser"),
    )
)]
pub async fn admin_access(OrganiserOnly(principal): OrganiserOnly) -> Json<AdminAccessResponse> {
    Json(AdminAccessResponse {
        organiser_id: principal.member_id,
    })
}

/// Terminate the current session.
///
/// Invalidates the cached identity for this session even when the backend
/// sign-out call fails, so a retried sign-out never serves a stale identity
/// in between.
#[utoipa::path(
    post,
    path = "/v1/auth/signout",
    tag = "Users",
    security(("bearer" = [])),
    responses(
        (status = 204, description = "Session terminated"),
        (status = 401, description = "No session credential on request"),
        (status = 502, description = "Auth backend unavailable"),
    )
)]
pub async fn sign_out(
    State(state): State<AppState>,
    Session(token): Session,
) -> Result<StatusCode, ApiError> {
    if let Err(err) = state.resolver.sign_out(&token).await {
        warn!(error = %err, "sign-out call to auth backend failed");
        return Err(ApiError::BackendUnavailable);
    }
    Ok(StatusCode::NO_CONTENT)
}
