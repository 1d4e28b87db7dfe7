// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Byte Bash Blitz

use axum::{extract::State, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// Simple health check response for liveness probes.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    /// Live (unexpired) identity-cache entries, for operator curiosity.
    pub cached_identities: usize,
}

/// Health check endpoint handler.
///
/// Always returns 200 if the process is running. The backend collaborators
/// are not probed here: an unreachable backend degrades every request to
/// "anonymous" rather than taking the service down.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    )
)]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        cached_identities: state.resolver.cache().live_entries(),
    })
}
