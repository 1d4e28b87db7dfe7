// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Byte Bash Blitz

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    identity::{OrganiserStatus, Principal},
    state::AppState,
};

pub mod health;
pub mod users;

pub fn router(state: AppState) -> Router {
    let v1_routes = Router::new()
        .route("/users/me", get(users::get_current_user))
        .route("/admin/access", get(users::admin_access))
        .route("/auth/signout", post(users::sign_out))
        .with_state(state.clone());

    Router::new()
        .route("/health", get(health::health))
        .with_state(state)
        .nest("/v1", v1_routes)
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        users::get_current_user,
        users::admin_access,
        users::sign_out
    ),
    components(
        schemas(
            health::HealthResponse,
            users::UserMeResponse,
            users::AdminAccessResponse,
            OrganiserStatus,
            Principal
        )
    ),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Users", description = "Identity resolution and session management")
    )
)]
struct ApiDoc;
