// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Byte Bash Blitz

//! API error responses.
//!
//! Every failure surfaces to clients as a JSON body with a human-readable
//! `error` and a stable `error_code`. Identity-resolution failures never
//! carry backend detail out to the client; that detail goes to the logs.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// API error type for HTTP handlers.
#[derive(Debug, PartialEq, Eq)]
pub enum ApiError {
    /// No usable session credential on the request.
    MissingCredentials,
    /// A credential was presented but did not resolve to a known member.
    Unauthenticated,
    /// Resolved user lacks the role required by the route.
    InsufficientRole,
    /// A backend collaborator failed.
    BackendUnavailable,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    error_code: String,
}

impl ApiError {
    /// Get the stable error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::MissingCredentials => "missing_credentials",
            ApiError::Unauthenticated => "unauthenticated",
            ApiError::InsufficientRole => "insufficient_role",
            ApiError::BackendUnavailable => "backend_unavailable",
        }
    }

    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MissingCredentials | ApiError::Unauthenticated => StatusCode::UNAUTHORIZED,
            ApiError::InsufficientRole => StatusCode::FORBIDDEN,
            ApiError::BackendUnavailable => StatusCode::BAD_GATEWAY,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::MissingCredentials => write!(f, "No session credential on request"),
            ApiError::Unauthenticated => write!(f, "Not signed in as a registered member"),
            ApiError::InsufficientRole => {
                write!(f, "Insufficient role for this operation")
            }
            ApiError::BackendUnavailable => write!(f, "Backend temporarily unavailable"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorBody {
            error: self.to_string(),
            error_code: self.error_code().to_string(),
        });
        (status, body).into_response()
    }
}
