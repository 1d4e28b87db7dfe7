// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Byte Bash Blitz

//! Bashboard Identity Service - Leaderboard dashboard backend
//!
//! This crate resolves the acting user for the community leaderboard:
//! it maps a session credential to a role-annotated [`identity::Principal`],
//! caching the result briefly so role lookups do not hit the backend on
//! every page load and every tab switch.
//!
//! ## Modules
//!
//! - `api` - HTTP API handlers (Axum)
//! - `identity` - Current-user resolution, caching, and role predicates
//! - `backend` - HTTP clients for the auth and member-registry collaborators

pub mod api;
pub mod backend;
pub mod config;
pub mod error;
pub mod identity;
pub mod state;
