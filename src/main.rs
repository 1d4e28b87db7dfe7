// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Byte Bash Blitz

mod api;
mod backend;
mod config;
mod error;
mod identity;
mod state;

use std::{env, net::SocketAddr, sync::Arc};

use tracing::info;
use tracing_subscriber::EnvFilter;

use api::router;
use backend::{HttpAuthProvider, HttpMemberRegistry};
use config::Config;
use identity::{IdentityCache, IdentityResolver};
use state::AppState;

#[tokio::main]
async fn main() {
    init_tracing();

    let config = Config::from_env().expect("Invalid configuration");

    let auth = HttpAuthProvider::new(config.auth_base_url.as_str(), config.service_key.as_str())
        .expect("Failed to build auth backend client");
    let registry =
        HttpMemberRegistry::new(config.registry_base_url.as_str(), config.service_key.as_str())
            .expect("Failed to build registry client");
    let cache = IdentityCache::new(config.cache_capacity, config.cache_ttl);

    let resolver = IdentityResolver::new(Arc::new(auth), Arc::new(registry), cache);
    let app = router(AppState::new(resolver));

    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse()
        .unwrap_or(8080);

    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .expect("Failed to parse bind address");

    info!(%addr, ttl_secs = config.cache_ttl.as_secs(), "identity service listening (docs at /docs)");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind listener");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server failed");
}

/// Structured logging: `pretty` for terminals, `json` when LOG_FORMAT=json.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    if env::var("LOG_FORMAT").as_deref() == Ok("json") {
        tracing_subscriber::fmt().with_env_filter(filter).json().init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    info!("shutting down");
}
