// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Byte Bash Blitz

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! at startup.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `8080` |
//! | `AUTH_BASE_URL` | Base URL of the hosted auth backend | Required |
//! | `REGISTRY_BASE_URL` | Base URL of the member-registry REST API | Required |
//! | `SERVICE_KEY` | API key sent to both backend collaborators | Required |
//! | `USER_CACHE_TTL_SECS` | Identity cache time-to-live in seconds | `60` |
//! | `USER_CACHE_CAPACITY` | Max cached identities | `1024` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |

use std::env;
use std::time::Duration;

/// Environment variable name for the auth backend base URL.
pub const AUTH_BASE_URL_ENV: &str = "AUTH_BASE_URL";

/// Environment variable name for the member-registry base URL.
pub const REGISTRY_BASE_URL_ENV: &str = "REGISTRY_BASE_URL";

/// Environment variable name for the backend service key.
pub const SERVICE_KEY_ENV: &str = "SERVICE_KEY";

/// Environment variable name for the identity cache TTL (seconds).
pub const USER_CACHE_TTL_ENV: &str = "USER_CACHE_TTL_SECS";

/// Environment variable name for the identity cache capacity.
pub const USER_CACHE_CAPACITY_ENV: &str = "USER_CACHE_CAPACITY";

/// Default identity cache TTL.
///
/// Deliberately short: the cache exists to absorb bursts of role lookups
/// within a single browsing session, while explicit invalidation covers
/// role-mutating actions. See `identity::cache`.
pub const DEFAULT_USER_CACHE_TTL: Duration = Duration::from_secs(60);

/// Default identity cache capacity (number of sessions).
pub const DEFAULT_USER_CACHE_CAPACITY: usize = 1024;

/// Runtime configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the hosted auth backend (session lookup, sign-out).
    pub auth_base_url: String,
    /// Base URL of the member-registry REST API.
    pub registry_base_url: String,
    /// API key sent to both backend collaborators.
    pub service_key: String,
    /// Identity cache time-to-live.
    pub cache_ttl: Duration,
    /// Identity cache capacity.
    pub cache_capacity: usize,
}

/// Configuration loading error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),
    #[error("invalid value for {var}: {value}")]
    InvalidVar { var: &'static str, value: String },
}

impl Config {
    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            auth_base_url: require(AUTH_BASE_URL_ENV)?,
            registry_base_url: require(REGISTRY_BASE_URL_ENV)?,
            service_key: require(SERVICE_KEY_ENV)?,
            cache_ttl: Duration::from_secs(parse_or(
                USER_CACHE_TTL_ENV,
                DEFAULT_USER_CACHE_TTL.as_secs(),
            )?),
            cache_capacity: parse_or(USER_CACHE_CAPACITY_ENV, DEFAULT_USER_CACHE_CAPACITY)?,
        })
    }
}

fn require(var: &'static str) -> Result<String, ConfigError> {
    match env::var(var) {
        Ok(v) if !v.is_empty() => Ok(v),
        _ => Err(ConfigError::MissingVar(var)),
    }
}

fn parse_or<T: std::str::FromStr>(var: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidVar {
            var,
            value: raw.clone(),
        }),
        Err(_) => Ok(default),
    }
}
