// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Reads environment variables, applies CLI overrides, and validates the result
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management
//!
//! The database location has no default: a viewer pointed at the wrong file
//! is worse than one that refuses to start.

use super::database::DatabaseUrl;
use crate::constants::{env_config, network, session};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use tracing::info;

/// Environment type for cookie security and logging defaults
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Deployed behind HTTPS
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Values supplied on the command line; each one beats its environment variable
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// Database path or `sqlite:` URL
    pub database: Option<String>,
    /// Bind address
    pub host: Option<String>,
    /// HTTP listen port
    pub http_port: Option<u16>,
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Record store location
    pub database: DatabaseUrl,
    /// Bind address
    pub host: String,
    /// HTTP listen port
    pub http_port: u16,
    /// Idle lifetime of a browser session and its anti-forgery token
    pub session_ttl: Duration,
    /// Deployment environment
    pub environment: Environment,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if the database location is missing or any value is malformed
    pub fn from_env() -> AppResult<Self> {
        Self::load(&ConfigOverrides::default())
    }

    /// Load configuration from environment variables, then apply CLI overrides
    ///
    /// # Errors
    ///
    /// Returns an error if the database location is missing or any value is malformed
    pub fn load(overrides: &ConfigOverrides) -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let database_raw = overrides
            .database
            .clone()
            .or_else(|| non_empty_var(env_config::DATABASE))
            .or_else(|| non_empty_var(env_config::DATABASE_URL))
            .ok_or_else(|| {
                AppError::config_missing(format!(
                    "Set {} (or {}) or pass --database with the path to the log database",
                    env_config::DATABASE,
                    env_config::DATABASE_URL
                ))
            })?;

        let http_port = match overrides.http_port {
            Some(port) => port,
            None => parse_var(env_config::HTTP_PORT, network::DEFAULT_HTTP_PORT)?,
        };

        let host = overrides
            .host
            .clone()
            .or_else(|| non_empty_var(env_config::HOST))
            .unwrap_or_else(|| network::DEFAULT_HOST.to_owned());

        let session_ttl_secs = parse_var(env_config::SESSION_TTL_SECS, session::DEFAULT_TTL_SECS)?;
        if session_ttl_secs == 0 {
            return Err(AppError::config_invalid(format!(
                "{} must be greater than zero",
                env_config::SESSION_TTL_SECS
            )));
        }

        Ok(Self {
            database: DatabaseUrl::parse_url(&database_raw)?,
            host,
            http_port,
            session_ttl: Duration::from_secs(session_ttl_secs),
            environment: Environment::from_str_or_default(
                &env::var(env_config::ENVIRONMENT).unwrap_or_default(),
            ),
        })
    }

    /// Socket address string the server binds to
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    /// Get a summary of the configuration for logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Promptlog Configuration:\n\
             - Bind Address: {}\n\
             - Database: {}\n\
             - Session TTL: {}s\n\
             - Environment: {}",
            self.bind_address(),
            self.database,
            self.session_ttl.as_secs(),
            self.environment,
        )
    }
}

/// Read an environment variable, treating blank values as unset
fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Parse an environment variable, falling back to `default` when unset
fn parse_var<T>(key: &str, default: T) -> AppResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    non_empty_var(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse()
            .map_err(|e| AppError::config_invalid(format!("Invalid {key} value '{raw}': {e}")))
    })
}
