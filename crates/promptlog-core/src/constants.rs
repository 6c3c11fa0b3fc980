// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Query limits, display sizes, session and network defaults for the viewer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants module
//!
//! Constants are grouped into small domain modules rather than one flat list.

/// Record listing limits
pub mod limits {
    /// Maximum number of records shown on one page, newest first
    pub const MAX_RECORDS: i64 = 60;
    /// Number of prompt characters kept in a card summary
    pub const SUMMARY_CHARS: usize = 50;
    /// Suffix appended to truncated summaries
    pub const SUMMARY_ELLIPSIS: &str = "...";
}

/// Session and anti-forgery settings
pub mod session {
    /// Cookie carrying the opaque session id
    pub const COOKIE_NAME: &str = "promptlog_session";
    /// Anti-forgery token length in bytes (32 bytes = 256 bits)
    pub const TOKEN_BYTES: usize = 32;
    /// Default idle lifetime of a session (12 hours)
    pub const DEFAULT_TTL_SECS: u64 = 12 * 60 * 60;
    /// Upper bound on live sessions; the least recently seen is evicted first
    pub const MAX_SESSIONS: usize = 10_000;
}

/// Network ports and hosts
pub mod network {
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8080;
    /// Default bind address
    pub const DEFAULT_HOST: &str = "127.0.0.1";
}

/// Service names for structured logging
pub mod service_names {
    /// Viewer server service name
    pub const PROMPTLOG_SERVER: &str = "promptlog-server";
}

/// Environment variable names read by the configuration layer
pub mod env_config {
    /// Database path or `sqlite:` URL
    pub const DATABASE: &str = "PROMPTLOG_DATABASE";
    /// Fallback database setting shared with other tooling
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// HTTP listen port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// Bind address
    pub const HOST: &str = "HOST";
    /// Idle session lifetime in seconds
    pub const SESSION_TTL_SECS: &str = "SESSION_TTL_SECS";
    /// Deployment environment (development, production, testing)
    pub const ENVIRONMENT: &str = "ENVIRONMENT";
}
