// ABOUTME: Shared server resources handed to every route as axum state
// ABOUTME: Bundles the record store, session token store, formatter and configuration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::config::ServerConfig;
use crate::database::RecordStore;
use crate::formatters::RecordFormatter;
use crate::security::SessionTokenStore;
use std::sync::Arc;

/// Everything a request handler needs, created once at startup
///
/// Cloning is cheap: the store wraps a connection pool and the rest is shared
/// through `Arc`.
#[derive(Clone)]
pub struct ServerResources {
    /// Log database accessor
    pub store: RecordStore,
    /// Per-session anti-forgery tokens
    pub sessions: Arc<SessionTokenStore>,
    /// Record presentation
    pub formatter: Arc<RecordFormatter>,
    /// Effective configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Build resources around an opened store
    #[must_use]
    pub fn new(store: RecordStore, config: ServerConfig) -> Self {
        Self {
            store,
            sessions: Arc::new(SessionTokenStore::new(config.session_ttl)),
            formatter: Arc::new(RecordFormatter::default()),
            config: Arc::new(config),
        }
    }
}
