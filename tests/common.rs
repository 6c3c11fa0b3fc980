// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory record stores, seeded scenarios and ready-made server resources
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `promptlog`

use anyhow::Result;
use chrono::{DateTime, Duration as ChronoDuration, TimeZone, Utc};
use promptlog::{
    config::{DatabaseUrl, Environment, ServerConfig},
    database::RecordStore,
    models::NewRecord,
    resources::ServerResources,
    server,
};
use std::sync::{Arc, Once};
use std::time::Duration;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        // Check for TEST_LOG environment variable to control test logging level
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        let _ = tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .try_init();
    });
}

/// Empty in-memory store with the full schema
pub async fn create_test_store() -> Result<RecordStore> {
    init_test_logging();
    Ok(RecordStore::create(&DatabaseUrl::Memory).await?)
}

/// Fixed reference time so ordering assertions are deterministic
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).single().unwrap()
}

/// Insert records 1..=5, one hour apart, oldest first
///
/// Records 3 and 5 mention "kernel" in the prompt; the others never use the word.
pub async fn seed_kernel_scenario(store: &RecordStore) -> Result<Vec<i64>> {
    let samples = [
        ("How do I bake sourdough bread?", "Feed the starter first.", "gpt-4o-mini"),
        ("Summarize the French revolution", "It began in 1789.", "gpt-4o"),
        ("Why does the kernel panic on boot?", "Check the initramfs.", "llama3.2"),
        ("Write a haiku about autumn", "Leaves drift on cold wind", "claude-3-5-haiku"),
        ("Explain kernel modules and **dkms**", "Modules extend the running system.", "gpt-4o"),
    ];

    let mut ids = Vec::with_capacity(samples.len());
    for (offset, (prompt, response, model)) in (0_i64..).zip(samples) {
        let record =
            NewRecord::new(prompt, response, model).at(base_time() + ChronoDuration::hours(offset));
        ids.push(store.insert(&record).await?);
    }
    Ok(ids)
}

/// Configuration suitable for in-process tests
pub fn test_config() -> ServerConfig {
    ServerConfig {
        database: DatabaseUrl::Memory,
        host: "127.0.0.1".to_owned(),
        http_port: 0,
        session_ttl: Duration::from_secs(3600),
        environment: Environment::Testing,
    }
}

/// Shared resources around a store
pub fn create_test_resources(store: RecordStore) -> Arc<ServerResources> {
    Arc::new(ServerResources::new(store, test_config()))
}

/// Seeded store plus resources, ready for `server::router`
pub async fn create_seeded_resources() -> Result<Arc<ServerResources>> {
    let store = create_test_store().await?;
    seed_kernel_scenario(&store).await?;
    Ok(create_test_resources(store))
}

/// Full application router over the given resources
pub fn test_app(resources: &Arc<ServerResources>) -> axum::Router {
    server::router(Arc::clone(resources))
}
