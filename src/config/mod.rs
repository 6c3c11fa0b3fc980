// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Groups environment parsing and database location handling
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! - **environment**: `ServerConfig` from environment variables and CLI overrides
//! - **database**: `DatabaseUrl` parsing for the record store

/// Database location parsing
pub mod database;
/// Environment and server configuration
pub mod environment;

pub use database::DatabaseUrl;
pub use environment::{ConfigOverrides, Environment, ServerConfig};
