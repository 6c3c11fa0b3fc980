// ABOUTME: Main library entry point for the promptlog viewer
// ABOUTME: Serves a searchable, deletable list of logged LLM prompts and responses
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Promptlog
//!
//! A single-page web viewer for a local `SQLite` log of LLM interactions.
//! It lists the newest records, filters them through the store's `FTS5`
//! index, renders stored markdown as HTML with the search term highlighted,
//! and lets a browser session delete records behind an anti-forgery token.
//!
//! ## Architecture
//!
//! - **database**: `RecordStore`, the only code that talks to `SQLite`
//! - **formatters**: turns a `Record` into display-ready HTML fragments
//! - **pages**: assembles formatted records into the page shell
//! - **security**: session cookies and per-session anti-forgery tokens
//! - **routes**: axum handlers for the viewer and health probes
//! - **server**: router assembly, middleware and the listener loop
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use promptlog::config::environment::ServerConfig;
//! use promptlog::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Promptlog configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Configuration loaded from environment variables and CLI overrides
pub mod config;

/// Record store accessor backed by `SQLite` and `FTS5`
pub mod database;

/// Error types re-exported from the core crate plus HTML error responses
pub mod errors;

/// Presentation formatting: markdown, highlighting, summaries, timestamps
pub mod formatters;

/// Structured logging setup
pub mod logging;

/// HTML page assembly
pub mod pages;

/// Shared state handed to every route
pub mod resources;

/// HTTP routes
pub mod routes;

/// Session cookies and anti-forgery tokens
pub mod security;

/// Router assembly and server lifecycle
pub mod server;

pub use promptlog_core::constants;
pub use promptlog_core::models;
