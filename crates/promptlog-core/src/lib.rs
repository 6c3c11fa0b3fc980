// ABOUTME: Core types and constants for the promptlog viewer
// ABOUTME: Foundation crate with error handling, the record model, and constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Promptlog Core
//!
//! Foundation crate providing shared types and constants for the promptlog
//! viewer. It changes rarely, which keeps incremental builds of the server
//! crate cheap.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Application-wide constants organized by domain
//! - **models**: The stored `Record`, the `NewRecord` insert payload and `SearchQuery`

/// Unified error handling system with standard error codes
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Core data models
pub mod models;
