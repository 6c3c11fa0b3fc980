// ABOUTME: Route module organization for the promptlog HTTP endpoints
// ABOUTME: Viewer page and delete handler plus health probes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Health check and readiness routes
pub mod health;
/// Record listing, search and delete routes
pub mod viewer;

/// Health check route handlers
pub use health::HealthRoutes;
/// Viewer route handlers
pub use viewer::ViewerRoutes;
