// ABOUTME: Error handling for the viewer, re-exporting the core error types
// ABOUTME: Renders application errors as standalone HTML error pages for browsers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Errors surfaced to the browser
//!
//! The viewer is read by humans, so failures are answered with a small HTML
//! page instead of the viewer rather than a JSON envelope. A failed request
//! never produces a partial listing.

pub use promptlog_core::errors::{AppError, AppResult, ErrorCode};

use crate::pages;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

/// An [`AppError`] that renders as an HTML error page
#[derive(Debug)]
pub struct HtmlError(pub AppError);

impl From<AppError> for HtmlError {
    fn from(error: AppError) -> Self {
        Self(error)
    }
}

impl IntoResponse for HtmlError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Html(pages::render_error_page(status, &self.0.to_string()))).into_response()
    }
}
