// ABOUTME: Security module for the viewer's browser sessions
// ABOUTME: Session cookies plus the per-session anti-forgery tokens guarding deletes
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

/// Session cookie parsing and construction
pub mod cookies;
/// Per-session anti-forgery token store
pub mod csrf;

pub use cookies::{get_cookie_value, session_cookie};
pub use csrf::{SessionHandle, SessionTokenStore};
