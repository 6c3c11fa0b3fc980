// ABOUTME: Cookie parsing and Set-Cookie construction for the viewer session
// ABOUTME: HttpOnly, SameSite=Strict session cookie, Secure when running in production
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use std::time::Duration;

/// Find a cookie value across every `Cookie` header of a request
#[must_use]
pub fn get_cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"').to_owned())
        .filter(|value| !value.is_empty())
}

/// `Set-Cookie` value for the session cookie
///
/// `SameSite=Strict`: browsers must not attach it to cross-site form posts.
#[must_use]
pub fn session_cookie(name: &str, session_id: &str, secure: bool, max_age: Duration) -> String {
    let mut cookie = format!(
        "{name}={session_id}; HttpOnly; SameSite=Strict; Path=/; Max-Age={}",
        max_age.as_secs()
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}
