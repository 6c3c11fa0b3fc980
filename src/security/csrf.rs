// ABOUTME: Per-session anti-forgery tokens for the delete form
// ABOUTME: Issues opaque session ids, stores one random token per session, validates in constant time
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Anti-forgery token store
//!
//! Each browser session gets one token, generated the first time the viewer
//! page is served to it. The token is embedded in every delete form and must
//! come back unchanged with the session cookie. Tokens are not rotated after
//! use; a session simply expires after the configured idle time.

use crate::errors::{AppError, AppResult};
use promptlog_core::constants::session;
use rand::Rng;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use subtle::ConstantTimeEq;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Token state for one session (the session id is the `HashMap` key)
#[derive(Clone)]
struct SessionEntry {
    token: String,
    last_seen: Instant,
}

impl SessionEntry {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.last_seen.elapsed() > ttl
    }
}

/// Session id and token to use for the current response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionHandle {
    /// Value for the session cookie
    pub session_id: String,
    /// Anti-forgery token to embed in forms
    pub token: String,
    /// Whether the session was created for this request and needs a cookie
    pub is_new: bool,
}

/// In-memory session token store shared by all requests
pub struct SessionTokenStore {
    sessions: Arc<RwLock<HashMap<String, SessionEntry>>>,
    ttl: Duration,
    max_sessions: usize,
}

impl SessionTokenStore {
    /// Create a store whose sessions expire after `ttl` without activity
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
            max_sessions: session::MAX_SESSIONS,
        }
    }

    /// Limit the number of live sessions (at least one is always kept)
    #[must_use]
    pub fn with_max_sessions(mut self, max_sessions: usize) -> Self {
        self.max_sessions = max_sessions.max(1);
        self
    }

    /// Idle expiry applied to every session
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Resolve the session presented by the browser, creating one if needed
    ///
    /// A known, unexpired session keeps its id and token. Unknown or expired
    /// ids are never adopted: a fresh random id is issued instead.
    pub async fn ensure_session(&self, presented: Option<&str>) -> SessionHandle {
        let mut sessions = self.sessions.write().await;

        if let Some(session_id) = presented {
            if let Some(entry) = sessions
                .get_mut(session_id)
                .filter(|entry| !entry.is_expired(self.ttl))
            {
                entry.last_seen = Instant::now();
                let token = entry.token.clone();
                drop(sessions);
                return SessionHandle {
                    session_id: session_id.to_owned(),
                    token,
                    is_new: false,
                };
            }
        }

        sessions.retain(|_, entry| !entry.is_expired(self.ttl));
        while sessions.len() >= self.max_sessions {
            let Some(oldest) = sessions
                .iter()
                .min_by_key(|(_, entry)| entry.last_seen)
                .map(|(id, _)| id.clone())
            else {
                break;
            };
            sessions.remove(&oldest);
            tracing::debug!("Evicted least recently seen viewer session");
        }

        let session_id = Uuid::new_v4().to_string();
        let token = generate_token();
        sessions.insert(
            session_id.clone(),
            SessionEntry {
                token: token.clone(),
                last_seen: Instant::now(),
            },
        );
        drop(sessions);

        tracing::debug!("Issued new viewer session");
        SessionHandle {
            session_id,
            token,
            is_new: true,
        }
    }

    /// Current token for a live session, if any
    pub async fn token_for(&self, session_id: &str) -> Option<String> {
        let sessions = self.sessions.read().await;
        sessions
            .get(session_id)
            .filter(|entry| !entry.is_expired(self.ttl))
            .map(|entry| entry.token.clone())
    }

    /// Check a submitted token against the session's token
    ///
    /// # Errors
    ///
    /// Returns `PermissionDenied` if:
    /// - No session cookie was sent, or the session is unknown or expired
    /// - No token was submitted
    /// - The submitted token does not match the session token
    pub async fn validate_token(
        &self,
        session_id: Option<&str>,
        submitted: Option<&str>,
    ) -> AppResult<()> {
        let session_id =
            session_id.ok_or_else(|| AppError::permission_denied("Missing session cookie"))?;
        let submitted = submitted
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::permission_denied("Missing anti-forgery token"))?;

        let mut sessions = self.sessions.write().await;
        let entry = sessions
            .get_mut(session_id)
            .filter(|entry| !entry.is_expired(self.ttl))
            .ok_or_else(|| AppError::permission_denied("Unknown or expired session"))?;

        if !bool::from(entry.token.as_bytes().ct_eq(submitted.as_bytes())) {
            return Err(AppError::permission_denied("Anti-forgery token mismatch"));
        }

        entry.last_seen = Instant::now();
        Ok(())
    }

    /// Number of sessions currently held, expired or not
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl Default for SessionTokenStore {
    fn default() -> Self {
        Self::new(Duration::from_secs(session::DEFAULT_TTL_SECS))
    }
}

/// 32 random bytes, hex encoded
fn generate_token() -> String {
    let random_bytes: Vec<u8> = (0..session::TOKEN_BYTES)
        .map(|_| rand::thread_rng().gen())
        .collect();
    hex::encode(random_bytes)
}
