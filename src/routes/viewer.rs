// ABOUTME: Viewer routes serving the record listing and handling deletes
// ABOUTME: GET / renders the page for the current search; POST / deletes one record behind the session token
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Viewer Routes
//!
//! Both routes share the session cookie. `GET /` issues a session and token on
//! first visit; `POST /` only mutates the store after the submitted token has
//! been checked against that session.

use crate::constants::session;
use crate::errors::{AppError, HtmlError};
use crate::logging::AppLogger;
use crate::models::SearchQuery;
use crate::pages::{self, PageContext};
use crate::resources::ServerResources;
use crate::security::{get_cookie_value, session_cookie};
use axum::{
    extract::{Form, Query, State},
    http::{
        header::{CACHE_CONTROL, SET_COOKIE},
        HeaderMap, HeaderValue,
    },
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Query string of `GET /`
#[derive(Debug, Default, Deserialize)]
pub struct ViewerQuery {
    /// Free-text search term
    pub q: Option<String>,
}

/// Form body of `POST /`
#[derive(Debug, Default, Deserialize)]
pub struct DeleteForm {
    /// Present when the form asks for a delete
    pub delete: Option<String>,
    /// Row id of the record to delete
    pub id: Option<String>,
    /// Anti-forgery token issued with the page
    pub csrf_token: Option<String>,
}

/// Viewer routes
pub struct ViewerRoutes;

impl ViewerRoutes {
    /// Create the viewer routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/", get(Self::handle_index).post(Self::handle_delete))
            .with_state(resources)
    }

    /// Render the newest records, or those matching `q`
    async fn handle_index(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        query: Option<Query<ViewerQuery>>,
    ) -> Result<Response, HtmlError> {
        let raw_term = query.and_then(|Query(params)| params.q);
        let search = SearchQuery::from_raw(raw_term.as_deref());

        // A failed search must not leave behind a session no cookie points to
        let records = resources.store.search(&search).await?;

        let presented = get_cookie_value(&headers, session::COOKIE_NAME);
        let session = resources.sessions.ensure_session(presented.as_deref()).await;

        let formatted = resources.formatter.format_all(&records, search.term());

        debug!(
            search = ?search.term(),
            records = formatted.len(),
            "Rendering viewer page"
        );

        let context = PageContext {
            search: &search,
            csrf_token: &session.token,
        };
        let mut response = Html(pages::render_page(&context, &formatted)).into_response();

        let response_headers = response.headers_mut();
        response_headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-store"));
        if session.is_new {
            let cookie = session_cookie(
                session::COOKIE_NAME,
                &session.session_id,
                resources.config.environment.is_production(),
                resources.sessions.ttl(),
            );
            let value = HeaderValue::from_str(&cookie)
                .map_err(|e| AppError::internal(format!("Invalid session cookie: {e}")))?;
            response_headers.insert(SET_COOKIE, value);
        }

        Ok(response)
    }

    /// Delete one record, then send the browser back to the listing
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        form: Option<Form<DeleteForm>>,
    ) -> Result<Response, HtmlError> {
        let form = form.map(|Form(form)| form).unwrap_or_default();

        if form.delete.is_none() {
            debug!("POST without delete flag, nothing to do");
            return Ok(Redirect::to("/").into_response());
        }

        let session_id = get_cookie_value(&headers, session::COOKIE_NAME);
        if let Err(e) = resources
            .sessions
            .validate_token(session_id.as_deref(), form.csrf_token.as_deref())
            .await
        {
            AppLogger::log_security_event("delete_rejected", &e.message, session_id.as_deref());
            return Err(e.into());
        }

        let id = Self::parse_id(form.id.as_deref())?;
        let removed = resources.store.delete(id).await?;

        if removed == 0 {
            warn!(record_id = id, "Delete requested for a record that does not exist");
        } else {
            info!(record_id = id, "Record deleted");
        }

        Ok(Redirect::to("/").into_response())
    }

    fn parse_id(raw: Option<&str>) -> Result<i64, AppError> {
        let raw = raw
            .map(str::trim)
            .filter(|raw| !raw.is_empty())
            .ok_or_else(|| AppError::missing_field("id"))?;

        raw.parse::<i64>()
            .map_err(|_| AppError::invalid_input(format!("Invalid record id: {raw}")))
    }
}
