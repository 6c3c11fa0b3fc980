// ABOUTME: HTML page assembly for the viewer and its error page
// ABOUTME: Wraps formatted records in the page shell with search, copy and delete forms
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Page assembly
//!
//! Only pre-escaped fragments from [`FormattedRecord`] and attribute values
//! escaped here are ever spliced into the document.

use crate::formatters::FormattedRecord;
use crate::models::SearchQuery;
use axum::http::StatusCode;
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;

/// Page title shown in the browser tab
const PAGE_TITLE: &str = "Responses Viewer";

const STYLE: &str = r"
        body { font-family: -apple-system, BlinkMacSystemFont, sans-serif; max-width: 800px; margin: 2rem auto; padding: 0 1rem; }
        .search { display: flex; gap: 0.5rem; margin-bottom: 1rem; }
        .search input[type=text] { flex: 1; padding: 0.4rem 0.6rem; border: 1px solid #d1d5db; border-radius: 0.25rem; }
        .result-summary { color: #6b7280; margin-bottom: 1rem; }
        .response-card { border: 1px solid #e5e7eb; border-radius: 0.5rem; padding: 1rem; margin-bottom: 1rem; }
        .response-header { display: flex; justify-content: space-between; margin-bottom: 0.5rem; }
        .model { font-weight: 500; color: #3b82f6; }
        .datetime { color: #6b7280; }
        details summary { cursor: pointer; font-weight: 500; }
        .prompt-content { margin-top: 0.5rem; }
        .response-content { margin-top: 1rem; padding: 0.5rem; background: #f9fafb; border-radius: 0.25rem; overflow-x: auto; }
        .card-actions { display: flex; gap: 0.5rem; margin-top: 0.75rem; }
        .card-actions form { margin: 0; }
        .delete { color: #b91c1c; }
        mark { background: #fde68a; padding: 0 0.1em; }
        .empty { color: #6b7280; font-style: italic; }
";

const COPY_SCRIPT: &str = r"
        document.addEventListener('click', function (event) {
            var button = event.target.closest('[data-copy]');
            if (!button) { return; }
            var source = document.getElementById(button.getAttribute('data-copy'));
            if (!source || !navigator.clipboard) { return; }
            navigator.clipboard.writeText(source.value).then(function () {
                button.textContent = 'Copied';
                setTimeout(function () { button.textContent = 'Copy markdown'; }, 1500);
            });
        });
";

/// Per-request values the page shell needs
#[derive(Debug, Clone, Copy)]
pub struct PageContext<'a> {
    /// Current search filter
    pub search: &'a SearchQuery,
    /// Anti-forgery token for this session's delete forms
    pub csrf_token: &'a str,
}

/// Render the full viewer page
#[must_use]
pub fn render_page(context: &PageContext<'_>, records: &[FormattedRecord]) -> String {
    let mut html = String::with_capacity(4096 + records.len() * 2048);
    push_head(&mut html, PAGE_TITLE);

    html.push_str("    <h1>Responses</h1>\n");
    push_search_form(&mut html, context.search);
    push_result_summary(&mut html, context.search, records.len());

    if records.is_empty() {
        html.push_str("    <p class=\"empty\">No records to show.</p>\n");
    }
    for record in records {
        push_card(&mut html, record, context.csrf_token);
    }

    let _ = writeln!(html, "    <script>{COPY_SCRIPT}    </script>");
    html.push_str("</body>\n</html>\n");
    html
}

/// Render a standalone error page
#[must_use]
pub fn render_error_page(status: StatusCode, message: &str) -> String {
    let heading = format!(
        "{} {}",
        status.as_u16(),
        status.canonical_reason().unwrap_or("Error")
    );

    let mut html = String::with_capacity(1024);
    push_head(&mut html, &heading);
    let _ = writeln!(
        html,
        "    <h1>{}</h1>\n    <p>{}</p>\n    <p><a href=\"/\">Back to responses</a></p>\n</body>\n</html>",
        encode_text(&heading),
        encode_text(message)
    );
    html
}

fn push_head(html: &mut String, title: &str) {
    let _ = writeln!(
        html,
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n    <meta charset=\"UTF-8\">\n    \
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n    \
         <title>{}</title>\n    <style>{STYLE}    </style>\n</head>\n<body>",
        encode_text(title)
    );
}

fn push_search_form(html: &mut String, search: &SearchQuery) {
    let _ = writeln!(
        html,
        "    <form class=\"search\" method=\"get\" action=\"/\">\n        \
         <input type=\"text\" name=\"q\" value=\"{}\" placeholder=\"Search prompts and responses\">\n        \
         <button type=\"submit\">Search</button>\n    </form>",
        encode_double_quoted_attribute(search.term().unwrap_or_default())
    );
}

fn push_result_summary(html: &mut String, search: &SearchQuery, count: usize) {
    let noun = if count == 1 { "record" } else { "records" };
    match search.term() {
        Some(term) => {
            let _ = writeln!(
                html,
                "    <p class=\"result-summary\">{count} {noun} matching \u{201c}{}\u{201d} \
                 (<a href=\"/\">clear</a>)</p>",
                encode_text(term)
            );
        }
        None => {
            let _ = writeln!(
                html,
                "    <p class=\"result-summary\">{count} most recent {noun}</p>"
            );
        }
    }
}

fn push_card(html: &mut String, record: &FormattedRecord, csrf_token: &str) {
    let id = record.id;
    let _ = writeln!(
        html,
        r#"    <div class="response-card" id="record-{id}">
        <div class="response-header">
            <span class="model">{model}</span>
            <span class="datetime">{timestamp}</span>
        </div>
        <details>
            <summary>{summary}</summary>
            <div class="prompt-content">{prompt}</div>
            <div class="response-content">{response}</div>
        </details>
        <div class="card-actions">
            <button type="button" data-copy="raw-{id}">Copy markdown</button>
            <textarea id="raw-{id}" hidden readonly>
{raw}</textarea>
            <form method="post" action="/">
                <input type="hidden" name="delete" value="1">
                <input type="hidden" name="id" value="{id}">
                <input type="hidden" name="csrf_token" value="{token}">
                <button type="submit" class="delete">Delete</button>
            </form>
        </div>
    </div>"#,
        model = record.model,
        timestamp = record.timestamp,
        summary = record.summary,
        prompt = record.prompt_html,
        response = record.response_html,
        raw = record.raw_response_escaped,
        token = encode_double_quoted_attribute(csrf_token),
    );
}
