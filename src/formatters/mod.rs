// ABOUTME: Presentation formatting that turns stored records into display-ready fragments
// ABOUTME: Timestamps, markdown HTML with highlighting, prompt summaries and escaped copies
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Record Presentation
//!
//! [`RecordFormatter`] is passed to the page handlers explicitly through the
//! shared server resources. Every string in a [`FormattedRecord`] is safe to
//! splice into HTML as-is.

/// Search-term highlighting on raw text
pub mod highlight;
/// Markdown to HTML conversion
pub mod markdown;

use crate::models::Record;
use chrono::{DateTime, NaiveDateTime, Utc};
use highlight::Highlighter;
use markdown::MarkdownRenderer;
use promptlog_core::constants::limits;

/// Display layout for record timestamps, e.g. `Jan 5, 2024 3:07 PM`
pub const DISPLAY_TIMESTAMP_FORMAT: &str = "%b %-d, %Y %-I:%M %p";

/// Naive layouts accepted for `datetime_utc`, tried in order
const NAIVE_TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
];

/// One record ready for the page assembler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedRecord {
    /// Store row id
    pub id: i64,
    /// Escaped model label
    pub model: String,
    /// Escaped human-readable timestamp
    pub timestamp: String,
    /// Escaped prompt prefix for the collapsed card
    pub summary: String,
    /// Prompt rendered from markdown, with highlights
    pub prompt_html: String,
    /// Response rendered from markdown, with highlights
    pub response_html: String,
    /// Escaped verbatim response for the copy button
    pub raw_response_escaped: String,
}

/// Converts records into [`FormattedRecord`]s
#[derive(Debug, Clone, Default)]
pub struct RecordFormatter {
    markdown: MarkdownRenderer,
}

impl RecordFormatter {
    /// Create a formatter around a markdown renderer
    #[must_use]
    pub const fn new(markdown: MarkdownRenderer) -> Self {
        Self { markdown }
    }

    /// Format one record, highlighting `search` when it is non-empty
    #[must_use]
    pub fn format(&self, record: &Record, search: Option<&str>) -> FormattedRecord {
        let highlighter = search.and_then(Highlighter::new);
        self.format_with(record, highlighter.as_ref())
    }

    /// Format a page of records, compiling the search term once
    #[must_use]
    pub fn format_all(&self, records: &[Record], search: Option<&str>) -> Vec<FormattedRecord> {
        let highlighter = search.and_then(Highlighter::new);
        records
            .iter()
            .map(|record| self.format_with(record, highlighter.as_ref()))
            .collect()
    }

    fn format_with(&self, record: &Record, highlighter: Option<&Highlighter>) -> FormattedRecord {
        let (prompt_html, response_html) = highlighter.map_or_else(
            || {
                (
                    self.markdown.render(&highlight::strip_markers(&record.prompt)),
                    self.markdown
                        .render(&highlight::strip_markers(&record.response)),
                )
            },
            |highlighter| {
                (
                    self.markdown.render(&highlighter.mark(&record.prompt)),
                    self.markdown.render(&highlighter.mark(&record.response)),
                )
            },
        );

        FormattedRecord {
            id: record.id,
            model: html_escape::encode_text(&record.model).into_owned(),
            timestamp: html_escape::encode_text(&format_timestamp(&record.created_at))
                .into_owned(),
            summary: summarize(&record.prompt),
            prompt_html,
            response_html,
            raw_response_escaped: html_escape::encode_text(&record.response).into_owned(),
        }
    }
}

/// Parse a stored `datetime_utc` value
///
/// Accepts RFC 3339 and naive ISO-8601 layouts; naive values are UTC.
#[must_use]
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    NAIVE_TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

/// Human-readable timestamp, falling back to the stored text when it does not parse
#[must_use]
pub fn format_timestamp(raw: &str) -> String {
    parse_timestamp(raw).map_or_else(
        || raw.to_owned(),
        |parsed| parsed.format(DISPLAY_TIMESTAMP_FORMAT).to_string(),
    )
}

/// First 50 characters of the prompt, escaped, with `...` when truncated
#[must_use]
pub fn summarize(prompt: &str) -> String {
    let mut chars = prompt.chars();
    let head: String = chars.by_ref().take(limits::SUMMARY_CHARS).collect();
    let mut summary = html_escape::encode_text(&head).into_owned();
    if chars.next().is_some() {
        summary.push_str(limits::SUMMARY_ELLIPSIS);
    }
    summary
}
