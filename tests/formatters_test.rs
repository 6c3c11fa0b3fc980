// ABOUTME: Integration tests for the formatters module
// ABOUTME: Tests summaries, escaping, copy payloads and search-term highlighting through markdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(missing_docs)]

use promptlog::formatters::{format_timestamp, summarize, RecordFormatter};
use promptlog::models::Record;

fn record(prompt: &str, response: &str) -> Record {
    Record {
        id: 7,
        prompt: prompt.to_owned(),
        response: response.to_owned(),
        model: "gpt-4o-mini".to_owned(),
        created_at: "2024-01-05T15:07:00".to_owned(),
    }
}

#[test]
fn test_summary_truncates_after_fifty_characters() {
    let exactly_fifty = "a".repeat(50);
    assert_eq!(summarize(&exactly_fifty), exactly_fifty);

    let fifty_one = "b".repeat(51);
    assert_eq!(summarize(&fifty_one), format!("{}...", "b".repeat(50)));

    assert_eq!(summarize(""), "");
}

#[test]
fn test_summary_is_escaped() {
    assert_eq!(summarize("<b>bold</b> & more"), "&lt;b&gt;bold&lt;/b&gt; &amp; more");
}

#[test]
fn test_copy_payload_unescapes_to_original() {
    let originals = [
        "plain text",
        "<script>alert('x')</script>",
        "a & b &amp; c &lt; d",
        "\nleading newline and trailing\n\n",
        "```rust\nfn main() { println!(\"<>\"); }\n```",
        "unicode: héllo ✓ 日本",
    ];
    let formatter = RecordFormatter::default();

    for original in originals {
        let formatted = formatter.format(&record("p", original), None);
        assert!(!formatted.raw_response_escaped.contains('<'));
        assert_eq!(
            html_escape::decode_html_entities(&formatted.raw_response_escaped),
            original
        );
    }
}

#[test]
fn test_highlight_wraps_term_in_rendered_markdown() {
    let formatter = RecordFormatter::default();
    let formatted = formatter.format(
        &record("Why does the kernel panic?", "A **Kernel** panic halts the system."),
        Some("kernel"),
    );

    assert_eq!(
        formatted.prompt_html,
        "<p>Why does the <mark>kernel</mark> panic?</p>\n"
    );
    assert!(formatted
        .response_html
        .contains("<strong><mark>Kernel</mark></strong>"));
    // Summaries and copy payloads stay unmarked
    assert!(!formatted.summary.contains("mark"));
    assert!(!formatted.raw_response_escaped.contains("mark"));
}

#[test]
fn test_highlight_spanning_emphasis_is_well_nested() {
    let formatter = RecordFormatter::default();
    let formatted = formatter.format(&record("x **kernel** panic", "r"), Some("kernel** panic"));

    assert_eq!(
        formatted.prompt_html,
        "<p>x <strong><mark>kernel</mark></strong><mark> panic</mark></p>\n"
    );
}

#[test]
fn test_highlight_term_is_literal() {
    let formatter = RecordFormatter::default();
    let formatted = formatter.format(&record("cost is $5.00 or 5x00", "r"), Some("5.00"));

    assert!(formatted.prompt_html.contains("$<mark>5.00</mark>"));
    assert!(formatted.prompt_html.contains("5x00"));
    assert_eq!(formatted.prompt_html.matches("<mark>").count(), 1);
}

#[test]
fn test_no_highlight_without_search() {
    let formatter = RecordFormatter::default();
    for search in [None, Some("")] {
        let formatted = formatter.format(&record("kernel", "kernel"), search);
        assert!(!formatted.prompt_html.contains("<mark>"));
        assert!(!formatted.response_html.contains("<mark>"));
    }
}

#[test]
fn test_embedded_html_is_not_executed() {
    let formatter = RecordFormatter::default();
    let formatted = formatter.format(
        &record("<img src=x onerror=alert(1)>", "<script>alert('x')</script>"),
        Some("alert"),
    );

    assert!(!formatted.prompt_html.contains("<img"));
    assert!(!formatted.response_html.contains("<script>"));
    assert!(formatted.response_html.contains("&lt;script&gt;"));
    assert!(formatted.response_html.contains("<mark>alert</mark>"));
}

#[test]
fn test_markdown_extensions_are_enabled() {
    let formatter = RecordFormatter::default();
    let formatted = formatter.format(
        &record("p", "| a | b |\n|---|---|\n| 1 | 2 |\n\n~~old~~\n\n- [x] done\n"),
        None,
    );

    assert!(formatted.response_html.contains("<table>"));
    assert!(formatted.response_html.contains("<del>old</del>"));
    assert!(formatted.response_html.contains("type=\"checkbox\""));
}

#[test]
fn test_model_and_timestamp_fields() {
    let formatter = RecordFormatter::default();
    let mut input = record("p", "r");
    input.model = "<model>".to_owned();
    let formatted = formatter.format(&input, None);

    assert_eq!(formatted.id, 7);
    assert_eq!(formatted.model, "&lt;model&gt;");
    assert_eq!(formatted.timestamp, "Jan 5, 2024 3:07 PM");
    assert_eq!(format_timestamp("not a date"), "not a date");
}
