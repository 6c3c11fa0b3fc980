// ABOUTME: Case-insensitive literal search-term highlighting for raw markdown text
// ABOUTME: Wraps every match in private-use marker characters that survive markdown parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Search-term highlighting
//!
//! Highlighting runs on the raw markdown, before conversion. Matches are
//! wrapped in two Unicode private-use characters rather than HTML so the
//! markdown renderer can turn them into `<mark>` elements while escaping the
//! stored text itself.

use regex::{Regex, RegexBuilder};
use std::borrow::Cow;

/// Opens a highlighted span in raw text
pub const MARK_OPEN: char = '\u{E000}';
/// Closes a highlighted span in raw text
pub const MARK_CLOSE: char = '\u{E001}';

/// Remove marker characters, e.g. from stored text or link destinations
#[must_use]
pub fn strip_markers(text: &str) -> Cow<'_, str> {
    if text.contains([MARK_OPEN, MARK_CLOSE]) {
        Cow::Owned(text.replace([MARK_OPEN, MARK_CLOSE], ""))
    } else {
        Cow::Borrowed(text)
    }
}

/// Compiled matcher for one search term
#[derive(Debug, Clone)]
pub struct Highlighter {
    pattern: Regex,
}

impl Highlighter {
    /// Build a matcher for the literal `term`
    ///
    /// Returns `None` for terms that are empty once marker characters are
    /// removed. Regex metacharacters in the term are matched literally.
    #[must_use]
    pub fn new(term: &str) -> Option<Self> {
        let term = strip_markers(term);
        if term.is_empty() {
            return None;
        }

        RegexBuilder::new(&regex::escape(&term))
            .case_insensitive(true)
            .build()
            .ok()
            .map(|pattern| Self { pattern })
    }

    /// Wrap every case-insensitive occurrence of the term in marker characters
    ///
    /// Marker characters already present in `text` are dropped first, so the
    /// output only contains markers this call inserted.
    #[must_use]
    pub fn mark(&self, text: &str) -> String {
        let clean = strip_markers(text);
        self.pattern
            .replace_all(&clean, |caps: &regex::Captures<'_>| {
                format!("{MARK_OPEN}{}{MARK_CLOSE}", &caps[0])
            })
            .into_owned()
    }
}
