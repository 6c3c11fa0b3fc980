// ABOUTME: Record model for the logged prompt/response pairs
// ABOUTME: Read-side record plus the insert payload used by seeding tools
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp layout written to `datetime_utc` (naive ISO-8601, always UTC)
pub const STORED_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// One stored prompt/response exchange
///
/// Records are immutable once written; the only mutation the viewer performs
/// is deleting a record by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Store-assigned row id
    pub id: i64,
    /// Prompt text (markdown)
    pub prompt: String,
    /// Response text (markdown)
    pub response: String,
    /// Short model label, e.g. `gpt-4o-mini`
    pub model: String,
    /// Raw `datetime_utc` column value
    pub created_at: String,
}

/// Payload for inserting a new record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRecord {
    /// Prompt text (markdown)
    pub prompt: String,
    /// Response text (markdown)
    pub response: String,
    /// Short model label
    pub model: String,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

impl NewRecord {
    /// Create a record stamped with the current time
    #[must_use]
    pub fn new(
        prompt: impl Into<String>,
        response: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            response: response.into(),
            model: model.into(),
            created_at: Utc::now(),
        }
    }

    /// Override the creation time
    #[must_use]
    pub const fn at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Creation time in the stored `datetime_utc` layout
    #[must_use]
    pub fn stored_timestamp(&self) -> String {
        self.created_at.format(STORED_TIMESTAMP_FORMAT).to_string()
    }
}

/// Optional full-text filter taken from the request
///
/// Missing, empty and whitespace-only input all mean "no filter"; the term is
/// otherwise kept verbatim (after trimming) and handed to the store as query
/// syntax.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    term: Option<String>,
}

impl SearchQuery {
    /// Build a query from raw request input
    #[must_use]
    pub fn from_raw(raw: Option<&str>) -> Self {
        let term = raw
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(ToOwned::to_owned);
        Self { term }
    }

    /// The active search term, if any
    #[must_use]
    pub fn term(&self) -> Option<&str> {
        self.term.as_deref()
    }

    /// Whether the query filters anything
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.term.is_none()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_stored_timestamp_layout() {
        let created_at = Utc.with_ymd_and_hms(2024, 1, 5, 15, 7, 9).single().unwrap();
        let record = NewRecord::new("p", "r", "m").at(created_at);
        assert_eq!(record.stored_timestamp(), "2024-01-05T15:07:09.000000");
    }

    #[test]
    fn test_blank_search_input_means_no_filter() {
        assert!(SearchQuery::from_raw(None).is_empty());
        assert!(SearchQuery::from_raw(Some("")).is_empty());
        assert!(SearchQuery::from_raw(Some("   \t")).is_empty());
        assert_eq!(SearchQuery::from_raw(Some("  kernel ")).term(), Some("kernel"));
    }
}
