// ABOUTME: Database location type for the SQLite record store
// ABOUTME: Parses file paths and sqlite: URLs, including the in-memory form used by tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Path to `SQLite` database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from a plain path or a `sqlite:` URL
    ///
    /// # Errors
    ///
    /// Returns an error if the value is empty or names a non-`SQLite` scheme
    pub fn parse_url(s: &str) -> AppResult<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AppError::config_invalid("Database location is empty"));
        }

        if let Some(rest) = s.strip_prefix("sqlite:") {
            let path_str = rest.strip_prefix("//").unwrap_or(rest);
            return match path_str {
                ":memory:" | "" => Ok(Self::Memory),
                path => Ok(Self::SQLite {
                    path: PathBuf::from(path),
                }),
            };
        }

        if s.contains("://") {
            return Err(AppError::config_invalid(format!(
                "Unsupported database URL '{s}': only SQLite paths are supported"
            )));
        }

        Ok(Self::SQLite {
            path: PathBuf::from(s),
        })
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".into(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub const fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

impl Display for DatabaseUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.to_connection_string())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_path_is_sqlite_file() {
        let url = DatabaseUrl::parse_url("/var/lib/llm/logs.db").unwrap();
        assert_eq!(
            url,
            DatabaseUrl::SQLite {
                path: PathBuf::from("/var/lib/llm/logs.db")
            }
        );
    }

    #[test]
    fn test_sqlite_scheme_variants() {
        assert_eq!(
            DatabaseUrl::parse_url("sqlite://logs.db").unwrap(),
            DatabaseUrl::SQLite {
                path: PathBuf::from("logs.db")
            }
        );
        assert_eq!(
            DatabaseUrl::parse_url("sqlite:./data/logs.db").unwrap(),
            DatabaseUrl::SQLite {
                path: PathBuf::from("./data/logs.db")
            }
        );
        assert!(DatabaseUrl::parse_url("sqlite::memory:").unwrap().is_memory());
    }

    #[test]
    fn test_rejects_other_schemes_and_blank_values() {
        assert!(DatabaseUrl::parse_url("postgres://localhost/logs").is_err());
        assert!(DatabaseUrl::parse_url("   ").is_err());
    }

    #[test]
    fn test_connection_string_round_trip() {
        let url = DatabaseUrl::parse_url("logs.db").unwrap();
        assert_eq!(url.to_connection_string(), "sqlite:logs.db");
        assert_eq!(DatabaseUrl::Memory.to_string(), "sqlite::memory:");
    }
}
