// ABOUTME: Schema bootstrap for the responses table and its FTS5 shadow index
// ABOUTME: Used by the seeding tool and test fixtures; the viewer never alters a log database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Log database schema
//!
//! `responses_fts` is an external-content `FTS5` table over `responses`. The
//! triggers keep it in step with inserts, updates and deletes, matching the
//! layout LLM logging tools create for the same table names.

use crate::errors::AppResult;
use sqlx::SqlitePool;
use tracing::debug;

/// Statements executed in order by [`ensure_schema`]; each is idempotent
const SCHEMA_STATEMENTS: &[&str] = &[
    r"
    CREATE TABLE IF NOT EXISTS responses (
        id INTEGER PRIMARY KEY,
        model TEXT NOT NULL,
        prompt TEXT,
        response TEXT,
        datetime_utc TEXT NOT NULL
    )
    ",
    r"
    CREATE INDEX IF NOT EXISTS idx_responses_datetime_utc
        ON responses (datetime_utc)
    ",
    r"
    CREATE VIRTUAL TABLE IF NOT EXISTS responses_fts USING fts5(
        prompt,
        response,
        content = 'responses'
    )
    ",
    r"
    CREATE TRIGGER IF NOT EXISTS responses_ai AFTER INSERT ON responses BEGIN
        INSERT INTO responses_fts (rowid, prompt, response)
        VALUES (new.rowid, new.prompt, new.response);
    END
    ",
    r"
    CREATE TRIGGER IF NOT EXISTS responses_ad AFTER DELETE ON responses BEGIN
        INSERT INTO responses_fts (responses_fts, rowid, prompt, response)
        VALUES ('delete', old.rowid, old.prompt, old.response);
    END
    ",
    r"
    CREATE TRIGGER IF NOT EXISTS responses_au AFTER UPDATE ON responses BEGIN
        INSERT INTO responses_fts (responses_fts, rowid, prompt, response)
        VALUES ('delete', old.rowid, old.prompt, old.response);
        INSERT INTO responses_fts (rowid, prompt, response)
        VALUES (new.rowid, new.prompt, new.response);
    END
    ",
];

/// Create the `responses` table, its `FTS5` index and sync triggers if missing
///
/// # Errors
///
/// Returns an error if any statement fails, e.g. when `SQLite` was built without `FTS5`
pub async fn ensure_schema(pool: &SqlitePool) -> AppResult<()> {
    for statement in SCHEMA_STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }
    debug!("Log database schema verified");
    Ok(())
}
