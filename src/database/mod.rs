// ABOUTME: Record store accessor over the SQLite log database
// ABOUTME: Runs the two fixed listing queries (recent, full-text matched) and deletes by id
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Record Store
//!
//! All SQL is parameterized, including the `FTS5` `MATCH` term: the search
//! text is bound as a value and the full-text engine parses it as its own
//! query syntax. A query that the engine rejects fails the whole call.

/// Schema bootstrap for seeding and tests
pub mod schema;

use crate::config::DatabaseUrl;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::models::{NewRecord, Record, SearchQuery};
use promptlog_core::constants::limits;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Row, SqlitePool};
use std::str::FromStr;
use std::time::Instant;
use tracing::{debug, error};

const RECENT_RECORDS_SQL: &str = r"
    SELECT rowid AS id, prompt, response, model, datetime_utc
    FROM responses
    ORDER BY datetime_utc DESC, rowid DESC
    LIMIT ?1
";

const MATCHING_RECORDS_SQL: &str = r"
    SELECT responses.rowid AS id, responses.prompt, responses.response,
           responses.model, responses.datetime_utc
    FROM responses
    JOIN responses_fts ON responses_fts.rowid = responses.rowid
    WHERE responses_fts MATCH ?1
    ORDER BY responses.datetime_utc DESC, responses.rowid DESC
    LIMIT ?2
";

/// Handle to the log database
#[derive(Clone, Debug)]
pub struct RecordStore {
    pool: SqlitePool,
}

impl RecordStore {
    /// Open an existing log database
    ///
    /// # Errors
    ///
    /// Returns an error if the file does not exist or cannot be opened
    pub async fn connect(url: &DatabaseUrl) -> AppResult<Self> {
        Self::open(url, false).await
    }

    /// Open a log database, creating the file and schema when missing
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be created or the schema fails
    pub async fn create(url: &DatabaseUrl) -> AppResult<Self> {
        let store = Self::open(url, true).await?;
        schema::ensure_schema(&store.pool).await?;
        Ok(store)
    }

    async fn open(url: &DatabaseUrl, create_if_missing: bool) -> AppResult<Self> {
        let options = match url {
            DatabaseUrl::SQLite { path } => SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(create_if_missing),
            DatabaseUrl::Memory => SqliteConnectOptions::from_str(&url.to_connection_string())?,
        };

        // Every in-memory connection is its own database, so keep exactly one alive
        let pool_options = if url.is_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(4)
        };

        let pool = pool_options.connect_with(options).await.map_err(|e| {
            error!(database = %url, error = %e, "Failed to open log database");
            AppError::database(format!("Failed to open {url}: {e}")).with_source(e)
        })?;

        debug!(database = %url, "Log database opened");
        Ok(Self { pool })
    }

    /// Underlying connection pool
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// List up to 60 records, newest first, optionally filtered by the full-text index
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails, including malformed full-text syntax;
    /// no partial result is ever returned
    pub async fn search(&self, query: &SearchQuery) -> AppResult<Vec<Record>> {
        let started = Instant::now();
        let rows = match query.term() {
            None => {
                sqlx::query(RECENT_RECORDS_SQL)
                    .bind(limits::MAX_RECORDS)
                    .fetch_all(&self.pool)
                    .await
            }
            Some(term) => {
                sqlx::query(MATCHING_RECORDS_SQL)
                    .bind(term)
                    .bind(limits::MAX_RECORDS)
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(|e| {
            error!(search = ?query.term(), error = %e, "Record query failed");
            AppError::database(format!("Failed to list records: {e}")).with_source(e)
        })?;

        let records = rows
            .iter()
            .map(Self::row_to_record)
            .collect::<AppResult<Vec<_>>>()?;

        AppLogger::log_database_operation(
            if query.is_empty() { "list_recent" } else { "list_matching" },
            records.len(),
            started.elapsed().as_millis(),
        );
        Ok(records)
    }

    /// Delete one record by id, returning the number of rows removed
    ///
    /// Callers must authorize the request first; this performs no checks.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete statement fails
    pub async fn delete(&self, id: i64) -> AppResult<u64> {
        let started = Instant::now();
        let result = sqlx::query("DELETE FROM responses WHERE rowid = ?1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(record_id = id, error = %e, "Record delete failed");
                AppError::database(format!("Failed to delete record {id}: {e}")).with_source(e)
            })?;

        let removed = result.rows_affected();
        AppLogger::log_database_operation(
            "delete",
            removed as usize,
            started.elapsed().as_millis(),
        );
        Ok(removed)
    }

    /// Insert a record and return its row id
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn insert(&self, record: &NewRecord) -> AppResult<i64> {
        let result = sqlx::query(
            r"
            INSERT INTO responses (model, prompt, response, datetime_utc)
            VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(&record.model)
        .bind(&record.prompt)
        .bind(&record.response)
        .bind(record.stored_timestamp())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to insert record: {e}")).with_source(e))?;

        Ok(result.last_insert_rowid())
    }

    /// Cheap liveness query used by the readiness probe
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot answer
    pub async fn ping(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    fn row_to_record(row: &SqliteRow) -> AppResult<Record> {
        Ok(Record {
            id: row.try_get("id")?,
            prompt: row.try_get::<Option<String>, _>("prompt")?.unwrap_or_default(),
            response: row
                .try_get::<Option<String>, _>("response")?
                .unwrap_or_default(),
            model: row.try_get::<Option<String>, _>("model")?.unwrap_or_default(),
            created_at: row
                .try_get::<Option<String>, _>("datetime_utc")?
                .unwrap_or_default(),
        })
    }
}
