//! PostgreSQL storage backend using sqlx.
//!
//! Split into modular files by domain concern. The schema (including the
//! pgvector `embedding` column and the optional `match_messages` function) is
//! owned by the hosted database; nothing here creates tables.

#![allow(clippy::absolute_paths, reason = "std paths in error handling are clear")]

mod conversations;
mod embeddings;
mod health;
mod search;
mod tasks;

use chatio_core::{
    Conversation, ConversationType, MessageRecord, PG_POOL_ACQUIRE_TIMEOUT_SECS,
    PG_POOL_IDLE_TIMEOUT_SECS, PG_POOL_MAX_CONNECTIONS, Task, TaskAction, TaskStatus,
};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};

use crate::error::StorageError;

type Result<T> = std::result::Result<T, StorageError>;

pub(crate) const MESSAGE_COLUMNS: &str =
    "id::text AS id, conversation_id::text AS conversation_id, author_id::text AS author_id, \
     content, created_at";

pub(crate) const CONVERSATION_COLUMNS: &str =
    "id::text AS id, name, type, avatar_url, created_at";

pub(crate) const TASK_COLUMNS: &str =
    "id::text AS id, message_id::text AS message_id, task_id, action, summary, details, \
     status, proposed_by, created_at";

#[derive(Clone, Debug)]
pub struct PgStorage {
    pool: PgPool,
}

impl PgStorage {
    pub async fn new(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(PG_POOL_MAX_CONNECTIONS)
            .acquire_timeout(std::time::Duration::from_secs(PG_POOL_ACQUIRE_TIMEOUT_SECS))
            .idle_timeout(std::time::Duration::from_secs(PG_POOL_IDLE_TIMEOUT_SECS))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;
        tracing::info!("PgStorage initialized");
        Ok(Self { pool })
    }
}

/// Convert `usize` to `i64` for SQL LIMIT binds.
/// Saturates to `i64::MAX` on overflow (only possible on 128-bit targets).
pub(crate) fn usize_to_i64(val: usize) -> i64 {
    i64::try_from(val).unwrap_or(i64::MAX)
}

/// Render a vector in pgvector's text input form, e.g. `[0.1,0.2]`.
pub(crate) fn vector_literal(embedding: &[f64]) -> String {
    let parts: Vec<String> = embedding.iter().map(f64::to_string).collect();
    format!("[{}]", parts.join(","))
}

/// Parse a text enum column; an unknown value is data corruption.
pub(crate) fn parse_column<T>(column: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.parse::<T>().map_err(|e| StorageError::corrupt(format!("{column} {raw:?}"), e))
}

pub(crate) fn row_to_message(row: &PgRow) -> Result<MessageRecord> {
    Ok(MessageRecord {
        id: row.try_get("id")?,
        conversation_id: row.try_get("conversation_id")?,
        author_id: row.try_get("author_id")?,
        content: row.try_get("content")?,
        created_at: row.try_get("created_at")?,
    })
}

pub(crate) fn row_to_conversation(row: &PgRow) -> Result<Conversation> {
    let type_str: String = row.try_get("type")?;
    let conversation_type = parse_column::<ConversationType>("conversation type", &type_str)?;
    Ok(Conversation {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        conversation_type,
        avatar_url: row.try_get("avatar_url")?,
        created_at: row.try_get("created_at")?,
    })
}

pub(crate) fn row_to_task(row: &PgRow) -> Result<Task> {
    let action_str: String = row.try_get("action")?;
    let action = parse_column::<TaskAction>("task action", &action_str)?;
    let status_str: String = row.try_get("status")?;
    let status = parse_column::<TaskStatus>("task status", &status_str)?;
    Ok(Task {
        id: row.try_get("id")?,
        message_id: row.try_get("message_id")?,
        task_id: row.try_get("task_id")?,
        action,
        summary: row.try_get("summary")?,
        details: row.try_get("details")?,
        status,
        proposed_by: row.try_get("proposed_by")?,
        created_at: row.try_get("created_at")?,
    })
}
