//! TaskStore implementation for PgStorage.

use super::*;

use crate::traits::TaskStore;
use async_trait::async_trait;
use chatio_core::{NewTask, TaskFilter, TaskPatch};
use sqlx::{Postgres, QueryBuilder};

#[async_trait]
impl TaskStore for PgStorage {
    async fn get_task(&self, id: &str) -> Result<Option<Task>> {
        let sql = format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = $1::uuid");
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        row.as_ref().map(row_to_task).transpose()
    }

    async fn list_tasks(&self, filter: &TaskFilter, limit: usize) -> Result<Vec<Task>> {
        let mut qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new(format!("SELECT {TASK_COLUMNS} FROM tasks WHERE TRUE"));
        if let Some(status) = filter.status {
            qb.push(" AND status = ").push_bind(status.as_str());
        }
        if let Some(proposed_by) = &filter.proposed_by {
            qb.push(" AND proposed_by = ").push_bind(proposed_by.clone());
        }
        if let Some(message_id) = &filter.message_id {
            qb.push(" AND message_id = ").push_bind(message_id.clone()).push("::uuid");
        }
        qb.push(" ORDER BY created_at DESC LIMIT ").push_bind(usize_to_i64(limit));
        let rows = qb.build().fetch_all(&self.pool).await?;
        rows.iter().map(row_to_task).collect()
    }

    async fn create_task(&self, input: &NewTask) -> Result<Task> {
        let id = uuid::Uuid::new_v4();
        let sql = format!(
            "INSERT INTO tasks (id, message_id, task_id, action, summary, details, status, proposed_by)
             VALUES ($1, $2::uuid, $3, $4, $5, $6, $7, $8)
             RETURNING {TASK_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(&input.message_id)
            .bind(&input.task_id)
            .bind(input.action.as_str())
            .bind(&input.summary)
            .bind(&input.details)
            .bind(input.status.as_str())
            .bind(&input.proposed_by)
            .fetch_one(&self.pool)
            .await?;
        tracing::debug!(task_id = %id, action = input.action.as_str(), "task created");
        row_to_task(&row)
    }

    async fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<Option<Task>> {
        if patch.is_empty() {
            return Err(StorageError::InvalidInput("empty task patch".to_owned()));
        }
        let mut qb: QueryBuilder<'_, Postgres> = QueryBuilder::new("UPDATE tasks SET ");
        {
            let mut set = qb.separated(", ");
            if let Some(message_id) = &patch.message_id {
                set.push("message_id = ")
                    .push_bind_unseparated(message_id.clone())
                    .push_unseparated("::uuid");
            }
            if let Some(task_id) = &patch.task_id {
                set.push("task_id = ").push_bind_unseparated(task_id.clone());
            }
            if let Some(action) = patch.action {
                set.push("action = ").push_bind_unseparated(action.as_str());
            }
            if let Some(summary) = &patch.summary {
                set.push("summary = ").push_bind_unseparated(summary.clone());
            }
            if let Some(details) = &patch.details {
                set.push("details = ").push_bind_unseparated(details.clone());
            }
            if let Some(status) = patch.status {
                set.push("status = ").push_bind_unseparated(status.as_str());
            }
            if let Some(proposed_by) = &patch.proposed_by {
                set.push("proposed_by = ").push_bind_unseparated(proposed_by.clone());
            }
        }
        qb.push(" WHERE id = ").push_bind(id.to_owned()).push("::uuid");
        qb.push(format!(" RETURNING {TASK_COLUMNS}"));
        let row = qb.build().fetch_optional(&self.pool).await?;
        row.as_ref().map(row_to_task).transpose()
    }

    async fn delete_task(&self, id: &str) -> Result<bool> {
        let result =
            sqlx::query("DELETE FROM tasks WHERE id = $1::uuid").bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}
