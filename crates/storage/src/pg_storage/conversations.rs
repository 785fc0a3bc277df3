//! ConversationStore implementation for PgStorage.

use super::*;

use crate::traits::ConversationStore;
use async_trait::async_trait;
use chatio_core::{ConversationPatch, NewConversation};
use sqlx::{Postgres, QueryBuilder};

#[async_trait]
impl ConversationStore for PgStorage {
    async fn get_conversation(&self, id: &str) -> Result<Option<Conversation>> {
        let sql = format!("SELECT {CONVERSATION_COLUMNS} FROM conversations WHERE id = $1::uuid");
        let row = sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await?;
        row.as_ref().map(row_to_conversation).transpose()
    }

    async fn list_conversations(
        &self,
        kind: Option<ConversationType>,
        limit: usize,
    ) -> Result<Vec<Conversation>> {
        let mut qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new(format!("SELECT {CONVERSATION_COLUMNS} FROM conversations"));
        if let Some(kind) = kind {
            qb.push(" WHERE type = ").push_bind(kind.as_str());
        }
        qb.push(" ORDER BY created_at DESC LIMIT ").push_bind(usize_to_i64(limit));
        let rows = qb.build().fetch_all(&self.pool).await?;
        rows.iter().map(row_to_conversation).collect()
    }

    async fn create_conversation(&self, input: &NewConversation) -> Result<Conversation> {
        let id = uuid::Uuid::new_v4();
        let sql = format!(
            "INSERT INTO conversations (id, name, type, avatar_url)
             VALUES ($1, $2, $3, $4)
             RETURNING {CONVERSATION_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(id)
            .bind(&input.name)
            .bind(input.conversation_type.as_str())
            .bind(&input.avatar_url)
            .fetch_one(&self.pool)
            .await?;
        tracing::debug!(conversation_id = %id, "conversation created");
        row_to_conversation(&row)
    }

    async fn update_conversation(
        &self,
        id: &str,
        patch: &ConversationPatch,
    ) -> Result<Option<Conversation>> {
        if patch.is_empty() {
            return Err(StorageError::InvalidInput("empty conversation patch".to_owned()));
        }
        let mut qb: QueryBuilder<'_, Postgres> = QueryBuilder::new("UPDATE conversations SET ");
        {
            let mut set = qb.separated(", ");
            if let Some(name) = &patch.name {
                set.push("name = ").push_bind_unseparated(name.clone());
            }
            if let Some(kind) = patch.conversation_type {
                set.push("type = ").push_bind_unseparated(kind.as_str());
            }
            if let Some(avatar_url) = &patch.avatar_url {
                set.push("avatar_url = ").push_bind_unseparated(avatar_url.clone());
            }
        }
        qb.push(" WHERE id = ").push_bind(id.to_owned()).push("::uuid");
        qb.push(format!(" RETURNING {CONVERSATION_COLUMNS}"));
        let row = qb.build().fetch_optional(&self.pool).await?;
        row.as_ref().map(row_to_conversation).transpose()
    }

    async fn delete_conversation(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM conversations WHERE id = $1::uuid")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
