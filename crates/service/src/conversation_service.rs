use std::sync::Arc;

use chatio_core::{
    Conversation, ConversationPatch, ConversationType, MAX_QUERY_LIMIT, NewConversation,
};
use chatio_storage::ConversationStore;

use crate::ServiceError;
use crate::error::parse_id;

pub struct ConversationService {
    store: Arc<dyn ConversationStore>,
}

impl ConversationService {
    #[must_use]
    pub fn new(store: Arc<dyn ConversationStore>) -> Self {
        Self { store }
    }

    pub async fn get(&self, id: &str) -> Result<Conversation, ServiceError> {
        let id = parse_id("conversation", id)?;
        self.store
            .get_conversation(&id)
            .await?
            .ok_or_else(|| ServiceError::not_found("conversation", &id))
    }

    pub async fn list(
        &self,
        kind: Option<ConversationType>,
    ) -> Result<Vec<Conversation>, ServiceError> {
        Ok(self.store.list_conversations(kind, MAX_QUERY_LIMIT).await?)
    }

    pub async fn create(&self, mut input: NewConversation) -> Result<Conversation, ServiceError> {
        input.name = input.name.trim().to_owned();
        if input.name.is_empty() {
            return Err(ServiceError::InvalidInput(
                "Missing required fields: name and type are required".to_owned(),
            ));
        }
        let created = self.store.create_conversation(&input).await?;
        tracing::info!(conversation_id = %created.id, kind = %created.conversation_type, "conversation created");
        Ok(created)
    }

    pub async fn update(
        &self,
        id: &str,
        patch: ConversationPatch,
    ) -> Result<Conversation, ServiceError> {
        let id = parse_id("conversation", id)?;
        if patch.is_empty() {
            return Err(ServiceError::InvalidInput("No fields to update".to_owned()));
        }
        if patch.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
            return Err(ServiceError::InvalidInput("name must not be empty".to_owned()));
        }
        self.store
            .update_conversation(&id, &patch)
            .await?
            .ok_or_else(|| ServiceError::not_found("conversation", &id))
    }

    /// Idempotent: deleting a missing conversation succeeds and returns `false`.
    pub async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        let id = parse_id("conversation", id)?;
        let deleted = self.store.delete_conversation(&id).await?;
        tracing::info!(conversation_id = %id, deleted, "conversation delete");
        Ok(deleted)
    }
}
