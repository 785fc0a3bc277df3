use async_trait::async_trait;
use chatio_core::{Conversation, ConversationPatch, ConversationType, NewConversation};

use crate::error::StorageError;

/// Conversation CRUD.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    async fn get_conversation(&self, id: &str) -> Result<Option<Conversation>, StorageError>;

    /// List conversations newest first, optionally filtered by type.
    async fn list_conversations(
        &self,
        kind: Option<ConversationType>,
        limit: usize,
    ) -> Result<Vec<Conversation>, StorageError>;

    async fn create_conversation(
        &self,
        input: &NewConversation,
    ) -> Result<Conversation, StorageError>;

    /// Apply a patch. Returns `None` if no conversation has this id.
    async fn update_conversation(
        &self,
        id: &str,
        patch: &ConversationPatch,
    ) -> Result<Option<Conversation>, StorageError>;

    /// Delete conversation. Returns `true` if a row was deleted.
    async fn delete_conversation(&self, id: &str) -> Result<bool, StorageError>;
}
