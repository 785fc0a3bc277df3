//! In-memory fakes shared by the service tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chatio_core::{
    Conversation, ConversationPatch, ConversationType, Embedding, EmbeddingStats, MessageRecord,
    NewConversation, NewTask, PendingEmbedding, SearchHit, Task, TaskFilter, TaskPatch,
};
use chatio_embeddings::{EmbeddingError, EmbeddingProvider};
use chatio_llm::{Enhancement, LlmError, SearchEnhancer};
use chatio_search::{SearchError, SearchStrategy, StrategyKind, StrategyOutcome};
use chatio_storage::{ConversationStore, EmbeddingStore, StorageError, TaskStore};

pub fn hit(id: &str, similarity: f64) -> SearchHit {
    SearchHit::new(
        MessageRecord {
            id: id.to_owned(),
            conversation_id: "c1".to_owned(),
            author_id: "u1".to_owned(),
            content: format!("content of {id}"),
            created_at: None,
        },
        similarity,
    )
}

/// Returns a fixed vector for any non-blank input.
pub struct FakeEmbeddings {
    vector: Embedding,
    dimensions: usize,
}

impl FakeEmbeddings {
    pub fn new(vector: Embedding) -> Self {
        Self { dimensions: vector.len(), vector }
    }

    /// Report a width that differs from the vectors actually returned.
    pub fn claiming_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = dimensions;
        self
    }
}

#[async_trait]
impl EmbeddingProvider for FakeEmbeddings {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbeddingError> {
        if text.trim().is_empty() {
            return Err(EmbeddingError::EmptyInput);
        }
        Ok(self.vector.clone())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

/// Returns a canned outcome and records the threshold and limit it was called with.
pub struct FakeStrategy {
    outcome: StrategyOutcome,
    args: Mutex<Option<(f64, usize)>>,
}

impl FakeStrategy {
    pub fn returning(outcome: StrategyOutcome) -> Self {
        Self { outcome, args: Mutex::new(None) }
    }

    pub fn last_args(&self) -> Option<(f64, usize)> {
        *self.args.lock().unwrap()
    }
}

#[async_trait]
impl SearchStrategy for FakeStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::InProcessRanked
    }

    async fn search(
        &self,
        _query: &[f64],
        threshold: f64,
        limit: usize,
    ) -> Result<StrategyOutcome, SearchError> {
        *self.args.lock().unwrap() = Some((threshold, limit));
        let mut outcome = self.outcome.clone();
        outcome.hits.truncate(limit);
        Ok(outcome)
    }
}

pub struct FakeEnhancer {
    summary: Option<String>,
}

impl FakeEnhancer {
    /// Reverses the hits and attaches `summary`.
    pub fn reversing(summary: &str) -> Self {
        Self { summary: Some(summary.to_owned()) }
    }

    /// Always fails with an empty LLM response.
    pub fn failing() -> Self {
        Self { summary: None }
    }
}

#[async_trait]
impl SearchEnhancer for FakeEnhancer {
    async fn enhance(&self, _query: &str, hits: &[SearchHit]) -> Result<Enhancement, LlmError> {
        let Some(summary) = &self.summary else {
            return Err(LlmError::EmptyResponse);
        };
        let mut results = hits.to_vec();
        results.reverse();
        Ok(Enhancement { results, summary: Some(summary.clone()) })
    }
}

#[derive(Default)]
struct Tables {
    conversations: Vec<Conversation>,
    tasks: Vec<Task>,
    /// (id, content, embedding)
    messages: Vec<(String, String, Option<Vec<f64>>)>,
}

/// Conversation, task and embedding store backed by vectors.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    calls: AtomicUsize,
}

impl MemoryStore {
    pub fn with_pending(contents: &[&str]) -> Self {
        let store = Self::default();
        store.tables.lock().unwrap().messages = contents
            .iter()
            .map(|c| (uuid::Uuid::new_v4().to_string(), (*c).to_owned(), None))
            .collect();
        store
    }

    /// Number of store calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn touch(&self) -> std::sync::MutexGuard<'_, Tables> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.tables.lock().unwrap()
    }
}

#[async_trait]
impl ConversationStore for MemoryStore {
    async fn get_conversation(&self, id: &str) -> Result<Option<Conversation>, StorageError> {
        Ok(self.touch().conversations.iter().find(|c| c.id == id).cloned())
    }

    async fn list_conversations(
        &self,
        kind: Option<ConversationType>,
        limit: usize,
    ) -> Result<Vec<Conversation>, StorageError> {
        Ok(self
            .touch()
            .conversations
            .iter()
            .rev()
            .filter(|c| kind.is_none_or(|k| c.conversation_type == k))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn create_conversation(
        &self,
        input: &NewConversation,
    ) -> Result<Conversation, StorageError> {
        let conversation = Conversation {
            id: uuid::Uuid::new_v4().to_string(),
            name: input.name.clone(),
            conversation_type: input.conversation_type,
            avatar_url: input.avatar_url.clone(),
            created_at: None,
        };
        self.touch().conversations.push(conversation.clone());
        Ok(conversation)
    }

    async fn update_conversation(
        &self,
        id: &str,
        patch: &ConversationPatch,
    ) -> Result<Option<Conversation>, StorageError> {
        let mut tables = self.touch();
        let Some(conversation) = tables.conversations.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        if let Some(name) = &patch.name {
            conversation.name.clone_from(name);
        }
        if let Some(kind) = patch.conversation_type {
            conversation.conversation_type = kind;
        }
        if let Some(avatar_url) = &patch.avatar_url {
            conversation.avatar_url.clone_from(avatar_url);
        }
        Ok(Some(conversation.clone()))
    }

    async fn delete_conversation(&self, id: &str) -> Result<bool, StorageError> {
        let mut tables = self.touch();
        let before = tables.conversations.len();
        tables.conversations.retain(|c| c.id != id);
        Ok(tables.conversations.len() != before)
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn get_task(&self, id: &str) -> Result<Option<Task>, StorageError> {
        Ok(self.touch().tasks.iter().find(|t| t.id == id).cloned())
    }

    async fn list_tasks(&self, filter: &TaskFilter, limit: usize) -> Result<Vec<Task>, StorageError> {
        Ok(self
            .touch()
            .tasks
            .iter()
            .rev()
            .filter(|t| filter.status.is_none_or(|s| t.status == s))
            .filter(|t| filter.proposed_by.as_ref().is_none_or(|p| &t.proposed_by == p))
            .filter(|t| filter.message_id.is_none() || t.message_id == filter.message_id)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn create_task(&self, input: &NewTask) -> Result<Task, StorageError> {
        let task = Task {
            id: uuid::Uuid::new_v4().to_string(),
            message_id: input.message_id.clone(),
            task_id: input.task_id.clone(),
            action: input.action,
            summary: input.summary.clone(),
            details: input.details.clone(),
            status: input.status,
            proposed_by: input.proposed_by.clone(),
            created_at: None,
        };
        self.touch().tasks.push(task.clone());
        Ok(task)
    }

    async fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<Option<Task>, StorageError> {
        let mut tables = self.touch();
        let Some(task) = tables.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(None);
        };
        if let Some(message_id) = &patch.message_id {
            task.message_id.clone_from(message_id);
        }
        if let Some(task_id) = &patch.task_id {
            task.task_id.clone_from(task_id);
        }
        if let Some(action) = patch.action {
            task.action = action;
        }
        if let Some(summary) = &patch.summary {
            task.summary.clone_from(summary);
        }
        if let Some(details) = &patch.details {
            task.details.clone_from(details);
        }
        if let Some(status) = patch.status {
            task.status = status;
        }
        if let Some(proposed_by) = &patch.proposed_by {
            task.proposed_by.clone_from(proposed_by);
        }
        Ok(Some(task.clone()))
    }

    async fn delete_task(&self, id: &str) -> Result<bool, StorageError> {
        let mut tables = self.touch();
        let before = tables.tasks.len();
        tables.tasks.retain(|t| t.id != id);
        Ok(tables.tasks.len() != before)
    }
}

#[async_trait]
impl EmbeddingStore for MemoryStore {
    async fn embedding_stats(&self) -> Result<EmbeddingStats, StorageError> {
        let tables = self.touch();
        let total = tables.messages.len() as u64;
        let with_embeddings = tables.messages.iter().filter(|m| m.2.is_some()).count() as u64;
        Ok(EmbeddingStats { total, with_embeddings, without_embeddings: total - with_embeddings })
    }

    async fn messages_without_embeddings(
        &self,
        limit: usize,
    ) -> Result<Vec<PendingEmbedding>, StorageError> {
        Ok(self
            .touch()
            .messages
            .iter()
            .filter(|m| m.2.is_none())
            .take(limit)
            .map(|(id, content, _)| PendingEmbedding { id: id.clone(), content: content.clone() })
            .collect())
    }

    async fn store_embedding(&self, message_id: &str, embedding: &[f64]) -> Result<(), StorageError> {
        let mut tables = self.touch();
        let message = tables.messages.iter_mut().find(|m| m.0 == message_id).ok_or_else(|| {
            StorageError::NotFound { entity: "message", id: message_id.to_owned() }
        })?;
        message.2 = Some(embedding.to_vec());
        Ok(())
    }
}
