//! Integration tests for PgStorage.
//! Run with: DATABASE_URL=... cargo test -p chatio-storage -- --ignored pg_

#![allow(clippy::unwrap_used, reason = "integration test code")]

use chatio_core::{
    ConversationPatch, ConversationType, NewConversation, NewTask, TaskAction, TaskFilter,
    TaskPatch, TaskStatus,
};
use chatio_storage::traits::{ConversationStore, EmbeddingStore, HealthStore, MessageSearchStore, TaskStore};
use chatio_storage::{PgStorage, StorageError};
use uuid::Uuid;

async fn create_pg_storage() -> PgStorage {
    let url = std::env::var("DATABASE_URL")
        .expect("DATABASE_URL must be set for PgStorage integration tests");
    PgStorage::new(&url).await.expect("Failed to connect to PostgreSQL")
}

fn unique_name(prefix: &str) -> String {
    format!("{prefix}-{}", Uuid::new_v4())
}

// ── Health ───────────────────────────────────────────────────────

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn pg_ping() {
    let storage = create_pg_storage().await;
    storage.ping().await.unwrap();
}

// ── Conversations ────────────────────────────────────────────────

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn pg_conversation_crud() {
    let storage = create_pg_storage().await;
    let name = unique_name("conv");
    let created = storage
        .create_conversation(&NewConversation {
            name: name.clone(),
            conversation_type: ConversationType::Channel,
            avatar_url: Some("https://example.com/a.png".to_owned()),
        })
        .await
        .unwrap();
    assert_eq!(created.name, name);
    assert!(created.created_at.is_some());

    let fetched = storage.get_conversation(&created.id).await.unwrap().unwrap();
    assert_eq!(fetched, created);

    let patch = ConversationPatch {
        conversation_type: Some(ConversationType::Person),
        avatar_url: Some(None),
        ..Default::default()
    };
    let updated = storage.update_conversation(&created.id, &patch).await.unwrap().unwrap();
    assert_eq!(updated.conversation_type, ConversationType::Person);
    assert_eq!(updated.avatar_url, None);
    assert_eq!(updated.name, name);

    let people = storage.list_conversations(Some(ConversationType::Person), 1000).await.unwrap();
    assert!(people.iter().any(|c| c.id == created.id));
    assert!(people.iter().all(|c| c.conversation_type == ConversationType::Person));

    assert!(storage.delete_conversation(&created.id).await.unwrap());
    assert!(!storage.delete_conversation(&created.id).await.unwrap());
    assert!(storage.get_conversation(&created.id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn pg_update_missing_conversation_returns_none() {
    let storage = create_pg_storage().await;
    let patch = ConversationPatch { name: Some("x".to_owned()), ..Default::default() };
    let result =
        storage.update_conversation(&Uuid::new_v4().to_string(), &patch).await.unwrap();
    assert!(result.is_none());
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn pg_malformed_uuid_is_invalid_input() {
    let storage = create_pg_storage().await;
    let err = storage.get_conversation("not-a-uuid").await.unwrap_err();
    assert!(matches!(err, StorageError::InvalidInput(_)), "got {err:?}");
}

// ── Tasks ────────────────────────────────────────────────────────

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn pg_task_crud_and_filters() {
    let storage = create_pg_storage().await;
    let proposer = unique_name("agent");
    let created = storage
        .create_task(&NewTask {
            message_id: None,
            task_id: Some("TRK-1".to_owned()),
            action: TaskAction::Create,
            summary: "Write release notes".to_owned(),
            details: None,
            status: TaskStatus::Pending,
            proposed_by: proposer.clone(),
        })
        .await
        .unwrap();
    assert_eq!(created.status, TaskStatus::Pending);

    let filter = TaskFilter { proposed_by: Some(proposer.clone()), ..Default::default() };
    let listed = storage.list_tasks(&filter, 100).await.unwrap();
    assert_eq!(listed.len(), 1);

    let patch = TaskPatch { status: Some(TaskStatus::Confirmed), ..Default::default() };
    let updated = storage.update_task(&created.id, &patch).await.unwrap().unwrap();
    assert_eq!(updated.status, TaskStatus::Confirmed);

    let pending = TaskFilter {
        status: Some(TaskStatus::Pending),
        proposed_by: Some(proposer),
        message_id: None,
    };
    assert!(storage.list_tasks(&pending, 100).await.unwrap().is_empty());

    assert!(storage.delete_task(&created.id).await.unwrap());
}

// ── Messages / embeddings ────────────────────────────────────────

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn pg_embedding_stats_are_consistent() {
    let storage = create_pg_storage().await;
    let stats = storage.embedding_stats().await.unwrap();
    assert_eq!(stats.total, stats.with_embeddings + stats.without_embeddings);
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn pg_fetch_embedded_messages_normalize() {
    let storage = create_pg_storage().await;
    let candidates = storage.fetch_embedded_messages(5).await.unwrap();
    assert!(candidates.len() <= 5);
    for candidate in candidates {
        assert!(candidate.embedding.normalize().is_ok());
    }
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn pg_store_embedding_for_missing_message() {
    let storage = create_pg_storage().await;
    let err = storage.store_embedding(&Uuid::new_v4().to_string(), &[0.1, 0.2]).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound { entity: "message", .. }));
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn pg_probe_match_function() {
    let storage = create_pg_storage().await;
    // Either answer is valid; the probe itself must not fail.
    storage.has_match_function().await.unwrap();
}
