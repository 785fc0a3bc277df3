use async_trait::async_trait;
use chatio_core::{NewTask, Task, TaskFilter, TaskPatch};

use crate::error::StorageError;

/// Task proposal CRUD.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn get_task(&self, id: &str) -> Result<Option<Task>, StorageError>;

    /// List tasks newest first, filtered by equality on the set filter fields.
    async fn list_tasks(&self, filter: &TaskFilter, limit: usize)
    -> Result<Vec<Task>, StorageError>;

    async fn create_task(&self, input: &NewTask) -> Result<Task, StorageError>;

    /// Apply a patch. Returns `None` if no task has this id.
    async fn update_task(&self, id: &str, patch: &TaskPatch)
    -> Result<Option<Task>, StorageError>;

    /// Delete task. Returns `true` if a row was deleted.
    async fn delete_task(&self, id: &str) -> Result<bool, StorageError>;
}
