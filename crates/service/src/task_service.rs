use std::sync::Arc;

use chatio_core::{MAX_QUERY_LIMIT, NewTask, Task, TaskFilter, TaskPatch};
use chatio_storage::TaskStore;

use crate::ServiceError;
use crate::error::parse_id;

pub struct TaskService {
    store: Arc<dyn TaskStore>,
}

impl TaskService {
    #[must_use]
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    pub async fn get(&self, id: &str) -> Result<Task, ServiceError> {
        let id = parse_id("task", id)?;
        self.store.get_task(&id).await?.ok_or_else(|| ServiceError::not_found("task", &id))
    }

    pub async fn list(&self, mut filter: TaskFilter) -> Result<Vec<Task>, ServiceError> {
        if let Some(message_id) = filter.message_id.take() {
            filter.message_id = Some(parse_id("message", &message_id)?);
        }
        Ok(self.store.list_tasks(&filter, MAX_QUERY_LIMIT).await?)
    }

    pub async fn create(&self, mut input: NewTask) -> Result<Task, ServiceError> {
        input.summary = input.summary.trim().to_owned();
        input.proposed_by = input.proposed_by.trim().to_owned();
        if input.summary.is_empty() || input.proposed_by.is_empty() {
            return Err(ServiceError::InvalidInput(
                "Missing required fields: action, summary, and proposed_by are required".to_owned(),
            ));
        }
        if let Some(message_id) = input.message_id.take() {
            input.message_id = Some(parse_id("message", &message_id)?);
        }
        let created = self.store.create_task(&input).await?;
        tracing::info!(
            task_id = %created.id,
            action = created.action.as_str(),
            status = created.status.as_str(),
            "task proposed"
        );
        Ok(created)
    }

    pub async fn update(&self, id: &str, mut patch: TaskPatch) -> Result<Task, ServiceError> {
        let id = parse_id("task", id)?;
        if patch.is_empty() {
            return Err(ServiceError::InvalidInput("No fields to update".to_owned()));
        }
        if let Some(Some(message_id)) = &patch.message_id {
            let normalized = parse_id("message", message_id)?;
            patch.message_id = Some(Some(normalized));
        }
        let updated =
            self.store.update_task(&id, &patch).await?.ok_or_else(|| ServiceError::not_found("task", &id))?;
        if let Some(status) = patch.status {
            tracing::info!(task_id = %id, status = status.as_str(), "task status changed");
        }
        Ok(updated)
    }

    /// Idempotent: deleting a missing task succeeds and returns `false`.
    pub async fn delete(&self, id: &str) -> Result<bool, ServiceError> {
        let id = parse_id("task", id)?;
        Ok(self.store.delete_task(&id).await?)
    }
}
