//! Request/query types (Deserialize)
//!
//! Enum-valued fields arrive as strings and are parsed in `into_*` so that a bad
//! value is a 400 with a readable message instead of an extractor rejection.

use chatio_core::{
    ConversationPatch, ConversationType, DEFAULT_BACKFILL_BATCH_SIZE, DEFAULT_BACKFILL_LIMIT,
    MAX_QUERY_LIMIT, NewConversation, NewTask, TaskAction, TaskFilter, TaskPatch, TaskStatus,
};
use serde::{Deserialize, Deserializer};

use crate::api_error::ApiError;

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_opt<T: std::str::FromStr<Err = chatio_core::CoreError>>(
    value: Option<&str>,
) -> Result<Option<T>, ApiError> {
    value.map(str::parse).transpose().map_err(ApiError::from)
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: Option<String>,
    pub limit: Option<usize>,
    pub threshold: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ConversationQuery {
    pub id: Option<String>,
    #[serde(rename = "type")]
    pub conversation_type: Option<String>,
}

impl ConversationQuery {
    pub fn kind(&self) -> Result<Option<ConversationType>, ApiError> {
        parse_opt(self.conversation_type.as_deref())
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateConversationRequest {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub conversation_type: Option<String>,
    pub avatar_url: Option<String>,
}

impl CreateConversationRequest {
    pub fn into_new(self) -> Result<NewConversation, ApiError> {
        let (Some(name), Some(kind)) = (required(self.name), self.conversation_type) else {
            return Err(ApiError::BadRequest(
                "Missing required fields: name and type are required".to_owned(),
            ));
        };
        Ok(NewConversation {
            name,
            conversation_type: kind.parse()?,
            avatar_url: self.avatar_url,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateConversationRequest {
    pub id: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub conversation_type: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub avatar_url: Option<Option<String>>,
}

impl UpdateConversationRequest {
    /// Split into the target id and the patch.
    pub fn into_patch(self) -> Result<(String, ConversationPatch), ApiError> {
        let id = required(self.id)
            .ok_or_else(|| ApiError::BadRequest("Conversation id is required".to_owned()))?;
        let patch = ConversationPatch {
            name: self.name,
            conversation_type: parse_opt(self.conversation_type.as_deref())?,
            avatar_url: self.avatar_url,
        };
        Ok((id, patch))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TaskQuery {
    pub id: Option<String>,
    pub status: Option<String>,
    pub proposed_by: Option<String>,
    pub message_id: Option<String>,
}

impl TaskQuery {
    pub fn filter(&self) -> Result<TaskFilter, ApiError> {
        Ok(TaskFilter {
            status: parse_opt(self.status.as_deref())?,
            proposed_by: self.proposed_by.clone(),
            message_id: self.message_id.clone(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub message_id: Option<String>,
    pub task_id: Option<String>,
    pub action: Option<String>,
    pub summary: Option<String>,
    pub details: Option<String>,
    pub status: Option<String>,
    pub proposed_by: Option<String>,
}

impl CreateTaskRequest {
    pub fn into_new(self) -> Result<NewTask, ApiError> {
        let (Some(action), Some(summary), Some(proposed_by)) =
            (self.action, required(self.summary), required(self.proposed_by))
        else {
            return Err(ApiError::BadRequest(
                "Missing required fields: action, summary, and proposed_by are required".to_owned(),
            ));
        };
        Ok(NewTask {
            message_id: self.message_id,
            task_id: self.task_id,
            action: action.parse::<TaskAction>()?,
            summary,
            details: self.details,
            status: parse_opt::<TaskStatus>(self.status.as_deref())?.unwrap_or_default(),
            proposed_by,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub id: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub message_id: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub task_id: Option<Option<String>>,
    pub action: Option<String>,
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub details: Option<Option<String>>,
    pub status: Option<String>,
    pub proposed_by: Option<String>,
}

impl UpdateTaskRequest {
    pub fn into_patch(self) -> Result<(String, TaskPatch), ApiError> {
        let id = required(self.id)
            .ok_or_else(|| ApiError::BadRequest("Task id is required".to_owned()))?;
        let patch = TaskPatch {
            message_id: self.message_id,
            task_id: self.task_id,
            action: parse_opt(self.action.as_deref())?,
            summary: self.summary,
            details: self.details,
            status: parse_opt(self.status.as_deref())?,
            proposed_by: self.proposed_by,
        };
        Ok((id, patch))
    }
}

const fn default_batch_size() -> usize {
    DEFAULT_BACKFILL_BATCH_SIZE
}

const fn default_backfill_limit() -> usize {
    DEFAULT_BACKFILL_LIMIT
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackfillRequest {
    #[serde(default = "default_batch_size", alias = "batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_backfill_limit")]
    pub limit: usize,
}

impl Default for BackfillRequest {
    fn default() -> Self {
        Self { batch_size: default_batch_size(), limit: default_backfill_limit() }
    }
}

impl BackfillRequest {
    /// Cap limit to prevent DoS via unbounded backfills.
    pub fn capped_limit(&self) -> usize {
        self.limit.min(MAX_QUERY_LIMIT)
    }
}
