//! Task proposals attached to chat messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// What a proposed task would do.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskAction {
    Create,
    Update,
    Comment,
}

impl TaskAction {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Comment => "comment",
        }
    }
}

impl std::str::FromStr for TaskAction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "comment" => Ok(Self::Comment),
            _ => Err(CoreError::InvalidInput(
                "Invalid action: must be \"create\", \"update\", or \"comment\"".to_owned(),
            )),
        }
    }
}

/// Review state of a proposed task.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Pending,
    Confirmed,
    Rejected,
}

impl TaskStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Rejected => "rejected",
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "rejected" => Ok(Self::Rejected),
            _ => Err(CoreError::InvalidInput(
                "Invalid status: must be \"pending\", \"confirmed\", or \"rejected\"".to_owned(),
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub message_id: Option<String>,
    /// External tracker id the proposal refers to.
    pub task_id: Option<String>,
    pub action: TaskAction,
    pub summary: String,
    pub details: Option<String>,
    pub status: TaskStatus,
    pub proposed_by: String,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub message_id: Option<String>,
    pub task_id: Option<String>,
    pub action: TaskAction,
    pub summary: String,
    pub details: Option<String>,
    pub status: TaskStatus,
    pub proposed_by: String,
}

/// Partial update. `None` leaves a column unchanged; `Some(None)` clears a nullable column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub message_id: Option<Option<String>>,
    pub task_id: Option<Option<String>>,
    pub action: Option<TaskAction>,
    pub summary: Option<String>,
    pub details: Option<Option<String>>,
    pub status: Option<TaskStatus>,
    pub proposed_by: Option<String>,
}

impl TaskPatch {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.message_id.is_none()
            && self.task_id.is_none()
            && self.action.is_none()
            && self.summary.is_none()
            && self.details.is_none()
            && self.status.is_none()
            && self.proposed_by.is_none()
    }
}

/// Equality filters for listing tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub proposed_by: Option<String>,
    pub message_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_default_is_pending() {
        assert_eq!(TaskStatus::default(), TaskStatus::Pending);
    }

    #[test]
    fn test_action_parse() {
        assert_eq!("comment".parse::<TaskAction>().unwrap(), TaskAction::Comment);
        assert!("delete".parse::<TaskAction>().is_err());
    }

    #[test]
    fn test_status_parse_rejects_case_variants() {
        assert_eq!("rejected".parse::<TaskStatus>().unwrap(), TaskStatus::Rejected);
        assert!("Rejected".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(TaskPatch::default().is_empty());
        assert!(!TaskPatch { details: Some(None), ..Default::default() }.is_empty());
    }
}
