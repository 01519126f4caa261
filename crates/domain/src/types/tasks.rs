//! Task request bodies

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Task status as encoded in the status-change path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskStatus {
    Completed,
    Cancelled,
    InProgress,
}

impl TaskStatus {
    pub const fn code(self) -> u8 {
        match self {
            Self::Completed => 0,
            Self::Cancelled => 1,
            Self::InProgress => 3,
        }
    }
}

/// What a task is attached to. Only citizens are supported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskReference {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl TaskReference {
    pub fn citizen(id: impl Into<String>) -> Self {
        Self { id: id.into(), kind: "CITIZEN".to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub deadline: NaiveDateTime,
    pub assigned_actors_id: Vec<String>,
    pub task_type: Option<String>,
    pub reference: TaskReference,
}

impl NewTask {
    /// Task on a citizen assigned to the given actors.
    pub fn for_citizen(
        citizen_id: impl Into<String>,
        assigned_actor_ids: Vec<String>,
        deadline: NaiveDateTime,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            deadline,
            assigned_actors_id: assigned_actor_ids,
            task_type: None,
            reference: TaskReference::citizen(citizen_id),
        }
    }
}
