//! Task model consumed by the prompt composer.
//!
//! Tasks are owned and persisted by the host; the composer only reads them
//! to decide which fragments to include. The serde representation uses
//! camelCase field names so host JSON can be passed through unchanged:
//!
//! ```text
//! {
//!   "id": "7f3c...",
//!   "name": "Add login form",
//!   "description": "...",
//!   "status": "in_progress",
//!   "dependencies": [{ "taskId": "1a2b..." }],
//!   "relatedFiles": [{ "path": "src/login.rs", "type": "TO_MODIFY" }],
//!   "createdAt": "2025-01-01T00:00:00Z",
//!   "updatedAt": "2025-01-01T00:00:00Z"
//! }
//! ```

use crate::error::{PromptError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;


/// Lifecycle status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// Every status, in display order.
    pub const ALL: [TaskStatus; 3] = [
        TaskStatus::Pending,
        TaskStatus::InProgress,
        TaskStatus::Completed,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }

}

impl FromStr for TaskStatus {
    type Err = PromptError;

    /// Parse a status from its wire name.
    fn from_str(s: &str) -> Result<Self> {
        TaskStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                PromptError::InvalidInput(format!(
                    "unknown task status '{}'. Known statuses: pending, in_progress, completed",
                    s
                ))
            })
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference to a task this task depends on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDependency {
    pub task_id: String,
}

impl TaskDependency {
    pub fn new(task_id: impl Into<String>) -> Self {
        Self {
            task_id: task_id.into(),
        }
    }
}

/// How a related file relates to the task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelatedFileType {
    ToModify,
    Reference,
    Create,
    Dependency,
    #[default]
    Other,
}

impl RelatedFileType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelatedFileType::ToModify => "TO_MODIFY",
            RelatedFileType::Reference => "REFERENCE",
            RelatedFileType::Create => "CREATE",
            RelatedFileType::Dependency => "DEPENDENCY",
            RelatedFileType::Other => "OTHER",
        }
    }
}

impl fmt::Display for RelatedFileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file referenced by a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedFile {
    pub path: String,
    #[serde(rename = "type", default)]
    pub file_type: RelatedFileType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A task record as supplied by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    // =========================================================================
    // Identity
    // =========================================================================
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: TaskStatus,

    // =========================================================================
    // Optional detail
    // =========================================================================
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation_guide: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verification_criteria: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub analysis_result: Option<String>,

    /// Completion summary, set when the task is completed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    // =========================================================================
    // Relations
    // =========================================================================
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<TaskDependency>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub related_files: Vec<RelatedFile>,

    // =========================================================================
    // Timestamps
    // =========================================================================
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a pending task with the given identity and description.
    ///
    /// Timestamps start unset; the host owns them.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            status: TaskStatus::Pending,
            notes: None,
            implementation_guide: None,
            verification_criteria: None,
            analysis_result: None,
            summary: None,
            dependencies: Vec::new(),
            related_files: Vec::new(),
            created_at: None,
            updated_at: None,
            completed_at: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == TaskStatus::Completed
    }

    /// Dependency ids formatted as inline code, joined with `, `.
    ///
    /// Returns `None` when the task has no dependencies.
    pub fn dependency_list(&self) -> Option<String> {
        if self.dependencies.is_empty() {
            return None;
        }
        Some(
            self.dependencies
                .iter()
                .map(|d| format!("`{}`", d.task_id))
                .collect::<Vec<_>>()
                .join(", "),
        )
    }
}

/// Treat empty strings as missing.
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
