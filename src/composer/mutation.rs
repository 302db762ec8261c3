//! Prompts reporting changes to the task list: delete, clear, and update.

use super::fragments::{LIST_TEXT_BUDGET, format_optional_time, truncate};
use super::{Alternative, Fragment, Operation, PromptComposer};
use crate::error::Result;
use crate::task::{RelatedFile, RelatedFileType, Task, present};
use crate::template::Params;
use serde::Deserialize;

fn response_title(success: bool) -> &'static str {
    if success { "Success" } else { "Failure" }
}

/// Input for the delete-task prompt.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeleteTaskParams {
    pub task_id: String,
    pub task: Option<Task>,
    pub success: bool,
    pub message: String,
    /// Deletion was refused because the task is already completed.
    pub is_task_completed: bool,
}

/// Input for the clear-all-tasks prompt.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClearAllTasksParams {
    pub confirm: bool,
    pub success: bool,
    pub message: String,
    pub backup_file: Option<String>,
    /// There was nothing to clear.
    pub is_empty: bool,
}

/// Input for the update-task-content prompt.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UpdateTaskContentParams {
    pub task_id: String,
    /// The task before the update; `None` when the id was not found.
    pub task: Option<Task>,
    pub success: bool,
    pub message: String,
    pub validation_error: Option<String>,
    /// The request carried no fields to change.
    pub empty_update: bool,
    /// The task after a successful update.
    pub updated_task: Option<Task>,
}

const DELETE_ALTERNATIVES: &[Alternative<DeleteTaskParams>] = &[
    Alternative {
        template: "notFound",
        when: |p| p.task.is_none(),
        params: |p| Params::new().with("taskId", &p.task_id),
    },
    Alternative {
        template: "completed",
        when: |p| p.is_task_completed,
        params: |p| {
            Params::new()
                .with("taskId", &p.task_id)
                .with("taskName", p.task.as_ref().map(|t| t.name.as_str()))
        },
    },
];

const CLEAR_ALTERNATIVES: &[Alternative<ClearAllTasksParams>] = &[
    Alternative {
        template: "cancel",
        when: |p| !p.confirm,
        params: |_| Params::new(),
    },
    Alternative {
        template: "empty",
        when: |p| p.is_empty,
        params: |_| Params::new(),
    },
];

const CLEAR_FRAGMENTS: &[Fragment<ClearAllTasksParams>] = &[Fragment {
    slot: "backupInfo",
    template: "backupInfo",
    build: |p| present(&p.backup_file).map(|file| Params::new().with("backupFile", file)),
}];

const UPDATE_ALTERNATIVES: &[Alternative<UpdateTaskContentParams>] = &[
    Alternative {
        template: "notFound",
        when: |p| p.task.is_none(),
        params: |p| Params::new().with("taskId", &p.task_id),
    },
    Alternative {
        template: "validation",
        when: |p| present(&p.validation_error).is_some(),
        params: |p| Params::new().with("error", present(&p.validation_error).unwrap_or_default()),
    },
    Alternative {
        template: "emptyUpdate",
        when: |p| p.empty_update,
        params: |p| Params::new().with("taskId", &p.task_id),
    },
];

/// Related files grouped by type, groups in first-seen order.
fn group_by_type(files: &[RelatedFile]) -> Vec<(RelatedFileType, Vec<&RelatedFile>)> {
    let mut groups: Vec<(RelatedFileType, Vec<&RelatedFile>)> = Vec::new();
    for file in files {
        match groups.iter_mut().find(|(kind, _)| *kind == file.file_type) {
            Some((_, members)) => members.push(file),
            None => groups.push((file.file_type, vec![file])),
        }
    }
    groups
}

impl PromptComposer {
    /// Prompt reporting the outcome of a delete request.
    pub fn delete_task(&self, params: &DeleteTaskParams) -> Result<String> {
        let op = Operation::DeleteTask;
        if let Some(prompt) = self.select_alternative(op, DELETE_ALTERNATIVES, params)? {
            return Ok(prompt);
        }

        let slots = Params::new()
            .with("responseTitle", response_title(params.success))
            .with("message", &params.message);
        self.finish(op, &slots)
    }

    /// Prompt reporting the outcome of clearing every task.
    pub fn clear_all_tasks(&self, params: &ClearAllTasksParams) -> Result<String> {
        let op = Operation::ClearAllTasks;
        if let Some(prompt) = self.select_alternative(op, CLEAR_ALTERNATIVES, params)? {
            return Ok(prompt);
        }

        let mut slots = Params::new()
            .with("responseTitle", response_title(params.success))
            .with("message", &params.message);
        self.fill_fragments(op, CLEAR_FRAGMENTS, params, &mut slots)?;
        self.finish(op, &slots)
    }

    /// Prompt reporting the outcome of an update request.
    ///
    /// On success the updated task's details are appended to the message.
    pub fn update_task_content(&self, params: &UpdateTaskContentParams) -> Result<String> {
        let op = Operation::UpdateTaskContent;
        if let Some(prompt) = self.select_alternative(op, UPDATE_ALTERNATIVES, params)? {
            return Ok(prompt);
        }

        let mut message = params.message.clone();
        if params.success {
            if let Some(updated) = params.updated_task.as_ref() {
                message.push_str(&self.updated_details(op, updated)?);
            }
        }

        let slots = Params::new()
            .with("responseTitle", response_title(params.success))
            .with("message", message);
        self.finish(op, &slots)
    }

    fn updated_details(&self, op: Operation, task: &Task) -> Result<String> {
        let groups = group_by_type(&task.related_files);
        let files_content = self.render_each(op, "fileDetails", &groups, "\n", |_, (kind, files)| {
            let list = files
                .iter()
                .map(|f| format!("`{}`", f.path))
                .collect::<Vec<_>>()
                .join(", ");
            Params::new()
                .with("fileType", kind.as_str())
                .with("fileCount", files.len())
                .with("filesList", list)
        })?;

        let notes = present(&task.notes)
            .map(|notes| format!("- **Notes:** {}\n", truncate(notes, LIST_TEXT_BUDGET)))
            .unwrap_or_default();

        let params = Params::new()
            .with("taskName", &task.name)
            .with("taskDescription", truncate(&task.description, LIST_TEXT_BUDGET))
            .with("taskNotes", notes)
            .with("taskStatus", task.status.as_str())
            .with("taskUpdatedAt", format_optional_time(&task.updated_at))
            .with("filesContent", files_content);
        self.render(op, "success", &params)
    }
}
