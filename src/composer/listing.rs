//! Read-only prompts over the task list: list, query, and task detail.

use super::fragments::{LIST_TEXT_BUDGET, format_optional_time, format_time, truncate};
use super::{Alternative, Fragment, Operation, PromptComposer};
use crate::error::{PromptError, Result};
use crate::task::{Task, TaskStatus, present};
use crate::template::Params;
use serde::Deserialize;

const NO_DEPENDENCIES: &str = "no dependencies";
const NO_COMPLETION_SUMMARY: &str = "*No completion summary*";

/// Which statuses a list request shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    InProgress,
    Completed,
}

impl StatusFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Pending => "pending",
            StatusFilter::InProgress => "in_progress",
            StatusFilter::Completed => "completed",
        }
    }

    pub fn matches(&self, status: TaskStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => status == TaskStatus::Pending,
            StatusFilter::InProgress => status == TaskStatus::InProgress,
            StatusFilter::Completed => status == TaskStatus::Completed,
        }
    }
}

/// Input for the list-tasks prompt.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListTasksParams {
    pub status: StatusFilter,
    /// Every task, in the order the host stores them.
    pub tasks: Vec<Task>,
}

/// Input for the query-task prompt (one page of results).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QueryTaskParams {
    pub query: String,
    /// Whether `query` was matched against task ids rather than text.
    pub is_id: bool,
    pub tasks: Vec<Task>,
    pub total_tasks: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

/// Input for the task-detail prompt.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GetTaskDetailParams {
    pub task_id: String,
    pub task: Option<Task>,
    /// Lookup failure reported by the host.
    pub error: Option<String>,
}

const LIST_ALTERNATIVES: &[Alternative<ListTasksParams>] = &[Alternative {
    template: "notFound",
    when: |p| p.tasks.is_empty(),
    params: |p| {
        let status_text = match p.status {
            StatusFilter::All => "any".to_string(),
            other => format!("any {}", other.as_str()),
        };
        Params::new().with("statusText", status_text)
    },
}];

const QUERY_ALTERNATIVES: &[Alternative<QueryTaskParams>] = &[Alternative {
    template: "notFound",
    when: |p| p.tasks.is_empty(),
    params: |p| Params::new().with("query", &p.query),
}];

const DETAIL_ALTERNATIVES: &[Alternative<GetTaskDetailParams>] = &[
    Alternative {
        template: "error",
        when: |p| present(&p.error).is_some(),
        params: |p| Params::new().with("errorMessage", present(&p.error).unwrap_or_default()),
    },
    Alternative {
        template: "notFound",
        when: |p| p.task.is_none(),
        params: |p| Params::new().with("taskId", &p.task_id),
    },
];

const DETAIL_FRAGMENTS: &[Fragment<Task>] = &[
    Fragment {
        slot: "notesTemplate",
        template: "notes",
        build: |t| present(&t.notes).map(|notes| Params::new().with("notes", notes)),
    },
    Fragment {
        slot: "dependenciesTemplate",
        template: "dependencies",
        build: |t| {
            t.dependency_list()
                .map(|deps| Params::new().with("dependencies", deps))
        },
    },
    Fragment {
        slot: "implementationGuideTemplate",
        template: "implementationGuide",
        build: |t| {
            present(&t.implementation_guide)
                .map(|guide| Params::new().with("implementationGuide", guide))
        },
    },
    Fragment {
        slot: "verificationCriteriaTemplate",
        template: "verificationCriteria",
        build: |t| {
            present(&t.verification_criteria)
                .map(|criteria| Params::new().with("verificationCriteria", criteria))
        },
    },
    Fragment {
        slot: "relatedFilesTemplate",
        template: "relatedFiles",
        build: |t| {
            if t.related_files.is_empty() {
                return None;
            }
            let files = t
                .related_files
                .iter()
                .map(|file| match present(&file.description) {
                    Some(desc) => format!("- `{}` ({}): {}", file.path, file.file_type, desc),
                    None => format!("- `{}` ({})", file.path, file.file_type),
                })
                .collect::<Vec<_>>()
                .join("\n");
            Some(Params::new().with("files", files))
        },
    },
    Fragment {
        slot: "completedSummaryTemplate",
        template: "completedSummary",
        build: |t| {
            t.completed_at.as_ref().map(|at| {
                Params::new()
                    .with("completedTime", format_time(at))
                    .with(
                        "summary",
                        present(&t.summary).unwrap_or(NO_COMPLETION_SUMMARY),
                    )
            })
        },
    },
];

impl PromptComposer {
    /// Prompt listing tasks grouped by status.
    ///
    /// An empty task list returns the `notFound` template as-is.
    pub fn list_tasks(&self, params: &ListTasksParams) -> Result<String> {
        let op = Operation::ListTasks;
        if let Some(prompt) = self.select_alternative(op, LIST_ALTERNATIVES, params)? {
            return Ok(prompt);
        }

        let status_count =
            self.render_each(op, "statusCount", &TaskStatus::ALL[..], "\n", |_, status| {
                let count = params.tasks.iter().filter(|t| t.status == *status).count();
                Params::new().with("status", status.as_str()).with("count", count)
            })?;

        let shown: Vec<&Task> = TaskStatus::ALL
            .iter()
            .filter(|status| params.status.matches(**status))
            .flat_map(|status| params.tasks.iter().filter(move |t| t.status == *status))
            .collect();

        let task_details = self.render_each(op, "taskDetails", &shown, "", |_, task| {
            let summary = task.summary.as_deref().unwrap_or_default();
            Params::new()
                .with("name", &task.name)
                .with("id", &task.id)
                .with("description", &task.description)
                .with("createdAt", format_optional_time(&task.created_at))
                .with("completedSummary", truncate(summary, LIST_TEXT_BUDGET))
                .with(
                    "dependencies",
                    task.dependency_list()
                        .unwrap_or_else(|| NO_DEPENDENCIES.to_string()),
                )
                .with("completedAt", format_optional_time(&task.completed_at))
        })?;

        let slots = Params::new()
            .with("statusCount", status_count)
            .with("taskDetailsTemplate", task_details);
        self.finish(op, &slots)
    }

    /// Prompt presenting one page of search results.
    pub fn query_task(&self, params: &QueryTaskParams) -> Result<String> {
        let op = Operation::QueryTask;
        if let Some(prompt) = self.select_alternative(op, QUERY_ALTERNATIVES, params)? {
            return Ok(prompt);
        }

        let tasks_content = self.render_each(op, "taskDetails", &params.tasks, "", |_, task| {
            Params::new()
                .with("taskId", &task.id)
                .with("taskName", &task.name)
                .with("taskStatus", task.status.as_str())
                .with("taskDescription", truncate(&task.description, LIST_TEXT_BUDGET))
                .with("createdAt", format_optional_time(&task.created_at))
        })?;

        let slots = Params::new()
            .with("tasksContent", tasks_content)
            .with("page", params.page)
            .with("totalPages", params.total_pages)
            .with("pageSize", params.page_size)
            .with("totalTasks", params.total_tasks)
            .with("query", &params.query)
            .with("searchMode", if params.is_id { "id" } else { "keyword" });
        self.finish(op, &slots)
    }

    /// Prompt showing every field of a single task, untruncated.
    pub fn get_task_detail(&self, params: &GetTaskDetailParams) -> Result<String> {
        let op = Operation::GetTaskDetail;
        if let Some(prompt) = self.select_alternative(op, DETAIL_ALTERNATIVES, params)? {
            return Ok(prompt);
        }
        // The notFound alternative covers a missing task.
        let Some(task) = params.task.as_ref() else {
            return Err(PromptError::InvalidInput(format!(
                "getTaskDetail: no task supplied for '{}'",
                params.task_id
            )));
        };

        let mut slots = Params::new()
            .with("name", &task.name)
            .with("id", &task.id)
            .with("status", task.status.as_str())
            .with("description", &task.description)
            .with("createdTime", format_optional_time(&task.created_at))
            .with("updatedTime", format_optional_time(&task.updated_at));
        self.fill_fragments(op, DETAIL_FRAGMENTS, task, &mut slots)?;
        self.finish(op, &slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{RelatedFile, RelatedFileType, TaskDependency};
    use crate::test_support::{TemplateFixture, completed_task, task};

    fn list_fixture() -> TemplateFixture {
        let fixture = TemplateFixture::new();
        fixture
            .builtin("en", "listTasks/notFound.md", "NONE {statusText}")
            .builtin("en", "listTasks/index.md", "COUNTS\n{statusCount}\nTASKS\n{taskDetailsTemplate}")
            .builtin("en", "listTasks/statusCount.md", "{status}={count}")
            .builtin(
                "en",
                "listTasks/taskDetails.md",
                "<{name}|{dependencies}|{completedSummary}>",
            );
        fixture
    }

    #[test]
    fn test_list_empty_is_not_found_only() {
        let fixture = list_fixture();
        let composer = fixture.composer();

        let all = composer.list_tasks(&ListTasksParams::default()).unwrap();
        assert_eq!(all, "NONE any");
        assert!(!all.contains("COUNTS"));

        let pending = composer
            .list_tasks(&ListTasksParams {
                status: StatusFilter::InProgress,
                tasks: vec![],
            })
            .unwrap();
        assert_eq!(pending, "NONE any in_progress");
    }

    #[test]
    fn test_list_groups_by_status_in_supplied_order() {
        let fixture = list_fixture();
        let mut working = task("w", "Working", "");
        working.status = TaskStatus::InProgress;
        let tasks = vec![
            completed_task("c", "Finished", ""),
            task("p2", "Second", ""),
            working,
            task("p1", "First", ""),
        ];

        let prompt = fixture
            .composer()
            .list_tasks(&ListTasksParams {
                status: StatusFilter::All,
                tasks,
            })
            .unwrap();

        assert!(prompt.contains("pending=2\nin_progress=1\ncompleted=1"));
        assert!(prompt.ends_with(
            "<Second|no dependencies|><First|no dependencies|><Working|no dependencies|><Finished|no dependencies|Finished done>"
        ));
    }

    #[test]
    fn test_list_filter_keeps_all_counts() {
        let fixture = list_fixture();
        let mut dep = task("p1", "Pending", "");
        dep.dependencies = vec![TaskDependency::new("c")];
        let mut done = completed_task("c", "Finished", "");
        done.summary = Some("s".repeat(101));

        let prompt = fixture
            .composer()
            .list_tasks(&ListTasksParams {
                status: StatusFilter::Completed,
                tasks: vec![dep, done],
            })
            .unwrap();

        assert!(prompt.contains("pending=1\nin_progress=0\ncompleted=1"));
        assert!(!prompt.contains("<Pending"));
        assert!(prompt.contains(&format!("<Finished|no dependencies|{}...>", "s".repeat(100))));
    }

    fn query_fixture() -> TemplateFixture {
        let fixture = TemplateFixture::new();
        fixture
            .builtin("en", "queryTask/notFound.md", "NO MATCH {query}")
            .builtin(
                "en",
                "queryTask/index.md",
                "{searchMode}:{query} page {page}/{totalPages} ({pageSize} per page, {totalTasks} total)\n{tasksContent}",
            )
            .builtin(
                "en",
                "queryTask/taskDetails.md",
                "[{taskId} {taskName} {taskStatus} {taskDescription}]",
            );
        fixture
    }

    #[test]
    fn test_query_not_found() {
        let fixture = query_fixture();
        let prompt = fixture
            .composer()
            .query_task(&QueryTaskParams {
                query: "login".to_string(),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(prompt, "NO MATCH login");
    }

    #[test]
    fn test_query_page() {
        let fixture = query_fixture();
        let prompt = fixture
            .composer()
            .query_task(&QueryTaskParams {
                query: "login".to_string(),
                is_id: false,
                tasks: vec![task("a", "Login", &"l".repeat(105)), task("b", "Logout", "bye")],
                total_tasks: 7,
                page: 2,
                page_size: 2,
                total_pages: 4,
            })
            .unwrap();

        assert!(prompt.starts_with("keyword:login page 2/4 (2 per page, 7 total)\n"));
        assert!(prompt.contains(&format!("[a Login pending {}...]", "l".repeat(100))));
        assert!(prompt.ends_with("[b Logout pending bye]"));
    }

    fn detail_fixture() -> TemplateFixture {
        let fixture = TemplateFixture::new();
        fixture
            .builtin("en", "getTaskDetail/error.md", "ERROR {errorMessage}")
            .builtin("en", "getTaskDetail/notFound.md", "MISSING {taskId}")
            .builtin(
                "en",
                "getTaskDetail/index.md",
                "{name} [{status}] {description}\n{notesTemplate}{dependenciesTemplate}{implementationGuideTemplate}{verificationCriteriaTemplate}{relatedFilesTemplate}{completedSummaryTemplate}created {createdTime}",
            )
            .builtin("en", "getTaskDetail/notes.md", "N:{notes}\n")
            .builtin("en", "getTaskDetail/dependencies.md", "D:{dependencies}\n")
            .builtin("en", "getTaskDetail/implementationGuide.md", "G:{implementationGuide}\n")
            .builtin("en", "getTaskDetail/verificationCriteria.md", "V:{verificationCriteria}\n")
            .builtin("en", "getTaskDetail/relatedFiles.md", "F:\n{files}\n")
            .builtin("en", "getTaskDetail/completedSummary.md", "S:{completedTime} {summary}\n");
        fixture
    }

    #[test]
    fn test_detail_error_wins_over_everything() {
        let fixture = detail_fixture();
        let prompt = fixture
            .composer()
            .get_task_detail(&GetTaskDetailParams {
                task_id: "x".to_string(),
                task: Some(task("x", "X", "")),
                error: Some("store offline".to_string()),
            })
            .unwrap();
        assert_eq!(prompt, "ERROR store offline");
    }

    #[test]
    fn test_detail_not_found() {
        let fixture = detail_fixture();
        let prompt = fixture
            .composer()
            .get_task_detail(&GetTaskDetailParams {
                task_id: "x".to_string(),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(prompt, "MISSING x");
    }

    #[test]
    fn test_detail_shows_full_untruncated_fields() {
        let fixture = detail_fixture();
        let mut t = completed_task("t1", "Login", &"d".repeat(400));
        t.notes = Some("n".repeat(300));
        t.dependencies = vec![TaskDependency::new("a")];
        t.related_files = vec![
            RelatedFile {
                path: "src/login.rs".to_string(),
                file_type: RelatedFileType::ToModify,
                description: Some("entry".to_string()),
            },
            RelatedFile {
                path: "docs/auth.md".to_string(),
                file_type: RelatedFileType::Reference,
                description: None,
            },
        ];

        let prompt = fixture
            .composer()
            .get_task_detail(&GetTaskDetailParams {
                task_id: "t1".to_string(),
                task: Some(t),
                error: None,
            })
            .unwrap();

        assert!(prompt.contains(&"d".repeat(400)));
        assert!(prompt.contains(&format!("N:{}\n", "n".repeat(300))));
        assert!(prompt.contains("D:`a`\n"));
        assert!(!prompt.contains("G:"));
        assert!(!prompt.contains("V:"));
        assert!(prompt.contains("F:\n- `src/login.rs` (TO_MODIFY): entry\n- `docs/auth.md` (REFERENCE)\n"));
        assert!(prompt.contains("S:2025-01-03 12:00:00 UTC Login done\n"));
        assert!(prompt.ends_with("created 2025-01-01 09:00:00 UTC"));
    }

    #[test]
    fn test_detail_without_timestamps_renders_empty_times() {
        let fixture = detail_fixture();
        let t = Task::new("t1", "Login", "desc");

        let render = || {
            fixture
                .composer()
                .get_task_detail(&GetTaskDetailParams {
                    task_id: "t1".to_string(),
                    task: Some(t.clone()),
                    error: None,
                })
                .unwrap()
        };
        let first = render();
        assert!(first.ends_with("created "));
        assert_eq!(first, render());
    }
}
