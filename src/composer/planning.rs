//! Planning-phase prompts: plan, analyze, reflect, split, process thought,
//! and project-rule initialisation.

use super::fragments::{
    LIST_TEXT_BUDGET, PENDING_TEXT_BUDGET, capped, format_optional_time, truncate,
};
use super::{Fragment, Operation, PromptComposer};
use crate::error::Result;
use crate::task::{Task, present};
use crate::template::Params;
use serde::Deserialize;
use tracing::debug;

/// Most completed tasks listed in the plan prompt.
pub const COMPLETED_TASKS_CAP: usize = 10;

const NO_REQUIREMENTS: &str = "No requirements";
const NO_COMPLETED_TASKS: &str = "no completed tasks";
const NO_PENDING_TASKS: &str = "no pending tasks";

/// Input for the plan-task prompt.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PlanTaskParams {
    pub description: String,
    pub requirements: Option<String>,
    /// Whether the existing task list should be shown as reference.
    pub existing_tasks_reference: bool,
    pub completed_tasks: Vec<Task>,
    pub pending_tasks: Vec<Task>,
    /// Directory where the assistant keeps its working memory.
    pub memory_dir: String,
}

/// Input for the analyze-task prompt.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyzeTaskParams {
    pub summary: String,
    pub initial_concept: String,
    pub previous_analysis: Option<String>,
}

/// Input for the reflect-task prompt.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReflectTaskParams {
    pub summary: String,
    pub analysis: String,
}

/// Input for the split-tasks prompt.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SplitTasksParams {
    /// How the new tasks were merged into the list (append, overwrite, ...).
    pub update_mode: String,
    pub created_tasks: Vec<Task>,
    /// Every known task, used to name dependencies.
    pub all_tasks: Vec<Task>,
}

/// Input for the process-thought prompt.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProcessThoughtParams {
    pub thought: String,
    pub thought_number: u32,
    pub total_thoughts: u32,
    pub next_thought_needed: bool,
    pub stage: String,
    pub tags: Vec<String>,
    pub axioms_used: Vec<String>,
    pub assumptions_challenged: Vec<String>,
}

const ANALYZE_FRAGMENTS: &[Fragment<AnalyzeTaskParams>] = &[Fragment {
    slot: "iterationPrompt",
    template: "iteration",
    build: |p| {
        present(&p.previous_analysis)
            .map(|analysis| Params::new().with("previousAnalysis", analysis))
    },
}];

impl PromptComposer {
    /// Prompt guiding the assistant through planning a new piece of work.
    pub fn plan_task(&self, params: &PlanTaskParams) -> Result<String> {
        let op = Operation::PlanTask;
        debug!(
            completed = params.completed_tasks.len(),
            pending = params.pending_tasks.len(),
            "composing plan prompt"
        );

        let has_tasks =
            !params.completed_tasks.is_empty() || !params.pending_tasks.is_empty();
        let tasks_template = if params.existing_tasks_reference && has_tasks {
            let slots = Params::new()
                .with("completedTasks", self.completed_task_list(&params.completed_tasks)?)
                .with("unfinishedTasks", self.pending_task_list(&params.pending_tasks)?);
            self.render(op, "tasks", &slots)?
        } else {
            String::new()
        };

        let thought = if self.config().enable_thought_chain {
            "hasThought"
        } else {
            "noThought"
        };
        let thought_template = self.render(op, thought, &Params::new())?;

        let slots = Params::new()
            .with("description", &params.description)
            .with(
                "requirements",
                present(&params.requirements).unwrap_or(NO_REQUIREMENTS),
            )
            .with("tasksTemplate", tasks_template)
            .with("rulesPath", &self.config().rules_path)
            .with("memoryDir", &params.memory_dir)
            .with("thoughtTemplate", thought_template);

        self.finish(op, &slots)
    }

    fn completed_task_list(&self, tasks: &[Task]) -> Result<String> {
        let op = Operation::PlanTask;
        if tasks.is_empty() {
            return Ok(NO_COMPLETED_TASKS.to_string());
        }

        let (shown, omitted) = capped(tasks, COMPLETED_TASKS_CAP);
        let mut list = self.render_each(op, "completedTask", shown, "\n\n", |i, task| {
            Params::new()
                .with("index", i + 1)
                .with("name", &task.name)
                .with("id", &task.id)
                .with("description", truncate(&task.description, LIST_TEXT_BUDGET))
                .with("completedAt", format_optional_time(&task.completed_at))
        })?;

        if omitted > 0 {
            let notice = Params::new()
                .with("shown", shown.len())
                .with("total", tasks.len())
                .with("omitted", omitted);
            list.push_str("\n\n");
            list.push_str(&self.render(op, "moreTasks", &notice)?);
        }

        Ok(list)
    }

    fn pending_task_list(&self, tasks: &[Task]) -> Result<String> {
        if tasks.is_empty() {
            return Ok(NO_PENDING_TASKS.to_string());
        }

        self.render_each(Operation::PlanTask, "pendingTask", tasks, "\n\n", |i, task| {
            Params::new()
                .with("index", i + 1)
                .with("name", &task.name)
                .with("id", &task.id)
                .with("description", truncate(&task.description, PENDING_TEXT_BUDGET))
                .with("status", task.status.as_str())
                .with("dependencies", task.dependency_list().unwrap_or_default())
        })
    }

    /// Prompt asking the assistant to analyse a task concept.
    pub fn analyze_task(&self, params: &AnalyzeTaskParams) -> Result<String> {
        let op = Operation::AnalyzeTask;
        let mut slots = Params::new()
            .with("summary", &params.summary)
            .with("initialConcept", &params.initial_concept);
        self.fill_fragments(op, ANALYZE_FRAGMENTS, params, &mut slots)?;
        self.finish(op, &slots)
    }

    /// Prompt asking the assistant to critique its own analysis.
    pub fn reflect_task(&self, params: &ReflectTaskParams) -> Result<String> {
        let slots = Params::new()
            .with("summary", &params.summary)
            .with("analysis", &params.analysis);
        self.finish(Operation::ReflectTask, &slots)
    }

    /// Prompt reporting the tasks created by a split.
    pub fn split_tasks(&self, params: &SplitTasksParams) -> Result<String> {
        let op = Operation::SplitTasks;
        let tasks_content =
            self.render_each(op, "taskDetails", &params.created_tasks, "\n", |i, task| {
                Params::new()
                    .with("index", i + 1)
                    .with("name", &task.name)
                    .with("id", &task.id)
                    .with("description", &task.description)
                    .with("notes", present(&task.notes).unwrap_or("no notes"))
                    .with(
                        "implementationGuide",
                        present(&task.implementation_guide)
                            .map(|g| truncate(g, LIST_TEXT_BUDGET))
                            .unwrap_or_else(|| "no implementation guide".to_string()),
                    )
                    .with(
                        "verificationCriteria",
                        present(&task.verification_criteria)
                            .map(|v| truncate(v, LIST_TEXT_BUDGET))
                            .unwrap_or_else(|| "no verification criteria".to_string()),
                    )
                    .with("dependencies", named_dependencies(task, &params.all_tasks))
            })?;

        let slots = Params::new()
            .with("updateMode", &params.update_mode)
            .with("tasksContent", tasks_content);
        self.finish(op, &slots)
    }

    /// Prompt asking the assistant to write the project rules file.
    pub fn init_project_rules(&self) -> Result<String> {
        self.finish(
            Operation::InitProjectRules,
            &Params::new().with("rulesPath", &self.config().rules_path),
        )
    }

    /// Prompt echoing one step of a structured thinking chain.
    pub fn process_thought(&self, params: &ProcessThoughtParams) -> Result<String> {
        let op = Operation::ProcessThought;
        let next = if params.next_thought_needed {
            "moreThought"
        } else {
            "completedThought"
        };
        let next_thought_needed = self.render(op, next, &Params::new())?;

        let slots = Params::new()
            .with("thought", &params.thought)
            .with("thoughtNumber", params.thought_number)
            .with("totalThoughts", params.total_thoughts)
            .with("stage", &params.stage)
            .with("tags", join_or(&params.tags, "no tags"))
            .with("axioms_used", join_or(&params.axioms_used, "no axioms used"))
            .with(
                "assumptions_challenged",
                join_or(&params.assumptions_challenged, "no assumptions challenged"),
            )
            .with("nextThoughtNeeded", next_thought_needed);
        self.finish(op, &slots)
    }
}

/// Dependencies as `"Name" (`id`)`, falling back to the bare id when the
/// referenced task is unknown.
fn named_dependencies(task: &Task, all_tasks: &[Task]) -> String {
    if task.dependencies.is_empty() {
        return "no dependencies".to_string();
    }
    task.dependencies
        .iter()
        .map(|dep| match all_tasks.iter().find(|t| t.id == dep.task_id) {
            Some(found) => format!("\"{}\" (`{}`)", found.name, dep.task_id),
            None => format!("`{}`", dep.task_id),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn join_or(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(", ")
    }
}
