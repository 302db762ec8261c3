//! Prompt composition for every assistant operation.
//!
//! Each operation follows one shape:
//!
//! 1. Evaluate the short-circuit [`Alternative`]s (not found, cancelled, ...).
//!    If one applies, its rendered text is the whole result.
//! 2. Render each optional [`Fragment`] whose data is present; absent data
//!    yields an empty slot.
//! 3. Render collection fragments, one sub-fragment per element, in the
//!    order supplied.
//! 4. Substitute everything into the operation's `index.md`.
//! 5. Apply the operator override/append layer keyed by [`Operation::key`].
//!
//! The operation rules themselves live in the submodules, grouped by what
//! they do to the task list.

mod execution;
mod fragments;
mod listing;
mod mutation;
mod planning;

pub use execution::{
    ComplexityAssessment, ComplexityLevel, ComplexityMetrics, CompleteTaskParams,
    ExecuteTaskParams, VerifyTaskParams, VERIFY_PASS_SCORE,
};
pub use fragments::{
    ANALYSIS_SUMMARY_BUDGET, ELLIPSIS, GUIDE_SUMMARY_BUDGET, LIST_TEXT_BUDGET,
    PENDING_TEXT_BUDGET, capped, format_optional_time, format_time, truncate,
};
pub use listing::{GetTaskDetailParams, ListTasksParams, QueryTaskParams, StatusFilter};
pub use mutation::{ClearAllTasksParams, DeleteTaskParams, UpdateTaskContentParams};
pub use planning::{
    AnalyzeTaskParams, COMPLETED_TASKS_CAP, PlanTaskParams, ProcessThoughtParams,
    ReflectTaskParams, SplitTasksParams,
};

pub(crate) use fragments::{Alternative, Fragment};

use crate::config::PromptConfig;
use crate::error::{PromptError, Result};
use crate::template::{Params, TemplateResolver, apply_override, substitute, substitute_strict};
use serde::de::DeserializeOwned;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Every operation the composer can build a prompt for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    PlanTask,
    AnalyzeTask,
    ReflectTask,
    SplitTasks,
    ListTasks,
    ExecuteTask,
    VerifyTask,
    CompleteTask,
    QueryTask,
    GetTaskDetail,
    DeleteTask,
    ClearAllTasks,
    UpdateTaskContent,
    InitProjectRules,
    ProcessThought,
}

impl Operation {
    pub const ALL: [Operation; 15] = [
        Operation::PlanTask,
        Operation::AnalyzeTask,
        Operation::ReflectTask,
        Operation::SplitTasks,
        Operation::ListTasks,
        Operation::ExecuteTask,
        Operation::VerifyTask,
        Operation::CompleteTask,
        Operation::QueryTask,
        Operation::GetTaskDetail,
        Operation::DeleteTask,
        Operation::ClearAllTasks,
        Operation::UpdateTaskContent,
        Operation::InitProjectRules,
        Operation::ProcessThought,
    ];

    /// Identifier used to derive the override variable names.
    pub fn key(&self) -> &'static str {
        match self {
            Operation::PlanTask => "PLAN_TASK",
            Operation::AnalyzeTask => "ANALYZE_TASK",
            Operation::ReflectTask => "REFLECT_TASK",
            Operation::SplitTasks => "SPLIT_TASKS",
            Operation::ListTasks => "LIST_TASKS",
            Operation::ExecuteTask => "EXECUTE_TASK",
            Operation::VerifyTask => "VERIFY_TASK",
            Operation::CompleteTask => "COMPLETE_TASK",
            Operation::QueryTask => "QUERY_TASK",
            Operation::GetTaskDetail => "GET_TASK_DETAIL",
            Operation::DeleteTask => "DELETE_TASK",
            Operation::ClearAllTasks => "CLEAR_ALL_TASKS",
            Operation::UpdateTaskContent => "UPDATE_TASK_CONTENT",
            Operation::InitProjectRules => "INIT_PROJECT_RULES",
            Operation::ProcessThought => "PROCESS_THOUGHT",
        }
    }

    /// Directory holding this operation's templates inside a template set.
    pub fn dir(&self) -> &'static str {
        match self {
            Operation::PlanTask => "planTask",
            Operation::AnalyzeTask => "analyzeTask",
            Operation::ReflectTask => "reflectTask",
            Operation::SplitTasks => "splitTasks",
            Operation::ListTasks => "listTasks",
            Operation::ExecuteTask => "executeTask",
            Operation::VerifyTask => "verifyTask",
            Operation::CompleteTask => "completeTask",
            Operation::QueryTask => "queryTask",
            Operation::GetTaskDetail => "getTaskDetail",
            Operation::DeleteTask => "deleteTask",
            Operation::ClearAllTasks => "clearAllTasks",
            Operation::UpdateTaskContent => "updateTaskContent",
            Operation::InitProjectRules => "initProjectRules",
            Operation::ProcessThought => "processThought",
        }
    }

    /// Names of every template this operation may load.
    pub fn template_names(&self) -> &'static [&'static str] {
        match self {
            Operation::PlanTask => &[
                "index",
                "tasks",
                "completedTask",
                "pendingTask",
                "moreTasks",
                "hasThought",
                "noThought",
            ],
            Operation::AnalyzeTask => &["index", "iteration"],
            Operation::ReflectTask => &["index"],
            Operation::SplitTasks => &["index", "taskDetails"],
            Operation::ListTasks => &["index", "notFound", "statusCount", "taskDetails"],
            Operation::ExecuteTask => &[
                "index",
                "notes",
                "implementationGuide",
                "verificationCriteria",
                "analysisResult",
                "dependencyTasks",
                "dependencyTask",
                "relatedFilesSummary",
                "complexity",
            ],
            Operation::VerifyTask => &["index", "noPass"],
            Operation::CompleteTask => &["index"],
            Operation::QueryTask => &["index", "notFound", "taskDetails"],
            Operation::GetTaskDetail => &[
                "index",
                "error",
                "notFound",
                "notes",
                "dependencies",
                "implementationGuide",
                "verificationCriteria",
                "relatedFiles",
                "completedSummary",
            ],
            Operation::DeleteTask => &["index", "notFound", "completed"],
            Operation::ClearAllTasks => &["index", "cancel", "empty", "backupInfo"],
            Operation::UpdateTaskContent => &[
                "index",
                "notFound",
                "validation",
                "emptyUpdate",
                "success",
                "fileDetails",
            ],
            Operation::InitProjectRules => &["index"],
            Operation::ProcessThought => &["index", "moreThought", "completedThought"],
        }
    }

    /// Logical path of the fragment `name` (e.g. `planTask/index.md`).
    pub fn template_path(&self, name: &str) -> String {
        format!("{}/{}.md", self.dir(), name)
    }

    /// Every template path this operation may load.
    pub fn template_paths(&self) -> Vec<String> {
        self.template_names()
            .iter()
            .map(|name| self.template_path(name))
            .collect()
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir())
    }
}

impl FromStr for Operation {
    type Err = PromptError;

    /// Accepts the directory name (`planTask`), the key (`PLAN_TASK`),
    /// or the key in lower case (`plan_task`).
    fn from_str(s: &str) -> Result<Self> {
        Operation::ALL
            .into_iter()
            .find(|op| op.dir() == s || op.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                PromptError::InvalidInput(format!(
                    "unknown operation '{}'. Known operations: {}",
                    s,
                    Operation::ALL
                        .iter()
                        .map(|op| op.dir())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })
    }
}

/// Builds final prompts from templates and operation input.
#[derive(Debug, Clone)]
pub struct PromptComposer {
    config: PromptConfig,
    resolver: TemplateResolver,
}

impl PromptComposer {
    pub fn new(config: PromptConfig) -> Self {
        let resolver = config.resolver();
        Self { config, resolver }
    }

    pub fn config(&self) -> &PromptConfig {
        &self.config
    }

    pub fn resolver(&self) -> &TemplateResolver {
        &self.resolver
    }

    /// Build the prompt for `operation` from host-supplied JSON parameters.
    pub fn compose_json(&self, operation: Operation, params: serde_json::Value) -> Result<String> {
        match operation {
            Operation::PlanTask => self.plan_task(&parse_params(operation, params)?),
            Operation::AnalyzeTask => self.analyze_task(&parse_params(operation, params)?),
            Operation::ReflectTask => self.reflect_task(&parse_params(operation, params)?),
            Operation::SplitTasks => self.split_tasks(&parse_params(operation, params)?),
            Operation::ListTasks => self.list_tasks(&parse_params(operation, params)?),
            Operation::ExecuteTask => self.execute_task(&parse_params(operation, params)?),
            Operation::VerifyTask => self.verify_task(&parse_params(operation, params)?),
            Operation::CompleteTask => self.complete_task(&parse_params(operation, params)?),
            Operation::QueryTask => self.query_task(&parse_params(operation, params)?),
            Operation::GetTaskDetail => self.get_task_detail(&parse_params(operation, params)?),
            Operation::DeleteTask => self.delete_task(&parse_params(operation, params)?),
            Operation::ClearAllTasks => self.clear_all_tasks(&parse_params(operation, params)?),
            Operation::UpdateTaskContent => {
                self.update_task_content(&parse_params(operation, params)?)
            }
            Operation::InitProjectRules => self.init_project_rules(),
            Operation::ProcessThought => self.process_thought(&parse_params(operation, params)?),
        }
    }

    // =========================================================================
    // Primitives used by the operation rules
    // =========================================================================

    /// Load the raw text of one of `operation`'s templates.
    pub(crate) fn load(&self, operation: Operation, name: &str) -> Result<String> {
        self.resolver.load(&operation.template_path(name))
    }

    /// Load one template and substitute `params` into it.
    pub(crate) fn render(&self, operation: Operation, name: &str, params: &Params) -> Result<String> {
        let template = self.load(operation, name)?;
        self.fill(operation, name, &template, params)
    }

    /// Substitute into already-loaded template text.
    pub(crate) fn fill(
        &self,
        operation: Operation,
        name: &str,
        template: &str,
        params: &Params,
    ) -> Result<String> {
        if self.config.strict_placeholders {
            substitute_strict(&operation.template_path(name), template, params)
        } else {
            Ok(substitute(template, params))
        }
    }

    /// Render the first alternative whose predicate holds, if any.
    pub(crate) fn select_alternative<P>(
        &self,
        operation: Operation,
        alternatives: &[Alternative<P>],
        input: &P,
    ) -> Result<Option<String>> {
        for alternative in alternatives {
            if (alternative.when)(input) {
                debug!(
                    operation = %operation,
                    branch = alternative.template,
                    "short-circuit branch selected"
                );
                let params = (alternative.params)(input);
                return self.render(operation, alternative.template, &params).map(Some);
            }
        }
        Ok(None)
    }

    /// Render every optional fragment into `slots`, one slot per row.
    pub(crate) fn fill_fragments<P>(
        &self,
        operation: Operation,
        fragments: &[Fragment<P>],
        input: &P,
        slots: &mut Params,
    ) -> Result<()> {
        for fragment in fragments {
            let text = match (fragment.build)(input) {
                Some(params) => self.render(operation, fragment.template, &params)?,
                None => String::new(),
            };
            slots.insert(fragment.slot, text);
        }
        Ok(())
    }

    /// Render `template` once per item, in order, joined by `separator`.
    pub(crate) fn render_each<T, F>(
        &self,
        operation: Operation,
        template: &str,
        items: &[T],
        separator: &str,
        params: F,
    ) -> Result<String>
    where
        F: Fn(usize, &T) -> Params,
    {
        if items.is_empty() {
            return Ok(String::new());
        }
        let raw = self.load(operation, template)?;
        let rendered = items
            .iter()
            .enumerate()
            .map(|(i, item)| self.fill(operation, template, &raw, &params(i, item)))
            .collect::<Result<Vec<_>>>()?;
        Ok(rendered.join(separator))
    }

    /// Fill the index template and apply the override layer.
    pub(crate) fn finish(&self, operation: Operation, slots: &Params) -> Result<String> {
        let prompt = self.render(operation, "index", slots)?;
        Ok(apply_override(prompt, operation.key(), &self.config))
    }
}

fn parse_params<P: DeserializeOwned>(operation: Operation, value: serde_json::Value) -> Result<P> {
    serde_json::from_value(value).map_err(|e| {
        PromptError::InvalidInput(format!(
            "invalid parameters for {}: {}",
            operation.dir(),
            e
        ))
    })
}

#[cfg(test)]
mod tests;
