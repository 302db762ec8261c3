//! Execution-phase prompts: execute, verify, and complete a task.

use super::fragments::{ANALYSIS_SUMMARY_BUDGET, GUIDE_SUMMARY_BUDGET, truncate};
use super::{Alternative, Fragment, Operation, PromptComposer};
use crate::error::Result;
use crate::task::{Task, present};
use crate::template::Params;
use serde::Deserialize;
use std::fmt;
use tracing::debug;

/// Lowest verification score that counts as a pass.
pub const VERIFY_PASS_SCORE: f64 = 80.0;

const NO_RELATED_FILES: &str = "The current task has no related files.";
const NO_COMPLETION_SUMMARY: &str = "*No completion summary*";

/// Coarse complexity rating computed by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplexityLevel {
    #[default]
    Low,
    Medium,
    High,
    VeryHigh,
}

impl ComplexityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplexityLevel::Low => "LOW",
            ComplexityLevel::Medium => "MEDIUM",
            ComplexityLevel::High => "HIGH",
            ComplexityLevel::VeryHigh => "VERY_HIGH",
        }
    }

    /// Emphasis line shown above the complexity details.
    pub fn style(&self) -> &'static str {
        match self {
            ComplexityLevel::VeryHigh => "⚠️ **Warning: this task is very complex** ⚠️",
            ComplexityLevel::High => "⚠️ **Note: this task is fairly complex**",
            ComplexityLevel::Medium => "**Hint: this task has some complexity**",
            ComplexityLevel::Low => "",
        }
    }
}

impl fmt::Display for ComplexityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComplexityMetrics {
    pub description_length: usize,
    pub dependencies_count: usize,
}

/// Host-computed complexity assessment for a task.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComplexityAssessment {
    pub level: ComplexityLevel,
    pub metrics: ComplexityMetrics,
    pub recommendations: Vec<String>,
}

/// Input for the execute-task prompt.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecuteTaskParams {
    pub task: Task,
    #[serde(default)]
    pub complexity_assessment: Option<ComplexityAssessment>,
    #[serde(default)]
    pub related_files_summary: Option<String>,
    /// Tasks the executed task depends on, in dependency order.
    #[serde(default)]
    pub dependency_tasks: Vec<Task>,
}

/// Input for the verify-task prompt.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyTaskParams {
    pub task: Task,
    /// Self-assessed score, nominally 0-100. Fractions and negatives are accepted.
    pub score: f64,
    pub summary: String,
}

/// Input for the complete-task prompt.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteTaskParams {
    pub task: Task,
    pub completion_time: String,
}

const EXECUTE_FRAGMENTS: &[Fragment<ExecuteTaskParams>] = &[
    Fragment {
        slot: "notesTemplate",
        template: "notes",
        build: |p| present(&p.task.notes).map(|notes| Params::new().with("notes", notes)),
    },
    Fragment {
        slot: "implementationGuideTemplate",
        template: "implementationGuide",
        build: |p| {
            present(&p.task.implementation_guide)
                .map(|guide| Params::new().with("implementationGuide", guide))
        },
    },
    Fragment {
        slot: "verificationCriteriaTemplate",
        template: "verificationCriteria",
        build: |p| {
            present(&p.task.verification_criteria)
                .map(|criteria| Params::new().with("verificationCriteria", criteria))
        },
    },
    Fragment {
        slot: "analysisResultTemplate",
        template: "analysisResult",
        build: |p| {
            present(&p.task.analysis_result)
                .map(|analysis| Params::new().with("analysisResult", analysis))
        },
    },
    Fragment {
        slot: "relatedFilesSummaryTemplate",
        template: "relatedFilesSummary",
        build: |p| {
            Some(Params::new().with(
                "relatedFilesSummary",
                present(&p.related_files_summary).unwrap_or(NO_RELATED_FILES),
            ))
        },
    },
    Fragment {
        slot: "complexityTemplate",
        template: "complexity",
        build: |p| p.complexity_assessment.as_ref().map(complexity_params),
    },
];

const VERIFY_ALTERNATIVES: &[Alternative<VerifyTaskParams>] = &[Alternative {
    template: "noPass",
    when: |p| p.score < VERIFY_PASS_SCORE,
    params: |p| {
        Params::new()
            .with("name", &p.task.name)
            .with("id", &p.task.id)
            .with("summary", &p.summary)
    },
}];

fn complexity_params(assessment: &ComplexityAssessment) -> Params {
    let recommendation: String = assessment
        .recommendations
        .iter()
        .map(|r| format!("- {}\n", r))
        .collect();

    Params::new()
        .with("level", assessment.level.as_str())
        .with("complexityStyle", assessment.level.style())
        .with("descriptionLength", assessment.metrics.description_length)
        .with("dependenciesCount", assessment.metrics.dependencies_count)
        .with("recommendation", recommendation)
}

impl PromptComposer {
    /// Prompt handing a task to the assistant for implementation.
    pub fn execute_task(&self, params: &ExecuteTaskParams) -> Result<String> {
        let op = Operation::ExecuteTask;
        debug!(task = %params.task.id, "composing execute prompt");

        let mut slots = Params::new()
            .with("name", &params.task.name)
            .with("id", &params.task.id)
            .with("description", &params.task.description);
        self.fill_fragments(op, EXECUTE_FRAGMENTS, params, &mut slots)?;
        slots.insert(
            "dependencyTasksTemplate",
            self.dependency_summaries(&params.dependency_tasks)?,
        );

        self.finish(op, &slots)
    }

    /// Completed dependencies that carry a summary, one section each.
    fn dependency_summaries(&self, dependency_tasks: &[Task]) -> Result<String> {
        let op = Operation::ExecuteTask;
        let completed: Vec<&Task> = dependency_tasks
            .iter()
            .filter(|t| t.is_completed() && present(&t.summary).is_some())
            .collect();
        if completed.is_empty() {
            return Ok(String::new());
        }

        let sections = self.render_each(op, "dependencyTask", &completed, "", |_, task| {
            Params::new().with("name", &task.name).with(
                "summary",
                present(&task.summary).unwrap_or(NO_COMPLETION_SUMMARY),
            )
        })?;
        self.render(
            op,
            "dependencyTasks",
            &Params::new().with("dependencyTasks", sections),
        )
    }

    /// Prompt reacting to the assistant's self-verification.
    ///
    /// Scores below [`VERIFY_PASS_SCORE`] return the `noPass` template as-is.
    pub fn verify_task(&self, params: &VerifyTaskParams) -> Result<String> {
        let op = Operation::VerifyTask;
        if let Some(prompt) = self.select_alternative(op, VERIFY_ALTERNATIVES, params)? {
            return Ok(prompt);
        }

        let task = &params.task;
        let slots = Params::new()
            .with("name", &task.name)
            .with("id", &task.id)
            .with("description", &task.description)
            .with("notes", present(&task.notes).unwrap_or("no notes"))
            .with(
                "verificationCriteria",
                present(&task.verification_criteria).unwrap_or("no verification criteria"),
            )
            .with(
                "implementationGuideSummary",
                present(&task.implementation_guide)
                    .map(|g| truncate(g, GUIDE_SUMMARY_BUDGET))
                    .unwrap_or_else(|| "no implementation guide".to_string()),
            )
            .with(
                "analysisResult",
                present(&task.analysis_result)
                    .map(|a| truncate(a, ANALYSIS_SUMMARY_BUDGET))
                    .unwrap_or_else(|| "no analysis result".to_string()),
            );
        self.finish(op, &slots)
    }

    /// Prompt confirming a task was marked complete.
    pub fn complete_task(&self, params: &CompleteTaskParams) -> Result<String> {
        let slots = Params::new()
            .with("name", &params.task.name)
            .with("id", &params.task.id)
            .with("completionTime", &params.completion_time);
        self.finish(Operation::CompleteTask, &slots)
    }
}
