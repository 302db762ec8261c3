//! Built-in `en` templates compiled into the binary.
//!
//! Used as the last resolution step, after every file tier, so the shipped
//! prompts stay available when the crate's `templates/` directory is not on
//! disk (installed binary, moved executable).

macro_rules! embedded_templates {
    ($($path:literal),* $(,)?) => {
        /// Every template of the built-in `en` set, keyed by logical path.
        pub const EMBEDDED_TEMPLATES: &[(&str, &str)] = &[
            $(($path, include_str!(concat!("../../templates/templates_en/", $path))),)*
        ];
    };
}

embedded_templates!(
    "analyzeTask/index.md",
    "analyzeTask/iteration.md",
    "clearAllTasks/backupInfo.md",
    "clearAllTasks/cancel.md",
    "clearAllTasks/empty.md",
    "clearAllTasks/index.md",
    "completeTask/index.md",
    "deleteTask/completed.md",
    "deleteTask/index.md",
    "deleteTask/notFound.md",
    "executeTask/analysisResult.md",
    "executeTask/complexity.md",
    "executeTask/dependencyTask.md",
    "executeTask/dependencyTasks.md",
    "executeTask/implementationGuide.md",
    "executeTask/index.md",
    "executeTask/notes.md",
    "executeTask/relatedFilesSummary.md",
    "executeTask/verificationCriteria.md",
    "getTaskDetail/completedSummary.md",
    "getTaskDetail/dependencies.md",
    "getTaskDetail/error.md",
    "getTaskDetail/implementationGuide.md",
    "getTaskDetail/index.md",
    "getTaskDetail/notFound.md",
    "getTaskDetail/notes.md",
    "getTaskDetail/relatedFiles.md",
    "getTaskDetail/verificationCriteria.md",
    "initProjectRules/index.md",
    "listTasks/index.md",
    "listTasks/notFound.md",
    "listTasks/statusCount.md",
    "listTasks/taskDetails.md",
    "planTask/completedTask.md",
    "planTask/hasThought.md",
    "planTask/index.md",
    "planTask/moreTasks.md",
    "planTask/noThought.md",
    "planTask/pendingTask.md",
    "planTask/tasks.md",
    "processThought/completedThought.md",
    "processThought/index.md",
    "processThought/moreThought.md",
    "queryTask/index.md",
    "queryTask/notFound.md",
    "queryTask/taskDetails.md",
    "reflectTask/index.md",
    "splitTasks/index.md",
    "splitTasks/taskDetails.md",
    "updateTaskContent/emptyUpdate.md",
    "updateTaskContent/fileDetails.md",
    "updateTaskContent/index.md",
    "updateTaskContent/notFound.md",
    "updateTaskContent/success.md",
    "updateTaskContent/validation.md",
    "verifyTask/index.md",
    "verifyTask/noPass.md",
);

/// Look up an embedded template by logical path (e.g. `planTask/index.md`).
pub fn get_embedded(template_path: &str) -> Option<&'static str> {
    EMBEDDED_TEMPLATES
        .iter()
        .find(|(path, _)| *path == template_path)
        .map(|(_, content)| *content)
}
