use crate::composer::PromptComposer;
use crate::config::PromptConfig;
use crate::task::{Task, TaskStatus};
use crate::template::TemplateResolver;
use chrono::{TimeZone, Utc};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A throwaway template tree with a built-in root and a custom root.
pub(crate) struct TemplateFixture {
    dir: TempDir,
}

impl TemplateFixture {
    pub(crate) fn new() -> Self {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("builtin")).unwrap();
        std::fs::create_dir_all(dir.path().join("custom")).unwrap();
        Self { dir }
    }

    pub(crate) fn builtin_dir(&self) -> PathBuf {
        self.dir.path().join("builtin")
    }

    pub(crate) fn custom_dir(&self) -> PathBuf {
        self.dir.path().join("custom")
    }

    /// Write `builtin/templates_<set>/<path>`.
    pub(crate) fn builtin(&self, set: &str, path: &str, content: &str) -> &Self {
        write_file(
            &self.builtin_dir().join(format!("templates_{}", set)).join(path),
            content,
        );
        self
    }

    /// Write `custom/<set>/<path>`.
    pub(crate) fn custom(&self, set: &str, path: &str, content: &str) -> &Self {
        write_file(&self.custom_dir().join(set).join(path), content);
        self
    }

    /// Resolver over this fixture with the custom root enabled.
    pub(crate) fn resolver(&self, set: &str) -> TemplateResolver {
        TemplateResolver::new(set, Some(self.custom_dir()), self.builtin_dir()).with_embedded(false)
    }

    /// Config pointing at this fixture's built-in root (no custom root).
    pub(crate) fn config(&self) -> PromptConfig {
        PromptConfig {
            builtin_dir: self.builtin_dir(),
            embedded_fallback: false,
            ..Default::default()
        }
    }

    pub(crate) fn composer(&self) -> PromptComposer {
        PromptComposer::new(self.config())
    }
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

/// Composer over the shipped template set.
pub(crate) fn shipped_composer() -> PromptComposer {
    PromptComposer::new(PromptConfig::default())
}

/// A task with deterministic timestamps.
pub(crate) fn task(id: &str, name: &str, description: &str) -> Task {
    let mut task = Task::new(id, name, description);
    task.created_at = Some(Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap());
    task.updated_at = Some(Utc.with_ymd_and_hms(2025, 1, 2, 9, 0, 0).unwrap());
    task
}

/// A completed task with a summary and completion time.
pub(crate) fn completed_task(id: &str, name: &str, description: &str) -> Task {
    let mut task = task(id, name, description);
    task.status = TaskStatus::Completed;
    task.summary = Some(format!("{} done", name));
    task.completed_at = Some(Utc.with_ymd_and_hms(2025, 1, 3, 12, 0, 0).unwrap());
    task
}
