//! Taskprompt: template-driven prompt composition for task-orchestration assistants.
//!
//! Prompts are assembled from Markdown templates. A [`template::TemplateResolver`]
//! finds each template across the custom, set-specific, and default tiers;
//! [`composer::PromptComposer`] fills them from host-supplied task data and
//! applies the `MCP_PROMPT_*` override layer.

pub mod composer;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod task;
pub mod template;

#[cfg(test)]
mod test_support;
