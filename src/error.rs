//! Error types for taskprompt.
//!
//! Uses thiserror for derive macros. Only resolution and configuration
//! problems are errors; absent optional task data never is.

use crate::exit_codes;
use crate::template::Candidate;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for prompt composition.
#[derive(Error, Debug)]
pub enum PromptError {
    /// No resolution tier held the requested template.
    #[error(
        "template file not found: '{template_path}' in template set '{template_set}'. Checked paths:\n{}",
        format_checked(.checked)
    )]
    TemplateNotFound {
        /// Logical template path, e.g. `planTask/index.md`.
        template_path: String,
        /// The template set that was requested.
        template_set: String,
        /// Every candidate that was checked, in resolution order.
        checked: Vec<Candidate>,
    },

    /// A candidate file existed but could not be read.
    #[error("failed to read template '{}': {source}", .path.display())]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Strict mode found placeholders with no supplied parameter.
    #[error("unresolved placeholders in '{template}': {}", .names.join(", "))]
    UnresolvedPlaceholder { template: String, names: Vec<String> },

    /// Caller input could not select a branch (unknown operation, malformed parameters).
    #[error("{0}")]
    InvalidInput(String),

    /// Configuration could not be loaded or failed validation.
    #[error("configuration error: {0}")]
    Config(String),
}

impl PromptError {
    /// Returns the appropriate exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            PromptError::TemplateNotFound { .. }
            | PromptError::TemplateRead { .. }
            | PromptError::UnresolvedPlaceholder { .. } => exit_codes::TEMPLATE_FAILURE,
            PromptError::InvalidInput(_) | PromptError::Config(_) => exit_codes::USER_ERROR,
        }
    }
}

fn format_checked(checked: &[Candidate]) -> String {
    checked
        .iter()
        .map(|c| format!(" - {}", c))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Result type alias for taskprompt operations.
pub type Result<T> = std::result::Result<T, PromptError>;
