//! PromptConfig struct definition and default implementation.

use super::types::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Configuration for prompt composition.
///
/// Chosen once at process start and treated as immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    // =========================================================================
    // Template resolution
    // =========================================================================
    /// Active template set (default: "en").
    #[serde(default = "default_templates_use")]
    pub templates_use: String,

    /// Custom template root; `<data_dir>/<set>/<path>` wins over built-ins.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Root holding the built-in `templates_<set>/` directories.
    #[serde(default = "default_builtin_dir")]
    pub builtin_dir: PathBuf,

    /// Fall back to the `en` set compiled into the binary when no file resolves.
    #[serde(default = "default_true")]
    pub embedded_fallback: bool,

    // =========================================================================
    // Composition behaviour
    // =========================================================================
    /// Whether plan-task includes the thought-chain instructions.
    #[serde(default = "default_true")]
    pub enable_thought_chain: bool,

    /// Rules file name substituted into the plan-task prompt.
    #[serde(default = "default_rules_path")]
    pub rules_path: String,

    /// Fail when a loaded template references a parameter the caller did not supply.
    #[serde(default)]
    pub strict_placeholders: bool,

    // =========================================================================
    // Operator overrides
    // =========================================================================
    /// Replace/append values keyed by variable name
    /// (`MCP_PROMPT_<KEY>` / `MCP_PROMPT_<KEY>_APPEND`).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub overrides: BTreeMap<String, String>,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            templates_use: default_templates_use(),
            data_dir: None,
            builtin_dir: default_builtin_dir(),
            embedded_fallback: default_true(),
            enable_thought_chain: default_true(),
            rules_path: default_rules_path(),
            strict_placeholders: false,
            overrides: BTreeMap::new(),
        }
    }
}
