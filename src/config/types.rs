//! Configuration constants and default value functions.

use crate::template::DEFAULT_TEMPLATE_SET;
use std::path::PathBuf;

/// Environment variable selecting the active template set.
pub const TEMPLATES_USE_VAR: &str = "TEMPLATES_USE";

/// Environment variable naming the custom template root.
pub const DATA_DIR_VAR: &str = "DATA_DIR";

/// Environment variable toggling the thought-chain fragment (`"false"` disables).
pub const ENABLE_THOUGHT_CHAIN_VAR: &str = "ENABLE_THOUGHT_CHAIN";

/// Root of the template sets in the source tree.
///
/// Installed binaries may not have this directory; the embedded `en` set
/// covers that case.
pub fn default_builtin_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/templates"))
}

// Default value functions for serde
pub(crate) fn default_templates_use() -> String {
    DEFAULT_TEMPLATE_SET.to_string()
}
pub(crate) fn default_rules_path() -> String {
    "project-rules.md".to_string()
}
pub(crate) fn default_true() -> bool {
    true
}
