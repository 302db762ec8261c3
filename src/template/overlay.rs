//! Operator override/append layer.
//!
//! Every operation's final prompt passes through [`apply_override`]. Two
//! configuration variables are derived from the operation key:
//!
//! - `MCP_PROMPT_<KEY>` replaces the whole prompt
//! - `MCP_PROMPT_<KEY>_APPEND` is appended after a blank line
//!
//! Replace wins when both are set. Values may carry literal `\n`, `\t` and
//! `\r` escapes, which are turned into the control characters.

use crate::config::OverrideSource;
use tracing::debug;

/// Prefix shared by every override variable.
pub const OVERRIDE_PREFIX: &str = "MCP_PROMPT_";

/// Suffix selecting append mode.
pub const APPEND_SUFFIX: &str = "_APPEND";

/// Name of the full-replace variable for `prompt_key`.
pub fn replace_var_name(prompt_key: &str) -> String {
    format!("{}{}", OVERRIDE_PREFIX, prompt_key.to_uppercase())
}

/// Name of the append variable for `prompt_key`.
pub fn append_var_name(prompt_key: &str) -> String {
    format!("{}{}", replace_var_name(prompt_key), APPEND_SUFFIX)
}

/// Turn literal `\n`, `\t`, `\r` sequences into control characters.
pub fn unescape_config_value(value: &str) -> String {
    value
        .replace("\\n", "\n")
        .replace("\\t", "\t")
        .replace("\\r", "\r")
}

/// Apply the replace/append policy for `prompt_key` to `base_prompt`.
pub fn apply_override(base_prompt: String, prompt_key: &str, source: &dyn OverrideSource) -> String {
    let replace_var = replace_var_name(prompt_key);
    if let Some(value) = non_empty(source.lookup(&replace_var)) {
        debug!(key = %prompt_key, var = %replace_var, "prompt replaced by override");
        return unescape_config_value(&value);
    }

    let append_var = append_var_name(prompt_key);
    if let Some(value) = non_empty(source.lookup(&append_var)) {
        debug!(key = %prompt_key, var = %append_var, "appending override text to prompt");
        return format!("{}\n\n{}", base_prompt, unescape_config_value(&value));
    }

    base_prompt
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
