//! Placeholder substitution.
//!
//! Templates use `{name}` placeholders where `name` is made of ASCII
//! letters, digits, and underscores:
//!
//! ```text
//! ## Task: {name}
//!
//! {notesTemplate}
//! ```
//!
//! Substitution is a single left-to-right pass. A placeholder whose name is
//! in the parameter map is replaced by the rendered value (absent values
//! render as `""`); a placeholder with no matching key is left untouched.
//! Substituted values are never rescanned, so braces inside values survive.

use super::params::Params;
use crate::error::{PromptError, Result};
use regex::Regex;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([A-Za-z0-9_]+)\}").unwrap_or_else(|e| panic!("invalid placeholder regex: {e}"))
});

/// Substitute `params` into `template`.
///
/// # Examples
///
/// ```
/// use taskprompt::template::{Params, substitute};
///
/// let params = Params::new().with("a", "x");
/// assert_eq!(substitute("{a}-{a}", &params), "x-x");
/// assert_eq!(substitute("{a} and {b}", &params), "x and {b}");
/// ```
pub fn substitute(template: &str, params: &Params) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &regex::Captures<'_>| match params.get(&caps[1]) {
            Some(value) => value.render(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

/// Substitute like [`substitute`], but fail when the template references a
/// placeholder the caller did not supply.
///
/// `template_name` is only used for the error message.
pub fn substitute_strict(template_name: &str, template: &str, params: &Params) -> Result<String> {
    let missing: Vec<String> = placeholders(template)
        .into_iter()
        .filter(|name| !params.contains(name))
        .collect();

    if !missing.is_empty() {
        return Err(PromptError::UnresolvedPlaceholder {
            template: template_name.to_string(),
            names: missing,
        });
    }

    Ok(substitute(template, params))
}

/// Distinct placeholder names in `text`, in first-seen order.
pub fn placeholders(text: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for caps in PLACEHOLDER.captures_iter(text) {
        let name = &caps[1];
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }
    names
}
