//! Lookup-by-key access to override values.

use super::model::PromptConfig;
use std::collections::{BTreeMap, HashMap};

/// Anything that can answer "what is the value of configuration variable `name`?".
pub trait OverrideSource {
    fn lookup(&self, name: &str) -> Option<String>;
}

impl OverrideSource for PromptConfig {
    fn lookup(&self, name: &str) -> Option<String> {
        self.overrides.get(name).cloned()
    }
}

impl OverrideSource for BTreeMap<String, String> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl OverrideSource for HashMap<String, String> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}
