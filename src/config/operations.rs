//! Config loading, validation, and utility operations.

use super::model::PromptConfig;
use super::types::{DATA_DIR_VAR, ENABLE_THOUGHT_CHAIN_VAR, TEMPLATES_USE_VAR};
use crate::error::{PromptError, Result};
use crate::template::{OVERRIDE_PREFIX, TemplateResolver};
use std::path::{Path, PathBuf};

impl PromptConfig {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(PromptConfig)` - Successfully loaded and validated config
    /// * `Err(PromptError::Config)` - Read error, parse error, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            PromptError::Config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: PromptConfig = serde_yaml::from_str(yaml)
            .map_err(|e| PromptError::Config(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| PromptError::Config(format!("failed to serialize config to YAML: {}", e)))
    }

    /// Snapshot the process environment into a config.
    pub fn from_env() -> Result<Self> {
        Self::default().with_env()
    }

    /// Layer the process environment over this config.
    pub fn with_env(self) -> Result<Self> {
        self.with_vars(std::env::vars())
    }

    /// Build a config from `(name, value)` pairs, starting from defaults.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::default().with_vars(vars)
    }

    /// Layer `(name, value)` pairs over this config.
    ///
    /// Recognized names: `TEMPLATES_USE`, `DATA_DIR`, `ENABLE_THOUGHT_CHAIN`,
    /// and every `MCP_PROMPT_*` override variable. Empty values are ignored.
    pub fn with_vars<I, K, V>(mut self, vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in vars {
            self.apply_var(&name.into(), value.into());
        }
        self.validate()?;
        Ok(self)
    }

    fn apply_var(&mut self, name: &str, value: String) {
        if value.is_empty() {
            return;
        }
        match name {
            TEMPLATES_USE_VAR => self.templates_use = value,
            DATA_DIR_VAR => self.data_dir = Some(PathBuf::from(value)),
            ENABLE_THOUGHT_CHAIN_VAR => self.enable_thought_chain = value != "false",
            _ if name.starts_with(OVERRIDE_PREFIX) => {
                self.overrides.insert(name.to_string(), value);
            }
            _ => {}
        }
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - `templates_use` must be non-empty
    /// - `templates_use` must not contain `..`
    /// - `rules_path` must be non-empty
    pub fn validate(&self) -> Result<()> {
        if self.templates_use.trim().is_empty() {
            return Err(PromptError::Config(
                "templates_use must not be empty".to_string(),
            ));
        }

        if self.templates_use.contains("..") {
            return Err(PromptError::Config(format!(
                "templates_use must name a template set, not a relative path (found '{}')",
                self.templates_use
            )));
        }

        if self.rules_path.trim().is_empty() {
            return Err(PromptError::Config(
                "rules_path must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Build the template resolver described by this config.
    pub fn resolver(&self) -> TemplateResolver {
        TemplateResolver::new(
            self.templates_use.clone(),
            self.data_dir.clone(),
            self.builtin_dir.clone(),
        )
        .with_embedded(self.embedded_fallback)
    }
}
