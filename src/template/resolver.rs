//! Template file resolution.
//!
//! A logical template path (e.g. `planTask/index.md`) is looked up in three
//! ordered tiers; the first existing file wins:
//!
//! 1. `<data_dir>/<set>/<path>` when a custom directory is configured
//! 2. `<builtin_dir>/templates_<set>/<path>`
//! 3. `<builtin_dir>/templates_en/<path>` when `<set>` is not `en`
//!
//! When no file exists, the copy of the `en` set compiled into the binary
//! is used (unless disabled with [`TemplateResolver::with_embedded`]).
//! Files are re-read on every call; there is no cache.

use super::embedded::get_embedded;
use crate::error::{PromptError, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// The template set every installation must ship completely.
pub const DEFAULT_TEMPLATE_SET: &str = "en";

/// Where a candidate path came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Operator-supplied directory.
    Custom,
    /// Built-in directory for the requested set.
    Builtin,
    /// Built-in directory for the default set.
    DefaultBuiltin,
    /// Default set compiled into the binary.
    Embedded,
}

impl Tier {
    pub fn label(&self) -> &'static str {
        match self {
            Tier::Custom => "Custom",
            Tier::Builtin => "Specific Built-in",
            Tier::DefaultBuiltin => "Default Built-in ('en')",
            Tier::Embedded => "Embedded ('en')",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One path that resolution will check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub tier: Tier,
    pub path: PathBuf,
}

impl Candidate {
    pub fn new(tier: Tier, path: impl Into<PathBuf>) -> Self {
        Self {
            tier,
            path: path.into(),
        }
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.tier, self.path.display())
    }
}

/// A successfully resolved template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedTemplate {
    pub tier: Tier,
    pub path: PathBuf,
    pub content: String,
}

/// Locates template files for one template set.
#[derive(Debug, Clone)]
pub struct TemplateResolver {
    template_set: String,
    custom_dir: Option<PathBuf>,
    builtin_dir: PathBuf,
    embedded: bool,
}

impl TemplateResolver {
    /// Create a resolver.
    ///
    /// # Arguments
    ///
    /// * `template_set` - Active set name (e.g. `en`, `zh`)
    /// * `custom_dir` - Optional operator override root
    /// * `builtin_dir` - Root holding `templates_<set>/` directories
    ///
    /// The embedded fallback is enabled.
    pub fn new(
        template_set: impl Into<String>,
        custom_dir: Option<PathBuf>,
        builtin_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            template_set: template_set.into(),
            custom_dir,
            builtin_dir: builtin_dir.into(),
            embedded: true,
        }
    }

    /// Enable or disable the compiled-in `en` fallback.
    pub fn with_embedded(mut self, embedded: bool) -> Self {
        self.embedded = embedded;
        self
    }

    pub fn template_set(&self) -> &str {
        &self.template_set
    }

    /// The ordered candidate list for `template_path`.
    pub fn candidates(&self, template_path: &str) -> Vec<Candidate> {
        let mut candidates = Vec::with_capacity(3);

        if let Some(custom_dir) = &self.custom_dir {
            candidates.push(Candidate::new(
                Tier::Custom,
                custom_dir.join(&self.template_set).join(template_path),
            ));
        }

        candidates.push(Candidate::new(
            Tier::Builtin,
            builtin_set_dir(&self.builtin_dir, &self.template_set).join(template_path),
        ));

        if self.template_set != DEFAULT_TEMPLATE_SET {
            candidates.push(Candidate::new(
                Tier::DefaultBuiltin,
                builtin_set_dir(&self.builtin_dir, DEFAULT_TEMPLATE_SET).join(template_path),
            ));
        }

        candidates
    }

    /// Find and read the winning file for `template_path`.
    ///
    /// # Returns
    ///
    /// * `Ok(ResolvedTemplate)` - The first existing candidate and its content
    /// * `Err(PromptError::TemplateNotFound)` - No tier held the file; lists every checked path
    /// * `Err(PromptError::TemplateRead)` - The winning file could not be read
    pub fn resolve(&self, template_path: &str) -> Result<ResolvedTemplate> {
        let mut checked = Vec::new();

        for candidate in self.candidates(template_path) {
            let exists = candidate.path.is_file();
            debug!(
                template = %template_path,
                tier = %candidate.tier,
                path = %candidate.path.display(),
                exists,
                "checking template candidate"
            );

            if !exists {
                checked.push(candidate);
                continue;
            }

            if candidate.tier == Tier::DefaultBuiltin {
                warn!(
                    template = %template_path,
                    set = %self.template_set,
                    "template missing from set, falling back to '{}'",
                    DEFAULT_TEMPLATE_SET
                );
            }

            let content = std::fs::read_to_string(&candidate.path).map_err(|source| {
                PromptError::TemplateRead {
                    path: candidate.path.clone(),
                    source,
                }
            })?;

            return Ok(ResolvedTemplate {
                tier: candidate.tier,
                path: candidate.path,
                content,
            });
        }

        if self.embedded
            && let Some(content) = get_embedded(template_path)
        {
            debug!(template = %template_path, "using embedded template");
            return Ok(ResolvedTemplate {
                tier: Tier::Embedded,
                path: PathBuf::from(format!(
                    "<embedded>/templates_{}/{}",
                    DEFAULT_TEMPLATE_SET, template_path
                )),
                content: content.to_string(),
            });
        }

        Err(PromptError::TemplateNotFound {
            template_path: template_path.to_string(),
            template_set: self.template_set.clone(),
            checked,
        })
    }

    /// Resolve and return only the template text.
    pub fn load(&self, template_path: &str) -> Result<String> {
        self.resolve(template_path).map(|resolved| resolved.content)
    }
}

fn builtin_set_dir(builtin_dir: &Path, template_set: &str) -> PathBuf {
    builtin_dir.join(format!("templates_{}", template_set))
}
