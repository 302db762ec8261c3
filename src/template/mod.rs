//! Template resolution and substitution.
//!
//! - **Resolver**: locates a template file across custom and built-in sets
//! - **Render**: `{name}` placeholder substitution
//! - **Params**: the parameter maps fed to substitution
//! - **Overlay**: operator replace/append of finished prompts
//! - **Embedded**: the `en` set compiled into the binary

mod embedded;
mod overlay;
mod params;
mod render;
mod resolver;

pub use embedded::{EMBEDDED_TEMPLATES, get_embedded};
pub use overlay::{
    APPEND_SUFFIX, OVERRIDE_PREFIX, append_var_name, apply_override, replace_var_name,
    unescape_config_value,
};
pub use params::{ParamValue, Params};
pub use render::{placeholders, substitute, substitute_strict};
pub use resolver::{Candidate, DEFAULT_TEMPLATE_SET, ResolvedTemplate, TemplateResolver, Tier};
