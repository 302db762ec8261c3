//! Configuration model for taskprompt.
//!
//! This module defines the [`PromptConfig`] record handed to the composer at
//! construction. It can be built from defaults, a YAML file, or a snapshot of
//! the process environment; unknown YAML fields are ignored for forward
//! compatibility. Nothing in the composition path reads the environment
//! directly.

mod model;
mod operations;
mod source;
pub mod types;


// Re-export public API
pub use model::PromptConfig;
pub use source::OverrideSource;
pub use types::{
    DATA_DIR_VAR, ENABLE_THOUGHT_CHAIN_VAR, TEMPLATES_USE_VAR, default_builtin_dir,
};
