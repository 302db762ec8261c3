//! Implementation of the `taskprompt render` command.

use crate::cli::RenderArgs;
use serde_json::Value;
use std::io::Read;
use taskprompt::composer::{Operation, PromptComposer};
use taskprompt::config::PromptConfig;
use taskprompt::error::{PromptError, Result};
use tracing::info;

/// Compose the prompt for `args.operation` from its JSON parameters.
pub fn cmd_render(config: PromptConfig, args: &RenderArgs) -> Result<String> {
    let operation: Operation = args.operation.parse()?;
    let params = read_params(args.params.as_deref())?;

    info!(operation = %operation, set = %config.templates_use, "rendering prompt");
    PromptComposer::new(config).compose_json(operation, params)
}

/// Read parameters from a file, from stdin (`-`), or default to `{}`.
fn read_params(source: Option<&str>) -> Result<Value> {
    let text = match source {
        None => return Ok(Value::Object(Default::default())),
        Some("-") => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| PromptError::InvalidInput(format!("failed to read stdin: {}", e)))?;
            buf
        }
        Some(path) => std::fs::read_to_string(path).map_err(|e| {
            PromptError::InvalidInput(format!("failed to read parameters '{}': {}", path, e))
        })?,
    };
    parse_params(&text)
}

fn parse_params(text: &str) -> Result<Value> {
    serde_json::from_str(text)
        .map_err(|e| PromptError::InvalidInput(format!("parameters are not valid JSON: {}", e)))
}
