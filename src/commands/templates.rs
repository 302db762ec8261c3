//! Implementations of the template inspection commands:
//! `resolve`, `check`, and `operations`.

use crate::cli::ResolveArgs;
use std::fmt::Write;
use taskprompt::composer::Operation;
use taskprompt::config::PromptConfig;
use taskprompt::error::{PromptError, Result};
use taskprompt::template::{append_var_name, replace_var_name};

/// Outcome of checking every operation template.
#[derive(Debug, Default)]
pub struct CheckReport {
    /// One line per template, then a summary line.
    pub lines: Vec<String>,
    /// Resolution failures, in catalogue order.
    pub missing: Vec<PromptError>,
}

/// Show where a template path resolves, or its content.
pub fn cmd_resolve(config: &PromptConfig, args: &ResolveArgs) -> Result<String> {
    let resolved = config.resolver().resolve(&args.path)?;
    if args.content {
        Ok(resolved.content)
    } else {
        Ok(format!("{}: {}", resolved.tier, resolved.path.display()))
    }
}

/// Resolve every template of every operation.
pub fn cmd_check(config: &PromptConfig) -> CheckReport {
    let resolver = config.resolver();
    let mut report = CheckReport::default();
    let mut total = 0;

    for op in Operation::ALL {
        for path in op.template_paths() {
            total += 1;
            match resolver.resolve(&path) {
                Ok(resolved) => report.lines.push(format!("ok       {} ({})", path, resolved.tier)),
                Err(err) => {
                    report.lines.push(format!("missing  {}", path));
                    report.missing.push(err);
                }
            }
        }
    }

    report.lines.push(format!(
        "{} templates checked for set '{}', {} missing",
        total,
        resolver.template_set(),
        report.missing.len()
    ));
    report
}

/// Table of operations and the variables that override them.
pub fn cmd_operations() -> String {
    let mut out = String::new();
    for op in Operation::ALL {
        let _ = writeln!(
            out,
            "{:<20} {:<40} {}",
            op.dir(),
            replace_var_name(op.key()),
            append_var_name(op.key())
        );
    }
    out
}
