//! CLI argument parsing for taskprompt.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::Parser;
use clap::Subcommand;
use std::path::PathBuf;

/// Taskprompt: template-driven prompt composition for task assistants.
///
/// Prompts are built from Markdown templates resolved across three tiers:
/// - Custom templates under `<data-dir>/<set>/`
/// - Built-in templates for the selected set
/// - Built-in English templates as the final fallback
#[derive(Parser, Debug)]
#[command(name = "taskprompt")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// YAML config file, layered under the environment.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Template set to use (overrides TEMPLATES_USE).
    #[arg(long, global = true)]
    pub templates_use: Option<String>,

    /// Root of custom template sets (overrides DATA_DIR).
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Root of the built-in template sets.
    #[arg(long, global = true)]
    pub builtin_dir: Option<PathBuf>,

    /// Fail when a template placeholder has no value.
    #[arg(long, global = true)]
    pub strict: bool,

    /// Log resolution and composition details to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for taskprompt.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the prompt for an operation.
    ///
    /// Reads the operation's JSON parameters from a file or stdin and
    /// prints the final prompt.
    Render(RenderArgs),

    /// Show which tier serves a template path.
    ///
    /// Prints the winning candidate, or every checked path when none exists.
    Resolve(ResolveArgs),

    /// Verify every operation template resolves with the current settings.
    Check,

    /// List every operation with its override variable names.
    Operations,
}

/// Arguments for the `render` command.
#[derive(Parser, Debug)]
pub struct RenderArgs {
    /// Operation name (`planTask`) or key (`PLAN_TASK`).
    pub operation: String,

    /// JSON parameters file, or `-` for stdin. Defaults to `{}`.
    #[arg(short, long)]
    pub params: Option<String>,
}

/// Arguments for the `resolve` command.
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Logical template path (e.g., `planTask/index.md`).
    pub path: String,

    /// Print the template content instead of its location.
    #[arg(long)]
    pub content: bool,
}

impl Cli {
    /// Parse command line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        // Verifies the CLI arguments configuration is valid
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_render_minimal() {
        let cli = Cli::try_parse_from(["taskprompt", "render", "planTask"]).unwrap();
        if let Command::Render(args) = cli.command {
            assert_eq!(args.operation, "planTask");
            assert!(args.params.is_none());
        } else {
            panic!("Expected Render command");
        }
        assert!(!cli.strict);
        assert!(cli.templates_use.is_none());
    }

    #[test]
    fn parse_render_with_globals_after_subcommand() {
        let cli = Cli::try_parse_from([
            "taskprompt",
            "render",
            "VERIFY_TASK",
            "--params",
            "-",
            "--templates-use",
            "zh",
            "--data-dir",
            "/data",
            "--strict",
        ])
        .unwrap();
        assert_eq!(cli.templates_use.as_deref(), Some("zh"));
        assert_eq!(cli.data_dir, Some(PathBuf::from("/data")));
        assert!(cli.strict);
        if let Command::Render(args) = cli.command {
            assert_eq!(args.params.as_deref(), Some("-"));
        } else {
            panic!("Expected Render command");
        }
    }

    #[test]
    fn parse_resolve() {
        let cli = Cli::try_parse_from(["taskprompt", "resolve", "planTask/index.md", "--content"])
            .unwrap();
        if let Command::Resolve(args) = cli.command {
            assert_eq!(args.path, "planTask/index.md");
            assert!(args.content);
        } else {
            panic!("Expected Resolve command");
        }
    }

    #[test]
    fn parse_check_and_operations() {
        let cli = Cli::try_parse_from(["taskprompt", "--config", "tp.yaml", "check"]).unwrap();
        assert!(matches!(cli.command, Command::Check));
        assert_eq!(cli.config, Some(PathBuf::from("tp.yaml")));

        let cli = Cli::try_parse_from(["taskprompt", "operations"]).unwrap();
        assert!(matches!(cli.command, Command::Operations));
    }

    #[test]
    fn parse_render_requires_operation() {
        assert!(Cli::try_parse_from(["taskprompt", "render"]).is_err());
    }
}
