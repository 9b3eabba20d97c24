//! Command-line interface definitions.
use clap::{Parser, Subcommand, ValueEnum};

use crate::compose::MergePolicy;

/// Top-level CLI entry point for the rule-set composer.
#[derive(Parser, Debug)]
#[command(
    name = "lintrc",
    about = "Compose documentation-lint rule presets into one effective configuration",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by all subcommands.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Configuration file (default: nearest .lintrc.toml or .lintrc.json)
    #[arg(short, long, global = true)]
    pub config: Option<std::path::PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the effective rule configuration
    Compose(ComposeOpts),
    /// Validate every reference in the configuration
    Check(CheckOpts),
    /// Show a rule's effective setting and which reference set it
    Explain(ExplainOpts),
    /// List presets, plugins and rules the registry can resolve
    Presets(PresetsOpts),
    /// Print version information
    Version,
}

impl Command {
    /// Short name used for the log file.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Compose(_) => "compose",
            Self::Check(_) => "check",
            Self::Explain(_) => "explain",
            Self::Presets(_) => "presets",
            Self::Version => "version",
        }
    }
}

/// Output format for the composed configuration.
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// One TOML table per rule
    #[default]
    Toml,
    /// Pretty-printed JSON object
    Json,
}

/// Options for the `compose` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct ComposeOpts {
    /// Output format
    #[arg(short, long, value_enum, default_value_t)]
    pub format: OutputFormat,

    /// Override the merge policy from the configuration file
    #[arg(long, value_enum)]
    pub merge: Option<MergePolicy>,

    /// Print only the fingerprint of the effective configuration
    #[arg(long)]
    pub fingerprint: bool,
}

/// Options for the `check` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct CheckOpts {}

/// Options for the `explain` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ExplainOpts {
    /// Rule key or package name (e.g. final-newline, remark-lint-final-newline)
    pub rule: String,
}

/// Options for the `presets` subcommand.
#[derive(Parser, Debug, Clone, Default)]
pub struct PresetsOpts {
    /// Also list individual rules
    #[arg(short, long)]
    pub all: bool,
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_compose_defaults_to_toml() {
        let cli = Cli::parse_from(["lintrc", "compose"]);
        assert!(
            matches!(&cli.command, Command::Compose(_)),
            "Expected Compose command"
        );
        if let Command::Compose(opts) = cli.command {
            assert_eq!(opts.format, OutputFormat::Toml);
            assert_eq!(opts.merge, None);
            assert!(!opts.fingerprint);
        }
    }

    #[test]
    fn parse_compose_json_with_merge_override() {
        let cli = Cli::parse_from(["lintrc", "compose", "--format", "json", "--merge", "deep"]);
        if let Command::Compose(opts) = cli.command {
            assert_eq!(opts.format, OutputFormat::Json);
            assert_eq!(opts.merge, Some(MergePolicy::Deep));
        } else {
            panic!("Expected Compose command");
        }
    }

    #[test]
    fn parse_config_override() {
        let cli = Cli::parse_from(["lintrc", "--config", "docs/.lintrc.toml", "check"]);
        assert_eq!(
            cli.global.config,
            Some(std::path::PathBuf::from("docs/.lintrc.toml"))
        );
        assert!(matches!(cli.command, Command::Check(_)));
    }

    #[test]
    fn parse_config_after_subcommand() {
        let cli = Cli::parse_from(["lintrc", "check", "-c", "x.json"]);
        assert_eq!(cli.global.config, Some(std::path::PathBuf::from("x.json")));
    }

    #[test]
    fn parse_explain_rule() {
        let cli = Cli::parse_from(["lintrc", "explain", "final-newline"]);
        if let Command::Explain(opts) = cli.command {
            assert_eq!(opts.rule, "final-newline");
        } else {
            panic!("Expected Explain command");
        }
    }

    #[test]
    fn parse_presets_all() {
        let cli = Cli::parse_from(["lintrc", "presets", "--all"]);
        assert!(matches!(cli.command, Command::Presets(PresetsOpts { all: true })));
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::parse_from(["lintrc", "-v", "compose"]);
        assert!(cli.verbose);
    }

    #[test]
    fn parse_version() {
        let cli = Cli::parse_from(["lintrc", "version"]);
        assert!(matches!(cli.command, Command::Version));
        assert_eq!(cli.command.name(), "version");
    }
}
