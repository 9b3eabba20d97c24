//! Command-line entry point for `lintrc`.

use anyhow::Result;
use clap::Parser;

use lintrc_cli::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    logging::init_subscriber(args.verbose, args.command.name());
    let log = logging::Logger::new(args.command.name());

    match args.command {
        cli::Command::Compose(opts) => commands::compose::run(&args.global, &opts, &log),
        cli::Command::Check(opts) => commands::check::run(&args.global, &opts, &log),
        cli::Command::Explain(opts) => commands::explain::run(&args.global, &opts, &log),
        cli::Command::Presets(opts) => commands::presets::run(&args.global, &opts, &log),
        cli::Command::Version => {
            commands::version::run();
            Ok(())
        }
    }
}
