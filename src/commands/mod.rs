//! Subcommand implementations and their shared setup.
pub mod check;
pub mod compose;
pub mod explain;
pub mod presets;
pub mod version;

use anyhow::{Context as _, Result};
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::config::LintConfig;
use crate::logging::Logger;
use crate::registry::{BuiltinRegistry, ProjectRegistry};

/// Shared state produced by the common command setup sequence.
///
/// Encapsulates configuration discovery, loading and registry construction
/// so that each command does not have to repeat the boilerplate.
#[derive(Debug)]
pub struct CommandSetup {
    /// The loaded configuration file.
    pub config: LintConfig,
    /// Project presets layered over the built-in catalogue.
    pub registry: ProjectRegistry<BuiltinRegistry>,
}

impl CommandSetup {
    /// Locate and load the configuration file and build its registry.
    ///
    /// # Errors
    ///
    /// Returns an error if no configuration file can be found or it fails to
    /// load.
    pub fn init(global: &GlobalOpts, log: &Logger) -> Result<Self> {
        let path = resolve_config_path(global)?;

        log.stage("Loading configuration");
        log.info(&format!("config: {}", path.display()));
        let config = LintConfig::load(&path)
            .with_context(|| format!("loading {}", path.display()))?;

        log.debug(&format!("{} references", config.plugins.len()));
        log.debug(&format!("{} project presets", config.presets.len()));
        log.debug(&format!("merge policy: {:?}", config.merge));

        let registry = config.registry();
        Ok(Self { config, registry })
    }
}

/// Use `--config` when given, otherwise search upward from the working
/// directory.
///
/// # Errors
///
/// Returns an error if the working directory cannot be read or no
/// configuration file is found.
pub fn resolve_config_path(global: &GlobalOpts) -> Result<PathBuf> {
    if let Some(path) = &global.config {
        return Ok(path.clone());
    }
    let cwd = std::env::current_dir().context("reading current directory")?;
    Ok(LintConfig::discover(&cwd)?)
}

/// Write command output to stdout.
#[allow(clippy::print_stdout)]
pub(crate) fn emit(text: &str) {
    println!("{text}");
}
