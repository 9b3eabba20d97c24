//! Command: print the effective configuration for the lint engine.
use anyhow::{Context as _, Result};

use crate::cli::{ComposeOpts, GlobalOpts, OutputFormat};
use crate::compose::Composer;
use crate::logging::Logger;

/// Run the compose command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded, a reference is
/// unknown, or the result cannot be rendered.
pub fn run(global: &GlobalOpts, opts: &ComposeOpts, log: &Logger) -> Result<()> {
    let setup = super::CommandSetup::init(global, log)?;
    super::emit(&render(&setup, opts, log)?);
    Ok(())
}

/// Compose the loaded configuration and render it as requested.
///
/// # Errors
///
/// Returns an error if a reference is unknown or rendering fails.
pub fn render(setup: &super::CommandSetup, opts: &ComposeOpts, log: &Logger) -> Result<String> {
    let policy = opts.merge.unwrap_or(setup.config.merge);

    log.stage("Composing rule sets");
    let effective = Composer::new(&setup.registry)
        .with_policy(policy)
        .compose(&setup.config.plugins)
        .with_context(|| format!("composing {}", setup.config.path.display()))?;
    log.info(&format!(
        "{} rules configured, {} enabled",
        effective.len(),
        effective.enabled().count()
    ));
    log.debug(&format!("fingerprint: {}", effective.fingerprint()));

    if opts.fingerprint {
        return Ok(effective.fingerprint());
    }
    match opts.format {
        OutputFormat::Toml => effective.to_toml().context("rendering TOML"),
        OutputFormat::Json => effective.to_json().context("rendering JSON"),
    }
}
