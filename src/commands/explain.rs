//! Command: show where a rule's effective setting comes from.
use anyhow::{Context as _, Result, bail};

use crate::cli::{ExplainOpts, GlobalOpts};
use crate::compose::Composer;
use crate::config::RuleSetReference;
use crate::logging::Logger;
use crate::registry::{EntryKind, RuleRegistry};

/// Run the explain command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be composed or the rule is
/// not known to the registry.
pub fn run(global: &GlobalOpts, opts: &ExplainOpts, log: &Logger) -> Result<()> {
    let setup = super::CommandSetup::init(global, log)?;
    super::emit(&explain(&setup, &opts.rule)?);
    Ok(())
}

/// Describe the effective setting of `rule` and the reference that set it.
///
/// # Errors
///
/// Returns an error if composition fails or `rule` is not an individual rule.
pub fn explain(setup: &super::CommandSetup, rule: &str) -> Result<String> {
    let key = match setup.registry.lookup(rule)? {
        Some(expansion) if expansion.kind == EntryKind::Rule => expansion
            .settings
            .into_keys()
            .next()
            .unwrap_or_else(|| rule.to_string()),
        Some(expansion) => bail!("'{rule}' is a {}, not a rule", expansion.kind),
        None => bail!("unknown rule '{rule}'"),
    };

    let effective = Composer::new(&setup.registry)
        .with_policy(setup.config.merge)
        .compose(&setup.config.plugins)
        .context("composing rule sets")?;

    let Some(setting) = effective.get(&key) else {
        return Ok(format!("{key}: not configured"));
    };
    let origins: Vec<&str> = effective
        .origins(&key)
        .iter()
        .map(RuleSetReference::as_str)
        .collect();
    Ok(format!("{key}: {setting} (set by {})", origins.join(", ")))
}
