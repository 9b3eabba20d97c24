//! Command: validate every reference in the configuration.
use std::collections::HashSet;

use anyhow::{Result, bail};

use crate::cli::{CheckOpts, GlobalOpts};
use crate::compose::Composer;
use crate::error::ComposeError;
use crate::logging::{CheckStatus, Logger};

/// Run the check command.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or any reference
/// fails to resolve.
pub fn run(global: &GlobalOpts, _opts: &CheckOpts, log: &Logger) -> Result<()> {
    let setup = super::CommandSetup::init(global, log)?;
    check(&setup, log)
}

/// Resolve every reference, recording one summary entry per reference.
///
/// Unlike composition, which stops at the first unknown reference, every
/// failure is reported. References that resolve but have no effect
/// (repeated verbatim, or fully overridden by later references) are flagged
/// as redundant.
///
/// # Errors
///
/// Returns an error if one or more references could not be resolved.
pub fn check(setup: &super::CommandSetup, log: &Logger) -> Result<()> {
    let plugins = &setup.config.plugins;
    log.stage(&format!("Checking {} reference(s)", plugins.len()));

    let composer = Composer::new(&setup.registry).with_policy(setup.config.merge);
    let resolved: Vec<_> = plugins.iter().map(|r| (r, composer.resolve(r))).collect();
    let effective = if resolved.iter().all(|(_, r)| r.is_ok()) {
        Some(composer.compose(plugins)?)
    } else {
        None
    };

    let mut seen = HashSet::new();
    for (reference, result) in &resolved {
        let name = reference.as_str();
        match result {
            Err(ComposeError::UnknownRuleSet { reason, .. }) => {
                log.error(&format!("unknown rule set '{name}': {reason}"));
                log.record(name, CheckStatus::Failed, Some(&reason.to_string()));
            }
            Ok(_) if !seen.insert(name.trim()) => {
                log.warn(&format!("'{name}' is listed more than once"));
                log.record(name, CheckStatus::Warning, Some("duplicate"));
            }
            Ok(expansion)
                if !expansion.settings.is_empty()
                    && effective
                        .as_ref()
                        .is_some_and(|e| !e.is_contributed_by(reference)) =>
            {
                log.warn(&format!(
                    "'{name}' has no effect: every rule it sets is overridden later"
                ));
                log.record(name, CheckStatus::Warning, Some("fully overridden"));
            }
            Ok(expansion) => {
                let count = expansion.settings.len();
                let rules = if count == 1 { "rule" } else { "rules" };
                log.debug(&format!("{name}: {} with {count} {rules}", expansion.kind));
                log.record(
                    name,
                    CheckStatus::Ok,
                    Some(&format!("{}, {count} {rules}", expansion.kind)),
                );
            }
        }
    }

    log.print_summary();

    let count = log.failure_count();
    if count > 0 {
        bail!("{count} reference(s) could not be resolved");
    }
    Ok(())
}
