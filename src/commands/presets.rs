//! Command: list what the registry can resolve.
use anyhow::Result;

use crate::cli::{GlobalOpts, PresetsOpts};
use crate::logging::Logger;
use crate::registry::{EntryKind, RegistryEntry, RuleRegistry};

/// Run the presets command.
///
/// # Errors
///
/// Returns an error if the configuration file cannot be loaded.
pub fn run(global: &GlobalOpts, opts: &PresetsOpts, log: &Logger) -> Result<()> {
    let setup = super::CommandSetup::init(global, log)?;
    let entries = setup.registry.entries();
    log.debug(&format!("{} registry entries", entries.len()));
    super::emit(&format_entries(&entries, opts.all));
    Ok(())
}

/// One aligned line per entry; rules are omitted unless `all` is set.
#[must_use]
pub fn format_entries(entries: &[RegistryEntry], all: bool) -> String {
    let shown: Vec<&RegistryEntry> = entries
        .iter()
        .filter(|e| all || e.kind != EntryKind::Rule)
        .collect();
    let width = shown.iter().map(|e| e.name.len()).max().unwrap_or(0);
    shown
        .iter()
        .map(|e| {
            let rules = if e.rule_count == 1 { "rule" } else { "rules" };
            format!(
                "{:<6}  {:<width$}  {:>3} {rules}  ({})",
                e.kind.to_string(),
                e.name,
                e.rule_count,
                e.source
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
