//! User-defined presets from the project configuration, layered over a base
//! registry.
use std::collections::BTreeMap;

use serde_json::Value;

use super::{EntryKind, EntrySource, Expansion, RegistryEntry, RuleRegistry, Settings};
use crate::config::setting::RuleSetting;
use crate::error::RegistryError;

/// Raw preset table: rule name → setting value, as written in the file.
pub type PresetTable = BTreeMap<String, Value>;

/// Registry of `[presets.<name>]` tables, falling back to `base`.
///
/// Project presets shadow base entries of the same name. Their settings are
/// parsed on lookup, and every rule name must be an individual rule known to
/// `base`; package names are canonicalised to rule keys.
#[derive(Debug, Clone)]
pub struct ProjectRegistry<R> {
    presets: BTreeMap<String, PresetTable>,
    base: R,
}

impl<R: RuleRegistry> ProjectRegistry<R> {
    /// Layer `presets` over `base`.
    #[must_use]
    pub const fn new(presets: BTreeMap<String, PresetTable>, base: R) -> Self {
        Self { presets, base }
    }

    /// The registry project presets fall back to.
    #[must_use]
    pub const fn base(&self) -> &R {
        &self.base
    }

    fn expand_preset(&self, name: &str, table: &PresetTable) -> Result<Settings, RegistryError> {
        let mut settings = Settings::new();
        for (rule, value) in table {
            let key = self.canonical_rule_key(name, rule)?;
            let setting =
                RuleSetting::from_value(value).map_err(|source| RegistryError::MalformedSetting {
                    preset: name.to_string(),
                    rule: rule.clone(),
                    source,
                })?;
            settings.insert(key, setting);
        }
        Ok(settings)
    }

    fn canonical_rule_key(&self, preset: &str, rule: &str) -> Result<String, RegistryError> {
        let unknown = || RegistryError::UnknownRule {
            preset: preset.to_string(),
            rule: rule.to_string(),
        };
        match self.base.lookup(rule)? {
            Some(Expansion {
                kind: EntryKind::Rule,
                settings,
            }) => settings.into_keys().next().ok_or_else(unknown),
            _ => Err(unknown()),
        }
    }
}

impl<R: RuleRegistry> RuleRegistry for ProjectRegistry<R> {
    fn lookup(&self, name: &str) -> Result<Option<Expansion>, RegistryError> {
        match self.presets.get(name) {
            Some(table) => Ok(Some(Expansion {
                kind: EntryKind::Preset,
                settings: self.expand_preset(name, table)?,
            })),
            None => self.base.lookup(name),
        }
    }

    fn entries(&self) -> Vec<RegistryEntry> {
        let project = self.presets.iter().map(|(name, table)| RegistryEntry {
            name: name.clone(),
            kind: EntryKind::Preset,
            rule_count: table.len(),
            source: EntrySource::Project,
        });
        let base = self
            .base
            .entries()
            .into_iter()
            .filter(|e| !self.presets.contains_key(&e.name));
        project.chain(base).collect()
    }
}
