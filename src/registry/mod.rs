//! Rule registries: resolve a name to the rule settings it contributes.
//!
//! The composer never knows where rule sets come from. It asks a
//! [`RuleRegistry`] to expand each name, and the registry answers with an
//! [`Expansion`], `None` for an unknown name, or a [`RegistryError`] for an
//! entry that exists but is malformed.
pub mod builtin;
pub mod project;

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::config::setting::RuleSetting;
use crate::error::RegistryError;

pub use builtin::BuiltinRegistry;
pub use project::ProjectRegistry;

/// Rule key → setting, as contributed by one registry entry.
pub type Settings = BTreeMap<String, RuleSetting>;

/// What a registry entry is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// A named bundle of rule settings.
    Preset,
    /// A single rule.
    Rule,
    /// A parser or transformer plugin contributing zero or more rules.
    Plugin,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Preset => "preset",
            Self::Rule => "rule",
            Self::Plugin => "plugin",
        })
    }
}

/// Where a registry entry is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntrySource {
    /// Shipped with the tool.
    Builtin,
    /// Declared under `[presets]` in the project configuration file.
    Project,
}

impl fmt::Display for EntrySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Builtin => "builtin",
            Self::Project => "project",
        })
    }
}

/// The settings a registry entry expands to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expansion {
    /// What kind of entry produced the settings.
    pub kind: EntryKind,
    /// Contributed settings, keyed by canonical rule key.
    pub settings: Settings,
}

impl Expansion {
    /// Expansion of a single rule.
    #[must_use]
    pub fn rule(key: impl Into<String>, setting: RuleSetting) -> Self {
        Self {
            kind: EntryKind::Rule,
            settings: BTreeMap::from([(key.into(), setting)]),
        }
    }
}

/// One line of a registry listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryEntry {
    /// Name the entry is referenced by.
    pub name: String,
    /// Entry kind.
    pub kind: EntryKind,
    /// Number of rule settings the entry contributes.
    pub rule_count: usize,
    /// Where the entry is defined.
    pub source: EntrySource,
}

/// Resolves rule-set names to their settings.
///
/// Implementations must be pure lookups: no caching of merge state and no
/// I/O, so one registry can serve concurrent compositions.
#[cfg_attr(test, mockall::automock)]
pub trait RuleRegistry {
    /// Expand `name`.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the entry exists but its settings are
    /// malformed. An unknown name is `Ok(None)`.
    fn lookup(&self, name: &str) -> Result<Option<Expansion>, RegistryError>;

    /// All entries this registry can resolve, for listing.
    fn entries(&self) -> Vec<RegistryEntry>;
}
