//! Configuration file discovery, loading and the reference/setting types it holds.
pub mod loader;
pub mod reference;
pub mod setting;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::compose::MergePolicy;
use crate::error::ConfigError;
use crate::registry::project::PresetTable;
use crate::registry::{BuiltinRegistry, ProjectRegistry};

pub use reference::RuleSetReference;
pub use setting::{RuleSetting, Severity};

/// Configuration file names searched for, in order of preference.
pub const CONFIG_FILE_NAMES: &[&str] = &[".lintrc.toml", ".lintrc.json"];

/// On-disk shape of a configuration file.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    plugins: Vec<RuleSetReference>,
    merge: MergePolicy,
    presets: BTreeMap<String, PresetTable>,
}

/// A loaded lint configuration file.
#[derive(Debug, Clone)]
pub struct LintConfig {
    /// File the configuration was read from.
    pub path: PathBuf,
    /// Rule-set references in priority order (later wins).
    pub plugins: Vec<RuleSetReference>,
    /// How settings for the same rule key combine.
    pub merge: MergePolicy,
    /// User-defined presets, by name.
    pub presets: BTreeMap<String, PresetTable>,
}

impl LintConfig {
    /// Load the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has an unsupported
    /// extension, or does not match the expected schema.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw: RawConfig = loader::load_config(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            plugins: raw.plugins,
            merge: raw.merge,
            presets: raw.presets,
        })
    }

    /// Find the nearest configuration file, starting at `start` and walking
    /// up to the filesystem root.
    ///
    /// Within one directory `.lintrc.toml` is preferred over `.lintrc.json`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NotFound`] if no directory holds a config file.
    pub fn discover(start: &Path) -> Result<PathBuf, ConfigError> {
        start
            .ancestors()
            .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
            .find(|candidate| candidate.is_file())
            .ok_or_else(|| ConfigError::NotFound(start.display().to_string()))
    }

    /// Registry resolving this file's presets first, then the built-in
    /// catalogue.
    #[must_use]
    pub fn registry(&self) -> ProjectRegistry<BuiltinRegistry> {
        ProjectRegistry::new(self.presets.clone(), BuiltinRegistry)
    }
}
