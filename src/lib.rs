//! Documentation-lint rule-set composer.
//!
//! A project lists rule-set references (presets, plugins and individual
//! rules) in `.lintrc.toml` or `.lintrc.json`. This crate resolves each
//! reference through a rule registry and folds the results, in declaration
//! order, into one effective configuration for a downstream lint engine.
//! Later references override earlier ones for the same rule key.
//!
//! The public API is organised into four layers:
//!
//! - **[`config`]**: locate and parse configuration files; references and settings
//! - **[`registry`]**: resolve names to rule settings (built-in and project presets)
//! - **[`compose`]**: the ordered, last-write-wins fold
//! - **[`commands`]**: top-level subcommand orchestration (`compose`, `check`, …)
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]
#![cfg_attr(test, allow(missing_docs))]

pub mod cli;
pub mod commands;
pub mod compose;
pub mod config;
pub mod error;
pub mod logging;
pub mod registry;

use std::path::Path;

pub use compose::{Composer, EffectiveConfiguration, MergePolicy, compose};
pub use config::{LintConfig, RuleSetReference, RuleSetting, Severity};
pub use error::{ComposeError, LintrcError};
pub use registry::{BuiltinRegistry, RuleRegistry};

/// Load the configuration file at `path` and compose it with the merge
/// policy it declares.
///
/// This is the entry point for a lint engine embedding the composer.
///
/// # Errors
///
/// Returns [`LintrcError::Config`] if the file cannot be loaded and
/// [`LintrcError::Compose`] if a reference cannot be resolved.
pub fn compose_file(path: &Path) -> Result<EffectiveConfiguration, LintrcError> {
    let config = LintConfig::load(path)?;
    let registry = config.registry();
    Ok(Composer::new(&registry)
        .with_policy(config.merge)
        .compose(&config.plugins)?)
}
