//! Domain-specific error types for the rule-set composer.
//!
//! Library modules return typed errors built with [`thiserror`]; command
//! handlers at the CLI boundary convert them to [`anyhow::Error`] via the
//! standard `?` operator and attach context.
//!
//! # Error hierarchy
//!
//! ```text
//! LintrcError
//! ├── Config(ConfigError)     : discovery, reading and parsing .lintrc files
//! └── Compose(ComposeError)   : UnknownRuleSet for an offending reference
//!     └── UnresolvedReason
//!         ├── NotFound
//!         ├── Registry(RegistryError) : malformed preset contents
//!         ├── NotARule
//!         └── InvalidSetting(SettingError)
//! ```

use thiserror::Error;

use crate::registry::EntryKind;

/// Top-level error type for loading and composing a lint configuration.
#[derive(Error, Debug)]
pub enum LintrcError {
    /// The configuration file could not be found, read or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A referenced rule set could not be resolved.
    #[error("Composition error: {0}")]
    Compose(#[from] ComposeError),
}

/// Errors that arise from locating and parsing configuration files.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No configuration file exists in the start directory or its ancestors.
    #[error("No .lintrc.toml or .lintrc.json found in {0} or any parent directory")]
    NotFound(String),

    /// The file extension is neither `toml` nor `json`.
    #[error("Unsupported config file format: {0}")]
    UnsupportedFormat(String),

    /// The file contains a syntax or schema error.
    #[error("Invalid syntax in {file}: {message}")]
    InvalidSyntax {
        /// Path of the offending file.
        file: String,
        /// Parser message.
        message: String,
    },

    /// An I/O error occurred while reading a config file.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// A rule setting value that cannot be interpreted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingError {
    /// `null` carries neither a severity nor options.
    #[error("null is not a valid rule setting")]
    Null,

    /// Numeric severity outside `0..=2`.
    #[error("severity level {0} is out of range (expected 0, 1 or 2)")]
    LevelOutOfRange(i64),

    /// A value in severity position is not a known severity.
    #[error("unknown severity {0}")]
    UnknownSeverity(String),

    /// Array form must be `[severity]` or `[severity, options]`.
    #[error("expected [severity] or [severity, options], found {0} elements")]
    ArrayLength(usize),

    /// Table form only accepts `severity` and `options`.
    #[error("unexpected key '{0}' in rule setting table")]
    UnexpectedKey(String),

    /// Inline override with nothing after `=`.
    #[error("missing setting after '='")]
    EmptyValue,
}

/// Errors reported by a rule registry for entries that exist but are broken.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A preset assigns a setting that cannot be parsed.
    #[error("preset '{preset}' has a malformed setting for '{rule}': {source}")]
    MalformedSetting {
        /// Name of the preset.
        preset: String,
        /// Rule key whose setting is malformed.
        rule: String,
        /// Parse failure.
        source: SettingError,
    },

    /// A preset names a rule the registry does not know.
    #[error("preset '{preset}' refers to unknown rule '{rule}'")]
    UnknownRule {
        /// Name of the preset.
        preset: String,
        /// Unknown rule name.
        rule: String,
    },
}

/// Why a reference could not be resolved.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnresolvedReason {
    /// The registry has no entry with this name.
    #[error("not found in the rule registry")]
    NotFound,

    /// The registry entry exists but is malformed.
    #[error("{0}")]
    Registry(#[from] RegistryError),

    /// An inline `rule=value` override targets a preset or plugin.
    #[error("inline settings apply to individual rules only, '{name}' is a {kind}")]
    NotARule {
        /// Name that was looked up.
        name: String,
        /// What the name actually refers to.
        kind: EntryKind,
    },

    /// The value of an inline `rule=value` override is malformed.
    #[error("invalid inline setting: {0}")]
    InvalidSetting(#[from] SettingError),
}

/// Errors returned by the composer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComposeError {
    /// A reference could not be resolved; composition was aborted.
    #[error("Unknown rule set '{reference}': {reason}")]
    UnknownRuleSet {
        /// The offending reference, exactly as declared.
        reference: String,
        /// Why resolution failed.
        reason: UnresolvedReason,
    },
}

impl ComposeError {
    /// The reference that caused the failure.
    #[must_use]
    pub fn reference(&self) -> &str {
        match self {
            Self::UnknownRuleSet { reference, .. } => reference,
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;
    use std::io;

    // -----------------------------------------------------------------------
    // ConfigError
    // -----------------------------------------------------------------------

    #[test]
    fn config_error_not_found_display() {
        let e = ConfigError::NotFound("/work/docs".to_string());
        assert_eq!(
            e.to_string(),
            "No .lintrc.toml or .lintrc.json found in /work/docs or any parent directory"
        );
    }

    #[test]
    fn config_error_invalid_syntax_display() {
        let e = ConfigError::InvalidSyntax {
            file: ".lintrc.toml".to_string(),
            message: "expected `=`".to_string(),
        };
        assert_eq!(e.to_string(), "Invalid syntax in .lintrc.toml: expected `=`");
    }

    #[test]
    fn config_error_io_has_source() {
        use std::error::Error as StdError;
        let e = ConfigError::Io {
            path: "/work/.lintrc.toml".to_string(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
        };
        assert!(e.to_string().contains("/work/.lintrc.toml"));
        assert!(e.source().is_some());
    }

    // -----------------------------------------------------------------------
    // ComposeError
    // -----------------------------------------------------------------------

    #[test]
    fn unknown_rule_set_names_reference() {
        let e = ComposeError::UnknownRuleSet {
            reference: "unknown-preset".to_string(),
            reason: UnresolvedReason::NotFound,
        };
        assert_eq!(e.reference(), "unknown-preset");
        assert_eq!(
            e.to_string(),
            "Unknown rule set 'unknown-preset': not found in the rule registry"
        );
    }

    #[test]
    fn unknown_rule_set_carries_registry_reason() {
        let e = ComposeError::UnknownRuleSet {
            reference: "house".to_string(),
            reason: RegistryError::MalformedSetting {
                preset: "house".to_string(),
                rule: "final-newline".to_string(),
                source: SettingError::LevelOutOfRange(7),
            }
            .into(),
        };
        assert!(e.to_string().contains("malformed setting for 'final-newline'"));
        assert!(e.to_string().contains("severity level 7 is out of range"));
    }

    #[test]
    fn not_a_rule_display() {
        let reason = UnresolvedReason::NotARule {
            name: "remark-gfm".to_string(),
            kind: EntryKind::Plugin,
        };
        assert_eq!(
            reason.to_string(),
            "inline settings apply to individual rules only, 'remark-gfm' is a plugin"
        );
    }

    // -----------------------------------------------------------------------
    // LintrcError conversions
    // -----------------------------------------------------------------------

    #[test]
    fn lintrc_error_from_config_error() {
        let e: LintrcError = ConfigError::UnsupportedFormat("yaml".to_string()).into();
        assert!(e.to_string().contains("Configuration error"));
    }

    #[test]
    fn lintrc_error_from_compose_error() {
        let e: LintrcError = ComposeError::UnknownRuleSet {
            reference: "x".to_string(),
            reason: UnresolvedReason::NotFound,
        }
        .into();
        assert!(e.to_string().contains("Composition error"));
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn all_error_types_are_send_sync() {
        assert_send_sync::<LintrcError>();
        assert_send_sync::<ConfigError>();
        assert_send_sync::<ComposeError>();
        assert_send_sync::<RegistryError>();
        assert_send_sync::<SettingError>();
    }

    #[test]
    fn compose_error_converts_to_anyhow() {
        let e = ComposeError::UnknownRuleSet {
            reference: "x".to_string(),
            reason: UnresolvedReason::NotFound,
        };
        let _anyhow_err: anyhow::Error = e.into();
    }
}
