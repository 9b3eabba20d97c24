//! Rule-set references as declared in the `plugins` list.
use std::fmt;

use serde::{Deserialize, Serialize};

/// An identifier naming a preset, plugin or individual rule.
///
/// Stored exactly as declared so errors can echo the operator's text.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSetReference(String);

/// The two shapes a reference can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceForm<'a> {
    /// A bare name: `remark-preset-lint-recommended`, `final-newline`.
    Named(&'a str),
    /// An inline override of one rule: `final-newline=off`.
    Inline {
        /// Rule name on the left of `=`.
        rule: &'a str,
        /// Setting text on the right of `=`.
        value: &'a str,
    },
}

impl RuleSetReference {
    /// Wrap a declared identifier.
    #[must_use]
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// The identifier exactly as declared.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split the reference into its name and optional inline setting.
    ///
    /// Only the first `=` separates, so JSON settings may contain `=`.
    #[must_use]
    pub fn form(&self) -> ReferenceForm<'_> {
        let trimmed = self.0.trim();
        match trimmed.split_once('=') {
            Some((rule, value)) => ReferenceForm::Inline {
                rule: rule.trim(),
                value: value.trim(),
            },
            None => ReferenceForm::Named(trimmed),
        }
    }

    /// The registry name this reference looks up.
    #[must_use]
    pub fn name(&self) -> &str {
        match self.form() {
            ReferenceForm::Named(name) | ReferenceForm::Inline { rule: name, .. } => name,
        }
    }
}

impl fmt::Display for RuleSetReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RuleSetReference {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RuleSetReference {
    fn from(value: String) -> Self {
        Self(value)
    }
}
