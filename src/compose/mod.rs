//! Rule-set composition: fold an ordered list of references into one
//! effective configuration, later references overriding earlier ones.
pub mod effective;
pub mod merge;

use std::fmt;

pub use effective::EffectiveConfiguration;
pub use merge::MergePolicy;

use crate::config::reference::{ReferenceForm, RuleSetReference};
use crate::config::setting::RuleSetting;
use crate::error::{ComposeError, UnresolvedReason};
use crate::registry::{EntryKind, Expansion, RuleRegistry};

/// Resolves references through a registry and folds them in order.
///
/// Holds no merge state between calls; every [`compose`](Self::compose)
/// starts from an empty accumulator.
#[derive(Clone, Copy)]
pub struct Composer<'r> {
    registry: &'r dyn RuleRegistry,
    policy: MergePolicy,
}

impl fmt::Debug for Composer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Composer")
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

impl<'r> Composer<'r> {
    /// Composer using the default [`MergePolicy::Replace`].
    #[must_use]
    pub fn new(registry: &'r dyn RuleRegistry) -> Self {
        Self {
            registry,
            policy: MergePolicy::default(),
        }
    }

    /// Use `policy` when two references set the same rule key.
    #[must_use]
    pub const fn with_policy(mut self, policy: MergePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The merge policy in effect.
    #[must_use]
    pub const fn policy(&self) -> MergePolicy {
        self.policy
    }

    /// Resolve one reference to the settings it contributes.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::UnknownRuleSet`] if the name is unknown, the
    /// registry reports the entry as malformed, or an inline override is
    /// invalid or targets something other than a single rule.
    pub fn resolve(&self, reference: &RuleSetReference) -> Result<Expansion, ComposeError> {
        let unresolved = |reason: UnresolvedReason| ComposeError::UnknownRuleSet {
            reference: reference.to_string(),
            reason,
        };
        let lookup = |name: &str| match self.registry.lookup(name) {
            Ok(Some(expansion)) => Ok(expansion),
            Ok(None) => Err(unresolved(UnresolvedReason::NotFound)),
            Err(e) => Err(unresolved(e.into())),
        };

        match reference.form() {
            ReferenceForm::Named(name) => lookup(name),
            ReferenceForm::Inline { rule, value } => {
                let expansion = lookup(rule)?;
                if expansion.kind != EntryKind::Rule {
                    return Err(unresolved(UnresolvedReason::NotARule {
                        name: rule.to_string(),
                        kind: expansion.kind,
                    }));
                }
                let key = expansion
                    .settings
                    .into_keys()
                    .next()
                    .ok_or_else(|| unresolved(UnresolvedReason::NotFound))?;
                let setting =
                    RuleSetting::parse_inline(value).map_err(|e| unresolved(e.into()))?;
                Ok(Expansion::rule(key, setting))
            }
        }
    }

    /// Fold `references` in declaration order into one configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ComposeError::UnknownRuleSet`] for the first reference that
    /// cannot be resolved. No partial configuration is returned.
    pub fn compose(
        &self,
        references: &[RuleSetReference],
    ) -> Result<EffectiveConfiguration, ComposeError> {
        let mut config = EffectiveConfiguration::default();
        for reference in references {
            let expansion = self.resolve(reference)?;
            tracing::debug!(
                reference = %reference,
                kind = %expansion.kind,
                rules = expansion.settings.len(),
                "resolved"
            );
            for (key, setting) in expansion.settings {
                if let Some(previous) = config.apply(key.clone(), setting, reference, self.policy) {
                    tracing::debug!(reference = %reference, previous = %previous, "overrides {key}");
                }
            }
        }
        Ok(config)
    }
}

/// Compose `references` against `registry` with the default merge policy.
///
/// # Errors
///
/// Returns [`ComposeError::UnknownRuleSet`] naming the first reference that
/// cannot be resolved.
pub fn compose(
    references: &[RuleSetReference],
    registry: &dyn RuleRegistry,
) -> Result<EffectiveConfiguration, ComposeError> {
    Composer::new(registry).compose(references)
}
