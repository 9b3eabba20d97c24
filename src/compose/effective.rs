//! The merged configuration handed to the lint engine.
use std::collections::BTreeMap;
use std::fmt::Write as _;

use sha2::{Digest, Sha256};

use super::merge::MergePolicy;
use crate::config::reference::RuleSetReference;
use crate::config::setting::RuleSetting;

/// Rule key → resolved setting, plus the references that still contribute
/// to each key, in the order they wrote it.
///
/// Under [`MergePolicy::Replace`] a key has exactly one contributor. Under
/// [`MergePolicy::Deep`] earlier references stay listed while part of their
/// options survives the merge.
///
/// Built once by the composer and never mutated afterwards; each
/// composition returns a fresh instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectiveConfiguration {
    rules: BTreeMap<String, RuleSetting>,
    origins: BTreeMap<String, Vec<RuleSetReference>>,
}

impl EffectiveConfiguration {
    /// Fold one setting into the accumulator. Returns the replaced setting.
    pub(super) fn apply(
        &mut self,
        key: String,
        setting: RuleSetting,
        origin: &RuleSetReference,
        policy: MergePolicy,
    ) -> Option<RuleSetting> {
        let previous = self.rules.remove(&key);
        let contributors = self.origins.entry(key.clone()).or_default();
        let merged = match previous.clone() {
            Some(earlier) => {
                if !policy.keeps_earlier(&earlier, &setting) {
                    contributors.clear();
                }
                policy.merge(earlier, setting)
            }
            None => setting,
        };
        contributors.retain(|r| r != origin);
        contributors.push(origin.clone());
        self.rules.insert(key, merged);
        previous
    }

    /// Setting for `key`, if any reference configured it.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&RuleSetting> {
        self.rules.get(key)
    }

    /// The reference that last wrote `key`.
    #[must_use]
    pub fn origin(&self, key: &str) -> Option<&RuleSetReference> {
        self.origins.get(key).and_then(|refs| refs.last())
    }

    /// Every reference still contributing to `key`, oldest first.
    #[must_use]
    pub fn origins(&self, key: &str) -> &[RuleSetReference] {
        self.origins.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of configured rule keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rule is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// All settings in rule-key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RuleSetting)> {
        self.rules.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Settings whose severity is not `off`.
    pub fn enabled(&self) -> impl Iterator<Item = (&str, &RuleSetting)> {
        self.iter().filter(|(_, s)| s.severity.is_enabled())
    }

    /// Whether `reference` still contributes to at least one key.
    #[must_use]
    pub fn is_contributed_by(&self, reference: &RuleSetReference) -> bool {
        self.origins.values().flatten().any(|r| r == reference)
    }

    /// Render as a TOML document, one table per rule.
    ///
    /// # Errors
    ///
    /// Returns an error if an options value cannot be expressed in TOML
    /// (for example a `null` nested inside an array).
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string(&self.rules)
    }

    /// Render as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.rules)
    }

    /// Hex SHA-256 over the canonical form of every setting.
    ///
    /// Equal configurations always produce equal fingerprints; provenance is
    /// not included.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for (key, setting) in &self.rules {
            hasher.update(key.as_bytes());
            hasher.update([0u8]);
            hasher.update(setting.severity.as_str().as_bytes());
            hasher.update([0u8]);
            if let Some(options) = &setting.options {
                hasher.update(options.to_string().as_bytes());
            }
            hasher.update([0xffu8]);
        }
        hasher
            .finalize()
            .iter()
            .fold(String::with_capacity(64), |mut out, byte| {
                let _ = write!(out, "{byte:02x}");
                out
            })
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::setting::Severity;
    use serde_json::json;

    fn sample() -> EffectiveConfiguration {
        let origin = RuleSetReference::from("preset");
        let mut config = EffectiveConfiguration::default();
        config.apply(
            "final-newline".to_string(),
            RuleSetting::new(Severity::Warn),
            &origin,
            MergePolicy::Replace,
        );
        config.apply(
            "emphasis-marker".to_string(),
            RuleSetting::with_options(json!("*")),
            &origin,
            MergePolicy::Replace,
        );
        config
    }

    #[test]
    fn apply_records_origin_and_returns_previous() {
        let mut config = sample();
        let later = RuleSetReference::from("final-newline=off");
        let previous = config.apply(
            "final-newline".to_string(),
            RuleSetting::new(Severity::Off),
            &later,
            MergePolicy::Replace,
        );
        assert_eq!(previous, Some(RuleSetting::new(Severity::Warn)));
        assert_eq!(
            config.get("final-newline"),
            Some(&RuleSetting::new(Severity::Off))
        );
        assert_eq!(config.origin("final-newline"), Some(&later));
        assert_eq!(config.len(), 2);
        assert_eq!(config.enabled().count(), 1);
    }

    #[test]
    fn contribution_tracks_ownership() {
        let mut config = sample();
        let preset = RuleSetReference::from("preset");
        assert!(config.is_contributed_by(&preset));
        let other = RuleSetReference::from("other");
        for key in ["final-newline", "emphasis-marker"] {
            config.apply(
                key.to_string(),
                RuleSetting::new(Severity::Off),
                &other,
                MergePolicy::Replace,
            );
        }
        assert!(!config.is_contributed_by(&preset));
    }

    #[test]
    fn deep_policy_keeps_surviving_contributors() {
        let mut config = EffectiveConfiguration::default();
        let sized = RuleSetReference::from(r#"maximum-line-length=["warn", 120]"#);
        let strict = RuleSetReference::from("maximum-line-length=error");
        config.apply(
            "maximum-line-length".to_string(),
            RuleSetting::with_options(json!(120)),
            &sized,
            MergePolicy::Deep,
        );
        config.apply(
            "maximum-line-length".to_string(),
            RuleSetting::new(Severity::Error),
            &strict,
            MergePolicy::Deep,
        );
        assert_eq!(config.origins("maximum-line-length"), [sized.clone(), strict.clone()]);
        assert_eq!(config.origin("maximum-line-length"), Some(&strict));
        assert!(config.is_contributed_by(&sized));

        let wide = RuleSetReference::from("maximum-line-length=[\"warn\", 100]");
        config.apply(
            "maximum-line-length".to_string(),
            RuleSetting::with_options(json!(100)),
            &wide,
            MergePolicy::Deep,
        );
        assert_eq!(config.origins("maximum-line-length"), [wide]);
        assert!(!config.is_contributed_by(&sized));
        assert!(config.origins("no-html").is_empty());
    }

    #[test]
    fn renders_toml_tables() {
        let toml = sample().to_toml().unwrap();
        assert!(toml.contains("[emphasis-marker]\nseverity = \"warn\"\noptions = \"*\""));
        assert!(toml.contains("[final-newline]\nseverity = \"warn\""));
    }

    #[test]
    fn renders_json() {
        let value: serde_json::Value = serde_json::from_str(&sample().to_json().unwrap()).unwrap();
        assert_eq!(value["final-newline"]["severity"], "warn");
        assert_eq!(value["emphasis-marker"]["options"], "*");
    }

    #[test]
    fn fingerprint_is_stable_and_sensitive() {
        let a = sample();
        assert_eq!(a.fingerprint(), sample().fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
        let mut b = sample();
        b.apply(
            "final-newline".to_string(),
            RuleSetting::new(Severity::Error),
            &RuleSetReference::from("x"),
            MergePolicy::Replace,
        );
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn empty_configuration() {
        let config = EffectiveConfiguration::default();
        assert!(config.is_empty());
        assert_eq!(config.to_json().unwrap(), "{}");
    }
}
