//! How a later setting for a rule combines with an earlier one.
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::setting::RuleSetting;

/// Merge policy for two settings of the same rule key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MergePolicy {
    /// The later setting replaces the earlier one entirely.
    #[default]
    Replace,
    /// The later severity wins; options are deep-merged.
    ///
    /// - Objects: merged key by key (recursive)
    /// - Arrays and scalars: later value wins
    /// - Missing later options keep the earlier options
    Deep,
}

impl MergePolicy {
    /// Combine `earlier` with `later` under this policy.
    #[must_use]
    pub fn merge(self, earlier: RuleSetting, later: RuleSetting) -> RuleSetting {
        match self {
            Self::Replace => later,
            Self::Deep => RuleSetting {
                severity: later.severity,
                options: match (earlier.options, later.options) {
                    (Some(base), Some(overlay)) => Some(deep_merge(base, overlay)),
                    (base, None) => base,
                    (None, overlay) => overlay,
                },
            },
        }
    }

    /// Whether anything from `earlier` is still present after merging
    /// `later` into it.
    #[must_use]
    pub fn keeps_earlier(self, earlier: &RuleSetting, later: &RuleSetting) -> bool {
        match (self, &earlier.options, &later.options) {
            (Self::Replace, ..) | (Self::Deep, None, _) => false,
            (Self::Deep, Some(_), None) => true,
            (Self::Deep, Some(base), Some(overlay)) => outlives(base, overlay),
        }
    }
}

/// True when some leaf of `base` is not overwritten by `overlay` under
/// [`deep_merge`].
fn outlives(base: &Value, overlay: &Value) -> bool {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            base_map.iter().any(|(key, base_value)| {
                overlay_map
                    .get(key)
                    .is_none_or(|overlay_value| outlives(base_value, overlay_value))
            })
        }
        _ => false,
    }
}

/// Deep merge two JSON values; `overlay` takes precedence.
#[must_use]
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_value) => deep_merge(base_value, overlay_value),
                    None => overlay_value,
                };
                base_map.insert(key, merged);
            }
            Value::Object(base_map)
        }
        // Arrays replace, no concatenation.
        (_, overlay) => overlay,
    }
}
