//! Built-in catalogue of remark-lint presets, rules and plugins.
use serde_json::{Value, json};

use super::{EntryKind, EntrySource, Expansion, RegistryEntry, RuleRegistry, Settings};
use crate::config::setting::{RuleSetting, Severity};
use crate::error::RegistryError;

/// Package prefix under which individual rules are published.
pub const RULE_PACKAGE_PREFIX: &str = "remark-lint-";

/// Every rule key the catalogue knows.
pub const RULES: &[&str] = &[
    "blockquote-indentation",
    "checkbox-character-style",
    "code-block-style",
    "emphasis-marker",
    "fenced-code-flag",
    "fenced-code-marker",
    "file-extension",
    "final-definition",
    "final-newline",
    "first-heading-level",
    "hard-break-spaces",
    "heading-increment",
    "heading-style",
    "link-title-style",
    "list-item-bullet-indent",
    "list-item-content-indent",
    "list-item-indent",
    "maximum-heading-length",
    "maximum-line-length",
    "no-blockquote-without-marker",
    "no-consecutive-blank-lines",
    "no-duplicate-definitions",
    "no-duplicate-headings",
    "no-emphasis-as-heading",
    "no-empty-url",
    "no-file-name-mixed-case",
    "no-heading-content-indent",
    "no-heading-punctuation",
    "no-html",
    "no-literal-urls",
    "no-multiple-toplevel-headings",
    "no-shell-dollars",
    "no-shortcut-reference-image",
    "no-shortcut-reference-link",
    "no-undefined-references",
    "no-unused-definitions",
    "ordered-list-marker-style",
    "ordered-list-marker-value",
    "rule-style",
    "strong-marker",
    "table-cell-padding",
    "table-pipes",
    "validate-links",
];

type Builder = fn() -> Settings;

const PRESETS: &[(&str, Builder)] = &[
    ("remark-preset-lint-recommended", recommended),
    ("remark-preset-lint-consistent", consistent),
    ("remark-preset-lint-markdown-style-guide", markdown_style_guide),
];

const PLUGINS: &[(&str, Builder)] = &[
    ("remark-frontmatter", Settings::new),
    ("remark-gfm", Settings::new),
    ("remark-github", Settings::new),
    ("remark-validate-links", validate_links),
];

fn enabled() -> RuleSetting {
    RuleSetting::new(Severity::Warn)
}

fn with(options: Value) -> RuleSetting {
    RuleSetting::with_options(options)
}

fn settings<const N: usize>(entries: [(&str, RuleSetting); N]) -> Settings {
    entries
        .into_iter()
        .map(|(key, setting)| (key.to_string(), setting))
        .collect()
}

fn recommended() -> Settings {
    settings([
        ("final-newline", enabled()),
        ("hard-break-spaces", enabled()),
        ("list-item-bullet-indent", enabled()),
        ("list-item-indent", with(json!("one"))),
        ("no-blockquote-without-marker", enabled()),
        ("no-duplicate-definitions", enabled()),
        ("no-heading-content-indent", enabled()),
        ("no-literal-urls", enabled()),
        ("no-shortcut-reference-image", enabled()),
        ("no-shortcut-reference-link", enabled()),
        ("no-undefined-references", enabled()),
        ("no-unused-definitions", enabled()),
        ("ordered-list-marker-style", with(json!("."))),
    ])
}

fn consistent() -> Settings {
    settings([
        ("blockquote-indentation", with(json!("consistent"))),
        ("checkbox-character-style", with(json!("consistent"))),
        ("code-block-style", with(json!("consistent"))),
        ("emphasis-marker", with(json!("consistent"))),
        ("fenced-code-marker", with(json!("consistent"))),
        ("heading-style", with(json!("consistent"))),
        ("link-title-style", with(json!("consistent"))),
        ("list-item-content-indent", enabled()),
        ("ordered-list-marker-style", with(json!("consistent"))),
        ("rule-style", with(json!("consistent"))),
        ("strong-marker", with(json!("consistent"))),
        ("table-cell-padding", with(json!("consistent"))),
    ])
}

fn markdown_style_guide() -> Settings {
    settings([
        ("blockquote-indentation", with(json!(2))),
        ("code-block-style", with(json!("fenced"))),
        ("emphasis-marker", with(json!("*"))),
        ("fenced-code-flag", with(json!({"allowEmpty": false}))),
        ("fenced-code-marker", with(json!("`"))),
        ("file-extension", with(json!("md"))),
        ("final-definition", enabled()),
        ("heading-increment", enabled()),
        ("heading-style", with(json!("atx"))),
        ("link-title-style", with(json!("\""))),
        ("list-item-indent", with(json!("mixed"))),
        ("maximum-heading-length", with(json!(60))),
        ("maximum-line-length", with(json!(80))),
        ("no-consecutive-blank-lines", enabled()),
        ("no-duplicate-headings", enabled()),
        ("no-emphasis-as-heading", enabled()),
        ("no-file-name-mixed-case", enabled()),
        ("no-heading-punctuation", with(json!(":."))),
        ("no-multiple-toplevel-headings", enabled()),
        ("no-shell-dollars", enabled()),
        ("ordered-list-marker-value", with(json!("one"))),
        ("rule-style", with(json!("---"))),
        ("strong-marker", with(json!("*"))),
        ("table-cell-padding", with(json!("padded"))),
        ("table-pipes", enabled()),
    ])
}

fn validate_links() -> Settings {
    settings([("validate-links", enabled())])
}

/// Strip the package prefix from a rule name, if present.
#[must_use]
pub fn rule_key(name: &str) -> &str {
    name.strip_prefix(RULE_PACKAGE_PREFIX).unwrap_or(name)
}

/// The catalogue shipped with the tool.
///
/// Presets and plugins are looked up by package name; rules by key
/// (`final-newline`) or package name (`remark-lint-final-newline`). A rule
/// referenced on its own is enabled as a warning with no options.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinRegistry;

impl RuleRegistry for BuiltinRegistry {
    fn lookup(&self, name: &str) -> Result<Option<Expansion>, RegistryError> {
        if let Some((_, build)) = PRESETS.iter().find(|(n, _)| *n == name) {
            return Ok(Some(Expansion {
                kind: EntryKind::Preset,
                settings: build(),
            }));
        }
        if let Some((_, build)) = PLUGINS.iter().find(|(n, _)| *n == name) {
            return Ok(Some(Expansion {
                kind: EntryKind::Plugin,
                settings: build(),
            }));
        }
        let key = rule_key(name);
        Ok(RULES
            .contains(&key)
            .then(|| Expansion::rule(key, enabled())))
    }

    fn entries(&self) -> Vec<RegistryEntry> {
        let bundles = PRESETS
            .iter()
            .map(|(name, build)| (name, EntryKind::Preset, build().len()))
            .chain(
                PLUGINS
                    .iter()
                    .map(|(name, build)| (name, EntryKind::Plugin, build().len())),
            );
        bundles
            .map(|(name, kind, rule_count)| RegistryEntry {
                name: (*name).to_string(),
                kind,
                rule_count,
                source: EntrySource::Builtin,
            })
            .chain(RULES.iter().map(|key| RegistryEntry {
                name: (*key).to_string(),
                kind: EntryKind::Rule,
                rule_count: 1,
                source: EntrySource::Builtin,
            }))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn every_preset_key_is_a_known_rule() {
        for (name, build) in PRESETS.iter().chain(PLUGINS) {
            for key in build().keys() {
                assert!(
                    RULES.contains(&key.as_str()),
                    "{name} sets unknown rule {key}"
                );
            }
        }
    }

    #[test]
    fn rules_are_sorted_and_unique() {
        let mut sorted = RULES.to_vec();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted, RULES);
    }

    #[test]
    fn lookup_preset() {
        let e = BuiltinRegistry
            .lookup("remark-preset-lint-recommended")
            .unwrap()
            .unwrap();
        assert_eq!(e.kind, EntryKind::Preset);
        assert_eq!(e.settings.len(), 13);
        assert_eq!(
            e.settings.get("ordered-list-marker-style"),
            Some(&RuleSetting::with_options(json!(".")))
        );
    }

    #[test]
    fn lookup_rule_by_key_and_package_name() {
        let by_key = BuiltinRegistry.lookup("final-newline").unwrap().unwrap();
        let by_package = BuiltinRegistry
            .lookup("remark-lint-final-newline")
            .unwrap()
            .unwrap();
        assert_eq!(by_key, by_package);
        assert_eq!(by_key.kind, EntryKind::Rule);
        assert!(by_key.settings.contains_key("final-newline"));
    }

    #[test]
    fn syntax_plugins_contribute_no_rules() {
        let gfm = BuiltinRegistry.lookup("remark-gfm").unwrap().unwrap();
        assert_eq!(gfm.kind, EntryKind::Plugin);
        assert!(gfm.settings.is_empty());
    }

    #[test]
    fn validate_links_plugin_contributes_one_rule() {
        let e = BuiltinRegistry
            .lookup("remark-validate-links")
            .unwrap()
            .unwrap();
        assert_eq!(e.settings.len(), 1);
        assert!(e.settings.contains_key("validate-links"));
    }

    #[test]
    fn unknown_name_is_none() {
        assert_eq!(BuiltinRegistry.lookup("unknown-preset").unwrap(), None);
        assert_eq!(BuiltinRegistry.lookup("").unwrap(), None);
        assert_eq!(BuiltinRegistry.lookup("remark-lint-").unwrap(), None);
    }

    #[test]
    fn entries_cover_presets_plugins_and_rules() {
        let entries = BuiltinRegistry.entries();
        assert_eq!(entries.len(), PRESETS.len() + PLUGINS.len() + RULES.len());
        assert!(entries.iter().all(|e| e.source == EntrySource::Builtin));
        let consistent = entries
            .iter()
            .find(|e| e.name == "remark-preset-lint-consistent")
            .unwrap();
        assert_eq!(consistent.kind, EntryKind::Preset);
        assert_eq!(consistent.rule_count, 12);
    }
}
