//! Rule settings: a severity plus an optional options value.
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SettingError;

/// How a rule reports its findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Rule is disabled.
    Off,
    /// Findings are reported as warnings.
    Warn,
    /// Findings are reported as errors.
    Error,
}

impl Severity {
    /// Parse a severity keyword. `on` is an alias for `warn`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" => Some(Self::Off),
            "on" | "warn" => Some(Self::Warn),
            "error" => Some(Self::Error),
            _ => None,
        }
    }

    /// Map a numeric level (`0`, `1`, `2`) to a severity.
    #[must_use]
    pub const fn from_level(level: i64) -> Option<Self> {
        match level {
            0 => Some(Self::Off),
            1 => Some(Self::Warn),
            2 => Some(Self::Error),
            _ => None,
        }
    }

    /// Keyword form, as written in configuration files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }

    /// Whether the rule runs at all.
    #[must_use]
    pub const fn is_enabled(self) -> bool {
        !matches!(self, Self::Off)
    }

    /// Interpret a value in severity position: boolean, keyword or level.
    fn from_value(value: &Value) -> Result<Self, SettingError> {
        match value {
            Value::Bool(true) => Ok(Self::Warn),
            Value::Bool(false) => Ok(Self::Off),
            Value::String(s) => {
                Self::parse(s).ok_or_else(|| SettingError::UnknownSeverity(format!("'{s}'")))
            }
            Value::Number(n) => match n.as_i64() {
                Some(level) => Self::from_level(level).ok_or(SettingError::LevelOutOfRange(level)),
                None => Err(SettingError::UnknownSeverity(n.to_string())),
            },
            other => Err(SettingError::UnknownSeverity(other.to_string())),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The resolved setting of a single rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuleSetting {
    /// Reporting level.
    pub severity: Severity,
    /// Rule-specific options, passed through to the lint engine untouched.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<Value>,
}

impl RuleSetting {
    /// Setting with the given severity and no options.
    #[must_use]
    pub const fn new(severity: Severity) -> Self {
        Self {
            severity,
            options: None,
        }
    }

    /// Enabled as a warning with the given options.
    #[must_use]
    pub const fn with_options(options: Value) -> Self {
        Self {
            severity: Severity::Warn,
            options: Some(options),
        }
    }

    /// Interpret a configuration value as a rule setting.
    ///
    /// Accepted forms:
    ///
    /// | Value                      | Severity     | Options   |
    /// |----------------------------|--------------|-----------|
    /// | `true` / `false`           | warn / off   | none      |
    /// | `"off"`, `"on"`, `"warn"`, `"error"` | keyword | none |
    /// | `0`, `1`, `2`              | by level     | none      |
    /// | `[severity]`               | severity     | none      |
    /// | `[severity, options]`      | severity     | options   |
    /// | `{ severity, options? }`   | severity     | options   |
    /// | anything else              | warn         | the value |
    ///
    /// # Errors
    ///
    /// Returns [`SettingError`] for `null`, out-of-range levels, arrays of the
    /// wrong shape and tables with keys other than `severity` and `options`.
    pub fn from_value(value: &Value) -> Result<Self, SettingError> {
        match value {
            Value::Null => Err(SettingError::Null),
            Value::Bool(_) => Severity::from_value(value).map(Self::new),
            Value::String(s) => Ok(Severity::parse(s)
                .map_or_else(|| Self::with_options(value.clone()), Self::new)),
            Value::Number(n) => match n.as_i64() {
                Some(_) => Severity::from_value(value).map(Self::new),
                None => Ok(Self::with_options(value.clone())),
            },
            Value::Array(items) => match items.as_slice() {
                [severity] => Severity::from_value(severity).map(Self::new),
                [severity, options] => Ok(Self {
                    severity: Severity::from_value(severity)?,
                    options: non_null(options),
                }),
                other => Err(SettingError::ArrayLength(other.len())),
            },
            Value::Object(map) if map.contains_key("severity") => {
                if let Some(key) = map.keys().find(|k| *k != "severity" && *k != "options") {
                    return Err(SettingError::UnexpectedKey(key.clone()));
                }
                let severity = map
                    .get("severity")
                    .map_or(Ok(Severity::Warn), Severity::from_value)?;
                Ok(Self {
                    severity,
                    options: map.get("options").and_then(non_null),
                })
            }
            Value::Object(_) => Ok(Self::with_options(value.clone())),
        }
    }

    /// Parse the right-hand side of an inline `rule=value` reference.
    ///
    /// The text is read as JSON when it parses as JSON (`2`, `true`,
    /// `["warn", 80]`), and as a bare string otherwise (`off`, `consistent`).
    ///
    /// # Errors
    ///
    /// Returns [`SettingError::EmptyValue`] for blank text, or another
    /// [`SettingError`] if the value is not a valid setting.
    pub fn parse_inline(text: &str) -> Result<Self, SettingError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SettingError::EmptyValue);
        }
        let value = serde_json::from_str::<Value>(text)
            .unwrap_or_else(|_| Value::String(text.to_string()));
        Self::from_value(&value)
    }
}

fn non_null(value: &Value) -> Option<Value> {
    (!value.is_null()).then(|| value.clone())
}

impl fmt::Display for RuleSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.options {
            Some(options) => write!(f, "{} {options}", self.severity),
            None => write!(f, "{}", self.severity),
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn severity_keywords() {
        assert_eq!(Severity::parse("off"), Some(Severity::Off));
        assert_eq!(Severity::parse("on"), Some(Severity::Warn));
        assert_eq!(Severity::parse(" Warn "), Some(Severity::Warn));
        assert_eq!(Severity::parse("ERROR"), Some(Severity::Error));
        assert_eq!(Severity::parse("consistent"), None);
    }

    #[test]
    fn severity_levels() {
        assert_eq!(Severity::from_level(0), Some(Severity::Off));
        assert_eq!(Severity::from_level(2), Some(Severity::Error));
        assert_eq!(Severity::from_level(3), None);
        assert!(!Severity::Off.is_enabled());
        assert!(Severity::Error.is_enabled());
    }

    #[test]
    fn booleans_toggle_rule() {
        assert_eq!(
            RuleSetting::from_value(&json!(true)).unwrap(),
            RuleSetting::new(Severity::Warn)
        );
        assert_eq!(
            RuleSetting::from_value(&json!(false)).unwrap(),
            RuleSetting::new(Severity::Off)
        );
    }

    #[test]
    fn non_keyword_string_is_options() {
        let setting = RuleSetting::from_value(&json!("consistent")).unwrap();
        assert_eq!(setting.severity, Severity::Warn);
        assert_eq!(setting.options, Some(json!("consistent")));
    }

    #[test]
    fn integer_level_out_of_range_is_rejected() {
        assert_eq!(
            RuleSetting::from_value(&json!(80)),
            Err(SettingError::LevelOutOfRange(80))
        );
    }

    #[test]
    fn array_with_options() {
        let setting = RuleSetting::from_value(&json!(["error", 80])).unwrap();
        assert_eq!(setting.severity, Severity::Error);
        assert_eq!(setting.options, Some(json!(80)));
    }

    #[test]
    fn array_with_bad_severity_is_rejected() {
        assert_eq!(
            RuleSetting::from_value(&json!(["loud", 80])),
            Err(SettingError::UnknownSeverity("'loud'".to_string()))
        );
        assert_eq!(
            RuleSetting::from_value(&json!([])),
            Err(SettingError::ArrayLength(0))
        );
        assert_eq!(
            RuleSetting::from_value(&json!(["warn", 1, 2])),
            Err(SettingError::ArrayLength(3))
        );
    }

    #[test]
    fn table_form() {
        let setting =
            RuleSetting::from_value(&json!({"severity": "off", "options": {"a": 1}})).unwrap();
        assert_eq!(setting.severity, Severity::Off);
        assert_eq!(setting.options, Some(json!({"a": 1})));

        assert_eq!(
            RuleSetting::from_value(&json!({"severity": 1, "level": 2})),
            Err(SettingError::UnexpectedKey("level".to_string()))
        );
    }

    #[test]
    fn table_without_severity_is_options() {
        let setting = RuleSetting::from_value(&json!({"allow": ["br"]})).unwrap();
        assert_eq!(setting.severity, Severity::Warn);
        assert_eq!(setting.options, Some(json!({"allow": ["br"]})));
    }

    #[test]
    fn null_is_rejected() {
        assert_eq!(RuleSetting::from_value(&Value::Null), Err(SettingError::Null));
    }

    #[test]
    fn inline_values() {
        assert_eq!(
            RuleSetting::parse_inline("off").unwrap(),
            RuleSetting::new(Severity::Off)
        );
        assert_eq!(
            RuleSetting::parse_inline("2").unwrap(),
            RuleSetting::new(Severity::Error)
        );
        let setting = RuleSetting::parse_inline(r#"["warn", 100]"#).unwrap();
        assert_eq!(setting.options, Some(json!(100)));
        let setting = RuleSetting::parse_inline("*").unwrap();
        assert_eq!(setting.options, Some(json!("*")));
    }

    #[test]
    fn blank_inline_value_is_rejected() {
        assert_eq!(RuleSetting::parse_inline(""), Err(SettingError::EmptyValue));
        assert_eq!(RuleSetting::parse_inline("   "), Err(SettingError::EmptyValue));
    }

    #[test]
    fn inline_integer_outside_levels_is_an_error() {
        assert_eq!(
            RuleSetting::parse_inline("80"),
            Err(SettingError::LevelOutOfRange(80))
        );
    }

    #[test]
    fn display_includes_options() {
        assert_eq!(RuleSetting::new(Severity::Off).to_string(), "off");
        assert_eq!(
            RuleSetting::with_options(json!("consistent")).to_string(),
            r#"warn "consistent""#
        );
    }
}
