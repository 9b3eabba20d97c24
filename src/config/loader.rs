//! TOML and JSON configuration file parsing.
use serde::de::DeserializeOwned;
use std::path::Path;

use crate::error::ConfigError;

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `*.toml`
    Toml,
    /// `*.json`
    Json,
}

impl Format {
    /// Detect the format from the file extension.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnsupportedFormat`] for any other extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Parse `content` in the given format.
///
/// `file` is only used for error messages.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidSyntax`] if the content does not parse or
/// does not match `T`.
pub fn parse<T: DeserializeOwned>(content: &str, format: Format, file: &str) -> Result<T, ConfigError> {
    let invalid = |message: String| ConfigError::InvalidSyntax {
        file: file.to_string(),
        message,
    };
    match format {
        Format::Toml => toml::from_str(content).map_err(|e| invalid(e.message().to_string())),
        Format::Json => serde_json::from_str(content).map_err(|e| invalid(e.to_string())),
    }
}

/// Read and deserialize a configuration file, choosing the parser by
/// extension.
///
/// # Errors
///
/// Returns an error if the extension is unsupported, or the file cannot be
/// read or parsed.
pub fn load_config<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let format = Format::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse(&content, format, &path.display().to_string())
}
