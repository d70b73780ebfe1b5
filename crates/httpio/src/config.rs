//! Configuration for the response writer and body reader.
//!
//! Every field has a default, so an empty TOML document is a valid
//! configuration:
//!
//! ```toml
//! [response]
//! indent = "\t"
//! trailing_newline = true
//!
//! [request]
//! max_body_bytes = 1048576
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Complete httpio configuration.
///
/// # Example
///
/// ```
/// use httpio::HttpIoConfig;
///
/// let config = HttpIoConfig::from_toml_str(r#"
///     [request]
///     max_body_bytes = 4096
/// "#).unwrap();
///
/// assert_eq!(config.request.max_body_bytes, Some(4096));
/// assert_eq!(config.response.indent, "\t");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct HttpIoConfig {
    /// Response encoding settings.
    #[serde(default)]
    pub response: ResponseConfig,

    /// Request body settings.
    #[serde(default)]
    pub request: RequestConfig,
}

impl HttpIoConfig {
    /// Creates a new configuration builder.
    #[must_use]
    pub fn builder() -> HttpIoConfigBuilder {
        HttpIoConfigBuilder::new()
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Validates all sections.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - the indent contains anything other than spaces and tabs
    /// - the body limit is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.response.validate()?;
        self.request.validate()
    }
}

/// How JSON responses are formatted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ResponseConfig {
    /// Indentation unit for pretty printing.
    #[serde(default = "default_indent")]
    pub indent: String,

    /// Whether to end the body with a newline.
    #[serde(default = "default_trailing_newline")]
    pub trailing_newline: bool,
}

fn default_indent() -> String {
    "\t".to_string()
}

fn default_trailing_newline() -> bool {
    true
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            indent: default_indent(),
            trailing_newline: default_trailing_newline(),
        }
    }
}

impl ResponseConfig {
    /// Validates the response section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.indent.chars().all(|c| c == ' ' || c == '\t') {
            return Err(ConfigError::invalid_value(
                "response.indent",
                "must contain only spaces and tabs",
            ));
        }
        Ok(())
    }
}

/// How request bodies are read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct RequestConfig {
    /// Largest accepted body in bytes; unlimited when unset.
    #[serde(default)]
    pub max_body_bytes: Option<usize>,
}

impl RequestConfig {
    /// Validates the request section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_body_bytes == Some(0) {
            return Err(ConfigError::invalid_value(
                "request.max_body_bytes",
                "must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// Builder for [`HttpIoConfig`].
#[derive(Debug, Default)]
pub struct HttpIoConfigBuilder {
    config: HttpIoConfig,
}

impl HttpIoConfigBuilder {
    /// Creates a builder holding the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indentation unit.
    #[must_use]
    pub fn indent(mut self, indent: impl Into<String>) -> Self {
        self.config.response.indent = indent.into();
        self
    }

    /// Sets whether bodies end with a newline.
    #[must_use]
    pub fn trailing_newline(mut self, enabled: bool) -> Self {
        self.config.response.trailing_newline = enabled;
        self
    }

    /// Sets the request body limit.
    #[must_use]
    pub fn max_body_bytes(mut self, limit: usize) -> Self {
        self.config.request.max_body_bytes = Some(limit);
        self
    }

    /// Validates and returns the configuration.
    pub fn build(self) -> Result<HttpIoConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = HttpIoConfig::default();

        assert_eq!(config.response.indent, "\t");
        assert!(config.response.trailing_newline);
        assert_eq!(config.request.max_body_bytes, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml() {
        let config = HttpIoConfig::from_toml_str("").unwrap();
        assert_eq!(config, HttpIoConfig::default());
    }

    #[test]
    fn test_full_toml() {
        let config = HttpIoConfig::from_toml_str(
            r#"
            [response]
            indent = "  "
            trailing_newline = false

            [request]
            max_body_bytes = 1024
            "#,
        )
        .unwrap();

        assert_eq!(config.response.indent, "  ");
        assert!(!config.response.trailing_newline);
        assert_eq!(config.request.max_body_bytes, Some(1024));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = HttpIoConfig::from_toml_str(
            r#"
            [response]
            colour = true
            "#,
        );
        assert!(matches!(result, Err(ConfigError::TomlError(_))));
    }

    #[test]
    fn test_invalid_indent() {
        let result = HttpIoConfig::builder().indent("->").build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "response.indent"
        ));
    }

    #[test]
    fn test_zero_body_limit() {
        let result = HttpIoConfig::builder().max_body_bytes(0).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder() {
        let config = HttpIoConfig::builder()
            .indent("    ")
            .trailing_newline(false)
            .max_body_bytes(64)
            .build()
            .unwrap();

        assert_eq!(config.response.indent, "    ");
        assert!(!config.response.trailing_newline);
        assert_eq!(config.request.max_body_bytes, Some(64));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[request]\nmax_body_bytes = 2048").unwrap();

        let config = HttpIoConfig::from_file(file.path()).unwrap();
        assert_eq!(config.request.max_body_bytes, Some(2048));
    }

    #[test]
    fn test_missing_file() {
        let result = HttpIoConfig::from_file("/nonexistent/httpio.toml");
        assert!(matches!(result, Err(ConfigError::ReadError { .. })));
    }
}
