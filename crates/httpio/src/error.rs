//! Error types.
//!
//! Request-side errors ([`BodyError`], [`ParseError`]) know which HTTP status
//! they map to so handlers can pass them straight to
//! [`write_err`](crate::write_err). Response-side errors ([`EncodeError`],
//! [`WriteError`]) are mostly handled inside the response helpers.

use http::StatusCode;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Why a query value could not be converted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The text is not a valid literal of the target type.
    Syntax,
    /// The text is well formed but does not fit the requested width.
    Range,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax => write!(f, "invalid syntax"),
            Self::Range => write!(f, "value out of range"),
        }
    }
}

/// A query parameter value did not match the requested scalar type.
///
/// # Example
///
/// ```rust
/// use httpio::Query;
/// use httpio::{IntWidth, ParseErrorKind};
/// use http::StatusCode;
///
/// let query = Query::parse("limit=300");
/// let err = query.get_int("limit", IntWidth::Bits8).unwrap_err();
///
/// assert_eq!(err.key(), "limit");
/// assert_eq!(err.value(), "300");
/// assert_eq!(err.kind(), ParseErrorKind::Range);
/// assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    key: String,
    value: String,
    target: &'static str,
    kind: ParseErrorKind,
}

impl ParseError {
    /// Creates a syntax error for `value` found under `key`.
    #[must_use]
    pub fn syntax(key: impl Into<String>, value: impl Into<String>, target: &'static str) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            target,
            kind: ParseErrorKind::Syntax,
        }
    }

    /// Creates a range error for `value` found under `key`.
    #[must_use]
    pub fn range(key: impl Into<String>, value: impl Into<String>, target: &'static str) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            target,
            kind: ParseErrorKind::Range,
        }
    }

    /// The query key the value was read from.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The raw text that failed to parse.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Name of the type the value was parsed as.
    #[must_use]
    pub fn target(&self) -> &'static str {
        self.target
    }

    /// Whether the failure was a syntax or a range problem.
    #[must_use]
    pub fn kind(&self) -> ParseErrorKind {
        self.kind
    }

    /// Returns the HTTP status a handler should answer with.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    /// Returns a stable machine-readable code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        "INVALID_PARAMETER"
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid query parameter '{}': cannot parse {:?} as {}: {}",
            self.key, self.value, self.target, self.kind
        )
    }
}

impl std::error::Error for ParseError {}

/// A bit width outside the supported set was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unsupported {family} width: {bits} bits")]
pub struct InvalidWidth {
    family: &'static str,
    bits: u32,
}

impl InvalidWidth {
    pub(crate) fn integer(bits: u32) -> Self {
        Self {
            family: "integer",
            bits,
        }
    }

    pub(crate) fn float(bits: u32) -> Self {
        Self {
            family: "float",
            bits,
        }
    }

    /// The rejected bit count.
    #[must_use]
    pub fn bits(&self) -> u32 {
        self.bits
    }
}

/// Reading or decoding a JSON request body failed.
#[derive(Debug, Error)]
pub enum BodyError {
    /// The body stream could not be read.
    #[error("failed to read request body: {0}")]
    Io(#[source] std::io::Error),

    /// The body is not valid JSON for the target type.
    #[error("failed to decode request body: {0}")]
    Decode(#[source] serde_json::Error),

    /// The body exceeds the configured limit.
    #[error("payload too large: max {limit} bytes, got at least {actual} bytes")]
    PayloadTooLarge {
        /// Configured maximum.
        limit: usize,
        /// Bytes seen before giving up.
        actual: usize,
    },
}

impl BodyError {
    /// Returns the HTTP status a handler should answer with.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Io(_) | Self::Decode(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        }
    }

    /// Returns a stable machine-readable code.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Io(_) => "BODY_READ_FAILED",
            Self::Decode(_) => "DESERIALIZATION_FAILED",
            Self::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
        }
    }
}

/// A value could not be encoded as JSON.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct EncodeError(#[from] serde_json::Error);

/// Writing an encoded response to the transport failed.
///
/// The response is left partially written and cannot be recovered.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The underlying sink rejected the body bytes.
    #[error("failed to write response body: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read configuration file: {path}")]
    ReadError {
        /// Path to the file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error.
    #[error("failed to parse TOML configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Invalid configuration value.
    #[error("invalid configuration value for {field}: {reason}")]
    InvalidValue {
        /// The field with the invalid value.
        field: String,
        /// Explanation of why the value is invalid.
        reason: String,
    },
}

impl ConfigError {
    /// Creates an invalid value error.
    #[must_use]
    pub fn invalid_value(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_display() {
        let err = ParseError::syntax("active", "maybe", "bool");

        assert_eq!(err.kind(), ParseErrorKind::Syntax);
        assert_eq!(err.target(), "bool");
        assert_eq!(
            err.to_string(),
            "invalid query parameter 'active': cannot parse \"maybe\" as bool: invalid syntax"
        );
        assert_eq!(err.error_code(), "INVALID_PARAMETER");
    }

    #[test]
    fn test_parse_error_range() {
        let err = ParseError::range("page", "70000", "i16");

        assert_eq!(err.kind(), ParseErrorKind::Range);
        assert!(err.to_string().contains("out of range"));
    }

    #[test]
    fn test_body_error_status() {
        let decode = serde_json::from_str::<u32>("nope").unwrap_err();
        assert_eq!(
            BodyError::Decode(decode).status_code(),
            StatusCode::BAD_REQUEST
        );

        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "reset");
        let err = BodyError::Io(io);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.error_code(), "BODY_READ_FAILED");

        let err = BodyError::PayloadTooLarge {
            limit: 16,
            actual: 17,
        };
        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert!(err.to_string().contains("16"));
    }

    #[test]
    fn test_invalid_width_display() {
        assert_eq!(
            InvalidWidth::integer(24).to_string(),
            "unsupported integer width: 24 bits"
        );
        assert_eq!(
            InvalidWidth::float(16).to_string(),
            "unsupported float width: 16 bits"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::invalid_value("response.indent", "must be whitespace");
        assert_eq!(
            err.to_string(),
            "invalid configuration value for response.indent: must be whitespace"
        );
    }
}
