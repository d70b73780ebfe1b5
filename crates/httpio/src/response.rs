//! JSON response helpers.
//!
//! Every helper writes exactly one response to a [`ResponseSink`]:
//!
//! | Helper | Body | Status |
//! |--------|------|--------|
//! | [`write_json`] | the value | 200 |
//! | [`write_cached_json`] | `{"data": ..., "from_cache": ...}` | 200 |
//! | [`write_err`] | `{"error": "..."}` | caller supplied, 401 for `"unauthorised"` |
//! | any, given `None` | `{"error": "not found"}` | 404 |
//!
//! Bodies are pretty printed with one tab per level and end with a newline.
//! Call at most one helper per response; a second call appends to the body.
//!
//! # Example
//!
//! ```rust
//! use httpio::{write_cached_json, write_err, BufferedResponse};
//! use http::StatusCode;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct User {
//!     id: u64,
//! }
//!
//! let mut response = BufferedResponse::new();
//! write_cached_json(&mut response, Some(User { id: 7 }), true).unwrap();
//! assert_eq!(
//!     response.body(),
//!     b"{\n\t\"data\": {\n\t\t\"id\": 7\n\t},\n\t\"from_cache\": true\n}\n"
//! );
//!
//! let mut response = BufferedResponse::new();
//! write_err(&mut response, Some("unauthorised"), StatusCode::FORBIDDEN).unwrap();
//! assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
//! ```

use crate::config::ResponseConfig;
use crate::error::{EncodeError, WriteError};
use crate::sink::ResponseSink;
use http::header::{HeaderValue, CONTENT_TYPE};
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use std::fmt;

/// Message used when a write helper is handed `None`.
pub const NOT_FOUND_MESSAGE: &str = "not found";

/// Error message that always answers with 401, whatever status was asked for.
pub const UNAUTHORISED_MESSAGE: &str = "unauthorised";

const APPLICATION_JSON: &str = "application/json";

/// Body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Error message text.
    pub error: String,
}

/// Body of a cache-annotated success response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedEnvelope<T> {
    /// The payload.
    pub data: T,
    /// Whether the payload was served from a cache.
    pub from_cache: bool,
}

/// Writes JSON responses with a fixed formatting configuration.
///
/// The free functions in this module use [`JsonWriter::default`].
#[derive(Debug, Clone)]
pub struct JsonWriter {
    indent: String,
    trailing_newline: bool,
}

impl Default for JsonWriter {
    fn default() -> Self {
        Self::new(&ResponseConfig::default())
    }
}

impl JsonWriter {
    /// Creates a writer from the response configuration.
    #[must_use]
    pub fn new(config: &ResponseConfig) -> Self {
        Self {
            indent: config.indent.clone(),
            trailing_newline: config.trailing_newline,
        }
    }

    /// Encodes `value` with this writer's formatting.
    pub fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, EncodeError> {
        let mut buf = Vec::with_capacity(128);
        let formatter = PrettyFormatter::with_indent(self.indent.as_bytes());
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        value.serialize(&mut serializer)?;

        if self.trailing_newline {
            buf.push(b'\n');
        }
        Ok(buf)
    }

    /// Writes `value` as the response body, or a 404 envelope for `None`.
    ///
    /// If encoding fails a 500 envelope carrying the encoder's message is
    /// written instead.
    ///
    /// # Errors
    ///
    /// Returns [`WriteError::Io`] if the sink rejects the body. The failure
    /// is logged; the response is unusable afterwards.
    pub fn write_json<S, T>(&self, sink: &mut S, value: Option<T>) -> Result<(), WriteError>
    where
        S: ResponseSink + ?Sized,
        T: Serialize,
    {
        match value {
            Some(value) => self.write_value(sink, &value),
            None => self.write_not_found(sink),
        }
    }

    /// Wraps `value` in a [`CachedEnvelope`] and writes it, or a 404
    /// envelope for `None`.
    pub fn write_cached_json<S, T>(
        &self,
        sink: &mut S,
        value: Option<T>,
        from_cache: bool,
    ) -> Result<(), WriteError>
    where
        S: ResponseSink + ?Sized,
        T: Serialize,
    {
        match value {
            Some(data) => self.write_json(sink, Some(CachedEnvelope { data, from_cache })),
            None => self.write_not_found(sink),
        }
    }

    /// Writes an error envelope with status `code`.
    ///
    /// With no error the message is the reason phrase of `code`. A message
    /// of exactly `"unauthorised"` is always sent with 401.
    pub fn write_err<S, E>(
        &self,
        sink: &mut S,
        err: Option<E>,
        code: StatusCode,
    ) -> Result<(), WriteError>
    where
        S: ResponseSink + ?Sized,
        E: fmt::Display,
    {
        let message = match err {
            Some(err) => err.to_string(),
            None => code.canonical_reason().unwrap_or_default().to_string(),
        };
        let status = if message == UNAUTHORISED_MESSAGE {
            StatusCode::UNAUTHORIZED
        } else {
            code
        };

        // Headers must be in place before the status is committed.
        sink.headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        sink.write_status(status);
        self.write_value(sink, &ErrorEnvelope { error: message })
    }

    /// Writes an error envelope whose message is the reason phrase of `code`.
    pub fn write_status_text<S>(&self, sink: &mut S, code: StatusCode) -> Result<(), WriteError>
    where
        S: ResponseSink + ?Sized,
    {
        self.write_err(sink, None::<&str>, code)
    }

    fn write_not_found<S>(&self, sink: &mut S) -> Result<(), WriteError>
    where
        S: ResponseSink + ?Sized,
    {
        self.write_err(sink, Some(NOT_FOUND_MESSAGE), StatusCode::NOT_FOUND)
    }

    fn write_value<S, T>(&self, sink: &mut S, value: &T) -> Result<(), WriteError>
    where
        S: ResponseSink + ?Sized,
        T: Serialize + ?Sized,
    {
        let body = match self.encode(value) {
            Ok(body) => body,
            Err(error) => {
                tracing::warn!(%error, "failed to encode JSON response");
                return self.write_err(sink, Some(&error), StatusCode::INTERNAL_SERVER_ERROR);
            }
        };

        sink.headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        sink.write_body(&body).map_err(|error| {
            tracing::error!(%error, bytes = body.len(), "failed to write JSON response");
            WriteError::Io(error)
        })
    }
}

/// Encodes `value` with tab indentation and a trailing newline.
pub fn encode_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, EncodeError> {
    JsonWriter::default().encode(value)
}

/// Writes `value` as the response body, or a 404 envelope for `None`.
///
/// See [`JsonWriter::write_json`].
pub fn write_json<S, T>(sink: &mut S, value: Option<T>) -> Result<(), WriteError>
where
    S: ResponseSink + ?Sized,
    T: Serialize,
{
    JsonWriter::default().write_json(sink, value)
}

/// Writes `{"data": value, "from_cache": from_cache}`, or a 404 envelope for
/// `None`.
pub fn write_cached_json<S, T>(
    sink: &mut S,
    value: Option<T>,
    from_cache: bool,
) -> Result<(), WriteError>
where
    S: ResponseSink + ?Sized,
    T: Serialize,
{
    JsonWriter::default().write_cached_json(sink, value, from_cache)
}

/// Writes `{"error": message}` with status `code`.
///
/// See [`JsonWriter::write_err`].
pub fn write_err<S, E>(sink: &mut S, err: Option<E>, code: StatusCode) -> Result<(), WriteError>
where
    S: ResponseSink + ?Sized,
    E: fmt::Display,
{
    JsonWriter::default().write_err(sink, err, code)
}

/// Writes an error envelope carrying the reason phrase of `code`.
pub fn write_status_text<S>(sink: &mut S, code: StatusCode) -> Result<(), WriteError>
where
    S: ResponseSink + ?Sized,
{
    JsonWriter::default().write_status_text(sink, code)
}
