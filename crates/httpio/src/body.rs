//! JSON request body reading.

use crate::config::RequestConfig;
use crate::error::BodyError;
use http::Request;
use serde::de::DeserializeOwned;
use std::io::Read;

/// Reads request bodies, optionally enforcing a size limit.
///
/// # Example
///
/// ```rust
/// use httpio::{BodyError, BodyReader, RequestConfig};
/// use serde::Deserialize;
///
/// #[derive(Debug, Deserialize)]
/// struct CreateUser {
///     name: String,
/// }
///
/// let reader = BodyReader::new(&RequestConfig { max_body_bytes: Some(32) });
///
/// let user: CreateUser = reader.read_json(&br#"{"name": "Alice"}"#[..]).unwrap();
/// assert_eq!(user.name, "Alice");
///
/// let big = format!(r#"{{"name": "{}"}}"#, "A".repeat(64));
/// let err = reader.read_json::<CreateUser, _>(big.as_bytes()).unwrap_err();
/// assert!(matches!(err, BodyError::PayloadTooLarge { limit: 32, .. }));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BodyReader {
    max_body_bytes: Option<usize>,
}

impl BodyReader {
    /// Creates a reader from the request configuration.
    #[must_use]
    pub fn new(config: &RequestConfig) -> Self {
        Self {
            max_body_bytes: config.max_body_bytes,
        }
    }

    /// Creates a reader with no size limit.
    #[must_use]
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Reads the whole body into memory.
    pub fn read_bytes<R: Read>(&self, mut body: R) -> Result<Vec<u8>, BodyError> {
        let mut buf = Vec::new();
        match self.max_body_bytes {
            Some(limit) => {
                // One byte past the limit is enough to detect an oversized body.
                let cap = u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1);
                body.take(cap)
                    .read_to_end(&mut buf)
                    .map_err(BodyError::Io)?;
                if buf.len() > limit {
                    return Err(BodyError::PayloadTooLarge {
                        limit,
                        actual: buf.len(),
                    });
                }
            }
            None => {
                body.read_to_end(&mut buf).map_err(BodyError::Io)?;
            }
        }
        Ok(buf)
    }

    /// Reads the whole body and decodes it as JSON.
    ///
    /// No response is written; map the error with
    /// [`BodyError::status_code`] (usually 400).
    pub fn read_json<T: DeserializeOwned, R: Read>(&self, body: R) -> Result<T, BodyError> {
        let bytes = self.read_bytes(body)?;
        serde_json::from_slice(&bytes).map_err(BodyError::Decode)
    }

    /// Consumes a request and decodes its body as JSON.
    pub fn read_json_request<T: DeserializeOwned, B: Read>(
        &self,
        request: Request<B>,
    ) -> Result<T, BodyError> {
        self.read_json(request.into_body())
    }
}

/// Reads the whole body and decodes it as JSON, without a size limit.
///
/// ```rust
/// use std::collections::HashMap;
///
/// let body = br#"{"a": 1, "b": 2}"#;
/// let map: HashMap<String, u32> = httpio::read_json(&body[..]).unwrap();
/// assert_eq!(map["b"], 2);
/// ```
pub fn read_json<T: DeserializeOwned, R: Read>(body: R) -> Result<T, BodyError> {
    BodyReader::unlimited().read_json(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;
    use serde::Deserialize;
    use std::io;

    #[derive(Debug, Deserialize, PartialEq)]
    struct CreateUser {
        name: String,
        email: String,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct NestedData {
        user: CreateUser,
        tags: Vec<String>,
    }

    struct BrokenBody;

    impl Read for BrokenBody {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::ConnectionReset, "peer reset"))
        }
    }

    #[test]
    fn test_simple_json() {
        let body = br#"{"name": "Alice", "email": "alice@example.com"}"#;
        let user: CreateUser = read_json(&body[..]).unwrap();

        assert_eq!(user.name, "Alice");
        assert_eq!(user.email, "alice@example.com");
    }

    #[test]
    fn test_nested_json() {
        let body = br#"{"user": {"name": "Bob", "email": "bob@example.com"}, "tags": ["admin", "active"]}"#;
        let data: NestedData = read_json(&body[..]).unwrap();

        assert_eq!(data.user.name, "Bob");
        assert_eq!(data.tags, vec!["admin", "active"]);
    }

    #[test]
    fn test_invalid_json() {
        let body = br#"{"name": "Alice", invalid json"#;
        let err = read_json::<CreateUser, _>(&body[..]).unwrap_err();

        assert!(matches!(err, BodyError::Decode(_)));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_empty_body_is_decode_error() {
        let err = read_json::<CreateUser, _>(&b""[..]).unwrap_err();
        assert!(matches!(err, BodyError::Decode(_)));
    }

    #[test]
    fn test_wrong_shape() {
        let body = br#"{"name": 123, "email": "alice@example.com"}"#;
        assert!(read_json::<CreateUser, _>(&body[..]).is_err());
    }

    #[test]
    fn test_read_failure() {
        let err = read_json::<CreateUser, _>(BrokenBody).unwrap_err();

        assert!(matches!(err, BodyError::Io(_)));
        assert!(err.to_string().contains("peer reset"));
    }

    #[test]
    fn test_limit_exact_size_is_accepted() {
        let body = br#"{"name": "A", "email": "b"}"#;
        let reader = BodyReader::new(&RequestConfig {
            max_body_bytes: Some(body.len()),
        });

        let user: CreateUser = reader.read_json(&body[..]).unwrap();
        assert_eq!(user.name, "A");
    }

    #[test]
    fn test_limit_exceeded() {
        let body = br#"{"name": "A", "email": "b"}"#;
        let reader = BodyReader::new(&RequestConfig {
            max_body_bytes: Some(body.len() - 1),
        });

        let err = reader.read_json::<CreateUser, _>(&body[..]).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::PAYLOAD_TOO_LARGE);
        assert_eq!(err.error_code(), "PAYLOAD_TOO_LARGE");
    }

    #[test]
    fn test_read_json_request() {
        let body = br#"{"name": "Alice", "email": "alice@example.com"}"#;
        let request = Request::builder()
            .method("POST")
            .uri("/users")
            .body(&body[..])
            .unwrap();

        let user: CreateUser = BodyReader::unlimited().read_json_request(request).unwrap();
        assert_eq!(user.email, "alice@example.com");
    }
}
