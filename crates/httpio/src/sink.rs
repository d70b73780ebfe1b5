//! Response sinks.
//!
//! A [`ResponseSink`] is the write side of an HTTP exchange: a header map, a
//! status line that can be committed once, and an append-only body. The
//! response helpers in this crate only talk to this trait.

use bytes::{Bytes, BytesMut};
use http::{HeaderMap, Response, StatusCode};
use std::io;

/// Write side of an HTTP response.
///
/// Implementations follow these rules:
///
/// - the first call to [`write_status`](Self::write_status) commits the
///   status and the headers as they are at that moment; later calls are
///   ignored
/// - [`write_body`](Self::write_body) commits `200 OK` if nothing was
///   committed yet, then appends the bytes
/// - header changes after the commit are not sent
pub trait ResponseSink {
    /// Mutable access to the response headers.
    fn headers_mut(&mut self) -> &mut HeaderMap;

    /// Commits the status line.
    fn write_status(&mut self, status: StatusCode);

    /// Appends bytes to the body.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport cannot accept the bytes.
    fn write_body(&mut self, chunk: &[u8]) -> io::Result<()>;
}

impl<S: ResponseSink + ?Sized> ResponseSink for &mut S {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        (**self).headers_mut()
    }

    fn write_status(&mut self, status: StatusCode) {
        (**self).write_status(status);
    }

    fn write_body(&mut self, chunk: &[u8]) -> io::Result<()> {
        (**self).write_body(chunk)
    }
}

/// In-memory [`ResponseSink`] that can be turned into an [`http::Response`].
///
/// # Example
///
/// ```rust
/// use httpio::{write_json, BufferedResponse};
/// use http::StatusCode;
///
/// let mut response = BufferedResponse::new();
/// write_json(&mut response, Some(vec![1, 2, 3])).unwrap();
///
/// let response = response.into_response();
/// assert_eq!(response.status(), StatusCode::OK);
/// assert_eq!(response.body().as_ref(), b"[\n\t1,\n\t2,\n\t3\n]\n");
/// ```
#[derive(Debug, Default)]
pub struct BufferedResponse {
    headers: HeaderMap,
    committed: Option<(StatusCode, HeaderMap)>,
    body: BytesMut,
}

impl BufferedResponse {
    /// Creates an empty, uncommitted response.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Status that will be sent; `200 OK` if none was committed.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        self.committed
            .as_ref()
            .map_or(StatusCode::OK, |(status, _)| *status)
    }

    /// Headers that will be sent.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        self.committed
            .as_ref()
            .map_or(&self.headers, |(_, headers)| headers)
    }

    /// Body bytes written so far.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Returns `true` once a status has been committed.
    #[must_use]
    pub fn is_committed(&self) -> bool {
        self.committed.is_some()
    }

    /// Converts the buffered state into an HTTP response.
    #[must_use]
    pub fn into_response(self) -> Response<Bytes> {
        let (status, headers) = self
            .committed
            .unwrap_or((StatusCode::OK, self.headers));

        let mut response = Response::new(self.body.freeze());
        *response.status_mut() = status;
        *response.headers_mut() = headers;
        response
    }
}

impl ResponseSink for BufferedResponse {
    fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    fn write_status(&mut self, status: StatusCode) {
        if self.committed.is_none() {
            self.committed = Some((status, self.headers.clone()));
        }
    }

    fn write_body(&mut self, chunk: &[u8]) -> io::Result<()> {
        self.write_status(StatusCode::OK);
        self.body.extend_from_slice(chunk);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header;

    #[test]
    fn test_uncommitted_defaults() {
        let response = BufferedResponse::new();

        assert!(!response.is_committed());
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.body().is_empty());
    }

    #[test]
    fn test_first_status_wins() {
        let mut response = BufferedResponse::new();
        response.write_status(StatusCode::NOT_FOUND);
        response.write_status(StatusCode::OK);

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_body_write_commits_ok() {
        let mut response = BufferedResponse::new();
        response.write_body(b"hello").unwrap();
        response.write_status(StatusCode::INTERNAL_SERVER_ERROR);

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.body(), b"hello");
    }

    #[test]
    fn test_headers_after_commit_are_not_sent() {
        let mut response = BufferedResponse::new();
        response
            .headers_mut()
            .insert(header::CONTENT_TYPE, "application/json".parse().unwrap());
        response.write_status(StatusCode::CREATED);
        response
            .headers_mut()
            .insert("x-late", "1".parse().unwrap());

        let http_response = response.into_response();
        assert_eq!(http_response.status(), StatusCode::CREATED);
        assert_eq!(
            http_response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert!(http_response.headers().get("x-late").is_none());
    }

    #[test]
    fn test_body_writes_concatenate() {
        let mut response = BufferedResponse::new();
        response.write_body(b"ab").unwrap();
        response.write_body(b"cd").unwrap();

        assert_eq!(response.into_response().body().as_ref(), b"abcd");
    }

    #[test]
    fn test_sink_through_mut_reference() {
        fn write_twice(mut sink: impl ResponseSink) {
            sink.write_body(b"x").unwrap();
            sink.write_body(b"y").unwrap();
        }

        let mut response = BufferedResponse::new();
        write_twice(&mut response);
        assert_eq!(response.body(), b"xy");
    }
}
