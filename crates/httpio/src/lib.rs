//! # httpio
//!
//! Small helpers for HTTP JSON APIs: write values and errors as JSON
//! responses, and decode typed values out of query strings.
//!
//! ## Responses
//!
//! | Helper | Body | Status |
//! |--------|------|--------|
//! | [`write_json`] | the value, tab indented | 200 |
//! | [`write_cached_json`] | `{"data": ..., "from_cache": ...}` | 200 |
//! | [`write_err`] | `{"error": "..."}` | caller supplied |
//!
//! Passing `None` to any of them answers `404 {"error": "not found"}`.
//! Responses go through the [`ResponseSink`] trait; [`BufferedResponse`]
//! implements it in memory and converts into an [`http::Response`].
//!
//! ```rust
//! use httpio::{write_json, BufferedResponse};
//! use http::StatusCode;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct User {
//!     id: u64,
//!     name: String,
//! }
//!
//! fn find_user(id: u64) -> Option<User> {
//!     (id == 1).then(|| User { id, name: "Alice".into() })
//! }
//!
//! let mut response = BufferedResponse::new();
//! write_json(&mut response, find_user(2)).unwrap();
//! assert_eq!(response.status(), StatusCode::NOT_FOUND);
//! ```
//!
//! ## Query strings
//!
//! [`Query`] parses a query string once. Single-value accessors return the
//! zero value for missing keys and a [`ParseError`] for malformed ones.
//! Prefix accessors collect every key sharing a prefix and skip entries that
//! do not parse.
//!
//! ```rust
//! use httpio::{IntWidth, Query};
//!
//! let query = Query::parse("limit=20&flag1=true&flag2=nope");
//!
//! assert_eq!(query.get_int("limit", IntWidth::Bits32).unwrap(), 20);
//! assert_eq!(query.get_bool_slice("flag"), vec![true]);
//! ```
//!
//! ## Request bodies
//!
//! [`read_json`] decodes a body; [`BodyReader`] adds a size limit from
//! [`RequestConfig`]. Errors carry a suggested status code:
//!
//! ```rust
//! use httpio::BodyError;
//!
//! let err = httpio::read_json::<u32, _>(&b"{"[..]).unwrap_err();
//! assert!(matches!(err, BodyError::Decode(_)));
//! assert_eq!(err.status_code(), http::StatusCode::BAD_REQUEST);
//! ```

#![doc(html_root_url = "https://docs.rs/httpio/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod body;
mod config;
mod error;
mod query;
pub mod response;
mod scalar;
mod sink;
mod width;

pub use body::{read_json, BodyReader};
pub use config::{HttpIoConfig, HttpIoConfigBuilder, RequestConfig, ResponseConfig};
pub use error::{
    BodyError, ConfigError, EncodeError, InvalidWidth, ParseError, ParseErrorKind, WriteError,
};
pub use query::Query;
pub use response::{
    encode_json, write_cached_json, write_err, write_json, write_status_text, CachedEnvelope,
    ErrorEnvelope, JsonWriter,
};
pub use scalar::{zero_time, QueryFloat, QueryInt, QueryUint};
pub use sink::{BufferedResponse, ResponseSink};
pub use width::{FloatWidth, IntWidth};
