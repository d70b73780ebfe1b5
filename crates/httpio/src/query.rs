//! Query string decoder.
//!
//! [`Query`] parses a request's query string once and exposes typed
//! accessors over it. Single-value accessors look at the first value of an
//! exact key; prefix accessors gather the first value of every key that
//! starts with a prefix.

use crate::error::ParseError;
use crate::scalar::{self, QueryFloat, QueryInt, QueryUint};
use crate::width::{FloatWidth, IntWidth};
use chrono::{DateTime, FixedOffset};
use http::{Request, Uri};
use indexmap::IndexMap;

/// Parsed view over a URL query string.
///
/// Absent keys yield the type's zero value with no error. A present key whose
/// first value does not parse yields a [`ParseError`].
///
/// # Example
///
/// ```rust
/// use httpio::{IntWidth, Query};
///
/// let query = Query::parse("id=5&id=6&tag-a=1&tag-b=bad");
///
/// // Only the first value of `id` is considered.
/// assert_eq!(query.get_int("id", IntWidth::Platform).unwrap(), 5);
///
/// // `tag-b` does not parse and is dropped.
/// assert_eq!(query.get_int_slice::<isize>("tag"), vec![1]);
///
/// // Missing keys are not errors.
/// assert_eq!(query.get_int("page", IntWidth::Bits32).unwrap(), 0);
/// ```
///
/// # Ordering
///
/// Prefix accessors make no promise about the order of their results.
/// Compare them as sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    values: IndexMap<String, Vec<String>>,
}

impl Query {
    /// Parses an `application/x-www-form-urlencoded` query string.
    ///
    /// The string must not include the leading `?`. Repeated keys keep their
    /// values in order of appearance. Parsing never fails: a pair containing
    /// `;` or a malformed percent escape is dropped on its own, so its key
    /// reads as absent.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let mut values: IndexMap<String, Vec<String>> = IndexMap::new();
        for segment in query.split('&').filter(|segment| !segment.is_empty()) {
            if let Some(reason) = malformed_pair(segment) {
                tracing::debug!(segment, reason, "dropping malformed query pair");
                continue;
            }
            let pairs: Vec<(String, String)> =
                serde_urlencoded::from_str(segment).unwrap_or_default();
            for (key, value) in pairs {
                values.entry(key).or_default().push(value);
            }
        }
        Self { values }
    }

    /// Parses the query component of a URI.
    #[must_use]
    pub fn from_uri(uri: &Uri) -> Self {
        uri.query().map_or_else(Self::default, Self::parse)
    }

    /// Parses the query string of a request.
    #[must_use]
    pub fn from_request<B>(request: &Request<B>) -> Self {
        Self::from_uri(request.uri())
    }

    /// Number of distinct keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the query string had no parameters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns `true` if `key` appeared at least once.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// All raw values for `key`, in order of appearance.
    #[must_use]
    pub fn get_all(&self, key: &str) -> &[String] {
        self.values
            .get(key)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Iterates over the distinct keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    fn first(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Returns the first value of `key`, or an empty string.
    #[must_use]
    pub fn get_string(&self, key: &str) -> String {
        self.first(key).unwrap_or_default().to_string()
    }

    /// Parses the first value of `key` as a boolean.
    ///
    /// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`.
    pub fn get_bool(&self, key: &str) -> Result<bool, ParseError> {
        self.first(key)
            .map_or(Ok(false), |text| scalar::parse_bool(key, text))
    }

    /// Parses the first value of `key` as an RFC 3339 timestamp.
    ///
    /// An absent key yields [`zero_time`](crate::zero_time).
    pub fn get_time(&self, key: &str) -> Result<DateTime<FixedOffset>, ParseError> {
        self.first(key)
            .map_or_else(|| Ok(scalar::zero_time()), |text| scalar::parse_time(key, text))
    }

    /// Parses the first value of `key` as a signed decimal integer that fits
    /// in `width`.
    pub fn get_int(&self, key: &str, width: IntWidth) -> Result<i64, ParseError> {
        self.first(key)
            .map_or(Ok(0), |text| scalar::parse_int(key, text, width))
    }

    /// Parses the first value of `key` as an unsigned decimal integer that
    /// fits in `width`.
    pub fn get_uint(&self, key: &str, width: IntWidth) -> Result<u64, ParseError> {
        self.first(key)
            .map_or(Ok(0), |text| scalar::parse_uint(key, text, width))
    }

    /// Parses the first value of `key` as a float at the given precision.
    pub fn get_float(&self, key: &str, width: FloatWidth) -> Result<f64, ParseError> {
        self.first(key)
            .map_or(Ok(0.0), |text| scalar::parse_float(key, text, width))
    }

    fn prefixed<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.values
            .iter()
            .filter(move |(key, _)| key.starts_with(prefix))
            .filter_map(|(key, values)| values.first().map(|v| (key.as_str(), v.as_str())))
    }

    fn collect_prefixed<T>(
        &self,
        prefix: &str,
        parse: impl Fn(&str, &str) -> Result<T, ParseError>,
    ) -> Vec<T> {
        self.prefixed(prefix)
            .filter_map(|(key, text)| match parse(key, text) {
                Ok(value) => Some(value),
                Err(error) => {
                    tracing::debug!(key, %error, "skipping unparsable query value");
                    None
                }
            })
            .collect()
    }

    /// First value of every key starting with `prefix`.
    #[must_use]
    pub fn get_string_slice(&self, prefix: &str) -> Vec<String> {
        self.prefixed(prefix)
            .map(|(_, text)| text.to_string())
            .collect()
    }

    /// Signed integers from every key starting with `prefix`.
    ///
    /// The element type selects the width; entries that do not parse or do
    /// not fit are skipped.
    ///
    /// ```rust
    /// use httpio::Query;
    ///
    /// let query = Query::parse("n1=100&n2=1000");
    /// assert_eq!(query.get_int_slice::<i8>("n"), vec![100_i8]);
    /// ```
    #[must_use]
    pub fn get_int_slice<T: QueryInt>(&self, prefix: &str) -> Vec<T> {
        self.collect_prefixed(prefix, |key, text| {
            scalar::parse_int(key, text, T::WIDTH).map(T::from_checked)
        })
    }

    /// Unsigned integers from every key starting with `prefix`.
    #[must_use]
    pub fn get_uint_slice<T: QueryUint>(&self, prefix: &str) -> Vec<T> {
        self.collect_prefixed(prefix, |key, text| {
            scalar::parse_uint(key, text, T::WIDTH).map(T::from_checked)
        })
    }

    /// Floats from every key starting with `prefix`.
    #[must_use]
    pub fn get_float_slice<T: QueryFloat>(&self, prefix: &str) -> Vec<T> {
        self.collect_prefixed(prefix, |key, text| {
            scalar::parse_float(key, text, T::WIDTH).map(T::from_checked)
        })
    }

    /// Booleans from every key starting with `prefix`.
    #[must_use]
    pub fn get_bool_slice(&self, prefix: &str) -> Vec<bool> {
        self.collect_prefixed(prefix, scalar::parse_bool)
    }

    /// RFC 3339 timestamps from every key starting with `prefix`.
    #[must_use]
    pub fn get_time_slice(&self, prefix: &str) -> Vec<DateTime<FixedOffset>> {
        self.collect_prefixed(prefix, scalar::parse_time)
    }
}

fn malformed_pair(segment: &str) -> Option<&'static str> {
    if segment.contains(';') {
        return Some("semicolon separator");
    }
    let bytes = segment.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = bytes.get(i + 1..i + 3);
            if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
                return Some("invalid percent escape");
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    None
}
