//! Scalar parsers shared by the single-value and prefix accessors.

use crate::error::ParseError;
use crate::width::{FloatWidth, IntWidth};
use chrono::{DateTime, FixedOffset, Timelike};
use std::num::{IntErrorKind, ParseIntError};

mod sealed {
    pub trait Sealed {}
}

/// Signed integer types a prefix accessor can produce.
///
/// The element type fixes the width used for range checking; `isize`
/// uses [`IntWidth::Platform`].
pub trait QueryInt: Copy + sealed::Sealed {
    /// Width the value is range-checked against.
    const WIDTH: IntWidth;

    #[doc(hidden)]
    fn from_checked(value: i64) -> Self;
}

/// Unsigned integer types a prefix accessor can produce.
pub trait QueryUint: Copy + sealed::Sealed {
    /// Width the value is range-checked against.
    const WIDTH: IntWidth;

    #[doc(hidden)]
    fn from_checked(value: u64) -> Self;
}

/// Floating point types a prefix accessor can produce.
pub trait QueryFloat: Copy + sealed::Sealed {
    /// Precision the text is parsed at.
    const WIDTH: FloatWidth;

    #[doc(hidden)]
    fn from_checked(value: f64) -> Self;
}

macro_rules! impl_query_int {
    ($trait:ident, $repr:ty, $($t:ty => $width:expr),* $(,)?) => {
        $(
            impl sealed::Sealed for $t {}

            impl $trait for $t {
                const WIDTH: IntWidth = $width;

                // Values are range-checked against WIDTH before narrowing.
                #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap, clippy::unnecessary_cast)]
                fn from_checked(value: $repr) -> Self {
                    value as $t
                }
            }
        )*
    };
}

impl_query_int!(
    QueryInt,
    i64,
    i8 => IntWidth::Bits8,
    i16 => IntWidth::Bits16,
    i32 => IntWidth::Bits32,
    i64 => IntWidth::Bits64,
    isize => IntWidth::Platform,
);

impl_query_int!(
    QueryUint,
    u64,
    u8 => IntWidth::Bits8,
    u16 => IntWidth::Bits16,
    u32 => IntWidth::Bits32,
    u64 => IntWidth::Bits64,
    usize => IntWidth::Platform,
);

impl sealed::Sealed for f32 {}
impl sealed::Sealed for f64 {}

impl QueryFloat for f32 {
    const WIDTH: FloatWidth = FloatWidth::Bits32;

    // Already rounded to single precision by the parser.
    #[allow(clippy::cast_possible_truncation)]
    fn from_checked(value: f64) -> Self {
        value as f32
    }
}

impl QueryFloat for f64 {
    const WIDTH: FloatWidth = FloatWidth::Bits64;

    fn from_checked(value: f64) -> Self {
        value
    }
}

/// Time returned for an absent key: `0001-01-01T00:00:00Z`.
#[must_use]
pub fn zero_time() -> DateTime<FixedOffset> {
    DateTime::from_timestamp(-62_135_596_800, 0)
        .map(|t| t.fixed_offset())
        .unwrap_or_default()
}

pub(crate) fn parse_bool(key: &str, text: &str) -> Result<bool, ParseError> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ParseError::syntax(key, text, "bool")),
    }
}

pub(crate) fn parse_time(key: &str, text: &str) -> Result<DateTime<FixedOffset>, ParseError> {
    const TARGET: &str = "RFC 3339 time";
    // chrono also takes a space or lowercase `t` separator and a lowercase
    // `z`; only the uppercase forms are accepted here.
    if text.as_bytes().get(10) != Some(&b'T') || text.ends_with('z') {
        return Err(ParseError::syntax(key, text, TARGET));
    }
    let parsed =
        DateTime::parse_from_rfc3339(text).map_err(|_| ParseError::syntax(key, text, TARGET))?;

    // A leap second shows up as a nanosecond count past one second.
    if parsed.nanosecond() >= 1_000_000_000 {
        return Err(ParseError::range(key, text, TARGET));
    }
    Ok(parsed)
}

fn signed_name(width: IntWidth) -> &'static str {
    match width {
        IntWidth::Platform => "isize",
        IntWidth::Bits8 => "i8",
        IntWidth::Bits16 => "i16",
        IntWidth::Bits32 => "i32",
        IntWidth::Bits64 => "i64",
    }
}

fn unsigned_name(width: IntWidth) -> &'static str {
    match width {
        IntWidth::Platform => "usize",
        IntWidth::Bits8 => "u8",
        IntWidth::Bits16 => "u16",
        IntWidth::Bits32 => "u32",
        IntWidth::Bits64 => "u64",
    }
}

fn int_error(key: &str, text: &str, target: &'static str, err: &ParseIntError) -> ParseError {
    match err.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            ParseError::range(key, text, target)
        }
        _ => ParseError::syntax(key, text, target),
    }
}

pub(crate) fn parse_int(key: &str, text: &str, width: IntWidth) -> Result<i64, ParseError> {
    let target = signed_name(width);
    let value: i64 = text
        .parse()
        .map_err(|e| int_error(key, text, target, &e))?;

    if value < width.signed_min() || value > width.signed_max() {
        return Err(ParseError::range(key, text, target));
    }
    Ok(value)
}

pub(crate) fn parse_uint(key: &str, text: &str, width: IntWidth) -> Result<u64, ParseError> {
    let target = unsigned_name(width);
    // `u64::from_str` tolerates a leading '+', unsigned parameters do not.
    if text.starts_with('+') {
        return Err(ParseError::syntax(key, text, target));
    }
    let value: u64 = text
        .parse()
        .map_err(|e| int_error(key, text, target, &e))?;

    if value > width.unsigned_max() {
        return Err(ParseError::range(key, text, target));
    }
    Ok(value)
}

fn is_infinity_literal(text: &str) -> bool {
    let unsigned = text
        .strip_prefix('+')
        .or_else(|| text.strip_prefix('-'))
        .unwrap_or(text);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

pub(crate) fn parse_float(key: &str, text: &str, width: FloatWidth) -> Result<f64, ParseError> {
    let (parsed, target) = match width {
        FloatWidth::Bits32 => (text.parse::<f32>().map(f64::from), "f32"),
        FloatWidth::Bits64 => (text.parse::<f64>(), "f64"),
    };
    let value = parsed.map_err(|_| ParseError::syntax(key, text, target))?;

    if value.is_infinite() && !is_infinity_literal(text) {
        return Err(ParseError::range(key, text, target));
    }
    Ok(value)
}
