//! Bit-width selectors for numeric query parsing.
//!
//! Numeric accessors on [`Query`](crate::Query) take an explicit width so
//! range checks are tied to a closed set of sizes instead of a free integer.

use crate::error::InvalidWidth;
use std::fmt;

/// Width used to range-check signed and unsigned integer parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IntWidth {
    /// Native pointer width (`isize` / `usize`).
    #[default]
    Platform,
    /// 8 bits.
    Bits8,
    /// 16 bits.
    Bits16,
    /// 32 bits.
    Bits32,
    /// 64 bits.
    Bits64,
}

impl IntWidth {
    /// Returns the number of bits this width stands for.
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Self::Platform => usize::BITS,
            Self::Bits8 => 8,
            Self::Bits16 => 16,
            Self::Bits32 => 32,
            Self::Bits64 => 64,
        }
    }

    /// Smallest signed value representable at this width.
    #[must_use]
    pub const fn signed_min(self) -> i64 {
        match self.bits() {
            8 => i8::MIN as i64,
            16 => i16::MIN as i64,
            32 => i32::MIN as i64,
            _ => i64::MIN,
        }
    }

    /// Largest signed value representable at this width.
    #[must_use]
    pub const fn signed_max(self) -> i64 {
        match self.bits() {
            8 => i8::MAX as i64,
            16 => i16::MAX as i64,
            32 => i32::MAX as i64,
            _ => i64::MAX,
        }
    }

    /// Largest unsigned value representable at this width.
    #[must_use]
    pub const fn unsigned_max(self) -> u64 {
        match self.bits() {
            8 => u8::MAX as u64,
            16 => u16::MAX as u64,
            32 => u32::MAX as u64,
            _ => u64::MAX,
        }
    }
}

impl TryFrom<u32> for IntWidth {
    type Error = InvalidWidth;

    /// Maps a bit count to a width; `0` selects [`IntWidth::Platform`].
    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        match bits {
            0 => Ok(Self::Platform),
            8 => Ok(Self::Bits8),
            16 => Ok(Self::Bits16),
            32 => Ok(Self::Bits32),
            64 => Ok(Self::Bits64),
            other => Err(InvalidWidth::integer(other)),
        }
    }
}

impl fmt::Display for IntWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Platform => write!(f, "platform ({} bits)", self.bits()),
            other => write!(f, "{} bits", other.bits()),
        }
    }
}

/// Width used when parsing floating point parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FloatWidth {
    /// Single precision; parsed values are rounded to `f32`.
    Bits32,
    /// Double precision.
    #[default]
    Bits64,
}

impl FloatWidth {
    /// Returns the number of bits this width stands for.
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Self::Bits32 => 32,
            Self::Bits64 => 64,
        }
    }
}

impl TryFrom<u32> for FloatWidth {
    type Error = InvalidWidth;

    fn try_from(bits: u32) -> Result<Self, Self::Error> {
        match bits {
            32 => Ok(Self::Bits32),
            64 => Ok(Self::Bits64),
            other => Err(InvalidWidth::float(other)),
        }
    }
}

impl fmt::Display for FloatWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} bits", self.bits())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_width_from_bits() {
        assert_eq!(IntWidth::try_from(0).unwrap(), IntWidth::Platform);
        assert_eq!(IntWidth::try_from(8).unwrap(), IntWidth::Bits8);
        assert_eq!(IntWidth::try_from(16).unwrap(), IntWidth::Bits16);
        assert_eq!(IntWidth::try_from(32).unwrap(), IntWidth::Bits32);
        assert_eq!(IntWidth::try_from(64).unwrap(), IntWidth::Bits64);
    }

    #[test]
    fn test_int_width_rejects_odd_sizes() {
        let err = IntWidth::try_from(12).unwrap_err();
        assert_eq!(err.bits(), 12);
        assert!(err.to_string().contains("12"));
        assert!(IntWidth::try_from(128).is_err());
    }

    #[test]
    fn test_int_width_bounds() {
        assert_eq!(IntWidth::Bits8.signed_min(), -128);
        assert_eq!(IntWidth::Bits8.signed_max(), 127);
        assert_eq!(IntWidth::Bits16.unsigned_max(), 65_535);
        assert_eq!(IntWidth::Bits64.unsigned_max(), u64::MAX);
        assert_eq!(IntWidth::Platform.bits(), usize::BITS);
    }

    #[test]
    fn test_float_width_from_bits() {
        assert_eq!(FloatWidth::try_from(32).unwrap(), FloatWidth::Bits32);
        assert_eq!(FloatWidth::try_from(64).unwrap(), FloatWidth::Bits64);
        assert!(FloatWidth::try_from(0).is_err());
        assert!(FloatWidth::try_from(16).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(IntWidth::Bits32.to_string(), "32 bits");
        assert_eq!(FloatWidth::Bits64.to_string(), "64 bits");
        assert!(IntWidth::Platform.to_string().starts_with("platform"));
    }
}
