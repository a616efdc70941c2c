//! 16.16 fixed-point numbers for deterministic fractional geometry.
//!
//! Layout never touches floating point: fractions such as "half of the
//! parent" are encoded as [`Fixed`] and applied to integer lengths with
//! 64-bit intermediates, so repeated passes produce bit-identical results on
//! every host.

use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::str::FromStr;

/// Number of fractional bits in a [`Fixed`].
pub const FRACTION_BITS: u32 = 16;

const ONE_RAW: i32 = 1 << FRACTION_BITS;
const HALF_RAW: i32 = 1 << (FRACTION_BITS - 1);
const MAX_INT: i32 = i32::MAX >> FRACTION_BITS;
const MIN_INT: i32 = i32::MIN >> FRACTION_BITS;

/// Errors from parsing decimal text into a [`Fixed`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FixedParseError {
    #[error("empty number")]
    Empty,
    #[error("invalid number: {0}")]
    Invalid(String),
    #[error("number out of range: {0}")]
    OutOfRange(String),
}

/// A signed 16.16 fixed-point value. `Fixed::ONE` is one unit.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed(i32);

impl Fixed {
    pub const ZERO: Fixed = Fixed(0);
    pub const ONE: Fixed = Fixed(ONE_RAW);
    pub const HALF: Fixed = Fixed(HALF_RAW);

    /// The raw 16.16 encoding.
    #[inline]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Convert a whole number, saturating to the representable range
    /// `-32768..=32767`.
    #[inline]
    pub const fn from_int(value: i32) -> Self {
        let value = if value > MAX_INT {
            MAX_INT
        } else if value < MIN_INT {
            MIN_INT
        } else {
            value
        };
        Fixed(value << FRACTION_BITS)
    }

    /// `num / den` as a fixed-point value, truncated toward zero.
    /// A zero denominator yields zero.
    #[inline]
    pub const fn from_ratio(num: i32, den: i32) -> Self {
        if den == 0 {
            return Fixed::ZERO;
        }
        Fixed((((num as i64) << FRACTION_BITS) / den as i64) as i32)
    }

    /// Integer part, truncated toward zero.
    #[inline]
    pub const fn to_int(self) -> i32 {
        self.0 / ONE_RAW
    }

    /// Nearest integer, halves rounded away from zero.
    #[inline]
    pub const fn round(self) -> i32 {
        if self.0 >= 0 {
            ((self.0 as i64 + HALF_RAW as i64) >> FRACTION_BITS) as i32
        } else {
            -(((-(self.0 as i64)) + HALF_RAW as i64) >> FRACTION_BITS) as i32
        }
    }

    /// Scale an integer length by this value, truncating toward zero.
    ///
    /// `Fixed::HALF.mul_int(100) == 50`.
    #[inline]
    pub const fn mul_int(self, length: i32) -> i32 {
        mul_div(self.0, length, ONE_RAW)
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Whether the value is at most one unit, i.e. reads as a fraction.
    #[inline]
    pub const fn is_fraction(self) -> bool {
        self.0 <= ONE_RAW
    }
}

/// `a * b / c` with a 64-bit intermediate, truncated toward zero.
/// A zero divisor yields zero.
#[inline]
pub const fn mul_div(a: i32, b: i32, c: i32) -> i32 {
    if c == 0 {
        return 0;
    }
    ((a as i64 * b as i64) / c as i64) as i32
}

/// [`mul_div`] over 64-bit operands with a 128-bit intermediate.
#[inline]
pub const fn mul_div_wide(a: i64, b: i64, c: i64) -> i64 {
    if c == 0 {
        return 0;
    }
    ((a as i128 * b as i128) / c as i128) as i64
}

impl From<i32> for Fixed {
    fn from(value: i32) -> Self {
        Fixed::from_int(value)
    }
}

impl Add for Fixed {
    type Output = Fixed;
    #[inline]
    fn add(self, rhs: Fixed) -> Fixed {
        Fixed(self.0 + rhs.0)
    }
}

impl Sub for Fixed {
    type Output = Fixed;
    #[inline]
    fn sub(self, rhs: Fixed) -> Fixed {
        Fixed(self.0 - rhs.0)
    }
}

impl Neg for Fixed {
    type Output = Fixed;
    #[inline]
    fn neg(self) -> Fixed {
        Fixed(-self.0)
    }
}

impl Mul for Fixed {
    type Output = Fixed;
    #[inline]
    fn mul(self, rhs: Fixed) -> Fixed {
        Fixed(((self.0 as i64 * rhs.0 as i64) / ONE_RAW as i64) as i32)
    }
}

impl Div for Fixed {
    type Output = Fixed;

    /// # Panics
    ///
    /// Panics when `rhs` is zero, like integer division.
    #[inline]
    fn div(self, rhs: Fixed) -> Fixed {
        Fixed((((self.0 as i64) << FRACTION_BITS) / rhs.0 as i64) as i32)
    }
}

impl FromStr for Fixed {
    type Err = FixedParseError;

    /// Parse decimal text such as `"12"`, `"-0.5"` or `"3.125"` using integer
    /// math only. Fraction digits beyond the ninth are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        if text.is_empty() {
            return Err(FixedParseError::Empty);
        }

        let (negative, body) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text.strip_prefix('+').unwrap_or(text)),
        };
        let (int_str, frac_str) = match body.split_once('.') {
            Some((i, f)) => (i, f),
            None => (body, ""),
        };
        if int_str.is_empty() && frac_str.is_empty() {
            return Err(FixedParseError::Invalid(s.to_owned()));
        }
        if !int_str.bytes().all(|b| b.is_ascii_digit())
            || !frac_str.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(FixedParseError::Invalid(s.to_owned()));
        }

        let mut int_part: i64 = 0;
        for b in int_str.bytes() {
            int_part = int_part * 10 + i64::from(b - b'0');
            if int_part > -i64::from(MIN_INT) {
                return Err(FixedParseError::OutOfRange(s.to_owned()));
            }
        }

        let mut frac_value: i64 = 0;
        let mut scale: i64 = 1;
        for b in frac_str.bytes().take(9) {
            frac_value = frac_value * 10 + i64::from(b - b'0');
            scale *= 10;
        }

        let magnitude = (int_part << FRACTION_BITS) + (frac_value << FRACTION_BITS) / scale;
        let raw = if negative { -magnitude } else { magnitude };
        i32::try_from(raw)
            .map(Fixed)
            .map_err(|_| FixedParseError::OutOfRange(s.to_owned()))
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abs = (self.0 as i64).abs();
        let mut int_part = abs >> FRACTION_BITS;
        let mut frac = ((abs & (ONE_RAW as i64 - 1)) * 10_000 + HALF_RAW as i64) >> FRACTION_BITS;
        if frac == 10_000 {
            int_part += 1;
            frac = 0;
        }
        let sign = if self.0 < 0 && (int_part != 0 || frac != 0) { "-" } else { "" };
        if frac == 0 {
            write!(f, "{sign}{int_part}")
        } else {
            let digits = format!("{frac:04}");
            write!(f, "{sign}{int_part}.{}", digits.trim_end_matches('0'))
        }
    }
}
