//! Fixed-point length arithmetic.
//!
//! All geometry in this crate is expressed in signed integer nanometres,
//! so typical board dimensions fit in 64 bits with plenty of headroom for
//! intermediate products. Coordinates are valid within ±2^52 nm, which also
//! keeps them exactly representable as `f64` when handed to the polygon
//! algebra.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};
use thiserror::Error;

/// Raised when a value does not satisfy a length newtype's range.
///
/// Surfaces only at construction time (e.g. building [`DrcSettings`]); it is
/// never produced inside a running check.
///
/// [`DrcSettings`]: crate::drc::DrcSettings
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum RangeError {
    #[error("length of {0} nm must be greater than zero")]
    NotPositive(i64),
    #[error("length of {0} nm must not be negative")]
    Negative(i64),
}

/// A signed length in nanometres.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Length(i64);

impl Length {
    pub const ZERO: Length = Length(0);

    /// Maximum magnitude of a valid coordinate (±2^52 nm ≈ ±4.5 km).
    pub const MAX_COORDINATE: i64 = 1 << 52;

    pub const fn from_nm(nm: i64) -> Self {
        Length(nm)
    }

    pub fn from_mm(mm: f64) -> Self {
        Length((mm * 1_000_000.0).round() as i64)
    }

    pub const fn to_nm(self) -> i64 {
        self.0
    }

    pub fn to_mm(self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }

    /// The value as `f64` nanometres, the unit used by the polygon algebra.
    pub fn to_nm_f64(self) -> f64 {
        self.0 as f64
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub const fn abs(self) -> Self {
        Length(self.0.abs())
    }

    pub fn min(self, other: Self) -> Self {
        Length(self.0.min(other.0))
    }

    pub fn max(self, other: Self) -> Self {
        Length(self.0.max(other.0))
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}mm", self.to_mm())
    }
}

impl Add for Length {
    type Output = Length;
    fn add(self, rhs: Length) -> Length {
        Length(self.0 + rhs.0)
    }
}

impl AddAssign for Length {
    fn add_assign(&mut self, rhs: Length) {
        self.0 += rhs.0;
    }
}

impl Sub for Length {
    type Output = Length;
    fn sub(self, rhs: Length) -> Length {
        Length(self.0 - rhs.0)
    }
}

impl SubAssign for Length {
    fn sub_assign(&mut self, rhs: Length) {
        self.0 -= rhs.0;
    }
}

impl Neg for Length {
    type Output = Length;
    fn neg(self) -> Length {
        Length(-self.0)
    }
}

impl Mul<i64> for Length {
    type Output = Length;
    fn mul(self, rhs: i64) -> Length {
        Length(self.0 * rhs)
    }
}

impl Div<i64> for Length {
    type Output = Length;
    fn div(self, rhs: i64) -> Length {
        Length(self.0 / rhs)
    }
}

impl Sum for Length {
    fn sum<I: Iterator<Item = Length>>(iter: I) -> Length {
        iter.fold(Length::ZERO, |a, b| a + b)
    }
}

/// A length guaranteed to be ≥ 0 nm.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "Length", into = "Length")]
pub struct UnsignedLength(Length);

impl UnsignedLength {
    pub const ZERO: UnsignedLength = UnsignedLength(Length::ZERO);

    pub fn new(length: Length) -> Result<Self, RangeError> {
        if length.to_nm() < 0 {
            Err(RangeError::Negative(length.to_nm()))
        } else {
            Ok(UnsignedLength(length))
        }
    }

    /// Constructs from a literal nanometre value; panics on a negative
    /// literal, so only use with compile-time constants.
    pub const fn from_nm(nm: i64) -> Self {
        assert!(nm >= 0, "UnsignedLength literal must be >= 0");
        UnsignedLength(Length::from_nm(nm))
    }

    pub const fn get(self) -> Length {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0.is_zero()
    }
}

impl TryFrom<Length> for UnsignedLength {
    type Error = RangeError;
    fn try_from(length: Length) -> Result<Self, RangeError> {
        UnsignedLength::new(length)
    }
}

impl From<UnsignedLength> for Length {
    fn from(value: UnsignedLength) -> Length {
        value.0
    }
}

impl fmt::Display for UnsignedLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A length guaranteed to be > 0 nm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Length", into = "Length")]
pub struct PositiveLength(Length);

impl PositiveLength {
    pub fn new(length: Length) -> Result<Self, RangeError> {
        if length.to_nm() <= 0 {
            Err(RangeError::NotPositive(length.to_nm()))
        } else {
            Ok(PositiveLength(length))
        }
    }

    /// Constructs from a literal nanometre value; panics on a non-positive
    /// literal, so only use with compile-time constants.
    pub const fn from_nm(nm: i64) -> Self {
        assert!(nm > 0, "PositiveLength literal must be > 0");
        PositiveLength(Length::from_nm(nm))
    }

    pub const fn get(self) -> Length {
        self.0
    }
}

impl TryFrom<Length> for PositiveLength {
    type Error = RangeError;
    fn try_from(length: Length) -> Result<Self, RangeError> {
        PositiveLength::new(length)
    }
}

impl From<PositiveLength> for Length {
    fn from(value: PositiveLength) -> Length {
        value.0
    }
}

impl From<PositiveLength> for UnsignedLength {
    fn from(value: PositiveLength) -> UnsignedLength {
        UnsignedLength(value.0)
    }
}

impl fmt::Display for PositiveLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_arithmetic() {
        let a = Length::from_nm(200_000);
        let b = Length::from_nm(50_000);
        assert_eq!(a + b, Length::from_nm(250_000));
        assert_eq!(a - b, Length::from_nm(150_000));
        assert_eq!(-a, Length::from_nm(-200_000));
        assert_eq!(a * 2, Length::from_nm(400_000));
        assert_eq!(a / 2, Length::from_nm(100_000));
    }

    #[test]
    fn test_mm_round_trip() {
        assert_eq!(Length::from_mm(0.2), Length::from_nm(200_000));
        assert_eq!(Length::from_nm(1_500_000).to_mm(), 1.5);
    }

    #[test]
    fn test_unsigned_rejects_negative() {
        assert!(UnsignedLength::new(Length::from_nm(-1)).is_err());
        assert!(UnsignedLength::new(Length::ZERO).is_ok());
    }

    #[test]
    fn test_positive_rejects_zero() {
        assert_eq!(
            PositiveLength::new(Length::ZERO),
            Err(RangeError::NotPositive(0))
        );
        assert!(PositiveLength::new(Length::from_nm(1)).is_ok());
    }
}
