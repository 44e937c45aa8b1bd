//! Angles in signed millidegrees.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Neg, Sub};

/// A rotation angle stored as signed degrees × 1000.
///
/// Arc angles on path vertices use the same unit; positive values sweep
/// counter-clockwise.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Angle(i32);

impl Angle {
    pub const ZERO: Angle = Angle(0);
    pub const DEG_90: Angle = Angle(90_000);
    pub const DEG_180: Angle = Angle(180_000);
    pub const DEG_270: Angle = Angle(270_000);

    pub const fn from_millidegrees(mdeg: i32) -> Self {
        Angle(mdeg)
    }

    pub fn from_degrees(deg: f64) -> Self {
        Angle((deg * 1000.0).round() as i32)
    }

    pub const fn to_millidegrees(self) -> i32 {
        self.0
    }

    pub fn to_degrees(self) -> f64 {
        self.0 as f64 / 1000.0
    }

    pub fn to_radians(self) -> f64 {
        self.to_degrees().to_radians()
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub const fn abs(self) -> Self {
        Angle(self.0.abs())
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}°", self.to_degrees())
    }
}

impl Add for Angle {
    type Output = Angle;
    fn add(self, rhs: Angle) -> Angle {
        Angle(self.0 + rhs.0)
    }
}

impl Sub for Angle {
    type Output = Angle;
    fn sub(self, rhs: Angle) -> Angle {
        Angle(self.0 - rhs.0)
    }
}

impl Neg for Angle {
    type Output = Angle;
    fn neg(self) -> Angle {
        Angle(-self.0)
    }
}
