//! Integer points in the board plane.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use super::Length;

/// A point with nanometre coordinates, y pointing up.
#[derive(
    Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Point {
    pub x: Length,
    pub y: Length,
}

impl Point {
    pub const ORIGIN: Point = Point {
        x: Length::ZERO,
        y: Length::ZERO,
    };

    pub const fn new(x: Length, y: Length) -> Self {
        Point { x, y }
    }

    pub const fn from_nm(x: i64, y: i64) -> Self {
        Point {
            x: Length::from_nm(x),
            y: Length::from_nm(y),
        }
    }

    /// Euclidean distance to `other`, in f64 nanometres.
    pub fn distance_to(self, other: Point) -> f64 {
        let dx = (other.x - self.x).to_nm_f64();
        let dy = (other.y - self.y).to_nm_f64();
        dx.hypot(dy)
    }

    pub fn translated(self, delta: Point) -> Point {
        self + delta
    }

    /// Rotation around the origin, rounded back to nanometres.
    pub fn rotated(self, radians: f64) -> Point {
        let (sin, cos) = radians.sin_cos();
        let x = self.x.to_nm_f64();
        let y = self.y.to_nm_f64();
        Point::from_nm(
            (x * cos - y * sin).round() as i64,
            (x * sin + y * cos).round() as i64,
        )
    }

    /// Mirror about the y axis.
    pub fn mirrored(self) -> Point {
        Point::new(-self.x, self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;
    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, rhs: Point) {
        self.x -= rhs.x;
        self.y -= rhs.y;
    }
}

impl Neg for Point {
    type Output = Point;
    fn neg(self) -> Point {
        Point::new(-self.x, -self.y)
    }
}
