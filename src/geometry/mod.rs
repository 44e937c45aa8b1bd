//! Geometry kernel and polygon algebra.
//!
//! Fixed-point lengths, arc-aware paths, affine transforms and boolean
//! operations over polygon sets. Everything downstream of the board model
//! (path generation, clearance checks) is built on these primitives.

pub mod angle;
pub mod length;
pub mod path;
pub mod point;
pub mod polygon;
pub mod transform;

pub use angle::Angle;
pub use length::{Length, PositiveLength, RangeError, UnsignedLength};
pub use path::{Path, Vertex};
pub use point::Point;
pub use polygon::PolygonSet;
pub use transform::Transform;

use thiserror::Error;

/// Failures inside the geometry kernel or the polygon algebra.
///
/// Checks treat both variants the same way: the current check is aborted,
/// an internal diagnostic message is recorded and the run continues.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GeometryError {
    /// Degenerate input, e.g. a zero-length stroke or an arc whose
    /// endpoints coincide.
    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    /// Failure inside boolean operations, e.g. coordinates outside the
    /// supported ±2^52 nm range.
    #[error("polygon algebra: {0}")]
    PolygonAlgebra(String),
}
