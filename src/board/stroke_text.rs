//! Stroke texts placed on the board or on a device.
//!
//! Font rendering is an external concern: a stroke text carries the glyph
//! centre-line paths produced by the host's stroke font, untransformed.
//! The DRC only needs the stroked footprint on copper layers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{Angle, Path, Point, Transform, UnsignedLength};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrokeText {
    pub uuid: Uuid,
    pub layer: String,
    pub position: Point,
    pub rotation: Angle,
    pub mirrored: bool,
    pub stroke_width: UnsignedLength,
    paths: Vec<Path>,
}

impl StrokeText {
    pub fn new(
        layer: impl Into<String>,
        position: Point,
        rotation: Angle,
        mirrored: bool,
        stroke_width: UnsignedLength,
        paths: Vec<Path>,
    ) -> Self {
        StrokeText {
            uuid: Uuid::new_v4(),
            layer: layer.into(),
            position,
            rotation,
            mirrored,
            stroke_width,
            paths,
        }
    }

    /// Glyph centre-line paths in text-local coordinates.
    pub fn generate_paths(&self) -> &[Path] {
        &self.paths
    }

    pub fn transform(&self) -> Transform {
        Transform::new(self.position, self.rotation, self.mirrored)
    }
}
