//! Affine placement transforms.
//!
//! Board items are placed by translate · rotate · mirror, applied to a
//! point as `T(p) = translate + rotate(mirror(p))`. Mirroring is about the
//! y axis and also flips layer names between the top and bottom side.

use super::{Angle, Path, Point, Vertex};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Transform {
    pub position: Point,
    pub rotation: Angle,
    pub mirrored: bool,
}

impl Transform {
    pub const fn new(position: Point, rotation: Angle, mirrored: bool) -> Self {
        Transform {
            position,
            rotation,
            mirrored,
        }
    }

    pub const fn identity() -> Self {
        Transform {
            position: Point::ORIGIN,
            rotation: Angle::ZERO,
            mirrored: false,
        }
    }

    pub fn map_point(&self, p: Point) -> Point {
        let p = if self.mirrored { p.mirrored() } else { p };
        p.rotated(self.rotation.to_radians()) + self.position
    }

    /// Maps an arc sweep; mirroring reverses the sweep direction.
    pub fn map_arc_angle(&self, angle: Angle) -> Angle {
        if self.mirrored {
            -angle
        } else {
            angle
        }
    }

    pub fn map_path(&self, path: &Path) -> Path {
        Path::from_vertices(
            path.vertices()
                .iter()
                .map(|v| {
                    Vertex::with_arc(self.map_point(v.position), self.map_arc_angle(v.arc_angle))
                })
                .collect(),
        )
    }

    /// Maps a layer name to the opposite board side when mirrored:
    /// `top_*` ↔ `bot_*`, all other layers unchanged.
    pub fn map_layer(&self, layer: &str) -> String {
        if !self.mirrored {
            return layer.to_string();
        }
        if let Some(rest) = layer.strip_prefix("top_") {
            format!("bot_{rest}")
        } else if let Some(rest) = layer.strip_prefix("bot_") {
            format!("top_{rest}")
        } else {
            layer.to_string()
        }
    }
}
