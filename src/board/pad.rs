//! Footprint pads.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{Angle, Length, Path, Point, PositiveLength, Transform, UnsignedLength};

use super::hole::Hole;
use super::layer::{LAYER_BOTTOM_COPPER, LAYER_TOP_COPPER};

/// Which copper a pad exists on. SMT pads live on one outer layer,
/// through-hole pads on every copper layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardSide {
    Top,
    Bottom,
    Through,
}

/// Pad copper shape, centred on the pad origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PadShape {
    Round {
        diameter: PositiveLength,
    },
    Rect {
        width: PositiveLength,
        height: PositiveLength,
    },
    Obround {
        width: PositiveLength,
        height: PositiveLength,
    },
    RoundRect {
        width: PositiveLength,
        height: PositiveLength,
        corner_radius: UnsignedLength,
    },
    /// Arbitrary closed outline in pad coordinates.
    Custom {
        outline: Path,
    },
}

impl PadShape {
    /// Analytic outline of the shape inflated by `offset` on every normal,
    /// in pad-local coordinates. `None` when the inflation consumes the
    /// shape, or for custom outlines with a non-zero offset (those need
    /// the polygon algebra).
    pub fn outline(&self, offset: Length) -> Option<Path> {
        match self {
            PadShape::Round { diameter } => {
                PositiveLength::new(diameter.get() + offset * 2)
                    .ok()
                    .map(Path::circle)
            }
            PadShape::Rect { width, height } => {
                let w = PositiveLength::new(width.get() + offset * 2).ok()?;
                let h = PositiveLength::new(height.get() + offset * 2).ok()?;
                if offset.to_nm() > 0 {
                    let radius = UnsignedLength::new(offset).ok()?;
                    Some(Path::rounded_rect(w, h, radius))
                } else {
                    Some(Path::centered_rect(w, h))
                }
            }
            PadShape::Obround { width, height } => {
                let w = width.get();
                let h = height.get();
                let stroke = PositiveLength::new(w.min(h) + offset * 2).ok()?;
                let span = (w.max(h) - w.min(h)) / 2;
                let (p1, p2) = if w >= h {
                    (
                        Point::new(-span, Length::ZERO),
                        Point::new(span, Length::ZERO),
                    )
                } else {
                    (
                        Point::new(Length::ZERO, -span),
                        Point::new(Length::ZERO, span),
                    )
                };
                Some(Path::obround(p1, p2, stroke))
            }
            PadShape::RoundRect {
                width,
                height,
                corner_radius,
            } => {
                let w = PositiveLength::new(width.get() + offset * 2).ok()?;
                let h = PositiveLength::new(height.get() + offset * 2).ok()?;
                let radius =
                    UnsignedLength::new((corner_radius.get() + offset).max(Length::ZERO)).ok()?;
                Some(Path::rounded_rect(w, h, radius))
            }
            PadShape::Custom { outline } => {
                if offset.is_zero() {
                    Some(outline.to_closed())
                } else {
                    None
                }
            }
        }
    }
}

/// A pad of a device footprint. Position and rotation are relative to the
/// device; the owning device is referenced by a stable index into the
/// board's device table, assigned when the device is committed to a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pad {
    pub uuid: Uuid,
    pub position: Point,
    pub rotation: Angle,
    pub side: BoardSide,
    pub shape: PadShape,
    pub holes: Vec<Hole>,
    pub net: Option<Uuid>,
    pub(crate) device_index: Option<usize>,
}

impl Pad {
    pub fn new(
        position: Point,
        rotation: Angle,
        side: BoardSide,
        shape: PadShape,
        net: Option<Uuid>,
    ) -> Self {
        Pad {
            uuid: Uuid::new_v4(),
            position,
            rotation,
            side,
            shape,
            holes: Vec::new(),
            net,
            device_index: None,
        }
    }

    pub fn with_hole(mut self, hole: Hole) -> Self {
        self.holes.push(hole);
        self
    }

    /// Plated pads are the ones with at least one drill.
    pub fn is_plated(&self) -> bool {
        !self.holes.is_empty()
    }

    /// Index of the owning device in the board's device table, once the
    /// device has been committed.
    pub fn device_index(&self) -> Option<usize> {
        self.device_index
    }

    /// Pad placement relative to the device.
    pub fn local_transform(&self) -> Transform {
        Transform::new(self.position, self.rotation, false)
    }

    /// Whether the pad carries copper on the given copper layer, taking
    /// the device placement (mirroring) into account.
    pub fn is_on_copper_layer(&self, layer_name: &str, device_transform: &Transform) -> bool {
        match self.side {
            BoardSide::Through => true,
            BoardSide::Top => device_transform.map_layer(LAYER_TOP_COPPER) == layer_name,
            BoardSide::Bottom => device_transform.map_layer(LAYER_BOTTOM_COPPER) == layer_name,
        }
    }

    /// The pad's copper area in board coordinates, inflated by `offset`.
    /// Shapes with analytic outlines inflate exactly; custom outlines go
    /// through the polygon offset. An inflation that consumes the shape
    /// yields an empty set.
    pub fn copper_area(
        &self,
        device_transform: &Transform,
        offset: Length,
        arc_tolerance: PositiveLength,
    ) -> Result<crate::geometry::PolygonSet, crate::geometry::GeometryError> {
        use crate::geometry::PolygonSet;
        if let Some(local) = self.shape.outline(offset) {
            let absolute = device_transform.map_path(&self.local_transform().map_path(&local));
            return PolygonSet::from_path(&absolute, arc_tolerance);
        }
        match &self.shape {
            PadShape::Custom { outline } => {
                let absolute = device_transform.map_path(&self.local_transform().map_path(outline));
                PolygonSet::from_path(&absolute.to_closed(), arc_tolerance)?.offset(offset)
            }
            _ => Ok(PolygonSet::empty(arc_tolerance)),
        }
    }
}
