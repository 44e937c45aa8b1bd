//! Devices: placed footprints of circuit components.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{Angle, Path, Point, PositiveLength, Transform, UnsignedLength};

use super::hole::Hole;
use super::pad::Pad;
use super::stroke_text::StrokeText;

/// A polygon of the footprint drawing, in footprint coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FootprintPolygon {
    pub uuid: Uuid,
    pub layer: String,
    pub path: Path,
    pub line_width: UnsignedLength,
    pub filled: bool,
}

impl FootprintPolygon {
    pub fn new(
        layer: impl Into<String>,
        path: Path,
        line_width: UnsignedLength,
        filled: bool,
    ) -> Self {
        FootprintPolygon {
            uuid: Uuid::new_v4(),
            layer: layer.into(),
            path,
            line_width,
            filled,
        }
    }
}

/// A circle of the footprint drawing, in footprint coordinates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FootprintCircle {
    pub uuid: Uuid,
    pub layer: String,
    pub center: Point,
    pub diameter: PositiveLength,
    pub line_width: UnsignedLength,
    pub filled: bool,
}

impl FootprintCircle {
    pub fn new(
        layer: impl Into<String>,
        center: Point,
        diameter: PositiveLength,
        line_width: UnsignedLength,
        filled: bool,
    ) -> Self {
        FootprintCircle {
            uuid: Uuid::new_v4(),
            layer: layer.into(),
            center,
            diameter,
            line_width,
            filled,
        }
    }
}

/// Footprint drawing data: polygons, circles and non-plated holes.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Footprint {
    pub polygons: Vec<FootprintPolygon>,
    pub circles: Vec<FootprintCircle>,
    pub holes: Vec<Hole>,
}

/// A circuit component placed on the board.
///
/// The board exclusively owns its devices and a device exclusively owns
/// its pads; pads point back via a stable device-table index, assigned
/// when the device is committed to a board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub uuid: Uuid,
    /// The circuit component this device realizes.
    pub component: Uuid,
    pub position: Point,
    pub rotation: Angle,
    pub mirrored: bool,
    pub footprint: Footprint,
    pub(crate) pads: Vec<Pad>,
    pub stroke_texts: Vec<StrokeText>,
}

impl Device {
    pub fn new(component: Uuid, position: Point, rotation: Angle, mirrored: bool) -> Self {
        Device {
            uuid: Uuid::new_v4(),
            component,
            position,
            rotation,
            mirrored,
            footprint: Footprint::default(),
            pads: Vec::new(),
            stroke_texts: Vec::new(),
        }
    }

    pub fn with_pad(mut self, pad: Pad) -> Self {
        self.pads.push(pad);
        self
    }

    pub fn with_footprint(mut self, footprint: Footprint) -> Self {
        self.footprint = footprint;
        self
    }

    pub fn with_stroke_text(mut self, text: StrokeText) -> Self {
        self.stroke_texts.push(text);
        self
    }

    pub fn pads(&self) -> &[Pad] {
        &self.pads
    }

    pub fn pad(&self, uuid: Uuid) -> Option<&Pad> {
        self.pads.iter().find(|p| p.uuid == uuid)
    }

    /// Placement transform of the device.
    pub fn transform(&self) -> Transform {
        Transform::new(self.position, self.rotation, self.mirrored)
    }

    /// Absolute board position of one of the device's pads.
    pub fn pad_position(&self, pad: &Pad) -> Point {
        self.transform().map_point(pad.position)
    }
}
