//! Through-hole vias.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{Length, Path, Point, PositiveLength};

/// A plated via connecting all copper layers. The net signal comes from
/// the owning net segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Via {
    pub uuid: Uuid,
    pub position: Point,
    /// Outer copper diameter.
    pub size: PositiveLength,
    pub drill_diameter: PositiveLength,
}

impl Via {
    pub fn new(position: Point, size: PositiveLength, drill_diameter: PositiveLength) -> Self {
        Via {
            uuid: Uuid::new_v4(),
            position,
            size,
            drill_diameter,
        }
    }

    /// Copper outline, optionally expanded on the radius.
    pub fn outline(&self, expansion: Length) -> Option<Path> {
        let diameter = self.size.get() + expansion * 2;
        PositiveLength::new(diameter)
            .ok()
            .map(|d| Path::circle(d).translated(self.position))
    }

    /// Drill hole outline, optionally expanded on the radius.
    pub fn hole_outline(&self, expansion: Length) -> Option<Path> {
        let diameter = self.drill_diameter.get() + expansion * 2;
        PositiveLength::new(diameter)
            .ok()
            .map(|d| Path::circle(d).translated(self.position))
    }
}
