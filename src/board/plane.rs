//! Copper planes (flood fills).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{Path, PolygonSet, UnsignedLength};

/// A flood-filled copper region on one layer. The filled area is computed
/// by [`Board::rebuild_all_planes`](super::Board::rebuild_all_planes) and
/// read back by the DRC; a plane that has never been rebuilt has no fill.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plane {
    pub uuid: Uuid,
    pub layer: String,
    pub net: Uuid,
    pub outline: Path,
    /// Minimum width of filled features; narrower slivers are dropped.
    pub min_width: UnsignedLength,
    /// Clearance kept to copper of other nets.
    pub min_clearance: UnsignedLength,
    #[serde(skip)]
    fill: Option<PolygonSet>,
}

impl Plane {
    pub fn new(
        layer: impl Into<String>,
        net: Uuid,
        outline: Path,
        min_width: UnsignedLength,
        min_clearance: UnsignedLength,
    ) -> Self {
        Plane {
            uuid: Uuid::new_v4(),
            layer: layer.into(),
            net,
            outline,
            min_width,
            min_clearance,
            fill: None,
        }
    }

    /// The computed filled area, if the plane has been rebuilt.
    pub fn fill(&self) -> Option<&PolygonSet> {
        self.fill.as_ref()
    }

    pub(crate) fn set_fill(&mut self, fill: PolygonSet) {
        self.fill = Some(fill);
    }
}
