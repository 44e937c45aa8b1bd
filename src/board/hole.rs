//! Drilled holes, round or slotted.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{Path, Point, PositiveLength};

/// A drilled hole described by a drill diameter and a drill path: a single
/// vertex is a round hole, more vertices make a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hole {
    pub uuid: Uuid,
    pub diameter: PositiveLength,
    pub path: Path,
}

impl Hole {
    pub fn round(position: Point, diameter: PositiveLength) -> Self {
        Hole {
            uuid: Uuid::new_v4(),
            diameter,
            path: Path::from_points([position]),
        }
    }

    pub fn slot(path: Path, diameter: PositiveLength) -> Self {
        Hole {
            uuid: Uuid::new_v4(),
            diameter,
            path,
        }
    }

    pub fn is_slot(&self) -> bool {
        self.path.len() > 1
    }

    pub fn is_multi_segment_slot(&self) -> bool {
        self.path.len() > 2
    }

    pub fn is_curved_slot(&self) -> bool {
        self.path.is_curved()
    }
}
