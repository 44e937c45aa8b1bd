//! Polygons drawn directly on the board, e.g. outlines or copper areas.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{Path, UnsignedLength};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardPolygon {
    pub uuid: Uuid,
    pub layer: String,
    pub path: Path,
    pub line_width: UnsignedLength,
    pub filled: bool,
}

impl BoardPolygon {
    pub fn new(
        layer: impl Into<String>,
        path: Path,
        line_width: UnsignedLength,
        filled: bool,
    ) -> Self {
        BoardPolygon {
            uuid: Uuid::new_v4(),
            layer: layer.into(),
            path,
            line_width,
            filled,
        }
    }
}
