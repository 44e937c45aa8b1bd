//! Air wires: unrouted connections shown as straight lines.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirWire {
    pub net: Uuid,
    pub p1: Point,
    pub p2: Point,
}
