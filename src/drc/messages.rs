//! Typed violation messages.
//!
//! Every finding of a run is a [`DrcMessage`]: a tagged kind carrying the
//! involved object identities, a human readable text and a set of closed
//! highlight paths. Message identity (kind, involved objects, layer) is
//! unique within a run; the engine suppresses duplicates.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::geometry::{Length, Path, Point};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Hint,
    Warning,
    Error,
}

/// The violation kinds a run can produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrcMessageKind {
    MinimumWidth {
        object: Uuid,
        limit: Length,
    },
    CopperCopperClearance {
        object1: Uuid,
        net1: Option<Uuid>,
        object2: Uuid,
        net2: Option<Uuid>,
        /// `None` when both items span all layers (e.g. two vias).
        layer: Option<String>,
        limit: Length,
    },
    CopperBoardClearance {
        object: Uuid,
        limit: Length,
    },
    CopperHoleClearance {
        hole: Uuid,
        limit: Length,
    },
    MinimumAnnularRing {
        object: Uuid,
        limit: Length,
    },
    MinimumDrillDiameter {
        hole: Uuid,
        actual: Length,
        limit: Length,
    },
    MinimumSlotWidth {
        hole: Uuid,
        actual: Length,
        limit: Length,
    },
    ForbiddenSlot {
        hole: Uuid,
    },
    InvalidPadConnection {
        device: Uuid,
        pad: Uuid,
        layer: String,
    },
    CourtyardOverlap {
        device1: Uuid,
        device2: Uuid,
        layer: String,
    },
    MissingDevice {
        component: Uuid,
    },
    MissingConnection {
        net: Option<Uuid>,
        p1: Point,
        p2: Point,
    },
    EmptyNetSegment {
        segment: Uuid,
    },
    UnconnectedJunction {
        segment: Uuid,
        junction: Uuid,
    },
    /// A check failed internally (geometry kernel or polygon algebra);
    /// the run continued with the next check.
    InternalError {
        check: String,
    },
}

impl DrcMessageKind {
    pub fn severity(&self) -> Severity {
        match self {
            DrcMessageKind::MinimumWidth { .. }
            | DrcMessageKind::CopperCopperClearance { .. }
            | DrcMessageKind::CopperBoardClearance { .. }
            | DrcMessageKind::CopperHoleClearance { .. }
            | DrcMessageKind::MinimumAnnularRing { .. }
            | DrcMessageKind::MinimumDrillDiameter { .. }
            | DrcMessageKind::MinimumSlotWidth { .. }
            | DrcMessageKind::CourtyardOverlap { .. } => Severity::Warning,
            DrcMessageKind::ForbiddenSlot { .. }
            | DrcMessageKind::InvalidPadConnection { .. }
            | DrcMessageKind::MissingDevice { .. }
            | DrcMessageKind::MissingConnection { .. }
            | DrcMessageKind::InternalError { .. } => Severity::Error,
            DrcMessageKind::EmptyNetSegment { .. }
            | DrcMessageKind::UnconnectedJunction { .. } => Severity::Hint,
        }
    }

    fn tag(&self) -> &'static str {
        match self {
            DrcMessageKind::MinimumWidth { .. } => "minimum_width",
            DrcMessageKind::CopperCopperClearance { .. } => "copper_copper_clearance",
            DrcMessageKind::CopperBoardClearance { .. } => "copper_board_clearance",
            DrcMessageKind::CopperHoleClearance { .. } => "copper_hole_clearance",
            DrcMessageKind::MinimumAnnularRing { .. } => "minimum_annular_ring",
            DrcMessageKind::MinimumDrillDiameter { .. } => "minimum_drill_diameter",
            DrcMessageKind::MinimumSlotWidth { .. } => "minimum_slot_width",
            DrcMessageKind::ForbiddenSlot { .. } => "forbidden_slot",
            DrcMessageKind::InvalidPadConnection { .. } => "invalid_pad_connection",
            DrcMessageKind::CourtyardOverlap { .. } => "courtyard_overlap",
            DrcMessageKind::MissingDevice { .. } => "missing_device",
            DrcMessageKind::MissingConnection { .. } => "missing_connection",
            DrcMessageKind::EmptyNetSegment { .. } => "empty_net_segment",
            DrcMessageKind::UnconnectedJunction { .. } => "unconnected_junction",
            DrcMessageKind::InternalError { .. } => "internal_error",
        }
    }

    /// Object identities, sorted so that pairwise kinds are independent
    /// of the order the pair was visited in.
    fn involved(&self) -> Vec<Uuid> {
        let mut objects = match self {
            DrcMessageKind::MinimumWidth { object, .. }
            | DrcMessageKind::CopperBoardClearance { object, .. }
            | DrcMessageKind::MinimumAnnularRing { object, .. } => vec![*object],
            DrcMessageKind::CopperCopperClearance {
                object1, object2, ..
            } => vec![*object1, *object2],
            DrcMessageKind::CopperHoleClearance { hole, .. }
            | DrcMessageKind::MinimumDrillDiameter { hole, .. }
            | DrcMessageKind::MinimumSlotWidth { hole, .. }
            | DrcMessageKind::ForbiddenSlot { hole } => vec![*hole],
            DrcMessageKind::InvalidPadConnection { device, pad, .. } => vec![*device, *pad],
            DrcMessageKind::CourtyardOverlap {
                device1, device2, ..
            } => vec![*device1, *device2],
            DrcMessageKind::MissingDevice { component } => vec![*component],
            DrcMessageKind::MissingConnection { net, .. } => net.iter().copied().collect(),
            DrcMessageKind::EmptyNetSegment { segment } => vec![*segment],
            DrcMessageKind::UnconnectedJunction { segment, junction } => {
                vec![*segment, *junction]
            }
            DrcMessageKind::InternalError { .. } => Vec::new(),
        };
        objects.sort();
        objects
    }

    fn layer_key(&self) -> Option<String> {
        match self {
            DrcMessageKind::CopperCopperClearance { layer, .. } => layer.clone(),
            DrcMessageKind::InvalidPadConnection { layer, .. }
            | DrcMessageKind::CourtyardOverlap { layer, .. } => Some(layer.clone()),
            _ => None,
        }
    }

    /// Kind-specific disambiguation beyond object identities; air wires
    /// have no identity of their own, so their endpoints take that role.
    fn extra_key(&self) -> Vec<i64> {
        match self {
            DrcMessageKind::MissingConnection { p1, p2, .. } => {
                let mut ends = [
                    (p1.x.to_nm(), p1.y.to_nm()),
                    (p2.x.to_nm(), p2.y.to_nm()),
                ];
                ends.sort();
                ends.iter().flat_map(|(x, y)| [*x, *y]).collect()
            }
            DrcMessageKind::InternalError { check } => {
                check.bytes().map(|b| b as i64).collect()
            }
            _ => Vec::new(),
        }
    }
}

/// Dedup identity of a message within one run.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct MessageIdentity {
    tag: &'static str,
    objects: Vec<Uuid>,
    layer: Option<String>,
    extra: Vec<i64>,
}

/// One emitted violation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrcMessage {
    pub kind: DrcMessageKind,
    pub severity: Severity,
    pub message: String,
    /// Closed paths to highlight in the editor.
    pub locations: Vec<Path>,
}

impl DrcMessage {
    pub fn new(kind: DrcMessageKind, message: impl Into<String>, locations: Vec<Path>) -> Self {
        let severity = kind.severity();
        DrcMessage {
            kind,
            severity,
            message: message.into(),
            locations,
        }
    }

    pub(crate) fn identity(&self) -> MessageIdentity {
        MessageIdentity {
            tag: self.kind.tag(),
            objects: self.kind.involved(),
            layer: self.kind.layer_key(),
            extra: self.kind.extra_key(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severities() {
        let clearance = DrcMessageKind::CopperCopperClearance {
            object1: Uuid::new_v4(),
            net1: None,
            object2: Uuid::new_v4(),
            net2: None,
            layer: None,
            limit: Length::from_nm(200_000),
        };
        assert_eq!(clearance.severity(), Severity::Warning);
        assert_eq!(
            DrcMessageKind::MissingDevice {
                component: Uuid::new_v4()
            }
            .severity(),
            Severity::Error
        );
        assert_eq!(
            DrcMessageKind::EmptyNetSegment {
                segment: Uuid::new_v4()
            }
            .severity(),
            Severity::Hint
        );
    }

    #[test]
    fn test_pair_identity_is_order_independent() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let make = |o1, o2| {
            DrcMessage::new(
                DrcMessageKind::CopperCopperClearance {
                    object1: o1,
                    net1: None,
                    object2: o2,
                    net2: None,
                    layer: Some("top_cu".into()),
                    limit: Length::from_nm(200_000),
                },
                "clearance",
                vec![],
            )
        };
        assert_eq!(make(a, b).identity(), make(b, a).identity());
    }

    #[test]
    fn test_distinct_air_wires_have_distinct_identity() {
        let net = Some(Uuid::new_v4());
        let make = |x: i64| {
            DrcMessage::new(
                DrcMessageKind::MissingConnection {
                    net,
                    p1: Point::from_nm(x, 0),
                    p2: Point::from_nm(x + 1_000, 0),
                },
                "missing connection",
                vec![],
            )
        };
        assert_ne!(make(0).identity(), make(5_000).identity());
        assert_eq!(make(0).identity(), make(0).identity());
    }
}
