//! Design rule check thresholds and options.

use serde::{Deserialize, Serialize};

use crate::geometry::{PositiveLength, UnsignedLength};

/// Which slot geometries a manufacturer accepts, in increasing order of
/// capability. A hole violates the policy when its class exceeds the
/// allowed one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AllowedSlots {
    /// Only round holes.
    None,
    /// Straight slots drilled along a single segment.
    SingleSegmentStraight,
    /// Straight slots with multiple segments.
    MultiSegmentStraight,
    /// Anything, including curved slots.
    Any,
}

/// All thresholds consumed by a DRC run. A numeric threshold of zero
/// disables the corresponding check.
///
/// Settings are constructed by the host and passed in; the engine never
/// reads or writes files. Range validation happens in the length newtype
/// constructors ([`RangeError`](crate::geometry::RangeError)), so a
/// constructed settings object is always valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrcSettings {
    /// Minimum stroke width of copper features.
    pub min_copper_width: UnsignedLength,
    /// Minimum distance between copper of distinct nets.
    pub min_copper_copper_clearance: UnsignedLength,
    /// Minimum distance from copper to the board outline.
    pub min_copper_board_clearance: UnsignedLength,
    /// Minimum distance from copper to non-plated holes.
    pub min_copper_npth_clearance: UnsignedLength,
    /// Minimum copper ring that must remain around plated holes.
    pub min_pth_annular_ring: UnsignedLength,
    pub min_npth_drill_diameter: UnsignedLength,
    pub min_pth_drill_diameter: UnsignedLength,
    pub min_npth_slot_width: UnsignedLength,
    pub min_pth_slot_width: UnsignedLength,
    pub allowed_npth_slots: AllowedSlots,
    pub allowed_pth_slots: AllowedSlots,
    /// Chord height error bound for arc flattening; applied identically
    /// to every polygon operation of a run.
    pub max_arc_tolerance: PositiveLength,
}

impl Default for DrcSettings {
    fn default() -> Self {
        DrcSettings {
            min_copper_width: UnsignedLength::from_nm(200_000),
            min_copper_copper_clearance: UnsignedLength::from_nm(200_000),
            min_copper_board_clearance: UnsignedLength::from_nm(300_000),
            min_copper_npth_clearance: UnsignedLength::from_nm(250_000),
            min_pth_annular_ring: UnsignedLength::from_nm(150_000),
            min_npth_drill_diameter: UnsignedLength::from_nm(250_000),
            min_pth_drill_diameter: UnsignedLength::from_nm(300_000),
            min_npth_slot_width: UnsignedLength::from_nm(1_000_000),
            min_pth_slot_width: UnsignedLength::from_nm(700_000),
            allowed_npth_slots: AllowedSlots::SingleSegmentStraight,
            allowed_pth_slots: AllowedSlots::None,
            max_arc_tolerance: PositiveLength::from_nm(5_000),
        }
    }
}

impl DrcSettings {
    /// Settings with every check disabled, useful as a baseline.
    pub fn disabled() -> Self {
        DrcSettings {
            min_copper_width: UnsignedLength::ZERO,
            min_copper_copper_clearance: UnsignedLength::ZERO,
            min_copper_board_clearance: UnsignedLength::ZERO,
            min_copper_npth_clearance: UnsignedLength::ZERO,
            min_pth_annular_ring: UnsignedLength::ZERO,
            min_npth_drill_diameter: UnsignedLength::ZERO,
            min_pth_drill_diameter: UnsignedLength::ZERO,
            min_npth_slot_width: UnsignedLength::ZERO,
            min_pth_slot_width: UnsignedLength::ZERO,
            allowed_npth_slots: AllowedSlots::Any,
            allowed_pth_slots: AllowedSlots::Any,
            max_arc_tolerance: PositiveLength::from_nm(5_000),
        }
    }
}
