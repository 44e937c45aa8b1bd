//! BoardGuard - board design rule check (DRC) engine for PCB layouts
//!
//! This library validates a fully populated in-memory board (traces,
//! vias, pads, planes, holes, polygons, stroke texts, device placements)
//! against a parameterised set of geometric, electrical and manufacturing
//! constraints, producing a stream of typed violation messages together
//! with progress telemetry.
//!
//! # Quick Start
//!
//! ```no_run
//! use boardguard::{Board, BoardDesignRuleCheck, CancelToken, DrcSettings, NullObserver};
//!
//! let mut board = Board::new(0);
//! // ... populate circuit, devices, net segments ...
//!
//! let settings = DrcSettings::default();
//! let mut drc = BoardDesignRuleCheck::new(&mut board, &settings);
//! let outcome = drc.execute(false, &mut NullObserver, &CancelToken::new());
//! for message in drc.messages() {
//!     println!("{:?}: {}", message.severity, message.message);
//! }
//! println!("{outcome:?}");
//! ```
//!
//! # Features
//!
//! - **Geometry kernel**: fixed-point lengths, arc-aware paths, outline
//!   stroking, affine transforms
//! - **Polygon algebra**: boolean operations and signed offsetting at a
//!   single per-run arc tolerance
//! - **Checks**: copper width, copper/copper, copper/board and
//!   copper/hole clearances, annular rings, drills and slots, pad
//!   connections, courtyards, placement and connectivity
//! - **Telemetry**: observer callbacks, monotone progress, cooperative
//!   cancellation

pub mod board;
pub mod drc;
pub mod geometry;

// Re-export main types
pub use board::{
    AirWire, Board, BoardError, BoardPolygon, BoardSide, Circuit, ComponentInstance, Device,
    DirtyFlag, Footprint, FootprintCircle, FootprintPolygon, Hole, Junction, Layer, LayerStack,
    NetLine, NetLineAnchor, NetSegment, NetSignal, Pad, PadShape, PendingDevice, Plane,
    StrokeText, Via,
};
pub use drc::{
    AllowedSlots, BoardDesignRuleCheck, CancelToken, DrcMessage, DrcMessageKind, DrcObserver,
    DrcOutcome, DrcSettings, NullObserver, Severity,
};
pub use geometry::{
    Angle, GeometryError, Length, Path, Point, PolygonSet, PositiveLength, RangeError, Transform,
    UnsignedLength, Vertex,
};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        Board, BoardDesignRuleCheck, CancelToken, DrcMessage, DrcMessageKind, DrcObserver,
        DrcOutcome, DrcSettings, Length, NullObserver, Point, PositiveLength, Severity,
        UnsignedLength,
    };
}
