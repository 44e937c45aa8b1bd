//! The in-memory board model the DRC runs against.
//!
//! The board owns all placed objects and exposes the borrowed views the
//! engine consumes: layer stack, circuit, devices with pads, net segments
//! with vias and lines, planes, polygons, stroke texts, holes and air
//! wires.

pub mod airwire;
pub mod board;
pub mod circuit;
pub mod device;
pub mod hole;
pub mod layer;
pub mod netline;
pub mod pad;
pub mod plane;
pub mod polygon_item;
pub mod stroke_text;
pub mod via;

pub use airwire::AirWire;
pub use board::{Board, BoardError, DirtyFlag, PendingDevice};
pub use circuit::{Circuit, ComponentInstance, NetSignal};
pub use device::{Device, Footprint, FootprintCircle, FootprintPolygon};
pub use hole::Hole;
pub use layer::{
    inner_copper_layer, Layer, LayerStack, LAYER_BOARD_OUTLINES, LAYER_BOTTOM_COPPER,
    LAYER_BOTTOM_COURTYARD, LAYER_TOP_COPPER, LAYER_TOP_COURTYARD,
};
pub use netline::{Junction, NetLine, NetLineAnchor, NetSegment};
pub use pad::{BoardSide, Pad, PadShape};
pub use plane::Plane;
pub use polygon_item::BoardPolygon;
pub use stroke_text::StrokeText;
pub use via::Via;
