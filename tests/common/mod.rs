//! Shared helpers for building in-memory test boards.
#![allow(dead_code)]

use uuid::Uuid;

use boardguard::prelude::*;
use boardguard::{
    BoardSide, Device, NetLineAnchor, NetSegment, Pad, PadShape, Path, UnsignedLength as Unsigned,
    Via,
};

/// Observer that records everything it sees.
#[derive(Debug, Default)]
pub struct Recorder {
    pub started: bool,
    pub finished: Option<usize>,
    pub progress: Vec<u8>,
    pub statuses: Vec<String>,
    pub messages: Vec<DrcMessage>,
}

impl DrcObserver for Recorder {
    fn on_started(&mut self) {
        self.started = true;
    }
    fn on_progress(&mut self, percent: u8) {
        self.progress.push(percent);
    }
    fn on_status(&mut self, status: &str) {
        self.statuses.push(status.to_string());
    }
    fn on_message(&mut self, message: &DrcMessage) {
        self.messages.push(message.clone());
    }
    fn on_finished(&mut self, message_count: usize) {
        self.finished = Some(message_count);
    }
}

/// Runs a full (non-quick) DRC and returns outcome plus messages.
pub fn run_drc(board: &mut Board, settings: &DrcSettings, quick: bool) -> (DrcOutcome, Vec<DrcMessage>) {
    let mut drc = BoardDesignRuleCheck::new(board, settings);
    let outcome = drc.execute(quick, &mut NullObserver, &CancelToken::new());
    (outcome, drc.messages().to_vec())
}

pub fn messages_of_kind<'a>(
    messages: &'a [DrcMessage],
    predicate: impl Fn(&DrcMessageKind) -> bool + 'a,
) -> Vec<&'a DrcMessage> {
    messages.iter().filter(|m| predicate(&m.kind)).collect()
}

/// Settings with everything disabled except what the test enables.
pub fn base_settings() -> DrcSettings {
    DrcSettings::disabled()
}

pub fn nm(value: i64) -> Length {
    Length::from_nm(value)
}

pub fn unsigned(value: i64) -> Unsigned {
    Unsigned::from_nm(value)
}

/// A straight trace between two junctions on the given layer; returns the
/// segment uuid.
pub fn add_trace(
    board: &mut Board,
    net: Option<Uuid>,
    layer: &str,
    width_nm: i64,
    from: (i64, i64),
    to: (i64, i64),
) -> Uuid {
    let mut segment = NetSegment::new(net);
    let a = segment.add_junction(Point::from_nm(from.0, from.1));
    let b = segment.add_junction(Point::from_nm(to.0, to.1));
    segment.add_line(
        layer,
        PositiveLength::from_nm(width_nm),
        NetLineAnchor::Junction(a),
        NetLineAnchor::Junction(b),
    );
    board.add_net_segment(segment).expect("segment must attach")
}

/// A net segment holding a single via.
pub fn add_via_segment(
    board: &mut Board,
    net: Option<Uuid>,
    position: (i64, i64),
    size_nm: i64,
    drill_nm: i64,
) -> Uuid {
    let mut segment = NetSegment::new(net);
    segment.add_via(Via::new(
        Point::from_nm(position.0, position.1),
        PositiveLength::from_nm(size_nm),
        PositiveLength::from_nm(drill_nm),
    ));
    board.add_net_segment(segment).expect("segment must attach")
}

/// A rectangular board outline polygon on the outlines layer.
pub fn add_board_outline(board: &mut Board, x1: i64, y1: i64, x2: i64, y2: i64) {
    let path = Path::from_points([
        Point::from_nm(x1, y1),
        Point::from_nm(x2, y1),
        Point::from_nm(x2, y2),
        Point::from_nm(x1, y2),
        Point::from_nm(x1, y1),
    ]);
    board.add_polygon(boardguard::BoardPolygon::new(
        "board_outlines",
        path,
        unsigned(0),
        false,
    ));
}

/// Places a one-pad device and returns (device uuid, pad uuid).
pub fn place_device_with_pad(
    board: &mut Board,
    component: Uuid,
    position: (i64, i64),
    pad: Pad,
) -> (Uuid, Uuid) {
    let device = Device::new(
        component,
        Point::from_nm(position.0, position.1),
        Angle::ZERO,
        false,
    )
    .with_pad(pad);
    let device_uuid = device.uuid;
    let pad_uuid = device.pads()[0].uuid;
    let pending = board.prepare_add_device(device).expect("device must attach");
    board.commit_add_device(pending);
    (device_uuid, pad_uuid)
}

pub fn smt_pad(side: BoardSide, diameter_nm: i64, net: Option<Uuid>) -> Pad {
    Pad::new(
        Point::ORIGIN,
        Angle::ZERO,
        side,
        PadShape::Round {
            diameter: PositiveLength::from_nm(diameter_nm),
        },
        net,
    )
}

pub use boardguard::Angle;
