//! End-to-end DRC scenarios on in-memory boards.

mod common;

use common::*;

use boardguard::prelude::*;
use boardguard::{
    AllowedSlots, BoardSide, Device, Hole, NetLineAnchor, NetSegment, Pad, PadShape, Path, Plane,
    StrokeText,
};

fn two_net_board() -> (Board, uuid::Uuid, uuid::Uuid) {
    let mut board = Board::new(0);
    let net_a = board.circuit_mut().add_net_signal("NET_A");
    let net_b = board.circuit_mut().add_net_signal("NET_B");
    (board, net_a, net_b)
}

#[test]
fn test_s1_parallel_traces_different_nets_violate_clearance() {
    let (mut board, net_a, net_b) = two_net_board();
    // 200um wide traces, edge-to-edge gap of 150um (centres 350um apart).
    add_trace(&mut board, Some(net_a), "top_cu", 200_000, (0, 0), (5_000_000, 0));
    add_trace(
        &mut board,
        Some(net_b),
        "top_cu",
        200_000,
        (0, 350_000),
        (5_000_000, 350_000),
    );

    let mut settings = base_settings();
    settings.min_copper_copper_clearance = unsigned(200_000);
    let (outcome, messages) = run_drc(&mut board, &settings, false);

    let clearance: Vec<_> = messages_of_kind(&messages, |k| {
        matches!(k, DrcMessageKind::CopperCopperClearance { .. })
    });
    assert_eq!(clearance.len(), 1, "messages: {messages:?}");
    let message = clearance[0];
    assert_eq!(message.severity, Severity::Warning);
    assert!(!message.locations.is_empty());
    assert_eq!(outcome, DrcOutcome::Finished(messages.len()));
}

#[test]
fn test_s2_parallel_traces_same_net_are_silent() {
    let (mut board, net_a, _net_b) = two_net_board();
    add_trace(&mut board, Some(net_a), "top_cu", 200_000, (0, 0), (5_000_000, 0));
    add_trace(
        &mut board,
        Some(net_a),
        "top_cu",
        200_000,
        (0, 350_000),
        (5_000_000, 350_000),
    );

    let mut settings = base_settings();
    settings.min_copper_copper_clearance = unsigned(200_000);
    let (_, messages) = run_drc(&mut board, &settings, false);
    assert!(
        messages.is_empty(),
        "same-net copper must not violate: {messages:?}"
    );
}

#[test]
fn test_clearance_on_different_layers_is_silent() {
    let (mut board, net_a, net_b) = two_net_board();
    add_trace(&mut board, Some(net_a), "top_cu", 200_000, (0, 0), (5_000_000, 0));
    add_trace(&mut board, Some(net_b), "bot_cu", 200_000, (0, 0), (5_000_000, 0));

    let mut settings = base_settings();
    settings.min_copper_copper_clearance = unsigned(200_000);
    let (_, messages) = run_drc(&mut board, &settings, false);
    assert!(messages.is_empty(), "{messages:?}");
}

#[test]
fn test_via_collides_with_foreign_trace_on_any_layer() {
    let (mut board, net_a, net_b) = two_net_board();
    add_trace(&mut board, Some(net_a), "bot_cu", 200_000, (0, 0), (5_000_000, 0));
    // Via sits 250um above the trace edge; clearance demands 300um.
    add_via_segment(&mut board, Some(net_b), (2_500_000, 450_000), 400_000, 300_000);

    let mut settings = base_settings();
    settings.min_copper_copper_clearance = unsigned(300_000);
    let (_, messages) = run_drc(&mut board, &settings, false);
    let clearance: Vec<_> = messages_of_kind(&messages, |k| {
        matches!(k, DrcMessageKind::CopperCopperClearance { .. })
    });
    assert_eq!(clearance.len(), 1, "{messages:?}");
}

#[test]
fn test_s3_trace_touching_board_outline() {
    let (mut board, net_a, _net_b) = two_net_board();
    add_board_outline(&mut board, 0, -5_000_000, 10_000_000, 5_000_000);
    // Trace centred on x=100um, width 200um: left edge exactly at x=0.
    add_trace(
        &mut board,
        Some(net_a),
        "top_cu",
        200_000,
        (100_000, -2_000_000),
        (100_000, 2_000_000),
    );

    let mut settings = base_settings();
    settings.min_copper_board_clearance = unsigned(50_000);
    let (_, messages) = run_drc(&mut board, &settings, false);
    let board_clearance: Vec<_> = messages_of_kind(&messages, |k| {
        matches!(k, DrcMessageKind::CopperBoardClearance { .. })
    });
    assert_eq!(board_clearance.len(), 1, "{messages:?}");
}

#[test]
fn test_board_clearance_far_trace_is_silent() {
    let (mut board, net_a, _net_b) = two_net_board();
    add_board_outline(&mut board, 0, -5_000_000, 10_000_000, 5_000_000);
    add_trace(
        &mut board,
        Some(net_a),
        "top_cu",
        200_000,
        (2_000_000, -2_000_000),
        (2_000_000, 2_000_000),
    );

    let mut settings = base_settings();
    settings.min_copper_board_clearance = unsigned(50_000);
    let (_, messages) = run_drc(&mut board, &settings, false);
    assert!(messages.is_empty(), "{messages:?}");
}

#[test]
fn test_s4_annular_ring_too_thin() {
    let (mut board, net_a, _net_b) = two_net_board();
    // Drill 300um, copper 400um: actual ring 50um < required 100um.
    add_via_segment(&mut board, Some(net_a), (0, 0), 400_000, 300_000);

    let mut settings = base_settings();
    settings.min_pth_annular_ring = unsigned(100_000);
    let (_, messages) = run_drc(&mut board, &settings, false);
    let annular: Vec<_> = messages_of_kind(&messages, |k| {
        matches!(k, DrcMessageKind::MinimumAnnularRing { .. })
    });
    assert_eq!(annular.len(), 1, "{messages:?}");
    assert_eq!(annular[0].severity, Severity::Warning);
}

#[test]
fn test_annular_ring_sufficient_is_silent() {
    let (mut board, net_a, _net_b) = two_net_board();
    // Ring of (650 - 300) / 2 = 175um >= 100um.
    add_via_segment(&mut board, Some(net_a), (0, 0), 650_000, 300_000);

    let mut settings = base_settings();
    settings.min_pth_annular_ring = unsigned(100_000);
    let (_, messages) = run_drc(&mut board, &settings, false);
    let annular: Vec<_> = messages_of_kind(&messages, |k| {
        matches!(k, DrcMessageKind::MinimumAnnularRing { .. })
    });
    assert!(annular.is_empty(), "{messages:?}");
}

#[test]
fn test_s5_pad_connected_where_origin_is_not_in_copper() {
    let mut board = Board::new(0);
    let net = board.circuit_mut().add_net_signal("SIG");
    let cmp = board.circuit_mut().add_component_instance("U1", false);

    // Copper blob sits entirely to the right of the pad origin.
    let outline = Path::from_points([
        Point::from_nm(350_000, -250_000),
        Point::from_nm(850_000, -250_000),
        Point::from_nm(850_000, 250_000),
        Point::from_nm(350_000, 250_000),
        Point::from_nm(350_000, -250_000),
    ]);
    let pad = Pad::new(
        Point::ORIGIN,
        Angle::ZERO,
        BoardSide::Bottom,
        PadShape::Custom { outline },
        Some(net),
    );
    let (device_uuid, pad_uuid) = place_device_with_pad(&mut board, cmp, (0, 0), pad);

    let mut segment = NetSegment::new(Some(net));
    let junction = segment.add_junction(Point::from_nm(-2_000_000, 0));
    segment.add_line(
        "bot_cu",
        PositiveLength::from_nm(200_000),
        NetLineAnchor::Junction(junction),
        NetLineAnchor::Pad {
            device: device_uuid,
            pad: pad_uuid,
        },
    );
    board.add_net_segment(segment).unwrap();

    let settings = base_settings();
    let (_, messages) = run_drc(&mut board, &settings, false);
    let invalid: Vec<_> = messages_of_kind(&messages, |k| {
        matches!(k, DrcMessageKind::InvalidPadConnection { .. })
    });
    assert_eq!(invalid.len(), 1, "{messages:?}");
    match &invalid[0].kind {
        DrcMessageKind::InvalidPadConnection { device, pad, layer } => {
            assert_eq!(*device, device_uuid);
            assert_eq!(*pad, pad_uuid);
            assert_eq!(layer, "bot_cu");
        }
        other => panic!("unexpected kind {other:?}"),
    }
    assert_eq!(invalid[0].severity, Severity::Error);
}

#[test]
fn test_pad_connected_at_origin_is_silent() {
    let mut board = Board::new(0);
    let net = board.circuit_mut().add_net_signal("SIG");
    let cmp = board.circuit_mut().add_component_instance("U1", false);
    let pad = smt_pad(BoardSide::Top, 600_000, Some(net));
    let (device_uuid, pad_uuid) = place_device_with_pad(&mut board, cmp, (0, 0), pad);

    let mut segment = NetSegment::new(Some(net));
    let junction = segment.add_junction(Point::from_nm(-2_000_000, 0));
    segment.add_line(
        "top_cu",
        PositiveLength::from_nm(200_000),
        NetLineAnchor::Junction(junction),
        NetLineAnchor::Pad {
            device: device_uuid,
            pad: pad_uuid,
        },
    );
    board.add_net_segment(segment).unwrap();

    let settings = base_settings();
    let (_, messages) = run_drc(&mut board, &settings, false);
    let invalid: Vec<_> = messages_of_kind(&messages, |k| {
        matches!(k, DrcMessageKind::InvalidPadConnection { .. })
    });
    assert!(invalid.is_empty(), "{messages:?}");
}

#[test]
fn test_s6_unplaced_component_reported_once() {
    let mut board = Board::new(0);
    let placed = board.circuit_mut().add_component_instance("R1", false);
    let unplaced = board.circuit_mut().add_component_instance("R2", false);
    let schematic_only = board.circuit_mut().add_component_instance("GND", true);
    let device = Device::new(placed, Point::ORIGIN, Angle::ZERO, false);
    let pending = board.prepare_add_device(device).unwrap();
    board.commit_add_device(pending);

    let settings = base_settings();
    let (_, messages) = run_drc(&mut board, &settings, false);
    let missing: Vec<_> = messages_of_kind(&messages, |k| {
        matches!(k, DrcMessageKind::MissingDevice { .. })
    });
    assert_eq!(missing.len(), 1, "{messages:?}");
    match &missing[0].kind {
        DrcMessageKind::MissingDevice { component } => {
            assert_eq!(*component, unplaced);
            assert_ne!(*component, schematic_only);
        }
        other => panic!("unexpected kind {other:?}"),
    }
}

#[test]
fn test_minimum_copper_width_flags_narrow_trace_and_text() {
    let (mut board, net_a, _net_b) = two_net_board();
    add_trace(&mut board, Some(net_a), "top_cu", 100_000, (0, 0), (5_000_000, 0));
    board.add_stroke_text(StrokeText::new(
        "top_cu",
        Point::from_nm(0, 2_000_000),
        Angle::ZERO,
        false,
        unsigned(80_000),
        vec![Path::from_points([
            Point::ORIGIN,
            Point::from_nm(1_000_000, 0),
        ])],
    ));
    // A wide trace stays silent.
    add_trace(&mut board, Some(net_a), "top_cu", 300_000, (0, -2_000_000), (5_000_000, -2_000_000));

    let mut settings = base_settings();
    settings.min_copper_width = unsigned(200_000);
    let (_, messages) = run_drc(&mut board, &settings, false);
    let width: Vec<_> =
        messages_of_kind(&messages, |k| matches!(k, DrcMessageKind::MinimumWidth { .. }));
    assert_eq!(width.len(), 2, "{messages:?}");
    assert!(width.iter().all(|m| !m.locations.is_empty()));
}

#[test]
fn test_minimum_width_ignores_disabled_layer() {
    let (mut board, net_a, _net_b) = two_net_board();
    add_trace(&mut board, Some(net_a), "bot_cu", 100_000, (0, 0), (5_000_000, 0));
    board.layer_stack_mut().set_layer_enabled("bot_cu", false);

    let mut settings = base_settings();
    settings.min_copper_width = unsigned(200_000);
    let (_, messages) = run_drc(&mut board, &settings, false);
    assert!(messages.is_empty(), "{messages:?}");
}

#[test]
fn test_copper_hole_clearance() {
    let (mut board, net_a, _net_b) = two_net_board();
    add_trace(&mut board, Some(net_a), "top_cu", 200_000, (0, 0), (5_000_000, 0));
    // 1mm hole centred 630um above the trace centre: the gap between the
    // hole edge (130um) and the trace edge (100um) is 30um < 250um.
    board.add_hole(Hole::round(
        Point::from_nm(2_500_000, 630_000),
        PositiveLength::from_nm(1_000_000),
    ));
    // A second, far-away hole stays silent.
    board.add_hole(Hole::round(
        Point::from_nm(2_500_000, 5_000_000),
        PositiveLength::from_nm(1_000_000),
    ));

    let mut settings = base_settings();
    settings.min_copper_npth_clearance = unsigned(250_000);
    let (_, messages) = run_drc(&mut board, &settings, false);
    let hole_clearance: Vec<_> = messages_of_kind(&messages, |k| {
        matches!(k, DrcMessageKind::CopperHoleClearance { .. })
    });
    assert_eq!(hole_clearance.len(), 1, "{messages:?}");
}

#[test]
fn test_drill_and_slot_minimums() {
    let (mut board, net_a, _net_b) = two_net_board();
    // Round NPTH hole below the drill minimum.
    board.add_hole(Hole::round(Point::ORIGIN, PositiveLength::from_nm(200_000)));
    // NPTH slot below the slot width minimum.
    board.add_hole(Hole::slot(
        Path::from_points([
            Point::from_nm(3_000_000, 0),
            Point::from_nm(4_000_000, 0),
        ]),
        PositiveLength::from_nm(500_000),
    ));
    // Via drill below the PTH minimum.
    add_via_segment(&mut board, Some(net_a), (0, 3_000_000), 500_000, 200_000);

    let mut settings = base_settings();
    settings.min_npth_drill_diameter = unsigned(250_000);
    settings.min_npth_slot_width = unsigned(1_000_000);
    settings.min_pth_drill_diameter = unsigned(300_000);
    let (_, messages) = run_drc(&mut board, &settings, false);

    let drills: Vec<_> = messages_of_kind(&messages, |k| {
        matches!(k, DrcMessageKind::MinimumDrillDiameter { .. })
    });
    assert_eq!(drills.len(), 2, "{messages:?}");
    let slots: Vec<_> = messages_of_kind(&messages, |k| {
        matches!(k, DrcMessageKind::MinimumSlotWidth { .. })
    });
    assert_eq!(slots.len(), 1, "{messages:?}");
}

#[test]
fn test_forbidden_slot_policies() {
    let mut board = Board::new(0);
    // Straight single-segment slot.
    board.add_hole(Hole::slot(
        Path::from_points([Point::ORIGIN, Point::from_nm(1_000_000, 0)]),
        PositiveLength::from_nm(500_000),
    ));
    // Multi-segment slot.
    board.add_hole(Hole::slot(
        Path::from_points([
            Point::from_nm(0, 3_000_000),
            Point::from_nm(1_000_000, 3_000_000),
            Point::from_nm(1_000_000, 4_000_000),
        ]),
        PositiveLength::from_nm(500_000),
    ));

    let mut settings = base_settings();
    settings.allowed_npth_slots = AllowedSlots::SingleSegmentStraight;
    let (_, messages) = run_drc(&mut board, &settings, false);
    let forbidden: Vec<_> =
        messages_of_kind(&messages, |k| matches!(k, DrcMessageKind::ForbiddenSlot { .. }));
    // Only the multi-segment slot exceeds the policy.
    assert_eq!(forbidden.len(), 1, "{messages:?}");

    settings.allowed_npth_slots = AllowedSlots::None;
    let (_, messages) = run_drc(&mut board, &settings, false);
    let forbidden: Vec<_> =
        messages_of_kind(&messages, |k| matches!(k, DrcMessageKind::ForbiddenSlot { .. }));
    assert_eq!(forbidden.len(), 2, "{messages:?}");
}

#[test]
fn test_courtyard_overlap() {
    use boardguard::{Footprint, FootprintPolygon};

    let mut board = Board::new(0);
    let cmp1 = board.circuit_mut().add_component_instance("U1", false);
    let cmp2 = board.circuit_mut().add_component_instance("U2", false);
    let courtyard_rect = |x1: i64, x2: i64| {
        Path::from_points([
            Point::from_nm(x1, -1_000_000),
            Point::from_nm(x2, -1_000_000),
            Point::from_nm(x2, 1_000_000),
            Point::from_nm(x1, 1_000_000),
            Point::from_nm(x1, -1_000_000),
        ])
    };
    for (cmp, position) in [(cmp1, 0), (cmp2, 1_500_000)] {
        let device = Device::new(cmp, Point::from_nm(position, 0), Angle::ZERO, false)
            .with_footprint(Footprint {
                polygons: vec![FootprintPolygon::new(
                    "top_courtyard",
                    courtyard_rect(-1_000_000, 1_000_000),
                    unsigned(0),
                    true,
                )],
                circles: vec![],
                holes: vec![],
            });
        let pending = board.prepare_add_device(device).unwrap();
        board.commit_add_device(pending);
    }

    let settings = base_settings();
    let (_, messages) = run_drc(&mut board, &settings, false);
    let overlaps: Vec<_> = messages_of_kind(&messages, |k| {
        matches!(k, DrcMessageKind::CourtyardOverlap { .. })
    });
    assert_eq!(overlaps.len(), 1, "{messages:?}");
}

#[test]
fn test_missing_connection_reported_per_air_wire() {
    let mut board = Board::new(0);
    let net = board.circuit_mut().add_net_signal("SIG");
    let cmp1 = board.circuit_mut().add_component_instance("R1", false);
    let cmp2 = board.circuit_mut().add_component_instance("R2", false);
    place_device_with_pad(&mut board, cmp1, (0, 0), smt_pad(BoardSide::Top, 400_000, Some(net)));
    place_device_with_pad(
        &mut board,
        cmp2,
        (4_000_000, 0),
        smt_pad(BoardSide::Top, 400_000, Some(net)),
    );

    let settings = base_settings();
    let (_, messages) = run_drc(&mut board, &settings, false);
    let missing: Vec<_> = messages_of_kind(&messages, |k| {
        matches!(k, DrcMessageKind::MissingConnection { .. })
    });
    assert_eq!(missing.len(), 1, "{messages:?}");
    assert!(!missing[0].locations.is_empty());
}

#[test]
fn test_stale_objects() {
    let mut board = Board::new(0);
    let net = board.circuit_mut().add_net_signal("SIG");
    // A segment with lines plus one dangling junction.
    let mut segment = NetSegment::new(Some(net));
    let a = segment.add_junction(Point::ORIGIN);
    let b = segment.add_junction(Point::from_nm(1_000_000, 0));
    segment.add_junction(Point::from_nm(9_000_000, 0));
    segment.add_line(
        "top_cu",
        PositiveLength::from_nm(200_000),
        NetLineAnchor::Junction(a),
        NetLineAnchor::Junction(b),
    );
    board.add_net_segment(segment).unwrap();
    // A segment with no lines at all.
    board.add_net_segment(NetSegment::new(Some(net))).unwrap();

    let settings = base_settings();
    let (_, messages) = run_drc(&mut board, &settings, false);
    let empty: Vec<_> = messages_of_kind(&messages, |k| {
        matches!(k, DrcMessageKind::EmptyNetSegment { .. })
    });
    assert_eq!(empty.len(), 1, "{messages:?}");
    assert_eq!(empty[0].severity, Severity::Hint);
    let junctions: Vec<_> = messages_of_kind(&messages, |k| {
        matches!(k, DrcMessageKind::UnconnectedJunction { .. })
    });
    assert_eq!(junctions.len(), 1, "{messages:?}");
}

#[test]
fn test_quick_mode_skips_starred_passes() {
    let mut board = Board::new(0);
    let unplaced = board.circuit_mut().add_component_instance("R9", false);
    let net = board.circuit_mut().add_net_signal("SIG");
    add_via_segment(&mut board, Some(net), (0, 0), 400_000, 300_000);

    let mut settings = base_settings();
    settings.min_pth_annular_ring = unsigned(100_000);
    let (_, full) = run_drc(&mut board.clone(), &settings, false);
    let (_, quick) = run_drc(&mut board, &settings, true);

    assert!(full.iter().any(|m| matches!(
        m.kind,
        DrcMessageKind::MinimumAnnularRing { .. }
    )));
    assert!(full
        .iter()
        .any(|m| matches!(m.kind, DrcMessageKind::MissingDevice { component } if component == unplaced)));
    assert!(quick.is_empty(), "quick mode must skip starred passes: {quick:?}");
}

#[test]
fn test_plane_participates_in_clearance_after_rebuild() {
    let (mut board, net_a, net_b) = two_net_board();
    // Ground plane over the whole area.
    let outline = Path::from_points([
        Point::from_nm(0, 0),
        Point::from_nm(10_000_000, 0),
        Point::from_nm(10_000_000, 5_000_000),
        Point::from_nm(0, 5_000_000),
        Point::from_nm(0, 0),
    ]);
    board
        .add_plane(Plane::new(
            "top_cu",
            net_a,
            outline,
            unsigned(100_000),
            unsigned(100_000),
        ))
        .unwrap();
    // Foreign trace inside the plane area: the fill keeps only 100um
    // clearance, less than the demanded 300um.
    add_trace(
        &mut board,
        Some(net_b),
        "top_cu",
        200_000,
        (2_000_000, 2_500_000),
        (8_000_000, 2_500_000),
    );

    let mut settings = base_settings();
    settings.min_copper_copper_clearance = unsigned(300_000);
    let (_, full) = run_drc(&mut board.clone(), &settings, false);
    let plane_hits: Vec<_> = messages_of_kind(&full, |k| {
        matches!(k, DrcMessageKind::CopperCopperClearance { .. })
    });
    assert_eq!(plane_hits.len(), 1, "{full:?}");

    // Quick mode skips the plane rebuild and ignores plane copper.
    let (_, quick) = run_drc(&mut board, &settings, true);
    assert!(quick.is_empty(), "{quick:?}");
}

#[test]
fn test_progress_and_status_stream() {
    let (mut board, net_a, net_b) = two_net_board();
    add_trace(&mut board, Some(net_a), "top_cu", 200_000, (0, 0), (5_000_000, 0));
    add_trace(
        &mut board,
        Some(net_b),
        "top_cu",
        200_000,
        (0, 350_000),
        (5_000_000, 350_000),
    );

    let settings = DrcSettings::default();
    let mut recorder = Recorder::default();
    let mut drc = BoardDesignRuleCheck::new(&mut board, &settings);
    let outcome = drc.execute(false, &mut recorder, &CancelToken::new());

    assert!(recorder.started);
    assert_eq!(recorder.finished, Some(drc.messages().len()));
    assert!(matches!(outcome, DrcOutcome::Finished(_)));
    assert!(recorder.progress.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(recorder.progress.last(), Some(&100));
    assert!(recorder
        .statuses
        .iter()
        .any(|s| s == "Check copper clearances..."));
    assert!(recorder.statuses.last().unwrap().starts_with("Finished with"));
    assert_eq!(recorder.messages.len(), drc.messages().len());
}

#[test]
fn test_cancellation_stops_the_run() {
    let (mut board, net_a, _net_b) = two_net_board();
    add_trace(&mut board, Some(net_a), "top_cu", 100_000, (0, 0), (5_000_000, 0));

    let settings = DrcSettings::default();
    let cancel = CancelToken::new();
    cancel.cancel();
    let mut recorder = Recorder::default();
    let mut drc = BoardDesignRuleCheck::new(&mut board, &settings);
    let outcome = drc.execute(false, &mut recorder, &cancel);

    assert_eq!(outcome, DrcOutcome::Cancelled);
    assert!(recorder.finished.is_none());
    assert_eq!(recorder.statuses.last().map(String::as_str), Some("Cancelled"));
    assert!(recorder.progress.iter().all(|&p| p < 100));
}

#[test]
fn test_no_duplicate_messages_for_multi_layer_pads() {
    // A THT pad exists on both layers of a two layer board; the board
    // clearance check visits it per layer but must report it once.
    let mut board = Board::new(0);
    let net = board.circuit_mut().add_net_signal("SIG");
    let cmp = board.circuit_mut().add_component_instance("J1", false);
    add_board_outline(&mut board, 0, -5_000_000, 10_000_000, 5_000_000);
    let pad = Pad::new(
        Point::ORIGIN,
        Angle::ZERO,
        BoardSide::Through,
        PadShape::Round {
            diameter: PositiveLength::from_nm(800_000),
        },
        Some(net),
    )
    .with_hole(Hole::round(Point::ORIGIN, PositiveLength::from_nm(400_000)));
    place_device_with_pad(&mut board, cmp, (100_000, 0), pad);

    let mut settings = base_settings();
    settings.min_copper_board_clearance = unsigned(300_000);
    let (_, messages) = run_drc(&mut board, &settings, false);
    let board_clearance: Vec<_> = messages_of_kind(&messages, |k| {
        matches!(k, DrcMessageKind::CopperBoardClearance { .. })
    });
    assert_eq!(board_clearance.len(), 1, "{messages:?}");
}
