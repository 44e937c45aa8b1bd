//! The design rule check coordinator.
//!
//! [`BoardDesignRuleCheck`] drives the individual check passes in a fixed
//! order, skips the plane/hole related passes in quick mode, reports
//! progress and status through a [`DrcObserver`], and honours a
//! [`CancelToken`] between passes (and between the outer iterations of
//! the copper clearance pass). A failing check never aborts the run: its
//! error becomes an internal-error message and the next check starts.

use std::collections::{BTreeSet, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use uuid::Uuid;

use crate::board::{
    Board, Device, Hole, NetLineAnchor, Pad, LAYER_BOARD_OUTLINES, LAYER_BOTTOM_COURTYARD,
    LAYER_TOP_COURTYARD,
};
use crate::geometry::{
    GeometryError, Length, Path, PolygonSet, PositiveLength, Transform,
};

use super::cache::CopperPathsCache;
use super::generator::BoardPathGenerator;
use super::messages::{DrcMessage, DrcMessageKind, MessageIdentity};
use super::settings::{AllowedSlots, DrcSettings};

/// Receives run telemetry as it is produced; all methods default to
/// no-ops so hosts implement only what they present.
pub trait DrcObserver {
    fn on_started(&mut self) {}
    fn on_progress(&mut self, _percent: u8) {}
    fn on_status(&mut self, _status: &str) {}
    fn on_message(&mut self, _message: &DrcMessage) {}
    fn on_finished(&mut self, _message_count: usize) {}
}

/// An observer that ignores everything.
#[derive(Debug, Default)]
pub struct NullObserver;

impl DrcObserver for NullObserver {}

/// Shared cancellation flag. Cloning yields another handle onto the same
/// flag, so the host keeps one clone and hands the other to the run.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        CancelToken::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrcOutcome {
    /// All passes ran; carries the emitted message count.
    Finished(usize),
    /// The cancel flag was observed; no further messages were emitted.
    Cancelled,
}

/// Why a check pass stopped early.
enum CheckInterrupt {
    Geometry(GeometryError),
    Cancelled,
}

impl From<GeometryError> for CheckInterrupt {
    fn from(error: GeometryError) -> Self {
        CheckInterrupt::Geometry(error)
    }
}

type CheckResult = Result<(), CheckInterrupt>;

/// The message sink and progress state of one run.
struct RunState {
    messages: Vec<DrcMessage>,
    seen: HashSet<MessageIdentity>,
    progress: u8,
}

impl RunState {
    fn new() -> Self {
        RunState {
            messages: Vec::new(),
            seen: HashSet::new(),
            progress: 0,
        }
    }

    /// Progress is monotone: a lower value than already reported is
    /// clamped up.
    fn emit_progress(&mut self, percent: u8, observer: &mut dyn DrcObserver) {
        self.progress = self.progress.max(percent);
        observer.on_progress(self.progress);
    }

    fn emit_status(&mut self, status: &str, observer: &mut dyn DrcObserver) {
        tracing::debug!(status, "drc");
        observer.on_status(status);
    }

    /// Emits unless an identical message (kind, involved objects, layer)
    /// was already emitted in this run.
    fn emit_message(&mut self, message: DrcMessage, observer: &mut dyn DrcObserver) {
        if self.seen.insert(message.identity()) {
            observer.on_message(&message);
            self.messages.push(message);
        }
    }
}

/// The board design rule check.
///
/// Holds the board mutably for the duration of a run: the two documented
/// refreshes (plane rebuild, air wire rebuild) are invoked by the
/// coordinator, never by individual checks, and only in full mode for the
/// plane rebuild.
pub struct BoardDesignRuleCheck<'a> {
    board: &'a mut Board,
    settings: &'a DrcSettings,
    messages: Vec<DrcMessage>,
}

impl<'a> BoardDesignRuleCheck<'a> {
    pub fn new(board: &'a mut Board, settings: &'a DrcSettings) -> Self {
        BoardDesignRuleCheck {
            board,
            settings,
            messages: Vec::new(),
        }
    }

    /// Messages of the last [`execute`](Self::execute) call.
    pub fn messages(&self) -> &[DrcMessage] {
        &self.messages
    }

    /// Runs all checks. In quick mode the plane rebuild and the annular
    /// ring, drill, slot, pad, courtyard, placement and stale-object
    /// passes are skipped.
    pub fn execute(
        &mut self,
        quick: bool,
        observer: &mut dyn DrcObserver,
        cancel: &CancelToken,
    ) -> DrcOutcome {
        tracing::debug!(quick, "starting board design rule check");
        observer.on_started();
        self.messages.clear();

        let settings = self.settings;
        let tolerance = settings.max_arc_tolerance;
        let ignore_planes = quick;
        let mut state = RunState::new();
        let mut cache = CopperPathsCache::new(tolerance);
        state.emit_progress(2, observer);

        if !quick {
            state.emit_status("Rebuild planes...", observer);
            self.board.rebuild_all_planes(tolerance);
            state.emit_progress(12, observer);
            if cancel.is_cancelled() {
                return self.finish_cancelled(state, observer);
            }
        }

        let result = check_minimum_copper_width(self.board, settings, &mut state, observer, 14);
        if !self.digest(result, "minimum copper width", &mut state, observer, cancel) {
            return self.finish_cancelled(state, observer);
        }

        let result = check_copper_copper_clearances(
            self.board,
            settings,
            ignore_planes,
            &mut state,
            observer,
            cancel,
            34,
        );
        if !self.digest(result, "copper clearance", &mut state, observer, cancel) {
            return self.finish_cancelled(state, observer);
        }

        let result = check_copper_board_clearances(
            self.board,
            settings,
            ignore_planes,
            &mut state,
            observer,
            44,
        );
        if !self.digest(result, "board clearance", &mut state, observer, cancel) {
            return self.finish_cancelled(state, observer);
        }

        let result = check_copper_hole_clearances(
            self.board,
            settings,
            ignore_planes,
            &mut cache,
            &mut state,
            observer,
            54,
        );
        if !self.digest(result, "hole clearance", &mut state, observer, cancel) {
            return self.finish_cancelled(state, observer);
        }

        if !quick {
            let passes: [(
                &str,
                fn(
                    &Board,
                    &DrcSettings,
                    &mut CopperPathsCache,
                    &mut RunState,
                    &mut dyn DrcObserver,
                    u8,
                ) -> CheckResult,
                u8,
            ); 9] = [
                ("annular ring", check_minimum_annular_rings, 64),
                ("npth drill diameter", check_minimum_npth_drill_diameter, 66),
                ("npth slot width", check_minimum_npth_slot_width, 68),
                ("pth drill diameter", check_minimum_pth_drill_diameter, 70),
                ("pth slot width", check_minimum_pth_slot_width, 72),
                ("allowed npth slots", check_allowed_npth_slots, 74),
                ("allowed pth slots", check_allowed_pth_slots, 76),
                ("pad connections", check_invalid_pad_connections, 78),
                ("courtyard clearance", check_courtyard_clearances, 91),
            ];
            for (name, pass, end) in passes {
                let result = pass(self.board, settings, &mut cache, &mut state, observer, end);
                if !self.digest(result, name, &mut state, observer, cancel) {
                    return self.finish_cancelled(state, observer);
                }
            }

            let result =
                check_unplaced_components(self.board, settings, &mut state, observer, 93);
            if !self.digest(result, "unplaced components", &mut state, observer, cancel) {
                return self.finish_cancelled(state, observer);
            }

            // The air wire refresh is the coordinator's job, not the
            // check's.
            state.emit_status("Check for missing connections...", observer);
            self.board.force_air_wires_rebuild();
            let result = check_missing_connections(self.board, settings, &mut state, observer, 95);
            if !self.digest(result, "missing connections", &mut state, observer, cancel) {
                return self.finish_cancelled(state, observer);
            }

            let result = check_stale_objects(self.board, settings, &mut state, observer, 97);
            if !self.digest(result, "stale objects", &mut state, observer, cancel) {
                return self.finish_cancelled(state, observer);
            }
        }

        cache.clear();
        let count = state.messages.len();
        state.emit_status(&format!("Finished with {count} message(s)!"), observer);
        state.emit_progress(100, observer);
        observer.on_finished(count);
        tracing::debug!(messages = count, "board design rule check finished");
        self.messages = state.messages;
        DrcOutcome::Finished(count)
    }

    /// Converts a pass result into run state; returns false when the run
    /// must stop due to cancellation.
    fn digest(
        &mut self,
        result: CheckResult,
        check: &str,
        state: &mut RunState,
        observer: &mut dyn DrcObserver,
        cancel: &CancelToken,
    ) -> bool {
        match result {
            Ok(()) => {}
            Err(CheckInterrupt::Cancelled) => return false,
            Err(CheckInterrupt::Geometry(error)) => {
                tracing::warn!(check, %error, "check aborted");
                state.emit_message(
                    DrcMessage::new(
                        DrcMessageKind::InternalError {
                            check: check.to_string(),
                        },
                        format!("Internal error in {check} check: {error}"),
                        Vec::new(),
                    ),
                    observer,
                );
            }
        }
        !cancel.is_cancelled()
    }

    fn finish_cancelled(&mut self, mut state: RunState, observer: &mut dyn DrcObserver) -> DrcOutcome {
        state.emit_status("Cancelled", observer);
        tracing::debug!("board design rule check cancelled");
        self.messages = std::mem::take(&mut state.messages);
        DrcOutcome::Cancelled
    }
}

/// Highlights stay visible even for hairline features.
fn highlight_width(actual: Length) -> PositiveLength {
    PositiveLength::new(actual.max(Length::from_nm(50_000)))
        .unwrap_or(PositiveLength::from_nm(50_000))
}

/// Stroked glyph outlines of a text, for highlight locations.
fn text_highlight(
    text: &crate::board::StrokeText,
    arc_tolerance: PositiveLength,
) -> Result<Vec<Path>, GeometryError> {
    let width = highlight_width(text.stroke_width.get());
    let transform = text.transform();
    let mut locations = Vec::new();
    for path in text.generate_paths() {
        locations.extend(transform.map_path(path).to_outline_strokes(width, arc_tolerance)?);
    }
    Ok(locations)
}

/// A hole's drill path stroked at its diameter, for highlight locations.
fn hole_location(
    hole: &Hole,
    transform: &Transform,
    arc_tolerance: PositiveLength,
) -> Result<Vec<Path>, GeometryError> {
    transform
        .map_path(&hole.path)
        .to_outline_strokes(hole.diameter, arc_tolerance)
}

fn pad_transform(device: &Device, pad: &Pad) -> (Transform, Transform) {
    (device.transform(), pad.local_transform())
}

fn check_minimum_copper_width(
    board: &Board,
    settings: &DrcSettings,
    state: &mut RunState,
    observer: &mut dyn DrcObserver,
    progress_end: u8,
) -> CheckResult {
    let min_width = settings.min_copper_width;
    if min_width.is_zero() {
        return Ok(());
    }
    state.emit_status("Check minimum copper width...", observer);
    let tolerance = settings.max_arc_tolerance;

    let copper_enabled = |name: &str| {
        board
            .layer_stack()
            .layer(name)
            .map_or(false, |l| l.is_copper() && l.is_enabled())
    };

    let board_and_device_texts = board
        .stroke_texts()
        .iter()
        .chain(board.devices().iter().flat_map(|d| d.stroke_texts.iter()));
    for text in board_and_device_texts {
        if !copper_enabled(&text.layer) {
            continue;
        }
        if text.stroke_width.get() < min_width.get() {
            let locations = text_highlight(text, tolerance)?;
            state.emit_message(
                DrcMessage::new(
                    DrcMessageKind::MinimumWidth {
                        object: text.uuid,
                        limit: min_width.get(),
                    },
                    format!(
                        "Stroke width {} of text on layer \"{}\" is below the minimum copper width of {}",
                        text.stroke_width, text.layer, min_width
                    ),
                    locations,
                ),
                observer,
            );
        }
    }

    for plane in board.planes() {
        if !copper_enabled(&plane.layer) {
            continue;
        }
        if plane.min_width.get() < min_width.get() {
            let locations = plane
                .outline
                .to_closed()
                .to_outline_strokes(PositiveLength::from_nm(200_000), tolerance)?;
            state.emit_message(
                DrcMessage::new(
                    DrcMessageKind::MinimumWidth {
                        object: plane.uuid,
                        limit: min_width.get(),
                    },
                    format!(
                        "Minimum width {} of plane \"{}\" on layer \"{}\" is below the minimum copper width of {}",
                        plane.min_width,
                        board.circuit().net_name(Some(plane.net)),
                        plane.layer,
                        min_width
                    ),
                    locations,
                ),
                observer,
            );
        }
    }

    for segment in board.net_segments() {
        for line in segment.lines() {
            if !copper_enabled(&line.layer) {
                continue;
            }
            if line.width.get() < min_width.get() {
                let Some((p1, p2)) = board.line_endpoints(segment, line) else {
                    continue;
                };
                state.emit_message(
                    DrcMessage::new(
                        DrcMessageKind::MinimumWidth {
                            object: line.uuid,
                            limit: min_width.get(),
                        },
                        format!(
                            "Trace width {} of net \"{}\" on layer \"{}\" is below the minimum copper width of {}",
                            line.width,
                            board.circuit().net_name(segment.net),
                            line.layer,
                            min_width
                        ),
                        vec![Path::obround(p1, p2, highlight_width(line.width.get()))],
                    ),
                    observer,
                );
            }
        }
    }

    state.emit_progress(progress_end, observer);
    Ok(())
}

/// One entry of the copper clearance pass. `layer == None` marks a
/// through-hole item that intersects with every layer.
struct ClearanceItem {
    object: Uuid,
    label: &'static str,
    layer: Option<String>,
    net: Option<Uuid>,
    area: PolygonSet,
}

fn check_copper_copper_clearances(
    board: &Board,
    settings: &DrcSettings,
    ignore_planes: bool,
    state: &mut RunState,
    observer: &mut dyn DrcObserver,
    cancel: &CancelToken,
    progress_end: u8,
) -> CheckResult {
    let clearance = settings.min_copper_copper_clearance;
    if clearance.is_zero() {
        return Ok(());
    }
    state.emit_status("Check copper clearances...", observer);
    let tolerance = settings.max_arc_tolerance;

    // Two objects each grown by this offset overlap iff their original
    // edges are closer than the clearance, minus numerical slack.
    let offset = ((clearance.get() - tolerance.get()) / 2 - Length::from_nm(1)).max(Length::ZERO);

    let layers: Vec<String> = board
        .layer_stack()
        .enabled_copper_layers()
        .map(|l| l.name().to_string())
        .collect();

    let mut items: Vec<ClearanceItem> = Vec::new();

    for segment in board.net_segments() {
        for via in segment.vias() {
            let mut generator = BoardPathGenerator::new(board, tolerance);
            generator.add_via(via, offset)?;
            items.push(ClearanceItem {
                object: via.uuid,
                label: "via",
                layer: None,
                net: segment.net,
                area: generator.take_paths(),
            });
        }
        for line in segment.lines() {
            if layers.contains(&line.layer) {
                let mut generator = BoardPathGenerator::new(board, tolerance);
                generator.add_net_line(segment, line, offset)?;
                items.push(ClearanceItem {
                    object: line.uuid,
                    label: "trace",
                    layer: Some(line.layer.clone()),
                    net: segment.net,
                    area: generator.take_paths(),
                });
            }
        }
    }

    if !ignore_planes {
        for plane in board.planes() {
            if layers.contains(&plane.layer) {
                let mut generator = BoardPathGenerator::new(board, tolerance);
                generator.add_plane(plane);
                items.push(ClearanceItem {
                    object: plane.uuid,
                    label: "plane",
                    layer: Some(plane.layer.clone()),
                    net: Some(plane.net),
                    area: generator.take_paths().offset(offset)?,
                });
            }
        }
    }

    for polygon in board.polygons() {
        if layers.contains(&polygon.layer) {
            let mut generator = BoardPathGenerator::new(board, tolerance);
            generator.add_board_polygon(polygon)?;
            items.push(ClearanceItem {
                object: polygon.uuid,
                label: "polygon",
                layer: Some(polygon.layer.clone()),
                net: None,
                area: generator.take_paths().offset(offset)?,
            });
        }
    }

    for text in board.stroke_texts() {
        if layers.contains(&text.layer) {
            let mut generator = BoardPathGenerator::new(board, tolerance);
            generator.add_stroke_text(text, offset)?;
            items.push(ClearanceItem {
                object: text.uuid,
                label: "stroke text",
                layer: Some(text.layer.clone()),
                net: None,
                area: generator.take_paths(),
            });
        }
    }

    for device in board.devices() {
        let transform = device.transform();
        for pad in device.pads() {
            for layer in &layers {
                if pad.is_on_copper_layer(layer, &transform) {
                    let mut generator = BoardPathGenerator::new(board, tolerance);
                    generator.add_pad(pad, &transform, offset)?;
                    items.push(ClearanceItem {
                        object: pad.uuid,
                        label: "pad",
                        layer: Some(layer.clone()),
                        net: pad.net,
                        area: generator.take_paths(),
                    });
                }
            }
        }
        for polygon in &device.footprint.polygons {
            let mapped = transform.map_layer(&polygon.layer);
            if layers.contains(&mapped) {
                let mut generator = BoardPathGenerator::new(board, tolerance);
                generator.add_polygon(
                    &polygon.path,
                    polygon.line_width.get(),
                    polygon.filled,
                    &transform,
                )?;
                items.push(ClearanceItem {
                    object: polygon.uuid,
                    label: "polygon",
                    layer: Some(mapped),
                    net: None,
                    area: generator.take_paths().offset(offset)?,
                });
            }
        }
        for circle in &device.footprint.circles {
            let mapped = transform.map_layer(&circle.layer);
            if layers.contains(&mapped) {
                let mut generator = BoardPathGenerator::new(board, tolerance);
                generator.add_circle(circle, &transform, offset)?;
                items.push(ClearanceItem {
                    object: circle.uuid,
                    label: "circle",
                    layer: Some(mapped),
                    net: None,
                    area: generator.take_paths(),
                });
            }
        }
        for text in &device.stroke_texts {
            if layers.contains(&text.layer) {
                let mut generator = BoardPathGenerator::new(board, tolerance);
                generator.add_stroke_text(text, offset)?;
                items.push(ClearanceItem {
                    object: text.uuid,
                    label: "stroke text",
                    layer: Some(text.layer.clone()),
                    net: None,
                    area: generator.take_paths(),
                });
            }
        }
    }

    for i in 0..items.len() {
        if cancel.is_cancelled() {
            return Err(CheckInterrupt::Cancelled);
        }
        for j in (i + 1)..items.len() {
            let (a, b) = (&items[i], &items[j]);
            if a.net.is_some() && a.net == b.net {
                continue;
            }
            if let (Some(la), Some(lb)) = (&a.layer, &b.layer) {
                if la != lb {
                    continue;
                }
            }
            let intersection = a.area.intersection(&b.area);
            if intersection.is_empty() {
                continue;
            }
            let layer = a.layer.clone().or_else(|| b.layer.clone());
            let on_layer = layer
                .as_deref()
                .map(|l| format!(" on layer \"{l}\""))
                .unwrap_or_default();
            state.emit_message(
                DrcMessage::new(
                    DrcMessageKind::CopperCopperClearance {
                        object1: a.object,
                        net1: a.net,
                        object2: b.object,
                        net2: b.net,
                        layer,
                        limit: clearance.get(),
                    },
                    format!(
                        "Clearance violation between {} of net \"{}\" and {} of net \"{}\"{}",
                        a.label,
                        board.circuit().net_name(a.net),
                        b.label,
                        board.circuit().net_name(b.net),
                        on_layer
                    ),
                    intersection.outlines(),
                ),
                observer,
            );
        }
    }

    state.emit_progress(progress_end, observer);
    Ok(())
}

fn check_copper_board_clearances(
    board: &Board,
    settings: &DrcSettings,
    ignore_planes: bool,
    state: &mut RunState,
    observer: &mut dyn DrcObserver,
    progress_end: u8,
) -> CheckResult {
    let clearance = settings.min_copper_board_clearance;
    if clearance.is_zero() {
        return Ok(());
    }
    state.emit_status("Check board clearances...", observer);
    let tolerance = settings.max_arc_tolerance;

    // Restricted band around the board outline: outline strokes of width
    // 2·clearance − tolerance − 1 reach exactly up to the clearance
    // distance on each side (minus numerical slack).
    let stroke_width = (clearance.get() * 2 - tolerance.get() - Length::from_nm(1))
        .max(Length::from_nm(1));
    let stroke_width =
        PositiveLength::new(stroke_width).unwrap_or(PositiveLength::from_nm(1));
    let mut restricted = PolygonSet::empty(tolerance);
    for polygon in board.polygons() {
        if polygon.layer == LAYER_BOARD_OUTLINES {
            restricted.unite_with(&PolygonSet::from_outline_strokes(
                &polygon.path,
                stroke_width,
                tolerance,
            )?);
        }
    }
    for device in board.devices() {
        let transform = device.transform();
        for polygon in &device.footprint.polygons {
            if transform.map_layer(&polygon.layer) == LAYER_BOARD_OUTLINES {
                restricted.unite_with(&PolygonSet::from_outline_strokes(
                    &transform.map_path(&polygon.path),
                    stroke_width,
                    tolerance,
                )?);
            }
        }
    }
    if restricted.is_empty() {
        state.emit_progress(progress_end, observer);
        return Ok(());
    }

    let copper_enabled = |name: &str| {
        board
            .layer_stack()
            .layer(name)
            .map_or(false, |l| l.is_copper() && l.is_enabled())
    };

    let mut offending: Vec<(Uuid, &'static str, Option<Uuid>, PolygonSet)> = Vec::new();
    {
        let mut test = |object: Uuid, label: &'static str, net: Option<Uuid>, area: PolygonSet| {
            let intersection = restricted.intersection(&area);
            if !intersection.is_empty() {
                offending.push((object, label, net, intersection));
            }
        };

        for segment in board.net_segments() {
            for via in segment.vias() {
                let mut generator = BoardPathGenerator::new(board, tolerance);
                generator.add_via(via, Length::ZERO)?;
                test(via.uuid, "via", segment.net, generator.take_paths());
            }
            for line in segment.lines() {
                let mut generator = BoardPathGenerator::new(board, tolerance);
                generator.add_net_line(segment, line, Length::ZERO)?;
                test(line.uuid, "trace", segment.net, generator.take_paths());
            }
        }

        if !ignore_planes {
            for plane in board.planes() {
                let mut generator = BoardPathGenerator::new(board, tolerance);
                generator.add_plane(plane);
                test(plane.uuid, "plane", Some(plane.net), generator.take_paths());
            }
        }

        for polygon in board.polygons() {
            if copper_enabled(&polygon.layer) {
                let mut generator = BoardPathGenerator::new(board, tolerance);
                generator.add_board_polygon(polygon)?;
                test(polygon.uuid, "polygon", None, generator.take_paths());
            }
        }

        for text in board.stroke_texts() {
            if copper_enabled(&text.layer) {
                let mut generator = BoardPathGenerator::new(board, tolerance);
                generator.add_stroke_text(text, Length::ZERO)?;
                test(text.uuid, "stroke text", None, generator.take_paths());
            }
        }

        for device in board.devices() {
            let transform = device.transform();
            for pad in device.pads() {
                let on_copper = board
                    .layer_stack()
                    .enabled_copper_layers()
                    .any(|l| pad.is_on_copper_layer(l.name(), &transform));
                if on_copper {
                    let mut generator = BoardPathGenerator::new(board, tolerance);
                    generator.add_pad(pad, &transform, Length::ZERO)?;
                    test(pad.uuid, "pad", pad.net, generator.take_paths());
                }
            }
            for polygon in &device.footprint.polygons {
                if copper_enabled(&transform.map_layer(&polygon.layer)) {
                    let mut generator = BoardPathGenerator::new(board, tolerance);
                    generator.add_polygon(
                        &polygon.path,
                        polygon.line_width.get(),
                        polygon.filled,
                        &transform,
                    )?;
                    test(polygon.uuid, "polygon", None, generator.take_paths());
                }
            }
            for circle in &device.footprint.circles {
                if copper_enabled(&transform.map_layer(&circle.layer)) {
                    let mut generator = BoardPathGenerator::new(board, tolerance);
                    generator.add_circle(circle, &transform, Length::ZERO)?;
                    test(circle.uuid, "circle", None, generator.take_paths());
                }
            }
            for text in &device.stroke_texts {
                if copper_enabled(&text.layer) {
                    let mut generator = BoardPathGenerator::new(board, tolerance);
                    generator.add_stroke_text(text, Length::ZERO)?;
                    test(text.uuid, "stroke text", None, generator.take_paths());
                }
            }
        }
    }

    for (object, label, net, intersection) in offending {
        state.emit_message(
            DrcMessage::new(
                DrcMessageKind::CopperBoardClearance {
                    object,
                    limit: clearance.get(),
                },
                format!(
                    "{} of net \"{}\" is closer than {} to the board outline",
                    label,
                    board.circuit().net_name(net),
                    clearance
                ),
                intersection.outlines(),
            ),
            observer,
        );
    }

    state.emit_progress(progress_end, observer);
    Ok(())
}

fn check_copper_hole_clearances(
    board: &Board,
    settings: &DrcSettings,
    ignore_planes: bool,
    cache: &mut CopperPathsCache,
    state: &mut RunState,
    observer: &mut dyn DrcObserver,
    progress_end: u8,
) -> CheckResult {
    let clearance = settings.min_copper_npth_clearance;
    if clearance.is_zero() {
        return Ok(());
    }
    state.emit_status("Check hole clearances...", observer);
    let tolerance = settings.max_arc_tolerance;

    // Copper on *any* enabled layer.
    let mut copper = PolygonSet::empty(tolerance);
    let layers: Vec<String> = board
        .layer_stack()
        .enabled_copper_layers()
        .map(|l| l.name().to_string())
        .collect();
    for layer in &layers {
        copper.unite_with(cache.copper_paths(board, layer, None, ignore_planes)?);
    }

    let offset = clearance.get() - Length::from_nm(1);
    let mut test = |hole: &Hole, transform: &Transform| -> Result<Option<Vec<Path>>, GeometryError> {
        let mut generator = BoardPathGenerator::new(board, tolerance);
        generator.add_hole(hole, transform, offset)?;
        let intersection = copper.intersection(&generator.take_paths());
        Ok((!intersection.is_empty()).then(|| intersection.outlines()))
    };

    let mut found: Vec<(Uuid, Vec<Path>)> = Vec::new();
    for hole in board.holes() {
        if let Some(locations) = test(hole, &Transform::identity())? {
            found.push((hole.uuid, locations));
        }
    }
    for device in board.devices() {
        let transform = device.transform();
        for hole in &device.footprint.holes {
            if let Some(locations) = test(hole, &transform)? {
                found.push((hole.uuid, locations));
            }
        }
    }

    for (hole, locations) in found {
        state.emit_message(
            DrcMessage::new(
                DrcMessageKind::CopperHoleClearance {
                    hole,
                    limit: clearance.get(),
                },
                format!("Copper is closer than {clearance} to a non-plated hole"),
                locations,
            ),
            observer,
        );
    }

    state.emit_progress(progress_end, observer);
    Ok(())
}

fn check_minimum_annular_rings(
    board: &Board,
    settings: &DrcSettings,
    cache: &mut CopperPathsCache,
    state: &mut RunState,
    observer: &mut dyn DrcObserver,
    progress_end: u8,
) -> CheckResult {
    let annular = settings.min_pth_annular_ring;
    if annular.is_zero() {
        return Ok(());
    }
    state.emit_status("Check minimum PTH annular rings...", observer);
    let tolerance = settings.max_arc_tolerance;

    // Copper present on *every* enabled layer: a plated barrel is only as
    // good as its thinnest layer.
    let mut through_copper: Option<PolygonSet> = None;
    let layers: Vec<String> = board
        .layer_stack()
        .enabled_copper_layers()
        .map(|l| l.name().to_string())
        .collect();
    for layer in &layers {
        let paths = cache.copper_paths(board, layer, None, false)?;
        through_copper = Some(match through_copper {
            None => paths.clone(),
            Some(acc) => acc.intersection(paths),
        });
    }
    let Some(through_copper) = through_copper else {
        state.emit_progress(progress_end, observer);
        return Ok(());
    };

    for segment in board.net_segments() {
        for via in segment.vias() {
            let diameter = via.drill_diameter.get() + annular.get() * 2 - Length::from_nm(1);
            let Ok(diameter) = PositiveLength::new(diameter) else {
                continue;
            };
            let disc = PolygonSet::from_path(
                &Path::circle(diameter).translated(via.position),
                tolerance,
            )?;
            let remaining = disc.difference(&through_copper);
            if !remaining.is_empty() {
                state.emit_message(
                    DrcMessage::new(
                        DrcMessageKind::MinimumAnnularRing {
                            object: via.uuid,
                            limit: annular.get(),
                        },
                        format!(
                            "Annular ring of via of net \"{}\" is below the minimum of {}",
                            board.circuit().net_name(segment.net),
                            annular
                        ),
                        remaining.outlines(),
                    ),
                    observer,
                );
            }
        }
    }

    for device in board.devices() {
        let transform = device.transform();
        for pad in device.pads() {
            if pad.holes.is_empty() {
                continue;
            }
            let local = pad.local_transform();
            let mut areas = PolygonSet::empty(tolerance);
            for hole in &pad.holes {
                let diameter = hole.diameter.get() + annular.get() * 2 - Length::from_nm(1);
                let Ok(diameter) = PositiveLength::new(diameter) else {
                    continue;
                };
                let mapped = transform.map_path(&local.map_path(&hole.path));
                areas.unite_with(&PolygonSet::from_outline_strokes(
                    &mapped, diameter, tolerance,
                )?);
            }
            let remaining = areas.difference(&through_copper);
            if !remaining.is_empty() {
                state.emit_message(
                    DrcMessage::new(
                        DrcMessageKind::MinimumAnnularRing {
                            object: pad.uuid,
                            limit: annular.get(),
                        },
                        format!(
                            "Annular ring of pad of net \"{}\" is below the minimum of {}",
                            board.circuit().net_name(pad.net),
                            annular
                        ),
                        remaining.outlines(),
                    ),
                    observer,
                );
            }
        }
    }

    state.emit_progress(progress_end, observer);
    Ok(())
}

fn check_minimum_npth_drill_diameter(
    board: &Board,
    settings: &DrcSettings,
    _cache: &mut CopperPathsCache,
    state: &mut RunState,
    observer: &mut dyn DrcObserver,
    progress_end: u8,
) -> CheckResult {
    let min_diameter = settings.min_npth_drill_diameter;
    if min_diameter.is_zero() {
        return Ok(());
    }
    state.emit_status("Check minimum NPTH drill diameters...", observer);
    let tolerance = settings.max_arc_tolerance;

    let mut test = |hole: &Hole, transform: &Transform, state: &mut RunState| -> CheckResult {
        if !hole.is_slot() && hole.diameter.get() < min_diameter.get() {
            let locations = hole_location(hole, transform, tolerance)?;
            state.emit_message(
                DrcMessage::new(
                    DrcMessageKind::MinimumDrillDiameter {
                        hole: hole.uuid,
                        actual: hole.diameter.get(),
                        limit: min_diameter.get(),
                    },
                    format!(
                        "Non-plated drill diameter {} is below the minimum of {}",
                        hole.diameter, min_diameter
                    ),
                    locations,
                ),
                observer,
            );
        }
        Ok(())
    };

    for hole in board.holes() {
        test(hole, &Transform::identity(), state)?;
    }
    for device in board.devices() {
        let transform = device.transform();
        for hole in &device.footprint.holes {
            test(hole, &transform, state)?;
        }
    }

    state.emit_progress(progress_end, observer);
    Ok(())
}

fn check_minimum_npth_slot_width(
    board: &Board,
    settings: &DrcSettings,
    _cache: &mut CopperPathsCache,
    state: &mut RunState,
    observer: &mut dyn DrcObserver,
    progress_end: u8,
) -> CheckResult {
    let min_width = settings.min_npth_slot_width;
    if min_width.is_zero() {
        return Ok(());
    }
    state.emit_status("Check minimum NPTH slot width...", observer);
    let tolerance = settings.max_arc_tolerance;

    let mut test = |hole: &Hole, transform: &Transform, state: &mut RunState| -> CheckResult {
        if hole.is_slot() && hole.diameter.get() < min_width.get() {
            let locations = hole_location(hole, transform, tolerance)?;
            state.emit_message(
                DrcMessage::new(
                    DrcMessageKind::MinimumSlotWidth {
                        hole: hole.uuid,
                        actual: hole.diameter.get(),
                        limit: min_width.get(),
                    },
                    format!(
                        "Non-plated slot width {} is below the minimum of {}",
                        hole.diameter, min_width
                    ),
                    locations,
                ),
                observer,
            );
        }
        Ok(())
    };

    for hole in board.holes() {
        test(hole, &Transform::identity(), state)?;
    }
    for device in board.devices() {
        let transform = device.transform();
        for hole in &device.footprint.holes {
            test(hole, &transform, state)?;
        }
    }

    state.emit_progress(progress_end, observer);
    Ok(())
}

fn check_minimum_pth_drill_diameter(
    board: &Board,
    settings: &DrcSettings,
    _cache: &mut CopperPathsCache,
    state: &mut RunState,
    observer: &mut dyn DrcObserver,
    progress_end: u8,
) -> CheckResult {
    let min_diameter = settings.min_pth_drill_diameter;
    if min_diameter.is_zero() {
        return Ok(());
    }
    state.emit_status("Check minimum PTH drill diameters...", observer);

    for segment in board.net_segments() {
        for via in segment.vias() {
            if via.drill_diameter.get() < min_diameter.get() {
                state.emit_message(
                    DrcMessage::new(
                        DrcMessageKind::MinimumDrillDiameter {
                            hole: via.uuid,
                            actual: via.drill_diameter.get(),
                            limit: min_diameter.get(),
                        },
                        format!(
                            "Via drill diameter {} is below the minimum of {}",
                            via.drill_diameter, min_diameter
                        ),
                        vec![Path::circle(via.drill_diameter).translated(via.position)],
                    ),
                    observer,
                );
            }
        }
    }

    for device in board.devices() {
        for pad in device.pads() {
            for hole in &pad.holes {
                if hole.diameter.get() < min_diameter.get() {
                    let diameter = highlight_width(hole.diameter.get());
                    let position = device.pad_position(pad);
                    state.emit_message(
                        DrcMessage::new(
                            DrcMessageKind::MinimumDrillDiameter {
                                hole: hole.uuid,
                                actual: hole.diameter.get(),
                                limit: min_diameter.get(),
                            },
                            format!(
                                "Pad drill diameter {} is below the minimum of {}",
                                hole.diameter, min_diameter
                            ),
                            vec![Path::circle(diameter).translated(position)],
                        ),
                        observer,
                    );
                }
            }
        }
    }

    state.emit_progress(progress_end, observer);
    Ok(())
}

fn check_minimum_pth_slot_width(
    board: &Board,
    settings: &DrcSettings,
    _cache: &mut CopperPathsCache,
    state: &mut RunState,
    observer: &mut dyn DrcObserver,
    progress_end: u8,
) -> CheckResult {
    let min_width = settings.min_pth_slot_width;
    if min_width.is_zero() {
        return Ok(());
    }
    state.emit_status("Check minimum PTH slot width...", observer);
    let tolerance = settings.max_arc_tolerance;

    for device in board.devices() {
        for pad in device.pads() {
            let (device_transform, local) = pad_transform(device, pad);
            for hole in &pad.holes {
                if hole.is_slot() && hole.diameter.get() < min_width.get() {
                    let mapped = device_transform.map_path(&local.map_path(&hole.path));
                    let locations = mapped.to_outline_strokes(hole.diameter, tolerance)?;
                    state.emit_message(
                        DrcMessage::new(
                            DrcMessageKind::MinimumSlotWidth {
                                hole: hole.uuid,
                                actual: hole.diameter.get(),
                                limit: min_width.get(),
                            },
                            format!(
                                "Plated slot width {} is below the minimum of {}",
                                hole.diameter, min_width
                            ),
                            locations,
                        ),
                        observer,
                    );
                }
            }
        }
    }

    state.emit_progress(progress_end, observer);
    Ok(())
}

/// A hole violates the slot policy when its class exceeds what is allowed.
fn requires_slot_warning(hole: &Hole, allowed: AllowedSlots) -> bool {
    if hole.is_curved_slot() && allowed < AllowedSlots::Any {
        true
    } else if hole.is_multi_segment_slot() && allowed < AllowedSlots::MultiSegmentStraight {
        true
    } else {
        hole.is_slot() && allowed < AllowedSlots::SingleSegmentStraight
    }
}

fn check_allowed_npth_slots(
    board: &Board,
    settings: &DrcSettings,
    _cache: &mut CopperPathsCache,
    state: &mut RunState,
    observer: &mut dyn DrcObserver,
    progress_end: u8,
) -> CheckResult {
    let allowed = settings.allowed_npth_slots;
    if allowed == AllowedSlots::Any {
        return Ok(());
    }
    state.emit_status("Check for disallowed NPTH slots...", observer);
    let tolerance = settings.max_arc_tolerance;

    for hole in board.holes() {
        if requires_slot_warning(hole, allowed) {
            let locations = hole_location(hole, &Transform::identity(), tolerance)?;
            state.emit_message(
                DrcMessage::new(
                    DrcMessageKind::ForbiddenSlot { hole: hole.uuid },
                    "Non-plated slot geometry is not allowed by the manufacturer".to_string(),
                    locations,
                ),
                observer,
            );
        }
    }
    for device in board.devices() {
        let transform = device.transform();
        for hole in &device.footprint.holes {
            if requires_slot_warning(hole, allowed) {
                let locations = hole_location(hole, &transform, tolerance)?;
                state.emit_message(
                    DrcMessage::new(
                        DrcMessageKind::ForbiddenSlot { hole: hole.uuid },
                        "Non-plated slot geometry is not allowed by the manufacturer".to_string(),
                        locations,
                    ),
                    observer,
                );
            }
        }
    }

    state.emit_progress(progress_end, observer);
    Ok(())
}

fn check_allowed_pth_slots(
    board: &Board,
    settings: &DrcSettings,
    _cache: &mut CopperPathsCache,
    state: &mut RunState,
    observer: &mut dyn DrcObserver,
    progress_end: u8,
) -> CheckResult {
    let allowed = settings.allowed_pth_slots;
    if allowed == AllowedSlots::Any {
        return Ok(());
    }
    state.emit_status("Check for disallowed PTH slots...", observer);
    let tolerance = settings.max_arc_tolerance;

    for device in board.devices() {
        for pad in device.pads() {
            let (device_transform, local) = pad_transform(device, pad);
            for hole in &pad.holes {
                if requires_slot_warning(hole, allowed) {
                    let mapped = device_transform.map_path(&local.map_path(&hole.path));
                    let locations = mapped.to_outline_strokes(hole.diameter, tolerance)?;
                    state.emit_message(
                        DrcMessage::new(
                            DrcMessageKind::ForbiddenSlot { hole: hole.uuid },
                            "Plated slot geometry is not allowed by the manufacturer".to_string(),
                            locations,
                        ),
                        observer,
                    );
                }
            }
        }
    }

    state.emit_progress(progress_end, observer);
    Ok(())
}

fn check_invalid_pad_connections(
    board: &Board,
    settings: &DrcSettings,
    _cache: &mut CopperPathsCache,
    state: &mut RunState,
    observer: &mut dyn DrcObserver,
    progress_end: u8,
) -> CheckResult {
    state.emit_status("Check pad connections...", observer);
    let tolerance = settings.max_arc_tolerance;

    for device in board.devices() {
        let transform = device.transform();
        for pad in device.pads() {
            let anchor = NetLineAnchor::Pad {
                device: device.uuid,
                pad: pad.uuid,
            };
            let mut connected_layers: BTreeSet<String> = BTreeSet::new();
            for segment in board.net_segments() {
                for line in segment.lines() {
                    if line.start == anchor || line.end == anchor {
                        connected_layers.insert(line.layer.clone());
                    }
                }
            }
            if connected_layers.is_empty() {
                continue;
            }

            let origin = device.pad_position(pad);
            let area = pad.copper_area(&transform, Length::ZERO, tolerance)?;
            for layer in connected_layers {
                let origin_in_copper =
                    pad.is_on_copper_layer(&layer, &transform) && area.contains(origin);
                if !origin_in_copper {
                    state.emit_message(
                        DrcMessage::new(
                            DrcMessageKind::InvalidPadConnection {
                                device: device.uuid,
                                pad: pad.uuid,
                                layer: layer.clone(),
                            },
                            format!(
                                "Pad of net \"{}\" is connected on layer \"{}\" where its origin is not in copper",
                                board.circuit().net_name(pad.net),
                                layer
                            ),
                            vec![Path::circle(PositiveLength::from_nm(500_000))
                                .translated(origin)],
                        ),
                        observer,
                    );
                }
            }
        }
    }

    state.emit_progress(progress_end, observer);
    Ok(())
}

fn check_courtyard_clearances(
    board: &Board,
    settings: &DrcSettings,
    _cache: &mut CopperPathsCache,
    state: &mut RunState,
    observer: &mut dyn DrcObserver,
    progress_end: u8,
) -> CheckResult {
    state.emit_status("Check courtyard clearances...", observer);
    let tolerance = settings.max_arc_tolerance;

    for layer_name in [LAYER_TOP_COURTYARD, LAYER_BOTTOM_COURTYARD] {
        let Some(layer) = board.layer_stack().layer(layer_name) else {
            continue;
        };
        if !layer.is_enabled() {
            continue;
        }

        let mut courtyards: Vec<(&Device, PolygonSet)> = Vec::new();
        for device in board.devices() {
            courtyards.push((device, device_courtyard(device, layer_name, tolerance)?));
        }

        for i in 0..courtyards.len() {
            for j in (i + 1)..courtyards.len() {
                let (dev1, area1) = &courtyards[i];
                let (dev2, area2) = &courtyards[j];
                let intersection = area1.intersection(area2);
                if !intersection.is_empty() {
                    state.emit_message(
                        DrcMessage::new(
                            DrcMessageKind::CourtyardOverlap {
                                device1: dev1.uuid,
                                device2: dev2.uuid,
                                layer: layer_name.to_string(),
                            },
                            format!(
                                "Courtyards of \"{}\" and \"{}\" overlap on layer \"{}\"",
                                component_name(board, dev1),
                                component_name(board, dev2),
                                layer_name
                            ),
                            intersection.outlines(),
                        ),
                        observer,
                    );
                }
            }
        }
    }

    state.emit_progress(progress_end, observer);
    Ok(())
}

/// Union of the device's footprint drawings on a courtyard layer. Circles
/// are translated to their transformed centre before uniting.
fn device_courtyard(
    device: &Device,
    layer_name: &str,
    tolerance: PositiveLength,
) -> Result<PolygonSet, GeometryError> {
    let transform = device.transform();
    let mut paths = PolygonSet::empty(tolerance);
    for polygon in &device.footprint.polygons {
        if transform.map_layer(&polygon.layer) == layer_name {
            paths.unite_with(&PolygonSet::from_path(
                &transform.map_path(&polygon.path).to_closed(),
                tolerance,
            )?);
        }
    }
    for circle in &device.footprint.circles {
        if transform.map_layer(&circle.layer) == layer_name {
            let center = transform.map_point(circle.center);
            paths.unite_with(&PolygonSet::from_path(
                &Path::circle(circle.diameter).translated(center),
                tolerance,
            )?);
        }
    }
    Ok(paths)
}

fn component_name(board: &Board, device: &Device) -> String {
    board
        .circuit()
        .component_instance(device.component)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| device.uuid.to_string())
}

fn check_unplaced_components(
    board: &Board,
    _settings: &DrcSettings,
    state: &mut RunState,
    observer: &mut dyn DrcObserver,
    progress_end: u8,
) -> CheckResult {
    state.emit_status("Check for unplaced components...", observer);

    for component in board.circuit().component_instances() {
        if !component.schematic_only && board.device_by_component_uuid(component.uuid).is_none() {
            state.emit_message(
                DrcMessage::new(
                    DrcMessageKind::MissingDevice {
                        component: component.uuid,
                    },
                    format!("Component \"{}\" is not placed on the board", component.name),
                    Vec::new(),
                ),
                observer,
            );
        }
    }

    state.emit_progress(progress_end, observer);
    Ok(())
}

fn check_missing_connections(
    board: &Board,
    _settings: &DrcSettings,
    state: &mut RunState,
    observer: &mut dyn DrcObserver,
    progress_end: u8,
) -> CheckResult {
    for wire in board.air_wires() {
        state.emit_message(
            DrcMessage::new(
                DrcMessageKind::MissingConnection {
                    net: Some(wire.net),
                    p1: wire.p1,
                    p2: wire.p2,
                },
                format!(
                    "Missing connection in net \"{}\"",
                    board.circuit().net_name(Some(wire.net))
                ),
                vec![Path::obround(
                    wire.p1,
                    wire.p2,
                    PositiveLength::from_nm(50_000),
                )],
            ),
            observer,
        );
    }

    state.emit_progress(progress_end, observer);
    Ok(())
}

fn check_stale_objects(
    board: &Board,
    _settings: &DrcSettings,
    state: &mut RunState,
    observer: &mut dyn DrcObserver,
    progress_end: u8,
) -> CheckResult {
    state.emit_status("Check for stale objects...", observer);

    for segment in board.net_segments() {
        if !segment.has_lines() {
            state.emit_message(
                DrcMessage::new(
                    DrcMessageKind::EmptyNetSegment {
                        segment: segment.uuid,
                    },
                    format!(
                        "Net segment of \"{}\" has no traces",
                        board.circuit().net_name(segment.net)
                    ),
                    Vec::new(),
                ),
                observer,
            );
        }
        for junction in segment.junctions() {
            if segment.junction_line_count(junction.uuid) == 0 {
                state.emit_message(
                    DrcMessage::new(
                        DrcMessageKind::UnconnectedJunction {
                            segment: segment.uuid,
                            junction: junction.uuid,
                        },
                        format!(
                            "Unconnected junction in net \"{}\"",
                            board.circuit().net_name(segment.net)
                        ),
                        vec![Path::circle(PositiveLength::from_nm(300_000))
                            .translated(junction.position)],
                    ),
                    observer,
                );
            }
        }
    }

    state.emit_progress(progress_end, observer);
    Ok(())
}
