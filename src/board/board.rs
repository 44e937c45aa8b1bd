//! The board: owner of all placed objects.
//!
//! The board exclusively owns devices, net segments, planes, polygons,
//! stroke texts and holes, and hands out borrowed views to the DRC.
//! Mutations that invalidate derived state return [`DirtyFlag`] events;
//! the board batches them and [`Board::force_air_wires_rebuild`] consumes
//! the batch.

use std::collections::HashSet;
use thiserror::Error;
use uuid::Uuid;

use crate::geometry::{Length, Point, PolygonSet, PositiveLength};

use super::airwire::AirWire;
use super::circuit::Circuit;
use super::device::Device;
use super::hole::Hole;
use super::layer::LayerStack;
use super::netline::{NetLineAnchor, NetSegment};
use super::plane::Plane;
use super::polygon_item::BoardPolygon;
use super::stroke_text::StrokeText;

/// Failures while mutating the board model.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("device {0} already exists on the board")]
    DuplicateDevice(Uuid),
    #[error("component instance {0} does not exist in the circuit")]
    UnknownComponent(Uuid),
    #[error("component instance {0} is already placed")]
    ComponentAlreadyPlaced(Uuid),
    #[error("net signal {0} does not exist in the circuit")]
    UnknownNetSignal(Uuid),
    #[error("layer \"{0}\" does not exist")]
    UnknownLayer(String),
}

/// Invalidation events returned by board mutations. The board batches
/// them internally; they are also returned so hosts can forward them to
/// other consumers (e.g. a scene graph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DirtyFlag {
    AirWiresStale(Uuid),
}

/// A device that passed validation and may be committed. Dropping the
/// handle abandons the add without touching the board.
#[derive(Debug)]
pub struct PendingDevice {
    device: Device,
}

#[derive(Debug, Clone, Default)]
pub struct Board {
    layer_stack: LayerStack,
    circuit: Circuit,
    devices: Vec<Device>,
    net_segments: Vec<NetSegment>,
    planes: Vec<Plane>,
    polygons: Vec<BoardPolygon>,
    stroke_texts: Vec<StrokeText>,
    holes: Vec<Hole>,
    air_wires: Vec<AirWire>,
    stale_nets: HashSet<Uuid>,
}

impl Board {
    pub fn new(inner_copper_count: usize) -> Self {
        Board {
            layer_stack: LayerStack::new(inner_copper_count),
            ..Board::default()
        }
    }

    pub fn layer_stack(&self) -> &LayerStack {
        &self.layer_stack
    }

    pub fn layer_stack_mut(&mut self) -> &mut LayerStack {
        &mut self.layer_stack
    }

    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    pub fn circuit_mut(&mut self) -> &mut Circuit {
        &mut self.circuit
    }

    pub fn devices(&self) -> &[Device] {
        &self.devices
    }

    pub fn device(&self, uuid: Uuid) -> Option<&Device> {
        self.devices.iter().find(|d| d.uuid == uuid)
    }

    /// The device realizing the given component instance, if placed.
    pub fn device_by_component_uuid(&self, component: Uuid) -> Option<&Device> {
        self.devices.iter().find(|d| d.component == component)
    }

    pub fn net_segments(&self) -> &[NetSegment] {
        &self.net_segments
    }

    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }

    pub fn polygons(&self) -> &[BoardPolygon] {
        &self.polygons
    }

    pub fn stroke_texts(&self) -> &[StrokeText] {
        &self.stroke_texts
    }

    pub fn holes(&self) -> &[Hole] {
        &self.holes
    }

    pub fn air_wires(&self) -> &[AirWire] {
        &self.air_wires
    }

    pub fn add_net_segment(&mut self, segment: NetSegment) -> Result<Uuid, BoardError> {
        if let Some(net) = segment.net {
            if self.circuit.net_signal(net).is_none() {
                return Err(BoardError::UnknownNetSignal(net));
            }
        }
        let uuid = segment.uuid;
        if let Some(net) = segment.net {
            self.stale_nets.insert(net);
        }
        self.net_segments.push(segment);
        Ok(uuid)
    }

    pub fn net_segment_mut(&mut self, uuid: Uuid) -> Option<&mut NetSegment> {
        self.net_segments.iter_mut().find(|s| s.uuid == uuid)
    }

    pub fn add_plane(&mut self, plane: Plane) -> Result<Uuid, BoardError> {
        if self.circuit.net_signal(plane.net).is_none() {
            return Err(BoardError::UnknownNetSignal(plane.net));
        }
        if self.layer_stack.layer(&plane.layer).is_none() {
            return Err(BoardError::UnknownLayer(plane.layer.clone()));
        }
        let uuid = plane.uuid;
        self.planes.push(plane);
        Ok(uuid)
    }

    pub fn add_polygon(&mut self, polygon: BoardPolygon) -> Uuid {
        let uuid = polygon.uuid;
        self.polygons.push(polygon);
        uuid
    }

    pub fn add_stroke_text(&mut self, text: StrokeText) -> Uuid {
        let uuid = text.uuid;
        self.stroke_texts.push(text);
        uuid
    }

    pub fn add_hole(&mut self, hole: Hole) -> Uuid {
        let uuid = hole.uuid;
        self.holes.push(hole);
        uuid
    }

    /// First phase of an atomic device add: validates the device and all
    /// of its pads against the circuit. Nothing is attached yet; either
    /// the whole device commits or nothing does.
    pub fn prepare_add_device(&self, device: Device) -> Result<PendingDevice, BoardError> {
        if self.device(device.uuid).is_some() {
            return Err(BoardError::DuplicateDevice(device.uuid));
        }
        if self.circuit.component_instance(device.component).is_none() {
            return Err(BoardError::UnknownComponent(device.component));
        }
        if self.device_by_component_uuid(device.component).is_some() {
            return Err(BoardError::ComponentAlreadyPlaced(device.component));
        }
        for pad in device.pads() {
            if let Some(net) = pad.net {
                if self.circuit.net_signal(net).is_none() {
                    return Err(BoardError::UnknownNetSignal(net));
                }
            }
        }
        Ok(PendingDevice { device })
    }

    /// Second phase: attaches the validated device, wires the pad back
    /// references and reports the nets whose air wires went stale.
    pub fn commit_add_device(&mut self, pending: PendingDevice) -> Vec<DirtyFlag> {
        let mut device = pending.device;
        let index = self.devices.len();
        let mut flags = Vec::new();
        for pad in &mut device.pads {
            pad.device_index = Some(index);
            if let Some(net) = pad.net {
                flags.push(DirtyFlag::AirWiresStale(net));
            }
        }
        self.devices.push(device);
        self.batch_dirty(&flags);
        flags
    }

    /// Moves a device; air wires of all its pad nets go stale.
    pub fn move_device(&mut self, uuid: Uuid, delta: Point) -> Result<Vec<DirtyFlag>, BoardError> {
        let device = self
            .devices
            .iter_mut()
            .find(|d| d.uuid == uuid)
            .ok_or(BoardError::UnknownComponent(uuid))?;
        device.position += delta;
        let flags: Vec<DirtyFlag> = device
            .pads
            .iter()
            .filter_map(|p| p.net.map(DirtyFlag::AirWiresStale))
            .collect();
        self.batch_dirty(&flags);
        Ok(flags)
    }

    fn batch_dirty(&mut self, flags: &[DirtyFlag]) {
        for flag in flags {
            match flag {
                DirtyFlag::AirWiresStale(net) => {
                    self.stale_nets.insert(*net);
                }
            }
        }
    }

    /// Nets whose air wires have not been rebuilt since the last change.
    pub fn stale_air_wire_nets(&self) -> &HashSet<Uuid> {
        &self.stale_nets
    }

    /// Resolves a net line anchor to its board position.
    pub fn anchor_position(&self, segment: &NetSegment, anchor: &NetLineAnchor) -> Option<Point> {
        match anchor {
            NetLineAnchor::Junction(uuid) => segment.junction(*uuid).map(|j| j.position),
            NetLineAnchor::Via(uuid) => segment.via(*uuid).map(|v| v.position),
            NetLineAnchor::Pad { device, pad } => {
                let device = self.device(*device)?;
                let pad = device.pad(*pad)?;
                Some(device.pad_position(pad))
            }
        }
    }

    /// Both endpoints of a net line in board coordinates.
    pub fn line_endpoints(
        &self,
        segment: &NetSegment,
        line: &super::netline::NetLine,
    ) -> Option<(Point, Point)> {
        Some((
            self.anchor_position(segment, &line.start)?,
            self.anchor_position(segment, &line.end)?,
        ))
    }

    /// Recomputes the filled area of every plane. All polygon operations
    /// use the given arc tolerance; pass the same tolerance the consuming
    /// run uses everywhere else.
    pub fn rebuild_all_planes(&mut self, arc_tolerance: PositiveLength) {
        tracing::debug!(planes = self.planes.len(), "rebuilding plane fills");
        let fills: Vec<PolygonSet> = self
            .planes
            .iter()
            .map(|plane| self.compute_plane_fill(plane, arc_tolerance))
            .collect();
        for (plane, fill) in self.planes.iter_mut().zip(fills) {
            plane.set_fill(fill);
        }
    }

    /// One plane's fill: outline, minus foreign-net copper grown by the
    /// plane clearance, then shrink/grow by half the minimum width to
    /// drop slivers. Failures leave the plane unfilled.
    fn compute_plane_fill(&self, plane: &Plane, arc_tolerance: PositiveLength) -> PolygonSet {
        match self.try_compute_plane_fill(plane, arc_tolerance) {
            Ok(fill) => fill,
            Err(e) => {
                tracing::warn!(plane = %plane.uuid, error = %e, "plane fill failed");
                PolygonSet::empty(arc_tolerance)
            }
        }
    }

    fn try_compute_plane_fill(
        &self,
        plane: &Plane,
        arc_tolerance: PositiveLength,
    ) -> Result<PolygonSet, crate::geometry::GeometryError> {
        let area = PolygonSet::from_path(&plane.outline.to_closed(), arc_tolerance)?;
        let clearance = plane.min_clearance.get();
        let mut obstacles = PolygonSet::empty(arc_tolerance);

        for segment in &self.net_segments {
            if segment.net == Some(plane.net) {
                continue;
            }
            for via in segment.vias() {
                if let Some(outline) = via.outline(clearance) {
                    obstacles.unite_with(&PolygonSet::from_path(&outline, arc_tolerance)?);
                }
            }
            for line in segment.lines() {
                if line.layer != plane.layer {
                    continue;
                }
                if let Some((p1, p2)) = self.line_endpoints(segment, line) {
                    let width = PositiveLength::new(line.width.get() + clearance * 2)
                        .unwrap_or(line.width);
                    let obround = crate::geometry::Path::obround(p1, p2, width);
                    obstacles.unite_with(&PolygonSet::from_path(&obround, arc_tolerance)?);
                }
            }
        }

        for device in &self.devices {
            let transform = device.transform();
            for pad in device.pads() {
                if pad.net == Some(plane.net) {
                    continue;
                }
                if pad.is_on_copper_layer(&plane.layer, &transform) {
                    obstacles.unite_with(&pad.copper_area(&transform, clearance, arc_tolerance)?);
                }
            }
        }

        let mut filled = area.difference(&obstacles);
        let half = plane.min_width.get() / 2;
        if half > Length::ZERO {
            filled = filled.offset(-half)?.offset(half)?;
        }
        Ok(filled)
    }

    /// Rebuilds all air wires from scratch and clears the stale batch.
    ///
    /// Per net signal: every connected anchor cluster of every net segment
    /// forms a group, unrouted pads form singleton groups, and groups are
    /// chained by their closest point pairs until one group remains.
    pub fn force_air_wires_rebuild(&mut self) {
        self.air_wires.clear();
        let nets: Vec<Uuid> = self.circuit.net_signals().iter().map(|n| n.uuid).collect();
        for net in nets {
            self.rebuild_net_air_wires(net);
        }
        self.stale_nets.clear();
    }

    fn rebuild_net_air_wires(&mut self, net: Uuid) {
        let mut clusters: Vec<Vec<Point>> = Vec::new();
        let mut anchored_pads: HashSet<(Uuid, Uuid)> = HashSet::new();

        for segment in &self.net_segments {
            if segment.net != Some(net) {
                continue;
            }
            for cluster in segment.anchor_clusters() {
                let points: Vec<Point> = cluster
                    .iter()
                    .filter_map(|anchor| {
                        if let NetLineAnchor::Pad { device, pad } = anchor {
                            anchored_pads.insert((*device, *pad));
                        }
                        self.anchor_position(segment, anchor)
                    })
                    .collect();
                if !points.is_empty() {
                    clusters.push(points);
                }
            }
        }

        for device in &self.devices {
            for pad in device.pads() {
                if pad.net == Some(net) && !anchored_pads.contains(&(device.uuid, pad.uuid)) {
                    clusters.push(vec![device.pad_position(pad)]);
                }
            }
        }

        while clusters.len() > 1 {
            let mut best: Option<(usize, usize, Point, Point, f64)> = None;
            for i in 0..clusters.len() {
                for j in (i + 1)..clusters.len() {
                    for &a in &clusters[i] {
                        for &b in &clusters[j] {
                            let d = a.distance_to(b);
                            if best.map_or(true, |(.., bd)| d < bd) {
                                best = Some((i, j, a, b, d));
                            }
                        }
                    }
                }
            }
            let Some((i, j, p1, p2, _)) = best else { break };
            self.air_wires.push(AirWire { net, p1, p2 });
            let merged = clusters.swap_remove(j);
            clusters[i].extend(merged);
        }
    }
}
