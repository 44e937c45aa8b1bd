//! Polygon footprints of board objects.
//!
//! The generator turns board objects into closed polygon areas on a given
//! layer, optionally inflated by a signed offset, accumulating everything
//! into one [`PolygonSet`]. Checks reduce to boolean questions over the
//! generated sets.

use std::collections::BTreeSet;
use uuid::Uuid;

use crate::board::{
    Board, BoardPolygon, FootprintCircle, Hole, NetLine, NetSegment, Pad, Plane, StrokeText, Via,
};
use crate::geometry::{
    GeometryError, Length, Path, PolygonSet, PositiveLength, Transform,
};

/// A set of net signals (`None` = isolated copper) used to restrict
/// copper collection; an absent filter collects everything.
pub type NetSignalSet = BTreeSet<Option<Uuid>>;

fn net_matches(filter: Option<&NetSignalSet>, net: Option<Uuid>) -> bool {
    filter.map_or(true, |set| set.contains(&net))
}

pub struct BoardPathGenerator<'a> {
    board: &'a Board,
    arc_tolerance: PositiveLength,
    paths: PolygonSet,
}

impl<'a> BoardPathGenerator<'a> {
    pub fn new(board: &'a Board, arc_tolerance: PositiveLength) -> Self {
        BoardPathGenerator {
            board,
            arc_tolerance,
            paths: PolygonSet::empty(arc_tolerance),
        }
    }

    /// The accumulated polygon set.
    pub fn take_paths(self) -> PolygonSet {
        self.paths
    }

    /// Copper disc of a via, radius inflated by `offset`. An offset that
    /// consumes the disc adds nothing.
    pub fn add_via(&mut self, via: &Via, offset: Length) -> Result<(), GeometryError> {
        if let Some(outline) = via.outline(offset) {
            self.add_area(&outline)?;
        }
        Ok(())
    }

    /// Obround of a routed trace, half-width inflated by `offset`.
    pub fn add_net_line(
        &mut self,
        segment: &NetSegment,
        line: &NetLine,
        offset: Length,
    ) -> Result<(), GeometryError> {
        let Some((p1, p2)) = self.board.line_endpoints(segment, line) else {
            return Ok(());
        };
        let Ok(width) = PositiveLength::new(line.width.get() + offset * 2) else {
            return Ok(());
        };
        self.add_area(&Path::obround(p1, p2, width))
    }

    /// The plane's computed filled area; nothing if it was never rebuilt.
    pub fn add_plane(&mut self, plane: &Plane) {
        if let Some(fill) = plane.fill() {
            self.paths.unite_with(fill);
        }
    }

    /// Filled area and/or stroked outline of a polygon, already mapped to
    /// board coordinates by `transform`. Offsets are applied by the
    /// caller through [`PolygonSet::offset`].
    pub fn add_polygon(
        &mut self,
        path: &Path,
        line_width: Length,
        filled: bool,
        transform: &Transform,
    ) -> Result<(), GeometryError> {
        let mapped = transform.map_path(path);
        if filled {
            self.add_area(&mapped.to_closed())?;
        }
        if let Ok(width) = PositiveLength::new(line_width) {
            self.add_strokes(&mapped, width)?;
        }
        Ok(())
    }

    /// Footprint circle; a filled circle inflates its diameter by
    /// 2·`offset`, an outline-only circle inflates its stroke.
    pub fn add_circle(
        &mut self,
        circle: &FootprintCircle,
        transform: &Transform,
        offset: Length,
    ) -> Result<(), GeometryError> {
        let center = transform.map_point(circle.center);
        if circle.filled {
            if let Ok(diameter) = PositiveLength::new(circle.diameter.get() + offset * 2) {
                self.add_area(&Path::circle(diameter).translated(center))?;
            }
        }
        if let Ok(width) = PositiveLength::new(circle.line_width.get() + offset * 2) {
            let outline = Path::circle(circle.diameter).translated(center);
            self.add_strokes(&outline, width)?;
        }
        Ok(())
    }

    /// Stroked glyph paths of a text, stroke width inflated by 2·`offset`.
    pub fn add_stroke_text(
        &mut self,
        text: &StrokeText,
        offset: Length,
    ) -> Result<(), GeometryError> {
        let width = (text.stroke_width.get() + offset * 2).max(Length::from_nm(1));
        let width = PositiveLength::new(width)
            .unwrap_or(PositiveLength::from_nm(1));
        let transform = text.transform();
        for path in text.generate_paths() {
            self.add_strokes(&transform.map_path(path), width)?;
        }
        Ok(())
    }

    /// Union of the pad's copper geometries, inflated by `offset`.
    pub fn add_pad(
        &mut self,
        pad: &Pad,
        device_transform: &Transform,
        offset: Length,
    ) -> Result<(), GeometryError> {
        let area = pad.copper_area(device_transform, offset, self.arc_tolerance)?;
        self.paths.unite_with(&area);
        Ok(())
    }

    /// The hole's drill path stroked at `diameter + 2·offset`.
    pub fn add_hole(
        &mut self,
        hole: &Hole,
        transform: &Transform,
        offset: Length,
    ) -> Result<(), GeometryError> {
        let Ok(width) = PositiveLength::new(hole.diameter.get() + offset * 2) else {
            return Ok(());
        };
        self.add_strokes(&transform.map_path(&hole.path), width)
    }

    /// All copper on the given layer, restricted to `nets` (absent filter
    /// = every net). Vias count on every copper layer. Plane fills are
    /// skipped when `ignore_planes` is set (quick mode).
    pub fn add_copper(
        &mut self,
        layer: &str,
        nets: Option<&NetSignalSet>,
        ignore_planes: bool,
    ) -> Result<(), GeometryError> {
        let board = self.board;
        for segment in board.net_segments() {
            if net_matches(nets, segment.net) {
                for via in segment.vias() {
                    self.add_via(via, Length::ZERO)?;
                }
                for line in segment.lines() {
                    if line.layer == layer {
                        self.add_net_line(segment, line, Length::ZERO)?;
                    }
                }
            }
        }

        if !ignore_planes {
            for plane in board.planes() {
                if plane.layer == layer && net_matches(nets, Some(plane.net)) {
                    self.add_plane(plane);
                }
            }
        }

        if net_matches(nets, None) {
            for polygon in board.polygons() {
                if polygon.layer == layer {
                    self.add_board_polygon(polygon)?;
                }
            }
            for text in board.stroke_texts() {
                if text.layer == layer {
                    self.add_stroke_text(text, Length::ZERO)?;
                }
            }
        }

        for device in board.devices() {
            let transform = device.transform();
            for pad in device.pads() {
                if pad.is_on_copper_layer(layer, &transform) && net_matches(nets, pad.net) {
                    self.add_pad(pad, &transform, Length::ZERO)?;
                }
            }
            if net_matches(nets, None) {
                for polygon in &device.footprint.polygons {
                    if transform.map_layer(&polygon.layer) == layer {
                        self.add_polygon(
                            &polygon.path,
                            polygon.line_width.get(),
                            polygon.filled,
                            &transform,
                        )?;
                    }
                }
                for circle in &device.footprint.circles {
                    if transform.map_layer(&circle.layer) == layer {
                        self.add_circle(circle, &transform, Length::ZERO)?;
                    }
                }
                for text in &device.stroke_texts {
                    if text.layer == layer {
                        self.add_stroke_text(text, Length::ZERO)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Board polygon in board coordinates (no placement transform).
    pub fn add_board_polygon(&mut self, polygon: &BoardPolygon) -> Result<(), GeometryError> {
        self.add_polygon(
            &polygon.path,
            polygon.line_width.get(),
            polygon.filled,
            &Transform::identity(),
        )
    }

    fn add_area(&mut self, path: &Path) -> Result<(), GeometryError> {
        self.paths
            .unite_with(&PolygonSet::from_path(path, self.arc_tolerance)?);
        Ok(())
    }

    fn add_strokes(&mut self, path: &Path, width: PositiveLength) -> Result<(), GeometryError> {
        self.paths.unite_with(&PolygonSet::from_outline_strokes(
            path,
            width,
            self.arc_tolerance,
        )?);
        Ok(())
    }
}
