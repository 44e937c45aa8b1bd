//! Arc-aware paths and outline stroking.
//!
//! A [`Path`] is an ordered list of vertices. Each vertex carries the arc
//! angle swept on the way to the *next* vertex; an angle of zero means a
//! straight segment. A path is closed iff its first and last vertex
//! coincide. Arcs stay symbolic until they are flattened against a chord
//! height tolerance, so a single tolerance can govern a whole run.

use serde::{Deserialize, Serialize};

use super::{Angle, GeometryError, Point, PositiveLength};

/// Hard cap on segments per flattened arc, guards against tiny tolerances.
const MAX_ARC_SEGMENTS: u32 = 4096;

/// One path vertex plus the arc angle towards the following vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vertex {
    pub position: Point,
    pub arc_angle: Angle,
}

impl Vertex {
    pub const fn new(position: Point) -> Self {
        Vertex {
            position,
            arc_angle: Angle::ZERO,
        }
    }

    pub const fn with_arc(position: Point, arc_angle: Angle) -> Self {
        Vertex {
            position,
            arc_angle,
        }
    }
}

/// An open or closed sequence of straight and arc segments.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Path {
    vertices: Vec<Vertex>,
}

impl Path {
    pub fn new() -> Self {
        Path::default()
    }

    pub fn from_vertices(vertices: Vec<Vertex>) -> Self {
        Path { vertices }
    }

    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Self {
        Path {
            vertices: points.into_iter().map(Vertex::new).collect(),
        }
    }

    pub fn push(&mut self, vertex: Vertex) {
        self.vertices.push(vertex);
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Closed iff first and last vertex coincide (at least two vertices).
    pub fn is_closed(&self) -> bool {
        match (self.vertices.first(), self.vertices.last()) {
            (Some(first), Some(last)) if self.vertices.len() >= 2 => {
                first.position == last.position
            }
            _ => false,
        }
    }

    /// Returns a closed copy; appends the first vertex if necessary.
    pub fn to_closed(&self) -> Path {
        let mut path = self.clone();
        if !path.is_closed() {
            if let Some(first) = path.vertices.first().copied() {
                path.vertices.push(Vertex::new(first.position));
            }
        }
        path
    }

    /// True if any segment of the path is an arc.
    pub fn is_curved(&self) -> bool {
        let n = self.vertices.len();
        self.vertices
            .iter()
            .take(n.saturating_sub(1))
            .any(|v| !v.arc_angle.is_zero())
    }

    pub fn translated(&self, delta: Point) -> Path {
        Path {
            vertices: self
                .vertices
                .iter()
                .map(|v| Vertex::with_arc(v.position + delta, v.arc_angle))
                .collect(),
        }
    }

    /// A full circle of the given diameter, centred on the origin, built
    /// from two 180° arcs.
    pub fn circle(diameter: PositiveLength) -> Path {
        let r = diameter.get() / 2;
        let right = Point::new(r, super::Length::ZERO);
        let left = Point::new(-r, super::Length::ZERO);
        Path {
            vertices: vec![
                Vertex::with_arc(right, Angle::DEG_180),
                Vertex::with_arc(left, Angle::DEG_180),
                Vertex::new(right),
            ],
        }
    }

    /// A rectangle with two semicircular caps, spanning `p1` to `p2` with
    /// the given total width. Collapses to a circle when `p1 == p2`.
    pub fn obround(p1: Point, p2: Point, width: PositiveLength) -> Path {
        if p1 == p2 {
            return Path::circle(width).translated(p1);
        }
        let half = width.get().to_nm_f64() / 2.0;
        let dx = (p2.x - p1.x).to_nm_f64();
        let dy = (p2.y - p1.y).to_nm_f64();
        let len = dx.hypot(dy);
        // Right-hand normal, so the outline winds counter-clockwise.
        let nx = dy / len * half;
        let ny = -dx / len * half;
        let offset = Point::from_nm(nx.round() as i64, ny.round() as i64);
        let a = p1 + offset;
        let b = p2 + offset;
        let c = p2 - offset;
        let d = p1 - offset;
        Path {
            vertices: vec![
                Vertex::new(a),
                Vertex::with_arc(b, Angle::DEG_180),
                Vertex::new(c),
                Vertex::with_arc(d, Angle::DEG_180),
                Vertex::new(a),
            ],
        }
    }

    /// An axis-aligned rectangle centred on the origin, wound CCW.
    pub fn centered_rect(width: PositiveLength, height: PositiveLength) -> Path {
        let hw = width.get() / 2;
        let hh = height.get() / 2;
        Path::from_points([
            Point::new(hw, -hh),
            Point::new(hw, hh),
            Point::new(-hw, hh),
            Point::new(-hw, -hh),
            Point::new(hw, -hh),
        ])
    }

    /// A rectangle with rounded corners of the given radius, centred on the
    /// origin. The radius is clamped to half the smaller side.
    pub fn rounded_rect(
        width: PositiveLength,
        height: PositiveLength,
        corner_radius: super::UnsignedLength,
    ) -> Path {
        let hw = width.get() / 2;
        let hh = height.get() / 2;
        let r = corner_radius.get().min(hw).min(hh);
        if r.is_zero() {
            return Path::centered_rect(width, height);
        }
        Path {
            vertices: vec![
                Vertex::new(Point::new(hw, -hh + r)),
                Vertex::with_arc(Point::new(hw, hh - r), Angle::DEG_90),
                Vertex::new(Point::new(hw - r, hh)),
                Vertex::with_arc(Point::new(-hw + r, hh), Angle::DEG_90),
                Vertex::new(Point::new(-hw, hh - r)),
                Vertex::with_arc(Point::new(-hw, -hh + r), Angle::DEG_90),
                Vertex::new(Point::new(-hw + r, -hh)),
                Vertex::with_arc(Point::new(hw - r, -hh), Angle::DEG_90),
                Vertex::new(Point::new(hw, -hh + r)),
            ],
        }
    }

    /// A straight two-point path, e.g. an air wire centre line.
    pub fn line(p1: Point, p2: Point) -> Path {
        Path::from_points([p1, p2])
    }

    /// Flattens every arc so that no chord deviates from the true arc by
    /// more than `arc_tolerance`. Consecutive duplicate points are dropped.
    pub fn flattened(&self, arc_tolerance: PositiveLength) -> Result<Vec<Point>, GeometryError> {
        let mut points: Vec<Point> = Vec::with_capacity(self.vertices.len());
        if let Some(first) = self.vertices.first() {
            points.push(first.position);
        }
        for pair in self.vertices.windows(2) {
            let (from, to) = (&pair[0], &pair[1]);
            if from.arc_angle.is_zero() {
                if to.position != from.position {
                    points.push(to.position);
                }
            } else {
                flatten_arc(
                    from.position,
                    to.position,
                    from.arc_angle,
                    arc_tolerance.get().to_nm_f64(),
                    &mut points,
                )?;
            }
        }
        Ok(points)
    }

    /// Strokes the path into closed outline shapes of the given width with
    /// rounded caps and joins: one circle for a single-vertex path, one
    /// obround per (flattened) segment otherwise. The union of the returned
    /// shapes is the stroked outline.
    pub fn to_outline_strokes(
        &self,
        width: PositiveLength,
        arc_tolerance: PositiveLength,
    ) -> Result<Vec<Path>, GeometryError> {
        match self.vertices.len() {
            0 => Err(GeometryError::Degenerate("cannot stroke an empty path".into())),
            1 => Ok(vec![
                Path::circle(width).translated(self.vertices[0].position)
            ]),
            _ => {
                let points = self.flattened(arc_tolerance)?;
                if points.len() < 2 {
                    return Err(GeometryError::Degenerate(
                        "cannot stroke a zero-length path".into(),
                    ));
                }
                Ok(points
                    .windows(2)
                    .map(|pair| Path::obround(pair[0], pair[1], width))
                    .collect())
            }
        }
    }
}

/// Appends the flattened arc from `p1` to `p2` (exclusive of `p1`) to `out`.
fn flatten_arc(
    p1: Point,
    p2: Point,
    sweep: Angle,
    tolerance_nm: f64,
    out: &mut Vec<Point>,
) -> Result<(), GeometryError> {
    let theta = sweep.to_radians();
    let x1 = p1.x.to_nm_f64();
    let y1 = p1.y.to_nm_f64();
    let x2 = p2.x.to_nm_f64();
    let y2 = p2.y.to_nm_f64();
    let chord = (x2 - x1).hypot(y2 - y1);
    if chord == 0.0 {
        return Err(GeometryError::Degenerate(format!(
            "arc of {} between coincident points {}",
            sweep, p1
        )));
    }
    let radius = (chord / 2.0) / (theta.abs() / 2.0).sin();
    // Centre sits on the chord normal; the offset goes to zero at 180°.
    let h = (chord / 2.0) / (theta / 2.0).tan();
    let mx = (x1 + x2) / 2.0;
    let my = (y1 + y2) / 2.0;
    let ux = (x2 - x1) / chord;
    let uy = (y2 - y1) / chord;
    let cx = mx - uy * h;
    let cy = my + ux * h;

    let max_step = if tolerance_nm >= radius {
        std::f64::consts::PI
    } else {
        2.0 * (1.0 - tolerance_nm / radius).acos()
    };
    let segments = ((theta.abs() / max_step).ceil() as u32)
        .clamp(1, MAX_ARC_SEGMENTS);

    let start = (y1 - cy).atan2(x1 - cx);
    for i in 1..segments {
        let a = start + theta * (i as f64) / (segments as f64);
        let p = Point::from_nm(
            (cx + radius * a.cos()).round() as i64,
            (cy + radius * a.sin()).round() as i64,
        );
        if out.last() != Some(&p) {
            out.push(p);
        }
    }
    if out.last() != Some(&p2) {
        out.push(p2);
    }
    Ok(())
}
