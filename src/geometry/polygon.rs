//! Boolean algebra over closed polygon sets.
//!
//! A [`PolygonSet`] is a set of simple polygons with holes, closed under
//! union, intersection, difference and signed offsetting. Arcs are
//! flattened on the way in, against the arc tolerance the set was created
//! with; every polygon operation of a DRC run must use one and the same
//! tolerance.
//!
//! Coordinates are `f64` nanometres. Within the supported ±2^52 nm range
//! every input coordinate is exactly representable, so the only
//! approximation is the arc flattening itself.

use geo::{Area, BooleanOps, Contains, Coord, LineString, MultiPolygon, Polygon};

use super::{GeometryError, Length, Path, Point, PositiveLength};

/// Interior areas below this (in nm²) count as empty; boundary-only
/// contact of two sets must not register as an overlap.
const AREA_EPSILON: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct PolygonSet {
    shapes: MultiPolygon<f64>,
    arc_tolerance: PositiveLength,
}

impl PolygonSet {
    pub fn empty(arc_tolerance: PositiveLength) -> Self {
        PolygonSet {
            shapes: MultiPolygon::new(Vec::new()),
            arc_tolerance,
        }
    }

    /// Builds the area enclosed by a closed path. Open paths are closed
    /// implicitly; degenerate rings (fewer than three distinct points)
    /// yield an empty set.
    pub fn from_path(path: &Path, arc_tolerance: PositiveLength) -> Result<Self, GeometryError> {
        let mut set = PolygonSet::empty(arc_tolerance);
        set.add_ring(path)?;
        Ok(set)
    }

    /// Union of the areas of several closed paths (non-zero fill).
    pub fn from_paths<'a>(
        paths: impl IntoIterator<Item = &'a Path>,
        arc_tolerance: PositiveLength,
    ) -> Result<Self, GeometryError> {
        let mut set = PolygonSet::empty(arc_tolerance);
        for path in paths {
            set.add_ring(path)?;
        }
        Ok(set)
    }

    /// Strokes `path` at `width` and returns the union of the stroke
    /// shapes, i.e. the stroked outline as an area.
    pub fn from_outline_strokes(
        path: &Path,
        width: PositiveLength,
        arc_tolerance: PositiveLength,
    ) -> Result<Self, GeometryError> {
        let strokes = path.to_outline_strokes(width, arc_tolerance)?;
        PolygonSet::from_paths(strokes.iter(), arc_tolerance)
    }

    pub fn arc_tolerance(&self) -> PositiveLength {
        self.arc_tolerance
    }

    fn add_ring(&mut self, path: &Path) -> Result<(), GeometryError> {
        let points = path.to_closed().flattened(self.arc_tolerance)?;
        if points.len() < 4 {
            // Closed ring with fewer than three distinct vertices.
            return Ok(());
        }
        let mut coords: Vec<Coord<f64>> = Vec::with_capacity(points.len());
        for p in &points {
            let x = p.x.to_nm();
            let y = p.y.to_nm();
            if x.abs() > Length::MAX_COORDINATE || y.abs() > Length::MAX_COORDINATE {
                return Err(GeometryError::PolygonAlgebra(format!(
                    "coordinate {} outside the supported range",
                    p
                )));
            }
            coords.push(Coord {
                x: x as f64,
                y: y as f64,
            });
        }
        // Outer rings are CCW; mirrored inputs arrive CW and get reversed.
        if signed_ring_area(&coords) < 0.0 {
            coords.reverse();
        }
        let ring = Polygon::new(LineString::from(coords), Vec::new());
        if ring.unsigned_area() < AREA_EPSILON {
            return Ok(());
        }
        let single = MultiPolygon::new(vec![ring]);
        self.shapes = if self.shapes.0.is_empty() {
            single
        } else {
            self.shapes.union(&single)
        };
        Ok(())
    }

    pub fn unite_with(&mut self, other: &PolygonSet) {
        debug_assert_eq!(self.arc_tolerance, other.arc_tolerance);
        if other.shapes.0.is_empty() {
            return;
        }
        self.shapes = if self.shapes.0.is_empty() {
            other.shapes.clone()
        } else {
            self.shapes.union(&other.shapes)
        };
    }

    pub fn intersection(&self, other: &PolygonSet) -> PolygonSet {
        debug_assert_eq!(self.arc_tolerance, other.arc_tolerance);
        if self.shapes.0.is_empty() || other.shapes.0.is_empty() {
            return PolygonSet::empty(self.arc_tolerance);
        }
        PolygonSet {
            shapes: self.shapes.intersection(&other.shapes),
            arc_tolerance: self.arc_tolerance,
        }
    }

    pub fn difference(&self, other: &PolygonSet) -> PolygonSet {
        if self.shapes.0.is_empty() || other.shapes.0.is_empty() {
            return self.clone();
        }
        PolygonSet {
            shapes: self.shapes.difference(&other.shapes),
            arc_tolerance: self.arc_tolerance,
        }
    }

    /// Grows (`delta > 0`) or shrinks (`delta < 0`) the set by `delta`
    /// along every boundary normal, with rounded joins at the arc
    /// tolerance. Shrinking may consume the set entirely.
    pub fn offset(&self, delta: Length) -> Result<PolygonSet, GeometryError> {
        if delta.is_zero() || self.shapes.0.is_empty() {
            return Ok(self.clone());
        }
        let stroke_width = PositiveLength::new(delta.abs() * 2)
            .map_err(|_| GeometryError::Degenerate("offset of zero width".into()))?;
        let mut boundary = PolygonSet::empty(self.arc_tolerance);
        for ring in self.rings() {
            boundary.unite_with(&PolygonSet::from_outline_strokes(
                &ring,
                stroke_width,
                self.arc_tolerance,
            )?);
        }
        let result = if delta.to_nm() > 0 {
            let mut grown = self.clone();
            grown.unite_with(&boundary);
            grown
        } else {
            self.difference(&boundary)
        };
        Ok(result)
    }

    /// Empty iff the set has no interior area.
    pub fn is_empty(&self) -> bool {
        self.shapes.0.is_empty() || self.shapes.unsigned_area() < AREA_EPSILON
    }

    /// Total enclosed area in nm².
    pub fn area(&self) -> f64 {
        self.shapes.unsigned_area()
    }

    /// True if `point` lies strictly inside the set.
    pub fn contains(&self, point: Point) -> bool {
        self.shapes.contains(&geo::Point::new(
            point.x.to_nm_f64(),
            point.y.to_nm_f64(),
        ))
    }

    /// All boundary rings (outer boundaries and hole boundaries) as closed
    /// paths, e.g. for violation highlight locations.
    pub fn outlines(&self) -> Vec<Path> {
        self.rings()
    }

    fn rings(&self) -> Vec<Path> {
        let mut rings = Vec::new();
        for polygon in &self.shapes.0 {
            rings.push(ring_to_path(polygon.exterior()));
            for hole in polygon.interiors() {
                rings.push(ring_to_path(hole));
            }
        }
        rings
    }
}

fn ring_to_path(ring: &LineString<f64>) -> Path {
    let mut points: Vec<Point> = ring
        .coords()
        .map(|c| Point::from_nm(c.x.round() as i64, c.y.round() as i64))
        .collect();
    if points.first() != points.last() {
        if let Some(first) = points.first().copied() {
            points.push(first);
        }
    }
    Path::from_points(points)
}

fn signed_ring_area(coords: &[Coord<f64>]) -> f64 {
    let mut sum = 0.0;
    for pair in coords.windows(2) {
        sum += pair[0].x * pair[1].y - pair[1].x * pair[0].y;
    }
    sum / 2.0
}
