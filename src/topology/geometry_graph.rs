use std::collections::BTreeSet;

use crate::error::Result;
use crate::geometry::{Geometry, LinearRing, PointSequence, Polygon};
use crate::math::intersect_2d::cross_2d;
use crate::math::{ring_direction, Point, Segment, Vector2, TOLERANCE};

use super::half_edge::HalfEdgeId;
use super::planar_graph::PlanarGraph;
use super::vertex::VertexKey;

/// Reference half-edges of one geometry component added to a
/// [`GeometryGraph`].
///
/// For a polygon, `exterior` runs counter-clockwise around the area just
/// inside the shell and `interiors[i]` runs clockwise around hole `i`. A
/// `None` entry means no half-edge with the expected orientation was found,
/// which usually points at a shell or hole defect.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundaryReference {
    pub exterior: Option<HalfEdgeId>,
    pub interiors: Vec<Option<HalfEdgeId>>,
}

/// A planar graph built from geometries.
#[derive(Debug, Default)]
pub struct GeometryGraph {
    graph: PlanarGraph,
    references: Vec<BoundaryReference>,
    input_vertices: BTreeSet<VertexKey>,
}

impl GeometryGraph {
    /// Creates a new, empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph holding a single geometry.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying planar graph becomes inconsistent.
    pub fn from_geometry(geometry: &Geometry) -> Result<Self> {
        let mut graph = Self::new();
        graph.add_geometry(geometry)?;
        Ok(graph)
    }

    /// The underlying planar graph.
    #[must_use]
    pub fn graph(&self) -> &PlanarGraph {
        &self.graph
    }

    /// One reference per added component, in insertion order.
    #[must_use]
    pub fn references(&self) -> &[BoundaryReference] {
        &self.references
    }

    /// Adds a geometry, recursing into collections.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying planar graph becomes inconsistent.
    pub fn add_geometry(&mut self, geometry: &Geometry) -> Result<()> {
        match geometry {
            Geometry::Point(_) => self.references.push(BoundaryReference::default()),
            Geometry::LineString(line) => self.add_path(line.points())?,
            Geometry::LinearRing(ring) => self.add_path(ring.points())?,
            Geometry::Polygon(polygon) => {
                self.add_polygon(polygon)?;
            }
            Geometry::MultiPoint(multi) => {
                for _ in multi.points() {
                    self.references.push(BoundaryReference::default());
                }
            }
            Geometry::MultiLineString(multi) => {
                for line in multi.line_strings() {
                    self.add_path(line.points())?;
                }
            }
            Geometry::MultiPolygon(multi) => {
                for polygon in multi.polygons() {
                    self.add_polygon(polygon)?;
                }
            }
            Geometry::GeometryCollection(collection) => {
                for member in collection.geometries() {
                    self.add_geometry(member)?;
                }
            }
        }
        Ok(())
    }

    /// Adds a polygon's shell, then each hole, and returns the index of its
    /// reference in [`GeometryGraph::references`].
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying planar graph becomes inconsistent.
    pub fn add_polygon(&mut self, polygon: &Polygon) -> Result<usize> {
        let shell = polygon.exterior_ring();
        self.add_ring_segments(shell)?;
        let exterior = self.find_hedge(shell.points(), true)?;

        let mut interiors = Vec::with_capacity(polygon.interior_rings().len());
        for hole in polygon.interior_rings() {
            self.add_ring_segments(hole)?;
            interiors.push(self.find_hedge(hole.points(), false)?);
        }

        self.references.push(BoundaryReference {
            exterior,
            interiors,
        });
        Ok(self.references.len() - 1)
    }

    fn add_ring_segments(&mut self, ring: &LinearRing) -> Result<()> {
        self.input_vertices
            .extend(ring.points().iter().map(VertexKey::new));
        self.graph.add_edges(ring.segments())
    }

    fn add_path(&mut self, points: &[Point]) -> Result<()> {
        self.input_vertices.extend(points.iter().map(VertexKey::new));
        self.graph
            .add_edges(points.windows(2).map(|w| Segment::new(w[0], w[1])))?;
        let exterior = points
            .first()
            .and_then(|start| self.graph.incident_edges(start).first().copied());
        self.references.push(BoundaryReference {
            exterior,
            interiors: Vec::new(),
        });
        Ok(())
    }

    /// Finds a half-edge at the ring's start vertex whose face cycle winds in
    /// the requested direction.
    ///
    /// Candidates are the half-edges collinear with the ring's first or last
    /// non-degenerate segment; the first candidate whose closed walk has the
    /// requested [`ring_direction`] wins.
    ///
    /// # Errors
    ///
    /// Returns an error if a candidate's face cycle does not close.
    pub fn find_hedge(&self, ring: &[Point], ccw: bool) -> Result<Option<HalfEdgeId>> {
        let Some(start) = ring.first() else {
            return Ok(None);
        };
        let mut solid = ring
            .windows(2)
            .map(|w| Segment::new(w[0], w[1]))
            .filter(|s| !s.is_degenerate());
        let Some(first) = solid.next() else {
            return Ok(None);
        };
        let last = solid.last().unwrap_or(first);
        let wanted = if ccw { 1 } else { -1 };

        for &candidate in self.graph.incident_edges(start) {
            let dest = self.graph.destination(candidate)?;
            if !is_collinear(&first, &dest) && !is_collinear(&last, &dest) {
                continue;
            }
            let walk = self.graph.face_ring(candidate)?;
            if ring_direction(&walk) == wanted {
                return Ok(Some(candidate));
            }
        }
        Ok(None)
    }

    /// Returns `true` if splitting introduced no vertex beyond the input
    /// coordinates, i.e. no boundary crosses another away from a vertex.
    #[must_use]
    pub fn consistent_area(&self) -> bool {
        self.graph.vertex_count() <= self.input_vertices.len()
    }

    /// Checks that the face just inside the shell reaches every shell vertex.
    ///
    /// A hole touching the shell in a way that cuts the interior in two
    /// leaves some shell vertices on the other side of the cut. Returns
    /// `None` when the reference carries no exterior half-edge.
    ///
    /// # Errors
    ///
    /// Returns an error if the exterior face cycle does not close.
    pub fn connected_interior(
        &self,
        reference: &BoundaryReference,
        shell: &LinearRing,
    ) -> Result<Option<bool>> {
        let Some(exterior) = reference.exterior else {
            return Ok(None);
        };
        let mut visited = BTreeSet::new();
        for id in self.graph.face_cycle(exterior)? {
            visited.insert(VertexKey::new(&self.graph.half_edge(id)?.origin));
        }
        Ok(Some(
            shell
                .points()
                .iter()
                .all(|p| visited.contains(&VertexKey::new(p))),
        ))
    }
}

/// Collinearity of `point` with the supporting line of `segment`.
///
/// Split points computed from crossings may sit a rounding error away from
/// the line, so a near-zero normalized cross product is accepted too.
fn is_collinear(segment: &Segment, point: &Point) -> bool {
    if segment.side(point) == 0.0 {
        return true;
    }
    let along = segment.direction();
    let to_point = Vector2::new(point.x - segment.start().x, point.y - segment.start().y);
    let scale = along.norm() * to_point.norm();
    scale > 0.0 && (cross_2d(&along, &to_point) / scale).abs() < TOLERANCE
}
