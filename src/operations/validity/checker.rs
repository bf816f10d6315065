use tracing::{debug, trace};

use crate::error::{Result, ValidityError};
use crate::geometry::{
    Geometry, GeometryCollection, LineString, LinearRing, MultiLineString, MultiPoint,
    MultiPolygon, PointSequence, Polygon,
};
use crate::math::polygon_2d::{classify_point_in_ring, PointClassification};
use crate::math::{Point, Segment};
use crate::operations::intersect::{boundaries_cross, SweeplineIntersector};
use crate::topology::GeometryGraph;

use super::InvalidityReason;

/// Checks a geometry against the topological validity rules.
///
/// The checker always recomputes; it neither reads nor fills the memo
/// consulted by [`Validate`](super::Validate).
#[derive(Debug, Clone, Copy)]
pub struct ValidityChecker<'a> {
    geometry: &'a Geometry,
}

impl<'a> ValidityChecker<'a> {
    /// Creates a new checker for `geometry`.
    #[must_use]
    pub fn new(geometry: &'a Geometry) -> Self {
        Self { geometry }
    }

    /// Runs the checks, returning the first failure or `None` if valid.
    ///
    /// # Errors
    ///
    /// Returns `ValidityError::NotImplemented` for a multipolygon with two or
    /// more members whose shells would need a nesting test, and propagates
    /// graph construction errors.
    pub fn execute(&self) -> Result<Option<InvalidityReason>> {
        let reason = check_geometry(self.geometry)?;
        if let Some(reason) = reason {
            debug!(kind = ?self.geometry.kind(), %reason, "geometry is invalid");
        }
        Ok(reason)
    }
}

/// Dispatches to the check for the geometry's kind.
///
/// # Errors
///
/// See [`ValidityChecker::execute`].
pub fn check_geometry(geometry: &Geometry) -> Result<Option<InvalidityReason>> {
    match geometry {
        Geometry::Point(point) => Ok(check_point(point)),
        Geometry::LineString(line) => Ok(check_line_string(line)),
        Geometry::LinearRing(ring) => Ok(check_linear_ring(ring)),
        Geometry::Polygon(polygon) => check_polygon(polygon),
        Geometry::MultiPoint(multi) => Ok(check_multi_point(multi)),
        Geometry::MultiLineString(multi) => Ok(check_multi_line_string(multi)),
        Geometry::MultiPolygon(multi) => check_multi_polygon(multi),
        Geometry::GeometryCollection(collection) => check_collection(collection),
    }
}

/// A point is valid when every present ordinate is finite.
#[must_use]
pub fn check_point(point: &Point) -> Option<InvalidityReason> {
    (!point.is_finite()).then_some(InvalidityReason::InvalidCoordinate)
}

/// Checks coordinates and that the line has more than one point.
#[must_use]
pub fn check_line_string(line: &LineString) -> Option<InvalidityReason> {
    check_coordinates(line.points()).or_else(|| {
        (line.num_points() <= 1).then_some(InvalidityReason::TooFewPoints)
    })
}

/// Checks coordinates, closure, point count and simplicity of a ring.
#[must_use]
pub fn check_linear_ring(ring: &LinearRing) -> Option<InvalidityReason> {
    if let Some(reason) = check_coordinates(ring.points()) {
        return Some(reason);
    }
    if !ring.is_closed() {
        return Some(InvalidityReason::UnclosedRing);
    }
    if ring.num_points() <= 1 {
        return Some(InvalidityReason::TooFewPoints);
    }
    if self_intersects(ring) {
        return Some(InvalidityReason::RingSelfIntersection);
    }
    None
}

/// Checks a polygon; the first failing rule wins.
///
/// Rules in order: coordinates, ring closure, more than three points per
/// ring, no crossing or duplicate ring pair, simple rings, holes inside the
/// shell, holes not nested, connected interior.
///
/// # Errors
///
/// Propagates graph construction errors from the connectivity check.
pub fn check_polygon(polygon: &Polygon) -> Result<Option<InvalidityReason>> {
    let rings: Vec<&LinearRing> = polygon.rings().collect();

    if rings.iter().any(|r| check_coordinates(r.points()).is_some()) {
        return Ok(Some(InvalidityReason::InvalidCoordinate));
    }
    if rings.iter().any(|r| !r.is_closed()) {
        return Ok(Some(InvalidityReason::UnclosedRing));
    }
    if rings.iter().any(|r| r.num_points() <= 3) {
        return Ok(Some(InvalidityReason::TooFewPoints));
    }
    if let Some(reason) = check_ring_pairs(&rings) {
        return Ok(Some(reason));
    }
    if rings.iter().any(|r| self_intersects(r)) {
        return Ok(Some(InvalidityReason::RingSelfIntersection));
    }
    if let Some(reason) = check_holes_in_shell(polygon) {
        return Ok(Some(reason));
    }
    if let Some(reason) = check_nested_holes(polygon.interior_rings()) {
        return Ok(Some(reason));
    }
    check_connected_interior(polygon)
}

/// Checks every point.
#[must_use]
pub fn check_multi_point(multi: &MultiPoint) -> Option<InvalidityReason> {
    multi.points().iter().find_map(check_point)
}

/// Checks every member line string.
#[must_use]
pub fn check_multi_line_string(multi: &MultiLineString) -> Option<InvalidityReason> {
    multi.line_strings().iter().find_map(check_line_string)
}

/// Checks every member polygon, then the pairwise shell nesting rule.
///
/// # Errors
///
/// Returns `ValidityError::NotImplemented` once two or more valid members
/// would need the shell nesting test.
pub fn check_multi_polygon(multi: &MultiPolygon) -> Result<Option<InvalidityReason>> {
    for polygon in multi.polygons() {
        if let Some(reason) = check_polygon(polygon)? {
            return Ok(Some(reason));
        }
    }
    if multi.polygons().len() >= 2 {
        return Err(ValidityError::NotImplemented("nested shells").into());
    }
    Ok(None)
}

/// Checks every member geometry.
///
/// # Errors
///
/// Propagates the first member error.
pub fn check_collection(collection: &GeometryCollection) -> Result<Option<InvalidityReason>> {
    for member in collection.geometries() {
        if let Some(reason) = check_geometry(member)? {
            return Ok(Some(reason));
        }
    }
    Ok(None)
}

fn check_coordinates(points: &[Point]) -> Option<InvalidityReason> {
    let bad = points.iter().find(|p| !p.is_finite())?;
    trace!(point = %bad, "non-finite coordinate");
    Some(InvalidityReason::InvalidCoordinate)
}

fn self_intersects(ring: &LinearRing) -> bool {
    let hits = SweeplineIntersector::new(ring.segments()).proper_intersections();
    if let Some(hit) = hits.first() {
        trace!(point = %hit.point, "ring self-intersection");
        return true;
    }
    false
}

/// Shell/hole and hole/hole pairs must neither cross nor repeat.
fn check_ring_pairs(rings: &[&LinearRing]) -> Option<InvalidityReason> {
    let segments: Vec<Vec<Segment>> = rings.iter().map(|r| r.segments()).collect();
    for (i, ring) in rings.iter().enumerate() {
        for (j, other) in rings.iter().enumerate().skip(i + 1) {
            if boundaries_cross(&segments[i], &segments[j]) {
                trace!(first = i, second = j, "rings cross");
                return Some(InvalidityReason::SelfIntersection);
            }
            if ring.same_cycle(other) {
                trace!(first = i, second = j, "duplicate rings");
                return Some(InvalidityReason::DuplicateRings);
            }
        }
    }
    None
}

/// Classifies a ring against the area of `against` by its first vertex off
/// that boundary, falling back to the first segment midpoint off it.
/// Returns `None` when the ring lies entirely on the boundary.
fn classify_ring(ring: &LinearRing, against: &[Point]) -> Option<PointClassification> {
    let midpoints = ring
        .segments()
        .into_iter()
        .map(|s| s.start().midpoint(s.end()));
    ring.points()
        .iter()
        .copied()
        .chain(midpoints)
        .map(|p| classify_point_in_ring(&p, against))
        .find(|c| *c != PointClassification::OnBoundary)
}

fn check_holes_in_shell(polygon: &Polygon) -> Option<InvalidityReason> {
    let shell = polygon.exterior_ring().points();
    for (i, hole) in polygon.interior_rings().iter().enumerate() {
        if classify_ring(hole, shell) != Some(PointClassification::Inside) {
            trace!(hole = i, "hole outside shell");
            return Some(InvalidityReason::HoleOutsideShell);
        }
    }
    None
}

fn check_nested_holes(holes: &[LinearRing]) -> Option<InvalidityReason> {
    for (i, hole) in holes.iter().enumerate() {
        for (j, other) in holes.iter().enumerate() {
            if i != j && classify_ring(hole, other.points()) == Some(PointClassification::Inside) {
                trace!(inner = i, outer = j, "nested holes");
                return Some(InvalidityReason::NestedHoles);
            }
        }
    }
    None
}

fn check_connected_interior(polygon: &Polygon) -> Result<Option<InvalidityReason>> {
    let mut graph = GeometryGraph::new();
    let index = graph.add_polygon(polygon)?;
    if !graph.consistent_area() {
        trace!("graph split introduced new vertices");
        return Ok(Some(InvalidityReason::SelfIntersection));
    }
    let Some(reference) = graph.references().get(index) else {
        return Ok(Some(InvalidityReason::UnknownValidity));
    };
    Ok(
        match graph.connected_interior(reference, polygon.exterior_ring())? {
            Some(true) => None,
            Some(false) => Some(InvalidityReason::DisconnectedInterior),
            None => Some(InvalidityReason::UnknownValidity),
        },
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::TopolisError;

    fn ring(coords: &[(f64, f64)]) -> LinearRing {
        coords.iter().copied().collect()
    }

    fn square(min: f64, max: f64) -> LinearRing {
        ring(&[(min, min), (max, min), (max, max), (min, max), (min, min)])
    }

    fn with_holes(holes: Vec<LinearRing>) -> Polygon {
        Polygon::new(square(0.0, 10.0), holes)
    }

    #[test]
    fn point_ordinates_must_be_finite() {
        assert_eq!(check_point(&Point::new(1.0, 2.0)), None);
        assert_eq!(
            check_point(&Point::new(f64::NAN, 2.0)),
            Some(InvalidityReason::InvalidCoordinate)
        );
        assert_eq!(
            check_point(&Point::with_z(1.0, 2.0, f64::INFINITY)),
            Some(InvalidityReason::InvalidCoordinate)
        );
    }

    #[test]
    fn line_string_needs_two_points() {
        let single: LineString = [(1.0, 1.0)].into_iter().collect();
        assert_eq!(check_line_string(&single), Some(InvalidityReason::TooFewPoints));
        let line: LineString = [(0.0, 0.0), (1.0, 1.0)].into_iter().collect();
        assert_eq!(check_line_string(&line), None);
    }

    #[test]
    fn open_ring_is_unclosed() {
        let open = ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)]);
        assert_eq!(check_linear_ring(&open), Some(InvalidityReason::UnclosedRing));
    }

    #[test]
    fn bowtie_ring_self_intersects() {
        let bowtie = ring(&[(0.0, 0.0), (10.0, 10.0), (10.0, 0.0), (0.0, 10.0), (0.0, 0.0)]);
        assert_eq!(
            check_linear_ring(&bowtie),
            Some(InvalidityReason::RingSelfIntersection)
        );
        let polygon = Polygon::new(bowtie, Vec::new());
        assert_eq!(
            check_polygon(&polygon).unwrap(),
            Some(InvalidityReason::RingSelfIntersection)
        );
    }

    #[test]
    fn simple_polygon_is_valid() {
        assert_eq!(check_polygon(&with_holes(Vec::new())).unwrap(), None);
        assert_eq!(
            check_polygon(&with_holes(vec![square(2.0, 4.0).reversed()])).unwrap(),
            None
        );
    }

    #[test]
    fn triangle_ring_with_three_points_is_too_few() {
        let polygon = Polygon::new(ring(&[(0.0, 0.0), (1.0, 0.0), (0.0, 0.0)]), Vec::new());
        assert_eq!(
            check_polygon(&polygon).unwrap(),
            Some(InvalidityReason::TooFewPoints)
        );
    }

    #[test]
    fn crossing_hole_is_self_intersection() {
        let hole = ring(&[(5.0, 5.0), (15.0, 5.0), (15.0, 8.0), (5.0, 8.0), (5.0, 5.0)]);
        assert_eq!(
            check_polygon(&with_holes(vec![hole])).unwrap(),
            Some(InvalidityReason::SelfIntersection)
        );
    }

    #[test]
    fn identical_holes_are_duplicates() {
        let hole = square(2.0, 4.0);
        assert_eq!(
            check_polygon(&with_holes(vec![hole.clone(), hole])).unwrap(),
            Some(InvalidityReason::DuplicateRings)
        );
    }

    #[test]
    fn rotated_and_reversed_holes_are_duplicates() {
        let hole = square(2.0, 4.0);
        let rotated = ring(&[(4.0, 2.0), (4.0, 4.0), (2.0, 4.0), (2.0, 2.0), (4.0, 2.0)]);
        assert_eq!(
            check_polygon(&with_holes(vec![hole.clone(), rotated])).unwrap(),
            Some(InvalidityReason::DuplicateRings)
        );
        assert_eq!(
            check_polygon(&with_holes(vec![hole.clone(), hole.reversed()])).unwrap(),
            Some(InvalidityReason::DuplicateRings)
        );
    }

    #[test]
    fn hole_outside_shell() {
        assert_eq!(
            check_polygon(&with_holes(vec![square(20.0, 30.0)])).unwrap(),
            Some(InvalidityReason::HoleOutsideShell)
        );
    }

    #[test]
    fn hole_with_every_vertex_on_shell_samples_a_midpoint() {
        // Each vertex touches a different shell edge; the first edge
        // midpoint lies inside, so the hole passes the containment rule and
        // fails on connectivity instead.
        let hole = ring(&[(0.0, 5.0), (5.0, 0.0), (10.0, 5.0), (5.0, 10.0), (0.0, 5.0)]);
        assert_eq!(
            classify_ring(&hole, square(0.0, 10.0).points()),
            Some(PointClassification::Inside)
        );
        assert_eq!(
            check_polygon(&with_holes(vec![hole])).unwrap(),
            Some(InvalidityReason::DisconnectedInterior)
        );
    }

    #[test]
    fn hole_inside_hole_is_nested() {
        let holes = vec![square(1.0, 9.0), square(3.0, 5.0)];
        assert_eq!(
            check_polygon(&with_holes(holes)).unwrap(),
            Some(InvalidityReason::NestedHoles)
        );
    }

    #[test]
    fn hole_splitting_interior_disconnects() {
        let hole = ring(&[(5.0, 0.0), (3.0, 5.0), (5.0, 10.0), (7.0, 5.0), (5.0, 0.0)]);
        assert_eq!(
            check_polygon(&with_holes(vec![hole])).unwrap(),
            Some(InvalidityReason::DisconnectedInterior)
        );
    }

    #[test]
    fn chained_holes_across_shell_disconnect() {
        // Each hole touches the shell once and the other hole at (5, 5),
        // together cutting the shell from bottom to top.
        let lower = ring(&[(5.0, 0.0), (4.0, 3.0), (5.0, 5.0), (6.0, 3.0), (5.0, 0.0)]);
        let upper = ring(&[(5.0, 5.0), (4.0, 7.0), (5.0, 10.0), (6.0, 7.0), (5.0, 5.0)]);
        assert_eq!(check_polygon(&with_holes(vec![lower.clone()])).unwrap(), None);
        assert_eq!(
            check_polygon(&with_holes(vec![lower, upper])).unwrap(),
            Some(InvalidityReason::DisconnectedInterior)
        );
    }

    #[test]
    fn hole_touching_shell_once_is_valid() {
        let hole = ring(&[(5.0, 0.0), (3.0, 5.0), (7.0, 5.0), (5.0, 0.0)]);
        assert_eq!(check_polygon(&with_holes(vec![hole])).unwrap(), None);
    }

    #[test]
    fn multi_polygon_reports_member_reason_first() {
        let bad = with_holes(vec![square(20.0, 30.0)]);
        let multi = MultiPolygon::new(vec![bad, with_holes(Vec::new())]);
        assert_eq!(
            check_multi_polygon(&multi).unwrap(),
            Some(InvalidityReason::HoleOutsideShell)
        );
    }

    #[test]
    fn multi_polygon_shell_nesting_is_not_implemented() {
        let multi = MultiPolygon::new(vec![
            Polygon::new(square(0.0, 1.0), Vec::new()),
            Polygon::new(square(5.0, 6.0), Vec::new()),
        ]);
        let err = check_multi_polygon(&multi).unwrap_err();
        assert!(matches!(
            err,
            TopolisError::Validity(ValidityError::NotImplemented(_))
        ));

        let single = MultiPolygon::new(vec![Polygon::new(square(0.0, 1.0), Vec::new())]);
        assert_eq!(check_multi_polygon(&single).unwrap(), None);
    }

    #[test]
    fn collection_short_circuits_on_first_invalid_member() {
        let collection = GeometryCollection::new(vec![
            Geometry::Point(Point::new(0.0, 0.0)),
            Geometry::LineString([(0.0, 0.0)].into_iter().collect()),
            Geometry::Point(Point::new(f64::NAN, 0.0)),
        ]);
        assert_eq!(
            check_collection(&collection).unwrap(),
            Some(InvalidityReason::TooFewPoints)
        );
    }

    #[test]
    fn checker_dispatches_by_kind() {
        let multi = Geometry::MultiPoint(MultiPoint::new(vec![
            Point::new(0.0, 0.0),
            Point::new(f64::INFINITY, 0.0),
        ]));
        assert_eq!(
            ValidityChecker::new(&multi).execute().unwrap(),
            Some(InvalidityReason::InvalidCoordinate)
        );
        let lines = Geometry::MultiLineString(MultiLineString::new(vec![[(0.0, 0.0), (1.0, 0.0)]
            .into_iter()
            .collect()]));
        assert_eq!(ValidityChecker::new(&lines).execute().unwrap(), None);
    }
}
