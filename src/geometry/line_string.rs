use crate::math::{Point, Segment};

use super::ValidityCache;

/// Shared behaviour of geometries backed by an ordered point sequence.
pub trait PointSequence {
    /// The ordered points of the sequence.
    fn points(&self) -> &[Point];

    /// Number of points, including a repeated closing point.
    fn num_points(&self) -> usize {
        self.points().len()
    }

    /// First point, if any.
    fn start_point(&self) -> Option<&Point> {
        self.points().first()
    }

    /// Last point, if any.
    fn end_point(&self) -> Option<&Point> {
        self.points().last()
    }

    /// Returns `true` if the sequence is non-empty and its first and last
    /// points share the same X/Y pair.
    fn is_closed(&self) -> bool {
        match (self.start_point(), self.end_point()) {
            (Some(s), Some(e)) => s.same_xy(e),
            _ => false,
        }
    }

    /// Segments between consecutive points.
    fn segments(&self) -> Vec<Segment> {
        self.points()
            .windows(2)
            .map(|w| Segment::new(w[0], w[1]))
            .collect()
    }
}

/// An open or closed polyline.
#[derive(Debug, Clone, PartialEq)]
pub struct LineString {
    points: Vec<Point>,
    validity: ValidityCache,
}

impl LineString {
    /// Creates a line string from its points.
    #[must_use]
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            validity: ValidityCache::default(),
        }
    }

    pub(crate) fn validity_cache(&self) -> &ValidityCache {
        &self.validity
    }
}

impl PointSequence for LineString {
    fn points(&self) -> &[Point] {
        &self.points
    }
}

impl FromIterator<(f64, f64)> for LineString {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        LineString::new(iter.into_iter().map(Point::from).collect())
    }
}

/// A line string that is expected to be closed and simple.
///
/// Closure is not enforced on construction; an open ring is reported by the
/// validity checker instead.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearRing {
    points: Vec<Point>,
    validity: ValidityCache,
}

impl LinearRing {
    /// Creates a ring from its points; the last point should repeat the first.
    #[must_use]
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            validity: ValidityCache::default(),
        }
    }

    /// Returns the same ring traversed in the opposite direction.
    #[must_use]
    pub fn reversed(&self) -> Self {
        let mut points = self.points.clone();
        points.reverse();
        LinearRing::new(points)
    }

    /// Returns `true` if both rings trace the same closed X/Y cycle,
    /// regardless of start vertex and direction.
    #[must_use]
    pub fn same_cycle(&self, other: &LinearRing) -> bool {
        let (a, b) = (self.cycle(), other.cycle());
        let n = a.len();
        if n != b.len() {
            return false;
        }
        if n == 0 {
            return true;
        }
        (0..n).any(|shift| {
            let forward = (0..n).all(|i| a[i].same_xy(&b[(i + shift) % n]));
            let backward = (0..n).all(|i| a[i].same_xy(&b[(shift + n - i) % n]));
            forward || backward
        })
    }

    /// The points without the repeated closing point.
    fn cycle(&self) -> &[Point] {
        match self.points.split_last() {
            Some((_, rest)) if self.is_closed() => rest,
            _ => &self.points,
        }
    }

    pub(crate) fn validity_cache(&self) -> &ValidityCache {
        &self.validity
    }
}

impl PointSequence for LinearRing {
    fn points(&self) -> &[Point] {
        &self.points
    }
}

impl FromIterator<(f64, f64)> for LinearRing {
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        LinearRing::new(iter.into_iter().map(Point::from).collect())
    }
}
