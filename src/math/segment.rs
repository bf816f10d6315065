use crate::error::{GeometryError, Result};

use super::intersect_2d::{cross_2d, line_line_intersect_2d, point_at};
use super::{Point, Vector2};

/// An immutable directed line segment.
///
/// The segment may be degenerate (`start == end`); predicates handle that
/// case explicitly instead of dividing by a zero length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    start: Point,
    end: Point,
    dx: f64,
    dy: f64,
}

/// The shared part of two intersecting segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentIntersection {
    /// The segments meet in a single point.
    Point(Point),
    /// The segments are collinear and share the stretch between two points,
    /// ordered along the first segment.
    Overlap(Point, Point),
}

impl Segment {
    /// Creates a segment from `start` to `end`.
    #[must_use]
    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            dx: end.x - start.x,
            dy: end.y - start.y,
        }
    }

    #[must_use]
    pub fn start(&self) -> &Point {
        &self.start
    }

    #[must_use]
    pub fn end(&self) -> &Point {
        &self.end
    }

    #[must_use]
    pub fn dx(&self) -> f64 {
        self.dx
    }

    #[must_use]
    pub fn dy(&self) -> f64 {
        self.dy
    }

    /// Direction vector `end - start` (not normalized).
    #[must_use]
    pub fn direction(&self) -> Vector2 {
        Vector2::new(self.dx, self.dy)
    }

    /// Squared length of the segment.
    #[must_use]
    pub fn length_squared(&self) -> f64 {
        self.dx * self.dx + self.dy * self.dy
    }

    /// Euclidean length of the segment.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Returns `true` if start and end share the same X/Y pair.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }

    /// The same segment traversed from `end` to `start`.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Segment::new(self.end, self.start)
    }

    /// Returns `true` if `p` is one of the two declared endpoints.
    #[must_use]
    pub fn has_endpoint(&self, p: &Point) -> bool {
        self.start.same_xy(p) || self.end.same_xy(p)
    }

    #[must_use]
    pub fn min_x(&self) -> f64 {
        self.start.x.min(self.end.x)
    }

    #[must_use]
    pub fn max_x(&self) -> f64 {
        self.start.x.max(self.end.x)
    }

    #[must_use]
    pub fn min_y(&self) -> f64 {
        self.start.y.min(self.end.y)
    }

    #[must_use]
    pub fn max_y(&self) -> f64 {
        self.start.y.max(self.end.y)
    }

    /// Signed side test of `p` against the supporting line.
    ///
    /// Zero means collinear; positive values lie to the left of the
    /// direction of travel, negative values to the right.
    #[must_use]
    pub fn side(&self, p: &Point) -> f64 {
        (self.start.x - p.x) * (self.end.y - p.y) - (self.start.y - p.y) * (self.end.x - p.x)
    }

    /// Projection parameter of `p` along the segment: `0` at start, `1` at end.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::DegenerateSegment` if the segment has zero length.
    pub fn t_proj(&self, p: &Point) -> Result<f64> {
        if self.is_degenerate() {
            return Err(GeometryError::DegenerateSegment {
                x: self.start.x,
                y: self.start.y,
            }
            .into());
        }
        Ok(((p.x - self.start.x) * self.dx + (p.y - self.start.y) * self.dy) / self.length_squared())
    }

    /// Returns `true` if `p` lies on the closed segment.
    #[must_use]
    pub fn contains_point(&self, p: &Point) -> bool {
        if self.is_degenerate() {
            return self.start.same_xy(p);
        }
        if self.side(p) != 0.0 {
            return false;
        }
        self.t_proj(p).is_ok_and(|t| (0.0..=1.0).contains(&t))
    }

    /// Returns `true` if the two closed segments share at least one point.
    ///
    /// Touching at an endpoint counts as intersecting.
    #[must_use]
    pub fn intersects_segment(&self, other: &Segment) -> bool {
        match (self.is_degenerate(), other.is_degenerate()) {
            (true, true) => return self.start.same_xy(&other.start),
            (true, false) => return other.contains_point(&self.start),
            (false, true) => return self.contains_point(&other.start),
            (false, false) => {}
        }

        let d1 = self.direction();
        let d2 = other.direction();
        match line_line_intersect_2d(&self.start, &d1, &other.start, &d2) {
            Some((t, u)) => (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u),
            None => self.collinear_overlap(other).is_some(),
        }
    }

    /// Computes the shared part of two segments.
    ///
    /// Shared endpoints and endpoints lying on the other segment are reported
    /// exactly as declared; only crossings strictly inside both segments are
    /// interpolated.
    #[must_use]
    pub fn intersection(&self, other: &Segment) -> Option<SegmentIntersection> {
        match (self.is_degenerate(), other.is_degenerate()) {
            (true, true) => {
                return self
                    .start
                    .same_xy(&other.start)
                    .then_some(SegmentIntersection::Point(self.start));
            }
            (true, false) => {
                return other
                    .contains_point(&self.start)
                    .then_some(SegmentIntersection::Point(self.start));
            }
            (false, true) => {
                return self
                    .contains_point(&other.start)
                    .then_some(SegmentIntersection::Point(other.start));
            }
            (false, false) => {}
        }

        let d1 = self.direction();
        let d2 = other.direction();
        if cross_2d(&d1, &d2) == 0.0 {
            return self.collinear_overlap(other);
        }

        // Non-parallel segments meet at most once, so any declared endpoint
        // lying on the other segment is the answer.
        for p in [&self.start, &self.end] {
            if other.contains_point(p) {
                return Some(SegmentIntersection::Point(*p));
            }
        }
        for p in [&other.start, &other.end] {
            if self.contains_point(p) {
                return Some(SegmentIntersection::Point(*p));
            }
        }

        let (t, u) = line_line_intersect_2d(&self.start, &d1, &other.start, &d2)?;
        if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
            Some(SegmentIntersection::Point(point_at(&self.start, &d1, t)))
        } else {
            None
        }
    }

    /// Overlap of two parallel, non-degenerate segments.
    fn collinear_overlap(&self, other: &Segment) -> Option<SegmentIntersection> {
        if self.side(&other.start) != 0.0 || self.side(&other.end) != 0.0 {
            return None;
        }

        let mut shared: Vec<(f64, Point)> = [self.start, self.end, other.start, other.end]
            .into_iter()
            .filter(|p| self.contains_point(p) && other.contains_point(p))
            .filter_map(|p| self.t_proj(&p).ok().map(|t| (t, p)))
            .collect();
        shared.sort_by(|a, b| a.0.total_cmp(&b.0));
        shared.dedup_by(|a, b| a.1.same_xy(&b.1));

        match shared.as_slice() {
            [] => None,
            [(_, p)] => Some(SegmentIntersection::Point(*p)),
            [(_, first), .., (_, last)] => Some(SegmentIntersection::Overlap(*first, *last)),
        }
    }
}
