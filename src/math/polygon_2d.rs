use super::{Point, Segment};

/// Classification of a point relative to a closed ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointClassification {
    Inside,
    Outside,
    OnBoundary,
}

/// Classifies `point` against the area enclosed by a closed ring.
///
/// Boundary membership is tested exactly with [`Segment::contains_point`];
/// otherwise a ray is cast towards `+x` and crossings are counted
/// (odd = inside). Orientation of the ring does not matter.
#[must_use]
pub fn classify_point_in_ring(point: &Point, ring: &[Point]) -> PointClassification {
    let mut inside = false;
    for w in ring.windows(2) {
        let (a, b) = (&w[0], &w[1]);
        if Segment::new(*a, *b).contains_point(point) {
            return PointClassification::OnBoundary;
        }
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if point.x < x_cross {
                inside = !inside;
            }
        }
    }
    if inside {
        PointClassification::Inside
    } else {
        PointClassification::Outside
    }
}
