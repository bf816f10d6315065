use crate::math::Segment;

use super::sweepline::{Intersection, SweeplineIntersector};

/// Returns `true` if two boundaries cross each other.
///
/// All intersections of the combined segment set are computed; records
/// between two segments of the same boundary are that boundary's own
/// self-intersections and are discarded. A remaining record whose point is
/// none of the four involved endpoints is a crossing. Touching at a vertex is
/// not a crossing.
#[must_use]
pub fn boundaries_cross(a: &[Segment], b: &[Segment]) -> bool {
    let split = a.len();
    let mut combined = Vec::with_capacity(a.len() + b.len());
    combined.extend_from_slice(a);
    combined.extend_from_slice(b);

    SweeplineIntersector::new(combined)
        .proper_intersections()
        .iter()
        .filter(|hit| (hit.index_a < split) != (hit.index_b < split))
        .any(Intersection::is_interior_to_both)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{LinearRing, PointSequence};

    fn ring(coords: &[(f64, f64)]) -> Vec<Segment> {
        coords.iter().copied().collect::<LinearRing>().segments()
    }

    #[test]
    fn overlapping_squares_cross() {
        let a = ring(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]);
        let b = ring(&[(5.0, 5.0), (15.0, 5.0), (15.0, 15.0), (5.0, 15.0), (5.0, 5.0)]);
        assert!(boundaries_cross(&a, &b));
    }

    #[test]
    fn touching_at_vertex_does_not_cross() {
        let shell = ring(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]);
        let hole = ring(&[(5.0, 0.0), (3.0, 5.0), (7.0, 5.0), (5.0, 0.0)]);
        assert!(!boundaries_cross(&shell, &hole));
    }

    #[test]
    fn self_intersection_of_one_side_is_ignored() {
        let bowtie = ring(&[(0.0, 0.0), (10.0, 10.0), (10.0, 0.0), (0.0, 10.0), (0.0, 0.0)]);
        let far = ring(&[(20.0, 20.0), (30.0, 20.0), (30.0, 30.0), (20.0, 20.0)]);
        assert!(!boundaries_cross(&bowtie, &far));
    }

    #[test]
    fn nested_rings_do_not_cross() {
        let outer = ring(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]);
        let inner = ring(&[(2.0, 2.0), (2.0, 8.0), (8.0, 8.0), (8.0, 2.0), (2.0, 2.0)]);
        assert!(!boundaries_cross(&outer, &inner));
    }
}
