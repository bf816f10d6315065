use super::{Point, Vector2};

/// Winding direction of a closed point sequence.
///
/// Returns `1` for counter-clockwise, `-1` for clockwise and `0` when the
/// ring has fewer than two non-degenerate edges. Shells are expected to be
/// counter-clockwise and holes clockwise.
///
/// The turning angle at every vertex is carried as a `(cos, sin)` pair from
/// dot and cross products of unit edge vectors, so no inverse trigonometry
/// is involved. A running heading vector is rotated by each turn; every time
/// its sine changes sign the heading has crossed the x-axis, which counts as
/// half a revolution in the direction of the turn.
///
/// The input must be a simple closed ring (first point equal to last); the
/// result is unspecified otherwise.
#[must_use]
pub fn ring_direction(points: &[Point]) -> i32 {
    let units: Vec<Vector2> = points
        .windows(2)
        .filter_map(|w| {
            let d = Vector2::new(w[1].x - w[0].x, w[1].y - w[0].y);
            let len = d.norm();
            (len > 0.0).then(|| d / len)
        })
        .collect();

    let size = units.len();
    if size < 2 {
        return 0;
    }

    let mut heading = Vector2::new(1.0, 0.0);
    let mut half_turns = 0_i32;

    for i in 0..size {
        let a = &units[i];
        let b = &units[(i + 1) % size];
        let cos = a.dot(b);
        let sin = a.x * b.y - a.y * b.x;
        if sin == 0.0 {
            // Straight on, or an exact reversal whose direction is undefined.
            continue;
        }

        let rotated = Vector2::new(
            heading.x * cos - heading.y * sin,
            heading.x * sin + heading.y * cos,
        );
        if (heading.y < 0.0) != (rotated.y < 0.0) {
            half_turns += if sin > 0.0 { 1 } else { -1 };
        }
        heading = rotated;
    }

    half_turns.signum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&c| Point::from(c)).collect()
    }

    #[test]
    fn ccw_unit_square() {
        let r = ring(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0), (0.0, 0.0)]);
        assert_eq!(ring_direction(&r), 1);
    }

    #[test]
    fn cw_unit_square() {
        let r = ring(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0), (0.0, 0.0)]);
        assert_eq!(ring_direction(&r), -1);
    }

    #[test]
    fn irregular_triangle_both_ways() {
        let mut r = ring(&[(0.3, 0.1), (7.9, 1.7), (2.2, 5.3), (0.3, 0.1)]);
        assert_eq!(ring_direction(&r), 1);
        r.reverse();
        assert_eq!(ring_direction(&r), -1);
    }

    #[test]
    fn concave_ring() {
        // L-shape, counter-clockwise.
        let r = ring(&[
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 1.0),
            (1.0, 1.0),
            (1.0, 4.0),
            (0.0, 4.0),
            (0.0, 0.0),
        ]);
        assert_eq!(ring_direction(&r), 1);
    }

    #[test]
    fn repeated_points_are_skipped() {
        let r = ring(&[
            (0.0, 0.0),
            (1.0, 0.0),
            (1.0, 0.0),
            (1.0, 1.0),
            (0.0, 1.0),
            (0.0, 1.0),
            (0.0, 0.0),
        ]);
        assert_eq!(ring_direction(&r), 1);
    }

    #[test]
    fn degenerate_rings() {
        assert_eq!(ring_direction(&[]), 0);
        assert_eq!(ring_direction(&ring(&[(1.0, 1.0)])), 0);
        assert_eq!(ring_direction(&ring(&[(1.0, 1.0), (1.0, 1.0), (1.0, 1.0)])), 0);
    }

    #[test]
    fn back_and_forth_has_no_direction() {
        let r = ring(&[(0.0, 0.0), (2.0, 0.0), (0.0, 0.0)]);
        assert_eq!(ring_direction(&r), 0);
    }
}
