use std::cmp::Ordering;

use crate::math::Point;

/// Map key identifying a graph vertex by its X/Y pair.
///
/// Equality and ordering agree with each other: `-0.0` is folded into `0.0`
/// and the remaining values are compared with `total_cmp`.
#[derive(Debug, Clone, Copy)]
pub struct VertexKey {
    x: f64,
    y: f64,
}

impl VertexKey {
    /// Creates the key of `point`, ignoring Z and M.
    #[must_use]
    pub fn new(point: &Point) -> Self {
        Self {
            x: point.x + 0.0,
            y: point.y + 0.0,
        }
    }

    /// The 2D point this key stands for.
    #[must_use]
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl PartialEq for VertexKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for VertexKey {}

impl PartialOrd for VertexKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for VertexKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
    }
}
