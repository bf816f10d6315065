pub mod intersect_2d;
pub mod orientation;
pub mod point;
pub mod polygon_2d;
pub mod segment;

pub use orientation::ring_direction;
pub use point::Point;
pub use segment::{Segment, SegmentIntersection};

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// Tolerance for comparing derived floating-point values in tests and
/// diagnostics. Topological predicates themselves are exact.
pub const TOLERANCE: f64 = 1e-10;
