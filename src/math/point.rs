use std::fmt;

/// A planar coordinate with optional Z and M ordinates.
///
/// Equality compares every ordinate. Topological code (graph vertices, ring
/// closure) compares the X/Y pair only, see [`Point::same_xy`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
    pub m: Option<f64>,
}

impl Point {
    /// Creates a 2D point.
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            z: None,
            m: None,
        }
    }

    /// Creates a point carrying a Z ordinate.
    #[must_use]
    pub fn with_z(x: f64, y: f64, z: f64) -> Self {
        Self {
            x,
            y,
            z: Some(z),
            m: None,
        }
    }

    /// Creates a point carrying both Z and M ordinates.
    #[must_use]
    pub fn with_zm(x: f64, y: f64, z: f64, m: f64) -> Self {
        Self {
            x,
            y,
            z: Some(z),
            m: Some(m),
        }
    }

    /// Returns `true` if every present ordinate is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.z.is_none_or(f64::is_finite)
            && self.m.is_none_or(f64::is_finite)
    }

    /// Returns `true` if both points share the same X/Y pair.
    #[must_use]
    pub fn same_xy(&self, other: &Point) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// Drops Z and M.
    #[must_use]
    pub fn xy(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Midpoint of the X/Y pair.
    #[must_use]
    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) * 0.5, (self.y + other.y) * 0.5)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
