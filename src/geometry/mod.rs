pub mod collection;
pub mod line_string;
pub mod polygon;

pub use collection::{GeometryCollection, MultiLineString, MultiPoint, MultiPolygon};
pub use line_string::{LineString, LinearRing, PointSequence};
pub use polygon::Polygon;

use std::sync::OnceLock;

use crate::math::Point;
use crate::operations::validity::InvalidityReason;

/// Kind tag used to dispatch geometry-specific behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Point,
    LineString,
    LinearRing,
    Polygon,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    GeometryCollection,
}

/// Any planar geometry handled by the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Point),
    LineString(LineString),
    LinearRing(LinearRing),
    Polygon(Polygon),
    MultiPoint(MultiPoint),
    MultiLineString(MultiLineString),
    MultiPolygon(MultiPolygon),
    GeometryCollection(GeometryCollection),
}

impl Geometry {
    /// Returns the kind tag of this geometry.
    #[must_use]
    pub fn kind(&self) -> GeometryKind {
        match self {
            Geometry::Point(_) => GeometryKind::Point,
            Geometry::LineString(_) => GeometryKind::LineString,
            Geometry::LinearRing(_) => GeometryKind::LinearRing,
            Geometry::Polygon(_) => GeometryKind::Polygon,
            Geometry::MultiPoint(_) => GeometryKind::MultiPoint,
            Geometry::MultiLineString(_) => GeometryKind::MultiLineString,
            Geometry::MultiPolygon(_) => GeometryKind::MultiPolygon,
            Geometry::GeometryCollection(_) => GeometryKind::GeometryCollection,
        }
    }
}

impl From<Point> for Geometry {
    fn from(value: Point) -> Self {
        Geometry::Point(value)
    }
}

impl From<LineString> for Geometry {
    fn from(value: LineString) -> Self {
        Geometry::LineString(value)
    }
}

impl From<LinearRing> for Geometry {
    fn from(value: LinearRing) -> Self {
        Geometry::LinearRing(value)
    }
}

impl From<Polygon> for Geometry {
    fn from(value: Polygon) -> Self {
        Geometry::Polygon(value)
    }
}

impl From<MultiPoint> for Geometry {
    fn from(value: MultiPoint) -> Self {
        Geometry::MultiPoint(value)
    }
}

impl From<MultiLineString> for Geometry {
    fn from(value: MultiLineString) -> Self {
        Geometry::MultiLineString(value)
    }
}

impl From<MultiPolygon> for Geometry {
    fn from(value: MultiPolygon) -> Self {
        Geometry::MultiPolygon(value)
    }
}

impl From<GeometryCollection> for Geometry {
    fn from(value: GeometryCollection) -> Self {
        Geometry::GeometryCollection(value)
    }
}

/// Single-assignment slot holding a geometry's computed invalidity reason.
///
/// Ignored by equality. Concurrent first evaluations may both compute the
/// reason; the first write wins and later writes are dropped.
#[derive(Debug, Clone, Default)]
pub struct ValidityCache(OnceLock<Option<InvalidityReason>>);

impl ValidityCache {
    pub(crate) fn get(&self) -> Option<Option<InvalidityReason>> {
        self.0.get().copied()
    }

    pub(crate) fn store(&self, reason: Option<InvalidityReason>) -> Option<InvalidityReason> {
        let _ = self.0.set(reason);
        self.0.get().copied().unwrap_or(reason)
    }
}

impl PartialEq for ValidityCache {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}
