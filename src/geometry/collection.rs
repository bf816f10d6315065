use crate::math::Point;

use super::{Geometry, LineString, Polygon, ValidityCache};

/// A set of points.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPoint {
    points: Vec<Point>,
    validity: ValidityCache,
}

impl MultiPoint {
    #[must_use]
    pub fn new(points: Vec<Point>) -> Self {
        Self {
            points,
            validity: ValidityCache::default(),
        }
    }

    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub(crate) fn validity_cache(&self) -> &ValidityCache {
        &self.validity
    }
}

/// A set of line strings.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiLineString {
    line_strings: Vec<LineString>,
    validity: ValidityCache,
}

impl MultiLineString {
    #[must_use]
    pub fn new(line_strings: Vec<LineString>) -> Self {
        Self {
            line_strings,
            validity: ValidityCache::default(),
        }
    }

    #[must_use]
    pub fn line_strings(&self) -> &[LineString] {
        &self.line_strings
    }

    pub(crate) fn validity_cache(&self) -> &ValidityCache {
        &self.validity
    }
}

/// A set of polygons.
#[derive(Debug, Clone, PartialEq)]
pub struct MultiPolygon {
    polygons: Vec<Polygon>,
    validity: ValidityCache,
}

impl MultiPolygon {
    #[must_use]
    pub fn new(polygons: Vec<Polygon>) -> Self {
        Self {
            polygons,
            validity: ValidityCache::default(),
        }
    }

    #[must_use]
    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub(crate) fn validity_cache(&self) -> &ValidityCache {
        &self.validity
    }
}

/// A heterogeneous set of geometries.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryCollection {
    geometries: Vec<Geometry>,
    validity: ValidityCache,
}

impl GeometryCollection {
    #[must_use]
    pub fn new(geometries: Vec<Geometry>) -> Self {
        Self {
            geometries,
            validity: ValidityCache::default(),
        }
    }

    #[must_use]
    pub fn geometries(&self) -> &[Geometry] {
        &self.geometries
    }

    pub(crate) fn validity_cache(&self) -> &ValidityCache {
        &self.validity
    }
}
