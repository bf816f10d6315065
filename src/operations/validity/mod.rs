mod checker;
mod reason;

pub use checker::{
    check_collection, check_geometry, check_line_string, check_linear_ring, check_multi_line_string,
    check_multi_point, check_multi_polygon, check_point, check_polygon, ValidityChecker,
};
pub use reason::InvalidityReason;

use tracing::debug;

use crate::error::Result;
use crate::geometry::{
    Geometry, GeometryCollection, LineString, LinearRing, MultiLineString, MultiPoint,
    MultiPolygon, Polygon, ValidityCache,
};
use crate::math::Point;

/// Topological validity of a geometry.
///
/// Results are memoized per geometry instance: the first successful
/// evaluation is stored and returned by every later call. Errors are not
/// memoized.
pub trait Validate {
    /// The first rule the geometry violates, or `None` if it is valid.
    ///
    /// # Errors
    ///
    /// Returns `ValidityError::NotImplemented` when a required check is not
    /// available, and propagates graph construction errors.
    fn invalid_reason(&self) -> Result<Option<InvalidityReason>>;

    /// Returns `true` if the geometry violates no rule.
    ///
    /// # Errors
    ///
    /// See [`Validate::invalid_reason`].
    fn is_valid(&self) -> Result<bool> {
        Ok(self.invalid_reason()?.is_none())
    }
}

fn memoized(
    cache: &ValidityCache,
    check: impl FnOnce() -> Result<Option<InvalidityReason>>,
) -> Result<Option<InvalidityReason>> {
    if let Some(reason) = cache.get() {
        return Ok(reason);
    }
    let reason = check()?;
    if let Some(reason) = reason {
        debug!(%reason, "geometry is invalid");
    }
    Ok(cache.store(reason))
}

impl Validate for Point {
    fn invalid_reason(&self) -> Result<Option<InvalidityReason>> {
        Ok(check_point(self))
    }
}

impl Validate for LineString {
    fn invalid_reason(&self) -> Result<Option<InvalidityReason>> {
        memoized(self.validity_cache(), || Ok(check_line_string(self)))
    }
}

impl Validate for LinearRing {
    fn invalid_reason(&self) -> Result<Option<InvalidityReason>> {
        memoized(self.validity_cache(), || Ok(check_linear_ring(self)))
    }
}

impl Validate for Polygon {
    fn invalid_reason(&self) -> Result<Option<InvalidityReason>> {
        memoized(self.validity_cache(), || check_polygon(self))
    }
}

impl Validate for MultiPoint {
    fn invalid_reason(&self) -> Result<Option<InvalidityReason>> {
        memoized(self.validity_cache(), || Ok(check_multi_point(self)))
    }
}

impl Validate for MultiLineString {
    fn invalid_reason(&self) -> Result<Option<InvalidityReason>> {
        memoized(self.validity_cache(), || Ok(check_multi_line_string(self)))
    }
}

impl Validate for MultiPolygon {
    fn invalid_reason(&self) -> Result<Option<InvalidityReason>> {
        memoized(self.validity_cache(), || check_multi_polygon(self))
    }
}

impl Validate for GeometryCollection {
    fn invalid_reason(&self) -> Result<Option<InvalidityReason>> {
        memoized(self.validity_cache(), || check_collection(self))
    }
}

impl Validate for Geometry {
    fn invalid_reason(&self) -> Result<Option<InvalidityReason>> {
        match self {
            Geometry::Point(g) => g.invalid_reason(),
            Geometry::LineString(g) => g.invalid_reason(),
            Geometry::LinearRing(g) => g.invalid_reason(),
            Geometry::Polygon(g) => g.invalid_reason(),
            Geometry::MultiPoint(g) => g.invalid_reason(),
            Geometry::MultiLineString(g) => g.invalid_reason(),
            Geometry::MultiPolygon(g) => g.invalid_reason(),
            Geometry::GeometryCollection(g) => g.invalid_reason(),
        }
    }
}
