use super::{LinearRing, ValidityCache};

/// A planar area bounded by one exterior ring (shell) and zero or more
/// interior rings (holes).
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    exterior: LinearRing,
    interiors: Vec<LinearRing>,
    validity: ValidityCache,
}

impl Polygon {
    /// Creates a polygon from its shell and holes.
    #[must_use]
    pub fn new(exterior: LinearRing, interiors: Vec<LinearRing>) -> Self {
        Self {
            exterior,
            interiors,
            validity: ValidityCache::default(),
        }
    }

    /// The exterior boundary (shell).
    #[must_use]
    pub fn exterior_ring(&self) -> &LinearRing {
        &self.exterior
    }

    /// The interior boundaries (holes).
    #[must_use]
    pub fn interior_rings(&self) -> &[LinearRing] {
        &self.interiors
    }

    /// The shell followed by every hole.
    pub fn rings(&self) -> impl Iterator<Item = &LinearRing> {
        std::iter::once(&self.exterior).chain(&self.interiors)
    }

    pub(crate) fn validity_cache(&self) -> &ValidityCache {
        &self.validity
    }
}
