use std::fmt;

/// Why a geometry is not valid.
///
/// A check that finds nothing wrong returns `None` instead of a reason.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidityReason {
    InvalidCoordinate,
    TooFewPoints,
    UnclosedRing,
    RingSelfIntersection,
    SelfIntersection,
    DuplicateRings,
    HoleOutsideShell,
    NestedHoles,
    DisconnectedInterior,
    NestedShells,
    UnknownValidity,
}

impl InvalidityReason {
    /// Human-readable description, stable across releases.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::InvalidCoordinate => "Invalid Coordinate",
            Self::TooFewPoints => "Too few distinct points",
            Self::UnclosedRing => "Ring is not closed",
            Self::RingSelfIntersection => "Ring Self-intersection",
            Self::SelfIntersection => "Self-intersection",
            Self::DuplicateRings => "Duplicate Rings",
            Self::HoleOutsideShell => "Hole lies outside shell",
            Self::NestedHoles => "Holes are nested",
            Self::DisconnectedInterior => "Interior is disconnected",
            Self::NestedShells => "Nested shells",
            Self::UnknownValidity => "Unknown Validity",
        }
    }
}

impl fmt::Display for InvalidityReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}
