use crate::math::{Point, Segment};

slotmap::new_key_type! {
    /// Unique identifier for a half-edge in a planar graph.
    pub struct HalfEdgeId;
}

/// One directed half of an undirected graph edge.
///
/// `next` and `prev` link the half-edges bounding the same face; `twin` is
/// the half running the other way along the same edge.
#[derive(Debug, Clone)]
pub struct HalfEdgeData {
    /// The vertex this half-edge leaves from.
    pub origin: Point,
    /// The opposite half of the same edge.
    pub twin: HalfEdgeId,
    /// The following half-edge around the face.
    pub next: HalfEdgeId,
    /// The preceding half-edge around the face.
    pub prev: HalfEdgeId,
}

/// An undirected edge of the graph, represented by the half-edge whose
/// origin is the segment's start.
#[derive(Debug, Clone, Copy)]
pub struct GraphEdge {
    pub segment: Segment,
    pub half_edge: HalfEdgeId,
}
