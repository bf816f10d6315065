pub mod geometry_graph;
pub mod half_edge;
pub mod planar_graph;
pub mod vertex;

pub use geometry_graph::{BoundaryReference, GeometryGraph};
pub use half_edge::{GraphEdge, HalfEdgeData, HalfEdgeId};
pub use planar_graph::PlanarGraph;
pub use vertex::VertexKey;
