use std::collections::BTreeMap;

use slotmap::SlotMap;
use tracing::{debug, trace};

use crate::error::{Result, TopologyError};
use crate::math::{Point, Segment};
use crate::operations::intersect::SweeplineIntersector;

use super::half_edge::{GraphEdge, HalfEdgeData, HalfEdgeId};
use super::vertex::VertexKey;

/// A planar graph stored as a doubly-connected edge list.
///
/// Half-edges live in an arena and reference each other through
/// [`HalfEdgeId`]s. Every edge insertion splits existing and new edges at
/// their mutual intersections and relinks the face cycles, so that after any
/// mutation following `next` from a half-edge always returns to it.
#[derive(Debug, Default)]
pub struct PlanarGraph {
    half_edges: SlotMap<HalfEdgeId, HalfEdgeData>,
    edges: Vec<GraphEdge>,
    incident: BTreeMap<VertexKey, Vec<HalfEdgeId>>,
}

impl PlanarGraph {
    /// Creates a new, empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a graph from a set of segments.
    ///
    /// # Errors
    ///
    /// Returns an error if the half-edge arena becomes inconsistent.
    pub fn from_segments(segments: impl IntoIterator<Item = Segment>) -> Result<Self> {
        let mut graph = Self::new();
        graph.add_edges(segments)?;
        Ok(graph)
    }

    // --- Queries ---

    /// Returns the half-edge data, or an error if the id is stale.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::EntityNotFound` if the id is not in the arena.
    pub fn half_edge(&self, id: HalfEdgeId) -> Result<&HalfEdgeData> {
        Ok(self
            .half_edges
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("half-edge".into()))?)
    }

    /// The point a half-edge leads to (its twin's origin).
    ///
    /// # Errors
    ///
    /// Returns an error if the half-edge or its twin is missing.
    pub fn destination(&self, id: HalfEdgeId) -> Result<Point> {
        let twin = self.half_edge(id)?.twin;
        Ok(self.half_edge(twin)?.origin)
    }

    /// Half-edges leaving `point`, ordered by outbound angle.
    #[must_use]
    pub fn incident_edges(&self, point: &Point) -> &[HalfEdgeId] {
        self.incident
            .get(&VertexKey::new(point))
            .map_or(&[][..], Vec::as_slice)
    }

    /// Every vertex with at least one incident half-edge.
    pub fn vertices(&self) -> impl Iterator<Item = Point> + '_ {
        self.incident.keys().map(VertexKey::point)
    }

    /// Number of distinct vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.incident.len()
    }

    /// Number of undirected edges after splitting.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of half-edges (twice the edge count).
    #[must_use]
    pub fn half_edge_count(&self) -> usize {
        self.half_edges.len()
    }

    /// The current, split segment set.
    pub fn segments(&self) -> impl Iterator<Item = &Segment> + '_ {
        self.edges.iter().map(|e| &e.segment)
    }

    /// Every half-edge id in the arena.
    pub fn half_edge_ids(&self) -> impl Iterator<Item = HalfEdgeId> + '_ {
        self.half_edges.keys()
    }

    /// Walks `next` links from `start` until it comes back.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::OpenCycle` if the walk does not close within
    /// the number of half-edges in the graph.
    pub fn face_cycle(&self, start: HalfEdgeId) -> Result<Vec<HalfEdgeId>> {
        let limit = self.half_edges.len();
        let mut cycle = vec![start];
        let mut current = self.half_edge(start)?.next;
        while current != start {
            if cycle.len() >= limit {
                return Err(TopologyError::OpenCycle(limit).into());
            }
            cycle.push(current);
            current = self.half_edge(current)?.next;
        }
        Ok(cycle)
    }

    /// The origins visited by the face cycle of `start`, closed by repeating
    /// the first point.
    ///
    /// # Errors
    ///
    /// Returns an error if the cycle does not close.
    pub fn face_ring(&self, start: HalfEdgeId) -> Result<Vec<Point>> {
        let cycle = self.face_cycle(start)?;
        let mut points = Vec::with_capacity(cycle.len() + 1);
        for id in &cycle {
            points.push(self.half_edge(*id)?.origin);
        }
        if let Some(first) = points.first().copied() {
            points.push(first);
        }
        Ok(points)
    }

    /// Checks the twin and cycle invariants of every half-edge.
    ///
    /// # Errors
    ///
    /// Returns `TopologyError::InvalidTopology` for a broken twin link and
    /// `TopologyError::OpenCycle` for a face cycle that does not close.
    pub fn validate_cycles(&self) -> Result<()> {
        for (id, he) in &self.half_edges {
            if self.half_edge(he.twin)?.twin != id {
                return Err(TopologyError::InvalidTopology("twin of twin is not self".into()).into());
            }
            if self.half_edge(he.next)?.prev != id {
                return Err(TopologyError::InvalidTopology("next.prev is not self".into()).into());
            }
            self.face_cycle(id)?;
        }
        Ok(())
    }

    // --- Mutation ---

    /// Adds one segment, see [`PlanarGraph::add_edges`].
    ///
    /// # Errors
    ///
    /// Returns an error if the half-edge arena becomes inconsistent.
    pub fn add_edge(&mut self, segment: Segment) -> Result<()> {
        self.add_edges(std::iter::once(segment))
    }

    /// Adds segments, splits every edge at its proper intersections with the
    /// whole edge set and relinks all face cycles.
    ///
    /// Degenerate segments are not inserted. Half-edges anchored at an
    /// original segment endpoint keep their id across splits.
    ///
    /// # Errors
    ///
    /// Returns an error if the half-edge arena becomes inconsistent.
    pub fn add_edges(&mut self, segments: impl IntoIterator<Item = Segment>) -> Result<()> {
        let before = self.edges.len();
        for segment in segments {
            if segment.is_degenerate() {
                trace!(point = %segment.start(), "skipping degenerate segment");
                continue;
            }
            let half_edge = self.insert_pair(*segment.start(), *segment.end());
            self.edges.push(GraphEdge { segment, half_edge });
        }
        if self.edges.len() == before {
            return Ok(());
        }
        self.split_at_intersections()?;
        self.link()
    }

    fn insert_half_edge(&mut self, origin: Point) -> HalfEdgeId {
        let id = self.half_edges.insert_with_key(|k| HalfEdgeData {
            origin,
            twin: k,
            next: k,
            prev: k,
        });
        self.incident.entry(VertexKey::new(&origin)).or_default().push(id);
        id
    }

    fn pair(&mut self, a: HalfEdgeId, b: HalfEdgeId) -> Result<()> {
        self.half_edge_mut(a)?.twin = b;
        self.half_edge_mut(b)?.twin = a;
        Ok(())
    }

    /// Inserts both halves of the edge `start -> end` and returns the half
    /// leaving `start`.
    fn insert_pair(&mut self, start: Point, end: Point) -> HalfEdgeId {
        let forward = self.insert_half_edge(start);
        let backward = self.insert_half_edge(end);
        if let Some(he) = self.half_edges.get_mut(forward) {
            he.twin = backward;
        }
        if let Some(he) = self.half_edges.get_mut(backward) {
            he.twin = forward;
        }
        forward
    }

    fn half_edge_mut(&mut self, id: HalfEdgeId) -> Result<&mut HalfEdgeData> {
        Ok(self
            .half_edges
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("half-edge".into()))?)
    }

    fn split_at_intersections(&mut self) -> Result<()> {
        let segments: Vec<Segment> = self.segments().copied().collect();
        let hits = SweeplineIntersector::new(segments).proper_intersections();

        let mut split_points: BTreeMap<usize, Vec<Point>> = BTreeMap::new();
        for hit in &hits {
            for (index, segment) in [(hit.index_a, &hit.segment_a), (hit.index_b, &hit.segment_b)] {
                if !segment.has_endpoint(&hit.point) {
                    split_points.entry(index).or_default().push(hit.point.xy());
                }
            }
        }
        if split_points.is_empty() {
            return Ok(());
        }

        debug!(
            edges = split_points.len(),
            intersections = hits.len(),
            "splitting planar graph edges"
        );
        // Splitting rewrites the edge in place and appends the rest, so the
        // indices of edges not yet visited stay valid.
        for (index, points) in split_points {
            self.split_edge(index, points)?;
        }
        Ok(())
    }

    /// Splits edge `index` at `interior` points lying on it.
    fn split_edge(&mut self, index: usize, mut interior: Vec<Point>) -> Result<()> {
        let GraphEdge { segment, half_edge: head } = *self
            .edges
            .get(index)
            .ok_or_else(|| TopologyError::EntityNotFound(format!("edge {index}")))?;
        let tail = self.half_edge(head)?.twin;
        let (start, end) = (*segment.start(), *segment.end());

        // Descending y, then ascending x, orders points along any segment.
        let along = |a: &Point, b: &Point| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x));
        interior.sort_by(along);
        interior.dedup_by(|a, b| a.same_xy(b));
        interior.retain(|p| !segment.has_endpoint(p));
        if interior.is_empty() {
            return Ok(());
        }
        if along(&start, &end).is_gt() {
            interior.reverse();
        }

        let mut chain = Vec::with_capacity(interior.len() + 2);
        chain.push(start);
        chain.extend(interior);
        chain.push(end);
        let n = chain.len();

        let head_twin = self.insert_half_edge(chain[1]);
        self.pair(head, head_twin)?;
        self.edges[index] = GraphEdge {
            segment: Segment::new(chain[0], chain[1]),
            half_edge: head,
        };

        for w in chain[1..n - 1].windows(2) {
            let half_edge = self.insert_pair(w[0], w[1]);
            self.edges.push(GraphEdge {
                segment: Segment::new(w[0], w[1]),
                half_edge,
            });
        }

        let tail_twin = self.insert_half_edge(chain[n - 2]);
        self.pair(tail_twin, tail)?;
        self.edges.push(GraphEdge {
            segment: Segment::new(chain[n - 2], chain[n - 1]),
            half_edge: tail_twin,
        });

        trace!(index, pieces = n - 1, "split edge");
        Ok(())
    }

    /// Sorts the half-edges around every vertex by outbound angle and links
    /// neighbours: for consecutive `(e[i], e[i + 1])`, `e[i].prev` becomes
    /// `e[i + 1].twin` and `e[i + 1].twin.next` becomes `e[i]`, wrapping
    /// around. A lone half-edge links to its own twin.
    fn link(&mut self) -> Result<()> {
        let mut ordered: Vec<Vec<HalfEdgeId>> = Vec::with_capacity(self.incident.len());
        for list in self.incident.values() {
            let mut keyed = Vec::with_capacity(list.len());
            for &id in list {
                let origin = self.half_edge(id)?.origin;
                let dest = self.destination(id)?;
                keyed.push(((dest.y - origin.y).atan2(dest.x - origin.x), id));
            }
            keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
            ordered.push(keyed.into_iter().map(|(_, id)| id).collect());
        }

        for (list, sorted) in self.incident.values_mut().zip(&ordered) {
            list.clone_from(sorted);
        }

        for around in &ordered {
            let k = around.len();
            for i in 0..k {
                let current = around[i];
                let following = around[(i + 1) % k];
                let incoming = self.half_edge(following)?.twin;
                self.half_edge_mut(current)?.prev = incoming;
                self.half_edge_mut(incoming)?.next = current;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn seg(x0: f64, y0: f64, x1: f64, y1: f64) -> Segment {
        Segment::new(Point::new(x0, y0), Point::new(x1, y1))
    }

    fn square() -> Vec<Segment> {
        vec![
            seg(0.0, 0.0, 10.0, 0.0),
            seg(10.0, 0.0, 10.0, 10.0),
            seg(10.0, 10.0, 0.0, 10.0),
            seg(0.0, 10.0, 0.0, 0.0),
        ]
    }

    #[test]
    fn square_has_two_faces() {
        let graph = PlanarGraph::from_segments(square()).unwrap();
        assert_eq!(graph.vertex_count(), 4);
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.half_edge_count(), 8);
        assert!(graph.vertices().any(|p| p == Point::new(10.0, 10.0)));
        graph.validate_cycles().unwrap();

        let start = graph.incident_edges(&Point::new(0.0, 0.0))[0];
        assert_eq!(graph.destination(start).unwrap(), Point::new(10.0, 0.0));
        let ring = graph.face_ring(start).unwrap();
        assert_eq!(
            ring,
            vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(10.0, 10.0),
                Point::new(0.0, 10.0),
                Point::new(0.0, 0.0),
            ]
        );
    }

    #[test]
    fn dangling_edge_self_links() {
        let graph = PlanarGraph::from_segments(vec![seg(0.0, 0.0, 3.0, 4.0)]).unwrap();
        let he = graph.incident_edges(&Point::new(0.0, 0.0))[0];
        let data = graph.half_edge(he).unwrap();
        let twin = graph.half_edge(data.twin).unwrap();
        assert_eq!(twin.next, he);
        assert_eq!(data.prev, data.twin);
        assert_eq!(graph.face_cycle(he).unwrap().len(), 2);
    }

    #[test]
    fn crossing_edges_are_split() {
        let graph = PlanarGraph::from_segments(vec![
            seg(0.0, 0.0, 10.0, 10.0),
            seg(0.0, 10.0, 10.0, 0.0),
        ])
        .unwrap();
        assert_eq!(graph.vertex_count(), 5);
        assert_eq!(graph.edge_count(), 4);
        assert_eq!(graph.incident_edges(&Point::new(5.0, 5.0)).len(), 4);
        graph.validate_cycles().unwrap();
    }

    #[test]
    fn endpoint_half_edges_survive_split() {
        let mut graph = PlanarGraph::from_segments(vec![seg(0.0, 0.0, 10.0, 0.0)]).unwrap();
        let anchored = graph.incident_edges(&Point::new(0.0, 0.0))[0];
        let far = graph.incident_edges(&Point::new(10.0, 0.0))[0];

        graph
            .add_edges(vec![seg(2.5, -1.0, 2.5, 1.0), seg(7.5, -1.0, 7.5, 1.0)])
            .unwrap();

        assert_eq!(graph.half_edge(anchored).unwrap().origin, Point::new(0.0, 0.0));
        assert_eq!(graph.destination(anchored).unwrap(), Point::new(2.5, 0.0));
        assert_eq!(graph.destination(far).unwrap(), Point::new(7.5, 0.0));
        assert_eq!(graph.edge_count(), 7);
        graph.validate_cycles().unwrap();
    }

    #[test]
    fn t_junction_splits_only_the_crossed_edge() {
        let mut graph = PlanarGraph::from_segments(square()).unwrap();
        graph.add_edge(seg(5.0, 0.0, 5.0, 5.0)).unwrap();
        assert_eq!(graph.vertex_count(), 6);
        assert_eq!(graph.edge_count(), 6);
        assert_eq!(graph.incident_edges(&Point::new(5.0, 0.0)).len(), 3);
        graph.validate_cycles().unwrap();
    }

    #[test]
    fn degenerate_segments_are_skipped() {
        let graph = PlanarGraph::from_segments(vec![seg(1.0, 1.0, 1.0, 1.0)]).unwrap();
        assert_eq!(graph.vertex_count(), 0);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn incident_edges_sorted_by_angle() {
        let graph = PlanarGraph::from_segments(vec![
            seg(0.0, 0.0, 0.0, 1.0),
            seg(0.0, 0.0, -1.0, 0.0),
            seg(0.0, 0.0, 1.0, 0.0),
        ])
        .unwrap();
        let dests: Vec<Point> = graph
            .incident_edges(&Point::new(0.0, 0.0))
            .iter()
            .map(|&id| graph.destination(id).unwrap())
            .collect();
        assert_eq!(
            dests,
            vec![Point::new(1.0, 0.0), Point::new(0.0, 1.0), Point::new(-1.0, 0.0)]
        );
    }
}
