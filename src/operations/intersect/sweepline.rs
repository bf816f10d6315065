use crate::math::{Point, Segment, SegmentIntersection};

/// A point shared by two distinct input segments.
///
/// `index_a < index_b` always holds; both index into the slice the
/// intersector was built from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub index_a: usize,
    pub index_b: usize,
    pub segment_a: Segment,
    pub segment_b: Segment,
    pub point: Point,
}

impl Intersection {
    /// Returns `false` when the point is merely a declared endpoint of both
    /// segments, which is how adjacent segments of a path meet.
    #[must_use]
    pub fn is_proper(&self) -> bool {
        !(self.segment_a.has_endpoint(&self.point) && self.segment_b.has_endpoint(&self.point))
    }

    /// Returns `true` if the point is none of the four declared endpoints.
    #[must_use]
    pub fn is_interior_to_both(&self) -> bool {
        !self.segment_a.has_endpoint(&self.point) && !self.segment_b.has_endpoint(&self.point)
    }
}

/// Finds every intersection among a set of segments.
///
/// Segments are swept in order of their minimum x; only segments whose
/// x-extents overlap the current one stay in the active set, and only those
/// with overlapping y-extents are tested pairwise. The sweep degrades to a
/// quadratic scan when every segment spans the same x-range.
///
/// Output is sorted by `(index_a, index_b)`, so it depends only on the input
/// order. A collinear overlap yields one record for each end of the shared
/// stretch.
#[derive(Debug, Clone)]
pub struct SweeplineIntersector {
    segments: Vec<Segment>,
}

impl SweeplineIntersector {
    /// Creates an intersector over the given segments.
    #[must_use]
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// The input segments, in input order.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// All intersection records, including plain endpoint adjacency.
    #[must_use]
    pub fn intersections(&self) -> Vec<Intersection> {
        let segs = &self.segments;
        let mut order: Vec<usize> = (0..segs.len()).collect();
        order.sort_by(|&a, &b| segs[a].min_x().total_cmp(&segs[b].min_x()).then(a.cmp(&b)));

        let mut active: Vec<usize> = Vec::new();
        let mut found = Vec::new();

        for &i in &order {
            let current = &segs[i];
            active.retain(|&j| segs[j].max_x() >= current.min_x());

            for &j in &active {
                let other = &segs[j];
                if other.max_y() < current.min_y() || other.min_y() > current.max_y() {
                    continue;
                }
                let (a, b) = if j < i { (j, i) } else { (i, j) };
                let record = |point: Point| Intersection {
                    index_a: a,
                    index_b: b,
                    segment_a: segs[a],
                    segment_b: segs[b],
                    point,
                };
                match segs[a].intersection(&segs[b]) {
                    Some(SegmentIntersection::Point(p)) => found.push(record(p)),
                    Some(SegmentIntersection::Overlap(p, q)) => {
                        found.push(record(p));
                        found.push(record(q));
                    }
                    None => {}
                }
            }

            active.push(i);
        }

        found.sort_by(|x, y| x.index_a.cmp(&y.index_a).then(x.index_b.cmp(&y.index_b)));
        found
    }

    /// Intersection records excluding points that are a declared endpoint of
    /// both involved segments.
    #[must_use]
    pub fn proper_intersections(&self) -> Vec<Intersection> {
        self.intersections()
            .into_iter()
            .filter(Intersection::is_proper)
            .collect()
    }
}
