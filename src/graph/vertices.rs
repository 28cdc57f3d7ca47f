use crate::geometry::point::{Point, Scalar};
use crate::spatial::kd_tree::KDTree;

/// Candidate points collapsed into distinct vertices under a positional
/// tolerance.
#[derive(Clone, Debug)]
pub struct VertexSet {
    pub vertices: Vec<Point>,
    /// `vertex_of[c]` is the vertex id assigned to candidate `c`.
    pub vertex_of: Vec<usize>,
}

impl VertexSet {
    /// Groups every pair of candidates closer than `tolerance` into one
    /// vertex, transitively.
    ///
    /// Each vertex keeps the position of its first candidate and ids follow
    /// first appearance, so candidates listed first (the airports) keep their
    /// exact coordinates.
    pub fn dedup(candidates: &[Point], tolerance: Scalar) -> Self {
        let tree = KDTree::build(candidates);
        let mut groups = DisjointSet::new(candidates.len());
        for (i, point) in candidates.iter().enumerate() {
            for j in tree.within_radius(point, tolerance) {
                if j > i {
                    groups.union(i, j);
                }
            }
        }

        let mut vertices = Vec::new();
        let mut vertex_of = vec![0; candidates.len()];
        let mut root_vertex = vec![None; candidates.len()];
        for (i, point) in candidates.iter().enumerate() {
            let root = groups.find(i);
            let id = *root_vertex[root].get_or_insert_with(|| {
                vertices.push(*point);
                vertices.len() - 1
            });
            vertex_of[i] = id;
        }

        VertexSet {
            vertices,
            vertex_of,
        }
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

struct DisjointSet {
    parent: Vec<usize>,
}

impl DisjointSet {
    fn new(size: usize) -> Self {
        DisjointSet {
            parent: (0..size).collect(),
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            let (low, high) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent[high] = low;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_points_within_tolerance() {
        let candidates = [
            Point::new(1.0, 2.0, 3.0),
            Point::new(4.0, 5.0, 6.0),
            Point::new(1.0 + 1e-11, 2.0, 3.0 - 1e-11),
            Point::new(7.0, 8.0, 9.0),
            Point::new(4.0, 5.0 + 1e-12, 6.0),
        ];
        let set = VertexSet::dedup(&candidates, 1e-9);
        assert_eq!(set.len(), 3);
        assert_eq!(set.vertex_of, vec![0, 1, 0, 2, 1]);
        assert_eq!(set.vertices[0], candidates[0]);
    }

    #[test]
    fn chains_merge_transitively() {
        let candidates = [
            Point::new(0.0, 0.0, 0.0),
            Point::new(0.8e-9, 0.0, 0.0),
            Point::new(1.6e-9, 0.0, 0.0),
        ];
        let set = VertexSet::dedup(&candidates, 1e-9);
        assert_eq!(set.len(), 1);
        assert_eq!(set.vertex_of, vec![0, 0, 0]);
    }

    #[test]
    fn z_axis_is_compared_like_the_others() {
        let candidates = [Point::new(0.0, 0.0, 1.0), Point::new(0.0, 0.0, 1.0 - 5e-10)];
        assert_eq!(VertexSet::dedup(&candidates, 1e-9).len(), 1);
        let apart = [Point::new(0.0, 0.0, 1.0), Point::new(0.0, 0.0, 1.0 + 5e-9)];
        assert_eq!(VertexSet::dedup(&apart, 1e-9).len(), 2);
    }

    #[test]
    fn empty_input() {
        let set = VertexSet::dedup(&[], 1e-9);
        assert!(set.is_empty());
    }
}
