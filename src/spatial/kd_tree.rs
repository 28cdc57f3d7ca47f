use crate::geometry::point::{Point, Scalar};

/// Node in a 3D k-d tree.
#[derive(Debug, Clone)]
pub struct KDNode {
    pub point: [Scalar; 3],
    pub index: usize,
    pub axis: usize,
    pub left: Option<Box<KDNode>>,
    pub right: Option<Box<KDNode>>,
}

/// 3D k-d tree answering "everything within this distance" queries, used to
/// find candidate vertices that share a position.
#[derive(Debug, Clone)]
pub struct KDTree {
    pub root: Option<Box<KDNode>>,
}

impl KDTree {
    pub fn build(points: &[Point]) -> Self {
        let coords: Vec<[Scalar; 3]> = points.iter().map(|p| p.to_array()).collect();
        let mut indices: Vec<usize> = (0..coords.len()).collect();
        let root = Self::build_recursive(&coords, &mut indices, 0);
        KDTree { root }
    }

    fn build_recursive(
        points: &[[Scalar; 3]],
        idx: &mut [usize],
        depth: usize,
    ) -> Option<Box<KDNode>> {
        if idx.is_empty() {
            return None;
        }

        let axis = depth % 3;
        idx.sort_by(|&a, &b| points[a][axis].total_cmp(&points[b][axis]));
        let mid = idx.len() / 2;
        let median = idx[mid];

        let (left, rest) = idx.split_at_mut(mid);
        Some(Box::new(KDNode {
            point: points[median],
            index: median,
            axis,
            left: Self::build_recursive(points, left, depth + 1),
            right: Self::build_recursive(points, &mut rest[1..], depth + 1),
        }))
    }

    /// Indices of all points within Euclidean `radius` of `target`, sorted
    /// ascending by index.
    pub fn within_radius(&self, target: &Point, radius: Scalar) -> Vec<usize> {
        let mut results = Vec::new();
        Self::search_recursive(&self.root, target.to_array(), radius * radius, &mut results);
        results.sort_unstable();
        results
    }

    fn search_recursive(
        node: &Option<Box<KDNode>>,
        target: [Scalar; 3],
        radius2: Scalar,
        results: &mut Vec<usize>,
    ) {
        if let Some(noderef) = node {
            let dx = noderef.point[0] - target[0];
            let dy = noderef.point[1] - target[1];
            let dz = noderef.point[2] - target[2];
            if dx * dx + dy * dy + dz * dz <= radius2 {
                results.push(noderef.index);
            }

            let axis = noderef.axis;
            let delta = target[axis] - noderef.point[axis];
            let (first, second) = if delta < 0.0 {
                (&noderef.left, &noderef.right)
            } else {
                (&noderef.right, &noderef.left)
            };

            Self::search_recursive(first, target, radius2, results);
            if delta * delta <= radius2 {
                Self::search_recursive(second, target, radius2, results);
            }
        }
    }
}
