use serde::{Deserialize, Serialize};

use crate::geometry::point::Scalar;
use crate::graph::matrix::DistanceMatrix;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PathStep {
    pub airport_index: usize,
    /// Distance flown from the start of the route up to this stop.
    pub cost: Scalar,
}

/// First hop of the shortest path between every pair, filled in alongside
/// the distances by [`floyd_warshall_with_paths`].
#[derive(Clone, Debug)]
pub struct NextHops {
    size: usize,
    cells: Vec<Option<usize>>,
}

impl NextHops {
    fn from_edges(matrix: &DistanceMatrix) -> Self {
        let size = matrix.size();
        let mut cells = vec![None; size * size];
        for i in 0..size {
            for j in 0..size {
                if matrix.is_connected(i, j) {
                    cells[i * size + j] = Some(j);
                }
            }
        }
        NextHops { size, cells }
    }

    pub fn next(&self, from: usize, to: usize) -> Option<usize> {
        self.cells[from * self.size + to]
    }

    /// Vertex sequence from `from` to `to`, both included.
    pub fn path(&self, from: usize, to: usize) -> Option<Vec<usize>> {
        let mut current = from;
        let mut path = vec![current];
        while current != to {
            current = self.next(current, to)?;
            path.push(current);
            if path.len() > self.size {
                return None;
            }
        }
        Some(path)
    }
}

/// All-pairs shortest paths, relaxing `matrix` in place.
///
/// Returns how many entries were improved, so a second pass over a closed
/// matrix reports zero.
pub fn floyd_warshall(matrix: &mut DistanceMatrix) -> usize {
    relax_all(matrix, |_, _, _| {})
}

/// Same as [`floyd_warshall`], additionally recording the first hop of each
/// shortest path.
pub fn floyd_warshall_with_paths(matrix: &mut DistanceMatrix) -> NextHops {
    let mut hops = NextHops::from_edges(matrix);
    let size = hops.size;
    relax_all(matrix, |i, k, j| {
        hops.cells[i * size + j] = hops.cells[i * size + k];
    });
    hops
}

fn relax_all<F>(matrix: &mut DistanceMatrix, mut on_improve: F) -> usize
where
    F: FnMut(usize, usize, usize),
{
    let n = matrix.size();
    let mut improved = 0;
    // k must stay the outermost loop: layer k only reads entries already
    // relaxed through every intermediate below k.
    for k in 0..n {
        for i in 0..n {
            let to_k = matrix[(i, k)];
            if !to_k.is_finite() {
                continue;
            }
            for j in 0..n {
                let from_k = matrix[(k, j)];
                if !from_k.is_finite() {
                    continue;
                }
                let via = to_k + from_k;
                if via < matrix[(i, j)] {
                    matrix[(i, j)] = via;
                    on_improve(i, k, j);
                    improved += 1;
                }
            }
        }
    }
    improved
}

/// Turns a hop sequence into steps with cumulative cost read from the
/// closed `matrix`.
pub fn reconstruct_path(
    matrix: &DistanceMatrix,
    hops: &NextHops,
    from: usize,
    to: usize,
) -> Option<Vec<PathStep>> {
    let path = hops.path(from, to)?;

    let mut result = Vec::with_capacity(path.len());
    let mut cost = 0.0;
    let mut previous = from;
    for idx in path {
        cost += matrix[(previous, idx)];
        result.push(PathStep {
            airport_index: idx,
            cost,
        });
        previous = idx;
    }
    Some(result)
}
