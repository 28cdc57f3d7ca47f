use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::geometry::point::Scalar;

/// Dense square matrix of path lengths, `INFINITY` meaning "not connected".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DistanceMatrix {
    size: usize,
    cells: Vec<Scalar>,
}

impl DistanceMatrix {
    /// Matrix with a zero diagonal and every other pair disconnected.
    pub fn disconnected(size: usize) -> Self {
        let mut cells = vec![Scalar::INFINITY; size * size];
        for i in 0..size {
            cells[i * size + i] = 0.0;
        }
        DistanceMatrix { size, cells }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_connected(&self, i: usize, j: usize) -> bool {
        self[(i, j)].is_finite()
    }

    /// Records an undirected edge.
    pub fn connect(&mut self, i: usize, j: usize, weight: Scalar) {
        self[(i, j)] = weight;
        self[(j, i)] = weight;
    }

    /// Number of finite off-diagonal entries in the upper triangle.
    pub fn connected_pairs(&self) -> usize {
        (0..self.size)
            .flat_map(|i| (i + 1..self.size).map(move |j| (i, j)))
            .filter(|&(i, j)| self.is_connected(i, j))
            .count()
    }

    /// Whether the backing storage matches the declared size, e.g. after
    /// deserialising untrusted bytes.
    pub fn is_well_formed(&self) -> bool {
        self.cells.len() == self.size * self.size
    }
}

impl Index<(usize, usize)> for DistanceMatrix {
    type Output = Scalar;

    fn index(&self, (i, j): (usize, usize)) -> &Scalar {
        &self.cells[i * self.size + j]
    }
}

impl IndexMut<(usize, usize)> for DistanceMatrix {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Scalar {
        &mut self.cells[i * self.size + j]
    }
}
