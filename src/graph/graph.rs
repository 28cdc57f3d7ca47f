use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::coverage::coverage::is_arc_safe;
use crate::geometry::intersection::small_circle_intersections;
use crate::geometry::point::{Point, Scalar};
use crate::geometry::sphere::Sphere;
use crate::graph::matrix::DistanceMatrix;
use crate::graph::pathfinder::floyd_warshall;
use crate::graph::vertices::VertexSet;

/// Everything precomputed for one airport set and safety radius: the
/// augmented vertex set and the closed matrix of shortest safe distances
/// between its vertices.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SafetyNetwork {
    pub sphere: Sphere,
    pub safety_radius: Scalar,
    pub airports: Vec<Point>,
    /// Airports first, then disk-boundary crossings, deduplicated.
    pub vertices: Vec<Point>,
    /// airport_vertex[a] is the vertex id at airport a's position
    pub airport_vertex: Vec<usize>,
    /// Direct safe legs found before closing the matrix.
    pub safe_legs: usize,
    pub distances: DistanceMatrix,
}

impl SafetyNetwork {
    pub fn build(sphere: Sphere, airports: Vec<Point>, safety_radius: Scalar) -> Self {
        let angular_radius = sphere.to_angle(safety_radius);

        let mut candidates = airports.clone();
        for (i, a) in airports.iter().enumerate() {
            for b in &airports[i + 1..] {
                candidates.extend(small_circle_intersections(&sphere, a, b, angular_radius));
            }
        }
        debug!(
            "{} vertex candidates from {} airports",
            candidates.len(),
            airports.len()
        );

        let set = VertexSet::dedup(&candidates, sphere.epsilon);
        let airport_vertex = set.vertex_of[..airports.len()].to_vec();
        for (a, &vertex) in airport_vertex.iter().enumerate() {
            if let Some(first) = airport_vertex[..a].iter().position(|&v| v == vertex) {
                warn!("airport {} shares its position with airport {}", a + 1, first + 1);
            }
        }

        let vertices = set.vertices;
        let mut distances = DistanceMatrix::disconnected(vertices.len());
        for i in 0..vertices.len() {
            for j in i + 1..vertices.len() {
                let (u, v) = (&vertices[i], &vertices[j]);
                if is_arc_safe(&sphere, u, v, &airports, angular_radius) {
                    distances.connect(i, j, sphere.distance(u, v));
                }
            }
        }
        let safe_legs = distances.connected_pairs();

        let relaxed = floyd_warshall(&mut distances);
        info!(
            "built safety network: {} airports, {} vertices, {} safe legs, {} relaxations",
            airports.len(),
            vertices.len(),
            safe_legs,
            relaxed
        );

        SafetyNetwork {
            sphere,
            safety_radius,
            airports,
            vertices,
            airport_vertex,
            safe_legs,
            distances,
        }
    }

    pub fn airport_count(&self) -> usize {
        self.airports.len()
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Shortest safe distance between two airports, ignoring fuel.
    pub fn airport_distance(&self, from: usize, to: usize) -> Scalar {
        self.distances[(self.airport_vertex[from], self.airport_vertex[to])]
    }

    /// Checks the internal dimensions agree with each other.
    pub fn is_consistent(&self) -> bool {
        self.distances.is_well_formed()
            && self.distances.size() == self.vertices.len()
            && self.airport_vertex.len() == self.airports.len()
            && self.airport_vertex.iter().all(|&v| v < self.vertices.len())
    }
}
