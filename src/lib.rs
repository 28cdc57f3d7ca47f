pub mod config;
pub mod coverage;
pub mod data;
pub mod geometry;
pub mod graph;
pub mod problem;
pub mod query;
pub mod spatial;

use serde::{Deserialize, Serialize};

use geometry::point::{Point, Scalar};
use geometry::sphere::Sphere;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Airport {
    /// 1-based position in the input.
    pub id: u32,
    /// Degrees
    pub lon: Scalar,
    pub lat: Scalar,
}

impl Airport {
    pub fn position(&self, sphere: &Sphere) -> Point {
        sphere.point(self.lat, self.lon)
    }
}
