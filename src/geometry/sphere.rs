use serde::{Deserialize, Serialize};

use super::point::{Point, Scalar};

/// Geometry context for one planet: its radius and the tolerance used for
/// every positional, angular and parametric comparison.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct Sphere {
    pub radius: Scalar,
    pub epsilon: Scalar,
}

impl Sphere {
    pub fn new(radius: Scalar, epsilon: Scalar) -> Self {
        Sphere { radius, epsilon }
    }

    /// Position of a latitude/longitude pair (degrees) on this sphere.
    pub fn point(&self, lat_deg: Scalar, lon_deg: Scalar) -> Point {
        Point::from_lat_lon(lat_deg, lon_deg, self.radius)
    }

    /// Lifts a direction back onto the planet surface.
    pub fn lift(&self, direction: Point) -> Point {
        direction.normalize() * self.radius
    }

    /// Converts a surface distance to the angle it subtends, in radians.
    pub fn to_angle(&self, distance: Scalar) -> Scalar {
        distance / self.radius
    }

    /// Angle in radians between the directions of `p` and `q`.
    ///
    /// Uses `atan2(|u x v|, u . v)`, which stays well-conditioned near 0 and pi
    /// where a clamped `acos` of the dot product loses half its digits.
    pub fn angle_between(&self, p: &Point, q: &Point) -> Scalar {
        let u = p.normalize();
        let v = q.normalize();
        let cos = u.dot(&v).clamp(-1.0, 1.0);
        let sin = u.cross(&v).magnitude();
        sin.atan2(cos)
    }

    /// Great-circle distance between `p` and `q` on the planet surface.
    pub fn distance(&self, p: &Point, q: &Point) -> Scalar {
        self.radius * self.angle_between(p, q)
    }

    /// Point reached by travelling `angle` radians from `u` towards `v` along
    /// their common great circle. Returns `u` unchanged when the two coincide.
    pub fn point_at_angle(&self, u: &Point, v: &Point, angle: Scalar) -> Point {
        let u_norm = u.normalize();
        let v_norm = v.normalize();
        if self.angle_between(&u_norm, &v_norm) < self.epsilon {
            return *u;
        }

        let v_ortho = (v_norm - u_norm * u_norm.dot(&v_norm)).normalize();
        (u_norm * angle.cos() + v_ortho * angle.sin()) * self.radius
    }

    /// Whether `p` lies on the shorter arc from `u` to `v`, endpoints included.
    pub fn is_on_arc(&self, u: &Point, v: &Point, p: &Point) -> bool {
        let via = self.distance(u, p) + self.distance(p, v);
        (via - self.distance(u, v)).abs() < self.epsilon
    }

    /// Fraction of the arc `u -> v` covered when travelling from `u` to `p`.
    /// Degenerate arcs map every point to 0.
    pub fn arc_parameter(&self, u: &Point, v: &Point, p: &Point) -> Scalar {
        let total = self.distance(u, v);
        if total < self.epsilon {
            return 0.0;
        }
        self.distance(u, p) / total
    }

    /// Whether `u` and `v` are antipodal, in which case no unique great
    /// circle passes through them.
    pub fn is_antipodal(&self, u: &Point, v: &Point) -> bool {
        (std::f64::consts::PI - self.angle_between(u, v)).abs() < self.epsilon
    }
}
