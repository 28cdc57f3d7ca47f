use std::ops::{Add, Div, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Floating point type used by every geometric computation.
pub type Scalar = f64;

/// Magnitude below which a vector is treated as the zero vector.
const ZERO_MAGNITUDE: Scalar = 1e-9;

/// A position (or direction) in 3D Cartesian space.
///
/// Airports and graph vertices live at planet-radius magnitude, unit vectors
/// are only used inside the trigonometric derivations.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Point {
    pub x: Scalar,
    pub y: Scalar,
    pub z: Scalar,
}

impl Point {
    pub const ZERO: Point = Point {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: Scalar, y: Scalar, z: Scalar) -> Self {
        Point { x, y, z }
    }

    /// Position on a sphere of `radius` for a latitude/longitude pair in degrees.
    pub fn from_lat_lon(lat_deg: Scalar, lon_deg: Scalar, radius: Scalar) -> Self {
        let lat = lat_deg.to_radians();
        let lon = lon_deg.to_radians();
        Point {
            x: radius * lat.cos() * lon.cos(),
            y: radius * lat.cos() * lon.sin(),
            z: radius * lat.sin(),
        }
    }

    pub fn dot(&self, other: &Point) -> Scalar {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(&self, other: &Point) -> Point {
        Point {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    pub fn magnitude(&self) -> Scalar {
        self.dot(self).sqrt()
    }

    /// Unit vector in the same direction, or the zero vector when the
    /// magnitude is too small to carry a direction.
    pub fn normalize(&self) -> Point {
        let mag = self.magnitude();
        if mag < ZERO_MAGNITUDE {
            return Point::ZERO;
        }
        *self / mag
    }

    pub fn is_zero(&self) -> bool {
        self.magnitude() < ZERO_MAGNITUDE
    }

    pub fn to_array(self) -> [Scalar; 3] {
        [self.x, self.y, self.z]
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Neg for Point {
    type Output = Point;

    fn neg(self) -> Point {
        Point::new(-self.x, -self.y, -self.z)
    }
}

impl Mul<Scalar> for Point {
    type Output = Point;

    fn mul(self, s: Scalar) -> Point {
        Point::new(self.x * s, self.y * s, self.z * s)
    }
}

impl Mul<Point> for Scalar {
    type Output = Point;

    fn mul(self, p: Point) -> Point {
        p * self
    }
}

impl Div<Scalar> for Point {
    type Output = Point;

    fn div(self, s: Scalar) -> Point {
        Point::new(self.x / s, self.y / s, self.z / s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn lat_lon_conversion_lands_on_sphere() {
        let p = Point::from_lat_lon(48.2, -122.7, 6370.0);
        assert_approx_eq!(p.magnitude(), 6370.0, 1e-9);

        let north_pole = Point::from_lat_lon(90.0, 0.0, 1.0);
        assert_approx_eq!(north_pole.z, 1.0);
        assert_approx_eq!(north_pole.x, 0.0);
    }

    #[test]
    fn cross_product_is_orthogonal() {
        let a = Point::new(1.0, 2.0, 3.0);
        let b = Point::new(-4.0, 0.5, 2.0);
        let c = a.cross(&b);
        assert_approx_eq!(c.dot(&a), 0.0);
        assert_approx_eq!(c.dot(&b), 0.0);
    }

    #[test]
    fn normalize_degenerate_vector_is_zero() {
        assert_eq!(Point::new(1e-15, 0.0, 0.0).normalize(), Point::ZERO);
        assert_approx_eq!(Point::new(3.0, 4.0, 0.0).normalize().magnitude(), 1.0);
    }

    #[test]
    fn arithmetic_operators() {
        let a = Point::new(1.0, 2.0, 3.0);
        let b = Point::new(0.5, 0.5, 0.5);
        assert_eq!(a + b, Point::new(1.5, 2.5, 3.5));
        assert_eq!(a - b, Point::new(0.5, 1.5, 2.5));
        assert_eq!(a * 2.0, 2.0 * a);
        assert_eq!(a / 2.0, Point::new(0.5, 1.0, 1.5));
        assert_eq!(-a, Point::new(-1.0, -2.0, -3.0));
    }
}
