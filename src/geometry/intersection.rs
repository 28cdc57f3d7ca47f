use super::point::{Point, Scalar};
use super::sphere::Sphere;

/// Points where the boundaries of two safety disks of equal angular radius
/// cross.
///
/// Returns no points when the disks are too far apart or share a center,
/// one point when they are tangent and two otherwise. The returned points
/// are on the planet surface.
pub fn small_circle_intersections(
    sphere: &Sphere,
    c1: &Point,
    c2: &Point,
    angular_radius: Scalar,
) -> Vec<Point> {
    let eps = sphere.epsilon;
    let c1_norm = c1.normalize();
    let c2_norm = c2.normalize();
    let separation = sphere.angle_between(&c1_norm, &c2_norm);

    if separation > 2.0 * angular_radius + eps || separation < eps {
        return Vec::new();
    }

    // cos(r) = cos(d / 2) * cos(beta) on the right spherical triangle formed by
    // a center, the midpoint of the centers and a crossing point.
    let half = separation / 2.0;
    let beta = if (separation - 2.0 * angular_radius).abs() <= eps {
        0.0
    } else if half.cos().abs() < eps {
        std::f64::consts::FRAC_PI_2
    } else {
        crossing_angle(angular_radius, half)
    };

    let midpoint = sphere.point_at_angle(&c1_norm, &c2_norm, half).normalize();
    // Crossings lie on the great circle equidistant from both centers, whose
    // plane is orthogonal to c1 - c2.
    let along = midpoint.cross(&(c1_norm - c2_norm)).normalize();
    if along.is_zero() {
        return Vec::new();
    }

    let first = midpoint * beta.cos() + along * beta.sin();
    let mut points = vec![sphere.lift(first)];
    if beta > eps {
        let second = midpoint * beta.cos() - along * beta.sin();
        points.push(sphere.lift(second));
    }
    points
}

/// Angle `x` with `cos(r) = cos(leg) * cos(x)` on a right spherical
/// triangle with hypotenuse `r`.
///
/// Evaluated as `atan2(sqrt(sin(r - leg) * sin(r + leg)), cos(r))`, both
/// arguments scaled by `cos(leg)`, which stays accurate near tangency where
/// `acos(cos(r) / cos(leg))` loses half its digits. Returns 0 when no such
/// triangle exists (`leg >= r`).
pub fn crossing_angle(r: Scalar, leg: Scalar) -> Scalar {
    let sin_scaled = ((r - leg).sin() * (r + leg).sin()).max(0.0).sqrt();
    sin_scaled.atan2(r.cos())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn earth() -> Sphere {
        Sphere::new(6370.0, 1e-9)
    }

    #[test]
    fn overlapping_disks_cross_twice() {
        let s = earth();
        let a = s.point(0.0, 0.0);
        let b = s.point(0.0, 8.0);
        let radius = 600.0;
        let r = s.to_angle(radius);

        let points = small_circle_intersections(&s, &a, &b, r);
        assert_eq!(points.len(), 2);
        for p in &points {
            assert_approx_eq!(s.distance(p, &a), radius, 1e-6);
            assert_approx_eq!(s.distance(p, &b), radius, 1e-6);
            assert_approx_eq!(p.magnitude(), 6370.0, 1e-9);
        }
        // mirrored across the equator
        assert_approx_eq!(points[0].z, -points[1].z, 1e-6);
    }

    #[test]
    fn distant_disks_do_not_cross() {
        let s = earth();
        let a = s.point(0.0, 0.0);
        let b = s.point(0.0, 30.0);
        assert!(small_circle_intersections(&s, &a, &b, s.to_angle(100.0)).is_empty());
    }

    #[test]
    fn coincident_centers_yield_nothing() {
        let s = earth();
        let a = s.point(12.0, 34.0);
        assert!(small_circle_intersections(&s, &a, &a, s.to_angle(500.0)).is_empty());
    }

    #[test]
    fn tangent_disks_touch_once() {
        let s = earth();
        let a = s.point(0.0, 0.0);
        let b = s.point(0.0, 10.0);
        let r = s.angle_between(&a, &b) / 2.0;

        let points = small_circle_intersections(&s, &a, &b, r);
        assert_eq!(points.len(), 1);
        assert!(s.distance(&points[0], &s.point(0.0, 5.0)) < 1e-6);

        // still tangent within tolerance
        let points = small_circle_intersections(&s, &a, &b, r + 1e-12);
        assert_eq!(points.len(), 1);
    }

    #[test]
    fn nearly_tangent_disks_cross_accurately() {
        let s = earth();
        let a = s.point(0.0, 0.0);
        let b = s.point(0.0, 10.0);
        let r = s.angle_between(&a, &b) / 2.0 + 1e-7;
        let radius = r * 6370.0;

        let points = small_circle_intersections(&s, &a, &b, r);
        assert_eq!(points.len(), 2);
        for p in &points {
            assert_approx_eq!(s.distance(p, &a), radius, 1e-7);
            assert_approx_eq!(s.distance(p, &b), radius, 1e-7);
        }
        assert!(s.distance(&points[0], &points[1]) > 1.0);
    }

    #[test]
    fn crossing_angle_matches_spherical_pythagoras() {
        for (r, leg) in [(0.3, 0.1), (0.05, 0.049), (1.2, 0.4), (2.0, 0.3)] {
            let x: f64 = crossing_angle(r, leg);
            assert_approx_eq!(leg.cos() * x.cos(), r.cos(), 1e-12);
        }
        assert_eq!(crossing_angle(0.2, 0.2), 0.0);
        assert_eq!(crossing_angle(0.1, 0.3), 0.0);
    }

    #[test]
    fn antipodal_centers_do_not_cross() {
        let s = earth();
        let a = s.point(0.0, 0.0);
        let b = s.point(0.0, 180.0);
        assert!(small_circle_intersections(&s, &a, &b, s.to_angle(10100.0)).is_empty());
    }
}
