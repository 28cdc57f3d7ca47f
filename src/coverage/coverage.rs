use std::cmp::Ordering;

use log::debug;

use crate::geometry::intersection::crossing_angle;
use crate::geometry::point::{Point, Scalar};
use crate::geometry::sphere::Sphere;

/// Closed sub-range of an arc's parameter space, `0 <= start <= end <= 1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval {
    pub start: Scalar,
    pub end: Scalar,
}

impl Interval {
    pub const FULL: Interval = Interval {
        start: 0.0,
        end: 1.0,
    };

    pub fn new(start: Scalar, end: Scalar) -> Self {
        Interval { start, end }
    }

    pub fn midpoint(&self) -> Scalar {
        (self.start + self.end) / 2.0
    }

    pub fn span(&self) -> Scalar {
        self.end - self.start
    }
}

/// Parts of the arc `u -> v` that lie inside the safety disk of angular
/// radius `angular_radius` centred on `center`.
///
/// The arc's great circle crosses the disk boundary at most twice; those
/// crossings, together with the arc endpoints, split the arc into pieces
/// that are each entirely inside or entirely outside the disk.
pub fn covered_intervals(
    sphere: &Sphere,
    u: &Point,
    v: &Point,
    center: &Point,
    angular_radius: Scalar,
) -> Vec<Interval> {
    let eps = sphere.epsilon;
    let reach = angular_radius * sphere.radius;
    let inside = |p: &Point| sphere.distance(p, center) <= reach + eps;

    let arc_angle = sphere.angle_between(u, v);
    if arc_angle < eps {
        return if inside(u) {
            vec![Interval::FULL]
        } else {
            Vec::new()
        };
    }

    let normal = u.normalize().cross(&v.normalize()).normalize();
    if normal.is_zero() {
        // antipodal endpoints: no unique great circle to follow
        return Vec::new();
    }

    let whole_or_nothing = || {
        let mid = sphere.point_at_angle(u, v, arc_angle / 2.0);
        if inside(&mid) {
            vec![Interval::FULL]
        } else {
            Vec::new()
        }
    };

    // Angular distance from the center to the great circle plane, and the
    // point of the great circle closest to the center.
    let k = center.normalize();
    let offset = k.dot(&normal);
    let elevation = offset.abs().clamp(0.0, 1.0).asin();
    let foot = (k - normal * offset).normalize();
    if foot.is_zero() || elevation > angular_radius + eps {
        return whole_or_nothing();
    }

    // cos(r) = cos(elevation) * cos(alpha), alpha measured along the great
    // circle from the foot to each crossing.
    let alpha = if (angular_radius - elevation).abs() <= eps {
        0.0
    } else {
        crossing_angle(angular_radius, elevation)
    };
    let along = normal.cross(&foot).normalize();

    let mut crossings = vec![foot * alpha.cos() + along * alpha.sin()];
    if alpha > eps {
        crossings.push(foot * alpha.cos() - along * alpha.sin());
    }

    let mut critical = vec![0.0, 1.0];
    for crossing in crossings {
        let p = sphere.lift(crossing);
        if sphere.is_on_arc(u, v, &p) {
            critical.push(sphere.arc_parameter(u, v, &p));
        }
    }
    critical.sort_by(|a, b| a.total_cmp(b));
    critical.dedup_by(|later, earlier| (*later - *earlier).abs() < eps);

    critical
        .windows(2)
        .map(|w| Interval::new(w[0], w[1]))
        .filter(|piece| piece.span() >= eps)
        .filter(|piece| inside(&sphere.point_at_angle(u, v, piece.midpoint() * arc_angle)))
        .collect()
}

/// Union of `intervals` as a sorted list of disjoint intervals. Intervals
/// that touch within `eps` are joined.
pub fn merge_intervals(mut intervals: Vec<Interval>, eps: Scalar) -> Vec<Interval> {
    intervals.sort_by(|a, b| match a.start.total_cmp(&b.start) {
        Ordering::Equal => a.end.total_cmp(&b.end),
        other => other,
    });

    let mut merged: Vec<Interval> = Vec::with_capacity(intervals.len());
    for interval in intervals {
        match merged.last_mut() {
            Some(current) if interval.start <= current.end + eps => {
                current.end = current.end.max(interval.end);
            }
            _ => merged.push(interval),
        }
    }
    merged
}

/// Whether every point of the arc `u -> v` is within a safety disk of one
/// of the `airports`.
pub fn is_arc_safe(
    sphere: &Sphere,
    u: &Point,
    v: &Point,
    airports: &[Point],
    angular_radius: Scalar,
) -> bool {
    let eps = sphere.epsilon;
    if sphere.distance(u, v) < eps {
        return true;
    }
    if sphere.is_antipodal(u, v) {
        return is_antipodal_leg_safe(sphere, u, v, airports, angular_radius);
    }

    let intervals: Vec<Interval> = airports
        .iter()
        .flat_map(|center| covered_intervals(sphere, u, v, center, angular_radius))
        .collect();
    let merged = merge_intervals(intervals, eps);

    let mut reached = 0.0;
    for interval in &merged {
        if interval.start > reached + eps {
            return false;
        }
        reached = interval.end.max(reached);
    }
    reached >= 1.0 - eps
}

/// Antipodal endpoints are joined by every half great circle through them.
/// The leg is safe when one of the candidate half circles is covered: the
/// ones leaning towards each airport, plus a fixed one so an empty or
/// collinear airport set still has a route to test. Each half circle is split
/// at its midpoint into two ordinary quarter arcs.
fn is_antipodal_leg_safe(
    sphere: &Sphere,
    u: &Point,
    v: &Point,
    airports: &[Point],
    angular_radius: Scalar,
) -> bool {
    let u_norm = u.normalize();
    let axis = [Point::new(1.0, 0.0, 0.0), Point::new(0.0, 1.0, 0.0), Point::new(0.0, 0.0, 1.0)]
        .into_iter()
        .min_by(|a, b| a.dot(&u_norm).abs().total_cmp(&b.dot(&u_norm).abs()))
        .unwrap_or(Point::new(0.0, 0.0, 1.0));

    let mut normals: Vec<Point> = airports
        .iter()
        .map(|center| u_norm.cross(&center.normalize()).normalize())
        .filter(|normal| !normal.is_zero())
        .collect();
    normals.push(u_norm.cross(&axis).normalize());

    let safe = normals.iter().any(|normal| {
        let toward = normal.cross(&u_norm);
        [toward, -toward].iter().any(|direction| {
            let w = sphere.lift(*direction);
            is_arc_safe(sphere, u, &w, airports, angular_radius)
                && is_arc_safe(sphere, &w, v, airports, angular_radius)
        })
    });
    debug!(
        "antipodal leg: {} candidate half circles, safe = {safe}",
        2 * normals.len()
    );
    safe
}
