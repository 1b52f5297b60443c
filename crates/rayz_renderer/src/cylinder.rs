//! Unit-radius cylinder around the y axis.

use rayz_math::{Bounds, DVec3, Interval, Ray, EPSILON};

use crate::{Intersection, Primitive, ShapeId};

/// Cylinder of radius 1, optionally truncated to `(minimum, maximum)` on y
/// and capped at both ends when `closed` is set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinder {
    pub minimum: f64,
    pub maximum: f64,
    pub closed: bool,
}

impl Default for Cylinder {
    fn default() -> Self {
        Self {
            minimum: f64::NEG_INFINITY,
            maximum: f64::INFINITY,
            closed: false,
        }
    }
}

impl Cylinder {
    /// Truncated cylinder between two heights.
    pub fn new(minimum: f64, maximum: f64, closed: bool) -> Self {
        Self {
            minimum,
            maximum,
            closed,
        }
    }

    fn intersect_caps(&self, ray: &Ray, id: ShapeId, xs: &mut Vec<Intersection>) {
        if !self.closed || ray.direction.y.abs() < EPSILON {
            return;
        }

        for y in [self.minimum, self.maximum] {
            let t = (y - ray.origin.y) / ray.direction.y;
            if within_radius(ray, t, 1.0) {
                xs.push(Intersection::new(t, id));
            }
        }
    }
}

/// Whether the ray at `t` lies within `radius` of the y axis (cap rims count).
pub(crate) fn within_radius(ray: &Ray, t: f64, radius: f64) -> bool {
    let x = ray.origin.x + t * ray.direction.x;
    let z = ray.origin.z + t * ray.direction.z;
    x * x + z * z <= radius * radius + EPSILON
}

impl Primitive for Cylinder {
    fn local_intersect(&self, ray: &Ray, id: ShapeId, xs: &mut Vec<Intersection>) {
        let d = ray.direction;
        let o = ray.origin;
        let a = d.x * d.x + d.z * d.z;

        // Parallel to the axis: only the caps can be hit
        if a.abs() >= EPSILON {
            let b = 2.0 * o.x * d.x + 2.0 * o.z * d.z;
            let c = o.x * o.x + o.z * o.z - 1.0;
            let disc = b * b - 4.0 * a * c;

            if disc >= 0.0 {
                let sqrtd = disc.sqrt();
                let mut t0 = (-b - sqrtd) / (2.0 * a);
                let mut t1 = (-b + sqrtd) / (2.0 * a);
                if t0 > t1 {
                    std::mem::swap(&mut t0, &mut t1);
                }

                let height = Interval::new(self.minimum, self.maximum);
                for t in [t0, t1] {
                    if height.surrounds(o.y + t * d.y) {
                        xs.push(Intersection::new(t, id));
                    }
                }
            }
        }

        self.intersect_caps(ray, id, xs);
    }

    fn local_normal_at(&self, point: DVec3, _hit: Option<&Intersection>) -> DVec3 {
        let dist = point.x * point.x + point.z * point.z;

        if dist < 1.0 && point.y >= self.maximum - EPSILON {
            DVec3::Y
        } else if dist < 1.0 && point.y <= self.minimum + EPSILON {
            -DVec3::Y
        } else {
            DVec3::new(point.x, 0.0, point.z)
        }
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(
            DVec3::new(-1.0, self.minimum, -1.0),
            DVec3::new(1.0, self.maximum, 1.0),
        )
    }
}
