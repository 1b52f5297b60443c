//! Double-napped cone around the y axis.

use rayz_math::{Bounds, DVec3, Interval, Ray, EPSILON};

use crate::cylinder::within_radius;
use crate::{Intersection, Primitive, ShapeId};

/// Cone whose radius at height y is |y|, truncated to `(minimum, maximum)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cone {
    pub minimum: f64,
    pub maximum: f64,
    pub closed: bool,
}

impl Default for Cone {
    fn default() -> Self {
        Self {
            minimum: f64::NEG_INFINITY,
            maximum: f64::INFINITY,
            closed: false,
        }
    }
}

impl Cone {
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
            if within_radius(ray, t, y.abs()) {
                xs.push(Intersection::new(t, id));
            }
        }
    }
}

impl Primitive for Cone {
    fn local_intersect(&self, ray: &Ray, id: ShapeId, xs: &mut Vec<Intersection>) {
        let d = ray.direction;
        let o = ray.origin;
        let a = d.x * d.x - d.y * d.y + d.z * d.z;
        let b = 2.0 * o.x * d.x - 2.0 * o.y * d.y + 2.0 * o.z * d.z;
        let c = o.x * o.x - o.y * o.y + o.z * o.z;
        let height = Interval::new(self.minimum, self.maximum);

        if a.abs() < EPSILON {
            // Parallel to one of the halves: a single wall hit
            if b.abs() >= EPSILON {
                let t = -c / (2.0 * b);
                if height.surrounds(o.y + t * d.y) {
                    xs.push(Intersection::new(t, id));
                }
            }
        } else {
            let disc = b * b - 4.0 * a * c;
            if disc >= 0.0 {
                let sqrtd = disc.sqrt();
                let mut t0 = (-b - sqrtd) / (2.0 * a);
                let mut t1 = (-b + sqrtd) / (2.0 * a);
                if t0 > t1 {
                    std::mem::swap(&mut t0, &mut t1);
                }

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

        if dist < self.maximum * self.maximum && point.y >= self.maximum - EPSILON {
            DVec3::Y
        } else if dist < self.minimum * self.minimum && point.y <= self.minimum + EPSILON {
            -DVec3::Y
        } else {
            let mut y = dist.sqrt();
            if point.y > 0.0 {
                y = -y;
            }
            DVec3::new(point.x, y, point.z)
        }
    }

    fn bounds(&self) -> Bounds {
        let limit = self.minimum.abs().max(self.maximum.abs());
        Bounds::new(
            DVec3::new(-limit, self.minimum, -limit),
            DVec3::new(limit, self.maximum, limit),
        )
    }
}
