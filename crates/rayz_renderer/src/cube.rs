//! Axis-aligned cube spanning [-1, 1] on every axis.

use rayz_math::{check_axis, Bounds, DVec3, Ray};

use crate::{Intersection, Primitive, ShapeId};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Cube;

impl Primitive for Cube {
    fn local_intersect(&self, ray: &Ray, id: ShapeId, xs: &mut Vec<Intersection>) {
        let (xtmin, xtmax) = check_axis(ray.origin.x, ray.direction.x, -1.0, 1.0);
        let (ytmin, ytmax) = check_axis(ray.origin.y, ray.direction.y, -1.0, 1.0);
        let (ztmin, ztmax) = check_axis(ray.origin.z, ray.direction.z, -1.0, 1.0);

        let tmin = xtmin.max(ytmin).max(ztmin);
        let tmax = xtmax.min(ytmax).min(ztmax);

        if tmin > tmax {
            return;
        }
        xs.push(Intersection::new(tmin, id));
        xs.push(Intersection::new(tmax, id));
    }

    fn local_normal_at(&self, point: DVec3, _hit: Option<&Intersection>) -> DVec3 {
        let abs = point.abs();
        let maxc = abs.max_element();

        if maxc == abs.x {
            DVec3::new(point.x, 0.0, 0.0)
        } else if maxc == abs.y {
            DVec3::new(0.0, point.y, 0.0)
        } else {
            DVec3::new(0.0, 0.0, point.z)
        }
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(DVec3::splat(-1.0), DVec3::ONE)
    }
}
