//! Infinite xz plane.

use rayz_math::{Bounds, DVec3, Ray, EPSILON};

use crate::{Intersection, Primitive, ShapeId};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Plane;

impl Primitive for Plane {
    fn local_intersect(&self, ray: &Ray, id: ShapeId, xs: &mut Vec<Intersection>) {
        if ray.direction.y.abs() < EPSILON {
            return;
        }
        xs.push(Intersection::new(-ray.origin.y / ray.direction.y, id));
    }

    fn local_normal_at(&self, _point: DVec3, _hit: Option<&Intersection>) -> DVec3 {
        DVec3::Y
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(
            DVec3::new(f64::NEG_INFINITY, 0.0, f64::NEG_INFINITY),
            DVec3::new(f64::INFINITY, 0.0, f64::INFINITY),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn intersect(ray: Ray) -> Vec<f64> {
        let mut xs = Vec::new();
        Plane.local_intersect(&ray, ShapeId(0), &mut xs);
        xs.iter().map(|i| i.t).collect()
    }

    #[test]
    fn test_normal_is_constant() {
        for p in [DVec3::ZERO, DVec3::new(10.0, 0.0, -10.0), DVec3::new(-5.0, 0.0, 150.0)] {
            assert_eq!(Plane.local_normal_at(p, None), DVec3::Y);
        }
    }

    #[test]
    fn test_parallel_and_coplanar_rays_miss() {
        assert!(intersect(Ray::new(DVec3::new(0.0, 10.0, 0.0), DVec3::Z)).is_empty());
        assert!(intersect(Ray::new(DVec3::ZERO, DVec3::Z)).is_empty());
    }

    #[test]
    fn test_hits_from_above_and_below() {
        assert_eq!(intersect(Ray::new(DVec3::new(0.0, 1.0, 0.0), -DVec3::Y)), vec![1.0]);
        assert_eq!(intersect(Ray::new(DVec3::new(0.0, -1.0, 0.0), DVec3::Y)), vec![1.0]);
    }

    #[test]
    fn test_bounds_are_flat_and_unbounded() {
        let b = Plane.bounds();
        assert_eq!(b.min.y, 0.0);
        assert_eq!(b.max.y, 0.0);
        assert!(!b.is_finite());
    }
}
