//! Unit sphere centred on the origin.

use rayz_math::{Bounds, DVec3, Ray};

use crate::{Intersection, Primitive, ShapeId};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Sphere;

impl Primitive for Sphere {
    fn local_intersect(&self, ray: &Ray, id: ShapeId, xs: &mut Vec<Intersection>) {
        let sphere_to_ray = ray.origin;
        let a = ray.direction.length_squared();
        let b = 2.0 * ray.direction.dot(sphere_to_ray);
        let c = sphere_to_ray.length_squared() - 1.0;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return;
        }

        let sqrtd = discriminant.sqrt();
        xs.push(Intersection::new((-b - sqrtd) / (2.0 * a), id));
        xs.push(Intersection::new((-b + sqrtd) / (2.0 * a), id));
    }

    fn local_normal_at(&self, point: DVec3, _hit: Option<&Intersection>) -> DVec3 {
        point
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(DVec3::splat(-1.0), DVec3::ONE)
    }
}
