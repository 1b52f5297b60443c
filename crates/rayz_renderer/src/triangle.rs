//! Flat and smooth triangles.
//!
//! Both variants use the Möller-Trumbore algorithm. Smooth triangles also
//! record the barycentric `(u, v)` of each hit so the normal can be
//! interpolated from the vertex normals.

use rayz_math::{Bounds, DVec3, Ray, EPSILON};

use crate::{Intersection, Primitive, ShapeId};

/// A flat-shaded triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub p1: DVec3,
    pub p2: DVec3,
    pub p3: DVec3,
    /// p2 - p1
    pub e1: DVec3,
    /// p3 - p1
    pub e2: DVec3,
    /// Pre-computed face normal (unit length)
    pub normal: DVec3,
}

impl Triangle {
    pub fn new(p1: DVec3, p2: DVec3, p3: DVec3) -> Self {
        let e1 = p2 - p1;
        let e2 = p3 - p1;
        Self {
            p1,
            p2,
            p3,
            e1,
            e2,
            normal: e2.cross(e1).normalize_or_zero(),
        }
    }

    /// Möller-Trumbore. Returns `(t, u, v)` for a hit inside the triangle.
    fn hit(&self, ray: &Ray) -> Option<(f64, f64, f64)> {
        let dir_cross_e2 = ray.direction.cross(self.e2);
        let det = self.e1.dot(dir_cross_e2);

        // Ray is parallel to the triangle's plane
        if det.abs() < EPSILON {
            return None;
        }

        let f = 1.0 / det;
        let p1_to_origin = ray.origin - self.p1;
        let u = f * p1_to_origin.dot(dir_cross_e2);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let origin_cross_e1 = p1_to_origin.cross(self.e1);
        let v = f * ray.direction.dot(origin_cross_e1);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * self.e2.dot(origin_cross_e1);
        Some((t, u, v))
    }

    fn vertex_bounds(&self) -> Bounds {
        let mut bounds = Bounds::EMPTY;
        bounds.add_point(self.p1);
        bounds.add_point(self.p2);
        bounds.add_point(self.p3);
        bounds
    }
}

impl Primitive for Triangle {
    fn local_intersect(&self, ray: &Ray, id: ShapeId, xs: &mut Vec<Intersection>) {
        if let Some((t, _, _)) = self.hit(ray) {
            xs.push(Intersection::new(t, id));
        }
    }

    fn local_normal_at(&self, _point: DVec3, _hit: Option<&Intersection>) -> DVec3 {
        self.normal
    }

    fn bounds(&self) -> Bounds {
        self.vertex_bounds()
    }
}

/// A triangle with per-vertex normals for smooth shading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothTriangle {
    pub triangle: Triangle,
    pub n1: DVec3,
    pub n2: DVec3,
    pub n3: DVec3,
}

impl SmoothTriangle {
    pub fn new(p1: DVec3, p2: DVec3, p3: DVec3, n1: DVec3, n2: DVec3, n3: DVec3) -> Self {
        Self {
            triangle: Triangle::new(p1, p2, p3),
            n1,
            n2,
            n3,
        }
    }
}

impl Primitive for SmoothTriangle {
    fn local_intersect(&self, ray: &Ray, id: ShapeId, xs: &mut Vec<Intersection>) {
        if let Some((t, u, v)) = self.triangle.hit(ray) {
            xs.push(Intersection::with_uv(t, id, u, v));
        }
    }

    fn local_normal_at(&self, _point: DVec3, hit: Option<&Intersection>) -> DVec3 {
        match hit.and_then(|h| h.uv) {
            Some((u, v)) => self.n2 * u + self.n3 * v + self.n1 * (1.0 - u - v),
            None => self.triangle.normal,
        }
    }

    fn bounds(&self) -> Bounds {
        self.triangle.vertex_bounds()
    }
}
