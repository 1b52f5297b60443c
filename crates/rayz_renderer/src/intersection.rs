//! Intersection records, hit selection and per-hit shading state.

use rayz_math::{reflect, DVec3, Ray, EPSILON};

use crate::{Scene, ShapeId};

/// A ray-surface hit at distance `t` along the ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub t: f64,
    pub object: ShapeId,
    /// Barycentric coordinates, set only by smooth triangles
    pub uv: Option<(f64, f64)>,
}

impl Intersection {
    pub fn new(t: f64, object: ShapeId) -> Self {
        Self {
            t,
            object,
            uv: None,
        }
    }

    pub fn with_uv(t: f64, object: ShapeId, u: f64, v: f64) -> Self {
        Self {
            t,
            object,
            uv: Some((u, v)),
        }
    }
}

/// Sort ascending by `t`.
pub fn sort_intersections(xs: &mut [Intersection]) {
    xs.sort_by(|a, b| a.t.total_cmp(&b.t));
}

/// The visible hit: smallest non-negative `t`, in any input order.
pub fn hit(xs: &[Intersection]) -> Option<&Intersection> {
    xs.iter()
        .filter(|i| i.t >= 0.0)
        .min_by(|a, b| a.t.total_cmp(&b.t))
}

/// Everything shading needs to know about one hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Computations {
    pub t: f64,
    pub object: ShapeId,
    /// Time of the ray that produced the hit; secondary rays inherit it
    pub time: f64,
    pub point: DVec3,
    /// `point` nudged above the surface, origin for shadow and reflection rays
    pub over_point: DVec3,
    /// `point` nudged below the surface, origin for refraction rays
    pub under_point: DVec3,
    pub eyev: DVec3,
    /// Unit normal, flipped to face the eye
    pub normalv: DVec3,
    pub reflectv: DVec3,
    /// The ray started inside the object
    pub inside: bool,
    /// Refractive index of the medium being exited
    pub n1: f64,
    /// Refractive index of the medium being entered
    pub n2: f64,
}

/// Derive shading state for `hit`.
///
/// `xs` must be the full sorted intersection list of `ray`; it is replayed
/// to find which transparent objects contain the hit.
pub fn prepare_computations(
    scene: &Scene,
    hit: &Intersection,
    ray: &Ray,
    xs: &[Intersection],
) -> Computations {
    let point = ray.position(hit.t);
    let eyev = -ray.direction;
    let mut normalv = scene.normal_at(hit.object, point, ray.time, Some(hit));

    let inside = normalv.dot(eyev) < 0.0;
    if inside {
        normalv = -normalv;
    }

    let (n1, n2) = refractive_indices(scene, hit, xs);

    Computations {
        t: hit.t,
        object: hit.object,
        time: ray.time,
        point,
        over_point: point + normalv * EPSILON,
        under_point: point - normalv * EPSILON,
        eyev,
        normalv,
        reflectv: reflect(ray.direction, normalv),
        inside,
        n1,
        n2,
    }
}

/// Walk the hits in order, tracking which objects the ray is inside.
/// An object's second hit is its exit.
fn refractive_indices(scene: &Scene, hit: &Intersection, xs: &[Intersection]) -> (f64, f64) {
    let index_of = |containers: &[ShapeId]| {
        containers
            .last()
            .map_or(1.0, |id| scene.shape(*id).material.refractive_index)
    };

    let mut containers: Vec<ShapeId> = Vec::new();
    let mut n1 = 1.0;

    for i in xs {
        let is_hit = i == hit;
        if is_hit {
            n1 = index_of(&containers);
        }

        match containers.iter().position(|c| *c == i.object) {
            Some(pos) => {
                containers.remove(pos);
            }
            None => containers.push(i.object),
        }

        if is_hit {
            return (n1, index_of(&containers));
        }
    }

    (n1, 1.0)
}

/// Schlick's approximation of Fresnel reflectance.
pub fn schlick(comps: &Computations) -> f64 {
    let mut cos = comps.eyev.dot(comps.normalv);

    if comps.n1 > comps.n2 {
        let n = comps.n1 / comps.n2;
        let sin2_t = n * n * (1.0 - cos * cos);
        if sin2_t > 1.0 {
            return 1.0;
        }
        cos = (1.0 - sin2_t).sqrt();
    }

    let r0 = ((comps.n1 - comps.n2) / (comps.n1 + comps.n2)).powi(2);
    r0 + (1.0 - r0) * (1.0 - cos).powi(5)
}
