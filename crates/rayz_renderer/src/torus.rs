//! Torus lying in the xz plane, centred on the origin.

use num_complex::Complex64;
use rayz_math::{Bounds, DVec3, Ray};

use crate::{Intersection, Primitive, ShapeId};

const MAX_ITERATIONS: usize = 500;
const CONVERGENCE: f64 = 1e-12;
const IMAGINARY_TOLERANCE: f64 = 1e-6;
const NEWTON_STEPS: usize = 3;

/// Torus with tube radius `minor_radius` swept around the y axis at
/// distance `major_radius`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Torus {
    pub major_radius: f64,
    pub minor_radius: f64,
}

impl Default for Torus {
    fn default() -> Self {
        Self {
            major_radius: 1.0,
            minor_radius: 0.25,
        }
    }
}

impl Torus {
    pub fn new(major_radius: f64, minor_radius: f64) -> Self {
        Self {
            major_radius,
            minor_radius,
        }
    }

    /// Coefficients `[a, b, c, d, e]` of the quartic in t obtained by
    /// substituting the ray into `(sqrt(x² + z²) - R)² + y² = r²`.
    fn quartic(&self, ray: &Ray) -> [f64; 5] {
        let o = ray.origin;
        let d = ray.direction;
        let r2 = self.minor_radius * self.minor_radius;
        let four_big_r2 = 4.0 * self.major_radius * self.major_radius;

        let sum_d_sqr = d.length_squared();
        let e = o.length_squared() - self.major_radius * self.major_radius - r2;
        let f = o.dot(d);

        [
            sum_d_sqr * sum_d_sqr,
            4.0 * sum_d_sqr * f,
            2.0 * sum_d_sqr * e + 4.0 * f * f + four_big_r2 * d.y * d.y,
            4.0 * f * e + 2.0 * four_big_r2 * o.y * d.y,
            e * e - four_big_r2 * (r2 - o.y * o.y),
        ]
    }
}

/// Real roots of `a t⁴ + b t³ + c t² + d t + e`, ascending.
///
/// Durand-Kerner: all four complex roots are refined together from fixed
/// seeds, each step dividing p(z) by the product of distances to the others.
/// A real quartic has an even number of real roots, so a tangent double root
/// whose halves land either side of the imaginary cutoff is reported as a
/// pair. Kept roots are polished with Newton steps on the real polynomial.
pub(crate) fn solve_quartic(coefficients: [f64; 5]) -> Vec<f64> {
    let [a, b, c, d, e] = coefficients;
    if a == 0.0 {
        return Vec::new();
    }
    let monic = [b / a, c / a, d / a, e / a];
    let [b, c, d, e] = monic;
    let p = |z: Complex64| (((z + b) * z + c) * z + d) * z + e;

    let seed = Complex64::new(0.4, 0.9);
    let mut roots = [Complex64::new(1.0, 0.0), seed, seed * seed, seed * seed * seed];

    for _ in 0..MAX_ITERATIONS {
        let mut largest_step = 0.0f64;
        for i in 0..roots.len() {
            let z = roots[i];
            let denominator = roots
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .fold(Complex64::new(1.0, 0.0), |acc, (_, &w)| acc * (z - w));
            let step = p(z) / denominator;
            if !step.is_finite() {
                continue;
            }
            roots[i] = z - step;
            largest_step = largest_step.max(step.norm());
        }
        if largest_step < CONVERGENCE {
            break;
        }
    }

    roots.sort_by(|x, y| imaginary_share(x).total_cmp(&imaginary_share(y)));
    let mut real_count = roots
        .iter()
        .filter(|z| imaginary_share(z) < IMAGINARY_TOLERANCE)
        .count();
    real_count += real_count % 2;

    let mut real: Vec<f64> = roots[..real_count]
        .iter()
        .map(|z| polish(monic, z.re))
        .collect();
    real.sort_by(f64::total_cmp);
    real
}

/// Imaginary part relative to the root's magnitude.
fn imaginary_share(z: &Complex64) -> f64 {
    z.im.abs() / (1.0 + z.norm())
}

/// Newton refinement of a real root of the monic quartic `[b, c, d, e]`,
/// stopping as soon as a step fails to reduce the residual.
fn polish([b, c, d, e]: [f64; 4], mut t: f64) -> f64 {
    let p = |t: f64| (((t + b) * t + c) * t + d) * t + e;
    let dp = |t: f64| ((4.0 * t + 3.0 * b) * t + 2.0 * c) * t + d;

    for _ in 0..NEWTON_STEPS {
        let value = p(t);
        let slope = dp(t);
        if value == 0.0 || slope == 0.0 {
            break;
        }
        let next = t - value / slope;
        if !next.is_finite() || p(next).abs() >= value.abs() {
            break;
        }
        t = next;
    }
    t
}

impl Primitive for Torus {
    fn local_intersect(&self, ray: &Ray, id: ShapeId, xs: &mut Vec<Intersection>) {
        for t in solve_quartic(self.quartic(ray)) {
            if t > 0.0 {
                xs.push(Intersection::new(t, id));
            }
        }
    }

    fn local_normal_at(&self, point: DVec3, _hit: Option<&Intersection>) -> DVec3 {
        let dist = (point.x * point.x + point.z * point.z).sqrt();

        // Nearest point on the tube's centre circle
        let center = if dist > 0.0 {
            DVec3::new(
                point.x * self.major_radius / dist,
                0.0,
                point.z * self.major_radius / dist,
            )
        } else {
            DVec3::new(self.major_radius, 0.0, 0.0)
        };

        (point - center).normalize_or_zero()
    }

    fn bounds(&self) -> Bounds {
        let extent = self.major_radius + self.minor_radius;
        Bounds::new(
            DVec3::new(-extent, -self.minor_radius, -extent),
            DVec3::new(extent, self.minor_radius, extent),
        )
    }
}
