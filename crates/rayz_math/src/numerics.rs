//! Shared numeric tolerance.
//!
//! Every zero-comparison and approximate equality in the renderer goes
//! through [`EPSILON`].

use glam::DVec3;

/// Tolerance for degeneracy checks and approximate equality.
pub const EPSILON: f64 = 1e-5;

/// Returns true if `a` and `b` differ by less than [`EPSILON`].
#[inline]
pub fn approx_eq(a: f64, b: f64) -> bool {
    if a == b {
        // Covers matching infinities
        return true;
    }
    (a - b).abs() < EPSILON
}

/// Approximate equality for scalar and vector values.
pub trait ApproxEq {
    fn approx_eq(&self, other: &Self) -> bool;
}

impl ApproxEq for f64 {
    fn approx_eq(&self, other: &Self) -> bool {
        approx_eq(*self, *other)
    }
}

impl ApproxEq for DVec3 {
    fn approx_eq(&self, other: &Self) -> bool {
        approx_eq(self.x, other.x) && approx_eq(self.y, other.y) && approx_eq(self.z, other.z)
    }
}

impl ApproxEq for glam::DMat4 {
    fn approx_eq(&self, other: &Self) -> bool {
        self.to_cols_array()
            .iter()
            .zip(other.to_cols_array().iter())
            .all(|(a, b)| approx_eq(*a, *b))
    }
}

/// Reflect `v` about the normal `n`.
#[inline]
pub fn reflect(v: DVec3, n: DVec3) -> DVec3 {
    v - n * 2.0 * v.dot(n)
}
