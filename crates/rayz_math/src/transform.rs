// Transform utilities for DMat4
//
// Extends glam::DMat4 with the constructors and inverse checks the ray
// tracer needs. glam already provides translation, scaling, rotation,
// transform_point3() and transform_vector3().

use crate::{Bounds, EPSILON};
use glam::{DMat4, DVec3, DVec4};
use thiserror::Error;

/// Errors raised when building transforms.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum MathError {
    #[error("Matrix is not invertible (determinant {determinant})")]
    SingularMatrix { determinant: f64 },
}

pub type MathResult<T> = Result<T, MathError>;

/// Extension trait for DMat4 to provide additional transform utilities
pub trait Mat4Ext {
    /// Invert the matrix, failing if it is singular.
    fn try_inverse(&self) -> MathResult<DMat4>;

    /// Transform an axis-aligned bounding box.
    /// Computes the bounding box of all 8 transformed corners.
    fn transform_bounds(&self, bounds: &Bounds) -> Bounds;
}

impl Mat4Ext for DMat4 {
    fn try_inverse(&self) -> MathResult<DMat4> {
        let determinant = self.determinant();
        if determinant.abs() < EPSILON || !determinant.is_finite() {
            return Err(MathError::SingularMatrix { determinant });
        }
        Ok(self.inverse())
    }

    fn transform_bounds(&self, bounds: &Bounds) -> Bounds {
        bounds.transform(self)
    }
}

/// Shearing (skew) matrix. Each parameter moves the first named
/// coordinate in proportion to the second, e.g. `xy` moves x by y.
pub fn shearing(xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64) -> DMat4 {
    DMat4::from_cols(
        DVec4::new(1.0, yx, zx, 0.0),
        DVec4::new(xy, 1.0, zy, 0.0),
        DVec4::new(xz, yz, 1.0, 0.0),
        DVec4::W,
    )
}

/// World-to-eye transform for an eye at `from` looking at `to`.
pub fn view_transform(from: DVec3, to: DVec3, up: DVec3) -> DMat4 {
    let forward = (to - from).normalize();
    let left = forward.cross(up.normalize());
    let true_up = left.cross(forward);

    let orientation = DMat4::from_cols(
        DVec4::new(left.x, true_up.x, -forward.x, 0.0),
        DVec4::new(left.y, true_up.y, -forward.y, 0.0),
        DVec4::new(left.z, true_up.z, -forward.z, 0.0),
        DVec4::W,
    );

    orientation * DMat4::from_translation(-from)
}

/// A transform together with its cached inverse and inverse-transpose.
///
/// The three matrices are computed together and replaced together, so a
/// shape never observes an inverse that belongs to a different matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    matrix: DMat4,
    inverse: DMat4,
    inverse_transpose: DMat4,
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Transform = Transform {
        matrix: DMat4::IDENTITY,
        inverse: DMat4::IDENTITY,
        inverse_transpose: DMat4::IDENTITY,
    };

    /// Build a snapshot from `matrix`, failing if it cannot be inverted.
    pub fn new(matrix: DMat4) -> MathResult<Self> {
        let inverse = matrix.try_inverse()?;
        Ok(Self {
            matrix,
            inverse,
            inverse_transpose: inverse.transpose(),
        })
    }

    #[inline]
    pub fn matrix(&self) -> &DMat4 {
        &self.matrix
    }

    #[inline]
    pub fn inverse(&self) -> &DMat4 {
        &self.inverse
    }

    #[inline]
    pub fn inverse_transpose(&self) -> &DMat4 {
        &self.inverse_transpose
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
