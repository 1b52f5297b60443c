// Re-export glam for convenience
pub use glam::*;

// Rayz math types
mod bounds;
mod interval;
mod numerics;
mod ray;
mod transform;

pub use bounds::{check_axis, Bounds};
pub use interval::Interval;
pub use numerics::{approx_eq, reflect, ApproxEq, EPSILON};
pub use ray::Ray;
pub use transform::{shearing, view_transform, Mat4Ext, MathError, MathResult, Transform};

/// A position in space (transformed with w = 1).
pub type Point = DVec3;

/// A direction in space (transformed with w = 0).
pub type Vector = DVec3;
