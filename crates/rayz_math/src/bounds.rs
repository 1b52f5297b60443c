use crate::{Ray, EPSILON};
use glam::{DMat4, DVec3};

/// Axis-aligned bounding box in a shape's object space.
///
/// An empty box has `min = +inf` and `max = -inf` on every axis, so merging
/// anything into it yields the other operand unchanged.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Bounds {
    pub min: DVec3,
    pub max: DVec3,
}

impl Bounds {
    /// Create a box from its two extreme corners.
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// The box that contains nothing.
    pub const EMPTY: Bounds = Bounds {
        min: DVec3::splat(f64::INFINITY),
        max: DVec3::splat(f64::NEG_INFINITY),
    };

    /// The box that contains everything.
    pub const INFINITE: Bounds = Bounds {
        min: DVec3::splat(f64::NEG_INFINITY),
        max: DVec3::splat(f64::INFINITY),
    };

    /// Returns true if the box contains no points.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Returns true if every coordinate of both corners is finite.
    pub fn is_finite(&self) -> bool {
        self.min.is_finite() && self.max.is_finite()
    }

    /// Create a box that contains both `self` and `other`.
    pub fn merge(&self, other: &Bounds) -> Bounds {
        Bounds {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Grow the box to contain `point`.
    pub fn add_point(&mut self, point: DVec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Returns true if the point lies inside or on the box.
    pub fn contains_point(&self, point: DVec3) -> bool {
        (self.min.x..=self.max.x).contains(&point.x)
            && (self.min.y..=self.max.y).contains(&point.y)
            && (self.min.z..=self.max.z).contains(&point.z)
    }

    /// Returns true if `other` lies entirely inside this box.
    pub fn contains_bounds(&self, other: &Bounds) -> bool {
        self.contains_point(other.min) && self.contains_point(other.max)
    }

    /// Transform the box by `matrix`, returning the axis-aligned box of the
    /// eight transformed corners.
    ///
    /// Boxes with an infinite extent (planes, uncapped cylinders) cannot be
    /// transformed corner-wise without producing NaN, so they widen to
    /// [`Bounds::INFINITE`].
    pub fn transform(&self, matrix: &DMat4) -> Bounds {
        if self.is_empty() {
            return Bounds::EMPTY;
        }
        if !self.is_finite() {
            return Bounds::INFINITE;
        }

        let corners = [
            DVec3::new(self.min.x, self.min.y, self.min.z),
            DVec3::new(self.min.x, self.min.y, self.max.z),
            DVec3::new(self.min.x, self.max.y, self.min.z),
            DVec3::new(self.min.x, self.max.y, self.max.z),
            DVec3::new(self.max.x, self.min.y, self.min.z),
            DVec3::new(self.max.x, self.min.y, self.max.z),
            DVec3::new(self.max.x, self.max.y, self.min.z),
            DVec3::new(self.max.x, self.max.y, self.max.z),
        ];

        let mut result = Bounds::EMPTY;
        for corner in corners {
            result.add_point(matrix.transform_point3(corner));
        }
        result
    }

    /// Test if a ray intersects this box anywhere along its length.
    ///
    /// Uses the slab method, the same per-axis test cubes use.
    pub fn intersects(&self, ray: &Ray) -> bool {
        if self.is_empty() {
            return false;
        }

        let (xtmin, xtmax) = check_axis(ray.origin.x, ray.direction.x, self.min.x, self.max.x);
        let (ytmin, ytmax) = check_axis(ray.origin.y, ray.direction.y, self.min.y, self.max.y);
        let (ztmin, ztmax) = check_axis(ray.origin.z, ray.direction.z, self.min.z, self.max.z);

        let tmin = xtmin.max(ytmin).max(ztmin);
        let tmax = xtmax.min(ytmax).min(ztmax);

        tmin <= tmax
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Entry and exit distances of a ray along one axis slab `[min, max]`.
///
/// A direction component below [`EPSILON`] is treated as parallel to the
/// slab; the distances become signed infinities.
pub fn check_axis(origin: f64, direction: f64, min: f64, max: f64) -> (f64, f64) {
    let tmin_numerator = min - origin;
    let tmax_numerator = max - origin;

    let (tmin, tmax) = if direction.abs() >= EPSILON {
        (tmin_numerator / direction, tmax_numerator / direction)
    } else {
        (
            tmin_numerator * f64::INFINITY,
            tmax_numerator * f64::INFINITY,
        )
    };

    if tmin > tmax {
        (tmax, tmin)
    } else {
        (tmin, tmax)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ApproxEq;

    fn cube() -> Bounds {
        Bounds::new(DVec3::splat(-1.0), DVec3::splat(1.0))
    }

    #[test]
    fn test_empty_bounds() {
        let empty = Bounds::default();
        assert!(empty.is_empty());
        assert!(!empty.intersects(&Ray::new(DVec3::ZERO, DVec3::Z)));
    }

    #[test]
    fn test_merge_bounds() {
        let a = Bounds::new(DVec3::new(-5.0, -2.0, 0.0), DVec3::new(7.0, 4.0, 4.0));
        let b = Bounds::new(DVec3::new(8.0, -7.0, -2.0), DVec3::new(14.0, 2.0, 8.0));
        let merged = a.merge(&b);

        assert_eq!(merged.min, DVec3::new(-5.0, -7.0, -2.0));
        assert_eq!(merged.max, DVec3::new(14.0, 4.0, 8.0));
        assert_eq!(Bounds::EMPTY.merge(&a), a);
    }

    #[test]
    fn test_add_point() {
        let mut bounds = Bounds::EMPTY;
        bounds.add_point(DVec3::new(-5.0, 2.0, 0.0));
        bounds.add_point(DVec3::new(7.0, 0.0, -3.0));

        assert_eq!(bounds.min, DVec3::new(-5.0, 0.0, -3.0));
        assert_eq!(bounds.max, DVec3::new(7.0, 2.0, 0.0));
    }

    #[test]
    fn test_contains() {
        let bounds = Bounds::new(DVec3::new(5.0, -2.0, 0.0), DVec3::new(11.0, 4.0, 7.0));

        assert!(bounds.contains_point(DVec3::new(5.0, -2.0, 0.0)));
        assert!(bounds.contains_point(DVec3::new(8.0, 1.0, 3.0)));
        assert!(!bounds.contains_point(DVec3::new(3.0, 0.0, 3.0)));
        assert!(!bounds.contains_point(DVec3::new(8.0, 1.0, 8.0)));

        let inner = Bounds::new(DVec3::new(6.0, -1.0, 1.0), DVec3::new(10.0, 3.0, 6.0));
        assert!(bounds.contains_bounds(&inner));
        let straddling = Bounds::new(DVec3::new(4.0, -3.0, -1.0), DVec3::new(10.0, 3.0, 6.0));
        assert!(!bounds.contains_bounds(&straddling));
    }

    #[test]
    fn test_transform_rotated_cube() {
        let matrix = DMat4::from_rotation_x(std::f64::consts::FRAC_PI_4)
            * DMat4::from_rotation_y(std::f64::consts::FRAC_PI_4);
        let transformed = cube().transform(&matrix);

        assert!(transformed
            .min
            .approx_eq(&DVec3::new(-1.41421, -1.70711, -1.70711)));
        assert!(transformed
            .max
            .approx_eq(&DVec3::new(1.41421, 1.70711, 1.70711)));
    }

    #[test]
    fn test_transform_infinite_bounds() {
        let plane = Bounds::new(
            DVec3::new(f64::NEG_INFINITY, 0.0, f64::NEG_INFINITY),
            DVec3::new(f64::INFINITY, 0.0, f64::INFINITY),
        );
        let transformed = plane.transform(&DMat4::from_translation(DVec3::new(1.0, 2.0, 3.0)));
        assert_eq!(transformed, Bounds::INFINITE);
    }

    #[test]
    fn test_ray_intersects_cube_bounds() {
        let bounds = cube();
        let cases = [
            (DVec3::new(5.0, 0.5, 0.0), DVec3::new(-1.0, 0.0, 0.0), true),
            (DVec3::new(-5.0, 0.5, 0.0), DVec3::new(1.0, 0.0, 0.0), true),
            (DVec3::new(0.5, 5.0, 0.0), DVec3::new(0.0, -1.0, 0.0), true),
            (DVec3::new(0.0, 0.5, 0.0), DVec3::new(0.0, 0.0, 1.0), true),
            (DVec3::new(-2.0, 0.0, 0.0), DVec3::new(2.0, 4.0, 6.0), false),
            (DVec3::new(0.0, -2.0, 0.0), DVec3::new(6.0, 2.0, 4.0), false),
            (DVec3::new(2.0, 0.0, 2.0), DVec3::new(0.0, 0.0, -1.0), false),
        ];

        for (origin, direction, expected) in cases {
            let ray = Ray::new(origin, direction.normalize());
            assert_eq!(bounds.intersects(&ray), expected, "origin {origin:?}");
        }
    }

    #[test]
    fn test_ray_intersects_infinite_bounds() {
        let ray = Ray::new(DVec3::new(0.0, 5.0, 0.0), DVec3::new(0.0, 0.0, 1.0));
        assert!(Bounds::INFINITE.intersects(&ray));
    }
}
