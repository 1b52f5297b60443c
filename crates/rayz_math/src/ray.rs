use glam::{DMat4, DVec3};

/// A ray in 3D space with origin, direction, and time.
///
/// The direction is not required to be normalized; intersection distances
/// are expressed in multiples of it. The `time` field is only consulted by
/// shapes that carry a motion transform.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
    pub time: f64,
}

impl Ray {
    /// Create a new ray at time 0.
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self {
            origin,
            direction,
            time: 0.0,
        }
    }

    /// Create a new ray sampled at `time`.
    pub fn with_time(origin: DVec3, direction: DVec3, time: f64) -> Self {
        Self {
            origin,
            direction,
            time,
        }
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn position(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }

    /// Apply a matrix to the ray. The origin moves as a point and the
    /// direction as a vector; the direction is deliberately left
    /// unnormalized so `t` stays comparable across spaces.
    pub fn transform(&self, matrix: &DMat4) -> Ray {
        Ray {
            origin: matrix.transform_point3(self.origin),
            direction: matrix.transform_vector3(self.direction),
            time: self.time,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_creation() {
        let origin = DVec3::new(1.0, 2.0, 3.0);
        let direction = DVec3::new(4.0, 5.0, 6.0);
        let ray = Ray::new(origin, direction);

        assert_eq!(ray.origin, origin);
        assert_eq!(ray.direction, direction);
        assert_eq!(ray.time, 0.0);
    }

    #[test]
    fn test_ray_position() {
        let ray = Ray::new(DVec3::new(2.0, 3.0, 4.0), DVec3::X);

        assert_eq!(ray.position(0.0), DVec3::new(2.0, 3.0, 4.0));
        assert_eq!(ray.position(1.0), DVec3::new(3.0, 3.0, 4.0));
        assert_eq!(ray.position(-1.0), DVec3::new(1.0, 3.0, 4.0));
        assert_eq!(ray.position(2.5), DVec3::new(4.5, 3.0, 4.0));
    }

    #[test]
    fn test_translate_ray() {
        let ray = Ray::new(DVec3::new(1.0, 2.0, 3.0), DVec3::Y);
        let moved = ray.transform(&DMat4::from_translation(DVec3::new(3.0, 4.0, 5.0)));

        assert_eq!(moved.origin, DVec3::new(4.0, 6.0, 8.0));
        assert_eq!(moved.direction, DVec3::Y);
    }

    #[test]
    fn test_scale_ray() {
        let ray = Ray::with_time(DVec3::new(1.0, 2.0, 3.0), DVec3::Y, 0.25);
        let scaled = ray.transform(&DMat4::from_scale(DVec3::new(2.0, 3.0, 4.0)));

        assert_eq!(scaled.origin, DVec3::new(2.0, 6.0, 12.0));
        assert_eq!(scaled.direction, DVec3::new(0.0, 3.0, 0.0));
        assert_eq!(scaled.time, 0.25);
    }
}
