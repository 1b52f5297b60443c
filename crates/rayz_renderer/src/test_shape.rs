//! Debug primitive that records what it is asked.

use std::sync::{Arc, Mutex};

use rayz_math::{Bounds, DVec3, Ray};

use crate::{Intersection, Primitive, ShapeId};

/// Never reports a hit, but remembers the last local-space ray it saw and
/// uses the local point itself as the normal. Handy for checking that the
/// shape pipeline applies transforms correctly.
#[derive(Debug, Clone, Default)]
pub struct TestShape {
    saved_ray: Arc<Mutex<Option<Ray>>>,
}

impl TestShape {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared handle to the recorded ray; stays valid after the shape is
    /// moved into a scene.
    pub fn saved_ray_handle(&self) -> Arc<Mutex<Option<Ray>>> {
        Arc::clone(&self.saved_ray)
    }

    pub fn saved_ray(&self) -> Option<Ray> {
        self.saved_ray.lock().ok().and_then(|slot| *slot)
    }
}

impl Primitive for TestShape {
    fn local_intersect(&self, ray: &Ray, _id: ShapeId, _xs: &mut Vec<Intersection>) {
        if let Ok(mut slot) = self.saved_ray.lock() {
            *slot = Some(*ray);
        }
    }

    fn local_normal_at(&self, point: DVec3, _hit: Option<&Intersection>) -> DVec3 {
        point
    }

    fn bounds(&self) -> Bounds {
        Bounds::new(DVec3::splat(-1.0), DVec3::ONE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_ray() {
        let shape = TestShape::new();
        let handle = shape.saved_ray_handle();
        let ray = Ray::new(DVec3::new(1.0, 2.0, 3.0), DVec3::Z);
        let mut xs = Vec::new();
        shape.local_intersect(&ray, ShapeId(0), &mut xs);

        assert!(xs.is_empty());
        assert_eq!(shape.saved_ray(), Some(ray));
        assert_eq!(*handle.lock().unwrap(), Some(ray));
    }
}
