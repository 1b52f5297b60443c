//! Pinhole camera for primary ray generation.

use rayz_math::{DMat4, DVec3, MathResult, Ray, Transform};

/// Camera looking down -z from the origin of its own space, with the
/// canvas one unit in front of it.
///
/// `transform` is the view transform (world to camera); rays are moved
/// back to world space with its inverse.
#[derive(Debug, Clone)]
pub struct Camera {
    pub hsize: u32,
    pub vsize: u32,
    /// Horizontal or vertical field of view in radians, whichever side is longer
    pub field_of_view: f64,
    transform: Transform,

    // Derived from the size and field of view
    half_width: f64,
    half_height: f64,
    pixel_size: f64,
}

impl Camera {
    /// Create a camera with an identity view transform.
    pub fn new(hsize: u32, vsize: u32, field_of_view: f64) -> Self {
        let half_view = (field_of_view / 2.0).tan();
        let aspect = hsize as f64 / vsize as f64;

        let (half_width, half_height) = if aspect >= 1.0 {
            (half_view, half_view / aspect)
        } else {
            (half_view * aspect, half_view)
        };

        Self {
            hsize,
            vsize,
            field_of_view,
            transform: Transform::IDENTITY,
            half_width,
            half_height,
            pixel_size: half_width * 2.0 / hsize as f64,
        }
    }

    /// Builder-style view transform assignment.
    pub fn with_transform(mut self, matrix: DMat4) -> MathResult<Self> {
        self.set_transform(matrix)?;
        Ok(self)
    }

    pub fn set_transform(&mut self, matrix: DMat4) -> MathResult<()> {
        self.transform = Transform::new(matrix)?;
        Ok(())
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// World-space size of one pixel on the canvas.
    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }

    /// Ray from the eye through the centre of pixel (`px`, `py`).
    pub fn ray_for_pixel(&self, px: u32, py: u32) -> Ray {
        let xoffset = (px as f64 + 0.5) * self.pixel_size;
        let yoffset = (py as f64 + 0.5) * self.pixel_size;

        // Camera looks toward -z, so +x is to the left
        let world_x = self.half_width - xoffset;
        let world_y = self.half_height - yoffset;

        let inverse = self.transform.inverse();
        let pixel = inverse.transform_point3(DVec3::new(world_x, world_y, -1.0));
        let origin = inverse.transform_point3(DVec3::ZERO);
        Ray::new(origin, (pixel - origin).normalize())
    }
}
