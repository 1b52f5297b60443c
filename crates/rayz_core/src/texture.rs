//! Image textures and the UV mappings that wrap them around shapes.
//!
//! Textures are loaded with the `image` crate and stored as float RGB.
//! Patterns share a decoded image through an `Arc`.

use std::f64::consts::PI;
use std::path::Path;

use rayz_math::DVec3;
use thiserror::Error;

use crate::Color;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Image decoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Texture {0} has no pixels")]
    Empty(String),
}

pub type TextureResult<T> = Result<T, TextureError>;

/// A decoded image with pixels in the 0-1 range.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    /// Texture width in pixels
    pub width: u32,

    /// Texture height in pixels
    pub height: u32,

    /// Row-major pixels, first row at the top of the image
    pub pixels: Vec<Color>,

    /// Source file path (for debugging)
    pub path: String,
}

impl Texture {
    /// Create a texture from pixel data.
    ///
    /// Fails if the texture is empty or `pixels` does not match the size.
    pub fn new(
        width: u32,
        height: u32,
        pixels: Vec<Color>,
        path: impl Into<String>,
    ) -> TextureResult<Self> {
        let path = path.into();
        if width == 0 || height == 0 || pixels.len() != (width as usize) * (height as usize) {
            return Err(TextureError::Empty(path));
        }
        Ok(Self {
            width,
            height,
            pixels,
            path,
        })
    }

    /// Decode an image file.
    pub fn load(path: impl AsRef<Path>) -> TextureResult<Self> {
        let path = path.as_ref();
        let img = image::open(path)?;
        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();

        let pixels = rgb
            .pixels()
            .map(|p| {
                Color::new(
                    p[0] as f64 / 255.0,
                    p[1] as f64 / 255.0,
                    p[2] as f64 / 255.0,
                )
            })
            .collect();

        let texture = Self::new(width, height, pixels, path.to_string_lossy())?;
        log::debug!(
            "Loaded texture: {} ({}x{})",
            texture.path,
            texture.width,
            texture.height
        );
        Ok(texture)
    }

    /// Pixel at integer coordinates, black when out of range.
    pub fn pixel_at(&self, x: i64, y: i64) -> Color {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return Color::ZERO;
        }
        self.pixels[(y as usize) * (self.width as usize) + x as usize]
    }

    /// Nearest-pixel lookup. `(0, 0)` is the bottom-left corner.
    pub fn sample_uv(&self, u: f64, v: f64) -> Color {
        let x = (u * (self.width as f64 - 1.0)).round();
        let y = ((1.0 - v) * (self.height as f64 - 1.0)).round();
        if !x.is_finite() || !y.is_finite() {
            return Color::ZERO;
        }
        self.pixel_at(x as i64, y as i64)
    }
}

/// Projection from a pattern-space point to texture coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UvMap {
    /// x and z tile the unit square
    Planar,
    /// Angle around the y axis, y tiles vertically
    Cylindrical,
    /// Longitude/latitude around the origin
    Spherical,
}

impl UvMap {
    pub fn map(&self, point: DVec3) -> (f64, f64) {
        match self {
            UvMap::Planar => (point.x.rem_euclid(1.0), point.z.rem_euclid(1.0)),
            UvMap::Cylindrical => {
                let theta = point.x.atan2(point.z);
                let u = (theta + PI) / (2.0 * PI);
                (u, point.y.rem_euclid(1.0))
            }
            UvMap::Spherical => {
                let theta = point.x.atan2(point.z);
                let radius = point.length();
                if radius == 0.0 {
                    return (0.5, 0.5);
                }
                let phi = (point.y / radius).clamp(-1.0, 1.0).acos();
                let u = 1.0 - (theta + PI) / (2.0 * PI);
                let v = 1.0 - phi / PI;
                (u, v)
            }
        }
    }
}
