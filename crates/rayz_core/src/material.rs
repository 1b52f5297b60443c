//! Surface appearance parameters.

use rayz_math::DVec3;

use crate::{NormalPerturbation, Pattern};

/// Color type alias (RGB values typically 0-1)
pub type Color = DVec3;

/// Phong material with reflection and refraction coefficients.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Flat surface color, used when no pattern is set
    pub color: Color,

    /// Ambient reflection (0-1), unaffected by shadows
    pub ambient: f64,

    /// Diffuse reflection (0-1)
    pub diffuse: f64,

    /// Specular reflection (0-1)
    pub specular: f64,

    /// Size of the specular highlight; larger is smaller and tighter
    pub shininess: f64,

    /// Mirror reflectance (0 = matte, 1 = perfect mirror)
    pub reflective: f64,

    /// Fraction of light transmitted through the surface (0-1)
    pub transparency: f64,

    /// Index of refraction (1.0 = vacuum, 1.5 = glass, 2.42 = diamond)
    pub refractive_index: f64,

    /// Procedural color, overrides `color` when present
    pub pattern: Option<Pattern>,

    /// Procedural bump mapping
    pub normal_perturbation: Option<NormalPerturbation>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Color::ONE,
            ambient: 0.1,
            diffuse: 0.9,
            specular: 0.9,
            shininess: 200.0,
            reflective: 0.0,
            transparency: 0.0,
            refractive_index: 1.0,
            pattern: None,
            normal_perturbation: None,
        }
    }
}

impl Material {
    /// Create a default material with a flat color.
    pub fn new(color: Color) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }

    /// Fully transparent glass with a refractive index of 1.5.
    pub fn glass() -> Self {
        Self {
            transparency: 1.0,
            refractive_index: 1.5,
            ..Default::default()
        }
    }

    /// Surface color at a point given in the shape's object space.
    pub fn color_at_object(&self, object_point: DVec3) -> Color {
        match &self.pattern {
            Some(pattern) => pattern.pattern_at_object(object_point),
            None => self.color,
        }
    }

    /// Check if the material both reflects and transmits light, in which
    /// case the two contributions are blended by Fresnel reflectance.
    pub fn is_reflective_and_transparent(&self) -> bool {
        self.reflective > 0.0 && self.transparency > 0.0
    }
}
