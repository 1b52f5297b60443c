//! Phong local illumination.

use rayz_core::{Color, Light, Material};
use rayz_math::{reflect, DVec3};

use crate::{Scene, ShapeId};

/// Phong shading of one surface point under one light.
///
/// `shadow_intensity` is the occluded fraction of the light (0 = fully
/// lit, 1 = fully shadowed); it scales the diffuse and specular terms but
/// never the ambient one. The surface color comes from the material's
/// pattern, sampled in `object`'s space at `time`, or from its flat color.
#[allow(clippy::too_many_arguments)]
pub fn lighting(
    scene: &Scene,
    object: ShapeId,
    material: &Material,
    light: &Light,
    point: DVec3,
    eyev: DVec3,
    normalv: DVec3,
    shadow_intensity: f64,
    time: f64,
) -> Color {
    let surface = scene.color_at_shape(object, material, point, time);
    let effective_color = surface * light.intensity();
    let lightv = (light.position() - point).normalize();

    let ambient = effective_color * material.ambient;

    let light_dot_normal = lightv.dot(normalv);
    if light_dot_normal <= 0.0 {
        // Light is on the other side of the surface
        return ambient;
    }

    let diffuse = effective_color * material.diffuse * light_dot_normal;

    let reflectv = reflect(-lightv, normalv);
    let reflect_dot_eye = reflectv.dot(eyev);
    let specular = if reflect_dot_eye <= 0.0 {
        Color::ZERO
    } else {
        light.intensity() * material.specular * reflect_dot_eye.powf(material.shininess)
    };

    ambient + (diffuse + specular) * (1.0 - shadow_intensity)
}
