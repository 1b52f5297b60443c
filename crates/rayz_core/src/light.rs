//! Light sources.
//!
//! Every light reports the fraction of its intensity that reaches a point.
//! Shadow tests are delegated to an [`Occluder`], normally the world being
//! rendered, so lights stay independent of scene geometry. The time of the
//! ray being shaded is passed through so moving occluders are tested where
//! they are at that instant.

use rand::Rng;
use rayz_math::DVec3;

use crate::Color;

/// Answers shadow queries on behalf of a light.
pub trait Occluder {
    /// Whether something blocks the segment from `point` to `light_position`
    /// at `time`.
    fn is_shadowed_from(&self, point: DVec3, light_position: DVec3, time: f64) -> bool;
}

/// Infinitely small light emitting equally in all directions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub position: DVec3,
    pub intensity: Color,
}

impl PointLight {
    pub fn new(position: DVec3, intensity: Color) -> Self {
        Self {
            position,
            intensity,
        }
    }

    /// 1.0 when unoccluded, 0.0 otherwise.
    pub fn intensity_at(&self, point: DVec3, time: f64, occluder: &dyn Occluder) -> f64 {
        if occluder.is_shadowed_from(point, self.position, time) {
            0.0
        } else {
            1.0
        }
    }
}

/// Rectangular light sampled on a `usteps x vsteps` grid, giving soft shadows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AreaLight {
    pub corner: DVec3,
    /// Edge of one cell along u
    pub uvec: DVec3,
    /// Edge of one cell along v
    pub vvec: DVec3,
    pub usteps: u32,
    pub vsteps: u32,
    pub intensity: Color,
    /// Randomise the sample within each cell
    pub jitter: bool,
}

impl AreaLight {
    /// Build a light spanning `full_uvec x full_vvec` from `corner`.
    ///
    /// Step counts of zero are raised to one.
    pub fn new(
        corner: DVec3,
        full_uvec: DVec3,
        usteps: u32,
        full_vvec: DVec3,
        vsteps: u32,
        intensity: Color,
    ) -> Self {
        let usteps = usteps.max(1);
        let vsteps = vsteps.max(1);
        Self {
            corner,
            uvec: full_uvec / usteps as f64,
            vvec: full_vvec / vsteps as f64,
            usteps,
            vsteps,
            intensity,
            jitter: false,
        }
    }

    pub fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn samples(&self) -> u32 {
        self.usteps * self.vsteps
    }

    /// Center of cell `(u, v)`, offset by any fractional part of u and v.
    pub fn point_on_light(&self, u: f64, v: f64) -> DVec3 {
        self.corner + self.uvec * (u + 0.5) + self.vvec * (v + 0.5)
    }

    /// Center of the whole light.
    pub fn position(&self) -> DVec3 {
        self.corner
            + self.uvec * (self.usteps as f64 * 0.5)
            + self.vvec * (self.vsteps as f64 * 0.5)
    }

    /// Fraction of cell samples with an unobstructed view of `point`.
    pub fn intensity_at(&self, point: DVec3, time: f64, occluder: &dyn Occluder) -> f64 {
        let mut rng = rand::thread_rng();
        let mut jitter = || {
            if self.jitter {
                rng.gen_range(-0.5..0.5)
            } else {
                0.0
            }
        };

        let mut lit = 0u32;
        for v in 0..self.vsteps {
            for u in 0..self.usteps {
                let sample = self.point_on_light(u as f64 + jitter(), v as f64 + jitter());
                if !occluder.is_shadowed_from(point, sample, time) {
                    lit += 1;
                }
            }
        }

        lit as f64 / self.samples() as f64
    }
}

/// Cone-shaped light with a soft edge between `fade_angle` and `cone_angle`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spotlight {
    pub position: DVec3,
    /// Unit direction of the cone axis
    pub direction: DVec3,
    pub intensity: Color,
    /// Outer half-angle in radians
    pub cone_angle: f64,
    /// Inner half-angle in radians, full intensity inside it
    pub fade_angle: f64,
}

impl Spotlight {
    /// A hard-edged spotlight; use [`Spotlight::with_fade`] for a soft edge.
    pub fn new(position: DVec3, direction: DVec3, intensity: Color, cone_angle: f64) -> Self {
        Self {
            position,
            direction: direction.normalize(),
            intensity,
            cone_angle,
            fade_angle: cone_angle,
        }
    }

    pub fn with_fade(mut self, fade_angle: f64) -> Self {
        self.fade_angle = fade_angle;
        self
    }

    /// Cone falloff, linear in cosine across the fade band, 0 if shadowed.
    pub fn intensity_at(&self, point: DVec3, time: f64, occluder: &dyn Occluder) -> f64 {
        let to_point = (point - self.position).normalize_or_zero();
        let cos_angle = self.direction.dot(to_point);
        let cos_outer = self.cone_angle.cos();
        let cos_inner = self.fade_angle.cos();

        if cos_angle < cos_outer {
            return 0.0;
        }

        let falloff = if cos_angle >= cos_inner {
            1.0
        } else {
            (cos_angle - cos_outer) / (cos_inner - cos_outer)
        };

        if occluder.is_shadowed_from(point, self.position, time) {
            0.0
        } else {
            falloff
        }
    }
}

/// Any light the shading pipeline understands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Light {
    Point(PointLight),
    Area(AreaLight),
    Spot(Spotlight),
}

impl Light {
    pub fn intensity(&self) -> Color {
        match self {
            Light::Point(l) => l.intensity,
            Light::Area(l) => l.intensity,
            Light::Spot(l) => l.intensity,
        }
    }

    /// Position used for the Phong light vector.
    pub fn position(&self) -> DVec3 {
        match self {
            Light::Point(l) => l.position,
            Light::Area(l) => l.position(),
            Light::Spot(l) => l.position,
        }
    }

    /// Fraction (0-1) of this light that reaches `point` at `time`.
    pub fn intensity_at(&self, point: DVec3, time: f64, occluder: &dyn Occluder) -> f64 {
        match self {
            Light::Point(l) => l.intensity_at(point, time, occluder),
            Light::Area(l) => l.intensity_at(point, time, occluder),
            Light::Spot(l) => l.intensity_at(point, time, occluder),
        }
    }
}

impl From<PointLight> for Light {
    fn from(light: PointLight) -> Self {
        Light::Point(light)
    }
}

impl From<AreaLight> for Light {
    fn from(light: AreaLight) -> Self {
        Light::Area(light)
    }
}

impl From<Spotlight> for Light {
    fn from(light: Spotlight) -> Self {
        Light::Spot(light)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Shadows every light position with x below the threshold.
    struct Wall(f64);

    impl Occluder for Wall {
        fn is_shadowed_from(&self, _point: DVec3, light_position: DVec3, _time: f64) -> bool {
            light_position.x < self.0
        }
    }

    struct Open;

    impl Occluder for Open {
        fn is_shadowed_from(&self, _point: DVec3, _light_position: DVec3, _time: f64) -> bool {
            false
        }
    }

    fn approx(a: DVec3, b: DVec3) -> bool {
        (a - b).abs().max_element() < 1e-9
    }

    #[test]
    fn test_point_light_is_binary() {
        let light = PointLight::new(DVec3::new(-10.0, 10.0, -10.0), Color::ONE);
        assert_eq!(light.intensity_at(DVec3::ZERO, 0.0, &Open), 1.0);
        assert_eq!(light.intensity_at(DVec3::ZERO, 0.0, &Wall(0.0)), 0.0);
    }

    #[test]
    fn test_area_light_cells() {
        let light = AreaLight::new(
            DVec3::ZERO,
            DVec3::new(2.0, 0.0, 0.0),
            4,
            DVec3::new(0.0, 0.0, 1.0),
            2,
            Color::ONE,
        );
        assert_eq!(light.samples(), 8);
        assert!(approx(light.uvec, DVec3::new(0.5, 0.0, 0.0)));
        assert!(approx(light.vvec, DVec3::new(0.0, 0.0, 0.5)));
        assert!(approx(light.point_on_light(0.0, 0.0), DVec3::new(0.25, 0.0, 0.25)));
        assert!(approx(light.point_on_light(1.0, 0.0), DVec3::new(0.75, 0.0, 0.25)));
        assert!(approx(light.point_on_light(0.0, 1.0), DVec3::new(0.25, 0.0, 0.75)));
        assert!(approx(light.point_on_light(2.0, 0.0), DVec3::new(1.25, 0.0, 0.25)));
        assert!(approx(light.point_on_light(3.0, 1.0), DVec3::new(1.75, 0.0, 0.75)));
        assert!(approx(light.position(), DVec3::new(1.0, 0.0, 0.5)));
    }

    #[test]
    fn test_area_light_partial_shadow() {
        let light = AreaLight::new(
            DVec3::ZERO,
            DVec3::new(2.0, 0.0, 0.0),
            4,
            DVec3::new(0.0, 0.0, 1.0),
            2,
            Color::ONE,
        );
        // Cells centred at x = 0.25 and 0.75 are blocked
        assert_eq!(light.intensity_at(DVec3::ZERO, 0.0, &Wall(1.0)), 0.5);
        assert_eq!(light.intensity_at(DVec3::ZERO, 0.0, &Open), 1.0);
    }

    #[test]
    fn test_jittered_samples_stay_in_cell() {
        let light = AreaLight::new(
            DVec3::ZERO,
            DVec3::new(2.0, 0.0, 0.0),
            4,
            DVec3::new(0.0, 0.0, 1.0),
            2,
            Color::ONE,
        )
        .with_jitter(true);
        // Jitter never pushes a sample across a cell boundary at x = 1.0
        assert_eq!(light.intensity_at(DVec3::ZERO, 0.0, &Wall(1.0)), 0.5);
    }

    #[test]
    fn test_spotlight_cone() {
        let light = Spotlight::new(
            DVec3::ZERO,
            DVec3::new(0.0, -1.0, 0.0),
            Color::ONE,
            std::f64::consts::FRAC_PI_4,
        )
        .with_fade(std::f64::consts::FRAC_PI_8);

        assert_eq!(light.intensity_at(DVec3::new(0.0, -5.0, 0.0), 0.0, &Open), 1.0);
        assert_eq!(light.intensity_at(DVec3::new(5.0, -1.0, 0.0), 0.0, &Open), 0.0);

        // 30 degrees off axis sits inside the fade band
        let angle = 30f64.to_radians();
        let point = DVec3::new(angle.sin(), -angle.cos(), 0.0);
        let fraction = light.intensity_at(point, 0.0, &Open);
        assert!(fraction > 0.0 && fraction < 1.0);

        assert_eq!(light.intensity_at(DVec3::new(0.0, -5.0, 0.0), 0.0, &Wall(1.0)), 0.0);
    }

    /// Blocks only at times past the threshold.
    struct Passing(f64);

    impl Occluder for Passing {
        fn is_shadowed_from(&self, _point: DVec3, _light_position: DVec3, time: f64) -> bool {
            time > self.0
        }
    }

    #[test]
    fn test_time_reaches_occluder() {
        let lights: [Light; 3] = [
            PointLight::new(DVec3::new(0.0, 10.0, 0.0), Color::ONE).into(),
            AreaLight::new(
                DVec3::new(0.0, 10.0, 0.0),
                DVec3::X,
                2,
                DVec3::Z,
                2,
                Color::ONE,
            )
            .into(),
            Spotlight::new(DVec3::new(0.0, 10.0, 0.0), -DVec3::Y, Color::ONE, 0.5).into(),
        ];
        for light in lights {
            assert_eq!(light.intensity_at(DVec3::ZERO, 0.25, &Passing(0.5)), 1.0);
            assert_eq!(light.intensity_at(DVec3::ZERO, 0.75, &Passing(0.5)), 0.0);
        }
    }

    #[test]
    fn test_light_enum_dispatch() {
        let light: Light = PointLight::new(DVec3::new(1.0, 2.0, 3.0), Color::splat(0.5)).into();
        assert_eq!(light.position(), DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(light.intensity(), Color::splat(0.5));
    }
}
