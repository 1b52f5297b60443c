//! Scene container and the recursive shading algorithm.

use rayz_core::{Color, Light, Material, Occluder, PointLight};
use rayz_math::{DMat4, DVec3, Ray};

use crate::{
    hit, lighting, prepare_computations, schlick, sort_intersections, Computations,
    Intersection, Scene, SceneError, SceneResult, Shape, ShapeId,
};

/// Bounce budget used by [`World::color_at`].
pub const DEFAULT_MAX_DEPTH: u32 = 5;

/// Top-level shapes, the arena that owns them, and a light.
#[derive(Debug, Default)]
pub struct World {
    pub scene: Scene,
    objects: Vec<ShapeId>,
    pub light: Option<Light>,
    /// Color of rays that escape the scene
    pub background: Color,
}

impl World {
    /// An empty world with no light and a black background.
    pub fn new() -> Self {
        Self::default()
    }

    /// Two concentric spheres lit from the upper left.
    pub fn default_world() -> Self {
        let mut world = World::new();
        world.light = Some(
            PointLight::new(DVec3::new(-10.0, 10.0, -10.0), Color::ONE).into(),
        );

        let outer = Shape::sphere().with_material(Material {
            color: Color::new(0.8, 1.0, 0.6),
            diffuse: 0.7,
            specular: 0.2,
            ..Material::default()
        });
        world.add_shape(outer);
        let inner = world.add_shape(Shape::sphere());
        if let Err(err) = world.scene.set_transform(inner, DMat4::from_scale(DVec3::splat(0.5))) {
            log::error!("Default world transform rejected: {}", err);
        }
        world
    }

    /// Move a shape into the scene and make it a top-level object.
    pub fn add_shape(&mut self, shape: Shape) -> ShapeId {
        let id = self.scene.add(shape);
        self.objects.push(id);
        id
    }

    /// Make an existing unparented shape a top-level object.
    pub fn add_object(&mut self, id: ShapeId) -> SceneResult<()> {
        if self.scene.parent(id).is_some() {
            return Err(SceneError::AlreadyParented(id));
        }
        if !self.objects.contains(&id) {
            self.objects.push(id);
        }
        Ok(())
    }

    /// Top-level objects in insertion order.
    pub fn objects(&self) -> &[ShapeId] {
        &self.objects
    }

    /// Every hit of `ray` with the world, sorted by `t`.
    ///
    /// Objects later placed under a group or CSG node are only reached
    /// through that parent.
    pub fn intersect(&self, ray: &Ray) -> Vec<Intersection> {
        let mut xs = Vec::new();
        let roots = self
            .objects
            .iter()
            .filter(|&&id| self.scene.parent(id).is_none());
        for &id in roots {
            self.scene.intersect_into(id, ray, &mut xs);
        }
        sort_intersections(&mut xs);
        xs
    }

    /// Color seen along `ray` with the default bounce budget.
    pub fn color_at(&self, ray: &Ray) -> Color {
        self.color_at_depth(ray, DEFAULT_MAX_DEPTH)
    }

    /// Color seen along `ray`, allowing `remaining` further bounces.
    pub fn color_at_depth(&self, ray: &Ray, remaining: u32) -> Color {
        let xs = self.intersect(ray);
        match hit(&xs) {
            Some(h) => {
                let comps = prepare_computations(&self.scene, h, ray, &xs);
                self.shade_hit(&comps, remaining)
            }
            None => self.background,
        }
    }

    /// Direct lighting plus reflected and refracted contributions.
    pub fn shade_hit(&self, comps: &Computations, remaining: u32) -> Color {
        let material = &self.scene.shape(comps.object).material;

        let surface = match &self.light {
            Some(light) => {
                let shadow_intensity =
                    1.0 - light.intensity_at(comps.over_point, comps.time, self);
                lighting(
                    &self.scene,
                    comps.object,
                    material,
                    light,
                    comps.over_point,
                    comps.eyev,
                    comps.normalv,
                    shadow_intensity,
                    comps.time,
                )
            }
            None => Color::ZERO,
        };

        let reflected = self.reflected_color(comps, remaining);
        let refracted = self.refracted_color(comps, remaining);

        if material.is_reflective_and_transparent() {
            let reflectance = schlick(comps);
            surface + reflected * reflectance + refracted * (1.0 - reflectance)
        } else {
            surface + reflected + refracted
        }
    }

    /// Mirror contribution; black once the budget is spent.
    pub fn reflected_color(&self, comps: &Computations, remaining: u32) -> Color {
        let reflective = self.scene.shape(comps.object).material.reflective;
        if remaining == 0 || reflective <= 0.0 {
            return Color::ZERO;
        }

        let reflect_ray = Ray::with_time(comps.over_point, comps.reflectv, comps.time);
        self.color_at_depth(&reflect_ray, remaining - 1) * reflective
    }

    /// Transmitted contribution; black once the budget is spent or under
    /// total internal reflection.
    pub fn refracted_color(&self, comps: &Computations, remaining: u32) -> Color {
        let transparency = self.scene.shape(comps.object).material.transparency;
        if remaining == 0 || transparency <= 0.0 {
            return Color::ZERO;
        }

        // Snell's law
        let n_ratio = comps.n1 / comps.n2;
        let cos_i = comps.eyev.dot(comps.normalv);
        let sin2_t = n_ratio * n_ratio * (1.0 - cos_i * cos_i);
        if sin2_t > 1.0 {
            return Color::ZERO;
        }

        let cos_t = (1.0 - sin2_t).sqrt();
        let direction = comps.normalv * (n_ratio * cos_i - cos_t) - comps.eyev * n_ratio;
        let refract_ray = Ray::with_time(comps.under_point, direction, comps.time);
        self.color_at_depth(&refract_ray, remaining - 1) * transparency
    }

    /// Whether `point` is shadowed from the world's light at time 0.
    pub fn is_shadowed(&self, point: DVec3) -> bool {
        match &self.light {
            Some(light) => self.is_shadowed_from(point, light.position(), 0.0),
            None => false,
        }
    }
}

impl Occluder for World {
    fn is_shadowed_from(&self, point: DVec3, light_position: DVec3, time: f64) -> bool {
        let v = light_position - point;
        let distance = v.length();
        let ray = Ray::with_time(point, v / distance, time);

        let xs = self.intersect(&ray);
        matches!(hit(&xs), Some(h) if h.t < distance)
    }
}
