//! Simple ray tracer example.
//!
//! Renders a small scene with a checkered floor, a glass ball, a carved
//! cube and a torus, and saves it as a PNG.
//!
//! Usage: cargo run --example simple_render -- [output.png] [threads]

use std::f64::consts::FRAC_PI_3;

use anyhow::{anyhow, Context, Result};
use rayz_renderer::{
    render, view_transform, AreaLight, Camera, Color, CsgOp, Cylinder, DMat4, DVec3, Material,
    Pattern, RenderConfig, Shape, Torus, World,
};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let output = args.next().unwrap_or_else(|| "output.png".to_string());
    let threads = args
        .next()
        .map(|s| s.parse::<usize>())
        .transpose()
        .context("Thread count must be a positive integer")?;

    let start = std::time::Instant::now();
    let world = build_scene()?;
    log::info!(
        "Scene built in {:?} ({} shapes)",
        start.elapsed(),
        world.scene.len()
    );

    let camera = Camera::new(640, 400, FRAC_PI_3).with_transform(view_transform(
        DVec3::new(0.0, 2.5, -8.0),
        DVec3::new(0.0, 1.0, 0.0),
        DVec3::Y,
    ))?;

    let config = RenderConfig {
        threads,
        ..RenderConfig::default()
    };
    let canvas = render(&camera, &world, &config)?;

    let image = image::RgbaImage::from_raw(canvas.width(), canvas.height(), canvas.to_rgba8())
        .ok_or_else(|| anyhow!("Canvas size does not match its pixel buffer"))?;
    image
        .save(&output)
        .with_context(|| format!("Failed to save {}", output))?;
    log::info!("Saved to {}", output);

    Ok(())
}

fn build_scene() -> Result<World> {
    let mut world = World::new();
    world.background = Color::new(0.05, 0.05, 0.08);
    world.light = Some(
        AreaLight::new(
            DVec3::new(-6.0, 8.0, -6.0),
            DVec3::new(2.0, 0.0, 0.0),
            4,
            DVec3::new(0.0, 2.0, 0.0),
            4,
            Color::splat(1.2),
        )
        .into(),
    );

    // Floor
    world.add_shape(Shape::plane().with_material(Material {
        pattern: Some(
            Pattern::checkers(Color::splat(0.9), Color::splat(0.15))
                .with_transform(DMat4::from_scale(DVec3::splat(0.75)))?,
        ),
        reflective: 0.15,
        specular: 0.1,
        ..Material::default()
    }));

    // Glass ball
    world.add_shape(
        Shape::glass_sphere()
            .with_material(Material {
                color: Color::splat(0.05),
                ambient: 0.0,
                diffuse: 0.1,
                reflective: 0.9,
                transparency: 0.9,
                refractive_index: 1.5,
                ..Material::default()
            })
            .with_transform(DMat4::from_translation(DVec3::new(0.0, 1.0, 0.0)))?,
    );

    // Cube with a spherical bite taken out
    let cube = world.scene.add(
        Shape::cube().with_material(Material::new(Color::new(0.85, 0.35, 0.2))),
    );
    let bite = world.scene.add(
        Shape::sphere()
            .with_material(Material::new(Color::new(0.95, 0.8, 0.3)))
            .with_transform(
                DMat4::from_translation(DVec3::new(-0.6, 0.6, -0.6))
                    * DMat4::from_scale(DVec3::splat(0.9)),
            )?,
    );
    let carved = world.scene.csg(CsgOp::Difference, cube, bite)?;
    world.scene.set_transform(
        carved,
        DMat4::from_translation(DVec3::new(-2.5, 0.75, 0.5))
            * DMat4::from_rotation_y(0.5)
            * DMat4::from_scale(DVec3::splat(0.75)),
    )?;
    world.add_object(carved)?;

    // Torus resting on a short post
    let post = world.scene.add(
        Shape::new(Cylinder::new(0.0, 0.6, true))
            .with_material(Material::new(Color::new(0.3, 0.3, 0.35)))
            .with_transform(DMat4::from_scale(DVec3::new(0.3, 1.0, 0.3)))?,
    );
    let ring = world.scene.add(
        Shape::new(Torus::new(0.8, 0.2))
            .with_material(Material {
                color: Color::new(0.2, 0.5, 0.9),
                reflective: 0.3,
                ..Material::default()
            })
            .with_transform(
                DMat4::from_translation(DVec3::new(0.0, 0.8, 0.0)) * DMat4::from_rotation_x(1.2),
            )?,
    );
    let stand = world.scene.add_group(&[post, ring])?;
    world
        .scene
        .set_transform(stand, DMat4::from_translation(DVec3::new(2.5, 0.0, 0.5)))?;
    world.add_object(stand)?;

    Ok(world)
}
