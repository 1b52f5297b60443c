//! Rayz Renderer - Whitted-style CPU ray tracing
//!
//! Shapes live in an arena ([`Scene`]) and refer to each other by
//! [`ShapeId`]. Groups and CSG nodes own their children by id, children
//! point back at their parent, and world-space queries walk that chain.
//!
//! Shading follows the classic recursive scheme: direct Phong lighting
//! plus reflected and refracted rays, with an explicit bounce budget
//! threaded through every call.

mod camera;
mod canvas;
mod cone;
mod csg;
mod cube;
mod cylinder;
mod error;
mod intersection;
mod lighting;
mod plane;
mod renderer;
mod scene;
mod shape;
mod sphere;
mod test_shape;
mod torus;
mod triangle;
mod world;

pub use camera::Camera;
pub use canvas::Canvas;
pub use cone::Cone;
pub use csg::{intersection_allowed, CsgOp};
pub use cube::Cube;
pub use cylinder::Cylinder;
pub use error::{RenderError, RenderResult, SceneError, SceneResult};
pub use intersection::{hit, prepare_computations, schlick, sort_intersections, Computations, Intersection};
pub use lighting::lighting;
pub use plane::Plane;
pub use renderer::{render, RenderConfig};
pub use scene::Scene;
pub use shape::{MotionFn, Primitive, Shape, ShapeId, ShapeKind};
pub use sphere::Sphere;
pub use test_shape::TestShape;
pub use torus::Torus;
pub use triangle::{SmoothTriangle, Triangle};
pub use world::{World, DEFAULT_MAX_DEPTH};

/// Re-export common math and scene value types
pub use rayz_core::{
    AreaLight, Color, Light, Material, NormalPerturbation, Occluder, Pattern, PointLight, Spotlight,
    Texture, UvMap,
};
pub use rayz_math::{shearing, view_transform, Bounds, DMat4, DVec3, Ray, EPSILON};
