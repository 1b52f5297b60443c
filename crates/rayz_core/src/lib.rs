//! Rayz Core - Scene description values for the Rayz ray tracer.
//!
//! This crate provides the parts of a scene that do not depend on
//! geometry:
//!
//! - **Materials**: `Material` (Phong parameters, reflection, refraction)
//! - **Patterns**: procedural and texture-mapped surface colors
//! - **Normal perturbations**: procedural bump mapping
//! - **Lights**: point, area and spot lights behind one `Light` type
//!
//! # Example
//!
//! ```ignore
//! use rayz_core::{Material, Pattern, Color};
//!
//! let floor = Material {
//!     pattern: Some(Pattern::checkers(Color::ONE, Color::ZERO)),
//!     reflective: 0.3,
//!     ..Default::default()
//! };
//! ```

pub mod light;
pub mod material;
pub mod pattern;
pub mod perturbation;
pub mod texture;

// Re-export commonly used types
pub use light::{AreaLight, Light, Occluder, PointLight, Spotlight};
pub use material::{Color, Material};
pub use pattern::{Pattern, PatternKind};
pub use perturbation::NormalPerturbation;
pub use texture::{Texture, TextureError, TextureResult, UvMap};
