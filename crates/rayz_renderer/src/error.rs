//! Error types for scene assembly and rendering.

use rayz_math::MathError;
use thiserror::Error;

use crate::ShapeId;

/// Errors raised while building or editing a [`Scene`](crate::Scene).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("Invalid transform: {0}")]
    Math(#[from] MathError),

    #[error("Shape {0:?} is not a group and cannot take children")]
    NotAComposite(ShapeId),

    #[error("Shape {0:?} already has a parent")]
    AlreadyParented(ShapeId),

    #[error("Shape {0:?} cannot be placed inside itself")]
    SelfParent(ShapeId),
}

pub type SceneResult<T> = Result<T, SceneError>;

/// Errors raised while producing an image.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Pixel ({x}, {y}) is outside the {width}x{height} canvas")]
    PixelOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    #[error("Failed to start render workers: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

pub type RenderResult<T> = Result<T, RenderError>;
