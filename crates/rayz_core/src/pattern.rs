//! Procedural color functions evaluated in pattern space.
//!
//! A pattern is sampled by taking a world point into the shape's object
//! space (done by the renderer, which knows the shape hierarchy) and then
//! into pattern space through the pattern's own transform.

use std::sync::Arc;

use rayz_math::{DMat4, DVec3, MathResult, Transform};

use crate::{Color, Texture, UvMap};

/// The color function of a pattern.
#[derive(Clone, Debug, PartialEq)]
pub enum PatternKind {
    /// Alternates `a`/`b` with each unit step in x
    Stripe { a: Color, b: Color },
    /// Linear blend from `a` to `b` across each unit of x
    Gradient { a: Color, b: Color },
    /// Concentric rings in the xz plane
    Ring { a: Color, b: Color },
    /// 3D checkerboard of unit cubes
    Checkers { a: Color, b: Color },
    /// Returns the pattern-space point as a color, for debugging transforms
    Test,
    /// Image lookup through a UV mapping
    Texture { texture: Arc<Texture>, uv_map: UvMap },
}

/// A color function plus the transform that places it on a shape.
#[derive(Clone, Debug, PartialEq)]
pub struct Pattern {
    pub kind: PatternKind,
    transform: Transform,
}

impl Pattern {
    /// Create a pattern with an identity transform.
    pub fn new(kind: PatternKind) -> Self {
        Self {
            kind,
            transform: Transform::IDENTITY,
        }
    }

    pub fn stripe(a: Color, b: Color) -> Self {
        Self::new(PatternKind::Stripe { a, b })
    }

    pub fn gradient(a: Color, b: Color) -> Self {
        Self::new(PatternKind::Gradient { a, b })
    }

    pub fn ring(a: Color, b: Color) -> Self {
        Self::new(PatternKind::Ring { a, b })
    }

    pub fn checkers(a: Color, b: Color) -> Self {
        Self::new(PatternKind::Checkers { a, b })
    }

    pub fn test() -> Self {
        Self::new(PatternKind::Test)
    }

    pub fn texture_map(texture: Arc<Texture>, uv_map: UvMap) -> Self {
        Self::new(PatternKind::Texture { texture, uv_map })
    }

    /// Builder-style transform assignment.
    pub fn with_transform(mut self, matrix: DMat4) -> MathResult<Self> {
        self.set_transform(matrix)?;
        Ok(self)
    }

    /// Replace the pattern transform (and its cached inverse).
    pub fn set_transform(&mut self, matrix: DMat4) -> MathResult<()> {
        self.transform = Transform::new(matrix)?;
        Ok(())
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Color at a point already expressed in pattern space.
    pub fn pattern_at(&self, point: DVec3) -> Color {
        match &self.kind {
            PatternKind::Stripe { a, b } => {
                if is_even(point.x.floor()) {
                    *a
                } else {
                    *b
                }
            }
            PatternKind::Gradient { a, b } => {
                let fraction = point.x - point.x.floor();
                *a + (*b - *a) * fraction
            }
            PatternKind::Ring { a, b } => {
                let distance = (point.x * point.x + point.z * point.z).sqrt();
                if is_even(distance.floor()) {
                    *a
                } else {
                    *b
                }
            }
            PatternKind::Checkers { a, b } => {
                let sum = point.x.floor() + point.y.floor() + point.z.floor();
                if is_even(sum) {
                    *a
                } else {
                    *b
                }
            }
            PatternKind::Test => Color::new(point.x, point.y, point.z),
            PatternKind::Texture { texture, uv_map } => {
                let (u, v) = uv_map.map(point);
                texture.sample_uv(u, v)
            }
        }
    }

    /// Color at a point in the owning shape's object space.
    pub fn pattern_at_object(&self, object_point: DVec3) -> Color {
        let pattern_point = self.transform.inverse().transform_point3(object_point);
        self.pattern_at(pattern_point)
    }
}

/// Parity of an integral float.
#[inline]
fn is_even(value: f64) -> bool {
    value.rem_euclid(2.0) == 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Color = Color::ONE;
    const BLACK: Color = Color::ZERO;

    #[test]
    fn test_stripe_is_constant_in_y_and_z() {
        let pattern = Pattern::stripe(WHITE, BLACK);
        assert_eq!(pattern.pattern_at(DVec3::new(0.0, 1.0, 0.0)), WHITE);
        assert_eq!(pattern.pattern_at(DVec3::new(0.0, 2.0, 0.0)), WHITE);
        assert_eq!(pattern.pattern_at(DVec3::new(0.0, 0.0, 1.0)), WHITE);
        assert_eq!(pattern.pattern_at(DVec3::new(0.0, 0.0, 2.0)), WHITE);
    }

    #[test]
    fn test_stripe_alternates_in_x() {
        let pattern = Pattern::stripe(WHITE, BLACK);
        assert_eq!(pattern.pattern_at(DVec3::new(0.0, 0.0, 0.0)), WHITE);
        assert_eq!(pattern.pattern_at(DVec3::new(0.9, 0.0, 0.0)), WHITE);
        assert_eq!(pattern.pattern_at(DVec3::new(1.0, 0.0, 0.0)), BLACK);
        assert_eq!(pattern.pattern_at(DVec3::new(-0.1, 0.0, 0.0)), BLACK);
        assert_eq!(pattern.pattern_at(DVec3::new(-1.0, 0.0, 0.0)), BLACK);
        assert_eq!(pattern.pattern_at(DVec3::new(-1.1, 0.0, 0.0)), WHITE);
    }

    #[test]
    fn test_gradient_interpolates() {
        let pattern = Pattern::gradient(WHITE, BLACK);
        assert_eq!(pattern.pattern_at(DVec3::ZERO), WHITE);
        assert_eq!(
            pattern.pattern_at(DVec3::new(0.25, 0.0, 0.0)),
            Color::splat(0.75)
        );
        assert_eq!(
            pattern.pattern_at(DVec3::new(0.5, 0.0, 0.0)),
            Color::splat(0.5)
        );
        assert_eq!(
            pattern.pattern_at(DVec3::new(0.75, 0.0, 0.0)),
            Color::splat(0.25)
        );
    }

    #[test]
    fn test_ring_extends_in_x_and_z() {
        let pattern = Pattern::ring(WHITE, BLACK);
        assert_eq!(pattern.pattern_at(DVec3::ZERO), WHITE);
        assert_eq!(pattern.pattern_at(DVec3::new(1.0, 0.0, 0.0)), BLACK);
        assert_eq!(pattern.pattern_at(DVec3::new(0.0, 0.0, 1.0)), BLACK);
        // 0.708 = just slightly more than sqrt(2)/2
        assert_eq!(pattern.pattern_at(DVec3::new(0.708, 0.0, 0.708)), BLACK);
    }

    #[test]
    fn test_checkers_repeat_in_each_axis() {
        let pattern = Pattern::checkers(WHITE, BLACK);
        assert_eq!(pattern.pattern_at(DVec3::new(0.99, 0.0, 0.0)), WHITE);
        assert_eq!(pattern.pattern_at(DVec3::new(1.01, 0.0, 0.0)), BLACK);
        assert_eq!(pattern.pattern_at(DVec3::new(0.0, 0.99, 0.0)), WHITE);
        assert_eq!(pattern.pattern_at(DVec3::new(0.0, 1.01, 0.0)), BLACK);
        assert_eq!(pattern.pattern_at(DVec3::new(0.0, 0.0, 0.99)), WHITE);
        assert_eq!(pattern.pattern_at(DVec3::new(0.0, 0.0, 1.01)), BLACK);
    }

    #[test]
    fn test_pattern_transform_applies_before_lookup() {
        let pattern = Pattern::test()
            .with_transform(DMat4::from_scale(DVec3::splat(2.0)))
            .unwrap();
        assert_eq!(
            pattern.pattern_at_object(DVec3::new(2.0, 3.0, 4.0)),
            Color::new(1.0, 1.5, 2.0)
        );

        let pattern = Pattern::test()
            .with_transform(DMat4::from_translation(DVec3::new(0.5, 1.0, 1.5)))
            .unwrap();
        assert_eq!(
            pattern.pattern_at_object(DVec3::new(2.5, 3.0, 3.5)),
            Color::new(2.0, 2.0, 2.0)
        );
    }

    #[test]
    fn test_singular_pattern_transform_is_rejected() {
        let result = Pattern::test().with_transform(DMat4::ZERO);
        assert!(result.is_err());
    }
}
