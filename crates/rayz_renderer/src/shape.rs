//! Shape nodes and the primitive trait.

use std::fmt;
use std::sync::Arc;

use rayz_core::Material;
use rayz_math::{Bounds, DMat4, DVec3, MathResult, Ray, Transform};

use crate::{CsgOp, Cube, Intersection, Plane, Sphere};

/// Stable handle to a shape stored in a [`Scene`](crate::Scene).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(pub usize);

/// Time-dependent transform, applied on top of the shape's own transform.
pub type MotionFn = Arc<dyn Fn(f64) -> DMat4 + Send + Sync>;

/// Trait for surfaces defined in their own object space.
///
/// Implementors only ever see rays and points that have already been moved
/// into local space by the owning shape.
pub trait Primitive: Send + Sync + fmt::Debug {
    /// Append every hit of `ray` with this surface to `xs`, tagged with `id`.
    fn local_intersect(&self, ray: &Ray, id: ShapeId, xs: &mut Vec<Intersection>);

    /// Surface normal at a local point. `hit` is the intersection that
    /// produced the point, when known.
    fn local_normal_at(&self, point: DVec3, hit: Option<&Intersection>) -> DVec3;

    /// Local-space bounding box.
    fn bounds(&self) -> Bounds;
}

/// What a shape node is.
#[derive(Debug)]
pub enum ShapeKind {
    /// A surface-bearing leaf
    Primitive(Box<dyn Primitive>),
    /// Scene-graph composite; its transform applies to every child
    Group { children: Vec<ShapeId> },
    /// Boolean combination of two subtrees
    Csg {
        op: CsgOp,
        left: ShapeId,
        right: ShapeId,
    },
}

/// A node in the scene arena: geometry plus transform and material.
pub struct Shape {
    pub(crate) kind: ShapeKind,
    pub(crate) transform: Transform,
    pub material: Material,
    pub(crate) parent: Option<ShapeId>,
    pub(crate) motion: Option<MotionFn>,
    /// Local-space bounds, kept current by the scene
    pub(crate) bounds: Bounds,
}

impl Shape {
    /// Wrap a primitive with an identity transform and default material.
    pub fn new(primitive: impl Primitive + 'static) -> Self {
        let bounds = primitive.bounds();
        Self::with_kind(ShapeKind::Primitive(Box::new(primitive)), bounds)
    }

    pub fn sphere() -> Self {
        Self::new(Sphere)
    }

    pub fn glass_sphere() -> Self {
        Self::sphere().with_material(Material::glass())
    }

    pub fn plane() -> Self {
        Self::new(Plane)
    }

    pub fn cube() -> Self {
        Self::new(Cube)
    }

    /// An empty group.
    pub fn group() -> Self {
        Self::with_kind(
            ShapeKind::Group {
                children: Vec::new(),
            },
            Bounds::EMPTY,
        )
    }

    pub(crate) fn with_kind(kind: ShapeKind, bounds: Bounds) -> Self {
        Self {
            kind,
            transform: Transform::IDENTITY,
            material: Material::default(),
            parent: None,
            motion: None,
            bounds,
        }
    }

    /// Builder-style transform assignment; fails on a singular matrix.
    pub fn with_transform(mut self, matrix: DMat4) -> MathResult<Self> {
        self.transform = Transform::new(matrix)?;
        Ok(self)
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Attach a motion transform sampled at each ray's time.
    pub fn with_motion(mut self, motion: impl Fn(f64) -> DMat4 + Send + Sync + 'static) -> Self {
        self.motion = Some(Arc::new(motion));
        self
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn parent(&self) -> Option<ShapeId> {
        self.parent
    }

    /// Local-space bounds. For groups and CSG nodes this covers every child.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Bounds in the parent's space.
    ///
    /// Shapes with a motion transform can be anywhere, so they report
    /// infinite bounds and are never pruned.
    pub fn parent_space_bounds(&self) -> Bounds {
        if self.motion.is_some() {
            return Bounds::INFINITE;
        }
        self.bounds.transform(self.transform.matrix())
    }

    pub fn is_composite(&self) -> bool {
        !matches!(self.kind, ShapeKind::Primitive(_))
    }

    /// Effective transform at `time`, with any motion applied on top.
    pub(crate) fn transform_at(&self, time: f64) -> Transform {
        match &self.motion {
            // Degenerate motion samples fall back to the static transform
            Some(motion) => {
                Transform::new(motion(time) * *self.transform.matrix()).unwrap_or(self.transform)
            }
            None => self.transform,
        }
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shape")
            .field("kind", &self.kind)
            .field("transform", self.transform.matrix())
            .field("material", &self.material)
            .field("parent", &self.parent)
            .field("motion", &self.motion.is_some())
            .field("bounds", &self.bounds)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_shape() {
        let s = Shape::sphere();
        assert_eq!(*s.transform().matrix(), DMat4::IDENTITY);
        assert_eq!(s.material, Material::default());
        assert!(s.parent().is_none());
        assert!(!s.is_composite());
    }

    #[test]
    fn test_with_transform_caches_inverse() {
        let m = DMat4::from_translation(DVec3::new(2.0, 3.0, 4.0));
        let s = Shape::sphere().with_transform(m).unwrap();
        assert_eq!(*s.transform().matrix(), m);
        assert_eq!(*s.transform().inverse(), m.inverse());
    }

    #[test]
    fn test_singular_transform_rejected() {
        let m = DMat4::from_scale(DVec3::new(1.0, 0.0, 1.0));
        assert!(Shape::sphere().with_transform(m).is_err());
    }

    #[test]
    fn test_parent_space_bounds() {
        let s = Shape::sphere()
            .with_transform(
                DMat4::from_translation(DVec3::new(1.0, -3.0, 5.0))
                    * DMat4::from_scale(DVec3::new(0.5, 2.0, 4.0)),
            )
            .unwrap();
        let b = s.parent_space_bounds();
        assert!((b.min - DVec3::new(0.5, -5.0, 1.0)).length() < 1e-9);
        assert!((b.max - DVec3::new(1.5, -1.0, 9.0)).length() < 1e-9);
    }

    #[test]
    fn test_moving_shape_is_unbounded() {
        let s = Shape::sphere().with_motion(|t| DMat4::from_translation(DVec3::new(t, 0.0, 0.0)));
        assert_eq!(s.parent_space_bounds(), Bounds::INFINITE);
        let moved = s.transform_at(2.0);
        let origin = moved.inverse().transform_point3(DVec3::new(2.0, 0.0, 0.0));
        assert!(origin.length() < 1e-12);
        assert_eq!(s.transform_at(0.0), *s.transform());
    }

    #[test]
    fn test_glass_sphere() {
        let s = Shape::glass_sphere();
        assert_eq!(s.material.transparency, 1.0);
        assert_eq!(s.material.refractive_index, 1.5);
    }
}
