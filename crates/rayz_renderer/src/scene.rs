//! Shape arena and scene-graph queries.
//!
//! Every shape, including groups and CSG nodes, lives in one `Vec` and is
//! addressed by [`ShapeId`]. Composites list their children by id and each
//! child stores its parent id, so world-space conversions walk the parent
//! chain at query time instead of baking flattened transforms.
//!
//! Composite bounds are cached and refreshed up the parent chain whenever a
//! child is added or a transform changes.

use rayz_core::Material;
use rayz_math::{Bounds, DMat4, DVec3, Ray, Transform};

use crate::csg::filter_intersections;
use crate::{
    sort_intersections, CsgOp, Intersection, SceneError, SceneResult, Shape, ShapeId, ShapeKind,
};

/// Owner of every shape in a world.
#[derive(Debug, Default)]
pub struct Scene {
    shapes: Vec<Shape>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of shapes, composites included.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Move a shape into the arena. It starts without a parent.
    pub fn add(&mut self, mut shape: Shape) -> ShapeId {
        shape.parent = None;
        let id = ShapeId(self.shapes.len());
        self.shapes.push(shape);
        log::debug!("Added shape {:?}", id);
        id
    }

    /// Panics if `id` did not come from this scene.
    pub fn shape(&self, id: ShapeId) -> &Shape {
        &self.shapes[id.0]
    }

    pub fn material_mut(&mut self, id: ShapeId) -> &mut Material {
        &mut self.shapes[id.0].material
    }

    pub fn set_material(&mut self, id: ShapeId, material: Material) {
        self.shapes[id.0].material = material;
    }

    /// Replace a shape's transform snapshot. Ancestors' bounds are refreshed.
    pub fn set_transform(&mut self, id: ShapeId, matrix: DMat4) -> SceneResult<()> {
        self.shapes[id.0].transform = Transform::new(matrix)?;
        if let Some(parent) = self.shapes[id.0].parent {
            self.refresh_bounds(parent);
        }
        Ok(())
    }

    /// Attach a motion transform sampled at each ray's time.
    pub fn set_motion(
        &mut self,
        id: ShapeId,
        motion: impl Fn(f64) -> DMat4 + Send + Sync + 'static,
    ) {
        self.shapes[id.0].motion = Some(std::sync::Arc::new(motion));
        if let Some(parent) = self.shapes[id.0].parent {
            self.refresh_bounds(parent);
        }
    }

    pub fn parent(&self, id: ShapeId) -> Option<ShapeId> {
        self.shapes[id.0].parent
    }

    /// Direct children of a group or CSG node; empty for primitives.
    pub fn children(&self, id: ShapeId) -> Vec<ShapeId> {
        match &self.shapes[id.0].kind {
            ShapeKind::Group { children } => children.clone(),
            ShapeKind::Csg { left, right, .. } => vec![*left, *right],
            ShapeKind::Primitive(_) => Vec::new(),
        }
    }

    /// Add `child` to `group`.
    pub fn add_child(&mut self, group: ShapeId, child: ShapeId) -> SceneResult<()> {
        if !matches!(self.shapes[group.0].kind, ShapeKind::Group { .. }) {
            return Err(SceneError::NotAComposite(group));
        }
        self.check_can_adopt(group, child)?;

        if let ShapeKind::Group { children } = &mut self.shapes[group.0].kind {
            children.push(child);
        }
        self.shapes[child.0].parent = Some(group);
        self.refresh_bounds(group);
        log::debug!("Added {:?} to group {:?}", child, group);
        Ok(())
    }

    /// Add a new group holding `children`, in order.
    pub fn add_group(&mut self, children: &[ShapeId]) -> SceneResult<ShapeId> {
        let group = self.add(Shape::group());
        for &child in children {
            self.add_child(group, child)?;
        }
        Ok(group)
    }

    /// Combine two unparented shapes into a new CSG node.
    pub fn csg(&mut self, op: CsgOp, left: ShapeId, right: ShapeId) -> SceneResult<ShapeId> {
        if left == right {
            return Err(SceneError::SelfParent(left));
        }
        for id in [left, right] {
            if self.shapes[id.0].parent.is_some() {
                return Err(SceneError::AlreadyParented(id));
            }
        }

        let id = self.add(Shape::with_kind(
            ShapeKind::Csg { op, left, right },
            Bounds::EMPTY,
        ));
        self.shapes[left.0].parent = Some(id);
        self.shapes[right.0].parent = Some(id);
        self.refresh_bounds(id);
        Ok(id)
    }

    fn check_can_adopt(&self, group: ShapeId, child: ShapeId) -> SceneResult<()> {
        if self.shapes[child.0].parent.is_some() {
            return Err(SceneError::AlreadyParented(child));
        }
        // The child may not be the group or one of its ancestors
        let mut current = Some(group);
        while let Some(id) = current {
            if id == child {
                return Err(SceneError::SelfParent(child));
            }
            current = self.shapes[id.0].parent;
        }
        Ok(())
    }

    /// Recompute cached bounds for `id` and every ancestor.
    fn refresh_bounds(&mut self, id: ShapeId) {
        let mut current = Some(id);
        while let Some(id) = current {
            let bounds = self
                .children(id)
                .into_iter()
                .fold(Bounds::EMPTY, |acc, child| {
                    acc.merge(&self.shapes[child.0].parent_space_bounds())
                });
            let shape = &mut self.shapes[id.0];
            if shape.is_composite() {
                shape.bounds = bounds;
            }
            current = shape.parent;
        }
    }

    /// Whether `other` is `id` or lives anywhere in its subtree.
    pub fn includes(&self, id: ShapeId, other: ShapeId) -> bool {
        let mut current = Some(other);
        while let Some(candidate) = current {
            if candidate == id {
                return true;
            }
            current = self.shapes[candidate.0].parent;
        }
        false
    }

    /// Convert a world-space point into `id`'s object space at `time`,
    /// applying the root's inverse first and this shape's last.
    pub fn world_to_object(&self, id: ShapeId, point: DVec3, time: f64) -> DVec3 {
        let shape = &self.shapes[id.0];
        let point = match shape.parent {
            Some(parent) => self.world_to_object(parent, point, time),
            None => point,
        };
        shape.transform_at(time).inverse().transform_point3(point)
    }

    /// Inverse of [`Scene::world_to_object`].
    pub fn object_to_world(&self, id: ShapeId, point: DVec3, time: f64) -> DVec3 {
        let shape = &self.shapes[id.0];
        let point = shape.transform_at(time).matrix().transform_point3(point);
        match shape.parent {
            Some(parent) => self.object_to_world(parent, point, time),
            None => point,
        }
    }

    /// Carry an object-space normal out to world space, renormalising at
    /// every level.
    pub fn normal_to_world(&self, id: ShapeId, normal: DVec3, time: f64) -> DVec3 {
        let shape = &self.shapes[id.0];
        let normal = shape
            .transform_at(time)
            .inverse_transpose()
            .transform_vector3(normal)
            .normalize();
        match shape.parent {
            Some(parent) => self.normal_to_world(parent, normal, time),
            None => normal,
        }
    }

    /// World-space unit normal of `id` at `world_point`, for a ray sampled
    /// at `time`.
    ///
    /// # Panics
    ///
    /// Groups and CSG nodes have no surface; asking for their normal is a bug.
    pub fn normal_at(
        &self,
        id: ShapeId,
        world_point: DVec3,
        time: f64,
        hit: Option<&Intersection>,
    ) -> DVec3 {
        let shape = &self.shapes[id.0];
        let local_point = self.world_to_object(id, world_point, time);

        let mut local_normal = match &shape.kind {
            ShapeKind::Primitive(primitive) => primitive.local_normal_at(local_point, hit),
            ShapeKind::Group { .. } => panic!("normal_at called on group {:?}", id),
            ShapeKind::Csg { .. } => panic!("normal_at called on CSG node {:?}", id),
        };

        if let Some(perturbation) = &shape.material.normal_perturbation {
            local_normal = perturbation.apply(local_point, local_normal);
        }

        self.normal_to_world(id, local_normal, time)
    }

    /// Color of `id`'s material at a world point, evaluating any pattern in
    /// object space and then pattern space.
    pub fn color_at_shape(
        &self,
        id: ShapeId,
        material: &Material,
        world_point: DVec3,
        time: f64,
    ) -> DVec3 {
        match &material.pattern {
            Some(_) => material.color_at_object(self.world_to_object(id, world_point, time)),
            None => material.color,
        }
    }

    /// All hits of a world ray with `id`, sorted by `t`.
    pub fn intersect(&self, id: ShapeId, ray: &Ray) -> Vec<Intersection> {
        let mut xs = Vec::new();
        self.intersect_into(id, ray, &mut xs);
        sort_intersections(&mut xs);
        xs
    }

    /// Append the hits of `ray` (in the parent's space) with `id` to `xs`.
    pub(crate) fn intersect_into(&self, id: ShapeId, ray: &Ray, xs: &mut Vec<Intersection>) {
        let shape = &self.shapes[id.0];
        let local_ray = ray.transform(shape.transform_at(ray.time).inverse());

        match &shape.kind {
            ShapeKind::Primitive(primitive) => primitive.local_intersect(&local_ray, id, xs),
            ShapeKind::Group { children } => {
                if !shape.bounds.intersects(&local_ray) {
                    return;
                }
                for &child in children {
                    self.intersect_into(child, &local_ray, xs);
                }
            }
            ShapeKind::Csg { op, left, right } => {
                if !shape.bounds.intersects(&local_ray) {
                    return;
                }
                let mut both = Vec::new();
                self.intersect_into(*left, &local_ray, &mut both);
                self.intersect_into(*right, &local_ray, &mut both);
                sort_intersections(&mut both);
                xs.extend(filter_intersections(self, *op, *left, &both));
            }
        }
    }
}
