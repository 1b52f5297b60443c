//! Constructive solid geometry.
//!
//! A CSG node keeps only the hits of its two children that lie on the
//! surface of the combined solid. Hits alternate between entering and
//! leaving each child, so one ordered scan with two inside flags is enough
//! to classify them.

use crate::{Intersection, Scene, ShapeId};

/// Boolean operation of a CSG node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CsgOp {
    Union,
    Intersection,
    Difference,
}

/// Whether a hit survives `op`.
///
/// `lhit` says the hit belongs to the left child; `inl` and `inr` say
/// whether the ray is currently inside the left and right child.
pub fn intersection_allowed(op: CsgOp, lhit: bool, inl: bool, inr: bool) -> bool {
    match op {
        CsgOp::Union => (lhit && !inr) || (!lhit && !inl),
        CsgOp::Intersection => (lhit && inr) || (!lhit && inl),
        CsgOp::Difference => (lhit && !inr) || (!lhit && inl),
    }
}

/// Filter hits sorted by `t` down to those on the combined surface.
pub(crate) fn filter_intersections(
    scene: &Scene,
    op: CsgOp,
    left: ShapeId,
    xs: &[Intersection],
) -> Vec<Intersection> {
    let mut inl = false;
    let mut inr = false;
    let mut result = Vec::new();

    for i in xs {
        let lhit = scene.includes(left, i.object);

        if intersection_allowed(op, lhit, inl, inr) {
            result.push(*i);
        }

        if lhit {
            inl = !inl;
        } else {
            inr = !inr;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SceneError, Shape};
    use rayz_math::{DMat4, DVec3, Ray};

    #[test]
    fn test_truth_table() {
        use CsgOp::*;
        // (op, lhit, inl, inr, expected)
        let table = [
            (Union, true, true, true, false),
            (Union, true, true, false, true),
            (Union, true, false, true, false),
            (Union, true, false, false, true),
            (Union, false, true, true, false),
            (Union, false, true, false, false),
            (Union, false, false, true, true),
            (Union, false, false, false, true),
            (Intersection, true, true, true, true),
            (Intersection, true, true, false, false),
            (Intersection, true, false, true, true),
            (Intersection, true, false, false, false),
            (Intersection, false, true, true, true),
            (Intersection, false, true, false, true),
            (Intersection, false, false, true, false),
            (Intersection, false, false, false, false),
            (Difference, true, true, true, false),
            (Difference, true, true, false, true),
            (Difference, true, false, true, false),
            (Difference, true, false, false, true),
            (Difference, false, true, true, true),
            (Difference, false, true, false, true),
            (Difference, false, false, true, false),
            (Difference, false, false, false, false),
        ];
        for (op, lhit, inl, inr, expected) in table {
            assert_eq!(
                intersection_allowed(op, lhit, inl, inr),
                expected,
                "{op:?} lhit={lhit} inl={inl} inr={inr}"
            );
        }
    }

    #[test]
    fn test_csg_parents_children() {
        let mut scene = Scene::new();
        let s1 = scene.add(Shape::sphere());
        let s2 = scene.add(Shape::cube());
        let c = scene.csg(CsgOp::Union, s1, s2).unwrap();

        assert_eq!(scene.parent(s1), Some(c));
        assert_eq!(scene.parent(s2), Some(c));
        assert_eq!(scene.children(c), vec![s1, s2]);
    }

    #[test]
    fn test_csg_rejects_shared_children() {
        let mut scene = Scene::new();
        let s1 = scene.add(Shape::sphere());
        let s2 = scene.add(Shape::cube());
        assert_eq!(scene.csg(CsgOp::Union, s1, s1), Err(SceneError::SelfParent(s1)));
        scene.csg(CsgOp::Union, s1, s2).unwrap();
        let s3 = scene.add(Shape::sphere());
        assert_eq!(
            scene.csg(CsgOp::Difference, s1, s3),
            Err(SceneError::AlreadyParented(s1))
        );
    }

    #[test]
    fn test_filter_by_operation() {
        let mut scene = Scene::new();
        let s1 = scene.add(Shape::sphere());
        let s2 = scene.add(Shape::cube());
        let xs = [
            Intersection::new(1.0, s1),
            Intersection::new(2.0, s2),
            Intersection::new(3.0, s1),
            Intersection::new(4.0, s2),
        ];

        let expectations = [
            (CsgOp::Union, [0, 3]),
            (CsgOp::Intersection, [1, 2]),
            (CsgOp::Difference, [0, 1]),
        ];
        for (op, [x0, x1]) in expectations {
            let result = filter_intersections(&scene, op, s1, &xs);
            assert_eq!(result, vec![xs[x0], xs[x1]], "{op:?}");
        }
    }

    #[test]
    fn test_filter_through_nested_children() {
        // Left child is a group; hits on its descendants count as left hits
        let mut scene = Scene::new();
        let inner = scene.add(Shape::sphere());
        let group = scene.add_group(&[inner]).unwrap();
        let right = scene.add(Shape::cube());
        scene.csg(CsgOp::Difference, group, right).unwrap();

        let xs = [
            Intersection::new(1.0, inner),
            Intersection::new(2.0, right),
            Intersection::new(3.0, inner),
            Intersection::new(4.0, right),
        ];
        let result = filter_intersections(&scene, CsgOp::Difference, group, &xs);
        assert_eq!(result, vec![xs[0], xs[1]]);
    }

    #[test]
    fn test_ray_misses_csg() {
        let mut scene = Scene::new();
        let s1 = scene.add(Shape::sphere());
        let s2 = scene.add(Shape::cube());
        let c = scene.csg(CsgOp::Union, s1, s2).unwrap();
        let ray = Ray::new(DVec3::new(0.0, 2.0, -5.0), DVec3::Z);
        assert!(scene.intersect(c, &ray).is_empty());
    }

    #[test]
    fn test_ray_hits_csg() {
        let mut scene = Scene::new();
        let s1 = scene.add(Shape::sphere());
        let s2 = scene.add(
            Shape::sphere()
                .with_transform(DMat4::from_translation(DVec3::new(0.0, 0.0, 0.5)))
                .unwrap(),
        );
        let c = scene.csg(CsgOp::Union, s1, s2).unwrap();
        let ray = Ray::new(DVec3::new(0.0, 0.0, -5.0), DVec3::Z);

        let xs = scene.intersect(c, &ray);
        assert_eq!(xs.len(), 2);
        assert!((xs[0].t - 4.0).abs() < 1e-9);
        assert_eq!(xs[0].object, s1);
        assert!((xs[1].t - 6.5).abs() < 1e-9);
        assert_eq!(xs[1].object, s2);
    }

    #[test]
    fn test_difference_corner_keeps_cube_hits() {
        let mut scene = Scene::new();
        let cube = scene.add(Shape::cube());
        let sphere = scene.add(
            Shape::sphere()
                .with_transform(DMat4::from_scale(DVec3::splat(0.8)))
                .unwrap(),
        );
        let c = scene.csg(CsgOp::Difference, cube, sphere).unwrap();

        // Passes through the cube's corner region, clear of the sphere
        let ray = Ray::new(DVec3::new(0.9, 0.9, -5.0), DVec3::Z);
        let xs = scene.intersect(c, &ray);
        let cube_only = scene.intersect(cube, &ray);
        assert_eq!(xs, cube_only);
        assert_eq!(xs.len(), 2);
    }

    #[test]
    fn test_difference_never_hits_inside_subtracted_shape() {
        let mut scene = Scene::new();
        let cube = scene.add(Shape::cube());
        let sphere = scene.add(
            Shape::sphere()
                .with_transform(DMat4::from_scale(DVec3::splat(0.8)))
                .unwrap(),
        );
        let c = scene.csg(CsgOp::Difference, cube, sphere).unwrap();

        let ray = Ray::new(DVec3::new(0.0, 0.0, -5.0), DVec3::Z);
        let ts: Vec<f64> = scene.intersect(c, &ray).iter().map(|i| i.t).collect();
        assert_eq!(ts.len(), 4);
        for t in ts {
            let p = ray.position(t);
            assert!(p.length() >= 0.8 - 1e-9);
        }
    }
}
