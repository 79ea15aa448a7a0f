#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use std::f64::consts::{FRAC_1_SQRT_2, PI};

    use hikari::{
        materials::Material,
        math::{
            point,
            transforms::{rotation_z, scaling, translation},
            vector, BoundingBox, Ray, Transform, Tuple,
        },
        shapes::{Cone, Cube, Cylinder, Plane, Primitive, Shape, ShapeFlags, SmoothTriangle, Sphere, Triangle},
    };

    fn ts(hits: &[hikari::shapes::LocalHit]) -> Vec<f64> {
        hits.iter().map(|h| h.t).collect()
    }

    fn ray(origin: Tuple, direction: Tuple) -> Ray {
        Ray::new(origin, direction.normalized())
    }

    #[test]
    fn defaults() {
        let s = Shape::sphere();
        assert!(s.transform().is_identity());
        assert_eq!(s.material().ambient, Material::default().ambient);
        assert_eq!(s.flags(), ShapeFlags::CASTS_SHADOW | ShapeFlags::RECEIVES_SHADOW);
        assert!(s.casts_shadow());
        assert!(s.receives_shadow());
        assert!(!s.is_group());
        assert!(s.children().is_empty());

        let s = Shape::sphere().casting_shadow(false);
        assert!(!s.casts_shadow());
        assert!(s.receives_shadow());
        let s = s.receiving_shadow(false).casting_shadow(true);
        assert!(s.casts_shadow());
        assert!(!s.receives_shadow());
    }

    #[test]
    fn transform_and_material() {
        let mut s = Shape::sphere();
        s.set_transform(translation(2.0, 3.0, 4.0));
        assert_eq!(s.transform(), &translation(2.0, 3.0, 4.0));
        assert_eq!(s.object_to_world(), &translation(2.0, 3.0, 4.0));

        let m = Material {
            ambient: 1.0,
            ..Material::default()
        };
        let s = s.with_material(m);
        assert_eq!(s.material().ambient, 1.0);
    }

    #[test]
    fn intersect_transformed() {
        let r = Ray::new(point(0.0, 0.0, -5.0), vector(0.0, 0.0, 1.0));

        let s = Shape::sphere().with_transform(scaling(2.0, 2.0, 2.0));
        let xs = s.intersect(&r);
        assert_eq!(xs.len(), 2);
        assert_eq!(xs[0].t, 3.0);
        assert_eq!(xs[1].t, 7.0);
        assert!(std::ptr::eq(xs[0].object, &s));

        let s = Shape::sphere().with_transform(translation(5.0, 0.0, 0.0));
        assert!(s.intersect(&r).is_empty());
    }

    #[test]
    fn normal_transformed() {
        let s = Shape::sphere().with_transform(translation(0.0, 1.0, 0.0));
        assert_abs_diff_eq!(
            s.normal_at(point(0.0, 1.70711, -0.70711), None),
            vector(0.0, 0.70711, -0.70711),
            epsilon = 1e-5
        );

        let s = Shape::sphere().with_transform(&scaling(1.0, 0.5, 1.0) * &rotation_z(PI / 5.0));
        assert_abs_diff_eq!(
            s.normal_at(point(0.0, FRAC_1_SQRT_2, -FRAC_1_SQRT_2), None),
            vector(0.0, 0.97014, -0.24254),
            epsilon = 1e-5
        );
    }

    #[test]
    fn sphere_intersect() {
        let cases = [
            (point(0.0, 0.0, -5.0), vec![4.0, 6.0]),
            (point(0.0, 1.0, -5.0), vec![5.0, 5.0]),
            (point(0.0, 2.0, -5.0), vec![]),
            (point(0.0, 0.0, 0.0), vec![-1.0, 1.0]),
            (point(0.0, 0.0, 5.0), vec![-6.0, -4.0]),
        ];
        for (origin, expected) in cases {
            let r = Ray::new(origin, vector(0.0, 0.0, 1.0));
            assert_eq!(ts(Sphere.local_intersect(&r).as_slice()), expected);
        }
    }

    #[test]
    fn sphere_normal() {
        let s = Shape::sphere();
        assert_eq!(s.normal_at(point(1.0, 0.0, 0.0), None), vector(1.0, 0.0, 0.0));
        assert_eq!(s.normal_at(point(0.0, 1.0, 0.0), None), vector(0.0, 1.0, 0.0));
        assert_eq!(s.normal_at(point(0.0, 0.0, 1.0), None), vector(0.0, 0.0, 1.0));
        let k = 3.0f64.sqrt() / 3.0;
        let n = s.normal_at(point(k, k, k), None);
        assert_abs_diff_eq!(n, vector(k, k, k), epsilon = 1e-12);
        assert_abs_diff_eq!(n, n.normalized(), epsilon = 1e-12);
        assert_eq!(
            Sphere.bounds(),
            BoundingBox::new(point(-1.0, -1.0, -1.0), point(1.0, 1.0, 1.0))
        );
    }

    #[test]
    fn plane() {
        let p = Plane;
        for n in [point(0.0, 0.0, 0.0), point(10.0, 0.0, -10.0), point(-5.0, 0.0, 150.0)] {
            assert_eq!(p.local_normal_at(n, None), vector(0.0, 1.0, 0.0));
        }

        // Parallel
        let r = Ray::new(point(0.0, 10.0, 0.0), vector(0.0, 0.0, 1.0));
        assert!(p.local_intersect(&r).is_empty());
        // Coplanar
        let r = Ray::new(point(0.0, 0.0, 0.0), vector(0.0, 0.0, 1.0));
        assert!(p.local_intersect(&r).is_empty());

        let r = Ray::new(point(0.0, 1.0, 0.0), vector(0.0, -1.0, 0.0));
        assert_eq!(ts(p.local_intersect(&r).as_slice()), vec![1.0]);
        let r = Ray::new(point(0.0, -1.0, 0.0), vector(0.0, 1.0, 0.0));
        assert_eq!(ts(p.local_intersect(&r).as_slice()), vec![1.0]);

        let bb = p.bounds();
        assert_eq!(bb.p_min.y, 0.0);
        assert_eq!(bb.p_max.y, 0.0);
        assert!(!bb.is_finite());
    }

    #[test]
    fn cube_intersect() {
        let cases = [
            (point(5.0, 0.5, 0.0), vector(-1.0, 0.0, 0.0), 4.0, 6.0),
            (point(-5.0, 0.5, 0.0), vector(1.0, 0.0, 0.0), 4.0, 6.0),
            (point(0.5, 5.0, 0.0), vector(0.0, -1.0, 0.0), 4.0, 6.0),
            (point(0.5, -5.0, 0.0), vector(0.0, 1.0, 0.0), 4.0, 6.0),
            (point(0.5, 0.0, 5.0), vector(0.0, 0.0, -1.0), 4.0, 6.0),
            (point(0.5, 0.0, -5.0), vector(0.0, 0.0, 1.0), 4.0, 6.0),
            (point(0.0, 0.5, 0.0), vector(0.0, 0.0, 1.0), -1.0, 1.0),
        ];
        for (origin, direction, t0, t1) in cases {
            let xs = Cube.local_intersect(&Ray::new(origin, direction));
            assert_eq!(ts(xs.as_slice()), vec![t0, t1], "{:?}", origin);
        }
    }

    #[test]
    fn cube_miss() {
        let cases = [
            (point(-2.0, 0.0, 0.0), vector(0.2673, 0.5345, 0.8018)),
            (point(0.0, -2.0, 0.0), vector(0.8018, 0.2673, 0.5345)),
            (point(0.0, 0.0, -2.0), vector(0.5345, 0.8018, 0.2673)),
            (point(2.0, 0.0, 2.0), vector(0.0, 0.0, -1.0)),
            (point(0.0, 2.0, 2.0), vector(0.0, -1.0, 0.0)),
            (point(2.0, 2.0, 0.0), vector(-1.0, 0.0, 0.0)),
        ];
        for (origin, direction) in cases {
            assert!(Cube.local_intersect(&Ray::new(origin, direction)).is_empty());
        }
    }

    #[test]
    fn cube_normal() {
        let cases = [
            (point(1.0, 0.5, -0.8), vector(1.0, 0.0, 0.0)),
            (point(-1.0, -0.2, 0.9), vector(-1.0, 0.0, 0.0)),
            (point(-0.4, 1.0, -0.1), vector(0.0, 1.0, 0.0)),
            (point(0.3, -1.0, -0.7), vector(0.0, -1.0, 0.0)),
            (point(-0.6, 0.3, 1.0), vector(0.0, 0.0, 1.0)),
            (point(0.4, 0.4, -1.0), vector(0.0, 0.0, -1.0)),
            (point(1.0, 1.0, 1.0), vector(1.0, 0.0, 0.0)),
            (point(-1.0, -1.0, -1.0), vector(-1.0, 0.0, 0.0)),
        ];
        for (p, n) in cases {
            assert_eq!(Cube.local_normal_at(p, None), n);
        }
    }

    #[test]
    fn cylinder_intersect() {
        let cyl = Cylinder::default();
        assert_eq!(cyl.minimum, f64::NEG_INFINITY);
        assert_eq!(cyl.maximum, f64::INFINITY);
        assert!(!cyl.closed);

        let misses = [
            (point(1.0, 0.0, 0.0), vector(0.0, 1.0, 0.0)),
            (point(0.0, 0.0, 0.0), vector(0.0, 1.0, 0.0)),
            (point(0.0, 0.0, -5.0), vector(1.0, 1.0, 1.0)),
        ];
        for (origin, direction) in misses {
            assert!(cyl.local_intersect(&ray(origin, direction)).is_empty());
        }

        let hits = [
            (point(1.0, 0.0, -5.0), vector(0.0, 0.0, 1.0), 5.0, 5.0),
            (point(0.0, 0.0, -5.0), vector(0.0, 0.0, 1.0), 4.0, 6.0),
            (point(0.5, 0.0, -5.0), vector(0.1, 1.0, 1.0), 6.80798, 7.08872),
        ];
        for (origin, direction, t0, t1) in hits {
            let xs = cyl.local_intersect(&ray(origin, direction));
            assert_eq!(xs.len(), 2);
            assert_abs_diff_eq!(xs.as_slice()[0].t, t0, epsilon = 1e-5);
            assert_abs_diff_eq!(xs.as_slice()[1].t, t1, epsilon = 1e-5);
        }
    }

    #[test]
    fn cylinder_truncated() {
        let cyl = Cylinder::new(1.0, 2.0, false);
        let cases = [
            (point(0.0, 1.5, 0.0), vector(0.1, 1.0, 0.0), 0),
            (point(0.0, 3.0, -5.0), vector(0.0, 0.0, 1.0), 0),
            (point(0.0, 0.0, -5.0), vector(0.0, 0.0, 1.0), 0),
            (point(0.0, 2.0, -5.0), vector(0.0, 0.0, 1.0), 0),
            (point(0.0, 1.0, -5.0), vector(0.0, 0.0, 1.0), 0),
            (point(0.0, 1.5, -2.0), vector(0.0, 0.0, 1.0), 2),
        ];
        for (origin, direction, count) in cases {
            assert_eq!(cyl.local_intersect(&ray(origin, direction)).len(), count);
        }
    }

    #[test]
    fn cylinder_capped() {
        let cyl = Cylinder::new(1.0, 2.0, true);
        let cases = [
            (point(0.0, 3.0, 0.0), vector(0.0, -1.0, 0.0)),
            (point(0.0, 3.0, -2.0), vector(0.0, -1.0, 2.0)),
            (point(0.0, 4.0, -2.0), vector(0.0, -1.0, 1.0)),
            (point(0.0, 0.0, -2.0), vector(0.0, 1.0, 2.0)),
            (point(0.0, -1.0, -2.0), vector(0.0, 1.0, 1.0)),
        ];
        for (origin, direction) in cases {
            assert_eq!(cyl.local_intersect(&ray(origin, direction)).len(), 2, "{:?}", origin);
        }
    }

    #[test]
    fn cylinder_normal() {
        let cyl = Cylinder::default();
        let cases = [
            (point(1.0, 0.0, 0.0), vector(1.0, 0.0, 0.0)),
            (point(0.0, 5.0, -1.0), vector(0.0, 0.0, -1.0)),
            (point(0.0, -2.0, 1.0), vector(0.0, 0.0, 1.0)),
            (point(-1.0, 1.0, 0.0), vector(-1.0, 0.0, 0.0)),
        ];
        for (p, n) in cases {
            assert_eq!(cyl.local_normal_at(p, None), n);
        }

        let cyl = Cylinder::new(1.0, 2.0, true);
        let cases = [
            (point(0.0, 1.0, 0.0), vector(0.0, -1.0, 0.0)),
            (point(0.5, 1.0, 0.0), vector(0.0, -1.0, 0.0)),
            (point(0.0, 1.0, 0.5), vector(0.0, -1.0, 0.0)),
            (point(0.0, 2.0, 0.0), vector(0.0, 1.0, 0.0)),
            (point(0.5, 2.0, 0.0), vector(0.0, 1.0, 0.0)),
            (point(0.0, 2.0, 0.5), vector(0.0, 1.0, 0.0)),
        ];
        for (p, n) in cases {
            assert_eq!(cyl.local_normal_at(p, None), n);
        }

        assert_eq!(
            cyl.bounds(),
            BoundingBox::new(point(-1.0, 1.0, -1.0), point(1.0, 2.0, 1.0))
        );
    }

    #[test]
    fn cone_intersect() {
        let cone = Cone::default();
        let cases = [
            (point(0.0, 0.0, -5.0), vector(0.0, 0.0, 1.0), 5.0, 5.0),
            (point(0.0, 0.0, -5.0), vector(1.0, 1.0, 1.0), 5.0, 5.0),
        ];
        for (origin, direction, t0, t1) in cases {
            // Unnormalized to keep the tangent discriminant exactly zero
            let xs = cone.local_intersect(&Ray::new(origin, direction));
            assert_eq!(ts(xs.as_slice()), vec![t0, t1]);
        }

        let xs = cone.local_intersect(&ray(point(1.0, 1.0, -5.0), vector(-0.5, -1.0, 1.0)));
        assert_eq!(xs.len(), 2);
        assert_abs_diff_eq!(xs.as_slice()[0].t, 4.55006, epsilon = 1e-4);
        assert_abs_diff_eq!(xs.as_slice()[1].t, 49.44994, epsilon = 1e-4);

        // Parallel to one half
        let xs = cone.local_intersect(&ray(point(0.0, 0.0, -1.0), vector(0.0, 1.0, 1.0)));
        assert_eq!(xs.len(), 1);
        assert_abs_diff_eq!(xs.as_slice()[0].t, 0.35355, epsilon = 1e-5);
    }

    #[test]
    fn cone_capped() {
        let cone = Cone::new(-0.5, 0.5, true);
        let cases = [
            (point(0.0, 0.0, -5.0), vector(0.0, 1.0, 0.0), 0),
            (point(0.0, 0.0, -0.25), vector(0.0, 1.0, 1.0), 2),
            (point(0.0, 0.0, -0.25), vector(0.0, 1.0, 0.0), 4),
        ];
        for (origin, direction, count) in cases {
            assert_eq!(cone.local_intersect(&ray(origin, direction)).len(), count);
        }
    }

    #[test]
    fn cone_normal() {
        let cone = Cone::default();
        assert_eq!(
            cone.local_normal_at(point(0.0, 0.0, 0.0), None),
            vector(0.0, 1.0, 0.0)
        );
        assert_eq!(
            cone.local_normal_at(point(1.0, 1.0, 1.0), None),
            vector(1.0, -(2.0f64.sqrt()), 1.0)
        );
        assert_eq!(
            cone.local_normal_at(point(-1.0, -1.0, 0.0), None),
            vector(-1.0, 1.0, 0.0)
        );

        let cone = Cone::new(-1.0, 2.0, true);
        assert_eq!(
            cone.bounds(),
            BoundingBox::new(point(-2.0, -1.0, -2.0), point(2.0, 2.0, 2.0))
        );
    }

    fn triangle() -> Triangle {
        Triangle::new(
            point(0.0, 1.0, 0.0),
            point(-1.0, 0.0, 0.0),
            point(1.0, 0.0, 0.0),
        )
    }

    #[test]
    fn triangle_new() {
        let t = triangle();
        assert_eq!(t.e1, vector(-1.0, -1.0, 0.0));
        assert_eq!(t.e2, vector(1.0, -1.0, 0.0));
        assert_eq!(t.normal, vector(0.0, 0.0, -1.0));
        for p in [point(0.0, 0.5, 0.0), point(-0.5, 0.75, 0.0), point(0.5, 0.25, 0.0)] {
            assert_eq!(t.local_normal_at(p, None), t.normal);
        }
        assert_eq!(
            t.bounds(),
            BoundingBox::new(point(-1.0, 0.0, 0.0), point(1.0, 1.0, 0.0))
        );
    }

    #[test]
    fn triangle_intersect() {
        let t = triangle();
        let misses = [
            // Parallel
            (point(0.0, -1.0, -2.0), vector(0.0, 1.0, 0.0)),
            // Past each edge
            (point(1.0, 1.0, -2.0), vector(0.0, 0.0, 1.0)),
            (point(-1.0, 1.0, -2.0), vector(0.0, 0.0, 1.0)),
            (point(0.0, -1.0, -2.0), vector(0.0, 0.0, 1.0)),
        ];
        for (origin, direction) in misses {
            assert!(t.local_intersect(&Ray::new(origin, direction)).is_empty());
        }

        let xs = t.local_intersect(&Ray::new(point(0.0, 0.5, -2.0), vector(0.0, 0.0, 1.0)));
        assert_eq!(ts(xs.as_slice()), vec![2.0]);
        assert_eq!(xs.as_slice()[0].uv, None);
    }

    #[test]
    fn smooth_triangle() {
        let tri = SmoothTriangle::new(
            point(0.0, 1.0, 0.0),
            point(-1.0, 0.0, 0.0),
            point(1.0, 0.0, 0.0),
            vector(0.0, 1.0, 0.0),
            vector(-1.0, 0.0, 0.0),
            vector(1.0, 0.0, 0.0),
        );
        let xs = tri.local_intersect(&Ray::new(point(-0.2, 0.3, -2.0), vector(0.0, 0.0, 1.0)));
        assert_eq!(xs.len(), 1);
        let (u, v) = xs.as_slice()[0].uv.unwrap();
        assert_abs_diff_eq!(u, 0.45, epsilon = 1e-9);
        assert_abs_diff_eq!(v, 0.25, epsilon = 1e-9);

        let s = Shape::new(tri);
        assert_abs_diff_eq!(
            s.normal_at(point(0.0, 0.0, 0.0), Some((0.45, 0.25))),
            vector(-0.5547, 0.83205, 0.0),
            epsilon = 1e-5
        );
        // Falls back to the face normal without barycentrics
        assert_eq!(tri.local_normal_at(point(0.0, 0.5, 0.0), None), vector(0.0, 0.0, -1.0));
    }

    #[test]
    fn parent_space_bounds() {
        let s = Shape::sphere().with_transform(
            &translation(1.0, -3.0, 5.0) * &scaling(0.5, 2.0, 4.0),
        );
        assert_eq!(
            s.parent_space_bounds(),
            BoundingBox::new(point(0.5, -5.0, 1.0), point(1.5, -1.0, 9.0))
        );
        assert_eq!(s.bounds(), Sphere.bounds());
        assert_eq!(Shape::new(Cube).with_transform(Transform::default()).bounds(), Cube.bounds());
    }

    #[test]
    #[should_panic(expected = "add_child on a non-group shape")]
    fn add_child_to_primitive() {
        Shape::sphere().add_child(Shape::sphere());
    }
}
