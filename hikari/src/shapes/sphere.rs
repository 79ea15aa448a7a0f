use super::{LocalHits, Primitive};
use crate::math::{point, BoundingBox, Ray, Tuple};

/// A unit sphere at the origin.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Sphere;

impl Primitive for Sphere {
    fn local_intersect(&self, ray: &Ray) -> LocalHits {
        let mut ret = LocalHits::default();

        let sphere_to_ray = ray.origin - point(0.0, 0.0, 0.0);

        // Quadratic coefficients
        let a = ray.direction.dot(ray.direction);
        let b = 2.0 * ray.direction.dot(sphere_to_ray);
        let c = sphere_to_ray.dot(sphere_to_ray) - 1.0;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return ret;
        }
        let rd = discriminant.sqrt();

        let t0 = (-b - rd) / (2.0 * a);
        let t1 = (-b + rd) / (2.0 * a);
        ret.push(t0.min(t1));
        ret.push(t0.max(t1));
        ret
    }

    fn local_normal_at(&self, p: Tuple, _uv: Option<(f64, f64)>) -> Tuple {
        p - point(0.0, 0.0, 0.0)
    }

    fn bounds(&self) -> BoundingBox {
        BoundingBox::new(point(-1.0, -1.0, -1.0), point(1.0, 1.0, 1.0))
    }
}
