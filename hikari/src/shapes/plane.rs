use super::{LocalHits, Primitive};
use crate::math::{point, vector, BoundingBox, Ray, Tuple, EPSILON};

/// The xz-plane through the origin.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Plane;

impl Primitive for Plane {
    fn local_intersect(&self, ray: &Ray) -> LocalHits {
        let mut ret = LocalHits::default();
        // Parallel and coplanar rays both miss
        if ray.direction.y.abs() < EPSILON {
            return ret;
        }
        ret.push(-ray.origin.y / ray.direction.y);
        ret
    }

    fn local_normal_at(&self, _p: Tuple, _uv: Option<(f64, f64)>) -> Tuple {
        vector(0.0, 1.0, 0.0)
    }

    fn bounds(&self) -> BoundingBox {
        BoundingBox::new(
            point(f64::NEG_INFINITY, 0.0, f64::NEG_INFINITY),
            point(f64::INFINITY, 0.0, f64::INFINITY),
        )
    }
}
