use super::{LocalHits, Primitive};
use crate::math::{check_axis, point, vector, BoundingBox, Ray, Tuple};

/// An axis-aligned cube spanning [-1, 1] on every axis.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Cube;

impl Primitive for Cube {
    fn local_intersect(&self, ray: &Ray) -> LocalHits {
        let mut ret = LocalHits::default();

        let (xt_min, xt_max) = check_axis(ray.origin.x, ray.direction.x, -1.0, 1.0);
        let (yt_min, yt_max) = check_axis(ray.origin.y, ray.direction.y, -1.0, 1.0);
        let (zt_min, zt_max) = check_axis(ray.origin.z, ray.direction.z, -1.0, 1.0);

        let t_min = xt_min.max(yt_min).max(zt_min);
        let t_max = xt_max.min(yt_max).min(zt_max);
        if t_min > t_max {
            return ret;
        }

        ret.push(t_min);
        ret.push(t_max);
        ret
    }

    fn local_normal_at(&self, p: Tuple, _uv: Option<(f64, f64)>) -> Tuple {
        let max_c = p.x.abs().max(p.y.abs()).max(p.z.abs());
        if max_c == p.x.abs() {
            vector(p.x, 0.0, 0.0)
        } else if max_c == p.y.abs() {
            vector(0.0, p.y, 0.0)
        } else {
            vector(0.0, 0.0, p.z)
        }
    }

    fn bounds(&self) -> BoundingBox {
        BoundingBox::new(point(-1.0, -1.0, -1.0), point(1.0, 1.0, 1.0))
    }
}
