use super::{LocalHits, Primitive};
use crate::math::{BoundingBox, Ray, Tuple, EPSILON};

/// A flat triangle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Triangle {
    pub p1: Tuple,
    pub p2: Tuple,
    pub p3: Tuple,
    pub e1: Tuple,
    pub e2: Tuple,
    pub normal: Tuple,
}

impl Triangle {
    /// Creates a new `Triangle` from its vertices.
    pub fn new(p1: Tuple, p2: Tuple, p3: Tuple) -> Self {
        let e1 = p2 - p1;
        let e2 = p3 - p1;
        Self {
            p1,
            p2,
            p3,
            e1,
            e2,
            normal: e2.cross(e1).normalized(),
        }
    }

    /// Moller-Trumbore. Returns `t` and the barycentric `(u, v)` of the hit.
    fn intersect_barycentric(&self, ray: &Ray) -> Option<(f64, f64, f64)> {
        let dir_cross_e2 = ray.direction.cross(self.e2);
        let det = self.e1.dot(dir_cross_e2);
        if det.abs() < EPSILON {
            return None;
        }

        let f = 1.0 / det;
        let p1_to_origin = (ray.origin - self.p1).as_vector();
        let u = f * p1_to_origin.dot(dir_cross_e2);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let origin_cross_e1 = p1_to_origin.cross(self.e1);
        let v = f * ray.direction.dot(origin_cross_e1);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * self.e2.dot(origin_cross_e1);
        Some((t, u, v))
    }

    fn vertex_bounds(&self) -> BoundingBox {
        BoundingBox::default()
            .union_p(self.p1)
            .union_p(self.p2)
            .union_p(self.p3)
    }
}

impl Primitive for Triangle {
    fn local_intersect(&self, ray: &Ray) -> LocalHits {
        let mut ret = LocalHits::default();
        if let Some((t, _, _)) = self.intersect_barycentric(ray) {
            ret.push(t);
        }
        ret
    }

    fn local_normal_at(&self, _p: Tuple, _uv: Option<(f64, f64)>) -> Tuple {
        self.normal
    }

    fn bounds(&self) -> BoundingBox {
        self.vertex_bounds()
    }
}

/// A triangle that interpolates its per-vertex normals across the face.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SmoothTriangle {
    pub triangle: Triangle,
    pub n1: Tuple,
    pub n2: Tuple,
    pub n3: Tuple,
}

impl SmoothTriangle {
    /// Creates a new `SmoothTriangle` from its vertices and their normals.
    pub fn new(p1: Tuple, p2: Tuple, p3: Tuple, n1: Tuple, n2: Tuple, n3: Tuple) -> Self {
        Self {
            triangle: Triangle::new(p1, p2, p3),
            n1,
            n2,
            n3,
        }
    }
}

impl Primitive for SmoothTriangle {
    fn local_intersect(&self, ray: &Ray) -> LocalHits {
        let mut ret = LocalHits::default();
        if let Some((t, u, v)) = self.triangle.intersect_barycentric(ray) {
            ret.push_uv(t, Some((u, v)));
        }
        ret
    }

    fn local_normal_at(&self, _p: Tuple, uv: Option<(f64, f64)>) -> Tuple {
        match uv {
            Some((u, v)) => self.n2 * u + self.n3 * v + self.n1 * (1.0 - u - v),
            None => self.triangle.normal,
        }
    }

    fn bounds(&self) -> BoundingBox {
        self.triangle.vertex_bounds()
    }
}
