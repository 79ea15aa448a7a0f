use super::{LocalHits, Primitive};
use crate::math::{point, vector, BoundingBox, Ray, Tuple, EPSILON};

/// A unit-radius cylinder around the y-axis, truncated to the open interval
/// (`minimum`, `maximum`) and optionally capped at both ends.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cylinder {
    pub minimum: f64,
    pub maximum: f64,
    pub closed: bool,
}

impl Cylinder {
    /// Creates a new `Cylinder`.
    pub fn new(minimum: f64, maximum: f64, closed: bool) -> Self {
        Self {
            minimum,
            maximum,
            closed,
        }
    }

    fn intersect_caps(&self, ray: &Ray, hits: &mut LocalHits) {
        if !self.closed || ray.direction.y.abs() < EPSILON {
            return;
        }

        for y in [self.minimum, self.maximum] {
            let t = (y - ray.origin.y) / ray.direction.y;
            if within_radius(ray, t, 1.0) {
                hits.push(t);
            }
        }
    }
}

impl Default for Cylinder {
    fn default() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY, false)
    }
}

/// Checks if `ray` at `t` is within `radius` of the y-axis.
pub(super) fn within_radius(ray: &Ray, t: f64, radius: f64) -> bool {
    let x = ray.origin.x + t * ray.direction.x;
    let z = ray.origin.z + t * ray.direction.z;
    x * x + z * z <= radius * radius
}

impl Primitive for Cylinder {
    fn local_intersect(&self, ray: &Ray) -> LocalHits {
        let mut ret = LocalHits::default();
        let Ray { origin: o, direction: d } = *ray;

        let a = d.x * d.x + d.z * d.z;
        // Rays parallel to the y-axis can only hit the caps
        if a.abs() >= EPSILON {
            let b = 2.0 * (o.x * d.x + o.z * d.z);
            let c = o.x * o.x + o.z * o.z - 1.0;
            let discriminant = b * b - 4.0 * a * c;

            if discriminant >= 0.0 {
                let rd = discriminant.sqrt();
                let t0 = (-b - rd) / (2.0 * a);
                let t1 = (-b + rd) / (2.0 * a);
                for t in [t0.min(t1), t0.max(t1)] {
                    let y = o.y + t * d.y;
                    if self.minimum < y && y < self.maximum {
                        ret.push(t);
                    }
                }
            }
        }

        self.intersect_caps(ray, &mut ret);
        ret
    }

    fn local_normal_at(&self, p: Tuple, _uv: Option<(f64, f64)>) -> Tuple {
        let dist = p.x * p.x + p.z * p.z;
        if dist < 1.0 && p.y >= self.maximum - EPSILON {
            vector(0.0, 1.0, 0.0)
        } else if dist < 1.0 && p.y <= self.minimum + EPSILON {
            vector(0.0, -1.0, 0.0)
        } else {
            vector(p.x, 0.0, p.z)
        }
    }

    fn bounds(&self) -> BoundingBox {
        BoundingBox::new(
            point(-1.0, self.minimum, -1.0),
            point(1.0, self.maximum, 1.0),
        )
    }
}
