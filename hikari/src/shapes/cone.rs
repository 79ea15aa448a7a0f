use super::{cylinder::within_radius, LocalHits, Primitive};
use crate::math::{point, vector, BoundingBox, Ray, Tuple, EPSILON};

/// A double-napped cone around the y-axis with its apex at the origin.
///
/// The radius at height `y` is `|y|`. Like [`Cylinder`](super::Cylinder), it is
/// truncated to (`minimum`, `maximum`) and optionally capped.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Cone {
    pub minimum: f64,
    pub maximum: f64,
    pub closed: bool,
}

impl Cone {
    /// Creates a new `Cone`.
    pub fn new(minimum: f64, maximum: f64, closed: bool) -> Self {
        Self {
            minimum,
            maximum,
            closed,
        }
    }

    fn push_if_within(&self, ray: &Ray, t: f64, hits: &mut LocalHits) {
        let y = ray.origin.y + t * ray.direction.y;
        if self.minimum < y && y < self.maximum {
            hits.push(t);
        }
    }

    fn intersect_caps(&self, ray: &Ray, hits: &mut LocalHits) {
        if !self.closed || ray.direction.y.abs() < EPSILON {
            return;
        }

        for y in [self.minimum, self.maximum] {
            let t = (y - ray.origin.y) / ray.direction.y;
            if within_radius(ray, t, y.abs()) {
                hits.push(t);
            }
        }
    }
}

impl Default for Cone {
    fn default() -> Self {
        Self::new(f64::NEG_INFINITY, f64::INFINITY, false)
    }
}

impl Primitive for Cone {
    fn local_intersect(&self, ray: &Ray) -> LocalHits {
        let mut ret = LocalHits::default();
        let Ray { origin: o, direction: d } = *ray;

        let a = d.x * d.x - d.y * d.y + d.z * d.z;
        let b = 2.0 * (o.x * d.x - o.y * d.y + o.z * d.z);
        let c = o.x * o.x - o.y * o.y + o.z * o.z;

        if a.abs() < EPSILON {
            // Parallel to one of the halves, which leaves a single hit on the other
            if b.abs() >= EPSILON {
                self.push_if_within(ray, -c / (2.0 * b), &mut ret);
            }
        } else {
            let discriminant = b * b - 4.0 * a * c;
            if discriminant >= 0.0 {
                let rd = discriminant.sqrt();
                let t0 = (-b - rd) / (2.0 * a);
                let t1 = (-b + rd) / (2.0 * a);
                self.push_if_within(ray, t0.min(t1), &mut ret);
                self.push_if_within(ray, t0.max(t1), &mut ret);
            }
        }

        self.intersect_caps(ray, &mut ret);
        ret
    }

    fn local_normal_at(&self, p: Tuple, _uv: Option<(f64, f64)>) -> Tuple {
        let dist = p.x * p.x + p.z * p.z;
        if dist < self.maximum * self.maximum && p.y >= self.maximum - EPSILON {
            vector(0.0, 1.0, 0.0)
        } else if dist < self.minimum * self.minimum && p.y <= self.minimum + EPSILON {
            vector(0.0, -1.0, 0.0)
        } else if dist < EPSILON * EPSILON && p.y.abs() < EPSILON {
            // The apex has no defined normal, pick the axis so shading stays finite
            vector(0.0, 1.0, 0.0)
        } else {
            let mut y = dist.sqrt();
            if p.y > 0.0 {
                y = -y;
            }
            vector(p.x, y, p.z)
        }
    }

    fn bounds(&self) -> BoundingBox {
        let r = self.minimum.abs().max(self.maximum.abs());
        BoundingBox::new(point(-r, self.minimum, -r), point(r, self.maximum, r))
    }
}
