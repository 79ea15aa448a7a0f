use itertools::iproduct;

use super::{
    common::EPSILON,
    matrix::Matrix4,
    ray::Ray,
    tuple::{point, Tuple},
};

/// Axis-aligned bounds in the local space of whatever owns them.
///
/// The default box is empty, spanning from +inf to -inf, so that the first
/// union with a point or box replaces it entirely.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoundingBox {
    /// The minimum extent of the bounds.
    pub p_min: Tuple,
    /// The maximum extent of the bounds.
    pub p_max: Tuple,
}

impl BoundingBox {
    /// Creates a new `BoundingBox` spanning `p0` and `p1`.
    pub fn new(p0: Tuple, p1: Tuple) -> Self {
        Self {
            p_min: point(p0.x.min(p1.x), p0.y.min(p1.y), p0.z.min(p1.z)),
            p_max: point(p0.x.max(p1.x), p0.y.max(p1.y), p0.z.max(p1.z)),
        }
    }

    /// Creates a new `BoundingBox` spanning all of space.
    pub fn infinite() -> Self {
        Self {
            p_min: point(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
            p_max: point(f64::INFINITY, f64::INFINITY, f64::INFINITY),
        }
    }

    /// Checks if this `BoundingBox` contains no points.
    pub fn is_empty(&self) -> bool {
        self.p_min.x > self.p_max.x || self.p_min.y > self.p_max.y || self.p_min.z > self.p_max.z
    }

    /// Checks if every extent of this `BoundingBox` is finite.
    pub fn is_finite(&self) -> bool {
        [self.p_min, self.p_max]
            .iter()
            .all(|p| p.x.is_finite() && p.y.is_finite() && p.z.is_finite())
    }

    /// Returns a `BoundingBox` that also encloses `p`.
    pub fn union_p(&self, p: Tuple) -> Self {
        Self {
            p_min: point(
                self.p_min.x.min(p.x),
                self.p_min.y.min(p.y),
                self.p_min.z.min(p.z),
            ),
            p_max: point(
                self.p_max.x.max(p.x),
                self.p_max.y.max(p.y),
                self.p_max.z.max(p.z),
            ),
        }
    }

    /// Returns a `BoundingBox` that also encloses `other`.
    pub fn union_b(&self, other: &BoundingBox) -> Self {
        if other.is_empty() {
            return *self;
        }
        self.union_p(other.p_min).union_p(other.p_max)
    }

    /// Checks if `p` lies inside this `BoundingBox`, boundary included.
    pub fn inside(&self, p: Tuple) -> bool {
        (0..3).all(|i| p[i] >= self.p_min[i] && p[i] <= self.p_max[i])
    }

    /// Checks if `other` lies entirely inside this `BoundingBox`, boundary included.
    pub fn contains_box(&self, other: &BoundingBox) -> bool {
        self.inside(other.p_min) && self.inside(other.p_max)
    }

    /// Returns the vector from `p_min` to `p_max`.
    pub fn diagonal(&self) -> Tuple {
        (self.p_max - self.p_min).as_vector()
    }

    /// Finds the axis with the longest extent. Ties go to x, then y.
    pub fn maximum_extent(&self) -> usize {
        let d = self.diagonal();
        if d.x >= d.y && d.x >= d.z {
            0
        } else if d.y >= d.z {
            1
        } else {
            2
        }
    }

    /// Splits this `BoundingBox` in half at the midpoint of its longest axis.
    pub fn split(&self) -> (BoundingBox, BoundingBox) {
        let axis = self.maximum_extent();
        let mid = self.p_min[axis] + self.diagonal()[axis] / 2.0;

        let mut left_max = self.p_max;
        left_max[axis] = mid;
        let mut right_min = self.p_min;
        right_min[axis] = mid;

        (
            BoundingBox {
                p_min: self.p_min,
                p_max: left_max,
            },
            BoundingBox {
                p_min: right_min,
                p_max: self.p_max,
            },
        )
    }

    /// Returns the bounds of this `BoundingBox` after mapping it through `m`.
    ///
    /// All eight corners are transformed and re-bounded. Boxes with an infinite
    /// extent stay infinite since their corners don't transform meaningfully.
    pub fn transformed(&self, m: &Matrix4) -> Self {
        if self.is_empty() {
            return *self;
        }
        if !self.is_finite() {
            return Self::infinite();
        }

        let (mi, ma) = (self.p_min, self.p_max);
        iproduct!([mi.x, ma.x], [mi.y, ma.y], [mi.z, ma.z])
            .map(|(x, y, z)| m * point(x, y, z))
            .fold(Self::default(), |bb, p| bb.union_p(p))
    }

    /// Checks if `ray` hits this `BoundingBox`.
    pub fn intersect(&self, ray: &Ray) -> bool {
        if self.is_empty() {
            return false;
        }

        let mut t_min = f64::NEG_INFINITY;
        let mut t_max = f64::INFINITY;
        for i in 0..3 {
            let (t0, t1) = check_axis(
                ray.origin[i],
                ray.direction[i],
                self.p_min[i],
                self.p_max[i],
            );
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return false;
            }
        }
        true
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self {
            p_min: point(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            p_max: point(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }
}

/// Finds the entry and exit `t` of a ray against the slab `[min, max]` on one axis.
///
/// A near-zero direction yields infinite bounds with the sign of the offset
/// instead of dividing by zero.
pub(crate) fn check_axis(origin: f64, direction: f64, min: f64, max: f64) -> (f64, f64) {
    let t_min_numerator = min - origin;
    let t_max_numerator = max - origin;

    let (t_min, t_max) = if direction.abs() >= EPSILON {
        (t_min_numerator / direction, t_max_numerator / direction)
    } else {
        (
            infinite_with_sign(t_min_numerator),
            infinite_with_sign(t_max_numerator),
        )
    };

    if t_min > t_max {
        (t_max, t_min)
    } else {
        (t_min, t_max)
    }
}

fn infinite_with_sign(v: f64) -> f64 {
    // 0 * inf would be NaN, a ray inside the slab plane counts as inside
    if v < 0.0 {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    }
}
