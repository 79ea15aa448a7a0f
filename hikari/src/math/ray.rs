use super::{matrix::Matrix4, tuple::Tuple};

#[derive(Copy, PartialEq, Clone, Debug)]
pub struct Ray {
    pub origin: Tuple,
    pub direction: Tuple,
}

impl Ray {
    /// Creates a new `Ray`.
    pub fn new(origin: Tuple, direction: Tuple) -> Self {
        let ret = Self { origin, direction };
        debug_assert!(!ret.has_nans());
        ret
    }

    /// Checks if any of the members in this `Ray` contain NaNs.
    pub fn has_nans(&self) -> bool {
        self.origin.has_nans() || self.direction.has_nans()
    }

    /// Finds the point on this `Ray` at distance `t`.
    pub fn position(&self, t: f64) -> Tuple {
        self.origin + self.direction * t
    }

    /// Returns this `Ray` with both origin and direction multiplied by `m`.
    pub fn transformed(&self, m: &Matrix4) -> Self {
        Self {
            origin: m * self.origin,
            direction: m * self.direction,
        }
    }
}
