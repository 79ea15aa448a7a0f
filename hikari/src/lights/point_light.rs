use super::Light;
use crate::math::{Color, Tuple};

/// A light source with no size.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointLight {
    position: Tuple,
    intensity: Color,
}

impl PointLight {
    /// Creates a new `PointLight` at `position` with the given intensity.
    pub fn new(position: Tuple, intensity: Color) -> Self {
        Self {
            position,
            intensity,
        }
    }
}

impl Light for PointLight {
    fn intensity(&self) -> Color {
        self.intensity
    }

    fn position(&self) -> Tuple {
        self.position
    }

    fn usteps(&self) -> usize {
        1
    }

    fn vsteps(&self) -> usize {
        1
    }

    fn point_on_light(&self, _u: usize, _v: usize) -> Tuple {
        self.position
    }
}
