use std::sync::atomic::{AtomicUsize, Ordering};

use super::Light;
use crate::{
    math::{Color, Tuple},
    patterns::Jitter,
};

/// Offsets in [0, 1) for placing samples inside their light cells.
#[derive(Debug)]
pub enum JitterSequence {
    /// Cycles through fixed values.
    Fixed {
        values: Vec<f64>,
        cursor: AtomicUsize,
    },
    Random(Jitter),
}

impl JitterSequence {
    /// Creates a new `JitterSequence` cycling through `values`.
    ///
    /// Panics if `values` is empty.
    pub fn fixed(values: Vec<f64>) -> Self {
        assert!(!values.is_empty(), "Empty jitter sequence");
        Self::Fixed {
            values,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Creates a new `JitterSequence` of random offsets seeded from `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::Random(Jitter::with_seed(seed))
    }

    /// Returns the next offset.
    pub fn sample(&self) -> f64 {
        match self {
            JitterSequence::Fixed { values, cursor } => {
                let i = cursor.fetch_add(1, Ordering::Relaxed);
                values[i % values.len()]
            }
            JitterSequence::Random(jitter) => (jitter.sample() + 1.0) / 2.0,
        }
    }
}

impl Default for JitterSequence {
    fn default() -> Self {
        Self::Random(Jitter::new())
    }
}

/// A rectangular light spanned by two edge vectors from `corner`, sampled over
/// a grid of jittered cells.
#[derive(Debug)]
pub struct AreaLight {
    corner: Tuple,
    uvec: Tuple,
    usteps: usize,
    vvec: Tuple,
    vsteps: usize,
    intensity: Color,
    position: Tuple,
    jitter: JitterSequence,
}

impl AreaLight {
    /// Creates a new `AreaLight` with random jitter.
    ///
    /// `full_uvec` and `full_vvec` span the whole light and are split into
    /// `usteps` and `vsteps` cells respectively.
    pub fn new(
        corner: Tuple,
        full_uvec: Tuple,
        usteps: usize,
        full_vvec: Tuple,
        vsteps: usize,
        intensity: Color,
    ) -> Self {
        assert!(usteps > 0 && vsteps > 0, "Area light without cells");
        Self {
            corner,
            uvec: full_uvec / usteps as f64,
            usteps,
            vvec: full_vvec / vsteps as f64,
            vsteps,
            intensity,
            position: corner + full_uvec / 2.0 + full_vvec / 2.0,
            jitter: JitterSequence::default(),
        }
    }

    pub fn with_jitter(mut self, jitter: JitterSequence) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn corner(&self) -> Tuple {
        self.corner
    }

    /// Returns the edge vector of one cell along u.
    pub fn uvec(&self) -> Tuple {
        self.uvec
    }

    /// Returns the edge vector of one cell along v.
    pub fn vvec(&self) -> Tuple {
        self.vvec
    }
}

impl Light for AreaLight {
    fn intensity(&self) -> Color {
        self.intensity
    }

    /// The center of the light.
    fn position(&self) -> Tuple {
        self.position
    }

    fn usteps(&self) -> usize {
        self.usteps
    }

    fn vsteps(&self) -> usize {
        self.vsteps
    }

    fn point_on_light(&self, u: usize, v: usize) -> Tuple {
        self.corner
            + self.uvec * (u as f64 + self.jitter.sample())
            + self.vvec * (v as f64 + self.jitter.sample())
    }
}
