mod noise;
mod uv;

pub use noise::{Jitter, PerlinNoise};
pub use uv::{CubeFace, UvMapping, UvPattern};

use std::sync::Arc;

use crate::{
    math::{point, Color, Transform, Tuple},
    shapes::Shape,
};

pub const DEFAULT_PERLIN_SEED: u64 = 0x5eed;

/// A color function over pattern space.
///
/// Every pattern carries its own transform, and composite patterns evaluate
/// their children through the children's transforms in turn, so a stripe of
/// rotated checkers works as expected.
#[derive(Clone, Debug)]
pub struct Pattern {
    kind: PatternKind,
    transform: Transform,
}

#[derive(Clone, Debug)]
pub enum PatternKind {
    Solid(Color),
    /// Alternates along x.
    Stripe(Box<Pattern>, Box<Pattern>),
    /// Alternates with the distance from the y-axis.
    Ring(Box<Pattern>, Box<Pattern>),
    /// Alternates in 3D cells.
    Checker(Box<Pattern>, Box<Pattern>),
    /// Interpolates along the fractional part of x.
    Gradient(Box<Pattern>, Box<Pattern>),
    /// Averages two patterns.
    Blend(Box<Pattern>, Box<Pattern>),
    /// Perturbs the point with gradient noise.
    Perlin {
        pattern: Box<Pattern>,
        noise: Arc<PerlinNoise>,
        scale: f64,
    },
    /// Perturbs the point with uniform random jitter.
    Spray {
        pattern: Box<Pattern>,
        jitter: Jitter,
        amount: f64,
    },
    TextureMap {
        uv_pattern: UvPattern,
        mapping: UvMapping,
    },
    /// Per-face UV patterns indexed by [`CubeFace`].
    CubeMap(Box<[UvPattern; 6]>),
}

impl Pattern {
    /// Creates a new `Pattern` with identity transform.
    pub fn new(kind: PatternKind) -> Self {
        Self {
            kind,
            transform: Transform::default(),
        }
    }

    pub fn solid(color: Color) -> Self {
        Self::new(PatternKind::Solid(color))
    }

    pub fn stripe(a: impl Into<Pattern>, b: impl Into<Pattern>) -> Self {
        Self::new(PatternKind::Stripe(Box::new(a.into()), Box::new(b.into())))
    }

    pub fn ring(a: impl Into<Pattern>, b: impl Into<Pattern>) -> Self {
        Self::new(PatternKind::Ring(Box::new(a.into()), Box::new(b.into())))
    }

    pub fn checker(a: impl Into<Pattern>, b: impl Into<Pattern>) -> Self {
        Self::new(PatternKind::Checker(Box::new(a.into()), Box::new(b.into())))
    }

    pub fn gradient(a: impl Into<Pattern>, b: impl Into<Pattern>) -> Self {
        Self::new(PatternKind::Gradient(Box::new(a.into()), Box::new(b.into())))
    }

    pub fn blend(a: impl Into<Pattern>, b: impl Into<Pattern>) -> Self {
        Self::new(PatternKind::Blend(Box::new(a.into()), Box::new(b.into())))
    }

    /// Creates a new noise-perturbed `pattern` with a permutation from `seed`.
    pub fn perlin(pattern: impl Into<Pattern>, scale: f64, seed: u64) -> Self {
        Self::new(PatternKind::Perlin {
            pattern: Box::new(pattern.into()),
            noise: Arc::new(PerlinNoise::new(seed)),
            scale,
        })
    }

    /// Creates a new jittered `pattern` seeded from entropy.
    pub fn spray(pattern: impl Into<Pattern>, amount: f64) -> Self {
        Self::spray_with(pattern, amount, Jitter::new())
    }

    /// Creates a new jittered `pattern` drawing from `jitter`.
    pub fn spray_with(pattern: impl Into<Pattern>, amount: f64, jitter: Jitter) -> Self {
        Self::new(PatternKind::Spray {
            pattern: Box::new(pattern.into()),
            jitter,
            amount,
        })
    }

    pub fn texture_map(uv_pattern: UvPattern, mapping: UvMapping) -> Self {
        Self::new(PatternKind::TextureMap {
            uv_pattern,
            mapping,
        })
    }

    /// Creates a new cube map from its faces in [`CubeFace`] order.
    pub fn cube_map(
        left: UvPattern,
        front: UvPattern,
        right: UvPattern,
        back: UvPattern,
        up: UvPattern,
        down: UvPattern,
    ) -> Self {
        Self::new(PatternKind::CubeMap(Box::new([
            left, front, right, back, up, down,
        ])))
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn kind(&self) -> &PatternKind {
        &self.kind
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    /// Evaluates this pattern at point `p` given in the space this pattern is attached in.
    pub fn color_at(&self, p: Tuple) -> Color {
        let local = self.transform.inverse_apply(p);
        self.local_color_at(local)
    }

    /// Evaluates this pattern on `object` at world-space point `p`.
    pub fn color_at_shape(&self, object: &Shape, p: Tuple) -> Color {
        self.color_at(object.world_to_object(p))
    }

    fn local_color_at(&self, p: Tuple) -> Color {
        match &self.kind {
            PatternKind::Solid(c) => *c,
            PatternKind::Stripe(a, b) => pick(p.x.floor(), a, b, p),
            PatternKind::Ring(a, b) => pick((p.x * p.x + p.z * p.z).sqrt().floor(), a, b, p),
            PatternKind::Checker(a, b) => pick(p.x.floor() + p.y.floor() + p.z.floor(), a, b, p),
            PatternKind::Gradient(a, b) => {
                let ca = a.color_at(p);
                let cb = b.color_at(p);
                ca + (cb - ca) * (p.x - p.x.floor())
            }
            PatternKind::Blend(a, b) => (a.color_at(p) + b.color_at(p)) / 2.0,
            PatternKind::Perlin {
                pattern,
                noise,
                scale,
            } => {
                let perturbed = point(
                    p.x + noise.noise(p.x, p.y, p.z) * scale,
                    p.y + noise.noise(p.x, p.y, p.z + 1.0) * scale,
                    p.z + noise.noise(p.x, p.y, p.z + 2.0) * scale,
                );
                pattern.color_at(perturbed)
            }
            PatternKind::Spray {
                pattern,
                jitter,
                amount,
            } => {
                let perturbed = point(
                    p.x + jitter.sample() * amount,
                    p.y + jitter.sample() * amount,
                    p.z + jitter.sample() * amount,
                );
                pattern.color_at(perturbed)
            }
            PatternKind::TextureMap {
                uv_pattern,
                mapping,
            } => {
                let (u, v) = mapping.map(p);
                uv_pattern.color_at(u, v)
            }
            PatternKind::CubeMap(faces) => {
                let face = CubeFace::from_point(p);
                let (u, v) = face.uv(p);
                faces[face as usize].color_at(u, v)
            }
        }
    }
}

/// Selects `a` on even `cell`s and `b` on odd ones.
fn pick(cell: f64, a: &Pattern, b: &Pattern, p: Tuple) -> Color {
    if (cell as i64).rem_euclid(2) == 0 {
        a.color_at(p)
    } else {
        b.color_at(p)
    }
}

impl From<Color> for Pattern {
    fn from(color: Color) -> Self {
        Self::solid(color)
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Self::solid(Color::WHITE)
    }
}
