use rand::{seq::SliceRandom, Rng};
use rand_pcg::Pcg32;
use std::sync::{Arc, Mutex, PoisonError};

/// Seeded 3D gradient noise.
///
/// Based on Ken Perlin's improved noise with the permutation table shuffled
/// from `seed` instead of the fixed reference table.
#[derive(Clone, Debug)]
pub struct PerlinNoise {
    perm: Vec<u8>,
}

impl PerlinNoise {
    /// Creates a new `PerlinNoise` with a permutation derived from `seed`.
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::new(seed, 0);
        let mut perm: Vec<u8> = (0..=255).collect();
        perm.shuffle(&mut rng);
        // Doubled so lookups can skip wrapping
        perm.extend_from_within(..);
        Self { perm }
    }

    /// Returns noise in roughly [-1, 1] at (`x`, `y`, `z`). Zero on integer lattice points.
    pub fn noise(&self, x: f64, y: f64, z: f64) -> f64 {
        let p = &self.perm;
        let cell = |v: f64| ((v.floor() as i64) & 255) as usize;
        let (xi, yi, zi) = (cell(x), cell(y), cell(z));

        let xf = x - x.floor();
        let yf = y - y.floor();
        let zf = z - z.floor();
        let (u, v, w) = (fade(xf), fade(yf), fade(zf));

        let a = p[xi] as usize + yi;
        let aa = p[a] as usize + zi;
        let ab = p[a + 1] as usize + zi;
        let b = p[xi + 1] as usize + yi;
        let ba = p[b] as usize + zi;
        let bb = p[b + 1] as usize + zi;

        lerp(
            w,
            lerp(
                v,
                lerp(u, grad(p[aa], xf, yf, zf), grad(p[ba], xf - 1.0, yf, zf)),
                lerp(
                    u,
                    grad(p[ab], xf, yf - 1.0, zf),
                    grad(p[bb], xf - 1.0, yf - 1.0, zf),
                ),
            ),
            lerp(
                v,
                lerp(
                    u,
                    grad(p[aa + 1], xf, yf, zf - 1.0),
                    grad(p[ba + 1], xf - 1.0, yf, zf - 1.0),
                ),
                lerp(
                    u,
                    grad(p[ab + 1], xf, yf - 1.0, zf - 1.0),
                    grad(p[bb + 1], xf - 1.0, yf - 1.0, zf - 1.0),
                ),
            ),
        )
    }
}

fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

fn lerp(t: f64, a: f64, b: f64) -> f64 {
    a + t * (b - a)
}

fn grad(hash: u8, x: f64, y: f64, z: f64) -> f64 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}

/// A shared source of uniform jitter in [-1, 1).
///
/// Clones draw from the same generator so a pattern cloned across shapes
/// still produces one sequence.
#[derive(Clone, Debug)]
pub struct Jitter {
    rng: Arc<Mutex<Pcg32>>,
}

impl Jitter {
    /// Creates a new `Jitter` seeded from entropy.
    pub fn new() -> Self {
        Self::with_seed(rand::thread_rng().gen())
    }

    /// Creates a new `Jitter` with a fixed seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Arc::new(Mutex::new(Pcg32::new(seed, 0))),
        }
    }

    /// Returns the next jitter value.
    pub fn sample(&self) -> f64 {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        rng.gen_range(-1.0..1.0)
    }
}

impl Default for Jitter {
    fn default() -> Self {
        Self::new()
    }
}
