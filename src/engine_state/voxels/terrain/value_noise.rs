//! Hash-based 2D value noise and its fractal (multi-octave) sum.
//!
//! Both samplers implement [`NoiseFn`] so they can be dropped in wherever the
//! `noise` crate's generators are accepted. Output is deterministic for a
//! given seed and point on every platform: lattice values come from integer
//! hashing with wrapping arithmetic, never from a platform RNG.

use noise::NoiseFn;

/// Seed offset between successive octaves of [`FractalValueNoise`].
pub const OCTAVE_SEED_STRIDE: u32 = 1013;

/// Hashes an integer lattice point to a value in `[0, 1)`.
#[inline]
fn hash_to_unit(x: i32, z: i32, seed: u32) -> f64 {
    let mut h = seed;
    h ^= (x as u32).wrapping_mul(0x9E37_79B9);
    h ^= (z as u32).wrapping_mul(0x85EB_CA6B);
    h ^= h >> 16;
    h = h.wrapping_mul(0xC2B2_AE35);
    h ^= h >> 16;
    (h & 0x00FF_FFFF) as f64 / 0x0100_0000 as f64
}

/// Quintic smoothstep, `6t^5 - 15t^4 + 10t^3`.
#[inline]
fn fade(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Smooth 2D value noise in `[0, 1)`.
///
/// Each integer lattice corner gets a hashed value; points in between are
/// bilinearly interpolated with [`fade`] applied to the fractional offsets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValueNoise {
    seed: u32,
}

impl ValueNoise {
    /// Creates a sampler for `seed`.
    pub fn new(seed: u32) -> Self {
        Self { seed }
    }

    /// The seed this sampler hashes with.
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Samples the noise at `(x, z)`.
    pub fn sample(&self, x: f64, z: f64) -> f64 {
        let x0 = x.floor() as i32;
        let z0 = z.floor() as i32;
        let x1 = x0.wrapping_add(1);
        let z1 = z0.wrapping_add(1);

        let u = fade(x - x0 as f64);
        let v = fade(z - z0 as f64);

        let a = hash_to_unit(x0, z0, self.seed);
        let b = hash_to_unit(x1, z0, self.seed);
        let c = hash_to_unit(x0, z1, self.seed);
        let d = hash_to_unit(x1, z1, self.seed);

        lerp(lerp(a, b, u), lerp(c, d, u), v)
    }
}

impl NoiseFn<f64, 2> for ValueNoise {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.sample(point[0], point[1])
    }
}

/// Fractal Brownian motion over [`ValueNoise`].
///
/// Sums `octaves` layers; each layer multiplies frequency by `lacunarity` and
/// amplitude by `gain`. The sum is divided by the total amplitude, so the
/// output stays in `[0, 1)`. Octave `i` hashes with
/// `seed + i * OCTAVE_SEED_STRIDE` so layers are decorrelated.
#[derive(Clone, Debug, PartialEq)]
pub struct FractalValueNoise {
    octaves: Vec<ValueNoise>,
    lacunarity: f64,
    gain: f64,
}

impl FractalValueNoise {
    /// Creates a fractal sampler.
    pub fn new(seed: u32, octaves: u32, lacunarity: f64, gain: f64) -> Self {
        let octaves = (0..octaves)
            .map(|i| ValueNoise::new(seed.wrapping_add(i.wrapping_mul(OCTAVE_SEED_STRIDE))))
            .collect();
        Self {
            octaves,
            lacunarity,
            gain,
        }
    }

    /// Number of octaves summed.
    pub fn octave_count(&self) -> usize {
        self.octaves.len()
    }

    /// Samples the normalized fractal sum at `(x, z)`. Zero octaves sample as 0.
    pub fn sample(&self, x: f64, z: f64) -> f64 {
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        let mut sum = 0.0;
        let mut norm = 0.0;

        for octave in &self.octaves {
            sum += amplitude * octave.sample(x * frequency, z * frequency);
            norm += amplitude;
            amplitude *= self.gain;
            frequency *= self.lacunarity;
        }

        if norm > 0.0 {
            sum / norm
        } else {
            0.0
        }
    }
}

impl NoiseFn<f64, 2> for FractalValueNoise {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.sample(point[0], point[1])
    }
}
