//! Seeded random numbers and Perlin noise.
//!
//! Both generators are deterministic: a canvas starts from seed 0 and
//! `random_seed` / `noise_seed` restart a sequence.

use crate::Canvas;
use crate::Backend;
use crate::Float;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[allow(unused_imports)]
use vek::num_traits::real::Real;

use core::f32::consts::PI;
use alloc::vec::Vec;

const YWRAP_B: usize = 4;
const YWRAP: usize = 1 << YWRAP_B;
const ZWRAP_B: usize = 8;
const ZWRAP: usize = 1 << ZWRAP_B;
const TABLE_MASK: usize = 4095;

#[derive(Debug, Clone)]
pub struct Random {
    rng: SmallRng,
}

impl Random {
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// Uniform in `[0, max)`.
    pub fn next(&mut self, max: Float) -> Float {
        self.rng.gen::<Float>() * max
    }

    /// Uniform between `min` and `max`, in either order.
    pub fn range(&mut self, min: Float, max: Float) -> Float {
        min + self.rng.gen::<Float>() * (max - min)
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::seeded(0)
    }
}

fn scaled_cosine(i: Float) -> Float {
    0.5 * (1.0 - (i * PI).cos())
}

/// Value noise summed over octaves, each at twice the frequency and
/// `falloff` times the amplitude of the previous one.
#[derive(Debug, Clone)]
pub struct PerlinNoise {
    table: Vec<Float>,
    octaves: usize,
    falloff: Float,
}

impl PerlinNoise {
    pub fn seeded(seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        Self {
            table: (0..=TABLE_MASK).map(|_| rng.gen::<Float>()).collect(),
            octaves: 4,
            falloff: 0.5,
        }
    }

    /// Non-positive values keep the current setting.
    pub fn set_detail(&mut self, octaves: usize, falloff: Float) {
        if octaves > 0 {
            self.octaves = octaves;
        }
        if falloff > 0.0 {
            self.falloff = falloff;
        }
    }

    /// Noise at `(x, y, z)`, in `[0, 1)`; negative coordinates are mirrored.
    pub fn get(&self, x: Float, y: Float, z: Float) -> Float {
        let (x, y, z) = (x.abs(), y.abs(), z.abs());
        let (mut xi, mut yi, mut zi) = (x.floor() as usize, y.floor() as usize, z.floor() as usize);
        let (mut xf, mut yf, mut zf) = (x - x.floor(), y - y.floor(), z - z.floor());

        let at = |i: usize| self.table[i & TABLE_MASK];
        let mut r = 0.0;
        let mut ampl = 0.5;

        for _ in 0..self.octaves {
            let mut of = xi.wrapping_add(yi << YWRAP_B).wrapping_add(zi << ZWRAP_B);
            let (rxf, ryf) = (scaled_cosine(xf), scaled_cosine(yf));

            let mut n1 = at(of);
            n1 += rxf * (at(of.wrapping_add(1)) - n1);
            let mut n2 = at(of.wrapping_add(YWRAP));
            n2 += rxf * (at(of.wrapping_add(YWRAP + 1)) - n2);
            n1 += ryf * (n2 - n1);

            of = of.wrapping_add(ZWRAP);
            n2 = at(of);
            n2 += rxf * (at(of.wrapping_add(1)) - n2);
            let mut n3 = at(of.wrapping_add(YWRAP));
            n3 += rxf * (at(of.wrapping_add(YWRAP + 1)) - n3);
            n2 += ryf * (n3 - n2);

            n1 += scaled_cosine(zf) * (n2 - n1);
            r += n1 * ampl;
            ampl *= self.falloff;

            for (i, f) in [(&mut xi, &mut xf), (&mut yi, &mut yf), (&mut zi, &mut zf)] {
                *i <<= 1;
                *f *= 2.0;
                if *f >= 1.0 {
                    *i = i.wrapping_add(1);
                    *f -= 1.0;
                }
            }
        }

        r
    }
}

impl Default for PerlinNoise {
    fn default() -> Self {
        Self::seeded(0)
    }
}

impl<B: Backend> Canvas<B> {
    pub fn random_seed(&mut self, seed: u64) {
        self.random = Random::seeded(seed);
    }

    /// Uniform in `[0, max)`.
    pub fn random(&mut self, max: Float) -> Float {
        self.random.next(max)
    }

    pub fn random_range(&mut self, min: Float, max: Float) -> Float {
        self.random.range(min, max)
    }

    pub fn noise_seed(&mut self, seed: u64) {
        let (octaves, falloff) = (self.noise.octaves, self.noise.falloff);
        self.noise = PerlinNoise::seeded(seed);
        self.noise.set_detail(octaves, falloff);
    }

    pub fn noise_detail(&mut self, octaves: usize, falloff: Float) {
        self.noise.set_detail(octaves, falloff);
    }

    pub fn noise(&self, x: Float, y: Float, z: Float) -> Float {
        self.noise.get(x, y, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_sequences_repeat() {
        let mut a = Random::seeded(7);
        let mut b = Random::seeded(7);
        for _ in 0..16 {
            let v = a.next(10.0);
            assert_eq!(v, b.next(10.0));
            assert!((0.0..10.0).contains(&v));
        }

        for _ in 0..16 {
            let v = a.range(5.0, -5.0);
            assert!(v > -5.0 && v <= 5.0);
        }
    }

    #[test]
    fn noise_is_smooth_and_bounded() {
        let noise = PerlinNoise::seeded(3);
        let mut prev = noise.get(0.0, 0.5, 0.0);
        for i in 1..200 {
            let v = noise.get(i as Float * 0.01, 0.5, 0.0);
            assert!((0.0..1.0).contains(&v));
            assert!((v - prev).abs() < 0.1);
            prev = v;
        }

        assert_eq!(noise.get(-1.5, 2.0, 0.0), noise.get(1.5, 2.0, 0.0));
        assert_eq!(PerlinNoise::seeded(3).get(4.2, 1.1, 0.3), noise.get(4.2, 1.1, 0.3));
    }

    #[test]
    fn detail_ignores_non_positive() {
        let mut noise = PerlinNoise::seeded(1);
        noise.set_detail(0, -1.0);
        assert_eq!((noise.octaves, noise.falloff), (4, 0.5));
        noise.set_detail(2, 0.25);
        assert_eq!((noise.octaves, noise.falloff), (2, 0.25));
    }
}
