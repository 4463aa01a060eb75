//! Seeded coherent noise remapped to `[0, 1]`.

use std::fmt;

use fastnoise_lite::{FastNoiseLite, NoiseType};

/// Perlin sampler bound to one world seed.
///
/// The generator runs at unit frequency and the requested frequency scales the
/// coordinates, so one instance serves every layer (terrain, biomes, caves,
/// ores) of a world. Coordinates are shifted by a seed-derived offset before
/// scaling; Perlin is zero on its integer lattice, so unshifted cells such as
/// `(0, 0)` would read 0.5 under every seed.
pub struct NoiseField {
    seed: i32,
    offset: (f32, f32),
    noise: FastNoiseLite,
}

impl NoiseField {
    pub fn new(seed: i32) -> Self {
        let mut noise = FastNoiseLite::with_seed(seed);
        noise.set_noise_type(Some(NoiseType::Perlin));
        noise.set_frequency(Some(1.0));
        Self {
            seed,
            offset: seed_offset(seed),
            noise,
        }
    }

    #[inline]
    pub fn seed(&self) -> i32 {
        self.seed
    }

    #[inline]
    pub fn sample(&self, x: f32, y: f32, frequency: f32) -> f32 {
        let (ox, oy) = self.offset;
        let raw = self.noise.get_noise_2d((x + ox) * frequency, (y + oy) * frequency);
        ((raw + 1.0) * 0.5).clamp(0.0, 1.0)
    }

    #[inline]
    pub fn sample_cell(&self, x: i32, y: i32, frequency: f32) -> f32 {
        self.sample(x as f32, y as f32, frequency)
    }
}

impl Clone for NoiseField {
    fn clone(&self) -> Self {
        Self::new(self.seed)
    }
}

impl fmt::Debug for NoiseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NoiseField").field("seed", &self.seed).finish()
    }
}

/// Offset in `[0, 4096)` per axis with a fractional part, kept small so `f32`
/// coordinates stay precise for any seed.
fn seed_offset(seed: i32) -> (f32, f32) {
    let mix = |salt: u32| {
        let h = (seed as u32 ^ salt).wrapping_mul(0x9E37_79B1);
        let h = h ^ (h >> 15);
        (h >> 20) as f32 + (h & 0xFFFF) as f32 / 65_536.0
    };
    (mix(0x68E3_1DA4), mix(0xB529_7A4D))
}

/// One-shot sample; prefer a shared [`NoiseField`] in loops.
pub fn sample(seed: i32, x: f32, y: f32, frequency: f32) -> f32 {
    NoiseField::new(seed).sample(x, y, frequency)
}
