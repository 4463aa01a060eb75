//! Per-column surface height.

use crate::biome::BiomeMap;
use crate::noise::NoiseField;
use crate::worldgen::{BiomeParams, WorldGenParams};

/// Surface height of column `x` under `biome`. Independent of y.
#[inline]
pub fn column_height(noise: &NoiseField, params: &WorldGenParams, biome: &BiomeParams, x: i32) -> f32 {
    noise.sample_cell(x, 0, biome.terrain_freq) * biome.height_multiplier + params.height_addition
}

/// Topmost row filled below `height`, i.e. the last `y` with `y < height`.
/// Saturates at the `i32` range; NaN maps to -1 (no rows).
#[inline]
pub fn surface_row(height: f32) -> i32 {
    (height.ceil() as i32).saturating_sub(1)
}

/// Where the player collaborator drops the player in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnPoint {
    pub x: i32,
    pub y: f32,
}

#[derive(Clone, Debug)]
pub struct HeightProfile {
    heights: Vec<f32>,
}

impl HeightProfile {
    /// Heights for every column, each using the biome resolved at `(x, 0)`.
    pub fn build(noise: &NoiseField, params: &WorldGenParams, biomes: &BiomeMap) -> Self {
        let heights = (0..params.world_size)
            .map(|x| {
                let id = biomes.column(x).unwrap_or_default();
                column_height(noise, params, params.biome(id), x)
            })
            .collect();
        Self { heights }
    }

    #[inline]
    pub fn at(&self, x: i32) -> Option<f32> {
        usize::try_from(x).ok().and_then(|i| self.heights.get(i)).copied()
    }

    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Midpoint column, one cell above its surface.
    pub fn spawn_point(&self, world_size: i32) -> SpawnPoint {
        let x = world_size / 2;
        let h = self.at(x).unwrap_or(0.0);
        SpawnPoint { x, y: h + 1.0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worldgen::WorldGenConfig;
    use strata_tiles::MaterialCatalog;

    #[test]
    fn surface_row_is_last_row_below_height() {
        assert_eq!(surface_row(5.0), 4);
        assert_eq!(surface_row(5.3), 5);
        assert_eq!(surface_row(0.5), 0);
        assert_eq!(surface_row(0.0), -1);
    }

    #[test]
    fn surface_row_saturates() {
        assert_eq!(surface_row(-3.0e9), i32::MIN);
        assert_eq!(surface_row(3.0e9), i32::MAX - 1);
        assert_eq!(surface_row(f32::NAN), -1);
    }

    #[test]
    fn flat_multiplier_gives_base_height() {
        let mut cfg = WorldGenConfig::default();
        cfg.world.height_addition = 12.0;
        for b in &mut cfg.biomes {
            b.height_multiplier = 0.0;
        }
        let params = WorldGenParams::from_config(&cfg, &MaterialCatalog::builtin()).unwrap();
        let noise = NoiseField::new(params.seed);
        let map = BiomeMap::build(&noise, &params);
        let profile = HeightProfile::build(&noise, &params, &map);
        assert!(profile.heights().iter().all(|h| *h == 12.0));
        assert_eq!(
            profile.spawn_point(params.world_size),
            SpawnPoint { x: params.world_size / 2, y: 13.0 }
        );
    }
}
