use std::sync::Arc;

use strata_tiles::MaterialCatalog;

use crate::biome::{BiomeId, resolve_bucket};
use crate::error::ConfigError;
use crate::gen_ctx::GenCtx;
use crate::height::{SpawnPoint, column_height};
use crate::noise::NoiseField;
use crate::worldgen::{WorldGenConfig, WorldGenParams};

/// Validated generation inputs: world params plus the material atlas.
#[derive(Clone, Debug)]
pub struct World {
    pub params: Arc<WorldGenParams>,
    pub catalog: Arc<MaterialCatalog>,
}

impl World {
    /// Wraps hand-built params; they are validated here so `generate` never
    /// sees an inconsistent set.
    pub fn new(params: WorldGenParams, catalog: Arc<MaterialCatalog>) -> Result<Self, ConfigError> {
        params.validate()?;
        Ok(Self {
            params: Arc::new(params),
            catalog,
        })
    }

    pub fn from_config(
        cfg: &WorldGenConfig,
        catalog: Arc<MaterialCatalog>,
    ) -> Result<Self, ConfigError> {
        // from_config has already validated
        let params = WorldGenParams::from_config(cfg, &catalog)?;
        Ok(Self {
            params: Arc::new(params),
            catalog,
        })
    }

    #[inline]
    pub fn seed(&self) -> i32 {
        self.params.seed
    }

    #[inline]
    pub fn world_size(&self) -> i32 {
        self.params.world_size
    }

    #[inline]
    pub fn chunk_size(&self) -> i32 {
        self.params.chunk_size
    }

    /// Same inputs under a different seed.
    pub fn with_seed(&self, seed: i32) -> Self {
        let mut params = (*self.params).clone();
        params.seed = seed;
        Self {
            params: Arc::new(params),
            catalog: Arc::clone(&self.catalog),
        }
    }

    pub fn make_gen_ctx(&self) -> GenCtx {
        GenCtx::new(Arc::clone(&self.params))
    }

    /// Biome of column `x`, sampled without building the full map.
    pub fn biome_for_column(&self, noise: &NoiseField, x: i32) -> BiomeId {
        let v = noise.sample_cell(x, 0, self.params.biome_freq);
        let idx = resolve_bucket(&self.params.selectors(), v).unwrap_or(0);
        BiomeId(idx as u16)
    }

    pub fn height_at(&self, x: i32) -> f32 {
        let noise = NoiseField::new(self.params.seed);
        let biome = self.params.biome(self.biome_for_column(&noise, x));
        column_height(&noise, &self.params, biome, x)
    }

    pub fn spawn_point(&self) -> SpawnPoint {
        let x = self.params.world_size / 2;
        SpawnPoint {
            x,
            y: self.height_at(x) + 1.0,
        }
    }
}
