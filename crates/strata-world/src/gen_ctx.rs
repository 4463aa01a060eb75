use std::fmt;
use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rayon::prelude::*;

use crate::biome::{BiomeId, BiomeMap};
use crate::height::HeightProfile;
use crate::mask::MaskField;
use crate::noise::NoiseField;
use crate::worldgen::{BiomeParams, WorldGenParams};

const VEGETATION_SALT: u64 = 0x5EED_7EE5_A11C_E000;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GenStats {
    pub columns: u32,
    pub terrain_tiles: u32,
    pub carved_cells: u32,
    pub ore_tiles: u32,
    pub trees: u32,
    pub tall_grass: u32,
    /// Surface cells carved away, so no vegetation roll happened.
    pub bare_columns: u32,
}

impl fmt::Display for GenStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "columns={} tiles={} carved={} ore={} trees={} tall_grass={} bare={}",
            self.columns,
            self.terrain_tiles,
            self.carved_cells,
            self.ore_tiles,
            self.trees,
            self.tall_grass,
            self.bare_columns
        )
    }
}

/// Everything the terrain and vegetation passes read, built once per run.
pub struct GenCtx {
    pub noise: NoiseField,
    pub params: Arc<WorldGenParams>,
    pub biome_map: BiomeMap,
    pub heights: HeightProfile,
    /// Cave mask per biome; `None` for biomes absent from the map or without caves.
    pub cave_masks: Vec<Option<MaskField>>,
    /// Ore masks per biome, parallel to `BiomeParams::ores`.
    pub ore_masks: Vec<Vec<MaskField>>,
    pub rng: ChaCha8Rng,
    pub stats: GenStats,
}

impl GenCtx {
    pub fn new(params: Arc<WorldGenParams>) -> Self {
        let noise = NoiseField::new(params.seed);
        let biome_map = BiomeMap::build(&noise, &params);
        let heights = HeightProfile::build(&noise, &params, &biome_map);
        let present = biome_map.histogram(params.biomes.len());
        let size = params.world_size;

        // Masks are independent per biome; only biomes that actually occur pay for them.
        let (cave_masks, ore_masks): (Vec<_>, Vec<_>) = params
            .biomes
            .par_iter()
            .zip(present.par_iter())
            .map(|(biome, &columns)| -> (Option<MaskField>, Vec<MaskField>) {
                if columns == 0 {
                    return (None, Vec::new());
                }
                let cave = biome.generate_caves.then(|| {
                    MaskField::build(&noise, params.cave_freq, biome.surface_value, size, size)
                });
                let ores = biome
                    .ores
                    .iter()
                    .map(|o| MaskField::build(&noise, o.frequency, o.size, size, size))
                    .collect();
                (cave, ores)
            })
            .collect::<Vec<_>>()
            .into_iter()
            .unzip();

        let rng = ChaCha8Rng::seed_from_u64(params.seed as i64 as u64 ^ VEGETATION_SALT);
        Self {
            noise,
            params,
            biome_map,
            heights,
            cave_masks,
            ore_masks,
            rng,
            stats: GenStats::default(),
        }
    }

    /// Biome id at `(x, y)`; rows outside the map fall back to the column's biome.
    #[inline]
    pub fn biome_id_at(&self, x: i32, y: i32) -> BiomeId {
        self.biome_map
            .at(x, y)
            .or_else(|| self.biome_map.column(x))
            .unwrap_or_default()
    }

    #[inline]
    pub fn biome_at(&self, x: i32, y: i32) -> &BiomeParams {
        self.params.biome(self.biome_id_at(x, y))
    }

    #[inline]
    pub fn cave_mask(&self, id: BiomeId) -> Option<&MaskField> {
        self.cave_masks.get(id.0 as usize).and_then(Option::as_ref)
    }

    #[inline]
    pub fn ore_masks(&self, id: BiomeId) -> &[MaskField] {
        self.ore_masks
            .get(id.0 as usize)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
