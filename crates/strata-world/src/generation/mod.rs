//! Terrain and vegetation passes over a [`TileGrid`].

mod caves;
mod ores;
mod surface;
mod trees;

use std::sync::Arc;
use std::time::Instant;

use strata_grid::TileGrid;
use strata_tiles::MaterialCatalog;

use crate::biome::BiomeMap;
use crate::error::ConfigError;
use crate::gen_ctx::{GenCtx, GenStats};
use crate::height::{HeightProfile, SpawnPoint, surface_row};
use crate::world::World;
use crate::worldgen::{BiomeParams, WorldGenConfig, WorldGenParams};

pub use surface::{Layer, select_layer};
pub use trees::{CANOPY_OFFSETS, Vegetation, grow_tree, place_vegetation};

/// Output of one generation run.
#[derive(Debug)]
pub struct GeneratedWorld {
    pub grid: TileGrid,
    pub params: Arc<WorldGenParams>,
    pub biome_map: BiomeMap,
    pub heights: HeightProfile,
    pub spawn: SpawnPoint,
    pub stats: GenStats,
}

impl GeneratedWorld {
    #[inline]
    pub fn spawn_point(&self) -> SpawnPoint {
        self.spawn
    }

    pub fn biome_at(&self, x: i32, y: i32) -> Option<&BiomeParams> {
        self.biome_map.at(x, y).map(|id| self.params.biome(id))
    }

    pub fn column_biome(&self, x: i32) -> Option<&BiomeParams> {
        self.biome_map.column(x).map(|id| self.params.biome(id))
    }
}

impl World {
    /// Fills a fresh grid: terrain for every column first, then vegetation.
    /// The change log is cleared before returning.
    pub fn generate(&self) -> GeneratedWorld {
        let t0 = Instant::now();
        let params = Arc::clone(&self.params);
        let mut ctx = self.make_gen_ctx();
        let mut grid = TileGrid::new(
            params.world_size,
            Arc::clone(&self.catalog),
            params.seed as i64 as u64,
        );

        for x in 0..params.world_size {
            build_column(&mut ctx, &params, &mut grid, x);
        }

        // Trees reach into neighbouring columns, so vegetation waits for all terrain.
        for x in 0..params.world_size {
            let Some(height) = ctx.heights.at(x) else {
                continue;
            };
            let surface_y = surface_row(height);
            if surface_y < 0 {
                continue;
            }
            let biome = params.biome(ctx.biome_id_at(x, surface_y));
            match place_vegetation(&mut ctx.rng, &mut grid, biome, x, surface_y) {
                Vegetation::Tree { .. } => ctx.stats.trees += 1,
                Vegetation::TallGrass => ctx.stats.tall_grass += 1,
                Vegetation::Bare => ctx.stats.bare_columns += 1,
                Vegetation::Nothing => {}
            }
        }

        grid.clear_changes();
        let spawn = ctx.heights.spawn_point(params.world_size);

        let hist = ctx.biome_map.histogram(params.biomes.len());
        for (biome, columns) in params.biomes.iter().zip(&hist) {
            log::debug!(target: "worldgen", "biome {} covers {} columns", biome.name, columns);
        }
        log::info!(
            target: "worldgen",
            "generated seed={} size={} in {:?}: {} (spawn x={} y={:.2})",
            params.seed,
            params.world_size,
            t0.elapsed(),
            ctx.stats,
            spawn.x,
            spawn.y
        );

        GeneratedWorld {
            grid,
            params,
            biome_map: ctx.biome_map,
            heights: ctx.heights,
            spawn,
            stats: ctx.stats,
        }
    }
}

/// Validates `cfg` and runs one generation pass.
pub fn generate(
    cfg: &WorldGenConfig,
    catalog: Arc<MaterialCatalog>,
) -> Result<GeneratedWorld, ConfigError> {
    Ok(World::from_config(cfg, catalog)?.generate())
}

fn build_column(ctx: &mut GenCtx, params: &WorldGenParams, grid: &mut TileGrid, x: i32) {
    let Some(height) = ctx.heights.at(x) else {
        return;
    };
    ctx.stats.columns += 1;
    let top = surface_row(height).min(params.world_size);
    for y in 0..=top {
        let biome_id = ctx.biome_id_at(x, y);
        if !caves::cave_keeps_cell(ctx, biome_id, x, y) {
            ctx.stats.carved_cells += 1;
            continue;
        }
        let (material, ore) = surface::select_material(ctx, biome_id, x, y, height);
        if grid.place(material, x, y, false) {
            ctx.stats.terrain_tiles += 1;
            if ore {
                ctx.stats.ore_tiles += 1;
            }
        }
    }
}
