use strata_tiles::MaterialId;

use super::super::biome::BiomeId;
use super::super::gen_ctx::GenCtx;
use super::ores::apply_ores;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    Stone,
    Dirt,
    Surface,
}

/// Layer for row `y` of a column whose surface sits at `height`.
#[inline]
pub fn select_layer(y: i32, height: f32, dirt_layer_height: i32) -> Layer {
    let yf = y as f32;
    if yf < height - dirt_layer_height as f32 {
        Layer::Stone
    } else if yf < height - 1.0 {
        Layer::Dirt
    } else {
        Layer::Surface
    }
}

/// Material for `(x, y)` and whether an ore claimed it.
pub(super) fn select_material(
    ctx: &GenCtx,
    biome_id: BiomeId,
    x: i32,
    y: i32,
    height: f32,
) -> (MaterialId, bool) {
    let biome = ctx.params.biome(biome_id);
    match select_layer(y, height, biome.dirt_layer_height) {
        Layer::Stone => {
            let mut material = biome.palette.stone;
            let ore = apply_ores(&biome.ores, ctx.ore_masks(biome_id), x, y, height, &mut material);
            (material, ore)
        }
        Layer::Dirt => (biome.palette.dirt, false),
        Layer::Surface => (biome.palette.grass, false),
    }
}
