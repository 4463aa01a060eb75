use super::super::biome::BiomeId;
use super::super::gen_ctx::GenCtx;

/// Whether the cell at `(x, y)` survives cave carving. Biomes without caves
/// keep every cell; otherwise the biome's cave mask decides.
#[inline]
pub(super) fn cave_keeps_cell(ctx: &GenCtx, biome_id: BiomeId, x: i32, y: i32) -> bool {
    if !ctx.params.biome(biome_id).generate_caves {
        return true;
    }
    ctx.cave_mask(biome_id).is_some_and(|mask| mask.get(x, y))
}
