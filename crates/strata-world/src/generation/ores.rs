use strata_tiles::MaterialId;

use super::super::mask::MaskField;
use super::super::worldgen::OreParams;

/// Overrides `base` with every eligible ore in list order, so the last match
/// wins. An ore is eligible when its mask is set and the cell lies deeper than
/// its spawn height.
pub(super) fn apply_ores(
    ores: &[OreParams],
    masks: &[MaskField],
    x: i32,
    y: i32,
    height: f32,
    base: &mut MaterialId,
) -> bool {
    let depth = height - y as f32;
    let mut hit = false;
    for (ore, mask) in ores.iter().zip(masks) {
        if mask.get(x, y) && depth > ore.max_spawn_height as f32 {
            *base = ore.material;
            hit = true;
        }
    }
    hit
}
