use rand::Rng;
use strata_grid::TileGrid;

use super::super::worldgen::{BiomeParams, TilePalette};

/// Canopy offsets relative to the cell directly above the trunk top.
pub const CANOPY_OFFSETS: [(i32, i32); 7] = [(0, 0), (0, 1), (0, 2), (-1, 0), (-1, 1), (1, 0), (1, 1)];

/// What the vegetation pass did for one column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Vegetation {
    Tree { height: i32 },
    TallGrass,
    Nothing,
    /// The surface cell is empty (carved), so nothing was rolled.
    Bare,
}

/// One-in-`chance` roll; zero never fires.
#[inline]
fn roll<R: Rng>(rng: &mut R, chance: u32) -> bool {
    chance > 0 && rng.gen_range(0..chance) == 0
}

fn tree_height<R: Rng>(rng: &mut R, biome: &BiomeParams) -> i32 {
    if biome.max_tree_height > biome.min_tree_height {
        rng.gen_range(biome.min_tree_height..biome.max_tree_height)
    } else {
        biome.min_tree_height
    }
}

/// Trunk of `height` logs above `surface_y`, canopy on top. Cells already
/// filled by terrain or a neighbouring tree are left alone.
pub fn grow_tree(grid: &mut TileGrid, palette: &TilePalette, height: i32, x: i32, surface_y: i32) {
    for dy in 1..=height {
        grid.place_if_empty(palette.log, x, surface_y + dy, false);
    }
    let top = surface_y + 1 + height;
    for (dx, dy) in CANOPY_OFFSETS {
        grid.place_if_empty(palette.leaf, x + dx, top + dy, true);
    }
}

/// Rolls and places vegetation on the column whose topmost terrain row is
/// `surface_y`. Trees are tried first; tall grass only if the tree roll misses.
pub fn place_vegetation<R: Rng>(
    rng: &mut R,
    grid: &mut TileGrid,
    biome: &BiomeParams,
    x: i32,
    surface_y: i32,
) -> Vegetation {
    if !grid.contains(x, surface_y) {
        return Vegetation::Bare;
    }
    if roll(rng, biome.tree_chance) {
        let height = tree_height(rng, biome);
        grow_tree(grid, &biome.palette, height, x, surface_y);
        return Vegetation::Tree { height };
    }
    if roll(rng, biome.tall_grass_chance) {
        if let Some(tall_grass) = biome.palette.tall_grass {
            if grid.place_if_empty(tall_grass, x, surface_y + 1, true) {
                return Vegetation::TallGrass;
            }
        }
    }
    Vegetation::Nothing
}
