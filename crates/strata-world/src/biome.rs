//! Column biome resolution.

use crate::noise::NoiseField;
use crate::worldgen::WorldGenParams;

/// Index into [`WorldGenParams::biomes`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BiomeId(pub u16);

/// Maps `v` onto ascending selector buckets.
///
/// The first selector `>= v` wins. When `v` lies above every selector, the
/// nearest selector by absolute distance wins, ties going to the earlier
/// bucket. Returns `None` only for an empty selector list.
pub fn resolve_bucket(selectors: &[f32], v: f32) -> Option<usize> {
    if let Some(i) = selectors.iter().position(|&s| v <= s) {
        return Some(i);
    }
    selectors
        .iter()
        .enumerate()
        .min_by(|a, b| (a.1 - v).abs().total_cmp(&(b.1 - v).abs()))
        .map(|(i, _)| i)
}

/// Biome per world cell.
///
/// Selection noise is sampled along a fixed row, so every row of a column
/// shares one biome; the map stores a single entry per column.
#[derive(Clone, Debug)]
pub struct BiomeMap {
    size: i32,
    columns: Vec<BiomeId>,
}

impl BiomeMap {
    pub fn build(noise: &NoiseField, params: &WorldGenParams) -> Self {
        let selectors = params.selectors();
        let size = params.world_size.max(0);
        let columns = (0..size)
            .map(|x| {
                let v = noise.sample_cell(x, 0, params.biome_freq);
                BiomeId(resolve_bucket(&selectors, v).unwrap_or(0) as u16)
            })
            .collect();
        Self { size, columns }
    }

    #[inline]
    pub fn size(&self) -> i32 {
        self.size
    }

    #[inline]
    pub fn column(&self, x: i32) -> Option<BiomeId> {
        usize::try_from(x).ok().and_then(|i| self.columns.get(i)).copied()
    }

    #[inline]
    pub fn at(&self, x: i32, y: i32) -> Option<BiomeId> {
        if !(0..self.size).contains(&y) {
            return None;
        }
        self.column(x)
    }

    /// Column count per biome, indexed by biome id.
    pub fn histogram(&self, biome_count: usize) -> Vec<usize> {
        let mut out = vec![0; biome_count];
        for id in &self.columns {
            if let Some(slot) = out.get_mut(id.0 as usize) {
                *slot += 1;
            }
        }
        out
    }

    pub fn columns(&self) -> &[BiomeId] {
        &self.columns
    }
}
