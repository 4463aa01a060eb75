//! Column chunks and viewer-driven activation.
#![forbid(unsafe_code)]

use std::collections::BTreeSet;
use std::ops::Range;

use strata_grid::TileGrid;
use strata_tiles::TileEntry;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkError {
    #[error("world size must be positive, got {0}")]
    WorldSize(i32),

    #[error("chunk size must be positive, got {0}")]
    ChunkSize(i32),
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChunkId(pub u32);

#[derive(Clone, Debug, PartialEq)]
pub struct Chunk {
    pub id: ChunkId,
    /// Half-open column range.
    pub columns: Range<i32>,
    pub center: f32,
}

impl Chunk {
    #[inline]
    pub fn contains_column(&self, x: i32) -> bool {
        self.columns.contains(&x)
    }

    #[inline]
    pub fn is_active(&self, viewer_x: f32, radius: f32) -> bool {
        (self.center - viewer_x).abs() <= radius
    }
}

/// Fixed partition of the world's columns. Trailing columns that do not fill
/// a whole chunk belong to no chunk.
#[derive(Clone, Debug)]
pub struct ChunkIndex {
    chunk_size: i32,
    chunks: Vec<Chunk>,
}

impl ChunkIndex {
    pub fn new(world_size: i32, chunk_size: i32) -> Result<Self, ChunkError> {
        if world_size <= 0 {
            return Err(ChunkError::WorldSize(world_size));
        }
        if chunk_size <= 0 {
            return Err(ChunkError::ChunkSize(chunk_size));
        }
        let chunks = (0..world_size / chunk_size)
            .map(|i| {
                let start = i * chunk_size;
                Chunk {
                    id: ChunkId(i as u32),
                    columns: start..start + chunk_size,
                    center: (start + chunk_size / 2) as f32,
                }
            })
            .collect();
        Ok(Self { chunk_size, chunks })
    }

    pub fn from_grid(grid: &TileGrid, chunk_size: i32) -> Result<Self, ChunkError> {
        Self::new(grid.size(), chunk_size)
    }

    #[inline]
    pub fn chunk_size(&self) -> i32 {
        self.chunk_size
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn get(&self, id: ChunkId) -> Option<&Chunk> {
        self.chunks.get(id.0 as usize)
    }

    pub fn chunk_of(&self, x: i32) -> Option<ChunkId> {
        if x < 0 {
            return None;
        }
        let i = (x / self.chunk_size) as usize;
        self.chunks.get(i).map(|c| c.id)
    }

    /// Chunks whose center lies within `radius` of `viewer_x`, inclusive.
    pub fn active_set(&self, viewer_x: f32, radius: f32) -> BTreeSet<ChunkId> {
        self.chunks
            .iter()
            .filter(|c| c.is_active(viewer_x, radius))
            .map(|c| c.id)
            .collect()
    }

    /// Tiles bucketed by owning chunk, each bucket sorted by `(x, y)`.
    /// Tiles in columns outside every chunk are dropped.
    pub fn group_tiles(&self, grid: &TileGrid) -> Vec<Vec<(i32, i32, TileEntry)>> {
        let mut out = vec![Vec::new(); self.chunks.len()];
        for (x, y, entry) in grid.iter() {
            if let Some(id) = self.chunk_of(x) {
                out[id.0 as usize].push((x, y, entry));
            }
        }
        for bucket in &mut out {
            bucket.sort_unstable_by_key(|&(x, y, _)| (x, y));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use strata_tiles::MaterialCatalog;

    #[test]
    fn remainder_columns_are_dropped() {
        let idx = ChunkIndex::new(10, 4).unwrap();
        assert_eq!(idx.len(), 2);
        assert_eq!(idx.chunks()[1].columns, 4..8);
        assert_eq!(idx.chunk_of(7), Some(ChunkId(1)));
        assert_eq!(idx.chunk_of(8), None);
        assert_eq!(idx.chunk_of(-1), None);
    }

    #[test]
    fn centers_use_integer_half() {
        let idx = ChunkIndex::new(15, 5).unwrap();
        let centers: Vec<f32> = idx.chunks().iter().map(|c| c.center).collect();
        assert_eq!(centers, [2.0, 7.0, 12.0]);
    }

    #[test]
    fn active_set_is_inclusive() {
        let idx = ChunkIndex::new(10, 5).unwrap();
        assert_eq!(idx.active_set(2.0, 0.0), BTreeSet::from([ChunkId(0)]));
        assert_eq!(idx.active_set(4.5, 2.5), BTreeSet::from([ChunkId(0), ChunkId(1)]));
        assert!(idx.active_set(-10.0, 1.0).is_empty());
    }

    #[test]
    fn rejects_zero_sizes() {
        assert_eq!(ChunkIndex::new(10, 0).unwrap_err(), ChunkError::ChunkSize(0));
        assert_eq!(ChunkIndex::new(0, 5).unwrap_err(), ChunkError::WorldSize(0));
    }

    #[test]
    fn group_tiles_by_column() {
        let cat = Arc::new(MaterialCatalog::builtin());
        let stone = cat.get_id("stone").unwrap();
        let mut grid = TileGrid::new(10, cat, 1);
        for (x, y) in [(0, 0), (4, 3), (5, 0), (9, 9), (10, 1)] {
            assert!(grid.place(stone, x, y, false));
        }
        let idx = ChunkIndex::from_grid(&grid, 5).unwrap();
        let groups = idx.group_tiles(&grid);
        let coords: Vec<Vec<(i32, i32)>> = groups
            .iter()
            .map(|g| g.iter().map(|&(x, y, _)| (x, y)).collect())
            .collect();
        assert_eq!(coords, vec![vec![(0, 0), (4, 3)], vec![(5, 0), (9, 9)]]);
    }
}
