use std::fmt;
use std::sync::Arc;

use hashbrown::HashMap;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use strata_tiles::{MaterialCatalog, MaterialId, TileEntry};

use crate::change::TileChange;

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGridStats {
    pub tiles: usize,
    pub foreground: usize,
    pub background: usize,
    pub pending_changes: usize,
}

/// Sparse world grid keyed by cell coordinate.
///
/// Bounds are inclusive on both ends: `0..=size` on each axis. Every cell holds
/// at most one [`TileEntry`].
pub struct TileGrid {
    size: i32,
    catalog: Arc<MaterialCatalog>,
    tiles: HashMap<(i32, i32), TileEntry>,
    rng: ChaCha8Rng,
    changes: Vec<TileChange>,
}

impl fmt::Debug for TileGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TileGrid")
            .field("size", &self.size)
            .field("tiles", &self.tiles.len())
            .field("pending_changes", &self.changes.len())
            .finish()
    }
}

impl TileGrid {
    /// `seed` drives sprite variant selection so identical inputs produce
    /// identical grids.
    pub fn new(size: i32, catalog: Arc<MaterialCatalog>, seed: u64) -> Self {
        Self {
            size,
            catalog,
            tiles: HashMap::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            changes: Vec::new(),
        }
    }

    #[inline]
    pub fn size(&self) -> i32 {
        self.size
    }

    #[inline]
    pub fn catalog(&self) -> &Arc<MaterialCatalog> {
        &self.catalog
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        (0..=self.size).contains(&x) && (0..=self.size).contains(&y)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn stats(&self) -> TileGridStats {
        let background = self.tiles.values().filter(|e| e.is_background).count();
        TileGridStats {
            tiles: self.tiles.len(),
            foreground: self.tiles.len() - background,
            background,
            pending_changes: self.changes.len(),
        }
    }

    #[inline]
    pub fn query(&self, x: i32, y: i32) -> Option<TileEntry> {
        self.tiles.get(&(x, y)).copied()
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.tiles.contains_key(&(x, y))
    }

    /// Unconditional insert used by the terrain pass. Overwrites any occupant.
    pub fn place(&mut self, material: MaterialId, x: i32, y: i32, is_background: bool) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        let Some(entry) = self.make_entry(material, is_background) else {
            return false;
        };
        if let Some(prev) = self.tiles.insert((x, y), entry) {
            self.changes.push(TileChange::Removed { x, y, entry: prev });
        }
        self.changes.push(TileChange::Placed { x, y, entry });
        true
    }

    /// Insert only into an empty cell.
    pub fn place_if_empty(
        &mut self,
        material: MaterialId,
        x: i32,
        y: i32,
        is_background: bool,
    ) -> bool {
        if self.contains(x, y) {
            return false;
        }
        self.place(material, x, y, is_background)
    }

    /// Edit-time placement. Background occupants are replaced, foreground
    /// occupants reject the edit and leave the cell untouched.
    pub fn check_and_place(
        &mut self,
        material: MaterialId,
        x: i32,
        y: i32,
        is_background: bool,
    ) -> bool {
        match self.query(x, y) {
            None => self.place(material, x, y, is_background),
            Some(existing) if existing.is_background => {
                if self.catalog.get(material).is_none() {
                    return false;
                }
                self.remove(x, y);
                self.place(material, x, y, is_background)
            }
            Some(_) => {
                log::debug!(target: "grid", "placement at ({x}, {y}) rejected: foreground tile present");
                false
            }
        }
    }

    pub fn remove(&mut self, x: i32, y: i32) -> bool {
        if !self.in_bounds(x, y) {
            return false;
        }
        match self.tiles.remove(&(x, y)) {
            Some(entry) => {
                self.changes.push(TileChange::Removed { x, y, entry });
                true
            }
            None => false,
        }
    }

    /// Every occupied cell, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (i32, i32, TileEntry)> + '_ {
        self.tiles.iter().map(|(&(x, y), &e)| (x, y, e))
    }

    /// All entries sorted by `(x, y)`; stable across runs.
    pub fn snapshot(&self) -> Vec<((i32, i32), TileEntry)> {
        let mut out: Vec<((i32, i32), TileEntry)> =
            self.tiles.iter().map(|(k, v)| (*k, *v)).collect();
        out.sort_by_key(|(k, _)| *k);
        out
    }

    /// Mutations since the last drain, oldest first.
    pub fn drain_changes(&mut self) -> Vec<TileChange> {
        std::mem::take(&mut self.changes)
    }

    pub fn clear_changes(&mut self) {
        self.changes.clear();
    }

    fn make_entry(&mut self, material: MaterialId, is_background: bool) -> Option<TileEntry> {
        let Some(def) = self.catalog.get(material) else {
            log::warn!(target: "grid", "unknown material id {}", material.0);
            return None;
        };
        let count = def.variant_count().max(1);
        let variant = self.rng.gen_range(0..count) as u16;
        Some(TileEntry::new(material, is_background, variant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_grid() -> (TileGrid, MaterialId, MaterialId) {
        let mut cat = MaterialCatalog::new();
        let stone = cat.insert("stone", vec!["a".into(), "b".into(), "c".into()], false, None, None);
        let leaf = cat.insert("leaf", vec!["a".into()], true, None, None);
        (TileGrid::new(10, Arc::new(cat), 7), stone, leaf)
    }

    #[test]
    fn bounds_are_inclusive() {
        let (mut grid, stone, _) = make_grid();
        assert!(!grid.place(stone, -1, 0, false));
        assert!(!grid.place(stone, 0, 11, false));
        assert!(grid.is_empty());
        assert!(grid.place(stone, 10, 10, false));
        assert!(grid.place(stone, 0, 0, false));
        assert_eq!(grid.len(), 2);
    }

    #[test]
    fn variant_comes_from_pool() {
        let (mut grid, stone, _) = make_grid();
        for x in 0..=10 {
            grid.place(stone, x, 0, false);
        }
        assert!(grid.iter().all(|(_, _, e)| e.variant < 3));
    }

    #[test]
    fn check_and_place_replaces_background_only() {
        let (mut grid, stone, leaf) = make_grid();
        assert!(grid.place(leaf, 3, 3, true));
        assert!(grid.check_and_place(stone, 3, 3, false));
        assert_eq!(grid.query(3, 3).unwrap().material, stone);

        let before = grid.query(3, 3);
        assert!(!grid.check_and_place(leaf, 3, 3, true));
        assert_eq!(grid.query(3, 3), before);

        assert!(grid.remove(3, 3));
        assert!(grid.check_and_place(leaf, 3, 3, true));
    }

    #[test]
    fn remove_reports_change() {
        let (mut grid, stone, _) = make_grid();
        grid.place(stone, 1, 2, false);
        grid.clear_changes();
        assert!(grid.remove(1, 2));
        assert!(!grid.remove(1, 2));
        assert!(!grid.remove(-5, 2));
        let changes = grid.drain_changes();
        assert_eq!(changes.len(), 1);
        assert!(matches!(changes[0], TileChange::Removed { x: 1, y: 2, .. }));
        assert!(grid.drain_changes().is_empty());
    }

    #[test]
    fn place_over_occupied_logs_removal_first() {
        let (mut grid, stone, leaf) = make_grid();
        grid.place(leaf, 4, 4, true);
        grid.clear_changes();
        grid.place(stone, 4, 4, false);
        let changes = grid.drain_changes();
        assert_eq!(changes.len(), 2);
        assert!(matches!(changes[0], TileChange::Removed { .. }));
        assert!(matches!(changes[1], TileChange::Placed { .. }));
        assert_eq!(changes[1].entry().material, stone);
    }

    #[test]
    fn unknown_material_is_rejected() {
        let (mut grid, _, _) = make_grid();
        assert!(!grid.place(MaterialId(99), 1, 1, false));
        assert!(grid.is_empty());
    }

    #[test]
    fn stats_split_layers() {
        let (mut grid, stone, leaf) = make_grid();
        grid.place(stone, 0, 0, false);
        grid.place(leaf, 0, 1, true);
        grid.place(leaf, 0, 2, true);
        let s = grid.stats();
        assert_eq!(s.tiles, 3);
        assert_eq!(s.foreground, 1);
        assert_eq!(s.background, 2);
        assert_eq!(s.pending_changes, 3);
    }
}
