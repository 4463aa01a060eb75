use std::collections::HashMap;
use std::sync::Arc;

use proptest::prelude::*;
use strata_grid::{TileChange, TileGrid};
use strata_tiles::{MaterialCatalog, MaterialId};

const SIZE: i32 = 8;

fn catalog() -> Arc<MaterialCatalog> {
    let mut cat = MaterialCatalog::new();
    cat.insert("stone", vec!["s0".into(), "s1".into()], false, None, None);
    cat.insert("leaf", vec!["l0".into()], true, None, None);
    Arc::new(cat)
}

#[derive(Clone, Debug)]
enum Op {
    Place(u16, i32, i32, bool),
    CheckAndPlace(u16, i32, i32, bool),
    Remove(i32, i32),
}

fn coord() -> impl Strategy<Value = i32> {
    -2i32..=SIZE + 2
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u16..2, coord(), coord(), any::<bool>()).prop_map(|(m, x, y, b)| Op::Place(m, x, y, b)),
        (0u16..2, coord(), coord(), any::<bool>())
            .prop_map(|(m, x, y, b)| Op::CheckAndPlace(m, x, y, b)),
        (coord(), coord()).prop_map(|(x, y)| Op::Remove(x, y)),
    ]
}

fn in_bounds(x: i32, y: i32) -> bool {
    (0..=SIZE).contains(&x) && (0..=SIZE).contains(&y)
}

proptest! {
    // A model map of (x, y) -> is_background tracks the grid exactly under any
    // sequence of edits, including the foreground protection rule.
    #[test]
    fn edits_follow_overwrite_rules(ops in prop::collection::vec(op(), 0..64)) {
        let mut grid = TileGrid::new(SIZE, catalog(), 3);
        let mut model: HashMap<(i32, i32), (u16, bool)> = HashMap::new();
        for op in ops {
            match op {
                Op::Place(m, x, y, bg) => {
                    let ok = grid.place(MaterialId(m), x, y, bg);
                    prop_assert_eq!(ok, in_bounds(x, y));
                    if ok { model.insert((x, y), (m, bg)); }
                }
                Op::CheckAndPlace(m, x, y, bg) => {
                    let expect = in_bounds(x, y)
                        && model.get(&(x, y)).is_none_or(|&(_, old_bg)| old_bg);
                    let ok = grid.check_and_place(MaterialId(m), x, y, bg);
                    prop_assert_eq!(ok, expect);
                    if ok { model.insert((x, y), (m, bg)); }
                }
                Op::Remove(x, y) => {
                    let expect = model.remove(&(x, y)).is_some();
                    prop_assert_eq!(grid.remove(x, y), expect);
                }
            }
        }
        prop_assert_eq!(grid.len(), model.len());
        for (x, y, e) in grid.iter() {
            prop_assert!(in_bounds(x, y));
            let &(m, bg) = model.get(&(x, y)).unwrap();
            prop_assert_eq!(e.material, MaterialId(m));
            prop_assert_eq!(e.is_background, bg);
        }
    }

    // Replaying the change log from empty reproduces the grid.
    #[test]
    fn change_log_replays_to_grid(ops in prop::collection::vec(op(), 0..64)) {
        let mut grid = TileGrid::new(SIZE, catalog(), 11);
        for op in ops {
            match op {
                Op::Place(m, x, y, bg) => { grid.place(MaterialId(m), x, y, bg); }
                Op::CheckAndPlace(m, x, y, bg) => { grid.check_and_place(MaterialId(m), x, y, bg); }
                Op::Remove(x, y) => { grid.remove(x, y); }
            }
        }
        let mut replay: HashMap<(i32, i32), strata_tiles::TileEntry> = HashMap::new();
        for change in grid.drain_changes() {
            match change {
                TileChange::Placed { x, y, entry } => {
                    prop_assert!(replay.insert((x, y), entry).is_none());
                }
                TileChange::Removed { x, y, entry } => {
                    prop_assert_eq!(replay.remove(&(x, y)), Some(entry));
                }
            }
        }
        let mut expected: Vec<_> = replay.into_iter().collect();
        expected.sort_by_key(|(k, _)| *k);
        prop_assert_eq!(expected, grid.snapshot());
    }
}
